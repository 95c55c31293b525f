//! Tests for collection module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig, Transport};
use crate::pagination::PaginationMode;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: u64,
}

fn transport_for(server: &MockServer) -> Arc<dyn Transport> {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(|i| i.id).collect()
}

/// Three keyset pages: [1, 2] -> [3, 4] -> [5]
async fn mount_keyset_pages(server: &MockServer) {
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("pagination", "keyset"))
        .and(query_param_is_missing("id_after"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{uri}/projects?pagination=keyset&order_by=id&id_after=2>; rel="next""#)
                        .as_str(),
                )
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("id_after", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{uri}/projects?pagination=keyset&order_by=id&id_after=4>; rel="next""#)
                        .as_str(),
                )
                .set_body_json(json!([{"id": 3}, {"id": 4}])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("id_after", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 5}])))
        .mount(server)
        .await;
}

#[test]
fn test_cancel_token() {
    let token = CancelToken::new();
    let shared = token.clone();
    assert!(!token.is_cancelled());
    shared.cancel();
    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_collect_all_keyset_preserves_order() {
    let server = MockServer::start().await;
    mount_keyset_pages(&server).await;

    let collection: CollectionResponse<Item> = CollectionResponse::new(
        transport_for(&server),
        "/projects?pagination=keyset&order_by=id",
        PaginationMode::Keyset,
    );
    let items = collection.collect_all().await.unwrap();

    assert_eq!(ids(&items), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_collect_all_offset_follows_next_page_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("search", "x"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "2")
                .set_body_json(json!([{"id": 9}, {"id": 7}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "")
                .set_body_json(json!([{"id": 8}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let collection: CollectionResponse<Item> =
        CollectionResponse::new(transport_for(&server), "/projects?search=x", PaginationMode::Offset);
    let items = collection.collect_all().await.unwrap();

    // server order, no client-side sorting
    assert_eq!(ids(&items), vec![9, 7, 8]);
}

#[tokio::test]
async fn test_empty_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "2")
                .set_body_json(json!([])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let collection: CollectionResponse<Item> =
        CollectionResponse::new(transport_for(&server), "/projects", PaginationMode::Offset);

    assert!(collection.collect_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lazy_stream_fetches_on_demand() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param_is_missing("id_after"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{}/projects?id_after=2>; rel="next""#, server.uri()).as_str(),
                )
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Never requested: the consumer stops after the first page
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("id_after", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .expect(0)
        .mount(&server)
        .await;

    let collection: CollectionResponse<Item> =
        CollectionResponse::new(transport_for(&server), "/projects", PaginationMode::Keyset);
    let first_two: Vec<Item> = collection
        .stream()
        .take(2)
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(ids(&first_two), vec![1, 2]);
}

#[tokio::test]
async fn test_pages_stream() {
    let server = MockServer::start().await;
    mount_keyset_pages(&server).await;

    let collection: CollectionResponse<Item> = CollectionResponse::new(
        transport_for(&server),
        "/projects?pagination=keyset&order_by=id",
        PaginationMode::Keyset,
    );
    let pages: Vec<Vec<u64>> = collection
        .pages()
        .map(|page| ids(&page.unwrap()))
        .collect()
        .await;

    assert_eq!(pages, vec![vec![1, 2], vec![3, 4], vec![5]]);
}

#[tokio::test]
async fn test_cancellation_between_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param_is_missing("id_after"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{}/projects?id_after=2>; rel="next""#, server.uri()).as_str(),
                )
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("id_after", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancelToken::new();
    let mut stream = CollectionResponse::<Item>::new(
        transport_for(&server),
        "/projects",
        PaginationMode::Keyset,
    )
    .with_cancellation(token.clone())
    .stream();

    assert_eq!(stream.next().await.unwrap().unwrap(), Item { id: 1 });

    token.cancel();

    // Already buffered item is still delivered intact
    assert_eq!(stream.next().await.unwrap().unwrap(), Item { id: 2 });

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_cancelled_before_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancelToken::new();
    token.cancel();

    let result = CollectionResponse::<Item>::new(
        transport_for(&server),
        "/projects",
        PaginationMode::Keyset,
    )
    .with_cancellation(token)
    .collect_all()
    .await;

    assert!(matches!(result, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_http_error_ends_stream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(403).set_body_string("403 Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let mut stream =
        CollectionResponse::<Item>::new(transport_for(&server), "/projects", PaginationMode::Keyset)
            .stream();

    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_first_page_only() {
    let server = MockServer::start().await;
    mount_keyset_pages(&server).await;

    let collection: CollectionResponse<Item> = CollectionResponse::new(
        transport_for(&server),
        "/projects?pagination=keyset&order_by=id",
        PaginationMode::Keyset,
    );

    assert_eq!(ids(&collection.first_page().await.unwrap()), vec![1, 2]);
}
