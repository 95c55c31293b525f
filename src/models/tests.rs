//! Tests for models module

use super::*;
use crate::query::Visibility;
use crate::types::Sha1;
use pretty_assertions::assert_eq;
use serde_json::json;

const TAG_PUSH: &str = include_str!("../../tests/fixtures/tag_push.json");
const PIPELINE: &str = include_str!("../../tests/fixtures/pipeline.json");

fn sha(hex: &str) -> Sha1 {
    hex.parse().unwrap()
}

// ============================================================================
// Resources
// ============================================================================

#[test]
fn test_simple_project_decodes() {
    let project: Project = serde_json::from_value(json!({
        "id": 4,
        "name": "Diaspora Client",
        "path": "diaspora-client",
        "path_with_namespace": "diaspora/diaspora-client",
        "web_url": "http://example.com/diaspora/diaspora-client",
        "created_at": "2013-09-30T13:46:02Z"
    }))
    .unwrap();

    assert_eq!(project.id, 4);
    assert_eq!(project.path_with_namespace, "diaspora/diaspora-client");
    assert!(!project.archived);
    assert!(project.topics.is_empty());
    assert!(project.statistics.is_none());
}

#[test]
fn test_full_project_decodes() {
    let project: Project = serde_json::from_value(json!({
        "id": 3,
        "name": "Puppet",
        "name_with_namespace": "Brightbox / Puppet",
        "path": "puppet",
        "path_with_namespace": "brightbox/puppet",
        "visibility": "internal",
        "archived": true,
        "topics": ["ops"],
        "namespace": { "id": 4, "name": "Brightbox", "path": "brightbox", "kind": "group" },
        "owner": { "id": 1, "username": "jdoe", "name": "Jane Doe" },
        "statistics": { "commit_count": 37, "storage_size": 1038090 }
    }))
    .unwrap();

    assert_eq!(project.visibility, Some(Visibility::Internal));
    assert!(project.archived);
    assert_eq!(project.namespace.unwrap().kind.as_deref(), Some("group"));
    assert_eq!(project.owner.unwrap().username, "jdoe");
    let stats = project.statistics.unwrap();
    assert_eq!(stats.commit_count, 37);
    assert_eq!(stats.wiki_size, 0);
}

#[test]
fn test_commit_decodes_hashes() {
    let commit: Commit = serde_json::from_value(json!({
        "id": "6104942438c14ec7bd21c6cd5bd995272b3faff6",
        "short_id": "6104942438c",
        "title": "Sanitize for network graph",
        "author_name": "randx",
        "author_email": "user@example.com",
        "authored_date": "2021-09-20T09:06:12Z",
        "committer_name": "Venkatesh",
        "committer_email": "user@example.com",
        "committed_date": "2021-09-20T09:06:12Z",
        "created_at": "2021-09-20T09:06:12Z",
        "parent_ids": [
            "ae1d9fb46aa2b07ee9836d49862ec4e2c46fbbba",
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        ],
        "stats": { "additions": 15, "deletions": 10, "total": 25 }
    }))
    .unwrap();

    assert_eq!(commit.id, sha("6104942438c14ec7bd21c6cd5bd995272b3faff6"));
    assert_eq!(commit.parents.len(), 2);
    assert!(commit.is_merge());
    assert_eq!(commit.stats.unwrap().total, 25);
}

#[test]
fn test_commit_rejects_bad_hash() {
    let result: Result<Commit, _> = serde_json::from_value(json!({
        "id": "not-a-hash",
        "short_id": "x",
        "title": "t",
        "author_name": "a",
        "author_email": "a@example.com",
        "authored_date": "2021-09-20T09:06:12Z",
        "committer_name": "a",
        "committer_email": "a@example.com",
        "committed_date": "2021-09-20T09:06:12Z",
        "created_at": "2021-09-20T09:06:12Z"
    }));
    assert!(result.is_err());
}

// ============================================================================
// Payloads
// ============================================================================

#[test]
fn test_project_update_sends_only_set_fields() {
    let update = ProjectUpdate {
        description: Some("new".to_string()),
        visibility: Some(Visibility::Public),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        json!({ "description": "new", "visibility": "public" })
    );
}

#[test]
fn test_project_create_minimal() {
    assert_eq!(
        serde_json::to_value(ProjectCreate::named("demo")).unwrap(),
        json!({ "name": "demo" })
    );
}

#[test]
fn test_snippet_multi_file_payload() {
    let snippet = SnippetCreate::new("notes", Visibility::Internal)
        .file("a.md", "# A")
        .file("b.md", "# B");
    snippet.validate().unwrap();

    assert_eq!(
        serde_json::to_value(&snippet).unwrap(),
        json!({
            "title": "notes",
            "visibility": "internal",
            "files": [
                { "file_path": "a.md", "content": "# A" },
                { "file_path": "b.md", "content": "# B" }
            ]
        })
    );
}

#[test]
fn test_snippet_legacy_single_file_is_valid() {
    let snippet = SnippetCreate {
        file_name: Some("a.txt".to_string()),
        content: Some("hello".to_string()),
        ..SnippetCreate::new("legacy", Visibility::Private)
    };
    snippet.validate().unwrap();

    let body = serde_json::to_value(&snippet).unwrap();
    assert_eq!(body["file_name"], "a.txt");
    assert!(body.get("files").is_none());
}

#[test]
fn test_snippet_validation_failures() {
    let no_title = SnippetCreate::new("  ", Visibility::Private).file("a", "b");
    assert!(no_title.validate().unwrap_err().is_invalid_argument());

    let no_files = SnippetCreate::new("t", Visibility::Private);
    assert!(no_files.validate().unwrap_err().is_invalid_argument());

    let blank_path = SnippetCreate::new("t", Visibility::Private).file(" ", "b");
    assert!(blank_path.validate().unwrap_err().is_invalid_argument());
}

// ============================================================================
// Webhooks
// ============================================================================

#[test]
fn test_tag_push_body() {
    let body = TagEventBody::from_json(TAG_PUSH).unwrap();

    assert_eq!(body.object_kind.as_deref(), Some("tag_push"));
    assert_eq!(body.git_ref.as_deref(), Some("refs/tags/v1.0.0"));
    assert_eq!(body.tag_name(), Some("v1.0.0"));
    assert!(body.before.unwrap().is_zero());
    assert!(!body.is_deletion());
    assert_eq!(
        body.checkout_sha,
        Some(sha("82b3d5ae55f7080f1e6022629cdb57bfae7cccc7"))
    );
    assert_eq!(body.user_username.as_deref(), Some("jsmith"));
    assert_eq!(body.total_commits_count, 1);

    let project = body.project.as_ref().unwrap();
    assert_eq!(project.path_with_namespace.as_deref(), Some("jsmith/example"));

    let commit = &body.commits[0];
    assert_eq!(commit.added, vec!["README.md".to_string()]);
    assert_eq!(commit.changed_paths(), 1);
    assert_eq!(commit.commit.author.as_ref().unwrap().name, "John Smith");
    assert_eq!(commit.commit.timestamp.to_rfc3339(), "2024-03-01T09:15:00+00:00");
}

#[test]
fn test_pipeline_body() {
    let body = PipelineEventBody::from_json(PIPELINE).unwrap();
    let attrs = body.object_attributes.as_ref().unwrap();

    assert_eq!(attrs.id, 31);
    assert_eq!(attrs.git_ref.as_deref(), Some("master"));
    assert!(!attrs.tag);
    assert_eq!(attrs.status.as_deref(), Some("success"));
    assert_eq!(attrs.stages, vec!["build", "test", "deploy"]);
    assert_eq!(attrs.duration, Some(63));
    assert_eq!(attrs.created_at.as_deref(), Some("2016-08-12 15:23:28 UTC"));
    assert_eq!(body.user.as_ref().unwrap().username, "root");
    assert_eq!(
        body.commit.as_ref().unwrap().id,
        sha("bcbb5ec396a2c0f828686f14fac9b80b780504f2")
    );
}

#[test]
fn test_webhook_event_dispatch() {
    let tag = WebhookEvent::from_json(TAG_PUSH).unwrap();
    assert_eq!(tag.kind(), "tag_push");
    assert!(matches!(tag, WebhookEvent::TagPush(_)));

    let pipeline = WebhookEvent::from_json(PIPELINE).unwrap();
    assert_eq!(pipeline.kind(), "pipeline");
    assert!(matches!(pipeline, WebhookEvent::Pipeline(_)));
}

#[test]
fn test_webhook_event_unknown_kind() {
    let err = WebhookEvent::from_json(r#"{"object_kind": "wiki_page"}"#).unwrap_err();
    assert!(err.to_string().contains("wiki_page"));

    let err = WebhookEvent::from_json(r#"{"ref": "main"}"#).unwrap_err();
    assert!(err.to_string().contains("object_kind"));
}

#[test]
fn test_webhook_body_not_json() {
    assert!(TagEventBody::from_json("<html>").is_err());
    assert!(WebhookEvent::from_json("<html>").is_err());
}
