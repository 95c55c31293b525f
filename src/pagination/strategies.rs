//! Pagination strategy implementations
//!
//! Each strategy handles one of the two modes a list request can use.

use super::types::{NextPage, Paginator};
use reqwest::header::HeaderMap;

// ============================================================================
// Keyset Pagination
// ============================================================================

/// Keyset (cursor) pagination
///
/// The server encodes the cursor in the `rel="next"` entry of the `Link`
/// header; the URL is followed verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeysetPaginator;

impl Paginator for KeysetPaginator {
    fn next_page(&self, _request_url: &str, headers: &HeaderMap, records_count: usize) -> NextPage {
        if records_count == 0 {
            return NextPage::Done;
        }

        match link_header(headers).and_then(|h| parse_link_header(h, "next")) {
            Some(next_url) => NextPage::with_url(next_url),
            None => NextPage::Done,
        }
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Page number pagination
///
/// Follows the `Link` header when present, otherwise the `X-Next-Page`
/// header (rewriting the `page` parameter of the current request).
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetPaginator;

impl Paginator for OffsetPaginator {
    fn next_page(&self, request_url: &str, headers: &HeaderMap, records_count: usize) -> NextPage {
        if records_count == 0 {
            return NextPage::Done;
        }

        if let Some(next_url) = link_header(headers).and_then(|h| parse_link_header(h, "next")) {
            return NextPage::with_url(next_url);
        }

        let next_page = headers
            .get("x-next-page")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .and_then(|s| s.parse::<u32>().ok());

        match next_page {
            Some(page) => NextPage::with_url(set_query_param(request_url, "page", &page.to_string())),
            None => NextPage::Done,
        }
    }
}

fn link_header(headers: &HeaderMap) -> Option<&str> {
    headers.get("link").and_then(|v| v.to_str().ok())
}

/// Parse a Link header and extract the URL for the given rel
pub(crate) fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // Link header format: <url>; rel="next", <url>; rel="prev"
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                let rel_value = stripped.trim_matches('"').trim_matches('\'');
                rel = Some(rel_value);
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r == target_rel {
                return Some(u.to_string());
            }
        }
    }

    None
}

/// Replace (or add) a query parameter, leaving every other parameter
/// byte-for-byte intact.
pub(crate) fn set_query_param(url: &str, key: &str, value: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, query),
        None => (url, ""),
    };

    let prefix = format!("{key}=");
    let mut pairs: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with(&prefix) && *pair != key)
        .collect();
    let replacement = format!("{key}={value}");
    pairs.push(&replacement);

    format!("{base}?{}", pairs.join("&"))
}
