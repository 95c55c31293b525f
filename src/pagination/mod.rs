//! Pagination module
//!
//! Supports: Keyset (cursor via `Link` header), Offset (page number)
//!
//! # Overview
//!
//! [`PaginationMode::select`] decides which mode a list request uses;
//! [`PaginationMode::apply`] writes the matching query parameters and
//! [`PaginationMode::paginator`] returns the strategy that walks the
//! response headers from page to page.

mod strategies;
mod types;

pub use strategies::{KeysetPaginator, OffsetPaginator};
pub use types::{NextPage, PageState, PaginationMode, Paginator};
