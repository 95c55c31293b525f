//! Collection enumeration module
//!
//! # Overview
//!
//! - `collect_all()` drains every page into a `Vec` (eager)
//! - `stream()` / `pages()` fetch pages on demand (lazy)
//! - `with_cancellation()` stops further page fetches once the token is
//!   cancelled and surfaces `Error::Cancelled`
//!
//! Items keep the order the server returned them in.

mod response;
mod types;

pub use response::CollectionResponse;
pub use types::{CancelToken, ItemStream, PageStream};

#[cfg(test)]
mod tests;
