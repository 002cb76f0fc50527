use axum::http::StatusCode;

use crate::page::{Page, PageDocument};

/// `BAD_REQUEST` when any page in `body` is marked missing, `OK` otherwise.
///
/// Best effort: a body that is not a page document, or carries no usable
/// `pages`, counts as found so extraction can still answer.
pub fn classify(body: &str) -> StatusCode {
    let Some(doc) = PageDocument::parse(body) else {
        return StatusCode::OK;
    };
    let Some(pages) = doc.pages() else {
        tracing::debug!("upstream document has no pages; treating as found");
        return StatusCode::OK;
    };

    if pages.iter().any(Page::is_missing) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    }
}
