// src/api/simple_pagination.rs
//! Walks a cursor-paginated listing to the end.

use crate::error::Result;
use crate::model::{Pagination, ResultPage};
use std::future::Future;

/// Fetches every page of a listing, in order, using async closures directly.
///
/// `fetch_page` is called with `None` first, then with each page's
/// `next_pagination` until one comes back without it. Results are
/// concatenated in fetch order; the first error aborts the walk.
pub async fn fetch_all_pages_simple<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<Pagination>) -> Fut,
    Fut: Future<Output = Result<ResultPage<T>>>,
{
    let mut all_items = Vec::new();
    let mut pagination = None;
    let mut pages_fetched = 0u32;

    loop {
        let page = fetch_page(pagination).await?;
        pages_fetched += 1;
        all_items.extend(page.results);

        match page.next_pagination {
            Some(next) => pagination = Some(next),
            None => break,
        }
    }

    log::debug!(
        "Fetched {} items over {} pages",
        all_items.len(),
        pages_fetched
    );
    Ok(all_items)
}
