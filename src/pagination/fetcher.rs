//! Single page fetch

use super::types::Page;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::v2::ListRequest;
use tracing::debug;

/// Fetch one page (1-based) of a list request
///
/// Issues exactly one executor call; items keep server order and are
/// neither reordered nor deduplicated. No retries happen here.
pub async fn fetch_page<C, R>(executor: &C, request: &R, page_number: u32) -> Result<Page<R::Entity>>
where
    C: Executor,
    R: ListRequest,
{
    if page_number == 0 {
        return Err(Error::validation("page", "page numbers start at 1"));
    }

    let page = executor.list(request, page_number).await?;

    debug!(
        path = %request.path(),
        page = page_number,
        total_pages = page.total_pages,
        items = page.len(),
        "Fetched page"
    );

    Ok(page)
}
