// Cursor pagination shared by the followed and followers listings.
//
// Pages are requested with a fixed size of 200. Every page is handed to the
// sink before the termination check, so the final short page is never lost.
// A page holding fewer than 200 accounts ends the listing; the returned
// cursor is not consulted for termination. Errors abort immediately.

use std::future::Future;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::twitter::models::{Account, UserPage};

/// Accounts requested per page (the API maximum).
pub const PAGE_SIZE: u32 = 200;

/// Starting cursor for `friends/list`.
pub const FOLLOWED_INITIAL_CURSOR: i64 = 0;

/// Starting cursor for `followers/list`.
pub const FOLLOWERS_INITIAL_CURSOR: i64 = -1;

/// Drain a cursored listing, passing each page's accounts to `sink`.
///
/// `fetch` is called with `(PAGE_SIZE, cursor)`. Returns the total number of
/// accounts seen.
pub async fn paginate<F, Fut, S>(
    listing: &str,
    initial_cursor: i64,
    mut fetch: F,
    mut sink: S,
) -> Result<usize>
where
    F: FnMut(u32, i64) -> Fut,
    Fut: Future<Output = Result<UserPage>>,
    S: FnMut(Vec<Account>),
{
    let mut cursor = initial_cursor;
    let mut total = 0;
    let mut pages = 0;

    loop {
        let page = fetch(PAGE_SIZE, cursor)
            .await
            .with_context(|| format!("Failed to fetch page {} of {listing}", pages + 1))?;
        pages += 1;

        let page_len = page.users.len();
        total += page_len;
        cursor = page.next_cursor;

        debug!(
            page = pages,
            page_size = page_len,
            total = total,
            next_cursor = cursor,
            "Fetched page of {}",
            listing
        );

        sink(page.users);

        if page_len < PAGE_SIZE as usize {
            break;
        }
    }

    info!(count = total, pages = pages, "Collected {}", listing);

    Ok(total)
}
