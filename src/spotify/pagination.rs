//! Paged listing driver.
//!
//! Remote listings come back one page at a time. A [`PageCursor`] hands out
//! pages until it signals [`RemoteError::NoMorePages`]; [`fetch_all`] turns
//! that into a single call returning the complete collection.

use async_trait::async_trait;
use tracing::debug;

use super::RemoteError;

/// Source of consecutive pages of a listing.
#[async_trait]
pub trait PageCursor: Send {
    type Item: Send;

    /// Fetch the next page.
    ///
    /// Returns [`RemoteError::NoMorePages`] once the listing is exhausted.
    async fn next_page(&mut self) -> Result<Vec<Self::Item>, RemoteError>;
}

/// Drain a cursor into one collection.
///
/// Stops on [`RemoteError::NoMorePages`]; any other error aborts the listing
/// and is returned unchanged.
pub async fn fetch_all<C: PageCursor>(cursor: &mut C) -> Result<Vec<C::Item>, RemoteError> {
    let mut items = Vec::new();
    loop {
        match cursor.next_page().await {
            Ok(page) => {
                items.extend(page);
                debug!(retrieved = items.len(), "Retrieved page");
            }
            Err(RemoteError::NoMorePages) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Cursor over canned pages, reporting how often it was polled.
    struct CannedCursor {
        pages: VecDeque<Result<Vec<u32>, RemoteError>>,
        calls: usize,
    }

    impl CannedCursor {
        fn new(pages: Vec<Result<Vec<u32>, RemoteError>>) -> Self {
            Self {
                pages: pages.into(),
                calls: 0,
            }
        }
    }

    #[async_trait]
    impl PageCursor for CannedCursor {
        type Item = u32;

        async fn next_page(&mut self) -> Result<Vec<u32>, RemoteError> {
            self.calls += 1;
            self.pages.pop_front().unwrap_or(Err(RemoteError::NoMorePages))
        }
    }

    #[tokio::test]
    async fn test_collects_all_pages_in_order() {
        let mut cursor = CannedCursor::new(vec![Ok(vec![1, 2]), Ok(vec![3]), Ok(vec![])]);

        let items = fetch_all(&mut cursor).await.unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(cursor.calls, 4);
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let mut cursor = CannedCursor::new(vec![]);
        assert!(fetch_all(&mut cursor).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_errors_abort() {
        let mut cursor = CannedCursor::new(vec![
            Ok(vec![1]),
            Err(RemoteError::RateLimited),
            Ok(vec![2]),
        ]);

        let result = fetch_all(&mut cursor).await;

        assert_eq!(result, Err(RemoteError::RateLimited));
        assert_eq!(cursor.calls, 2);
    }
}
