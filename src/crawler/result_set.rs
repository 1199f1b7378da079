use crate::crawler::page_info::PageInfo;
use std::sync::{Mutex, PoisonError};

/// Records produced by the link workers of one crawl
///
/// Workers push concurrently; records keep the order in which pushes happened, which is
/// task completion order, not link discovery order.
#[derive(Debug, Default)]
pub struct ResultSet {
    pages: Mutex<Vec<PageInfo>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, page: PageInfo) {
        self.pages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(page);
    }

    /// Takes every record collected so far, leaving the set empty
    pub fn take(&self) -> Vec<PageInfo> {
        std::mem::take(&mut *self.pages.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
