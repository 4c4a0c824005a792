//! The reward: a little photo album of dated messages, revealed when the
//! main gift opens. Navigation clamps at both ends.

use crate::card::Page;

pub struct MemoryBook {
    pages: Vec<Page>,
    current: usize,
    open: bool,
}

impl MemoryBook {
    pub fn new(pages: Vec<Page>) -> Self {
        MemoryBook {
            pages,
            current: 0,
            open: false,
        }
    }

    /// Opening always starts from the first page.
    pub fn open(&mut self) {
        self.current = 0;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn next_page(&mut self) {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.current + 1, self.pages.len().max(1))
    }
}
