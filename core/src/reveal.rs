use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// More offers are available than are shown.
    Collapsed,
    /// Every offer is shown.
    Complete,
}

/// Paged "show more" over the current filtered list.
///
/// The controller only tracks a count; the list itself lives in the derived view. Any change to
/// that list must go through [`RevealController::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealController {
    page_size: usize,
    total: usize,
    count: usize,
}

impl RevealController {
    pub fn new(page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            total,
            count: total.min(page_size),
        }
    }

    /// Starts over for a new list. The previously revealed count is discarded.
    pub fn reset(&mut self, total: usize) {
        *self = Self::new(self.page_size, total);
    }

    /// Reveals one more page. No-op once complete.
    pub fn reveal_more(&mut self) -> RevealState {
        self.count = self.count.saturating_add(self.page_size).min(self.total);
        self.state()
    }

    pub fn state(&self) -> RevealState {
        if self.count < self.total {
            RevealState::Collapsed
        } else {
            RevealState::Complete
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn remaining(&self) -> usize {
        self.total - self.count
    }

    /// The revealed prefix of `items`.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.count.min(items.len())]
    }
}
