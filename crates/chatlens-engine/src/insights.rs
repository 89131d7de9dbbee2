use chatlens_types::{InsightData, InsightItem};
use uuid::Uuid;

/// Ordered collection of extracted insight cards.
///
/// Items are appended as parses succeed and removed only by explicit user
/// action; nothing expires. Pinning is a display attribute the feed tracks
/// so the UI can keep pinned cards visible.
#[derive(Debug, Default)]
pub struct InsightFeed {
    items: Vec<InsightItem>,
}

impl InsightFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly parsed payload, returning the created item
    pub fn push(&mut self, data: InsightData) -> InsightItem {
        let item = InsightItem::new(data);
        self.items.push(item.clone());
        item
    }

    /// All items, oldest first
    pub fn items(&self) -> &[InsightItem] {
        &self.items
    }

    pub fn pinned(&self) -> impl Iterator<Item = &InsightItem> {
        self.items.iter().filter(|item| item.is_pinned)
    }

    /// Flip an item's pin state; false if the id is unknown
    pub fn toggle_pin(&mut self, id: Uuid) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.is_pinned = !item.is_pinned;
                true
            }
            None => false,
        }
    }

    /// Remove an item (the only way one ever leaves the feed)
    pub fn remove(&mut self, id: Uuid) -> Option<InsightItem> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
