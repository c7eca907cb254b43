//! Current table selection (single click or rubber-band rectangle).

use serde::{Deserialize, Serialize};

use super::table::TableId;

/// Ordered set of selected table ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<TableId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[TableId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.ids.contains(id)
    }

    /// More than one table selected, so drags move the group.
    pub fn is_group(&self) -> bool {
        self.ids.len() > 1
    }

    pub fn add(&mut self, id: TableId) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn select_only(&mut self, id: TableId) {
        self.ids.clear();
        self.ids.push(id);
    }

    pub fn replace(&mut self, ids: Vec<TableId>) {
        self.ids = ids;
        self.ids.dedup();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids for which `exists` returns false.
    pub fn retain(&mut self, mut exists: impl FnMut(&TableId) -> bool) {
        self.ids.retain(|id| exists(id));
    }
}
