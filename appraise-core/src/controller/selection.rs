use uuid::Uuid;

use crate::types::{ItemId, SearchResult, SelectedItem};

/// Total identifier derivation: `external_id`, else the trimmed internal
/// name, else a fresh surrogate.
///
/// Surrogates are random, so an item with neither field gets a different id
/// each time it is selected and its reviews cannot be found again.
pub fn derive_item_id(item: &SearchResult) -> ItemId {
    if let Some(id) = item.external_id {
        return ItemId::External(id);
    }
    match item.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => ItemId::Named(name.to_owned()),
        _ => ItemId::Surrogate(Uuid::new_v4()),
    }
}

/// At most one item open for detail viewing.
#[derive(Debug, Default)]
pub struct SelectionState {
    current: Option<SelectedItem>,
}

impl SelectionState {
    /// Opens `item`, replacing any previous selection.
    pub fn select(&mut self, item: SearchResult) -> &SelectedItem {
        let id = derive_item_id(&item);
        tracing::debug!(%id, "item selected");
        self.current.insert(SelectedItem { id, item })
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&SelectedItem> {
        self.current.as_ref()
    }

    pub fn id(&self) -> Option<&ItemId> {
        self.current.as_ref().map(|s| &s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(external_id: Option<i64>, name: Option<&str>) -> SearchResult {
        SearchResult {
            external_id,
            name: name.map(str::to_owned),
            title: "t".into(),
            description: String::new(),
            images: Vec::new(),
            rating: None,
        }
    }

    #[test]
    fn id_prefers_external_then_name_then_surrogate() {
        assert_eq!(derive_item_id(&item(Some(9), Some("x"))), ItemId::External(9));
        assert_eq!(derive_item_id(&item(None, Some(" chess "))), ItemId::Named("chess".into()));
        assert!(matches!(derive_item_id(&item(None, Some("  "))), ItemId::Surrogate(_)));
        assert!(matches!(derive_item_id(&item(None, None)), ItemId::Surrogate(_)));
    }

    #[test]
    fn selecting_b_after_a_leaves_only_b() {
        let mut selection = SelectionState::default();
        selection.select(item(Some(1), None));
        selection.select(item(Some(2), None));
        assert_eq!(selection.id(), Some(&ItemId::External(2)));
        assert_eq!(selection.current().unwrap().item.external_id, Some(2));
    }

    #[test]
    fn close_clears_selection() {
        let mut selection = SelectionState::default();
        selection.select(item(Some(1), None));
        selection.close();
        assert!(selection.current().is_none());
        assert!(selection.id().is_none());
    }
}
