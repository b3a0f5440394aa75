// ============================================================================
// FAVORITES STORE - Favoritos locales (nunca se sincronizan con el backend)
// ============================================================================

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use crate::utils::constants::LS_FAVORITES_KEY;
use crate::utils::storage::{load_from_storage, save_to_storage, KeyValueStore};

/// Set of product ids persisted as a JSON array
#[derive(Clone)]
pub struct FavoritesStore {
    store: Rc<dyn KeyValueStore>,
    ids: Rc<RefCell<BTreeSet<i64>>>,
}

impl FavoritesStore {
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let ids: BTreeSet<i64> = load_from_storage::<Vec<i64>>(store.as_ref(), LS_FAVORITES_KEY)
            .unwrap_or_default()
            .into_iter()
            .collect();
        Self { store, ids: Rc::new(RefCell::new(ids)) }
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.ids.borrow().contains(&product_id)
    }

    pub fn len(&self) -> usize {
        self.ids.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }

    pub fn insert(&self, product_id: i64) {
        if self.ids.borrow_mut().insert(product_id) {
            self.persist();
        }
    }

    /// Flip membership; returns whether the product is now a favorite
    pub fn toggle(&self, product_id: i64) -> bool {
        let now_favorite = {
            let mut ids = self.ids.borrow_mut();
            if ids.remove(&product_id) {
                false
            } else {
                ids.insert(product_id);
                true
            }
        };
        self.persist();
        now_favorite
    }

    fn persist(&self) {
        let ids: Vec<i64> = self.ids.borrow().iter().copied().collect();
        if let Err(e) = save_to_storage(self.store.as_ref(), LS_FAVORITES_KEY, &ids) {
            log::warn!("⚠️ [FAVORITES] No se pudieron guardar los favoritos: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    #[test]
    fn toggle_persists_as_json_array() {
        let store = Rc::new(MemoryStorage::new());
        let favorites = FavoritesStore::load(store.clone());

        assert!(favorites.toggle(3));
        assert!(favorites.toggle(1));
        assert_eq!(store.get_item(LS_FAVORITES_KEY).as_deref(), Some("[1,3]"));

        assert!(!favorites.toggle(3));
        assert!(!favorites.contains(3));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn reload_restores_and_ignores_corrupt_blob() {
        let store = Rc::new(MemoryStorage::new());
        store.set_item(LS_FAVORITES_KEY, "[5,6]").unwrap();
        assert!(FavoritesStore::load(store.clone()).contains(6));

        store.set_item(LS_FAVORITES_KEY, "oops").unwrap();
        assert!(FavoritesStore::load(store).is_empty());
    }

    #[test]
    fn insert_is_idempotent() {
        let favorites = FavoritesStore::load(Rc::new(MemoryStorage::new()));
        favorites.insert(9);
        favorites.insert(9);
        assert_eq!(favorites.len(), 1);
    }
}
