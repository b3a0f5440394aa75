// ============================================================================
// SNAPSHOT CACHE - Pintar desde caché, luego sincronizar con el backend
// ============================================================================
// Un nivel de profundidad: sin TTL, sin invalidación, sin resolución de
// conflictos. La última descarga correcta siempre gana.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use chrono::{DateTime, Local, Utc};
use serde::{Serialize, de::DeserializeOwned};
use crate::error::{ClientError, ClientResult};
use crate::utils::storage::{load_from_storage, save_to_storage, KeyValueStore};

/// Result of one [`SnapshotCache::load`]
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Server state fetched, stored and painted
    Fresh,
    /// Fetch failed; the last known-good snapshot stays on screen
    Stale(ClientError),
    /// Fetch failed with nothing cached; the empty state was painted
    Empty(ClientError),
}

impl SyncOutcome {
    pub fn is_fresh(&self) -> bool {
        matches!(self, SyncOutcome::Fresh)
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            SyncOutcome::Fresh => None,
            SyncOutcome::Stale(e) | SyncOutcome::Empty(e) => Some(e),
        }
    }
}

pub struct SnapshotCache<T> {
    store: Rc<dyn KeyValueStore>,
    key: &'static str,
    current: RefCell<T>,
    synced_at: Cell<Option<DateTime<Utc>>>,
}

impl<T> SnapshotCache<T>
where
    T: Default + Clone + Serialize + DeserializeOwned,
{
    pub fn new(store: Rc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            current: RefCell::new(T::default()),
            synced_at: Cell::new(None),
        }
    }

    pub fn current(&self) -> T {
        self.current.borrow().clone()
    }

    /// Time of the last successful fetch in this page's lifetime
    pub fn synced_at(&self) -> Option<DateTime<Utc>> {
        self.synced_at.get()
    }

    /// `"14:05"` en hora local, para avisos de datos sin actualizar
    pub fn synced_label(&self) -> Option<String> {
        self.synced_at
            .get()
            .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
    }

    /// Snapshot mirrored in storage. A corrupt blob reads as absent.
    pub fn persisted(&self) -> Option<T> {
        load_from_storage(self.store.as_ref(), self.key)
    }

    /// Accept `value` as authoritative: memory and storage both take it
    pub fn replace(&self, value: T) {
        if let Err(e) = save_to_storage(self.store.as_ref(), self.key, &value) {
            log::warn!("⚠️ [CACHE] No se pudo persistir '{}': {}", self.key, e);
        }
        *self.current.borrow_mut() = value;
        self.synced_at.set(Some(Utc::now()));
    }

    pub fn clear(&self) {
        self.store.remove_item(self.key);
        *self.current.borrow_mut() = T::default();
        self.synced_at.set(None);
    }

    /// Paint the persisted snapshot (if any), await `fetch`, then repaint with
    /// the server state. On failure the cached snapshot stays; without one
    /// the empty state is painted.
    pub async fn load<F, Fut, P>(&self, fetch: F, mut paint: P) -> SyncOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
        P: FnMut(&T),
    {
        let cached = self.persisted().or_else(|| {
            self.synced_at.get().map(|_| self.current())
        });
        if let Some(snapshot) = &cached {
            *self.current.borrow_mut() = snapshot.clone();
            paint(snapshot);
        }

        match fetch().await {
            Ok(fresh) => {
                self.replace(fresh.clone());
                paint(&fresh);
                SyncOutcome::Fresh
            }
            Err(e) if cached.is_some() => {
                log::warn!("📦 [CACHE] '{}' sin sincronizar, se mantiene la caché: {}", self.key, e);
                SyncOutcome::Stale(e)
            }
            Err(e) => {
                log::warn!("📭 [CACHE] '{}' sin datos: {}", self.key, e);
                let empty = T::default();
                *self.current.borrow_mut() = empty.clone();
                paint(&empty);
                SyncOutcome::Empty(e)
            }
        }
    }
}
