// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-run memo table.
//!
//! Maps `(family, entity)` to the name of the artifact produced for it.
//! Every key owns a slot guarded by its own mutex; the outer map lock is
//! held only long enough to find or create the slot. Whoever takes the slot
//! lock first runs the producer, everyone else waits on that slot and then
//! reads the cached name. Different keys never wait on each other, so a
//! producer may recurse into other keys (supertypes) freely.
//!
//! ```text
//! get_or_create(Dto, "a.Leaf")
//!   ├── map lock ─ find/create slot ─ unlock
//!   └── slot lock
//!         ├── Some(name) → Cached(name)
//!         └── None → produce() → store → Created(name)
//! ```
//!
//! A producer that fails leaves the slot empty, so a later request retries.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError, TryLockError}
};

use crate::error::Result;

/// Artifact family a registry key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactFamily {
    /// DTO class.
    Dto,
    /// DAO interface.
    Dao,
    /// Converter method.
    Converter
}

/// Result of a registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Produced by this call.
    Created(String),
    /// Produced earlier.
    Cached(String)
}

impl Lookup {
    /// Artifact name.
    pub fn name(&self) -> &str {
        match self {
            Self::Created(name) | Self::Cached(name) => name
        }
    }

    /// Whether this call produced the artifact.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

type Slot = Arc<Mutex<Option<String>>>;

/// Memo table with one writer per key.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Mutex<HashMap<(ArtifactFamily, String), Slot>>
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached name for `(family, entity)`, or run `produce` exactly once.
    ///
    /// # Errors
    ///
    /// Propagates the producer's error; the slot stays empty.
    pub fn get_or_create<F>(
        &self,
        family: ArtifactFamily,
        entity: &str,
        produce: F
    ) -> Result<Lookup>
    where
        F: FnOnce() -> Result<String>
    {
        let slot = self.slot(family, entity);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(name) = guard.as_ref() {
            return Ok(Lookup::Cached(name.clone()));
        }
        let name = produce()?;
        *guard = Some(name.clone());
        Ok(Lookup::Created(name))
    }

    /// Cached name, without producing.
    ///
    /// Waits if another thread is producing the same key.
    pub fn get(&self, family: ArtifactFamily, entity: &str) -> Option<String> {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(&(family, entity.to_string())).cloned()
        }?;
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Number of filled slots.
    ///
    /// A slot whose producer is still running counts as empty.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .values()
            .filter(|slot| match slot.try_lock() {
                Ok(guard) => guard.is_some(),
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().is_some(),
                Err(TryLockError::WouldBlock) => false
            })
            .count()
    }

    /// Whether no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every slot.
    pub fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn slot(&self, family: ArtifactFamily, entity: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry((family, entity.to_string())).or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread
    };

    use super::*;
    use crate::error::GenerationError;

    #[test]
    fn produces_once() {
        let registry = Registry::new();
        let first = registry
            .get_or_create(ArtifactFamily::Dto, "a.User", || Ok("a.UserDTO".into()))
            .unwrap();
        let second = registry
            .get_or_create(ArtifactFamily::Dto, "a.User", || {
                panic!("producer must not run twice")
            })
            .unwrap();
        assert_eq!(first, Lookup::Created("a.UserDTO".into()));
        assert_eq!(second, Lookup::Cached("a.UserDTO".into()));
        assert_eq!(second.name(), "a.UserDTO");
    }

    #[test]
    fn families_are_independent() {
        let registry = Registry::new();
        registry
            .get_or_create(ArtifactFamily::Dto, "a.User", || Ok("dto".into()))
            .unwrap();
        let dao = registry
            .get_or_create(ArtifactFamily::Dao, "a.User", || Ok("dao".into()))
            .unwrap();
        assert!(dao.is_created());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn failure_leaves_slot_empty() {
        let registry = Registry::new();
        let err = registry
            .get_or_create(ArtifactFamily::Dao, "a.User", || {
                Err(GenerationError::MissingPrimaryKey {
                    entity: "a.User".into()
                })
            })
            .unwrap_err();
        assert!(matches!(err, GenerationError::MissingPrimaryKey { .. }));
        assert_eq!(registry.get(ArtifactFamily::Dao, "a.User"), None);

        let retry = registry
            .get_or_create(ArtifactFamily::Dao, "a.User", || Ok("dao".into()))
            .unwrap();
        assert!(retry.is_created());
    }

    #[test]
    fn recursion_into_other_keys() {
        let registry = Registry::new();
        let leaf = registry
            .get_or_create(ArtifactFamily::Dto, "a.Leaf", || {
                registry.get_or_create(ArtifactFamily::Dto, "a.Base", || Ok("BaseDTO".into()))?;
                Ok("LeafDTO".into())
            })
            .unwrap();
        assert!(leaf.is_created());
        assert_eq!(registry.get(ArtifactFamily::Dto, "a.Base"), Some("BaseDTO".into()));
    }

    #[test]
    fn slot_in_production_is_not_counted() {
        let registry = Registry::new();
        registry
            .get_or_create(ArtifactFamily::Dto, "a.Base", || Ok("BaseDTO".into()))
            .unwrap();
        registry
            .get_or_create(ArtifactFamily::Dto, "a.Leaf", || {
                assert_eq!(registry.len(), 1);
                Ok("LeafDTO".into())
            })
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn concurrent_requests_produce_once() {
        let registry = Registry::new();
        let runs = AtomicUsize::new(0);
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    registry
                        .get_or_create(ArtifactFamily::Converter, "a.Shared", || {
                            runs.fetch_add(1, Ordering::SeqCst);
                            Ok("convertToDto(a.Shared)".into())
                        })
                        .unwrap();
                });
            }
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_resets() {
        let registry = Registry::new();
        registry
            .get_or_create(ArtifactFamily::Dto, "a.User", || Ok("dto".into()))
            .unwrap();
        registry.clear();
        assert!(registry.is_empty());
    }
}
