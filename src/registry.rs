//! Process-wide instance registry keyed by type, with optional named slots.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazy_static::lazy_static;
use tracing::debug;

type Key = (TypeId, Option<String>);
type Slot = Arc<dyn Any + Send + Sync>;

lazy_static! {
    static ref GLOBAL: Registry = Registry::new();
}

/// The shared process-wide registry.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Lazily constructed shared instances, one per type and name.
///
/// The initializer for a slot runs at most once; every later lookup gets a
/// clone of the same `Arc`. A panicking initializer poisons nothing for other
/// slots, the registry stays usable.
pub struct Registry {
    instances: RwLock<HashMap<Key, Slot>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// The shared instance of `T`, constructing it with `init` on first use.
    pub fn instance<T, F>(&self, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.slot(None, init)
    }

    /// Like [`instance`], but under a name, so one type can back several
    /// independent slots.
    ///
    /// [`instance`]: Registry::instance
    pub fn named_instance<T, F>(&self, name: &str, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.slot(Some(name.to_string()), init)
    }

    fn slot<T, F>(&self, name: Option<String>, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let key = (TypeId::of::<T>(), name);
        {
            let instances = self.read_slots();
            if let Some(slot) = instances.get(&key) {
                return downcast::<T>(slot.clone());
            }
        }
        let mut instances = self.write_slots();
        // Re-check under the write lock so racing callers construct only once.
        if let Some(slot) = instances.get(&key) {
            return downcast::<T>(slot.clone());
        }
        debug!(instance = type_name::<T>(), "constructing registry instance");
        let instance = Arc::new(init());
        instances.insert(key, instance.clone());
        instance
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.contains_key(&(TypeId::of::<T>(), None))
    }

    pub fn contains_named<T: Send + Sync + 'static>(&self, name: &str) -> bool {
        self.contains_key(&(TypeId::of::<T>(), Some(name.to_string())))
    }

    fn contains_key(&self, key: &Key) -> bool {
        self.read_slots().contains_key(key)
    }

    /// Drops the shared instance of `T`, returning whether one existed.
    /// Holders of previously returned `Arc`s keep their instance alive.
    pub fn remove<T: Send + Sync + 'static>(&self) -> bool {
        self.remove_key(&(TypeId::of::<T>(), None))
    }

    pub fn remove_named<T: Send + Sync + 'static>(&self, name: &str) -> bool {
        self.remove_key(&(TypeId::of::<T>(), Some(name.to_string())))
    }

    fn remove_key(&self, key: &Key) -> bool {
        self.write_slots().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.write_slots().clear();
    }

    pub fn len(&self) -> usize {
        self.read_slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panicking initializer leaves the lock poisoned; recover the guard so
    // every other slot keeps working.
    fn read_slots(&self) -> RwLockReadGuard<'_, HashMap<Key, Slot>> {
        match self.instances.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_slots(&self) -> RwLockWriteGuard<'_, HashMap<Key, Slot>> {
        match self.instances.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn downcast<T: Send + Sync + 'static>(slot: Slot) -> Arc<T> {
    // Slots are keyed by TypeId, so the stored type always matches the key.
    slot.downcast::<T>().expect("registry slot type mismatch")
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[derive(Debug)]
    struct Settings {
        label: String,
    }

    #[test]
    fn test_instance_initializes_once() {
        let registry = Registry::new();
        let calls = AtomicUsize::new(0);

        let first = registry.instance(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Settings {
                label: "first".to_string(),
            }
        });
        let second = registry.instance(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Settings {
                label: "second".to_string(),
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.label, "first");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_named_slots_are_isolated() {
        let registry = Registry::new();

        let data1 = registry.named_instance("data1", || Settings {
            label: "one".to_string(),
        });
        let data2 = registry.named_instance("data2", || Settings {
            label: "two".to_string(),
        });
        let unnamed = registry.instance(|| Settings {
            label: "plain".to_string(),
        });

        assert_eq!(data1.label, "one");
        assert_eq!(data2.label, "two");
        assert_eq!(unnamed.label, "plain");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_distinct_types_do_not_collide() {
        struct Left(u32);
        struct Right(u32);
        let registry = Registry::new();

        let left = registry.instance(|| Left(1));
        let right = registry.instance(|| Right(2));

        assert_eq!(left.0, 1);
        assert_eq!(right.0, 2);
    }

    #[test]
    fn test_contains_and_remove() {
        let registry = Registry::new();
        assert!(!registry.contains::<Settings>());

        registry.instance(|| Settings {
            label: "x".to_string(),
        });
        assert!(registry.contains::<Settings>());
        assert!(!registry.contains_named::<Settings>("other"));

        assert!(registry.remove::<Settings>());
        assert!(!registry.contains::<Settings>());
        assert!(!registry.remove::<Settings>());
    }

    #[test]
    fn test_removed_instances_stay_alive_for_holders() {
        let registry = Registry::new();
        let held = registry.instance(|| Settings {
            label: "held".to_string(),
        });

        registry.remove::<Settings>();
        assert_eq!(held.label, "held");

        let fresh = registry.instance(|| Settings {
            label: "fresh".to_string(),
        });
        assert!(!Arc::ptr_eq(&held, &fresh));
    }

    #[test]
    fn test_clear_and_len() {
        let registry = Registry::new();
        registry.named_instance("a", || 1u32);
        registry.named_instance("b", || 2u32);
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_lookups_construct_once() {
        let registry = Registry::new();
        let calls = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    registry.instance(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Settings {
                            label: "shared".to_string(),
                        }
                    });
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_panicking_initializer_keeps_registry_usable() {
        let registry = Registry::new();

        let outcome = thread::scope(|scope| {
            scope
                .spawn(|| {
                    registry.instance::<Settings, _>(|| panic!("boom"));
                })
                .join()
        });
        assert!(outcome.is_err());

        // The failed construction left no slot behind and later calls work.
        assert!(!registry.contains::<Settings>());
        let settings = registry.instance(|| Settings {
            label: "recovered".to_string(),
        });
        assert_eq!(settings.label, "recovered");
    }

    #[test]
    fn test_global_registry_is_shared() {
        struct GlobalProbe(u32);

        let first = global().instance(|| GlobalProbe(7));
        let second = global().instance(|| GlobalProbe(0));

        assert_eq!(second.0, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
