//! Per-handle locks serializing legacy handler-chain mutation.
//!
//! Locks are keyed by handle identity and created on first use. The registry
//! is process-wide, so calls made through different interceptors on the same
//! handle are serialized against each other. It hands out owned leases so an
//! armed call can hold its lock until `after` runs; a lock nobody holds or
//! waits for is evicted when its last lease is released.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use parking_lot::{ArcMutexGuard, Mutex, RawMutex};

use crate::handle::TransportHandle;

/// Locks shared by every interceptor in the process.
pub(crate) static HANDLE_LOCKS: LazyLock<HandleLocks> = LazyLock::new(HandleLocks::default);

/// Identity of a borrowed transport handle: its address and size.
///
/// A wrapper whose first field is another handle shares that handle's
/// address; the size tells the two apart unless every other field of the
/// wrapper is zero-sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct HandleKey {
    addr: usize,
    size: usize,
}

impl HandleKey {
    /// Identity of the given handle.
    pub(crate) fn of(handle: &dyn TransportHandle) -> Self {
        Self {
            addr: std::ptr::from_ref(handle).cast::<()>().addr(),
            size: std::mem::size_of_val(handle),
        }
    }
}

type HandleGuard = ArcMutexGuard<RawMutex, ()>;

/// Lazily populated map of handle identity to lock.
#[derive(Debug, Default)]
pub(crate) struct HandleLocks {
    inner: DashMap<HandleKey, Arc<Mutex<()>>>,
}

impl HandleLocks {
    /// Block until the lock for `key` is held.
    pub(crate) fn acquire(&self, key: HandleKey) -> HandleLease<'_> {
        // The map entry is released before blocking on the handle lock.
        let lock = self
            .inner
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        HandleLease {
            locks: self,
            key,
            guard: Some(lock.lock_arc()),
        }
    }

    /// Drop the lock for `key` unless a lease or a waiter still refers to it.
    fn evict_unused(&self, key: HandleKey) {
        // Waiters clone the lock under the same shard lock, so a count of one
        // means the map holds the only reference.
        self.inner.remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Number of handles with a live lock.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Exclusive hold on one handle, released on drop.
pub(crate) struct HandleLease<'a> {
    locks: &'a HandleLocks,
    key: HandleKey,
    guard: Option<HandleGuard>,
}

impl Drop for HandleLease<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.evict_unused(self.key);
    }
}
