//! Per-service mutual exclusion
//!
//! Serializes the read-decide-write step of the tracker for one service
//! while leaving different services fully parallel.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{ArcMutexGuard, Mutex, RawMutex};

/// Guard held while a service's transition log is being decided on
pub type ServiceGuard = ArcMutexGuard<RawMutex, ()>;

/// Table of one mutex per service name
///
/// Entries are created on first use and kept for the life of the table; the
/// table grows with the number of distinct services, not with traffic.
#[derive(Debug, Default)]
pub struct ServiceLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ServiceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the lock for `service_name` is held
    ///
    /// The table-wide mutex is only held long enough to find the entry.
    pub fn lock(&self, service_name: &str) -> ServiceGuard {
        let lock = {
            let mut locks = self.locks.lock();
            match locks.get(service_name) {
                Some(lock) => Arc::clone(lock),
                None => {
                    let lock = Arc::new(Mutex::new(()));
                    locks.insert(service_name.to_string(), Arc::clone(&lock));
                    lock
                }
            }
        };
        lock.lock_arc()
    }
}
