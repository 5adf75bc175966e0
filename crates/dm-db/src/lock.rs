//! In-process migration lock.

use crate::error::{DbError, DbResult};
use std::sync::atomic::{AtomicBool, Ordering};

/// Non-blocking try-lock guarding one migration sequence per driver.
///
/// Process-local only: two processes pointing at the same database file each
/// get their own flag.
#[derive(Debug, Default)]
pub struct MigrationLock {
    locked: AtomicBool,
}

impl MigrationLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock, failing immediately if it is already held.
    pub fn acquire(&self) -> DbResult<()> {
        self.locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| DbError::AlreadyLocked)
    }

    /// Release the lock. Releasing a lock that is not held is an error.
    pub fn release(&self) -> DbResult<()> {
        self.locked
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| DbError::NotLocked)
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}
