//! Credential storage handed to the storefront client.
//!
//! The storefront client persists its own secrets through a [`Keychain`]. The
//! bridge gives every session a fresh [`MemoryKeychain`] so nothing survives
//! the call.

use crate::base::error::{BridgeError, BridgeResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use zeroize::Zeroize;

/// Storage capability the storefront client expects.
pub trait Keychain: Send + Sync {
    /// Returns a copy of the bytes stored under `key`.
    fn get(&self, key: &str) -> BridgeResult<Vec<u8>>;

    /// Stores a copy of `data`, overwriting any previous value.
    fn set(&self, key: &str, data: &[u8]) -> BridgeResult<()>;

    /// Removes `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> BridgeResult<()>;
}

/// Mutex-guarded key to bytes map. Replaced and removed values are zeroed.
#[derive(Debug, Default)]
pub struct MemoryKeychain {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryKeychain {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Keychain for MemoryKeychain {
    fn get(&self, key: &str) -> BridgeResult<Vec<u8>> {
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| BridgeError::NotFound(key.to_string()))
    }

    fn set(&self, key: &str, data: &[u8]) -> BridgeResult<()> {
        if let Some(mut old) = self.lock().insert(key.to_string(), data.to_vec()) {
            old.zeroize();
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> BridgeResult<()> {
        if let Some(mut old) = self.lock().remove(key) {
            old.zeroize();
        }
        Ok(())
    }
}

impl Drop for MemoryKeychain {
    fn drop(&mut self) {
        let values = self.values.get_mut().unwrap_or_else(PoisonError::into_inner);
        for value in values.values_mut() {
            value.zeroize();
        }
    }
}
