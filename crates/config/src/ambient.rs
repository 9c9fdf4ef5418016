//! Process-wide configuration store.
//!
//! Responsibilities:
//! - Hold one shared `ConfigStore` for callers that prefer free functions over
//!   passing a store around.
//! - Serialize all mutation (`init`, `add_map`) behind a single writer lock.
//!
//! Does NOT handle:
//! - Anything an owned `ConfigStore` cannot do; every function here delegates to it.
//!
//! Invariants:
//! - The store starts empty and is replaced wholesale by each `init` call.
//! - Documents are read and merged before the write lock is taken, so readers
//!   only ever observe a complete store.
//! - A poisoned lock is recovered: the store is plain data and stays consistent.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde_yaml::Mapping;

use crate::diagnostics::LogLevel;
use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::store::ConfigStore;
use crate::value::Scalar;

static AMBIENT: OnceLock<RwLock<ConfigStore>> = OnceLock::new();

fn ambient() -> &'static RwLock<ConfigStore> {
    AMBIENT.get_or_init(|| RwLock::new(ConfigStore::new()))
}

/// Run `f` with shared access to the ambient store.
pub fn with_store<R>(f: impl FnOnce(&ConfigStore) -> R) -> R {
    let guard = ambient().read().unwrap_or_else(PoisonError::into_inner);
    f(&*guard)
}

fn with_store_mut<R>(f: impl FnOnce(&mut ConfigStore) -> R) -> R {
    let mut guard = ambient().write().unwrap_or_else(PoisonError::into_inner);
    f(&mut *guard)
}

/// Load `application.yaml` and `application-{profile}.yaml` from `config_dir`
/// and make the merged result the ambient store.
pub fn init(profile: &str, config_dir: impl Into<PathBuf>, log_level: LogLevel) {
    let store = ConfigLoader::new()
        .with_profile(profile)
        .with_config_dir(config_dir)
        .with_log_level(log_level)
        .load();
    replace(store);
}

/// Replace the ambient store with an already built one.
pub fn replace(store: ConfigStore) {
    with_store_mut(|ambient| *ambient = store);
}

/// See [`ConfigStore::add_map`].
pub fn add_map(prefix: &str, custom: &Mapping) {
    with_store_mut(|store| store.add_map(prefix, custom));
}

/// A copy of the ambient store.
pub fn snapshot() -> ConfigStore {
    with_store(ConfigStore::clone)
}

pub fn get(key: &str) -> Option<Scalar> {
    with_store(|store| store.get(key).cloned())
}

pub fn get_or(key: &str, default: impl Into<Scalar>) -> Scalar {
    with_store(|store| store.get_or(key, default))
}

pub fn get_string(key: &str) -> Result<String, ConfigError> {
    with_store(|store| store.get_string(key))
}

pub fn get_string_or(key: &str, default: &str) -> Result<String, ConfigError> {
    with_store(|store| store.get_string_or(key, default))
}

pub fn get_integer(key: &str) -> Result<i64, ConfigError> {
    with_store(|store| store.get_integer(key))
}

pub fn get_integer_or(key: &str, default: i64) -> Result<i64, ConfigError> {
    with_store(|store| store.get_integer_or(key, default))
}

pub fn get_boolean(key: &str) -> Result<bool, ConfigError> {
    with_store(|store| store.get_boolean(key))
}

pub fn get_boolean_or(key: &str, default: bool) -> Result<bool, ConfigError> {
    with_store(|store| store.get_boolean_or(key, default))
}

/// See [`ConfigStore::sub_config`].
pub fn sub_config(prefix: &str) -> ConfigStore {
    with_store(|store| store.sub_config(prefix))
}

pub fn keys() -> Vec<String> {
    with_store(|store| store.keys().map(str::to_string).collect())
}

pub fn first_level_keys() -> BTreeSet<String> {
    with_store(|store| {
        store
            .first_level_keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    })
}
