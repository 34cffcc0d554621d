//! Thin wrappers around `window.localStorage`.

use wasm_bindgen::JsValue;

use crate::error::{Result, SiteError};

/// Key/value persistence used by the widgets. Lets the feedback store run
/// against an in-memory map in tests.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn local_storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(SiteError::StorageUnavailable)
}

fn js_error(err: JsValue) -> SiteError {
    SiteError::Storage(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        local_storage()?.remove_item(key).map_err(js_error)
    }
}

pub fn local_storage_flag(key: &str) -> bool {
    matches!(LocalStorage.get(key), Ok(Some(v)) if v == "true")
}

#[cfg(test)]
pub mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::KeyValueStore;
    use crate::error::Result;

    #[derive(Debug, Default)]
    pub struct MemoryStore {
        items: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.items.borrow_mut().remove(key);
            Ok(())
        }
    }
}
