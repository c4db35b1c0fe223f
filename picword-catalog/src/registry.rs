//! The shared category registry (`data/config/categories.json`).
//!
//! The runtime accepts either `{"categories": [...]}` or a bare array. The
//! shape found on disk is kept, and descriptors of other categories are
//! carried through untouched as raw JSON.

use serde_json::{Map, Value};

use crate::error::CatalogError;
use crate::layout::registry_path;
use crate::store::CatalogStore;
use crate::types::CategoryDescriptor;

/// Result of checking a descriptor against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryStatus {
    /// Not registered yet; will be appended.
    New,
    /// Already registered with an identical descriptor.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Registry {
    /// A bare array, or an object whose `categories` key holds the array.
    root: Value,
    path: String,
}

impl Registry {
    /// Load the registry, or start an empty `{"categories": []}` one.
    pub fn load<S: CatalogStore + ?Sized>(store: &S) -> Result<Self, CatalogError> {
        let path = registry_path();
        let display = store.display(&path);
        let Some(bytes) = store.read(&path)? else {
            log::debug!("No registry at {display}; starting a new one");
            let mut root = Map::new();
            root.insert("categories".to_string(), Value::Array(Vec::new()));
            return Ok(Self {
                root: Value::Object(root),
                path: display,
            });
        };

        let mut root: Value =
            serde_json::from_slice(&bytes).map_err(|e| CatalogError::json(&display, e))?;
        match &mut root {
            Value::Array(_) => {}
            Value::Object(map) => {
                if map.get("categories").is_some_and(|c| !c.is_array()) {
                    return Err(CatalogError::invalid_registry(
                        &display,
                        "\"categories\" is not an array",
                    ));
                }
                map.entry("categories")
                    .or_insert_with(|| Value::Array(Vec::new()));
            }
            _ => {
                return Err(CatalogError::invalid_registry(
                    &display,
                    "expected an object or an array",
                ));
            }
        }

        Ok(Self {
            root,
            path: display,
        })
    }

    fn categories(&self) -> &[Value] {
        match &self.root {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("categories") {
                Some(Value::Array(items)) => items,
                _ => &[],
            },
            _ => &[],
        }
    }

    fn categories_mut(&mut self) -> Option<&mut Vec<Value>> {
        match &mut self.root {
            Value::Array(items) => Some(items),
            Value::Object(map) => match map.get_mut("categories") {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.categories().len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories().is_empty()
    }

    /// Ids of all registered categories, in registry order.
    pub fn ids(&self) -> Vec<&str> {
        self.categories()
            .iter()
            .filter_map(|c| c.get("id").and_then(Value::as_str))
            .collect()
    }

    fn find(&self, id: &str) -> Option<&Value> {
        self.categories()
            .iter()
            .find(|c| c.get("id").and_then(Value::as_str) == Some(id))
    }

    /// Parse the descriptor registered under `id`.
    pub fn get(&self, id: &str) -> Result<Option<CategoryDescriptor>, CatalogError> {
        self.find(id)
            .map(|raw| {
                serde_json::from_value(raw.clone()).map_err(|e| CatalogError::json(&self.path, e))
            })
            .transpose()
    }

    /// Whether `descriptor` can be registered.
    ///
    /// A different descriptor under the same id is a `DuplicateCategory`.
    pub fn check(&self, descriptor: &CategoryDescriptor) -> Result<RegistryStatus, CatalogError> {
        let Some(existing) = self.find(&descriptor.id) else {
            return Ok(RegistryStatus::New);
        };
        let candidate =
            serde_json::to_value(descriptor).map_err(|e| CatalogError::json(&self.path, e))?;
        if *existing == candidate {
            Ok(RegistryStatus::Unchanged)
        } else {
            Err(CatalogError::DuplicateCategory(descriptor.id.clone()))
        }
    }

    /// Append a descriptor after a successful [`check`](Self::check).
    pub fn insert(&mut self, descriptor: &CategoryDescriptor) -> Result<RegistryStatus, CatalogError> {
        let status = self.check(descriptor)?;
        if status == RegistryStatus::New {
            let value =
                serde_json::to_value(descriptor).map_err(|e| CatalogError::json(&self.path, e))?;
            let path = self.path.clone();
            self.categories_mut()
                .ok_or_else(|| CatalogError::invalid_registry(path, "no category list"))?
                .push(value);
        }
        Ok(status)
    }

    /// Pretty-printed JSON (two-space indent, trailing newline).
    pub fn to_bytes(&self) -> Result<Vec<u8>, CatalogError> {
        let mut bytes =
            serde_json::to_vec_pretty(&self.root).map_err(|e| CatalogError::json(&self.path, e))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn save<S: CatalogStore + ?Sized>(&self, store: &mut S) -> Result<(), CatalogError> {
        store.write(&registry_path(), &self.to_bytes()?)
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
