//! Static catalog of egg cooking methods
//!
//! The catalog is fixed at compile time. Lookups by an unknown key return
//! `None` and callers render that as "not found".

pub mod egg_methods;

pub use egg_methods::{CookingMethod, CookingOption};

use egg_methods::METHODS;

/// Read-only access to the cooking method catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Catalog {
    /// Look up a method by key
    pub fn get(key: &str) -> Option<&'static CookingMethod> {
        METHODS.iter().find(|method| method.key == key)
    }

    /// All methods in display order
    pub fn list_all() -> &'static [CookingMethod] {
        METHODS
    }

    /// Check whether a key names a known method
    pub fn is_valid_key(key: &str) -> bool {
        Self::get(key).is_some()
    }

    /// All method keys in display order
    pub fn keys() -> impl Iterator<Item = &'static str> {
        METHODS.iter().map(|method| method.key)
    }
}
