//! Edition lookup by code.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::EditionRules;

/// Installed editions keyed by code, with one designated default.
///
/// The first edition registered becomes the default. A later registration
/// only takes the default over when asked to. Registering a code again
/// replaces the earlier edition.
///
/// The registry is a plain value: wrap it in a lock if several threads must
/// register concurrently. Lookups through `&self` are free to run in
/// parallel.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use warscribe_core::edition::EditionRegistry;
/// use warscribe_core::editions::{NinthEdition, TenthEdition};
///
/// let mut registry = EditionRegistry::new();
/// registry.register(Arc::new(TenthEdition::new()), false);
/// registry.register(Arc::new(NinthEdition::new()), false);
/// assert_eq!(registry.default_code(), Some("10th"));
///
/// registry.register(Arc::new(NinthEdition::new()), true);
/// assert_eq!(registry.default_code(), Some("9th"));
/// assert_eq!(registry.available(), vec!["10th", "9th"]);
/// assert!(registry.get("8th").is_none());
/// ```
#[derive(Default)]
pub struct EditionRegistry {
    editions: BTreeMap<String, Arc<dyn EditionRules>>,
    default: Option<String>,
}

impl EditionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in editions, 10th as default.
    #[must_use]
    pub fn with_builtin_editions() -> Self {
        use crate::editions::{NinthEdition, TenthEdition};

        let mut registry = Self::new();
        registry.register(Arc::new(TenthEdition::new()), true);
        registry.register(Arc::new(NinthEdition::new()), false);
        registry
    }

    /// Installs an edition under its code.
    ///
    /// The edition becomes the default if `set_default` is true or no
    /// default exists yet.
    pub fn register(&mut self, edition: Arc<dyn EditionRules>, set_default: bool) {
        let code = edition.code().to_string();
        if self.editions.insert(code.clone(), edition).is_some() {
            tracing::debug!(edition = %code, "replaced edition");
        } else {
            tracing::debug!(edition = %code, "registered edition");
        }

        if set_default || self.default.is_none() {
            tracing::debug!(edition = %code, "default edition set");
            self.default = Some(code);
        }
    }

    /// Looks up an edition by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Arc<dyn EditionRules>> {
        self.editions.get(code).cloned()
    }

    /// The default edition, `None` if the registry is empty.
    #[must_use]
    pub fn get_default(&self) -> Option<Arc<dyn EditionRules>> {
        self.default.as_deref().and_then(|code| self.get(code))
    }

    /// Code of the default edition.
    #[must_use]
    pub fn default_code(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Installed codes, sorted.
    #[must_use]
    pub fn available(&self) -> Vec<&str> {
        self.editions.keys().map(String::as_str).collect()
    }

    /// Whether `code` is installed.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.editions.contains_key(code)
    }

    /// Number of installed editions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.editions.len()
    }

    /// Returns true if nothing is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.editions.is_empty()
    }
}

impl fmt::Debug for EditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditionRegistry")
            .field("editions", &self.available())
            .field("default", &self.default)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
