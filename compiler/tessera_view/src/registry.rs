//! Helper registry for looking up view helper types by name.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{duplicate_helper, unknown_helper, ComponentError};
use crate::helper::{HelperType, ViewHelper, ViewHelperNode};

/// Registry mapping helper names to their shared [`HelperType`].
///
/// Argument definitions are computed at registration, so a helper whose
/// declarations are broken is rejected before any template uses it.
#[derive(Debug, Default)]
pub struct HelperRegistry {
    helpers: FxHashMap<&'static str, Arc<HelperType>>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a helper under its own name.
    pub fn register(&mut self, helper: impl ViewHelper) -> Result<&mut Self, ComponentError> {
        let name = helper.name();
        if self.helpers.contains_key(name) {
            return Err(duplicate_helper(name));
        }
        let helper_type = HelperType::new(helper);
        helper_type.argument_definitions()?;
        tracing::debug!(helper = name, "registered view helper");
        self.helpers.insert(name, helper_type);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Result<&Arc<HelperType>, ComponentError> {
        self.helpers.get(name).ok_or_else(|| unknown_helper(name))
    }

    /// Create an unopened node of the named helper.
    pub fn create_node(&self, name: &str) -> Result<ViewHelperNode, ComponentError> {
        self.get(name).map(|helper| ViewHelperNode::new(Arc::clone(helper)))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.helpers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}
