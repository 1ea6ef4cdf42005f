//! Ordered, validated registry of component rule sets.

use crate::config::Component;
use crate::error::{Error, Result};

/// Registered components in declaration order.
///
/// Construction validates every rule set, so an invalid matcher or a
/// duplicate name is a fatal configuration error before any resolution can
/// happen. The registry is read-only afterwards; resolution across a batch
/// shares it by reference without locking.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: Vec<Component>,
}

impl ComponentRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Build a registry from rule sets, failing on the first invalid one.
    pub fn from_components(components: Vec<Component>) -> Result<Self> {
        let mut registry = Self::new();
        for component in components {
            registry.register(component)?;
        }
        Ok(registry)
    }

    /// Register one rule set. Registration order is resolution order, which
    /// is what makes equal-priority conflicts deterministic.
    pub fn register(&mut self, component: Component) -> Result<()> {
        component.validate()?;
        if self.components.iter().any(|c| c.name == component.name) {
            return Err(Error::validation(format!(
                "duplicate component name {:?}",
                component.name
            )));
        }
        self.components.push(component);
        Ok(())
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
