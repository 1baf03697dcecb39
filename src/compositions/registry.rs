use std::sync::Arc;

use crate::{
    compositions::{memo_rerender, ssr_hydration, theme::Theme},
    foundation::error::{MotionError, MotionResult},
    scene::model::{Composition, CompositionMeta},
};

/// Compositions addressable by id, in registration order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    comps: Vec<Arc<Composition>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in composition, constructed from `theme`.
    pub fn builtin(theme: &Theme) -> MotionResult<Self> {
        theme.validate()?;
        let mut reg = Self::new();
        reg.register(memo_rerender::build(theme)?)?;
        reg.register(ssr_hydration::build(theme)?)?;
        tracing::debug!(count = reg.comps.len(), "built-in compositions registered");
        Ok(reg)
    }

    pub fn register(&mut self, comp: Composition) -> MotionResult<()> {
        if self.get(comp.id()).is_some() {
            return Err(MotionError::declaration(format!(
                "composition id '{}' is already registered",
                comp.id()
            )));
        }
        self.comps.push(Arc::new(comp));
        Ok(())
    }

    pub fn list(&self) -> Vec<CompositionMeta> {
        self.comps.iter().map(|c| c.meta()).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.comps.iter().map(|c| c.id())
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Composition>> {
        self.comps.iter().find(|c| c.id() == id)
    }

    pub fn require(&self, id: &str) -> MotionResult<&Arc<Composition>> {
        self.get(id).ok_or_else(|| {
            let known: Vec<_> = self.ids().collect();
            MotionError::evaluation(format!(
                "unknown composition '{id}' (known: {})",
                known.join(", ")
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.comps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comps.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/registry.rs"]
mod tests;
