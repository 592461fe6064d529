use crate::error::Result;
use crate::parser::component::Component;
use crate::parser::divide::Divisible;

/// A subcomponent: the leaf of the parser element tree. It has no
/// children and no divider cache of its own — it reads and writes
/// through its parent component's division list directly.
#[derive(Debug, Clone)]
pub struct Subcomponent {
    component: Component,
    index0: usize,
}

impl Subcomponent {
    pub(crate) fn new(component: Component, index0: usize) -> Self {
        Subcomponent { component, index0 }
    }

    pub fn index(&self) -> usize {
        self.index0 + 1
    }

    pub(crate) fn component(&self) -> &Component {
        &self.component
    }

    /// Subcomponents have no further division delimiter; `None` always.
    pub fn delimiter(&self) -> Option<char> {
        None
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.component.inner.divisions()?.len() > self.index0)
    }

    pub fn value(&self) -> Result<String> {
        Ok(self
            .component
            .inner
            .child_value(self.index0)?
            .unwrap_or_default())
    }

    pub fn set_value(&self, value: &str) -> Result<()> {
        self.component.inner.set_child(self.index0, value)
    }

    pub fn delete(&self) -> Result<()> {
        self.component.inner.delete_child(self.index0)
    }

    pub fn clone_detached(&self) -> Result<crate::parser::detached::DetachedSubcomponent> {
        let separators = self
            .component
            .repetition
            .field
            .segment
            .message
            .separators();
        crate::parser::detached::DetachedSubcomponent::from_value(&separators, &self.value()?)
    }
}
