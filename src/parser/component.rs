use std::rc::Rc;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::parser::divide::{check_index, resolve_child_span, Divisible, DivisionCache};
use crate::parser::repetition::Repetition;
use crate::parser::subcomponent::Subcomponent;

#[derive(Debug)]
pub(crate) struct ComponentInner {
    repetition: Repetition,
    index0: usize,
    cache: DivisionCache,
}

impl ComponentInner {
    pub(crate) fn new(repetition: Repetition, index0: usize) -> Self {
        ComponentInner {
            repetition,
            index0,
            cache: DivisionCache::default(),
        }
    }
}

impl Divisible for ComponentInner {
    fn buffer(&self) -> &Buffer {
        self.repetition.inner.buffer()
    }
    fn cache(&self) -> &DivisionCache {
        &self.cache
    }
    fn child_delimiter(&self) -> char {
        self.repetition.field.segment.message.separators().subcomponent
    }
    fn own_span(&self) -> Result<(usize, usize)> {
        resolve_child_span(&*self.repetition.inner, self.index0)
    }
}

/// A component: a 1-based sequence of subcomponents.
#[derive(Debug, Clone)]
pub struct Component {
    pub(crate) repetition: Repetition,
    pub(crate) inner: Rc<ComponentInner>,
}

impl Component {
    pub(crate) fn from_inner(repetition: Repetition, inner: Rc<ComponentInner>) -> Self {
        Component { repetition, inner }
    }

    pub fn index(&self) -> usize {
        self.inner.index0 + 1
    }

    pub fn delimiter(&self) -> char {
        self.inner.child_delimiter()
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.repetition.inner.divisions()?.len() > self.inner.index0)
    }

    pub fn value(&self) -> Result<String> {
        let (start, len) = self.inner.own_span()?;
        Ok(self.inner.buffer().slice(start, len))
    }

    pub fn set_value(&self, value: &str) -> Result<()> {
        self.repetition.inner.set_child(self.inner.index0, value)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(crate::parser::divide::count_nonempty_trailing(
            &self.inner.divisions()?,
        ))
    }

    /// 1-based subcomponent access. Subcomponents are leaves: they carry
    /// no further divider cache of their own.
    pub fn subcomponent(&self, index: usize) -> Result<Subcomponent> {
        let external = check_index(index as i64, false)?;
        let index0 = external - 1;
        Ok(Subcomponent::new(self.clone(), index0))
    }

    pub fn delete(&self) -> Result<()> {
        self.repetition.inner.delete_child(self.inner.index0)
    }

    pub fn clone_detached(&self) -> Result<crate::parser::detached::DetachedComponent> {
        let separators = self.repetition.field.segment.message.separators();
        crate::parser::detached::DetachedComponent::from_value(&separators, &self.value()?)
    }
}
