use std::rc::Rc;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::parser::component::{Component, ComponentInner};
use crate::parser::divide::{check_index, resolve_child_span, ChildCache, Divisible, DivisionCache};
use crate::parser::field::Field;

#[derive(Debug)]
pub(crate) struct RepetitionInner {
    field: Field,
    index0: usize,
    cache: DivisionCache,
    children: ChildCache<ComponentInner>,
}

impl RepetitionInner {
    pub(crate) fn new(field: Field, index0: usize) -> Self {
        RepetitionInner {
            field,
            index0,
            cache: DivisionCache::default(),
            children: ChildCache::default(),
        }
    }
}

impl Divisible for RepetitionInner {
    fn buffer(&self) -> &Buffer {
        self.field.inner.buffer()
    }
    fn cache(&self) -> &DivisionCache {
        &self.cache
    }
    fn child_delimiter(&self) -> char {
        self.field.segment.message.separators().component
    }
    fn own_span(&self) -> Result<(usize, usize)> {
        resolve_child_span(&*self.field.inner, self.index0)
    }
}

/// A repetition: a 1-based sequence of components.
#[derive(Debug, Clone)]
pub struct Repetition {
    pub(crate) field: Field,
    pub(crate) inner: Rc<RepetitionInner>,
}

impl Repetition {
    pub(crate) fn from_inner(field: Field, inner: Rc<RepetitionInner>) -> Self {
        Repetition { field, inner }
    }

    pub fn index(&self) -> usize {
        self.inner.index0 + 1
    }

    pub fn delimiter(&self) -> char {
        self.inner.child_delimiter()
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.field.inner.divisions()?.len() > self.inner.index0)
    }

    pub fn value(&self) -> Result<String> {
        let (start, len) = self.inner.own_span()?;
        Ok(self.inner.buffer().slice(start, len))
    }

    pub fn set_value(&self, value: &str) -> Result<()> {
        self.field.inner.set_child(self.inner.index0, value)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(crate::parser::divide::count_nonempty_trailing(
            &self.inner.divisions()?,
        ))
    }

    pub fn component(&self, index: usize) -> Result<Component> {
        let external = check_index(index as i64, false)?;
        let index0 = external - 1;
        let inner = self
            .inner
            .children
            .get_or_create(index0, || Rc::new(ComponentInner::new(self.clone(), index0)));
        Ok(Component::from_inner(self.clone(), inner))
    }

    pub fn delete(&self) -> Result<()> {
        self.field.inner.delete_child(self.inner.index0)
    }

    pub fn clone_detached(&self) -> Result<crate::parser::detached::DetachedRepetition> {
        let separators = self.field.segment.message.separators();
        crate::parser::detached::DetachedRepetition::from_value(&separators, &self.value()?)
    }
}
