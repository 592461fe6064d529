use std::rc::Rc;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::parser::divide::{
    check_index, resolve_child_span, split_spans, ChildCache, Divisible, DivisionCache,
};
use crate::parser::repetition::{Repetition, RepetitionInner};
use crate::parser::segment::Segment;

/// Fields are mostly a uniform repetition-delimited division of a
/// segment, except on an `MSH`-type segment, where field 1 is the literal
/// field delimiter character and field 2 is the encoding characters
/// taken verbatim (no repetition splitting).
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldKind {
    Normal { division_index0: usize },
    MshDelimiter,
    MshEncoding { division_index0: usize },
}

#[derive(Debug)]
pub(crate) struct FieldInner {
    pub(crate) segment: Segment,
    kind: FieldKind,
    external_index: usize,
    cache: DivisionCache,
    children: ChildCache<RepetitionInner>,
}

impl FieldInner {
    pub(crate) fn new(segment: Segment, kind: FieldKind, external_index: usize) -> Self {
        FieldInner {
            segment,
            kind,
            external_index,
            cache: DivisionCache::default(),
            children: ChildCache::default(),
        }
    }
}

impl Divisible for FieldInner {
    fn buffer(&self) -> &Buffer {
        self.segment.inner.buffer()
    }

    fn cache(&self) -> &DivisionCache {
        &self.cache
    }

    fn child_delimiter(&self) -> char {
        self.segment.message.separators().repetition
    }

    fn own_span(&self) -> Result<(usize, usize)> {
        match self.kind {
            FieldKind::Normal { division_index0 } | FieldKind::MshEncoding { division_index0 } => {
                resolve_child_span(&*self.segment.inner, division_index0)
            }
            FieldKind::MshDelimiter => {
                let (seg_start, _) = self.segment.inner.own_span()?;
                let type_len = self
                    .segment
                    .inner
                    .child_span(0)?
                    .map(|(_, len)| len)
                    .unwrap_or(0);
                Ok((seg_start + type_len, 1))
            }
        }
    }

    /// On `MSH`'s encoding-characters field, repetition splitting is
    /// disabled: the whole value is a single repetition, even though the
    /// repetition delimiter itself is one of its characters.
    fn divisions(&self) -> Result<Vec<(usize, usize)>> {
        if matches!(self.kind, FieldKind::MshEncoding { .. }) {
            return Ok(vec![self.own_span()?]);
        }
        let (start, len) = self.own_span()?;
        let delim = self.child_delimiter();
        let buffer = self.buffer();
        let version = buffer.version();
        Ok(self.cache().get_or_compute(version, || {
            let text = buffer.slice(start, len);
            split_spans(&text, delim)
                .into_iter()
                .map(|(off, l)| (start + off, l))
                .collect()
        }))
    }
}

/// A field: a 1-based sequence of repetitions.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) segment: Segment,
    pub(crate) inner: Rc<FieldInner>,
}

impl Field {
    pub(crate) fn from_inner(segment: Segment, inner: Rc<FieldInner>) -> Self {
        Field { segment, inner }
    }

    pub fn index(&self) -> usize {
        self.inner.external_index
    }

    pub fn delimiter(&self) -> char {
        self.inner.child_delimiter()
    }

    pub fn exists(&self) -> Result<bool> {
        match self.inner.kind {
            FieldKind::Normal { division_index0 } | FieldKind::MshEncoding { division_index0 } => {
                Ok(self.segment.inner.divisions()?.len() > division_index0)
            }
            FieldKind::MshDelimiter => Ok(true),
        }
    }

    pub fn value(&self) -> Result<String> {
        let (start, len) = self.inner.own_span()?;
        Ok(self.inner.buffer().slice(start, len))
    }

    pub fn set_value(&self, value: &str) -> Result<()> {
        match self.inner.kind {
            FieldKind::Normal { division_index0 } | FieldKind::MshEncoding { division_index0 } => {
                self.segment.inner.set_child(division_index0, value)
            }
            FieldKind::MshDelimiter => {
                let (start, len) = self.inner.own_span()?;
                self.inner.buffer().replace(start, len, value);
                Ok(())
            }
        }
    }

    /// Number of populated repetitions, trailing empties not counted.
    pub fn count(&self) -> Result<usize> {
        Ok(crate::parser::divide::count_nonempty_trailing(
            &self.inner.divisions()?,
        ))
    }

    /// 1-based repetition access.
    pub fn repetition(&self, index: usize) -> Result<Repetition> {
        let external = check_index(index as i64, false)?;
        let index0 = external - 1;
        let inner = self
            .inner
            .children
            .get_or_create(index0, || Rc::new(RepetitionInner::new(self.clone(), index0)));
        Ok(Repetition::from_inner(self.clone(), inner))
    }

    /// Convenience equivalent to `repetition(1).component(number)`, for
    /// the common case of a field with no repetitions.
    pub fn component(&self, number: usize) -> Result<crate::parser::component::Component> {
        self.repetition(1)?.component(number)
    }

    pub fn delete(&self) -> Result<()> {
        match self.inner.kind {
            FieldKind::Normal { division_index0 } | FieldKind::MshEncoding { division_index0 } => {
                self.segment.inner.delete_child(division_index0)
            }
            FieldKind::MshDelimiter => Ok(()),
        }
    }

    pub fn clone_detached(&self) -> Result<crate::parser::detached::DetachedField> {
        let separators = self.segment.message.separators();
        crate::parser::detached::DetachedField::from_value(&separators, &self.value()?)
    }
}
