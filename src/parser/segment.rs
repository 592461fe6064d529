use std::rc::Rc;

use crate::buffer::Buffer;
use crate::error::{Hl7Error, Result};
use crate::parser::divide::{check_index, resolve_child_span, ChildCache, Divisible, DivisionCache};
use crate::parser::field::{Field, FieldInner, FieldKind};
use crate::parser::message::Message;

#[derive(Debug)]
pub(crate) struct SegmentInner {
    pub(crate) message: Message,
    pub(crate) index0: usize,
    cache: DivisionCache,
    children: ChildCache<FieldInner>,
}

impl SegmentInner {
    pub(crate) fn new(message: Message, index0: usize) -> Self {
        SegmentInner {
            message,
            index0,
            cache: DivisionCache::default(),
            children: ChildCache::default(),
        }
    }

    fn type_code(&self) -> Result<String> {
        Ok(self
            .child_value(0)?
            .unwrap_or_default())
    }
}

impl Divisible for SegmentInner {
    fn buffer(&self) -> &Buffer {
        self.message.0.buffer()
    }
    fn cache(&self) -> &DivisionCache {
        &self.cache
    }
    fn child_delimiter(&self) -> char {
        self.message.separators().field
    }
    fn own_span(&self) -> Result<(usize, usize)> {
        resolve_child_span(&*self.message.0, self.index0)
    }
}

/// A segment: a 1-based sequence of fields, plus a read/write type code
/// at index 0.
#[derive(Debug, Clone)]
pub struct Segment {
    pub(crate) message: Message,
    pub(crate) inner: Rc<SegmentInner>,
}

impl Segment {
    pub(crate) fn from_inner(message: Message, inner: Rc<SegmentInner>) -> Self {
        Segment { message, inner }
    }

    /// 1-based position of this segment within its message.
    pub fn index(&self) -> usize {
        self.inner.index0 + 1
    }

    pub fn delimiter(&self) -> char {
        self.inner.child_delimiter()
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.inner.divisions()?.len() > self.inner.index0)
    }

    /// The three-letter type code (`Segment[0]`).
    pub fn segment_type(&self) -> Result<String> {
        self.inner.type_code()
    }

    /// Set the type code. Rejected on an already-`MSH` segment, since
    /// otherwise the field-delimiter semantics of fields 1-2 would
    /// silently shift underneath callers who already hold field cursors.
    pub fn set_segment_type(&self, value: &str) -> Result<()> {
        if self.inner.type_code()? == "MSH" {
            return Err(Hl7Error::MalformedHeader(
                "cannot change the type code of the header (MSH) segment".to_string(),
            ));
        }
        self.inner.set_child(0, value)
    }

    fn is_msh(&self) -> Result<bool> {
        Ok(self.inner.type_code()? == "MSH")
    }

    /// Number of populated fields (type code excluded), trailing empties
    /// not counted.
    pub fn count(&self) -> Result<usize> {
        let divisions = self.inner.divisions()?;
        Ok(crate::parser::divide::count_nonempty_trailing(&divisions).saturating_sub(1))
    }

    /// 1-based field access. Index 0 is the type code (see
    /// [`Segment::segment_type`]); on an `MSH`-type segment, index 1 is
    /// the literal field delimiter character and index 2 is the encoding
    /// characters verbatim.
    pub fn field(&self, index: usize) -> Result<Field> {
        let external = check_index(index as i64, true)?;
        if external == 0 {
            let inner = self.inner.children.get_or_create(0, || {
                Rc::new(FieldInner::new(
                    self.clone(),
                    FieldKind::Normal { division_index0: 0 },
                    0,
                ))
            });
            return Ok(Field::from_inner(self.clone(), inner));
        }
        let msh = self.is_msh()?;
        let kind = if msh && external == 1 {
            FieldKind::MshDelimiter
        } else if msh && external == 2 {
            FieldKind::MshEncoding { division_index0: 1 }
        } else if msh {
            FieldKind::Normal {
                division_index0: external - 1,
            }
        } else {
            FieldKind::Normal {
                division_index0: external,
            }
        };
        let inner = self
            .inner
            .children
            .get_or_create(external, || Rc::new(FieldInner::new(self.clone(), kind, external)));
        Ok(Field::from_inner(self.clone(), inner))
    }

    /// The segment's raw text, exactly as it currently reads.
    pub fn value(&self) -> Result<String> {
        let (start, len) = self.inner.own_span()?;
        Ok(self.inner.buffer().slice(start, len))
    }

    pub fn set_value(&self, value: &str) -> Result<()> {
        self.message.0.set_child(self.inner.index0, value)
    }

    pub fn delete(&self) -> Result<()> {
        self.message.0.delete_child(self.inner.index0)
    }

    pub fn clone_detached(&self) -> Result<crate::parser::detached::DetachedSegment> {
        crate::parser::detached::DetachedSegment::from_value(&self.value()?)
    }
}
