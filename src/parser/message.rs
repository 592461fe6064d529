use std::rc::Rc;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::parser::divide::{check_index, ChildCache, Divisible, DivisionCache};
use crate::parser::segment::{Segment, SegmentInner};
use crate::separators::Separators;

#[derive(Debug)]
pub(crate) struct MessageInner {
    buffer: Buffer,
    cache: DivisionCache,
    children: ChildCache<SegmentInner>,
}

impl Divisible for MessageInner {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }
    fn cache(&self) -> &DivisionCache {
        &self.cache
    }
    fn child_delimiter(&self) -> char {
        '\r'
    }
    fn own_span(&self) -> Result<(usize, usize)> {
        Ok((0, self.buffer.len()))
    }
}

/// The root of a parser element tree: a live, versioned view over a
/// mutable backing buffer. Cheap to clone — a `Message` is a handle onto
/// shared state, and clones observe each other's writes (for an
/// independent copy, see [`Message::clone_detached`]).
#[derive(Debug, Clone)]
pub struct Message(pub(crate) Rc<MessageInner>);

impl Message {
    /// Parse `text` into a message. CRLF is normalized to CR; bare LF is
    /// left alone. The first segment is not required to be `MSH` — its
    /// delimiters are only derived from one when present.
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = text.replace("\r\n", "\r");
        Ok(Message(Rc::new(MessageInner {
            buffer: Buffer::new(normalized),
            cache: DivisionCache::default(),
            children: ChildCache::default(),
        })))
    }

    /// Like [`Message::parse`], but also treats bare `\n` as a segment
    /// terminator, for messages captured from line-oriented sources that
    /// don't preserve CR.
    pub fn parse_lenient(text: &str) -> Result<Self> {
        let normalized = text.replace("\r\n", "\r").replace('\n', "\r");
        Ok(Message(Rc::new(MessageInner {
            buffer: Buffer::new(normalized),
            cache: DivisionCache::default(),
            children: ChildCache::default(),
        })))
    }

    /// The delimiter set, re-read live from the first segment's header
    /// characters on every call: editing a header character changes this
    /// on the very next call.
    pub fn separators(&self) -> Separators {
        self.0.buffer.with_text(|text| {
            let header_end = text.find('\r').unwrap_or(text.len());
            Separators::from_header(&text[..header_end]).unwrap_or_default()
        })
    }

    /// The full message text, exactly as it currently reads.
    pub fn value(&self) -> String {
        self.0.buffer.with_text(|t| t.to_string())
    }

    pub fn set_value(&self, value: &str) {
        let normalized = value.replace("\r\n", "\r");
        self.0.buffer.replace(0, self.0.buffer.len(), &normalized);
    }

    /// Number of segments (last non-empty trailing segment's 1-based
    /// index; trailing empty segments are not counted).
    pub fn count(&self) -> usize {
        self.0.child_count().unwrap_or(0)
    }

    /// 1-based segment access.
    pub fn segment(&self, index: usize) -> Result<Segment> {
        let index0 = check_index(index as i64, false)? - 1;
        let inner = self
            .0
            .children
            .get_or_create(index0, || Rc::new(SegmentInner::new(self.clone(), index0)));
        Ok(Segment::from_inner(self.clone(), inner))
    }

    /// First segment whose type code equals `name`.
    pub fn segment_named(&self, name: &str) -> Result<Option<Segment>> {
        let upper_bound = self.count().max(1);
        for i in 1..=upper_bound {
            let seg = self.segment(i)?;
            if seg.exists()? && seg.segment_type()? == name {
                return Ok(Some(seg));
            }
        }
        Ok(None)
    }

    /// Detach a fresh, independent message whose root owns its own
    /// buffer and shares no state with this one: it never observes
    /// mutations made to the source after this call.
    pub fn clone_detached(&self) -> Message {
        Message::parse(&self.value()).expect("a message's own value always reparses")
    }
}
