use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::parser::message::Message;
use crate::separators::Separators;

use super::segment::SegmentBuilder;

/// The writable counterpart to the parser tree: every non-leaf owns a
/// sparse, 1-based map of children built independently and serialized
/// on demand.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    separators: Separators,
    segments: BTreeMap<usize, SegmentBuilder>,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        MessageBuilder::new(Separators::default())
    }
}

impl MessageBuilder {
    pub fn new(separators: Separators) -> Self {
        MessageBuilder {
            separators,
            segments: BTreeMap::new(),
        }
    }

    /// Build from an existing parsed message by copying its serialized
    /// value and re-splitting it under this builder's own sparse maps.
    pub fn from_parser(message: &Message) -> Result<Self> {
        let separators = message.separators();
        let mut builder = MessageBuilder::new(separators);
        for (i, segment_text) in message.value().split('\r').enumerate() {
            if segment_text.is_empty() {
                continue;
            }
            let type_code_len = 3.min(segment_text.len());
            let type_code = &segment_text[..type_code_len];
            let mut segment = SegmentBuilder::new(separators, type_code);
            let rest = &segment_text[type_code_len..];
            if type_code == "MSH" {
                // field 1 is the delimiter char itself; field 2 is the
                // encoding characters verbatim up to the next occurrence
                // of the field delimiter.
                if let Some(after_delim) = rest.strip_prefix(separators.field) {
                    segment.field_value(1, separators.field.to_string());
                    let encoding_end = after_delim.find(separators.field).unwrap_or(after_delim.len());
                    segment.field_value(2, &after_delim[..encoding_end]);
                    let remaining = &after_delim[encoding_end..];
                    let remaining = remaining.strip_prefix(separators.field).unwrap_or(remaining);
                    if !remaining.is_empty() {
                        let values: Vec<&str> = remaining.split(separators.field).collect();
                        segment.set_fields_from(3, &values);
                    }
                }
            } else if let Some(after_delim) = rest.strip_prefix(separators.field) {
                let values: Vec<&str> = after_delim.split(separators.field).collect();
                segment.set_fields(&values);
            }
            builder.segments.insert(i + 1, segment);
        }
        Ok(builder)
    }

    pub fn segment(&mut self, index: usize) -> &mut SegmentBuilder {
        self.segments
            .entry(index)
            .or_insert_with(|| SegmentBuilder::new(self.separators, ""))
    }

    pub fn segment_named(&self, name: &str) -> Option<&SegmentBuilder> {
        self.segments.values().find(|s| s.type_code() == name)
    }

    /// Highest populated segment index. Returns 0 on an empty message
    /// rather than failing — an empty builder has no "last" segment to
    /// report, and 0 composes cleanly with 1-based indexing.
    pub fn count(&self) -> usize {
        self.segments.keys().next_back().copied().unwrap_or(0)
    }

    /// Chainable: `Segment(i, type_code)`.
    pub fn set_segment(&mut self, index: usize, type_code: impl Into<String>) -> &mut Self {
        self.segment(index).set_type_code(type_code);
        self
    }

    /// Chainable: `Field(i, j, v)`.
    pub fn set_field(&mut self, segment: usize, field: usize, value: impl AsRef<str>) -> &mut Self {
        self.segment(segment).field_value(field, value);
        self
    }

    /// Chainable: `FieldRepetition(i, j, k, v)`.
    pub fn set_field_repetition(
        &mut self,
        segment: usize,
        field: usize,
        repetition: usize,
        value: impl Into<String>,
    ) -> &mut Self {
        self.segment(segment)
            .field(field)
            .repetition(repetition)
            .set_value(&value.into());
        self
    }

    /// Chainable: `Component(i, j, k, l, v)` (repetition fixed at 1).
    pub fn set_component(
        &mut self,
        segment: usize,
        field: usize,
        repetition: usize,
        component: usize,
        value: impl Into<String>,
    ) -> &mut Self {
        self.segment(segment)
            .field(field)
            .repetition(repetition)
            .component(component)
            .set_value(&value.into());
        self
    }

    /// Chainable: `Subcomponent(i, j, k, l, m, v)`.
    #[allow(clippy::too_many_arguments)]
    pub fn set_subcomponent(
        &mut self,
        segment: usize,
        field: usize,
        repetition: usize,
        component: usize,
        subcomponent: usize,
        value: impl Into<String>,
    ) -> &mut Self {
        self.segment(segment)
            .field(field)
            .repetition(repetition)
            .component(component)
            .subcomponent(subcomponent)
            .set_value(value);
        self
    }

    pub fn value(&self) -> String {
        let last = self.count();
        (1..=last)
            .map(|i| self.segments.get(&i).map(|s| s.value()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\r")
    }
}

impl fmt::Display for MessageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.count();
        for i in 1..=last {
            if i > 1 {
                write!(f, "\r")?;
            }
            if let Some(s) = self.segments.get(&i) {
                write!(f, "{s}")?;
            }
        }
        Ok(())
    }
}
