use std::collections::BTreeMap;
use std::fmt;

use crate::separators::Separators;

use super::field::FieldBuilder;

/// Owns a type code plus a sparse, 1-based map of fields.
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    separators: Separators,
    type_code: String,
    fields: BTreeMap<usize, FieldBuilder>,
}

impl SegmentBuilder {
    pub(crate) fn new(separators: Separators, type_code: impl Into<String>) -> Self {
        SegmentBuilder {
            separators,
            type_code: type_code.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    pub fn set_type_code(&mut self, type_code: impl Into<String>) -> &mut Self {
        self.type_code = type_code.into();
        self
    }

    pub fn field(&mut self, index: usize) -> &mut FieldBuilder {
        self.fields
            .entry(index)
            .or_insert_with(|| FieldBuilder::new(self.separators))
    }

    pub fn field_value(&mut self, index: usize, value: impl AsRef<str>) -> &mut Self {
        self.field(index).set_value(value.as_ref());
        self
    }

    /// Highest populated field index, trailing empties not counted.
    pub fn count(&self) -> usize {
        self.fields.keys().next_back().copied().unwrap_or(0)
    }

    /// Whole-replacement bulk setter: clears existing fields and
    /// populates 1..=values.len() from `values`.
    pub fn set_fields(&mut self, values: &[&str]) -> &mut Self {
        self.fields.clear();
        self.set_fields_from(1, values)
    }

    /// Starting-at-index bulk setter: overwrites fields from `start`
    /// onward, leaving earlier fields untouched.
    pub fn set_fields_from(&mut self, start: usize, values: &[&str]) -> &mut Self {
        for (offset, value) in values.iter().enumerate() {
            self.field_value(start + offset, value);
        }
        self
    }

    fn is_msh(&self) -> bool {
        self.type_code == "MSH"
    }

    pub fn value(&self) -> String {
        let last = self.count();
        let mut out = self.type_code.clone();
        if self.is_msh() {
            // field 1 (the delimiter itself) and field 2 (the encoding
            // characters) sit directly after the type code with no
            // additional delimiter between them — the delimiter *is*
            // field 1's value.
            out.push_str(&self.fields.get(&1).map(|f| f.value()).unwrap_or_default());
            out.push_str(&self.fields.get(&2).map(|f| f.value()).unwrap_or_default());
            for i in 3..=last {
                out.push(self.separators.field);
                out.push_str(&self.fields.get(&i).map(|f| f.value()).unwrap_or_default());
            }
        } else {
            for i in 1..=last {
                out.push(self.separators.field);
                out.push_str(&self.fields.get(&i).map(|f| f.value()).unwrap_or_default());
            }
        }
        out
    }
}

impl fmt::Display for SegmentBuilder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.value())
    }
}
