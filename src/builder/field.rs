use std::collections::BTreeMap;
use std::fmt;

use crate::separators::Separators;

use super::repetition::RepetitionBuilder;

/// Owns a sparse, 1-based map of repetitions.
#[derive(Debug, Clone, Default)]
pub struct FieldBuilder {
    separators: Separators,
    repetitions: BTreeMap<usize, RepetitionBuilder>,
}

impl FieldBuilder {
    pub(crate) fn new(separators: Separators) -> Self {
        FieldBuilder {
            separators,
            repetitions: BTreeMap::new(),
        }
    }

    pub fn repetition(&mut self, index: usize) -> &mut RepetitionBuilder {
        self.repetitions
            .entry(index)
            .or_insert_with(|| RepetitionBuilder::new(self.separators))
    }

    /// Convenience equivalent to `repetition(1).component(number)`.
    pub fn component(&mut self, number: usize) -> &mut super::component::ComponentBuilder {
        self.repetition(1).component(number)
    }

    pub fn count(&self) -> usize {
        self.repetitions.keys().next_back().copied().unwrap_or(0)
    }

    pub fn value(&self) -> String {
        let last = self.count();
        (1..=last)
            .map(|i| self.repetitions.get(&i).map(|r| r.value()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(&self.separators.repetition.to_string())
    }

    pub fn set_value(&mut self, value: &str) -> &mut Self {
        self.repetitions.clear();
        if value.is_empty() {
            return self;
        }
        for (i, part) in value.split(self.separators.repetition).enumerate() {
            self.repetition(i + 1).set_value(part);
        }
        self
    }
}

impl fmt::Display for FieldBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.count();
        let parts: Vec<String> = (1..=last)
            .map(|i| match self.repetitions.get(&i) {
                Some(r) if f.alternate() => format!("{r:#}"),
                Some(r) => format!("{r}"),
                None => String::new(),
            })
            .collect();
        write!(f, "{}", parts.join(&self.separators.repetition.to_string()))
    }
}
