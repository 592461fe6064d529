use std::collections::BTreeMap;
use std::fmt;

use crate::separators::Separators;

use super::subcomponent::SubcomponentBuilder;

/// Owns a sparse, 1-based map of subcomponents.
#[derive(Debug, Clone, Default)]
pub struct ComponentBuilder {
    separators: Separators,
    subcomponents: BTreeMap<usize, SubcomponentBuilder>,
}

impl ComponentBuilder {
    pub(crate) fn new(separators: Separators) -> Self {
        ComponentBuilder {
            separators,
            subcomponents: BTreeMap::new(),
        }
    }

    pub fn subcomponent(&mut self, index: usize) -> &mut SubcomponentBuilder {
        self.subcomponents
            .entry(index)
            .or_insert_with(|| SubcomponentBuilder::new(self.separators))
    }

    pub fn subcomponent_value(&mut self, index: usize, value: impl Into<String>) -> &mut Self {
        self.subcomponent(index).set_value(value);
        self
    }

    /// Highest populated index, or 0 when empty.
    pub fn count(&self) -> usize {
        self.subcomponents.keys().next_back().copied().unwrap_or(0)
    }

    /// Joins the sparse map in ascending key order, repeating the
    /// subcomponent delimiter for gaps.
    pub fn value(&self) -> String {
        let last = self.count();
        (1..=last)
            .map(|i| {
                self.subcomponents
                    .get(&i)
                    .map(|s| s.value().to_string())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(&self.separators.subcomponent.to_string())
    }

    /// Clears the map and re-populates it by splitting on the
    /// subcomponent delimiter, numbering from 1.
    pub fn set_value(&mut self, value: &str) -> &mut Self {
        self.subcomponents.clear();
        if value.is_empty() {
            return self;
        }
        for (i, part) in value.split(self.separators.subcomponent).enumerate() {
            self.subcomponent_value(i + 1, part);
        }
        self
    }
}

impl fmt::Display for ComponentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.count();
        let parts: Vec<String> = (1..=last)
            .map(|i| match self.subcomponents.get(&i) {
                Some(s) if f.alternate() => format!("{s:#}"),
                Some(s) => format!("{s}"),
                None => String::new(),
            })
            .collect();
        write!(f, "{}", parts.join(&self.separators.subcomponent.to_string()))
    }
}
