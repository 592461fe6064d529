use std::collections::BTreeMap;
use std::fmt;

use crate::separators::Separators;

use super::component::ComponentBuilder;

/// Owns a sparse, 1-based map of components.
#[derive(Debug, Clone, Default)]
pub struct RepetitionBuilder {
    separators: Separators,
    components: BTreeMap<usize, ComponentBuilder>,
}

impl RepetitionBuilder {
    pub(crate) fn new(separators: Separators) -> Self {
        RepetitionBuilder {
            separators,
            components: BTreeMap::new(),
        }
    }

    pub fn component(&mut self, index: usize) -> &mut ComponentBuilder {
        self.components
            .entry(index)
            .or_insert_with(|| ComponentBuilder::new(self.separators))
    }

    pub fn component_value(&mut self, index: usize, value: impl Into<String>) -> &mut Self {
        self.component(index).set_value(&value.into());
        self
    }

    pub fn count(&self) -> usize {
        self.components.keys().next_back().copied().unwrap_or(0)
    }

    pub fn value(&self) -> String {
        let last = self.count();
        (1..=last)
            .map(|i| self.components.get(&i).map(|c| c.value()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(&self.separators.component.to_string())
    }

    pub fn set_value(&mut self, value: &str) -> &mut Self {
        self.components.clear();
        if value.is_empty() {
            return self;
        }
        for (i, part) in value.split(self.separators.component).enumerate() {
            self.component_value(i + 1, part);
        }
        self
    }
}

impl fmt::Display for RepetitionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.count();
        let parts: Vec<String> = (1..=last)
            .map(|i| match self.components.get(&i) {
                Some(c) if f.alternate() => format!("{c:#}"),
                Some(c) => format!("{c}"),
                None => String::new(),
            })
            .collect();
        write!(f, "{}", parts.join(&self.separators.component.to_string()))
    }
}
