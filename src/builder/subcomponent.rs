use std::fmt;

use crate::separators::Separators;

/// A leaf in the builder tree: a single owned string value.
#[derive(Debug, Clone, Default)]
pub struct SubcomponentBuilder {
    separators: Separators,
    value: String,
}

impl SubcomponentBuilder {
    pub(crate) fn new(separators: Separators) -> Self {
        SubcomponentBuilder {
            separators,
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }
}

/// `{}` prints the value as stored; `{:#}` prints it escaped for
/// embedding verbatim into message text.
impl fmt::Display for SubcomponentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}", self.separators.escape(&self.value))
        } else {
            write!(f, "{}", self.value)
        }
    }
}
