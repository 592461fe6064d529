//! The uniform element surface: one contract implemented by every level
//! of both the parser and builder trees, so application code navigates,
//! reads, writes, escapes, and converts values the same way regardless
//! of which backend produced the element.

use crate::convert::Converter;
use crate::error::Result;
use crate::separators::Separators;

/// A single node in either element tree.
///
/// `Detached` is the type `clone_detached` produces: an independent
/// subtree sharing no buffer or sparse map with the source.
pub trait Element {
    type Detached;

    fn value(&self) -> Result<String>;
    fn set_value(&self, value: &str) -> Result<()>;
    fn index(&self) -> usize;
    /// The delimiter used between this node's own children, or `None` on
    /// a leaf (subcomponent level).
    fn delimiter(&self) -> Option<char>;
    fn count(&self) -> Result<usize>;
    fn exists(&self) -> Result<bool>;
    fn delete(&self) -> Result<()>;
    fn clone_detached(&self) -> Result<Self::Detached>;
    fn separators(&self) -> Separators;

    /// Whether this node or anything beneath it carries non-empty
    /// content.
    fn has_significant_descendants(&self) -> Result<bool> {
        Ok(self.count()? > 0 || !self.value()?.is_empty())
    }

    fn escape(&self, s: &str) -> String {
        self.separators().escape(s)
    }

    fn unescape(&self, s: &str) -> String {
        self.separators().unescape(s)
    }

    fn as_converter(&self) -> Result<Converter> {
        Ok(Converter::new(self.value()?))
    }
}

macro_rules! impl_element {
    ($ty:ty, $detached:ty) => {
        impl Element for $ty {
            type Detached = $detached;

            fn value(&self) -> Result<String> {
                <$ty>::value(self)
            }
            fn set_value(&self, value: &str) -> Result<()> {
                <$ty>::set_value(self, value)
            }
            fn index(&self) -> usize {
                <$ty>::index(self)
            }
            fn delimiter(&self) -> Option<char> {
                Some(<$ty>::delimiter(self))
            }
            fn count(&self) -> Result<usize> {
                <$ty>::count(self)
            }
            fn exists(&self) -> Result<bool> {
                <$ty>::exists(self)
            }
            fn delete(&self) -> Result<()> {
                <$ty>::delete(self)
            }
            fn clone_detached(&self) -> Result<Self::Detached> {
                <$ty>::clone_detached(self)
            }
            fn separators(&self) -> Separators {
                self.segment_message().separators()
            }
        }
    };
}

use crate::parser::component::Component;
use crate::parser::detached::{DetachedComponent, DetachedField, DetachedRepetition, DetachedSegment};
use crate::parser::field::Field;
use crate::parser::repetition::Repetition;
use crate::parser::segment::Segment;

impl Segment {
    fn segment_message(&self) -> &crate::parser::message::Message {
        &self.message
    }
}
impl Field {
    fn segment_message(&self) -> &crate::parser::message::Message {
        &self.segment.message
    }
}
impl Repetition {
    fn segment_message(&self) -> &crate::parser::message::Message {
        &self.field.segment.message
    }
}
impl Component {
    fn segment_message(&self) -> &crate::parser::message::Message {
        &self.repetition.field.segment.message
    }
}

impl_element!(Segment, DetachedSegment);
impl_element!(Field, DetachedField);
impl_element!(Repetition, DetachedRepetition);
impl_element!(Component, DetachedComponent);

use crate::parser::detached::DetachedSubcomponent;
use crate::parser::subcomponent::Subcomponent;

impl Element for Subcomponent {
    type Detached = DetachedSubcomponent;

    fn value(&self) -> Result<String> {
        Subcomponent::value(self)
    }
    fn set_value(&self, value: &str) -> Result<()> {
        Subcomponent::set_value(self, value)
    }
    fn index(&self) -> usize {
        Subcomponent::index(self)
    }
    fn delimiter(&self) -> Option<char> {
        None
    }
    fn count(&self) -> Result<usize> {
        Ok(0)
    }
    fn exists(&self) -> Result<bool> {
        Subcomponent::exists(self)
    }
    fn delete(&self) -> Result<()> {
        Subcomponent::delete(self)
    }
    fn clone_detached(&self) -> Result<Self::Detached> {
        Subcomponent::clone_detached(self)
    }
    fn separators(&self) -> Separators {
        self.component_message().separators()
    }

    fn has_significant_descendants(&self) -> Result<bool> {
        Ok(!self.value()?.is_empty())
    }
}

impl Subcomponent {
    fn component_message(&self) -> &crate::parser::message::Message {
        self.component().segment_message()
    }
}
