//! The parser element tree: a live, versioned view over a mutable
//! backing buffer, split into Message/Segment/Field/Repetition/Component/
//! Subcomponent levels on demand.

pub(crate) mod divide;

pub mod component;
pub mod detached;
pub mod field;
pub mod message;
pub mod repetition;
pub mod segment;
pub mod subcomponent;

pub use component::Component;
pub use detached::{
    DetachedComponent, DetachedField, DetachedRepetition, DetachedSegment, DetachedSubcomponent,
};
pub use field::Field;
pub use message::Message;
pub use repetition::Repetition;
pub use segment::Segment;
pub use subcomponent::Subcomponent;
