//! Detached clones.
//!
//! Each wraps a freshly parsed single-segment synthetic message whose
//! header carries the same delimiters as the element that was cloned, so
//! the clone's structure (repetition/component/subcomponent splitting)
//! matches the source exactly, while sharing no buffer or version counter
//! with it.

use crate::error::Result;
use crate::parser::component::Component;
use crate::parser::field::Field;
use crate::parser::message::Message;
use crate::parser::repetition::Repetition;
use crate::parser::segment::Segment;
use crate::parser::subcomponent::Subcomponent;
use crate::separators::Separators;

fn header(separators: &Separators) -> String {
    format!(
        "MSH{}{}{}{}{}{}",
        separators.field,
        separators.component,
        separators.repetition,
        separators.escape,
        separators.subcomponent,
        separators.field,
    )
}

#[derive(Debug, Clone)]
pub struct DetachedSegment(Message);

impl DetachedSegment {
    pub(crate) fn from_value(value: &str) -> Result<Self> {
        Ok(DetachedSegment(Message::parse(value)?))
    }

    pub fn segment(&self) -> Segment {
        self.0
            .segment(1)
            .expect("a freshly parsed message always has segment 1")
    }
}

#[derive(Debug, Clone)]
pub struct DetachedField(Message);

impl DetachedField {
    pub(crate) fn from_value(separators: &Separators, value: &str) -> Result<Self> {
        let text = format!("{}{value}", header(separators));
        Ok(DetachedField(Message::parse(&text)?))
    }

    pub fn field(&self) -> Field {
        self.0
            .segment(1)
            .and_then(|s| s.field(3))
            .expect("synthetic detached header always has field 3")
    }
}

#[derive(Debug, Clone)]
pub struct DetachedRepetition(Message);

impl DetachedRepetition {
    pub(crate) fn from_value(separators: &Separators, value: &str) -> Result<Self> {
        let text = format!("{}{value}", header(separators));
        Ok(DetachedRepetition(Message::parse(&text)?))
    }

    pub fn repetition(&self) -> Repetition {
        self.0
            .segment(1)
            .and_then(|s| s.field(3))
            .and_then(|f| f.repetition(1))
            .expect("synthetic detached header always has field 3 repetition 1")
    }
}

#[derive(Debug, Clone)]
pub struct DetachedComponent(Message);

impl DetachedComponent {
    pub(crate) fn from_value(separators: &Separators, value: &str) -> Result<Self> {
        let text = format!("{}{value}", header(separators));
        Ok(DetachedComponent(Message::parse(&text)?))
    }

    pub fn component(&self) -> Component {
        self.0
            .segment(1)
            .and_then(|s| s.field(3))
            .and_then(|f| f.repetition(1))
            .and_then(|r| r.component(1))
            .expect("synthetic detached header always has field 3 repetition 1 component 1")
    }
}

#[derive(Debug, Clone)]
pub struct DetachedSubcomponent(Message);

impl DetachedSubcomponent {
    pub(crate) fn from_value(separators: &Separators, value: &str) -> Result<Self> {
        let text = format!("{}{value}", header(separators));
        Ok(DetachedSubcomponent(Message::parse(&text)?))
    }

    pub fn subcomponent(&self) -> Subcomponent {
        self.0
            .segment(1)
            .and_then(|s| s.field(3))
            .and_then(|f| f.repetition(1))
            .and_then(|r| r.component(1))
            .and_then(|c| c.subcomponent(1))
            .expect("synthetic detached header always has field 3 repetition 1 component 1 subcomponent 1")
    }
}
