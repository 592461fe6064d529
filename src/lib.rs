//! Reads, navigates, and edits HL7 v2 pipe-delimited messages.
//!
//! A message is a sequence of segments, each a sequence of fields, each
//! a sequence of repetitions, each a sequence of components, each a
//! sequence of subcomponents — five levels separated by delimiter
//! characters declared in the message header, with literal delimiters in
//! data escaped via `ESC X ESC` sequences.
//!
//! Two trees provide the same navigation, read, write, and escape
//! surface ([`element::Element`]) over different backing storage:
//!
//! - [`parser`] — a live, versioned cursor over a mutable backing
//!   buffer. Edits splice the buffer in place and bump a version
//!   counter; descendant caches recompute lazily on the next read.
//! - [`builder`] — independent nodes holding their children in sparse
//!   index maps, serialized to text on demand.
//!
//! ```
//! use hl7v2_elements::parser::Message;
//!
//! let msg = Message::parse("MSH|^~\\&|A|B|C|D|E").unwrap();
//! assert_eq!(msg.segment(1).unwrap().segment_type().unwrap(), "MSH");
//! assert_eq!(msg.segment(1).unwrap().field(1).unwrap().value().unwrap(), "|");
//! ```

pub mod builder;
pub mod convert;
pub mod element;
pub mod error;
pub mod parser;
pub(crate) mod buffer;
pub mod separators;

pub use builder::MessageBuilder;
pub use element::Element;
pub use error::Hl7Error;
pub use parser::Message;
pub use separators::Separators;
