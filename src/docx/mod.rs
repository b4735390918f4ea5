//! DOCX package parts outside the document body: relationship descriptors,
//! numbering definitions and core properties.

pub mod counters;
pub mod num_fmt;
pub mod numbering;
pub mod properties;
pub mod rels;
mod session;

pub use counters::{LevelCounts, NumberingCounters};
pub use num_fmt::NumFmt;
pub use numbering::{NumInstance, NumberingDefinitions, NumberingIndex, NumberingTable};
pub use properties::DocumentProperties;
pub use rels::{collect_rels, Relationship, RelsMap};
pub use session::DocxSession;
