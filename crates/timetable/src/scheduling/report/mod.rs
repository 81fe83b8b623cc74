pub mod summary;
pub mod views;

pub use summary::{classify, classify_all, summarize};
pub use views::{InstructorKind, InstructorReport, TermSummary};
