//! Course-section staffing core: entity store, assignment validation,
//! conflict detection, derived classification, and filtered views.

pub mod conflict;
pub mod domain;
pub mod query;
pub mod report;
pub mod service;
pub mod store;
pub mod validate;

#[cfg(test)]
mod tests;

pub use conflict::{detect, Conflict, ConflictKind, ConflictSeverity};
pub use domain::{
    Assignment, AssignmentDraft, AssignmentId, CourseSection, EntityKind, Instructor,
    InstructorId, Modality, SectionId, StartHour, Term, TermId, TimeSlot, Venue, VenueId,
    Weekday,
};
pub use query::{ScheduleQuery, SectionQuery, VenueSelector};
pub use report::views::{
    AssignmentView, InstructorOverview, InstructorRef, ScheduleEntry, SectionOverview, VenueRef,
};
pub use report::{InstructorKind, InstructorReport, TermSummary};
pub use service::{SchedulingError, SchedulingService};
pub use store::{RemovalMode, ScheduleStore, StoreError};
pub use validate::{admit, AdmittedAssignment, InvalidAssignment};
