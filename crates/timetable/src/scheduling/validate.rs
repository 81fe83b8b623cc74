//! Field-combination rules gating every assignment mutation.
//!
//! Typed input cannot hold an out-of-range modality, weekday, or hour, so
//! the `UnknownValue` reason surfaces at the text boundary: the [`FromStr`]
//! impls here are what collaborators use to turn raw strings into the fixed
//! enum sets before building a draft.

use std::str::FromStr;

use super::domain::{
    AssignmentDraft, EntityKind, InstructorId, Modality, SectionId, StartHour, TermId,
    TimeSlot, VenueId, Weekday,
};
use super::store::ScheduleStore;

/// Reasons an assignment mutation is rejected. Rejected mutations leave the
/// store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAssignment {
    #[error("asynchronous assignments cannot carry an instructor, venue, or weekly slot")]
    AsyncWithScheduling,
    #[error("weekday and start hour must be set together")]
    PartialSlot,
    #[error("unknown {field} value '{value}'")]
    UnknownValue { field: &'static str, value: String },
    #[error("{kind} {id} does not exist")]
    DanglingReference { kind: EntityKind, id: u32 },
}

/// An assignment draft that passed validation, with the slot folded into
/// its typed form. Only the store can turn this into a stored assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedAssignment {
    pub modality: Modality,
    pub instructor: Option<InstructorId>,
    pub venue: Option<VenueId>,
    pub slot: Option<TimeSlot>,
    pub hosts_walk_ins: bool,
}

/// Validate a draft against the current snapshot. Checks run shape first
/// (modality rules, slot pairing), then referential integrity.
pub fn admit(
    store: &ScheduleStore,
    section: SectionId,
    term: TermId,
    draft: &AssignmentDraft,
) -> Result<AdmittedAssignment, InvalidAssignment> {
    if draft.modality == Modality::Asynchronous
        && (draft.instructor.is_some()
            || draft.venue.is_some()
            || draft.weekday.is_some()
            || draft.start_hour.is_some())
    {
        return Err(InvalidAssignment::AsyncWithScheduling);
    }

    let slot = match (draft.weekday, draft.start_hour) {
        (Some(weekday), Some(start_hour)) => Some(TimeSlot {
            weekday,
            start_hour,
        }),
        (None, None) => None,
        _ => return Err(InvalidAssignment::PartialSlot),
    };

    if store.section(section).is_none() {
        return Err(InvalidAssignment::DanglingReference {
            kind: EntityKind::CourseSection,
            id: section.0,
        });
    }
    if store.term(term).is_none() {
        return Err(InvalidAssignment::DanglingReference {
            kind: EntityKind::Term,
            id: term.0,
        });
    }
    if let Some(instructor) = draft.instructor {
        if store.instructor(instructor).is_none() {
            return Err(InvalidAssignment::DanglingReference {
                kind: EntityKind::Instructor,
                id: instructor.0,
            });
        }
    }
    if let Some(venue) = draft.venue {
        if store.venue(venue).is_none() {
            return Err(InvalidAssignment::DanglingReference {
                kind: EntityKind::Venue,
                id: venue.0,
            });
        }
    }

    Ok(AdmittedAssignment {
        modality: draft.modality,
        instructor: draft.instructor,
        venue: draft.venue,
        slot,
        hosts_walk_ins: draft.hosts_walk_ins,
    })
}

impl FromStr for Modality {
    type Err = InvalidAssignment;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|modality| modality.wire_name() == normalized)
            .ok_or_else(|| InvalidAssignment::UnknownValue {
                field: "modality",
                value: value.to_string(),
            })
    }
}

impl FromStr for Weekday {
    type Err = InvalidAssignment;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|weekday| weekday.wire_name() == normalized)
            .ok_or_else(|| InvalidAssignment::UnknownValue {
                field: "weekday",
                value: value.to_string(),
            })
    }
}

impl FromStr for StartHour {
    type Err = InvalidAssignment;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|hour| hour.label() == trimmed)
            .ok_or_else(|| InvalidAssignment::UnknownValue {
                field: "start hour",
                value: value.to_string(),
            })
    }
}
