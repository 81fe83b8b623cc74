use serde::Serialize;

use super::super::domain::{
    AssignmentId, InstructorId, Modality, SectionId, StartHour, TermId, VenueId, Weekday,
};

/// Derived modality mix of an instructor for one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructorKind {
    InPersonAndVirtual,
    VenueBasedVirtual,
    FullyRemote,
    Unassigned,
}

impl InstructorKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::InPersonAndVirtual,
            Self::VenueBasedVirtual,
            Self::FullyRemote,
            Self::Unassigned,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InPersonAndVirtual => "In person + virtual",
            Self::VenueBasedVirtual => "Venue-based virtual",
            Self::FullyRemote => "Fully remote",
            Self::Unassigned => "Unassigned",
        }
    }
}

/// Classification and workload aggregates for one instructor in one term.
/// Recomputed from the snapshot on every call; never cached on the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorReport {
    pub instructor: InstructorId,
    pub kind: InstructorKind,
    pub kind_label: &'static str,
    pub scheduled_hours: u32,
    pub total_enrollment: u32,
}

/// Section-level aggregate counts for one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermSummary {
    pub sections: usize,
    pub assignments: usize,
    pub asynchronous: usize,
    pub staffed: usize,
    pub unstaffed: usize,
    pub total_enrollment: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueRef {
    pub id: VenueId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorRef {
    pub id: InstructorId,
    pub full_name: String,
}

/// Presentation-ready face of one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentView {
    pub id: AssignmentId,
    pub term: TermId,
    pub modality: Modality,
    pub modality_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<InstructorRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<VenueRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<Weekday>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<StartHour>,
    pub hosts_walk_ins: bool,
}

/// One course section with its assignments for the queried term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOverview {
    pub id: SectionId,
    pub code: String,
    pub name: String,
    pub enrollment: u32,
    pub assignments: Vec<AssignmentView>,
}

/// One instructor with classification, aggregates, and assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorOverview {
    pub id: InstructorId,
    pub given_name: String,
    pub family_name: String,
    pub external_id: String,
    pub venues: Vec<VenueRef>,
    pub kind: InstructorKind,
    pub kind_label: &'static str,
    pub scheduled_hours: u32,
    pub total_enrollment: u32,
    pub assignments: Vec<AssignmentView>,
}

/// One row of the weekly timetable: a scheduled, staffed assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub assignment: AssignmentId,
    pub section_code: String,
    pub section_name: String,
    pub instructor: InstructorRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<VenueRef>,
    pub modality: Modality,
    pub modality_label: &'static str,
    pub weekday: Weekday,
    pub weekday_label: &'static str,
    pub start_hour: StartHour,
}
