//! Scheduling-conflict detection over the current assignment snapshot.
//!
//! Detection is a pure function of the store and a term: it never mutates,
//! and two runs over the same snapshot produce identical, order-stable
//! output. Only assignments with a complete weekly slot can conflict.

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{AssignmentId, InstructorId, SectionId, TermId, TimeSlot};
use super::store::ScheduleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    InstructorDoubleBooked,
    SharedSectionSlot,
}

impl ConflictKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InstructorDoubleBooked => "Instructor double-booked",
            Self::SharedSectionSlot => "Section slot collision",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    High,
}

impl ConflictSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
        }
    }
}

/// One detected collision. A group of n colliding assignments yields a
/// single record listing all n members, sorted by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub severity: ConflictSeverity,
    pub slot: TimeSlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<InstructorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionId>,
    pub assignments: Vec<AssignmentId>,
    pub message: String,
}

/// Detect both conflict kinds for `term`. Instructor conflicts come first,
/// each kind ascending by its grouping key.
pub fn detect(store: &ScheduleStore, term: TermId) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    let mut by_instructor: BTreeMap<(InstructorId, TimeSlot), Vec<AssignmentId>> =
        BTreeMap::new();
    for assignment in store.assignments_in(term) {
        let (Some(slot), Some(instructor)) = (assignment.slot, assignment.instructor) else {
            continue;
        };
        by_instructor
            .entry((instructor, slot))
            .or_default()
            .push(assignment.id);
    }
    for ((instructor, slot), mut members) in by_instructor {
        if members.len() < 2 {
            continue;
        }
        members.sort();
        conflicts.push(Conflict {
            kind: ConflictKind::InstructorDoubleBooked,
            severity: ConflictSeverity::High,
            slot,
            instructor: Some(instructor),
            section: None,
            assignments: members.clone(),
            message: instructor_message(store, instructor, slot, &members),
        });
    }

    let mut by_section: BTreeMap<(SectionId, TimeSlot), Vec<AssignmentId>> = BTreeMap::new();
    for assignment in store.assignments_in(term) {
        if !assignment.modality.is_live() {
            continue;
        }
        let Some(slot) = assignment.slot else {
            continue;
        };
        by_section
            .entry((assignment.section, slot))
            .or_default()
            .push(assignment.id);
    }
    for ((section, slot), mut members) in by_section {
        if members.len() < 2 {
            continue;
        }
        members.sort();
        conflicts.push(Conflict {
            kind: ConflictKind::SharedSectionSlot,
            severity: ConflictSeverity::High,
            slot,
            instructor: None,
            section: Some(section),
            assignments: members.clone(),
            message: section_message(store, section, slot, members.len()),
        });
    }

    conflicts
}

fn instructor_message(
    store: &ScheduleStore,
    instructor: InstructorId,
    slot: TimeSlot,
    members: &[AssignmentId],
) -> String {
    let name = store
        .instructor(instructor)
        .map(|found| found.full_name())
        .unwrap_or_else(|| format!("instructor {instructor}"));
    let sections = members
        .iter()
        .filter_map(|id| store.assignment(*id))
        .filter_map(|assignment| store.section(assignment.section))
        .map(|section| section.code.clone())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{name} is booked for {sections} on {slot}")
}

fn section_message(
    store: &ScheduleStore,
    section: SectionId,
    slot: TimeSlot,
    sessions: usize,
) -> String {
    let code = store
        .section(section)
        .map(|section| section.code.clone())
        .unwrap_or_else(|| format!("section {section}"));
    format!(
        "{code} has {sessions} live sessions on {slot} contending for the section's \
         single meeting link"
    )
}
