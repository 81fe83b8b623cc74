//! Derived instructor classification and term-level aggregates.
//!
//! Both functions are pure over the snapshot: classification always
//! reflects the live assignment set, so there is no cache to invalidate
//! when assignments change.

use std::collections::BTreeSet;

use super::super::domain::{Instructor, Modality, SectionId, TermId};
use super::super::store::ScheduleStore;
use super::views::{InstructorKind, InstructorReport, TermSummary};

/// Each weekly session spans two clock hours.
pub const HOURS_PER_SESSION: u32 = 2;

/// Classify one instructor for `term` and compute workload aggregates.
///
/// Kind derivation, first match wins: no assignments at all in the term
/// means `Unassigned`; any in-person assignment puts the instructor in the
/// in-person bucket (mixed with virtual or not — asynchronous assignments
/// never carry an instructor, so "only virtual" reduces to "no in-person");
/// a purely virtual instructor is venue-based when their venue association
/// is non-empty and fully remote otherwise.
pub fn classify(store: &ScheduleStore, instructor: &Instructor, term: TermId) -> InstructorReport {
    let assignments: Vec<_> = store
        .assignments_in(term)
        .filter(|assignment| assignment.instructor == Some(instructor.id))
        .collect();

    let kind = if assignments.is_empty() {
        InstructorKind::Unassigned
    } else if assignments
        .iter()
        .any(|assignment| assignment.modality == Modality::InPerson)
    {
        InstructorKind::InPersonAndVirtual
    } else if !instructor.venues.is_empty() {
        InstructorKind::VenueBasedVirtual
    } else {
        InstructorKind::FullyRemote
    };

    let scheduled_hours = assignments.len() as u32 * HOURS_PER_SESSION;

    // Sum each taught section's enrollment once, no matter how many
    // assignments of it the instructor holds.
    let sections: BTreeSet<SectionId> = assignments
        .iter()
        .map(|assignment| assignment.section)
        .collect();
    let total_enrollment = sections
        .iter()
        .filter_map(|id| store.section(*id))
        .map(|section| section.enrollment)
        .sum();

    InstructorReport {
        instructor: instructor.id,
        kind,
        kind_label: kind.label(),
        scheduled_hours,
        total_enrollment,
    }
}

/// Classify every stored instructor for `term`, ascending by id.
pub fn classify_all(store: &ScheduleStore, term: TermId) -> Vec<InstructorReport> {
    store
        .instructors()
        .map(|instructor| classify(store, instructor, term))
        .collect()
}

/// Section-level aggregate counts for `term`. Section totals and the
/// enrollment sum span the whole catalog (enrollment counted once per
/// section); the assignment counters are scoped to the term.
pub fn summarize(store: &ScheduleStore, term: TermId) -> TermSummary {
    let mut assignments = 0;
    let mut asynchronous = 0;
    let mut staffed = 0;
    let mut unstaffed = 0;
    for assignment in store.assignments_in(term) {
        assignments += 1;
        if assignment.modality == Modality::Asynchronous {
            asynchronous += 1;
        } else if assignment.is_staffed() {
            staffed += 1;
        } else {
            unstaffed += 1;
        }
    }

    TermSummary {
        sections: store.sections().count(),
        assignments,
        asynchronous,
        staffed,
        unstaffed,
        total_enrollment: store.sections().map(|section| section.enrollment).sum(),
    }
}
