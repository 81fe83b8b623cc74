//! Read-only filtered views over the store snapshot.
//!
//! All filters are conjunctive and tolerate empty results; nothing here
//! mutates. View assembly resolves foreign keys into display-ready refs.

use super::domain::{
    Assignment, CourseSection, Instructor, InstructorId, SectionId, TermId, VenueId,
};
use super::report::views::{
    AssignmentView, InstructorRef, ScheduleEntry, SectionOverview, VenueRef,
};
use super::store::ScheduleStore;

/// Venue filter for schedule views. `Remote` is the synthetic bucket for
/// assignments with no physical venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenueSelector {
    #[default]
    Any,
    Remote,
    Venue(VenueId),
}

impl VenueSelector {
    fn admits(self, venue: Option<VenueId>) -> bool {
        match self {
            Self::Any => true,
            Self::Remote => venue.is_none(),
            Self::Venue(id) => venue == Some(id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionQuery {
    pub term: TermId,
    pub search: Option<String>,
    pub only_unassigned: bool,
}

impl SectionQuery {
    pub fn for_term(term: TermId) -> Self {
        Self {
            term,
            search: None,
            only_unassigned: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleQuery {
    pub term: TermId,
    pub venue: VenueSelector,
    pub instructor: Option<InstructorId>,
    pub section_code: Option<String>,
}

impl ScheduleQuery {
    pub fn for_term(term: TermId) -> Self {
        Self {
            term,
            venue: VenueSelector::Any,
            instructor: None,
            section_code: None,
        }
    }
}

/// List course sections matching `query`, ascending by id, each with its
/// assignments for the queried term.
pub fn sections(store: &ScheduleStore, query: &SectionQuery) -> Vec<SectionOverview> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_ascii_lowercase);

    store
        .sections()
        .filter(|section| match &needle {
            Some(needle) => {
                section.code.to_ascii_lowercase().contains(needle)
                    || section.name.to_ascii_lowercase().contains(needle)
            }
            None => true,
        })
        .filter_map(|section| {
            let assignments: Vec<AssignmentView> = store
                .assignments_in(query.term)
                .filter(|assignment| assignment.section == section.id)
                .map(|assignment| assignment_view(store, assignment))
                .collect();
            if query.only_unassigned && !assignments.is_empty() {
                return None;
            }
            Some(section_overview(section, assignments))
        })
        .collect()
}

/// The weekly timetable: scheduled, staffed assignments matching `query`,
/// ordered by slot then assignment id.
pub fn schedule(store: &ScheduleStore, query: &ScheduleQuery) -> Vec<ScheduleEntry> {
    let section_filter: Option<SectionId> = match query.section_code.as_deref() {
        Some(code) => match store.section_by_code(code) {
            Some(section) => Some(section.id),
            // Unknown code matches nothing rather than erroring.
            None => return Vec::new(),
        },
        None => None,
    };

    let mut entries: Vec<ScheduleEntry> = store
        .assignments_in(query.term)
        .filter(|assignment| assignment.is_scheduled() && assignment.is_staffed())
        .filter(|assignment| query.venue.admits(assignment.venue))
        .filter(|assignment| match query.instructor {
            Some(id) => assignment.instructor == Some(id),
            None => true,
        })
        .filter(|assignment| match section_filter {
            Some(id) => assignment.section == id,
            None => true,
        })
        .filter_map(|assignment| schedule_entry(store, assignment))
        .collect();
    entries.sort_by_key(|entry| (entry.weekday, entry.start_hour, entry.assignment));
    entries
}

pub(crate) fn assignment_view(store: &ScheduleStore, assignment: &Assignment) -> AssignmentView {
    AssignmentView {
        id: assignment.id,
        term: assignment.term,
        modality: assignment.modality,
        modality_label: assignment.modality.label(),
        instructor: assignment
            .instructor
            .and_then(|id| store.instructor(id))
            .map(instructor_ref),
        venue: assignment
            .venue
            .and_then(|id| store.venue(id))
            .map(venue_ref),
        weekday: assignment.slot.map(|slot| slot.weekday),
        start_hour: assignment.slot.map(|slot| slot.start_hour),
        hosts_walk_ins: assignment.hosts_walk_ins,
    }
}

pub(crate) fn section_overview(
    section: &CourseSection,
    assignments: Vec<AssignmentView>,
) -> SectionOverview {
    SectionOverview {
        id: section.id,
        code: section.code.clone(),
        name: section.name.clone(),
        enrollment: section.enrollment,
        assignments,
    }
}

pub(crate) fn instructor_ref(instructor: &Instructor) -> InstructorRef {
    InstructorRef {
        id: instructor.id,
        full_name: instructor.full_name(),
    }
}

pub(crate) fn venue_ref(venue: &super::domain::Venue) -> VenueRef {
    VenueRef {
        id: venue.id,
        name: venue.name.clone(),
        color: venue.color.clone(),
    }
}

fn schedule_entry(store: &ScheduleStore, assignment: &Assignment) -> Option<ScheduleEntry> {
    let slot = assignment.slot?;
    let instructor = assignment.instructor.and_then(|id| store.instructor(id))?;
    let section = store.section(assignment.section)?;
    Some(ScheduleEntry {
        assignment: assignment.id,
        section_code: section.code.clone(),
        section_name: section.name.clone(),
        instructor: instructor_ref(instructor),
        venue: assignment
            .venue
            .and_then(|id| store.venue(id))
            .map(venue_ref),
        modality: assignment.modality,
        modality_label: assignment.modality.label(),
        weekday: slot.weekday,
        weekday_label: slot.weekday.label(),
        start_hour: slot.start_hour,
    })
}
