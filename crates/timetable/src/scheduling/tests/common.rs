use std::collections::BTreeSet;

use crate::scheduling::domain::{
    Assignment, AssignmentDraft, CourseSection, Instructor, InstructorId, Modality,
    SectionId, StartHour, Term, TermId, Venue, VenueId, Weekday,
};
use crate::scheduling::service::SchedulingService;
use crate::scheduling::store::ScheduleStore;
use crate::scheduling::validate;

pub(super) const TERM: TermId = TermId(1);
pub(super) const OTHER_TERM: TermId = TermId(2);

pub(super) fn venue(id: u32, name: &str) -> Venue {
    Venue {
        id: VenueId(id),
        name: name.to_string(),
        color: "bg-blue-500".to_string(),
    }
}

pub(super) fn term(id: TermId, number: u8, active: bool) -> Term {
    Term {
        id,
        name: format!("Term {number} 2026"),
        year: 2026,
        number,
        active,
    }
}

pub(super) fn section(id: u32, code: &str, name: &str, enrollment: u32) -> CourseSection {
    CourseSection {
        id: SectionId(id),
        code: code.to_string(),
        name: name.to_string(),
        enrollment,
    }
}

pub(super) fn instructor(
    id: u32,
    given: &str,
    family: &str,
    external: &str,
    venues: &[u32],
) -> Instructor {
    Instructor {
        id: InstructorId(id),
        given_name: given.to_string(),
        family_name: family.to_string(),
        external_id: external.to_string(),
        venues: venues.iter().copied().map(VenueId).collect::<BTreeSet<_>>(),
    }
}

/// Two venues, two terms (the first active), three sections, and three
/// instructors: Alice is based downtown, Bruno has no venue association,
/// Carla is based at both campuses.
pub(super) fn seeded_store() -> ScheduleStore {
    let mut store = ScheduleStore::new();
    store
        .upsert_venue(venue(1, "Downtown Campus"))
        .expect("venue upserts");
    store
        .upsert_venue(venue(2, "North Campus"))
        .expect("venue upserts");
    store.upsert_term(term(TERM, 1, true));
    store.upsert_term(term(OTHER_TERM, 2, false));
    store
        .upsert_section(section(1, "c.1", "Administration", 40))
        .expect("section upserts");
    store
        .upsert_section(section(2, "c.2", "Marketing", 25))
        .expect("section upserts");
    store
        .upsert_section(section(3, "c.3", "Statistics", 18))
        .expect("section upserts");
    store
        .upsert_instructor(instructor(1, "Alice", "Rivera", "20345678", &[1]))
        .expect("instructor upserts");
    store
        .upsert_instructor(instructor(2, "Bruno", "Keller", "30111222", &[]))
        .expect("instructor upserts");
    store
        .upsert_instructor(instructor(3, "Carla", "Mendez", "27999888", &[1, 2]))
        .expect("instructor upserts");
    store
}

pub(super) fn seeded_service() -> SchedulingService {
    SchedulingService::with_store(seeded_store())
}

pub(super) fn draft(modality: Modality) -> AssignmentDraft {
    AssignmentDraft::new(modality)
}

pub(super) fn scheduled_draft(
    modality: Modality,
    instructor: Option<u32>,
    weekday: Weekday,
    start_hour: StartHour,
) -> AssignmentDraft {
    AssignmentDraft {
        modality,
        instructor: instructor.map(InstructorId),
        venue: None,
        weekday: Some(weekday),
        start_hour: Some(start_hour),
        hosts_walk_ins: false,
    }
}

/// Validate and insert in one step, for tests that drive the store
/// directly.
pub(super) fn admit_into(
    store: &mut ScheduleStore,
    section: u32,
    term: TermId,
    draft: AssignmentDraft,
) -> Assignment {
    let admitted =
        validate::admit(store, SectionId(section), term, &draft).expect("draft admits");
    store
        .insert_assignment(SectionId(section), term, admitted)
        .expect("assignment inserts")
}
