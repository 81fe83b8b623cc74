use super::common::*;
use crate::scheduling::domain::{InstructorId, Modality, StartHour, Weekday};
use crate::scheduling::report::summary::{classify, classify_all, summarize, HOURS_PER_SESSION};
use crate::scheduling::report::InstructorKind;

#[test]
fn instructor_without_assignments_in_the_term_is_unassigned() {
    let mut store = seeded_store();
    // A full schedule in the other term must not leak into this one.
    admit_into(
        &mut store,
        1,
        OTHER_TERM,
        scheduled_draft(Modality::InPerson, Some(1), Weekday::Monday, StartHour::H09),
    );

    let alice = store.instructor(InstructorId(1)).expect("alice present").clone();
    let report = classify(&store, &alice, TERM);
    assert_eq!(report.kind, InstructorKind::Unassigned);
    assert_eq!(report.scheduled_hours, 0);
    assert_eq!(report.total_enrollment, 0);

    assert_eq!(classify(&store, &alice, OTHER_TERM).kind, InstructorKind::InPersonAndVirtual);
}

#[test]
fn mixing_in_person_and_virtual_marks_the_mixed_kind() {
    let mut store = seeded_store();
    admit_into(
        &mut store,
        1,
        TERM,
        scheduled_draft(Modality::InPerson, Some(1), Weekday::Monday, StartHour::H09),
    );
    admit_into(
        &mut store,
        2,
        TERM,
        scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Tuesday, StartHour::H08),
    );

    let alice = store.instructor(InstructorId(1)).expect("alice present").clone();
    assert_eq!(classify(&store, &alice, TERM).kind, InstructorKind::InPersonAndVirtual);
}

#[test]
fn purely_virtual_instructors_split_on_venue_association() {
    let mut store = seeded_store();
    // Alice (venue-based) and Bruno (no venues) both teach only virtually.
    admit_into(
        &mut store,
        1,
        TERM,
        scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Tuesday, StartHour::H08),
    );
    admit_into(
        &mut store,
        2,
        TERM,
        scheduled_draft(Modality::VirtualNight, Some(2), Weekday::Friday, StartHour::H19),
    );

    let reports = classify_all(&store, TERM);
    assert_eq!(reports[0].kind, InstructorKind::VenueBasedVirtual);
    assert_eq!(reports[1].kind, InstructorKind::FullyRemote);
    assert_eq!(reports[2].kind, InstructorKind::Unassigned);
}

#[test]
fn in_person_only_lands_in_the_in_person_bucket() {
    let mut store = seeded_store();
    admit_into(
        &mut store,
        1,
        TERM,
        scheduled_draft(Modality::InPerson, Some(2), Weekday::Wednesday, StartHour::H10),
    );

    let bruno = store.instructor(InstructorId(2)).expect("bruno present").clone();
    assert_eq!(classify(&store, &bruno, TERM).kind, InstructorKind::InPersonAndVirtual);
}

#[test]
fn workload_counts_two_hours_per_session_and_each_section_once() {
    let mut store = seeded_store();
    // Three assignments, but only two distinct sections: c.1 (40) and c.2 (25).
    admit_into(
        &mut store,
        1,
        TERM,
        scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Monday, StartHour::H08),
    );
    admit_into(
        &mut store,
        1,
        TERM,
        scheduled_draft(Modality::VirtualNight, Some(1), Weekday::Monday, StartHour::H19),
    );
    admit_into(
        &mut store,
        2,
        TERM,
        scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Tuesday, StartHour::H08),
    );

    let alice = store.instructor(InstructorId(1)).expect("alice present").clone();
    let report = classify(&store, &alice, TERM);
    assert_eq!(report.scheduled_hours, 3 * HOURS_PER_SESSION);
    assert_eq!(report.total_enrollment, 40 + 25);
}

#[test]
fn summary_buckets_assignments_and_counts_enrollment_once() {
    let mut store = seeded_store();
    admit_into(&mut store, 1, TERM, draft(Modality::Asynchronous));
    admit_into(
        &mut store,
        1,
        TERM,
        scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Monday, StartHour::H08),
    );
    admit_into(
        &mut store,
        1,
        TERM,
        scheduled_draft(Modality::VirtualNight, None, Weekday::Monday, StartHour::H19),
    );
    // The other term stays out of this term's counters.
    admit_into(&mut store, 2, OTHER_TERM, draft(Modality::Asynchronous));

    let summary = summarize(&store, TERM);
    assert_eq!(summary.sections, 3);
    assert_eq!(summary.assignments, 3);
    assert_eq!(summary.asynchronous, 1);
    assert_eq!(summary.staffed, 1);
    assert_eq!(summary.unstaffed, 1);
    // c.1 has three assignments but its 40 students count once.
    assert_eq!(summary.total_enrollment, 40 + 25 + 18);
}
