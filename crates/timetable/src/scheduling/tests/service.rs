use std::collections::BTreeSet;

use super::common::*;
use crate::scheduling::domain::{
    AssignmentId, InstructorId, Modality, SectionId, StartHour, VenueId, Weekday,
};
use crate::scheduling::service::SchedulingError;
use crate::scheduling::store::{RemovalMode, StoreError};
use crate::scheduling::validate::InvalidAssignment;
use crate::scheduling::InstructorKind;

#[test]
fn create_validates_and_persists() {
    let service = seeded_service();
    let stored = service
        .create_assignment(
            SectionId(1),
            TERM,
            scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Tuesday, StartHour::H08),
        )
        .expect("valid draft creates");

    let fetched = service.assignment(stored.id).expect("assignment fetches");
    assert_eq!(fetched, stored);

    let err = service
        .create_assignment(SectionId(99), TERM, draft(Modality::Asynchronous))
        .expect_err("unknown section rejected");
    assert!(matches!(
        err,
        SchedulingError::Invalid(InvalidAssignment::DanglingReference { .. })
    ));
}

#[test]
fn rejected_update_leaves_the_previous_state_intact() {
    let service = seeded_service();
    let stored = service
        .create_assignment(
            SectionId(1),
            TERM,
            scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Tuesday, StartHour::H08),
        )
        .expect("valid draft creates");

    let mut half = draft(Modality::VirtualMorning);
    half.weekday = Some(Weekday::Friday);
    let err = service
        .update_assignment(stored.id, half)
        .expect_err("half slot rejected");
    assert!(matches!(
        err,
        SchedulingError::Invalid(InvalidAssignment::PartialSlot)
    ));

    let unchanged = service.assignment(stored.id).expect("assignment fetches");
    assert_eq!(unchanged, stored);
}

#[test]
fn update_keeps_section_and_term_fixed() {
    let service = seeded_service();
    let stored = service
        .create_assignment(SectionId(2), TERM, draft(Modality::VirtualNight))
        .expect("valid draft creates");

    let updated = service
        .update_assignment(
            stored.id,
            scheduled_draft(Modality::VirtualNight, Some(2), Weekday::Friday, StartHour::H19),
        )
        .expect("valid update applies");
    assert_eq!(updated.section, SectionId(2));
    assert_eq!(updated.term, TERM);
    assert_eq!(updated.instructor, Some(InstructorId(2)));

    let err = service
        .update_assignment(AssignmentId(99), draft(Modality::VirtualNight))
        .expect_err("unknown assignment rejected");
    assert!(matches!(
        err,
        SchedulingError::Store(StoreError::NotFound { .. })
    ));
}

#[test]
fn delete_then_fetch_reports_not_found() {
    let service = seeded_service();
    let stored = service
        .create_assignment(SectionId(1), TERM, draft(Modality::Asynchronous))
        .expect("valid draft creates");
    service.delete_assignment(stored.id).expect("delete succeeds");
    assert!(matches!(
        service.assignment(stored.id),
        Err(SchedulingError::Store(StoreError::NotFound { .. }))
    ));
}

#[test]
fn venue_reassociation_reclassifies_on_the_next_read() {
    let service = seeded_service();
    service
        .create_assignment(
            SectionId(1),
            TERM,
            scheduled_draft(Modality::VirtualMorning, Some(2), Weekday::Monday, StartHour::H08),
        )
        .expect("valid draft creates");

    let before = service.classify_instructors(TERM);
    assert_eq!(before[1].kind, InstructorKind::FullyRemote);

    service
        .set_instructor_venues(InstructorId(2), [VenueId(2)].into_iter().collect())
        .expect("venues replace");
    let after = service.classify_instructors(TERM);
    assert_eq!(after[1].kind, InstructorKind::VenueBasedVirtual);

    let err = service
        .set_instructor_venues(InstructorId(2), [VenueId(99)].into_iter().collect::<BTreeSet<_>>())
        .expect_err("dangling venue rejected");
    assert!(matches!(
        err,
        SchedulingError::Store(StoreError::NotFound { .. })
    ));
}

#[test]
fn section_removal_respects_the_requested_mode() {
    let service = seeded_service();
    service
        .create_assignment(SectionId(1), TERM, draft(Modality::Asynchronous))
        .expect("valid draft creates");

    let err = service
        .remove_course_section(SectionId(1), RemovalMode::Restrict)
        .expect_err("restrict refuses");
    assert!(matches!(
        err,
        SchedulingError::Store(StoreError::ReferentialConflict { .. })
    ));
    assert!(service.course_section(SectionId(1)).is_ok());

    service
        .remove_course_section(SectionId(1), RemovalMode::Cascade)
        .expect("cascade removes");
    assert!(service.course_section(SectionId(1)).is_err());
}

#[test]
fn instructor_overviews_carry_classification_and_assignments() {
    let service = seeded_service();
    service
        .create_assignment(
            SectionId(1),
            TERM,
            scheduled_draft(Modality::InPerson, Some(1), Weekday::Monday, StartHour::H09),
        )
        .expect("valid draft creates");
    service
        .create_assignment(
            SectionId(2),
            TERM,
            scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Tuesday, StartHour::H08),
        )
        .expect("valid draft creates");

    let overviews = service.list_instructors(TERM);
    assert_eq!(overviews.len(), 3);
    let alice = &overviews[0];
    assert_eq!(alice.kind, InstructorKind::InPersonAndVirtual);
    assert_eq!(alice.kind_label, "In person + virtual");
    assert_eq!(alice.scheduled_hours, 4);
    assert_eq!(alice.total_enrollment, 65);
    assert_eq!(alice.assignments.len(), 2);
    assert_eq!(alice.venues[0].name, "Downtown Campus");
}
