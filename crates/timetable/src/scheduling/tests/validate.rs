use std::str::FromStr;

use super::common::*;
use crate::scheduling::domain::{
    EntityKind, InstructorId, Modality, SectionId, StartHour, TermId, VenueId, Weekday,
};
use crate::scheduling::validate::{admit, InvalidAssignment};

#[test]
fn asynchronous_draft_must_be_bare() {
    let store = seeded_store();
    let mut rejected = draft(Modality::Asynchronous);
    rejected.instructor = Some(InstructorId(1));
    let err = admit(&store, SectionId(1), TERM, &rejected).expect_err("instructor rejected");
    assert_eq!(err, InvalidAssignment::AsyncWithScheduling);

    let mut rejected = draft(Modality::Asynchronous);
    rejected.venue = Some(VenueId(1));
    assert_eq!(
        admit(&store, SectionId(1), TERM, &rejected),
        Err(InvalidAssignment::AsyncWithScheduling)
    );

    let mut rejected = draft(Modality::Asynchronous);
    rejected.weekday = Some(Weekday::Monday);
    rejected.start_hour = Some(StartHour::H07);
    assert_eq!(
        admit(&store, SectionId(1), TERM, &rejected),
        Err(InvalidAssignment::AsyncWithScheduling)
    );

    let accepted = admit(&store, SectionId(1), TERM, &draft(Modality::Asynchronous))
        .expect("bare asynchronous draft admits");
    assert!(accepted.instructor.is_none());
    assert!(accepted.venue.is_none());
    assert!(accepted.slot.is_none());
}

#[test]
fn weekday_and_hour_travel_together() {
    let store = seeded_store();
    let mut half = draft(Modality::VirtualMorning);
    half.weekday = Some(Weekday::Tuesday);
    assert_eq!(
        admit(&store, SectionId(1), TERM, &half),
        Err(InvalidAssignment::PartialSlot)
    );

    let mut half = draft(Modality::InPerson);
    half.start_hour = Some(StartHour::H08);
    assert_eq!(
        admit(&store, SectionId(1), TERM, &half),
        Err(InvalidAssignment::PartialSlot)
    );

    let whole = scheduled_draft(Modality::InPerson, None, Weekday::Tuesday, StartHour::H08);
    let admitted = admit(&store, SectionId(1), TERM, &whole).expect("full slot admits");
    let slot = admitted.slot.expect("slot present");
    assert_eq!(slot.weekday, Weekday::Tuesday);
    assert_eq!(slot.start_hour, StartHour::H08);
}

#[test]
fn live_drafts_may_be_unscheduled_and_unstaffed() {
    let store = seeded_store();
    for modality in [Modality::VirtualMorning, Modality::VirtualNight, Modality::InPerson] {
        let admitted =
            admit(&store, SectionId(2), TERM, &draft(modality)).expect("pending draft admits");
        assert!(admitted.slot.is_none());
        assert!(admitted.instructor.is_none());
    }
}

#[test]
fn dangling_references_are_rejected() {
    let store = seeded_store();
    let err = admit(&store, SectionId(99), TERM, &draft(Modality::InPerson))
        .expect_err("unknown section rejected");
    assert_eq!(
        err,
        InvalidAssignment::DanglingReference {
            kind: EntityKind::CourseSection,
            id: 99
        }
    );

    let err = admit(&store, SectionId(1), TermId(99), &draft(Modality::InPerson))
        .expect_err("unknown term rejected");
    assert_eq!(
        err,
        InvalidAssignment::DanglingReference {
            kind: EntityKind::Term,
            id: 99
        }
    );

    let mut dangling = draft(Modality::VirtualMorning);
    dangling.instructor = Some(InstructorId(99));
    assert_eq!(
        admit(&store, SectionId(1), TERM, &dangling),
        Err(InvalidAssignment::DanglingReference {
            kind: EntityKind::Instructor,
            id: 99
        })
    );

    let mut dangling = draft(Modality::VirtualMorning);
    dangling.venue = Some(VenueId(99));
    assert_eq!(
        admit(&store, SectionId(1), TERM, &dangling),
        Err(InvalidAssignment::DanglingReference {
            kind: EntityKind::Venue,
            id: 99
        })
    );
}

#[test]
fn boundary_parsers_surface_unknown_values() {
    assert_eq!(Modality::from_str("Virtual_Morning"), Ok(Modality::VirtualMorning));
    assert_eq!(Weekday::from_str(" saturday "), Ok(Weekday::Saturday));
    assert_eq!(StartHour::from_str("22:00"), Ok(StartHour::H22));

    let err = Modality::from_str("hybrid").expect_err("unknown modality");
    assert_eq!(
        err,
        InvalidAssignment::UnknownValue {
            field: "modality",
            value: "hybrid".to_string()
        }
    );
    assert!(matches!(
        Weekday::from_str("sunday"),
        Err(InvalidAssignment::UnknownValue { field: "weekday", .. })
    ));
    assert!(matches!(
        StartHour::from_str("15:00"),
        Err(InvalidAssignment::UnknownValue { field: "start hour", .. })
    ));
}
