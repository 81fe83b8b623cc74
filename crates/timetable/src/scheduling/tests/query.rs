use super::common::*;
use crate::scheduling::domain::{
    AssignmentDraft, InstructorId, Modality, StartHour, VenueId, Weekday,
};
use crate::scheduling::query::{schedule, sections, ScheduleQuery, SectionQuery, VenueSelector};

fn staffed_at_venue(
    instructor: u32,
    venue: Option<u32>,
    weekday: Weekday,
    start_hour: StartHour,
) -> AssignmentDraft {
    AssignmentDraft {
        modality: if venue.is_some() {
            Modality::InPerson
        } else {
            Modality::VirtualMorning
        },
        instructor: Some(InstructorId(instructor)),
        venue: venue.map(VenueId),
        weekday: Some(weekday),
        start_hour: Some(start_hour),
        hosts_walk_ins: false,
    }
}

#[test]
fn search_matches_code_or_name_case_insensitively() {
    let store = seeded_store();
    let mut query = SectionQuery::for_term(TERM);
    query.search = Some("c.2".to_string());
    let by_code = sections(&store, &query);
    assert_eq!(by_code.len(), 1);
    assert_eq!(by_code[0].code, "c.2");

    query.search = Some("STATIST".to_string());
    let by_name = sections(&store, &query);
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Statistics");

    query.search = Some("no such thing".to_string());
    assert!(sections(&store, &query).is_empty());
}

#[test]
fn only_unassigned_keeps_sections_without_assignments_in_term() {
    let mut store = seeded_store();
    admit_into(
        &mut store,
        1,
        TERM,
        scheduled_draft(Modality::VirtualMorning, Some(1), Weekday::Monday, StartHour::H08),
    );
    admit_into(&mut store, 2, OTHER_TERM, draft(Modality::Asynchronous));

    let mut query = SectionQuery::for_term(TERM);
    query.only_unassigned = true;
    let unassigned = sections(&store, &query);
    // c.2 only has an assignment in the other term; c.3 has none at all.
    let codes: Vec<_> = unassigned.iter().map(|section| section.code.as_str()).collect();
    assert_eq!(codes, vec!["c.2", "c.3"]);
}

#[test]
fn section_overviews_embed_term_assignments() {
    let mut store = seeded_store();
    admit_into(
        &mut store,
        1,
        TERM,
        staffed_at_venue(1, Some(1), Weekday::Tuesday, StartHour::H08),
    );
    admit_into(&mut store, 1, OTHER_TERM, draft(Modality::Asynchronous));

    let overview = sections(&store, &SectionQuery::for_term(TERM))
        .into_iter()
        .find(|section| section.code == "c.1")
        .expect("c.1 present");
    assert_eq!(overview.enrollment, 40);
    assert_eq!(overview.assignments.len(), 1);
    let view = &overview.assignments[0];
    assert_eq!(view.modality_label, "In person");
    assert_eq!(
        view.instructor.as_ref().map(|i| i.full_name.as_str()),
        Some("Alice Rivera")
    );
    assert_eq!(view.venue.as_ref().map(|v| v.name.as_str()), Some("Downtown Campus"));
}

#[test]
fn schedule_filters_are_conjunctive() {
    let mut store = seeded_store();
    admit_into(
        &mut store,
        1,
        TERM,
        staffed_at_venue(1, Some(1), Weekday::Monday, StartHour::H08),
    );
    admit_into(
        &mut store,
        2,
        TERM,
        staffed_at_venue(1, None, Weekday::Monday, StartHour::H10),
    );
    admit_into(
        &mut store,
        3,
        TERM,
        staffed_at_venue(3, Some(2), Weekday::Tuesday, StartHour::H09),
    );
    // Unstaffed and unscheduled rows stay off the timetable.
    admit_into(
        &mut store,
        3,
        TERM,
        scheduled_draft(Modality::VirtualNight, None, Weekday::Friday, StartHour::H20),
    );
    admit_into(&mut store, 2, TERM, draft(Modality::VirtualMorning));

    let all = schedule(&store, &ScheduleQuery::for_term(TERM));
    assert_eq!(all.len(), 3);
    // Ordered by weekday then hour.
    assert_eq!(all[0].section_code, "c.1");
    assert_eq!(all[1].section_code, "c.2");
    assert_eq!(all[2].section_code, "c.3");

    let mut query = ScheduleQuery::for_term(TERM);
    query.venue = VenueSelector::Remote;
    let remote = schedule(&store, &query);
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].section_code, "c.2");

    let mut query = ScheduleQuery::for_term(TERM);
    query.venue = VenueSelector::Venue(VenueId(1));
    query.instructor = Some(InstructorId(1));
    let downtown_alice = schedule(&store, &query);
    assert_eq!(downtown_alice.len(), 1);
    assert_eq!(downtown_alice[0].section_code, "c.1");

    let mut query = ScheduleQuery::for_term(TERM);
    query.instructor = Some(InstructorId(1));
    query.section_code = Some("c.3".to_string());
    assert!(schedule(&store, &query).is_empty());
}

#[test]
fn unknown_section_code_yields_an_empty_timetable() {
    let mut store = seeded_store();
    admit_into(
        &mut store,
        1,
        TERM,
        staffed_at_venue(1, Some(1), Weekday::Monday, StartHour::H08),
    );

    let mut query = ScheduleQuery::for_term(TERM);
    query.section_code = Some("c.404".to_string());
    assert!(schedule(&store, &query).is_empty());
}
