use std::collections::BTreeSet;

use clap::Args;
use timetable::error::AppError;
use timetable::scheduling::{
    AssignmentDraft, CourseSection, Instructor, InstructorId, Modality, SchedulingService,
    SectionId, SectionQuery, StartHour, TermId, VenueId, Weekday,
};

use crate::infra::seed_defaults;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Term to report on (defaults to the first seeded term)
    #[arg(long)]
    pub(crate) term: Option<u32>,
}

/// Populate a small but representative term: staffed, unstaffed, and
/// asynchronous sections, one instructor at a venue, one fully remote, and
/// a deliberate Tuesday-morning double-booking.
pub(crate) fn seed_sample_term(service: &SchedulingService) -> Result<(), AppError> {
    let term = TermId(1);

    let sections = [
        (1, "c.1", "Administration", 42),
        (2, "c.2", "Marketing", 28),
        (3, "c.3", "Statistics", 17),
        (4, "c.4", "Labor Law", 0),
    ];
    for (id, code, name, enrollment) in sections {
        service.upsert_course_section(CourseSection {
            id: SectionId(id),
            code: code.to_string(),
            name: name.to_string(),
            enrollment,
        })?;
    }

    service.upsert_instructor(Instructor {
        id: InstructorId(1),
        given_name: "Alice".to_string(),
        family_name: "Rivera".to_string(),
        external_id: "20345678".to_string(),
        venues: [VenueId(1)].into_iter().collect::<BTreeSet<_>>(),
    })?;
    service.upsert_instructor(Instructor {
        id: InstructorId(2),
        given_name: "Bruno".to_string(),
        family_name: "Keller".to_string(),
        external_id: "30111222".to_string(),
        venues: BTreeSet::new(),
    })?;

    let drafts = [
        // Alice teaches in person downtown, then virtually right after:
        // same Tuesday slot twice, which the detector must flag.
        (
            1,
            AssignmentDraft {
                modality: Modality::InPerson,
                instructor: Some(InstructorId(1)),
                venue: Some(VenueId(1)),
                weekday: Some(Weekday::Tuesday),
                start_hour: Some(StartHour::H08),
                hosts_walk_ins: false,
            },
        ),
        (
            2,
            AssignmentDraft {
                modality: Modality::VirtualMorning,
                instructor: Some(InstructorId(1)),
                venue: None,
                weekday: Some(Weekday::Tuesday),
                start_hour: Some(StartHour::H08),
                hosts_walk_ins: false,
            },
        ),
        (
            3,
            AssignmentDraft {
                modality: Modality::VirtualNight,
                instructor: Some(InstructorId(2)),
                venue: None,
                weekday: Some(Weekday::Friday),
                start_hour: Some(StartHour::H19),
                hosts_walk_ins: false,
            },
        ),
        (3, AssignmentDraft::new(Modality::Asynchronous)),
        // Labor Law is still waiting on staffing.
        (4, AssignmentDraft::new(Modality::VirtualMorning)),
    ];
    for (section, draft) in drafts {
        service.create_assignment(SectionId(section), term, draft)?;
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = SchedulingService::new();
    seed_defaults(&service)?;
    seed_sample_term(&service)?;

    let term = TermId(args.term.unwrap_or(1));
    let term_name = service
        .term(term)
        .map(|term| term.name)
        .unwrap_or_else(|| format!("term {}", term.0));

    println!("== {term_name} ==");
    let summary = service.summarize(term);
    println!(
        "{} sections, {} assignments ({} async, {} staffed, {} unstaffed), {} students",
        summary.sections,
        summary.assignments,
        summary.asynchronous,
        summary.staffed,
        summary.unstaffed,
        summary.total_enrollment
    );

    println!("\n-- Sections --");
    for section in service.list_course_sections(&SectionQuery::for_term(term)) {
        println!(
            "{} {} ({} enrolled, {} assignment(s))",
            section.code,
            section.name,
            section.enrollment,
            section.assignments.len()
        );
    }

    println!("\n-- Instructors --");
    for overview in service.list_instructors(term) {
        println!(
            "{} {} [{}] {}h, {} students",
            overview.given_name,
            overview.family_name,
            overview.kind_label,
            overview.scheduled_hours,
            overview.total_enrollment
        );
    }

    let conflicts = service.detect_conflicts(term);
    if conflicts.is_empty() {
        println!("\nNo scheduling conflicts.");
    } else {
        println!("\n-- Conflicts --");
        for conflict in conflicts {
            println!("[{}] {}", conflict.severity.label(), conflict.message);
        }
    }

    Ok(())
}
