//! Batch roster import: one CSV row per delivery assignment.
//!
//! The importer is loader glue in front of the scheduling core: it upserts
//! sections and instructors it has not seen, resolves venues by name, and
//! creates assignments through the validating service. A row that fails
//! validation is reported and skipped; it never aborts the rest of the
//! file.

mod parser;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use tracing::warn;

use crate::scheduling::{
    AssignmentDraft, CourseSection, EntityKind, Instructor, InstructorId, Modality,
    SchedulingError, SchedulingService, SectionId, StartHour, StoreError, TermId, Venue,
    VenueId, Weekday,
};

use parser::{RosterAssignment, RosterRecord};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Scheduling(SchedulingError),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Scheduling(err) => {
                write!(f, "could not apply roster to the schedule: {}", err)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Scheduling(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<SchedulingError> for RosterImportError {
    fn from(err: SchedulingError) -> Self {
        Self::Scheduling(err)
    }
}

/// Outcome of one import run.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RosterSummary {
    pub sections_created: usize,
    pub sections_updated: usize,
    pub instructors_created: usize,
    pub assignments_created: usize,
    pub rows_skipped: usize,
    pub issues: Vec<String>,
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path(
        service: &SchedulingService,
        term: TermId,
        path: &Path,
    ) -> Result<RosterSummary, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(service, term, file)
    }

    pub fn from_reader<R: Read>(
        service: &SchedulingService,
        term: TermId,
        reader: R,
    ) -> Result<RosterSummary, RosterImportError> {
        if service.term(term).is_none() {
            return Err(SchedulingError::Store(StoreError::NotFound {
                kind: EntityKind::Term,
                id: term.0,
            })
            .into());
        }

        let records = parser::parse_records(reader)?;
        let venues = service.venues();
        let mut next_section = service
            .course_sections()
            .iter()
            .map(|section| section.id.0)
            .max()
            .unwrap_or(0);
        let mut next_instructor = service
            .instructors()
            .iter()
            .map(|instructor| instructor.id.0)
            .max()
            .unwrap_or(0);

        let mut summary = RosterSummary::default();
        for record in records {
            let section =
                upsert_section(service, &record, &mut next_section, &mut summary)?;
            let instructor =
                upsert_instructor(service, &record, &mut next_instructor, &mut summary)?;

            let Some(assignment) = record.assignment else {
                continue;
            };
            match build_draft(&venues, &assignment, instructor) {
                Ok(draft) => match service.create_assignment(section, term, draft) {
                    Ok(_) => summary.assignments_created += 1,
                    Err(err) => skip_row(&mut summary, record.line, &err.to_string()),
                },
                Err(reason) => skip_row(&mut summary, record.line, &reason),
            }
        }

        Ok(summary)
    }
}

fn upsert_section(
    service: &SchedulingService,
    record: &RosterRecord,
    next_id: &mut u32,
    summary: &mut RosterSummary,
) -> Result<SectionId, RosterImportError> {
    match service.course_section_by_code(&record.section_code) {
        Some(existing) => {
            let name = record
                .section_name
                .clone()
                .unwrap_or_else(|| existing.name.clone());
            let enrollment = record.enrollment.unwrap_or(existing.enrollment);
            if name != existing.name || enrollment != existing.enrollment {
                service.upsert_course_section(CourseSection {
                    id: existing.id,
                    code: existing.code.clone(),
                    name,
                    enrollment,
                })?;
                summary.sections_updated += 1;
            }
            Ok(existing.id)
        }
        None => {
            *next_id += 1;
            let id = SectionId(*next_id);
            service.upsert_course_section(CourseSection {
                id,
                code: record.section_code.clone(),
                name: record
                    .section_name
                    .clone()
                    .unwrap_or_else(|| format!("Section {}", record.section_code)),
                enrollment: record.enrollment.unwrap_or(0),
            })?;
            summary.sections_created += 1;
            Ok(id)
        }
    }
}

fn upsert_instructor(
    service: &SchedulingService,
    record: &RosterRecord,
    next_id: &mut u32,
    summary: &mut RosterSummary,
) -> Result<Option<InstructorId>, RosterImportError> {
    let Some(roster_instructor) = &record.instructor else {
        return Ok(None);
    };
    if let Some(existing) = service.instructor_by_external_id(&roster_instructor.external_id) {
        return Ok(Some(existing.id));
    }
    *next_id += 1;
    let id = InstructorId(*next_id);
    service.upsert_instructor(Instructor {
        id,
        given_name: roster_instructor.given_name.clone().unwrap_or_default(),
        family_name: roster_instructor.family_name.clone().unwrap_or_default(),
        external_id: roster_instructor.external_id.clone(),
        venues: BTreeSet::new(),
    })?;
    summary.instructors_created += 1;
    Ok(Some(id))
}

fn build_draft(
    venues: &[Venue],
    assignment: &RosterAssignment,
    instructor: Option<InstructorId>,
) -> Result<AssignmentDraft, String> {
    let modality = Modality::from_str(&assignment.modality).map_err(|err| err.to_string())?;
    let weekday = assignment
        .weekday
        .as_deref()
        .map(Weekday::from_str)
        .transpose()
        .map_err(|err| err.to_string())?;
    let start_hour = assignment
        .start_hour
        .as_deref()
        .map(StartHour::from_str)
        .transpose()
        .map_err(|err| err.to_string())?;
    let venue = assignment
        .venue_name
        .as_deref()
        .map(|name| resolve_venue(venues, name))
        .transpose()?;

    Ok(AssignmentDraft {
        modality,
        instructor,
        venue: venue.flatten(),
        weekday,
        start_hour,
        hosts_walk_ins: assignment.hosts_walk_ins,
    })
}

/// The reserved remote name maps to "no venue"; any other name must match
/// a stored venue.
fn resolve_venue(venues: &[Venue], name: &str) -> Result<Option<VenueId>, String> {
    if Venue::is_reserved_name(name) {
        return Ok(None);
    }
    venues
        .iter()
        .find(|venue| venue.name.eq_ignore_ascii_case(name.trim()))
        .map(|venue| Some(venue.id))
        .ok_or_else(|| format!("unknown venue '{name}'"))
}

fn skip_row(summary: &mut RosterSummary, line: u64, reason: &str) {
    warn!(line, reason, "roster row skipped");
    summary.rows_skipped += 1;
    summary.issues.push(format!("line {line}: {reason}"));
}
