//! The mutation and read surface exposed to calling collaborators.
//!
//! One `SchedulingService` wraps the store behind an `RwLock`: readers run
//! concurrently against a consistent snapshot, writers are serialized, and
//! no reader ever observes a half-applied mutation. Every operation is
//! synchronous and deterministic given the snapshot.

use std::collections::BTreeSet;
use std::sync::RwLock;

use tracing::info;

use super::conflict::{self, Conflict};
use super::domain::{
    Assignment, AssignmentDraft, AssignmentId, CourseSection, EntityKind, Instructor,
    InstructorId, SectionId, Term, TermId, Venue, VenueId,
};
use super::query::{self, ScheduleQuery, SectionQuery};
use super::report::views::{InstructorOverview, ScheduleEntry, SectionOverview};
use super::report::{summary, InstructorReport, TermSummary};
use super::store::{RemovalMode, ScheduleStore, StoreError};
use super::validate::{self, InvalidAssignment};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulingError {
    #[error(transparent)]
    Invalid(#[from] InvalidAssignment),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default)]
pub struct SchedulingService {
    store: RwLock<ScheduleStore>,
}

impl SchedulingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: ScheduleStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn create_assignment(
        &self,
        section: SectionId,
        term: TermId,
        draft: AssignmentDraft,
    ) -> Result<Assignment, SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        let admitted = validate::admit(&store, section, term, &draft)?;
        let stored = store.insert_assignment(section, term, admitted)?;
        info!(
            assignment = stored.id.0,
            section = section.0,
            term = term.0,
            modality = stored.modality.wire_name(),
            "assignment created"
        );
        Ok(stored)
    }

    /// Replace the mutable fields of an assignment. The whole new state is
    /// validated before anything is written, so a rejected update leaves
    /// the previous state fully intact.
    pub fn update_assignment(
        &self,
        id: AssignmentId,
        draft: AssignmentDraft,
    ) -> Result<Assignment, SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        let (section, term) = {
            let existing = store.assignment(id).ok_or(StoreError::NotFound {
                kind: EntityKind::Assignment,
                id: id.0,
            })?;
            (existing.section, existing.term)
        };
        let admitted = validate::admit(&store, section, term, &draft)?;
        let stored = store.replace_assignment(id, admitted)?;
        info!(assignment = id.0, "assignment updated");
        Ok(stored)
    }

    pub fn delete_assignment(&self, id: AssignmentId) -> Result<(), SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        store.remove_assignment(id)?;
        info!(assignment = id.0, "assignment deleted");
        Ok(())
    }

    pub fn upsert_venue(&self, venue: Venue) -> Result<(), SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        let id = venue.id;
        store.upsert_venue(venue)?;
        info!(venue = id.0, "venue upserted");
        Ok(())
    }

    pub fn upsert_term(&self, term: Term) {
        let mut store = self.store.write().expect("store lock poisoned");
        let id = term.id;
        store.upsert_term(term);
        info!(term = id.0, "term upserted");
    }

    pub fn upsert_course_section(&self, section: CourseSection) -> Result<(), SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        let id = section.id;
        store.upsert_section(section)?;
        info!(section = id.0, "course section upserted");
        Ok(())
    }

    pub fn upsert_instructor(&self, instructor: Instructor) -> Result<(), SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        let id = instructor.id;
        store.upsert_instructor(instructor)?;
        info!(instructor = id.0, "instructor upserted");
        Ok(())
    }

    pub fn set_instructor_venues(
        &self,
        id: InstructorId,
        venues: BTreeSet<VenueId>,
    ) -> Result<(), SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        store.set_instructor_venues(id, venues)?;
        info!(instructor = id.0, "instructor venues replaced");
        Ok(())
    }

    pub fn remove_course_section(
        &self,
        id: SectionId,
        mode: RemovalMode,
    ) -> Result<(), SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        store.remove_section(id, mode)?;
        info!(section = id.0, "course section removed");
        Ok(())
    }

    pub fn remove_instructor(
        &self,
        id: InstructorId,
        mode: RemovalMode,
    ) -> Result<(), SchedulingError> {
        let mut store = self.store.write().expect("store lock poisoned");
        store.remove_instructor(id, mode)?;
        info!(instructor = id.0, "instructor removed");
        Ok(())
    }

    pub fn list_course_sections(&self, query: &SectionQuery) -> Vec<SectionOverview> {
        let store = self.store.read().expect("store lock poisoned");
        query::sections(&store, query)
    }

    pub fn list_instructors(&self, term: TermId) -> Vec<InstructorOverview> {
        let store = self.store.read().expect("store lock poisoned");
        store
            .instructors()
            .map(|instructor| instructor_overview(&store, instructor, term))
            .collect()
    }

    pub fn classify_instructors(&self, term: TermId) -> Vec<InstructorReport> {
        let store = self.store.read().expect("store lock poisoned");
        summary::classify_all(&store, term)
    }

    pub fn detect_conflicts(&self, term: TermId) -> Vec<Conflict> {
        let store = self.store.read().expect("store lock poisoned");
        conflict::detect(&store, term)
    }

    pub fn summarize(&self, term: TermId) -> TermSummary {
        let store = self.store.read().expect("store lock poisoned");
        summary::summarize(&store, term)
    }

    pub fn schedule(&self, query: &ScheduleQuery) -> Vec<ScheduleEntry> {
        let store = self.store.read().expect("store lock poisoned");
        query::schedule(&store, query)
    }

    pub fn venues(&self) -> Vec<Venue> {
        let store = self.store.read().expect("store lock poisoned");
        store.venues().cloned().collect()
    }

    pub fn terms(&self) -> Vec<Term> {
        let store = self.store.read().expect("store lock poisoned");
        store.terms().cloned().collect()
    }

    pub fn term(&self, id: TermId) -> Option<Term> {
        let store = self.store.read().expect("store lock poisoned");
        store.term(id).cloned()
    }

    pub fn course_sections(&self) -> Vec<CourseSection> {
        let store = self.store.read().expect("store lock poisoned");
        store.sections().cloned().collect()
    }

    pub fn instructors(&self) -> Vec<Instructor> {
        let store = self.store.read().expect("store lock poisoned");
        store.instructors().cloned().collect()
    }

    pub fn course_section(&self, id: SectionId) -> Result<CourseSection, SchedulingError> {
        let store = self.store.read().expect("store lock poisoned");
        store
            .section(id)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::CourseSection, id.0))
    }

    pub fn course_section_by_code(&self, code: &str) -> Option<CourseSection> {
        let store = self.store.read().expect("store lock poisoned");
        store.section_by_code(code).cloned()
    }

    pub fn instructor(&self, id: InstructorId) -> Result<Instructor, SchedulingError> {
        let store = self.store.read().expect("store lock poisoned");
        store
            .instructor(id)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::Instructor, id.0))
    }

    pub fn instructor_by_external_id(&self, external_id: &str) -> Option<Instructor> {
        let store = self.store.read().expect("store lock poisoned");
        store.instructor_by_external_id(external_id).cloned()
    }

    pub fn assignment(&self, id: AssignmentId) -> Result<Assignment, SchedulingError> {
        let store = self.store.read().expect("store lock poisoned");
        store
            .assignment(id)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::Assignment, id.0))
    }
}

fn not_found(kind: EntityKind, id: u32) -> SchedulingError {
    SchedulingError::Store(StoreError::NotFound { kind, id })
}

fn instructor_overview(
    store: &ScheduleStore,
    instructor: &Instructor,
    term: TermId,
) -> InstructorOverview {
    let report = summary::classify(store, instructor, term);
    let assignments = store
        .assignments_in(term)
        .filter(|assignment| assignment.instructor == Some(instructor.id))
        .map(|assignment| query::assignment_view(store, assignment))
        .collect();
    InstructorOverview {
        id: instructor.id,
        given_name: instructor.given_name.clone(),
        family_name: instructor.family_name.clone(),
        external_id: instructor.external_id.clone(),
        venues: instructor
            .venues
            .iter()
            .filter_map(|id| store.venue(*id))
            .map(query::venue_ref)
            .collect(),
        kind: report.kind,
        kind_label: report.kind_label,
        scheduled_hours: report.scheduled_hours,
        total_enrollment: report.total_enrollment,
        assignments,
    }
}
