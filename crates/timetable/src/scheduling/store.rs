//! In-memory authoritative snapshot of venues, terms, sections,
//! instructors, and assignments.
//!
//! The store is a plain data holder: persistence belongs to the external
//! loader, and every mutation either applies fully or returns a typed error
//! with the snapshot untouched.

use std::collections::{BTreeMap, BTreeSet};

use super::domain::{
    Assignment, AssignmentId, CourseSection, EntityKind, Instructor, InstructorId,
    SectionId, Term, TermId, Venue, VenueId,
};
use super::validate::AdmittedAssignment;

/// Policy for removing an entity that assignments still reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalMode {
    /// Remove the entity and every assignment that references it.
    Cascade,
    /// Refuse the removal while references remain.
    Restrict,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} does not exist")]
    NotFound { kind: EntityKind, id: u32 },
    #[error("{kind} {id} is still referenced by {references} assignment(s)")]
    ReferentialConflict {
        kind: EntityKind,
        id: u32,
        references: usize,
    },
    #[error("'{0}' is reserved for assignments without a physical venue")]
    ReservedVenueName(String),
    #[error("course section code '{0}' is already in use")]
    CodeInUse(String),
    #[error("instructor external id '{0}' is already in use")]
    ExternalIdInUse(String),
}

impl StoreError {
    fn not_found(kind: EntityKind, id: u32) -> Self {
        Self::NotFound { kind, id }
    }
}

/// The current snapshot. `BTreeMap` keys keep every listing deterministic,
/// which the conflict detector and the views rely on.
#[derive(Debug, Default)]
pub struct ScheduleStore {
    venues: BTreeMap<VenueId, Venue>,
    terms: BTreeMap<TermId, Term>,
    sections: BTreeMap<SectionId, CourseSection>,
    instructors: BTreeMap<InstructorId, Instructor>,
    assignments: BTreeMap<AssignmentId, Assignment>,
    next_assignment: u32,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_venue(&mut self, venue: Venue) -> Result<(), StoreError> {
        if Venue::is_reserved_name(&venue.name) {
            return Err(StoreError::ReservedVenueName(venue.name));
        }
        self.venues.insert(venue.id, venue);
        Ok(())
    }

    pub fn upsert_term(&mut self, term: Term) {
        self.terms.insert(term.id, term);
    }

    pub fn upsert_section(&mut self, section: CourseSection) -> Result<(), StoreError> {
        let taken = self
            .sections
            .values()
            .any(|existing| existing.id != section.id && existing.code == section.code);
        if taken {
            return Err(StoreError::CodeInUse(section.code));
        }
        self.sections.insert(section.id, section);
        Ok(())
    }

    pub fn upsert_instructor(&mut self, instructor: Instructor) -> Result<(), StoreError> {
        let taken = self.instructors.values().any(|existing| {
            existing.id != instructor.id && existing.external_id == instructor.external_id
        });
        if taken {
            return Err(StoreError::ExternalIdInUse(instructor.external_id));
        }
        for venue in &instructor.venues {
            if !self.venues.contains_key(venue) {
                return Err(StoreError::not_found(EntityKind::Venue, venue.0));
            }
        }
        self.instructors.insert(instructor.id, instructor);
        Ok(())
    }

    pub fn set_instructor_venues(
        &mut self,
        id: InstructorId,
        venues: BTreeSet<VenueId>,
    ) -> Result<(), StoreError> {
        for venue in &venues {
            if !self.venues.contains_key(venue) {
                return Err(StoreError::not_found(EntityKind::Venue, venue.0));
            }
        }
        let instructor = self
            .instructors
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Instructor, id.0))?;
        instructor.venues = venues;
        Ok(())
    }

    /// Store a validated assignment under a freshly allocated id.
    pub fn insert_assignment(
        &mut self,
        section: SectionId,
        term: TermId,
        admitted: AdmittedAssignment,
    ) -> Result<Assignment, StoreError> {
        self.check_assignment_references(section, term, &admitted)?;
        self.next_assignment += 1;
        let assignment = Assignment {
            id: AssignmentId(self.next_assignment),
            section,
            term,
            modality: admitted.modality,
            instructor: admitted.instructor,
            venue: admitted.venue,
            slot: admitted.slot,
            hosts_walk_ins: admitted.hosts_walk_ins,
        };
        self.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    /// Replace the mutable fields of an existing assignment. Section and
    /// term are fixed at creation and survive the replacement.
    pub fn replace_assignment(
        &mut self,
        id: AssignmentId,
        admitted: AdmittedAssignment,
    ) -> Result<Assignment, StoreError> {
        let (section, term) = {
            let existing = self
                .assignments
                .get(&id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Assignment, id.0))?;
            (existing.section, existing.term)
        };
        self.check_assignment_references(section, term, &admitted)?;
        let assignment = Assignment {
            id,
            section,
            term,
            modality: admitted.modality,
            instructor: admitted.instructor,
            venue: admitted.venue,
            slot: admitted.slot,
            hosts_walk_ins: admitted.hosts_walk_ins,
        };
        self.assignments.insert(id, assignment.clone());
        Ok(assignment)
    }

    pub fn remove_assignment(&mut self, id: AssignmentId) -> Result<Assignment, StoreError> {
        self.assignments
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Assignment, id.0))
    }

    pub fn remove_section(
        &mut self,
        id: SectionId,
        mode: RemovalMode,
    ) -> Result<(), StoreError> {
        if !self.sections.contains_key(&id) {
            return Err(StoreError::not_found(EntityKind::CourseSection, id.0));
        }
        let references = self
            .assignments
            .values()
            .filter(|assignment| assignment.section == id)
            .count();
        if references > 0 && mode == RemovalMode::Restrict {
            return Err(StoreError::ReferentialConflict {
                kind: EntityKind::CourseSection,
                id: id.0,
                references,
            });
        }
        self.assignments.retain(|_, assignment| assignment.section != id);
        self.sections.remove(&id);
        Ok(())
    }

    pub fn remove_instructor(
        &mut self,
        id: InstructorId,
        mode: RemovalMode,
    ) -> Result<(), StoreError> {
        if !self.instructors.contains_key(&id) {
            return Err(StoreError::not_found(EntityKind::Instructor, id.0));
        }
        let references = self
            .assignments
            .values()
            .filter(|assignment| assignment.instructor == Some(id))
            .count();
        if references > 0 && mode == RemovalMode::Restrict {
            return Err(StoreError::ReferentialConflict {
                kind: EntityKind::Instructor,
                id: id.0,
                references,
            });
        }
        self.assignments
            .retain(|_, assignment| assignment.instructor != Some(id));
        self.instructors.remove(&id);
        Ok(())
    }

    pub fn venue(&self, id: VenueId) -> Option<&Venue> {
        self.venues.get(&id)
    }

    pub fn venue_by_name(&self, name: &str) -> Option<&Venue> {
        self.venues
            .values()
            .find(|venue| venue.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.terms.get(&id)
    }

    pub fn section(&self, id: SectionId) -> Option<&CourseSection> {
        self.sections.get(&id)
    }

    pub fn section_by_code(&self, code: &str) -> Option<&CourseSection> {
        self.sections.values().find(|section| section.code == code)
    }

    pub fn instructor(&self, id: InstructorId) -> Option<&Instructor> {
        self.instructors.get(&id)
    }

    pub fn instructor_by_external_id(&self, external_id: &str) -> Option<&Instructor> {
        self.instructors
            .values()
            .find(|instructor| instructor.external_id == external_id)
    }

    pub fn assignment(&self, id: AssignmentId) -> Option<&Assignment> {
        self.assignments.get(&id)
    }

    pub fn venues(&self) -> impl Iterator<Item = &Venue> {
        self.venues.values()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    pub fn sections(&self) -> impl Iterator<Item = &CourseSection> {
        self.sections.values()
    }

    pub fn instructors(&self) -> impl Iterator<Item = &Instructor> {
        self.instructors.values()
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.values()
    }

    pub fn assignments_in(&self, term: TermId) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .values()
            .filter(move |assignment| assignment.term == term)
    }

    fn check_assignment_references(
        &self,
        section: SectionId,
        term: TermId,
        admitted: &AdmittedAssignment,
    ) -> Result<(), StoreError> {
        if !self.sections.contains_key(&section) {
            return Err(StoreError::not_found(EntityKind::CourseSection, section.0));
        }
        if !self.terms.contains_key(&term) {
            return Err(StoreError::not_found(EntityKind::Term, term.0));
        }
        if let Some(instructor) = admitted.instructor {
            if !self.instructors.contains_key(&instructor) {
                return Err(StoreError::not_found(EntityKind::Instructor, instructor.0));
            }
        }
        if let Some(venue) = admitted.venue {
            if !self.venues.contains_key(&venue) {
                return Err(StoreError::not_found(EntityKind::Venue, venue.0));
            }
        }
        Ok(())
    }
}
