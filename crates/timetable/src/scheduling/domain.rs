use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(VenueId);
entity_id!(InstructorId);
entity_id!(SectionId);
entity_id!(TermId);
entity_id!(AssignmentId);

/// Entity discriminator used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Venue,
    Instructor,
    CourseSection,
    Term,
    Assignment,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Instructor => "instructor",
            Self::CourseSection => "course section",
            Self::Term => "term",
            Self::Assignment => "assignment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery mode of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    VirtualMorning,
    VirtualNight,
    InPerson,
    Asynchronous,
}

impl Modality {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::VirtualMorning,
            Self::VirtualNight,
            Self::InPerson,
            Self::Asynchronous,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VirtualMorning => "Virtual (morning)",
            Self::VirtualNight => "Virtual (night)",
            Self::InPerson => "In person",
            Self::Asynchronous => "Asynchronous",
        }
    }

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::VirtualMorning => "virtual_morning",
            Self::VirtualNight => "virtual_night",
            Self::InPerson => "in_person",
            Self::Asynchronous => "asynchronous",
        }
    }

    pub const fn is_virtual(self) -> bool {
        matches!(self, Self::VirtualMorning | Self::VirtualNight)
    }

    /// Everything except asynchronous delivery holds a live weekly session.
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Asynchronous)
    }
}

/// Teaching weekday. The institution runs a fixed six-day week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }
}

/// Session start hour. Sessions run in a morning band and a night band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StartHour {
    #[serde(rename = "07:00")]
    H07,
    #[serde(rename = "08:00")]
    H08,
    #[serde(rename = "09:00")]
    H09,
    #[serde(rename = "10:00")]
    H10,
    #[serde(rename = "11:00")]
    H11,
    #[serde(rename = "12:00")]
    H12,
    #[serde(rename = "13:00")]
    H13,
    #[serde(rename = "18:00")]
    H18,
    #[serde(rename = "19:00")]
    H19,
    #[serde(rename = "20:00")]
    H20,
    #[serde(rename = "21:00")]
    H21,
    #[serde(rename = "22:00")]
    H22,
}

impl StartHour {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::H07,
            Self::H08,
            Self::H09,
            Self::H10,
            Self::H11,
            Self::H12,
            Self::H13,
            Self::H18,
            Self::H19,
            Self::H20,
            Self::H21,
            Self::H22,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::H07 => "07:00",
            Self::H08 => "08:00",
            Self::H09 => "09:00",
            Self::H10 => "10:00",
            Self::H11 => "11:00",
            Self::H12 => "12:00",
            Self::H13 => "13:00",
            Self::H18 => "18:00",
            Self::H19 => "19:00",
            Self::H20 => "20:00",
            Self::H21 => "21:00",
            Self::H22 => "22:00",
        }
    }
}

/// A weekly recurring meeting slot. Weekday and start hour always travel
/// together; an assignment either has a complete slot or none at all.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSlot {
    pub weekday: Weekday,
    pub start_hour: StartHour,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.weekday.label(), self.start_hour.label())
    }
}

/// A physical teaching location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub color: String,
}

impl Venue {
    /// The reserved name standing for "no physical venue". It is never a
    /// stored venue row; assignments without a venue belong to this bucket.
    pub const RESERVED_REMOTE_NAME: &'static str = "Remote";

    pub fn is_reserved_name(name: &str) -> bool {
        name.trim().eq_ignore_ascii_case(Self::RESERVED_REMOTE_NAME)
    }
}

/// A teaching staff member. The venue set records where the instructor is
/// based; it is edited independently of any assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub given_name: String,
    pub family_name: String,
    pub external_id: String,
    #[serde(default)]
    pub venues: BTreeSet<VenueId>,
}

impl Instructor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// A course offering, the unit that enrolls students. Enrollment is a
/// point-in-time snapshot maintained by the loader, shared by every
/// assignment of the section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSection {
    pub id: SectionId,
    pub code: String,
    pub name: String,
    pub enrollment: u32,
}

/// An academic term scoping which assignments are current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub year: i32,
    pub number: u8,
    pub active: bool,
}

/// One delivery arrangement for a course section in a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub section: SectionId,
    pub term: TermId,
    pub modality: Modality,
    pub instructor: Option<InstructorId>,
    pub venue: Option<VenueId>,
    pub slot: Option<TimeSlot>,
    /// Whether the venue admits walk-in students to an otherwise virtual
    /// session.
    #[serde(default)]
    pub hosts_walk_ins: bool,
}

impl Assignment {
    pub fn is_scheduled(&self) -> bool {
        self.slot.is_some()
    }

    pub fn is_staffed(&self) -> bool {
        self.instructor.is_some()
    }
}

/// The mutable face of an assignment as supplied by the calling
/// collaborator. Section and term are fixed at creation; everything here can
/// change over the assignment's life. Weekday and start hour arrive
/// separately and are folded into a [`TimeSlot`] by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub modality: Modality,
    #[serde(default)]
    pub instructor: Option<InstructorId>,
    #[serde(default)]
    pub venue: Option<VenueId>,
    #[serde(default)]
    pub weekday: Option<Weekday>,
    #[serde(default)]
    pub start_hour: Option<StartHour>,
    #[serde(default)]
    pub hosts_walk_ins: bool,
}

impl AssignmentDraft {
    pub fn new(modality: Modality) -> Self {
        Self {
            modality,
            instructor: None,
            venue: None,
            weekday: None,
            start_hour: None,
            hosts_walk_ins: false,
        }
    }
}
