use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One parsed roster row. Enum-valued columns stay raw text here; the
/// importer runs them through the boundary parsers so bad values surface
/// as per-row issues instead of aborting the file.
#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) line: u64,
    pub(crate) section_code: String,
    pub(crate) section_name: Option<String>,
    pub(crate) enrollment: Option<u32>,
    pub(crate) instructor: Option<RosterInstructor>,
    pub(crate) assignment: Option<RosterAssignment>,
}

#[derive(Debug)]
pub(crate) struct RosterInstructor {
    pub(crate) external_id: String,
    pub(crate) given_name: Option<String>,
    pub(crate) family_name: Option<String>,
}

#[derive(Debug)]
pub(crate) struct RosterAssignment {
    pub(crate) modality: String,
    pub(crate) weekday: Option<String>,
    pub(crate) start_hour: Option<String>,
    pub(crate) venue_name: Option<String>,
    pub(crate) hosts_walk_ins: bool,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        // Header occupies line 1.
        records.push(row.into_record(index as u64 + 2));
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Section Code")]
    section_code: String,
    #[serde(rename = "Section Name", default, deserialize_with = "empty_string_as_none")]
    section_name: Option<String>,
    #[serde(rename = "Enrollment", default, deserialize_with = "empty_string_as_none")]
    enrollment: Option<String>,
    #[serde(rename = "Instructor Id", default, deserialize_with = "empty_string_as_none")]
    instructor_id: Option<String>,
    #[serde(rename = "Given Name", default, deserialize_with = "empty_string_as_none")]
    given_name: Option<String>,
    #[serde(rename = "Family Name", default, deserialize_with = "empty_string_as_none")]
    family_name: Option<String>,
    #[serde(rename = "Modality", default, deserialize_with = "empty_string_as_none")]
    modality: Option<String>,
    #[serde(rename = "Weekday", default, deserialize_with = "empty_string_as_none")]
    weekday: Option<String>,
    #[serde(rename = "Start Hour", default, deserialize_with = "empty_string_as_none")]
    start_hour: Option<String>,
    #[serde(rename = "Venue", default, deserialize_with = "empty_string_as_none")]
    venue: Option<String>,
    #[serde(rename = "Walk-ins", default, deserialize_with = "empty_string_as_none")]
    walk_ins: Option<String>,
}

impl RosterRow {
    fn into_record(self, line: u64) -> RosterRecord {
        let instructor = self.instructor_id.map(|external_id| RosterInstructor {
            external_id,
            given_name: self.given_name,
            family_name: self.family_name,
        });
        let assignment = self.modality.map(|modality| RosterAssignment {
            modality,
            weekday: self.weekday,
            start_hour: self.start_hour,
            venue_name: self.venue,
            hosts_walk_ins: self.walk_ins.as_deref().map(truthy).unwrap_or(false),
        });
        RosterRecord {
            line,
            section_code: self.section_code,
            section_name: self.section_name,
            enrollment: self.enrollment.and_then(|raw| raw.parse().ok()),
            instructor,
            assignment,
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
