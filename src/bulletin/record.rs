use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::day_scanner::ScannedBlocks;
use super::header::ZoneHeader;

/// A single forecast period within a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub day: String,
    pub details: String,
}

/// One forecast zone decoded from a bulletin segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub update_time: String,
    // Absent advisories travel as "" on the wire
    #[serde(
        default,
        serialize_with = "serialize_advisory",
        deserialize_with = "deserialize_advisory"
    )]
    pub advisory: Option<String>,
    pub forecast: Vec<DayEntry>,
}

impl Zone {
    /// Assemble a zone from an accepted header and the scanned day blocks
    pub fn build(header: ZoneHeader<'_>, scanned: ScannedBlocks) -> Self {
        Zone {
            id: header.id.to_string(),
            name: header.name.to_string(),
            update_time: header.update_time.to_string(),
            advisory: scanned.advisory,
            forecast: scanned.days,
        }
    }

    pub fn has_advisory(&self) -> bool {
        self.advisory.is_some()
    }
}

fn serialize_advisory<S>(advisory: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(advisory.as_deref().unwrap_or(""))
}

fn deserialize_advisory<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
