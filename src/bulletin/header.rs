use regex::Regex;
use std::sync::LazyLock;

static ZONE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ANZ\d{3}-\d{6}-$").expect("zone id regex must compile"));

/// Lines every zone segment starts with: identifier, name, issuance time
const HEADER_LINES: usize = 3;

/// Reasons a segment is not accepted as a zone
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedHeader {
    #[error("segment has {found} line(s), a zone header needs at least 3")]
    TooFewLines { found: usize },

    #[error("first line is not a zone identifier: {0:?}")]
    InvalidZoneId(String),

    #[error("zone name line is blank")]
    MissingName,
}

/// Header fields of an accepted segment, borrowed from the bulletin text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneHeader<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub update_time: &'a str,
    /// Lines after the header, untrimmed
    pub body: Vec<&'a str>,
}

/// Check whether a trimmed line is a single-zone identifier such as `ANZ335-021800-`
pub fn is_zone_id(line: &str) -> bool {
    ZONE_ID.is_match(line.trim())
}

/// Validate the leading lines of a zone segment
///
/// The segment is trimmed first, so the blank lines that follow a `$$` do not count
/// towards the header.
pub fn validate(segment: &str) -> Result<ZoneHeader<'_>, MalformedHeader> {
    let lines: Vec<&str> = segment.trim().lines().collect();

    if lines.len() < HEADER_LINES {
        return Err(MalformedHeader::TooFewLines { found: lines.len() });
    }

    let id = lines[0].trim();
    if !is_zone_id(id) {
        return Err(MalformedHeader::InvalidZoneId(id.to_string()));
    }

    let name = lines[1].trim();
    if name.is_empty() {
        return Err(MalformedHeader::MissingName);
    }

    Ok(ZoneHeader {
        id,
        name,
        update_time: lines[2].trim(),
        body: lines[HEADER_LINES..].to_vec(),
    })
}
