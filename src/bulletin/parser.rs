use tracing::{debug, instrument, warn};

use super::day_scanner;
use super::header::{self, MalformedHeader};
use super::record::Zone;
use super::segmenter;

/// A segment that was not turned into a zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSegment {
    /// Position among the non-empty segments of the bulletin
    pub index: usize,
    pub first_line: String,
    pub reason: MalformedHeader,
}

impl SkippedSegment {
    /// Reason for the skip, with the first line appended unless the reason already quotes it
    pub fn describe(&self) -> String {
        match self.reason {
            MalformedHeader::InvalidZoneId(_) => self.reason.to_string(),
            _ => format!("{} (first line '{}')", self.reason, self.first_line),
        }
    }
}

/// Zones decoded from a bulletin together with the segments that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub zones: Vec<Zone>,
    pub skipped: Vec<SkippedSegment>,
}

/// Parser for the text of a coastal waters forecast bulletin
///
/// Stateless; every call builds a fresh set of zones.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletinParser;

impl BulletinParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a bulletin body into zones, in bulletin order
    ///
    /// Segments with a malformed header are logged and skipped. A bulletin with no valid
    /// zone yields an empty vec; deciding whether that is a failure is left to the caller.
    pub fn parse(&self, body: &str) -> Vec<Zone> {
        self.parse_with_report(body).zones
    }

    #[instrument(skip(self, body), fields(body_size = body.len()))]
    pub fn parse_with_report(&self, body: &str) -> ParseReport {
        let segments = segmenter::segment(body);
        debug!("Split bulletin into {} segments", segments.len());

        let mut report = ParseReport::default();

        for (index, segment) in segments.into_iter().enumerate() {
            match header::validate(segment) {
                Ok(zone_header) => {
                    let scanned = day_scanner::scan(zone_header.body.iter().copied());
                    debug!(
                        "Segment {}: zone {} with {} forecast periods",
                        index,
                        zone_header.id,
                        scanned.days.len()
                    );
                    report.zones.push(Zone::build(zone_header, scanned));
                }
                Err(reason) => {
                    let first_line = segment.trim().lines().next().unwrap_or("").trim();
                    let skipped = SkippedSegment {
                        index,
                        first_line: first_line.to_string(),
                        reason,
                    };
                    warn!("Skipping segment {}: {}", index, skipped.describe());
                    report.skipped.push(skipped);
                }
            }
        }

        if !report.skipped.is_empty() {
            warn!(
                "Skipped {} malformed segments out of {}",
                report.skipped.len(),
                report.skipped.len() + report.zones.len()
            );
        }
        debug!("Successfully parsed {} zones", report.zones.len());

        report
    }
}
