// Coastal Waters Forecast (CWF) bulletin module
//
// This module turns the plain text of an NWS coastal waters forecast product into zones.
// A bulletin contains:
// - One segment per zone, terminated by `$$`
// - A zone header: identifier line, zone name, issuance time
// - Forecast periods introduced by `.LABEL...narrative` marker lines
// - An optional `...ADVISORY...` line anywhere after the header

pub mod day_scanner;
pub mod header;
pub mod parser;
pub mod record;
pub mod segmenter;

pub use day_scanner::ScannedBlocks;
pub use header::{MalformedHeader, ZoneHeader};
pub use parser::{BulletinParser, ParseReport, SkippedSegment};
pub use record::{DayEntry, Zone};
