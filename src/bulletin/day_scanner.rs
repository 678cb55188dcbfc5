//! Day-block scanner for the body of a zone segment
//!
//! A zone body mixes three kinds of lines:
//!
//! ```text
//! ...SMALL CRAFT ADVISORY IN EFFECT THROUGH THIS EVENING...   advisory
//! .TODAY...SW winds 15 to 20 kt. Seas 3 to 5 ft.              day marker
//! Chance of showers this afternoon.                            continuation
//! .TONIGHT...                                                  day marker, empty narrative
//! ```
//!
//! Scanning is a fold: each line consumes the previous `ScanState` and yields the next one.

use super::record::DayEntry;

/// Prefix of advisory lines, and the separator between a day label and its narrative
pub const ATTENTION_MARKER: &str = "...";

/// Prefix of a day marker line
pub const PERIOD_MARKER: char = '.';

/// Result of scanning one zone body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedBlocks {
    pub advisory: Option<String>,
    pub days: Vec<DayEntry>,
}

/// How a single trimmed line contributes to the zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Advisory(&'a str),
    DayMarker { label: &'a str, narrative: &'a str },
    Continuation(&'a str),
}

/// Classify one line of a zone body
///
/// A day marker is a line starting with `.` that has a non-empty label before the next
/// `...`. The narrative may follow that `...` on the same line or be empty when the
/// marker closes the line. A `.` line without a label segment is plain text.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with(ATTENTION_MARKER) {
        return LineKind::Advisory(line);
    }

    if let Some((label, narrative)) = line
        .strip_prefix(PERIOD_MARKER)
        .and_then(|rest| rest.split_once(ATTENTION_MARKER))
    {
        let label = label.trim();
        if !label.is_empty() {
            return LineKind::DayMarker {
                label,
                narrative: narrative.trim(),
            };
        }
    }

    LineKind::Continuation(line)
}

#[derive(Debug)]
struct OpenDay {
    label: String,
    text: String,
}

impl OpenDay {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            text: String::new(),
        }
    }

    fn push(&mut self, fragment: &str) {
        if !fragment.is_empty() {
            self.text.push_str(fragment);
            self.text.push(' ');
        }
    }

    fn close(self) -> DayEntry {
        DayEntry {
            day: self.label,
            details: normalize_whitespace(&self.text),
        }
    }
}

#[derive(Debug, Default)]
struct ScanState {
    current: Option<OpenDay>,
    completed: Vec<DayEntry>,
    advisory: Option<String>,
}

impl ScanState {
    fn step(mut self, line: &str) -> Self {
        match classify(line) {
            LineKind::Blank => {}
            LineKind::Advisory(text) => {
                // Last advisory line wins, wherever it sits relative to the day blocks
                self.advisory = Some(text.to_string());
            }
            LineKind::DayMarker { label, narrative } => {
                self = self.flush();
                let mut day = OpenDay::new(label);
                day.push(narrative);
                self.current = Some(day);
            }
            LineKind::Continuation(text) => {
                // Text before the first marker belongs to no period
                if let Some(day) = self.current.as_mut() {
                    day.push(text);
                }
            }
        }
        self
    }

    fn flush(mut self) -> Self {
        if let Some(day) = self.current.take() {
            self.completed.push(day.close());
        }
        self
    }

    fn finish(self) -> ScannedBlocks {
        let state = self.flush();
        ScannedBlocks {
            advisory: state.advisory,
            days: state.completed,
        }
    }
}

/// Scan the body lines of a zone into its advisory and day entries
pub fn scan<'a, I>(lines: I) -> ScannedBlocks
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .fold(ScanState::default(), ScanState::step)
        .finish()
}

/// Collapse runs of whitespace to single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
