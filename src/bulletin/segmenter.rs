/// Zone segments in a CWF product are terminated by this marker
pub const SEGMENT_DELIMITER: &str = "$$";

/// Split a bulletin body into raw zone segments
///
/// Pieces that are empty or whitespace-only (the tail after the last `$$`, doubled
/// delimiters) are dropped. Segments keep their bulletin order and are returned untrimmed.
pub fn segment(body: &str) -> Vec<&str> {
    body.split(SEGMENT_DELIMITER)
        .filter(|piece| !piece.trim().is_empty())
        .collect()
}
