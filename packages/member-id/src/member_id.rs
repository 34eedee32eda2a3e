//! The Member ID value type and its format grammar.
//!
//! A Member ID is five dash-joined segments: `GG-CC-YY-MM-TTTT`.
//! The grammar lives in [`SEGMENTS`] so length and charset checks stay
//! table-driven; `CANONICAL_LEN` is derived from that table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Character class a segment draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// ASCII digits only.
    Digits,
    /// Two letters, checked against the configured country set.
    Country,
    /// Hex characters; case-insensitive on input, uppercase canonical.
    Hex,
}

/// One dash-delimited component of the Member ID grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub name: &'static str,
    pub len: usize,
    pub kind: SegmentKind,
}

/// Ordered segment grammar for the canonical format.
pub const SEGMENTS: [Segment; 5] = [
    Segment { name: "generation_mark", len: 2, kind: SegmentKind::Digits },
    Segment { name: "country", len: 2, kind: SegmentKind::Country },
    Segment { name: "birth_year", len: 2, kind: SegmentKind::Digits },
    Segment { name: "birth_month", len: 2, kind: SegmentKind::Digits },
    Segment { name: "name_token", len: 4, kind: SegmentKind::Hex },
];

/// Index of the country segment within [`SEGMENTS`].
pub const COUNTRY_SEGMENT: usize = 1;

/// Separator between segments.
pub const SEPARATOR: &str = "-";

/// Total canonical length: every segment plus the joining dashes.
pub const CANONICAL_LEN: usize = {
    let mut total = SEGMENTS.len() - 1;
    let mut i = 0;
    while i < SEGMENTS.len() {
        total += SEGMENTS[i].len;
        i += 1;
    }
    total
};

impl SegmentKind {
    /// Whether `c` belongs to this segment's charset.
    pub fn accepts(&self, c: char) -> bool {
        match self {
            SegmentKind::Digits => c.is_ascii_digit(),
            SegmentKind::Country => c.is_ascii_alphabetic(),
            SegmentKind::Hex => c.is_ascii_hexdigit(),
        }
    }
}

/// A parsed, canonical Member ID.
///
/// Constructed only by [`crate::codec::encode`] and
/// [`crate::codec::decode`]; immutable afterwards. Segments are stored
/// in canonical form (uppercase country and name token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberId {
    pub generation_mark: String,
    pub country: String,
    pub birth_year: String,
    pub birth_month: String,
    pub name_token: String,
}

impl MemberId {
    /// Segments in grammar order.
    pub fn segments(&self) -> [&str; SEGMENTS.len()] {
        [
            &self.generation_mark,
            &self.country,
            &self.birth_year,
            &self.birth_month,
            &self.name_token,
        ]
    }

    /// Canonical string form, segments joined with `-`.
    pub fn value(&self) -> String {
        self.segments().join(SEPARATOR)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_len_is_derived_from_the_segment_table() {
        // 2 + 2 + 2 + 2 + 4 segment chars plus 4 dashes
        assert_eq!(CANONICAL_LEN, 16);
    }

    #[test]
    fn country_segment_index_matches_the_table() {
        assert_eq!(SEGMENTS[COUNTRY_SEGMENT].kind, SegmentKind::Country);
    }

    #[test]
    fn display_joins_segments_with_dashes() {
        let id = MemberId {
            generation_mark: "23".into(),
            country: "MX".into(),
            birth_year: "61".into(),
            birth_month: "01".into(),
            name_token: "CB84".into(),
        };
        assert_eq!(id.to_string(), "23-MX-61-01-CB84");
        assert_eq!(id.value().len(), CANONICAL_LEN);
    }
}
