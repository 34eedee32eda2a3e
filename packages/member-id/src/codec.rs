//! Encoding and decoding of the canonical Member ID format.
//!
//! Both directions are pure: `encode` takes the generation year as a
//! parameter and `decode` takes the country set, so neither touches a
//! clock, the environment, or the registry. The registry alone answers
//! whether a decoded string was ever issued.

use chrono::{Datelike, NaiveDate};

use crate::country::CountrySet;
use crate::error::{DecodeError, InvalidIdentity};
use crate::member_id::{MemberId, SegmentKind, CANONICAL_LEN, COUNTRY_SEGMENT, SEGMENTS, SEPARATOR};
use crate::name_token::name_token;

/// Identity fields a new Member ID is derived from.
///
/// Ephemeral input, scoped to one `encode` call; the core never persists
/// it. The ID carries a digest of the name, not the name itself.
#[derive(Debug, Clone)]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub country_code: String,
}

/// Encode a new Member ID from identity fields.
///
/// `generation_year` is the calendar year the ID is minted in; the
/// orchestration layer passes the current year. Constraint violations
/// return [`InvalidIdentity`] rather than coercing the input.
pub fn encode(
    identity: &Identity,
    generation_year: i32,
    countries: &CountrySet,
) -> Result<MemberId, InvalidIdentity> {
    if identity.first_name.trim().is_empty() {
        return Err(InvalidIdentity::EmptyName { field: "first_name" });
    }
    if identity.last_name.trim().is_empty() {
        return Err(InvalidIdentity::EmptyName { field: "last_name" });
    }
    if !countries.contains(&identity.country_code) {
        return Err(InvalidIdentity::UnsupportedCountry {
            code: identity.country_code.clone(),
        });
    }
    let birth_year = identity.date_of_birth.year();
    if birth_year > generation_year {
        return Err(InvalidIdentity::BirthAfterGeneration {
            birth_year,
            generation_year,
        });
    }

    Ok(MemberId {
        generation_mark: two_digit_year(generation_year),
        country: identity.country_code.trim().to_uppercase(),
        birth_year: two_digit_year(birth_year),
        birth_month: format!("{:02}", identity.date_of_birth.month()),
        name_token: name_token(&identity.first_name, &identity.last_name),
    })
}

/// Decode a candidate string into a Member ID.
///
/// Checks run in fixed order and the first failure wins: the length
/// family (total length, segment count, per-segment lengths), then the
/// country set, then per-segment charsets. Decode succeeds on any string
/// satisfying the grammar - it never cross-checks birth year/month
/// against a calendar and never re-derives the name token.
pub fn decode(candidate: &str, countries: &CountrySet) -> Result<MemberId, DecodeError> {
    let parts: Vec<&str> = candidate.split(SEPARATOR).collect();

    if candidate.chars().count() != CANONICAL_LEN
        || parts.len() != SEGMENTS.len()
        || SEGMENTS
            .iter()
            .zip(&parts)
            .any(|(segment, part)| part.chars().count() != segment.len)
    {
        return Err(DecodeError::LengthMismatch);
    }

    let country = parts[COUNTRY_SEGMENT];
    if !countries.contains(country) {
        return Err(DecodeError::UnknownCountry {
            code: country.to_string(),
        });
    }

    for (segment, part) in SEGMENTS.iter().zip(&parts) {
        // The country segment is owned by the set lookup above.
        if segment.kind == SegmentKind::Country {
            continue;
        }
        if !part.chars().all(|c| segment.kind.accepts(c)) {
            return Err(DecodeError::MalformedSegment {
                segment: segment.name,
                value: part.to_string(),
            });
        }
    }

    Ok(MemberId {
        generation_mark: parts[0].to_string(),
        country: country.to_uppercase(),
        birth_year: parts[2].to_string(),
        birth_month: parts[3].to_string(),
        name_token: parts[4].to_uppercase(),
    })
}

fn two_digit_year(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            first_name: "Jose".into(),
            last_name: "Vasconcelos".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1961, 1, 1).expect("valid date"),
            country_code: "MX".into(),
        }
    }

    #[test]
    fn encode_builds_the_expected_segments() {
        let id = encode(&identity(), 2023, &CountrySet::default()).expect("valid identity");
        assert_eq!(id.generation_mark, "23");
        assert_eq!(id.country, "MX");
        assert_eq!(id.birth_year, "61");
        assert_eq!(id.birth_month, "01");
        assert_eq!(id.name_token.len(), 4);
        assert_eq!(id.value().chars().count(), CANONICAL_LEN);
    }

    #[test]
    fn encode_zero_pads_month_and_wraps_years() {
        let mut input = identity();
        input.date_of_birth = NaiveDate::from_ymd_opt(2005, 9, 30).expect("valid date");
        let id = encode(&input, 2100, &CountrySet::default()).expect("valid identity");
        assert_eq!(id.generation_mark, "00");
        assert_eq!(id.birth_year, "05");
        assert_eq!(id.birth_month, "09");
    }

    #[test]
    fn encode_rejects_blank_names() {
        let mut input = identity();
        input.first_name = "   ".into();
        assert_eq!(
            encode(&input, 2023, &CountrySet::default()),
            Err(InvalidIdentity::EmptyName { field: "first_name" })
        );

        let mut input = identity();
        input.last_name = String::new();
        assert_eq!(
            encode(&input, 2023, &CountrySet::default()),
            Err(InvalidIdentity::EmptyName { field: "last_name" })
        );
    }

    #[test]
    fn encode_rejects_unsupported_country() {
        let mut input = identity();
        input.country_code = "US".into();
        assert_eq!(
            encode(&input, 2023, &CountrySet::default()),
            Err(InvalidIdentity::UnsupportedCountry { code: "US".into() })
        );
    }

    #[test]
    fn encode_rejects_birth_after_generation_year() {
        let input = identity();
        assert_eq!(
            encode(&input, 1960, &CountrySet::default()),
            Err(InvalidIdentity::BirthAfterGeneration {
                birth_year: 1961,
                generation_year: 1960,
            })
        );
    }

    #[test]
    fn encode_uppercases_the_country_code() {
        let mut input = identity();
        input.country_code = "mx".into();
        let id = encode(&input, 2023, &CountrySet::default()).expect("valid identity");
        assert_eq!(id.country, "MX");
    }

    #[test]
    fn decode_accepts_the_canonical_grammar() {
        let id = decode("23-MX-61-01-CB84", &CountrySet::default()).expect("well-formed");
        assert_eq!(id.value(), "23-MX-61-01-CB84");
    }

    #[test]
    fn decode_canonicalizes_token_case() {
        let id = decode("23-MX-61-01-cb84", &CountrySet::default()).expect("well-formed");
        assert_eq!(id.name_token, "CB84");
    }

    #[test]
    fn decode_rejects_wrong_total_length() {
        assert_eq!(
            decode("23-MX-61-01-CB845", &CountrySet::default()),
            Err(DecodeError::LengthMismatch)
        );
    }

    #[test]
    fn decode_rejects_wrong_segment_count() {
        // 16 chars but six parts
        assert_eq!(
            decode("23-MX-61-01-C-84", &CountrySet::default()),
            Err(DecodeError::LengthMismatch)
        );
    }

    #[test]
    fn decode_rejects_misplaced_segment_lengths() {
        // 16 chars, five parts, but lengths shifted off the table
        assert_eq!(
            decode("234-MX-61-1-CB84", &CountrySet::default()),
            Err(DecodeError::LengthMismatch)
        );
    }

    #[test]
    fn decode_rejects_unknown_country() {
        assert_eq!(
            decode("23-US-61-01-CB84", &CountrySet::default()),
            Err(DecodeError::UnknownCountry { code: "US".into() })
        );
    }

    #[test]
    fn decode_rejects_digits_in_the_country_segment_as_unknown_country() {
        assert_eq!(
            decode("23-9X-61-01-CB84", &CountrySet::default()),
            Err(DecodeError::UnknownCountry { code: "9X".into() })
        );
    }

    #[test]
    fn decode_rejects_non_digit_numeric_segments() {
        assert_eq!(
            decode("2A-MX-61-01-CB84", &CountrySet::default()),
            Err(DecodeError::MalformedSegment {
                segment: "generation_mark",
                value: "2A".into(),
            })
        );
        assert_eq!(
            decode("23-MX-6!-01-CB84", &CountrySet::default()),
            Err(DecodeError::MalformedSegment {
                segment: "birth_year",
                value: "6!".into(),
            })
        );
    }

    #[test]
    fn decode_rejects_non_hex_name_tokens() {
        assert_eq!(
            decode("23-MX-61-01-CBG4", &CountrySet::default()),
            Err(DecodeError::MalformedSegment {
                segment: "name_token",
                value: "CBG4".into(),
            })
        );
    }

    #[test]
    fn decode_is_lenient_about_calendar_months() {
        // Month 13 is structurally valid; plausibility is out of scope.
        let id = decode("23-MX-61-13-CB84", &CountrySet::default()).expect("well-formed");
        assert_eq!(id.birth_month, "13");
    }

    #[test]
    fn round_trip_preserves_segments() {
        let id = encode(&identity(), 2023, &CountrySet::default()).expect("valid identity");
        let reparsed = decode(&id.value(), &CountrySet::default()).expect("well-formed");
        assert_eq!(id, reparsed);
    }
}
