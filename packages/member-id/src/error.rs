//! Typed failures for encoding, decoding, and registration.

use thiserror::Error;

/// Encode input contract violations.
///
/// These indicate a caller bug or unvalidated upstream input, not a
/// user-facing validation failure ([`crate::validator::ValidationVerdict`]
/// covers those). Nothing is partially constructed on failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidIdentity {
    #[error("'{field}' is required and must be non-empty")]
    EmptyName { field: &'static str },

    #[error("Not a valid country code. Got {code}")]
    UnsupportedCountry { code: String },

    #[error("Birth year {birth_year} cannot be after the generation year {generation_year}")]
    BirthAfterGeneration {
        birth_year: i32,
        generation_year: i32,
    },
}

/// Structural decode failures.
///
/// The `Display` text doubles as the validation reason shown to users;
/// existing consumers match on the "incorrect length", "country code",
/// and "not valid" substrings, so the phrasing is a compatibility
/// contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Member ID is an incorrect length or number of segments.")]
    LengthMismatch,

    #[error("Incorrect country code. Got {code}")]
    UnknownCountry { code: String },

    #[error("Member ID segment '{segment}' is not valid. Got {value}")]
    MalformedSegment {
        segment: &'static str,
        value: String,
    },
}

/// Registry-level failures.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The exact value is already registered. Surfaced distinctly: a
    /// conflict at issue time is a token collision, not a bad candidate
    /// string. Whether to retry is the caller's policy.
    #[error("Member ID {value} is already registered")]
    Conflict { value: String },

    /// The backing store failed or was unreachable.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Failures surfaced when issuing a new Member ID.
#[derive(Error, Debug)]
pub enum IssueError {
    #[error(transparent)]
    InvalidIdentity(#[from] InvalidIdentity),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
