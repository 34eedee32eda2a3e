//! Validation of candidate Member ID strings.
//!
//! Structural checks come from [`crate::codec::decode`]; the registry
//! contributes the `is_registered` flag for structurally valid
//! candidates. An invalid candidate is a routine outcome returned as
//! data, never an error - only registry failures propagate.

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::country::CountrySet;
use crate::error::RegistryError;
use crate::registry::MemberIdRegistry;

/// Outcome of validating one candidate string.
///
/// `invalid_reason` is display-ready text. Error categories only make
/// sense internally, so consumers detect them by substring instead:
/// "incorrect length", "country code", and "not valid" are kept stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub is_registered: bool,
    pub invalid_reason: Option<String>,
}

/// Trim surrounding whitespace and uppercase a candidate before
/// validation, so hand-typed input compares against canonical form.
pub fn clean(candidate: &str) -> String {
    candidate.trim().to_uppercase()
}

/// Validate a candidate string.
///
/// The checks short-circuit in order: length family, country set, then
/// per-segment charsets. Only a structurally valid candidate reaches the
/// registry; everything before that reports `is_registered: false`
/// without a lookup.
pub async fn validate(
    candidate: &str,
    countries: &CountrySet,
    registry: &dyn MemberIdRegistry,
) -> Result<ValidationVerdict, RegistryError> {
    let cleaned = clean(candidate);
    match codec::decode(&cleaned, countries) {
        Ok(id) => {
            let is_registered = registry.exists(&id.value()).await?;
            Ok(ValidationVerdict {
                is_valid: true,
                is_registered,
                invalid_reason: None,
            })
        }
        Err(reason) => Ok(ValidationVerdict {
            is_valid: false,
            is_registered: false,
            invalid_reason: Some(reason.to_string()),
        }),
    }
}
