//! Issuance and validation orchestration over a registry.

use chrono::{Datelike, Utc};
use tracing::{debug, info};

use crate::codec::{self, Identity};
use crate::country::CountrySet;
use crate::error::{IssueError, RegistryError};
use crate::member_id::MemberId;
use crate::registry::MemberIdRegistry;
use crate::validator::{self, ValidationVerdict};

/// Ties the codec to a registry.
///
/// The codec itself stays pure; this is where the current year is read
/// and where a freshly encoded ID is recorded before anyone sees it.
pub struct MemberIdService<R> {
    countries: CountrySet,
    registry: R,
}

impl<R: MemberIdRegistry> MemberIdService<R> {
    pub fn new(countries: CountrySet, registry: R) -> Self {
        Self { countries, registry }
    }

    /// Encode a new Member ID and record it before returning it.
    ///
    /// The append is awaited so a freshly issued ID always validates as
    /// registered. A [`RegistryError::Conflict`] means the derived value
    /// collided with an existing one; whether to retry is the caller's
    /// decision.
    pub async fn issue(&self, identity: &Identity) -> Result<MemberId, IssueError> {
        let generation_year = Utc::now().year();
        let id = codec::encode(identity, generation_year, &self.countries)?;
        self.registry.append(&id).await?;
        info!("Issued member id {}", id);
        Ok(id)
    }

    /// Validate a candidate string against the format and the registry.
    pub async fn validate(&self, candidate: &str) -> Result<ValidationVerdict, RegistryError> {
        let verdict = validator::validate(candidate, &self.countries, &self.registry).await?;
        debug!(
            "Validated candidate: is_valid={} is_registered={}",
            verdict.is_valid, verdict.is_registered
        );
        Ok(verdict)
    }

    pub fn countries(&self) -> &CountrySet {
        &self.countries
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }
}
