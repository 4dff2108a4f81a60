//! Resolution of the final volume name for a provisioning request.
//!
//! The resolver asks its [`MetadataSource`] for claim metadata. When the
//! source finds a claim, the composed candidate is sanitised and returned;
//! otherwise the request's fallback name is returned untouched.

use tracing::debug;

use crate::metadata::MetadataSource;
use crate::request::ProvisionRequest;
use crate::sanitize::{NameError, is_valid_volume_name, sanitize_volume_name};

/// Picks the name source for a request and produces the final volume name.
#[derive(Clone, Debug, Default)]
pub struct NameResolver<S> {
    source: S,
}

impl<S: MetadataSource> NameResolver<S> {
    /// Creates a resolver backed by `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolves the name to give the volume created for `request`.
    ///
    /// Claim-derived names take precedence over the fallback name. The
    /// fallback name is returned byte-for-byte and is never re-sanitised.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::Empty`] when a claim-derived candidate sanitises
    /// to nothing. Lookup failures never surface as errors.
    pub fn resolve(&self, request: &ProvisionRequest) -> Result<String, NameError> {
        let Some(metadata) = self.source.claim_metadata(request) else {
            debug!(name = %request.fallback_name, "using fallback volume name");
            return Ok(request.fallback_name.clone());
        };

        let raw = metadata.raw_name();
        let name = sanitize_volume_name(&raw)?;
        debug_assert!(is_valid_volume_name(&name), "sanitised name {name:?} breaks contract");
        debug!(
            origin = metadata.origin(),
            %raw,
            %name,
            fallback = %request.fallback_name,
            "using claim-derived volume name"
        );
        Ok(name)
    }
}
