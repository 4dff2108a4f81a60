//! Strategies for discovering the claim behind a provisioning request.
//!
//! Claim identity reaches the resolver in one of two ways: attached to the
//! request as parameters by the external provisioner, or fetched on demand
//! from the cluster API. Both are expressed as a [`MetadataSource`] so the
//! resolver pipeline exists only once.

use crate::request::{ProvisionRequest, non_blank};

/// Claim information from which a raw volume name can be composed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClaimMetadata {
    /// Claim identity attached directly to the request parameters.
    Parameters {
        /// Claim namespace.
        namespace: String,
        /// Claim name.
        claim_name: String,
        /// Decoration placed before the composed name.
        prefix: String,
        /// Decoration placed after the composed name.
        suffix: String,
    },
    /// Operator-supplied base name read from a claim annotation.
    Annotated {
        /// Namespace of the bound claim.
        namespace: String,
        /// Annotation value naming the volume.
        base_name: String,
    },
}

impl ClaimMetadata {
    /// Composes the unsanitised candidate name.
    ///
    /// Parameter metadata yields `<prefix>ns-<namespace>--pvc-<claim><suffix>`;
    /// annotation metadata yields `pvc-<namespace>-<base_name>`.
    #[must_use]
    pub fn raw_name(&self) -> String {
        match self {
            Self::Parameters {
                namespace,
                claim_name,
                prefix,
                suffix,
            } => format!("{prefix}ns-{namespace}--pvc-{claim_name}{suffix}"),
            Self::Annotated {
                namespace,
                base_name,
            } => format!("pvc-{namespace}-{}", base_name.trim()),
        }
    }

    /// Short label describing where the metadata came from.
    #[must_use]
    pub const fn origin(&self) -> &'static str {
        match self {
            Self::Parameters { .. } => "parameters",
            Self::Annotated { .. } => "annotation",
        }
    }
}

/// Capability that yields claim metadata for a request, if any exists.
///
/// Implementations must be read-only and must absorb their own failures:
/// anything that prevents metadata from being found is reported as `None`.
pub trait MetadataSource {
    /// Returns claim metadata for `request`, or `None` to fall back.
    fn claim_metadata(&self, request: &ProvisionRequest) -> Option<ClaimMetadata>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for Box<S> {
    fn claim_metadata(&self, request: &ProvisionRequest) -> Option<ClaimMetadata> {
        (**self).claim_metadata(request)
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn claim_metadata(&self, request: &ProvisionRequest) -> Option<ClaimMetadata> {
        (**self).claim_metadata(request)
    }
}

/// Reads claim identity from parameters attached to the request.
///
/// Both namespace and claim name must be non-blank; a partial pair counts as
/// no metadata at all.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ParameterSource;

impl MetadataSource for ParameterSource {
    fn claim_metadata(&self, request: &ProvisionRequest) -> Option<ClaimMetadata> {
        let namespace = non_blank(request.claim_namespace.as_deref())?;
        let claim_name = non_blank(request.claim_name.as_deref())?;
        Some(ClaimMetadata::Parameters {
            namespace: namespace.to_owned(),
            claim_name: claim_name.to_owned(),
            prefix: request.name_prefix.clone().unwrap_or_default(),
            suffix: request.name_suffix.clone().unwrap_or_default(),
        })
    }
}

/// Source for deployments that never receive claim metadata.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoMetadata;

impl MetadataSource for NoMetadata {
    fn claim_metadata(&self, _request: &ProvisionRequest) -> Option<ClaimMetadata> {
        None
    }
}
