//! Provisioning request model consumed by the name resolver.

use std::collections::BTreeMap;

/// Parameter key carrying the claim namespace, attached by the external
/// provisioner when extra create metadata is enabled.
pub const PARAM_CLAIM_NAMESPACE: &str = "csi.storage.k8s.io/pvc/namespace";

/// Parameter key carrying the claim name, attached by the external
/// provisioner when extra create metadata is enabled.
pub const PARAM_CLAIM_NAME: &str = "csi.storage.k8s.io/pvc/name";

/// Storage class parameter prepended to claim-derived names.
pub const PARAM_NAME_PREFIX: &str = "volumeNamePrefix";

/// Storage class parameter appended to claim-derived names.
pub const PARAM_NAME_SUFFIX: &str = "volumeNameSuffix";

/// Immutable input to name resolution.
///
/// `fallback_name` is always present and is assumed to satisfy the naming
/// contract already. The optional fields carry claim identity and name
/// decorations when the transport supplies them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProvisionRequest {
    /// Provisioner-generated name, usually `pvc-<uuid>`.
    pub fallback_name: String,
    /// Namespace of the originating claim.
    pub claim_namespace: Option<String>,
    /// Name of the originating claim.
    pub claim_name: Option<String>,
    /// Decoration placed before claim-derived names.
    pub name_prefix: Option<String>,
    /// Decoration placed after claim-derived names.
    pub name_suffix: Option<String>,
}

impl ProvisionRequest {
    /// Creates a request carrying only the fallback name.
    #[must_use]
    pub fn new(fallback_name: impl Into<String>) -> Self {
        Self {
            fallback_name: fallback_name.into(),
            ..Self::default()
        }
    }

    /// Builds a request from the transport's parameter map.
    ///
    /// Only the recognised keys are read; values are kept verbatim so the
    /// resolver can judge blankness itself.
    #[must_use]
    pub fn from_parameters(
        fallback_name: impl Into<String>,
        parameters: &BTreeMap<String, String>,
    ) -> Self {
        let lookup = |key: &str| parameters.get(key).cloned();
        Self {
            fallback_name: fallback_name.into(),
            claim_namespace: lookup(PARAM_CLAIM_NAMESPACE),
            claim_name: lookup(PARAM_CLAIM_NAME),
            name_prefix: lookup(PARAM_NAME_PREFIX),
            name_suffix: lookup(PARAM_NAME_SUFFIX),
        }
    }

    /// Sets the claim namespace and name.
    #[must_use]
    pub fn claim(mut self, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        self.claim_namespace = Some(namespace.into());
        self.claim_name = Some(name.into());
        self
    }

    /// Sets the optional name prefix.
    #[must_use]
    pub fn name_prefix(mut self, value: Option<String>) -> Self {
        self.name_prefix = value;
        self
    }

    /// Sets the optional name suffix.
    #[must_use]
    pub fn name_suffix(mut self, value: Option<String>) -> Self {
        self.name_suffix = value;
        self
    }
}

/// Returns the value when it holds something other than whitespace.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|inner| !inner.trim().is_empty())
}
