//! On-demand claim discovery through a cluster API lookup capability.

use tracing::debug;

use crate::metadata::{ClaimMetadata, MetadataSource};
use crate::request::{ProvisionRequest, non_blank};

/// Annotation name, qualified by the driver name, holding an
/// operator-supplied volume base name.
pub const VOLUME_NAME_ANNOTATION: &str = "volumeName";

/// Returns the driver-namespaced annotation key, e.g.
/// `volname.csi.io/volumeName`.
#[must_use]
pub fn annotation_key(driver_name: &str) -> String {
    format!("{}/{VOLUME_NAME_ANNOTATION}", driver_name.trim())
}

/// Namespace and name of the claim a volume is bound to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimRef {
    /// Claim namespace.
    pub namespace: String,
    /// Claim name.
    pub name: String,
}

impl ClaimRef {
    /// Creates a claim reference.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.namespace.is_empty() && !self.name.is_empty()
    }
}

/// Read-only, best-effort access to claim bindings and annotations.
///
/// Implementations swallow their own errors (missing objects, API failures,
/// timeouts) and report them as `None`.
pub trait ClaimLookup {
    /// Returns the claim bound to the volume named `volume_name`.
    fn claim_binding(&self, volume_name: &str) -> Option<ClaimRef>;

    /// Returns the value of `annotation_key` on the given claim.
    fn claim_annotation(&self, claim: &ClaimRef, annotation_key: &str) -> Option<String>;
}

impl<L: ClaimLookup + ?Sized> ClaimLookup for &L {
    fn claim_binding(&self, volume_name: &str) -> Option<ClaimRef> {
        (**self).claim_binding(volume_name)
    }

    fn claim_annotation(&self, claim: &ClaimRef, annotation_key: &str) -> Option<String> {
        (**self).claim_annotation(claim, annotation_key)
    }
}

/// Metadata source that resolves the fallback name to its bound claim and
/// reads the volume name annotation from that claim.
#[derive(Clone, Debug)]
pub struct AnnotationSource<L> {
    lookup: L,
    annotation_key: String,
}

impl<L: ClaimLookup> AnnotationSource<L> {
    /// Creates a source reading the annotation owned by `driver_name`.
    #[must_use]
    pub fn new(lookup: L, driver_name: &str) -> Self {
        Self {
            lookup,
            annotation_key: annotation_key(driver_name),
        }
    }

    /// Returns the annotation key this source reads.
    #[must_use]
    pub fn annotation_key(&self) -> &str {
        &self.annotation_key
    }
}

impl<L: ClaimLookup> MetadataSource for AnnotationSource<L> {
    fn claim_metadata(&self, request: &ProvisionRequest) -> Option<ClaimMetadata> {
        let Some(claim) = self.lookup.claim_binding(&request.fallback_name) else {
            debug!(volume = %request.fallback_name, "no claim binding found");
            return None;
        };
        if !claim.is_complete() {
            debug!(volume = %request.fallback_name, "claim reference is incomplete");
            return None;
        }

        let annotation = self.lookup.claim_annotation(&claim, &self.annotation_key);
        let Some(base_name) = non_blank(annotation.as_deref()) else {
            debug!(
                namespace = %claim.namespace,
                claim = %claim.name,
                key = %self.annotation_key,
                "claim carries no volume name annotation"
            );
            return None;
        };

        Some(ClaimMetadata::Annotated {
            base_name: base_name.trim().to_owned(),
            namespace: claim.namespace,
        })
    }
}
