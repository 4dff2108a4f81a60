//! Volume name resolution for CSI `CreateVolume` handlers.
//!
//! A provisioning request always carries a provisioner-generated fallback
//! name and may carry the identity of the claim that triggered it. The
//! [`NameResolver`] derives a name from the claim when a [`MetadataSource`]
//! can supply one, sanitising it into the storage system's naming contract,
//! and otherwise returns the fallback name untouched.

pub mod command;
pub mod config;
pub mod kubectl;
pub mod lookup;
pub mod metadata;
pub mod params;
pub mod request;
pub mod resolver;
pub mod sanitize;
pub mod test_support;

pub use command::{CommandError, CommandOutput, CommandRunner, ProcessCommandRunner};
pub use config::{ConfigError, MetadataMode, SharedMetadataSource, VolnameConfig};
pub use kubectl::{KubectlConfig, KubectlLookup};
pub use lookup::{AnnotationSource, ClaimLookup, ClaimRef, annotation_key};
pub use metadata::{ClaimMetadata, MetadataSource, NoMetadata, ParameterSource};
pub use params::{ParamsError, load_parameters};
pub use request::ProvisionRequest;
pub use resolver::NameResolver;
pub use sanitize::{MAX_VOLUME_NAME_LEN, NameError, is_valid_volume_name, sanitize_volume_name};
