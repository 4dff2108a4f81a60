//! Configuration loading via `ortho-config`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::kubectl::{DEFAULT_KUBECTL_BIN, KubectlConfig, KubectlLookup};
use crate::lookup::AnnotationSource;
use crate::metadata::{MetadataSource, NoMetadata, ParameterSource};

/// Metadata source selected by configuration; shareable across request
/// handler threads.
pub type SharedMetadataSource = Box<dyn MetadataSource + Send + Sync>;

/// Default driver name used to namespace the volume name annotation.
pub const DEFAULT_DRIVER_NAME: &str = "volname.csi.io";

/// Strategy by which claim metadata reaches the resolver.
///
/// A deployment wires exactly one of these.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MetadataMode {
    /// Claim identity is attached to the request parameters upstream.
    #[default]
    Parameters,
    /// Claim identity and base name are fetched from the cluster API.
    Annotations,
    /// No claim metadata is available; the fallback name is always used.
    None,
}

impl MetadataMode {
    /// Accepted spellings, in the order they are documented.
    pub const VARIANTS: [&'static str; 3] = ["parameters", "annotations", "none"];

    /// Returns the configuration spelling of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parameters => "parameters",
            Self::Annotations => "annotations",
            Self::None => "none",
        }
    }
}

impl fmt::Display for MetadataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "parameters" => Ok(Self::Parameters),
            "annotations" => Ok(Self::Annotations),
            "none" => Ok(Self::None),
            other => Err(ConfigError::InvalidValue(format!(
                "unknown metadata source {other:?}: expected one of {}; set \
                 VOLNAME_METADATA_SOURCE or add metadata_source to volname.toml",
                Self::VARIANTS.join(", ")
            ))),
        }
    }
}

/// Resolver settings derived from configuration files and environment
/// variables.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "VOLNAME",
    discovery(
        app_name = "volname",
        env_var = "VOLNAME_CONFIG_PATH",
        config_file_name = "volname.toml",
        dotfile_name = ".volname.toml",
        project_file_name = "volname.toml"
    )
)]
pub struct VolnameConfig {
    /// CSI driver name; the volume name annotation is `<driver_name>/volumeName`.
    #[ortho_config(default = DEFAULT_DRIVER_NAME.to_owned())]
    pub driver_name: String,
    /// How claim metadata is obtained: `parameters`, `annotations`, or `none`.
    #[ortho_config(default = "parameters".to_owned())]
    pub metadata_source: String,
    /// Path to the `kubectl` executable used by the annotation strategy.
    #[ortho_config(default = DEFAULT_KUBECTL_BIN.to_owned())]
    pub kubectl_bin: String,
    /// Optional kubeconfig path handed to kubectl.
    pub kubeconfig: Option<String>,
    /// Timeout for each cluster API lookup, in seconds.
    #[ortho_config(default = 10)]
    pub lookup_timeout_secs: u64,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }
}

impl VolnameConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to volname.toml",
                metadata.description, metadata.env_var, metadata.toml_key
            )));
        }
        Ok(())
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("volname")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Parses the configured metadata strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unknown strategies.
    pub fn mode(&self) -> Result<MetadataMode, ConfigError> {
        self.metadata_source.parse()
    }

    /// Performs semantic validation. Error messages include guidance on how
    /// to provide values via environment variables or configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required field is empty, the strategy
    /// is unknown, or the lookup timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mode = self.mode()?;
        Self::require_field(
            &self.driver_name,
            &FieldMetadata::new("CSI driver name", "VOLNAME_DRIVER_NAME", "driver_name"),
        )?;
        if mode == MetadataMode::Annotations {
            Self::require_field(
                &self.kubectl_bin,
                &FieldMetadata::new("kubectl binary", "VOLNAME_KUBECTL_BIN", "kubectl_bin"),
            )?;
            if let Some(path) = self.kubeconfig.as_deref() {
                Self::require_field(
                    path,
                    &FieldMetadata::new("kubeconfig path", "VOLNAME_KUBECONFIG", "kubeconfig"),
                )?;
            }
            if self.lookup_timeout_secs == 0 {
                return Err(ConfigError::InvalidValue(String::from(
                    "lookup timeout must be at least one second: set \
                     VOLNAME_LOOKUP_TIMEOUT_SECS or add lookup_timeout_secs to volname.toml",
                )));
            }
        }
        Ok(())
    }

    /// Returns the kubectl settings for the annotation strategy.
    #[must_use]
    pub fn kubectl(&self) -> KubectlConfig {
        KubectlConfig {
            kubectl_bin: self.kubectl_bin.trim().to_owned(),
            kubeconfig: self.kubeconfig.as_ref().map(|path| path.trim().to_owned()),
            timeout: Duration::from_secs(self.lookup_timeout_secs),
        }
    }

    /// Validates the configuration and builds the metadata source it selects.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn build_source(&self) -> Result<SharedMetadataSource, ConfigError> {
        self.validate()?;
        let mode = self.mode()?;
        debug!(%mode, driver = %self.driver_name, "selected metadata source");
        let source: SharedMetadataSource = match mode {
            MetadataMode::Parameters => Box::new(ParameterSource),
            MetadataMode::Annotations => Box::new(AnnotationSource::new(
                KubectlLookup::with_process_runner(self.kubectl()),
                &self.driver_name,
            )),
            MetadataMode::None => Box::new(NoMetadata),
        };
        Ok(source)
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a configuration field holds an unusable value.
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
