//! Claim lookups backed by the `kubectl` CLI.
//!
//! The lookup shells out to `kubectl get ... -o json` and reads the claim
//! reference of a persistent volume and the annotations of a persistent
//! volume claim. Every failure is logged and reported as "not found" so
//! naming never blocks provisioning.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::command::{CommandRunner, ProcessCommandRunner};
use crate::lookup::{ClaimLookup, ClaimRef};

/// Default kubectl binary name.
pub const DEFAULT_KUBECTL_BIN: &str = "kubectl";

/// Default per-request timeout handed to kubectl.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a kubectl-backed lookup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KubectlConfig {
    /// Path to the `kubectl` binary.
    pub kubectl_bin: String,
    /// Optional kubeconfig file; kubectl defaults apply when absent.
    pub kubeconfig: Option<String>,
    /// Request timeout applied to each API call.
    pub timeout: Duration,
}

impl Default for KubectlConfig {
    fn default() -> Self {
        Self {
            kubectl_bin: DEFAULT_KUBECTL_BIN.to_owned(),
            kubeconfig: None,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PersistentVolume {
    #[serde(default)]
    spec: PersistentVolumeSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistentVolumeSpec {
    claim_ref: Option<ObjectReference>,
}

#[derive(Debug, Deserialize)]
struct ObjectReference {
    #[serde(default)]
    namespace: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct PersistentVolumeClaim {
    #[serde(default)]
    metadata: ObjectMeta,
}

#[derive(Debug, Default, Deserialize)]
struct ObjectMeta {
    annotations: Option<BTreeMap<String, String>>,
}

/// [`ClaimLookup`] implementation that queries the cluster through kubectl.
#[derive(Clone, Debug)]
pub struct KubectlLookup<R: CommandRunner> {
    config: KubectlConfig,
    runner: R,
}

impl KubectlLookup<ProcessCommandRunner> {
    /// Creates a lookup wired to the real process runner.
    #[must_use]
    pub const fn with_process_runner(config: KubectlConfig) -> Self {
        Self::new(config, ProcessCommandRunner)
    }
}

impl<R: CommandRunner> KubectlLookup<R> {
    /// Creates a lookup using the provided configuration and runner.
    #[must_use]
    pub const fn new(config: KubectlConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Builds the argument vector for a `kubectl get` call.
    ///
    /// Options come first and `--` precedes the object name, so names and
    /// namespaces starting with `-` are never read as flags.
    fn build_get_args(&self, resource: &str, name: &str, namespace: Option<&str>) -> Vec<OsString> {
        let mut args = vec![OsString::from("get"), OsString::from(resource)];
        if let Some(ns) = namespace {
            args.push(OsString::from(format!("--namespace={ns}")));
        }
        args.push(OsString::from("--output"));
        args.push(OsString::from("json"));
        args.push(OsString::from(format!(
            "--request-timeout={}s",
            self.config.timeout.as_secs()
        )));
        if let Some(kubeconfig) = &self.config.kubeconfig {
            args.push(OsString::from("--kubeconfig"));
            args.push(OsString::from(kubeconfig));
        }
        args.push(OsString::from("--"));
        args.push(OsString::from(name));
        args
    }

    /// Runs `kubectl get` and parses the JSON object it prints.
    fn get_object<T: DeserializeOwned>(
        &self,
        resource: &str,
        name: &str,
        namespace: Option<&str>,
    ) -> Option<T> {
        let args = self.build_get_args(resource, name, namespace);
        let output = match self.runner.run(&self.config.kubectl_bin, &args) {
            Ok(output) => output,
            Err(err) => {
                warn!(%resource, %name, error = %err, "kubectl lookup could not run");
                return None;
            }
        };

        if !output.is_success() {
            debug!(
                %resource,
                %name,
                code = ?output.code,
                stderr = %output.stderr.trim(),
                "kubectl lookup failed"
            );
            return None;
        }

        match serde_json::from_str::<T>(&output.stdout) {
            Ok(object) => Some(object),
            Err(err) => {
                warn!(%resource, %name, error = %err, "kubectl returned malformed JSON");
                None
            }
        }
    }
}

impl<R: CommandRunner> ClaimLookup for KubectlLookup<R> {
    fn claim_binding(&self, volume_name: &str) -> Option<ClaimRef> {
        let volume: PersistentVolume = self.get_object("persistentvolume", volume_name, None)?;
        let claim = volume.spec.claim_ref?;
        Some(ClaimRef::new(claim.namespace, claim.name))
    }

    fn claim_annotation(&self, claim: &ClaimRef, annotation_key: &str) -> Option<String> {
        let pvc: PersistentVolumeClaim =
            self.get_object("persistentvolumeclaim", &claim.name, Some(&claim.namespace))?;
        pvc.metadata.annotations?.remove(annotation_key)
    }
}
