//! Shared fixtures and helpers for resolution BDD scenarios.

use std::cell::RefCell;

use rstest::fixture;
use volname::kubectl::{KubectlConfig, KubectlLookup};
use volname::test_support::ScriptedRunner;
use volname::{AnnotationSource, NameError, ProvisionRequest};

pub const DRIVER_NAME: &str = "volname.csi.io";

#[derive(Debug, Default)]
pub struct ResolutionContext {
    pub request: RefCell<ProvisionRequest>,
    pub runner: ScriptedRunner,
    pub outcome: RefCell<Option<Result<String, NameError>>>,
}

impl ResolutionContext {
    pub fn update_request(&self, update: impl FnOnce(&mut ProvisionRequest)) {
        update(&mut self.request.borrow_mut());
    }

    pub fn record(&self, outcome: Result<String, NameError>) {
        *self.outcome.borrow_mut() = Some(outcome);
    }

    pub fn annotation_source(&self) -> AnnotationSource<KubectlLookup<ScriptedRunner>> {
        let lookup = KubectlLookup::new(KubectlConfig::default(), self.runner.clone());
        AnnotationSource::new(lookup, DRIVER_NAME)
    }
}

#[fixture]
pub fn resolution_context() -> ResolutionContext {
    ResolutionContext::default()
}
