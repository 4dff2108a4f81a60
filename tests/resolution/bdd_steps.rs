//! BDD step definitions for volume name resolution.

use rstest_bdd_macros::{given, then, when};
use volname::test_support::{json_claim, json_persistent_volume};
use volname::{NameResolver, ParameterSource};

use super::test_helpers::ResolutionContext;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("a request with fallback name \"{fallback}\"")]
fn request_with_fallback(resolution_context: &ResolutionContext, fallback: String) {
    resolution_context.update_request(|request| request.fallback_name = fallback);
}

#[given("claim parameters namespace \"{namespace}\" and claim name \"{claim}\"")]
fn claim_parameters(resolution_context: &ResolutionContext, namespace: String, claim: String) {
    resolution_context.update_request(|request| {
        request.claim_namespace = Some(namespace);
        request.claim_name = Some(claim);
    });
}

#[given("name decorations prefix \"{prefix}\" and suffix \"{suffix}\"")]
fn name_decorations(resolution_context: &ResolutionContext, prefix: String, suffix: String) {
    resolution_context.update_request(|request| {
        request.name_prefix = Some(prefix);
        request.name_suffix = Some(suffix);
    });
}

#[given("only the claim namespace \"{namespace}\" is present")]
fn claim_namespace_only(resolution_context: &ResolutionContext, namespace: String) {
    resolution_context.update_request(|request| request.claim_namespace = Some(namespace));
}

#[given("kubectl binds the volume to claim \"{claim}\" in namespace \"{namespace}\"")]
fn kubectl_binds_volume(resolution_context: &ResolutionContext, claim: String, namespace: String) {
    let volume = resolution_context.request.borrow().fallback_name.clone();
    resolution_context.runner.push_output(
        Some(0),
        json_persistent_volume(&volume, Some((namespace.as_str(), claim.as_str()))),
        "",
    );
}

#[given("kubectl reports annotation \"{key}\" as \"{value}\"")]
fn kubectl_reports_annotation(resolution_context: &ResolutionContext, key: String, value: String) {
    resolution_context.runner.push_output(
        Some(0),
        json_claim("team-a", "data-01", &[(key.as_str(), value.as_str())]),
        "",
    );
}

#[given("kubectl cannot find the volume")]
fn kubectl_cannot_find_volume(resolution_context: &ResolutionContext) {
    let volume = resolution_context.request.borrow().fallback_name.clone();
    resolution_context
        .runner
        .push_not_found("persistentvolumes", &volume);
}

#[when("the name is resolved from request parameters")]
fn resolve_from_parameters(resolution_context: &ResolutionContext) {
    let request = resolution_context.request.borrow().clone();
    resolution_context.record(NameResolver::new(ParameterSource).resolve(&request));
}

#[when("the name is resolved from claim annotations")]
fn resolve_from_annotations(resolution_context: &ResolutionContext) {
    let request = resolution_context.request.borrow().clone();
    let resolver = NameResolver::new(resolution_context.annotation_source());
    resolution_context.record(resolver.resolve(&request));
}

#[then("the resolved name is \"{expected}\"")]
fn resolved_name_is(
    resolution_context: &ResolutionContext,
    expected: String,
) -> Result<(), StepError> {
    match resolution_context.outcome.borrow().as_ref() {
        Some(Ok(name)) if *name == expected => Ok(()),
        Some(Ok(name)) => Err(StepError::Assertion(format!(
            "expected {expected:?}, got {name:?}"
        ))),
        Some(Err(err)) => Err(StepError::Assertion(format!(
            "expected {expected:?}, resolution failed: {err}"
        ))),
        None => Err(StepError::Assertion(String::from("missing outcome"))),
    }
}

#[then("kubectl was queried {count} times")]
fn kubectl_query_count(
    resolution_context: &ResolutionContext,
    count: usize,
) -> Result<(), StepError> {
    let invocations = resolution_context.runner.invocations();
    if invocations.len() == count {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {count} kubectl calls, got {invocations:?}"
        )))
    }
}
