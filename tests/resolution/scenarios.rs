//! BDD scenarios for volume name resolution.

use rstest_bdd_macros::scenario;

use super::test_helpers::{ResolutionContext, resolution_context};

#[scenario(
    path = "tests/features/resolution.feature",
    name = "Claim parameters name the volume"
)]
fn scenario_claim_parameters(resolution_context: ResolutionContext) {
    let _ = resolution_context;
}

#[scenario(
    path = "tests/features/resolution.feature",
    name = "Missing claim metadata keeps the fallback name"
)]
fn scenario_missing_metadata(resolution_context: ResolutionContext) {
    let _ = resolution_context;
}

#[scenario(
    path = "tests/features/resolution.feature",
    name = "Partial claim metadata keeps the fallback name"
)]
fn scenario_partial_metadata(resolution_context: ResolutionContext) {
    let _ = resolution_context;
}

#[scenario(
    path = "tests/features/resolution.feature",
    name = "An annotated claim names the volume"
)]
fn scenario_annotated_claim(resolution_context: ResolutionContext) {
    let _ = resolution_context;
}

#[scenario(
    path = "tests/features/resolution.feature",
    name = "An unbound volume keeps the fallback name"
)]
fn scenario_unbound_volume(resolution_context: ResolutionContext) {
    let _ = resolution_context;
}

#[scenario(
    path = "tests/features/resolution.feature",
    name = "A claim without the annotation keeps the fallback name"
)]
fn scenario_missing_annotation(resolution_context: ResolutionContext) {
    let _ = resolution_context;
}
