use crate::common::*;
use crate::helpers::*;
use crate::{assert_exists, assert_not_exists, assert_stderr_line};

#[test]
fn clean_step_prime_rolls_back_to_stage() {
    let env = primed_env(PROJECT_INDEPENDENT);

    let result = env.run(&["clean", "clean1", "clean2", "clean3", "--step", "prime"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.trim().is_empty(), "{}", result.stderr);
    for part in ["clean1", "clean2", "clean3"] {
        assert_eq!(env.completed_step(part).as_deref(), Some("stage"));
    }
    assert_not_exists!(env, "prime");
    assert_exists!(env, "stage");
}

#[test]
fn clean_step_without_part_names_removes_everything() {
    let env = primed_env(PROJECT_INDEPENDENT);

    let result = env.run_ok(&["clean", "--step", "prime", "--json"]);

    assert!(result.json()["step"].is_null());
    assert_not_exists!(env, "parts");
    assert_not_exists!(env, "stage");
    assert_not_exists!(env, "prime");
}

#[test]
fn clean_step_build_keeps_sources() {
    let env = TestEnv::builder()
        .with_project("name: one\nparts:\n  main:\n    plugin: dump\n    source: files\n")
        .with_file("files/bin/tool", "#!/bin/sh\n")
        .build();
    env.run_ok(&["prime"]);
    assert_exists!(env, "prime/bin/tool");

    env.run_ok(&["clean", "main", "--step", "build"]);

    assert_eq!(env.completed_step("main").as_deref(), Some("pull"));
    assert_exists!(env, "parts/main/src/bin/tool");
    assert_not_exists!(env, "parts/main/install/bin/tool");
    assert_not_exists!(env, "stage");
    assert_not_exists!(env, "prime");
}

#[test]
fn clean_deprecated_strip_behaves_like_prime() {
    let env = primed_env(PROJECT_INDEPENDENT);

    let result = env.run(&["clean", "clean1", "clean2", "clean3", "--step", "strip"]);

    assert!(result.success, "{}", result.combined_output());
    assert_stderr_line!(
        result,
        "DEPRECATED: Use 'prime' instead of 'strip' as the step to clean"
    );
    assert_eq!(env.completed_step("clean1").as_deref(), Some("stage"));
    assert_not_exists!(env, "prime");
}

#[test]
fn clean_deprecated_strip_is_reported_in_json() {
    let env = primed_env(PROJECT_INDEPENDENT);

    let result = env.run_ok(&["clean", "clean1", "clean2", "clean3", "--step", "strip", "--json"]);

    let json = result.json();
    assert_eq!(json["step"], "prime");
    assert_eq!(
        json["warnings"][0],
        "DEPRECATED: Use 'prime' instead of 'strip' as the step to clean"
    );
}

#[test]
fn clean_step_with_unknown_name_fails() {
    let env = primed_env(PROJECT_INDEPENDENT);

    let result = env.run(&["clean", "--step", "package"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("invalid step 'package'"), "{}", result.stderr);
    assert_exists!(env, "prime");
}

#[test]
fn clean_step_stage_on_dependency_checks_dependents() {
    let env = primed_env(PROJECT_CHAIN);

    let result = env.run(&["clean", "dependent", "--step", "stage"]);

    assert_eq!(result.exit_code, 1);
    assert_stderr_line!(result, dependents_message("dependent", "nested-dependent"));
}
