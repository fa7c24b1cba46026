use crate::common::*;
use crate::helpers::*;
use crate::{assert_exists, assert_not_exists, assert_stderr_line};

#[test]
fn clean_dependent_with_built_nested_dependent_fails() {
    let env = primed_env(PROJECT_CHAIN);

    let result = env.run(&["clean", "dependent"]);

    assert_eq!(result.exit_code, 1);
    assert_stderr_line!(result, dependents_message("dependent", "nested-dependent"));
    assert_exists!(env, "parts/dependent/state/state.toml");
    assert_exists!(env, "parts/nested-dependent/state/state.toml");
}

#[test]
fn clean_dependent_together_with_its_dependent_succeeds() {
    let env = primed_env(PROJECT_CHAIN);

    env.run_ok(&["clean", "dependent", "nested-dependent"]);

    assert_not_exists!(env, "parts/dependent");
    assert_not_exists!(env, "parts/nested-dependent");
    assert_exists!(env, "parts/main");
    assert_exists!(env, "stage");
}

#[test]
fn clean_leaves_first_then_their_dependencies() {
    let env = primed_env(PROJECT_CHAIN);

    env.run_ok(&["clean", "nested-dependent"]);
    env.run_ok(&["clean", "dependent"]);
    assert_exists!(env, "parts/main");

    env.run_ok(&["clean", "main"]);
    assert_not_exists!(env, "parts");
    assert_not_exists!(env, "prime");
}

#[test]
fn clean_main_alone_names_direct_dependent() {
    let env = primed_env(PROJECT_CHAIN);

    let result = env.run(&["clean", "main"]);

    assert_eq!(result.exit_code, 1);
    assert_stderr_line!(result, dependents_message("main", "dependent"));
}

#[test]
fn clean_main_and_dependent_names_nested_dependent() {
    let env = primed_env(PROJECT_CHAIN);

    let result = env.run(&["clean", "main", "dependent"]);

    assert_eq!(result.exit_code, 1);
    assert_stderr_line!(result, dependents_message("dependent", "nested-dependent"));
    assert_exists!(env, "parts/main/state/state.toml");
}

#[test]
fn clean_main_and_nested_dependent_skips_already_clean_dependent() {
    let env = primed_env(PROJECT_CHAIN);
    std::fs::remove_dir_all(env.project_path("parts/dependent")).unwrap();

    let result = env.run(&["clean", "main", "nested-dependent"]);

    assert!(result.success, "{}", result.combined_output());
    assert_not_exists!(env, "parts/main");
    assert_not_exists!(env, "parts/nested-dependent");
}

#[test]
fn clean_main_and_dependent_skips_already_clean_nested_dependent() {
    let env = primed_env(PROJECT_CHAIN);
    std::fs::remove_dir_all(env.project_path("parts/nested-dependent")).unwrap();

    let result = env.run(&["clean", "main", "dependent"]);

    assert!(result.success, "{}", result.combined_output());
    assert_not_exists!(env, "parts/main");
    assert_not_exists!(env, "parts/dependent");
}

#[test]
fn clean_dependency_of_pulled_only_dependent_fails() {
    let env = TestEnv::builder().with_project(PROJECT_CHAIN).build();
    env.run_ok(&["pull", "dependent"]);
    assert_eq!(env.completed_step("dependent").as_deref(), Some("pull"));
    assert_eq!(env.completed_step("main").as_deref(), Some("stage"));

    let result = env.run(&["clean", "main"]);

    assert_eq!(result.exit_code, 1);
    assert_stderr_line!(result, dependents_message("main", "dependent"));
}

#[test]
fn cyclic_dependencies_are_rejected() {
    let env = TestEnv::builder().with_project(PROJECT_CYCLE).build();

    let result = env.run(&["clean"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("Circular dependency chain found in parts definition"),
        "{}",
        result.stderr
    );
}
