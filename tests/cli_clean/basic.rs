use crate::common::*;
use crate::helpers::*;
use crate::{assert_exists, assert_not_exists, assert_stderr_line};

#[test]
fn clean_help_shows_options() {
    let env = TestEnv::builder().build();
    let result = env.run(&["clean", "--help"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("--step"), "Should have --step option");
    assert!(result.stdout.contains("[PART]"), "Should take part names");
}

#[test]
fn clean_all_removes_every_tree() {
    let env = primed_env(PROJECT_INDEPENDENT);
    assert_exists!(env, "parts/clean1/state/state.toml");
    assert_exists!(env, "stage");
    assert_exists!(env, "prime");

    let result = env.run(&["clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert_not_exists!(env, "parts");
    assert_not_exists!(env, "stage");
    assert_not_exists!(env, "prime");
    assert_exists!(env, "partwright/project.yaml");
}

#[test]
fn clean_naming_every_part_equals_clean_all() {
    let env = primed_env(PROJECT_INDEPENDENT);

    env.run_ok(&["clean", "clean1", "clean2", "clean3"]);

    assert_not_exists!(env, "parts");
    assert_not_exists!(env, "stage");
    assert_not_exists!(env, "prime");
}

#[test]
fn clean_subset_keeps_shared_trees_until_the_rest_is_cleaned() {
    let env = primed_env(PROJECT_INDEPENDENT);

    env.run_ok(&["clean", "clean1", "clean2"]);
    assert_not_exists!(env, "parts/clean1");
    assert_not_exists!(env, "parts/clean2");
    assert_exists!(env, "parts/clean3");
    assert_exists!(env, "stage");
    assert_exists!(env, "prime");

    env.run_ok(&["clean", "clean3"]);
    assert_not_exists!(env, "parts");
    assert_not_exists!(env, "stage");
    assert_not_exists!(env, "prime");
}

#[test]
fn clean_undefined_part_fails_without_touching_anything() {
    let env = primed_env(PROJECT_INDEPENDENT);

    let result = env.run(&["clean", "no-clean"]);

    assert_eq!(result.exit_code, 1);
    assert_stderr_line!(
        result,
        "The part named 'no-clean' is not defined in 'partwright/project.yaml'"
    );
    assert_exists!(env, "parts/clean1/state/state.toml");
    assert_exists!(env, "stage");
    assert_exists!(env, "prime");
}

#[test]
fn clean_undefined_part_on_fresh_project_creates_nothing() {
    let env = TestEnv::builder().with_project(PROJECT_INDEPENDENT).build();

    let result = env.run(&["clean", "no-clean"]);

    assert_eq!(result.exit_code, 1);
    assert_not_exists!(env, "partwright/.state.lock");
    assert_not_exists!(env, "parts");
}

#[test]
fn clean_all_discards_state_with_another_version() {
    let env = primed_env(PROJECT_INDEPENDENT);
    env.write_project_file("parts/clean1/state/state.toml", "version = 0\n");

    let result = env.run(&["clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert_not_exists!(env, "parts");
    assert_not_exists!(env, "stage");
    assert_not_exists!(env, "prime");
}

#[test]
fn clean_all_discards_corrupted_state() {
    let env = primed_env(PROJECT_INDEPENDENT);
    env.write_project_file("parts/clean2/state/state.toml", "not toml [");

    env.run_ok(&["clean"]);

    assert_not_exists!(env, "parts");
}

#[test]
fn clean_twice_is_a_no_op() {
    let env = primed_env(PROJECT_INDEPENDENT);

    env.run_ok(&["clean"]);
    let second = env.run_ok(&["clean"]);

    assert_eq!(second.stdout.trim(), "Nothing to clean");
    assert_not_exists!(env, "parts");
}

#[test]
fn clean_keeps_local_plugins() {
    let env = TestEnv::builder()
        .with_project(PROJECT_INDEPENDENT)
        .with_file("partwright/plugins/x-local.py", "# local plugin\n")
        .build();
    env.run_ok(&["prime"]);

    env.run_ok(&["clean"]);

    assert_exists!(env, "partwright/plugins/x-local.py");
    assert_not_exists!(env, "parts");
}

#[test]
fn clean_without_project_definition_fails() {
    let env = TestEnv::builder().build();

    let result = env.run(&["clean"]);

    assert_eq!(result.exit_code, 1);
    assert_stderr_line!(
        result,
        "Could not find partwright/project.yaml. Are you sure you are in the right directory?"
    );
}

#[test]
fn clean_json_reports_removed_trees() {
    let env = primed_env(PROJECT_INDEPENDENT);

    let result = env.run_ok(&["clean", "--json"]);
    let json = result.json();

    assert_eq!(json["type"], "clean_complete");
    assert_eq!(json["cleaned"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["removed"], serde_json::json!(["prime", "stage", "parts"]));
}

#[test]
fn clean_from_subdirectory_finds_project() {
    let env = primed_env(PROJECT_INDEPENDENT);
    let sub = env.project_path("docs/notes");
    std::fs::create_dir_all(&sub).unwrap();

    let result = env.run_from(&sub, &["clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert_not_exists!(env, "parts");
}

#[test]
fn clean_honours_project_dir_flag() {
    let env = primed_env(PROJECT_INDEPENDENT);
    let elsewhere = tempfile::tempdir().unwrap();
    let root = env.project_root.path().to_str().unwrap().to_string();

    let result = env.run_from(elsewhere.path(), &["--project-dir", &root, "clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert_not_exists!(env, "prime");
}

#[test]
fn clean_uses_configured_directories() {
    let env = TestEnv::builder()
        .with_project(PROJECT_INDEPENDENT)
        .with_project_config("[workspace]\nstage_dir = \"out/stage\"\nprime_dir = \"out/prime\"\n")
        .build();
    env.run_ok(&["prime"]);
    assert_exists!(env, "out/stage");
    assert_exists!(env, "out/prime");

    env.run_ok(&["clean"]);

    assert_not_exists!(env, "out/stage");
    assert_not_exists!(env, "out/prime");
    assert_not_exists!(env, "parts");
}

#[test]
fn unknown_config_key_is_a_warning() {
    let env = TestEnv::builder()
        .with_project(PROJECT_INDEPENDENT)
        .with_project_config("[workspace]\nstage_dri = \"s\"\n")
        .build();

    let result = env.run(&["clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stderr.contains("Unknown config key 'stage_dri'"),
        "{}",
        result.stderr
    );
}
