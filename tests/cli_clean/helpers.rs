use crate::common::*;

/// An environment whose parts have all been primed.
pub fn primed_env(project: &str) -> TestEnv {
    let env = TestEnv::builder().with_project(project).build();
    env.run_ok(&["prime"]);
    env
}

pub fn dependents_message(part: &str, dependent: &str) -> String {
    format!(
        "Requested clean of '{}' but '{}' depends upon it. \
         Please add each to the clean command if that's what you intended.",
        part, dependent
    )
}
