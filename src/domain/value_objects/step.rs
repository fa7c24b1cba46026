//! Step value object - the ordered stages a part passes through
//!
//! `Pull < Build < Stage < Prime`. `Stage` and `Prime` write into shared trees
//! and therefore carry manifests; `Pull` and `Build` only touch the part's
//! private directories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::workspace::SharedTree;

/// Legacy name that used to mean `prime`.
pub const DEPRECATED_PRIME_ALIAS: &str = "strip";

/// A build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Pull,
    Build,
    Stage,
    Prime,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Step; 4] = [Step::Pull, Step::Build, Step::Stage, Step::Prime];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Pull => "pull",
            Step::Build => "build",
            Step::Stage => "stage",
            Step::Prime => "prime",
        }
    }

    /// Present-participle form used in progress output ("Pulling main").
    pub fn progressive(&self) -> &'static str {
        match self {
            Step::Pull => "Pulling",
            Step::Build => "Building",
            Step::Stage => "Staging",
            Step::Prime => "Priming",
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::Pull => None,
            Step::Build => Some(Step::Pull),
            Step::Stage => Some(Step::Build),
            Step::Prime => Some(Step::Stage),
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Pull => Some(Step::Build),
            Step::Build => Some(Step::Stage),
            Step::Stage => Some(Step::Prime),
            Step::Prime => None,
        }
    }

    /// The shared tree this step writes into, if any.
    pub fn shared_tree(&self) -> Option<SharedTree> {
        match self {
            Step::Stage => Some(SharedTree::Stage),
            Step::Prime => Some(SharedTree::Prime),
            Step::Pull | Step::Build => None,
        }
    }

    /// Steps from `self` up to and including `last`, in execution order.
    pub fn through(self, last: Step) -> impl DoubleEndedIterator<Item = Step> {
        Step::ALL
            .into_iter()
            .filter(move |step| *step >= self && *step <= last)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid step '{0}': expected one of pull, build, stage, prime")]
pub struct StepParseError(pub String);

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pull" => Ok(Step::Pull),
            "build" => Ok(Step::Build),
            "stage" => Ok(Step::Stage),
            "prime" => Ok(Step::Prime),
            _ => Err(StepParseError(s.to_string())),
        }
    }
}

/// A step named on the command line.
///
/// Remembers whether the deprecated alias was used so the caller can emit a
/// notice; the resolved step is always the modern one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRequest {
    step: Step,
    alias: Option<&'static str>,
}

impl StepRequest {
    pub fn new(step: Step) -> Self {
        Self { step, alias: None }
    }

    /// Parse a step name, accepting the deprecated alias for `prime`.
    pub fn parse(s: &str) -> Result<Self, StepParseError> {
        if s.trim().eq_ignore_ascii_case(DEPRECATED_PRIME_ALIAS) {
            return Ok(Self {
                step: Step::Prime,
                alias: Some(DEPRECATED_PRIME_ALIAS),
            });
        }
        s.parse().map(Self::new)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn deprecated_alias(&self) -> Option<&'static str> {
        self.alias
    }

    pub fn deprecation_notice(&self) -> Option<String> {
        self.alias.map(|alias| {
            format!(
                "DEPRECATED: Use '{}' instead of '{}' as the step to clean",
                self.step, alias
            )
        })
    }
}

impl From<Step> for StepRequest {
    fn from(step: Step) -> Self {
        Self::new(step)
    }
}

impl FromStr for StepRequest {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
