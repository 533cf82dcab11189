use std::time::Duration;

use crate::code::ValidationFailure;
use crate::error::GateError;

// ---------------------------------------------------------------------------
// StageDecision
// ---------------------------------------------------------------------------

/// The outcome of a single stage evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageDecision {
    /// The stage passed; proceed to the next stage.
    Pass,
    /// The stage failed; the request is rejected with this failure.
    Fail(ValidationFailure),
}

impl StageDecision {
    /// Returns `true` if the decision is `Pass`.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` if the decision is `Fail`.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

impl From<Option<ValidationFailure>> for StageDecision {
    fn from(failure: Option<ValidationFailure>) -> Self {
        match failure {
            Some(failure) => Self::Fail(failure),
            None => Self::Pass,
        }
    }
}

// ---------------------------------------------------------------------------
// StageResult
// ---------------------------------------------------------------------------

/// Recorded result from a completed stage evaluation.
#[derive(Clone, Debug)]
pub struct StageResult {
    /// Name of the stage that produced this result.
    pub stage_name: &'static str,
    /// Whether the stage passed.
    pub passed: bool,
    /// The failure, when the stage did not pass.
    pub failure: Option<ValidationFailure>,
    /// Wall-clock time the stage took to evaluate.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Signature of a stage check over request type `R`.
pub type CheckFn<R> = fn(&R) -> Result<StageDecision, GateError>;

/// A single named check in a pipeline.
///
/// A check receives the whole request and may consult the store through it;
/// an `Err` aborts the run without a verdict.
pub struct Stage<R> {
    name: &'static str,
    check: CheckFn<R>,
}

impl<R> Stage<R> {
    pub fn new(name: &'static str, check: CheckFn<R>) -> Self {
        Self { name, check }
    }

    /// Human-readable name of this stage (e.g. "parent_well", "row_data").
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the request and return a decision.
    pub fn evaluate(&self, request: &R) -> Result<StageDecision, GateError> {
        (self.check)(request)
    }
}

impl<R> std::fmt::Debug for Stage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::ErrorCode;

    fn always_pass(_: &u32) -> Result<StageDecision, GateError> {
        Ok(StageDecision::Pass)
    }

    #[test]
    fn decision_from_option() {
        assert!(StageDecision::from(None).is_pass());
        let failure = ValidationFailure::new(ErrorCode::MissingUnitList, &["data"]);
        let decision = StageDecision::from(Some(failure.clone()));
        assert!(decision.is_fail());
        assert_eq!(decision, StageDecision::Fail(failure));
    }

    #[test]
    fn stage_runs_its_check() {
        let stage = Stage::<u32>::new("always_pass", always_pass);
        assert_eq!(stage.name(), "always_pass");
        assert!(stage.evaluate(&7).unwrap().is_pass());
    }
}
