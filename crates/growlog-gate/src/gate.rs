use std::time::{Duration, Instant};

use crate::code::ValidationFailure;
use crate::error::GateError;
use crate::stage::{CheckFn, Stage, StageDecision, StageResult};

// ---------------------------------------------------------------------------
// GateResult
// ---------------------------------------------------------------------------

/// The outcome of running a request through a pipeline.
#[derive(Clone, Debug)]
pub struct GateResult {
    /// The first failure, or `None` if the request was accepted.
    pub failure: Option<ValidationFailure>,
    /// Per-stage results in evaluation order.
    pub stage_results: Vec<StageResult>,
    /// Total wall-clock time for the pipeline evaluation.
    pub elapsed: Duration,
}

impl GateResult {
    /// Returns `true` if the request was accepted.
    pub fn is_accepted(&self) -> bool {
        self.failure.is_none()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// An ordered, fail-fast sequence of stages over one request type.
///
/// The first stage that fails stops evaluation, so a request is only ever
/// rejected for one reason, and always for the same reason given the same
/// input and store state.
pub struct Pipeline<R> {
    stages: Vec<Stage<R>>,
}

impl<R> Pipeline<R> {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage to the end of the pipeline.
    pub fn stage(mut self, name: &'static str, check: CheckFn<R>) -> Self {
        self.stages.push(Stage::new(name, check));
        self
    }

    /// Number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Stage names in evaluation order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Evaluate a request through every stage, stopping at the first failure.
    pub fn evaluate(&self, request: &R) -> Result<GateResult, GateError> {
        let pipeline_start = Instant::now();
        let mut stage_results = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let stage_start = Instant::now();
            let decision = stage.evaluate(request)?;
            let elapsed = stage_start.elapsed();

            tracing::debug!(stage = stage.name(), passed = decision.is_pass(), "evaluated stage");

            let failure = match decision {
                StageDecision::Pass => None,
                StageDecision::Fail(failure) => Some(failure),
            };

            stage_results.push(StageResult {
                stage_name: stage.name(),
                passed: failure.is_none(),
                failure: failure.clone(),
                elapsed,
            });

            // Fail-fast: stop on first failure.
            if let Some(failure) = failure {
                tracing::info!(stage = stage.name(), code = %failure.code, "request rejected");
                return Ok(GateResult {
                    failure: Some(failure),
                    stage_results,
                    elapsed: pipeline_start.elapsed(),
                });
            }
        }

        Ok(GateResult {
            failure: None,
            stage_results,
            elapsed: pipeline_start.elapsed(),
        })
    }
}

impl<R> Default for Pipeline<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::ErrorCode;

    fn pass(_: &i32) -> Result<StageDecision, GateError> {
        Ok(StageDecision::Pass)
    }

    fn fail_if_negative(n: &i32) -> Result<StageDecision, GateError> {
        Ok(if *n < 0 {
            StageDecision::Fail(ValidationFailure::new(ErrorCode::MaxDataExceeded, &["n"]))
        } else {
            StageDecision::Pass
        })
    }

    fn error(_: &i32) -> Result<StageDecision, GateError> {
        Err(GateError::Config("broken".into()))
    }

    fn pipeline() -> Pipeline<i32> {
        Pipeline::<i32>::new()
            .stage("first", pass)
            .stage("sign", fail_if_negative)
            .stage("last", pass)
    }

    #[test]
    fn all_stages_run_on_accept() {
        let result = pipeline().evaluate(&1).unwrap();
        assert!(result.is_accepted());
        assert_eq!(result.stage_results.len(), 3);
        assert!(result.stage_results.iter().all(|r| r.passed));
    }

    #[test]
    fn fail_fast() {
        let result = pipeline().evaluate(&-1).unwrap();
        assert!(!result.is_accepted());
        assert_eq!(result.stage_results.len(), 2);
        assert_eq!(result.stage_results[1].stage_name, "sign");
        assert_eq!(result.failure.unwrap().code, ErrorCode::MaxDataExceeded);
    }

    #[test]
    fn stage_error_propagates() {
        let pipeline = Pipeline::<i32>::new().stage("first", pass).stage("broken", error);
        assert!(pipeline.evaluate(&1).is_err());
    }

    #[test]
    fn stage_names_in_order() {
        assert_eq!(pipeline().stage_names(), vec!["first", "sign", "last"]);
        assert_eq!(pipeline().stage_count(), 3);
    }
}
