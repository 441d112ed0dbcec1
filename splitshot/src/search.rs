//! Validate, size, gate and run a pattern search.

use log::{debug, info, warn};
use thiserror::Error;

use crate::error::ValidationError;
use crate::estimator::estimate_combination_count;
use crate::pattern::{rank_patterns, PatternResult};
use crate::request::{ShotRequest, ValidatedRequest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    max_combinations: Option<u128>,
}

impl SearchLimits {
    /// Covers every request the full catalog allows at nine shots (4 686 825 combinations).
    pub const DEFAULT_MAX_COMBINATIONS: u128 = 5_000_000;

    /// A limit of zero disables the gate.
    pub fn with_max(max_combinations: u128) -> Self {
        let normalized = if max_combinations == 0 { None } else { Some(max_combinations) };
        Self { max_combinations: normalized }
    }

    pub fn unbounded() -> Self {
        Self { max_combinations: None }
    }

    pub fn max_combinations(&self) -> Option<u128> {
        self.max_combinations
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::with_max(Self::DEFAULT_MAX_COMBINATIONS)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Too many combinations to calculate: {estimated} exceeds the limit of {limit}.")]
    TooManyCombinations { estimated: u128, limit: u128 },
}

/// A validated request that fits within the limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPlan {
    pub request: ValidatedRequest,
    pub estimated_combinations: u128,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub estimated_combinations: u128,
    pub patterns: Vec<PatternResult>,
}

pub fn plan(request: &ShotRequest, limits: &SearchLimits) -> Result<SearchPlan, SearchError> {
    let validated = request.validate()?;
    let estimated = estimate_combination_count(validated.classes().len(), validated.desired_count())?;
    debug!(
        "planned search: {} classes, {} shots, target {}g, {estimated} combinations",
        validated.classes().len(),
        validated.desired_count(),
        validated.target()
    );

    if let Some(limit) = limits.max_combinations() {
        if estimated > limit {
            warn!("rejecting search of {estimated} combinations (limit {limit})");
            return Err(SearchError::TooManyCombinations { estimated, limit });
        }
    }
    Ok(SearchPlan { request: validated, estimated_combinations: estimated })
}

pub fn run(plan: &SearchPlan) -> SearchOutcome {
    let patterns = rank_patterns(&plan.request);
    info!("calculated {} combinations, kept {}", plan.estimated_combinations, patterns.len());
    SearchOutcome { estimated_combinations: plan.estimated_combinations, patterns }
}

/// [`plan`] followed by [`run`]. A failure yields no patterns at all.
pub fn search(request: &ShotRequest, limits: &SearchLimits) -> Result<SearchOutcome, SearchError> {
    plan(request, limits).map(|p| run(&p))
}
