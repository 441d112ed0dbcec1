//! Caller inputs and their validation.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, WeightClass};
use crate::error::ValidationError;
use crate::grams::Micrograms;

/// The three inputs of a pattern search exactly as a form would hand them over.
///
/// Counts and weights are kept as raw numbers so that fractional or non-positive entries
/// are reported with their own messages instead of failing to parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotRequest {
    /// Catalog ids of the enabled weight classes.
    pub selection: Vec<String>,
    pub desired_count: f64,
    pub desired_weight_grams: f64,
}

impl ShotRequest {
    pub fn new<I, S>(selection: I, desired_count: f64, desired_weight_grams: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { selection: selection.into_iter().map(Into::into).collect(), desired_count, desired_weight_grams }
    }

    /// Resolves the selection against the catalog and checks count and weight.
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let classes = resolve_selection(&self.selection)?;
        ValidatedRequest::from_classes(&classes, self.desired_count, self.desired_weight_grams)
    }
}

/// Looks up each id in the catalog, dropping repeats and keeping first-seen order.
pub fn resolve_selection<S: AsRef<str>>(selection: &[S]) -> Result<Vec<WeightClass>, ValidationError> {
    if selection.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    let mut classes: Vec<WeightClass> = Vec::with_capacity(selection.len());
    for id in selection {
        let id = id.as_ref();
        let class = catalog::lookup(id).ok_or_else(|| ValidationError::UnknownWeightClass(id.to_string()))?;
        if !classes.iter().any(|c| c.id == class.id) {
            classes.push(*class);
        }
    }
    Ok(classes)
}

/// Largest number of shots in one pattern.
pub const MAX_DESIRED_COUNT: usize = 1_000;

/// A request that passed validation: classes sorted by ascending mass with duplicates
/// removed, an integral count and a target in millionths of a gram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRequest {
    classes: Vec<WeightClass>,
    desired_count: usize,
    target: Micrograms,
}

impl ValidatedRequest {
    /// Checks run in a fixed order: selection, count sign, count integrality, weight.
    pub fn from_classes(
        classes: &[WeightClass],
        desired_count: f64,
        desired_weight_grams: f64,
    ) -> Result<Self, ValidationError> {
        if classes.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        let desired_count = validate_count(desired_count)?;
        let target = validate_target(desired_weight_grams)?;

        let mut unique: Vec<WeightClass> = Vec::with_capacity(classes.len());
        for class in classes {
            if !unique.iter().any(|c| c.id == class.id) {
                unique.push(*class);
            }
        }
        unique.sort_by_key(|c| c.mass);
        Ok(Self { classes: unique, desired_count, target })
    }

    /// Active classes, lightest first.
    pub fn classes(&self) -> &[WeightClass] {
        &self.classes
    }

    pub fn desired_count(&self) -> usize {
        self.desired_count
    }

    pub fn target(&self) -> Micrograms {
        self.target
    }
}

pub fn validate_count(desired_count: f64) -> Result<usize, ValidationError> {
    if desired_count <= 0.0 {
        return Err(ValidationError::NonPositiveCount);
    }
    if !desired_count.is_finite() || desired_count.fract() != 0.0 {
        return Err(ValidationError::NonIntegerCount);
    }
    if desired_count > MAX_DESIRED_COUNT as f64 {
        return Err(ValidationError::CountOutOfRange);
    }
    Ok(desired_count as usize)
}

/// The target is kept to the nearest millionth of a gram; a target that rounds to zero is
/// treated as non-positive.
pub fn validate_target(desired_weight_grams: f64) -> Result<Micrograms, ValidationError> {
    if desired_weight_grams <= 0.0 {
        return Err(ValidationError::NonPositiveTargetWeight);
    }
    let target = Micrograms::from_grams(desired_weight_grams).ok_or(ValidationError::TargetWeightOutOfRange)?;
    if !target.is_positive() {
        return Err(ValidationError::NonPositiveTargetWeight);
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_and_sorts_selection() {
        let request = ShotRequest::new(["SSG", "BB", "AAA", "BB"], 3.0, 2.5).validate().unwrap();
        let ids: Vec<_> = request.classes().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["BB", "AAA", "SSG"]);
        assert_eq!(request.desired_count(), 3);
        assert_eq!(request.target(), Micrograms::new(2_500_000));
    }

    #[test]
    fn checks_run_in_order() {
        let empty: [&str; 0] = [];
        assert_eq!(ShotRequest::new(empty, 0.0, -1.0).validate(), Err(ValidationError::EmptySelection));
        assert_eq!(ShotRequest::new(["BB"], 0.0, -1.0).validate(), Err(ValidationError::NonPositiveCount));
        assert_eq!(ShotRequest::new(["BB"], -2.5, 1.0).validate(), Err(ValidationError::NonPositiveCount));
        assert_eq!(ShotRequest::new(["BB"], 2.5, -1.0).validate(), Err(ValidationError::NonIntegerCount));
        assert_eq!(ShotRequest::new(["BB"], 2.0, 0.0).validate(), Err(ValidationError::NonPositiveTargetWeight));
    }

    #[test]
    fn resolve_drops_repeats() {
        let classes = resolve_selection(&["AAA", "BB", "AAA"]).unwrap();
        let ids: Vec<_> = classes.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["AAA", "BB"]);
        assert_eq!(resolve_selection::<&str>(&[]), Err(ValidationError::EmptySelection));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(
            ShotRequest::new(["BB", "XXL"], 2.0, 1.0).validate(),
            Err(ValidationError::UnknownWeightClass("XXL".to_string()))
        );
    }

    #[test]
    fn odd_counts() {
        assert_eq!(validate_count(f64::NAN), Err(ValidationError::NonIntegerCount));
        assert_eq!(validate_count(f64::INFINITY), Err(ValidationError::NonIntegerCount));
        assert_eq!(validate_count(f64::NEG_INFINITY), Err(ValidationError::NonPositiveCount));
        assert_eq!(validate_count(1e12), Err(ValidationError::CountOutOfRange));
        assert_eq!(validate_count(4e9), Err(ValidationError::CountOutOfRange));
        assert_eq!(validate_count(1_001.0), Err(ValidationError::CountOutOfRange));
        assert_eq!(validate_count(1_000.0), Ok(MAX_DESIRED_COUNT));
        assert_eq!(validate_count(9.0), Ok(9));
    }

    #[test]
    fn odd_targets() {
        assert_eq!(validate_target(f64::NAN), Err(ValidationError::TargetWeightOutOfRange));
        assert_eq!(validate_target(f64::INFINITY), Err(ValidationError::TargetWeightOutOfRange));
        assert_eq!(validate_target(1e10), Err(ValidationError::TargetWeightOutOfRange));
        assert_eq!(validate_target(0.0000004), Err(ValidationError::NonPositiveTargetWeight));
        assert_eq!(validate_target(0.004), Ok(Micrograms::new(4_000)));
        assert_eq!(validate_target(0.335), Ok(Micrograms::new(335_000)));
        assert_eq!(validate_target(1.5), Ok(Micrograms::new(1_500_000)));
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(ValidationError::EmptySelection.to_string(), "No available shot.");
        assert_eq!(ValidationError::NonPositiveCount.to_string(), "Shot count must be greater than zero.");
        assert_eq!(ValidationError::NonIntegerCount.to_string(), "Shot count must be an integer.");
        assert_eq!(ValidationError::NonPositiveTargetWeight.to_string(), "Total shot weight must be greater than zero.");
    }
}
