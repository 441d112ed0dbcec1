use std::cmp::Reverse;
use std::collections::HashSet;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use splitshot::catalog::{catalog, lookup, WeightClass};
use splitshot::grams::Micrograms;
use splitshot::{Centigrams, PatternResult, RESULT_LIMIT};

/// Straightforward exhaustive ranking used as the oracle: collect everything, stable sort,
/// truncate.
pub fn reference_rank(selection: &[WeightClass], desired_count: usize, target: Micrograms) -> Vec<PatternResult> {
    let mut classes = selection.iter().copied().unique_by(|c| c.id).collect_vec();
    classes.sort_by_key(|c| c.mass);

    let mut all = classes
        .iter()
        .combinations_with_replacement(desired_count)
        .map(|combo| {
            let total: Centigrams = combo.iter().map(|c| c.mass).sum();
            let distinct: HashSet<&str> = combo.iter().map(|c| c.id).collect();
            PatternResult {
                shot_pattern: combo.iter().map(|c| c.name.to_string()).collect(),
                total_weight_grams: total,
                offset_weight_grams: reference_offset(total, target),
                variation: distinct.len(),
            }
        })
        .collect_vec();
    all.sort_by_key(|p| (p.offset_weight_grams.abs(), Reverse(p.variation)));
    all.truncate(RESULT_LIMIT);
    all
}

/// `total - target` in hundredths of a gram, halves rounded away from zero.
pub fn reference_offset(total: Centigrams, target: Micrograms) -> Centigrams {
    let diff = i128::from(total.centigrams()) * 10_000 - i128::from(target.micrograms());
    let magnitude = (diff.abs() + 5_000) / 10_000;
    Centigrams::new((diff.signum() * magnitude) as i64)
}

pub fn classes(ids: &[&str]) -> Vec<WeightClass> {
    ids.iter().map(|id| *lookup(id).unwrap_or_else(|| panic!("unknown id {id}"))).collect()
}

pub fn mass_of_name(name: &str) -> Centigrams {
    catalog().iter().find(|c| c.name == name).map(|c| c.mass).unwrap_or_else(|| panic!("unknown name {name}"))
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Between one and `max_classes` distinct catalog classes in random order.
pub fn random_selection(rng: &mut StdRng, max_classes: usize) -> Vec<WeightClass> {
    let size = rng.gen_range(1..=max_classes.min(catalog().len()));
    catalog().choose_multiple(rng, size).copied().collect()
}

/// A target between 0.001 g and 10 g, on the hundredth grid about half of the time.
pub fn random_target(rng: &mut StdRng) -> Micrograms {
    if rng.gen_bool(0.5) {
        Micrograms::from(Centigrams::new(rng.gen_range(1..=1000)))
    } else {
        Micrograms::new(rng.gen_range(1..=10_000) * 1_000)
    }
}
