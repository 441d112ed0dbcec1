//! Enumeration and ranking of shot patterns.
//!
//! Combinations are visited as non-decreasing index sequences over the classes sorted by
//! ascending mass, so every multiset appears exactly once. Ranking orders by absolute offset,
//! then by variation (descending), then by generation order. Only the best [`RESULT_LIMIT`]
//! candidates are retained while enumerating; the outcome equals a full sort-and-truncate.

use std::cmp::Reverse;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::WeightClass;
use crate::error::ValidationError;
use crate::grams::Centigrams;
use crate::request::ValidatedRequest;

/// Maximum number of ranked patterns returned.
pub const RESULT_LIMIT: usize = 10;

/// One recommended combination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternResult {
    /// Weight class names, lightest first.
    pub shot_pattern: Vec<String>,
    pub total_weight_grams: Centigrams,
    /// `total_weight_grams - desired weight` rounded to hundredths; negative when the pattern
    /// is too light.
    pub offset_weight_grams: Centigrams,
    /// Number of distinct weight classes in the pattern.
    pub variation: usize,
}

/// Validates the inputs and ranks every combination of `desired_count` shots drawn from
/// `selection`.
pub fn generate_patterns(
    selection: &[WeightClass],
    desired_count: f64,
    desired_weight_grams: f64,
) -> Result<Vec<PatternResult>, ValidationError> {
    let request = ValidatedRequest::from_classes(selection, desired_count, desired_weight_grams)?;
    Ok(rank_patterns(&request))
}

/// Ranks all combinations of a validated request and returns the best [`RESULT_LIMIT`].
pub fn rank_patterns(request: &ValidatedRequest) -> Vec<PatternResult> {
    let classes = request.classes();
    let target = request.target();
    let mut cursor = CombinationCursor::new(classes.len(), request.desired_count());
    let mut best = TopPatterns::new(RESULT_LIMIT);
    let mut generated: u64 = 0;

    while let Some(indices) = cursor.current() {
        let total: Centigrams = indices.iter().map(|&i| classes[i].mass).sum();
        let offset = target.offset_of(total);
        let variation = indices.iter().dedup().count();
        best.offer(Candidate { key: (offset.abs(), Reverse(variation), generated), total, offset, variation }, indices);
        generated += 1;
        cursor.advance();
    }

    debug!(
        "ranked {generated} combinations of {} shots from {} classes against {target}g",
        request.desired_count(),
        classes.len()
    );

    best.into_sorted()
        .into_iter()
        .map(|(candidate, indices)| PatternResult {
            shot_pattern: indices.iter().map(|&i| classes[i].name.to_string()).collect(),
            total_weight_grams: candidate.total,
            offset_weight_grams: candidate.offset,
            variation: candidate.variation,
        })
        .collect()
}

/// Walks the non-decreasing index sequences of length `len` over `0..n` in lexicographic
/// order, which is the order a depth-first enumeration with a lower-bound cursor produces.
struct CombinationCursor {
    indices: Vec<usize>,
    n: usize,
    exhausted: bool,
}

impl CombinationCursor {
    fn new(n: usize, len: usize) -> Self {
        Self { indices: vec![0; len], n, exhausted: n == 0 || len == 0 }
    }

    fn current(&self) -> Option<&[usize]> {
        (!self.exhausted).then_some(self.indices.as_slice())
    }

    fn advance(&mut self) {
        let last = self.n - 1;
        match self.indices.iter().rposition(|&i| i < last) {
            Some(pos) => {
                let next = self.indices[pos] + 1;
                self.indices[pos..].fill(next);
            }
            None => self.exhausted = true,
        }
    }
}

type RankKey = (Centigrams, Reverse<usize>, u64);

#[derive(Clone, Copy, Debug)]
struct Candidate {
    key: RankKey,
    total: Centigrams,
    offset: Centigrams,
    variation: usize,
}

/// Bounded, sorted retention of the best candidates seen so far.
struct TopPatterns {
    limit: usize,
    entries: Vec<(Candidate, Vec<usize>)>,
}

impl TopPatterns {
    fn new(limit: usize) -> Self {
        Self { limit, entries: Vec::with_capacity(limit + 1) }
    }

    fn offer(&mut self, candidate: Candidate, indices: &[usize]) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit && self.entries.last().is_some_and(|(worst, _)| worst.key <= candidate.key) {
            return;
        }
        let pos = self.entries.partition_point(|(c, _)| c.key <= candidate.key);
        self.entries.insert(pos, (candidate, indices.to_vec()));
        self.entries.truncate(self.limit);
    }

    fn into_sorted(self) -> Vec<(Candidate, Vec<usize>)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, lookup};

    fn classes(ids: &[&str]) -> Vec<WeightClass> {
        ids.iter().map(|id| *lookup(id).unwrap()).collect()
    }

    fn cursor_sequences(n: usize, len: usize) -> Vec<Vec<usize>> {
        let mut cursor = CombinationCursor::new(n, len);
        let mut out = Vec::new();
        while let Some(indices) = cursor.current() {
            out.push(indices.to_vec());
            cursor.advance();
        }
        out
    }

    #[test]
    fn cursor_visits_each_multiset_once_in_order() {
        let seqs = cursor_sequences(3, 2);
        assert_eq!(seqs, vec![vec![0, 0], vec![0, 1], vec![0, 2], vec![1, 1], vec![1, 2], vec![2, 2]]);
        assert_eq!(cursor_sequences(3, 4).len(), 15);
        assert_eq!(cursor_sequences(1, 5), vec![vec![0; 5]]);
        assert_eq!(cursor_sequences(5, 1).len(), 5);
    }

    #[test]
    fn cursor_matches_itertools_order() {
        let expected: Vec<Vec<usize>> = (0..4).combinations_with_replacement(3).collect();
        assert_eq!(cursor_sequences(4, 3), expected);
    }

    #[test]
    fn exact_pair_ranks_first() {
        let results = generate_patterns(&classes(&["BB", "AAA"]), 2.0, 1.2).unwrap();
        assert_eq!(results.len(), 3);
        let best = &results[0];
        assert_eq!(best.shot_pattern, vec!["BB", "AAA"]);
        assert_eq!(best.total_weight_grams, Centigrams::new(120));
        assert_eq!(best.offset_weight_grams, Centigrams::ZERO);
        assert_eq!(best.variation, 2);

        // 0.8 and 1.6 are both 0.4 away; generation order breaks the tie
        assert_eq!(results[1].shot_pattern, vec!["BB", "BB"]);
        assert_eq!(results[1].offset_weight_grams, Centigrams::new(-40));
        assert_eq!(results[2].shot_pattern, vec!["AAA", "AAA"]);
        assert_eq!(results[2].offset_weight_grams, Centigrams::new(40));
    }

    #[test]
    fn variation_breaks_offset_ties() {
        let results = generate_patterns(&classes(&["BB", "4"]), 2.0, 0.6).unwrap();
        assert_eq!(results[0].shot_pattern, vec!["no4", "BB"]);
        assert_eq!(results[0].offset_weight_grams, Centigrams::ZERO);

        // BB+BB+BB and no4+BB+AB both total 1.2
        let results = generate_patterns(&classes(&["4", "BB", "AB"]), 3.0, 1.2).unwrap();
        assert_eq!(results[0].shot_pattern, vec!["no4", "BB", "AB"]);
        assert_eq!(results[0].variation, 3);
        assert_eq!(results[1].shot_pattern, vec!["BB", "BB", "BB"]);
        assert_eq!(results[1].variation, 1);
    }

    #[test]
    fn returns_at_most_ten_sorted() {
        let all = catalog::catalog().to_vec();
        let results = generate_patterns(&all, 4.0, 1.5).unwrap();
        assert_eq!(results.len(), RESULT_LIMIT);
        assert!(results.windows(2).all(|w| {
            let (a, b) = (&w[0], &w[1]);
            a.offset_weight_grams.abs() < b.offset_weight_grams.abs()
                || (a.offset_weight_grams.abs() == b.offset_weight_grams.abs() && a.variation >= b.variation)
        }));
        for r in &results {
            assert_eq!(r.shot_pattern.len(), 4);
            assert_eq!(r.offset_weight_grams, r.total_weight_grams - Centigrams::new(150));
            assert!((1..=4).contains(&r.variation));
        }
    }

    #[test]
    fn fine_targets_round_the_offset_once() {
        let results = generate_patterns(&classes(&["BB"]), 1.0, 0.335).unwrap();
        assert_eq!(results[0].total_weight_grams, Centigrams::new(40));
        assert_eq!(results[0].offset_weight_grams, Centigrams::new(7));

        let results = generate_patterns(&classes(&["BB"]), 1.0, 0.4449).unwrap();
        assert_eq!(results[0].offset_weight_grams, Centigrams::new(-4));

        // 0.6 and 0.8 are 0.104 and 0.096 away, both 0.1 once rounded; variation decides
        let results = generate_patterns(&classes(&["4", "BB"]), 3.0, 0.704).unwrap();
        assert_eq!(results[0].shot_pattern, vec!["no4", "no4", "BB"]);
        assert_eq!(results[0].offset_weight_grams, Centigrams::new(10));
        assert_eq!(results[1].shot_pattern, vec!["no4", "no4", "no4"]);
        assert_eq!(results[1].offset_weight_grams, Centigrams::new(-10));
    }

    #[test]
    fn count_larger_than_selection_repeats() {
        let results = generate_patterns(&classes(&["SSG"]), 5.0, 1.0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].shot_pattern, vec!["SSG"; 5]);
        assert_eq!(results[0].total_weight_grams, Centigrams::new(800));
        assert_eq!(results[0].offset_weight_grams, Centigrams::new(700));
        assert_eq!(results[0].variation, 1);
    }

    #[test]
    fn selection_order_does_not_matter() {
        let a = generate_patterns(&classes(&["SSG", "BB", "6", "AAA"]), 3.0, 2.1).unwrap();
        let b = generate_patterns(&classes(&["6", "AAA", "SSG", "BB"]), 3.0, 2.1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_inputs_produce_no_results() {
        assert_eq!(generate_patterns(&[], 2.0, 1.0), Err(ValidationError::EmptySelection));
        assert_eq!(generate_patterns(&classes(&["BB"]), 0.0, 1.0), Err(ValidationError::NonPositiveCount));
        assert_eq!(generate_patterns(&classes(&["BB"]), 1.5, 1.0), Err(ValidationError::NonIntegerCount));
        assert_eq!(generate_patterns(&classes(&["BB"]), 2.0, -0.2), Err(ValidationError::NonPositiveTargetWeight));
    }

    #[test]
    fn top_patterns_keeps_first_of_equal_keys() {
        let mut top = TopPatterns::new(2);
        let cand = |seq: u64, off: i64| Candidate {
            key: (Centigrams::new(off), Reverse(1), seq),
            total: Centigrams::ZERO,
            offset: Centigrams::new(off),
            variation: 1,
        };
        top.offer(cand(0, 5), &[0]);
        top.offer(cand(1, 5), &[1]);
        top.offer(cand(2, 5), &[2]);
        top.offer(cand(3, 1), &[3]);
        let kept: Vec<_> = top.into_sorted().into_iter().map(|(_, idx)| idx[0]).collect();
        assert_eq!(kept, vec![3, 0]);
    }
}
