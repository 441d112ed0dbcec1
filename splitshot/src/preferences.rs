//! Last-used inputs, persisted by the caller as plain key/value pairs.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog;
use crate::grams::{Centigrams, Micrograms};
use crate::request::ShotRequest;

pub const SELECTION_KEY: &str = "selection";
pub const DESIRED_COUNT_KEY: &str = "desired_count";
pub const DESIRED_WEIGHT_KEY: &str = "desired_weight_grams";

/// Ids enabled in a fresh tackle box, heaviest first.
pub const DEFAULT_SELECTION: [&str; 8] = ["SSG", "AAA", "BB", "1", "3", "4", "6", "8"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreferencesError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
    #[error("unknown preference key '{0}'")]
    UnknownKey(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub selection: Vec<String>,
    pub desired_count: u32,
    pub desired_weight_grams: Micrograms,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            selection: DEFAULT_SELECTION.into_iter().map(String::from).collect(),
            desired_count: 4,
            desired_weight_grams: Micrograms::from(Centigrams::new(150)),
        }
    }
}

impl Preferences {
    /// Exactly three pairs. The selection is written heaviest first; ids missing from the
    /// catalog keep their relative order at the end.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let selection = self.selection.iter().unique().sorted_by_key(|id| catalog_rank(id)).join(",");
        vec![
            (SELECTION_KEY, selection),
            (DESIRED_COUNT_KEY, self.desired_count.to_string()),
            (DESIRED_WEIGHT_KEY, self.desired_weight_grams.to_string()),
        ]
    }

    /// Missing keys keep their defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, PreferencesError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut prefs = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let invalid = || PreferencesError::InvalidValue { key: key.to_string(), value: value.to_string() };
            match key {
                SELECTION_KEY => {
                    prefs.selection = value.split(',').map(str::trim).filter(|id| !id.is_empty()).map(String::from).collect();
                }
                DESIRED_COUNT_KEY => prefs.desired_count = value.trim().parse().map_err(|_| invalid())?,
                DESIRED_WEIGHT_KEY => prefs.desired_weight_grams = value.parse().map_err(|_| invalid())?,
                other => return Err(PreferencesError::UnknownKey(other.to_string())),
            }
        }
        Ok(prefs)
    }

    pub fn to_request(&self) -> ShotRequest {
        ShotRequest::new(self.selection.iter().cloned(), f64::from(self.desired_count), self.desired_weight_grams.as_grams())
    }
}

fn catalog_rank(id: &str) -> usize {
    catalog::catalog().iter().position(|c| c.id == id).unwrap_or(usize::MAX)
}
