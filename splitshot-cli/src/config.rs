use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use splitshot::request::ValidatedRequest;
use splitshot::{Preferences, SearchLimits, ShotRequest};

use crate::cli::{EstimateArgs, PatternArgs};

/// Contents of the config file: the persisted inputs plus the search limit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(flatten)]
    pub preferences: Preferences,
    /// Zero disables the limit.
    pub max_combinations: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { preferences: Preferences::default(), max_combinations: SearchLimits::DEFAULT_MAX_COMBINATIONS as u64 }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = toml::to_string(self).context("serializing config")?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        info!("saved config to {}", path.display());
        Ok(())
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits::with_max(u128::from(self.max_combinations))
    }

    /// Command line values win over the file.
    pub fn merge_pattern_args(mut self, args: &PatternArgs) -> (Self, ShotRequest) {
        if let Some(v) = args.max_combinations {
            self.max_combinations = v;
        }
        let request = self.request_with(&args.shots, args.count, args.weight);
        (self, request)
    }

    pub fn merge_estimate_args(&self, args: &EstimateArgs) -> ShotRequest {
        self.request_with(&args.shots, args.count, None)
    }

    /// Records a request that passed validation as the new last-used inputs.
    pub fn remember(&mut self, request: &ValidatedRequest) {
        self.preferences = Preferences {
            selection: request.classes().iter().rev().map(|c| c.id.to_string()).collect(),
            desired_count: u32::try_from(request.desired_count()).unwrap_or(u32::MAX),
            desired_weight_grams: request.target(),
        };
    }

    fn request_with(&self, shots: &[String], count: Option<f64>, weight: Option<f64>) -> ShotRequest {
        let mut request = self.preferences.to_request();
        if !shots.is_empty() {
            request.selection = shots.to_vec();
        }
        if let Some(v) = count {
            request.desired_count = v;
        }
        if let Some(v) = weight {
            request.desired_weight_grams = v;
        }
        request
    }
}
