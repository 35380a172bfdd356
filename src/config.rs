use crate::error::{ConfigError, SantaError};
use crate::permutation::{DerangementSampler, SamplerConfig};
use crate::santa::{Roster, SecretSanta};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_gifts() -> usize {
    1
}

/// Contents of a draw file, e.g.
///
/// ```toml
/// participants = ["Denis", "Marie-Laure", "Brice", "Benja"]
/// gifts = 2
/// exclude_groups = [["Denis", "Marie-Laure"], ["Brice", "Benja"]]
///
/// [sampler]
/// max_attempts = 100000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawConfig {
    pub participants: Vec<String>,
    #[serde(default = "default_gifts")]
    pub gifts: usize,
    #[serde(default)]
    pub exclude_groups: Vec<Vec<String>>,
    #[serde(default)]
    pub gift_labels: Option<Vec<String>>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub sampler: SamplerConfig,
}

impl DrawConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: DrawConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gifts > 0 && self.participants.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "{} participant(s) listed; a draw needs at least 2",
                self.participants.len()
            )));
        }
        if let Some(labels) = &self.gift_labels {
            if labels.len() != self.gifts {
                return Err(ConfigError::Invalid(format!(
                    "{} gift label(s) for {} gift(s)",
                    labels.len(),
                    self.gifts
                )));
            }
        }
        let n = self.participants.len();
        if self.gifts > 0 && self.gifts >= n {
            return Err(ConfigError::Invalid(format!(
                "{} gift(s) per participant needs at least {} participants, got {n}",
                self.gifts,
                self.gifts + 1
            )));
        }
        let exclusions = self
            .secret_santa()
            .and_then(|santa| santa.exclusions())
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if let Some(exclusions) = exclusions {
            // A gifter never repeats a giftee, so it needs `gifts` allowed targets.
            let tightest = (0..n)
                .map(|i| (i, n - 1 - exclusions.forbidden(i).len()))
                .min_by_key(|&(_, allowed)| allowed);
            if let Some((i, allowed)) = tightest {
                if allowed < self.gifts {
                    return Err(ConfigError::Invalid(format!(
                        "'{}' may only give to {allowed} participant(s), fewer than {} gift(s)",
                        self.participants[i], self.gifts
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn secret_santa(&self) -> Result<SecretSanta, SantaError> {
        let roster = Roster::new(self.participants.iter().cloned())?;
        Ok(SecretSanta::new(roster, self.gifts).with_exclude_groups(self.exclude_groups.clone()))
    }

    pub fn sampler(&self) -> DerangementSampler {
        DerangementSampler::new(self.sampler.clone())
    }

    pub fn gift_labels(&self) -> Option<&[String]> {
        self.gift_labels.as_deref()
    }
}
