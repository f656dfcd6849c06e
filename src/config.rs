use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_API_BASE: &str = "/api";

/// One row of the batch sizing table. `max_items: None` closes the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingBracket {
    pub max_items: Option<usize>,
    pub display: usize,
    pub selectable: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    pub display: usize,
    pub selectable: usize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(String),
    #[error("sizing table is empty")]
    NoBrackets,
    #[error("sizing table must end with an unbounded bracket")]
    UnboundedLast,
    #[error("sizing bracket {0} is out of order")]
    Unordered(usize),
    #[error("sizing bracket {0} must show at least one item and allow at most that many picks")]
    BadBracket(usize),
    #[error("promotion threshold must be at least 1")]
    Threshold,
    #[error("qualification batch bounds must satisfy 2 <= min <= max")]
    QualificationBatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub promote_threshold: i32,
    pub brackets: Vec<SizingBracket>,
    pub qualification_min_views: u32,
    pub required_sweeps: u32,
    pub qualification_min_batch: usize,
    pub qualification_max_batch: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            promote_threshold: 5,
            brackets: vec![
                SizingBracket {
                    max_items: Some(20),
                    display: 2,
                    selectable: 1,
                },
                SizingBracket {
                    max_items: Some(150),
                    display: 6,
                    selectable: 5,
                },
                SizingBracket {
                    max_items: Some(300),
                    display: 12,
                    selectable: 11,
                },
                SizingBracket {
                    max_items: None,
                    display: 20,
                    selectable: 19,
                },
            ],
            qualification_min_views: 2,
            required_sweeps: 2,
            qualification_min_batch: 2,
            qualification_max_batch: 4,
        }
    }
}

impl RankingConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brackets.is_empty() {
            return Err(ConfigError::NoBrackets);
        }
        let last = self.brackets.len() - 1;
        let mut previous_max = 0;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.display == 0
                || bracket.selectable == 0
                || bracket.selectable > bracket.display
            {
                return Err(ConfigError::BadBracket(index));
            }
            match bracket.max_items {
                Some(_) if index == last => return Err(ConfigError::UnboundedLast),
                None if index != last => return Err(ConfigError::UnboundedLast),
                Some(max) => {
                    if max < previous_max || (index > 0 && max == previous_max) {
                        return Err(ConfigError::Unordered(index));
                    }
                    previous_max = max;
                }
                None => {}
            }
        }
        if self.promote_threshold < 1 {
            return Err(ConfigError::Threshold);
        }
        if self.qualification_min_batch < 2
            || self.qualification_min_batch > self.qualification_max_batch
        {
            return Err(ConfigError::QualificationBatch);
        }
        Ok(())
    }

    /// Batch size for a pool of `item_count` items.
    pub fn sizing_for(&self, item_count: usize) -> Sizing {
        let bracket = self
            .brackets
            .iter()
            .find(|bracket| bracket.max_items.map_or(true, |max| item_count <= max))
            .or_else(|| self.brackets.last());

        match bracket {
            Some(bracket) => Sizing {
                display: bracket.display,
                selectable: bracket.selectable,
            },
            None => Sizing {
                display: 2,
                selectable: 1,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub ranking: RankingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            ranking: RankingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.ranking.validate()?;
        Ok(config)
    }
}
