//! Build guard.
//!
//! Fetch failures degrade to empty content, so a build during a content
//! store outage would otherwise replace a full site with empty listings.
//! The guard compares the record count of this build with the previous
//! manifest and refuses to write when it dropped too far.

use crate::error::{AppError, Result};

/// Guard thresholds.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Maximum allowed drop in percent (0-100)
    pub max_drop_percent: u8,
    /// Previous builds smaller than this are not checked
    pub min_baseline: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_drop_percent: 50,
            min_baseline: 4,
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardCheck {
    Safe { current: usize, previous: usize },
    /// No previous build, or one below the baseline
    ColdStart { current: usize },
    Shrank {
        current: usize,
        previous: usize,
        drop_percent: f64,
    },
    Empty { previous: usize },
}

#[derive(Debug, Clone, Default)]
pub struct ContentGuard {
    config: GuardConfig,
}

impl ContentGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Compare this build's record count with the previous one.
    pub fn check(&self, current: usize, previous: Option<usize>) -> GuardCheck {
        let Some(previous) = previous else {
            return GuardCheck::ColdStart { current };
        };

        if current == 0 {
            return if previous == 0 {
                GuardCheck::ColdStart { current }
            } else {
                GuardCheck::Empty { previous }
            };
        }
        if previous < self.config.min_baseline {
            return GuardCheck::ColdStart { current };
        }
        if current < previous {
            let drop_percent = (previous - current) as f64 / previous as f64 * 100.0;
            if drop_percent > f64::from(self.config.max_drop_percent) {
                return GuardCheck::Shrank {
                    current,
                    previous,
                    drop_percent,
                };
            }
        }
        GuardCheck::Safe { current, previous }
    }

    /// `Ok` when it is safe to write, logging the decision.
    pub fn validate(&self, current: usize, previous: Option<usize>) -> Result<()> {
        match self.check(current, previous) {
            GuardCheck::Safe { current, previous } => {
                log::info!("Content guard: safe ({current} records, was {previous})");
                Ok(())
            }
            GuardCheck::ColdStart { current } => {
                log::info!("Content guard: cold start ({current} records)");
                Ok(())
            }
            GuardCheck::Shrank {
                current,
                previous,
                drop_percent,
            } => {
                log::error!(
                    "Content guard: {previous} -> {current} records ({drop_percent:.1}% drop)"
                );
                Err(AppError::ContentShrank {
                    current,
                    previous,
                    drop_percent,
                    threshold_percent: self.config.max_drop_percent,
                })
            }
            GuardCheck::Empty { previous } => {
                log::error!("Content guard: nothing fetched, previous build had {previous}");
                Err(AppError::EmptyContent { previous })
            }
        }
    }
}
