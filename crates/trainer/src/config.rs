//! Trainer configuration from environment variables

use std::env;
use std::time::Duration;

use crate::error::TrainerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct TrainerConfig {
    /// Mode to open straight away instead of showing the menu
    pub start_mode: Option<usize>,

    /// How often the elapsed time is sampled while a puzzle is being played
    pub tick_interval: Duration,

    /// Seed for a reproducible puzzle sequence
    pub seed: Option<u64>,

    pub output: OutputFormat,

    /// Positions to try per puzzle before giving up (unbounded if unset)
    pub max_attempts: Option<u32>,
}

impl TrainerConfig {
    pub fn from_env() -> Result<Self, TrainerError> {
        let start_mode = parse_var("HANGING_MODE")?;

        let tick_ms: u64 = parse_var("HANGING_TICK_MS")?.unwrap_or(100);
        if tick_ms == 0 {
            return Err(TrainerError::Config("HANGING_TICK_MS must be positive"));
        }

        let seed = parse_var("HANGING_SEED")?;

        let output = match env::var("HANGING_OUTPUT").as_deref() {
            Err(_) | Ok("text") => OutputFormat::Text,
            Ok("json") => OutputFormat::Json,
            Ok(_) => return Err(TrainerError::Config("HANGING_OUTPUT must be 'text' or 'json'")),
        };

        let max_attempts = parse_var("HANGING_MAX_ATTEMPTS")?;

        Ok(Self {
            start_mode,
            tick_interval: Duration::from_millis(tick_ms),
            seed,
            output,
            max_attempts,
        })
    }
}

/// Unset is `None`; set but unparseable is an error.
fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, TrainerError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| TrainerError::InvalidVar { name, value }),
        Err(_) => Ok(None),
    }
}
