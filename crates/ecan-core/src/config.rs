use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ATTENTION_BANK, DEFAULT_DECAY_RATE, DEFAULT_FORGETTING_THRESHOLD, DEFAULT_MAX_LTI,
    DEFAULT_MAX_STI, DEFAULT_MIN_STI, DEFAULT_RENT_RATE, DEFAULT_SPREADING_RATE, DEFAULT_WAGE_RATE,
};

/// Tuning parameters for one attention economy. Immutable for the lifetime
/// of the [`AttentionSystem`](crate::system::AttentionSystem) built from it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EcanConfig {
    /// Opening bank balance.
    pub attention_bank: f64,
    /// STI floor.
    pub min_sti: i64,
    /// STI ceiling.
    pub max_sti: i64,
    /// LTI ceiling (floor is always 0).
    pub max_lti: i64,
    /// Per-cycle multiplicative decay, in (0, 1].
    pub decay_rate: f64,
    /// Fraction of a source's STI diffused per spreading pass, in (0, 1].
    pub spreading_rate: f64,
    /// STI below which a non-VLTI entry is forgotten.
    pub forgetting_threshold: i64,
    /// Fraction of positive STI taxed as rent, in (0, 1].
    pub rent_rate: f64,
    /// Fraction of LTI paid as wages, in (0, 1].
    pub wage_rate: f64,
}

impl Default for EcanConfig {
    fn default() -> Self {
        Self {
            attention_bank: DEFAULT_ATTENTION_BANK,
            min_sti: DEFAULT_MIN_STI,
            max_sti: DEFAULT_MAX_STI,
            max_lti: DEFAULT_MAX_LTI,
            decay_rate: DEFAULT_DECAY_RATE,
            spreading_rate: DEFAULT_SPREADING_RATE,
            forgetting_threshold: DEFAULT_FORGETTING_THRESHOLD,
            rent_rate: DEFAULT_RENT_RATE,
            wage_rate: DEFAULT_WAGE_RATE,
        }
    }
}

impl EcanConfig {
    /// Check every construction-time invariant. Mis-specified config is a
    /// programmer error and must fail here, never at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.attention_bank.is_finite() {
            return Err(ConfigError::NonFiniteBank(self.attention_bank));
        }
        if self.min_sti > self.max_sti {
            return Err(ConfigError::InvalidStiBounds {
                min: self.min_sti,
                max: self.max_sti,
            });
        }
        if self.max_lti < 0 {
            return Err(ConfigError::NegativeMaxLti(self.max_lti));
        }
        for (name, rate) in [
            ("decay_rate", self.decay_rate),
            ("spreading_rate", self.spreading_rate),
            ("rent_rate", self.rent_rate),
            ("wage_rate", self.wage_rate),
        ] {
            if !rate.is_finite() || rate <= 0.0 || rate > 1.0 {
                return Err(ConfigError::RateOutOfRange { name, value: rate });
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    NonFiniteBank(f64),
    InvalidStiBounds { min: i64, max: i64 },
    NegativeMaxLti(i64),
    RateOutOfRange { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFiniteBank(v) => write!(f, "attention_bank must be finite, got {v}"),
            ConfigError::InvalidStiBounds { min, max } => {
                write!(f, "min_sti ({min}) exceeds max_sti ({max})")
            }
            ConfigError::NegativeMaxLti(v) => write!(f, "max_lti must be non-negative, got {v}"),
            ConfigError::RateOutOfRange { name, value } => {
                write!(f, "{name} must be in (0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
