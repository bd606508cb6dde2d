//! Colony configuration.
//!
//! Every field is optional when deserializing; missing fields take the
//! defaults below. The colony keeps the snapshot read-only after
//! construction.

use hyphae_core::error::{HyphaeError, Result};
use serde::{Deserialize, Serialize};

/// Tunable parameters of a colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Population cap (default: 64).
    pub max_agents: usize,
    /// Agents spawned at construction (default: 8).
    pub initial_agents: usize,
    /// Radius within which agents sense and digest documents. Also the
    /// spatial grid cell size (default: 5.0).
    pub digestion_radius: f64,
    /// Maximum distance an agent moves per tick (default: 1.0).
    pub move_step: f64,
    /// Energy lost by every agent per tick (default: 0.1).
    pub energy_decay: f64,
    /// Energy gained per unit of document mass consumed (default: 10.0).
    pub digestion_gain: f64,
    /// Energy above which an agent divides (default: 15.0).
    pub reproduction_threshold: f64,
    /// Blend factor used when a query omits alpha (default: 0.5).
    pub default_alpha: f64,
    /// Energy of the agents spawned at construction (default: 10.0).
    pub initial_energy: f64,
    /// Energy cap after digestion (default: 20.0).
    pub max_energy: f64,
    /// Maximum document mass consumed by one digestion event (default: 0.25).
    pub digestion_rate: f64,
    /// Distance unit for placing documents ingested without a position
    /// (default: 1.0).
    pub document_spacing: f64,
    /// Seed mixed into every agent's random walk (default: 42).
    pub seed: u64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            max_agents: 64,
            initial_agents: 8,
            digestion_radius: 5.0,
            move_step: 1.0,
            energy_decay: 0.1,
            digestion_gain: 10.0,
            reproduction_threshold: 15.0,
            default_alpha: 0.5,
            initial_energy: 10.0,
            max_energy: 20.0,
            digestion_rate: 0.25,
            document_spacing: 1.0,
            seed: 42,
        }
    }
}

impl ColonyConfig {
    pub fn with_max_agents(mut self, n: usize) -> Self {
        self.max_agents = n;
        self
    }

    pub fn with_initial_agents(mut self, n: usize) -> Self {
        self.initial_agents = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<()> {
        if self.max_agents == 0 {
            return Err(HyphaeError::invalid_config("max_agents", "must be at least 1"));
        }
        if self.initial_agents > self.max_agents {
            return Err(HyphaeError::invalid_config(
                "initial_agents",
                format!("{} exceeds max_agents {}", self.initial_agents, self.max_agents),
            ));
        }
        positive("digestion_radius", self.digestion_radius)?;
        positive("move_step", self.move_step)?;
        positive("max_energy", self.max_energy)?;
        positive("document_spacing", self.document_spacing)?;
        non_negative("energy_decay", self.energy_decay)?;
        non_negative("digestion_gain", self.digestion_gain)?;
        non_negative("initial_energy", self.initial_energy)?;
        if !self.reproduction_threshold.is_finite() {
            return Err(HyphaeError::invalid_config("reproduction_threshold", "must be finite"));
        }
        if !(self.digestion_rate > 0.0 && self.digestion_rate <= 1.0) {
            return Err(HyphaeError::invalid_config(
                "digestion_rate",
                format!("{} is outside (0, 1]", self.digestion_rate),
            ));
        }
        if !(0.0..=1.0).contains(&self.default_alpha) {
            return Err(HyphaeError::invalid_config(
                "default_alpha",
                format!("{} is outside [0, 1]", self.default_alpha),
            ));
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HyphaeError::invalid_config(field, format!("{} must be finite and > 0", value)))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HyphaeError::invalid_config(field, format!("{} must be finite and >= 0", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyphae_core::error::ArgumentError;

    #[test]
    fn defaults_are_valid() {
        assert!(ColonyConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ColonyConfig =
            serde_json::from_str(r#"{ "max_agents": 10, "default_alpha": 0.2 }"#).unwrap();
        assert_eq!(config.max_agents, 10);
        assert_eq!(config.default_alpha, 0.2);
        assert_eq!(config.initial_agents, ColonyConfig::default().initial_agents);
        assert_eq!(config.digestion_radius, ColonyConfig::default().digestion_radius);
    }

    #[test]
    fn initial_population_must_fit_the_cap() {
        let err = ColonyConfig::default()
            .with_max_agents(4)
            .with_initial_agents(5)
            .validate()
            .unwrap_err();
        match err {
            HyphaeError::InvalidArgument(ArgumentError::Config { field, .. }) => {
                assert_eq!(field, "initial_agents")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_fields_are_rejected() {
        let config = ColonyConfig {
            move_step: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ColonyConfig {
            digestion_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ColonyConfig {
            default_alpha: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
