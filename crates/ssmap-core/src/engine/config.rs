use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Tunable parameters of a secondary structure assignment run.
///
/// Every field defaults to the reference DSSP setup; a TOML file only needs to name the
/// keys it overrides (in kebab-case, e.g. `prefer-pi-helices = true`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DsspConfig {
    /// Residue count (waters and ligands included) above which hydrogen bond candidates
    /// come from the spatial index instead of an all-pairs scan.
    pub large_structure_threshold: usize,
    /// Target cell size of the spatial index, in Angstroms.
    pub cell_size: f64,
    /// Search radius around each alpha carbon when collecting candidates, in Angstroms.
    pub hbond_cutoff: f64,
    /// Number of hash buckets of the candidate pair set (rounded up to a power of two).
    pub pair_table_width: usize,
    /// Entries per hash bucket of the candidate pair set.
    pub pair_bucket_slots: usize,
    /// Lets pi helices overwrite alpha helices.
    pub prefer_pi_helices: bool,
}

impl Default for DsspConfig {
    fn default() -> Self {
        Self {
            large_structure_threshold: 1000,
            cell_size: 5.0,
            hbond_cutoff: 5.0,
            pair_table_width: 1 << 20,
            pair_bucket_slots: 32,
            prefer_pi_helices: false,
        }
    }
}

impl DsspConfig {
    pub fn builder() -> DsspConfigBuilder {
        DsspConfigBuilder::new()
    }

    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let label = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: label.clone(),
            source: e,
        })?;
        Self::parse(&content, label)
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<string>".to_string())
    }

    fn parse(content: &str, label: String) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: label,
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter against its admissible range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "cell_size",
                reason: format!("must be a positive finite length, got {}", self.cell_size),
            });
        }
        if !(self.hbond_cutoff.is_finite() && self.hbond_cutoff >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "hbond_cutoff",
                reason: format!(
                    "must be a non-negative finite length, got {}",
                    self.hbond_cutoff
                ),
            });
        }
        if self.pair_table_width == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "pair_table_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.pair_bucket_slots == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "pair_bucket_slots",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct DsspConfigBuilder {
    large_structure_threshold: Option<usize>,
    cell_size: Option<f64>,
    hbond_cutoff: Option<f64>,
    pair_table_width: Option<usize>,
    pair_bucket_slots: Option<usize>,
    prefer_pi_helices: Option<bool>,
}

impl DsspConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn large_structure_threshold(mut self, residues: usize) -> Self {
        self.large_structure_threshold = Some(residues);
        self
    }
    pub fn cell_size(mut self, angstroms: f64) -> Self {
        self.cell_size = Some(angstroms);
        self
    }
    pub fn hbond_cutoff(mut self, angstroms: f64) -> Self {
        self.hbond_cutoff = Some(angstroms);
        self
    }
    pub fn pair_table_width(mut self, width: usize) -> Self {
        self.pair_table_width = Some(width);
        self
    }
    pub fn pair_bucket_slots(mut self, slots: usize) -> Self {
        self.pair_bucket_slots = Some(slots);
        self
    }
    pub fn prefer_pi_helices(mut self, prefer: bool) -> Self {
        self.prefer_pi_helices = Some(prefer);
        self
    }

    /// Fills unset parameters with their defaults and validates the result.
    pub fn build(self) -> Result<DsspConfig, ConfigError> {
        let defaults = DsspConfig::default();
        let config = DsspConfig {
            large_structure_threshold: self
                .large_structure_threshold
                .unwrap_or(defaults.large_structure_threshold),
            cell_size: self.cell_size.unwrap_or(defaults.cell_size),
            hbond_cutoff: self.hbond_cutoff.unwrap_or(defaults.hbond_cutoff),
            pair_table_width: self.pair_table_width.unwrap_or(defaults.pair_table_width),
            pair_bucket_slots: self.pair_bucket_slots.unwrap_or(defaults.pair_bucket_slots),
            prefer_pi_helices: self.prefer_pi_helices.unwrap_or(defaults.prefer_pi_helices),
        };
        config.validate()?;
        Ok(config)
    }
}
