//! Normalization configuration options

use crate::reference::transcript::DEFAULT_ALT_ALN_METHOD;
use serde::{Deserialize, Serialize};

/// Direction for variant shuffling during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShuffleDirection {
    /// Shuffle towards 3' end (default for HGVS)
    #[default]
    #[serde(rename = "3prime", alias = "3")]
    ThreePrime,
    /// Shuffle towards 5' end (for VCF compatibility)
    #[serde(rename = "5prime", alias = "5")]
    FivePrime,
}

impl ShuffleDirection {
    /// Leftward shuffling (5')
    pub fn is_leftward(&self) -> bool {
        matches!(self, ShuffleDirection::FivePrime)
    }
}

impl std::fmt::Display for ShuffleDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShuffleDirection::ThreePrime => write!(f, "3prime"),
            ShuffleDirection::FivePrime => write!(f, "5prime"),
        }
    }
}

impl std::str::FromStr for ShuffleDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "3" | "3prime" | "3'" | "three_prime" => Ok(ShuffleDirection::ThreePrime),
            "5" | "5prime" | "5'" | "five_prime" => Ok(ShuffleDirection::FivePrime),
            _ => Err(format!("Invalid shuffle direction: {}", s)),
        }
    }
}

/// Configuration for variant normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Direction to shuffle variants (default: 3')
    #[serde(rename = "direction")]
    pub shuffle_direction: ShuffleDirection,

    /// Whether to allow crossing exon-intron and UTR-CDS boundaries
    pub cross_boundaries: bool,

    /// Keep the literal reference allele in del/delins/dup output
    pub fill: bool,

    /// Alignment method used to look up transcript exons and CDS bounds
    pub alt_aln_method: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            shuffle_direction: ShuffleDirection::ThreePrime,
            cross_boundaries: false,
            fill: true,
            alt_aln_method: DEFAULT_ALT_ALN_METHOD.to_string(),
        }
    }
}

impl NormalizeConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set shuffle direction
    pub fn with_direction(mut self, direction: ShuffleDirection) -> Self {
        self.shuffle_direction = direction;
        self
    }

    /// Allow crossing boundaries
    pub fn allow_crossing_boundaries(mut self) -> Self {
        self.cross_boundaries = true;
        self
    }

    /// Set whether normalized edits carry the literal reference allele
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Set the transcript alignment method
    pub fn with_alt_aln_method(mut self, method: impl Into<String>) -> Self {
        self.alt_aln_method = method.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NormalizeConfig::default();
        assert_eq!(config.shuffle_direction, ShuffleDirection::ThreePrime);
        assert!(!config.cross_boundaries);
        assert!(config.fill);
        assert_eq!(config.alt_aln_method, "splign");
    }

    #[test]
    fn test_builder() {
        let config = NormalizeConfig::new()
            .with_direction(ShuffleDirection::FivePrime)
            .allow_crossing_boundaries()
            .with_fill(false)
            .with_alt_aln_method("blat");
        assert_eq!(config.shuffle_direction, ShuffleDirection::FivePrime);
        assert!(config.cross_boundaries);
        assert!(!config.fill);
        assert_eq!(config.alt_aln_method, "blat");
    }

    #[test]
    fn test_direction_from_str() {
        for s in ["3", "3prime", "3'", "three_prime", "3PRIME"] {
            assert_eq!(s.parse::<ShuffleDirection>(), Ok(ShuffleDirection::ThreePrime));
        }
        for s in ["5", "5prime", "5'", "five_prime"] {
            assert_eq!(s.parse::<ShuffleDirection>(), Ok(ShuffleDirection::FivePrime));
        }
        assert!("left".parse::<ShuffleDirection>().is_err());
    }

    #[test]
    fn test_direction_display_round_trip() {
        for dir in [ShuffleDirection::ThreePrime, ShuffleDirection::FivePrime] {
            assert_eq!(dir.to_string().parse::<ShuffleDirection>(), Ok(dir));
        }
        assert!(ShuffleDirection::FivePrime.is_leftward());
        assert!(!ShuffleDirection::ThreePrime.is_leftward());
    }

    #[test]
    fn test_config_from_toml_partial() {
        let config: NormalizeConfig = toml::from_str(r#"direction = "5prime""#).unwrap();
        assert_eq!(config.shuffle_direction, ShuffleDirection::FivePrime);
        assert!(config.fill);
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        assert!(toml::from_str::<NormalizeConfig>("window = 3").is_err());
    }
}
