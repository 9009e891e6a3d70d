//! # Configuration
//!
//! Tunables for the elimination engine. Defaults follow the published
//! weighted sample elimination parameters (alpha = 8, beta = 0.65,
//! gamma = 1.5, weight limiting on).

use super::error::{SamplingError, SamplingResult};

/// Default kd-tree leaf bucket size
pub const DEFAULT_LEAF_SIZE: usize = 16;

/// Which neighbourhood index backs the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexKind {
    /// Bucketed kd-tree, O(log n + k) per query
    #[default]
    KdTree,
    /// Brute force, O(n) per query
    Flat,
}

/// Elimination engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EliminationConfig {
    /// Falloff exponent of the weight function
    pub alpha: f64,

    /// Upper limit of the weight-limiting fraction
    pub beta: f64,

    /// Exponent shaping the weight-limiting fraction
    pub gamma: f64,

    /// Clamp close-neighbour distances to `d_min`
    pub weight_limiting: bool,

    /// Reorder output so every prefix is well spread
    pub progressive: bool,

    /// Neighbourhood index backend
    pub index: IndexKind,

    /// Max points per kd-tree leaf
    pub leaf_size: usize,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            alpha: 8.0,
            beta: 0.65,
            gamma: 1.5,
            weight_limiting: true,
            progressive: false,
            index: IndexKind::KdTree,
            leaf_size: DEFAULT_LEAF_SIZE,
        }
    }
}

impl EliminationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_weight_limiting(mut self, on: bool) -> Self {
        self.weight_limiting = on;
        self
    }

    pub fn with_progressive(mut self, on: bool) -> Self {
        self.progressive = on;
        self
    }

    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }

    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    pub fn validate(&self) -> SamplingResult<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(SamplingError::InvalidConfig(format!(
                "alpha must be positive, got {}",
                self.alpha
            )));
        }
        if !(0.0..1.0).contains(&self.beta) {
            return Err(SamplingError::InvalidConfig(format!(
                "beta must be in [0, 1), got {}",
                self.beta
            )));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(SamplingError::InvalidConfig(format!(
                "gamma must be positive, got {}",
                self.gamma
            )));
        }
        if self.leaf_size == 0 {
            return Err(SamplingError::InvalidConfig(
                "leaf size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EliminationConfig::default();
        assert_eq!(config.alpha, 8.0);
        assert_eq!(config.beta, 0.65);
        assert_eq!(config.gamma, 1.5);
        assert!(config.weight_limiting);
        assert!(!config.progressive);
        assert_eq!(config.index, IndexKind::KdTree);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = EliminationConfig::new()
            .with_alpha(4.0)
            .with_weight_limiting(false)
            .with_progressive(true)
            .with_index(IndexKind::Flat)
            .with_leaf_size(4);

        assert_eq!(config.alpha, 4.0);
        assert!(!config.weight_limiting);
        assert!(config.progressive);
        assert_eq!(config.index, IndexKind::Flat);
        assert_eq!(config.leaf_size, 4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(EliminationConfig::new().with_alpha(0.0).validate().is_err());
        assert!(EliminationConfig::new().with_beta(1.0).validate().is_err());
        assert!(EliminationConfig::new().with_gamma(-1.0).validate().is_err());
        assert!(EliminationConfig::new().with_leaf_size(0).validate().is_err());
    }
}
