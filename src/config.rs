//! Growth policy for `StoreTable`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INITIAL_CAPACITY: usize = 4;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Bucket count at construction and the load factor that triggers doubling.
///
/// Missing fields deserialize to the defaults, so `{}` is a valid config.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(())
    }
}
