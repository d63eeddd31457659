use serde::{Deserialize, Serialize};

pub const MAX_IMAGE_WIDTH: usize = 384;
pub const MAX_IMAGE_HEIGHT: usize = 384;

// companion triangle vertices land within this many pixels of the anchor
pub const VERTEX_SPREAD: i32 = 15;

/// Run tunables. Built from a preset, validated once, then passed around by
/// reference; nothing in here changes mid-run.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub mutation_rate: f64,
    pub population_size: usize,
    pub pool_cutoff: usize,
    pub pool_weight_scale: u64,
    pub triangle_count: usize,
    pub fitness_limit: u64,
    pub snapshot_every: usize,
}

impl Settings {
    /// Tuning for the triangle-set encoding.
    pub fn triangles() -> Settings {
        Settings {
            mutation_rate: 0.021,
            population_size: 100,
            pool_cutoff: 20,
            pool_weight_scale: 1,
            triangle_count: 150,
            fitness_limit: 7500,
            snapshot_every: 10,
        }
    }

    /// Tuning for the raw-pixel encoding. The rate is far lower because a
    /// genome carries four mutable bytes per pixel; the weight scale
    /// amplifies selection pressure instead.
    pub fn pixels() -> Settings {
        Settings {
            mutation_rate: 0.0004,
            population_size: 250,
            pool_cutoff: 30,
            pool_weight_scale: 10,
            triangle_count: 0, // unused by this encoding
            fitness_limit: 7500,
            snapshot_every: 100,
        }
    }

    pub fn validate(&self) {
        assert!(self.population_size > 0, "population cannot be empty");
        assert!(
            self.population_size > self.pool_cutoff,
            "population size {} must exceed pool cutoff {}",
            self.population_size,
            self.pool_cutoff
        );
        assert!(
            self.pool_weight_scale >= 1,
            "pool weight scale cannot be zero"
        );
        assert!(self.snapshot_every >= 1, "snapshot cadence cannot be zero");
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings::triangles()
    }
}
