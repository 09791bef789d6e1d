use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

use super::particle::MAX_LANES;

/// Burst kinematics. Defaults reproduce the classic firework look:
/// 0.8 velocity retention per second, 500 px/s² gravity, launch speeds up to
/// 700 px/s and 1-2 second lifetimes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsParams {
    pub drag: f32,
    pub gravity: f32,
    pub max_launch_speed: f32,
    pub min_lifetime: f32,
    pub lifetime_spread: f32,
    /// Chance (out of 100) that a particle fading out spawns a new burst
    pub secondary_spawn_percent: u32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        PhysicsParams {
            drag: 0.8,
            gravity: 500.0,
            max_launch_speed: 700.0,
            min_lifetime: 1.0,
            lifetime_spread: 1.0,
            secondary_spawn_percent: 12,
        }
    }
}

impl PhysicsParams {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("drag", self.drag),
            ("gravity", self.gravity),
            ("maxLaunchSpeed", self.max_launch_speed),
            ("minLifetime", self.min_lifetime),
            ("lifetimeSpread", self.lifetime_spread),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(EngineError::InvalidConfig(format!("{name} must be finite, got {value}")));
            }
        }

        if self.drag <= 0.0 || self.drag > 1.0 {
            return Err(EngineError::InvalidConfig(format!(
                "drag must be in (0, 1], got {}",
                self.drag
            )));
        }
        if self.gravity < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "gravity must be >= 0, got {}",
                self.gravity
            )));
        }
        if self.max_launch_speed < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "maxLaunchSpeed must be >= 0, got {}",
                self.max_launch_speed
            )));
        }
        if self.min_lifetime <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "minLifetime must be > 0, got {}",
                self.min_lifetime
            )));
        }
        if self.lifetime_spread < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "lifetimeSpread must be >= 0, got {}",
                self.lifetime_spread
            )));
        }
        if self.secondary_spawn_percent > 100 {
            return Err(EngineError::InvalidConfig(format!(
                "secondarySpawnPercent must be <= 100, got {}",
                self.secondary_spawn_percent
            )));
        }
        Ok(())
    }
}

/// Construction parameters for an `EffectSystem`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Requested lane count; clamped to `1..=MAX_LANES` at construction
    pub lanes: usize,
    /// Fixed RNG seed. `None` seeds every lane randomly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub physics: PhysicsParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            lanes: default_lane_count(),
            seed: None,
            physics: PhysicsParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_lanes(lanes: usize) -> Self {
        EngineConfig {
            lanes,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Lane counts are clamped rather than rejected, so only physics can fail
    pub fn validate(&self) -> Result<()> {
        self.physics.validate()
    }

    #[inline]
    pub fn clamped_lanes(&self) -> usize {
        clamp_lanes(self.lanes)
    }
}

#[inline]
pub fn clamp_lanes(lanes: usize) -> usize {
    lanes.clamp(1, MAX_LANES)
}

fn default_lane_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(MAX_LANES)
}
