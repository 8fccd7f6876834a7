use crate::error::ConfigError;

use serde::{Deserialize, Serialize};

/// Fixed simulation constants, supplied once at initialization.
///
/// World space is screen-like: the origin is the top-left corner and `+y`
/// points down, so positive gravity pulls bodies toward `world_height`.
/// Velocities and impulses are expressed per tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Width of the world rectangle.
    pub world_width: f32,
    /// Height of the world rectangle.
    pub world_height: f32,
    /// Downward acceleration per unit of mass per tick.
    pub gravity: f32,
    /// Multiplicative velocity decay applied every tick.
    pub damping: f32,
    /// Restitution between two colliding bodies.
    pub restitution: f32,
    /// Restitution against the world walls.
    pub wall_restitution: f32,
    /// Per-component velocity clamp.
    pub max_velocity: f32,
    /// Number of position passes per tick. Only the first applies impulses.
    pub solver_passes: usize,
    /// Squared distances below this are treated as coincident and skipped.
    pub epsilon: f32,
    /// Radius of the radial explosion field.
    pub blast_radius: f32,
    /// Peak radial impulse, reached at the source center.
    pub blast_force: f32,
    /// Upward impulse given to the exploding body itself.
    pub self_impulse: f32,
    /// Bound of the horizontal jitter added to the exploding body.
    pub explosion_jitter: f32,
    /// Length of a full flash pulse, in ticks.
    pub max_flash_frames: u32,
    /// Extra scale at the start of a flash pulse.
    pub flash_scale: f32,
    /// Mass per unit of radius for generated bodies.
    pub mass_per_radius: f32,
    /// Smallest radius for generated bodies.
    pub min_radius: f32,
    /// Largest radius for generated bodies.
    pub max_radius: f32,
    /// Bound of each initial velocity component for generated bodies.
    pub initial_speed: f32,
    /// Ticks per second used by [`crate::Simulation::advance`].
    pub tick_rate: f32,
    /// Catch-up cap for a single `advance` call.
    pub max_ticks_per_advance: usize,
    /// Seed for scene generation and explosion jitter.
    pub seed: u64,
    /// Run the per-body stages (integration, feedback) on rayon.
    pub use_rayon: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: Self::DEFAULT_WORLD_WIDTH,
            world_height: Self::DEFAULT_WORLD_HEIGHT,
            gravity: Self::DEFAULT_GRAVITY,
            damping: Self::DEFAULT_DAMPING,
            restitution: Self::DEFAULT_RESTITUTION,
            wall_restitution: Self::DEFAULT_WALL_RESTITUTION,
            max_velocity: Self::DEFAULT_MAX_VELOCITY,
            solver_passes: Self::DEFAULT_SOLVER_PASSES,
            epsilon: Self::DEFAULT_EPSILON,
            blast_radius: Self::DEFAULT_BLAST_RADIUS,
            blast_force: Self::DEFAULT_BLAST_FORCE,
            self_impulse: Self::DEFAULT_SELF_IMPULSE,
            explosion_jitter: Self::DEFAULT_EXPLOSION_JITTER,
            max_flash_frames: Self::DEFAULT_MAX_FLASH_FRAMES,
            flash_scale: Self::DEFAULT_FLASH_SCALE,
            mass_per_radius: Self::DEFAULT_MASS_PER_RADIUS,
            min_radius: Self::DEFAULT_MIN_RADIUS,
            max_radius: Self::DEFAULT_MAX_RADIUS,
            initial_speed: Self::DEFAULT_INITIAL_SPEED,
            tick_rate: Self::DEFAULT_TICK_RATE,
            max_ticks_per_advance: Self::DEFAULT_MAX_TICKS_PER_ADVANCE,
            seed: 0,
            use_rayon: false,
        }
    }
}

impl SimConfig {
    /// Default constants.
    pub const DEFAULT_WORLD_WIDTH: f32 = 800.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
    pub const DEFAULT_GRAVITY: f32 = 0.15;
    pub const DEFAULT_DAMPING: f32 = 0.995;
    pub const DEFAULT_RESTITUTION: f32 = 0.7;
    pub const DEFAULT_WALL_RESTITUTION: f32 = 0.6;
    pub const DEFAULT_MAX_VELOCITY: f32 = 15.0;
    pub const DEFAULT_SOLVER_PASSES: usize = 3;
    pub const DEFAULT_EPSILON: f32 = 1e-4;
    pub const DEFAULT_BLAST_RADIUS: f32 = 200.0;
    pub const DEFAULT_BLAST_FORCE: f32 = 25.0;
    pub const DEFAULT_SELF_IMPULSE: f32 = 12.0;
    pub const DEFAULT_EXPLOSION_JITTER: f32 = 2.0;
    pub const DEFAULT_MAX_FLASH_FRAMES: u32 = 12;
    pub const DEFAULT_FLASH_SCALE: f32 = 0.35;
    pub const DEFAULT_MASS_PER_RADIUS: f32 = 0.05;
    pub const DEFAULT_MIN_RADIUS: f32 = 10.0;
    pub const DEFAULT_MAX_RADIUS: f32 = 40.0;
    pub const DEFAULT_INITIAL_SPEED: f32 = 4.0;
    pub const DEFAULT_TICK_RATE: f32 = 60.0;
    pub const DEFAULT_MAX_TICKS_PER_ADVANCE: usize = 5;

    /// Checks every value against the range the solver relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.world_width,
            self.world_height,
            self.gravity,
            self.damping,
            self.max_velocity,
            self.epsilon,
            self.blast_radius,
            self.blast_force,
            self.self_impulse,
            self.explosion_jitter,
            self.flash_scale,
            self.mass_per_radius,
            self.min_radius,
            self.max_radius,
            self.initial_speed,
            self.tick_rate,
        ]
        .iter()
        .all(|value| value.is_finite());

        let checks: [(bool, &'static str); 13] = [
            (finite, "every numeric value must be finite"),
            (
                self.world_width > 0.0 && self.world_height > 0.0,
                "world dimensions must be positive",
            ),
            (self.solver_passes > 0, "solver_passes must be at least 1"),
            (
                (0.0..=1.0).contains(&self.restitution),
                "restitution must lie in [0, 1]",
            ),
            (
                (0.0..=1.0).contains(&self.wall_restitution),
                "wall_restitution must lie in [0, 1]",
            ),
            (
                self.damping > 0.0 && self.damping <= 1.0,
                "damping must lie in (0, 1]",
            ),
            (self.max_velocity > 0.0, "max_velocity must be positive"),
            (self.blast_radius > 0.0, "blast_radius must be positive"),
            (self.epsilon > 0.0, "epsilon must be positive"),
            (self.max_flash_frames > 0, "max_flash_frames must be at least 1"),
            (
                self.min_radius > 0.0 && self.min_radius <= self.max_radius,
                "min_radius must lie in (0, max_radius]",
            ),
            (
                2.0 * self.max_radius <= self.world_width.min(self.world_height),
                "max_radius must fit twice into both world dimensions",
            ),
            (self.tick_rate > 0.0, "tick_rate must be positive"),
        ];

        match checks.into_iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(ConfigError::InvalidConfig(reason)),
            None => Ok(()),
        }
    }

    /// Whether a body of `radius` can sit inside the world without touching
    /// two opposite walls at once.
    pub fn fits_radius(&self, radius: f32) -> bool {
        2.0 * radius <= self.world_width && 2.0 * radius <= self.world_height
    }

    /// Length of one fixed tick in seconds.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "world_width": 1024.0, "solver_passes": 5 }"#).unwrap();

        assert_eq!(config.world_width, 1024.0);
        assert_eq!(config.solver_passes, 5);
        assert_eq!(config.world_height, SimConfig::DEFAULT_WORLD_HEIGHT);
        assert_eq!(config.max_flash_frames, SimConfig::DEFAULT_MAX_FLASH_FRAMES);
    }

    #[test]
    fn rejects_zero_passes() {
        let config = SimConfig {
            solver_passes: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_restitution_above_one() {
        let config = SimConfig {
            restitution: 1.5,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_max_radius_wider_than_the_world() {
        let config = SimConfig {
            world_width: 50.0,
            world_height: 50.0,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidConfig(
                "max_radius must fit twice into both world dimensions"
            ))
        );

        let narrow = SimConfig {
            world_width: 1000.0,
            world_height: 70.0,
            ..SimConfig::default()
        };
        assert!(narrow.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        let nan_gravity = SimConfig {
            gravity: f32::NAN,
            ..SimConfig::default()
        };
        assert_eq!(
            nan_gravity.validate(),
            Err(ConfigError::InvalidConfig("every numeric value must be finite"))
        );

        for config in [
            SimConfig {
                blast_force: f32::INFINITY,
                ..SimConfig::default()
            },
            SimConfig {
                self_impulse: f32::NAN,
                ..SimConfig::default()
            },
            SimConfig {
                flash_scale: f32::NEG_INFINITY,
                ..SimConfig::default()
            },
            SimConfig {
                mass_per_radius: f32::NAN,
                ..SimConfig::default()
            },
            SimConfig {
                world_width: f32::INFINITY,
                ..SimConfig::default()
            },
        ] {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn fits_radius_checks_both_dimensions() {
        let config = SimConfig {
            world_width: 100.0,
            world_height: 60.0,
            ..SimConfig::default()
        };
        assert!(config.fits_radius(30.0));
        assert!(!config.fits_radius(31.0));
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let config = SimConfig {
            min_radius: 50.0,
            max_radius: 10.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
