use crate::{config::SimConfig, error::ConfigError};

use palette::Srgb;
use ultraviolet::Vec2;

/// Construction-time description of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySpec {
    /// Collision and visual radius.
    pub radius: f32,
    /// Mass used by gravity, impulses and positional correction.
    pub mass: f32,
    /// Initial center, in world space.
    pub position: Vec2,
    /// Initial velocity, per tick.
    pub velocity: Vec2,
    /// Resting presentation color.
    pub base_color: Srgb<f32>,
}

impl BodySpec {
    /// Builds a spec whose mass grows linearly with its radius, so larger
    /// shapes are heavier and react less to the same impulse.
    pub fn with_derived_mass(
        radius: f32,
        mass_per_radius: f32,
        position: Vec2,
        velocity: Vec2,
        base_color: Srgb<f32>,
    ) -> Self {
        Self {
            radius,
            mass: radius * mass_per_radius,
            position,
            velocity,
            base_color,
        }
    }

    /// Rejects specs that would break the `radius > 0`, `mass > 0` invariants,
    /// or that cannot fit between two opposite walls of the configured world.
    pub fn validate(&self, index: usize, config: &SimConfig) -> Result<(), ConfigError> {
        let invalid = |reason| Err(ConfigError::InvalidBody { index, reason });

        if !(self.radius.is_finite() && self.radius > 0.0) {
            return invalid("radius must be finite and positive");
        }
        if !config.fits_radius(self.radius) {
            return invalid("diameter must fit inside the world");
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return invalid("mass must be finite and positive");
        }
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return invalid("position must be finite");
        }
        if !(self.velocity.x.is_finite() && self.velocity.y.is_finite()) {
            return invalid("velocity must be finite");
        }
        Ok(())
    }
}

/// A circular body owned by the [`crate::BodyStore`].
#[derive(Clone, Copy, Debug)]
pub struct Body {
    /// Center, in world space.
    pub pos: Vec2,
    /// Velocity, per tick.
    pub vel: Vec2,
    /// Mass of the body. Never changes after creation.
    pub mass: f32,
    /// Radius of the body. Never changes after creation.
    pub radius: f32,
    /// Ticks left in the current flash pulse. Zero means resting.
    pub flash_timer: u32,
    /// Resting presentation color.
    pub base_color: Srgb<f32>,
    /// Presentation color hint written by the feedback animator.
    pub color: Srgb<f32>,
    /// Presentation scale hint written by the feedback animator.
    pub scale: f32,
}

impl Body {
    /// Creates a resting body from a validated spec.
    pub fn new(spec: &BodySpec) -> Self {
        Self {
            pos: spec.position,
            vel: spec.velocity,
            mass: spec.mass,
            radius: spec.radius,
            flash_timer: 0,
            base_color: spec.base_color,
            color: spec.base_color,
            scale: 1.0,
        }
    }

    /// Whether a flash pulse is running.
    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0
    }

    /// Whether `point` lies inside the body's circle.
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.pos).mag_sq() <= self.radius * self.radius
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.mag_sq()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> BodySpec {
        BodySpec::with_derived_mass(
            20.0,
            0.05,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, -1.0),
            Srgb::new(0.2, 0.4, 0.8),
        )
    }

    #[test]
    fn derived_mass_is_linear_in_radius() {
        let small = spec();
        let large = BodySpec::with_derived_mass(
            40.0,
            0.05,
            small.position,
            small.velocity,
            small.base_color,
        );

        assert!((small.mass - 1.0).abs() < 1e-6);
        assert!((large.mass - 2.0 * small.mass).abs() < 1e-6);
    }

    #[test]
    fn new_body_rests_at_base_color() {
        let body = Body::new(&spec());

        assert_eq!(body.flash_timer, 0);
        assert_eq!(body.color, body.base_color);
        assert_eq!(body.scale, 1.0);
        assert!(!body.is_flashing());
    }

    #[test]
    fn rejects_non_positive_radius() {
        let bad = BodySpec {
            radius: 0.0,
            ..spec()
        };
        assert_eq!(
            bad.validate(3, &SimConfig::default()),
            Err(ConfigError::InvalidBody {
                index: 3,
                reason: "radius must be finite and positive"
            })
        );
    }

    #[test]
    fn rejects_nan_mass() {
        let bad = BodySpec {
            mass: f32::NAN,
            ..spec()
        };
        assert!(bad.validate(0, &SimConfig::default()).is_err());
    }

    #[test]
    fn rejects_body_wider_than_the_world() {
        let config = SimConfig {
            world_width: 100.0,
            world_height: 100.0,
            ..SimConfig::default()
        };
        let wide = BodySpec {
            radius: 60.0,
            position: Vec2::new(50.0, 50.0),
            ..spec()
        };
        assert_eq!(
            wide.validate(0, &config),
            Err(ConfigError::InvalidBody {
                index: 0,
                reason: "diameter must fit inside the world"
            })
        );

        let snug = BodySpec {
            radius: 50.0,
            position: Vec2::new(50.0, 50.0),
            ..spec()
        };
        assert_eq!(snug.validate(0, &config), Ok(()));
    }

    #[test]
    fn rejects_body_taller_than_the_world() {
        let config = SimConfig {
            world_width: 1000.0,
            world_height: 30.0,
            ..SimConfig::default()
        };
        assert!(spec().validate(1, &config).is_err());
    }

    #[test]
    fn contains_checks_the_circle() {
        let body = Body::new(&spec());
        assert!(body.contains(Vec2::new(110.0, 110.0)));
        assert!(!body.contains(Vec2::new(120.0, 120.0)));
    }
}
