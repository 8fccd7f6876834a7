use crate::{body::BodySpec, config::SimConfig};

use palette::{FromColor, Hsv, Srgb};
use ultraviolet::Vec2;

/// Hues the generated shapes are colored with, in degrees.
const HUES: [f32; 6] = [0.0, 35.0, 55.0, 140.0, 200.0, 280.0];

/// Generates `n` bodies scattered over the world.
/// - Radius is uniform in `[min_radius, max_radius]`, and mass follows the radius.
/// - Centers are placed so every body starts fully inside the world.
/// - Each velocity component is uniform in `[-initial_speed, initial_speed]`.
///
/// The same `seed` always yields the same bodies.
pub fn random_bodies(n: usize, config: &SimConfig, seed: u64) -> Vec<BodySpec> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut bodies = Vec::with_capacity(n);

    while bodies.len() < n {
        let radius = config.min_radius + rng.f32() * (config.max_radius - config.min_radius);

        // Random center, one radius away from every wall. A validated config
        // guarantees both spans are non-negative.
        let span_x = config.world_width - 2.0 * radius;
        let span_y = config.world_height - 2.0 * radius;
        let pos = Vec2::new(radius + rng.f32() * span_x, radius + rng.f32() * span_y);

        let speed = config.initial_speed;
        let vel = Vec2::new(
            (rng.f32() * 2.0 - 1.0) * speed,
            (rng.f32() * 2.0 - 1.0) * speed,
        );

        let hue = HUES[rng.usize(..HUES.len())];
        let color: Srgb<f32> = Srgb::from_color(Hsv::new(hue, 0.65, 0.9));

        bodies.push(BodySpec::with_derived_mass(
            radius,
            config.mass_per_radius,
            pos,
            vel,
            color,
        ));
    }

    bodies
}
