use crate::{config::SimConfig, store::BodyStore};

/// Flash length for a body hit at a given falloff in `(0, 1]`.
///
/// Rounded up so any body inside the blast flashes for at least one tick.
pub fn victim_flash_frames(config: &SimConfig, falloff: f32) -> u32 {
    (config.max_flash_frames as f32 * falloff).ceil() as u32
}

/// Radial impulse magnitude for a body of `mass` at `dist` from the source.
/// Zero at and beyond the blast radius.
pub fn radial_strength(config: &SimConfig, dist: f32, mass: f32) -> f32 {
    let falloff = 1.0 - dist / config.blast_radius;
    if falloff <= 0.0 {
        return 0.0;
    }
    config.blast_force * falloff / mass
}

/// Detonates the body at `source`.
///
/// The source is kicked upward, inversely to its own mass, with a small
/// horizontal jitter drawn from `rng`. Every other body inside the blast
/// radius is pushed straight away from the source with a linear falloff.
/// Impulses add to the current velocity; flash timers are overwritten.
///
/// Returns the number of bodies caught in the blast, the source excluded.
///
/// # Panics
///
/// Panics if `source` is not a valid index.
pub fn explode(
    store: &mut BodyStore,
    config: &SimConfig,
    source: usize,
    rng: &mut fastrand::Rng,
) -> usize {
    assert!(
        source < store.len(),
        "explosion source {source} out of range for {} bodies",
        store.len()
    );

    let bodies = store.as_mut_slice();

    let origin = {
        let body = &mut bodies[source];
        let jitter = (rng.f32() * 2.0 - 1.0) * config.explosion_jitter;
        body.vel.y -= config.self_impulse / body.mass;
        body.vel.x += jitter;
        body.flash_timer = config.max_flash_frames;
        body.pos
    };

    let min_dist_sq = config.epsilon;
    let blast_sq = config.blast_radius * config.blast_radius;
    let mut victims = 0;

    for (index, body) in bodies.iter_mut().enumerate() {
        if index == source {
            continue;
        }

        let d = body.pos - origin;
        let d_sq = d.mag_sq();
        if d_sq >= blast_sq || d_sq < min_dist_sq {
            continue;
        }

        let dist = d_sq.sqrt();
        let falloff = 1.0 - dist / config.blast_radius;

        body.vel += (d / dist) * radial_strength(config, dist, body.mass);
        body.flash_timer = victim_flash_frames(config, falloff);
        victims += 1;
    }

    victims
}
