use crate::{body::Body, config::SimConfig, store::BodyStore};

use rayon::prelude::*;
use ultraviolet::Vec2;

/// Advances a single body by one tick.
///
/// Gravity is scaled by mass, so heavier shapes fall faster. The velocity is
/// damped and clamped before it moves the body, which bounds the per-tick
/// displacement the discrete collision pass has to catch.
pub fn integrate_body(body: &mut Body, config: &SimConfig) {
    body.vel.y += config.gravity * body.mass;
    body.vel *= config.damping;

    let max = Vec2::broadcast(config.max_velocity);
    body.vel = body.vel.clamped(-max, max);

    body.pos += body.vel;
}

/// Integrates every body in the store.
pub fn integrate(store: &mut BodyStore, config: &SimConfig) {
    if config.use_rayon {
        store
            .as_mut_slice()
            .par_iter_mut()
            .for_each(|body| integrate_body(body, config));
    } else {
        store
            .iter_mut()
            .for_each(|body| integrate_body(body, config));
    }
}
