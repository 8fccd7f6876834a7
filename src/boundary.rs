use crate::{body::Body, config::SimConfig, store::BodyStore};

/// Keeps a body inside the world rectangle.
///
/// Each wall is checked on its own, so a body pushed into a corner bounces
/// off both walls in the same call. The perpendicular velocity component is
/// pointed away from the wall and scaled by the wall restitution.
///
/// Returns the number of walls the body touched.
pub fn contain_body(body: &mut Body, config: &SimConfig) -> usize {
    let r = body.radius;
    let bounce = config.wall_restitution;
    let mut hits = 0;

    if body.pos.x - r < 0.0 {
        body.pos.x = r;
        body.vel.x = body.vel.x.abs() * bounce;
        hits += 1;
    }
    if body.pos.x + r > config.world_width {
        body.pos.x = config.world_width - r;
        body.vel.x = -body.vel.x.abs() * bounce;
        hits += 1;
    }
    if body.pos.y - r < 0.0 {
        body.pos.y = r;
        body.vel.y = body.vel.y.abs() * bounce;
        hits += 1;
    }
    if body.pos.y + r > config.world_height {
        body.pos.y = config.world_height - r;
        body.vel.y = -body.vel.y.abs() * bounce;
        hits += 1;
    }

    hits
}

/// Runs [`contain_body`] over the whole store and returns the wall contacts.
pub fn contain(store: &mut BodyStore, config: &SimConfig) -> usize {
    store
        .iter_mut()
        .map(|body| contain_body(body, config))
        .sum()
}
