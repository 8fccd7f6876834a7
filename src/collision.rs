use crate::{boundary, config::SimConfig, store::BodyStore};

/// Contact counts gathered over one solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Overlapping pairs resolved, summed over every pass.
    pub contacts: usize,
    /// Wall contacts, summed over every pass.
    pub wall_contacts: usize,
}

/// Runs the multi-pass solver.
///
/// Every pass sweeps all pairs and then re-applies the walls, because the
/// pairwise correction can push a body back out of the world. Only the first
/// pass exchanges impulses; later passes just remove leftover overlap.
pub fn solve(store: &mut BodyStore, config: &SimConfig) -> SolveStats {
    let mut stats = SolveStats::default();

    for pass in 0..config.solver_passes {
        stats.contacts += resolve_pairs(store, config, pass == 0);
        stats.wall_contacts += boundary::contain(store, config);
    }

    stats
}

/// Sweeps every pair `(i, j)` with `i < j` in ascending order and resolves
/// overlaps. Returns the number of overlapping pairs.
///
/// The order matters: corrections from earlier pairs are visible to later
/// ones, so clusters of three or more bodies depend on it.
pub fn resolve_pairs(store: &mut BodyStore, config: &SimConfig, apply_impulse: bool) -> usize {
    let n = store.len();
    let mut contacts = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            if resolve(store, i, j, config, apply_impulse) {
                contacts += 1;
            }
        }
    }

    contacts
}

/// Resolves a single pair. Returns `false` when the bodies do not overlap or
/// their centers coincide.
fn resolve(
    store: &mut BodyStore,
    i: usize,
    j: usize,
    config: &SimConfig,
    apply_impulse: bool,
) -> bool {
    let (b1, b2) = store.pair_mut(i, j);

    let d = b2.pos - b1.pos;
    let r = b1.radius + b2.radius;
    let d_sq = d.mag_sq();

    // Coincident centers have no usable normal.
    if d_sq >= r * r || d_sq < config.epsilon {
        return false;
    }

    let dist = d_sq.sqrt();
    let normal = d / dist;

    let m1 = b1.mass;
    let m2 = b2.mass;
    let total = m1 + m2;

    // The heavier body moves less.
    let overlap = r - dist;
    b1.pos -= normal * (overlap * m2 / total);
    b2.pos += normal * (overlap * m1 / total);

    if apply_impulse {
        let dvn = (b1.vel - b2.vel).dot(normal);

        // Separating pairs keep their velocities.
        if dvn > 0.0 {
            let impulse = (1.0 + config.restitution) * dvn / total;
            b1.vel -= normal * (impulse * m2);
            b2.vel += normal * (impulse * m1);
        }
    }

    true
}
