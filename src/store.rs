use crate::body::{Body, BodySpec};

use ultraviolet::Vec2;

/// Stable index of a body inside its [`BodyStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-size arena of bodies.
///
/// Bodies live in one contiguous `Vec` and are addressed by index, so the
/// all-pairs resolver walks memory in order. Bodies are only added while a
/// simulation is being built; there is no removal.
#[derive(Clone, Debug, Default)]
pub struct BodyStore {
    bodies: Vec<Body>,
}

impl BodyStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
        }
    }

    /// Adds a body. Only used while a population is being built; a
    /// `Simulation` never exposes its store mutably.
    pub fn create(&mut self, spec: &BodySpec) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(Body::new(spec));
        handle
    }

    /// Panics if `handle` does not belong to this store.
    pub fn get(&self, handle: BodyHandle) -> &Body {
        &self.bodies[handle.0]
    }

    /// Panics if `handle` does not belong to this store.
    pub fn get_mut(&mut self, handle: BodyHandle) -> &mut Body {
        &mut self.bodies[handle.0]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        handle.0 < self.bodies.len()
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> {
        (0..self.bodies.len()).map(BodyHandle)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Body> {
        self.bodies.iter_mut()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Visits every body in index order.
    pub fn for_each(&mut self, mut f: impl FnMut(BodyHandle, &mut Body)) {
        for (index, body) in self.bodies.iter_mut().enumerate() {
            f(BodyHandle(index), body);
        }
    }

    /// Borrows two distinct bodies at once. Requires `i < j`.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Body, &mut Body) {
        debug_assert!(i < j, "pair_mut expects ascending indices");
        let (head, tail) = self.bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    }

    /// Finds the body drawn on top at `point`: the highest index whose circle
    /// contains it.
    pub fn pick(&self, point: Vec2) -> Option<BodyHandle> {
        self.bodies
            .iter()
            .rposition(|body| body.contains(point))
            .map(BodyHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    fn spec_at(x: f32, y: f32, radius: f32) -> BodySpec {
        BodySpec {
            radius,
            mass: 1.0,
            position: Vec2::new(x, y),
            velocity: Vec2::zero(),
            base_color: Srgb::new(1.0, 0.0, 0.0),
        }
    }

    #[test]
    fn handles_are_dense_indices() {
        let mut store = BodyStore::default();
        let a = store.create(&spec_at(0.0, 0.0, 1.0));
        let b = store.create(&spec_at(5.0, 0.0, 1.0));

        assert_eq!(a, BodyHandle(0));
        assert_eq!(b, BodyHandle(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b).pos, Vec2::new(5.0, 0.0));
        assert_eq!(store.handles().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn pair_mut_borrows_both_bodies() {
        let mut store = BodyStore::default();
        store.create(&spec_at(0.0, 0.0, 1.0));
        store.create(&spec_at(1.0, 0.0, 1.0));
        store.create(&spec_at(2.0, 0.0, 1.0));

        let (a, c) = store.pair_mut(0, 2);
        a.vel = Vec2::new(1.0, 0.0);
        c.vel = Vec2::new(-1.0, 0.0);

        assert_eq!(store.get(BodyHandle(0)).vel.x, 1.0);
        assert_eq!(store.get(BodyHandle(1)).vel.x, 0.0);
        assert_eq!(store.get(BodyHandle(2)).vel.x, -1.0);
    }

    #[test]
    fn for_each_visits_in_index_order() {
        let mut store = BodyStore::default();
        for x in [0.0, 10.0, 20.0] {
            store.create(&spec_at(x, 0.0, 1.0));
        }

        let mut seen = Vec::new();
        store.for_each(|handle, body| {
            body.flash_timer = handle.index() as u32 + 1;
            seen.push(handle);
        });

        assert_eq!(seen, vec![BodyHandle(0), BodyHandle(1), BodyHandle(2)]);
        assert_eq!(store.get(BodyHandle(2)).flash_timer, 3);
    }

    #[test]
    fn pick_prefers_the_topmost_body() {
        let mut store = BodyStore::default();
        store.create(&spec_at(10.0, 10.0, 10.0));
        store.create(&spec_at(15.0, 10.0, 10.0));

        assert_eq!(store.pick(Vec2::new(12.0, 10.0)), Some(BodyHandle(1)));
        assert_eq!(store.pick(Vec2::new(1.0, 10.0)), Some(BodyHandle(0)));
        assert_eq!(store.pick(Vec2::new(100.0, 100.0)), None);
    }

    #[test]
    #[should_panic]
    fn get_panics_on_foreign_handle() {
        let store = BodyStore::default();
        store.get(BodyHandle(0));
    }
}
