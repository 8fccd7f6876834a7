use crate::{
    body::{Body, BodySpec},
    collision::{self, SolveStats},
    config::SimConfig,
    error::ConfigError,
    explosion, feedback, integrator,
    store::{BodyHandle, BodyStore},
    utils,
};

use log::{debug, info, trace, warn};
use palette::Srgb;
use ultraviolet::Vec2;

use std::collections::VecDeque;

/// Discrete input addressed to a single body, queued until the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyEvent {
    /// Detonate the body as an explosion source.
    Explode,
}

/// What the presentation layer needs to draw one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyView {
    pub position: Vec2,
    pub scale: f32,
    pub color: Srgb<f32>,
}

impl From<&Body> for BodyView {
    fn from(body: &Body) -> Self {
        Self {
            position: body.pos,
            scale: body.scale,
            color: body.color,
        }
    }
}

/// Owns the bodies and runs the fixed-order tick.
///
/// A tick is: drain queued events, integrate, solve
/// (`solver_passes` x pairwise + walls), then animate flashes. The population
/// is fixed once the simulation is built.
#[derive(Debug)]
pub struct Simulation {
    /// Number of ticks run so far.
    pub frame: usize,
    config: SimConfig,
    store: BodyStore,
    events: VecDeque<(BodyHandle, BodyEvent)>,
    rng: fastrand::Rng,
    /// Unspent time for [`Simulation::advance`], in seconds.
    accumulator: f32,
}

impl Simulation {
    /// Builds a simulation from explicit body specs.
    pub fn initialize(config: SimConfig, specs: Vec<BodySpec>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut store = BodyStore::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            spec.validate(index, &config)?;
            store.create(spec);
        }

        info!(
            "simulation initialized: {} bodies, {} solver passes, world {}x{}",
            store.len(),
            config.solver_passes,
            config.world_width,
            config.world_height
        );

        Ok(Self {
            frame: 0,
            rng: fastrand::Rng::with_seed(config.seed),
            config,
            store,
            events: VecDeque::new(),
            accumulator: 0.0,
        })
    }

    /// Builds a simulation with `n` randomized bodies seeded from `config.seed`.
    pub fn random(config: SimConfig, n: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        let specs = utils::random_bodies(n, &config, config.seed);
        Self::initialize(config, specs)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bodies(&self) -> &BodyStore {
        &self.store
    }

    pub fn body(&self, handle: BodyHandle) -> &Body {
        self.store.get(handle)
    }

    /// Write access for hosts that sync or nudge a body between ticks.
    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut Body {
        self.store.get_mut(handle)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Advances the simulation by exactly one tick.
    pub fn step(&mut self) -> SolveStats {
        self.apply_events();

        integrator::integrate(&mut self.store, &self.config);
        let stats = collision::solve(&mut self.store, &self.config);
        feedback::animate(&mut self.store, &self.config);

        self.frame += 1;
        trace!(
            "frame {}: {} contacts, {} wall contacts",
            self.frame,
            stats.contacts,
            stats.wall_contacts
        );

        stats
    }

    /// Runs as many fixed ticks as `elapsed` seconds cover, up to
    /// `max_ticks_per_advance`. Leftover time carries into the next call.
    /// Returns the number of ticks run.
    ///
    /// A non-finite `elapsed` is ignored so one bad frame delta cannot poison
    /// the accumulator.
    pub fn advance(&mut self, elapsed: f32) -> usize {
        if !elapsed.is_finite() {
            warn!("ignoring non-finite frame time {elapsed}");
            return 0;
        }

        let tick = self.config.tick_seconds();
        self.accumulator += elapsed.max(0.0);

        let mut ticks = 0;
        while self.accumulator >= tick && ticks < self.config.max_ticks_per_advance {
            self.step();
            self.accumulator -= tick;
            ticks += 1;
        }

        if self.accumulator >= tick {
            warn!(
                "dropping {:.3}s of simulation time after {} ticks",
                self.accumulator - self.accumulator % tick,
                ticks
            );
            self.accumulator %= tick;
        }

        ticks
    }

    /// Detonates the body at `index` right away. Returns the number of
    /// other bodies caught in the blast.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`Simulation::len`].
    pub fn explode(&mut self, index: usize) -> usize {
        let victims = explosion::explode(&mut self.store, &self.config, index, &mut self.rng);
        debug!("body {index} exploded, {victims} bodies caught in the blast");
        victims
    }

    /// Queues `event` for `handle`. Queued events are applied in order at the
    /// start of the next [`Simulation::step`].
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not belong to this simulation.
    pub fn dispatch(&mut self, handle: BodyHandle, event: BodyEvent) {
        assert!(
            self.store.contains(handle),
            "event target {} out of range for {} bodies",
            handle.index(),
            self.store.len()
        );
        self.events.push_back((handle, event));
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn apply_events(&mut self) {
        while let Some((handle, event)) = self.events.pop_front() {
            match event {
                BodyEvent::Explode => {
                    self.explode(handle.index());
                }
            }
        }
    }

    /// The body drawn on top at `point`, if any.
    pub fn pick(&self, point: Vec2) -> Option<BodyHandle> {
        self.store.pick(point)
    }

    /// Presentation view of every body, in handle order.
    pub fn snapshot(&self) -> Vec<BodyView> {
        let mut views = Vec::with_capacity(self.store.len());
        self.snapshot_into(&mut views);
        views
    }

    /// Like [`Simulation::snapshot`], reusing `views`.
    pub fn snapshot_into(&self, views: &mut Vec<BodyView>) {
        views.clear();
        views.extend(self.store.iter().map(BodyView::from));
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.store.iter().map(Body::kinetic_energy).sum()
    }
}
