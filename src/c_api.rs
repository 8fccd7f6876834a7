use crate::{
    config::SimConfig,
    simulation::{BodyEvent, BodyView, Simulation},
};

use bytemuck::{AnyBitPattern, NoUninit};
use ultraviolet::Vec2;

/// Flat per-body record handed to hosts: `[x, y, scale, r, g, b]`.
#[derive(Clone, Copy, Debug, NoUninit, AnyBitPattern)]
#[repr(C)]
pub struct RawBodyView {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RawBodyView {
    pub const FLOATS: usize = 6;
}

impl From<BodyView> for RawBodyView {
    fn from(view: BodyView) -> Self {
        Self {
            x: view.position.x,
            y: view.position.y,
            scale: view.scale,
            r: view.color.red,
            g: view.color.green,
            b: view.color.blue,
        }
    }
}

/// Creates a simulation of `n` random bodies with the default configuration.
/// Returns null if the simulation cannot be built.
#[unsafe(no_mangle)]
pub extern "C" fn Simulation_Create(n: usize, seed: u64) -> *mut Simulation {
    let config = SimConfig {
        seed,
        ..SimConfig::default()
    };
    match Simulation::random(config, n) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            log::error!("Simulation_Create failed: {err}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.step();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.len())
}

/// Detonates body `index` immediately. Aborts on an out-of-range index.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Explode(handle: *mut Simulation, index: usize) -> usize {
    unsafe { handle.as_mut() }.map_or(0, |sim| sim.explode(index))
}

/// Queues an explosion for the body under the world point `(x, y)`.
/// Returns its index, or -1 if nothing is there.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_ExplodeAt(handle: *mut Simulation, x: f32, y: f32) -> i64 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };

    match sim.pick(Vec2::new(x, y)) {
        Some(target) => {
            sim.dispatch(target, BodyEvent::Explode);
            target.index() as i64
        }
        None => -1,
    }
}

/// Copies up to `len / 6` body records into `out`.
/// Returns the number of bodies written.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CopySnapshot(
    handle: *const Simulation,
    out: *mut f32,
    len: usize,
) -> usize {
    let Some(sim) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    if out.is_null() {
        return 0;
    }

    let out = unsafe { std::slice::from_raw_parts_mut(out, len) };
    copy_snapshot(sim, out)
}

fn copy_snapshot(sim: &Simulation, out: &mut [f32]) -> usize {
    let count = sim.len().min(out.len() / RawBodyView::FLOATS);
    let raw: Vec<RawBodyView> = sim
        .snapshot()
        .into_iter()
        .take(count)
        .map(RawBodyView::from)
        .collect();

    let floats: &[f32] = bytemuck::cast_slice(&raw);
    out[..floats.len()].copy_from_slice(floats);
    count
}
