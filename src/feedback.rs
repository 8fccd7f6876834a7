use crate::{body::Body, config::SimConfig, store::BodyStore};

use palette::{Mix, Srgb};
use rayon::prelude::*;

const WHITE: Srgb<f32> = Srgb::new(1.0, 1.0, 1.0);

/// Presentation hints for a body at flash intensity `t` in `[0, 1]`.
///
/// The color is blended toward white and the scale follows `1 + k * t^2`,
/// a punch that collapses quickly toward the end of the pulse. At `t = 0`
/// both hints equal the resting values exactly.
pub fn flash_hints(base: Srgb<f32>, t: f32, flash_scale: f32) -> (Srgb<f32>, f32) {
    (base.mix(WHITE, t), 1.0 + flash_scale * t * t)
}

/// Ticks a single body's flash pulse. Resting bodies are left alone.
pub fn animate_body(body: &mut Body, config: &SimConfig) {
    if body.flash_timer == 0 {
        return;
    }

    body.flash_timer -= 1;
    let t = body.flash_timer as f32 / config.max_flash_frames as f32;
    let (color, scale) = flash_hints(body.base_color, t, config.flash_scale);
    body.color = color;
    body.scale = scale;
}

/// Ticks every flash pulse in the store. Only presentation hints are written.
pub fn animate(store: &mut BodyStore, config: &SimConfig) {
    if config.use_rayon {
        store
            .as_mut_slice()
            .par_iter_mut()
            .for_each(|body| animate_body(body, config));
    } else {
        store.iter_mut().for_each(|body| animate_body(body, config));
    }
}
