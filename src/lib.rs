//! Wasm backend for the "neural canvas" hero animation: a field of pulsing,
//! drifting particles joined by distance-faded lines, repelled by the
//! pointer and burst-seeded by clicks. The JS side only forwards DOM events
//! and sizes; simulation, rendering, and the frame loop live here.

mod color;
mod field;
mod params;
mod particle;
mod renderer;
mod utils;

pub use crate::color::Color;
pub use crate::field::Field;
pub use crate::params::{Params, Shape};
pub use crate::particle::Particle;

use crate::renderer::Renderer;
use crate::utils::Timer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

type FrameClosure = Closure<dyn FnMut(f64)>;

const FRAME_MS: f64 = 1000.0 / 60.0;
// clamp long stalls (background tabs) so particles don't teleport
const MAX_FRAME_UNITS: f64 = 3.0;

/// Converts rAF timestamps to 60 Hz frame units. The first frame after a
/// (re)start advances one unit; elapsed time is clamped to
/// `MAX_FRAME_UNITS` and never runs backward.
fn frame_units(last_ms: Option<f64>, now_ms: f64) -> f64 {
    match last_ms {
        Some(last) => ((now_ms - last) / FRAME_MS).max(0.0).min(MAX_FRAME_UNITS),
        None => 1.0,
    }
}

/// Field plus its renderer; everything one frame touches.
struct Scene {
    field: Field,
    renderer: Renderer,
    last_frame_ms: Option<f64>,
}

impl Scene {
    fn advance(&mut self, now_ms: f64) -> Result<(), JsValue> {
        let dt = frame_units(self.last_frame_ms, now_ms);
        self.last_frame_ms = Some(now_ms);
        self.field.step(dt);
        self.renderer.render(&self.field)
    }
}

/// One hero section's animation. Owns its canvas handle, particle field, and
/// the self-rescheduling frame loop; construct one per mounted section and
/// call `stop` (or let JS `free` it) before the section is torn down, so no
/// loop keeps running against a dead canvas.
#[wasm_bindgen]
pub struct NeuralCanvas {
    canvas: HtmlCanvasElement,
    scene: Rc<RefCell<Scene>>,
    /// Pending requestAnimationFrame id; `None` while stopped.
    frame_id: Rc<Cell<Option<i32>>>,
    /// Kept alive for as long as the loop runs; dropped on `stop`.
    frame_closure: Rc<RefCell<Option<FrameClosure>>>,
}

#[wasm_bindgen]
impl NeuralCanvas {
    /// Seeds a field sized to the canvas. Fails only if the canvas cannot
    /// hand out a 2d context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<NeuralCanvas, JsValue> {
        let renderer = Renderer::new(&canvas)?;
        let mut field = Field::new(Params::default());
        field.resize(canvas.width() as f64, canvas.height() as f64);
        Ok(NeuralCanvas {
            canvas,
            scene: Rc::new(RefCell::new(Scene {
                field,
                renderer,
                last_frame_ms: None,
            })),
            frame_id: Rc::new(Cell::new(None)),
            frame_closure: Rc::new(RefCell::new(None)),
        })
    }

    /// Starts the frame loop. Calling it while already running is a no-op.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.frame_id.get().is_some() {
            return Ok(());
        }
        let scene = Rc::clone(&self.scene);
        let frame_id = Rc::clone(&self.frame_id);
        let closure_cell = Rc::clone(&self.frame_closure);
        *self.frame_closure.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            if frame_id.get().is_none() {
                // stopped while this frame was already queued
                return;
            }
            if let Err(err) = scene.borrow_mut().advance(now_ms) {
                console::error_1(&err);
            }
            let next = match closure_cell.borrow().as_ref() {
                Some(callback) => request_animation_frame(callback),
                None => return,
            };
            match next {
                Ok(id) => frame_id.set(Some(id)),
                Err(err) => {
                    frame_id.set(None);
                    console::error_1(&err);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let borrowed = self.frame_closure.borrow();
        let callback = borrowed
            .as_ref()
            .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
        let id = request_animation_frame(callback)?;
        self.frame_id.set(Some(id));
        Ok(())
    }

    /// Cancels the pending frame and drops the loop closure. The field keeps
    /// its particles, so `start` resumes where the animation left off.
    pub fn stop(&self) {
        if let Some(id) = self.frame_id.take() {
            if let Ok(window) = window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.frame_closure.borrow_mut().take();
        self.scene.borrow_mut().last_frame_ms = None;
    }

    /// Resizes the canvas and re-seeds the field for the new viewport.
    /// Everything from the previous generation is replaced.
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let _timer = Timer::new("NeuralCanvas::resize");
        self.scene
            .borrow_mut()
            .field
            .resize(width as f64, height as f64);
    }

    pub fn pointer_moved(&self, x: f64, y: f64) {
        self.scene.borrow_mut().field.set_pointer(x, y);
    }

    pub fn pointer_left(&self) {
        self.scene.borrow_mut().field.clear_pointer();
    }

    /// Click or touch-start: shove nearby particles outward, then spawn a
    /// small burst of sparks at the point.
    pub fn pointer_pressed(&self, x: f64, y: f64) {
        let _timer = Timer::new("NeuralCanvas::pointer_pressed");
        let mut scene = self.scene.borrow_mut();
        scene.field.shockwave(x, y);
        let count = scene.field.roll_burst_count();
        scene.field.inject_burst(x, y, count);
    }

    pub fn particle_count(&self) -> usize {
        self.scene.borrow().field.len()
    }
}

impl Drop for NeuralCanvas {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::{frame_units, MAX_FRAME_UNITS};

    #[test]
    fn first_frame_advances_one_unit() {
        assert_eq!(frame_units(None, 123.4), 1.0);
    }

    #[test]
    fn steady_frames_map_to_elapsed_time() {
        let one = frame_units(Some(1000.0), 1000.0 + 1000.0 / 60.0);
        assert!((one - 1.0).abs() < 1e-9, "one frame gave {}", one);
        let two = frame_units(Some(1000.0), 1000.0 + 2000.0 / 60.0);
        assert!((two - 2.0).abs() < 1e-9, "two frames gave {}", two);
    }

    #[test]
    fn stalls_clamp_and_never_run_backward() {
        // a background tab can sit for seconds between frames
        assert_eq!(frame_units(Some(0.0), 10_000.0), MAX_FRAME_UNITS);
        assert_eq!(frame_units(Some(2000.0), 1000.0), 0.0);
    }
}
