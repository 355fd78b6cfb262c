// Canvas2D renderer for the field: glowing circles (or diamonds) for the
// particles, then distance-faded lines for the plexus connections.

use crate::field::Field;
use crate::params::{Params, Shape};
use crate::particle::Particle;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    // Grabs the 2d context from the canvas on the DOM
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Renderer, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Renderer { context })
    }

    /// Paints one frame: clear, particles, connection lines.
    pub fn render(&self, field: &Field) -> Result<(), JsValue> {
        self.context
            .clear_rect(0.0, 0.0, field.width(), field.height());
        for particle in field.particles() {
            self.draw_particle(particle, field.params())?;
        }
        self.draw_links(field);
        Ok(())
    }

    fn draw_particle(&self, particle: &Particle, params: &Params) -> Result<(), JsValue> {
        // twinkle: same phase that drives the size pulse
        let twinkle = 0.55 + 0.45 * particle.phase.sin();
        self.context.begin_path();
        match params.shape {
            Shape::Circle => {
                self.context
                    .arc(particle.pos[0], particle.pos[1], particle.size, 0.0, 2.0 * PI)?;
            }
            Shape::Diamond => {
                let [x, y] = particle.pos;
                let s = particle.size;
                self.context.move_to(x, y - s);
                self.context.line_to(x + s, y);
                self.context.line_to(x, y + s);
                self.context.line_to(x - s, y);
                self.context.close_path();
            }
        }
        self.context
            .set_fill_style(&JsValue::from_str(&particle.color.to_css(twinkle)));
        if params.glow {
            // soft halo in the particle's own color
            self.context.set_shadow_blur(params.glow_blur);
            self.context.set_shadow_color(&particle.color.to_css(1.0));
        }
        self.context.fill();
        if params.glow {
            self.context.set_shadow_blur(0.0);
        }
        Ok(())
    }

    // O(n^2) pair scan; fine at the densities a hero section produces.
    // Starting `b` past `a` skips the self-pair, which draws nothing anyway.
    fn draw_links(&self, field: &Field) {
        let particles = field.particles();
        self.context.set_line_width(1.0);
        for a in 0..particles.len() {
            for b in (a + 1)..particles.len() {
                if let Some(alpha) = field.link_alpha(&particles[a], &particles[b]) {
                    // line inherits the color of its first endpoint
                    self.context
                        .set_stroke_style(&JsValue::from_str(&particles[a].color.to_css(alpha)));
                    self.context.begin_path();
                    self.context
                        .move_to(particles[a].pos[0], particles[a].pos[1]);
                    self.context
                        .line_to(particles[b].pos[0], particles[b].pos[1]);
                    self.context.stroke();
                }
            }
        }
    }
}
