//! The particle field: all simulation state and the per-tick update.
//!
//! Nothing in here touches the DOM, so the whole update path runs natively
//! under `cargo test`. Rendering reads the field through `particles()` and
//! `link_alpha()`; it never mutates it.

use crate::color;
use crate::params::Params;
use crate::particle::Particle;
use rand::Rng;
use std::f64::consts::PI;
use vecmath::Vector2;

pub struct Field {
    width: f64,
    height: f64,
    /// Last known pointer position, canvas-relative; `None` while the
    /// pointer is off the canvas.
    pointer: Option<Vector2<f64>>,
    /// Repulsion radius, derived from the viewport on every resize.
    pointer_radius: f64,
    /// Insertion-ordered; the pair scan in the connection pass relies on a
    /// stable order within a frame.
    particles: Vec<Particle>,
    params: Params,
}

impl Field {
    pub fn new(params: Params) -> Field {
        debug_assert!(
            params.density > 0.0,
            "Params.density must be positive, got {}",
            params.density
        );
        Field {
            width: 0.0,
            height: 0.0,
            pointer: None,
            pointer_radius: 0.0,
            particles: Vec::new(),
            params,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn pointer_radius(&self) -> f64 {
        self.pointer_radius
    }

    /// Replaces the entire field for a `width` x `height` viewport. Safe to
    /// call repeatedly (e.g. on resize); nothing from the previous
    /// generation survives. A zero-area viewport yields an empty field.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.pointer_radius = (self.height / 60.0) * (self.width / 60.0);
        self.populate();
    }

    // Fewer particles for smaller areas
    fn populate(&mut self) {
        self.particles.clear();
        let count = (self.width * self.height / self.params.density).floor() as usize;
        self.particles.reserve(count);
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let size = rng.gen::<f64>() * (self.params.max_size - self.params.min_size)
                + self.params.min_size;
            // spawn a couple of radii clear of the walls where the viewport
            // has room for it
            let pos_x = spawn_coord(&mut rng, self.width, size * 2.0);
            let pos_y = spawn_coord(&mut rng, self.height, size * 2.0);
            let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * self.params.ambient_speed;
            let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * self.params.ambient_speed;
            let phase = rng.gen::<f64>() * 2.0 * PI;
            let color = color::PALETTE[(rng.gen::<f64>() * color::PALETTE.len() as f64) as usize];
            self.particles
                .push(Particle::new(pos_x, pos_y, vel_x, vel_y, size, phase, color));
        }
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Advances every particle by `dt` frame units (1.0 = one 60 Hz frame).
    ///
    /// Per particle, in order: wall bounce, damping, pulse, pointer
    /// repulsion, Euler position step. With the pointer absent and speeds
    /// at ambient, a particle moves by exactly `vel * dt`.
    pub fn step(&mut self, dt: f64) {
        for particle in &mut self.particles {
            // wall bounce: flip the offending component, magnitude untouched
            if particle.pos[0] > self.width || particle.pos[0] < 0.0 {
                particle.vel[0] = -particle.vel[0];
            }
            if particle.pos[1] > self.height || particle.pos[1] < 0.0 {
                particle.vel[1] = -particle.vel[1];
            }

            // injected sparks settle back toward ambient speed
            if particle.speed() > self.params.settle_speed {
                let decay = self.params.damping.powf(dt);
                particle.vel = vecmath::vec2_scale(particle.vel, decay);
            }

            particle.phase = (particle.phase + self.params.pulse_rate * dt) % (2.0 * PI);
            particle.size =
                (particle.base_size + self.params.pulse_amplitude * particle.phase.sin()).max(0.0);

            if let Some(pointer) = self.pointer {
                let away = vecmath::vec2_sub(particle.pos, pointer);
                let distance = vecmath::vec2_len(away);
                let reach = self.pointer_radius + particle.size;
                if self.pointer_radius > 0.0 && distance > 0.0 && distance < reach {
                    // push along the pointer->particle line, scaled by how
                    // deep into the radius the particle sits
                    let penetration =
                        ((self.pointer_radius - distance) / self.pointer_radius).max(0.0);
                    let push = vecmath::vec2_scale(
                        vecmath::vec2_normalized(away),
                        self.params.repulse_step * penetration * dt,
                    );
                    particle.pos = vecmath::vec2_add(particle.pos, push);
                }
            }

            particle.pos[0] += particle.vel[0] * dt;
            particle.pos[1] += particle.vel[1] * dt;
        }
    }

    /// Appends `count` sparks at `(x, y)` with a uniformly random heading
    /// and a speed in the configured burst range. The field never culls, so
    /// every burst grows it permanently.
    pub fn inject_burst(&mut self, x: f64, y: f64, count: u32) {
        let mut rng = rand::thread_rng();
        self.particles.reserve(count as usize);
        for _ in 0..count {
            let heading = rng.gen::<f64>() * 2.0 * PI;
            let speed = rng.gen::<f64>() * (self.params.burst_speed_max - self.params.burst_speed_min)
                + self.params.burst_speed_min;
            let size = rng.gen::<f64>() * (self.params.max_size - self.params.min_size)
                + self.params.min_size;
            let phase = rng.gen::<f64>() * 2.0 * PI;
            self.particles.push(Particle::new(
                x,
                y,
                heading.cos() * speed,
                heading.sin() * speed,
                size,
                phase,
                color::SPARK,
            ));
        }
    }

    /// How many sparks the next click should spawn.
    pub fn roll_burst_count(&self) -> u32 {
        let mut rng = rand::thread_rng();
        let spread = self.params.burst_count_max - self.params.burst_count_min + 1;
        self.params.burst_count_min + (rng.gen::<f64>() * spread as f64) as u32
    }

    /// Kicks existing particles away from a click point. Reach is a
    /// multiple of the pointer radius, so it scales with the viewport.
    pub fn shockwave(&mut self, x: f64, y: f64) {
        let reach = self.pointer_radius * self.params.shockwave_reach;
        for particle in &mut self.particles {
            let away = vecmath::vec2_sub(particle.pos, [x, y]);
            let distance = vecmath::vec2_len(away);
            if distance > 0.0 && distance < reach {
                let kick =
                    vecmath::vec2_scale(vecmath::vec2_normalized(away), self.params.shockwave_kick);
                particle.vel = vecmath::vec2_add(particle.vel, kick);
            }
        }
    }

    /// Squared-distance threshold for the connection pass.
    pub fn link_threshold_sq(&self) -> f64 {
        (self.width / self.params.link_cell) * (self.height / self.params.link_cell)
    }

    /// Opacity of the line between two particles, or `None` when they are
    /// too far apart or fully faded. Symmetric in its arguments.
    pub fn link_alpha(&self, a: &Particle, b: &Particle) -> Option<f64> {
        let dist_sq = vecmath::vec2_square_len(vecmath::vec2_sub(a.pos, b.pos));
        if dist_sq >= self.link_threshold_sq() {
            return None;
        }
        let alpha = 1.0 - dist_sq / self.params.link_fade;
        if alpha > 0.0 {
            Some(alpha.min(1.0))
        } else {
            None
        }
    }
}

fn spawn_coord<R: Rng>(rng: &mut R, extent: f64, margin: f64) -> f64 {
    let span = extent - margin * 2.0;
    if span > 0.0 {
        rng.gen::<f64>() * span + margin
    } else {
        rng.gen::<f64>() * extent
    }
}
