// Simple particle struct to keep track of individual position, velocity,
// size, pulse phase, and color

use crate::color::Color;

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    /// Size the pulse oscillates around; fixed at spawn.
    pub base_size: f64,
    /// Current drawn size, recomputed every tick from `base_size` and
    /// `phase`; never negative.
    pub size: f64,
    /// Drives pulsing size and twinkle opacity; advanced modulo 2*pi.
    pub phase: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(
        pos_x: f64,
        pos_y: f64,
        vel_x: f64,
        vel_y: f64,
        base_size: f64,
        phase: f64,
        color: Color,
    ) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            base_size,
            size: base_size,
            phase,
            color,
        }
    }

    pub fn speed(&self) -> f64 {
        vecmath::vec2_len(self.vel)
    }
}
