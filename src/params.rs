//! Tunable constants for the field, gathered in one struct so the four
//! themed hero variants become one renderer with different settings.

/// How a particle is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Diamond,
}

#[derive(Clone, Debug)]
pub struct Params {
    /// Viewport area (px^2) per particle; count = floor(w * h / density).
    /// Must be positive, or the count blows up; `Field::new` checks this in
    /// debug builds.
    pub density: f64,
    /// Base size range at spawn, px.
    pub min_size: f64,
    pub max_size: f64,
    /// Per-axis ambient velocity bound at spawn, px per frame.
    pub ambient_speed: f64,
    /// Phase advance per frame, radians.
    pub pulse_rate: f64,
    /// Size oscillation around the base size, px.
    pub pulse_amplitude: f64,
    /// Damping kicks in above this speed so sparks settle back to ambient.
    pub settle_speed: f64,
    /// Multiplicative velocity decay per frame while above `settle_speed`.
    pub damping: f64,
    /// Max pointer-repulsion displacement per frame, px.
    pub repulse_step: f64,
    /// Spark speed range for click bursts, px per frame.
    pub burst_speed_min: f64,
    pub burst_speed_max: f64,
    /// How many sparks a click spawns.
    pub burst_count_min: u32,
    pub burst_count_max: u32,
    /// Velocity impulse a click gives nearby particles, px per frame.
    pub shockwave_kick: f64,
    /// Shockwave reach as a multiple of the pointer radius.
    pub shockwave_reach: f64,
    /// Squared-distance divisor for line opacity falloff.
    pub link_fade: f64,
    /// Viewport divisor for the link threshold: d^2 < (w/cell) * (h/cell).
    pub link_cell: f64,
    pub glow: bool,
    pub glow_blur: f64,
    pub shape: Shape,
}

impl Default for Params {
    fn default() -> Params {
        Params {
            density: 9000.0,
            min_size: 1.0,
            max_size: 3.5,
            ambient_speed: 0.5,
            pulse_rate: 0.05,
            pulse_amplitude: 0.5,
            settle_speed: 0.8,
            damping: 0.96,
            repulse_step: 2.0,
            burst_speed_min: 0.5,
            burst_speed_max: 2.8,
            burst_count_min: 5,
            burst_count_max: 8,
            shockwave_kick: 5.0,
            shockwave_reach: 3.0,
            link_fade: 18000.0,
            link_cell: 7.0,
            glow: true,
            glow_blur: 10.0,
            shape: Shape::Circle,
        }
    }
}
