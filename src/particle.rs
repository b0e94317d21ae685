// Simple particle struct to keep track of individual position, velocity, and color.
// `rest_vel` is the drift the particle relaxes back to once nothing pushes it.

use crate::color::Color;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub rest_vel: Vector2<f64>,
    pub size: f64,
    pub opacity: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(
        pos: Vector2<f64>,
        rest_vel: Vector2<f64>,
        size: f64,
        opacity: f64,
        color: Color,
    ) -> Particle {
        Particle {
            pos,
            vel: rest_vel,
            rest_vel,
            size,
            opacity,
            color,
        }
    }

    /// Distance between the current and the rest velocity.
    pub fn drift_error(&self) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.vel, self.rest_vel))
    }
}
