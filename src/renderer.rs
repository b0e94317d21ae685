// Drawing side of the particle fields. The fields only know about the
// `Surface` trait; the wasm build implements it on a 2D canvas context and
// tests implement it with a recorder.

use vecmath::Vector2;

use crate::color::Color;
use crate::field::{AnchoredField, ParticleField};

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64);
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        alpha: f64,
        width: f64,
    );
}

/// Canvas backing-buffer size for a CSS size on a display with the given
/// device pixel ratio. Unusable ratios count as 1.
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let scaled = |css: f64| (css.max(0.0) * ratio).round() as u32;
    (scaled(css_width), scaled(css_height))
}

/// Clears the canvas, then draws every particle and every connection line.
pub fn render_field<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
    surface.clear(field.width(), field.height());

    for p in field.particles() {
        surface.fill_circle(p.pos, p.size, p.color, p.opacity);
    }

    let line_width = field.config().connection_line_width;
    for line in field.connections() {
        surface.stroke_line(line.from, line.to, line.color, line.opacity, line_width);
    }
}

/// Clears the canvas and draws every anchored point, fully opaque.
pub fn render_anchored<S: Surface + ?Sized>(field: &AnchoredField, surface: &mut S) {
    surface.clear(field.width(), field.height());

    for p in field.particles() {
        surface.fill_circle(p.pos, p.size, p.color, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{AnchoredConfig, AnchoredParticle, FieldConfig};
    use crate::particle::Particle;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(f64, f64),
        Circle(Vector2<f64>),
        Line(Vector2<f64>, Vector2<f64>),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, width: f64, height: f64) {
            self.ops.push(Op::Clear(width, height));
        }

        fn fill_circle(&mut self, center: Vector2<f64>, _radius: f64, _color: Color, _alpha: f64) {
            self.ops.push(Op::Circle(center));
        }

        fn stroke_line(
            &mut self,
            from: Vector2<f64>,
            to: Vector2<f64>,
            _color: Color,
            _alpha: f64,
            _width: f64,
        ) {
            self.ops.push(Op::Line(from, to));
        }
    }

    #[test]
    fn clears_then_draws_points_then_lines() {
        let particles = vec![
            Particle::new([10.0, 10.0], [0.0, 0.0], 1.0, 0.3, Color::NEON_GREEN),
            Particle::new([20.0, 10.0], [0.0, 0.0], 1.0, 0.3, Color::YELLOW),
        ];
        let field = ParticleField::with_particles(FieldConfig::default(), 320.0, 240.0, particles);
        let mut recorder = Recorder::default();

        render_field(&field, &mut recorder);

        assert_eq!(
            recorder.ops,
            vec![
                Op::Clear(320.0, 240.0),
                Op::Circle([10.0, 10.0]),
                Op::Circle([20.0, 10.0]),
                Op::Line([10.0, 10.0], [20.0, 10.0]),
            ]
        );
    }

    #[test]
    fn anchored_field_draws_points_only() {
        let particles = vec![
            AnchoredParticle::new([10.0, 10.0], 1.0, 5.0, Color::WHITE),
            AnchoredParticle::new([12.0, 10.0], 1.0, 5.0, Color::GREY),
        ];
        let field =
            AnchoredField::with_particles(AnchoredConfig::default(), 100.0, 50.0, particles);
        let mut recorder = Recorder::default();

        render_anchored(&field, &mut recorder);

        assert_eq!(
            recorder.ops,
            vec![Op::Clear(100.0, 50.0), Op::Circle([10.0, 10.0]), Op::Circle([12.0, 10.0])]
        );
    }

    #[test]
    fn backing_size_scales_by_pixel_ratio() {
        assert_eq!(backing_size(300.0, 150.0, 2.0), (600, 300));
        assert_eq!(backing_size(333.0, 100.0, 1.5), (500, 150));
        assert_eq!(backing_size(300.0, 150.0, 0.0), (300, 150));
        assert_eq!(backing_size(300.0, 150.0, f64::NAN), (300, 150));
        assert_eq!(backing_size(-5.0, 10.0, 2.0), (0, 20));
    }
}
