mod helpers;

use helpers::{init_logging, CountingSurface};
use portfolio_fx::{render_field, Color, FieldConfig, Particle, ParticleField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn populated(seed: u64, width: f64, height: f64) -> ParticleField {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut field = ParticleField::new(FieldConfig::default());
    field.populate(width, height, 1280.0, &mut rng);
    field
}

fn in_bounds(field: &ParticleField) -> bool {
    field.particles().iter().all(|p| {
        p.pos[0] >= 0.0 && p.pos[0] < field.width() && p.pos[1] >= 0.0 && p.pos[1] < field.height()
    })
}

#[test]
fn initial_positions_lie_inside_the_canvas() {
    init_logging();
    for seed in 0..5 {
        let field = populated(seed, 333.0, 127.0);
        assert_eq!(field.particles().len(), 200);
        assert!(in_bounds(&field));
    }
}

#[test]
fn positions_stay_in_bounds_while_stepping() {
    let mut field = populated(21, 200.0, 150.0);
    for tick in 0..2_000 {
        // sweep the pointer across the canvas to kick particles around
        let t = tick as f64;
        field.set_pointer((t * 3.7) % 200.0, (t * 1.3) % 150.0);
        field.step();
        assert!(in_bounds(&field), "out of bounds after tick {}", tick);
    }
}

#[test]
fn fast_particle_crossing_the_edge_wraps_in_the_same_tick() {
    let escaping = vec![
        Particle::new([99.9, 50.0], [0.25, 0.0], 1.0, 0.2, Color::YELLOW),
        Particle::new([0.1, 50.0], [-0.25, 0.0], 1.0, 0.2, Color::YELLOW),
        Particle::new([50.0, 0.05], [0.0, -0.25], 1.0, 0.2, Color::YELLOW),
    ];
    let mut field = ParticleField::with_particles(FieldConfig::default(), 100.0, 100.0, escaping);
    field.step();

    let p = field.particles();
    assert_eq!(p[0].pos[0], 0.0);
    assert!(p[1].pos[0] > 99.0 && p[1].pos[0] < 100.0);
    assert!(p[2].pos[1] > 99.0 && p[2].pos[1] < 100.0);
}

#[test]
fn velocity_relaxes_toward_drift_without_pointer() {
    let kicked = Particle {
        vel: [3.0, -2.0],
        ..Particle::new([50.0, 50.0], [0.1, 0.2], 1.0, 0.3, Color::PLASMA_VIOLET)
    };
    let mut field =
        ParticleField::with_particles(FieldConfig::default(), 500.0, 500.0, vec![kicked]);

    let mut last = field.particles()[0].drift_error();
    for _ in 0..500 {
        field.step();
        let err = field.particles()[0].drift_error();
        assert!(err < last, "drift error did not shrink: {} -> {}", last, err);
        last = err;
    }
    // 0.99^500 of the initial ~3.6 gap
    assert!(last < 0.03, "still {} away from rest velocity", last);
}

#[test]
fn populated_field_converges_to_rest_velocities() {
    let mut field = populated(8, 640.0, 480.0);
    field.set_pointer(320.0, 240.0);
    for _ in 0..30 {
        field.step();
    }
    field.clear_pointer();
    let start: f64 = field.particles().iter().map(|p| p.drift_error()).sum();
    for _ in 0..300 {
        field.step();
    }
    let end: f64 = field.particles().iter().map(|p| p.drift_error()).sum();
    assert!(start > 0.0);
    assert!(end < start * 0.1);
}

#[test]
fn nearby_pointer_pushes_particle_away() {
    let still = Particle::new([60.0, 40.0], [0.0, 0.0], 1.0, 0.3, Color::NEON_GREEN);
    let mut field =
        ParticleField::with_particles(FieldConfig::default(), 200.0, 200.0, vec![still]);
    field.set_pointer(30.0, 40.0);

    field.step();

    let p = field.particles()[0];
    // pointer is to the left, so the push points right
    assert!(p.vel[0] > 0.0);
    assert!(p.vel[1].abs() < 1e-12);
    // force (100 - 30) / 100 * 0.1, then one relaxation step
    assert!((p.vel[0] - 0.07 * 0.99).abs() < 1e-12);
    assert!(p.pos[0] > 60.0);
}

#[test]
fn repulsion_weakens_with_distance() {
    let make = |x: f64| Particle::new([x, 100.0], [0.0, 0.0], 1.0, 0.3, Color::NEON_GREEN);
    let particles = vec![make(110.0), make(180.0)];
    let mut field = ParticleField::with_particles(FieldConfig::default(), 400.0, 200.0, particles);
    field.set_pointer(100.0, 100.0);
    field.step();
    let p = field.particles();
    assert!(p[0].vel[0] > p[1].vel[0]);
    assert!(p[1].vel[0] > 0.0);
}

#[test]
fn draws_every_particle_each_frame() {
    let field = populated(3, 300.0, 300.0);
    let mut surface = CountingSurface::default();
    render_field(&field, &mut surface);
    assert_eq!(surface.clears, 1);
    assert_eq!(surface.circles, 200);
    assert_eq!(surface.lines, field.connections().count());
    assert!(surface.lines > 0);
}

#[test]
fn connections_cover_each_close_pair_once() {
    let field = populated(12, 250.0, 250.0);
    let radius = field.config().connection_radius;
    let p = field.particles();

    let mut expected = 0;
    for i in 0..p.len() {
        for j in i + 1..p.len() {
            let d = vecmath::vec2_len(vecmath::vec2_sub(p[i].pos, p[j].pos));
            if d < radius {
                expected += 1;
            }
        }
    }
    let lines: Vec<_> = field.connections().collect();
    assert_eq!(lines.len(), expected);
    assert!(lines.iter().all(|l| l.from_index < l.to_index));
    assert!(lines.iter().all(|l| l.opacity > 0.0 && l.opacity <= 0.1));
}

#[test]
fn mobile_viewport_gets_smaller_population() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut field = ParticleField::new(FieldConfig::default());
    field.populate(390.0, 844.0, 390.0, &mut rng);
    assert_eq!(field.particles().len(), 100);
    field.populate(1440.0, 900.0, 1440.0, &mut rng);
    assert_eq!(field.particles().len(), 200);
}
