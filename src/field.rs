//! Ambient particle fields.
//!
//! `ParticleField` is a population of slowly drifting points that get pushed
//! away from the pointer and relax back to their drift afterwards.
//! `AnchoredField` pins every point to a home position it springs back to
//! once the pointer moves on.
//!
//! The field owns all of its state (particles, canvas size, pointer), so any
//! number of fields can run side by side. Nothing here touches the browser;
//! the component layer feeds it sizes and pointer positions and hands it a
//! surface to draw on.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

use crate::color::{default_palette, grey_palette, Color};
use crate::host::Listener;
use crate::particle::Particle;
use crate::renderer::{render_anchored, render_field, Surface};

/// What a `FieldComponent` needs from the simulation it drives.
pub trait Simulation {
    /// Replaces the population for a canvas of `width` x `height` CSS pixels.
    fn populate<R: Rng + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        viewport_width: f64,
        rng: &mut R,
    );
    fn set_pointer(&mut self, x: f64, y: f64);
    fn clear_pointer(&mut self);
    fn step(&mut self);
    fn render<S: Surface + ?Sized>(&self, surface: &mut S);
    fn particle_count(&self) -> usize;

    /// Pointer events worth subscribing to when interactive.
    fn pointer_listeners(&self) -> &'static [Listener] {
        &Listener::POINTER
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Viewports narrower than this get the mobile population.
    pub mobile_breakpoint: f64,
    pub mobile_particle_count: usize,
    pub desktop_particle_count: usize,
    /// Rest velocity components are drawn from `[-max_drift_speed, max_drift_speed)`.
    pub max_drift_speed: f64,
    pub size_min: f64,
    pub size_range: f64,
    pub opacity_min: f64,
    pub opacity_range: f64,
    pub interaction_radius: f64,
    pub repulsion_strength: f64,
    /// Fraction of the gap to the rest velocity closed every frame.
    pub relaxation: f64,
    pub connection_radius: f64,
    pub connection_max_opacity: f64,
    pub connection_line_width: f64,
    pub palette: Vec<Color>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            mobile_breakpoint: 768.0,
            mobile_particle_count: 100,
            desktop_particle_count: 200,
            max_drift_speed: 0.25,
            size_min: 0.5,
            size_range: 2.0,
            opacity_min: 0.1,
            opacity_range: 0.3,
            interaction_radius: 100.0,
            repulsion_strength: 0.1,
            relaxation: 0.01,
            connection_radius: 100.0,
            connection_max_opacity: 0.1,
            connection_line_width: 0.5,
            palette: default_palette(),
        }
    }
}

impl FieldConfig {
    pub fn particle_count_for(&self, viewport_width: f64) -> usize {
        if viewport_width < self.mobile_breakpoint {
            self.mobile_particle_count
        } else {
            self.desktop_particle_count
        }
    }
}

/// A line between two particles close enough to each other.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from_index: usize,
    pub to_index: usize,
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub color: Color,
    pub opacity: f64,
}

pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<Vector2<f64>>,
    generation: u64,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> ParticleField {
        ParticleField {
            config,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
            generation: 0,
        }
    }

    /// Builds a field around a hand-placed population.
    pub fn with_particles(
        config: FieldConfig,
        width: f64,
        height: f64,
        particles: Vec<Particle>,
    ) -> ParticleField {
        ParticleField {
            config,
            width,
            height,
            particles,
            pointer: None,
            generation: 1,
        }
    }

    /// Replaces the whole population for a canvas of `width` x `height`.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        viewport_width: f64,
        rng: &mut R,
    ) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.generation += 1;

        let count = if self.width > 0.0 && self.height > 0.0 {
            self.config.particle_count_for(viewport_width)
        } else {
            0
        };

        let cfg = &self.config;
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = [rng.gen::<f64>() * self.width, rng.gen::<f64>() * self.height];
            let rest_vel = [
                (rng.gen::<f64>() - 0.5) * 2.0 * cfg.max_drift_speed,
                (rng.gen::<f64>() - 0.5) * 2.0 * cfg.max_drift_speed,
            ];
            let size = rng.gen::<f64>() * cfg.size_range + cfg.size_min;
            let opacity = rng.gen::<f64>() * cfg.opacity_range + cfg.opacity_min;
            let color = match cfg.palette.choose(rng) {
                Some(color) => *color,
                None => Color::rgb(255, 255, 255),
            };
            particles.push(Particle::new(pos, rest_vel, size, opacity, color));
        }
        self.particles = particles;

        debug!(
            "populated {} particles on {}x{} canvas (generation {})",
            count, self.width, self.height, self.generation
        );
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Advances the simulation by one frame.
    pub fn step(&mut self) {
        let cfg = &self.config;
        let pointer = self.pointer;
        let (width, height) = (self.width, self.height);

        for particle in &mut self.particles {
            if let Some(pointer) = pointer {
                let away = vec2_sub(particle.pos, pointer);
                let distance = vec2_len(away);
                // zero distance has no direction to push along
                if distance > 0.0 && distance < cfg.interaction_radius {
                    let force = (cfg.interaction_radius - distance) / cfg.interaction_radius;
                    let push = vec2_scale(away, force * cfg.repulsion_strength / distance);
                    particle.vel = vec2_add(particle.vel, push);
                }
            }

            let to_rest = vec2_sub(particle.rest_vel, particle.vel);
            particle.vel = vec2_add(particle.vel, vec2_scale(to_rest, cfg.relaxation));

            particle.pos = vec2_add(particle.pos, particle.vel);
            particle.pos[0] = wrap(particle.pos[0], width);
            particle.pos[1] = wrap(particle.pos[1], height);
        }
    }

    /// Every pair closer than the connection radius, each pair once.
    ///
    /// Brute force over all pairs. Fine for the few hundred particles a page
    /// background uses; a bigger field wants a spatial grid here.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let radius = self.config.connection_radius;
        let max_opacity = self.config.connection_max_opacity;
        let particles = &self.particles;

        particles.iter().enumerate().flat_map(move |(i, a)| {
            particles[i + 1..].iter().enumerate().filter_map(move |(offset, b)| {
                let distance = vec2_len(vec2_sub(a.pos, b.pos));
                if distance < radius {
                    Some(Connection {
                        from_index: i,
                        to_index: i + 1 + offset,
                        from: a.pos,
                        to: b.pos,
                        color: a.color,
                        opacity: (radius - distance) / radius * max_opacity,
                    })
                } else {
                    None
                }
            })
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Bumped on every re-population.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Simulation for ParticleField {
    fn populate<R: Rng + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        viewport_width: f64,
        rng: &mut R,
    ) {
        ParticleField::populate(self, width, height, viewport_width, rng)
    }

    fn set_pointer(&mut self, x: f64, y: f64) {
        ParticleField::set_pointer(self, x, y)
    }

    fn clear_pointer(&mut self) {
        ParticleField::clear_pointer(self)
    }

    fn step(&mut self) {
        ParticleField::step(self)
    }

    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render_field(self, surface)
    }

    fn particle_count(&self) -> usize {
        self.particles.len()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnchoredConfig {
    /// Viewports this wide or narrower get the mobile population.
    pub mobile_breakpoint: f64,
    pub mobile_particle_count: usize,
    pub desktop_particle_count: usize,
    pub size_min: f64,
    pub size_range: f64,
    /// Per-particle displacement weight drawn from `[density_min, density_min + density_range)`.
    pub density_min: f64,
    pub density_range: f64,
    pub interaction_radius: f64,
    pub displacement_scale: f64,
    /// Fraction of the way home covered each frame outside the radius.
    pub home_pull: f64,
    pub palette: Vec<Color>,
}

impl Default for AnchoredConfig {
    fn default() -> Self {
        AnchoredConfig {
            mobile_breakpoint: 768.0,
            mobile_particle_count: 30,
            desktop_particle_count: 50,
            size_min: 0.5,
            size_range: 1.5,
            density_min: 1.0,
            density_range: 30.0,
            interaction_radius: 50.0,
            displacement_scale: 0.1,
            home_pull: 1.0 / 20.0,
            palette: grey_palette(),
        }
    }
}

impl AnchoredConfig {
    pub fn particle_count_for(&self, viewport_width: f64) -> usize {
        if viewport_width <= self.mobile_breakpoint {
            self.mobile_particle_count
        } else {
            self.desktop_particle_count
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchoredParticle {
    pub pos: Vector2<f64>,
    pub home: Vector2<f64>,
    pub size: f64,
    pub density: f64,
    pub color: Color,
}

impl AnchoredParticle {
    pub fn new(home: Vector2<f64>, size: f64, density: f64, color: Color) -> AnchoredParticle {
        AnchoredParticle {
            pos: home,
            home,
            size,
            density,
            color,
        }
    }

    pub fn distance_from_home(&self) -> f64 {
        vec2_len(vec2_sub(self.pos, self.home))
    }
}

/// Points pinned to a home position. The pointer shoves nearby points away,
/// heavier (denser) points further; everything else eases back home.
pub struct AnchoredField {
    config: AnchoredConfig,
    width: f64,
    height: f64,
    particles: Vec<AnchoredParticle>,
    pointer: Option<Vector2<f64>>,
}

impl AnchoredField {
    pub fn new(config: AnchoredConfig) -> AnchoredField {
        AnchoredField {
            config,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
        }
    }

    pub fn with_particles(
        config: AnchoredConfig,
        width: f64,
        height: f64,
        particles: Vec<AnchoredParticle>,
    ) -> AnchoredField {
        AnchoredField {
            config,
            width,
            height,
            particles,
            pointer: None,
        }
    }

    pub fn particles(&self) -> &[AnchoredParticle] {
        &self.particles
    }

    pub fn pointer(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    pub fn config(&self) -> &AnchoredConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Simulation for AnchoredField {
    fn populate<R: Rng + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        viewport_width: f64,
        rng: &mut R,
    ) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        let count = if self.width > 0.0 && self.height > 0.0 {
            self.config.particle_count_for(viewport_width)
        } else {
            0
        };

        let cfg = &self.config;
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let home = [rng.gen::<f64>() * self.width, rng.gen::<f64>() * self.height];
            let size = rng.gen::<f64>() * cfg.size_range + cfg.size_min;
            let density = rng.gen::<f64>() * cfg.density_range + cfg.density_min;
            let color = match cfg.palette.choose(rng) {
                Some(color) => *color,
                None => Color::WHITE,
            };
            particles.push(AnchoredParticle::new(home, size, density, color));
        }
        self.particles = particles;

        debug!("anchored {} particles on {}x{} canvas", count, self.width, self.height);
    }

    fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    fn step(&mut self) {
        let cfg = &self.config;
        let pointer = self.pointer;

        for particle in &mut self.particles {
            let near = pointer.and_then(|pointer| {
                let away = vec2_sub(particle.pos, pointer);
                let distance = vec2_len(away);
                if distance < cfg.interaction_radius {
                    Some((away, distance))
                } else {
                    None
                }
            });

            match near {
                Some((away, distance)) => {
                    // sitting on the pointer: no direction to shove along
                    if distance > 0.0 {
                        let force = (cfg.interaction_radius - distance) / cfg.interaction_radius;
                        let shove = force * particle.density * cfg.displacement_scale / distance;
                        particle.pos = vec2_add(particle.pos, vec2_scale(away, shove));
                    }
                }
                None => {
                    let to_home = vec2_sub(particle.home, particle.pos);
                    particle.pos = vec2_add(particle.pos, vec2_scale(to_home, cfg.home_pull));
                }
            }
        }
    }

    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render_anchored(self, surface)
    }

    fn particle_count(&self) -> usize {
        self.particles.len()
    }

    fn pointer_listeners(&self) -> &'static [Listener] {
        &Listener::MOUSE
    }
}

// Toroidal wrap into [0, extent)
fn wrap(coord: f64, extent: f64) -> f64 {
    if extent <= 0.0 || coord >= extent {
        return 0.0;
    }
    if coord >= 0.0 {
        return coord;
    }
    let wrapped = coord.rem_euclid(extent);
    if wrapped >= extent {
        // tiny negatives round up to the extent itself
        extent * (1.0 - f64::EPSILON)
    } else {
        wrapped
    }
}
