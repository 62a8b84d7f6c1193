//! Falling confetti shown while a winner is announced.

use crate::event::{EventHandler, WheelEvent};
use crate::palette::DEFAULT_COLORS;
use egui::emath::Rot2;
use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Particles released at once when a winner is announced
pub const BURST_SIZE: usize = 150;
/// No trickle particles are added beyond this count
pub const MAX_PARTICLES: usize = 200;
/// New particles per second while active
const TRICKLE_PER_SEC: f32 = 18.0;
/// Height above the bottom edge where particles start to fade
const FADE_BAND: f32 = 100.0;
const FADE_PER_SEC: f32 = 1.2;
/// Particles spawn and are culled this far outside the bounds
const EDGE_MARGIN: f32 = 20.0;
const MAX_STEP_SECS: f32 = 0.1;
const COLOR_COUNT: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Pos2,
    pub opacity: f32,
    velocity: Vec2,
    size: f32,
    color: Color32,
    rotation_deg: f32,
    spin_deg_per_sec: f32,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Rect) -> Self {
        Self {
            pos: Pos2::new(
                bounds.min.x + rng.gen_range(0.0..=1.0) * bounds.width().max(0.0),
                bounds.min.y - EDGE_MARGIN,
            ),
            opacity: 1.0,
            velocity: Vec2::new(rng.gen_range(-120.0..120.0), rng.gen_range(120.0..300.0)),
            size: rng.gen_range(4.0..12.0),
            color: DEFAULT_COLORS[rng.gen_range(0..COLOR_COUNT)],
            rotation_deg: rng.gen_range(0.0..360.0),
            spin_deg_per_sec: rng.gen_range(-300.0..300.0),
        }
    }

    fn step(&mut self, dt: f32, bounds: Rect) {
        self.pos += self.velocity * dt;
        self.rotation_deg += self.spin_deg_per_sec * dt;
        if self.pos.y > bounds.max.y - FADE_BAND {
            self.opacity -= FADE_PER_SEC * dt;
        }
    }

    fn is_alive(&self, bounds: Rect) -> bool {
        self.opacity > 0.0 && self.pos.y < bounds.max.y + EDGE_MARGIN
    }

    fn shape(&self) -> Shape {
        let rot = Rot2::from_angle(self.rotation_deg.to_radians());
        let half = self.size / 2.0;
        let corners = [(-half, -half), (half, -half), (half, half), (-half, half)]
            .map(|(x, y)| self.pos + rot * Vec2::new(x, y))
            .to_vec();
        Shape::convex_polygon(
            corners,
            self.color.gamma_multiply(self.opacity.clamp(0.0, 1.0)),
            Stroke::NONE,
        )
    }
}

#[derive(Debug)]
pub struct Confetti {
    particles: Vec<Particle>,
    active: bool,
    pending_burst: bool,
    trickle: f32,
    rng: StdRng,
}

impl Default for Confetti {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            active: false,
            pending_burst: false,
            trickle: 0.0,
            rng,
        }
    }

    /// Queues a burst for the next update
    pub fn start(&mut self) {
        self.active = true;
        self.pending_burst = true;
    }

    /// Removes every particle at once
    pub fn stop(&mut self) {
        self.active = false;
        self.pending_burst = false;
        self.trickle = 0.0;
        self.particles.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Moves particles by `dt` seconds inside `bounds`. Returns true while
    /// anything is left to draw.
    pub fn update(&mut self, dt: f32, bounds: Rect) -> bool {
        if !self.active {
            return false;
        }
        let dt = dt.clamp(0.0, MAX_STEP_SECS);

        if std::mem::take(&mut self.pending_burst) {
            for _ in 0..BURST_SIZE {
                let particle = Particle::spawn(&mut self.rng, bounds);
                self.particles.push(particle);
            }
        }

        for particle in &mut self.particles {
            particle.step(dt, bounds);
        }
        self.particles.retain(|particle| particle.is_alive(bounds));

        self.trickle += TRICKLE_PER_SEC * dt;
        while self.trickle >= 1.0 {
            self.trickle -= 1.0;
            if self.particles.len() < MAX_PARTICLES {
                let particle = Particle::spawn(&mut self.rng, bounds);
                self.particles.push(particle);
            }
        }

        !self.particles.is_empty()
    }

    pub fn paint(&self, painter: &Painter) {
        painter.extend(self.particles.iter().map(Particle::shape));
    }
}

impl EventHandler for Confetti {
    fn handle_event(&mut self, event: &WheelEvent) {
        match event {
            WheelEvent::Winner { .. } => self.start(),
            WheelEvent::SpinStarted { .. } => self.stop(),
            WheelEvent::SegmentTick { .. } => {}
        }
    }
}
