use std::f32::consts::{PI, TAU};

use egui::ecolor::Hsva;
use egui::{Color32, Pos2, Vec2};
use rand::Rng;

use crate::canvas::Canvas;
use crate::noise::NoiseField;

pub const MAX_SPEED: f32 = 3.0;
pub const JITTER: f32 = 0.25;
const NOISE_SCALE: f32 = 0.01;
const ALPHA_SPAN: f32 = 70.0;
const ALPHA_FLOOR: f32 = 50.0;
const OUTLINE_PAD: f32 = 1.5;

/// Per-particle constants rolled once at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleTraits {
    pub lifespan: u32,
    pub decay: f32,
    pub color: Color32,
    pub weight_range: f32,
}

impl ParticleTraits {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hue = rng.random_range(0.0..1.0);
        let saturation = rng.random_range(0.0..1.0);
        Self {
            lifespan: rng.random_range(30..90),
            decay: rng.random_range(0.75..0.9),
            color: Hsva::new(hue, saturation, 1.0, 1.0).into(),
            weight_range: rng.random_range(3.0..50.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Pos2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub traits: ParticleTraits,
    pub noise_offset: Vec2,
    age: u32,
    dead: bool,
}

impl Particle {
    pub fn new(pos: Pos2, vel: Vec2, traits: ParticleTraits, noise_offset: Vec2) -> Self {
        Self {
            pos,
            vel,
            acc: Vec2::ZERO,
            traits,
            noise_offset,
            age: 0,
            dead: false,
        }
    }

    /// Spawns a particle flung in a random direction at up to 5 px/frame.
    pub fn spawn<R: Rng + ?Sized>(pos: Pos2, noise_offset: Vec2, rng: &mut R) -> Self {
        let heading = rng.random_range(0.0f32..360.0).to_radians();
        let speed = rng.random_range(0.0..5.0);
        let traits = ParticleTraits::random(rng);
        Self::new(pos, Vec2::angled(heading) * speed, traits, noise_offset)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Remaining life in `[0, 1]`, 1 at birth.
    fn remaining(&self) -> f32 {
        let lifespan = self.traits.lifespan.max(1);
        (lifespan - self.age.min(lifespan)) as f32 / lifespan as f32
    }

    /// Outline opacity on a 0..=255 scale, fading from 120 to 50.
    pub fn alpha(&self) -> f32 {
        self.remaining() * ALPHA_SPAN + ALPHA_FLOOR
    }

    pub fn weight(&self) -> f32 {
        self.remaining() * self.traits.weight_range
    }

    /// Advances one frame. `tick` is the frame counter the noise field is
    /// scrolled by.
    pub fn update<N, R>(&mut self, tick: u64, noise: &N, rng: &mut R)
    where
        N: NoiseField + ?Sized,
        R: Rng + ?Sized,
    {
        let jitter = Vec2::angled(rng.random_range(0.0..TAU)) * JITTER;
        self.step(tick, noise, jitter);
    }

    fn step<N: NoiseField + ?Sized>(&mut self, tick: u64, noise: &N, jitter: Vec2) {
        if self.dead || self.age >= self.traits.lifespan {
            self.dead = true;
            return;
        }
        self.age += 1;
        if self.age >= self.traits.lifespan {
            self.dead = true;
        }

        let t = tick as f32;
        let heading = (noise.sample(
            (self.pos.x + t + self.noise_offset.x) * NOISE_SCALE,
            (self.pos.y + t + self.noise_offset.y) * NOISE_SCALE,
        ) - 0.5)
            * PI
            * 4.0;
        // swapped axes and reversed scroll so strength doesn't track heading
        let strength = noise.sample((self.pos.y - t) * NOISE_SCALE, (self.pos.x - t) * NOISE_SCALE);

        self.acc = Vec2::ZERO;
        self.acc += Vec2::angled(heading) * strength;
        self.acc += jitter;

        self.vel += self.acc;
        self.vel *= self.traits.decay;
        let speed = self.vel.length();
        if speed > MAX_SPEED {
            self.vel *= MAX_SPEED / speed;
        }

        self.pos += self.vel;
    }

    /// Draws a dark halo first, then the colored core on top of it.
    pub fn display(&self, canvas: &mut Canvas) {
        let weight = self.weight();
        let halo = Color32::from_black_alpha(self.alpha().round().clamp(0.0, 255.0) as u8);
        canvas.stroke_point(self.pos, weight + OUTLINE_PAD, halo);
        canvas.stroke_point(self.pos, weight, self.traits.color);
    }
}
