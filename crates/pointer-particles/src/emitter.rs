use egui::{Color32, Pos2, Vec2};
use log::debug;
use rand::Rng;

use crate::canvas::Canvas;
use crate::noise::NoiseField;
use crate::particle::Particle;
use crate::soundtrack::Soundtrack;

/// Owns the live particles and the pointer/audio flags that drive them.
pub struct Emitter {
    particles: Vec<Particle>,
    spawn_per_frame: usize,
    pointer_down: bool,
    pointer: Pos2,
    // every particle ever spawned gets its own noise offset from this
    spawned: u64,
    audio_playing: bool,
}

impl Emitter {
    pub fn new(spawn_per_frame: usize) -> Self {
        Self {
            particles: Vec::new(),
            spawn_per_frame,
            pointer_down: false,
            pointer: Pos2::ZERO,
            spawned: 0,
            audio_playing: false,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Pointer position in canvas points.
    pub fn pointer(&self) -> Pos2 {
        self.pointer
    }

    pub fn is_audio_playing(&self) -> bool {
        self.audio_playing
    }

    pub fn press(&mut self) {
        self.pointer_down = true;
    }

    pub fn release(&mut self) {
        self.pointer_down = false;
    }

    pub fn move_pointer(&mut self, pos: Pos2) {
        self.pointer = pos;
    }

    /// One animation frame: spawn under the pointer if it is held, then
    /// retire, advance and draw.
    pub fn frame<N, R, S>(
        &mut self,
        tick: u64,
        noise: &N,
        rng: &mut R,
        soundtrack: &mut S,
        canvas: &mut Canvas,
    ) where
        N: NoiseField + ?Sized,
        R: Rng + ?Sized,
        S: Soundtrack + ?Sized,
    {
        if self.pointer_down {
            self.spawn(rng, soundtrack);
        }
        self.sweep(tick, noise, rng, soundtrack, canvas);
    }

    pub fn spawn<R, S>(&mut self, rng: &mut R, soundtrack: &mut S)
    where
        R: Rng + ?Sized,
        S: Soundtrack + ?Sized,
    {
        if !soundtrack.is_playing() {
            soundtrack.play();
        }
        self.audio_playing = true;

        self.particles.reserve(self.spawn_per_frame);
        for _ in 0..self.spawn_per_frame {
            let offset = self.spawned as f32;
            self.spawned += 1;
            self.particles
                .push(Particle::spawn(self.pointer, Vec2::splat(offset), rng));
        }
    }

    pub fn sweep<N, R, S>(
        &mut self,
        tick: u64,
        noise: &N,
        rng: &mut R,
        soundtrack: &mut S,
        canvas: &mut Canvas,
    ) where
        N: NoiseField + ?Sized,
        R: Rng + ?Sized,
        S: Soundtrack + ?Sized,
    {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_dead());
        if before > 0 && self.particles.is_empty() {
            soundtrack.stop();
            self.audio_playing = false;
            debug!("last particle retired, soundtrack stopped");
        }

        // newest first, so older particles end up painted on top
        for p in self.particles.iter_mut().rev() {
            p.update(tick, noise, rng);
            p.display(canvas);
        }
    }

    /// Drops every particle at once and wipes the canvas. The soundtrack is
    /// left as it is.
    pub fn clear_all(&mut self, canvas: &mut Canvas, background: Color32) {
        debug!("clearing {} particles", self.particles.len());
        self.particles.clear();
        canvas.clear(background);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::PerlinField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingSoundtrack {
        playing: bool,
        plays: usize,
        stops: usize,
    }

    impl Soundtrack for RecordingSoundtrack {
        fn play(&mut self) {
            self.playing = true;
            self.plays += 1;
        }

        fn stop(&mut self) {
            self.playing = false;
            self.stops += 1;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    struct Harness {
        emitter: Emitter,
        rng: StdRng,
        noise: PerlinField,
        sound: RecordingSoundtrack,
        canvas: Canvas,
        tick: u64,
    }

    impl Harness {
        fn new() -> Self {
            let mut rng = StdRng::seed_from_u64(99);
            let noise = PerlinField::new(&mut rng);
            Self {
                emitter: Emitter::new(10),
                rng,
                noise,
                sound: RecordingSoundtrack::default(),
                canvas: Canvas::new([320, 240], Color32::WHITE),
                tick: 0,
            }
        }

        fn frame(&mut self) {
            self.tick += 1;
            self.emitter.frame(
                self.tick,
                &self.noise,
                &mut self.rng,
                &mut self.sound,
                &mut self.canvas,
            );
        }
    }

    #[test]
    fn one_press_spawns_ten_fresh_particles_at_the_pointer() {
        let mut h = Harness::new();
        h.emitter.move_pointer(Pos2::new(100.0, 100.0));
        h.emitter.press();
        h.emitter.spawn(&mut h.rng, &mut h.sound);

        assert_eq!(h.emitter.len(), 10);
        for p in h.emitter.particles() {
            assert_eq!(p.pos, Pos2::new(100.0, 100.0));
            assert_eq!(p.age(), 0);
        }
        assert!(h.sound.is_playing());
        assert!(h.emitter.is_audio_playing());
    }

    #[test]
    fn holding_for_k_frames_spawns_ten_per_frame() {
        let mut h = Harness::new();
        h.emitter.move_pointer(Pos2::new(160.0, 120.0));
        h.emitter.press();
        for k in 1..=12 {
            h.frame();
            assert_eq!(h.emitter.len(), 10 * k);
        }
        // already playing, so no restarts
        assert_eq!(h.sound.plays, 1);
    }

    #[test]
    fn noise_offsets_are_never_shared() {
        let mut h = Harness::new();
        h.emitter.press();
        for _ in 0..5 {
            h.frame();
        }
        let mut offsets: Vec<f32> = h.emitter.particles().iter().map(|p| p.noise_offset.x).collect();
        offsets.sort_by(f32::total_cmp);
        offsets.dedup();
        assert_eq!(offsets.len(), 50);
        assert!(h.emitter.particles().iter().all(|p| p.noise_offset.x == p.noise_offset.y));
    }

    #[test]
    fn released_pointer_spawns_nothing() {
        let mut h = Harness::new();
        h.emitter.press();
        h.frame();
        h.emitter.release();
        h.frame();
        h.frame();
        assert_eq!(h.emitter.len(), 10);
        assert!(!h.emitter.is_pointer_down());
    }

    #[test]
    fn audio_stops_once_when_the_last_particle_retires() {
        let mut h = Harness::new();
        h.emitter.move_pointer(Pos2::new(100.0, 100.0));
        h.emitter.press();
        h.frame();
        h.emitter.release();

        let mut emptied_on = None;
        for frame in 0..200 {
            h.frame();
            if h.emitter.is_empty() {
                assert!(!h.emitter.is_audio_playing());
                emptied_on.get_or_insert(frame);
            } else {
                assert!(h.emitter.is_audio_playing(), "flag dropped early on frame {frame}");
            }
        }
        assert!(emptied_on.is_some());
        assert_eq!(h.sound.stops, 1);
        assert!(!h.sound.is_playing());
    }

    #[test]
    fn dead_particles_are_removed_before_they_draw_again() {
        let mut h = Harness::new();
        h.emitter.press();
        h.frame();
        h.emitter.release();
        for _ in 0..100 {
            h.frame();
            assert!(h.emitter.particles().iter().all(|p| p.age() <= p.traits.lifespan));
        }
        assert!(h.emitter.is_empty());
    }

    #[test]
    fn clear_all_empties_any_collection() {
        let mut h = Harness::new();
        h.emitter.clear_all(&mut h.canvas, Color32::WHITE);
        assert!(h.emitter.is_empty());

        h.emitter.move_pointer(Pos2::new(50.0, 50.0));
        h.emitter.press();
        for _ in 0..3 {
            h.frame();
        }
        assert_eq!(h.emitter.len(), 30);
        assert_ne!(h.canvas.pixel(50, 50), Some(Color32::WHITE));

        h.emitter.clear_all(&mut h.canvas, Color32::WHITE);
        assert!(h.emitter.is_empty());
        assert_eq!(h.canvas.pixel(50, 50), Some(Color32::WHITE));
        // clear-all leaves the soundtrack alone
        assert!(h.emitter.is_audio_playing());
        assert_eq!(h.sound.stops, 0);
    }
}
