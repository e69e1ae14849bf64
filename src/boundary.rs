//! The narrow interface between the simulation and the outside world:
//! drawing, input and frame pacing.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::Field;
use crate::entities::{Enemy, Player};
use crate::sprite::{Sprite, Tint};

pub const LOSS_BANNER: &str = "Your Civilization has been Annihilated !!!";

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Draw primitives in field units.
pub trait Surface {
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, tint: Tint);
}

/// Everything needed to present one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub field: Field,
    pub lives: i32,
    pub level: u32,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub lost: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudTexts {
    pub lives: String,
    pub level: String,
    pub score: String,
}

impl Frame<'_> {
    pub fn hud_texts(&self) -> HudTexts {
        HudTexts {
            lives: format!("Lives: {}", self.lives),
            level: format!("Level: {}", self.level),
            score: format!("Score: {}", self.player.score),
        }
    }

    pub fn loss_banner(&self) -> Option<&'static str> {
        self.lost.then_some(LOSS_BANNER)
    }

    /// Enemies first, then the player on top.
    pub fn draw_entities<S: Surface + ?Sized>(&self, surface: &mut S) {
        for enemy in self.enemies {
            enemy.render(surface);
        }
        self.player.render(surface);
    }
}

pub trait Renderer {
    fn present(&mut self, frame: &Frame<'_>) -> std::io::Result<()>;
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    MouseDown,
    /// Enter; starts a session like a click does.
    Confirm,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Fire];

    fn bit(self) -> u8 {
        match self {
            Key::Left => 1,
            Key::Right => 1 << 1,
            Key::Up => 1 << 2,
            Key::Down => 1 << 3,
            Key::Fire => 1 << 4,
        }
    }
}

/// Set of keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn none() -> Self {
        HeldKeys(0)
    }

    pub fn with(mut self, key: Key) -> Self {
        self.insert(key);
        self
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut keys = HeldKeys::none();
        for key in iter {
            keys.insert(key);
        }
        keys
    }
}

pub trait InputSource {
    /// Drains every event queued since the last call.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn key_state(&self) -> HeldKeys;
}

// ── Timing ────────────────────────────────────────────────────────────────────

pub trait FrameClock {
    /// Blocks until the next frame slot at `rate` frames per second.
    fn tick(&mut self, rate: u32);
}

/// Sleeps away whatever is left of the frame since the previous tick.
#[derive(Debug, Default)]
pub struct FixedRateClock {
    last: Option<Instant>,
}

impl FixedRateClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for FixedRateClock {
    fn tick(&mut self, rate: u32) {
        let slot = Duration::from_secs_f64(1.0 / rate.max(1) as f64);
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < slot {
                thread::sleep(slot - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}
