//! Session configuration: the tick rate and the size of the play field.

use std::fmt;

use crate::tuning::{
    COOLDOWN_DIVISOR, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_TICK_RATE,
    LOSS_BANNER_SECONDS, PROB_ENEMY_SHOT,
};

/// Smallest field that still fits the spawn band and the player ship.
pub const MIN_FIELD_WIDTH: i32 = 200;
pub const MIN_FIELD_HEIGHT: i32 = 200;

/// Play field in field units. Origin is top-left, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Field {
    pub fn new(width: i32, height: i32) -> Self {
        Field { width, height }
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Frames per second.
    pub tick_rate: u32,
    pub field: Field,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_rate: DEFAULT_TICK_RATE,
            field: Field::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.field.width < MIN_FIELD_WIDTH || self.field.height < MIN_FIELD_HEIGHT {
            return Err(ConfigError::FieldTooSmall {
                width: self.field.width,
                height: self.field.height,
            });
        }
        Ok(())
    }

    /// Frames between shots.
    pub fn cooldown_period(&self) -> u32 {
        self.tick_rate / COOLDOWN_DIVISOR
    }

    /// Upper bound (exclusive) of the per-tick enemy fire roll. An enemy
    /// fires when the roll comes up `1`.
    pub fn enemy_shot_range(&self) -> u32 {
        ((self.tick_rate as f64 / PROB_ENEMY_SHOT) as u32).max(2)
    }

    /// Once `lost_frame_count` exceeds this, the session ends.
    pub fn loss_banner_frames(&self) -> u32 {
        self.tick_rate * LOSS_BANNER_SECONDS
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroTickRate,
    FieldTooSmall { width: i32, height: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTickRate => write!(f, "tick rate must be at least 1 frame per second"),
            Self::FieldTooSmall { width, height } => write!(
                f,
                "field {width}x{height} is smaller than the minimum {MIN_FIELD_WIDTH}x{MIN_FIELD_HEIGHT}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
