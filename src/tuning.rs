//! Gameplay constants. These are fixed; only the tick rate and field size
//! live in `GameConfig`.

// ── Session ───────────────────────────────────────────────────────────────────

pub const DEFAULT_TICK_RATE: u32 = 120;
pub const DEFAULT_FIELD_WIDTH: i32 = 900;
pub const DEFAULT_FIELD_HEIGHT: i32 = 900;

pub const STARTING_LIVES: i32 = 5;
pub const STARTING_WAVE_LENGTH: u32 = 5;
pub const WAVE_GROWTH: u32 = 5;

/// Seconds the loss banner stays up before the session ends.
pub const LOSS_BANNER_SECONDS: u32 = 3;

// ── Ships ─────────────────────────────────────────────────────────────────────

pub const SHIP_HEALTH: i32 = 100;
pub const PLAYER_VELOCITY: i32 = 3;
pub const ENEMY_VELOCITY: i32 = 1;

/// Cooldown is a quarter second worth of ticks.
pub const COOLDOWN_DIVISOR: u32 = 4;

// ── Projectiles & damage ──────────────────────────────────────────────────────

pub const LASER_VELOCITY: i32 = 4;
pub const LASER_DAMAGE: i32 = 10;
pub const COLLISION_DAMAGE: i32 = 10;
pub const KILL_SCORE: u32 = 1;

/// Expected enemy shots per second. Used as `tick_rate / PROB_ENEMY_SHOT`
/// for the per-tick roll range.
pub const PROB_ENEMY_SHOT: f64 = 0.5;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Rows at the top reserved for the HUD; the player cannot fly into them.
pub const HUD_MARGIN: i32 = 50;
/// Gap kept between the player sprite and the bottom edge.
pub const PLAYER_BOTTOM_MARGIN: i32 = 15;

pub const HEALTH_BAR_GAP: i32 = 10;
pub const HEALTH_BAR_HEIGHT: i32 = 10;

// ── Wave spawning ─────────────────────────────────────────────────────────────

pub const SPAWN_X_MARGIN: i32 = 50;
pub const SPAWN_Y_BASE: i32 = -1500;
pub const SPAWN_Y_PER_LEVEL: i32 = 250;
pub const SPAWN_Y_CEILING: i32 = -100;
