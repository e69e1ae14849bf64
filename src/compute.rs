//! The per-frame simulation.
//!
//! `GameState` owns one play session: the player, the live enemies, the
//! wave director and the loss bookkeeping. `GameState::tick` advances it by
//! one frame; `run` drives ticks against the render/input/timing boundary
//! until the player quits or the loss banner times out.

use rand::Rng;
use tracing::{debug, info};

use crate::boundary::{Frame, FrameClock, HeldKeys, InputEvent, InputSource, Key, Renderer};
use crate::collision::overlaps;
use crate::config::{ConfigError, GameConfig};
use crate::entities::{Enemy, Player};
use crate::sprite::Assets;
use crate::tuning::{
    COLLISION_DAMAGE, ENEMY_VELOCITY, HUD_MARGIN, LASER_VELOCITY, PLAYER_BOTTOM_MARGIN,
    PLAYER_VELOCITY, STARTING_LIVES,
};
use crate::wave::WaveDirector;

/// What the loop should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
    GameOver,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub assets: Assets,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub waves: WaveDirector,
    pub lives: i32,
    pub lost: bool,
    pub lost_frame_count: u32,
    /// Ticks processed so far.
    pub frame: u64,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl GameState {
    /// Fresh session at level 0 with the opening wave already placed.
    /// Fails if `config` does not pass `GameConfig::validate`.
    pub fn new(
        config: GameConfig,
        assets: Assets,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = GameState::empty(config, assets);
        state.enemies = state.waves.spawn(
            state.config.field,
            &state.assets,
            state.config.cooldown_period(),
            rng,
        );
        Ok(state)
    }

    /// Same as `new` but with no enemies on the field. Nothing is spawned,
    /// so `config` is not validated.
    pub fn empty(config: GameConfig, assets: Assets) -> Self {
        let player = Player::spawn(config.field, &assets, config.cooldown_period());
        GameState {
            config,
            assets,
            player,
            enemies: Vec::new(),
            waves: WaveDirector::default(),
            lives: STARTING_LIVES,
            lost: false,
            lost_frame_count: 0,
            frame: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.waves.level
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn frame_view(&self) -> Frame<'_> {
        Frame {
            field: self.config.field,
            lives: self.lives,
            level: self.waves.level,
            player: &self.player,
            enemies: &self.enemies,
            lost: self.lost,
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

impl GameState {
    /// Advance the session by one frame. Input events are drained only
    /// while the game is live, so nothing is read during the loss banner.
    pub fn tick(&mut self, input: &mut impl InputSource, rng: &mut impl Rng) -> TickOutcome {
        self.frame += 1;

        // ── 1. Loss check ────────────────────────────────────────────────────
        if self.lives <= 0 || self.player.ship.health <= 0 {
            if !self.lost {
                info!(
                    lives = self.lives,
                    health = self.player.ship.health,
                    score = self.player.score,
                    level = self.waves.level,
                    "player lost"
                );
            }
            self.lost = true;
            self.lost_frame_count += 1;
        }

        // Nothing moves while the banner is up.
        if self.lost {
            if self.lost_frame_count > self.config.loss_banner_frames() {
                info!(score = self.player.score, "game over");
                return TickOutcome::GameOver;
            }
            return TickOutcome::Continue;
        }

        // ── 2. Enemies ───────────────────────────────────────────────────────
        self.update_enemies(rng);

        // ── 3. Refill ────────────────────────────────────────────────────────
        if self.enemies.is_empty() {
            self.enemies = self.waves.next_wave(
                self.config.field,
                &self.assets,
                self.config.cooldown_period(),
                rng,
            );
            info!(
                level = self.waves.level,
                wave_length = self.waves.wave_length,
                "spawned wave"
            );
        }

        // ── 4. Input ─────────────────────────────────────────────────────────
        if input.poll_events().contains(&InputEvent::Quit) {
            info!(score = self.player.score, "quit requested");
            return TickOutcome::Quit;
        }
        self.apply_keys(input.key_state());

        // ── 5. Player projectiles ────────────────────────────────────────────
        self.player.move_projectiles(
            -LASER_VELOCITY,
            self.config.field.height,
            &mut self.enemies,
        );

        TickOutcome::Continue
    }

    /// Move, shoot and resolve contact for every enemy. Removal decisions
    /// are made per enemy and applied in the same pass.
    fn update_enemies(&mut self, rng: &mut impl Rng) {
        let field_height = self.config.field.height;
        let shot_range = self.config.enemy_shot_range();
        let player = &mut self.player;
        let lives = &mut self.lives;

        self.enemies.retain_mut(|enemy| {
            enemy.descend(ENEMY_VELOCITY);
            enemy.move_projectiles(LASER_VELOCITY, field_height, player);

            if rng.gen_range(0..shot_range) == 1 {
                enemy.ship.fire();
            }

            if overlaps(&*enemy, &*player) {
                player.ship.health -= COLLISION_DAMAGE;
                debug!(health = player.ship.health, "enemy rammed the player");
                false
            } else if enemy.has_escaped(field_height) {
                *lives -= 1;
                debug!(lives = *lives, "enemy slipped past");
                false
            } else {
                true
            }
        });
    }

    /// Each axis moves only if the step keeps the ship inside its bounds.
    pub fn apply_keys(&mut self, keys: HeldKeys) {
        let field = self.config.field;
        let ship = &mut self.player.ship;
        let (width, height) = ship.bounding_size();

        if keys.contains(Key::Left) && ship.x - PLAYER_VELOCITY > 0 {
            ship.x -= PLAYER_VELOCITY;
        }
        if keys.contains(Key::Right) && ship.x + PLAYER_VELOCITY + width < field.width {
            ship.x += PLAYER_VELOCITY;
        }
        if keys.contains(Key::Up) && ship.y - PLAYER_VELOCITY - HUD_MARGIN > 0 {
            ship.y -= PLAYER_VELOCITY;
        }
        if keys.contains(Key::Down)
            && ship.y + PLAYER_VELOCITY + height + PLAYER_BOTTOM_MARGIN < field.height
        {
            ship.y += PLAYER_VELOCITY;
        }
        if keys.contains(Key::Fire) {
            ship.fire();
        }
    }
}

// ── Session loop ─────────────────────────────────────────────────────────────

/// Wait for the frame slot, present, tick; repeat until the session ends.
pub fn run<R, I, C, G>(
    state: &mut GameState,
    renderer: &mut R,
    input: &mut I,
    clock: &mut C,
    rng: &mut G,
) -> std::io::Result<SessionEnd>
where
    R: Renderer,
    I: InputSource,
    C: FrameClock,
    G: Rng,
{
    info!(
        tick_rate = state.config.tick_rate,
        width = state.config.field.width,
        height = state.config.field.height,
        "session started"
    );
    loop {
        clock.tick(state.config.tick_rate);
        renderer.present(&state.frame_view())?;
        match state.tick(input, rng) {
            TickOutcome::Continue => {}
            TickOutcome::Quit => return Ok(SessionEnd::Quit),
            TickOutcome::GameOver => return Ok(SessionEnd::GameOver),
        }
    }
}
