//! Wave generation. Each cleared wave brings a longer one, staggered
//! further above the field.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Field;
use crate::entities::{Enemy, EnemyColor};
use crate::sprite::Assets;
use crate::tuning::{
    SPAWN_X_MARGIN, SPAWN_Y_BASE, SPAWN_Y_CEILING, SPAWN_Y_PER_LEVEL, STARTING_WAVE_LENGTH,
    WAVE_GROWTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveDirector {
    pub level: u32,
    pub wave_length: u32,
}

impl Default for WaveDirector {
    fn default() -> Self {
        WaveDirector {
            level: 0,
            wave_length: STARTING_WAVE_LENGTH,
        }
    }
}

impl WaveDirector {
    /// Bumps the level and wave length, then spawns the new wave.
    pub fn next_wave(
        &mut self,
        field: Field,
        assets: &Assets,
        cooldown_period: u32,
        rng: &mut impl Rng,
    ) -> Vec<Enemy> {
        self.level += 1;
        self.wave_length += WAVE_GROWTH;
        self.spawn(field, assets, cooldown_period, rng)
    }

    /// `wave_length` enemies for the current level, all above the field.
    pub fn spawn(
        &self,
        field: Field,
        assets: &Assets,
        cooldown_period: u32,
        rng: &mut impl Rng,
    ) -> Vec<Enemy> {
        let (top, bottom) = self.spawn_band();
        (0..self.wave_length)
            .map(|_| {
                let x = rng.gen_range(SPAWN_X_MARGIN..field.width - SPAWN_X_MARGIN);
                let y = rng.gen_range(top..bottom);
                let color = *EnemyColor::ALL
                    .choose(rng)
                    .unwrap_or(&EnemyColor::Red);
                Enemy::new(x, y, color, assets, cooldown_period)
            })
            .collect()
    }

    /// Vertical start range `[top, bottom)` for the current level.
    pub fn spawn_band(&self) -> (i32, i32) {
        let top = SPAWN_Y_BASE - self.level as i32 * SPAWN_Y_PER_LEVEL;
        (top, SPAWN_Y_CEILING)
    }
}
