//! Ships and projectiles.
//!
//! `Combatant` carries everything a ship does regardless of side: position,
//! health, the fire cooldown and the projectiles it owns. `Player` and
//! `Enemy` wrap it with their own extra state.

use std::rc::Rc;

use crate::boundary::Surface;
use crate::collision::{overlaps, Body};
use crate::config::Field;
use crate::sprite::{Assets, Mask, Sprite, Tint};
use crate::tuning::{
    HEALTH_BAR_GAP, HEALTH_BAR_HEIGHT, KILL_SCORE, LASER_DAMAGE, PLAYER_BOTTOM_MARGIN,
    SHIP_HEALTH,
};

// ── Enemy colours ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Blue];

    pub fn index(self) -> usize {
        match self {
            EnemyColor::Red => 0,
            EnemyColor::Green => 1,
            EnemyColor::Blue => 2,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub sprite: Rc<Sprite>,
}

impl Projectile {
    pub fn new(x: i32, y: i32, sprite: Rc<Sprite>) -> Self {
        Projectile { x, y, sprite }
    }

    pub fn advance(&mut self, velocity: i32) {
        self.y += velocity;
    }

    /// Outside `[0, field_height]` vertically.
    pub fn off_screen(&self, field_height: i32) -> bool {
        !(0..=field_height).contains(&self.y)
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.blit(&self.sprite, self.x, self.y);
    }
}

impl Body for Projectile {
    fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        &self.sprite.mask
    }
}

// ── Combatant ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Combatant {
    pub x: i32,
    pub y: i32,
    /// May go negative before the loss check sees it.
    pub health: i32,
    pub max_health: i32,
    /// `0` means ready; otherwise frames since the last shot, up to
    /// `cooldown_period`.
    pub cooldown_counter: u32,
    pub cooldown_period: u32,
    pub sprite: Rc<Sprite>,
    pub laser: Rc<Sprite>,
    pub projectiles: Vec<Projectile>,
}

impl Combatant {
    pub fn new(
        x: i32,
        y: i32,
        health: i32,
        cooldown_period: u32,
        sprite: Rc<Sprite>,
        laser: Rc<Sprite>,
    ) -> Self {
        Combatant {
            x,
            y,
            health,
            max_health: health,
            cooldown_counter: 0,
            cooldown_period,
            sprite,
            laser,
            projectiles: Vec::new(),
        }
    }

    pub fn bounding_size(&self) -> (i32, i32) {
        (self.sprite.width(), self.sprite.height())
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_counter == 0
    }

    /// The counter resets only once it has reached the period, and only
    /// counts up while non-zero. Together with `fire` setting it to 1 this
    /// yields one shot every `cooldown_period` ticks.
    pub fn advance_cooldown(&mut self) {
        if self.cooldown_counter >= self.cooldown_period {
            self.cooldown_counter = 0;
        } else if self.cooldown_counter > 0 {
            self.cooldown_counter += 1;
        }
    }

    /// Spawns a projectile at the horizontal centre if the cooldown allows.
    pub fn fire(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let x = self.x + self.sprite.width() / 2;
        self.projectiles
            .push(Projectile::new(x, self.y, Rc::clone(&self.laser)));
        self.cooldown_counter = 1;
        true
    }

    /// Single-target form: every projectile that strikes `target` deals
    /// `LASER_DAMAGE` and is consumed.
    pub fn move_projectiles_at(&mut self, velocity: i32, field_height: i32, target: &mut Combatant) {
        self.advance_cooldown();
        self.projectiles.retain_mut(|projectile| {
            projectile.advance(velocity);
            if projectile.off_screen(field_height) {
                false
            } else if overlaps(&*target, projectile) {
                target.health -= LASER_DAMAGE;
                false
            } else {
                true
            }
        });
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.blit(&self.sprite, self.x, self.y);
        for projectile in &self.projectiles {
            projectile.render(surface);
        }
    }
}

impl Body for Combatant {
    fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        &self.sprite.mask
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub ship: Combatant,
    pub score: u32,
}

impl Player {
    pub fn new(x: i32, y: i32, assets: &Assets, cooldown_period: u32) -> Self {
        Player {
            ship: Combatant::new(
                x,
                y,
                SHIP_HEALTH,
                cooldown_period,
                Rc::clone(assets.player_ship()),
                Rc::clone(assets.player_laser()),
            ),
            score: 0,
        }
    }

    /// Starting spot: centred, just above the bottom edge.
    pub fn spawn(field: Field, assets: &Assets, cooldown_period: u32) -> Self {
        let sprite = assets.player_ship();
        let x = (field.width - sprite.width()) / 2;
        let y = field.height - sprite.height() - PLAYER_BOTTOM_MARGIN;
        Player::new(x, y, assets, cooldown_period)
    }

    /// Multi-target form: a projectile that strikes an enemy removes that
    /// enemy, scores `KILL_SCORE` and is consumed. One projectile takes out
    /// at most one enemy.
    pub fn move_projectiles(&mut self, velocity: i32, field_height: i32, enemies: &mut Vec<Enemy>) {
        self.ship.advance_cooldown();
        let mut kills = 0;
        self.ship.projectiles.retain_mut(|projectile| {
            projectile.advance(velocity);
            if projectile.off_screen(field_height) {
                return false;
            }
            match enemies.iter().position(|enemy| overlaps(enemy, projectile)) {
                Some(hit) => {
                    enemies.remove(hit);
                    kills += 1;
                    false
                }
                None => true,
            }
        });
        self.score += kills * KILL_SCORE;
    }

    /// Width of the green part of the health bar. Negative or excess health
    /// is clamped here only; `ship.health` keeps its raw value.
    pub fn health_bar_width(&self) -> i32 {
        let ship = &self.ship;
        if ship.max_health <= 0 {
            return 0;
        }
        let health = ship.health.clamp(0, ship.max_health);
        ship.sprite.width() * health / ship.max_health
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.ship.render(surface);

        let (width, height) = self.ship.bounding_size();
        let bar_y = self.ship.y + height + HEALTH_BAR_GAP;
        surface.fill_rect(self.ship.x, bar_y, width, HEALTH_BAR_HEIGHT, Tint::Red);
        let healthy = self.health_bar_width();
        if healthy > 0 {
            surface.fill_rect(self.ship.x, bar_y, healthy, HEALTH_BAR_HEIGHT, Tint::Green);
        }
    }
}

impl Body for Player {
    fn origin(&self) -> (i32, i32) {
        self.ship.origin()
    }

    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub ship: Combatant,
    pub color: EnemyColor,
}

impl Enemy {
    pub fn new(x: i32, y: i32, color: EnemyColor, assets: &Assets, cooldown_period: u32) -> Self {
        Enemy {
            ship: Combatant::new(
                x,
                y,
                SHIP_HEALTH,
                cooldown_period,
                Rc::clone(assets.enemy_ship(color)),
                Rc::clone(assets.enemy_laser(color)),
            ),
            color,
        }
    }

    pub fn descend(&mut self, velocity: i32) {
        self.ship.y += velocity;
    }

    pub fn move_projectiles(&mut self, velocity: i32, field_height: i32, player: &mut Player) {
        self.ship
            .move_projectiles_at(velocity, field_height, &mut player.ship);
    }

    /// Bottom edge is below the bottom of the field.
    pub fn has_escaped(&self, field_height: i32) -> bool {
        self.ship.y + self.ship.sprite.height() > field_height
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.ship.render(surface);
    }
}

impl Body for Enemy {
    fn origin(&self) -> (i32, i32) {
        self.ship.origin()
    }

    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}
