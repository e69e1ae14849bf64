//! Sprites and their collision masks.
//!
//! Every sprite is drawn as ASCII art (`#` opaque, `.` or space transparent)
//! and upscaled by an integer factor into a pixel mask in field units.
//! The core only ever asks a sprite for its size and for mask overlaps.

use std::fmt;
use std::rc::Rc;

use crate::entities::EnemyColor;

// ── Art ───────────────────────────────────────────────────────────────────────

const PLAYER_SHIP_ART: &[&str] = &[
    ".....#.....",
    "....###....",
    "....###....",
    ".#..###..#.",
    ".#.#####.#.",
    "###########",
    "##.#####.##",
    "#...#.#...#",
];

const RED_SHIP_ART: &[&str] = &[
    "#.......#",
    "##.###.##",
    "#########",
    ".#######.",
    "..#.#.#..",
    "...#.#...",
];

const GREEN_SHIP_ART: &[&str] = &[
    "..#####..",
    ".#######.",
    "##.###.##",
    "#########",
    ".#.....#.",
    "#.......#",
];

const BLUE_SHIP_ART: &[&str] = &[
    "...###...",
    ".#######.",
    "###.#.###",
    "#########",
    "..#...#..",
    ".#.....#.",
];

const LASER_ART: &[&str] = &[".#.", "###", "###", "###", ".#."];

const PLAYER_SHIP_SCALE: u32 = 6;
const ENEMY_SHIP_SCALE: u32 = 5;
const LASER_SCALE: u32 = 3;

// ── Mask ──────────────────────────────────────────────────────────────────────

/// Opaque-pixel bitmap, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_art(art: &[&str], scale: u32) -> Result<Mask, AssetError> {
        if scale == 0 {
            return Err(AssetError::ZeroScale);
        }
        let art_width = art.first().map(|row| row.chars().count()).unwrap_or(0);
        if art.is_empty() || art_width == 0 {
            return Err(AssetError::EmptyArt);
        }

        let width = art_width as u32 * scale;
        let height = art.len() as u32 * scale;
        let mut bits = vec![false; (width * height) as usize];

        for (row, line) in art.iter().enumerate() {
            let found = line.chars().count();
            if found != art_width {
                return Err(AssetError::RaggedArt {
                    row,
                    expected: art_width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let opaque = match ch {
                    '#' => true,
                    '.' | ' ' => false,
                    other => return Err(AssetError::UnknownGlyph { row, glyph: other }),
                };
                if !opaque {
                    continue;
                }
                for dy in 0..scale {
                    let y = row as u32 * scale + dy;
                    let start = (y * width + col as u32 * scale) as usize;
                    bits[start..start + scale as usize].fill(true);
                }
            }
        }

        Ok(Mask {
            width,
            height,
            bits,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Out-of-range coordinates are transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Does `other`, placed at `offset` relative to this mask's origin,
    /// share at least one opaque pixel with this mask?
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i32).min(dx + other.width as i32);
        let y1 = (self.height as i32).min(dy + other.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        (y0..y1).any(|y| (x0..x1).any(|x| self.get(x, y) && other.get(x - dx, y - dy)))
    }
}

// ── Sprite ────────────────────────────────────────────────────────────────────

/// Colour family a sprite is drawn in. Backends map this to real colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    Red,
    Green,
    Blue,
    Yellow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub mask: Mask,
    pub tint: Tint,
}

impl Sprite {
    pub fn from_art(art: &[&str], scale: u32, tint: Tint) -> Result<Sprite, AssetError> {
        Ok(Sprite {
            mask: Mask::from_art(art, scale)?,
            tint,
        })
    }

    pub fn width(&self) -> i32 {
        self.mask.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.mask.height() as i32
    }
}

// ── Assets ────────────────────────────────────────────────────────────────────

/// Sprite handles resolved once at startup. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct Assets {
    player_ship: Rc<Sprite>,
    player_laser: Rc<Sprite>,
    /// Indexed by `EnemyColor::index`: (ship, laser).
    enemies: [(Rc<Sprite>, Rc<Sprite>); 3],
}

impl Assets {
    pub fn builtin() -> Result<Assets, AssetError> {
        let enemy = |art: &[&str], tint| -> Result<(Rc<Sprite>, Rc<Sprite>), AssetError> {
            Ok((
                Rc::new(Sprite::from_art(art, ENEMY_SHIP_SCALE, tint)?),
                Rc::new(Sprite::from_art(LASER_ART, LASER_SCALE, tint)?),
            ))
        };
        Ok(Assets {
            player_ship: Rc::new(Sprite::from_art(PLAYER_SHIP_ART, PLAYER_SHIP_SCALE, Tint::Yellow)?),
            player_laser: Rc::new(Sprite::from_art(LASER_ART, LASER_SCALE, Tint::Yellow)?),
            enemies: [
                enemy(RED_SHIP_ART, Tint::Red)?,
                enemy(GREEN_SHIP_ART, Tint::Green)?,
                enemy(BLUE_SHIP_ART, Tint::Blue)?,
            ],
        })
    }

    pub fn player_ship(&self) -> &Rc<Sprite> {
        &self.player_ship
    }

    pub fn player_laser(&self) -> &Rc<Sprite> {
        &self.player_laser
    }

    pub fn enemy_ship(&self, color: EnemyColor) -> &Rc<Sprite> {
        &self.enemies[color.index()].0
    }

    pub fn enemy_laser(&self, color: EnemyColor) -> &Rc<Sprite> {
        &self.enemies[color.index()].1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    EmptyArt,
    ZeroScale,
    RaggedArt { row: usize, expected: usize, found: usize },
    UnknownGlyph { row: usize, glyph: char },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyArt => write!(f, "sprite art has no pixels"),
            Self::ZeroScale => write!(f, "sprite scale must be at least 1"),
            Self::RaggedArt {
                row,
                expected,
                found,
            } => write!(
                f,
                "sprite art row {row} is {found} wide, expected {expected}"
            ),
            Self::UnknownGlyph { row, glyph } => {
                write!(f, "sprite art row {row} has unknown glyph {glyph:?}")
            }
        }
    }
}

impl std::error::Error for AssetError {}
