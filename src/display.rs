//! Rendering layer: all terminal output lives here.
//!
//! The simulation works in field units (900×900 by default) while the
//! terminal has a few dozen rows. A `Canvas` maps field units onto terminal
//! cells: a cell is lit when any opaque sprite pixel falls inside the block
//! of field units it covers. The composed canvas is then written out in
//! runs of equal colour.

use std::io::Write;
use std::ops::RangeInclusive;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::boundary::{Frame, Renderer, Surface};
use crate::config::Field;
use crate::sprite::{Sprite, Tint};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Black;
const C_TEXT: Color = Color::White;
const C_TITLE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

const SHIP_GLYPH: char = '█';
const BAR_GLYPH: char = '▀';

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Blue => Color::Blue,
        Tint::Yellow => Color::Yellow,
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    glyph: char,
    /// `None` is plain text colour.
    tint: Option<Tint>,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    tint: None,
};

/// A terminal-sized grid that field-unit drawing lands on.
#[derive(Clone, Debug)]
pub struct Canvas {
    field: Field,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(field: Field, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Canvas {
            field,
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn glyph(&self, col: u16, row: u16) -> Option<char> {
        self.index(col, row).map(|i| self.cells[i].glyph)
    }

    pub fn tint(&self, col: u16, row: u16) -> Option<Tint> {
        self.index(col, row).and_then(|i| self.cells[i].tint)
    }

    /// One row as plain text.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.glyph(col, row))
            .collect()
    }

    /// Writes `text` starting at `col`, clipped at the right edge.
    pub fn put_text(&mut self, col: u16, row: u16, text: &str, tint: Option<Tint>) {
        for (i, glyph) in text.chars().enumerate() {
            let Some(col) = col.checked_add(i as u16) else {
                break;
            };
            if let Some(idx) = self.index(col, row) {
                self.cells[idx] = Cell { glyph, tint };
            }
        }
    }

    /// Writes `text` horizontally centred on `row`.
    pub fn put_centered(&mut self, row: u16, text: &str, tint: Option<Tint>) {
        let width = text.chars().count() as u16;
        self.put_text(self.cols.saturating_sub(width) / 2, row, text, tint);
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| row as usize * self.cols as usize + col as usize)
    }

    /// Terminal cells covering field units `[start, start + len)` along an
    /// axis of `extent` field units split into `cells` cells.
    fn cell_span(start: i32, len: i32, extent: i32, cells: u16) -> Option<RangeInclusive<u16>> {
        let lo = start.max(0);
        let hi = (start + len).min(extent);
        if lo >= hi || extent <= 0 {
            return None;
        }
        let first = lo as i64 * cells as i64 / extent as i64;
        let last = (hi - 1) as i64 * cells as i64 / extent as i64;
        Some(first as u16..=(last as u16).min(cells - 1))
    }

    /// Field units `[lo, hi)` covered by cell `cell`.
    fn unit_span(cell: u16, extent: i32, cells: u16) -> (i32, i32) {
        let lo = (cell as i64 * extent as i64 / cells as i64) as i32;
        let hi = ((cell as i64 + 1) * extent as i64 / cells as i64) as i32;
        (lo, hi.max(lo + 1))
    }

    fn cells_for(&self, x: i32, y: i32, width: i32, height: i32) -> Vec<(u16, u16)> {
        let (Some(cols), Some(rows)) = (
            Self::cell_span(x, width, self.field.width, self.cols),
            Self::cell_span(y, height, self.field.height, self.rows),
        ) else {
            return Vec::new();
        };
        rows.flat_map(|row| cols.clone().map(move |col| (col, row)))
            .collect()
    }

    /// Writes the whole grid, one colour run at a time.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + self.cols as usize];

            let mut run = String::new();
            let mut run_tint = line.first().and_then(|c| c.tint);
            for cell in line {
                if cell.tint != run_tint {
                    print_run(out, &run, run_tint)?;
                    run.clear();
                    run_tint = cell.tint;
                }
                run.push(cell.glyph);
            }
            print_run(out, &run, run_tint)?;
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }
}

fn print_run<W: Write>(out: &mut W, run: &str, tint: Option<Tint>) -> std::io::Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(tint.map(tint_color).unwrap_or(C_TEXT)))?;
    out.queue(Print(run))?;
    Ok(())
}

impl Surface for Canvas {
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        for (col, row) in self.cells_for(x, y, sprite.width(), sprite.height()) {
            let (ux0, ux1) = Self::unit_span(col, self.field.width, self.cols);
            let (uy0, uy1) = Self::unit_span(row, self.field.height, self.rows);
            let lit = (uy0.max(y)..uy1.min(y + sprite.height())).any(|uy| {
                (ux0.max(x)..ux1.min(x + sprite.width())).any(|ux| sprite.mask.get(ux - x, uy - y))
            });
            if lit {
                if let Some(idx) = self.index(col, row) {
                    self.cells[idx] = Cell {
                        glyph: SHIP_GLYPH,
                        tint: Some(sprite.tint),
                    };
                }
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, tint: Tint) {
        for (col, row) in self.cells_for(x, y, width, height) {
            if let Some(idx) = self.index(col, row) {
                self.cells[idx] = Cell {
                    glyph: BAR_GLYPH,
                    tint: Some(tint),
                };
            }
        }
    }
}

// ── Game frame ────────────────────────────────────────────────────────────────

/// Lay out one frame: ships and projectiles, the HUD on the top row, and
/// the loss banner across the middle.
pub fn compose_frame(frame: &Frame<'_>, cols: u16, rows: u16) -> Canvas {
    let mut canvas = Canvas::new(frame.field, cols, rows);
    frame.draw_entities(&mut canvas);

    let hud = frame.hud_texts();
    canvas.put_text(1, 0, &hud.lives, None);
    canvas.put_centered(0, &hud.score, None);
    let level_col = canvas
        .cols()
        .saturating_sub(hud.level.chars().count() as u16 + 1);
    canvas.put_text(level_col, 0, &hud.level, None);

    if let Some(banner) = frame.loss_banner() {
        canvas.put_centered(canvas.rows() / 2, banner, Some(Tint::Red));
    }
    canvas
}

/// `Renderer` over any writer that understands crossterm commands.
pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        TerminalRenderer { out, cols, rows }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn present(&mut self, frame: &Frame<'_>) -> std::io::Result<()> {
        compose_frame(frame, self.cols, self.rows).write_to(&mut self.out)
    }
}

// ── Intro screen ──────────────────────────────────────────────────────────────

pub const INTRO_TITLE: &str = "Welcome to the Galactic Invaders";
pub const INTRO_PROMPT: &str = "Click the Mouse to Begin...";
const INTRO_HINT: &str = "(Enter also starts · arrows/WASD move · Space fires · Q quits)";

pub fn render_intro<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let lines: [(&str, Color, u16); 3] = [
        (INTRO_TITLE, C_TITLE, (rows / 2).saturating_sub(1)),
        (INTRO_PROMPT, C_TEXT, rows / 2),
        (INTRO_HINT, C_HINT, rows / 2 + 2),
    ];
    for (text, color, row) in lines {
        let col = cols.saturating_sub(text.chars().count() as u16) / 2;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
