use galactic_invasion::boundary::{Frame, Renderer, Surface, LOSS_BANNER};
use galactic_invasion::compute::GameState;
use galactic_invasion::config::{Field, GameConfig};
use galactic_invasion::display::*;
use galactic_invasion::sprite::{Assets, Sprite, Tint};

fn make_state() -> GameState {
    GameState::empty(GameConfig::default(), Assets::builtin().unwrap())
}

fn dot(tint: Tint) -> Sprite {
    Sprite::from_art(&["#"], 1, tint).unwrap()
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[test]
fn single_pixel_lights_exactly_one_cell() {
    // 900 / 90 = 10 units per column, 900 / 30 = 30 units per row.
    let mut canvas = Canvas::new(Field::default(), 90, 30);
    canvas.blit(&dot(Tint::Blue), 455, 455);

    assert_eq!(canvas.glyph(45, 15), Some('█'));
    assert_eq!(canvas.tint(45, 15), Some(Tint::Blue));
    assert_eq!(canvas.glyph(44, 15), Some(' '));
    assert_eq!(canvas.glyph(46, 15), Some(' '));
    assert_eq!(canvas.glyph(45, 14), Some(' '));
    assert_eq!(canvas.glyph(45, 16), Some(' '));
}

#[test]
fn transparent_pixels_leave_cells_blank() {
    let sprite = Sprite::from_art(&["#.", ".."], 10, Tint::Red).unwrap();
    let mut canvas = Canvas::new(Field::default(), 90, 90);
    canvas.blit(&sprite, 100, 100);

    assert_eq!(canvas.glyph(10, 10), Some('█'));
    assert_eq!(canvas.glyph(11, 10), Some(' '));
    assert_eq!(canvas.glyph(10, 11), Some(' '));
    assert_eq!(canvas.glyph(11, 11), Some(' '));
}

#[test]
fn sprites_above_the_field_are_clipped() {
    let mut canvas = Canvas::new(Field::default(), 90, 30);
    canvas.blit(&dot(Tint::Red), 100, -40);
    canvas.blit(&dot(Tint::Red), -5, 100);
    canvas.blit(&dot(Tint::Red), 100, 900);
    for row in 0..canvas.rows() {
        assert!(canvas.row_text(row).chars().all(|c| c == ' '));
    }
}

#[test]
fn text_is_clipped_at_right_edge() {
    let mut canvas = Canvas::new(Field::default(), 10, 3);
    canvas.put_text(7, 1, "Score", None);
    assert_eq!(canvas.row_text(1), "       Sco");
    canvas.put_centered(2, "ab", Some(Tint::Red));
    assert_eq!(canvas.row_text(2), "    ab    ");
    assert_eq!(canvas.tint(4, 2), Some(Tint::Red));
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[test]
fn hud_shows_lives_score_and_level() {
    let mut state = make_state();
    state.player.score = 7;
    state.lives = 3;
    let frame = state.frame_view();
    let hud = frame.hud_texts();
    assert_eq!(hud.lives, "Lives: 3");
    assert_eq!(hud.score, "Score: 7");
    assert_eq!(hud.level, "Level: 0");

    let canvas = compose_frame(&frame, 90, 30);
    let top = canvas.row_text(0);
    assert!(top.starts_with(" Lives: 3"));
    assert!(top.contains("Score: 7"));
    assert!(top.trim_end().ends_with("Level: 0"));
}

#[test]
fn player_and_health_bar_are_drawn() {
    let mut state = make_state();
    state.player.ship.health = -20;
    let canvas = compose_frame(&state.frame_view(), 90, 90);

    let mut yellow = 0;
    let mut green = 0;
    let mut red = 0;
    for row in 0..canvas.rows() {
        for col in 0..canvas.cols() {
            match canvas.tint(col, row) {
                Some(Tint::Yellow) => yellow += 1,
                Some(Tint::Green) => green += 1,
                Some(Tint::Red) => red += 1,
                _ => {}
            }
        }
    }
    assert!(yellow > 0);
    assert!(red > 0);
    assert_eq!(green, 0);
}

#[test]
fn loss_banner_only_when_lost() {
    let mut state = make_state();
    let canvas = compose_frame(&state.frame_view(), 90, 30);
    assert!(!canvas.row_text(15).contains(LOSS_BANNER));

    state.lost = true;
    let frame: Frame<'_> = state.frame_view();
    assert_eq!(frame.loss_banner(), Some(LOSS_BANNER));
    let canvas = compose_frame(&frame, 90, 30);
    assert!(canvas.row_text(15).contains(LOSS_BANNER));
}

// ── Terminal output ───────────────────────────────────────────────────────────

#[test]
fn terminal_renderer_writes_hud() {
    let state = make_state();
    let mut renderer = TerminalRenderer::new(Vec::new(), 90, 30);
    renderer.present(&state.frame_view()).unwrap();
    let written = String::from_utf8_lossy(renderer.get_ref()).into_owned();
    assert!(written.contains("Lives: 5"));
    assert!(written.contains("Score: 0"));
    assert!(written.contains("Level: 0"));
}

#[test]
fn intro_shows_title_and_prompt() {
    let mut out = Vec::new();
    render_intro(&mut out, 80, 24).unwrap();
    let written = String::from_utf8_lossy(&out).into_owned();
    assert!(written.contains(INTRO_TITLE));
    assert!(written.contains(INTRO_PROMPT));
}
