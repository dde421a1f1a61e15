use glam::{IVec3, Vec3};
use tetris3d::core::{Block, BlockKind, GameConfig, GameSnapshot, GameState, Phase, Rgb8};
use tetris3d::term::{GameView, Viewport};

// 3x3x4 board, cell_w 2: front and top frames are 8 wide, the front is 6
// tall. With the 22 column panel and two gaps of 2 the layout is exactly 42
// columns, so everything starts at x = 0.
const VP: Viewport = Viewport {
    width: 42,
    height: 6,
};
const TOP_X: u16 = 10;
const PANEL_X: u16 = 20;

fn small_state() -> GameState {
    GameState::new(&GameConfig {
        board_width: 3,
        board_depth: 3,
        board_height: 4,
        ..GameConfig::default()
    })
}

fn ch(fb: &tetris3d::term::FrameBuffer, x: u16, y: u16) -> char {
    fb.get(x, y).map(|c| c.ch).unwrap_or('?')
}

#[test]
fn term_view_renders_front_frame_corners() {
    let snap = small_state().snapshot();
    let fb = GameView::default().render(&snap, Vec3::NEG_Z, VP);

    assert_eq!(ch(&fb, 0, 0), '┌');
    assert_eq!(ch(&fb, 7, 0), '┐');
    assert_eq!(ch(&fb, 0, 5), '└');
    assert_eq!(ch(&fb, 7, 5), '┘');
    assert!(fb.row_text(0).starts_with("┌─FRONT┐"));
    assert_eq!(ch(&fb, TOP_X, 0), '┌');
    assert_eq!(ch(&fb, TOP_X + 7, 4), '┘');
}

#[test]
fn term_view_renders_settled_cell_two_chars_wide() {
    let mut state = small_state();
    state.board.fill(IVec3::new(0, 0, 1), Rgb8::new(200, 10, 10).pack());
    let snap = state.snapshot();

    let fb = GameView::default().render(&snap, Vec3::NEG_Z, VP);

    // Looking along -z, x runs left to right and the floor is the last row
    assert_eq!(ch(&fb, 1, 4), '█');
    assert_eq!(ch(&fb, 2, 4), '█');
    assert_eq!(ch(&fb, 3, 4), '·');
    assert_eq!(ch(&fb, 1, 3), '·');
}

#[test]
fn term_view_nearest_cell_wins_and_far_cells_are_darker() {
    let mut near = small_state();
    near.board.fill(IVec3::new(0, 0, 2), Rgb8::new(200, 200, 200).pack());
    let mut far = small_state();
    far.board.fill(IVec3::new(0, 0, 0), Rgb8::new(200, 200, 200).pack());

    let view = GameView::default();
    let fb_near = view.render(&near.snapshot(), Vec3::NEG_Z, VP);
    let fb_far = view.render(&far.snapshot(), Vec3::NEG_Z, VP);

    let near_cell = fb_near.get(1, 4).expect("cell");
    let far_cell = fb_far.get(1, 4).expect("cell");
    assert_eq!(near_cell.ch, '█');
    assert_eq!(far_cell.ch, '█');
    assert!(far_cell.style.fg.r < near_cell.style.fg.r);
}

#[test]
fn term_view_block_and_ghost() {
    let mut state = small_state();
    state.falling_block = Some(Block::new(BlockKind::T, Rgb8::new(0, 255, 0), IVec3::new(1, 2, 1)));
    state.phase = Phase::BlockFalling;
    let snap = state.snapshot();
    assert_eq!(snap.ghost_cells.len(), 4);

    let fb = GameView::default().render(&snap, Vec3::NEG_Z, VP);

    // Block row y = 2 is screen row 1 + (3 - 2)
    assert_eq!(fb.row_text(2).chars().skip(1).take(6).collect::<String>(), "██████");
    // Ghost landed on the floor
    assert_eq!(fb.row_text(4).chars().skip(1).take(6).collect::<String>(), "░░░░░░");
}

#[test]
fn term_view_top_view_puts_far_side_up() {
    let mut state = small_state();
    state.board.fill(IVec3::new(0, 0, 0), Rgb8::new(50, 50, 200).pack());
    let snap = state.snapshot();

    // Looking along -z the far side is z = 0
    let fb = GameView::default().render(&snap, Vec3::NEG_Z, VP);
    assert_eq!(ch(&fb, TOP_X + 1, 1), '█');
    assert_eq!(ch(&fb, TOP_X + 1, 3), '·');

    // Looking along +z the far side is z = 2 and x runs right to left
    let fb = GameView::default().render(&snap, Vec3::Z, VP);
    assert_eq!(ch(&fb, TOP_X + 1 + 4, 3), '█');
    assert_eq!(ch(&fb, TOP_X + 1, 1), '·');
}

#[test]
fn term_view_turns_with_camera() {
    let mut state = small_state();
    state.board.fill(IVec3::new(2, 0, 0), Rgb8::new(90, 90, 90).pack());
    let snap = state.snapshot();

    // Looking along +x, z runs left to right
    let fb = GameView::default().render(&snap, Vec3::X, VP);
    assert_eq!(ch(&fb, 1, 4), '█');
    assert_eq!(ch(&fb, 5, 4), '·');
}

#[test]
fn term_view_draws_lost_overlay() {
    let mut state = small_state();
    state.phase = Phase::Lost;
    let fb = GameView::default().render(&state.snapshot(), Vec3::NEG_Z, VP);
    assert!(fb.row_text(3).contains("LOST"));
    assert_eq!(ch(&fb, 2, 3), 'L');
    assert!(fb.row_text(1).contains("lost"));
}

#[test]
fn term_view_draws_paused_overlay() {
    let mut state = small_state();
    state.paused = true;
    let fb = GameView::default().render(&state.snapshot(), Vec3::NEG_Z, VP);
    assert_eq!(ch(&fb, 1, 3), 'P');
    assert!(fb.row_text(3).contains("PAUSED"));
    assert!(fb.row_text(1).contains("paused"));
}

fn panel_state() -> GameState {
    let mut state = small_state();
    state.total_time = 12.7;
    state.block_current_speed = 0.25;
    state.falling_block = Some(Block::new(
        BlockKind::L,
        Rgb8::new(10, 20, 30),
        IVec3::new(1, 1, 1),
    ));
    state.phase = Phase::BlockFalling;
    state
}

fn hinted_view() -> GameView {
    GameView::default().with_hints(vec![("a".to_string(), "rotate cw".to_string())])
}

#[test]
fn term_view_draws_side_panel() {
    let fb = hinted_view().render(&panel_state().snapshot(), Vec3::NEG_Z, Viewport::new(42, 24));

    // The front frame is centered vertically: (24 - 6) / 2
    let y0 = 9;
    assert_eq!(ch(&fb, 0, y0), '┌');
    let panel = |dy: u16| -> String {
        fb.row_text(y0 + dy).chars().skip(PANEL_X as usize).collect()
    };
    assert!(panel(0).starts_with("PHASE"));
    assert!(panel(1).starts_with("falling"));
    assert!(panel(3).starts_with("TIME"));
    assert!(panel(4).starts_with("12s"));
    assert!(panel(6).starts_with("FALL STEP"));
    assert!(panel(7).starts_with("250ms"));
    assert!(panel(9).starts_with("BLOCK"));
    assert_eq!(panel(10).trim_end(), "l");
    assert!(panel(12).starts_with("KEYS"));
    assert_eq!(panel(13).trim_end(), "a      rotate cw");
}

#[test]
fn term_view_clips_side_panel_on_short_viewport() {
    let vp = Viewport::new(42, 16);
    let fb = hinted_view().render(&panel_state().snapshot(), Vec3::NEG_Z, vp);

    // Frame starts at (16 - 6) / 2 = 5; the block kind is on the last row
    assert_eq!(ch(&fb, 0, 5), '┌');
    let last: String = fb.row_text(15).chars().skip(PANEL_X as usize).collect();
    assert_eq!(last.trim_end(), "l");
    for y in 0..vp.height {
        let row = fb.row_text(y);
        assert!(!row.contains("KEYS"), "row {y}: {row}");
        assert!(!row.contains("rotate cw"), "row {y}: {row}");
    }
}

#[test]
fn term_view_render_into_reuses_framebuffer() {
    let snap: GameSnapshot = small_state().snapshot();
    let view = GameView::default();
    let mut fb = tetris3d::term::FrameBuffer::new(0, 0);
    view.render_into(&snap, Vec3::NEG_Z, VP, &mut fb);
    let first = fb.clone();
    view.render_into(&snap, Vec3::NEG_Z, VP, &mut fb);
    assert_eq!(fb, first);
    assert_eq!((fb.width(), fb.height()), (42, 6));
}
