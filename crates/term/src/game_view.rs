//! GameView: maps a `GameSnapshot` and a view direction into a terminal
//! framebuffer.
//!
//! Two projections are drawn side by side:
//!
//! - **front**: the board seen along the camera's dominant horizontal axis.
//!   For every screen cell the nearest occupied board cell wins; settled cells
//!   further away are drawn darker.
//! - **top**: a height map seen from above, rotated so that "away from the
//!   camera" is up on screen.
//!
//! This module is pure (no I/O).

use glam::{IVec3, Vec3};

use crate::camera::ScreenAxes;
use crate::core::{GameSnapshot, Phase, Rgb8};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PANEL_W: u16 = 22;
const GAP: u16 = 2;

const BLOCK_GLYPH: char = '█';
const GHOST_GLYPH: char = '░';
const EMPTY_GLYPH: char = '·';

const BORDER: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: CellStyle = CellStyle {
    fg: Rgb::new(220, 220, 220),
    bg: Rgb::new(0, 0, 0),
    bold: true,
    dim: false,
};
const VALUE: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

fn empty_style(bg: Rgb) -> CellStyle {
    CellStyle::plain(Rgb::new(90, 90, 100), bg).dimmed()
}

/// Background tint of the play areas
pub fn backdrop(snap: &GameSnapshot) -> Rgb {
    if snap.phase == Phase::Lost {
        Rgb::new(70, 18, 18)
    } else if snap.phase == Phase::LayersErase {
        Rgb::new(30, 80, 45)
    } else if snap.paused {
        Rgb::new(20, 30, 70)
    } else {
        Rgb::new(30, 30, 40)
    }
}

/// What the front projection shows at one screen cell
#[derive(Debug, Clone, Copy, PartialEq)]
enum Hit {
    Block,
    Settled { value: u32, depth: i32 },
    Ghost,
    Empty,
}

/// Board coordinate of the `i`-th cell along `axis`, counting from the
/// smallest coordinate when the axis points positive
fn axis_coord(axis: IVec3, i: i32, extent: i32) -> i32 {
    if axis.x + axis.z > 0 {
        i
    } else {
        extent - 1 - i
    }
}

fn set_axis(p: &mut IVec3, axis: IVec3, value: i32) {
    if axis.x != 0 {
        p.x = value;
    } else {
        p.z = value;
    }
}

fn extent(snap: &GameSnapshot, axis: IVec3) -> i32 {
    if axis.x != 0 {
        snap.width
    } else {
        snap.depth
    }
}

/// A terminal renderer for the 3D board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// `(key, action)` lines shown under the status panel
    hints: Vec<(String, String)>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            hints: Vec::new(),
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            hints: Vec::new(),
        }
    }

    pub fn with_hints(mut self, hints: Vec<(String, String)>) -> Self {
        self.hints = hints;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Allocation-free once the framebuffer has its final size.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        view_dir: Vec3,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));
        if snap.width <= 0 || snap.depth <= 0 || snap.height <= 0 {
            return;
        }

        let axes = ScreenAxes::from_view(view_dir);
        let cols = extent(snap, axes.right) as u16;
        let rows_top = extent(snap, axes.away) as u16;

        let front_w = cols * self.cell_w + 2;
        let front_h = snap.height as u16 + 2;
        let top_w = front_w;
        let top_h = rows_top + 2;

        let total_w = front_w + GAP + top_w + GAP + PANEL_W;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(front_h) / 2;
        let top_x = start_x + front_w + GAP;
        let panel_x = top_x + top_w + GAP;

        let bg = backdrop(snap);
        self.draw_frame(fb, start_x, start_y, front_w, front_h, "FRONT", bg);
        self.draw_frame(fb, top_x, start_y, top_w, top_h, "TOP", bg);

        self.draw_front(fb, snap, axes, start_x + 1, start_y + 1, bg);
        self.draw_top(fb, snap, axes, top_x + 1, start_y + 1, bg);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        if snap.phase == Phase::Lost {
            self.draw_overlay_text(fb, start_x, start_y, front_w, front_h, "LOST");
        } else if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, front_w, front_h, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, view_dir: Vec3, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, view_dir, viewport, &mut fb);
        fb
    }

    fn draw_frame(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        title: &str,
        bg: Rgb,
    ) {
        let fill = CellStyle::plain(bg, bg);
        fb.fill_rect(x + 1, y + 1, w.saturating_sub(2), h.saturating_sub(2), ' ', fill);
        self.draw_border(fb, x, y, w, h, BORDER);
        fb.put_str(x + 2, y, title, LABEL);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for cx in x + 1..right {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
    }

    fn front_hit(&self, snap: &GameSnapshot, axes: ScreenAxes, col: i32, y: i32) -> Hit {
        let cols = extent(snap, axes.right);
        let depth_len = extent(snap, axes.away);

        let mut p = IVec3::new(0, y, 0);
        set_axis(&mut p, axes.right, axis_coord(axes.right, col, cols));
        for d in 0..depth_len {
            set_axis(&mut p, axes.away, axis_coord(axes.away, d, depth_len));
            if snap.is_block_cell(p) {
                return Hit::Block;
            }
            if let Some(value) = snap.cell(p).filter(|&v| v != 0) {
                return Hit::Settled { value, depth: d };
            }
            if snap.is_ghost_cell(p) {
                return Hit::Ghost;
            }
        }
        Hit::Empty
    }

    fn draw_front(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        axes: ScreenAxes,
        x0: u16,
        y0: u16,
        bg: Rgb,
    ) {
        let cols = extent(snap, axes.right);
        let depth_len = extent(snap, axes.away);
        let block_fg = Rgb::from(snap.block_color);

        for row in 0..snap.height {
            let y = snap.height - 1 - row;
            for col in 0..cols {
                let (ch, style) = match self.front_hit(snap, axes, col, y) {
                    Hit::Block => (BLOCK_GLYPH, CellStyle::plain(block_fg, bg).bold()),
                    Hit::Settled { value, depth } => {
                        let shade = 1.0 - 0.55 * depth as f32 / (depth_len - 1).max(1) as f32;
                        let fg = Rgb::from(Rgb8::from_packed(value)).scaled(shade);
                        (BLOCK_GLYPH, CellStyle::plain(fg, bg))
                    }
                    Hit::Ghost => {
                        let fg = block_fg.mix(bg, 0.4);
                        (GHOST_GLYPH, CellStyle::plain(fg, bg).dimmed())
                    }
                    Hit::Empty => (EMPTY_GLYPH, empty_style(bg)),
                };
                self.fill_cell_rect(fb, x0, y0, col as u16, row as u16, ch, style);
            }
        }
    }

    fn draw_top(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        axes: ScreenAxes,
        x0: u16,
        y0: u16,
        bg: Rgb,
    ) {
        let cols = extent(snap, axes.right);
        let rows = extent(snap, axes.away);
        let block_fg = Rgb::from(snap.block_color);

        for row in 0..rows {
            // Top of the screen is the far side
            let d = rows - 1 - row;
            for col in 0..cols {
                let mut p = IVec3::ZERO;
                set_axis(&mut p, axes.right, axis_coord(axes.right, col, cols));
                set_axis(&mut p, axes.away, axis_coord(axes.away, d, rows));

                let under_block = snap
                    .block_cells
                    .iter()
                    .any(|c| c.x == p.x && c.z == p.z);
                let (ch, style) = if under_block {
                    (BLOCK_GLYPH, CellStyle::plain(block_fg, bg).bold())
                } else if let Some((y, value)) = top_settled(snap, p.x, p.z) {
                    let shade = 0.35 + 0.65 * (y + 1) as f32 / snap.height as f32;
                    let fg = Rgb::from(Rgb8::from_packed(value)).scaled(shade);
                    (BLOCK_GLYPH, CellStyle::plain(fg, bg))
                } else {
                    (EMPTY_GLYPH, empty_style(bg))
                };
                self.fill_cell_rect(fb, x0, y0, col as u16, row as u16, ch, style);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y0: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        fb.fill_rect(x0 + cell_x * self.cell_w, y0 + cell_y, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut y = start_y;
        fb.put_str(panel_x, y, "PHASE", LABEL);
        y += 1;
        let phase = if snap.paused && snap.phase != Phase::Lost {
            "paused"
        } else {
            snap.phase.as_str()
        };
        fb.put_str(panel_x, y, phase, VALUE);
        y += 2;

        fb.put_str(panel_x, y, "TIME", LABEL);
        y += 1;
        let n = fb.put_u32(panel_x, y, snap.total_time.max(0.0) as u32, VALUE);
        fb.put_char(panel_x + n, y, 's', VALUE);
        y += 2;

        fb.put_str(panel_x, y, "FALL STEP", LABEL);
        y += 1;
        let ms = (snap.fall_step_seconds.max(0.0) * 1000.0).round() as u32;
        let n = fb.put_u32(panel_x, y, ms, VALUE);
        fb.put_str(panel_x + n, y, "ms", VALUE);
        y += 2;

        fb.put_str(panel_x, y, "BLOCK", LABEL);
        y += 1;
        let kind = snap.block_kind.map(|k| k.as_str()).unwrap_or("-");
        let kind_style = CellStyle::plain(Rgb::from(snap.block_color), Rgb::new(0, 0, 0));
        fb.put_str(panel_x, y, kind, kind_style);
        y += 2;

        if self.hints.is_empty() {
            return;
        }
        fb.put_str(panel_x, y, "KEYS", LABEL);
        y += 1;
        let dim = VALUE.dimmed();
        for (key, action) in &self.hints {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, VALUE);
            fb.put_str(panel_x + 7, y, action, dim);
            y += 1;
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Highest settled cell of a column, as `(y, packed value)`
fn top_settled(snap: &GameSnapshot, x: i32, z: i32) -> Option<(i32, u32)> {
    (0..snap.height)
        .rev()
        .find_map(|y| snap.cell(IVec3::new(x, y, z)).filter(|&v| v != 0).map(|v| (y, v)))
}
