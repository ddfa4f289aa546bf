/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The 800x600 pixel world maps onto a fixed character grid: 10 world
/// pixels per column, 20 per row, giving an 80x30 playfield that fits a
/// standard terminal with room for the HUD and message rows.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::geom::{Rect, WORLD_H, WORLD_W};
use crate::sim::world::{Phase, WorldState};

// ── World-to-grid scale ──

const PX_PER_COL: i32 = 10;
const PX_PER_ROW: i32 = 20;
const GRID_W: usize = (WORLD_W / PX_PER_COL) as usize; // 80
const GRID_H: usize = (WORLD_H / PX_PER_ROW) as usize; // 30

/// Vertical layout: HUD on top, playfield below, message line under it.
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
const MSG_ROW: usize = MAP_ROW + GRID_H + 1;

const PURSUER_COLORS: [Color; 4] = [Color::Red, Color::Magenta, Color::Cyan, Color::DarkYellow];

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" cells, so the cleared
    /// screen and cell backgrounds match exactly on every terminal.
    const BASE_BG: Color = Color::Rgb { r: 12, g: 12, b: 24 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color) -> Self {
        Cell { ch, fg, bg: Cell::BASE_BG }
    }

    fn block(bg: Color) -> Self {
        Cell { ch: ' ', fg: Color::White, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::new(ch, fg));
            cx += 1;
        }
    }

    fn put_str_centered(&mut self, y: usize, s: &str, fg: Color) {
        let x = self.width.saturating_sub(s.chars().count()) / 2;
        self.put_str(x, y, s, fg);
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Phase change → clear for a clean transition
        if self.last_phase != Some(world.phase) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(world.phase);
        }

        self.front.clear();
        match world.phase {
            Phase::Title => self.compose_title(world),
            Phase::Playing => self.compose_game(world),
            Phase::GameOver => self.compose_game_over(world),
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                let mut buf = [0u8; 4];
                queue!(self.writer, Print(&*cell.ch.encode_utf8(&mut buf)))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Coordinate mapping ──

    /// The grid cell under the center of a world rectangle.
    fn center_cell(rect: &Rect) -> (usize, usize) {
        let cx = ((rect.x + rect.w / 2) / PX_PER_COL).clamp(0, GRID_W as i32 - 1) as usize;
        let cy = ((rect.y + rect.h / 2) / PX_PER_ROW).clamp(0, GRID_H as i32 - 1) as usize;
        (cx, MAP_ROW + cy)
    }

    /// Fill every grid cell a world rectangle covers.
    fn fill_rect(&mut self, rect: &Rect, cell: Cell) {
        let col_a = (rect.x / PX_PER_COL).max(0);
        let col_b = ((rect.x + rect.w - 1) / PX_PER_COL).min(GRID_W as i32 - 1);
        let row_a = (rect.y / PX_PER_ROW).max(0);
        let row_b = ((rect.y + rect.h - 1) / PX_PER_ROW).min(GRID_H as i32 - 1);
        for row in row_a..=row_b {
            for col in col_a..=col_b {
                self.front.set(col as usize, MAP_ROW + row as usize, cell);
            }
        }
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, w: &WorldState) {
        // HUD
        let hud = format!(
            " Score:{:<6} Level:{:<3} Lives:{:<2} Pickups left:{:<3}",
            w.score,
            w.level,
            w.lives,
            w.pickups_remaining(),
        );
        self.front.put_str(0, HUD_ROW, &hud, Color::White);

        // Walls
        for wall in w.maze.walls() {
            self.fill_rect(wall, Cell::block(Color::DarkBlue));
        }

        // Pickups
        for pickup in &w.pickups {
            if pickup.visible {
                let (cx, cy) = Self::center_cell(&pickup.rect());
                self.front.set(cx, cy, Cell::new('·', Color::Yellow));
            }
        }

        // Pursuers, each in its roster color
        for (i, pursuer) in w.pursuers.iter().enumerate() {
            let (cx, cy) = Self::center_cell(&pursuer.rect());
            let color = PURSUER_COLORS[i % PURSUER_COLORS.len()];
            self.front.set(cx, cy, Cell::new('M', color));
        }

        // Player on top
        let (px, py) = Self::center_cell(&w.player.rect());
        self.front.set(px, py, Cell::new('C', Color::Yellow));

        // Status message
        if !w.message.is_empty() {
            self.front.put_str_centered(MSG_ROW, &w.message, Color::Yellow);
        }
    }

    fn compose_title(&mut self, w: &WorldState) {
        let mid = self.term_h / 2;
        self.front.put_str_centered(mid.saturating_sub(4), "C H O M P E R", Color::Yellow);
        self.front.put_str_centered(
            mid.saturating_sub(2),
            "Collect every pickup. Dodge the pursuers.",
            Color::White,
        );
        self.front.put_str_centered(mid, "Arrows / WASD to move", Color::Grey);
        self.front.put_str_centered(mid + 2, "[Enter] Start    [Esc] Quit", Color::Green);
        if !w.message.is_empty() {
            self.front.put_str_centered(mid + 4, &w.message, Color::Yellow);
        }
    }

    fn compose_game_over(&mut self, w: &WorldState) {
        let mid = self.term_h / 2;
        self.front.put_str_centered(mid.saturating_sub(3), "G A M E   O V E R", Color::Red);
        self.front.put_str_centered(
            mid.saturating_sub(1),
            &format!("Final score: {}   Level reached: {}", w.score, w.level),
            Color::White,
        );
        self.front.put_str_centered(mid + 2, "[Enter] Play again    [Esc] Quit", Color::Green);
    }
}
