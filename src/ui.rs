use std::{
    io::{self, Stdout},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::{DateTime, Local};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, BorderType, Borders, Paragraph,
    },
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use crate::error::ResourceError;
use crate::font::LabelFont;
use crate::layout::{Point, Rect, Viewport};
use crate::surface::{DrawCommand, Surface, SurfaceEvent};

// Raw mode + alternate screen, restored on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter(title: &str) -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, SetTitle(title))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

/// Terminal-backed surface: the alternate screen is the window and a braille
/// canvas spanning the viewport is the drawing area.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    guard: Option<TerminalGuard>,
    close_flag: Arc<AtomicBool>,
    viewport: Viewport,
    title: String,
    scene: Vec<DrawCommand>,
    frames: u64,
    open: bool,
}

impl TerminalSurface<CrosstermBackend<Stdout>> {
    /// Takes over the controlling terminal. SIGINT becomes a close request.
    pub fn open(viewport: Viewport, title: &str) -> Result<Self, ResourceError> {
        let close_flag = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&close_flag);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

        let guard = TerminalGuard::enter(title)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut surface = Self::build(backend, viewport, title, close_flag)?;
        surface.guard = Some(guard);
        surface.terminal.hide_cursor()?;

        info!(
            width = viewport.width,
            height = viewport.height,
            title,
            "terminal surface opened"
        );
        Ok(surface)
    }
}

impl<B: Backend> TerminalSurface<B> {
    /// Surface over an arbitrary backend without touching the real terminal.
    /// Keyboard input is not polled; close requests come through `close_handle`.
    pub fn headless(backend: B, viewport: Viewport, title: &str) -> Result<Self, ResourceError> {
        Self::build(backend, viewport, title, Arc::new(AtomicBool::new(false)))
    }

    fn build(
        backend: B,
        viewport: Viewport,
        title: &str,
        close_flag: Arc<AtomicBool>,
    ) -> Result<Self, ResourceError> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            guard: None,
            close_flag,
            viewport,
            title: title.to_string(),
            scene: Vec::new(),
            frames: 0,
            open: true,
        })
    }

    pub fn close_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.close_flag)
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    fn poll_terminal(&mut self) -> Option<SurfaceEvent> {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if is_close_key(&key) => {
                        return Some(SurfaceEvent::CloseRequested)
                    }
                    Ok(_) => continue,
                    Err(err) => {
                        warn!(%err, "failed to read terminal event");
                        return None;
                    }
                },
                Ok(false) => return None,
                Err(err) => {
                    warn!(%err, "failed to poll terminal events");
                    return None;
                }
            }
        }
    }
}

fn is_close_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    type Font = LabelFont;

    fn poll_event(&mut self) -> Option<SurfaceEvent> {
        if self.close_flag.swap(false, Ordering::SeqCst) {
            return Some(SurfaceEvent::CloseRequested);
        }
        if self.guard.is_some() {
            self.poll_terminal()
        } else {
            None
        }
    }

    fn clear(&mut self, color: Color) {
        self.scene.clear();
        self.scene.push(DrawCommand::Clear(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.scene.push(DrawCommand::Rect { rect, color });
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: &LabelFont,
        size: f32,
        position: Point,
        color: Color,
    ) {
        self.scene.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            extent: font.text_width(text, size),
            color,
        });
    }

    fn present(&mut self) -> Result<(), ResourceError> {
        let now = Local::now();
        self.frames += 1;

        let status = StatusLine {
            frames: self.frames,
            at: now,
        };
        let (scene, viewport, title) = (&self.scene, self.viewport, self.title.as_str());
        self.terminal
            .draw(|f| render_scene(f, scene, viewport, title, &status))?;
        debug!(frame = self.frames, commands = self.scene.len(), "frame presented");
        Ok(())
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.scene.clear();
        if let Err(err) = self.terminal.show_cursor() {
            warn!(%err, "failed to restore cursor");
        }
        self.guard.take();
        info!(frames = self.frames, "terminal surface closed");
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

impl<B: Backend> Drop for TerminalSurface<B> {
    fn drop(&mut self) {
        self.close();
    }
}

struct StatusLine {
    frames: u64,
    at: DateTime<Local>,
}

/// Rightmost-safe x for a label of `chars` cells on a canvas `cols` cells wide.
///
/// The canvas puts a label at column `floor(x * (cols - 1) / viewport_width)`
/// and clips it at the right border, so the label must start at or before
/// column `cols - chars`. The font extent must also fit in the viewport.
fn fit_label_x(x: f64, chars: usize, extent: f64, viewport_width: f64, cols: u16) -> f64 {
    let cols = f64::from(cols.max(2));
    let cell_limit = (cols - chars as f64) * viewport_width / (cols - 1.0);
    x.min(cell_limit).min(viewport_width - extent).max(0.0)
}

fn render_scene(
    f: &mut Frame,
    scene: &[DrawCommand],
    viewport: Viewport,
    title: &str,
    status: &StatusLine,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(f.size());

    let background = scene
        .iter()
        .rev()
        .find_map(|cmd| match cmd {
            DrawCommand::Clear(color) => Some(*color),
            _ => None,
        })
        .unwrap_or(Color::Reset);

    // braille gives two dot columns per cell; fill bars at that resolution
    let inner_columns = chunks[0].width.saturating_sub(2);
    let step = viewport.width / (f64::from(inner_columns.max(1)) * 2.0);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(format!(" {} ", title))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .background_color(background)
        .marker(Marker::Braille)
        .x_bounds([0.0, viewport.width])
        .y_bounds([0.0, viewport.height])
        .paint(|ctx| {
            for cmd in scene {
                match cmd {
                    DrawCommand::Clear(_) => {}
                    DrawCommand::Rect { rect, color } => {
                        if rect.height <= 0.0 {
                            continue;
                        }
                        // canvas y grows upward, screen y grows downward
                        let bottom = viewport.height - (rect.y + rect.height);
                        let top = viewport.height - rect.y;
                        let mut x = rect.x;
                        while x <= rect.x + rect.width {
                            ctx.draw(&CanvasLine {
                                x1: x,
                                y1: bottom,
                                x2: x,
                                y2: top,
                                color: *color,
                            });
                            x += step;
                        }
                    }
                    DrawCommand::Text {
                        text,
                        position,
                        extent,
                        color,
                    } => {
                        let x = fit_label_x(
                            position.x,
                            text.chars().count(),
                            *extent,
                            viewport.width,
                            inner_columns,
                        );
                        ctx.print(
                            x,
                            viewport.height - position.y,
                            Span::styled(text.clone(), Style::default().fg(*color)),
                        );
                    }
                }
            }
        });
    f.render_widget(canvas, chunks[0]);

    let status_content = Line::from(vec![
        Span::styled(
            " BANDWIDTH ",
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | frame {} ", status.frames)),
        Span::styled(
            format!("(@{})", status.at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" | Press 'q' to quit"),
    ]);
    let status_bar =
        Paragraph::new(status_content).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(status_bar, chunks[1]);
}
