/// Terminal frontend: page shell, input dispatch and render loop
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{self, ClearType},
};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::str::FromStr;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use spinview_core::{
    ControlAction, Camera, Rgb, RotationMode, ShapeKind, Transform, Viewer, ViewerConfig,
    COLOR_PRESETS, ROTATE_STEP, SPEED_PRESETS,
};

pub mod pages;
pub mod renderer;

pub use pages::{Direction, PortfolioPage, SnakeGame, GRID_HEIGHT, GRID_WIDTH, PROJECTS};
pub use renderer::AsciiRenderer;

/// The navigable pages, in nav-bar order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Portfolio,
    Viewer,
    Snake,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Portfolio, Page::Viewer, Page::Snake];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Portfolio => "Portfolio",
            Page::Viewer => "Viewer",
            Page::Snake => "Snake",
        }
    }

    /// The next page in nav-bar order, wrapping around
    pub fn next(&self) -> Page {
        let index = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|p| p.title().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown page '{s}', expected home, portfolio, viewer or snake"))
    }
}

/// Map a key press on the viewer page to a control action. `preset_color` is
/// the color the preset cycler would pick next.
pub fn action_for_viewer_key(
    code: KeyCode,
    current_shape: ShapeKind,
    preset_color: Rgb,
) -> Option<ControlAction> {
    match code {
        KeyCode::Up => Some(ControlAction::Rotate {
            dx: ROTATE_STEP,
            dy: 0.0,
        }),
        KeyCode::Down => Some(ControlAction::Rotate {
            dx: -ROTATE_STEP,
            dy: 0.0,
        }),
        KeyCode::Left => Some(ControlAction::Rotate {
            dx: 0.0,
            dy: -ROTATE_STEP,
        }),
        KeyCode::Right => Some(ControlAction::Rotate {
            dx: 0.0,
            dy: ROTATE_STEP,
        }),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(ControlAction::ResetRotation),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(ControlAction::ToggleWireframe),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(ControlAction::SpeedUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(ControlAction::SpeedDown),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(ControlAction::ToggleHelp),
        KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(ControlAction::SetShape(current_shape.next()))
        }
        KeyCode::Char('c') | KeyCode::Char('C') => Some(ControlAction::SetColor(preset_color)),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            Some(ControlAction::SetSpeed(SPEED_PRESETS[index].value))
        }
        _ => None,
    }
}

/// Main application struct for the terminal shell
pub struct App {
    viewer: Viewer,
    camera: Camera,
    renderer: AsciiRenderer,
    page: Page,
    portfolio: PortfolioPage,
    snake: SnakeGame,
    color_cursor: usize,
    surface_generation: u64,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    frames_total: u32,
    fps: f32,
}

impl App {
    pub fn new(config: ViewerConfig, start_page: Page, light_mode: bool) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1);

        let mut viewer = Viewer::new(config);
        if light_mode {
            viewer.apply(ControlAction::ToggleLightMode);
        }
        let surface_generation = viewer.scene_generation();

        let mut app = Self {
            viewer,
            camera: Camera::new(width as u32, height as u32),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            page: Page::Home,
            portfolio: PortfolioPage::new(),
            snake: SnakeGame::new(seed),
            color_cursor: 0,
            surface_generation,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            frames_total: 0,
            fps: 0.0,
        };
        app.set_page(start_page);
        Ok(app)
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup happens on every exit path
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input before the frame reads any state
            while event::poll(Duration::from_millis(0))? {
                self.handle_event()?;
            }

            self.update(frame_start);
            self.render()?;

            self.frame_count += 1;
            self.frames_total = self.frames_total.wrapping_add(1);
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Resize(width, height) => {
                debug!("resize to {width}x{height}");
                self.camera.resize(width as u32, height as u32);
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.running = false;
                return;
            }
            KeyCode::Tab => {
                self.set_page(self.page.next());
                return;
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.viewer.apply(ControlAction::ToggleLightMode);
                return;
            }
            _ => {}
        }

        match self.page {
            Page::Viewer => {
                let preset = &COLOR_PRESETS[(self.color_cursor + 1) % COLOR_PRESETS.len()];
                if let Some(action) =
                    action_for_viewer_key(code, self.viewer.config().shape, preset.value)
                {
                    if matches!(action, ControlAction::SetColor(_)) {
                        self.color_cursor = (self.color_cursor + 1) % COLOR_PRESETS.len();
                    }
                    self.viewer.apply(action);
                }
            }
            Page::Snake => match code {
                KeyCode::Up => self.snake.steer(Direction::Up),
                KeyCode::Down => self.snake.steer(Direction::Down),
                KeyCode::Left => self.snake.steer(Direction::Left),
                KeyCode::Right => self.snake.steer(Direction::Right),
                KeyCode::Char('r') | KeyCode::Char('R') => self.snake.restart(),
                _ => {}
            },
            Page::Portfolio => {
                if let KeyCode::Char('r') | KeyCode::Char('R') = code {
                    self.portfolio.open(Instant::now());
                }
            }
            Page::Home => {}
        }
    }

    fn set_page(&mut self, page: Page) {
        if page != self.page {
            info!("navigating to {}", page.title());
        }
        self.page = page;
        if page == Page::Portfolio {
            self.portfolio.open(Instant::now());
        }
    }

    fn update(&mut self, now: Instant) {
        match self.page {
            Page::Viewer => {
                self.viewer.tick();
                // Any color/wireframe/shape change rebuilds the surface
                if self.viewer.scene_generation() != self.surface_generation {
                    self.renderer =
                        AsciiRenderer::new(self.renderer.width(), self.renderer.height());
                    self.surface_generation = self.viewer.scene_generation();
                }
            }
            Page::Portfolio => self.portfolio.poll(now),
            Page::Snake => self.snake.update(now),
            Page::Home => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();

        // The theme restyles every page, not just the viewer surface
        let (bg, fg) = if self.viewer.light_mode() {
            (Color::White, Color::Black)
        } else {
            (Color::Black, Color::White)
        };
        queue!(stdout, SetBackgroundColor(bg), SetForegroundColor(fg))?;

        match self.page {
            Page::Viewer => self.render_viewer(&mut stdout)?,
            Page::Home => self.render_home(&mut stdout)?,
            Page::Portfolio => self.render_portfolio(&mut stdout)?,
            Page::Snake => self.render_snake(&mut stdout)?,
        }

        queue!(stdout, SetBackgroundColor(bg))?;
        self.render_nav(&mut stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn render_nav<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, cursor::MoveTo(0, 0), terminal::Clear(ClearType::CurrentLine))?;
        for page in Page::ALL {
            if page == self.page {
                queue!(
                    writer,
                    SetForegroundColor(Color::Yellow),
                    SetAttribute(Attribute::Bold),
                    Print(format!(" [{}] ", page.title())),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?;
            } else {
                queue!(writer, Print(format!("  {}  ", page.title())))?;
            }
        }
        // The theme button always offers the opposite of the current mode
        let theme_label = if self.viewer.light_mode() {
            "[t] Dark Mode"
        } else {
            "[t] Light Mode"
        };
        queue!(
            writer,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("  |  Tab: switch  {theme_label}  q: quit")),
            ResetColor
        )?;
        Ok(())
    }

    fn render_viewer<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        let config = *self.viewer.config();
        let model = Transform::rotation_matrix(self.viewer.rotation());

        self.renderer.clear();
        if config.wireframe {
            self.renderer
                .render_wireframe(self.viewer.mesh(), &model, &self.camera, config.color);
        } else {
            self.renderer
                .render_mesh(self.viewer.mesh(), &model, &self.camera, config.color);
        }

        queue!(writer, cursor::MoveTo(0, 0))?;
        self.renderer.draw(writer, self.viewer.light_mode())?;

        // Status line mirrors the externally observable state
        let wireframe_label = if config.wireframe {
            "Disable Wireframe"
        } else {
            "Enable Wireframe"
        };
        let mode_label = match self.viewer.rotation_mode() {
            RotationMode::Auto => "auto",
            RotationMode::Manual => "manual",
        };
        let status = format!(
            " {} | {} | speed {:.3} | [w] {} | rotation: {} | FPS: {:.1} ",
            config.color.to_hex(),
            config.shape,
            config.rotation_speed,
            wireframe_label,
            mode_label,
            self.fps
        );
        let last_row = self.renderer.height().saturating_sub(1) as u16;
        queue!(
            writer,
            cursor::MoveTo(0, last_row),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        if self.viewer.help_visible() {
            self.render_help(writer)?;
        }
        Ok(())
    }

    fn render_help<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let lines = [
            "Keyboard Controls:",
            "  Arrow Keys  rotate shape",
            "  R           reset rotation",
            "  W           toggle wireframe",
            "  +/-         increase/decrease speed",
            "  1-4         speed presets",
            "  S           next shape",
            "  C           next color preset",
            "  H           toggle this help panel",
        ];
        for (i, line) in lines.iter().enumerate() {
            queue!(
                writer,
                cursor::MoveTo(2, 2 + i as u16),
                SetForegroundColor(Color::White),
                Print(line),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn render_home<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, terminal::Clear(ClearType::All))?;
        let lines = [
            "SpacePlushy",
            "",
            "A small portfolio site for the terminal.",
            "",
            "  Portfolio  project cards",
            "  Viewer     interactive 3D rotating shape",
            "  Snake      a little snake game",
            "",
            "Press Tab to move between pages, t to switch theme, q to quit.",
        ];
        for (i, line) in lines.iter().enumerate() {
            queue!(writer, cursor::MoveTo(4, 3 + i as u16), Print(line))?;
        }
        Ok(())
    }

    fn render_portfolio<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, terminal::Clear(ClearType::All))?;
        if self.portfolio.is_loading() {
            let glyph = PortfolioPage::spinner_glyph(self.frames_total);
            queue!(
                writer,
                cursor::MoveTo(4, 4),
                Print(format!("{glyph} Loading Portfolio..."))
            )?;
            return Ok(());
        }

        for (i, project) in PROJECTS.iter().enumerate() {
            let row = 3 + (i as u16) * 4;
            queue!(
                writer,
                cursor::MoveTo(4, row),
                SetAttribute(Attribute::Bold),
                Print(project.title),
                SetAttribute(Attribute::Reset),
                cursor::MoveTo(4, row + 1),
                Print(project.description),
                cursor::MoveTo(4, row + 2),
                SetForegroundColor(Color::DarkGrey),
                Print(project.link),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn render_snake<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, terminal::Clear(ClearType::All))?;
        let ox: u16 = 2;
        let oy: u16 = 2;

        // Border
        let horizontal: String = "-".repeat(GRID_WIDTH as usize + 2);
        queue!(writer, cursor::MoveTo(ox, oy - 1), Print(&horizontal))?;
        queue!(
            writer,
            cursor::MoveTo(ox, oy + GRID_HEIGHT as u16),
            Print(&horizontal)
        )?;
        for y in 0..GRID_HEIGHT as u16 {
            queue!(writer, cursor::MoveTo(ox, oy + y), Print("|"))?;
            queue!(
                writer,
                cursor::MoveTo(ox + GRID_WIDTH as u16 + 1, oy + y),
                Print("|")
            )?;
        }

        let (fx, fy) = self.snake.food();
        queue!(
            writer,
            cursor::MoveTo(ox + 1 + fx as u16, oy + fy as u16),
            SetForegroundColor(Color::Red),
            Print('*'),
            ResetColor
        )?;

        let head = self.snake.head();
        for &(x, y) in self.snake.body() {
            let glyph = if (x, y) == head { '@' } else { 'o' };
            queue!(
                writer,
                cursor::MoveTo(ox + 1 + x as u16, oy + y as u16),
                SetForegroundColor(Color::Green),
                Print(glyph),
                ResetColor
            )?;
        }

        queue!(
            writer,
            cursor::MoveTo(ox, oy + GRID_HEIGHT as u16 + 1),
            Print(format!("Score: {}", self.snake.score()))
        )?;
        if !self.snake.is_alive() {
            queue!(
                writer,
                cursor::MoveTo(ox, oy + GRID_HEIGHT as u16 + 2),
                SetForegroundColor(Color::Red),
                Print("Game over - press r to restart"),
                ResetColor
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cycle_order() {
        let mut page = Page::Home;
        let mut seen = Vec::new();
        for _ in 0..Page::ALL.len() {
            seen.push(page);
            page = page.next();
        }
        assert_eq!(page, Page::Home);
        assert_eq!(seen, Page::ALL.to_vec());
    }

    #[test]
    fn test_page_from_str() {
        assert_eq!("home".parse::<Page>().unwrap(), Page::Home);
        assert_eq!("Portfolio".parse::<Page>().unwrap(), Page::Portfolio);
        assert_eq!("SNAKE".parse::<Page>().unwrap(), Page::Snake);
        assert!("about".parse::<Page>().is_err());
    }

    #[test]
    fn test_arrow_keys_map_to_fixed_deltas() {
        let color = Rgb::new(0, 136, 255);
        let cases = [
            (KeyCode::Up, (ROTATE_STEP, 0.0)),
            (KeyCode::Down, (-ROTATE_STEP, 0.0)),
            (KeyCode::Left, (0.0, -ROTATE_STEP)),
            (KeyCode::Right, (0.0, ROTATE_STEP)),
        ];
        for (code, (dx, dy)) in cases {
            assert_eq!(
                action_for_viewer_key(code, ShapeKind::Cube, color),
                Some(ControlAction::Rotate { dx, dy })
            );
        }
    }

    #[test]
    fn test_letter_keys_are_case_insensitive() {
        let color = Rgb::new(0, 136, 255);
        for code in [KeyCode::Char('r'), KeyCode::Char('R')] {
            assert_eq!(
                action_for_viewer_key(code, ShapeKind::Cube, color),
                Some(ControlAction::ResetRotation)
            );
        }
        for code in [KeyCode::Char('w'), KeyCode::Char('W')] {
            assert_eq!(
                action_for_viewer_key(code, ShapeKind::Cube, color),
                Some(ControlAction::ToggleWireframe)
            );
        }
    }

    #[test]
    fn test_speed_keys() {
        let color = Rgb::new(0, 136, 255);
        for code in [KeyCode::Char('+'), KeyCode::Char('=')] {
            assert_eq!(
                action_for_viewer_key(code, ShapeKind::Cube, color),
                Some(ControlAction::SpeedUp)
            );
        }
        for code in [KeyCode::Char('-'), KeyCode::Char('_')] {
            assert_eq!(
                action_for_viewer_key(code, ShapeKind::Cube, color),
                Some(ControlAction::SpeedDown)
            );
        }
        assert_eq!(
            action_for_viewer_key(KeyCode::Char('2'), ShapeKind::Cube, color),
            Some(ControlAction::SetSpeed(SPEED_PRESETS[1].value))
        );
    }

    #[test]
    fn test_shape_key_cycles_from_current() {
        let color = Rgb::new(0, 136, 255);
        assert_eq!(
            action_for_viewer_key(KeyCode::Char('s'), ShapeKind::Dodecahedron, color),
            Some(ControlAction::SetShape(ShapeKind::Cube))
        );
    }

    #[test]
    fn test_unbound_keys_do_nothing() {
        let color = Rgb::new(0, 136, 255);
        assert_eq!(
            action_for_viewer_key(KeyCode::Char('z'), ShapeKind::Cube, color),
            None
        );
        assert_eq!(
            action_for_viewer_key(KeyCode::Enter, ShapeKind::Cube, color),
            None
        );
    }
}
