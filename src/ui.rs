use crate::action::Action;
use crate::args::{CompareMode, EditorArgs};
use crate::bit_grid::{GRID_SIZE, BitGrid};
use crate::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use crate::codec::{self, Encoding};
use crate::dialog::{CompareDialog, Modal, ModalOutcome};
use crate::editor::EditorState;
use crate::error::CompareError;
use crate::image_import::load_image;
use crate::input_state::InputState;
use crate::layout::{CELL_WIDTH, ScreenLayout};
use crate::view_mode::ViewMode;
use color_eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Color::*;
use ratatui::style::{Color, Style};
use ratatui::{
    DefaultTerminal, Frame,
    style::Stylize,
    text::Line,
    widgets::{Block, Clear, Paragraph, Wrap},
};
use std::path::Path;

/// Turns mouse capture and bracketed paste off again however the loop ends.
struct TerminalGuard;

impl TerminalGuard {
    fn enable() -> Result<Self> {
        let mut stdout = std::io::stdout();
        stdout.execute(event::EnableMouseCapture)?;
        stdout.execute(event::EnableBracketedPaste)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(event::DisableBracketedPaste);
        let _ = stdout.execute(event::DisableMouseCapture);
    }
}

pub fn main(args: EditorArgs) -> Result<()> {
    let clipboard: Box<dyn Clipboard> = if args.local_clipboard {
        Box::new(MemoryClipboard::default())
    } else {
        Box::new(SystemClipboard::default())
    };
    let mut app = App::new(args.compare, clipboard);
    if let Some(path) = &args.image {
        app.import_image(path);
    }

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    editor: EditorState,
    input_state: InputState,
    layout: ScreenLayout,
    /// Open dialog. Input goes here first.
    modal: Option<Modal>,
    clipboard: Box<dyn Clipboard>,
    last_image: String,
    status: String,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(compare: CompareMode, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            running: true,
            editor: EditorState::new(compare),
            input_state: InputState::default(),
            layout: ScreenLayout::default(),
            modal: None,
            clipboard,
            last_image: String::new(),
            status: String::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let _guard = TerminalGuard::enable()?;
        log::info!("editor started, compare mode {:?}", self.editor.compare_mode());

        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.update();
        }
        Ok(())
    }

    /// Apply the pending action, if any.
    pub fn update(&mut self) {
        let Some(action) = self.input_state.action.take() else {
            return;
        };
        log::trace!("{action:?} at {:?}", self.input_state.cursor);
        match action {
            Action::Paint(on) => {
                let (x, y) = self.input_state.cursor;
                self.editor.toggle_cell(y as usize, x as usize, on);
            }
            Action::Reset => {
                self.editor.reset();
                self.status = "cleared".into();
                log::info!("grid reset");
            }
            Action::Copy(encoding) => self.copy(encoding),
            Action::Paste => self.paste_from_clipboard(),
            Action::Upload => self.modal = Some(Modal::ImagePath(self.last_image.clone())),
            Action::Compare => match self.editor.compare_mode() {
                CompareMode::History => match self.editor.compute_diff_from_history() {
                    Ok(()) => {
                        self.status = "diff of last two pastes".into();
                        log::info!("compared paste history");
                    }
                    Err(err) => log::info!("compare skipped: {err}"),
                },
                CompareMode::Panels => {
                    self.modal = Some(Modal::Compare(CompareDialog::default()));
                }
            },
            Action::ShowEditor => self.editor.show_editor(),
        }
    }

    fn copy(&mut self, encoding: Encoding) {
        let text = self.editor.export_text(encoding);
        match self.clipboard.write(&text) {
            Ok(()) => {
                self.status = format!("copied {}", encoding.label());
                log::info!("copied {} ({} bytes)", encoding.label(), text.len());
            }
            Err(err) => log::warn!("copy failed: {err}"),
        }
    }

    fn paste_from_clipboard(&mut self) {
        match self.clipboard.read() {
            Ok(text) => self.load_text(&text),
            Err(err) => log::info!("paste skipped: {err}"),
        }
    }

    /// Decodes pasted text into the grid. Bad text leaves everything as it was.
    fn load_text(&mut self, text: &str) {
        match codec::decode(text) {
            Ok(grid) => {
                self.editor.load(grid);
                self.status = "pasted".into();
                log::info!("pasted bitmap, {} cells lit", grid.count_ones());
                log::trace!("\n{grid}");
            }
            Err(err) => log::info!("paste ignored: {err}"),
        }
    }

    pub fn import_image(&mut self, path: &Path) {
        self.last_image = path.display().to_string();
        match load_image(path) {
            Ok(grid) => {
                self.editor.load(grid);
                self.status = "image imported".into();
                log::info!(
                    "imported {}, {} cells lit",
                    path.display(),
                    self.editor.current().count_ones()
                );
            }
            Err(err) => log::warn!("image import failed: {err}"),
        }
    }

    fn handle_crossterm_events(&mut self) -> Result<()> {
        let event = event::read()?;
        self.on_event(event);
        Ok(())
    }

    pub fn on_event(&mut self, event: Event) {
        match event {
            // it's important to check KeyEventKind::Press to avoid handling key release events
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.modal.is_some() {
                    self.on_modal_key(key)
                } else {
                    self.on_key_event(key)
                }
            }
            Event::Mouse(mouse) if self.modal.is_none() => self.on_mouse_event(mouse),
            Event::Paste(text) => match &mut self.modal {
                Some(modal) => modal.insert_text(&text),
                None => self.load_text(&text),
            },
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(button) => {
                if let Some(clicked) = self.layout.button_at(mouse.column, mouse.row) {
                    if button == MouseButton::Left {
                        self.input_state.action = Some(clicked.action());
                    }
                    return;
                }
                self.paint_at(mouse.column, mouse.row, button);
            }
            MouseEventKind::Drag(button) => self.paint_at(mouse.column, mouse.row, button),
            _ => {}
        }
    }

    fn paint_at(&mut self, column: u16, row: u16, button: MouseButton) {
        let Some(cell) = self.layout.cell_at(column, row) else {
            return;
        };
        let on = match button {
            MouseButton::Left => true,
            MouseButton::Right => false,
            MouseButton::Middle => return,
        };
        self.input_state.cursor = cell;
        self.input_state.action = Some(Action::Paint(on));
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let action = match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.quit();
                return;
            }
            (_, KeyCode::Char('c')) => Action::Reset,
            (_, KeyCode::Char('s')) => Action::Copy(Encoding::ByteArray),
            (_, KeyCode::Char('x')) => Action::Copy(Encoding::PackedRows),
            (_, KeyCode::Char('v')) => Action::Paste,
            (_, KeyCode::Char('u')) => Action::Upload,
            (_, KeyCode::Char('m')) => Action::Compare,
            (_, KeyCode::Char('d')) => Action::ShowEditor,
            (_, KeyCode::Char(' ') | KeyCode::Enter) => Action::Paint(true),
            (_, KeyCode::Backspace | KeyCode::Delete) => Action::Paint(false),
            (_, key @ (KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down)) => {
                let (dx, dy) = match key {
                    KeyCode::Left => (-1, 0),
                    KeyCode::Right => (1, 0),
                    KeyCode::Up => (0, -1),
                    KeyCode::Down => (0, 1),
                    _ => unreachable!(),
                };
                self.move_cursor(dx, dy);
                return;
            }
            _ => return,
        };
        self.input_state.action = Some(action);
    }

    fn on_modal_key(&mut self, key: KeyEvent) {
        let Some(mut modal) = self.modal.take() else {
            return;
        };
        match modal.handle_key(key) {
            ModalOutcome::Pending => self.modal = Some(modal),
            ModalOutcome::Cancel => log::debug!("dialog cancelled"),
            ModalOutcome::Dismiss => {
                if let Modal::Message { back, .. } = modal {
                    self.modal = back.map(Modal::Compare);
                }
            }
            ModalOutcome::PasteClipboard => {
                match self.clipboard.read() {
                    Ok(text) => modal.insert_text(&text),
                    Err(err) => log::info!("nothing to paste into dialog: {err}"),
                }
                self.modal = Some(modal);
            }
            ModalOutcome::SubmitPath(path) => self.import_image(&path),
            ModalOutcome::SubmitCompare => {
                let Modal::Compare(dialog) = modal else {
                    return;
                };
                match self.editor.compare_texts(&dialog.panels[0], &dialog.panels[1]) {
                    Ok(()) => {
                        self.status = "diff of both panels".into();
                        log::info!("compared dialog panels");
                    }
                    Err(err) => {
                        if let CompareError::InvalidPanel { panel, source } = &err {
                            log::info!("compare rejected, panel {panel}: {source}");
                        }
                        self.modal = Some(Modal::Message {
                            text: err.to_string(),
                            back: Some(dialog),
                        });
                    }
                }
            }
        }
    }

    fn move_cursor(&mut self, dx: i16, dy: i16) {
        let max = GRID_SIZE as u16 - 1;
        let (x, y) = &mut self.input_state.cursor;
        *x = x.saturating_add_signed(dx).min(max);
        *y = y.saturating_add_signed(dy).min(max);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        log::info!("quit");
        self.running = false;
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let screen = frame.area();
        let showing_diff = self.editor.view() == ViewMode::ShowingDiff;

        let title = if showing_diff && self.editor.diff_grid().is_some_and(BitGrid::is_clear) {
            Line::from("Difference (identical)").bold().light_green().centered()
        } else if showing_diff {
            Line::from("Difference").bold().light_red().centered()
        } else {
            Line::from("32x32 LED Matrix Editor").bold().light_blue().centered()
        };
        let (x, y) = self.input_state.cursor;
        let mut stats = format!("({x:2},{y:2}) lit {:4}", self.editor.active_grid().count_ones());
        if self.editor.compare_mode() == CompareMode::History {
            stats.push_str(&format!(" pastes {}/2", self.editor.history_len()));
        }
        if !self.status.is_empty() {
            stats.push_str(&format!(" {}", self.status));
        }

        let board = self.layout.board.intersection(screen);
        if board.is_empty() {
            return;
        }
        frame.render_widget(
            Block::bordered()
                .title(title)
                .title_bottom(Line::from(stats).centered()),
            board,
        );

        self.render_grid(frame, self.editor.active_grid(), showing_diff);

        for (button, rect) in &self.layout.buttons {
            let rect = rect.intersection(screen);
            if rect.is_empty() {
                continue;
            }
            frame.render_widget(
                Paragraph::new(format!("[{}]", button.label())).style(Style::new().fg(Black).bg(Gray)),
                rect,
            );
        }

        let help = Rect::new(board.x, board.bottom() + 1, board.width, 1).intersection(screen);
        if !help.is_empty() {
            frame.render_widget(
                Paragraph::new("c clear  s/x copy  v paste  u upload  m compare  d editor  q quit")
                    .dark_gray(),
                help,
            );
        }

        match &self.modal {
            Some(modal) => render_modal(frame, modal),
            None => {
                let (cx, cy) = self.layout.cell_origin(self.input_state.cursor);
                if screen.contains(Position::new(cx, cy)) {
                    frame.set_cursor_position(Position::new(cx, cy));
                }
            }
        }
    }

    fn render_grid(&self, frame: &mut Frame, grid: &BitGrid, showing_diff: bool) {
        const OFF: Color = Reset;
        let on = if showing_diff { LightRed } else { White };

        let buffer = frame.buffer_mut();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let (x, y) = self.layout.cell_origin((col as u16, row as u16));
                let lit = grid.get(row, col);
                for dx in 0..CELL_WIDTH {
                    let Some(cell) = buffer.cell_mut((x + dx, y)) else {
                        continue;
                    };
                    let symbol = if lit || dx > 0 { " " } else { "·" };
                    cell.set_symbol(symbol)
                        .set_bg(if lit { on } else { OFF })
                        .set_fg(DarkGray);
                }
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_modal(frame: &mut Frame, modal: &Modal) {
    let screen = frame.area();
    match modal {
        Modal::ImagePath(path) => {
            let area = centered(screen, 60, 5);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(format!("Path: {path}")),
                    Line::from("Enter load  Esc cancel").dark_gray(),
                ])
                .block(Block::bordered().title(Line::from("Upload image").bold())),
                area,
            );
        }
        Modal::Compare(dialog) => {
            let area = centered(screen, 72, 26);
            frame.render_widget(Clear, area);
            let block = Block::bordered()
                .title(Line::from("Compare matrices").bold())
                .title_bottom(Line::from("Tab switch  Ctrl+V paste  Ctrl+S compare  Esc cancel").centered());
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let panels = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);
            for (i, text) in dialog.panels.iter().enumerate() {
                let style = if dialog.focus == i {
                    Style::new().yellow()
                } else {
                    Style::new()
                };
                let title = format!(
                    "Matrix {} ({}/{} values)",
                    i + 1,
                    codec::count_tokens(text),
                    crate::bit_grid::CELL_COUNT
                );
                let visible = panels[i].height.saturating_sub(2) as usize;
                let lines: Vec<Line> = tail_lines(text, visible)
                    .into_iter()
                    .map(Line::from)
                    .collect();
                frame.render_widget(
                    Paragraph::new(lines).block(Block::bordered().title(title).border_style(style)),
                    panels[i],
                );
            }
        }
        Modal::Message { text, .. } => {
            let area = centered(screen, 50, 6);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(text.as_str())
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::bordered()
                            .title(Line::from("Error").bold().light_red())
                            .title_bottom(Line::from("press any key").centered()),
                    ),
                area,
            );
        }
    }
}

/// The last `count` lines of `text`, so the end of a long paste stays in view.
fn tail_lines(text: &str, count: usize) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let skip = lines.len().saturating_sub(count);
    lines.drain(..skip);
    lines
}
