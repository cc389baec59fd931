//! Terminal UI example using crossterm and ratatui.
//!
//! Three editable fields stand in for a host document's text surfaces.
//! Run with: cargo run --example tui_crossterm
//!
//! Set RUST_LOG=vim_overlay=debug and redirect stderr to a file to watch
//! the engine log while the TUI runs.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::thread;

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use vim_overlay::{
    Bootstrap, KeyCode, KeyEvent, Modifiers, ScanOutcome, Session,
    traits::Surface,
    types::{Caret, Command, Disposition, Mode},
};

struct FieldState {
    text: String,
    caret: Option<usize>,
}

/// One editable field, shared between the app and the engine the way a
/// host element handle would be.
#[derive(Clone)]
struct DemoSurface {
    inner: Rc<RefCell<FieldState>>,
}

impl DemoSurface {
    fn new(text: &str) -> Self {
        Self { inner: Rc::new(RefCell::new(FieldState { text: text.to_string(), caret: None })) }
    }

    fn text_snapshot(&self) -> String {
        self.inner.borrow().text.clone()
    }

    fn caret_offset(&self) -> Option<usize> {
        self.inner.borrow().caret
    }

    fn insert_char(&self, ch: char) {
        let mut state = self.inner.borrow_mut();
        let offset = state.caret.unwrap_or(0).min(state.text.chars().count());
        let byte = byte_index(&state.text, offset);
        state.text.insert(byte, ch);
        state.caret = Some(offset + 1);
    }

    fn backspace(&self) {
        let mut state = self.inner.borrow_mut();
        let offset = state.caret.unwrap_or(0).min(state.text.chars().count());
        if offset == 0 {
            return;
        }
        let byte = byte_index(&state.text, offset - 1);
        state.text.remove(byte);
        state.caret = Some(offset - 1);
    }
}

fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices().nth(char_offset).map_or(text.len(), |(idx, _)| idx)
}

impl PartialEq for DemoSurface {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

// Fields are a flat tree: node 0 is the root, node 1 holds the text.
impl Surface for DemoSurface {
    type Node = usize;

    fn root(&self) -> usize {
        0
    }

    fn children(&self, node: &usize) -> Vec<usize> {
        if *node == 0 { vec![1] } else { Vec::new() }
    }

    fn node_text(&self, node: &usize) -> Option<String> {
        (*node == 1).then(|| self.text_snapshot())
    }

    fn caret(&self) -> Option<Caret<usize>> {
        self.caret_offset().map(|offset| Caret { node: 1, offset })
    }
}

struct App {
    session: Session<DemoSurface>,
    surfaces: Vec<DemoSurface>,
    focused: Option<DemoSurface>,
    indicator: &'static str,
}

impl App {
    fn new(surfaces: Vec<DemoSurface>) -> Self {
        Self {
            session: Session::new(),
            surfaces,
            focused: None,
            indicator: Mode::Normal.indicator(),
        }
    }

    fn apply(&mut self, commands: Vec<Command<DemoSurface>>) {
        for command in commands {
            match command {
                Command::Focus(surface) => self.focused = Some(surface),
                // This app delivers every key to the engine itself, so the
                // subscription commands need no bookkeeping here
                Command::Listen(_) | Command::Unlisten(_) => {}
                Command::SetCaret { surface, caret } => {
                    let offset = if caret.node == 1 { caret.offset } else { 0 };
                    surface.inner.borrow_mut().caret = Some(offset);
                }
                Command::Indicator(label) => self.indicator = label,
            }
        }
    }

    fn handle_key(&mut self, event: CKeyEvent) {
        let Some(key) = convert_key(event) else {
            return;
        };
        let (disposition, commands) = self.session.handle_key(key);
        self.apply(commands);
        if disposition == Disposition::PassThrough {
            self.native_edit(key);
        }
    }

    /// The host's default action for keys the overlay lets through.
    fn native_edit(&mut self, key: KeyEvent) {
        if key.mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META) {
            return;
        }
        let Some(active) = self.active_surface() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => active.insert_char(c),
            KeyCode::Backspace => active.backspace(),
            _ => {}
        }
    }

    fn active_surface(&self) -> Option<DemoSurface> {
        self.session.active_index().map(|i| self.surfaces[i].clone())
    }
}

fn convert_key(event: CKeyEvent) -> Option<KeyEvent> {
    let mut mods = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= Modifiers::SHIFT;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }
    if event.modifiers.contains(KeyModifiers::SUPER) {
        mods |= Modifiers::META;
    }
    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        _ => return None,
    };
    Some(KeyEvent { code, mods })
}

fn ui(f: &mut Frame, app: &App) {
    let mut constraints: Vec<Constraint> =
        app.surfaces.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.size());

    for (i, surface) in app.surfaces.iter().enumerate() {
        let is_active = app.focused.as_ref() == Some(surface);
        let border = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let field = Paragraph::new(surface.text_snapshot()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!("line {}", i + 1)),
        );
        f.render_widget(field, chunks[i]);

        if is_active {
            let text = surface.text_snapshot();
            let byte = byte_index(&text, surface.caret_offset().unwrap_or(0));
            let col = text[..byte].graphemes(true).count() as u16;
            f.set_cursor(chunks[i].x + 1 + col, chunks[i].y + 1);
        }
    }

    let status =
        format!("{}  (i insert, Esc normal, h j k l w move, Ctrl-C quit)", app.indicator);
    let bar = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, chunks[app.surfaces.len() + 1]);
}

fn main() -> Result<(), io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let surfaces = vec![
        DemoSurface::new("Press i to edit this line, Esc to step back out."),
        DemoSurface::new("  j and k hop between lines, h and l move the cursor."),
        DemoSurface::new("w jumps word by word and spills onto the next line."),
    ];

    // A real host rescans until its fields exist; these already do
    let mut bootstrap = Bootstrap::default();
    loop {
        match bootstrap.observe(surfaces.len()) {
            ScanOutcome::Ready => break,
            ScanOutcome::Retry(delay) => thread::sleep(delay),
            ScanOutcome::GaveUp => return Ok(()),
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(surfaces);
    let commands = app.session.set_lines(app.surfaces.clone());
    app.apply(commands);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            app.handle_key(key);
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
