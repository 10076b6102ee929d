use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokedle::{Attribute, GameConfig, GameSession, Verdict};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const HINT_PLACEHOLDER_TEXT: &str = "Hints will appear here";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
    Success,
}

pub struct App {
    pub session: GameSession,
    pub input: String,
    pub suggestions: Vec<String>,
    pub suggestion_state: ListState,
    pub board_state: TableState,
    pub hint_line: String,
    pub message: Option<(MessageKind, String)>,
    suggestion_limit: usize,
}

impl App {
    pub fn new(session: GameSession, config: &GameConfig) -> Self {
        let mut app = Self {
            session,
            input: String::new(),
            suggestions: Vec::new(),
            suggestion_state: ListState::default(),
            board_state: TableState::default(),
            hint_line: HINT_PLACEHOLDER_TEXT.to_string(),
            message: None,
            suggestion_limit: config.suggestion_limit,
        };
        app.refresh_suggestions();
        app
    }

    /// Returns false when the player asked to quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Enter => {
                if self.session.is_won() {
                    self.reset();
                } else {
                    self.submit();
                }
            }
            KeyCode::F(2) => self.show_hint(),
            KeyCode::F(5) => self.reset(),
            KeyCode::Tab => self.complete(),
            KeyCode::Down => self.next_suggestion(),
            KeyCode::Up => self.previous_suggestion(),
            KeyCode::PageDown => self.scroll_board(5),
            KeyCode::PageUp => self.scroll_board(-5),
            KeyCode::Backspace => {
                self.input.pop();
                self.refresh_suggestions();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                self.refresh_suggestions();
            }
            _ => {}
        }
        true
    }

    pub fn refresh_suggestions(&mut self) {
        self.suggestions = self
            .session
            .pokedex()
            .suggestions(&self.input, self.suggestion_limit)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.suggestion_state.select(None);
    }

    pub fn selected_suggestion(&self) -> Option<&str> {
        self.suggestion_state
            .selected()
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }

    /// Guess the highlighted suggestion, or the typed text when none is highlighted
    pub fn submit(&mut self) {
        let guess = match self.selected_suggestion() {
            Some(name) => name.to_string(),
            None => self.input.trim().to_string(),
        };
        if guess.is_empty() {
            return;
        }

        match self.session.submit_guess(&guess) {
            Ok(outcome) => {
                self.message = if outcome.won {
                    Some((
                        MessageKind::Success,
                        format!(
                            "Congratulations! You found {} in {} tries. Press Enter to play again.",
                            outcome.record.guess.name, outcome.attempts
                        ),
                    ))
                } else {
                    None
                };
                self.input.clear();
                self.refresh_suggestions();
                let last = self.session.history().len() - 1;
                self.board_state.select(Some(last));
            }
            // Input stays in the box so the player can correct it
            Err(e) => {
                self.message = Some((MessageKind::Error, e.to_string()));
            }
        }
    }

    pub fn show_hint(&mut self) {
        self.hint_line = if self.session.hint_exhausted() {
            format!("Full name: {}", self.session.target().name)
        } else {
            format!("Hint: {}", self.session.hint())
        };
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.input.clear();
        self.hint_line = HINT_PLACEHOLDER_TEXT.to_string();
        self.message = Some((MessageKind::Info, "New game started.".to_string()));
        self.board_state.select(None);
        self.refresh_suggestions();
    }

    pub fn complete(&mut self) {
        let pick = self
            .selected_suggestion()
            .or_else(|| self.suggestions.first().map(String::as_str))
            .map(str::to_string);
        if let Some(name) = pick {
            self.input = name;
            self.refresh_suggestions();
        }
    }

    pub fn next_suggestion(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        let i = match self.suggestion_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.suggestion_state.select(Some(i));
    }

    pub fn previous_suggestion(&mut self) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        let i = match self.suggestion_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.suggestion_state.select(Some(i));
    }

    fn scroll_board(&mut self, delta: isize) {
        let len = self.session.history().len();
        if len == 0 {
            return;
        }
        let current = self.board_state.selected().unwrap_or(len - 1) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.board_state.select(Some(next as usize));
    }
}

/// EXACT → affirmative, PARTIAL → caution, NONE → negative
pub fn verdict_style(verdict: Verdict) -> Style {
    match verdict {
        Verdict::Exact => Style::default().bg(Color::Green).fg(Color::White),
        Verdict::Partial => Style::default().bg(Color::Yellow).fg(Color::Black),
        Verdict::NoMatch => Style::default().bg(Color::Red).fg(Color::White),
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "UI loop failed");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title + hint
            Constraint::Length(3), // Input line
            Constraint::Min(0),    // Board + suggestions
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_input(f, chunks[1], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(75), // Board
            Constraint::Percentage(25), // Suggestions
        ])
        .split(chunks[2]);

    render_board(f, content_chunks[0], app);
    render_suggestions(f, content_chunks[1], app);
    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            "Welcome to Pokedle!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Attempts: {}", app.session.attempts()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled("Green", Style::default().fg(Color::Green)),
        Span::raw("=match "),
        Span::styled("Yellow", Style::default().fg(Color::Yellow)),
        Span::raw("=partial "),
        Span::styled("Red", Style::default().fg(Color::Red)),
        Span::raw("=no match"),
    ]);

    let hint = Line::from(Span::styled(
        app.hint_line.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ));

    let header = Paragraph::new(vec![title, hint])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Guess a Pokémon by name "),
    );
    f.render_widget(input, area);

    let cursor_x = area.x + 1 + app.input.chars().count() as u16;
    f.set_cursor(cursor_x.min(area.right().saturating_sub(2)), area.y + 1);
}

fn render_board(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = std::iter::once("Name")
        .chain(Attribute::ALL.iter().map(|a| a.label()))
        .map(|h| {
            Cell::from(h).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.session.history().iter().map(|record| {
        let mut cells = vec![Cell::from(truncate(&record.guess.name, 12))];
        for (attribute, verdict) in record.comparison.iter() {
            let text = truncate(&attribute.display_value(&record.guess), 18);
            cells.push(Cell::from(text).style(verdict_style(verdict)));
        }
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(16),
            Constraint::Length(18),
            Constraint::Length(4),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Guesses "),
    )
    .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    f.render_stateful_widget(table, area, &mut app.board_state);
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .map(|name| ListItem::new(name.as_str()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Suggestions "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.suggestion_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let status_spans = match &app.message {
        Some((kind, text)) => {
            let color = match kind {
                MessageKind::Info => Color::Cyan,
                MessageKind::Error => Color::Red,
                MessageKind::Success => Color::Green,
            };
            vec![Span::styled(format!(" {}", text), Style::default().fg(color))]
        }
        None => vec![
            Span::styled(" Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Submit | "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" Complete | "),
            Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
            Span::raw(" Suggestions | "),
            Span::styled("F2", Style::default().fg(Color::Yellow)),
            Span::raw(" Hint | "),
            Span::styled("F5", Style::default().fg(Color::Yellow)),
            Span::raw(" Reset | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" Quit"),
        ],
    };

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
