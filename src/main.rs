mod book;
mod card;
mod game;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tui_textarea::TextArea;

use card::load_card;
use game::{
    Answer, Board, FlipOutcome, Game, GameEvent, Phase, PuzzleKind, SubmitOutcome, UnlockOutcome,
};

const PAIR_GRID_COLS: usize = 4;

enum Screen {
    TitleScreen,
    Scene,
    Puzzle,
    Book,
}

enum MenuOption {
    Open,
    Quit,
}

impl MenuOption {
    fn next(&self) -> Self {
        match self {
            MenuOption::Open => MenuOption::Quit,
            MenuOption::Quit => MenuOption::Open,
        }
    }
}

struct App<'a> {
    game: Game,
    screen: Screen,
    menu_selection: MenuOption,
    gift_cursor: usize,
    tile_cursor: usize,
    card_cursor: usize,
    option_cursor: usize,
    session_id: Option<u64>,
    date_input: TextArea<'a>,
    message: String,
    message_style: Style,
}

impl<'a> App<'a> {
    fn new(game: Game) -> Self {
        App {
            game,
            screen: Screen::TitleScreen,
            menu_selection: MenuOption::Open,
            gift_cursor: 0,
            tile_cursor: 0,
            card_cursor: 0,
            option_cursor: 0,
            session_id: None,
            date_input: new_date_input(),
            message: String::from("Pick a gift to see what it hides..."),
            message_style: Style::default().fg(Color::Yellow),
        }
    }

    fn say(&mut self, text: impl Into<String>, color: Color) {
        self.message = text.into();
        self.message_style = Style::default().fg(color);
    }

    fn enter_scene(&mut self) {
        self.screen = Screen::Scene;
        self.say(
            "Four puzzle gifts guard the big one. ↑/↓ and ENTER.",
            Color::Yellow,
        );
    }

    fn open_selected_gift(&mut self) {
        let Some(gift) = self.game.gifts.get(self.gift_cursor) else {
            return;
        };
        let (id, name, kind, solved, is_main) =
            (gift.id, gift.name, gift.kind, gift.solved, gift.is_main);

        if is_main {
            match self.game.attempt_main_unlock() {
                UnlockOutcome::Allowed => {
                    self.screen = Screen::Book;
                    self.say("The big gift opens... ✨", Color::Green);
                }
                UnlockOutcome::Denied { collected } => {
                    self.say(
                        format!("⚠️  Collect all 4 pieces first! ({collected}/4)"),
                        Color::Red,
                    );
                }
            }
            return;
        }

        let Some(kind) = kind else {
            self.say(format!("The {name} is just a decoration."), Color::DarkGray);
            return;
        };

        if solved {
            self.say(format!("The {name} is already open."), Color::DarkGray);
            return;
        }

        self.session_id = self.game.open_puzzle(id);
        if self.session_id.is_some() {
            self.screen = Screen::Puzzle;
            self.tile_cursor = 0;
            self.card_cursor = 0;
            self.option_cursor = 0;
            if kind == PuzzleKind::DateRecall {
                self.date_input = new_date_input();
            }
            self.say("Solve it to earn a piece!", Color::Yellow);
        }
    }

    fn leave_puzzle(&mut self) {
        self.game.close_puzzle();
        self.session_id = None;
        self.enter_scene();
    }

    fn retry_puzzle(&mut self) {
        self.session_id = self.game.retry_puzzle();
        if let Some(session) = self.game.sessions.session() {
            if session.kind == PuzzleKind::DateRecall {
                self.date_input = new_date_input();
            }
        }
        self.tile_cursor = 0;
        self.card_cursor = 0;
        self.say("Fresh start. You can do this!", Color::Yellow);
    }

    fn report_submission(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Solved => {
                let icon = self
                    .game
                    .sessions
                    .session()
                    .map(|s| s.kind.icon())
                    .unwrap_or("🧩");
                self.say(
                    format!("*** CORRECT! *** Piece {icon} earned. [ Press ENTER ]"),
                    Color::Green,
                );
            }
            SubmitOutcome::Wrong => {
                self.say("Not quite... R to retry, ESC to close.", Color::Red);
            }
            SubmitOutcome::Ignored => {}
        }
    }

    fn handle_puzzle_key(&mut self, key: KeyEvent) {
        let Some(session) = self.game.sessions.session() else {
            self.leave_puzzle();
            return;
        };
        let (kind, phase) = (session.kind, session.phase);

        if key.code == KeyCode::Esc {
            self.leave_puzzle();
            return;
        }

        match phase {
            Phase::Solved => {
                if key.code == KeyCode::Enter {
                    self.leave_puzzle();
                }
            }
            Phase::Failed | Phase::TimedOut => match key.code {
                KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => self.retry_puzzle(),
                _ => {}
            },
            Phase::Active => self.handle_active_key(kind, key),
        }
    }

    fn handle_active_key(&mut self, kind: PuzzleKind, key: KeyEvent) {
        match kind {
            PuzzleKind::DateRecall => {
                if key.code == KeyCode::Enter {
                    let answer = self.date_input.lines().join("");
                    let outcome = self.game.submit_answer(Answer::Date(answer));
                    self.report_submission(outcome);
                } else {
                    self.date_input.input(key);
                }
            }
            PuzzleKind::ChoiceEquation => {
                let count = self.game.card.equation.options.len();
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.option_cursor =
                            self.option_cursor.checked_sub(1).unwrap_or(count - 1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        self.option_cursor = (self.option_cursor + 1) % count;
                    }
                    KeyCode::Enter => {
                        let id = self.game.card.equation.options[self.option_cursor]
                            .id
                            .clone();
                        let outcome = self.game.submit_answer(Answer::Choice(id));
                        self.report_submission(outcome);
                    }
                    _ => {}
                }
            }
            PuzzleKind::WordAssembly => self.handle_assembly_key(key),
            PuzzleKind::PairMatching => self.handle_pairs_key(key),
        }
    }

    fn handle_assembly_key(&mut self, key: KeyEvent) {
        let tile_count = match self.game.sessions.session().map(|s| &s.board) {
            Some(Board::Assembly(board)) => board.tiles.len(),
            _ => return,
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.tile_cursor = self.tile_cursor.checked_sub(1).unwrap_or(tile_count - 1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.tile_cursor = (self.tile_cursor + 1) % tile_count;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if !self.game.place_letter(self.tile_cursor) {
                    self.say("That tile won't fit there.", Color::DarkGray);
                }
            }
            KeyCode::Char(c @ '1'..='3') => {
                self.game.select_slot(c as usize - '1' as usize);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.game.reset_assembly();
                self.say("Tiles returned. The clock keeps running!", Color::Yellow);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                let outcome = self.game.submit_answer(Answer::Assembly);
                self.report_submission(outcome);
            }
            _ => {}
        }
    }

    fn handle_pairs_key(&mut self, key: KeyEvent) {
        let card_count = match self.game.sessions.session().map(|s| &s.board) {
            Some(Board::Pairs(board)) => board.cards.len(),
            _ => return,
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.card_cursor = self.card_cursor.checked_sub(1).unwrap_or(card_count - 1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.card_cursor = (self.card_cursor + 1) % card_count;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(up) = self.card_cursor.checked_sub(PAIR_GRID_COLS) {
                    self.card_cursor = up;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.card_cursor + PAIR_GRID_COLS < card_count {
                    self.card_cursor += PAIR_GRID_COLS;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.game.flip_card(self.card_cursor) {
                FlipOutcome::Flipped => self.say("Pick its twin...", Color::Cyan),
                FlipOutcome::Matched => self.say("A match! 💞", Color::Green),
                FlipOutcome::Mismatch { first, second } => {
                    self.say(format!("{first} and {second} — not a pair."), Color::Red);
                }
                FlipOutcome::Solved => {
                    self.say(
                        format!(
                            "*** ALL PAIRS! *** Piece {} earned. [ Press ENTER ]",
                            PuzzleKind::PairMatching.icon()
                        ),
                        Color::Green,
                    );
                }
                FlipOutcome::Ignored => {}
            },
            _ => {}
        }
    }

    fn apply_events(&mut self) {
        let events: Vec<GameEvent> = self.game.drain_events().collect();
        for event in events {
            match event {
                GameEvent::UnlockChanged(true) => {
                    self.say(
                        "🎉 All 4 pieces collected! The big white gift is ready.",
                        Color::Green,
                    );
                }
                GameEvent::SessionChanged {
                    phase: Some(Phase::TimedOut),
                    ..
                } => {
                    self.say("⏰ Time's up! R to retry, ESC to close.", Color::Red);
                }
                _ => {}
            }
        }
    }
}

fn new_date_input<'a>() -> TextArea<'a> {
    let mut input = TextArea::default();
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your answer (day/month) "),
    );
    input.set_cursor_line_style(Style::default());
    input
}

fn main() -> Result<()> {
    let card = load_card(std::path::Path::new("card.toml"))?;
    let game = Game::new(card);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw_ui(f, &app))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                match app.screen {
                    Screen::TitleScreen => match key.code {
                        KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                            app.menu_selection = app.menu_selection.next();
                        }
                        KeyCode::Enter => match app.menu_selection {
                            MenuOption::Open => app.enter_scene(),
                            MenuOption::Quit => break,
                        },
                        KeyCode::Char('q') => break,
                        _ => {}
                    },
                    Screen::Scene => match key.code {
                        KeyCode::Up | KeyCode::Char('k') => {
                            let len = app.game.gifts.len();
                            app.gift_cursor = app.gift_cursor.checked_sub(1).unwrap_or(len - 1);
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            app.gift_cursor = (app.gift_cursor + 1) % app.game.gifts.len();
                        }
                        KeyCode::Enter => app.open_selected_gift(),
                        KeyCode::Char('q') => break,
                        _ => {}
                    },
                    Screen::Puzzle => app.handle_puzzle_key(key),
                    Screen::Book => match key.code {
                        KeyCode::Left | KeyCode::Char('h') => app.game.book.prev_page(),
                        KeyCode::Right | KeyCode::Char('l') => app.game.book.next_page(),
                        KeyCode::Esc | KeyCode::Char('q') => {
                            app.game.close_book();
                            app.enter_scene();
                        }
                        _ => {}
                    },
                }
            }
        }

        // One tick per second for the active session's countdown.
        if last_tick.elapsed() >= Duration::from_secs(1) {
            last_tick = Instant::now();
            if let Some(id) = app.session_id {
                app.game.tick(id);
            }
        }

        app.apply_events();
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

// ============================================================
// Drawing
// ============================================================

fn draw_ui(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::TitleScreen => draw_title_screen(f, app),
        Screen::Scene => draw_scene(f, app),
        Screen::Puzzle => draw_puzzle(f, app),
        Screen::Book => draw_book(f, app),
    }
}

fn draw_title_screen(f: &mut Frame, app: &App) {
    let area = f.area();

    let title_art = r#"
    ╔════════════════════════════════════════════╗
    ║                                            ║
    ║      ███╗   ██╗ ██████╗ ███████╗██╗        ║
    ║      ████╗  ██║██╔═══██╗██╔════╝██║        ║
    ║      ██╔██╗ ██║██║   ██║█████╗  ██║        ║
    ║      ██║╚██╗██║██║   ██║██╔══╝  ██║        ║
    ║      ██║ ╚████║╚██████╔╝███████╗███████╗   ║
    ║      ╚═╝  ╚═══╝ ╚═════╝ ╚══════╝╚══════╝   ║
    ║                                            ║
    ║        a little card, with four locks      ║
    ║                                            ║
    ╚════════════════════════════════════════════╝
"#;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(14),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(title_art)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let open_style = if matches!(app.menu_selection, MenuOption::Open) {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let open = Paragraph::new("  OPEN THE CARD  ")
        .style(open_style)
        .alignment(Alignment::Center);
    f.render_widget(open, chunks[1]);

    let quit_style = if matches!(app.menu_selection, MenuOption::Quit) {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let quit = Paragraph::new("  QUIT  ")
        .style(quit_style)
        .alignment(Alignment::Center);
    f.render_widget(quit, chunks[2]);

    let help = Paragraph::new("↑/↓ to select  •  ENTER to confirm  •  q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}

fn piece_bar(app: &App) -> Line<'static> {
    let icons = app.game.progress.icons();
    let mut spans = vec![
        Span::styled(
            " NOEL CARD ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw("  Pieces: "),
    ];
    for icon in icons {
        spans.push(Span::raw(icon.unwrap_or("❓").to_string()));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!(" {}/4 ", app.game.progress.count_collected()),
        Style::default().fg(Color::Cyan),
    ));
    Line::from(spans)
}

fn draw_scene(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(5),
        ])
        .split(f.area());

    let status = Paragraph::new(piece_bar(app)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let mut lines = Vec::new();
    for (i, gift) in app.game.gifts.iter().enumerate() {
        let marker = if gift.is_main {
            "🎁"
        } else if gift.solved {
            "✔ "
        } else if gift.kind.is_some() {
            "🧩"
        } else {
            "· "
        };
        let label = format!(
            " {marker} {}{}",
            gift.name,
            if gift.solved { "  (open)" } else { "" }
        );
        let style = if i == app.gift_cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if gift.solved {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(label, style)));
    }
    let gifts = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Under the Tree [↑/↓, ENTER] "),
    );
    f.render_widget(gifts, main_chunks[0]);

    let tree_art = r#"
            ⭐
           /▲\
          /▲▲▲\
         /▲▲o▲▲\
        /▲o▲▲▲o▲\
       /▲▲▲o▲▲▲▲▲\
      /o▲▲▲▲▲o▲▲▲o\
          ║║║
   ❄  ❄   ❄   ❄  ❄
"#;
    let tree = Paragraph::new(tree_art)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ❄ Winter Night ❄ "),
        );
    f.render_widget(tree, main_chunks[1]);

    draw_message(f, app, chunks[2]);
}

fn draw_message(f: &mut Frame, app: &App, area: Rect) {
    let message = Paragraph::new(app.message.as_str())
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .style(app.message_style);
    f.render_widget(message, area);
}

fn draw_puzzle(f: &mut Frame, app: &App) {
    let Some(session) = app.game.sessions.session() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(f.area());

    let mut header = vec![Span::styled(
        format!(" {} ", session.kind.title()),
        Style::default().fg(Color::Black).bg(Color::Yellow),
    )];
    if let Some(remaining) = session.remaining {
        let timer_style = if remaining <= 10 {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        header.push(Span::raw("  "));
        header.push(Span::styled(format!(" ⏱ {remaining}s "), timer_style));
    }
    let status =
        Paragraph::new(Line::from(header)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status, chunks[0]);

    match session.phase {
        Phase::Active => match &session.board {
            Board::Date => draw_date_puzzle(f, app, chunks[1]),
            Board::Choice => draw_equation_puzzle(f, app, chunks[1]),
            Board::Assembly(_) => draw_assembly_puzzle(f, app, chunks[1]),
            Board::Pairs(_) => draw_pairs_puzzle(f, app, chunks[1]),
        },
        Phase::Solved => {
            let text = format!(
                "*** CORRECT! ***\n\nYou earned the piece {}.\n\nPress ENTER to return to the tree.",
                session.kind.icon()
            );
            let result = Paragraph::new(text)
                .style(Style::default().fg(Color::Black).bg(Color::Green))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" VICTORY! "));
            f.render_widget(result, chunks[1]);
        }
        Phase::Failed => {
            let result = Paragraph::new("Wrong answer...\n\nR to retry  •  ESC to close")
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Not quite "));
            f.render_widget(result, chunks[1]);
        }
        Phase::TimedOut => {
            let result =
                Paragraph::new("⏰ Time's up! Everything reset.\n\nR to retry  •  ESC to close")
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title(" Too slow "));
            f.render_widget(result, chunks[1]);
        }
    }

    draw_message(f, app, chunks[2]);
}

fn draw_date_puzzle(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let prompt = Paragraph::new(app.game.card.date.prompt.as_str())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Riddle "));
    f.render_widget(prompt, chunks[0]);
    f.render_widget(&app.date_input, chunks[1]);

    let help = Paragraph::new("Type the date, ENTER to answer, ESC to close")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

fn draw_equation_puzzle(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(area);

    let prompt = Paragraph::new(app.game.card.equation.prompt.as_str())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Equation "));
    f.render_widget(prompt, chunks[0]);

    let mut lines = Vec::new();
    for (i, option) in app.game.card.equation.options.iter().enumerate() {
        let style = if i == app.option_cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("  {}  ", option.label),
            style,
        )));
    }
    let options = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Pick one [↑/↓, ENTER] "),
    );
    f.render_widget(options, chunks[1]);
}

fn draw_assembly_puzzle(f: &mut Frame, app: &App, area: Rect) {
    let Some(Board::Assembly(board)) = app.game.sessions.session().map(|s| &s.board) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Min(1),
        ])
        .split(area);

    let prompt =
        Paragraph::new(app.game.card.assembly.prompt.as_str()).wrap(Wrap { trim: false });
    f.render_widget(prompt, chunks[0]);

    let mut tile_spans = vec![Span::raw(" ")];
    for (i, tile) in board.tiles.iter().enumerate() {
        let style = if tile.used {
            Style::default().fg(Color::DarkGray)
        } else if i == app.tile_cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        tile_spans.push(Span::styled(format!(" {} ", tile.letter), style));
        tile_spans.push(Span::raw(" "));
    }
    let tiles = Paragraph::new(Line::from(tile_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Letter tiles (they reshuffle!) "),
    );
    f.render_widget(tiles, chunks[1]);

    let mut slot_lines = Vec::new();
    for (i, slot) in board.placed.iter().enumerate() {
        let mut text = format!(" Word {} ({} letters): ", i + 1, board.slot_lens[i]);
        for j in 0..board.slot_lens[i] {
            match slot.get(j) {
                Some(letter) => text.push(*letter),
                None => text.push('_'),
            }
            text.push(' ');
        }
        let style = if i == board.active_slot {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        slot_lines.push(Line::from(Span::styled(text, style)));
    }
    let slots = Paragraph::new(slot_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your words [1/2/3 to pick a word] "),
    );
    f.render_widget(slots, chunks[2]);

    let help = Paragraph::new("←/→ pick a tile  •  ENTER place  •  R reset  •  S submit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

fn draw_pairs_puzzle(f: &mut Frame, app: &App, area: Rect) {
    let Some(Board::Pairs(board)) = app.game.sessions.session().map(|s| &s.board) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let mut grid_lines = vec![Line::raw("")];
    for (row_index, row) in board.cards.chunks(PAIR_GRID_COLS).enumerate() {
        let mut spans = vec![Span::raw("   ")];
        for (offset, card) in row.iter().enumerate() {
            let index = row_index * PAIR_GRID_COLS + offset;
            let face = if card.matched || card.face_up {
                format!(" {} ", card.symbol)
            } else {
                String::from(" ❓ ")
            };
            let style = if card.matched {
                Style::default().fg(Color::Green)
            } else if index == app.card_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(face, style));
            spans.push(Span::raw("  "));
        }
        grid_lines.push(Line::from(spans));
        grid_lines.push(Line::raw(""));
    }
    let grid = Paragraph::new(grid_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Find the pairs [arrows, ENTER] "),
    );
    f.render_widget(grid, chunks[0]);

    let stats = Paragraph::new(format!(
        " Moves: {}   Pairs: {}/{} ",
        board.moves,
        board.matched_pairs,
        board.total_pairs()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(stats, chunks[1]);
}

fn draw_book(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            " 📖 MEMORY BOOK ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(app.game.book.indicator(), Style::default().fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status, chunks[0]);

    let content = match app.game.book.current_page() {
        Some(page) => {
            let photo = page
                .photo
                .as_deref()
                .map(|p| format!("📷 {p}\n\n"))
                .unwrap_or_else(|| String::from("📷 (add your photo here)\n\n"));
            format!("📅 {}\n\n{}{}", page.date, photo, page.message)
        }
        None => String::from("This book is still waiting for its memories."),
    };
    let page = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" 💝 "));
    f.render_widget(page, chunks[1]);

    let help = Paragraph::new("←/→ turn pages  •  ESC to close the book")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}
