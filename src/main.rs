mod app;
mod config;
mod engine;
mod event;
mod feedback;
mod levels;
mod session;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, next_event};
use store::PerformanceStore;
use store::json_store::JsonStore;
use ui::level_list::LevelList;
use ui::status_bar::StatusBar;
use ui::word_area::WordArea;

#[derive(Parser)]
#[command(
    name = "chunkr",
    version,
    about = "Terminal word-chunking game for early readers with adaptive review"
)]
struct Cli {
    #[arg(short, long, help = "Starting level (1-10)")]
    level: Option<u8>,

    #[arg(long, help = "Disable the terminal bell")]
    no_sound: bool,

    #[arg(long, help = "Override the data directory")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Erase all stored word performance and exit")]
    clear_history: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.clear_history {
        let mut store = match cli.data_dir {
            Some(dir) => JsonStore::with_base_dir(dir)?,
            None => JsonStore::new()?,
        };
        store.clear()?;
        println!("Cleared stored word performance.");
        return Ok(());
    }

    let mut config = Config::load().unwrap_or_default();
    if let Some(level) = cli.level {
        config.start_level = level;
    }
    if cli.no_sound {
        config.sound = false;
    }

    let mut app = App::new(config, cli.data_dir);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match next_event(Duration::from_millis(100))? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Play => handle_play_key(app, key),
        AppScreen::LevelSelect => handle_level_select_key(app, key),
    }
}

fn handle_play_key(app: &mut App, key: KeyEvent) {
    // Any key other than a second 'C' disarms a pending clear.
    if app.confirm_clear && key.code != KeyCode::Char('C') {
        app.cancel_clear_history();
        if key.code == KeyCode::Esc {
            return;
        }
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => app.cursor_left(),
        KeyCode::Right | KeyCode::Char('l') => app.cursor_right(),
        KeyCode::Char('s') | KeyCode::Enter => app.split_at_cursor(),
        KeyCode::Char('m') => app.merge_at_cursor(),
        KeyCode::Char('a') => app.separate_all(),
        KeyCode::Char('g') => app.collapse_all(),
        KeyCode::Char('n') | KeyCode::Char(' ') => app.next_word(),
        KeyCode::Tab => app.open_level_select(),
        KeyCode::Char('C') => app.request_clear_history(),
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            // 1-9 jump to that level, 0 to level 10.
            let level = ch.to_digit(10).map(|d| if d == 0 { 10 } else { d as u8 });
            if let Some(level) = level {
                app.switch_to_level(level);
            }
        }
        _ => {}
    }
}

fn handle_level_select_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Tab => app.screen = AppScreen::Play,
        KeyCode::Up | KeyCode::Char('k') => app.level_select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.level_select_next(),
        KeyCode::Enter => app.choose_level(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let [status_area, word_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    match app.screen {
        AppScreen::Play => {
            frame.render_widget(StatusBar::new(&app.session), status_area);
            frame.render_widget(WordArea::new(&app.session.word, app.cursor), word_area);
            frame.render_widget(Paragraph::new(help_line(app)), help_area);
        }
        AppScreen::LevelSelect => {
            frame.render_widget(StatusBar::new(&app.session), status_area);
            frame.render_widget(
                LevelList::new(app.session.word_levels(), &app.session.tracker, app.level_selected),
                word_area,
            );
            frame.render_widget(
                Paragraph::new("↑/↓ select · enter choose · esc back"),
                help_area,
            );
        }
    }
}

fn help_line(app: &App) -> Line<'static> {
    if app.confirm_clear {
        return Line::raw("press C again to erase all progress · any other key cancels");
    }
    Line::raw("←/→ move · s split · m merge · a separate · g regroup · space next · tab levels · q quit")
}
