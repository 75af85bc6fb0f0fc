//! GeneViz - a terminal visualizer for genomic data tables.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use geneviz::app::{App, Mode};
use geneviz::request::PlotKind;
use geneviz::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "geneviz")]
#[command(about = "Draw Manhattan, Venn, heatmap and volcano plots from CSV files", long_about = None)]
struct Args {
    /// CSV file to load, or a directory to browse
    file: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Directory PNG exports are written to
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting GeneViz");
    }

    // Validate path if provided
    if let Some(ref path) = args.file {
        if !path.exists() {
            eprintln!("Error: Path not found: {}", path.display());
            std::process::exit(1);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(args.file, args.export_dir);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("GeneViz exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(&mut app, key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply a key press. Returns `true` when the user quits.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.mode() {
        Mode::Dialog => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                app.dismiss_dialog();
            }
        },
        Mode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.help_menu.close(),
            KeyCode::Up | KeyCode::Char('k') => app.help_menu.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => app.help_menu.cursor_down(),
            KeyCode::Enter => {
                let topic = app.help_menu.selected();
                app.show_help(topic);
            },
            _ => {},
        },
        Mode::Chart => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.close_chart(),
            KeyCode::Char('s') => app.export_chart(),
            KeyCode::Char('y') => app.copy_chart_data(),
            KeyCode::Char('c') => app.cycle_palette(),
            KeyCode::Up | KeyCode::Char('k') => app.chart_view.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => app.chart_view.scroll_down(1),
            KeyCode::PageUp => app.chart_view.scroll_up(10),
            KeyCode::PageDown => app.chart_view.scroll_down(10),
            _ => {},
        },
        Mode::Editing => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.form.stop_editing(),
            KeyCode::Tab | KeyCode::Down => {
                app.form.stop_editing();
                app.form.focus_next();
            },
            KeyCode::BackTab | KeyCode::Up => {
                app.form.stop_editing();
                app.form.focus_prev();
            },
            KeyCode::Backspace => app.form.backspace(),
            KeyCode::Char(c) => app.form.input(c),
            _ => {},
        },
        Mode::FileBrowser => match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return true,
            (KeyModifiers::NONE, KeyCode::Esc) => app.close_file_browser(),
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.browser_up();
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.browser_down();
            },
            (KeyModifiers::NONE, KeyCode::Enter)
            | (KeyModifiers::NONE, KeyCode::Char('l'))
            | (KeyModifiers::NONE, KeyCode::Right) => {
                app.browser_select();
            },
            (KeyModifiers::NONE, KeyCode::Char('h'))
            | (KeyModifiers::NONE, KeyCode::Left)
            | (KeyModifiers::NONE, KeyCode::Backspace) => {
                app.browser_parent();
            },
            (KeyModifiers::NONE, KeyCode::Char('.')) => app.toggle_hidden(),
            _ => {},
        },
        Mode::Form => match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return true,
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return true,
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                let index = c as usize - '1' as usize;
                app.select_plot(PlotKind::ALL[index]);
            },
            (KeyModifiers::NONE, KeyCode::Tab) => app.cycle_plot(),
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.form.focus_prev();
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.form.focus_next();
            },
            (KeyModifiers::NONE, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('i')) => {
                app.form.start_editing();
            },
            (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::F(5)) => app.draw(),
            (KeyModifiers::NONE, KeyCode::Char('o')) => app.open_file_browser(),
            (_, KeyCode::Char('?')) => app.open_help(),
            (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),
            _ => {},
        },
    }
    false
}
