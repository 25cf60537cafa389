//! Loopline TUI: mouse-driven loop range editor in the terminal.
//!
//! Usage: `loopline-tui [--config <file>] [--dir <settings dir>]`
//!
//! Logs go to `loopline.log` in the config directory (`RUST_LOG` filters).

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use loopline_core::EditorConfig;
use loopline_tui::{AppState, input, ui};

#[derive(Parser)]
#[command(name = "loopline-tui", about = "Edit loop in/out ranges with the mouse")]
struct Cli {
    /// Config file (default: <config dir>/loopline/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the loop settings files (overrides the config)
    #[arg(long)]
    dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Paths
    let app_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("loopline");
    let config_path = cli.config.unwrap_or_else(|| app_dir.join("config.toml"));

    init_logging(&app_dir)?;

    let config = EditorConfig::load(&config_path)?;
    let settings_dir = cli
        .dir
        .or_else(|| config.settings_dir.clone())
        .unwrap_or_else(|| app_dir.join("loops"));
    log::info!(
        "config {}, settings in {}",
        config_path.display(),
        settings_dir.display()
    );

    let mut app = AppState::new(config, settings_dir);
    app.open_loops();

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

/// Send `log` output to a file so it never lands on the alternate screen.
fn init_logging(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let log_path = dir.join("loopline.log");
    let file = File::create(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
