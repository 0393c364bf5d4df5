//! Terminal IDE
//!
//! Multi-file code editor with a test panel, built with crossterm and ratatui on top of
//! `ide-core`.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tui-ide -- [--config ide.toml] [--log ide.log]
//! ```
//!
//! `--config` loads an `IdeConfig` from TOML (missing keys keep their defaults). `--log` writes
//! tracing output to a file; the filter comes from `IDE_LOG` (default `info`).
//!
//! # Shortcuts
//!
//! - Ctrl+N / Ctrl+W: new file / close file
//! - Ctrl+PgUp / Ctrl+PgDn: previous / next file
//! - F2: rename file (Enter commits, Esc cancels)
//! - F4: switch language (resets the source to the template)
//! - Ctrl+R / F5: run test cases
//! - Ctrl+/: toggle line comment
//! - Tab / Enter: accept suggestion, else indent / newline
//! - Ctrl+T / Ctrl+K: add / delete test case
//! - Ctrl+Y / Ctrl+O: copy code / copy output of the focused test case
//! - F6: switch focus between editor and tests
//! - Alt+Left / Alt+Right: move the split (or drag the divider with the mouse)
//! - Ctrl+D: toggle theme
//! - Ctrl+Q: quit

mod app;
mod clipboard;

use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ide_core::IdeConfig;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env, fs,
    io::{self, stdout},
    path::PathBuf,
    process,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().ok_or("--config needs a path")?.into());
            }
            "--log" => {
                args.log = Some(iter.next().ok_or("--log needs a path")?.into());
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> io::Result<IdeConfig> {
    let Some(path) = path else {
        return Ok(IdeConfig::default());
    };
    let text = fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn init_logging(path: &PathBuf) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let filter = EnvFilter::try_from_env("IDE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| io::Error::other(err.to_string()))
}

fn main() -> io::Result<()> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            let program = env::args().next().unwrap_or_else(|| "tui-ide".to_string());
            eprintln!("{message}");
            eprintln!("\nUsage: {program} [--config <path>] [--log <path>]");
            process::exit(1);
        }
    };

    if let Some(path) = &args.log {
        init_logging(path)?;
    }
    let config = load_config(args.config.as_ref())?;
    tracing::info!(?config, "starting");

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(%err, "terminal loop failed");
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit() {
            break;
        }

        let timeout = app
            .next_timer_deadline()
            .map_or(POLL_INTERVAL, |deadline| deadline.min(POLL_INTERVAL));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                Event::Paste(text) => app.handle_paste(text),
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now.duration_since(last_tick));
        last_tick = now;
    }

    Ok(())
}
