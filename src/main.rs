use std::{
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Result;
use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use directories::ProjectDirs;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};

use klava::{
    app::App,
    config::{Config, ConfigStore, FileConfigStore, Loaded},
    generator::AlphabetPreset,
    runtime::{AppEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
};

/// typing speed trainer with an on-screen keyboard
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type randomly generated text as fast as you can. The on-screen keyboard flashes green or red on every keystroke and the result shows your speed in characters per minute."
)]
pub struct Cli {
    /// number of characters to type
    #[clap(short = 'l', long, value_parser = parse_length)]
    length: Option<usize>,

    /// character set the text is drawn from
    #[clap(short = 'a', long, value_enum)]
    alphabet: Option<AlphabetPreset>,

    /// how long a key stays highlighted, in milliseconds
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    highlight_ms: Option<u64>,

    /// seed for reproducible text
    #[clap(long)]
    seed: Option<u64>,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// where to write logs
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn parse_length(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("length must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    /// Command line values take precedence over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(length) = self.length {
            config.length = length;
        }
        if let Some(alphabet) = self.alphabet {
            config.alphabet = alphabet;
        }
        if let Some(ms) = self.highlight_ms {
            config.highlight_ms = ms;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn log_path(&self) -> PathBuf {
        if let Some(path) = &self.log_file {
            return path.clone();
        }
        match ProjectDirs::from("", "", "klava") {
            Some(pd) => pd.data_local_dir().join("klava.log"),
            None => PathBuf::from("klava.log"),
        }
    }
}

/// Send logs to a file; the terminal belongs to the TUI. Logging stays off if
/// the file cannot be opened.
fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::new().filter_or("KLAVA_LOG", "warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show)?;
    Ok(())
}

fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging(&cli.log_path());

    let store = cli.config_store();
    let Loaded {
        config: stored,
        writable,
    } = store.load_or_default();
    let config = cli.apply(stored.clone());
    if let Err(e) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e.to_string()).exit();
    }
    log::info!("starting with {config:?}");

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_rate()),
    );
    let mut app = App::new(config, cli.seed);

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app, &runner);

    restore_terminal()?;
    terminal.show_cursor()?;
    outcome?;

    // only the chosen length is remembered, other overrides are per run
    if writable {
        let mut to_save = stored;
        to_save.length = app.difficulty;
        if let Err(e) = store.save(&to_save) {
            log::warn!("could not save config to {}: {e}", store.path().display());
        }
    } else {
        log::warn!(
            "leaving unreadable config at {} untouched",
            store.path().display()
        );
    }

    if let Some(report) = &app.result {
        println!("{} {}", Local::now().format("%Y-%m-%d %H:%M"), report.headline());
    }

    Ok(())
}

fn start_tui<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<()> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let event = runner.step();
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        if !app.on_event(event, area, Instant::now()) {
            return Ok(());
        }
    }
}
