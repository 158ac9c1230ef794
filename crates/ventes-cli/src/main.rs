//! `ventes`: terminal dashboard for the sales history export.
//!
//! # Usage
//!
//! ```text
//! ventes                                  # data/sales_data_cleaned.csv
//! ventes --data exports/sales.csv --log-file ventes.log
//! ventes --report > dashboard.json        # one pass, JSON on stdout
//! ventes --report --action select_last_year
//! ```

mod app;
mod ui;

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  process,
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;
use ventes_core::{
  action::PendingAction,
  config::AnalysisConfig,
  dashboard::{Interaction, RenderModel, Session},
};
use ventes_store_csv::{DEFAULT_TTL, TableCache, locate};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ventes", version, about = "Terminal dashboard for sales history")]
struct Args {
  /// Sales CSV to load. Defaults to data/sales_data_cleaned.csv, then
  /// sales_data_cleaned.csv.
  #[arg(short, long, value_name = "FILE", env = "VENTES_DATA")]
  data: Option<PathBuf>,

  /// Optional TOML settings file.
  #[arg(short, long, value_name = "FILE", default_value = "ventes.toml")]
  config: PathBuf,

  /// Print the dashboard as JSON and exit.
  #[arg(long)]
  report: bool,

  /// With --report, apply these actions first, in order (select_all_years,
  /// select_last_year, reset_all_filters).
  #[arg(long = "action", value_name = "ACTION", value_parser = PendingAction::from_token, requires = "report")]
  actions: Vec<PendingAction>,

  /// Write logs here while the TUI is running.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Shape of the settings file and `VENTES_*` environment.
#[derive(Deserialize, Debug)]
#[serde(default)]
struct Settings {
  data_path:      Option<PathBuf>,
  cache_ttl_secs: u64,
  analysis:       AnalysisConfig,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      data_path:      None,
      cache_ttl_secs: DEFAULT_TTL.as_secs(),
      analysis:       AnalysisConfig::default(),
    }
  }
}

fn load_settings(path: &Path) -> Result<Settings> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("VENTES"))
    .build()
    .context("failed to read settings")?
    .try_deserialize()
    .context("failed to deserialise settings")
}

// ─── Logging ──────────────────────────────────────────────────────────────────

fn env_filter() -> EnvFilter {
  EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy()
}

/// Report mode logs to stderr. The TUI owns the terminal, so it only logs
/// when given a file.
fn init_tracing(args: &Args) -> Result<()> {
  if args.report {
    tracing_subscriber::fmt()
      .with_env_filter(env_filter())
      .with_writer(io::stderr)
      .init();
  } else if let Some(path) = &args.log_file {
    let file = File::create(path)
      .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(env_filter())
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  }
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();
  init_tracing(&args)?;

  let settings = load_settings(&args.config)?;

  // The flag (or VENTES_DATA) wins over the settings file.
  let explicit = args.data.clone().or(settings.data_path.clone());
  let cache = match open_cache(explicit.as_deref(), settings.cache_ttl_secs) {
    Ok(cache) => cache,
    Err(err) => {
      eprintln!("ventes: {err:#}");
      process::exit(1);
    }
  };

  let session = Session::new(cache.table(), settings.analysis);

  if args.report {
    return write_report(session, &args.actions);
  }
  run_tui(App::new(session), cache)
}

fn open_cache(explicit: Option<&Path>, ttl_secs: u64) -> Result<TableCache> {
  let cwd = std::env::current_dir().context("reading working directory")?;
  let path = locate(explicit, &cwd)?;
  let cache = TableCache::open(&path, Duration::from_secs(ttl_secs))
    .with_context(|| format!("loading {}", path.display()))?;
  Ok(cache)
}

fn write_report(mut session: Session, actions: &[PendingAction]) -> Result<()> {
  let model = report_model(&mut session, actions);
  let stdout = io::stdout().lock();
  serde_json::to_writer_pretty(stdout, &model).context("writing report")?;
  println!();
  Ok(())
}

/// One pass per action, or a single refresh when there are none.
fn report_model(session: &mut Session, actions: &[PendingAction]) -> RenderModel {
  let mut model = session.handle_interaction(Interaction::Refresh);
  for action in actions {
    model = session.handle_interaction(Interaction::Trigger(*action));
  }
  model
}

// ─── Terminal ─────────────────────────────────────────────────────────────────

fn run_tui(mut app: App, mut cache: TableCache) -> Result<()> {
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app, &mut cache);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  cache: &mut TableCache,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250)).context("polling terminal")? {
      continue;
    }

    match event::read().context("reading terminal event")? {
      Event::Key(key) => {
        refresh_data(app, cache);
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}

/// Swap in a reloaded table when the cache window has passed. A failed
/// reload keeps the current table on screen.
fn refresh_data(app: &mut App, cache: &mut TableCache) {
  match cache.refresh_if_stale() {
    Ok(true) => {
      let table: Arc<_> = cache.table();
      app.session.replace_table(table);
      app.dispatch(Interaction::Refresh);
      app.status_msg = "Data reloaded".into();
    }
    Ok(false) => {}
    Err(err) => {
      warn!(error = %err, path = %cache.path().display(), "reload failed, keeping previous data");
      app.status_msg = format!("Reload failed: {err}");
    }
  }
}
