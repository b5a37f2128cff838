use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use dfcalc::calculator::{Engine, copy_to_clipboard, parse_keys};
use dfcalc::history::HistoryStore;
use dfcalc::prefs::{Theme, ThemePrefs};
use dfcalc::session::SessionStore;
use dfcalc::{Calculator, Config};

#[derive(Parser, Debug)]
#[command(name = "dfcalc", version, about = "Keypad calculator for the terminal")]
struct Cli {
    /// Path to a config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for history, session and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Start from a clean engine instead of the saved session
    #[arg(long, global = true)]
    fresh: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive keypad (default)
    Repl,
    /// Press the given keys and print the result
    Eval {
        /// Key tokens, e.g. `12 + 3 =` or `90 sin`
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },
    /// Show or manage recent calculations
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Show or change the display theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    List,
    Clear,
    /// Copy the result of entry N (1 = newest) to the clipboard
    Copy { index: usize },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Dark,
    Light,
    Toggle,
}

/// Everything the commands need, resolved from config and flags.
struct Runtime {
    config: Config,
    history: HistoryStore,
    session: SessionStore,
    prefs: ThemePrefs,
    fresh: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let data_dir = config.resolve_data_dir()?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let rt = Runtime {
        history: HistoryStore::in_dir(&data_dir).with_limit(config.history_limit),
        session: SessionStore::in_dir(&data_dir),
        prefs: ThemePrefs::in_dir(&data_dir),
        fresh: cli.fresh,
        config,
    };

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => run_repl(&rt),
        Command::Eval { keys } => run_eval(&rt, &keys.join(" ")),
        Command::History { action } => run_history(&rt, action.unwrap_or(HistoryAction::List)),
        Command::Theme { action } => run_theme(&rt, action.unwrap_or(ThemeAction::Show)),
    }
}

/// Log to stderr so stdout carries only calculator output.
fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "dfcalc=debug" } else { "dfcalc=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Build the engine, resuming the saved session unless told not to.
fn open_engine(rt: &Runtime) -> Result<Engine> {
    if !rt.fresh
        && rt.config.restore_session
        && let Some(state) = rt.session.load()?
    {
        return Ok(Engine::from(state));
    }
    Ok(Engine::new(rt.config.angle_unit))
}

fn run_eval(rt: &Runtime, line: &str) -> Result<()> {
    let keys = parse_keys(line)?;
    let mut calc =
        Calculator::new(Engine::new(rt.config.angle_unit)).with_history(rt.history.clone());

    for notice in calc.press_all(keys) {
        eprintln!("{}", notice);
    }

    let expression = calc.expression();
    if !expression.is_empty() {
        println!("{}", expression);
    }
    println!("{}", calc.display_value());
    Ok(())
}

fn run_repl(rt: &Runtime) -> Result<()> {
    let mut calc = Calculator::new(open_engine(rt)?).with_history(rt.history.clone());
    let mut theme = rt.prefs.theme();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("dfcalc: type keys (e.g. `12 + 3 =`, `90 sin`), `:help` for commands");
    render(&calc, theme, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        if let Some(command) = line.strip_prefix(':') {
            match command.trim() {
                "q" | "quit" | "exit" => break,
                "help" => print_help(),
                "history" => print_history(&rt.history)?,
                "clear-history" => {
                    rt.history.clear()?;
                    println!("History cleared");
                }
                "copy" => match copy_to_clipboard(&calc.display_value()) {
                    Ok(()) => println!("Copied"),
                    Err(e) => warn!(error = %e, "copy failed"),
                },
                "theme" => {
                    theme = rt.prefs.toggle()?;
                    println!("Theme: {}", theme.name());
                }
                other => println!("Unknown command :{}", other),
            }
        } else if !line.is_empty() {
            match calc.press_line(line) {
                Ok(notices) => notices.iter().for_each(|n| println!("! {}", n)),
                Err(e) => println!("! {}", e),
            }
        }

        render(&calc, theme, &mut stdout)?;
        save_session(&rt.session, calc.engine());
    }

    save_session(&rt.session, calc.engine());
    Ok(())
}

fn render(calc: &Calculator, theme: Theme, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "[{}] {}",
        calc.engine().angle_unit().label(),
        theme.paint_expression(&calc.expression())
    )?;
    writeln!(out, "      {}", theme.paint_result(&calc.display_value()))?;
    write!(out, "> ")?;
    out.flush()
}

fn save_session(session: &SessionStore, engine: &Engine) {
    if let Err(e) = session.save(&engine.snapshot()) {
        warn!(error = %e, "failed to save session");
    }
}

fn print_help() {
    println!("Keys:     0-9 .  + - * /  =  ac  del  neg  sin cos tan  mode");
    println!("Commands: :history :clear-history :copy :theme :quit");
}

fn print_history(history: &HistoryStore) -> Result<()> {
    let items = history.get()?;
    if items.is_empty() {
        println!("No history yet");
    }
    for (i, item) in items.iter().enumerate() {
        println!("{:>3}. {}", i + 1, item);
    }
    Ok(())
}

fn run_history(rt: &Runtime, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => print_history(&rt.history),
        HistoryAction::Clear => {
            rt.history.clear()?;
            println!("History cleared");
            Ok(())
        }
        HistoryAction::Copy { index } => {
            let Some(item) = index
                .checked_sub(1)
                .map(|i| rt.history.nth(i))
                .transpose()?
                .flatten()
            else {
                bail!("No history entry {}", index);
            };
            copy_to_clipboard(&item.result)?;
            info!(result = %item.result, "copied history entry");
            println!("Copied {}", item.result);
            Ok(())
        }
    }
}

fn run_theme(rt: &Runtime, action: ThemeAction) -> Result<()> {
    let theme = match action {
        ThemeAction::Show => rt.prefs.theme(),
        ThemeAction::Dark => {
            rt.prefs.set_dark(true)?;
            Theme::Dark
        }
        ThemeAction::Light => {
            rt.prefs.set_dark(false)?;
            Theme::Light
        }
        ThemeAction::Toggle => rt.prefs.toggle()?,
    };
    println!("{}", theme.name());
    Ok(())
}
