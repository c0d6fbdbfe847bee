//! cinefav - terminal movie search with persistent favorites
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cinefav
//!
//! # CLI mode (for automation)
//! cinefav search "blade runner"
//! cinefav toggle tt1856101 --query "blade runner"
//! cinefav favorites --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cinefav::cli::{Cli, Command, ExitCode, Output};
use cinefav::commands::{self, Context};
use cinefav::controller::Controller;
use cinefav::storage::FileStorage;
use cinefav::ui::TerminalRenderer;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::from_cli(&cli);

    if cli.is_cli_mode() {
        init_tracing_stderr();
        let exit_code = run_cli(cli, &ctx).await;
        std::process::exit(exit_code.into());
    } else {
        init_tracing_file();
        run_tui(&ctx).await
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_tracing_stderr() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a file so output never lands on the alternate screen
fn init_tracing_file() {
    let Some(dir) = FileStorage::default_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("cinefav.log"))
    else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .with(env_filter())
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, ctx: &Context) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, ctx, &output).await,
        Some(Command::Popular(cmd)) => commands::popular_cmd(cmd, ctx, &output).await,
        Some(Command::Favorites(cmd)) => commands::favorites_cmd(cmd, ctx, &output),
        Some(Command::Toggle(cmd)) => commands::toggle_cmd(cmd, ctx, &output).await,
        Some(Command::Config(cmd)) => commands::config_cmd(cmd, ctx, &output),
        // Handled by the is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(ctx: &Context) -> Result<()> {
    let terminal = init_terminal()?;

    let mut controller = Controller::new(
        Arc::new(ctx.client()),
        ctx.store(),
        TerminalRenderer::new(terminal),
    )
    .with_limit(ctx.config.result_limit())
    .with_debounce(ctx.config.debounce());

    let result = run_event_loop(&mut controller);

    // Always restore terminal, even on error
    restore_terminal(controller.renderer_mut().terminal_mut())?;

    result
}

/// Main event loop - input, debounce, completed searches
fn run_event_loop<P, S>(
    controller: &mut Controller<P, S, TerminalRenderer<CrosstermBackend<Stdout>>>,
) -> Result<()>
where
    P: cinefav::SearchProvider + 'static,
    S: cinefav::Storage,
{
    const TICK_RATE: Duration = Duration::from_millis(100);

    controller.startup();

    while controller.app().running {
        // Event polling blocks; keep it off the runtime's worker thread
        let event = tokio::task::block_in_place(|| -> Result<Option<Event>> {
            if event::poll(TICK_RATE)? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })?;

        match event {
            // Only handle key press events (ignore releases on Windows)
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                controller.handle_key(key);
            }
            Some(Event::Resize(..)) => controller.render(),
            _ => {}
        }

        controller.poll_debounce();
        controller.poll();
    }

    Ok(())
}
