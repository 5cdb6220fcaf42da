use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use rootwatch::action::Action;
use rootwatch::app::App;
use rootwatch::config::{Config, load_config, load_config_from_path};
use rootwatch::event::{Event, EventHandler};
use rootwatch::logging::{LogTarget, init_tracing, parse_level};
use rootwatch::system::command::{CommandRunner, PrivilegedShell};
use rootwatch::system::poller::{Poller, PollerHandle};
use rootwatch::system::sampler::Sampler;
use rootwatch::system::snapshot::Snapshot;
use rootwatch::ui::{self, theme::Theme};
use tokio_util::sync::CancellationToken;
use tracing::info;

const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(
    name = "rootwatch",
    about = "Privileged process and resource monitor"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay between poll cycles in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Run status commands without the privileged prefix
    #[arg(long, default_value_t = false)]
    no_elevate: bool,

    /// Append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Sample one cycle, print it as JSON and exit
    #[arg(long, default_value_t = false)]
    once: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send the configured kill command to a process
    Kill {
        /// Process id
        pid: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    let interactive = !cli.once && cli.command.is_none();
    let level = parse_level(&cli.log_level)?;
    let target = match (&cli.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Off,
        (None, false) => LogTarget::Stderr,
    };
    init_tracing(target, level)?;

    let runner = PrivilegedShell::new(
        config.commands.prefix(config.general.elevate),
        config.general.command_timeout(),
    );
    info!(prefix = ?runner.prefix(), "using command prefix");
    let sampler = Arc::new(Sampler::new(
        runner,
        config.commands.clone(),
        config.general.cpu_sample(),
    ));

    if let Some(Command::Kill { pid }) = &cli.command {
        sampler.kill_process(pid).await;
        return Ok(());
    }

    if cli.once {
        return print_once(sampler.as_ref()).await;
    }

    run_interactive(sampler, &config).await
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(interval) = cli.interval_ms {
        config.general.poll_interval_ms = interval;
    }
    if cli.no_elevate {
        config.general.elevate = false;
    }

    config
}

async fn print_once<R: CommandRunner>(sampler: &Sampler<R>) -> Result<()> {
    let (stats, processes) = tokio::join!(sampler.system_stats(), sampler.process_list());
    let snapshot = Snapshot {
        cycle: 1,
        stats,
        processes: processes.into(),
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

async fn run_interactive<R>(sampler: Arc<Sampler<R>>, config: &Config) -> Result<()>
where
    R: CommandRunner + 'static,
{
    let cancel = CancellationToken::new();
    let poller = Poller::spawn(
        Arc::clone(&sampler),
        config.general.poll_interval(),
        cancel.child_token(),
    );

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let theme = Theme::from_config(&config.general.theme);
    let mut app = App::new(&config.keybinds);
    let result = run(&mut terminal, &mut app, &sampler, &poller, &theme).await;

    ratatui::restore();
    cancel.cancel();
    poller.shutdown().await;

    result
}

async fn run<R>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    sampler: &Arc<Sampler<R>>,
    poller: &PollerHandle,
    theme: &Theme,
) -> Result<()>
where
    R: CommandRunner + 'static,
{
    let mut events = EventHandler::new(
        poller.subscribe(),
        REDRAW_INTERVAL,
        poller.cancel_token(),
    );

    terminal.draw(|frame| ui::draw(frame, app, theme))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = app.map_key(key);
                match &action {
                    Action::Kill(pid) => {
                        sampler.spawn_kill(pid.clone());
                    }
                    Action::Refresh => poller.refresh_now(),
                    _ => {}
                }
                app.dispatch(action);
            }
            Event::Snapshot(snapshot) => app.apply_snapshot(&snapshot),
            Event::Tick => app.expire_status_message(),
            Event::Resize => {}
        }
        terminal.draw(|frame| ui::draw(frame, app, theme))?;
    }

    Ok(())
}
