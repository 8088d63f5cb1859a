use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "taskdeck-cli", version, about = "Taskdeck CLI")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll the dice to pick what to work on next
    Roll(commands::roll::RollArgs),
    /// Show the selection odds for a list of the given length
    RollOdds {
        /// Number of candidates
        count: usize,
    },
    /// Break a task down into actionable steps
    Breakdown(commands::breakdown::BreakdownArgs),
    /// Task board
    Board {
        #[command(subcommand)]
        action: commands::board::BoardAction,
    },
    /// Task and completion calendars
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Dashboard summary
    Dashboard,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        _ => Some("debug"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env("TASKDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Roll(args) => commands::roll::run(args),
        Commands::RollOdds { count } => commands::roll::odds(count),
        Commands::Breakdown(args) => commands::breakdown::run(args),
        Commands::Board { action } => commands::board::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Dashboard => commands::dashboard::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
