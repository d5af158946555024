#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tl: rank-ordered task board",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Initialize a tasklane board",
        long_about = "Create .tasklane/ with a default config and a migrated database.",
        after_help = "EXAMPLES:\n    tl init\n\n    # Reset config.toml to defaults\n    tl init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(next_help_heading = "Setup", about = "Create or list projects")]
    Project {
        #[command(subcommand)]
        command: cmd::project::ProjectCommand,
    },

    #[command(
        next_help_heading = "Tasks",
        about = "Append a task to a project",
        after_help = "EXAMPLES:\n    tl create --project prj-1a2b3c4d5e --title \"Write docs\"\n\n    tl create --project prj-1a2b3c4d5e --title \"Fix bug\" --status in_progress"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Tasks",
        about = "Move a task to an offset, optionally in another status",
        long_about = "Move a task to --to within its target status column. \
                      Only the moved task's rank changes.",
        after_help = "EXAMPLES:\n    # Move to the top of its column\n    tl move tsk-0123456789 --to 0\n\n    # Move into in_progress, second position\n    tl move tsk-0123456789 --to 1 --status in_progress"
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(next_help_heading = "Tasks", about = "List a project's tasks in board order")]
    List(cmd::list::ListArgs),

    #[command(next_help_heading = "Tasks", about = "Show one task")]
    Show(cmd::show::ShowArgs),

    #[command(next_help_heading = "Tasks", about = "Delete a task")]
    Delete(cmd::delete::DeleteArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKLANE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "tasklane=debug,info"
        } else {
            "tasklane=info,warn"
        })
    });

    let format = env::var("TASKLANE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    let output = cli.output_mode();

    match &cli.command {
        Commands::Init(args) => cmd::init::run_init(args, output, &project_root),
        Commands::Project { command } => cmd::project::run_project(command, output, &project_root),
        Commands::Create(args) => cmd::create::run_create(args, output, &project_root),
        Commands::Move(args) => cmd::move_cmd::run_move(args, output, &project_root),
        Commands::List(args) => cmd::list::run_list(args, output, &project_root),
        Commands::Show(args) => cmd::show::run_show(args, output, &project_root),
        Commands::Delete(args) => cmd::delete::run_delete(args, output, &project_root),
    }
}
