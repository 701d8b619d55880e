use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_cli::cmd::{self, config::ConfigSubcommand};
use todo_cli::root;

#[derive(Parser)]
#[command(
    name = "todo",
    about = "Interactive in-memory todo console: add, update, complete and delete tasks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root holding .todo/config.yaml (default: auto-detect)
    #[arg(long, global = true, env = "TODO_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    Repl,

    /// Parse one command line and print the result
    ///
    /// Pass the line as a single argument to keep its quoting. Separate
    /// arguments are joined with spaces; empty ones or ones with spaces are
    /// re-quoted.
    Parse {
        #[arg(required = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },

    /// Split one command line into tokens
    ///
    /// Pass the line as a single argument to keep its quoting. Separate
    /// arguments are joined with spaces; empty ones or ones with spaces are
    /// re-quoted.
    Tokenize {
        #[arg(required = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },

    /// Show console states, their transitions and options
    States,

    /// Write a default .todo/config.yaml
    Init,

    /// Inspect and change the config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => cmd::repl::run(&root),
        Commands::Parse { line } => {
            cmd::parse::run_parse(&cmd::parse::join_args(&line), cli.json)
        }
        Commands::Tokenize { line } => {
            cmd::parse::run_tokenize(&cmd::parse::join_args(&line), cli.json)
        }
        Commands::States => cmd::states::run(cli.json),
        Commands::Init => cmd::init::run(&root),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
