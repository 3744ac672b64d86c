mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    assess::AssessSubcommand, catalog::CatalogSubcommand, config::ConfigSubcommand,
    roadmap::RoadmapSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "readiness",
    about = "AI readiness planner: browse the catalog, plan a roadmap, run the assessment",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .readiness/ or .git/)
    #[arg(long, global = true, env = "READINESS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the planner in the current project
    Init {
        /// Project name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Browse use cases, agents, workflows and training
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },

    /// Manage the AI roadmap
    Roadmap {
        #[command(subcommand)]
        subcommand: RoadmapSubcommand,
    },

    /// Fill in and submit the readiness assessment
    Assess {
        #[command(subcommand)]
        subcommand: AssessSubcommand,
    },

    /// Show the readiness report for the current answers
    Report,

    /// Resolve a dashboard URL to the page it shows
    Page { path: String },

    /// Validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Launch the web dashboard
    Ui {
        /// Port to listen on (0 = OS-assigned; default from config)
        #[arg(long)]
        port: Option<u16>,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Catalog { subcommand } => cmd::catalog::run(&root, subcommand, cli.json),
        Commands::Roadmap { subcommand } => cmd::roadmap::run(&root, subcommand, cli.json),
        Commands::Assess { subcommand } => cmd::assess::run(&root, subcommand, cli.json),
        Commands::Report => cmd::report::run(&root, cli.json),
        Commands::Page { path } => cmd::page::run(&path, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Ui { port, no_open } => cmd::ui::run(&root, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
