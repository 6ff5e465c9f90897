//! subvendor CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

use subvendor::cli::commands::{add, list, remove, update};
use subvendor::cli::error::EXIT_USAGE;
use subvendor::cli::{CommandError, GlobalOptions, Output, VendorContext};
use subvendor::core::spec::{SubmoduleSpec, DEFAULT_BRANCH};
use subvendor::telemetry::{init_telemetry, TelemetryConfig};

#[derive(Parser)]
#[command(name = "sv")]
#[command(author, version, about = "Vendor git repositories as submodules under vendor/", long_about = None)]
struct Cli {
    /// Log every git command before running it
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print mutating git commands instead of running them
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Git executable to run
    #[arg(
        long = "git-path",
        visible_alias = "git",
        value_name = "EXE",
        env = "SUBVENDOR_GIT",
        default_value = "git",
        global = true
    )]
    git_path: String,

    /// Extra git configuration, passed through as `git -c KEY=VALUE`
    #[arg(short = 'c', long = "config", value_name = "KEY=VALUE", global = true)]
    config: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List vendored repositories
    #[command(visible_alias = "ls")]
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
        /// Show `git describe` output instead of the commit
        #[arg(long)]
        describe: bool,
        /// Commit hash length
        #[arg(long, value_name = "N", default_value_t = list::DEFAULT_ABBREV)]
        abbrev: usize,
    },
    /// Add or replace a vendored repository: <repo>[@branch|tag|hash] [alias]
    #[command(visible_alias = "a")]
    Add {
        /// Repository, optionally suffixed with @branch, @tag or @hash
        repo: Option<String>,
        /// Checkout path below vendor/ (derived from the URL by default)
        alias: Option<String>,
        /// Branch to check out and track
        #[arg(short, long, default_value = DEFAULT_BRANCH)]
        branch: String,
        /// Clone with --depth 1
        #[arg(long)]
        shallow: bool,
    },
    /// Update vendored repositories, all of them when no path is given
    #[command(visible_alias = "up")]
    Update {
        /// Vendored paths to update
        paths: Vec<String>,
    },
    /// Remove a vendored repository
    #[command(visible_alias = "rm")]
    Remove {
        /// Vendored path to remove
        alias: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = init_telemetry(&TelemetryConfig::for_cli(cli.verbose)) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        Output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let options = GlobalOptions {
        verbose: cli.verbose,
        dry_run: cli.dry_run,
        git_path: cli.git_path,
        config: cli.config,
    };

    let command = cli.command.unwrap_or(Commands::List {
        json: false,
        describe: false,
        abbrev: list::DEFAULT_ABBREV,
    });

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let discover = || VendorContext::discover(&options, &cwd);

    match command {
        Commands::List {
            json,
            describe,
            abbrev,
        } => {
            list::run_list(
                &discover()?,
                &list::ListOptions {
                    json,
                    describe,
                    abbrev,
                },
            )?;
        }
        Commands::Add {
            repo,
            alias,
            branch,
            shallow,
        } => {
            // Usage errors are reported before looking for a repository
            SubmoduleSpec::parse(repo.as_deref().unwrap_or_default(), alias.as_deref(), &branch)?;
            add::run_add(
                &discover()?,
                repo.as_deref(),
                alias.as_deref(),
                &branch,
                shallow,
            )?;
        }
        Commands::Update { paths } => {
            update::run_update(&discover()?, &paths)?;
        }
        Commands::Remove { alias } => {
            remove::require_alias(alias.as_deref())?;
            remove::run_remove(&discover()?, alias.as_deref())?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sv", &mut std::io::stdout());
        }
    }

    Ok(())
}
