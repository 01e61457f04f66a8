use anyhow::{Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use waypost_cli::{OutputFormat, commands};
use waypost_core::PatternType;
use waypost_core::config::RuleMove;

#[derive(Parser)]
#[command(name = "waypost")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Open each link in the right browser profile",
    long_about = "Waypost receives the links your system would open in a browser and sends each \
                  one to a browser profile chosen by your URL rules. When no rule decides, it \
                  asks which profile to use."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// URL to route (this is how the system invokes Waypost)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Show the current settings
    #[arg(long, conflicts_with = "url")]
    settings: bool,

    /// Print the browser command instead of launching it
    #[arg(long, requires = "url")]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the per-user default
    #[arg(long, global = true, env = "WAYPOST_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage browser profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Manage URL rules
    Rule {
        #[command(subcommand)]
        command: RuleCommands,
    },

    /// Show how a URL would be routed, without opening it
    Route {
        /// URL to test
        #[arg(value_name = "URL")]
        url: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Print the location of the config file
    ConfigPath,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List configured profiles
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Add a profile
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Path to the browser executable
        #[arg(long)]
        exe: String,

        /// Launch arguments as one string; use double quotes to group
        #[arg(long, allow_hyphen_values = true)]
        args: Option<String>,
    },

    /// Remove a profile (rules that use it are kept)
    Remove {
        /// Profile id
        id: String,
    },

    /// Show, set or clear the default profile
    Default {
        /// Profile id to make the default
        id: Option<String>,

        /// Clear the default profile
        #[arg(long, conflicts_with = "id")]
        clear: bool,
    },

    /// Import profiles of installed browsers
    Detect {
        /// Only list what was found
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum RuleCommands {
    /// List rules in evaluation order
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Add a rule at the end of the list
    Add {
        /// Pattern to match
        #[arg(long)]
        pattern: String,

        /// How the pattern is interpreted (regex, domain, prefix)
        #[arg(long = "type", default_value = "domain")]
        pattern_type: PatternType,

        /// Profile id to offer (repeat for several)
        #[arg(long = "profile", required = true)]
        profiles: Vec<String>,

        /// Free-text note
        #[arg(long)]
        comment: Option<String>,
    },

    /// Remove a rule
    Remove {
        /// Rule number as shown by 'rule list'
        number: usize,
    },

    /// Move a rule up or down
    Move {
        /// Rule number as shown by 'rule list'
        number: usize,

        /// Direction
        #[arg(value_enum)]
        direction: Direction,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for RuleMove {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => RuleMove::Up,
            Direction::Down => RuleMove::Down,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let store = commands::config_store(cli.config)?;

    match (cli.command, cli.url) {
        (Some(_), Some(url)) => bail!("Unexpected URL '{}' with a subcommand", url),
        (None, Some(url)) => commands::open::execute(&url, &store, cli.dry_run),
        (None, None) if cli.settings => commands::settings::show(&store),
        (None, None) => commands::settings::idle(&store),
        (Some(command), None) => match command {
            Commands::Profile { command } => match command {
                ProfileCommands::List { format } => commands::profile::list(&store, format),
                ProfileCommands::Add { name, exe, args } => {
                    commands::profile::add(&store, &name, &exe, args.as_deref()).map(|_| ())
                }
                ProfileCommands::Remove { id } => commands::profile::remove(&store, &id),
                ProfileCommands::Default { id, clear } => {
                    commands::profile::default(&store, id.as_deref(), clear)
                }
                ProfileCommands::Detect { dry_run } => commands::profile::detect(&store, dry_run),
            },
            Commands::Rule { command } => match command {
                RuleCommands::List { format } => commands::rule::list(&store, format),
                RuleCommands::Add {
                    pattern,
                    pattern_type,
                    profiles,
                    comment,
                } => commands::rule::add(&store, &pattern, pattern_type, profiles, comment),
                RuleCommands::Remove { number } => commands::rule::remove(&store, number),
                RuleCommands::Move { number, direction } => {
                    commands::rule::move_rule(&store, number, direction.into())
                }
            },
            Commands::Route { url, format } => commands::route::execute(&url, &store, format),
            Commands::ConfigPath => {
                println!("{}", store.path().display());
                Ok(())
            }
            Commands::Completion { shell } => {
                let mut cmd = Cli::command();
                commands::completion::execute(shell, &mut cmd)
            }
        },
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("waypost=debug,waypost_cli=debug,waypost_core=debug,waypost_browser=debug")
    } else {
        EnvFilter::new("waypost=warn,waypost_cli=warn,waypost_core=warn,waypost_browser=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
