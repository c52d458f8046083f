use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process::ExitCode;

use piper::{
    commands,
    document::Profile,
    error::{self, Error},
    logging,
    ui::{ColorMode, Ui},
};

#[derive(Parser)]
#[command(name = "piper")]
#[command(about = "Piper - CI/CD CLI Tool")]
#[command(long_about = "A CLI tool to manage CI/CD pipelines across multiple platforms.")]
#[command(version)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// When to use colors
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config(ConfigArgs),

    /// Print a shell completion script
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// Path to the config file
    #[arg(
        long = "config",
        global = true,
        value_name = "PATH",
        env = "PIPER_CONFIG",
        default_value = "config.yaml"
    )]
    path: PathBuf,

    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the current profile and all configured profiles
    View,

    /// Set the current profile
    UseProfile {
        /// Name of the profile to activate
        name: String,
    },

    /// Print the current profile name
    CurrentProfile,

    /// Add a new profile
    AddProfile {
        /// Unique profile name
        name: String,
        /// CI/CD provider, e.g. github
        provider: String,
        /// Authentication token (stored in plaintext)
        token: String,
        /// Server URL
        server: String,
    },

    /// Remove a profile
    RemoveProfile {
        /// Name of the profile to remove
        name: String,
    },

    /// List all configured profiles
    #[command(visible_alias = "list")]
    ListProfiles,
}

fn run_config(args: ConfigArgs, ui: &Ui) -> anyhow::Result<()> {
    let config = args.path.as_path();
    tracing::debug!(config = %config.display(), "using config file");

    match args.command {
        ConfigCommand::View => commands::view(config, ui),
        ConfigCommand::UseProfile { name } => commands::use_profile(config, &name, ui),
        ConfigCommand::CurrentProfile => commands::current_profile(config, ui),
        ConfigCommand::AddProfile {
            name,
            provider,
            token,
            server,
        } => commands::add_profile(config, Profile::new(name, provider, token, server), ui),
        ConfigCommand::RemoveProfile { name } => commands::remove_profile(config, &name, ui),
        ConfigCommand::ListProfiles => commands::list_profiles(config, ui),
    }
}

/// Follow-up advice printed under an error
fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<Error>()? {
        Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => Some(
            "Hint: create the file with 'profiles: []' or point --config at an existing one.",
        ),
        Error::NotFound { .. } => {
            Some("Hint: Use 'piper config list-profiles' to see available profiles.")
        }
        _ => None,
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version also arrive here and are not failures
            return if err.use_stderr() {
                ExitCode::from(error::EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::init(cli.verbose);
    let ui = Ui::new(cli.color, cli.no_color);

    let result = match cli.command {
        Commands::Config(args) => run_config(args, &ui),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "piper", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui.err(format!("{:#}", err));
            if let Some(hint) = hint_for(&err) {
                anstream::eprintln!("{}", ui.dim(hint));
            }
            ExitCode::from(error::exit_code_for(&err))
        }
    }
}
