//! Clap derive structures for the `realty` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// realty -- admin console for a real-estate listings backend
#[derive(Debug, Parser)]
#[command(
    name = "realty",
    version,
    about = "Administer real-estate listings from the command line",
    long_about = "Manage users, property listings, the team roster, and homepage\n\
        statistics of a real-estate site through its admin REST API.\n\n\
        Changes are applied optimistically and rolled back if the backend rejects them.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "REALTY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "REALTY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Session token (overrides profile and keyring)
    #[arg(long, env = "REALTY_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "REALTY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "REALTY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage user accounts and roles
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage property listings
    #[command(alias = "props")]
    Properties(PropertiesArgs),

    /// Manage the team roster
    Team(TeamArgs),

    /// Edit the homepage statistics
    Stats(StatsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List user accounts
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on name or email
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only show this role ("all" shows every role)
        #[arg(long, short = 'r')]
        role: Option<String>,
    },

    /// Change a user's role
    SetRole {
        /// User ID
        id: String,

        /// New role: user, agent, or admin
        role: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROPERTIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PropertiesArgs {
    #[command(subcommand)]
    pub command: PropertiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum PropertiesCommand {
    /// List property listings
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on title or location
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Property type: villa, apartment, house, studio, or all
        #[arg(long = "type", short = 't')]
        property_type: Option<String>,

        /// Listing status, e.g. available or sold
        #[arg(long)]
        status: Option<String>,

        /// Only show featured listings
        #[arg(long)]
        featured: bool,
    },

    /// Toggle whether a listing is featured on the homepage
    Feature {
        /// Property ID
        id: String,
    },

    /// Delete a listing
    #[command(alias = "rm")]
    Delete {
        /// Property ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TEAM
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// List team members
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on name, email, or role
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Add a team member
    Add {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Job title, e.g. "Senior Agent"
        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        /// Photo to upload with the new member
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
    },

    /// Remove a team member
    #[command(alias = "rm")]
    Delete {
        /// Team member ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STATS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Show the homepage statistics
    Show,

    /// Edit one field of one statistic and save the board
    Set {
        /// Position on the board, starting at 0
        index: usize,

        /// Field to edit: icon, value, label, or description
        field: String,

        /// New value
        value: String,
    },

    /// Restore the default statistics and save them
    Reset,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile from --api-url and --token
    ///
    /// Prompts for the URL when --api-url is absent. A --token is stored in
    /// the system keyring, never in the config file.
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a session token in the system keyring
    SetToken {
        /// Token value (falls back to --token, then a prompt)
        #[arg(value_name = "TOKEN")]
        value: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
