//! Clap derive structures for the `ambilight` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ambilight -- control an ambilight bridge from the command line
#[derive(Debug, Parser)]
#[command(
    name = "ambilight",
    version,
    about = "Control an ambilight bridge from the command line",
    long_about = "Drives an ambilight backend through its HTTP bridge.\n\n\
        Edit the live configuration, manage presets, control the sync\n\
        engine and watch diagnostics as they refresh.",
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
    /// Bridge profile to use
    #[arg(long, short = 'p', env = "AMBILIGHT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Bridge base URL (overrides profile)
    #[arg(long, short = 'b', env = "AMBILIGHT_BRIDGE", global = true)]
    pub bridge: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AMBILIGHT_OUTPUT",
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "AMBILIGHT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, env = "AMBILIGHT_TIMEOUT", global = true)]
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
    /// Load the panel and follow diagnostics until Ctrl-C
    #[command(alias = "w")]
    Watch,

    /// Show the current diagnostics snapshot
    Status,

    /// List capturable displays
    Displays,

    /// View and edit the live configuration
    #[command(alias = "s")]
    Settings(SettingsArgs),

    /// Manage stored presets
    Presets(PresetsArgs),

    /// Control the sync engine
    Sync(SyncArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SETTINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the live configuration
    Show,

    /// Change configuration fields and save
    Set(SettingsSetArgs),
}

#[derive(Debug, Args)]
pub struct SettingsSetArgs {
    /// Display ID to capture
    #[arg(long)]
    pub display: Option<u32>,

    /// Preview refresh interval in seconds
    #[arg(long)]
    pub preview_interval: Option<f64>,

    /// Brightness below which a frame counts as dark
    #[arg(long)]
    pub dark_threshold: Option<f64>,

    /// Saturation multiplier
    #[arg(long)]
    pub saturation_boost: Option<f64>,

    /// Capture zone left edge (pixels)
    #[arg(long)]
    pub zone_x: Option<u32>,

    /// Capture zone top edge (pixels)
    #[arg(long)]
    pub zone_y: Option<u32>,

    /// Capture zone width (pixels)
    #[arg(long)]
    pub zone_width: Option<u32>,

    /// Capture zone height (pixels)
    #[arg(long)]
    pub zone_height: Option<u32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRESETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    pub command: PresetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PresetsCommand {
    /// List stored presets
    #[command(alias = "ls")]
    List,

    /// Save the live configuration as a preset
    Save {
        /// Preset name
        name: String,
    },

    /// Apply a preset to the live configuration
    Load {
        /// Preset name
        name: String,
    },

    /// Delete a preset
    #[command(alias = "rm")]
    Delete {
        /// Preset name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SYNC
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Sync engine transition
    pub action: SyncAction,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SyncAction {
    /// Begin syncing lights to the screen
    Start,
    /// Hold the current colors
    Pause,
    /// Continue after a pause
    Resume,
    /// Stop syncing
    Stop,
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
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (bridge, bridge_path, preview_path, ca_cert, insecure, timeout)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
