//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Browse and resolve asset and location masters
#[derive(Parser, Debug)]
#[command(name = "assetry", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect or edit the configuration file
    Config {
        /// Config operation
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the options of every level under a partial path
    Options {
        /// Which hierarchy to browse
        hierarchy: Hierarchy,

        /// Selected values, root first, separated by '/'
        #[arg(short, long, default_value = "")]
        path: String,
    },

    /// Resolve the identifier for a complete path
    Resolve {
        /// Hierarchy and path to resolve
        #[command(subcommand)]
        target: ResolveTarget,
    },

    /// Fetch a stored master record
    Master {
        /// Which hierarchy the record belongs to
        hierarchy: Hierarchy,

        /// Model id or location id
        id: String,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,

    /// Print one value by dotted key, e.g. `api.base_url`
    Get {
        /// Dotted key
        key: String,
    },

    /// Set one value by dotted key
    Set {
        /// Dotted key
        key: String,
        /// New value; booleans and numbers are detected
        value: String,
    },

    /// Write a default config file
    Init {
        /// Write here instead of the default location
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for docker run
        #[arg(long)]
        docker_env: bool,
    },
}

/// The two hierarchies.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hierarchy {
    /// Category through Model
    Asset,
    /// Country through Location Name
    Location,
}

/// What to resolve.
#[derive(Subcommand, Debug)]
pub enum ResolveTarget {
    /// Look up or generate a model id
    Asset(AssetPathArgs),
    /// Look up a location id
    Location(LocationPathArgs),
}

/// A full asset classification.
#[derive(Args, Debug, Clone)]
pub struct AssetPathArgs {
    /// Category
    #[arg(long)]
    pub category: String,
    /// Sub category
    #[arg(long)]
    pub sub_category: String,
    /// Asset group
    #[arg(long)]
    pub asset_group: String,
    /// Asset type
    #[arg(long)]
    pub asset_type: String,
    /// Make
    #[arg(long)]
    pub make: String,
    /// Model
    #[arg(long)]
    pub model: String,
}

impl AssetPathArgs {
    /// Values root first.
    pub fn values(&self) -> [&str; 6] {
        [
            self.category.as_str(),
            self.sub_category.as_str(),
            self.asset_group.as_str(),
            self.asset_type.as_str(),
            self.make.as_str(),
            self.model.as_str(),
        ]
    }
}

/// A full location.
#[derive(Args, Debug, Clone)]
pub struct LocationPathArgs {
    /// Country
    #[arg(long)]
    pub country: String,
    /// State
    #[arg(long)]
    pub state: String,
    /// City
    #[arg(long)]
    pub city: String,
    /// Unit
    #[arg(long)]
    pub unit: String,
    /// Location name
    #[arg(long)]
    pub name: String,
}

impl LocationPathArgs {
    /// Values root first.
    pub fn values(&self) -> [&str; 5] {
        [
            self.country.as_str(),
            self.state.as_str(),
            self.city.as_str(),
            self.unit.as_str(),
            self.name.as_str(),
        ]
    }
}

/// Split a `a/b/c` path argument. Empty segments end the path.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/')
        .map(str::trim)
        .take_while(|segment| !segment.is_empty())
        .collect()
}
