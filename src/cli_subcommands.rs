use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Interactive console (the default)
    Tui,

    /// Print the services report once
    Services {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the carousel report once
    Carousel {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the system report once
    System {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate and save chunks or schemes
    Ingest {
        #[command(subcommand)]
        command: IngestCommands,
    },

    /// List and manage archived chunks and schemes
    Browse {
        #[command(subcommand)]
        command: BrowseCommands,
    },

    /// Save the EPG of one channel (xml, csv) or of all channels (all)
    Export {
        format: String,
        /// Channel id; required for xml and csv
        #[arg(long)]
        channel: Option<String>,
        /// Output file; defaults to the backend file name
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check for a software update
    UpdateCheck {
        /// Apply an available update
        #[arg(long)]
        apply: bool,
    },

    /// Upload a maintenance package
    Maintenance {
        file: PathBuf,
        /// Where to write the returned report, if any
        #[arg(long, default_value = "report")]
        report: PathBuf,
    },

    /// Show or change the on-air announcements
    Announce {
        #[command(subcommand)]
        command: AnnounceCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum IngestCommands {
    /// Validate a data chunk (.gz) and save it
    Chunk {
        file: PathBuf,
        /// Stop after validation
        #[arg(long)]
        validate_only: bool,
    },

    /// Upload and save several chunks in one request
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Validate a scheme (.xls) and save it
    Scheme {
        file: PathBuf,
        /// Short description (defaults to the one in the file)
        #[arg(long)]
        description: Option<String>,
        /// Stop after validation
        #[arg(long)]
        validate_only: bool,
        /// Load the scheme once saved
        #[arg(long)]
        activate: bool,
        /// Activation option (repeatable): stop-carousel, reset-database,
        /// import-scheme, stop-eit, delete-carousel
        #[arg(long = "option", value_name = "FLAG")]
        options: Vec<String>,
    },

    /// Re-validate an archived scheme and optionally load it
    Stage {
        target: String,
        /// Load the scheme once staged
        #[arg(long)]
        activate: bool,
        #[arg(long = "option", value_name = "FLAG")]
        options: Vec<String>,
    },

    /// Run maintenance actions without loading a scheme
    Maintain {
        #[arg(long = "option", value_name = "FLAG")]
        options: Vec<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum BrowseCommands {
    /// List archived chunks
    Chunks {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List archived schemes
    Schemes {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the scheme currently loaded
    Current {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the decoded dump of a chunk
    Preview { target: String },

    /// Download a chunk's source file
    Download {
        target: String,
        #[arg(long)]
        out: PathBuf,
    },

    /// Start playing a chunk
    Play { target: String },

    /// Pause a chunk
    Pause { target: String },

    /// Delete an archived chunk
    DeleteChunk { target: String },

    /// Delete an archived scheme
    DeleteScheme { target: String },
}

#[derive(Subcommand)]
pub(crate) enum AnnounceCommands {
    /// Show the current announcements
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change announcements; fields not given keep their value
    Set {
        #[arg(long)]
        present: Option<String>,
        #[arg(long)]
        following: Option<String>,
        #[arg(long)]
        publish_present: Option<bool>,
        #[arg(long)]
        publish_following: Option<bool>,
    },
}
