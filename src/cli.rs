//! CLI struct definitions for the `complygate` command-line interface.
//!
//! All clap-derived types live here. Dispatch lives in `lib.rs`.

use crate::core::output::Format;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "complygate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compliance gate checks for release and audit milestones"
)]
pub(crate) struct Cli {
    /// Repository root the artifact paths are resolved against (defaults to the current directory).
    #[clap(long, global = true)]
    pub root: Option<PathBuf>,
    /// Gate configuration file; replaces the embedded defaults.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Output format.
    #[clap(long, global = true, value_enum, default_value = "text")]
    pub format: Format,
    /// Diagnostic logging to stderr (-v info, -vv debug).
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Check that every frozen contract artifact exists
    Freeze,
    /// Check finance/controls approvals in the governance decision ledger
    Approvals,
    /// Check required envelope fields and event types of the canonical schema
    Schema,
    /// Check control evidence documents for one family (e.g. sprint5)
    Evidence {
        /// Evidence family id from the configuration.
        family: String,
    },
    /// Run every gate in pipeline order
    All,
    /// List configured gates
    List,
}
