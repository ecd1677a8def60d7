//! CLI argument definitions via clap derive.
use clap::{Parser, Subcommand};

use crate::config::PacketOrder;

/// packet: look up, search and sign packets from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "packet",
    about = "Look up, search and sign packets on the packet server",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Packet server host. Overrides PACKET_SERVER.
    #[arg(long, global = true, value_name = "HOST")]
    pub server: Option<String>,

    /// Which packet counts as a freshman's first: the server's order or
    /// highest id. Overrides PACKET_ORDER.
    #[arg(long, global = true, value_name = "ORDER")]
    pub order: Option<PacketOrder>,

    /// Log requests and responses to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a packet by id.
    Packet {
        /// Packet id.
        id: u64,
    },
    /// Fetch a freshman by username and show their first packet.
    Freshman {
        /// The freshman's RIT username.
        username: String,
    },
    /// Search freshmen by name.
    Search {
        /// Name fragment to search for.
        term: String,
    },
    /// Sign the currently open packet of a freshman.
    Sign {
        /// The freshman's RIT username.
        username: String,
    },
}
