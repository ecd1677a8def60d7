// Library root
// -----------
// The binary (`main.rs`) parses arguments and hands them to these modules.
//
// Module responsibilities:
// - `config`: reads the session token, server and packet order once at startup.
// - `api`: the blocking HTTP client; classifies every response before decoding.
// - `models`: response schemas plus scoring, ordering and partition rules.
// - `ui`: one handler per subcommand, writing plain text output.
// - `cli`: clap definitions.
// - `error`: the error type and its exit codes.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod ui;

pub use error::{PacketError, Result};
