// UI layer: one handler per subcommand. Each handler calls the API client
// and writes plain text to the given writer, so output can be captured in
// tests as easily as it goes to stdout.

use std::io::Write;

use tracing::debug;

use crate::api::ApiClient;
use crate::cli::Command;
use crate::config::PacketOrder;
use crate::error::Result;
use crate::models::{partition_by_packet, Freshman, FreshmanSummary, Packet};

/// Route a parsed subcommand to its handler.
///
/// # Errors
///
/// Propagates any request failure, or a failed write to `out`.
pub fn dispatch(
    command: &Command,
    api: &ApiClient,
    order: PacketOrder,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Packet { id } => packet(api, *id, out),
        Command::Freshman { username } => freshman(api, username, order, out),
        Command::Search { term } => search(api, term, out),
        Command::Sign { username } => sign(api, username, order, out),
    }
}

/// `packet <id>`: fetch and print one packet.
pub fn packet(api: &ApiClient, id: u64, out: &mut impl Write) -> Result<()> {
    let packet = api.packet(id)?;
    write_packet(&packet, out)
}

/// `freshman <username>`: print the freshman, then drill into their first packet.
pub fn freshman(
    api: &ApiClient,
    username: &str,
    order: PacketOrder,
    out: &mut impl Write,
) -> Result<()> {
    let freshman = api.freshman(username)?;
    write_freshman(&freshman, out)?;

    if let Some(first) = freshman.first_packet(order) {
        debug!(packet = first.id, %order, "showing first packet");
        writeln!(out)?;
        packet(api, first.id, out)?;
    }
    Ok(())
}

/// `search <term>`: list matching freshmen, those on an open packet first.
pub fn search(api: &ApiClient, term: &str, out: &mut impl Write) -> Result<()> {
    let results = api.search(term)?;
    write_search_results(&results, out)
}

/// `sign <username>`: sign the freshman's first open packet, if there is one.
pub fn sign(
    api: &ApiClient,
    username: &str,
    order: PacketOrder,
    out: &mut impl Write,
) -> Result<()> {
    let freshman = api.freshman(username)?;

    match freshman.first_open_packet(order) {
        Some(open) => {
            api.sign(open.id)?;
            writeln!(
                out,
                "Successfully signed {}'s packet #{}.",
                freshman.name, open.id
            )?;
        }
        None => writeln!(out, "{} doesn't have a currently open packet.", freshman.name)?,
    }
    Ok(())
}

/// Print a packet's status, scores and per-category counts.
pub fn write_packet(packet: &Packet, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}'s packet (#{}):", packet.freshman_name, packet.id)?;

    if packet.open {
        writeln!(out, "\tOpen until {}", packet.end)?;
    } else {
        writeln!(out, "\tOpen from {} to {}", packet.start, packet.end)?;
    }

    writeln!(out)?;
    let received = &packet.signatures_received;
    let required = &packet.signatures_required;
    writeln!(
        out,
        "\tUpperclassmen score: {}",
        score(packet.upperclassmen_score())
    )?;
    writeln!(out, "\tTotal score: {}", score(packet.total_score()))?;
    writeln!(out, "\tEboard: {}/{}", received.eboard, required.eboard)?;
    writeln!(out, "\tUpperclassmen: {}/{}", received.upper, required.upper)?;
    writeln!(out, "\tFreshmen: {}/{}", received.fresh, required.fresh)?;
    writeln!(out, "\tMiscellaneous: {}/{}", received.misc, required.misc)?;
    writeln!(out, "\tTotal missed: {}", packet.total_missed())?;
    Ok(())
}

/// Print a freshman's name, floor status and packet attempts.
pub fn write_freshman(freshman: &Freshman, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}:", freshman.name)?;
    writeln!(
        out,
        "\t{}",
        if freshman.onfloor { "On-floor" } else { "Off-floor" }
    )?;

    if !freshman.packets.is_empty() {
        let attempts: Vec<String> = freshman
            .packets
            .iter()
            .map(|p| format!("#{}", p.id))
            .collect();
        writeln!(out, "\tPacket attempts: {}", attempts.join(", "))?;
    }
    Ok(())
}

/// Print search results split by whether each freshman is on an open packet.
pub fn write_search_results(results: &[FreshmanSummary], out: &mut impl Write) -> Result<()> {
    let (on_packet, off_packet) = partition_by_packet(results);

    if !on_packet.is_empty() {
        writeln!(out, "Freshmen currently on packet:")?;
        write_entries(&on_packet, out)?;
        if !off_packet.is_empty() {
            writeln!(out)?;
        }
    }
    if !off_packet.is_empty() {
        writeln!(out, "Freshmen not currently on packet:")?;
        write_entries(&off_packet, out)?;
    }
    Ok(())
}

fn write_entries(entries: &[&FreshmanSummary], out: &mut impl Write) -> Result<()> {
    for freshman in entries {
        writeln!(out, "\t{} ({})", freshman.name, freshman.rit_username)?;
    }
    Ok(())
}

/// `50.00%`, or `N/A` when nothing is required in that category.
fn score(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%"))
}
