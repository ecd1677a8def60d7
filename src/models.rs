//! Response schemas for the packet API.
//!
//! Bodies are decoded straight into these types so a missing or mistyped
//! field shows up as a malformed response rather than a lookup failure
//! halfway through printing.
use serde::Deserialize;

use crate::config::PacketOrder;

/// Per-category signature counts, used for both received and required.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignatureCounts {
    pub member_total: u32,
    pub total: u32,
    pub eboard: u32,
    pub upper: u32,
    pub fresh: u32,
    pub misc: u32,
}

/// `GET /api/packet/{id}/`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Packet {
    pub id: u64,
    pub freshman_name: String,
    pub open: bool,
    pub start: String,
    pub end: String,
    pub signatures_received: SignatureCounts,
    pub signatures_required: SignatureCounts,
}

impl Packet {
    /// Upperclassmen signatures as a percentage of those required.
    #[must_use]
    pub fn upperclassmen_score(&self) -> Option<f64> {
        percent(
            self.signatures_received.member_total,
            self.signatures_required.member_total,
        )
    }

    /// All signatures as a percentage of those required.
    #[must_use]
    pub fn total_score(&self) -> Option<f64> {
        percent(self.signatures_received.total, self.signatures_required.total)
    }

    /// Signatures still missing. Negative when the packet is over-signed.
    #[must_use]
    pub fn total_missed(&self) -> i64 {
        i64::from(self.signatures_required.total) - i64::from(self.signatures_received.total)
    }
}

/// `received / required * 100`, or `None` when nothing is required.
#[must_use]
pub fn percent(received: u32, required: u32) -> Option<f64> {
    (required != 0).then(|| f64::from(received) / f64::from(required) * 100.0)
}

/// The short packet form embedded in freshman records.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketSummary {
    pub id: u64,
    pub open: bool,
}

/// `GET /api/freshman/{username}/`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Freshman {
    pub name: String,
    #[serde(default)]
    pub rit_username: Option<String>,
    pub onfloor: bool,
    pub packets: Vec<PacketSummary>,
}

impl Freshman {
    /// The packet a lookup drills into.
    #[must_use]
    pub fn first_packet(&self, order: PacketOrder) -> Option<&PacketSummary> {
        ordered(&self.packets, order).into_iter().next()
    }

    /// The packet `sign` targets: the first open one.
    #[must_use]
    pub fn first_open_packet(&self, order: PacketOrder) -> Option<&PacketSummary> {
        ordered(&self.packets, order).into_iter().find(|p| p.open)
    }
}

/// One entry of `GET /api/freshmen/{term}/`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FreshmanSummary {
    pub name: String,
    pub rit_username: String,
    pub packets: Vec<PacketSummary>,
}

impl FreshmanSummary {
    /// Whether any of this freshman's packets is open.
    #[must_use]
    pub fn is_on_packet(&self) -> bool {
        self.packets.iter().any(|p| p.open)
    }
}

/// Split search results into (on packet, not on packet), keeping server order.
#[must_use]
pub fn partition_by_packet(
    results: &[FreshmanSummary],
) -> (Vec<&FreshmanSummary>, Vec<&FreshmanSummary>) {
    results.iter().partition(|f| f.is_on_packet())
}

/// Body of a non-200 response.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub description: Option<String>,
}

fn ordered(packets: &[PacketSummary], order: PacketOrder) -> Vec<&PacketSummary> {
    let mut packets: Vec<&PacketSummary> = packets.iter().collect();
    if order == PacketOrder::Newest {
        packets.sort_by(|a, b| b.id.cmp(&a.id));
    }
    packets
}
