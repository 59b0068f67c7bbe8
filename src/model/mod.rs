//! Source records consumed by the metrics engine.
//!
//! Three collections feed every snapshot: [`Transaction`]s (quotes) from the
//! order system, [`SupplierCostRecord`]s from purchasing, and
//! [`InventoryBatch`]es from the warehouse. All of them are read-only here;
//! everything else in the crate is derived from them on demand.
//!
//! Field names serialize in camelCase so the same types read the JSON served
//! by the live endpoints and the fixture files.

mod inventory;
mod supplier;
mod transaction;

pub use inventory::*;
pub use supplier::*;
pub use transaction::*;

use serde::{Deserialize, Serialize};

/// Sourcing / sales region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "CN")]
    Cn,
    #[serde(rename = "HK")]
    Hk,
    #[default]
    Other,
}

impl Region {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Cn => "CN",
            Self::Hk => "HK",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
