//! Inventory accumulation and output.
//!
//! - [`inventory`] - group and host variable accumulation
//! - [`json`] - JSON rendering for `--list` and `--host`

mod inventory;
mod json;

pub use inventory::{Inventory, InventoryGroup, META_KEY};
pub use json::{render_host, render_list};
