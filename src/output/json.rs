//! JSON rendering of the inventory.
//!
//! Pretty output sorts every object's keys and indents by two spaces; compact
//! output is a single line with groups in the order they were added.

use super::Inventory;
use crate::error::Result;
use serde::Serialize;

/// Render the full `--list` document.
pub fn render_list(inventory: &Inventory, pretty: bool) -> Result<String> {
    render(inventory, pretty)
}

/// Render the variables of one host for `--host`.
///
/// # Errors
/// [`crate::error::InventoryError::UnknownHost`] if the host is not in the inventory.
pub fn render_host(inventory: &Inventory, host_name: &str, pretty: bool) -> Result<String> {
    render(inventory.host_vars(host_name)?, pretty)
}

fn render<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        // serde_json's default Map is a BTreeMap, so the round trip sorts keys.
        let value = serde_json::to_value(value)?;
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}
