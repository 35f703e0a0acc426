//! Xen Orchestra object record.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Object type discriminator for virtual machines.
pub const VM_TYPE: &str = "VM";

/// An object returned by Xen Orchestra.
///
/// Only the fields the inventory needs are kept; anything else in the API
/// response is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct XoObject {
    /// Object UUID.
    pub id: String,
    /// Object type, e.g. `VM`, `VM-template`, `host`.
    #[serde(rename = "type")]
    pub obj_type: String,
    /// Display name.
    #[serde(default)]
    pub name_label: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Guest addresses keyed by interface, e.g. `"0/ipv4/0" -> "10.0.0.5"`.
    #[serde(default)]
    pub addresses: Option<Addresses>,
}

impl XoObject {
    /// Guest addresses in the order the API listed them; empty when the guest
    /// tools report none.
    pub fn address_list(&self) -> Vec<&str> {
        self.addresses
            .as_ref()
            .map(|a| a.0.iter().map(|(_, addr)| addr.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Interface to address pairs, kept in JSON document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Addresses(pub Vec<(String, String)>);

impl Serialize for Addresses {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (interface, address) in &self.0 {
            map.serialize_entry(interface, address)?;
        }
        map.end()
    }
}

struct AddressesVisitor;

impl<'de> Visitor<'de> for AddressesVisitor {
    type Value = Addresses;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of interface to address")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Addresses, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((interface, address)) = access.next_entry::<String, String>()? {
            pairs.push((interface, address));
        }
        Ok(Addresses(pairs))
    }
}

impl<'de> Deserialize<'de> for Addresses {
    fn deserialize<D>(deserializer: D) -> Result<Addresses, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AddressesVisitor)
    }
}

/// Objects keyed by id.
pub type ObjectMap = BTreeMap<String, XoObject>;
