//! Objects read from a JSON dump.
//!
//! The file holds either an object keyed by id (the shape of the
//! `xo.getAllObjects` API result) or a plain array of objects.

use super::ObjectSource;
use crate::error::{InventoryError, Result};
use crate::models::{ObjectMap, XoObject};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Object source backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct DumpFile {
    path: PathBuf,
}

impl DumpFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        DumpFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read(&self) -> Result<ObjectMap> {
        let path = self.path.display().to_string();
        let json = std::fs::read_to_string(&self.path).map_err(|source| InventoryError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("Reading objects from dump file: {path}");

        let what = format!("dump file {path}");
        let objects = match json.trim_start().as_bytes().first() {
            Some(b'[') => decode::<Vec<XoObject>>(&json, &what)?
                .into_iter()
                .map(|o| (o.id.clone(), o))
                .collect(),
            _ => decode::<ObjectMap>(&json, &what)?,
        };
        Ok(objects)
    }
}

fn decode<T: DeserializeOwned>(json: &str, what: &str) -> Result<T> {
    let mut de = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut de).map_err(|e| InventoryError::decode(what, e))
}

#[async_trait]
impl ObjectSource for DumpFile {
    async fn get_all_objects(&self) -> Result<ObjectMap> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_dump_map() {
        let objects = DumpFile::new("src/tests/test_data/xo_objects_01.json")
            .get_all_objects()
            .await
            .expect("Error reading dump");
        assert_eq!(objects.len(), 7);
        let web = &objects["5f3a7e2c-0001-4d0e-9c1a-000000000001"];
        assert_eq!(web.name_label, "web01");
        assert_eq!(web.obj_type, "VM");
    }

    #[tokio::test]
    async fn test_read_dump_list() {
        let objects = DumpFile::new("src/tests/test_data/xo_objects_02.json")
            .get_all_objects()
            .await
            .expect("Error reading dump");
        assert_eq!(objects.len(), 2);
        assert!(objects.contains_key("b2"));
    }

    #[test]
    fn test_bad_map_dump_keeps_path() {
        let err = DumpFile::new("src/tests/test_data/xo_objects_bad_map.json")
            .read()
            .unwrap_err();
        match err {
            InventoryError::Decode { path, .. } => assert_eq!(path, "a.tags[0]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_list_dump_keeps_path() {
        let err = DumpFile::new("src/tests/test_data/xo_objects_bad_list.json")
            .read()
            .unwrap_err();
        match err {
            InventoryError::Decode { path, .. } => assert_eq!(path, "[1].addresses.0/ipv4/0"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_dump() {
        let err = DumpFile::new("src/tests/test_data/does_not_exist.json")
            .get_all_objects()
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Io { .. }));
    }
}
