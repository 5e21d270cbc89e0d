//! JSON file storage for inventory maps.
//!
//! The file is a single JSON object keyed by item name. Writes go to a
//! uniquely named temp file in the target directory and are renamed into
//! place, so a failed save leaves the previous file intact and concurrent
//! saves never share a temp file.

use crate::error::{InventoryError, Result};
use crate::types::InventoryMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Indentation used for saved files.
const INDENT: &[u8] = b"    ";

/// Read a map from `path`. `Ok(None)` means the file does not exist.
pub fn read_map(path: impl AsRef<Path>) -> Result<Option<InventoryMap>> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let map = serde_json::from_slice(&bytes).map_err(|e| InventoryError::Corrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(map))
}

/// Serialize `map` as an indented JSON object.
///
/// Non-finite quantities have no JSON form (serde_json would write `null`),
/// so they fail with [`InventoryError::Serialization`].
pub fn to_pretty_json(map: &InventoryMap) -> Result<Vec<u8>> {
    if let Some((item, quantity)) = map.iter().find(|(_, q)| !q.is_finite()) {
        return Err(InventoryError::Serialization(format!(
            "quantity of {} is not a finite number: {}",
            item, quantity
        )));
    }

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `map` to `path`, replacing any existing file.
pub fn write_map(path: impl AsRef<Path>, map: &InventoryMap) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_pretty_json(map)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write_result = (|| -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        // The temp file is deleted on drop if the rename fails.
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    })();

    write_result.map_err(|source| InventoryError::Write {
        path: path.to_path_buf(),
        source,
    })
}
