//! Optional `data/image_mappings/<category>_<lang>.json` index files.

use serde_json::{Map, Value};

use crate::types::CatalogEntry;

/// `{"1": "<folder>/<file>", ...}` in numeric order.
pub fn mapping_json(image_folder: &str, entries: &[CatalogEntry]) -> Result<Vec<u8>, serde_json::Error> {
    let mut numbered: Vec<&CatalogEntry> = entries.iter().collect();
    numbered.sort_by_key(|e| e.number);

    let map: Map<String, Value> = numbered
        .into_iter()
        .map(|e| {
            (
                e.number.to_string(),
                Value::String(format!("{image_folder}/{}", e.asset_filename)),
            )
        })
        .collect();

    let mut bytes = serde_json::to_vec_pretty(&Value::Object(map))?;
    bytes.push(b'\n');
    Ok(bytes)
}
