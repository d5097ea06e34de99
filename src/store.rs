use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// Render `value` as four-space indented JSON. Non-ASCII text is kept as-is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write the whole document in one go; nothing is written if serialization fails.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let buf = to_pretty_json(value)?;
    fs::write(path, buf).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to open {:?}", path))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {:?}", path))?;
    Ok(value)
}
