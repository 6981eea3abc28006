use dmt_core::errors::{DmtError, ErrorInfo};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

fn encode_error(code: &str, err: impl ToString) -> DmtError {
    DmtError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn decode_error(code: &str, payload: &str, err: impl ToString) -> DmtError {
    DmtError::Serde(ErrorInfo::new(code, err.to_string()).with_context("payload", payload))
}

// Objects are written with their keys in byte order at every depth, so the
// output does not depend on the map type serde_json was built with.
fn write_canonical(value: &Value, out: &mut Vec<u8>) -> Result<(), DmtError> {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push(b'{');
            for (idx, key) in keys.into_iter().enumerate() {
                if idx > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)
                    .map_err(|err| encode_error("json_write", err))?;
                out.push(b':');
                write_canonical(&map[key.as_str()], out)?;
            }
            out.push(b'}');
        }
        Value::Array(items) => {
            out.push(b'[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(b',');
                }
                write_canonical(item, out)?;
            }
            out.push(b']');
        }
        scalar => {
            serde_json::to_writer(&mut *out, scalar)
                .map_err(|err| encode_error("json_write", err))?;
        }
    }
    Ok(())
}

/// Compact JSON with sorted object keys; the byte form fed to report hashes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, DmtError> {
    let value = serde_json::to_value(value).map_err(|err| encode_error("json_serialize", err))?;
    let mut bytes = Vec::new();
    write_canonical(&value, &mut bytes)?;
    Ok(bytes)
}

/// Decodes a JSON artefact; `payload` names it in the error context.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8], payload: &str) -> Result<T, DmtError> {
    serde_json::from_slice(data).map_err(|err| decode_error("json_deserialize", payload, err))
}

/// Renders a value as YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, DmtError> {
    serde_yaml::to_string(value).map_err(|err| encode_error("yaml_serialize", err))
}

/// Decodes a YAML document; `payload` names it in the error context.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8], payload: &str) -> Result<T, DmtError> {
    serde_yaml::from_slice(data).map_err(|err| decode_error("yaml_deserialize", payload, err))
}
