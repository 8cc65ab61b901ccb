//! Saving and restoring parameter state as JSON.
//!
//! ```json
//! {"version":1,"params":{"corruption":0.25,"drown":0.5},"revelation":3}
//! ```
//!
//! Parameters are keyed by string id so the blob survives reordering.
//! Restoring never re-applies the stored preset: the knob values in the
//! blob are the user's last settings, possibly tweaked after selection.
//!
//! Import follows the rules of direct writes: values are clamped, and
//! anything invalid or absent (an unknown key, a missing parameter, an
//! out-of-range preset index, a missing `revelation`) leaves the current
//! value alone. An explicit `"revelation": null` restores "no preset".

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, Result};
use crate::params::Param;
use crate::presets::preset_at;
use crate::store::ParameterStore;

/// Current format version.
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StateBlob {
    version: u32,
    #[serde(default)]
    params: BTreeMap<String, f32>,
    /// Outer `None`: key absent. `Some(None)`: explicit null.
    #[serde(default, deserialize_with = "present")]
    revelation: Option<Option<i64>>,
}

/// Distinguish an explicit `null` from a missing key.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

/// Serialize every value in `store`.
pub fn export(store: &ParameterStore) -> Result<Vec<u8>> {
    let snapshot = store.snapshot();
    let params = Param::CONTINUOUS
        .into_iter()
        .map(|p| (p.string_id().to_string(), snapshot.get(p)))
        .collect();
    let blob = StateBlob {
        version: STATE_VERSION,
        params,
        revelation: Some(snapshot.revelation.map(|i| i as i64)),
    };
    let bytes = serde_json::to_vec(&blob)?;
    tracing::info!(bytes = bytes.len(), "exported state");
    Ok(bytes)
}

/// Restore values from a blob produced by [`export`].
///
/// Values are clamped like [`ParameterStore::set`]. Unknown keys are skipped
/// with a warning; parameters missing from the blob keep their current
/// value. All restored values land as one batch.
pub fn import(store: &ParameterStore, bytes: &[u8]) -> Result<()> {
    let blob: StateBlob = serde_json::from_slice(bytes)?;
    if blob.version != STATE_VERSION {
        return Err(EngineError::StateVersion(blob.version));
    }

    let mut writes = Vec::with_capacity(blob.params.len());
    for (key, value) in &blob.params {
        match Param::from_string_id(key) {
            Some(param) if param.continuous_index().is_some() => writes.push((param, *value)),
            _ => tracing::warn!(key = %key, "skipping unknown parameter in state"),
        }
    }
    store.apply_batch(&writes);

    match blob.revelation {
        None => {}
        Some(None) => store.restore_revelation(None),
        Some(Some(index)) => match preset_at(index) {
            Some(_) => store.restore_revelation(Some(index as usize)),
            None => tracing::warn!(index, "skipping out-of-range preset index in state"),
        },
    }

    tracing::info!(params = writes.len(), revelation = ?store.revelation(), "imported state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let source = ParameterStore::new();
        source.set(Param::Corruption, 0.25);
        source.set(Param::Whispers, 0.75);
        source.set_revelation(6);
        let bytes = export(&source).unwrap();

        let target = ParameterStore::new();
        import(&target, &bytes).unwrap();
        assert_eq!(target.snapshot(), source.snapshot());
    }

    #[test]
    fn export_format() {
        let store = ParameterStore::new();
        let value: serde_json::Value = serde_json::from_slice(&export(&store).unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["params"]["obscura"], 1.0);
        assert_eq!(value["params"].as_object().unwrap().len(), 7);
        assert!(value["revelation"].is_null());
    }

    #[test]
    fn import_clamps_and_skips_unknown() {
        let store = ParameterStore::new();
        let blob = br#"{"version":1,"params":{"drown":4.0,"erosion":-1.0,"gain":0.3}}"#;
        import(&store, blob).unwrap();
        assert_eq!(store.get(Param::Drown), 1.0);
        assert_eq!(store.get(Param::Erosion), 0.0);
    }

    #[test]
    fn absent_params_keep_current_values() {
        let store = ParameterStore::new();
        store.set(Param::Tremor, 0.6);
        import(&store, br#"{"version":1,"params":{"void":0.2}}"#).unwrap();
        assert_eq!(store.get(Param::Tremor), 0.6);
        assert_eq!(store.get(Param::Void), 0.2);
    }

    #[test]
    fn out_of_range_revelation_is_ignored_like_a_direct_write() {
        let direct = ParameterStore::new();
        direct.set_revelation(2);
        direct.set(Param::Revelation, 15.0);

        let imported = ParameterStore::new();
        imported.set_revelation(2);
        import(&imported, br#"{"version":1,"revelation":15}"#).unwrap();
        import(&imported, br#"{"version":1,"revelation":-1}"#).unwrap();

        assert_eq!(imported.revelation(), Some(2));
        assert_eq!(imported.revelation(), direct.revelation());
    }

    #[test]
    fn absent_revelation_keeps_current_and_null_clears() {
        let store = ParameterStore::new();
        store.set_revelation(5);
        import(&store, br#"{"version":1,"params":{"drown":0.1}}"#).unwrap();
        assert_eq!(store.revelation(), Some(5));

        import(&store, br#"{"version":1,"revelation":null}"#).unwrap();
        assert_eq!(store.revelation(), None);
    }

    #[test]
    fn unset_revelation_round_trips() {
        let source = ParameterStore::new();
        let bytes = export(&source).unwrap();

        let target = ParameterStore::new();
        target.set_revelation(7);
        import(&target, &bytes).unwrap();
        assert_eq!(target.revelation(), None);
    }

    #[test]
    fn rejects_other_versions_and_garbage() {
        let store = ParameterStore::new();
        assert!(matches!(
            import(&store, br#"{"version":2,"params":{}}"#),
            Err(EngineError::StateVersion(2))
        ));
        assert!(matches!(import(&store, b"not json"), Err(EngineError::StateFormat(_))));
        assert!(matches!(
            import(&store, br#"{"version":1,"params":{"drown":"loud"}}"#),
            Err(EngineError::StateFormat(_))
        ));
    }
}
