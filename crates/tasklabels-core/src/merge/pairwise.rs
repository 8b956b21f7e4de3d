use tasklabels_model::{LabelSet, LabelValue, ModelError, ModelResult};

use crate::merge::MergeLabels;

/// Merge treating overrides as `key, value, key, value, ...`.
///
/// - keys must be strings;
/// - booleans and numbers are stored in their string form;
/// - `Null` or `Undefined` as a value removes the key;
/// - later pairs win over earlier ones and over the parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseMerge;

impl MergeLabels for PairwiseMerge {
    fn build(&self, parent: Option<&LabelSet>, overrides: &[LabelValue]) -> ModelResult<LabelSet> {
        if overrides.len() % 2 != 0 {
            return Err(ModelError::OddOverrides(overrides.len()));
        }

        let mut map = parent.map(LabelSet::to_map).unwrap_or_default();
        for (pair, chunk) in overrides.chunks_exact(2).enumerate() {
            let key = chunk[0].as_str().ok_or(ModelError::NonStringKey {
                index: pair * 2,
                kind: chunk[0].kind(),
            })?;

            match chunk[1].as_label() {
                Some(value) => {
                    map.insert(key.to_string(), value);
                }
                None => {
                    map.remove(key);
                }
            }
        }

        Ok(LabelSet::from_map(map))
    }
}
