//! Shared graph state: one ordered key-value mapping flows through all nodes.
//!
//! Keys are only ever added or overwritten during a run, never removed; a
//! downstream node may shadow an upstream key but history is not replayed.

use serde_json::Value;

/// Ordered mapping from state key to value, threaded through a graph run.
///
/// Backed by `serde_json::Map` with the `preserve_order` feature, so
/// iteration follows insertion order. Values are plain JSON: strings,
/// arrays, and structured records.
pub type State = serde_json::Map<String, Value>;

/// Merges `partial` into `state` by key-overwrite.
///
/// Existing keys are shadowed, new keys appended. Used by the engine and the
/// tracking bridge when folding a node's output back into the running state.
pub fn merge(state: &mut State, partial: State) {
    for (key, value) in partial {
        state.insert(key, value);
    }
}

/// Builds a state seeded with a single key, the usual entry shape for
/// wrapper graphs (e.g. `user_prompt`).
pub fn seeded(key: impl Into<String>, value: Value) -> State {
    let mut state = State::new();
    state.insert(key.into(), value);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// **Scenario**: merge overwrites existing keys and appends new ones.
    #[test]
    fn merge_overwrites_and_appends() {
        let mut state = seeded("a", json!(1));
        let mut partial = State::new();
        partial.insert("a".to_string(), json!(2));
        partial.insert("b".to_string(), json!("x"));
        merge(&mut state, partial);
        assert_eq!(state.get("a"), Some(&json!(2)));
        assert_eq!(state.get("b"), Some(&json!("x")));
        assert_eq!(state.len(), 2);
    }

    /// **Scenario**: insertion order is preserved across merges.
    #[test]
    fn insertion_order_preserved() {
        let mut state = State::new();
        state.insert("first".to_string(), json!(1));
        state.insert("second".to_string(), json!(2));
        let mut partial = State::new();
        partial.insert("third".to_string(), json!(3));
        merge(&mut state, partial);
        let keys: Vec<_> = state.keys().cloned().collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }
}
