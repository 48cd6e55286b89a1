// In-memory ledger - ordered map, lexical key order

use std::collections::BTreeMap;
use std::ops::Bound;

use super::{KeyValue, Ledger};
use crate::error::LedgerResult;

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    state: BTreeMap<String, Vec<u8>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl Ledger for MemoryLedger {
    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>> {
        Ok(self.state.get(key).cloned().unwrap_or_default())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> LedgerResult<()> {
        self.state.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> LedgerResult<Vec<KeyValue>> {
        // BTreeMap::range panics on an inverted range
        if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
            return Ok(Vec::new());
        }

        let start = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key)
        };
        let end = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key)
        };

        Ok(self
            .state
            .range::<str, _>((start, end))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect())
    }
}
