// Transaction stub - simulates one transaction over committed state
//
// Reads go to the buffered writes first, then to the committed ledger.
// Writes never reach the committed ledger; the caller takes the write set
// and decides whether to commit it. Dropping the stub discards everything,
// which is how a failed transaction ends up with zero mutations.

use std::collections::BTreeMap;

use tracing::trace;

use super::{in_range, KeyValue, Ledger, WriteSet};
use crate::error::LedgerResult;

pub struct TxStub<'a, L: Ledger + ?Sized> {
    committed: &'a L,
    writes: BTreeMap<String, Vec<u8>>,
}

impl<'a, L: Ledger + ?Sized> TxStub<'a, L> {
    pub fn new(committed: &'a L) -> Self {
        TxStub {
            committed,
            writes: BTreeMap::new(),
        }
    }

    pub fn into_write_set(self) -> WriteSet {
        WriteSet::from_entries(self.writes)
    }
}

impl<L: Ledger + ?Sized> Ledger for TxStub<'_, L> {
    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>> {
        match self.writes.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.committed.get_state(key),
        }
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> LedgerResult<()> {
        trace!(key, bytes = value.len(), "buffered write");
        self.writes.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> LedgerResult<Vec<KeyValue>> {
        let mut merged: BTreeMap<String, Vec<u8>> = self
            .committed
            .get_state_by_range(start_key, end_key)?
            .into_iter()
            .map(|kv| (kv.key, kv.value))
            .collect();

        for (key, value) in &self.writes {
            if in_range(key, start_key, end_key) {
                merged.insert(key.clone(), value.clone());
            }
        }

        Ok(merged
            .into_iter()
            .map(|(key, value)| KeyValue { key, value })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    #[test]
    fn test_writes_stay_buffered() {
        let mut committed = MemoryLedger::new();
        committed.put_state("a", b"1").unwrap();

        let mut stub = TxStub::new(&committed);
        stub.put_state("b", b"2").unwrap();
        stub.put_state("a", b"changed").unwrap();

        // Read-your-writes inside the transaction
        assert_eq!(stub.get_state("a").unwrap(), b"changed");
        assert_eq!(stub.get_state("b").unwrap(), b"2");

        let write_set = stub.into_write_set();
        assert_eq!(write_set.len(), 2);

        // Committed ledger untouched until commit
        assert_eq!(committed.get_state("a").unwrap(), b"1");
        assert!(committed.get_state("b").unwrap().is_empty());

        committed.commit("tx-1", &write_set).unwrap();
        assert_eq!(committed.get_state("a").unwrap(), b"changed");
        assert_eq!(committed.get_state("b").unwrap(), b"2");
    }

    #[test]
    fn test_range_merges_buffered_writes() {
        let mut committed = MemoryLedger::new();
        committed.put_state("claim-1", b"old").unwrap();
        committed.put_state("claim-3", b"c3").unwrap();
        committed.put_state("cust-1", b"cust").unwrap();

        let mut stub = TxStub::new(&committed);
        stub.put_state("claim-2", b"c2").unwrap();
        stub.put_state("claim-1", b"new").unwrap();
        stub.put_state("vehins-1", b"v").unwrap();

        let scanned = stub.get_state_by_range("claim-", "claim.").unwrap();
        let pairs: Vec<(&str, &[u8])> = scanned
            .iter()
            .map(|kv| (kv.key.as_str(), kv.value.as_slice()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("claim-1", &b"new"[..]),
                ("claim-2", &b"c2"[..]),
                ("claim-3", &b"c3"[..]),
            ]
        );
    }

    #[test]
    fn test_dropped_stub_commits_nothing() {
        let committed = MemoryLedger::new();
        {
            let mut stub = TxStub::new(&committed);
            stub.put_state("k", b"v").unwrap();
        }
        assert!(committed.is_empty());
    }
}
