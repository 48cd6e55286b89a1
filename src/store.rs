// 🏛️ Entity Store - generic create / read / exists / list engine
//
// One engine for every record kind. The kind decides the key prefix, the
// error labels and the codec; the store decides the ledger access pattern:
// - create: read-check then exactly one write, or no write at all
// - read:   one point read, decoded
// - list:   one range scan bounded to the kind's namespace
//
// Nothing is cached between calls. The ledger is the only state.

use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::codec::{self, Record};
use crate::error::{ContractError, ContractResult};
use crate::ledger::Ledger;

pub struct EntityStore<E: Record> {
    _kind: PhantomData<fn() -> E>,
}

impl<E: Record> EntityStore<E> {
    pub const fn new() -> Self {
        EntityStore { _kind: PhantomData }
    }

    /// True iff a non-empty value is stored at `key`
    pub fn exists<L: Ledger + ?Sized>(&self, ledger: &L, key: &str) -> ContractResult<bool> {
        Ok(!ledger.get_state(key)?.is_empty())
    }

    /// Create-if-absent under `namespace(kind, natural_id)`
    pub fn create<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        natural_id: &str,
        fields: E::Fields,
    ) -> ContractResult<E> {
        let key = E::KIND.namespace(natural_id);

        if self.exists(&*ledger, &key)? {
            warn!(kind = %E::KIND, %key, "{} {} already exists", E::KIND, key);
            return Err(ContractError::AlreadyExists { kind: E::KIND, key });
        }

        let record = E::from_fields(key.clone(), fields);
        let bytes = codec::encode(&record);
        ledger.put_state(&key, &bytes)?;

        debug!(kind = %E::KIND, key = record.id(), bytes = bytes.len(), "record created");
        Ok(record)
    }

    /// Read by natural identifier
    pub fn read<L: Ledger + ?Sized>(&self, ledger: &L, natural_id: &str) -> ContractResult<E> {
        self.read_key(ledger, &E::KIND.namespace(natural_id))
    }

    /// Read by full ledger key, i.e. the id stored in the record.
    ///
    /// Keys outside this kind's namespace are NOT_FOUND without a ledger
    /// read, so a foreign record is never decoded as the wrong kind.
    pub fn read_key<L: Ledger + ?Sized>(&self, ledger: &L, key: &str) -> ContractResult<E> {
        let bytes = if E::KIND.owns(key) {
            ledger.get_state(key)?
        } else {
            Vec::new()
        };

        if bytes.is_empty() {
            warn!(kind = %E::KIND, %key, "{} {} does not exist", E::KIND, key);
            return Err(ContractError::NotFound {
                kind: E::KIND,
                key: key.to_string(),
            });
        }

        Ok(codec::decode(&bytes)?)
    }

    /// Every record of this kind, in ledger key order
    pub fn list_all<L: Ledger + ?Sized>(&self, ledger: &L) -> ContractResult<Vec<E>> {
        let (start, end) = E::KIND.scan_range();
        let entries = ledger.get_state_by_range(&start, &end)?;

        let records = entries
            .iter()
            .filter(|kv| !kv.value.is_empty())
            .map(|kv| codec::decode(&kv.value).map_err(ContractError::from))
            .collect::<ContractResult<Vec<E>>>()?;

        debug!(kind = %E::KIND, count = records.len(), "range scan");
        Ok(records)
    }
}

impl<E: Record> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
