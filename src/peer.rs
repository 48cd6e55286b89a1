// 🛰️ Local Peer - simulate, then commit
//
// Every invocation runs against a TxStub over the committed ledger.
// - evaluate: simulate, return the payload, drop the writes
// - submit:   simulate, and only if the function succeeded commit the
//             whole write set under a fresh transaction id
//
// A failed submit therefore leaves the committed ledger untouched.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::contract::InsuranceContract;
use crate::error::ContractResult;
use crate::ledger::{Ledger, TxStub, WriteSet};

/// Outcome of a committed transaction
#[derive(Debug, Clone)]
pub struct Receipt {
    pub tx_id: String,
    pub payload: Vec<u8>,
    pub payload_digest: String,
    pub write_set_digest: String,
    pub writes: usize,
}

pub struct Peer<L: Ledger> {
    ledger: L,
    contract: InsuranceContract,
}

impl<L: Ledger> Peer<L> {
    pub fn new(ledger: L) -> Self {
        Peer {
            ledger,
            contract: InsuranceContract::new(),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    /// Run `function` without committing; the payload is returned as-is
    pub fn evaluate<S: AsRef<str>>(&self, function: &str, args: &[S]) -> ContractResult<Vec<u8>> {
        let (payload, write_set) = self.simulate(function, args)?;
        if !write_set.is_empty() {
            debug!(function, writes = write_set.len(), "evaluate discarded writes");
        }
        Ok(payload)
    }

    /// Run `function` and commit its writes as one transaction
    pub fn submit<S: AsRef<str>>(&mut self, function: &str, args: &[S]) -> ContractResult<Receipt> {
        let (payload, write_set) = match self.simulate(function, args) {
            Ok(result) => result,
            Err(e) => {
                warn!(function, code = e.code(), "submit rejected: {}", e);
                return Err(e);
            }
        };

        let tx_id = Uuid::new_v4().to_string();
        let write_set_digest = write_set.digest();
        self.ledger.commit(&tx_id, &write_set)?;

        info!(
            function,
            %tx_id,
            writes = write_set.len(),
            digest = %write_set_digest,
            "transaction committed"
        );

        Ok(Receipt {
            tx_id,
            payload_digest: codec::digest(&payload),
            payload,
            write_set_digest,
            writes: write_set.len(),
        })
    }

    /// Payload and write set of `function` against the current committed state
    pub fn simulate<S: AsRef<str>>(
        &self,
        function: &str,
        args: &[S],
    ) -> ContractResult<(Vec<u8>, WriteSet)> {
        let mut stub = TxStub::new(&self.ledger);
        let payload = self.contract.invoke(&mut stub, function, args)?;
        Ok((payload, stub.into_write_set()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
