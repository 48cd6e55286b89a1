// Insurance Ledger - Core Library
// Exposes the contract, its ledger backends and the local peer for the CLI and tests

pub mod keys;      // Key namespaces per record kind
pub mod error;     // Typed errors + stable labels
pub mod codec;     // Canonical JSON for ledger values
pub mod entities;  // Claim, Customer, VehInsurance
pub mod ledger;    // Ledger trait + memory / SQLite / tx stub backends
pub mod store;     // Generic create / read / exists / list engine
pub mod services;  // One facade per record kind
pub mod contract;  // Named transaction functions
pub mod peer;      // Simulate + commit
pub mod config;    // TOML + env configuration

// Re-export commonly used types
pub use codec::{decode, encode, encode_list, Record};
pub use config::Config;
pub use contract::{InsuranceContract, Intent, TxFunction};
pub use entities::{
    Claim, ClaimFields,
    Customer, CustomerFields,
    VehInsurance, VehInsuranceFields,
};
pub use error::{
    CodecError, ContractError, ContractResult,
    LedgerError, LedgerResult,
};
pub use keys::EntityKind;
pub use ledger::{HistoryEntry, KeyValue, Ledger, MemoryLedger, SqliteLedger, TxStub, WriteSet};
pub use peer::{Peer, Receipt};
pub use services::{ClaimService, CustomerService, VehInsuranceService};
pub use store::EntityStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
