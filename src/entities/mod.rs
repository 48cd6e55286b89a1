// Entity Models - the three record kinds written to the ledger
//
// Each entity:
// - carries its namespaced ledger key as its identifier
// - is immutable once written (no update, no delete)
// - maps its wire fields by hand through the canonical codec

pub mod claim;
pub mod customer;
pub mod veh_insurance;

pub use claim::{Claim, ClaimFields};
pub use customer::{Customer, CustomerFields};
pub use veh_insurance::{VehInsurance, VehInsuranceFields};
