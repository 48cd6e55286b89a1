// Domain Services - one thin facade per record kind
//
// Each service owns its kind's error labels (through the store) and a fixed
// bootstrap record set. None of them checks references across kinds.

pub mod claim;
pub mod customer;
pub mod veh_insurance;

pub use claim::ClaimService;
pub use customer::CustomerService;
pub use veh_insurance::VehInsuranceService;
