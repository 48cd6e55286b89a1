// Claim Service - CreateClaim / ReadClaim / ClaimExists / GetAllClaims

use crate::codec::Record;
use crate::entities::{Claim, ClaimFields};
use crate::error::ContractResult;
use crate::ledger::Ledger;
use crate::store::EntityStore;

#[derive(Default)]
pub struct ClaimService {
    store: EntityStore<Claim>,
}

impl ClaimService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bootstrap claim against the seeded policy vehins-1
    pub fn init_ledger<L: Ledger + ?Sized>(&self, ledger: &mut L) -> ContractResult<()> {
        self.create_claim(ledger, "1", "vehins-1", 3000, "NEW_CLAIM")?;
        Ok(())
    }

    /// `claim_id` is the natural id; the stored claim gets `claim-<id>`
    pub fn create_claim<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        claim_id: &str,
        insurance_id: &str,
        claim_amount: u64,
        claim_status: &str,
    ) -> ContractResult<Claim> {
        self.store.create(
            ledger,
            claim_id,
            ClaimFields {
                insurance_id: insurance_id.to_string(),
                claim_amount,
                claim_status: claim_status.to_string(),
            },
        )
    }

    /// `claim_id` is the stored id, e.g. "claim-1"
    pub fn read_claim<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        claim_id: &str,
    ) -> ContractResult<Claim> {
        self.store.read_key(ledger, claim_id)
    }

    /// Keys outside the `claim-` namespace report `false`, stored or not
    pub fn claim_exists<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        claim_id: &str,
    ) -> ContractResult<bool> {
        Ok(Claim::KIND.owns(claim_id) && self.store.exists(ledger, claim_id)?)
    }

    pub fn get_all_claims<L: Ledger + ?Sized>(&self, ledger: &L) -> ContractResult<Vec<Claim>> {
        self.store.list_all(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::services::CustomerService;

    #[test]
    fn test_create_and_list_claims() {
        let service = ClaimService::new();
        let mut ledger = MemoryLedger::new();

        service
            .create_claim(&mut ledger, "1", "vehins-1", 3000, "NEW_CLAIM")
            .unwrap();

        let all = service.get_all_claims(&ledger).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].claim_id, "claim-1");
        assert_eq!(all[0].claim_amount, 3000);
    }

    #[test]
    fn test_claim_references_are_not_validated() {
        let service = ClaimService::new();
        let mut ledger = MemoryLedger::new();

        // No vehins-999 on the ledger; create still succeeds
        let claim = service
            .create_claim(&mut ledger, "5", "vehins-999", 10, "NEW_CLAIM")
            .unwrap();
        assert_eq!(claim.insurance_id, "vehins-999");
    }

    #[test]
    fn test_claim_exists_uses_stored_id() {
        let service = ClaimService::new();
        let mut ledger = MemoryLedger::new();
        service.init_ledger(&mut ledger).unwrap();

        assert!(service.claim_exists(&ledger, "claim-1").unwrap());
        assert!(!service.claim_exists(&ledger, "1").unwrap());
        assert!(!service.claim_exists(&ledger, "claim-2").unwrap());

        let claim = service.read_claim(&ledger, "claim-1").unwrap();
        assert_eq!(claim.claim_status, "NEW_CLAIM");
        assert_eq!(claim.insurance_id, "vehins-1");
    }

    #[test]
    fn test_init_ledger_twice_fails() {
        let service = ClaimService::new();
        let mut ledger = MemoryLedger::new();
        service.init_ledger(&mut ledger).unwrap();

        let err = service.init_ledger(&mut ledger).unwrap_err();
        assert_eq!(err.code(), "CLAIM_ALREADY_EXISTS");
    }

    #[test]
    fn test_claim_exists_is_false_for_foreign_key() {
        let service = ClaimService::new();
        let mut ledger = MemoryLedger::new();
        CustomerService::new().init_ledger(&mut ledger).unwrap();

        // cust-1 holds a value, but not a claim
        assert!(!ledger.get_state("cust-1").unwrap().is_empty());
        assert!(!service.claim_exists(&ledger, "cust-1").unwrap());
    }
}
