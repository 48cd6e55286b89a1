// Vehicle Insurance Service - CreateInsurance / ReadInsurance / InsuranceExists / GetAllInsurance

use crate::codec::Record;
use crate::entities::{VehInsurance, VehInsuranceFields};
use crate::error::ContractResult;
use crate::ledger::Ledger;
use crate::store::EntityStore;

#[derive(Default)]
pub struct VehInsuranceService {
    store: EntityStore<VehInsurance>,
}

impl VehInsuranceService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed two policies for cust-1 (vehins-1 with comp-1, vehins-2 with comp-2)
    pub fn init_ledger<L: Ledger + ?Sized>(&self, ledger: &mut L) -> ContractResult<()> {
        self.create_insurance(ledger, "1", seed_policy("comp-1"))?;
        self.create_insurance(ledger, "2", seed_policy("comp-2"))?;
        Ok(())
    }

    pub fn create_insurance<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        insurance_id: &str,
        fields: VehInsuranceFields,
    ) -> ContractResult<VehInsurance> {
        self.store.create(ledger, insurance_id, fields)
    }

    /// `insurance_id` is the stored id, e.g. "vehins-1"
    pub fn read_insurance<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        insurance_id: &str,
    ) -> ContractResult<VehInsurance> {
        self.store.read_key(ledger, insurance_id)
    }

    /// Keys outside the `vehins-` namespace report `false`, stored or not
    pub fn insurance_exists<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        insurance_id: &str,
    ) -> ContractResult<bool> {
        Ok(VehInsurance::KIND.owns(insurance_id) && self.store.exists(ledger, insurance_id)?)
    }

    pub fn get_all_insurance<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
    ) -> ContractResult<Vec<VehInsurance>> {
        self.store.list_all(ledger)
    }
}

fn seed_policy(company_id: &str) -> VehInsuranceFields {
    VehInsuranceFields {
        cust_id: "cust-1".to_string(),
        company_id: company_id.to_string(),
        vin: "1".to_string(),
        exp_date: "2023-12-12".to_string(),
        ins_type: "COMPREHENSIVE".to_string(),
        vehicle_make: "SUV".to_string(),
        vehicle_model: "Tata".to_string(),
        vehicle_model_year: "2022".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::services::ClaimService;

    #[test]
    fn test_seed_creates_two_policies() {
        let service = VehInsuranceService::new();
        let mut ledger = MemoryLedger::new();
        service.init_ledger(&mut ledger).unwrap();

        let all = service.get_all_insurance(&ledger).unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.insurance_id.as_str()).collect();
        assert_eq!(ids, ["vehins-1", "vehins-2"]);
        assert_eq!(all[1].company_id, "comp-2");
    }

    #[test]
    fn test_policy_for_unknown_customer_is_accepted() {
        let service = VehInsuranceService::new();
        let mut ledger = MemoryLedger::new();

        let policy = service
            .create_insurance(
                &mut ledger,
                "9",
                VehInsuranceFields {
                    cust_id: "cust-404".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(policy.insurance_id, "vehins-9");
        assert!(service.insurance_exists(&ledger, "vehins-9").unwrap());
    }

    #[test]
    fn test_missing_policy_label() {
        let service = VehInsuranceService::new();
        let ledger = MemoryLedger::new();

        let err = service.read_insurance(&ledger, "vehins-1").unwrap_err();
        assert_eq!(err.code(), "INSURANCE_NOT_FOUND");
        assert_eq!(err.to_string(), "Insurance vehins-1 does not exist");
    }

    #[test]
    fn test_insurance_exists_is_false_for_foreign_key() {
        let service = VehInsuranceService::new();
        let mut ledger = MemoryLedger::new();
        ClaimService::new().init_ledger(&mut ledger).unwrap();

        assert!(!ledger.get_state("claim-1").unwrap().is_empty());
        assert!(!service.insurance_exists(&ledger, "claim-1").unwrap());
    }
}
