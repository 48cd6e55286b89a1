// Customer Service - CreateCustomer / ReadCustomer / CustomerExists / GetAllCustomers

use crate::codec::Record;
use crate::entities::{Customer, CustomerFields};
use crate::error::ContractResult;
use crate::ledger::Ledger;
use crate::store::EntityStore;

#[derive(Default)]
pub struct CustomerService {
    store: EntityStore<Customer>,
}

impl CustomerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the bootstrap customer, cust-1
    pub fn init_ledger<L: Ledger + ?Sized>(&self, ledger: &mut L) -> ContractResult<()> {
        self.create_customer(ledger, "1", seed_customer())?;
        Ok(())
    }

    pub fn create_customer<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        cust_id: &str,
        fields: CustomerFields,
    ) -> ContractResult<Customer> {
        self.store.create(ledger, cust_id, fields)
    }

    /// `cust_id` is the stored id, e.g. "cust-1"
    pub fn read_customer<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        cust_id: &str,
    ) -> ContractResult<Customer> {
        self.store.read_key(ledger, cust_id)
    }

    /// Keys outside the `cust-` namespace report `false`, stored or not
    pub fn customer_exists<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        cust_id: &str,
    ) -> ContractResult<bool> {
        Ok(Customer::KIND.owns(cust_id) && self.store.exists(ledger, cust_id)?)
    }

    pub fn get_all_customers<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
    ) -> ContractResult<Vec<Customer>> {
        self.store.list_all(ledger)
    }
}

fn seed_customer() -> CustomerFields {
    CustomerFields {
        cust_first_name: "Aniket".to_string(),
        cust_middle_name: "Prakash".to_string(),
        cust_last_name: "Anerao".to_string(),
        street_no: "Sant Namdeo Path No 2".to_string(),
        street_name: "Gograsswadi".to_string(),
        apt_suite_unit_no: "A-6".to_string(),
        city: "Dombivli".to_string(),
        state: "Maharashtra".to_string(),
        pincode: "421201".to_string(),
        proof_type: "PANCARD".to_string(),
        proof_no: "ABDCA4364R".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::services::VehInsuranceService;

    #[test]
    fn test_seeded_customer() {
        let service = CustomerService::new();
        let mut ledger = MemoryLedger::new();
        service.init_ledger(&mut ledger).unwrap();

        let customer = service.read_customer(&ledger, "cust-1").unwrap();
        assert_eq!(customer.cust_id, "cust-1");
        assert_eq!(customer.cust_first_name, "Aniket");
        assert_eq!(customer.cust_last_name, "Anerao");
        assert_eq!(customer.pincode, "421201");
        assert_eq!(customer.proof_type, "PANCARD");
    }

    #[test]
    fn test_duplicate_customer() {
        let service = CustomerService::new();
        let mut ledger = MemoryLedger::new();

        service
            .create_customer(&mut ledger, "7", CustomerFields::default())
            .unwrap();
        let err = service
            .create_customer(&mut ledger, "7", seed_customer())
            .unwrap_err();
        assert_eq!(err.code(), "CUSTOMER_ALREADY_EXISTS");

        // First write survives
        let stored = service.read_customer(&ledger, "cust-7").unwrap();
        assert_eq!(stored.cust_first_name, "");
    }

    #[test]
    fn test_missing_customer() {
        let service = CustomerService::new();
        let ledger = MemoryLedger::new();

        let err = service.read_customer(&ledger, "cust-1").unwrap_err();
        assert_eq!(err.code(), "CUSTOMER_NOT_FOUND");
        assert!(!service.customer_exists(&ledger, "cust-1").unwrap());
        assert!(service.get_all_customers(&ledger).unwrap().is_empty());
    }

    #[test]
    fn test_customer_exists_is_false_for_foreign_key() {
        let service = CustomerService::new();
        let mut ledger = MemoryLedger::new();
        VehInsuranceService::new().init_ledger(&mut ledger).unwrap();

        assert!(!ledger.get_state("vehins-1").unwrap().is_empty());
        assert!(!service.customer_exists(&ledger, "vehins-1").unwrap());
    }
}
