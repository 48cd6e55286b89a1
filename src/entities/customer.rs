// 👤 Customer Entity - KYC record: name, postal address, identity proof

use crate::codec::{FieldReader, FieldWriter, Record};
use crate::error::CodecResult;
use crate::keys::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Namespaced ledger key ("cust-1")
    pub cust_id: String,

    // ========================================================================
    // NAME
    // ========================================================================
    pub cust_first_name: String,
    pub cust_middle_name: String,
    pub cust_last_name: String,

    // ========================================================================
    // ADDRESS
    // ========================================================================
    pub street_no: String,
    pub street_name: String,
    pub apt_suite_unit_no: String,
    pub city: String,
    pub state: String,
    pub pincode: String,

    // ========================================================================
    // IDENTITY PROOF
    // ========================================================================
    /// Document type, e.g. PANCARD
    pub proof_type: String,
    pub proof_no: String,
}

/// Caller-supplied values for a new customer, in invocation argument order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFields {
    pub cust_first_name: String,
    pub cust_middle_name: String,
    pub cust_last_name: String,
    pub street_no: String,
    pub street_name: String,
    pub apt_suite_unit_no: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub proof_type: String,
    pub proof_no: String,
}

impl Record for Customer {
    const KIND: EntityKind = EntityKind::Customer;
    type Fields = CustomerFields;

    fn from_fields(id: String, fields: CustomerFields) -> Self {
        Customer {
            cust_id: id,
            cust_first_name: fields.cust_first_name,
            cust_middle_name: fields.cust_middle_name,
            cust_last_name: fields.cust_last_name,
            street_no: fields.street_no,
            street_name: fields.street_name,
            apt_suite_unit_no: fields.apt_suite_unit_no,
            city: fields.city,
            state: fields.state,
            pincode: fields.pincode,
            proof_type: fields.proof_type,
            proof_no: fields.proof_no,
        }
    }

    fn id(&self) -> &str {
        &self.cust_id
    }

    fn write_fields<'a>(&'a self, out: &mut FieldWriter<'a>) {
        out.string("custId", &self.cust_id);
        out.string("custFirstName", &self.cust_first_name);
        out.string("custMiddleName", &self.cust_middle_name);
        out.string("custLastName", &self.cust_last_name);
        out.string("streetNo", &self.street_no);
        out.string("streetName", &self.street_name);
        out.string("aptSuiteUnitNo", &self.apt_suite_unit_no);
        out.string("city", &self.city);
        out.string("state", &self.state);
        out.string("pincode", &self.pincode);
        out.string("proofType", &self.proof_type);
        out.string("proofNo", &self.proof_no);
    }

    fn read_fields(input: &mut FieldReader) -> CodecResult<Self> {
        Ok(Customer {
            cust_id: input.string("custId")?,
            cust_first_name: input.string("custFirstName")?,
            cust_middle_name: input.string("custMiddleName")?,
            cust_last_name: input.string("custLastName")?,
            street_no: input.string("streetNo")?,
            street_name: input.string("streetName")?,
            apt_suite_unit_no: input.string("aptSuiteUnitNo")?,
            city: input.string("city")?,
            state: input.string("state")?,
            pincode: input.string("pincode")?,
            proof_type: input.string("proofType")?,
            proof_no: input.string("proofNo")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use proptest::prelude::*;

    fn arb_fields() -> impl Strategy<Value = CustomerFields> {
        proptest::collection::vec(".{0,12}", 11).prop_map(|v| CustomerFields {
            cust_first_name: v[0].clone(),
            cust_middle_name: v[1].clone(),
            cust_last_name: v[2].clone(),
            street_no: v[3].clone(),
            street_name: v[4].clone(),
            apt_suite_unit_no: v[5].clone(),
            city: v[6].clone(),
            state: v[7].clone(),
            pincode: v[8].clone(),
            proof_type: v[9].clone(),
            proof_no: v[10].clone(),
        })
    }

    proptest! {
        #[test]
        fn customer_round_trips(id in "cust-[0-9]{1,6}", fields in arb_fields()) {
            let customer = Customer::from_fields(id, fields.clone());
            let bytes = encode(&customer);

            // Same logical values built twice encode identically
            let again = Customer::from_fields(customer.cust_id.clone(), fields);
            prop_assert_eq!(&bytes, &encode(&again));
            prop_assert_eq!(decode::<Customer>(&bytes).unwrap(), customer);
        }
    }

    #[test]
    fn test_customer_has_twelve_wire_fields() {
        let customer = Customer::from_fields("cust-1".to_string(), CustomerFields::default());
        let json: serde_json::Value = serde_json::from_slice(&encode(&customer)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 12);
        assert_eq!(object["custId"], "cust-1");
        assert_eq!(object["aptSuiteUnitNo"], "");
    }
}
