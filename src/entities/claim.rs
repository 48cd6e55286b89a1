// 📄 Claim Entity - a claim raised against a vehicle policy
//
// The referenced policy (insuranceId) is an opaque string. Nothing checks
// that it points at an existing VehInsurance record.

use crate::codec::{FieldReader, FieldWriter, Record};
use crate::error::CodecResult;
use crate::keys::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// Namespaced ledger key ("claim-1")
    pub claim_id: String,

    /// Policy this claim is raised against
    pub insurance_id: String,

    /// Amount in whole currency units
    pub claim_amount: u64,

    /// Free-form status token, e.g. NEW_CLAIM
    pub claim_status: String,
}

/// Caller-supplied values for a new claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimFields {
    pub insurance_id: String,
    pub claim_amount: u64,
    pub claim_status: String,
}

impl Record for Claim {
    const KIND: EntityKind = EntityKind::Claim;
    type Fields = ClaimFields;

    fn from_fields(id: String, fields: ClaimFields) -> Self {
        Claim {
            claim_id: id,
            insurance_id: fields.insurance_id,
            claim_amount: fields.claim_amount,
            claim_status: fields.claim_status,
        }
    }

    fn id(&self) -> &str {
        &self.claim_id
    }

    fn write_fields<'a>(&'a self, out: &mut FieldWriter<'a>) {
        out.string("claimID", &self.claim_id);
        out.string("insuranceId", &self.insurance_id);
        out.uint("claimAmount", self.claim_amount);
        out.string("claimStatus", &self.claim_status);
    }

    fn read_fields(input: &mut FieldReader) -> CodecResult<Self> {
        Ok(Claim {
            claim_id: input.string("claimID")?,
            insurance_id: input.string("insuranceId")?,
            claim_amount: input.uint("claimAmount")?,
            claim_status: input.string("claimStatus")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn claim_round_trips(
            id in ".*",
            insurance_id in ".*",
            claim_amount in any::<u64>(),
            claim_status in "[A-Z_]{0,16}",
        ) {
            let claim = Claim::from_fields(
                id,
                ClaimFields { insurance_id, claim_amount, claim_status },
            );
            let bytes = encode(&claim);
            prop_assert_eq!(&bytes, &encode(&claim.clone()));
            prop_assert_eq!(decode::<Claim>(&bytes).unwrap(), claim);
        }
    }

    #[test]
    fn test_claim_wire_names() {
        let claim = Claim::from_fields(
            "claim-7".to_string(),
            ClaimFields {
                insurance_id: "vehins-2".to_string(),
                claim_amount: 0,
                claim_status: "NEW_CLAIM".to_string(),
            },
        );
        let json: serde_json::Value = serde_json::from_slice(&encode(&claim)).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["claimAmount", "claimID", "claimStatus", "insuranceId"]);
        assert_eq!(json["claimAmount"], 0);
    }
}
