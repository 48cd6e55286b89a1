// 🚗 VehInsurance Entity - a vehicle policy issued to a customer
//
// custId and companyId are opaque references. Seed data creates policies
// before or without their customers, so no existence check is made.

use crate::codec::{FieldReader, FieldWriter, Record};
use crate::error::CodecResult;
use crate::keys::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehInsurance {
    /// Namespaced ledger key ("vehins-1")
    pub insurance_id: String,
    pub cust_id: String,
    pub company_id: String,

    /// Vehicle identification number
    pub vin: String,
    pub exp_date: String,

    /// Coverage type, e.g. COMPREHENSIVE
    pub ins_type: String,

    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_model_year: String,
}

/// Caller-supplied values for a new policy, in invocation argument order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehInsuranceFields {
    pub cust_id: String,
    pub company_id: String,
    pub vin: String,
    pub exp_date: String,
    pub ins_type: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_model_year: String,
}

impl Record for VehInsurance {
    const KIND: EntityKind = EntityKind::VehInsurance;
    type Fields = VehInsuranceFields;

    fn from_fields(id: String, fields: VehInsuranceFields) -> Self {
        VehInsurance {
            insurance_id: id,
            cust_id: fields.cust_id,
            company_id: fields.company_id,
            vin: fields.vin,
            exp_date: fields.exp_date,
            ins_type: fields.ins_type,
            vehicle_make: fields.vehicle_make,
            vehicle_model: fields.vehicle_model,
            vehicle_model_year: fields.vehicle_model_year,
        }
    }

    fn id(&self) -> &str {
        &self.insurance_id
    }

    fn write_fields<'a>(&'a self, out: &mut FieldWriter<'a>) {
        out.string("insuranceId", &self.insurance_id);
        out.string("custId", &self.cust_id);
        out.string("companyId", &self.company_id);
        out.string("vin", &self.vin);
        out.string("expDate", &self.exp_date);
        out.string("insType", &self.ins_type);
        out.string("vehicleMake", &self.vehicle_make);
        out.string("vehicleModel", &self.vehicle_model);
        out.string("vehicleModelYear", &self.vehicle_model_year);
    }

    fn read_fields(input: &mut FieldReader) -> CodecResult<Self> {
        Ok(VehInsurance {
            insurance_id: input.string("insuranceId")?,
            cust_id: input.string("custId")?,
            company_id: input.string("companyId")?,
            vin: input.string("vin")?,
            exp_date: input.string("expDate")?,
            ins_type: input.string("insType")?,
            vehicle_make: input.string("vehicleMake")?,
            vehicle_model: input.string("vehicleModel")?,
            vehicle_model_year: input.string("vehicleModelYear")?,
        })
    }
}
