// 📜 Insurance Contract - named transaction functions
//
// The gateway side calls functions by name with positional string arguments
// and gets bytes back. Submit functions mutate the ledger; evaluate functions
// only read it. Payloads are canonical JSON: one object per entity, an array
// for GetAll*, "true"/"false" for *Exists, nothing for InitLedger.

use std::fmt;

use tracing::debug;

use crate::codec::{encode, encode_list};
use crate::entities::{CustomerFields, VehInsuranceFields};
use crate::error::{ContractError, ContractResult};
use crate::ledger::Ledger;
use crate::services::{ClaimService, CustomerService, VehInsuranceService};

// ============================================================================
// FUNCTION TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Ordered and committed
    Submit,
    /// Read-only query, never committed
    Evaluate,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Submit => "submit",
            Intent::Evaluate => "evaluate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxFunction {
    InitLedger,
    CreateClaim,
    ReadClaim,
    ClaimExists,
    GetAllClaims,
    CreateCustomer,
    ReadCustomer,
    CustomerExists,
    GetAllCustomers,
    CreateInsurance,
    ReadInsurance,
    InsuranceExists,
    GetAllInsurance,
}

const CUSTOMER_PARAMS: &[&str] = &[
    "custId",
    "custFirstName",
    "custMiddleName",
    "custLastName",
    "streetNo",
    "streetName",
    "aptSuiteUnitNo",
    "city",
    "state",
    "pincode",
    "proofType",
    "proofNo",
];

const INSURANCE_PARAMS: &[&str] = &[
    "insuranceId",
    "custId",
    "companyId",
    "vin",
    "expDate",
    "insType",
    "vehicleMake",
    "vehicleModel",
    "vehicleModelYear",
];

impl TxFunction {
    pub const ALL: [TxFunction; 13] = [
        TxFunction::InitLedger,
        TxFunction::CreateClaim,
        TxFunction::ReadClaim,
        TxFunction::ClaimExists,
        TxFunction::GetAllClaims,
        TxFunction::CreateCustomer,
        TxFunction::ReadCustomer,
        TxFunction::CustomerExists,
        TxFunction::GetAllCustomers,
        TxFunction::CreateInsurance,
        TxFunction::ReadInsurance,
        TxFunction::InsuranceExists,
        TxFunction::GetAllInsurance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TxFunction::InitLedger => "InitLedger",
            TxFunction::CreateClaim => "CreateClaim",
            TxFunction::ReadClaim => "ReadClaim",
            TxFunction::ClaimExists => "ClaimExists",
            TxFunction::GetAllClaims => "GetAllClaims",
            TxFunction::CreateCustomer => "CreateCustomer",
            TxFunction::ReadCustomer => "ReadCustomer",
            TxFunction::CustomerExists => "CustomerExists",
            TxFunction::GetAllCustomers => "GetAllCustomers",
            TxFunction::CreateInsurance => "CreateInsurance",
            TxFunction::ReadInsurance => "ReadInsurance",
            TxFunction::InsuranceExists => "InsuranceExists",
            TxFunction::GetAllInsurance => "GetAllInsurance",
        }
    }

    pub fn from_name(name: &str) -> Option<TxFunction> {
        TxFunction::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn intent(&self) -> Intent {
        match self {
            TxFunction::InitLedger
            | TxFunction::CreateClaim
            | TxFunction::CreateCustomer
            | TxFunction::CreateInsurance => Intent::Submit,
            _ => Intent::Evaluate,
        }
    }

    /// Positional parameter names, in call order
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            TxFunction::InitLedger
            | TxFunction::GetAllClaims
            | TxFunction::GetAllCustomers
            | TxFunction::GetAllInsurance => &[],
            TxFunction::CreateClaim => &["claimID", "insuranceId", "claimAmount", "claimStatus"],
            TxFunction::ReadClaim | TxFunction::ClaimExists => &["claimID"],
            TxFunction::CreateCustomer => CUSTOMER_PARAMS,
            TxFunction::ReadCustomer | TxFunction::CustomerExists => &["custId"],
            TxFunction::CreateInsurance => INSURANCE_PARAMS,
            TxFunction::ReadInsurance | TxFunction::InsuranceExists => &["insuranceId"],
        }
    }
}

impl fmt::Display for TxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// CONTRACT
// ============================================================================

#[derive(Default)]
pub struct InsuranceContract {
    claims: ClaimService,
    customers: CustomerService,
    policies: VehInsuranceService,
}

impl InsuranceContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every service, customer first, claim last
    pub fn init_ledger<L: Ledger + ?Sized>(&self, ledger: &mut L) -> ContractResult<()> {
        self.customers.init_ledger(ledger)?;
        self.policies.init_ledger(ledger)?;
        self.claims.init_ledger(ledger)?;
        Ok(())
    }

    /// Run `function` with positional `args` and return its payload
    pub fn invoke<L, S>(
        &self,
        ledger: &mut L,
        function: &str,
        args: &[S],
    ) -> ContractResult<Vec<u8>>
    where
        L: Ledger + ?Sized,
        S: AsRef<str>,
    {
        let f = TxFunction::from_name(function)
            .ok_or_else(|| ContractError::UnknownFunction(function.to_string()))?;

        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        if args.len() != f.params().len() {
            return Err(ContractError::ArgumentCount {
                function: f.name(),
                expected: f.params().len(),
                got: args.len(),
            });
        }

        debug!(function = f.name(), intent = f.intent().as_str(), "invoke");

        let payload = match f {
            TxFunction::InitLedger => {
                self.init_ledger(ledger)?;
                Vec::new()
            }

            TxFunction::CreateClaim => {
                let amount = parse_amount(f, args[2])?;
                let claim = self
                    .claims
                    .create_claim(ledger, args[0], args[1], amount, args[3])?;
                encode(&claim)
            }
            TxFunction::ReadClaim => encode(&self.claims.read_claim(&*ledger, args[0])?),
            TxFunction::ClaimExists => bool_payload(self.claims.claim_exists(&*ledger, args[0])?),
            TxFunction::GetAllClaims => encode_list(&self.claims.get_all_claims(&*ledger)?),

            TxFunction::CreateCustomer => {
                let fields = CustomerFields {
                    cust_first_name: args[1].to_string(),
                    cust_middle_name: args[2].to_string(),
                    cust_last_name: args[3].to_string(),
                    street_no: args[4].to_string(),
                    street_name: args[5].to_string(),
                    apt_suite_unit_no: args[6].to_string(),
                    city: args[7].to_string(),
                    state: args[8].to_string(),
                    pincode: args[9].to_string(),
                    proof_type: args[10].to_string(),
                    proof_no: args[11].to_string(),
                };
                encode(&self.customers.create_customer(ledger, args[0], fields)?)
            }
            TxFunction::ReadCustomer => encode(&self.customers.read_customer(&*ledger, args[0])?),
            TxFunction::CustomerExists => {
                bool_payload(self.customers.customer_exists(&*ledger, args[0])?)
            }
            TxFunction::GetAllCustomers => {
                encode_list(&self.customers.get_all_customers(&*ledger)?)
            }

            TxFunction::CreateInsurance => {
                let fields = VehInsuranceFields {
                    cust_id: args[1].to_string(),
                    company_id: args[2].to_string(),
                    vin: args[3].to_string(),
                    exp_date: args[4].to_string(),
                    ins_type: args[5].to_string(),
                    vehicle_make: args[6].to_string(),
                    vehicle_model: args[7].to_string(),
                    vehicle_model_year: args[8].to_string(),
                };
                encode(&self.policies.create_insurance(ledger, args[0], fields)?)
            }
            TxFunction::ReadInsurance => encode(&self.policies.read_insurance(&*ledger, args[0])?),
            TxFunction::InsuranceExists => {
                bool_payload(self.policies.insurance_exists(&*ledger, args[0])?)
            }
            TxFunction::GetAllInsurance => encode_list(&self.policies.get_all_insurance(&*ledger)?),
        };

        Ok(payload)
    }
}

fn parse_amount(function: TxFunction, raw: &str) -> ContractResult<u64> {
    raw.parse::<u64>()
        .map_err(|e| ContractError::InvalidArgument {
            function: function.name(),
            argument: "claimAmount",
            reason: format!("{raw:?}: {e}"),
        })
}

fn bool_payload(value: bool) -> Vec<u8> {
    value.to_string().into_bytes()
}

// ============================================================================
// TESTS
// ============================================================================
