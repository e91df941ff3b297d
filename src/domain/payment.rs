use crate::error::CheckoutError;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

pub const DEFAULT_COUNTRY: &str = "TZN";
pub const DEFAULT_CURRENCY: &str = "TZS";
pub const DEFAULT_SERVICE_PROVIDER_CODE: &str = "000000";
pub const DEFAULT_TRANSACTION_REFERENCE: &str = "T1234C";

/// Represents a positive amount requested from the customer.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, CheckoutError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(CheckoutError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = CheckoutError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Markets the collection API can be pointed at.
///
/// The calling code used to normalize MSISDNs is derived from here, so a new
/// market brings its own prefix and national number pattern with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "TZN")]
    Tanzania,
}

impl Country {
    pub fn code(&self) -> &'static str {
        match self {
            Country::Tanzania => "TZN",
        }
    }

    pub fn calling_code(&self) -> &'static str {
        match self {
            Country::Tanzania => "255",
        }
    }

    /// Pattern a mobile number must match in national format, without the
    /// calling code or a leading zero.
    pub fn national_mobile_pattern(&self) -> &'static Regex {
        match self {
            Country::Tanzania => {
                static TANZANIA_MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
                TANZANIA_MOBILE_REGEX.get_or_init(|| Regex::new(r"^[67]\d{8}$").unwrap())
            }
        }
    }

    pub fn is_valid_national_number(&self, number: &str) -> bool {
        self.national_mobile_pattern().is_match(number)
    }

    /// Prefixes a national number with this country's calling code.
    ///
    /// The input is expected to have been validated already; the result is
    /// not checked again.
    pub fn to_msisdn(&self, national_number: &str) -> String {
        format!("{}{}", self.calling_code(), national_number)
    }
}

impl FromStr for Country {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TZN" => Ok(Country::Tanzania),
            other => Err(CheckoutError::Validation(format!(
                "Unsupported country code: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A subscription package the checkout was opened for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRef {
    pub id: String,
    pub name: String,
}

/// What the caller hands to the payment dialog when opening it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutContext {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub package: Option<PackageRef>,
}

impl CheckoutContext {
    pub fn new(amount: Option<Decimal>) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_package(mut self, package: PackageRef) -> Self {
        self.package = Some(package);
        self
    }
}

/// A customer-to-business collection request, in the shape the M-Pesa
/// OpenAPI expects it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(rename = "input_Amount")]
    pub amount: Amount,
    #[serde(rename = "input_Country")]
    pub country: Country,
    #[serde(rename = "input_Currency")]
    pub currency: String,
    #[serde(rename = "input_CustomerMSISDN")]
    pub customer_msisdn: String,
    #[serde(rename = "input_ServiceProviderCode")]
    pub service_provider_code: String,
    #[serde(rename = "input_ThirdPartyConversationID")]
    pub third_party_conversation_id: String,
    #[serde(rename = "input_TransactionReference")]
    pub transaction_reference: String,
    #[serde(rename = "input_PurchasedItemsDesc")]
    pub purchased_items_desc: String,
}
