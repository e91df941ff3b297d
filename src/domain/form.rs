use super::payment::{
    Amount, CheckoutContext, Country, DEFAULT_COUNTRY, DEFAULT_CURRENCY,
    DEFAULT_SERVICE_PROVIDER_CODE, DEFAULT_TRANSACTION_REFERENCE, PaymentRequest,
};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fmt;

/// The fields of the checkout form, named as they are on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Amount,
    Country,
    Currency,
    CustomerMsisdn,
    ServiceProviderCode,
    ThirdPartyConversationId,
    TransactionReference,
    PurchasedItemsDesc,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Amount,
        FormField::Country,
        FormField::Currency,
        FormField::CustomerMsisdn,
        FormField::ServiceProviderCode,
        FormField::ThirdPartyConversationId,
        FormField::TransactionReference,
        FormField::PurchasedItemsDesc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Amount => "input_Amount",
            FormField::Country => "input_Country",
            FormField::Currency => "input_Currency",
            FormField::CustomerMsisdn => "input_CustomerMSISDN",
            FormField::ServiceProviderCode => "input_ServiceProviderCode",
            FormField::ThirdPartyConversationId => "input_ThirdPartyConversationID",
            FormField::TransactionReference => "input_TransactionReference",
            FormField::PurchasedItemsDesc => "input_PurchasedItemsDesc",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Required,
    Pattern,
    NotPositive,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub constraint: Constraint,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.constraint {
            Constraint::Required => "is required",
            Constraint::Pattern => "does not match the expected format",
            Constraint::NotPositive => "must be positive",
            Constraint::Unsupported => "is not supported",
        };
        write!(f, "{} {}", self.field, reason)
    }
}

/// Result of checking the form's constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(ValidatedForm),
    Invalid(Vec<FieldError>),
}

/// The user-facing fields after they passed validation.
///
/// Generated fields are absent on purpose: they only come into existence
/// in [`ValidatedForm::into_request`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub amount: Amount,
    pub country: Country,
    pub currency: String,
    pub national_msisdn: String,
    pub service_provider_code: String,
    pub transaction_reference: String,
}

impl ValidatedForm {
    /// Finalizes the request: fills the generated fields and prefixes the
    /// customer number with the calling code of the selected country.
    pub fn into_request(
        self,
        third_party_conversation_id: String,
        purchased_items_desc: String,
    ) -> PaymentRequest {
        PaymentRequest {
            amount: self.amount,
            customer_msisdn: self.country.to_msisdn(&self.national_msisdn),
            country: self.country,
            currency: self.currency,
            service_provider_code: self.service_provider_code,
            third_party_conversation_id,
            transaction_reference: self.transaction_reference,
            purchased_items_desc,
        }
    }
}

/// In-memory state of the checkout form for one dialog invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    amount: Option<Decimal>,
    country: String,
    currency: String,
    customer_msisdn: String,
    service_provider_code: String,
    third_party_conversation_id: String,
    transaction_reference: String,
    purchased_items_desc: String,
    touched: BTreeSet<FormField>,
}

impl PaymentForm {
    /// Builds a fresh form seeded from the caller's context.
    pub fn build(context: &CheckoutContext) -> Self {
        Self {
            amount: context.amount,
            country: DEFAULT_COUNTRY.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            customer_msisdn: String::new(),
            service_provider_code: DEFAULT_SERVICE_PROVIDER_CODE.to_string(),
            third_party_conversation_id: String::new(),
            transaction_reference: DEFAULT_TRANSACTION_REFERENCE.to_string(),
            purchased_items_desc: String::new(),
            touched: BTreeSet::new(),
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn customer_msisdn(&self) -> &str {
        &self.customer_msisdn
    }

    pub fn service_provider_code(&self) -> &str {
        &self.service_provider_code
    }

    pub fn third_party_conversation_id(&self) -> &str {
        &self.third_party_conversation_id
    }

    pub fn transaction_reference(&self) -> &str {
        &self.transaction_reference
    }

    pub fn purchased_items_desc(&self) -> &str {
        &self.purchased_items_desc
    }

    pub fn set_amount(&mut self, amount: Option<Decimal>) {
        self.amount = amount;
    }

    pub fn set_customer_msisdn(&mut self, msisdn: impl Into<String>) {
        self.customer_msisdn = msisdn.into();
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
    }

    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    pub fn set_service_provider_code(&mut self, code: impl Into<String>) {
        self.service_provider_code = code.into();
    }

    pub fn set_transaction_reference(&mut self, reference: impl Into<String>) {
        self.transaction_reference = reference.into();
    }

    /// Stores the values generated at submission time so the form reflects
    /// what was dispatched. Not reachable from user input.
    pub(crate) fn record_generated(&mut self, conversation_id: &str, items_desc: &str) {
        self.third_party_conversation_id = conversation_id.to_string();
        self.purchased_items_desc = items_desc.to_string();
    }

    pub fn touch(&mut self, field: FormField) {
        self.touched.insert(field);
    }

    pub fn mark_all_as_touched(&mut self) {
        self.touched.extend(FormField::ALL);
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// Checks every constraint and reports all failures at once.
    pub fn validate(&self) -> Validation {
        let mut errors = Vec::new();
        let mut fail = |field, constraint| errors.push(FieldError { field, constraint });

        let amount = match self.amount {
            None => {
                fail(FormField::Amount, Constraint::Required);
                None
            }
            Some(value) => match Amount::new(value) {
                Ok(amount) => Some(amount),
                Err(_) => {
                    fail(FormField::Amount, Constraint::NotPositive);
                    None
                }
            },
        };

        let country = if self.country.is_empty() {
            fail(FormField::Country, Constraint::Required);
            None
        } else {
            match self.country.parse::<Country>() {
                Ok(country) => Some(country),
                Err(_) => {
                    fail(FormField::Country, Constraint::Unsupported);
                    None
                }
            }
        };

        if self.currency.is_empty() {
            fail(FormField::Currency, Constraint::Required);
        }

        if self.customer_msisdn.is_empty() {
            fail(FormField::CustomerMsisdn, Constraint::Required);
        } else if let Some(country) = country
            && !country.is_valid_national_number(&self.customer_msisdn)
        {
            fail(FormField::CustomerMsisdn, Constraint::Pattern);
        }

        if self.service_provider_code.is_empty() {
            fail(FormField::ServiceProviderCode, Constraint::Required);
        }

        if self.transaction_reference.is_empty() {
            fail(FormField::TransactionReference, Constraint::Required);
        }

        match (amount, country) {
            (Some(amount), Some(country)) if errors.is_empty() => {
                Validation::Valid(ValidatedForm {
                    amount,
                    country,
                    currency: self.currency.clone(),
                    national_msisdn: self.customer_msisdn.clone(),
                    service_provider_code: self.service_provider_code.clone(),
                    transaction_reference: self.transaction_reference.clone(),
                })
            }
            _ => Validation::Invalid(errors),
        }
    }
}
