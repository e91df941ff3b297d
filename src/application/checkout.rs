use super::app_config::{AppConfigService, ICON_PATH, translate_or_key};
use crate::domain::form::{FieldError, PaymentForm, Validation};
use crate::domain::payment::{CheckoutContext, PaymentRequest};
use crate::domain::ports::{PaymentGatewayBox, TranslatorBox};
use uuid::Uuid;

pub const SUBSCRIPTION_LABEL_KEY: &str = "subscriptionPage.labels.subscription";
pub const CLOSE_ICON: &str = "x-lg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The request was handed to the payment gateway.
    Dispatched(PaymentRequest),
    /// Validation failed; every field is now touched and nothing was sent.
    Rejected(Vec<FieldError>),
}

/// The "pay with M-Pesa" dialog: owns the form for one invocation and
/// turns it into a C2B payment request on submit.
pub struct PayWithMpesa {
    context: CheckoutContext,
    form: PaymentForm,
    state: DialogState,
    translator: TranslatorBox,
    gateway: PaymentGatewayBox,
}

impl PayWithMpesa {
    /// Opens the dialog for `context`, registering its close icon.
    pub fn open(
        config: &AppConfigService,
        gateway: PaymentGatewayBox,
        context: CheckoutContext,
    ) -> Self {
        config.add_icons(&[CLOSE_ICON], ICON_PATH);
        let form = PaymentForm::build(&context);
        Self {
            context,
            form,
            state: DialogState::Editing,
            translator: config.translator(),
            gateway,
        }
    }

    pub fn context(&self) -> &CheckoutContext {
        &self.context
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PaymentForm {
        &mut self.form
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Validates the form and, when valid, dispatches the finalized request.
    ///
    /// The gateway's outcome is not awaited or inspected.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let validated = match self.form.validate() {
            Validation::Valid(validated) => validated,
            Validation::Invalid(errors) => {
                tracing::debug!(errors = errors.len(), "checkout form invalid");
                self.form.mark_all_as_touched();
                return SubmitOutcome::Rejected(errors);
            }
        };

        if self.state == DialogState::Submitting {
            tracing::warn!("checkout submitted again while a submission was already made");
        }
        self.state = DialogState::Submitting;

        let items_desc = match self
            .context
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
        {
            Some(description) => description.to_string(),
            None => translate_or_key(self.translator.as_ref(), SUBSCRIPTION_LABEL_KEY).await,
        };
        let conversation_id = Uuid::new_v4().simple().to_string();

        self.form.record_generated(&conversation_id, &items_desc);
        let request = validated.into_request(conversation_id, items_desc);

        tracing::info!(
            conversation_id = %request.third_party_conversation_id,
            amount = %request.amount.value(),
            "dispatching C2B payment"
        );
        self.gateway.make_c2b_payment(request.clone());
        SubmitOutcome::Dispatched(request)
    }
}
