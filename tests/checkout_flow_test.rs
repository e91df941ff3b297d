mod common;

use mpesa_checkout::application::checkout::{PayWithMpesa, SubmitOutcome};
use mpesa_checkout::application::tabs::TabsShell;
use mpesa_checkout::domain::payment::CheckoutContext;
use mpesa_checkout::infrastructure::in_memory::{InMemoryIconRegistry, RecordingPaymentGateway};
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn test_dialog_and_tabs_share_icon_registry() {
    let icons = Arc::new(InMemoryIconRegistry::new());
    let config = common::app_config(icons.clone());

    let _tabs = TabsShell::new(&config);
    let _dialog = PayWithMpesa::open(
        &config,
        Arc::new(RecordingPaymentGateway::new()),
        CheckoutContext::new(Some(dec!(5000))),
    );

    // Three tab icons plus the dialog's close icon
    assert_eq!(icons.len(), 4);
    assert!(icons.url("x-lg").is_some());
}

#[tokio::test]
async fn test_dialog_is_send_across_tasks() {
    let config = common::app_config(Arc::new(InMemoryIconRegistry::new()));
    let gateway = Arc::new(RecordingPaymentGateway::new());

    let mut handles = Vec::new();
    for _ in 0..10 {
        let mut dialog = PayWithMpesa::open(
            &config,
            gateway.clone(),
            CheckoutContext::new(Some(dec!(2500))).with_description("Basic plan"),
        );
        dialog.form_mut().set_customer_msisdn("712345678");
        handles.push(tokio::spawn(async move { dialog.submit().await }));
    }

    for handle in handles {
        assert!(matches!(handle.await.unwrap(), SubmitOutcome::Dispatched(_)));
    }

    let requests = gateway.requests();
    assert_eq!(requests.len(), 10);
    let ids: HashSet<_> = requests
        .iter()
        .map(|r| r.third_party_conversation_id.clone())
        .collect();
    assert_eq!(ids.len(), 10, "conversation ids must never repeat");
    assert!(requests.iter().all(|r| r.purchased_items_desc == "Basic plan"));
}

#[tokio::test]
async fn test_rejected_submit_then_corrected() {
    let config = common::app_config(Arc::new(InMemoryIconRegistry::new()));
    let gateway = Arc::new(RecordingPaymentGateway::new());
    let mut dialog = PayWithMpesa::open(
        &config,
        gateway.clone(),
        CheckoutContext::new(Some(dec!(5000))),
    );

    dialog.form_mut().set_customer_msisdn("0712345678");
    assert!(matches!(dialog.submit().await, SubmitOutcome::Rejected(_)));
    assert!(gateway.requests().is_empty());

    dialog.form_mut().set_customer_msisdn("712345678");
    let SubmitOutcome::Dispatched(request) = dialog.submit().await else {
        panic!("corrected form should be dispatched");
    };
    assert_eq!(request.customer_msisdn, "255712345678");
    assert_eq!(request.purchased_items_desc, "Subscription");
    assert_eq!(gateway.requests().len(), 1);
}
