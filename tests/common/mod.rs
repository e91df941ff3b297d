use mpesa_checkout::application::app_config::AppConfigService;
use mpesa_checkout::domain::ports::TranslatorBox;
use mpesa_checkout::infrastructure::catalog::JsonCatalogTranslator;
use mpesa_checkout::infrastructure::in_memory::{
    InMemoryAppLauncher, InMemoryIconRegistry, InMemorySessionStore, RecordingDialogOpener,
    RecordingLinkOpener,
};
use std::sync::Arc;

pub fn english() -> TranslatorBox {
    Arc::new(JsonCatalogTranslator::from_value(
        "en",
        serde_json::json!({
            "subscriptionPage": { "labels": { "subscription": "Subscription" } }
        }),
    ))
}

pub fn app_config(icons: Arc<InMemoryIconRegistry>) -> AppConfigService {
    AppConfigService::new(
        icons,
        Arc::new(RecordingDialogOpener::new(true)),
        english(),
        Box::new(InMemorySessionStore::new()),
        Arc::new(RecordingLinkOpener::new()),
        Arc::new(InMemoryAppLauncher::new(Vec::<String>::new())),
    )
}
