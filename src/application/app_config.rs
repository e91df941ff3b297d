use crate::domain::ports::{
    AppLauncher, DialogOpener, IconRegistrar, LinkOpener, MessageBox, SessionStoreBox, Translator,
    TranslatorBox,
};
use crate::domain::session::{
    EXPIRE_TIME_KEY, EXPIRE_TIMESTAMP_KEY, SessionTokens, TOKEN_KEY, TokenResponse,
};
use crate::error::{CheckoutError, Result};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

pub const ICON_PATH: &str = "/assets/bootstrap-icons";
pub const DEFAULT_LANGUAGE: &str = "en";

const FAILED_TITLE_KEY: &str = "defaults.failed";
const ERROR_OCCURRED_KEY: &str = "loginPage.loginForm.messageBox.errors.errorOccuredText";

/// Resolves `key`, falling back to the key itself when the lookup fails.
pub async fn translate_or_key(translator: &dyn Translator, key: &str) -> String {
    match translator.get(key).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(key, error = %e, "translation lookup failed, using key");
            key.to_string()
        }
    }
}

/// Shared application services: icons, localized dialogs, session tokens
/// and handing off to other apps.
///
/// Every platform service is passed in explicitly; nothing is looked up
/// from a global registry.
pub struct AppConfigService {
    icons: Arc<dyn IconRegistrar>,
    dialogs: Arc<dyn DialogOpener>,
    translator: TranslatorBox,
    sessions: SessionStoreBox,
    links: Arc<dyn LinkOpener>,
    launcher: Arc<dyn AppLauncher>,
}

impl AppConfigService {
    pub fn new(
        icons: Arc<dyn IconRegistrar>,
        dialogs: Arc<dyn DialogOpener>,
        translator: TranslatorBox,
        sessions: SessionStoreBox,
        links: Arc<dyn LinkOpener>,
        launcher: Arc<dyn AppLauncher>,
    ) -> Self {
        Self {
            icons,
            dialogs,
            translator,
            sessions,
            links,
            launcher,
        }
    }

    pub fn translator(&self) -> TranslatorBox {
        Arc::clone(&self.translator)
    }

    /// Registers each icon as `{path}/{icon}.svg`.
    pub fn add_icons(&self, icons: &[&str], path: &str) {
        for icon in icons {
            let url = format!("{}/{}.svg", path, icon);
            tracing::debug!(icon, %url, "registering icon");
            self.icons.register_svg_icon(icon, &url);
        }
    }

    async fn translate_pair(&self, title: &str, message: &str) -> MessageBox {
        let (title, message) = tokio::join!(
            translate_or_key(self.translator.as_ref(), title),
            translate_or_key(self.translator.as_ref(), message),
        );
        MessageBox { title, message }
    }

    pub async fn open_alert_message_box(&self, title: &str, message: &str) {
        let message_box = self.translate_pair(title, message).await;
        self.dialogs.open_message_box(message_box);
    }

    /// Opens a localized confirmation dialog and returns whether the user
    /// confirmed.
    pub async fn open_confirm_message_box(&self, title: &str, message: &str) -> bool {
        let message_box = self.translate_pair(title, message).await;
        self.dialogs.open_confirm_box(message_box).await
    }

    pub async fn display_error_occurred_text(&self) {
        self.open_alert_message_box(FAILED_TITLE_KEY, ERROR_OCCURRED_KEY)
            .await;
    }

    pub async fn get_session_tokens(&self) -> Result<SessionTokens> {
        Ok(SessionTokens {
            token: self.sessions.get_item(TOKEN_KEY).await?,
            expire_time: self.sessions.get_item(EXPIRE_TIME_KEY).await?,
            expire_timestamp: self.sessions.get_item(EXPIRE_TIMESTAMP_KEY).await?,
        })
    }

    /// Persists a login response, stamping it with the current UTC time.
    pub async fn set_session_tokens(&self, response: &TokenResponse) -> Result<()> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.sessions.set_item(TOKEN_KEY, &response.token).await?;
        self.sessions
            .set_item(EXPIRE_TIME_KEY, &response.expire_time)
            .await?;
        self.sessions.set_item(EXPIRE_TIMESTAMP_KEY, &now).await?;
        Ok(())
    }

    pub fn open_external_link(&self, link: &str) {
        self.links.open(link);
    }

    pub async fn launch_app(&self, package_name: &str) -> Result<()> {
        if self.launcher.can_open_url(package_name).await? {
            self.launcher.open_url(package_name).await
        } else {
            Err(CheckoutError::LaunchFailed(format!(
                "Failed to launch application {}.",
                package_name
            )))
        }
    }

    pub async fn init_translations(&self) -> Result<()> {
        self.translator.use_language(DEFAULT_LANGUAGE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::catalog::JsonCatalogTranslator;
    use crate::infrastructure::in_memory::{
        InMemoryAppLauncher, InMemoryIconRegistry, InMemorySessionStore, RecordingDialogOpener,
        RecordingLinkOpener,
    };
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn get(&self, key: &str) -> Result<String> {
            Err(CheckoutError::Translation(format!("lookup of {} failed", key)))
        }

        async fn use_language(&self, _lang: &str) -> Result<()> {
            Ok(())
        }
    }

    struct Fixture {
        icons: Arc<InMemoryIconRegistry>,
        dialogs: Arc<RecordingDialogOpener>,
        links: Arc<RecordingLinkOpener>,
        launcher: Arc<InMemoryAppLauncher>,
        service: AppConfigService,
    }

    fn fixture(translator: TranslatorBox) -> Fixture {
        let icons = Arc::new(InMemoryIconRegistry::new());
        let dialogs = Arc::new(RecordingDialogOpener::new(true));
        let links = Arc::new(RecordingLinkOpener::new());
        let launcher = Arc::new(InMemoryAppLauncher::new(["com.example.wallet"]));
        let service = AppConfigService::new(
            icons.clone(),
            dialogs.clone(),
            translator,
            Box::new(InMemorySessionStore::new()),
            links.clone(),
            launcher.clone(),
        );
        Fixture {
            icons,
            dialogs,
            links,
            launcher,
            service,
        }
    }

    fn english() -> TranslatorBox {
        Arc::new(JsonCatalogTranslator::from_value(
            "en",
            json!({
                "defaults": { "failed": "Failed" },
                "loginPage": { "loginForm": { "messageBox": { "errors": {
                    "errorOccuredText": "An error occurred"
                }}}},
                "confirm": { "title": "Are you sure?", "body": "This cannot be undone" }
            }),
        ))
    }

    #[test]
    fn test_add_icons_builds_svg_urls() {
        let f = fixture(english());
        f.service.add_icons(&["house-door-fill", "x-lg"], ICON_PATH);

        assert_eq!(
            f.icons.url("house-door-fill").as_deref(),
            Some("/assets/bootstrap-icons/house-door-fill.svg")
        );
        assert_eq!(
            f.icons.url("x-lg").as_deref(),
            Some("/assets/bootstrap-icons/x-lg.svg")
        );
        assert_eq!(f.icons.len(), 2);
    }

    #[tokio::test]
    async fn test_error_occurred_alert_is_translated() {
        let f = fixture(english());
        f.service.display_error_occurred_text().await;

        assert_eq!(
            f.dialogs.opened(),
            vec![MessageBox {
                title: "Failed".to_string(),
                message: "An error occurred".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_alert_falls_back_to_keys() {
        let f = fixture(Arc::new(FailingTranslator));
        f.service.open_alert_message_box("a.title", "a.body").await;

        let opened = f.dialogs.opened();
        assert_eq!(opened[0].title, "a.title");
        assert_eq!(opened[0].message, "a.body");
    }

    #[tokio::test]
    async fn test_confirm_returns_user_answer() {
        let f = fixture(english());
        assert!(
            f.service
                .open_confirm_message_box("confirm.title", "confirm.body")
                .await
        );
        assert_eq!(f.dialogs.opened()[0].title, "Are you sure?");
    }

    #[tokio::test]
    async fn test_session_tokens_round_trip() {
        let f = fixture(english());
        assert_eq!(
            f.service.get_session_tokens().await.unwrap(),
            SessionTokens::default()
        );

        f.service
            .set_session_tokens(&TokenResponse {
                token: "abc".to_string(),
                expire_time: "3600".to_string(),
            })
            .await
            .unwrap();

        let tokens = f.service.get_session_tokens().await.unwrap();
        assert_eq!(tokens.token.as_deref(), Some("abc"));
        assert_eq!(tokens.expire_time.as_deref(), Some("3600"));
        let stamp = tokens.expire_timestamp.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[tokio::test]
    async fn test_launch_app() {
        let f = fixture(english());
        f.service.launch_app("com.example.wallet").await.unwrap();
        assert_eq!(f.launcher.opened(), vec!["com.example.wallet".to_string()]);

        let err = f.service.launch_app("com.example.missing").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to launch application com.example.missing."
        );
    }

    #[tokio::test]
    async fn test_init_translations_switches_to_english() {
        let translator = Arc::new(
            JsonCatalogTranslator::from_value("sw", json!({ "defaults": { "failed": "Imeshindwa" } }))
                .with_language("en", json!({ "defaults": { "failed": "Failed" } })),
        );
        let f = fixture(translator.clone());

        f.service.init_translations().await.unwrap();
        assert_eq!(translator.current_language().await, "en");
        assert_eq!(translator.get("defaults.failed").await.unwrap(), "Failed");
    }

    #[test]
    fn test_open_external_link() {
        let f = fixture(english());
        f.service.open_external_link("https://example.com/terms");
        assert_eq!(f.links.opened(), vec!["https://example.com/terms".to_string()]);
    }
}
