use super::payment::PaymentRequest;
use crate::error::Result;
use async_trait::async_trait;

/// Looks up localized strings by message key.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn get(&self, key: &str) -> Result<String>;
    async fn use_language(&self, lang: &str) -> Result<()>;
}

/// Entry point of the payment-initiation collaborator.
///
/// Fire-and-forget: the collaborator owns network I/O, retries and any
/// feedback shown to the user.
pub trait PaymentGateway: Send + Sync {
    fn make_c2b_payment(&self, request: PaymentRequest);
}

pub trait IconRegistrar: Send + Sync {
    fn register_svg_icon(&self, name: &str, url: &str);
}

/// A title and message pair shown in a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    pub title: String,
    pub message: String,
}

#[async_trait]
pub trait DialogOpener: Send + Sync {
    fn open_message_box(&self, message: MessageBox);
    /// Resolves once the user answers; `true` means confirmed.
    async fn open_confirm_box(&self, message: MessageBox) -> bool;
}

/// Plain string key-value storage for the session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

pub trait LinkOpener: Send + Sync {
    /// Opens `link` in a new browsing context without opener or referrer.
    fn open(&self, link: &str);
}

#[async_trait]
pub trait AppLauncher: Send + Sync {
    async fn can_open_url(&self, url: &str) -> Result<bool>;
    async fn open_url(&self, url: &str) -> Result<()>;
}

pub type TranslatorBox = std::sync::Arc<dyn Translator>;
pub type PaymentGatewayBox = std::sync::Arc<dyn PaymentGateway>;
pub type SessionStoreBox = Box<dyn SessionStore>;
