use crate::domain::payment::PaymentRequest;
use crate::domain::ports::{
    AppLauncher, DialogOpener, IconRegistrar, LinkOpener, MessageBox, PaymentGateway, SessionStore,
};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::RwLock;

// A panic while holding one of these locks cannot leave the data half
// written, so a poisoned lock is still safe to read.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A thread-safe in-memory session store.
///
/// Uses `Arc<RwLock<HashMap<String, String>>>` to allow shared concurrent access.
/// Stands in for browser local storage when nothing needs to survive a restart.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().await;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps registered icons by name.
#[derive(Default)]
pub struct InMemoryIconRegistry {
    icons: Mutex<BTreeMap<String, String>>,
}

impl InMemoryIconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self, name: &str) -> Option<String> {
        lock(&self.icons).get(name).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.icons).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IconRegistrar for InMemoryIconRegistry {
    fn register_svg_icon(&self, name: &str, url: &str) {
        lock(&self.icons).insert(name.to_string(), url.to_string());
    }
}

/// Records every dialog opened and answers confirmations with a fixed value.
pub struct RecordingDialogOpener {
    opened: Mutex<Vec<MessageBox>>,
    confirm_answer: bool,
}

impl RecordingDialogOpener {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            confirm_answer,
        }
    }

    pub fn opened(&self) -> Vec<MessageBox> {
        lock(&self.opened).clone()
    }
}

#[async_trait]
impl DialogOpener for RecordingDialogOpener {
    fn open_message_box(&self, message: MessageBox) {
        lock(&self.opened).push(message);
    }

    async fn open_confirm_box(&self, message: MessageBox) -> bool {
        lock(&self.opened).push(message);
        self.confirm_answer
    }
}

/// Collects dispatched payment requests instead of sending them anywhere.
#[derive(Default)]
pub struct RecordingPaymentGateway {
    requests: Mutex<Vec<PaymentRequest>>,
}

impl RecordingPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<PaymentRequest> {
        lock(&self.requests).clone()
    }
}

impl PaymentGateway for RecordingPaymentGateway {
    fn make_c2b_payment(&self, request: PaymentRequest) {
        lock(&self.requests).push(request);
    }
}

#[derive(Default)]
pub struct RecordingLinkOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingLinkOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }
}

impl LinkOpener for RecordingLinkOpener {
    fn open(&self, link: &str) {
        lock(&self.opened).push(link.to_string());
    }
}

/// An app launcher that knows a fixed set of installed apps.
pub struct InMemoryAppLauncher {
    installed: HashSet<String>,
    opened: Mutex<Vec<String>>,
}

impl InMemoryAppLauncher {
    pub fn new<I, S>(installed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: installed.into_iter().map(Into::into).collect(),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }
}

#[async_trait]
impl AppLauncher for InMemoryAppLauncher {
    async fn can_open_url(&self, url: &str) -> Result<bool> {
        Ok(self.installed.contains(url))
    }

    async fn open_url(&self, url: &str) -> Result<()> {
        lock(&self.opened).push(url.to_string());
        Ok(())
    }
}
