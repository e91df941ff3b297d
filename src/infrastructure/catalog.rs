use crate::domain::ports::Translator;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tokio::sync::RwLock;

/// Translator backed by nested JSON catalogs, one per language.
///
/// Keys are dotted paths into the catalog (`subscriptionPage.labels.subscription`).
/// A key that does not resolve to a string translates to itself, so
/// untranslated labels stay readable.
pub struct JsonCatalogTranslator {
    catalogs: HashMap<String, Value>,
    current: RwLock<String>,
}

impl JsonCatalogTranslator {
    /// Creates a translator with a single catalog, which becomes current.
    pub fn from_value(lang: impl Into<String>, catalog: Value) -> Self {
        let lang = lang.into();
        let mut catalogs = HashMap::new();
        catalogs.insert(lang.clone(), catalog);
        Self {
            catalogs,
            current: RwLock::new(lang),
        }
    }

    /// Loads the catalog for `lang` from a JSON file.
    pub fn from_path<P: AsRef<Path>>(lang: impl Into<String>, path: P) -> Result<Self> {
        let file = File::open(path)?;
        let catalog: Value = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::from_value(lang, catalog))
    }

    pub fn with_language(mut self, lang: impl Into<String>, catalog: Value) -> Self {
        self.catalogs.insert(lang.into(), catalog);
        self
    }

    pub async fn current_language(&self) -> String {
        self.current.read().await.clone()
    }

    fn lookup<'a>(catalog: &'a Value, key: &str) -> Option<&'a str> {
        key.split('.')
            .try_fold(catalog, |node, segment| node.get(segment))
            .and_then(Value::as_str)
    }
}

#[async_trait]
impl Translator for JsonCatalogTranslator {
    async fn get(&self, key: &str) -> Result<String> {
        let lang = self.current.read().await;
        let catalog = self.catalogs.get(lang.as_str()).ok_or_else(|| {
            CheckoutError::Translation(format!(
                "No catalog loaded for language '{}'",
                lang.as_str()
            ))
        })?;
        Ok(Self::lookup(catalog, key).unwrap_or(key).to_string())
    }

    async fn use_language(&self, lang: &str) -> Result<()> {
        if !self.catalogs.contains_key(lang) {
            return Err(CheckoutError::Translation(format!(
                "No catalog loaded for language '{}'",
                lang
            )));
        }
        *self.current.write().await = lang.to_string();
        tracing::debug!(lang, "switched translation language");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn catalog() -> JsonCatalogTranslator {
        JsonCatalogTranslator::from_value(
            "sw",
            json!({ "subscriptionPage": { "labels": { "subscription": "Usajili" } } }),
        )
        .with_language(
            "en",
            json!({ "subscriptionPage": { "labels": { "subscription": "Subscription" } } }),
        )
    }

    #[tokio::test]
    async fn test_dotted_lookup() {
        let tr = catalog();
        assert_eq!(
            tr.get("subscriptionPage.labels.subscription").await.unwrap(),
            "Usajili"
        );
    }

    #[tokio::test]
    async fn test_missing_key_translates_to_itself() {
        let tr = catalog();
        assert_eq!(tr.get("nope.missing").await.unwrap(), "nope.missing");
        // A key pointing at an object rather than a string is also unresolved
        assert_eq!(tr.get("subscriptionPage.labels").await.unwrap(), "subscriptionPage.labels");
    }

    #[tokio::test]
    async fn test_use_language() {
        let tr = catalog();
        tr.use_language("en").await.unwrap();
        assert_eq!(tr.current_language().await, "en");
        assert_eq!(
            tr.get("subscriptionPage.labels.subscription").await.unwrap(),
            "Subscription"
        );

        assert!(tr.use_language("fr").await.is_err());
        assert_eq!(tr.current_language().await, "en");
    }

    #[tokio::test]
    async fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"defaults": {{"failed": "Failed"}}}}"#).unwrap();

        let tr = JsonCatalogTranslator::from_path("en", file.path()).unwrap();
        assert_eq!(tr.get("defaults.failed").await.unwrap(), "Failed");
    }

    #[test]
    fn test_from_path_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            JsonCatalogTranslator::from_path("en", file.path()),
            Err(CheckoutError::Json(_))
        ));
    }
}
