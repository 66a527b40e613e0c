// src/preferences.rs
use crate::content::{ContentStore, LocaleBundle};
use crate::document::Document;
use crate::locale::{detect_language, Lang};
use crate::schema_org::{self, SCHEMA_ELEMENT_ID};
use crate::utils::locale::system_locale;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

pub const LANG_KEY: &str = "lang";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("corrupt storage file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Key/value persistence for user preferences, the equivalent of the
/// browser's local storage.
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    available: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
        }
    }

    /// A storage whose every access fails, like local storage in a locked-down
    /// browser.
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            available: false,
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable("access denied".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable("access denied".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_values(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_values()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut values = self.read_values().unwrap_or_else(|e| {
            error!("Discarding unreadable preferences: {}", e);
            HashMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&values).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content)?;
        debug!("Saved preference '{}' to {:?}", key, self.path);
        Ok(())
    }
}

/// What the browser reports about the visitor.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub path: String,
    pub browser_language: Option<String>,
    pub prefers_dark: bool,
}

impl Environment {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            browser_language: None,
            prefers_dark: false,
        }
    }

    pub fn browser_language(mut self, language: impl Into<String>) -> Self {
        self.browser_language = Some(language.into());
        self
    }

    pub fn prefers_dark(mut self, prefers_dark: bool) -> Self {
        self.prefers_dark = prefers_dark;
        self
    }

    /// Uses the host locale in place of a browser language.
    pub fn from_system() -> Self {
        Self::new("/").browser_language(system_locale())
    }
}

/// Language and theme state for one page view, plus the content it selects.
///
/// Every mutation goes through a method that persists the change and applies
/// its effect on the supplied [`Document`].
pub struct Preferences<S: PreferenceStorage> {
    content: Arc<ContentStore>,
    storage: S,
    lang: Lang,
    dark_mode: bool,
}

fn read_silently<S: PreferenceStorage>(storage: &S, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            debug!("Preference '{}' unreadable, using computed default: {}", key, e);
            None
        }
    }
}

impl<S: PreferenceStorage> Preferences<S> {
    pub fn new(content: Arc<ContentStore>, storage: S, env: &Environment) -> Self {
        let stored_lang = read_silently(&storage, LANG_KEY);
        let lang = detect_language(
            stored_lang.as_deref(),
            &env.path,
            env.browser_language.as_deref(),
        );
        let dark_mode = match read_silently(&storage, DARK_MODE_KEY) {
            Some(value) if !value.is_empty() => value == "true",
            _ => env.prefers_dark,
        };
        debug!("Preferences resolved: lang={} dark_mode={}", lang, dark_mode);
        Self {
            content,
            storage,
            lang,
            dark_mode,
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The active locale bundle, if it loaded.
    pub fn t(&self) -> Option<&LocaleBundle> {
        self.content.bundle(self.lang)
    }

    /// Applies the initial state to a freshly loaded document.
    pub fn mount(&self, doc: &mut dyn Document) {
        self.apply_theme(doc);
        self.apply_language(doc);
    }

    pub fn set_language(&mut self, lang: Lang, doc: &mut dyn Document) {
        self.lang = lang;
        self.persist(LANG_KEY, lang.tag());
        debug!("Language set to {}", lang);
        self.apply_language(doc);
    }

    pub fn toggle_theme(&mut self, doc: &mut dyn Document) {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { "true" } else { "false" };
        self.persist(DARK_MODE_KEY, value);
        self.apply_theme(doc);
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            debug!("Preference '{}' not persisted: {}", key, e);
        }
    }

    fn apply_theme(&self, doc: &mut dyn Document) {
        doc.set_class(DARK_CLASS, self.dark_mode);
    }

    fn apply_language(&self, doc: &mut dyn Document) {
        doc.set_lang(self.lang.tag());
        let Some(bundle) = self.t() else {
            debug!("No {} content loaded; structured metadata left untouched", self.lang);
            return;
        };
        match schema_org::to_json_string(bundle) {
            Ok(json) => doc.set_element_text(SCHEMA_ELEMENT_ID, &json),
            Err(e) => error!("Failed to serialize structured metadata for {}: {}", self.lang, e),
        }
    }
}
