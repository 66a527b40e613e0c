// src/locale.rs
use serde::{Deserialize, Serialize};
use std::fmt;

const TAG_PT_BR: &str = "pt-BR";
const TAG_EN: &str = "en";

/// The two languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lang {
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::PtBr, Lang::En];
    pub const DEFAULT: Lang = Lang::En;

    pub fn tag(self) -> &'static str {
        match self {
            Lang::PtBr => TAG_PT_BR,
            Lang::En => TAG_EN,
        }
    }

    /// Maps whatever the browser reports (`pt`, `pt-PT`, `fr-CA`, ...) onto a
    /// published language.
    pub fn from_browser_language(language: &str) -> Lang {
        if language.trim().to_ascii_lowercase().starts_with("pt") {
            Lang::PtBr
        } else {
            Lang::En
        }
    }

    /// Exact, case-sensitive match of one of the two published tags.
    pub fn from_tag(value: &str) -> Option<Lang> {
        match value {
            TAG_PT_BR => Some(Lang::PtBr),
            TAG_EN => Some(Lang::En),
            _ => None,
        }
    }

    /// Only English has a path prefix; `/` is the Portuguese page. This is a
    /// plain string prefix, so `/english` counts too.
    pub fn from_path(path: &str) -> Option<Lang> {
        if path.starts_with("/en") {
            Some(Lang::En)
        } else {
            None
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Resolves the initial language: persisted tag, then URL path prefix, then
/// browser language, then [`Lang::DEFAULT`]. Persisted values other than the
/// exact tags are ignored.
pub fn detect_language(stored: Option<&str>, path: &str, browser_language: Option<&str>) -> Lang {
    if let Some(lang) = stored.and_then(Lang::from_tag) {
        return lang;
    }
    if let Some(lang) = Lang::from_path(path) {
        return lang;
    }
    match browser_language {
        Some(language) => Lang::from_browser_language(language),
        None => Lang::DEFAULT,
    }
}
