// src/server/pages.rs
use crate::content::ContentStore;
use crate::document::HtmlDocument;
use crate::locale::Lang;
use crate::preferences::{Environment, MemoryStorage, Preferences};
use crate::utils::error::Error;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Template location of the pre-built page for each language.
pub fn template_path(pages_dir: &Path, lang: Lang) -> PathBuf {
    match lang {
        Lang::PtBr => pages_dir.join("index.html"),
        Lang::En => pages_dir.join("en").join("index.html"),
    }
}

/// URL path the page for `lang` is published under.
pub fn page_route(lang: Lang) -> &'static str {
    match lang {
        Lang::PtBr => "/",
        Lang::En => "/en/",
    }
}

/// Sets the page language and embeds the structured metadata, the same
/// effects a visitor's preference store applies once the page has loaded.
pub fn render(template: &str, lang: Lang, content: &Arc<ContentStore>) -> String {
    let mut doc = HtmlDocument::new(template);
    let mut prefs = Preferences::new(
        Arc::clone(content),
        MemoryStorage::new(),
        &Environment::new(page_route(lang)),
    );
    prefs.set_language(lang, &mut doc);
    doc.into_html()
}

pub fn load_template(pages_dir: &Path, lang: Lang) -> Result<String, Error> {
    let path = template_path(pages_dir, lang);
    fs::read_to_string(&path).map_err(|source| Error::io(path, source))
}

/// Pages rendered once at startup. Missing templates are recorded, not fatal.
#[derive(Debug, Default)]
pub struct PageCache {
    rendered: HashMap<Lang, String>,
    errors: HashMap<Lang, String>,
}

impl PageCache {
    pub fn load(pages_dir: &Path, content: &Arc<ContentStore>) -> Self {
        let mut cache = Self::default();
        for lang in Lang::ALL {
            match load_template(pages_dir, lang) {
                Ok(template) => {
                    info!("Rendered {} page from {}", lang, pages_dir.display());
                    cache.rendered.insert(lang, render(&template, lang, content));
                }
                Err(e) => {
                    error!("Failed to load {} page: {}", lang, e);
                    cache.errors.insert(lang, e.to_string());
                }
            }
        }
        cache
    }

    pub fn get(&self, lang: Lang) -> Result<&str, &str> {
        match self.rendered.get(&lang) {
            Some(html) => Ok(html.as_str()),
            None => Err(self
                .errors
                .get(&lang)
                .map_or("page was not loaded", String::as_str)),
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = (Lang, &str)> {
        self.errors.iter().map(|(lang, message)| (*lang, message.as_str()))
    }
}
