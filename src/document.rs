// src/document.rs
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;
use tracing::debug;

/// The handful of page mutations the preference store performs.
pub trait Document {
    fn set_lang(&mut self, tag: &str);
    fn set_class(&mut self, name: &str, enabled: bool);
    fn set_element_text(&mut self, id: &str, text: &str);
}

/// Records mutations; stands in for a live page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryDocument {
    pub lang: String,
    pub classes: BTreeSet<String>,
    pub elements: HashMap<String, String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub fn element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(String::as_str)
    }
}

impl Document for MemoryDocument {
    fn set_lang(&mut self, tag: &str) {
        self.lang = tag.to_string();
    }

    fn set_class(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.classes.insert(name.to_string());
        } else {
            self.classes.remove(name);
        }
    }

    fn set_element_text(&mut self, id: &str, text: &str) {
        self.elements.insert(id.to_string(), text.to_string());
    }
}

/// Applies the same mutations to a pre-built HTML page by editing its source.
/// Only the root `<html>` tag and elements addressed by `id` are touched.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    html: String,
}

impl HtmlDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    fn root_tag(&self) -> Option<Range<usize>> {
        // ASCII lowercasing keeps byte offsets, so ranges found in `lowered`
        // index `self.html` directly.
        let lowered = self.html.to_ascii_lowercase();
        let mut from = 0;
        while let Some(pos) = lowered[from..].find("<html") {
            let start = from + pos;
            let after = start + "<html".len();
            match self.html[after..].chars().next() {
                Some(c) if c.is_whitespace() || c == '>' => {
                    let end = self.html[after..].find('>')? + after + 1;
                    return Some(start..end);
                }
                _ => from = after,
            }
        }
        None
    }

    /// Rewrites (or inserts) `name="value"` on the tag spanning `tag`. The
    /// value must already be escaped.
    fn set_attr(&mut self, tag: Range<usize>, name: &str, value: &str) {
        let tag_src = &self.html[tag.clone()];
        match attr_value_range(tag_src, name) {
            Some(range) => {
                let absolute = tag.start + range.start..tag.start + range.end;
                self.html.replace_range(absolute, value);
            }
            None => {
                let insert_at = tag.start + tag_name_end(tag_src);
                self.html
                    .insert_str(insert_at, &format!(" {}=\"{}\"", name, value));
            }
        }
    }
}

impl Document for HtmlDocument {
    fn set_lang(&mut self, tag: &str) {
        match self.root_tag() {
            Some(root) => self.set_attr(root, "lang", &escape_attr(tag)),
            None => debug!("No <html> tag found; lang attribute not set"),
        }
    }

    fn set_class(&mut self, name: &str, enabled: bool) {
        let Some(root) = self.root_tag() else {
            debug!("No <html> tag found; class '{}' not changed", name);
            return;
        };
        let existing = attr_value_range(&self.html[root.clone()], "class");
        if existing.is_none() && !enabled {
            return;
        }
        let current = existing
            .map(|range| self.html[root.start + range.start..root.start + range.end].to_string())
            .unwrap_or_default();
        let mut classes: Vec<&str> = current.split_whitespace().filter(|c| *c != name).collect();
        if enabled {
            classes.push(name);
        }
        let joined = classes.join(" ");
        self.set_attr(root, "class", &escape_attr(&joined));
    }

    fn set_element_text(&mut self, id: &str, text: &str) {
        let Some((content, tag_name)) = element_content_range(&self.html, id) else {
            debug!("Element '#{}' not found; text not written", id);
            return;
        };
        let escaped = if tag_name.eq_ignore_ascii_case("script") {
            text.replace("</", "<\\/")
        } else {
            escape_text(text)
        };
        self.html.replace_range(content, &escaped);
    }
}

fn tag_name_end(tag_src: &str) -> usize {
    tag_src
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_whitespace() || *c == '>' || *c == '/')
        .map_or(tag_src.len(), |(i, _)| i)
}

/// Byte range of a quoted attribute value inside a single opening tag.
fn attr_value_range(tag_src: &str, name: &str) -> Option<Range<usize>> {
    let needle = format!("{}=", name);
    let mut from = 0;
    while let Some(pos) = tag_src[from..].find(&needle) {
        let start = from + pos;
        let value_start = start + needle.len();
        let preceded_by_space = tag_src[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if preceded_by_space {
            let quote = tag_src[value_start..].chars().next()?;
            if quote == '"' || quote == '\'' {
                let inner = value_start + 1;
                let end = tag_src[inner..].find(quote)? + inner;
                return Some(inner..end);
            }
        }
        from = value_start;
    }
    None
}

/// Locates the element carrying `id="<id>"` and returns the range between
/// its opening and closing tags, plus the tag name.
fn element_content_range<'a>(html: &'a str, id: &str) -> Option<(Range<usize>, &'a str)> {
    let needle = format!("id=\"{}\"", id);
    let mut from = 0;
    let id_pos = loop {
        let pos = from + html[from..].find(&needle)?;
        let preceded_by_space = html[..pos]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if preceded_by_space {
            break pos;
        }
        from = pos + needle.len();
    };
    let open_start = html[..id_pos].rfind('<')?;
    let open_end = html[id_pos..].find('>')? + id_pos + 1;
    let open_tag = &html[open_start..open_end];
    let tag_name = &open_tag[1..tag_name_end(open_tag)];
    let closing = format!("</{}", tag_name);
    let close_start = html[open_end..].find(&closing)? + open_end;
    Some((open_end..close_start, tag_name))
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
