// src/content.rs
use crate::locale::Lang;
use crate::utils::error::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Lenient readers for YAML scalars. Content authors write `period: 2019` or
/// leave `summary:` blank; both load instead of failing the whole locale.
mod scalar {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        UInt(u64),
        Float(f64),
        Text(String),
    }

    impl From<Scalar> for String {
        fn from(scalar: Scalar) -> Self {
            match scalar {
                Scalar::Bool(b) => b.to_string(),
                Scalar::Int(n) => n.to_string(),
                Scalar::UInt(n) => n.to_string(),
                Scalar::Float(n) => n.to_string(),
                Scalar::Text(s) => s,
            }
        }
    }

    /// Any scalar as text; null reads as an empty string.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<Scalar>::deserialize(deserializer)?
            .map(String::from)
            .unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
    }

    /// A list of scalars; null reads as an empty list.
    pub fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(Option::<Vec<Scalar>>::deserialize(deserializer)?
            .unwrap_or_default()
            .into_iter()
            .map(String::from)
            .collect())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Profile {
    #[serde(deserialize_with = "scalar::text")]
    pub name: String,
    #[serde(deserialize_with = "scalar::text")]
    pub title: String,
    #[serde(default, deserialize_with = "scalar::optional_text", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub contact: Contact,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Contact {
    #[serde(deserialize_with = "scalar::text")]
    pub email: String,
    #[serde(default, deserialize_with = "scalar::optional_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "scalar::text")]
    pub linkedin: String,
    #[serde(deserialize_with = "scalar::text")]
    pub github: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Skills {
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SkillCategory {
    #[serde(deserialize_with = "scalar::text")]
    pub name: String,
    #[serde(default, deserialize_with = "scalar::text_list")]
    pub items: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Experience {
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Position {
    #[serde(deserialize_with = "scalar::text")]
    pub company: String,
    #[serde(deserialize_with = "scalar::text")]
    pub role: String,
    #[serde(default, deserialize_with = "scalar::optional_text", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "scalar::text_list")]
    pub highlights: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Education {
    #[serde(default)]
    pub degrees: Vec<Degree>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Degree {
    #[serde(deserialize_with = "scalar::text")]
    pub course: String,
    #[serde(default, deserialize_with = "scalar::optional_text", skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_text", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-form interface strings (button labels, headings, ...).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Ui {
    #[serde(flatten)]
    pub strings: Map<String, Value>,
}

impl Ui {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).and_then(Value::as_str)
    }
}

/// Everything the site shows for one language.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocaleBundle {
    pub profile: Profile,
    pub skills: Skills,
    pub experience: Experience,
    pub education: Education,
    pub ui: Ui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Profile,
    Skills,
    Experience,
    Education,
    Ui,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Profile,
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Ui,
    ];

    /// File stem and URL segment.
    pub fn name(self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Ui => "ui",
        }
    }

    pub fn from_name(name: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.name() == name)
    }

    fn file_path(self, locale_dir: &Path) -> PathBuf {
        locale_dir.join(format!("{}.yaml", self.name()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of one section, serialized exactly as the section itself.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum SectionRef<'a> {
    Profile(&'a Profile),
    Skills(&'a Skills),
    Experience(&'a Experience),
    Education(&'a Education),
    Ui(&'a Ui),
}

impl LocaleBundle {
    pub fn load(locale_dir: &Path) -> Result<Self, Error> {
        Ok(Self {
            profile: load_section(&Section::Profile.file_path(locale_dir))?,
            skills: load_section(&Section::Skills.file_path(locale_dir))?,
            experience: load_section(&Section::Experience.file_path(locale_dir))?,
            education: load_section(&Section::Education.file_path(locale_dir))?,
            ui: load_section(&Section::Ui.file_path(locale_dir))?,
        })
    }

    pub fn section(&self, section: Section) -> SectionRef<'_> {
        match section {
            Section::Profile => SectionRef::Profile(&self.profile),
            Section::Skills => SectionRef::Skills(&self.skills),
            Section::Experience => SectionRef::Experience(&self.experience),
            Section::Education => SectionRef::Education(&self.education),
            Section::Ui => SectionRef::Ui(&self.ui),
        }
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

/// Rejects any document whose root is not a mapping.
pub fn validate_shape(path: &Path, value: &serde_yaml::Value) -> Result<(), Error> {
    if value.is_mapping() {
        Ok(())
    } else {
        Err(Error::InvalidShape {
            path: path.to_path_buf(),
            found: yaml_kind(value),
        })
    }
}

pub fn parse_section<T: DeserializeOwned>(path: &Path, yaml_content: &str) -> Result<T, Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml_content)?;
    validate_shape(path, &value)?;
    Ok(serde_yaml::from_value(value)?)
}

fn load_section<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    debug!("Loading content section {}", path.display());
    let yaml_content = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
    parse_section(path, &yaml_content).map_err(|e| match e {
        Error::Yaml(inner) => crate::err!("failed to parse {}: {}", path.display(), inner),
        other => other,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFailure {
    pub lang: Lang,
    pub message: String,
}

/// Read-only content loaded once at startup. A locale that fails to load is
/// absent from `bundles` and listed in `errors`.
#[derive(Debug, Default)]
pub struct ContentStore {
    bundles: HashMap<Lang, LocaleBundle>,
    errors: Vec<LoadFailure>,
}

impl ContentStore {
    pub fn load(data_dir: &Path) -> Self {
        let mut store = Self::default();
        for lang in Lang::ALL {
            let locale_dir = data_dir.join(lang.tag());
            match LocaleBundle::load(&locale_dir) {
                Ok(bundle) => {
                    info!("Loaded {} content from {}", lang, locale_dir.display());
                    store.bundles.insert(lang, bundle);
                }
                Err(e) => {
                    error!("Failed to load {} content: {}", lang, e);
                    store.errors.push(LoadFailure {
                        lang,
                        message: e.to_string(),
                    });
                }
            }
        }
        store
    }

    pub fn bundle(&self, lang: Lang) -> Option<&LocaleBundle> {
        self.bundles.get(&lang)
    }

    pub fn section(&self, lang: Lang, section: Section) -> Option<SectionRef<'_>> {
        self.bundle(lang).map(|bundle| bundle.section(section))
    }

    pub fn errors(&self) -> &[LoadFailure] {
        &self.errors
    }

    pub fn failure(&self, lang: Lang) -> Option<&LoadFailure> {
        self.errors.iter().find(|failure| failure.lang == lang)
    }
}
