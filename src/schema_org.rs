//! Schema.org `ProfilePage` projection of a locale bundle, embedded in the
//! page as JSON-LD for search engines.

use crate::content::LocaleBundle;
use serde::Serialize;

pub const SCHEMA_ELEMENT_ID: &str = "schema-org-data";
const SITE_URL: &str = "https://joaovjo.com.br";

const KNOWS_ABOUT: [&str; 15] = [
    "PHP",
    "Laravel",
    "Django",
    "Python",
    "Docker",
    "REST API",
    "MySQL",
    "PostgreSQL",
    "Git",
    "Linux",
    "React",
    "JavaScript",
    "TypeScript",
    "Tailwind CSS",
    "Microservices",
];

#[derive(Debug, Serialize, PartialEq)]
pub struct ProfilePage<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "mainEntity")]
    pub main_entity: Person<'a>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: &'a str,
    pub job_title: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<&'a str>,
    pub url: &'static str,
    pub same_as: [&'a str; 2],
    pub knows_about: &'static [&'static str],
    pub has_credential: Vec<Credential<'a>>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Credential<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    pub name: &'a str,
    pub credential_category: &'static str,
}

pub fn generate(bundle: &LocaleBundle) -> ProfilePage<'_> {
    let profile = &bundle.profile;
    ProfilePage {
        context: "https://schema.org",
        kind: "ProfilePage",
        main_entity: Person {
            kind: "Person",
            name: &profile.name,
            job_title: &profile.title,
            email: &profile.contact.email,
            telephone: profile.contact.phone.as_deref().filter(|phone| !phone.is_empty()),
            url: SITE_URL,
            same_as: [profile.contact.linkedin.as_str(), profile.contact.github.as_str()],
            knows_about: &KNOWS_ABOUT,
            has_credential: bundle
                .education
                .degrees
                .iter()
                .map(|degree| Credential {
                    kind: "EducationalOccupationalCredential",
                    name: &degree.course,
                    credential_category: "degree",
                })
                .collect(),
        },
    }
}

pub fn to_json_string(bundle: &LocaleBundle) -> serde_json::Result<String> {
    serde_json::to_string(&generate(bundle))
}
