//! Regex-driven entity mining over assembled or per-section text.
//!
//! A cross-check and pre-population layer, independent of the classifier
//! and section detector. Purely pattern-driven: every kind maps to a
//! static regex or keyword table, matches are deduplicated within each
//! kind, and a kind with no hits yields an empty collection, never an
//! error.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::ParsedDocument;

/// Entity kinds mined from resume text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Email,
    Phone,
    Linkedin,
    Github,
    Url,
    Degree,
    University,
    Gpa,
    ProgrammingLanguage,
    Framework,
    Database,
    CloudPlatform,
    Certification,
    LanguageProficiency,
    YearsOfExperience,
    Salary,
}

impl EntityKind {
    /// All kinds, in the order they appear in extraction output.
    pub fn all() -> [EntityKind; 16] {
        [
            Self::Email,
            Self::Phone,
            Self::Linkedin,
            Self::Github,
            Self::Url,
            Self::Degree,
            Self::University,
            Self::Gpa,
            Self::ProgrammingLanguage,
            Self::Framework,
            Self::Database,
            Self::CloudPlatform,
            Self::Certification,
            Self::LanguageProficiency,
            Self::YearsOfExperience,
            Self::Salary,
        ]
    }
}

/// Matches collected per entity kind.
pub type EntityMatches = BTreeMap<EntityKind, Vec<String>>;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/(?:in|pub)/[\w-]+").unwrap());

static GITHUB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)github\.com/[\w-]+").unwrap());

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bhttps?://[^\s]+|\bwww\.[\w-]+\.[A-Za-z]{2,}(?:/[\w./-]*)?").unwrap()
});

static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:Bachelor|Master|PhD|Ph\.D\.|MBA|B\.S\.|M\.S\.|B\.A\.|M\.A\.|Associate)(?:\s+(?:of|in)\s+[A-Z][A-Za-z]*(?:\s+[A-Za-z]+)*)?",
    )
    .unwrap()
});

static UNIVERSITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:University|College|Institute|School)\s+of\s+[A-Z][A-Za-z]+|[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*\s+(?:University|College|Institute)",
    )
    .unwrap()
});

static GPA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bGPA:?\s*(\d\.\d{1,2})\b").unwrap());

static PROGRAMMING_LANGUAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:Python|JavaScript|TypeScript|Java|Ruby|PHP|Go|Rust|Swift|Kotlin|Scala|MATLAB)\b|C\+\+|C#",
    )
    .unwrap()
});

static FRAMEWORK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:React|Angular|Vue|Django|Flask|Spring|Express|Laravel|Rails)\b|ASP\.NET")
        .unwrap()
});

static DATABASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:MySQL|PostgreSQL|MongoDB|Redis|Oracle|SQLite|Cassandra|DynamoDB)\b").unwrap()
});

static CLOUD_PLATFORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:AWS|Azure|GCP|Google Cloud|Heroku|DigitalOcean|Vercel)\b").unwrap()
});

static CERTIFICATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:AWS|Azure|Google|Oracle|Microsoft|Cisco|CompTIA|PMP|Scrum Master|CISSP)\b[^\n]*?(?:Certified|Certification)",
    )
    .unwrap()
});

static LANGUAGE_PROFICIENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:English|Spanish|French|German|Chinese|Japanese|Korean|Hindi|Arabic|Portuguese|Russian|Italian)\s*[-:–]\s*(?:Native|Fluent|Advanced|Intermediate|Basic|Beginner|Professional|Conversational)\b",
    )
    .unwrap()
});

static YEARS_OF_EXPERIENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\+?\s*years?\s*(?:of\s*)?experience\b").unwrap());

static SALARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\d{1,3}(?:,\d{3})*(?:\.\d{2})?[kK]?").unwrap());

static NAME_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+$").unwrap());

static CITY_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+(?:\s[A-Z][a-z]+)?),\s*([A-Z]{2})\b").unwrap());

static ZIPCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{5}(?:-\d{4})?\b").unwrap());

/// Extract all entity kinds from a text.
///
/// The returned map contains every kind; kinds without matches map to an
/// empty vec. Matches keep first-seen order and are unique within a kind.
pub fn extract_entities(text: &str) -> EntityMatches {
    let mut matches = EntityMatches::new();

    matches.insert(EntityKind::Email, find_all(&EMAIL, text));
    matches.insert(EntityKind::Phone, find_all(&PHONE, text));
    matches.insert(EntityKind::Linkedin, find_all(&LINKEDIN, text));
    matches.insert(EntityKind::Github, find_all(&GITHUB, text));
    matches.insert(EntityKind::Url, find_all(&URL, text));
    matches.insert(EntityKind::Degree, find_all(&DEGREE, text));
    matches.insert(EntityKind::University, find_all(&UNIVERSITY, text));
    matches.insert(EntityKind::Gpa, find_captures(&GPA, text));
    matches.insert(
        EntityKind::ProgrammingLanguage,
        find_all(&PROGRAMMING_LANGUAGE, text),
    );
    matches.insert(EntityKind::Framework, find_all(&FRAMEWORK, text));
    matches.insert(EntityKind::Database, find_all(&DATABASE, text));
    matches.insert(EntityKind::CloudPlatform, find_all(&CLOUD_PLATFORM, text));
    matches.insert(EntityKind::Certification, find_all(&CERTIFICATION, text));
    matches.insert(
        EntityKind::LanguageProficiency,
        find_all(&LANGUAGE_PROFICIENCY, text),
    );
    matches.insert(
        EntityKind::YearsOfExperience,
        find_captures(&YEARS_OF_EXPERIENCE, text),
    );
    matches.insert(EntityKind::Salary, find_all(&SALARY, text));

    matches
}

/// Extract entities per section and merge across the document.
pub fn extract_document_entities(document: &ParsedDocument) -> EntityMatches {
    let mut merged: EntityMatches = EntityKind::all()
        .into_iter()
        .map(|kind| (kind, Vec::new()))
        .collect();

    for group in &document.grouped_sections {
        let section_matches = extract_entities(&group.combined_text());
        for (kind, values) in section_matches {
            let existing = merged.entry(kind).or_default();
            for value in values {
                if !existing.contains(&value) {
                    existing.push(value);
                }
            }
        }
    }

    merged
}

/// Candidate contact fields pre-populated from raw text.
///
/// A cross-check for the downstream extraction stage, not a system of
/// record; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactProfile {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub alternate_email: Option<String>,
    pub phone: Option<String>,
    pub alternate_phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

/// Pre-populate contact fields from resume text.
///
/// The name candidate is a two-capitalized-word line among the first five
/// lines; emails and phones fill primary then alternate slots in order of
/// appearance.
pub fn contact_profile(text: &str) -> ContactProfile {
    let mut profile = ContactProfile::default();

    for line in text.lines().take(5) {
        let line = line.trim();
        if NAME_CANDIDATE.is_match(line) {
            profile.full_name = Some(line.to_string());
            let mut parts = line.split_whitespace();
            profile.first_name = parts.next().map(str::to_string);
            profile.last_name = parts.next_back().map(str::to_string);
            break;
        }
    }

    let emails = find_all(&EMAIL, text);
    profile.email = emails.first().cloned();
    profile.alternate_email = emails.get(1).cloned();

    let phones = find_all(&PHONE, text);
    profile.phone = phones.first().cloned();
    profile.alternate_phone = phones.get(1).cloned();

    profile.linkedin = find_all(&LINKEDIN, text).into_iter().next();
    profile.github = find_all(&GITHUB, text).into_iter().next();
    profile.website = find_all(&URL, text).into_iter().next();

    if let Some(caps) = CITY_STATE.captures(text) {
        profile.city = Some(caps[1].to_string());
        profile.state = Some(caps[2].to_string());
    }
    profile.zipcode = find_all(&ZIPCODE, text).into_iter().next();

    profile
}

/// All matches for a pattern, deduplicated in first-seen order.
fn find_all(pattern: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    pattern
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

/// First capture group of each match, deduplicated in first-seen order.
fn find_captures(pattern: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .filter(|m| seen.insert(m.clone()))
        .collect()
}
