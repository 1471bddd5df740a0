//! Resume aggregate root.
//!
//! # Responsibility
//! - Own the identity (`uuid`) and display name of a document.
//! - Hold enum-keyed contact and section maps with "absent = unset" semantics.
//!
//! # Invariants
//! - `uuid` and `full_name` are non-blank and never change after creation.
//! - Each present section's variant matches `SectionType::kind()`.
//! - Equality is structural over all fields; map order is irrelevant.

use crate::model::section::{Section, SectionKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Contact channel of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    Phone,
    Mobile,
    HomePhone,
    Skype,
    Email,
    Linkedin,
    Github,
    Stackoverflow,
    HomePage,
}

impl ContactType {
    pub const ALL: [ContactType; 9] = [
        Self::Phone,
        Self::Mobile,
        Self::HomePhone,
        Self::Skype,
        Self::Email,
        Self::Linkedin,
        Self::Github,
        Self::Stackoverflow,
        Self::HomePage,
    ];

    /// Stable name used as map key and database value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "PHONE",
            Self::Mobile => "MOBILE",
            Self::HomePhone => "HOME_PHONE",
            Self::Skype => "SKYPE",
            Self::Email => "EMAIL",
            Self::Linkedin => "LINKEDIN",
            Self::Github => "GITHUB",
            Self::Stackoverflow => "STACKOVERFLOW",
            Self::HomePage => "HOME_PAGE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Human-readable label for rendering.
    pub fn title(self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Mobile => "Mobile",
            Self::HomePhone => "Home phone",
            Self::Skype => "Skype",
            Self::Email => "E-mail",
            Self::Linkedin => "LinkedIn",
            Self::Github => "GitHub",
            Self::Stackoverflow => "Stack Overflow",
            Self::HomePage => "Home page",
        }
    }
}

/// Content section slot of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionType {
    Personal,
    Objective,
    Achievement,
    Qualifications,
    Experience,
    Education,
}

impl SectionType {
    pub const ALL: [SectionType; 6] = [
        Self::Personal,
        Self::Objective,
        Self::Achievement,
        Self::Qualifications,
        Self::Experience,
        Self::Education,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "PERSONAL",
            Self::Objective => "OBJECTIVE",
            Self::Achievement => "ACHIEVEMENT",
            Self::Qualifications => "QUALIFICATIONS",
            Self::Experience => "EXPERIENCE",
            Self::Education => "EDUCATION",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal qualities",
            Self::Objective => "Objective",
            Self::Achievement => "Achievements",
            Self::Qualifications => "Qualifications",
            Self::Experience => "Experience",
            Self::Education => "Education",
        }
    }

    /// Payload shape every section stored under this type must have.
    pub fn kind(self) -> SectionKind {
        match self {
            Self::Personal | Self::Objective => SectionKind::Text,
            Self::Achievement | Self::Qualifications => SectionKind::List,
            Self::Experience | Self::Education => SectionKind::Organization,
        }
    }
}

/// Contact value: a URL or free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Link(String);

impl Link {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_url(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl From<&str> for Link {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Model-level invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeValidationError {
    EmptyUuid,
    EmptyFullName,
    SectionKindMismatch {
        section: SectionType,
        expected: SectionKind,
        actual: SectionKind,
    },
    EmptyOrganizationName,
    EmptyExperienceTitle,
    InvalidExperiencePeriod {
        start: NaiveDate,
        finish: NaiveDate,
    },
}

impl Display for ResumeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUuid => write!(f, "uuid must not be empty"),
            Self::EmptyFullName => write!(f, "fullName must not be empty"),
            Self::SectionKindMismatch {
                section,
                expected,
                actual,
            } => write!(
                f,
                "section {} must be {expected}, got {actual}",
                section.as_str()
            ),
            Self::EmptyOrganizationName => write!(f, "organization name must not be empty"),
            Self::EmptyExperienceTitle => write!(f, "experience title must not be empty"),
            Self::InvalidExperiencePeriod { start, finish } => write!(
                f,
                "experience finish date ({finish}) must not precede start date ({start})"
            ),
        }
    }
}

impl Error for ResumeValidationError {}

/// Persisted resume document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ResumeWire")]
pub struct Resume {
    uuid: String,
    full_name: String,
    contacts: BTreeMap<ContactType, Link>,
    sections: BTreeMap<SectionType, Section>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResumeWire {
    uuid: String,
    full_name: String,
    #[serde(default)]
    contacts: BTreeMap<ContactType, Link>,
    #[serde(default)]
    sections: BTreeMap<SectionType, Section>,
}

impl TryFrom<ResumeWire> for Resume {
    type Error = ResumeValidationError;

    fn try_from(value: ResumeWire) -> Result<Self, Self::Error> {
        let resume = Self {
            uuid: value.uuid,
            full_name: value.full_name,
            contacts: value.contacts,
            sections: value.sections,
        };
        resume.validate()?;
        Ok(resume)
    }
}

impl Resume {
    /// Creates an empty resume whose uuid is a fresh hyphenated v4 UUID.
    pub fn new(full_name: impl Into<String>) -> Result<Self, ResumeValidationError> {
        Self::with_id(Uuid::new_v4().to_string(), full_name)
    }

    /// Creates an empty resume with a caller-supplied uuid.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        uuid: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Result<Self, ResumeValidationError> {
        let resume = Self {
            uuid: uuid.into(),
            full_name: full_name.into(),
            contacts: BTreeMap::new(),
            sections: BTreeMap::new(),
        };
        resume.validate()?;
        Ok(resume)
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn contacts(&self) -> &BTreeMap<ContactType, Link> {
        &self.contacts
    }

    pub fn sections(&self) -> &BTreeMap<SectionType, Section> {
        &self.sections
    }

    pub fn contact(&self, kind: ContactType) -> Option<&Link> {
        self.contacts.get(&kind)
    }

    pub fn set_contact(&mut self, kind: ContactType, link: impl Into<Link>) {
        self.contacts.insert(kind, link.into());
    }

    pub fn remove_contact(&mut self, kind: ContactType) -> Option<Link> {
        self.contacts.remove(&kind)
    }

    pub fn section(&self, kind: SectionType) -> Option<&Section> {
        self.sections.get(&kind)
    }

    /// Stores `section` under `kind`, rejecting a payload of the wrong shape.
    pub fn set_section(
        &mut self,
        kind: SectionType,
        section: Section,
    ) -> Result<(), ResumeValidationError> {
        check_section_kind(kind, &section)?;
        section.validate()?;
        self.sections.insert(kind, section);
        Ok(())
    }

    pub fn remove_section(&mut self, kind: SectionType) -> Option<Section> {
        self.sections.remove(&kind)
    }

    /// Checks every aggregate invariant.
    ///
    /// Storage write paths and every decoder call this before accepting a value.
    pub fn validate(&self) -> Result<(), ResumeValidationError> {
        if self.uuid.is_empty() {
            return Err(ResumeValidationError::EmptyUuid);
        }
        if self.full_name.is_empty() {
            return Err(ResumeValidationError::EmptyFullName);
        }
        for (kind, section) in &self.sections {
            check_section_kind(*kind, section)?;
            section.validate()?;
        }
        Ok(())
    }
}

fn check_section_kind(kind: SectionType, section: &Section) -> Result<(), ResumeValidationError> {
    if section.kind() != kind.kind() {
        return Err(ResumeValidationError::SectionKindMismatch {
            section: kind,
            expected: kind.kind(),
            actual: section.kind(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ContactType, Resume, ResumeValidationError, SectionType};
    use crate::model::section::{Section, SectionKind};

    #[test]
    fn enum_names_roundtrip() {
        for kind in ContactType::ALL {
            assert_eq!(ContactType::parse(kind.as_str()), Some(kind));
        }
        for kind in SectionType::ALL {
            assert_eq!(SectionType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ContactType::parse("FAX"), None);
    }

    #[test]
    fn set_section_rejects_wrong_variant() {
        let mut resume = Resume::with_id("u1", "Name").unwrap();
        let err = resume
            .set_section(SectionType::Achievement, Section::text("oops"))
            .unwrap_err();
        assert_eq!(
            err,
            ResumeValidationError::SectionKindMismatch {
                section: SectionType::Achievement,
                expected: SectionKind::List,
                actual: SectionKind::Text,
            }
        );
        assert!(resume.section(SectionType::Achievement).is_none());
    }

    #[test]
    fn new_generates_distinct_ids() {
        let first = Resume::new("A").unwrap();
        let second = Resume::new("A").unwrap();
        assert_ne!(first.uuid(), second.uuid());
    }
}
