//! Typed content sections.
//!
//! # Responsibility
//! - Model the closed set of section payloads as one sum type.
//! - Carry an explicit `type` discriminator on the wire.
//!
//! # Invariants
//! - Sequence order inside a section (items, organizations, experiences)
//!   is significant and preserved by every encoding.

use crate::model::experience::Experience;
use crate::model::resume::ResumeValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Payload shape of a section, independent of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Text,
    List,
    Organization,
}

impl SectionKind {
    /// Stable discriminator shared by all encodings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::List => "LIST",
            Self::Organization => "ORGANIZATION",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TEXT" => Some(Self::Text),
            "LIST" => Some(Self::List),
            "ORGANIZATION" => Some(Self::Organization),
            _ => None,
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of one resume section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    /// Single free-text paragraph.
    Text { content: String },
    /// Ordered bullet list.
    List { items: Vec<String> },
    /// Ordered organizations, each with its own experience history.
    Organization { organizations: Vec<Organization> },
}

impl Section {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn organizations(organizations: Vec<Organization>) -> Self {
        Self::Organization { organizations }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Text { .. } => SectionKind::Text,
            Self::List { .. } => SectionKind::List,
            Self::Organization { .. } => SectionKind::Organization,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ResumeValidationError> {
        if let Self::Organization { organizations } = self {
            for organization in organizations {
                organization.validate()?;
            }
        }
        Ok(())
    }
}

/// Employer or school entry of an organization section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

impl Organization {
    pub fn new(name: impl Into<String>, url: Option<String>, experiences: Vec<Experience>) -> Self {
        Self {
            name: name.into(),
            url,
            experiences,
        }
    }

    fn validate(&self) -> Result<(), ResumeValidationError> {
        if self.name.is_empty() {
            return Err(ResumeValidationError::EmptyOrganizationName);
        }
        self.experiences.iter().try_for_each(Experience::validate)
    }
}
