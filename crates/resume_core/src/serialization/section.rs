//! Single-section content codec used by the relational backend.
//!
//! The section variant is implied by `SectionType::kind()`, so only the
//! payload is stored: raw text for text sections, a JSON array for list
//! and organization sections.

use super::{SerializationError, SerializationResult};
use crate::model::section::{Organization, Section, SectionKind};

/// Encodes the payload of `section` without its discriminator.
pub fn encode_section_content(section: &Section) -> SerializationResult<String> {
    match section {
        Section::Text { content } => Ok(content.clone()),
        Section::List { items } => Ok(serde_json::to_string(items)?),
        Section::Organization { organizations } => Ok(serde_json::to_string(organizations)?),
    }
}

/// Rebuilds a section of the given shape from its stored payload.
pub fn decode_section_content(kind: SectionKind, content: &str) -> SerializationResult<Section> {
    match kind {
        SectionKind::Text => Ok(Section::text(content)),
        SectionKind::List => {
            let items: Vec<String> = serde_json::from_str(content).map_err(|err| {
                SerializationError::InvalidData(format!("invalid list section content: {err}"))
            })?;
            Ok(Section::List { items })
        }
        SectionKind::Organization => {
            let organizations: Vec<Organization> =
                serde_json::from_str(content).map_err(|err| {
                    SerializationError::InvalidData(format!(
                        "invalid organization section content: {err}"
                    ))
                })?;
            Ok(Section::Organization { organizations })
        }
    }
}
