//! Compact binary document encoding.
//!
//! Layout (all integers big-endian `u32`, strings length-prefixed UTF-8):
//! `uuid, fullName, contactCount, (type, value)*, sectionCount,
//! (type, kind, payload)*`. Optional strings carry a one-byte presence flag.

use super::{SerializationError, SerializationResult, SerializationStrategy};
use crate::model::experience::Experience;
use crate::model::resume::{ContactType, Resume, SectionType};
use crate::model::section::{Organization, Section, SectionKind};
use crate::util::date::{format_date, parse_date};
use std::io::{BufReader, BufWriter, Read, Write};

const MAX_STRING_BYTES: u32 = 16 * 1024 * 1024;
const MAX_COLLECTION_LEN: u32 = 1 << 20;

/// Length-prefixed binary strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataStreamStrategy;

impl SerializationStrategy for DataStreamStrategy {
    fn write(&self, resume: &Resume, out: &mut dyn Write) -> SerializationResult<()> {
        let mut writer = BufWriter::new(out);
        write_str(&mut writer, resume.uuid())?;
        write_str(&mut writer, resume.full_name())?;

        write_len(&mut writer, resume.contacts().len())?;
        for (kind, link) in resume.contacts() {
            write_str(&mut writer, kind.as_str())?;
            write_str(&mut writer, link.as_str())?;
        }

        write_len(&mut writer, resume.sections().len())?;
        for (kind, section) in resume.sections() {
            write_str(&mut writer, kind.as_str())?;
            write_str(&mut writer, section.kind().as_str())?;
            write_section(&mut writer, section)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn read(&self, input: &mut dyn Read) -> SerializationResult<Resume> {
        let mut reader = BufReader::new(input);
        let uuid = read_str(&mut reader)?;
        let full_name = read_str(&mut reader)?;
        let mut resume = Resume::with_id(uuid, full_name)?;

        for _ in 0..read_len(&mut reader)? {
            let name = read_str(&mut reader)?;
            let kind = ContactType::parse(&name).ok_or_else(|| {
                SerializationError::InvalidData(format!("unknown contact type `{name}`"))
            })?;
            resume.set_contact(kind, read_str(&mut reader)?.as_str());
        }

        for _ in 0..read_len(&mut reader)? {
            let name = read_str(&mut reader)?;
            let kind = SectionType::parse(&name).ok_or_else(|| {
                SerializationError::InvalidData(format!("unknown section type `{name}`"))
            })?;
            let discriminator = read_str(&mut reader)?;
            let section_kind = SectionKind::parse(&discriminator).ok_or_else(|| {
                SerializationError::InvalidData(format!(
                    "unknown section discriminator `{discriminator}`"
                ))
            })?;
            let section = read_section(&mut reader, section_kind)?;
            resume.set_section(kind, section)?;
        }

        resume.validate()?;
        Ok(resume)
    }
}

fn write_section(writer: &mut impl Write, section: &Section) -> SerializationResult<()> {
    match section {
        Section::Text { content } => write_str(writer, content),
        Section::List { items } => {
            write_len(writer, items.len())?;
            items.iter().try_for_each(|item| write_str(writer, item))
        }
        Section::Organization { organizations } => {
            write_len(writer, organizations.len())?;
            for organization in organizations {
                write_str(writer, &organization.name)?;
                write_opt_str(writer, organization.url.as_deref())?;
                write_len(writer, organization.experiences.len())?;
                for experience in &organization.experiences {
                    write_str(writer, &format_date(experience.start_date))?;
                    write_str(writer, &format_date(experience.finish_date))?;
                    write_str(writer, &experience.title)?;
                    write_opt_str(writer, experience.description.as_deref())?;
                }
            }
            Ok(())
        }
    }
}

fn read_section(reader: &mut impl Read, kind: SectionKind) -> SerializationResult<Section> {
    match kind {
        SectionKind::Text => Ok(Section::text(read_str(reader)?)),
        SectionKind::List => {
            let len = read_len(reader)?;
            let items = (0..len)
                .map(|_| read_str(reader))
                .collect::<SerializationResult<Vec<_>>>()?;
            Ok(Section::List { items })
        }
        SectionKind::Organization => {
            let len = read_len(reader)?;
            let mut organizations = Vec::new();
            for _ in 0..len {
                let name = read_str(reader)?;
                let url = read_opt_str(reader)?;
                let mut experiences = Vec::new();
                for _ in 0..read_len(reader)? {
                    let start_date = read_date(reader)?;
                    let finish_date = read_date(reader)?;
                    let title = read_str(reader)?;
                    let description = read_opt_str(reader)?;
                    experiences.push(Experience::new(start_date, finish_date, title, description)?);
                }
                organizations.push(Organization::new(name, url, experiences));
            }
            Ok(Section::Organization { organizations })
        }
    }
}

fn read_date(reader: &mut impl Read) -> SerializationResult<chrono::NaiveDate> {
    let text = read_str(reader)?;
    parse_date(&text).map_err(|err| SerializationError::InvalidData(err.to_string()))
}

fn write_len(writer: &mut impl Write, len: usize) -> SerializationResult<()> {
    let len = u32::try_from(len)
        .ok()
        .filter(|len| *len <= MAX_COLLECTION_LEN)
        .ok_or_else(|| SerializationError::InvalidData(format!("collection too large: {len}")))?;
    writer.write_all(&len.to_be_bytes())?;
    Ok(())
}

fn read_u32(reader: &mut impl Read) -> SerializationResult<u32> {
    let mut buf = [0_u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_len(reader: &mut impl Read) -> SerializationResult<u32> {
    let len = read_u32(reader)?;
    if len > MAX_COLLECTION_LEN {
        return Err(SerializationError::InvalidData(format!(
            "collection length {len} exceeds limit {MAX_COLLECTION_LEN}"
        )));
    }
    Ok(len)
}

fn write_str(writer: &mut impl Write, value: &str) -> SerializationResult<()> {
    let len = u32::try_from(value.len())
        .ok()
        .filter(|len| *len <= MAX_STRING_BYTES)
        .ok_or_else(|| {
            SerializationError::InvalidData(format!("string too long: {} bytes", value.len()))
        })?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_str(reader: &mut impl Read) -> SerializationResult<String> {
    let len = read_u32(reader)?;
    if len > MAX_STRING_BYTES {
        return Err(SerializationError::InvalidData(format!(
            "string length {len} exceeds limit {MAX_STRING_BYTES}"
        )));
    }
    let mut bytes = vec![0_u8; len as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|err| SerializationError::InvalidData(format!("non UTF-8 string: {err}")))
}

fn write_opt_str(writer: &mut impl Write, value: Option<&str>) -> SerializationResult<()> {
    match value {
        Some(value) => {
            writer.write_all(&[1])?;
            write_str(writer, value)
        }
        None => {
            writer.write_all(&[0])?;
            Ok(())
        }
    }
}

fn read_opt_str(reader: &mut impl Read) -> SerializationResult<Option<String>> {
    let mut flag = [0_u8; 1];
    reader.read_exact(&mut flag)?;
    match flag[0] {
        0 => Ok(None),
        1 => Ok(Some(read_str(reader)?)),
        other => Err(SerializationError::InvalidData(format!(
            "invalid presence flag {other}"
        ))),
    }
}
