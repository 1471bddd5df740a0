//! JSON document encoding.
//!
//! Wire shape: `{"uuid", "fullName", "contacts": {TYPE: value},
//! "sections": {TYPE: {"type": KIND, ...payload}}}`; dates as `YYYY-MM-DD`.

use super::{SerializationResult, SerializationStrategy};
use crate::model::resume::Resume;
use std::io::{BufReader, BufWriter, Read, Write};

/// UTF-8 JSON strategy backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStreamStrategy;

impl SerializationStrategy for JsonStreamStrategy {
    fn write(&self, resume: &Resume, out: &mut dyn Write) -> SerializationResult<()> {
        let mut writer = BufWriter::new(out);
        serde_json::to_writer(&mut writer, resume)?;
        writer.flush()?;
        Ok(())
    }

    fn read(&self, input: &mut dyn Read) -> SerializationResult<Resume> {
        // `Resume` deserialization runs `validate()` via its wire conversion.
        let resume = serde_json::from_reader(BufReader::new(input))?;
        Ok(resume)
    }
}
