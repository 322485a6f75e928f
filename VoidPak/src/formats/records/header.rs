//! Container header record

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::error::Result;

/// Header at the start of a resource container (6 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHeader {
    pub magic: i32,
    pub version: i16,
}

impl Record for ResourceHeader {
    const NAME: &'static str = "header";
    const SIZE: usize = 6;

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let magic = reader.read_i32::<LittleEndian>()?;
        let version = reader.read_i16::<LittleEndian>()?;
        Ok(Self { magic, version })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32::<LittleEndian>(self.magic)?;
        writer.write_i16::<LittleEndian>(self.version)?;
        Ok(())
    }
}
