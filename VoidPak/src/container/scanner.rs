//! Container scanning
//!
//! Reads the header, the resource path table and the entry table from an
//! in-memory container at the offsets given by a [`ContainerLayout`]. Strings
//! are a little-endian `u32` byte length followed by UTF-8 bytes.
//!
//! Entry record layout:
//!
//! | field               | type  |
//! |---------------------|-------|
//! | `id`                | `u32` |
//! | `resource_flags`    | `u16` |
//! | `entry_type`        | str   |
//! | `name`              | str   |
//! | `destination`       | str   |
//! | `resource_position` | `u64` |
//! | `asset_size`        | `u32` |
//! | `compressed_size`   | `i32` |
//! | `dummy`             | `i32` |
//! | `unk`               | `i32` |
//! | `flag3`             | `i32` |
//! | `flag2`             | `i16` |

use std::io::Write;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use super::{ContainerLayout, ResourceContainer};
use crate::asset::{ArchiveEntry, Asset, AssetType};
use crate::error::{Error, Result};
use crate::formats::{Record, ResourceHeader};

/// Bounds-checked little-endian cursor over one table
struct TableReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    record: &'static str,
}

impl<'a> TableReader<'a> {
    fn new(bytes: &'a [u8], offset: usize, table: &'static str) -> Result<Self> {
        if offset > bytes.len() {
            return Err(Error::TableOutOfBounds {
                table,
                offset,
                len: bytes.len(),
            });
        }
        Ok(Self {
            bytes,
            pos: offset,
            record: table,
        })
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let available = self.bytes.len() - self.pos;
        if available < needed {
            return Err(Error::MalformedRecord {
                record: self.record,
                offset: self.pos,
                needed,
                available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.take(2).map(LittleEndian::read_u16)
    }

    fn read_i16(&mut self) -> Result<i16> {
        self.take(2).map(LittleEndian::read_i16)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.take(4).map(LittleEndian::read_u32)
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.take(4).map(LittleEndian::read_i32)
    }

    fn read_u64(&mut self) -> Result<u64> {
        self.take(8).map(LittleEndian::read_u64)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// One raw entry-table record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryRecord {
    pub id: u32,
    pub resource_flags: u16,
    pub entry_type: String,
    pub name: String,
    pub destination: String,
    pub resource_position: u64,
    pub asset_size: u32,
    pub compressed_size: i32,
    pub dummy: i32,
    pub unk: i32,
    pub flag3: i32,
    pub flag2: i16,
}

impl EntryRecord {
    fn read(reader: &mut TableReader<'_>) -> Result<Self> {
        Ok(Self {
            id: reader.read_u32()?,
            resource_flags: reader.read_u16()?,
            entry_type: reader.read_string()?,
            name: reader.read_string()?,
            destination: reader.read_string()?,
            resource_position: reader.read_u64()?,
            asset_size: reader.read_u32()?,
            compressed_size: reader.read_i32()?,
            dummy: reader.read_i32()?,
            unk: reader.read_i32()?,
            flag3: reader.read_i32()?,
            flag2: reader.read_i16()?,
        })
    }

    /// Write the record in table layout.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.id)?;
        writer.write_u16::<LittleEndian>(self.resource_flags)?;
        write_string(writer, &self.entry_type)?;
        write_string(writer, &self.name)?;
        write_string(writer, &self.destination)?;
        writer.write_u64::<LittleEndian>(self.resource_position)?;
        writer.write_u32::<LittleEndian>(self.asset_size)?;
        writer.write_i32::<LittleEndian>(self.compressed_size)?;
        writer.write_i32::<LittleEndian>(self.dummy)?;
        writer.write_i32::<LittleEndian>(self.unk)?;
        writer.write_i32::<LittleEndian>(self.flag3)?;
        writer.write_i16::<LittleEndian>(self.flag2)?;
        Ok(())
    }

    /// Turn the record into a catalog asset owned by `container`.
    #[must_use]
    pub fn into_asset(self, container: &ResourceContainer, container_index: i32, entry_index: i32) -> Asset {
        let resource_path = container.resolve_resource_path(self.resource_flags).to_string();
        let asset_type = AssetType::from_entry_type(&self.entry_type);
        let asset_size = i64::from(self.asset_size);

        let entry = ArchiveEntry {
            container: container_index,
            entry: entry_index,
            id: self.id,
            entry_type: self.entry_type,
            destination: self.destination,
            resource_position: self.resource_position,
            compressed_size: self.compressed_size,
            resource_flags: self.resource_flags,
            dummy: self.dummy,
            unk: self.unk,
            flag3: self.flag3,
            flag2: self.flag2,
        };

        Asset::from_archive_entry(self.name, entry)
            .with_type(asset_type)
            .with_size(asset_size)
            .with_information(resource_path)
    }
}

/// Write a length-prefixed string.
pub fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    writer.write_u32::<LittleEndian>(value.len() as u32)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

/// Scan a container held in memory.
///
/// Either every table is read or an error is returned; no partially filled
/// container escapes.
pub fn scan(
    bytes: &[u8],
    directory: &str,
    path: &str,
    container_index: i32,
    layout: &ContainerLayout,
) -> Result<ResourceContainer> {
    let header = ResourceHeader::decode(bytes, layout.header_offset)?;
    if let Some(expected) = layout.magic {
        if header.magic != expected {
            return Err(Error::InvalidContainerMagic {
                expected,
                found: header.magic,
            });
        }
    }

    let mut container = ResourceContainer::new(directory, path);

    let mut reader = TableReader::new(bytes, layout.resource_table_offset, "resource")?;
    for _ in 0..layout.resource_count {
        container.push_resource(reader.read_string()?);
    }

    let mut reader = TableReader::new(bytes, layout.entry_table_offset, "entry")?;
    let mut records = Vec::with_capacity(layout.entry_count.min(bytes.len()));
    for _ in 0..layout.entry_count {
        records.push(EntryRecord::read(&mut reader)?);
    }

    for (index, record) in records.into_iter().enumerate() {
        let asset = record.into_asset(&container, container_index, index as i32);
        container.push_entry(asset);
    }

    tracing::debug!(
        "Scanned {} (version {}): {} resources, {} entries",
        path,
        header.version,
        container.resources().len(),
        container.entries().len()
    );

    Ok(container)
}
