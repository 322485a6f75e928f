//! Fixed-layout binary records
//!
//! Every record is 1-byte packed and little-endian: fields are read in declared
//! order with no padding between them, so a record's size is the sum of its
//! field widths.
//!
//! ```
//! use voidpak::formats::records::{MaterialRecord, Record};
//!
//! let bytes = [1, 0, 0, 0, 10, 0, 0, 0, 20, 0, 0, 0];
//! let material = MaterialRecord::decode(&bytes, 0)?;
//! assert_eq!(material.vertex_end, 20);
//! # Ok::<(), voidpak::Error>(())
//! ```

mod header;
mod mesh;
mod skeleton;

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Vec2, Vec3, Vec4};

use crate::error::{Error, Result};

pub use header::ResourceHeader;
pub use mesh::{MaterialRecord, MeshRecord};
pub use skeleton::{ParentsRecord, SkeletonRecord, TransformRecord};

/// A fixed-size record that can be read from and written to a byte stream.
pub trait Record: Sized {
    /// Human-readable record name used in errors.
    const NAME: &'static str;
    /// Packed size of the record in bytes.
    const SIZE: usize;

    /// Read the record fields in declared order.
    fn read_from<R: Read>(reader: &mut R) -> Result<Self>;

    /// Write the record fields in declared order.
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()>;

    /// Decode a record starting at `offset` in `bytes`.
    ///
    /// The length is checked up front, so a short buffer never produces a
    /// partially-read record.
    fn decode(bytes: &[u8], offset: usize) -> Result<Self> {
        let available = bytes.len().saturating_sub(offset);
        if available < Self::SIZE {
            return Err(Error::MalformedRecord {
                record: Self::NAME,
                offset,
                needed: Self::SIZE,
                available,
            });
        }

        let mut cursor = &bytes[offset..offset + Self::SIZE];
        Self::read_from(&mut cursor)
    }

    /// Encode the record into a freshly allocated buffer of `SIZE` bytes.
    fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}

/// Decode `count` consecutive records starting at `offset`.
///
/// Fails as a whole if the buffer cannot hold every record.
pub fn decode_array<T: Record>(bytes: &[u8], offset: usize, count: usize) -> Result<Vec<T>> {
    let needed = T::SIZE.saturating_mul(count);
    let available = bytes.len().saturating_sub(offset);
    if available < needed {
        return Err(Error::MalformedRecord {
            record: T::NAME,
            offset,
            needed,
            available,
        });
    }

    (0..count)
        .map(|i| T::decode(bytes, offset + i * T::SIZE))
        .collect()
}

// =============================================================================
// Field helpers
// =============================================================================

pub(crate) fn read_vec2<R: Read>(reader: &mut R) -> Result<Vec2> {
    let x = reader.read_f32::<LittleEndian>()?;
    let y = reader.read_f32::<LittleEndian>()?;
    Ok(Vec2::new(x, y))
}

pub(crate) fn read_vec3<R: Read>(reader: &mut R) -> Result<Vec3> {
    let x = reader.read_f32::<LittleEndian>()?;
    let y = reader.read_f32::<LittleEndian>()?;
    let z = reader.read_f32::<LittleEndian>()?;
    Ok(Vec3::new(x, y, z))
}

pub(crate) fn read_vec4<R: Read>(reader: &mut R) -> Result<Vec4> {
    let x = reader.read_f32::<LittleEndian>()?;
    let y = reader.read_f32::<LittleEndian>()?;
    let z = reader.read_f32::<LittleEndian>()?;
    let w = reader.read_f32::<LittleEndian>()?;
    Ok(Vec4::new(x, y, z, w))
}

pub(crate) fn write_vec2<W: Write>(writer: &mut W, v: Vec2) -> Result<()> {
    writer.write_f32::<LittleEndian>(v.x)?;
    writer.write_f32::<LittleEndian>(v.y)?;
    Ok(())
}

pub(crate) fn write_vec3<W: Write>(writer: &mut W, v: Vec3) -> Result<()> {
    writer.write_f32::<LittleEndian>(v.x)?;
    writer.write_f32::<LittleEndian>(v.y)?;
    writer.write_f32::<LittleEndian>(v.z)?;
    Ok(())
}

pub(crate) fn write_vec4<W: Write>(writer: &mut W, v: Vec4) -> Result<()> {
    writer.write_f32::<LittleEndian>(v.x)?;
    writer.write_f32::<LittleEndian>(v.y)?;
    writer.write_f32::<LittleEndian>(v.z)?;
    writer.write_f32::<LittleEndian>(v.w)?;
    Ok(())
}

pub(crate) fn read_i16_pair<R: Read>(reader: &mut R) -> Result<[i16; 2]> {
    Ok([
        reader.read_i16::<LittleEndian>()?,
        reader.read_i16::<LittleEndian>()?,
    ])
}

pub(crate) fn write_i16_pair<W: Write>(writer: &mut W, pair: [i16; 2]) -> Result<()> {
    for value in pair {
        writer.write_i16::<LittleEndian>(value)?;
    }
    Ok(())
}
