//! Mesh and material records

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::{Record, read_i16_pair, read_vec2, read_vec3, write_i16_pair, write_vec2, write_vec3};
use crate::error::Result;

/// Per-mesh header (64 bytes).
///
/// The vector fields are raw decoded values. Their meaning (bounds, UV
/// scale/offset) is not interpreted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshRecord {
    pub unknown: [i16; 2],
    pub flags1: u32,
    pub flags2: u32,
    pub vec_a: Vec3,
    pub vec_b: Vec3,
    pub uv_a: Vec2,
    pub uv_b: Vec2,
    pub vertex_count: u32,
    pub trailing: [u32; 2],
}

impl Record for MeshRecord {
    const NAME: &'static str = "mesh";
    const SIZE: usize = 64;

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let unknown = read_i16_pair(reader)?;
        let flags1 = reader.read_u32::<LittleEndian>()?;
        let flags2 = reader.read_u32::<LittleEndian>()?;
        let vec_a = read_vec3(reader)?;
        let vec_b = read_vec3(reader)?;
        let uv_a = read_vec2(reader)?;
        let uv_b = read_vec2(reader)?;
        let vertex_count = reader.read_u32::<LittleEndian>()?;
        let trailing = [
            reader.read_u32::<LittleEndian>()?,
            reader.read_u32::<LittleEndian>()?,
        ];

        Ok(Self {
            unknown,
            flags1,
            flags2,
            vec_a,
            vec_b,
            uv_a,
            uv_b,
            vertex_count,
            trailing,
        })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_i16_pair(writer, self.unknown)?;
        writer.write_u32::<LittleEndian>(self.flags1)?;
        writer.write_u32::<LittleEndian>(self.flags2)?;
        write_vec3(writer, self.vec_a)?;
        write_vec3(writer, self.vec_b)?;
        write_vec2(writer, self.uv_a)?;
        write_vec2(writer, self.uv_b)?;
        writer.write_u32::<LittleEndian>(self.vertex_count)?;
        for value in self.trailing {
            writer.write_u32::<LittleEndian>(value)?;
        }
        Ok(())
    }
}

/// Vertex range of a mesh that uses one material (12 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub mesh_id: i32,
    pub vertex_start: i32,
    pub vertex_end: i32,
}

impl MaterialRecord {
    /// Number of vertices covered by this range, zero if the range is inverted.
    #[must_use]
    pub fn vertex_span(&self) -> u32 {
        self.vertex_end
            .checked_sub(self.vertex_start)
            .and_then(|span| u32::try_from(span).ok())
            .unwrap_or(0)
    }
}

impl Record for MaterialRecord {
    const NAME: &'static str = "material";
    const SIZE: usize = 12;

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            mesh_id: reader.read_i32::<LittleEndian>()?,
            vertex_start: reader.read_i32::<LittleEndian>()?,
            vertex_end: reader.read_i32::<LittleEndian>()?,
        })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32::<LittleEndian>(self.mesh_id)?;
        writer.write_i32::<LittleEndian>(self.vertex_start)?;
        writer.write_i32::<LittleEndian>(self.vertex_end)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn sample_mesh() -> MeshRecord {
        MeshRecord {
            unknown: [-3, 7],
            flags1: 0xDEAD_BEEF,
            flags2: 0x0000_0100,
            vec_a: Vec3::new(1.5, -2.0, 3.25),
            vec_b: Vec3::new(-0.5, 0.0, 100.0),
            uv_a: Vec2::new(0.25, 0.75),
            uv_b: Vec2::new(1.0, -1.0),
            vertex_count: 4096,
            trailing: [u32::MAX, 42],
        }
    }

    #[test]
    fn test_mesh_roundtrip() {
        let mesh = sample_mesh();
        let bytes = mesh.encode().unwrap();
        assert_eq!(bytes.len(), MeshRecord::SIZE);
        assert_eq!(MeshRecord::decode(&bytes, 0).unwrap(), mesh);
    }

    #[test]
    fn test_mesh_field_offsets() {
        let bytes = sample_mesh().encode().unwrap();
        // flags1 starts right after the two i16 values, no padding
        assert_eq!(&bytes[4..8], &0xDEAD_BEEFu32.to_le_bytes());
        // vertex count sits after 2*2 + 2*4 + 12 + 12 + 8 + 8 bytes
        assert_eq!(&bytes[52..56], &4096u32.to_le_bytes());
    }

    #[test]
    fn test_mesh_short_buffer() {
        let bytes = sample_mesh().encode().unwrap();
        let err = MeshRecord::decode(&bytes[..63], 0).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { record: "mesh", needed: 64, available: 63, .. }));
    }

    #[test]
    fn test_material_roundtrip_at_offset() {
        let material = MaterialRecord { mesh_id: 3, vertex_start: 100, vertex_end: -1 };
        let mut bytes = vec![0xFF; 5];
        material.write_to(&mut bytes).unwrap();

        assert_eq!(MaterialRecord::decode(&bytes, 5).unwrap(), material);
        assert_eq!(material.vertex_span(), 0);
    }
}
