//! Skeleton, parent and transform records

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::{
    Record, read_i16_pair, read_vec3, read_vec4, write_i16_pair, write_vec3, write_vec4,
};
use crate::error::Result;

/// Skeleton file header (64 bytes): fifteen `u32` fields and a trailing `[i16; 2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonRecord {
    pub file_size: u32,
    pub unk0: u32,
    pub unk1a: u32,
    pub bone_count: u32,
    pub unk1: u32,
    pub transform_offset: u32,
    pub data2_offset: u32,
    pub end_data1_offset: u32,
    pub end_data2_offset: u32,
    pub end_data3_offset: u32,
    pub data2_end_offset: u32,
    pub main_data_offset: u32,
    pub unk2: u32,
    pub unk3: u32,
    pub ext_joint_count: u32,
    pub udata0: [i16; 2],
}

impl SkeletonRecord {
    fn fields(&self) -> [u32; 15] {
        [
            self.file_size,
            self.unk0,
            self.unk1a,
            self.bone_count,
            self.unk1,
            self.transform_offset,
            self.data2_offset,
            self.end_data1_offset,
            self.end_data2_offset,
            self.end_data3_offset,
            self.data2_end_offset,
            self.main_data_offset,
            self.unk2,
            self.unk3,
            self.ext_joint_count,
        ]
    }
}

impl Record for SkeletonRecord {
    const NAME: &'static str = "skeleton";
    const SIZE: usize = 64;

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut f = [0u32; 15];
        for value in &mut f {
            *value = reader.read_u32::<LittleEndian>()?;
        }
        let udata0 = read_i16_pair(reader)?;

        Ok(Self {
            file_size: f[0],
            unk0: f[1],
            unk1a: f[2],
            bone_count: f[3],
            unk1: f[4],
            transform_offset: f[5],
            data2_offset: f[6],
            end_data1_offset: f[7],
            end_data2_offset: f[8],
            end_data3_offset: f[9],
            data2_end_offset: f[10],
            main_data_offset: f[11],
            unk2: f[12],
            unk3: f[13],
            ext_joint_count: f[14],
            udata0,
        })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for value in self.fields() {
            writer.write_u32::<LittleEndian>(value)?;
        }
        write_i16_pair(writer, self.udata0)
    }
}

/// Parent table placeholder (4 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentsRecord {
    pub values: [i16; 2],
}

impl Record for ParentsRecord {
    const NAME: &'static str = "parents";
    const SIZE: usize = 4;

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self { values: read_i16_pair(reader)? })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_i16_pair(writer, self.values)
    }
}

/// Bone transform (48 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformRecord {
    pub rotation: Vec4,
    pub position: Vec3,
    pub unk1: f32,
    pub scale: Vec3,
    pub unk2: f32,
}

impl Record for TransformRecord {
    const NAME: &'static str = "transforms";
    const SIZE: usize = 48;

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let rotation = read_vec4(reader)?;
        let position = read_vec3(reader)?;
        let unk1 = reader.read_f32::<LittleEndian>()?;
        let scale = read_vec3(reader)?;
        let unk2 = reader.read_f32::<LittleEndian>()?;

        Ok(Self { rotation, position, unk1, scale, unk2 })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_vec4(writer, self.rotation)?;
        write_vec3(writer, self.position)?;
        writer.write_f32::<LittleEndian>(self.unk1)?;
        write_vec3(writer, self.scale)?;
        writer.write_f32::<LittleEndian>(self.unk2)?;
        Ok(())
    }
}
