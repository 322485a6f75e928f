//! Binary formats found in Void engine resource containers

pub mod records;

pub use records::{
    MaterialRecord, MeshRecord, ParentsRecord, Record, ResourceHeader, SkeletonRecord,
    TransformRecord, decode_array,
};
