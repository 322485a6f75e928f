//! CLI command for decoding raw records

use std::path::Path;

use serde::Serialize;

use super::RecordKind;
use crate::formats::{
    MaterialRecord, MeshRecord, ParentsRecord, Record, ResourceHeader, SkeletonRecord,
    TransformRecord, decode_array,
};

/// Decode `count` records of `kind` at `offset` and print them as JSON
pub fn execute(file: &Path, kind: RecordKind, offset: usize, count: usize) -> anyhow::Result<()> {
    let bytes = std::fs::read(file)?;

    let json = match kind {
        RecordKind::Header => to_json::<ResourceHeader>(&bytes, offset, count)?,
        RecordKind::Mesh => to_json::<MeshRecord>(&bytes, offset, count)?,
        RecordKind::Material => {
            let materials = decode_array::<MaterialRecord>(&bytes, offset, count)?;
            // stdout carries only JSON
            eprintln!(
                "{} materials covering {} vertices",
                materials.len(),
                vertex_total(&materials)
            );
            render(&materials)?
        }
        RecordKind::Skeleton => to_json::<SkeletonRecord>(&bytes, offset, count)?,
        RecordKind::Parents => to_json::<ParentsRecord>(&bytes, offset, count)?,
        RecordKind::Transforms => to_json::<TransformRecord>(&bytes, offset, count)?,
    };

    println!("{json}");
    Ok(())
}

/// Sum of the vertex spans of every material range
fn vertex_total(materials: &[MaterialRecord]) -> u64 {
    materials.iter().map(|m| u64::from(m.vertex_span())).sum()
}

fn to_json<T>(bytes: &[u8], offset: usize, count: usize) -> anyhow::Result<String>
where
    T: Record + Serialize,
{
    render(&decode_array::<T>(bytes, offset, count)?)
}

/// A single record prints as an object, several as an array.
fn render<T: Serialize>(records: &[T]) -> anyhow::Result<String> {
    let json = match records {
        [single] => serde_json::to_string_pretty(single)?,
        all => serde_json::to_string_pretty(all)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(start: i32, end: i32) -> MaterialRecord {
        MaterialRecord {
            mesh_id: 0,
            vertex_start: start,
            vertex_end: end,
        }
    }

    #[test]
    fn test_vertex_total_skips_inverted_ranges() {
        let materials = [material(0, 100), material(100, 40), material(40, 60)];
        assert_eq!(vertex_total(&materials), 120);
        assert_eq!(vertex_total(&[]), 0);
    }

    #[test]
    fn test_render_single_and_many() {
        let one = render(&[material(1, 2)]).unwrap();
        assert!(one.trim_start().starts_with('{'));

        let many = render(&[material(1, 2), material(2, 3)]).unwrap();
        let parsed: Vec<MaterialRecord> = serde_json::from_str(&many).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].vertex_end, 3);
    }
}
