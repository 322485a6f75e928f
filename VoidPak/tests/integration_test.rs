use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use byteorder::{LittleEndian, WriteBytesExt};
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use voidpak::container::{EntryRecord, write_string};
use voidpak::export::{self, ModelFormat};
use voidpak::prelude::*;

const MAGIC: i32 = 0x0453_4552;

fn entry(id: u32, name: &str, entry_type: &str, flags: u16, position: u64) -> EntryRecord {
    EntryRecord {
        id,
        resource_flags: flags,
        entry_type: entry_type.to_string(),
        name: name.to_string(),
        destination: String::new(),
        resource_position: position,
        asset_size: 64,
        compressed_size: 64,
        ..EntryRecord::default()
    }
}

/// header | resource table | entry table | one mesh record
fn build_container() -> (Vec<u8>, ContainerLayout, u64) {
    let resources = ["gamemodes.resources", "chunk_1.resources", "chunk_2.resources"];

    let mut bytes = Vec::new();
    bytes.write_i32::<LittleEndian>(MAGIC).unwrap();
    bytes.write_i16::<LittleEndian>(3).unwrap();

    let resource_offset = bytes.len();
    for resource in resources {
        write_string(&mut bytes, resource).unwrap();
    }

    let hashed = fnv1a_64_str("soldier").to_string();
    let entries = [
        entry(1, "models/characters/char_soldier_01.bmodel", "model", 0x0004, 0),
        entry(2, &format!("generated/{hashed}.bimage"), "image", 0x8000, 0),
        entry(3, "models/characters/char_robot_02.bmodel", "model", 0x0000, 0),
        entry(4, "anims/soldier_walk.anim", "anim", 0x0008, 0),
        entry(5, "sound/weeper.wem", "wwise", 0x0040, 0),
    ];

    let entry_offset = bytes.len();
    let mut table = Vec::new();
    for e in &entries {
        e.write_to(&mut table).unwrap();
    }
    let mesh_offset = (entry_offset + table.len()) as u64;

    // patch the soldier's payload position now that the table size is known
    table.clear();
    for (i, e) in entries.iter().enumerate() {
        let mut e = e.clone();
        if i == 0 {
            e.resource_position = mesh_offset;
        }
        e.write_to(&mut table).unwrap();
    }
    bytes.extend_from_slice(&table);

    let mesh = MeshRecord {
        vertex_count: 1200,
        ..MeshRecord::default()
    };
    mesh.write_to(&mut bytes).unwrap();

    let layout = ContainerLayout::new()
        .with_magic(MAGIC)
        .with_resources(resource_offset, resources.len())
        .with_entries(entry_offset, entries.len());
    (bytes, layout, mesh_offset)
}

fn names(assets: &[Arc<Asset>]) -> Vec<&str> {
    assets.iter().map(|a| a.name()).collect()
}

#[test]
fn test_scan_to_catalog() {
    let (bytes, layout, mesh_offset) = build_container();
    let container = scan(&bytes, "base", "base/master.index", 0, &layout).unwrap();

    assert_eq!(container.resources().len(), 3);
    assert_eq!(container.entries().len(), 5);

    let catalog = AssetCatalog::open(&container, DuplicatePolicy::Reject).unwrap();
    assert_eq!(catalog.len(), 5);

    let soldier = catalog.get("models/characters/char_soldier_01.bmodel").unwrap();
    assert_eq!(soldier.asset_type(), AssetType::Model);
    assert_eq!(soldier.information(), "chunk_1.resources");
    assert_eq!(soldier.asset_pointer(), mesh_offset);

    let counts = catalog.type_counts();
    assert_eq!(counts[&AssetType::Model], 2);
    assert_eq!(counts[&AssetType::Animation], 1);
    assert_eq!(counts[&AssetType::Sound], 1);
}

#[test]
fn test_resolution_through_entries() {
    let (bytes, layout, _) = build_container();
    let container = scan(&bytes, "base", "base/master.index", 0, &layout).unwrap();

    let info: Vec<&str> = container.entries().iter().map(|a| a.information()).collect();
    assert_eq!(
        info,
        [
            "chunk_1.resources",
            "chunk_2.resources",
            "gamemodes.resources",
            "chunk_2.resources",
            "",
        ]
    );
}

#[test]
fn test_search_matches_plain_and_hashed_names() {
    let (bytes, layout, _) = build_container();
    let container = scan(&bytes, "base", "base/master.index", 0, &layout).unwrap();
    let catalog = AssetCatalog::open(&container, DuplicatePolicy::Reject).unwrap();

    // plain name, hashed image name and the animation all answer to "soldier"
    let hits = catalog.filter(&SearchQuery::parse("soldier"));
    assert_eq!(hits.len(), 3);

    let hits = catalog.filter(&SearchQuery::parse("soldier type:model"));
    assert_eq!(names(&hits), ["models/characters/char_soldier_01.bmodel"]);

    let hits = catalog.filter(&SearchQuery::parse("char !type=model"));
    assert!(hits.is_empty());

    let hits = catalog.filter(&SearchQuery::parse("type=sound,animation"));
    assert_eq!(names(&hits), ["anims/soldier_walk.anim", "sound/weeper.wem"]);
}

#[test]
fn test_reject_modes_differ_on_hashed_names() {
    let (bytes, layout, _) = build_container();
    let container = scan(&bytes, "base", "base/master.index", 0, &layout).unwrap();
    let catalog = AssetCatalog::open(&container, DuplicatePolicy::Reject).unwrap();

    let literal = SearchQuery::new().with_reject("name", "soldier");
    assert_eq!(catalog.filter(&literal).len(), 5);

    let either = literal.with_reject_mode(RejectMode::Either);
    assert_eq!(
        names(&catalog.filter(&either)),
        ["models/characters/char_robot_02.bmodel", "sound/weeper.wem"]
    );
}

#[test]
fn test_corrupt_container_fails_whole_scan() {
    let (bytes, layout, _) = build_container();
    let cut = layout.entry_table_offset + 10;
    assert!(matches!(
        scan(&bytes[..cut], "base", "base/master.index", 0, &layout),
        Err(Error::MalformedRecord { record: "entry", .. })
    ));
}

#[test]
fn test_type_sort_after_scan() {
    let (bytes, layout, _) = build_container();
    let container = scan(&bytes, "base", "base/master.index", 0, &layout).unwrap();
    let catalog = AssetCatalog::open(&container, DuplicatePolicy::Reject).unwrap();

    let sorted = catalog.sorted_by_type();
    let types: Vec<AssetType> = sorted.iter().map(|a| a.asset_type()).collect();
    assert_eq!(
        types,
        [
            AssetType::Animation,
            AssetType::Image,
            AssetType::Model,
            AssetType::Model,
            AssetType::Sound,
        ]
    );
    // equal types keep scan order
    assert_eq!(sorted[2].name(), "models/characters/char_soldier_01.bmodel");
    assert_eq!(sorted[3].name(), "models/characters/char_robot_02.bmodel");
}

struct MeshHandler;

impl AssetHandler for MeshHandler {
    fn load(&self, asset: &Asset, ctx: &HookContext<'_>) -> Result<()> {
        let offset = asset.asset_pointer() as usize;
        let end = offset + MeshRecord::SIZE;
        let data = ctx.archive.get(offset..end).ok_or_else(|| Error::AssetLoadFailed {
            name: asset.name().to_string(),
            message: "payload outside archive".to_string(),
        })?;
        asset.set_payload(data.to_vec());
        Ok(())
    }

    fn build_preview(&self, asset: &Asset, ctx: &HookContext<'_>) -> Option<PreviewModel> {
        let mesh = MeshRecord::decode(ctx.archive, asset.asset_pointer() as usize).ok()?;
        let mut model = PreviewModel::new("char_soldier_01");
        model.meshes.push(mesh);
        Some(model)
    }
}

#[derive(Default)]
struct CollectingTranslator {
    models: Mutex<Vec<(PathBuf, u64)>>,
}

impl Translator for CollectingTranslator {
    fn save_model(&self, path: &Path, model: &PreviewModel) -> Result<()> {
        std::fs::write(path, serde_json::to_vec(model)?)?;
        self.models
            .lock()
            .unwrap()
            .push((path.to_path_buf(), model.vertex_count()));
        Ok(())
    }

    fn save_animation(&self, path: &Path, _: &AnimationClip) -> Result<()> {
        std::fs::write(path, b"anim")?;
        Ok(())
    }
}

#[test]
fn test_load_preview_and_export() {
    let (bytes, layout, _) = build_container();
    let container = scan(&bytes, "base", "base/master.index", 0, &layout).unwrap();
    let catalog = AssetCatalog::open(&container, DuplicatePolicy::Replace).unwrap();

    let name = "models/characters/char_soldier_01.bmodel";
    let scanned = catalog.get(name).unwrap();
    let soldier = catalog
        .insert((*scanned).clone().with_handler(Arc::new(MeshHandler)))
        .unwrap();
    assert_eq!(catalog.len(), 5);

    let dir = tempdir().unwrap();
    let settings = ExportSettings {
        export_folder: dir.path().to_path_buf(),
        model_format: ModelFormat::SeModel,
        ..ExportSettings::default()
    };
    let ctx = HookContext::new(&bytes, &settings);

    soldier.load(&ctx).unwrap();
    assert_eq!(soldier.status(), AssetStatus::Loaded);
    assert_eq!(soldier.payload_len(), Some(MeshRecord::SIZE));

    let preview = soldier.build_preview(&ctx).unwrap();
    assert_eq!(preview.vertex_count(), 1200);

    let translator = CollectingTranslator::default();
    let path = export::export_model(Some(&preview), "char_soldier_01", &settings, &translator)
        .unwrap()
        .unwrap();
    assert_eq!(
        path,
        dir.path()
            .join("Dishonored2")
            .join("Models")
            .join("char_soldier_01")
            .join("char_soldier_01.semodel")
    );
    assert!(path.is_file());
    assert_eq!(translator.models.lock().unwrap()[0].1, 1200);
    soldier.set_status(AssetStatus::Exported);

    catalog.close();
    assert!(catalog.is_empty());
    assert!(!soldier.has_payload());
}

#[test]
fn test_listing_and_settings_files() {
    let (bytes, layout, _) = build_container();
    let dir = tempdir().unwrap();

    let settings = Settings {
        layout,
        ..Settings::default()
    };
    let config = dir.path().join("voidpak.toml");
    std::fs::write(&config, settings.to_toml_string().unwrap()).unwrap();

    let loaded = Settings::load_or_default(Some(&config)).unwrap();
    assert_eq!(loaded.layout, layout);

    let container = scan(&bytes, "base", "base/master.index", 2, &loaded.layout).unwrap();
    let catalog = AssetCatalog::open(&container, loaded.catalog.duplicate_policy).unwrap();

    let listing = dir.path().join("listing.json");
    catalog.write_listing(&listing).unwrap();
    let rows: Vec<AssetSummary> =
        serde_json::from_str(&std::fs::read_to_string(&listing).unwrap()).unwrap();

    assert_eq!(rows.len(), 5);
    let archive = rows[4].archive.as_ref().unwrap();
    assert_eq!(archive.container, 2);
    assert_eq!(archive.entry, 4);
    assert_eq!(archive.id, 5);
    assert_eq!(archive.entry_type, "wwise");
}

#[test]
fn test_export_animation_clip() {
    let dir = tempdir().unwrap();
    let settings = ExportSettings::default();
    let clip = AnimationClip {
        name: "soldier_walk".to_string(),
        frame_rate: 30.0,
        frames: vec![vec![TransformRecord::default(); 2]; 3],
    };

    let translator = CollectingTranslator::default();
    let path =
        export::export_animation(&clip, dir.path(), "soldier_walk", &settings, &translator).unwrap();
    assert_eq!(path, dir.path().join("soldier_walk.cast"));
    assert_eq!(std::fs::read(&path).unwrap(), b"anim");
    assert!(translator.models.lock().unwrap().is_empty());
}
