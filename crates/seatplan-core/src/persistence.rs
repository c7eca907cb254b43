//! Save/Load of the floor plan through a string key-value store
//!
//! Each piece of state lives under its own key as JSON text, so a browser
//! style local storage and a plain file can both back it. Loading is
//! forgiving: missing keys fall back to defaults, unreadable values are
//! logged and ignored, and the older record shape (`seats`, `isRoyal`,
//! `isGeschenke`, `tableNumber`, `isLocked`, no `placed`) is accepted.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use seatplan_logic::config::RoomConfig;
use seatplan_logic::constants::rotation;
use seatplan_logic::footprint::TableVariant;
use seatplan_logic::geometry::Point;

use crate::components::{Accessories, Accessory, AccessoryKind, Table, TableId, TableLabel};

/// Storage keys.
pub mod keys {
    pub const TABLES: &str = "sala-tables";
    pub const NEXT_ID: &str = "sala-next-id";
    pub const DJ_POSITION: &str = "sala-dj-position";
    pub const DJ_ROTATION: &str = "sala-dj-rotation";
    pub const PHOTO_BOX_POSITION: &str = "sala-fotobox-position";
    pub const PHOTO_BOX_ROTATION: &str = "sala-fotobox-rotation";
    pub const ZOOM: &str = "sala-floorplan-zoom";
}

/// Errors that can occur while writing to a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Generic string key-value storage.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys in one JSON object on disk, rewritten on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// On-disk table record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTable {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(alias = "seats")]
    pub seat_count: u32,
    #[serde(default)]
    pub variant: Option<TableVariant>,
    #[serde(default, alias = "tableNumber")]
    pub label: TableLabel,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default, alias = "isLocked")]
    pub locked: bool,
    #[serde(default)]
    pub placed: Option<bool>,
    #[serde(default, skip_serializing)]
    pub is_royal: bool,
    #[serde(default, skip_serializing)]
    pub is_geschenke: bool,
}

impl From<&Table> for StoredTable {
    fn from(t: &Table) -> Self {
        Self {
            id: t.id.as_str().to_string(),
            x: t.position.x,
            y: t.position.y,
            seat_count: t.seat_count,
            variant: Some(t.variant),
            label: t.label.clone(),
            rotation: f32::from(t.rotation),
            locked: t.locked,
            placed: Some(t.placed),
            is_royal: false,
            is_geschenke: false,
        }
    }
}

impl StoredTable {
    /// Convert to a table; old records without `placed` count as placed
    /// when they sit above the room's bottom edge.
    pub fn into_table(self, room: &RoomConfig) -> Table {
        let variant = self.variant.unwrap_or(if self.is_geschenke {
            TableVariant::Gift
        } else if self.is_royal {
            TableVariant::Royal
        } else {
            TableVariant::Standard
        });
        Table {
            id: TableId::from(self.id.as_str()),
            position: Point::new(self.x, self.y),
            seat_count: self.seat_count,
            variant,
            label: self.label,
            rotation: normalize_rotation(self.rotation),
            locked: self.locked,
            placed: self.placed.unwrap_or(self.y < room.height),
        }
    }
}

/// On-disk marker position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoredMarker {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed: Option<bool>,
}

/// Snap any angle to the nearest 45° step in `[0, 360)`.
pub fn normalize_rotation(degrees: f32) -> u16 {
    if !degrees.is_finite() {
        return 0;
    }
    let step = f32::from(rotation::STEP);
    let snapped = (degrees / step).round() * step;
    snapped.rem_euclid(f32::from(rotation::FULL_TURN)) as u16 % rotation::FULL_TURN
}

pub fn save_tables<S: KeyValueStore + ?Sized>(
    store: &mut S,
    tables: &[Table],
    next_id: u32,
) -> Result<(), StoreError> {
    let records: Vec<StoredTable> = tables.iter().map(StoredTable::from).collect();
    store.save(keys::TABLES, &serde_json::to_string(&records)?)?;
    store.save(keys::NEXT_ID, &next_id.to_string())
}

/// Stored tables and id counter. Unreadable data yields an empty set.
pub fn load_tables<S: KeyValueStore + ?Sized>(store: &S, room: &RoomConfig) -> (Vec<Table>, u32) {
    let tables = match store.load(keys::TABLES) {
        Some(text) => match serde_json::from_str::<Vec<StoredTable>>(&text) {
            Ok(records) => records.into_iter().map(|r| r.into_table(room)).collect(),
            Err(e) => {
                log::warn!("ignoring unreadable {}: {e}", keys::TABLES);
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    let next_id = store
        .load(keys::NEXT_ID)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(1);
    (tables, next_id)
}

pub fn save_accessories<S: KeyValueStore + ?Sized>(
    store: &mut S,
    accessories: &Accessories,
) -> Result<(), StoreError> {
    for kind in AccessoryKind::ALL {
        let marker = accessories.get(kind);
        let stored = StoredMarker {
            x: marker.position.x,
            y: marker.position.y,
            placed: Some(marker.placed),
        };
        let (pos_key, rot_key) = accessory_keys(kind);
        store.save(pos_key, &serde_json::to_string(&stored)?)?;
        store.save(rot_key, &marker.rotation.to_string())?;
    }
    Ok(())
}

pub fn load_accessories<S: KeyValueStore + ?Sized>(store: &S, room: &RoomConfig) -> Accessories {
    let mut accessories = Accessories::new(room);
    for kind in AccessoryKind::ALL {
        let (pos_key, rot_key) = accessory_keys(kind);
        let mut marker = Accessory::new(kind, room);
        if let Some(text) = store.load(pos_key) {
            match serde_json::from_str::<StoredMarker>(&text) {
                Ok(m) => {
                    marker.position = Point::new(m.x, m.y);
                    marker.placed = m.placed.unwrap_or(m.y < room.height);
                }
                Err(e) => log::warn!("ignoring unreadable {pos_key}: {e}"),
            }
        }
        if let Some(deg) = store.load(rot_key).and_then(|s| s.trim().parse::<f32>().ok()) {
            marker.rotation = normalize_rotation(deg);
        }
        match kind {
            AccessoryKind::DjBooth => accessories.dj_booth = marker,
            AccessoryKind::PhotoBox => accessories.photo_box = marker,
        }
    }
    accessories
}

fn accessory_keys(kind: AccessoryKind) -> (&'static str, &'static str) {
    match kind {
        AccessoryKind::DjBooth => (keys::DJ_POSITION, keys::DJ_ROTATION),
        AccessoryKind::PhotoBox => (keys::PHOTO_BOX_POSITION, keys::PHOTO_BOX_ROTATION),
    }
}

pub fn save_zoom<S: KeyValueStore + ?Sized>(store: &mut S, zoom: f32) -> Result<(), StoreError> {
    store.save(keys::ZOOM, &zoom.to_string())
}

/// Stored zoom factor, 1.0 when missing or nonsensical.
pub fn load_zoom<S: KeyValueStore + ?Sized>(store: &S) -> f32 {
    store
        .load(keys::ZOOM)
        .and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|z| z.is_finite() && *z > 0.0)
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_records_load() {
        let room = RoomConfig::default();
        let mut store = MemoryStore::new();
        store
            .save(
                keys::TABLES,
                r#"[
                    {"id":"table-1","x":100,"y":100,"seats":6,"isRoyal":false,"isGeschenke":false,"tableNumber":1,"rotation":90},
                    {"id":"table-2","x":900,"y":200,"seats":4,"isRoyal":true,"isGeschenke":false,"tableNumber":"R","rotation":90,"isLocked":true},
                    {"id":"geschenke-table","x":20,"y":900,"seats":8,"isRoyal":false,"isGeschenke":true,"tableNumber":"Geschenke"},
                    {"id":"table-3","x":0,"y":650,"seats":8,"isRoyal":false,"isGeschenke":false,"tableNumber":3,"rotation":50}
                ]"#,
            )
            .unwrap();
        store.save(keys::NEXT_ID, "4").unwrap();

        let (tables, next_id) = load_tables(&store, &room);
        assert_eq!(next_id, 4);
        assert_eq!(tables.len(), 4);
        assert_eq!(tables[0].variant, TableVariant::Standard);
        assert_eq!(tables[0].rotation, 90);
        assert!(tables[0].placed);
        assert_eq!(tables[1].variant, TableVariant::Royal);
        assert!(tables[1].locked);
        assert_eq!(tables[1].label, TableLabel::royal());
        assert_eq!(tables[2].variant, TableVariant::Gift);
        assert!(!tables[2].placed);
        assert_eq!(tables[2].rotation, 0);
        assert!(!tables[3].placed);
        assert_eq!(tables[3].rotation, 45);
    }

    #[test]
    fn tables_survive_a_save() {
        let room = RoomConfig::default();
        let table = Table {
            id: TableId::numbered(5),
            position: Point::new(0.0, 650.0),
            seat_count: 7,
            variant: TableVariant::Standard,
            label: TableLabel::Number(2),
            rotation: 135,
            locked: true,
            // staged tables may sit anywhere, the flag wins over y
            placed: true,
        };
        let mut store = MemoryStore::new();
        save_tables(&mut store, std::slice::from_ref(&table), 6).unwrap();
        assert!(!store.load(keys::TABLES).unwrap().contains("isRoyal"));

        let (tables, next_id) = load_tables(&store, &room);
        assert_eq!(next_id, 6);
        assert_eq!(tables, vec![table]);
    }

    #[test]
    fn garbage_falls_back_to_empty() {
        let room = RoomConfig::default();
        let mut store = MemoryStore::new();
        store.save(keys::TABLES, "not json").unwrap();
        store.save(keys::NEXT_ID, "abc").unwrap();
        store.save(keys::ZOOM, "-3").unwrap();
        assert_eq!(load_tables(&store, &room), (Vec::new(), 1));
        assert_eq!(load_zoom(&store), 1.0);
    }

    #[test]
    fn accessories_load_legacy_and_new_shapes() {
        let room = RoomConfig::default();
        let mut store = MemoryStore::new();
        store.save(keys::DJ_POSITION, r#"{"x":700,"y":300}"#).unwrap();
        store.save(keys::DJ_ROTATION, "270").unwrap();
        store
            .save(keys::PHOTO_BOX_POSITION, r#"{"x":0,"y":800}"#)
            .unwrap();

        let acc = load_accessories(&store, &room);
        assert_eq!(acc.dj_booth.position, Point::new(700.0, 300.0));
        assert_eq!(acc.dj_booth.rotation, 270);
        assert!(acc.dj_booth.placed);
        assert!(!acc.photo_box.placed);

        let mut out = MemoryStore::new();
        save_accessories(&mut out, &acc).unwrap();
        assert_eq!(load_accessories(&out, &room), acc);
    }

    #[test]
    fn rotation_snaps_to_steps() {
        assert_eq!(normalize_rotation(0.0), 0);
        assert_eq!(normalize_rotation(44.0), 45);
        assert_eq!(normalize_rotation(359.0), 0);
        assert_eq!(normalize_rotation(-45.0), 315);
        assert_eq!(normalize_rotation(720.0), 0);
        assert_eq!(normalize_rotation(f32::NAN), 0);
    }

    #[test]
    fn json_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.load(keys::ZOOM).is_none());
        save_zoom(&mut store, 1.5).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(load_zoom(&reopened), 1.5);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn json_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Json(_))));
    }
}
