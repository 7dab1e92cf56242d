//! JSON boundary types for grid and object persistence, plus the single-line
//! share-string encoding used for clipboard transfer.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use gridwalk_core::{
    AssetStatus, CellCoord, CellRectSize, Classification, Color, Command, GridSnapshot,
    GridSnapshotCell, ObjectSpec,
};
use gridwalk_world::{query, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SHARE_DOMAIN: &str = "grid";
const SHARE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded share payload.
pub(crate) const SHARE_HEADER: &str = "grid:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Version stamp written into exported object layouts.
pub(crate) const LAYOUT_VERSION: &str = "1.3";
/// File sentinel marking user-supplied assets whose reference is
/// session-local and cannot be restored on import.
pub(crate) const CUSTOM_FILE_SENTINEL: &str = "custom";

/// Grid paint state as stored in `navigation_grid.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GridFile {
    pub grid_size: u32,
    pub cell_size: f32,
    pub grid_height: f32,
    pub cells: Vec<GridFileCell>,
}

/// Single painted cell within a [`GridFile`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GridFileCell {
    pub x: u32,
    pub z: u32,
    pub classification: Classification,
    pub color: Color,
}

impl GridFile {
    pub(crate) fn from_snapshot(snapshot: GridSnapshot) -> Self {
        Self {
            grid_size: snapshot.grid_size,
            cell_size: snapshot.cell_size,
            grid_height: snapshot.grid_height,
            cells: snapshot
                .cells
                .into_iter()
                .map(|entry| GridFileCell {
                    x: entry.cell.x(),
                    z: entry.cell.z(),
                    classification: entry.classification,
                    color: entry.color,
                })
                .collect(),
        }
    }

    pub(crate) fn into_snapshot(self) -> GridSnapshot {
        GridSnapshot {
            grid_size: self.grid_size,
            cell_size: self.cell_size,
            grid_height: self.grid_height,
            cells: self
                .cells
                .into_iter()
                .map(|entry| GridSnapshotCell {
                    cell: CellCoord::new(entry.x, entry.z),
                    classification: entry.classification,
                    color: entry.color,
                })
                .collect(),
        }
    }

    /// Encodes the grid into a single-line string suitable for clipboard
    /// transfer.
    pub(crate) fn encode_share(&self) -> String {
        let payload = SharePayload {
            cell_size: self.cell_size,
            grid_height: self.grid_height,
            cells: self.cells.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("share payload serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!(
            "{SHARE_HEADER}:{}x{}:{encoded}",
            self.grid_size, self.grid_size
        )
    }

    /// Decodes a grid from the provided share-string representation.
    pub(crate) fn decode_share(value: &str) -> Result<Self, SceneTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SceneTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(SceneTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(SceneTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(SceneTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(SceneTransferError::MissingPayload)?;

        if domain != SHARE_DOMAIN {
            return Err(SceneTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SHARE_VERSION {
            return Err(SceneTransferError::UnsupportedVersion(version.to_owned()));
        }

        let grid_size = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
        let decoded: SharePayload = serde_json::from_slice(&bytes)?;

        Ok(Self {
            grid_size,
            cell_size: decoded.cell_size,
            grid_height: decoded.grid_height,
            cells: decoded.cells,
        })
    }
}

/// Scene object layout as stored in `scene_objects.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObjectsFile {
    pub version: String,
    pub grid_size: u32,
    pub cell_size: f32,
    pub grid_height: f32,
    pub objects: Vec<ObjectsFileEntry>,
}

/// Single object within an [`ObjectsFile`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObjectsFileEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub cell_x: u32,
    pub cell_z: u32,
    pub width: u32,
    pub depth: u32,
    pub height: u32,
    pub scale: f32,
    pub rotation: f32,
    pub color: Color,
    pub file: String,
    pub height_offset: f32,
}

impl ObjectsFile {
    /// Captures the current object layout together with the grid geometry.
    pub(crate) fn from_world(world: &World) -> Self {
        let config = query::grid_config(world);
        Self {
            version: LAYOUT_VERSION.to_owned(),
            grid_size: config.size(),
            cell_size: config.cell_size(),
            grid_height: config.grid_height(),
            objects: query::object_view(world)
                .iter()
                .map(|object| {
                    let spec = object.spec();
                    ObjectsFileEntry {
                        kind: spec.kind.clone(),
                        cell_x: object.region().origin().x(),
                        cell_z: object.region().origin().z(),
                        width: spec.footprint.width(),
                        depth: spec.footprint.depth(),
                        height: spec.height,
                        scale: spec.scale,
                        rotation: spec.rotation,
                        color: spec.color,
                        file: if spec.custom {
                            CUSTOM_FILE_SENTINEL.to_owned()
                        } else {
                            spec.file.clone()
                        },
                        height_offset: spec.height_offset,
                    }
                })
                .collect(),
        }
    }

    /// Decomposes the layout into world commands: a clear followed by one
    /// placement per entry. Custom assets cannot be restored across sessions
    /// and are requested with a fallback representation.
    pub(crate) fn into_commands(self) -> Vec<Command> {
        let mut commands = vec![Command::ClearObjects];
        for entry in self.objects {
            let custom = entry.file == CUSTOM_FILE_SENTINEL;
            let asset = if custom {
                AssetStatus::Fallback
            } else {
                AssetStatus::Ready
            };
            commands.push(Command::PlaceObject {
                anchor: CellCoord::new(entry.cell_x, entry.cell_z),
                spec: ObjectSpec {
                    kind: entry.kind,
                    footprint: CellRectSize::new(entry.width, entry.depth),
                    height: entry.height,
                    scale: entry.scale,
                    rotation: entry.rotation,
                    color: entry.color,
                    file: if custom { String::new() } else { entry.file },
                    custom,
                    height_offset: entry.height_offset,
                },
                asset,
            });
        }
        commands
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharePayload {
    cell_size: f32,
    grid_height: f32,
    cells: Vec<GridFileCell>,
}

/// Errors that can occur while decoding share strings.
#[derive(Debug, Error)]
pub(crate) enum SceneTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("share string was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded string.
    #[error("share string is missing the prefix")]
    MissingPrefix,
    /// The encoded string did not contain a version segment.
    #[error("share string is missing the version")]
    MissingVersion,
    /// The encoded string did not include grid dimensions.
    #[error("share string is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded string did not include the payload segment.
    #[error("share string is missing the payload")]
    MissingPayload,
    /// The encoded string used an unexpected prefix segment.
    #[error("share prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded string used an unsupported version identifier.
    #[error("share version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed or were not square.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode share payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse share payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<u32, SceneTransferError> {
    let invalid = || SceneTransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    // The grid is square by construction; reject anything else.
    if columns == 0 || columns != rows {
        return Err(invalid());
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::Event;
    use gridwalk_world as world;

    fn sample_grid() -> GridFile {
        GridFile {
            grid_size: 12,
            cell_size: 1.0,
            grid_height: 0.1,
            cells: vec![
                GridFileCell {
                    x: 3,
                    z: 4,
                    classification: Classification::Walkable,
                    color: Color::from_hex(0x0000_ff00),
                },
                GridFileCell {
                    x: 5,
                    z: 5,
                    classification: Classification::Blocked,
                    color: Color::from_hex(0x00ff_0000),
                },
            ],
        }
    }

    #[test]
    fn grid_file_round_trips_through_json_with_camel_case_keys() {
        let file = sample_grid();
        let json = serde_json::to_string(&file).expect("serialize");
        assert!(json.contains("\"gridSize\":12"));
        assert!(json.contains("\"cellSize\":1.0"));
        assert!(json.contains("\"gridHeight\":0.1"));
        assert!(json.contains("\"classification\":\"walkable\""));

        let restored: GridFile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, file);
    }

    #[test]
    fn grid_file_round_trips_through_the_world() {
        let file = sample_grid();
        let mut world = world::World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::ImportGrid {
                snapshot: file.clone().into_snapshot(),
            },
            &mut events,
        );
        assert!(matches!(
            events.last(),
            Some(Event::GridImported {
                painted: 2,
                dropped: 0,
                ..
            })
        ));
        let exported = GridFile::from_snapshot(world::query::grid_snapshot(&world));
        assert_eq!(exported, file);
    }

    #[test]
    fn share_round_trip_empty_grid() {
        let file = GridFile {
            grid_size: 20,
            cell_size: 1.0,
            grid_height: 0.1,
            cells: Vec::new(),
        };
        let encoded = file.encode_share();
        assert!(encoded.starts_with(&format!("{SHARE_HEADER}:20x20:")));
        let decoded = GridFile::decode_share(&encoded).expect("share decodes");
        assert_eq!(decoded, file);
    }

    #[test]
    fn share_round_trip_populated_grid() {
        let file = sample_grid();
        let encoded = file.encode_share();
        assert!(encoded.starts_with(&format!("{SHARE_HEADER}:12x12:")));
        let decoded = GridFile::decode_share(&encoded).expect("share decodes");
        assert_eq!(decoded, file);
    }

    #[test]
    fn share_decode_reports_specific_failures() {
        assert!(matches!(
            GridFile::decode_share("   "),
            Err(SceneTransferError::EmptyPayload)
        ));
        assert!(matches!(
            GridFile::decode_share("maze:v1:4x4:e30"),
            Err(SceneTransferError::InvalidPrefix(prefix)) if prefix == "maze"
        ));
        assert!(matches!(
            GridFile::decode_share("grid:v2:4x4:e30"),
            Err(SceneTransferError::UnsupportedVersion(version)) if version == "v2"
        ));
        assert!(matches!(
            GridFile::decode_share("grid:v1:4x5:e30"),
            Err(SceneTransferError::InvalidDimensions(_))
        ));
        assert!(matches!(
            GridFile::decode_share("grid:v1:4x4"),
            Err(SceneTransferError::MissingPayload)
        ));
        assert!(matches!(
            GridFile::decode_share("grid:v1:4x4:!!!"),
            Err(SceneTransferError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn objects_file_uses_the_original_key_shape() {
        let file = ObjectsFile {
            version: LAYOUT_VERSION.to_owned(),
            grid_size: 20,
            cell_size: 1.0,
            grid_height: 0.1,
            objects: vec![ObjectsFileEntry {
                kind: "tree".to_owned(),
                cell_x: 2,
                cell_z: 3,
                width: 2,
                depth: 2,
                height: 4,
                scale: 1.0,
                rotation: 180.0,
                color: Color::from_hex(0x0000_ff00),
                file: "models/tree.gltf".to_owned(),
                height_offset: 0.0,
            }],
        };
        let json = serde_json::to_string(&file).expect("serialize");
        assert!(json.contains("\"version\":\"1.3\""));
        assert!(json.contains("\"type\":\"tree\""));
        assert!(json.contains("\"cellX\":2"));
        assert!(json.contains("\"cellZ\":3"));
        assert!(json.contains("\"heightOffset\":0.0"));

        let restored: ObjectsFile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, file);
    }

    #[test]
    fn custom_objects_export_the_sentinel_and_import_as_fallbacks() {
        let mut world = world::World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::PlaceObject {
                anchor: CellCoord::new(1, 1),
                spec: ObjectSpec {
                    kind: "statue".to_owned(),
                    footprint: CellRectSize::new(2, 2),
                    height: 2,
                    scale: 1.0,
                    rotation: 0.0,
                    color: Color::from_hex(0x00ff_ffff),
                    file: "blob:session-only".to_owned(),
                    custom: true,
                    height_offset: 0.0,
                },
                asset: AssetStatus::Ready,
            },
            &mut events,
        );

        let exported = ObjectsFile::from_world(&world);
        assert_eq!(exported.objects.len(), 1);
        assert_eq!(exported.objects[0].file, CUSTOM_FILE_SENTINEL);

        let commands = exported.into_commands();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], Command::ClearObjects));
        assert!(matches!(
            &commands[1],
            Command::PlaceObject {
                spec,
                asset: AssetStatus::Fallback,
                ..
            } if spec.custom && spec.file.is_empty()
        ));
    }

    #[test]
    fn layout_round_trips_through_the_world() {
        let mut world = world::World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::PlaceObject {
                anchor: CellCoord::new(0, 0),
                spec: ObjectSpec {
                    kind: "house".to_owned(),
                    footprint: CellRectSize::new(4, 4),
                    height: 3,
                    scale: 1.0,
                    rotation: 0.0,
                    color: Color::from_hex(0x00ff_aa00),
                    file: "models/house.gltf".to_owned(),
                    custom: false,
                    height_offset: 0.0,
                },
                asset: AssetStatus::Ready,
            },
            &mut events,
        );

        let exported = ObjectsFile::from_world(&world);
        let mut restored = world::World::new();
        for command in exported.clone().into_commands() {
            world::apply(&mut restored, command, &mut events);
        }
        assert_eq!(ObjectsFile::from_world(&restored), exported);
    }
}
