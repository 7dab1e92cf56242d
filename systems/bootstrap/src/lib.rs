#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Gridwalk scene.
//!
//! A [`Scenario`] is a declarative description of the grid, its paint, the
//! static objects and the actors. Adapters load it from configuration (the
//! CLI uses TOML) and hand it to [`Bootstrap::commands`], which derives the
//! initial command batch in a fixed order: grid geometry, paint strokes,
//! object placements, actor spawns. Route token strings stay with the
//! scenario; the adapter assigns them to the routing system once the spawn
//! events report the allocated actor identifiers, in scenario order.

use gridwalk_core::{
    AssetStatus, CellCoord, CellRectSize, Classification, Color, Command, Direction, ObjectSpec,
};
use serde::Deserialize;

const DEFAULT_GRID_SIZE: u32 = 20;
const DEFAULT_CELL_SIZE: f32 = 1.0;
const DEFAULT_GRID_HEIGHT: f32 = 0.1;
const DEFAULT_ACTOR_SPEED: f32 = 3.0;
const DEFAULT_ACTOR_HEIGHT_OFFSET: f32 = 1.0;

/// Declarative description of a scene used to boot the world.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Scenario {
    /// Grid geometry.
    #[serde(default)]
    pub grid: GridSettings,
    /// Paint strokes applied in order.
    #[serde(default)]
    pub paint: Vec<PaintStroke>,
    /// Static objects placed in order.
    #[serde(default)]
    pub objects: Vec<ObjectPlacement>,
    /// Actors spawned in order.
    #[serde(default)]
    pub actors: Vec<ActorSetup>,
}

/// Grid geometry settings.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridSettings {
    /// Number of cells along each edge of the square grid.
    pub size: u32,
    /// Edge length of a single cell in world units.
    pub cell_size: f32,
    /// Height of the grid plane above the world origin.
    pub grid_height: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            grid_height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// One brush application on the paint grid.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct PaintStroke {
    /// Brush centre, x coordinate.
    pub x: u32,
    /// Brush centre, z coordinate.
    pub z: u32,
    /// Classification stored for each painted cell.
    pub classification: Classification,
    /// Brush edge length in cells.
    #[serde(default = "one")]
    pub brush: u32,
    /// Explicit color; defaults to the classification's paint color.
    #[serde(default)]
    pub color: Option<Color>,
}

/// One static object placed on the grid.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ObjectPlacement {
    /// Human-readable type name, e.g. `"tree"`.
    pub kind: String,
    /// Anchor cell, x coordinate.
    pub cell_x: u32,
    /// Anchor cell, z coordinate.
    pub cell_z: u32,
    /// Footprint width in cells.
    #[serde(default = "one")]
    pub width: u32,
    /// Footprint depth in cells.
    #[serde(default = "one")]
    pub depth: u32,
    /// Visual height in cells.
    #[serde(default = "one")]
    pub height: u32,
    /// Uniform scale applied to the visual representation.
    #[serde(default = "unit")]
    pub scale: f32,
    /// Rotation around the vertical axis in degrees.
    #[serde(default)]
    pub rotation: f32,
    /// Explicit tint; defaults to white.
    #[serde(default)]
    pub color: Option<Color>,
    /// Asset reference resolved by the rendering collaborator.
    #[serde(default)]
    pub file: String,
    /// Marks a user-supplied asset.
    #[serde(default)]
    pub custom: bool,
    /// Presentation height above the grid plane, in cells.
    #[serde(default)]
    pub height_offset: f32,
}

/// One actor spawned into the scene.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ActorSetup {
    /// Spawn cell, x coordinate.
    pub x: u32,
    /// Spawn cell, z coordinate.
    pub z: u32,
    /// Movement speed in cells per second.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Initial facing; defaults to down.
    #[serde(default)]
    pub facing: Option<Direction>,
    /// Presentation height above the grid plane, in cells.
    #[serde(default = "default_height_offset")]
    pub height_offset: f32,
    /// Route tokens executed once before the cycle.
    #[serde(default)]
    pub prefix: Vec<String>,
    /// Route tokens repeated indefinitely.
    #[serde(default)]
    pub cycle: Vec<String>,
}

fn one() -> u32 {
    1
}

fn unit() -> f32 {
    1.0
}

fn default_speed() -> f32 {
    DEFAULT_ACTOR_SPEED
}

fn default_height_offset() -> f32 {
    DEFAULT_ACTOR_HEIGHT_OFFSET
}

/// Derives the initial command batch for a scenario.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Creates a new bootstrap system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Produces the command batch that realises the scenario: grid geometry
    /// first, then paint, then objects, then actors.
    ///
    /// Objects without an asset reference are flagged as needing a fallback
    /// representation; the headless adapter has no loader to consult.
    #[must_use]
    pub fn commands(&self, scenario: &Scenario) -> Vec<Command> {
        let mut commands = vec![Command::ConfigureGrid {
            size: scenario.grid.size,
            cell_size: scenario.grid.cell_size,
            grid_height: scenario.grid.grid_height,
        }];

        for stroke in &scenario.paint {
            commands.push(Command::PaintCells {
                center: CellCoord::new(stroke.x, stroke.z),
                brush: stroke.brush,
                classification: stroke.classification,
                color: stroke
                    .color
                    .unwrap_or_else(|| stroke.classification.default_color()),
            });
        }

        for object in &scenario.objects {
            let asset = if object.file.is_empty() {
                AssetStatus::Fallback
            } else {
                AssetStatus::Ready
            };
            commands.push(Command::PlaceObject {
                anchor: CellCoord::new(object.cell_x, object.cell_z),
                spec: ObjectSpec {
                    kind: object.kind.clone(),
                    footprint: CellRectSize::new(object.width, object.depth),
                    height: object.height,
                    scale: object.scale,
                    rotation: object.rotation,
                    color: object.color.unwrap_or(Color::from_hex(0x00ff_ffff)),
                    file: object.file.clone(),
                    custom: object.custom,
                    height_offset: object.height_offset,
                },
                asset,
            });
        }

        for actor in &scenario.actors {
            commands.push(Command::SpawnActor {
                cell: CellCoord::new(actor.x, actor.z),
                facing: actor.facing.unwrap_or(Direction::Down),
                speed: actor.speed,
                height_offset: actor.height_offset,
            });
        }

        commands
    }
}
