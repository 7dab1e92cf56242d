#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridwalk engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Gridwalk.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the grid plane, retaining any paint that stays in bounds.
    ConfigureGrid {
        /// Number of cells along each edge of the square grid.
        size: u32,
        /// Edge length of a single cell in world units.
        cell_size: f32,
        /// Height of the grid plane above the world origin.
        grid_height: f32,
    },
    /// Paints every in-bounds cell of a square brush centred on a cell.
    PaintCells {
        /// Cell at the centre of the brush.
        center: CellCoord,
        /// Brush edge length in cells; the painted square spans
        /// `center ± brush / 2` on both axes.
        brush: u32,
        /// Classification stored for each painted cell.
        classification: Classification,
        /// Color stored alongside the classification.
        color: Color,
    },
    /// Erases every in-bounds cell of a square brush centred on a cell.
    EraseCells {
        /// Cell at the centre of the brush.
        center: CellCoord,
        /// Brush edge length in cells.
        brush: u32,
    },
    /// Removes all painted cells, reverting the grid to `Empty`.
    ClearPaint,
    /// Replaces the entire paint state and grid geometry from a snapshot.
    ImportGrid {
        /// Snapshot that becomes the new authoritative paint state.
        snapshot: GridSnapshot,
    },
    /// Creates an actor at the provided spawn cell.
    SpawnActor {
        /// Cell the actor occupies after spawning.
        cell: CellCoord,
        /// Direction the actor initially faces.
        facing: Direction,
        /// Movement speed in cells per second.
        speed: f32,
        /// Presentation height above the grid plane, in cells.
        height_offset: f32,
    },
    /// Requests that an actor begin a one-cell move in a direction.
    Move {
        /// Identifier of the actor attempting to move.
        actor: ActorId,
        /// Direction of the attempted move.
        direction: Direction,
        /// Origin of the request, used for route latching.
        source: MoveSource,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a static object anchored at a cell.
    PlaceObject {
        /// Upper-left cell of the object's footprint.
        anchor: CellCoord,
        /// Description of the object to place.
        spec: ObjectSpec,
        /// Whether the object's external visual loaded successfully.
        asset: AssetStatus,
    },
    /// Removes the object whose footprint covers the provided cell, if any.
    RemoveObjectAt {
        /// Cell used for the hit test.
        cell: CellCoord,
    },
    /// Removes the object with the provided identity, if it exists.
    RemoveObject {
        /// Identifier of the object targeted for removal.
        object: ObjectId,
    },
    /// Removes every placed object.
    ClearObjects,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the grid plane was reconfigured.
    GridConfigured {
        /// Number of cells along each edge of the square grid.
        size: u32,
        /// Edge length of a single cell in world units.
        cell_size: f32,
        /// Height of the grid plane above the world origin.
        grid_height: f32,
    },
    /// Confirms that a single cell received a paint entry.
    CellPainted {
        /// Cell that was painted.
        cell: CellCoord,
        /// Classification stored for the cell.
        classification: Classification,
        /// Color stored alongside the classification.
        color: Color,
    },
    /// Confirms that a single cell's paint entry was removed.
    CellErased {
        /// Cell that reverted to `Empty`.
        cell: CellCoord,
    },
    /// Confirms that all paint entries were removed.
    PaintCleared {
        /// Number of entries that were removed.
        cells: usize,
    },
    /// Confirms that a snapshot replaced the paint state.
    GridImported {
        /// Edge length of the imported grid in cells.
        size: u32,
        /// Number of cells restored from the snapshot.
        painted: usize,
        /// Number of snapshot cells dropped for being out of bounds.
        dropped: usize,
    },
    /// Confirms that an actor was created.
    ActorSpawned {
        /// Identifier assigned to the new actor.
        actor: ActorId,
        /// Cell the actor occupies after spawning.
        cell: CellCoord,
        /// Direction the actor initially faces.
        facing: Direction,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an actor began a one-cell transition.
    MovementStarted {
        /// Identifier of the moving actor.
        actor: ActorId,
        /// Cell the actor occupied when the move began.
        from: CellCoord,
        /// Cell the actor is moving toward.
        to: CellCoord,
        /// Direction of travel.
        direction: Direction,
        /// Origin of the accepted request.
        source: MoveSource,
    },
    /// Reports interpolation progress for an in-flight transition.
    MovementProgress {
        /// Identifier of the moving actor.
        actor: ActorId,
        /// Completed fraction of the transition, in `[0, 1)`.
        fraction: f32,
    },
    /// Confirms that an actor finished a one-cell transition.
    MovementCompleted {
        /// Identifier of the actor that arrived.
        actor: ActorId,
        /// Cell the actor now occupies.
        cell: CellCoord,
    },
    /// Reports that a movement request targeted a cell that cannot be entered.
    MovementRejected {
        /// Identifier of the actor whose request was rejected.
        actor: ActorId,
        /// Direction of the rejected request.
        direction: Direction,
        /// Specific reason the request failed.
        reason: MoveError,
    },
    /// Announces that an actor arrived on a portal cell.
    PortalActivated {
        /// Identifier of the actor that triggered the portal.
        actor: ActorId,
        /// Portal cell the actor arrived on.
        cell: CellCoord,
    },
    /// Confirms that a static object was placed into the world.
    ObjectPlaced {
        /// Identifier assigned to the object by the world.
        object: ObjectId,
        /// Region of cells occupied by the object.
        region: CellRect,
        /// Whether the object's external visual loaded successfully.
        asset: AssetStatus,
    },
    /// Reports that an object placement request was rejected.
    PlacementRejected {
        /// Anchor cell provided in the placement request.
        anchor: CellCoord,
        /// Footprint requested for the object.
        footprint: CellRectSize,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a static object was removed from the world.
    ObjectRemoved {
        /// Identifier of the object that was removed.
        object: ObjectId,
        /// Region of cells previously occupied by the object.
        region: CellRect,
    },
    /// Confirms that every placed object was removed.
    ObjectsCleared {
        /// Number of objects that were removed.
        count: usize,
    },
}

/// Unique identifier assigned to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a placed object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as x and z coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    z: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }

    /// Zero-based x index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based z index of the cell.
    #[must_use]
    pub const fn z(&self) -> u32 {
        self.z
    }

    /// Returns the neighbouring cell in the provided direction, or `None`
    /// when the step would leave the coordinate space.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::Up => self.z.checked_sub(1).map(|z| CellCoord::new(self.x, z)),
            Direction::Down => self.z.checked_add(1).map(|z| CellCoord::new(self.x, z)),
            Direction::Left => self.x.checked_sub(1).map(|x| CellCoord::new(x, self.z)),
            Direction::Right => self.x.checked_add(1).map(|x| CellCoord::new(x, self.z)),
        }
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing z indices.
    Up,
    /// Movement toward increasing z indices.
    Down,
    /// Movement toward decreasing x indices.
    Left,
    /// Movement toward increasing x indices.
    Right,
}

impl Direction {
    /// Parses a route token into a direction, rejecting unknown spellings.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Origin of a movement request, distinguishing player input from routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveSource {
    /// The request came from manual player input.
    Manual,
    /// The request came from a scripted route.
    Scripted,
}

/// Traversal classification stored for a painted cell.
///
/// `Blocked` is deliberately overloaded to mean "portal": it is traversable
/// and arriving on it triggers a scene transition. All other non-`Walkable`
/// classifications deny entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Default for any unpainted coordinate; never traversable.
    Empty,
    /// Ordinary traversable terrain.
    Walkable,
    /// Portal cell; traversable and fires a transition on arrival.
    Blocked,
    /// Water terrain; denies entry.
    Water,
    /// Hazardous terrain; denies entry.
    Danger,
    /// Scenario-specific terrain; denies entry.
    Special,
}

impl Classification {
    /// Reports whether an actor may enter a cell with this classification.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Walkable | Self::Blocked)
    }

    /// Default paint color associated with the classification.
    #[must_use]
    pub const fn default_color(self) -> Color {
        match self {
            Self::Empty => Color::from_hex(0x0088_8888),
            Self::Walkable => Color::from_hex(0x0000_ff00),
            Self::Blocked => Color::from_hex(0x00ff_0000),
            Self::Water => Color::from_hex(0x0000_00ff),
            Self::Danger => Color::from_hex(0x00ff_ff00),
            Self::Special => Color::from_hex(0x00ff_00ff),
        }
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::Empty
    }
}

/// Result of classifying a coordinate against the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// The coordinate lies outside the configured grid bounds.
    OutOfBounds,
    /// The coordinate is in bounds and carries the contained classification.
    Terrain(Classification),
}

impl CellClass {
    /// Applies the traversal rule: enterable iff in bounds and the
    /// classification is traversable.
    #[must_use]
    pub const fn allows_entry(self) -> bool {
        match self {
            Self::OutOfBounds => false,
            Self::Terrain(classification) => classification.is_traversable(),
        }
    }
}

/// Packed `0xRRGGBB` color stored for painted cells and placed objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    /// Creates a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the packed `0xRRGGBB` value.
    #[must_use]
    pub const fn hex(&self) -> u32 {
        self.0
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Reports whether the rectangle covers the provided cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let x = u64::from(cell.x());
        let z = u64::from(cell.z());
        x >= u64::from(self.origin.x())
            && x < u64::from(self.origin.x()) + u64::from(self.size.width())
            && z >= u64::from(self.origin.z())
            && z < u64::from(self.origin.z()) + u64::from(self.size.depth())
    }

    /// Reports whether two rectangles share at least one cell.
    #[must_use]
    pub fn intersects(&self, other: &CellRect) -> bool {
        let self_end_x = u64::from(self.origin.x()) + u64::from(self.size.width());
        let self_end_z = u64::from(self.origin.z()) + u64::from(self.size.depth());
        let other_end_x = u64::from(other.origin.x()) + u64::from(other.size.width());
        let other_end_z = u64::from(other.origin.z()) + u64::from(other.size.depth());

        u64::from(self.origin.x()) < other_end_x
            && u64::from(other.origin.x()) < self_end_x
            && u64::from(self.origin.z()) < other_end_z
            && u64::from(other.origin.z()) < self_end_z
    }

    /// Reports whether the rectangle lies entirely within a square grid of
    /// the provided edge length.
    #[must_use]
    pub fn fits_within(&self, grid_size: u32) -> bool {
        u64::from(self.origin.x()) + u64::from(self.size.width()) <= u64::from(grid_size)
            && u64::from(self.origin.z()) + u64::from(self.size.depth()) <= u64::from(grid_size)
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    depth: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }

    /// Width of the rectangle in cells, along the x axis.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Depth of the rectangle in cells, along the z axis.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }
}

/// Description of a static object submitted with a placement request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Human-readable type name, e.g. `"tree"`.
    pub kind: String,
    /// Footprint of the object in cells.
    pub footprint: CellRectSize,
    /// Visual height of the object in cells.
    pub height: u32,
    /// Uniform scale applied to the visual representation.
    pub scale: f32,
    /// Rotation around the vertical axis in degrees, `0..=360`.
    pub rotation: f32,
    /// Tint applied to fallback representations.
    pub color: Color,
    /// Asset reference resolved by the rendering collaborator.
    pub file: String,
    /// Marks a user-supplied asset whose reference is session-local.
    pub custom: bool,
    /// Presentation height above the grid plane, in cells.
    pub height_offset: f32,
}

/// Whether an object's external visual representation loaded successfully.
///
/// A failed load never fails the placement; the spatial record exists either
/// way and carries this signal for the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// The external asset loaded and the object renders normally.
    Ready,
    /// The external asset is unavailable; a fallback representation is needed.
    Fallback,
}

impl AssetStatus {
    /// Reports whether the object needs a fallback representation.
    #[must_use]
    pub const fn needs_fallback(self) -> bool {
        matches!(self, Self::Fallback)
    }
}

/// Reasons an object placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested footprint extends beyond the configured grid bounds.
    OutOfBounds,
    /// The requested footprint overlaps an existing object.
    AreaOccupied,
}

/// Reasons a movement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveError {
    /// The target coordinate lies outside the configured grid bounds.
    OutOfBounds,
    /// The target cell's classification denies entry.
    CellBlocked,
}

/// Snapshot of the grid geometry and every painted cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Number of cells along each edge of the square grid.
    pub grid_size: u32,
    /// Edge length of a single cell in world units.
    pub cell_size: f32,
    /// Height of the grid plane above the world origin.
    pub grid_height: f32,
    /// Painted cells, ordered deterministically by coordinate.
    pub cells: Vec<GridSnapshotCell>,
}

/// Single painted cell captured within a [`GridSnapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshotCell {
    /// Coordinate of the painted cell.
    pub cell: CellCoord,
    /// Classification stored for the cell.
    pub classification: Classification,
    /// Color stored alongside the classification.
    pub color: Color,
}

/// Snapshot of which directions are currently requested by the player.
///
/// Adapters capture one snapshot per tick from their input source; the core
/// never reads global input state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputSnapshot {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl InputSnapshot {
    /// Creates a snapshot from explicit per-direction flags.
    #[must_use]
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Creates a snapshot with exactly one direction requested.
    #[must_use]
    pub const fn pressing(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(true, false, false, false),
            Direction::Down => Self::new(false, true, false, false),
            Direction::Left => Self::new(false, false, true, false),
            Direction::Right => Self::new(false, false, false, true),
        }
    }

    /// Resolves the snapshot to at most one direction.
    ///
    /// When several directions are held simultaneously the priority is
    /// up, down, left, right.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AssetStatus, CellClass, CellCoord, CellRect, CellRectSize, Classification, Color,
        Direction, GridSnapshot, GridSnapshotCell, InputSnapshot, MoveError, ObjectId,
        PlacementError,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_respects_coordinate_space() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Down), Some(CellCoord::new(0, 1)));
        assert_eq!(corner.step(Direction::Right), Some(CellCoord::new(1, 0)));
    }

    #[test]
    fn traversal_rule_admits_walkable_and_portal_cells_only() {
        assert!(Classification::Walkable.is_traversable());
        assert!(Classification::Blocked.is_traversable());
        assert!(!Classification::Empty.is_traversable());
        assert!(!Classification::Water.is_traversable());
        assert!(!Classification::Danger.is_traversable());
        assert!(!Classification::Special.is_traversable());
        assert!(!CellClass::OutOfBounds.allows_entry());
        assert!(CellClass::Terrain(Classification::Blocked).allows_entry());
    }

    #[test]
    fn rect_containment_and_intersection() {
        let rect = CellRect::from_origin_and_size(CellCoord::new(2, 2), CellRectSize::new(2, 3));
        assert!(rect.contains(CellCoord::new(2, 2)));
        assert!(rect.contains(CellCoord::new(3, 4)));
        assert!(!rect.contains(CellCoord::new(4, 2)));
        assert!(!rect.contains(CellCoord::new(2, 5)));

        let overlapping =
            CellRect::from_origin_and_size(CellCoord::new(3, 4), CellRectSize::new(2, 2));
        let disjoint = CellRect::from_origin_and_size(CellCoord::new(4, 2), CellRectSize::new(1, 1));
        assert!(rect.intersects(&overlapping));
        assert!(overlapping.intersects(&rect));
        assert!(!rect.intersects(&disjoint));
    }

    #[test]
    fn rect_bounds_check_uses_whole_footprint() {
        let rect = CellRect::from_origin_and_size(CellCoord::new(4, 4), CellRectSize::new(2, 2));
        assert!(rect.fits_within(6));
        assert!(!rect.fits_within(5));
    }

    #[test]
    fn input_snapshot_resolution_priority() {
        assert_eq!(InputSnapshot::default().direction(), None);
        assert_eq!(
            InputSnapshot::new(true, true, true, true).direction(),
            Some(Direction::Up)
        );
        assert_eq!(
            InputSnapshot::new(false, true, true, false).direction(),
            Some(Direction::Down)
        );
        assert_eq!(
            InputSnapshot::pressing(Direction::Right).direction(),
            Some(Direction::Right)
        );
    }

    #[test]
    fn route_tokens_parse_known_spellings_only() {
        assert_eq!(Direction::from_token("up"), Some(Direction::Up));
        assert_eq!(Direction::from_token("right"), Some(Direction::Right));
        assert_eq!(Direction::from_token("Up"), None);
        assert_eq!(Direction::from_token("jump"), None);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn object_id_round_trips_through_bincode() {
        assert_round_trip(&ObjectId::new(42));
    }

    #[test]
    fn classification_round_trips_through_bincode() {
        assert_round_trip(&Classification::Blocked);
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::AreaOccupied);
    }

    #[test]
    fn move_error_round_trips_through_bincode() {
        assert_round_trip(&MoveError::CellBlocked);
    }

    #[test]
    fn asset_status_round_trips_through_bincode() {
        assert_round_trip(&AssetStatus::Fallback);
    }

    #[test]
    fn grid_snapshot_round_trips_through_bincode() {
        let snapshot = GridSnapshot {
            grid_size: 5,
            cell_size: 1.0,
            grid_height: 0.1,
            cells: vec![GridSnapshotCell {
                cell: CellCoord::new(1, 2),
                classification: Classification::Walkable,
                color: Color::from_hex(0x0000_ff00),
            }],
        };
        assert_round_trip(&snapshot);
    }
}
