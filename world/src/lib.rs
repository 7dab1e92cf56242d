#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Gridwalk.
//!
//! The world owns the paint grid, the static-object occupancy index and all
//! actor movement state. Adapters and systems mutate it exclusively through
//! [`apply`] and observe it through the broadcast [`Event`]s and the
//! read-only [`query`] functions. Everything is tick-driven and
//! deterministic: cooldowns are plain counters advanced by the tick's `dt`,
//! never wall-clock timers.

mod grid;
mod objects;
mod portal;

use std::time::Duration;

use gridwalk_core::{
    ActorId, CellClass, CellCoord, CellRect, Classification, Command, Direction, Event,
    MoveError, MoveSource, WELCOME_BANNER,
};

pub use crate::grid::GridConfig;
pub use crate::objects::PlacedObject;

use crate::grid::{brush_cells, GridModel};
use crate::objects::OccupancyIndex;
use crate::portal::PortalTrigger;

/// Delay applied after each arrival before the counter runs out. The counter
/// is observable through snapshots but never gates new requests: a request
/// is only ever evaluated while the actor is idle.
const MOVE_COOLDOWN: Duration = Duration::from_millis(300);

/// Represents the authoritative Gridwalk world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: GridModel,
    objects: OccupancyIndex,
    actors: Vec<Actor>,
    next_actor: u32,
    portal: PortalTrigger,
}

impl World {
    /// Creates a new world with the default grid geometry and no inhabitants.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: GridModel::new(GridConfig::default()),
            objects: OccupancyIndex::new(),
            actors: Vec::new(),
            next_actor: 0,
            portal: PortalTrigger::new(),
        }
    }

    fn spawn_actor(
        &mut self,
        cell: CellCoord,
        facing: Direction,
        speed: f32,
        height_offset: f32,
        out_events: &mut Vec<Event>,
    ) {
        if !self.grid.config().contains(cell) {
            return;
        }
        let id = ActorId::new(self.next_actor);
        self.next_actor = self.next_actor.wrapping_add(1);
        self.actors.push(Actor {
            id,
            cell,
            facing,
            speed,
            height_offset,
            target: None,
            progress: 0.0,
            move_cooldown: Duration::ZERO,
        });
        out_events.push(Event::ActorSpawned {
            actor: id,
            cell,
            facing,
        });
    }

    fn begin_move(
        &mut self,
        actor_id: ActorId,
        direction: Direction,
        source: MoveSource,
        out_events: &mut Vec<Event>,
    ) {
        let grid = &self.grid;
        let Some(actor) = self.actors.iter_mut().find(|actor| actor.id == actor_id) else {
            return;
        };

        // At most one in-flight transition per actor; excess requests are
        // dropped without an event.
        if actor.target.is_some() {
            return;
        }

        let target = actor.cell.step(direction).filter(|cell| grid.config().contains(*cell));
        let Some(target) = target else {
            out_events.push(Event::MovementRejected {
                actor: actor_id,
                direction,
                reason: MoveError::OutOfBounds,
            });
            return;
        };

        if !grid.can_enter(target) {
            out_events.push(Event::MovementRejected {
                actor: actor_id,
                direction,
                reason: MoveError::CellBlocked,
            });
            return;
        }

        let from = actor.cell;
        actor.target = Some(target);
        actor.progress = 0.0;
        actor.facing = direction;
        out_events.push(Event::MovementStarted {
            actor: actor_id,
            from,
            to: target,
            direction,
            source,
        });
    }

    fn advance_time(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });
        self.portal.tick(dt);

        // Integrate every moving actor first; arrival side effects fire
        // afterwards, in actor-id order.
        let mut arrivals: Vec<(ActorId, CellCoord)> = Vec::new();
        for actor in &mut self.actors {
            actor.move_cooldown = actor.move_cooldown.saturating_sub(dt);
            let Some(target) = actor.target else {
                continue;
            };

            actor.progress += actor.speed * dt.as_secs_f32();
            if actor.progress >= 1.0 {
                actor.cell = target;
                actor.target = None;
                actor.progress = 0.0;
                actor.move_cooldown = MOVE_COOLDOWN;
                arrivals.push((actor.id, target));
            } else {
                out_events.push(Event::MovementProgress {
                    actor: actor.id,
                    fraction: actor.progress,
                });
            }
        }

        for (actor, cell) in arrivals {
            out_events.push(Event::MovementCompleted { actor, cell });
            if self.portal.ready()
                && self.grid.classification(cell) == CellClass::Terrain(Classification::Blocked)
            {
                out_events.push(Event::PortalActivated { actor, cell });
                self.portal.arm();
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid {
            size,
            cell_size,
            grid_height,
        } => {
            world
                .grid
                .reconfigure(GridConfig::new(size, cell_size, grid_height));
            out_events.push(Event::GridConfigured {
                size,
                cell_size,
                grid_height,
            });
        }
        Command::PaintCells {
            center,
            brush,
            classification,
            color,
        } => {
            for cell in brush_cells(center, brush, world.grid.config().size()) {
                if world.grid.paint(cell, classification, color) {
                    out_events.push(Event::CellPainted {
                        cell,
                        classification,
                        color,
                    });
                }
            }
        }
        Command::EraseCells { center, brush } => {
            for cell in brush_cells(center, brush, world.grid.config().size()) {
                if world.grid.erase(cell) {
                    out_events.push(Event::CellErased { cell });
                }
            }
        }
        Command::ClearPaint => {
            let cells = world.grid.clear();
            out_events.push(Event::PaintCleared { cells });
        }
        Command::ImportGrid { snapshot } => {
            let size = snapshot.grid_size;
            let (painted, dropped) = world.grid.replace(snapshot);
            out_events.push(Event::GridImported {
                size,
                painted,
                dropped,
            });
        }
        Command::SpawnActor {
            cell,
            facing,
            speed,
            height_offset,
        } => {
            world.spawn_actor(cell, facing, speed, height_offset, out_events);
        }
        Command::Move {
            actor,
            direction,
            source,
        } => {
            world.begin_move(actor, direction, source, out_events);
        }
        Command::Tick { dt } => {
            world.advance_time(dt, out_events);
        }
        Command::PlaceObject {
            anchor,
            spec,
            asset,
        } => {
            let footprint = spec.footprint;
            match world
                .objects
                .place(world.grid.config().size(), anchor, spec, asset)
            {
                Ok(object) => {
                    out_events.push(Event::ObjectPlaced {
                        object,
                        region: CellRect::from_origin_and_size(anchor, footprint),
                        asset,
                    });
                }
                Err(reason) => {
                    out_events.push(Event::PlacementRejected {
                        anchor,
                        footprint,
                        reason,
                    });
                }
            }
        }
        Command::RemoveObjectAt { cell } => {
            if let Some(removed) = world.objects.remove_at(cell) {
                out_events.push(Event::ObjectRemoved {
                    object: removed.id(),
                    region: removed.region(),
                });
            }
        }
        Command::RemoveObject { object } => {
            if let Some(removed) = world.objects.remove(object) {
                out_events.push(Event::ObjectRemoved {
                    object: removed.id(),
                    region: removed.region(),
                });
            }
        }
        Command::ClearObjects => {
            let count = world.objects.clear();
            out_events.push(Event::ObjectsCleared { count });
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Actor {
    id: ActorId,
    cell: CellCoord,
    facing: Direction,
    speed: f32,
    height_offset: f32,
    target: Option<CellCoord>,
    progress: f32,
    move_cooldown: Duration,
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Actor, GridConfig, PlacedObject, World};
    use gridwalk_core::{
        ActorId, CellClass, CellCoord, CellRectSize, Color, Direction, GridSnapshot, ObjectId,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the grid geometry currently in force.
    #[must_use]
    pub fn grid_config(world: &World) -> GridConfig {
        world.grid.config()
    }

    /// Classifies the coordinate against bounds and paint state.
    #[must_use]
    pub fn classification(world: &World, cell: CellCoord) -> CellClass {
        world.grid.classification(cell)
    }

    /// Color stored for the cell, or the `Empty` default when unpainted.
    #[must_use]
    pub fn cell_color(world: &World, cell: CellCoord) -> Color {
        world.grid.color(cell)
    }

    /// Applies the traversal rule to the coordinate.
    #[must_use]
    pub fn can_enter(world: &World, cell: CellCoord) -> bool {
        world.grid.can_enter(cell)
    }

    /// Number of cells currently carrying a paint entry.
    #[must_use]
    pub fn painted_cells(world: &World) -> usize {
        world.grid.painted_len()
    }

    /// Captures the paint state and geometry for export.
    #[must_use]
    pub fn grid_snapshot(world: &World) -> GridSnapshot {
        world.grid.snapshot()
    }

    /// Centre of the cell on the grid plane, in world units.
    #[must_use]
    pub fn world_pos_from_cell(world: &World, cell: CellCoord) -> (f32, f32) {
        world.grid.config().world_pos_from_cell(cell)
    }

    /// Cell containing the provided world-plane position, if any.
    #[must_use]
    pub fn cell_from_world_pos(world: &World, x: f32, z: f32) -> Option<CellCoord> {
        world.grid.config().cell_from_world_pos(x, z)
    }

    /// Captures a read-only view of all actors.
    #[must_use]
    pub fn actor_view(world: &World) -> ActorView {
        let config = world.grid.config();
        let mut snapshots: Vec<ActorSnapshot> = world
            .actors
            .iter()
            .map(|actor| ActorSnapshot {
                id: actor.id,
                cell: actor.cell,
                target: actor.target,
                progress: actor.progress,
                facing: actor.facing,
                speed: actor.speed,
                is_moving: actor.target.is_some(),
                move_cooldown: actor.move_cooldown,
                position: world_position(config, actor),
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        ActorView { snapshots }
    }

    /// Captures the placed objects in identity order.
    #[must_use]
    pub fn object_view(world: &World) -> Vec<PlacedObject> {
        world.objects.iter().cloned().collect()
    }

    /// Returns the object whose footprint covers the cell, if any.
    #[must_use]
    pub fn object_at(world: &World, cell: CellCoord) -> Option<ObjectId> {
        world.objects.object_at(cell)
    }

    /// Number of objects currently placed.
    #[must_use]
    pub fn object_count(world: &World) -> usize {
        world.objects.len()
    }

    /// Reports whether the rectangle is in bounds and free of footprints.
    #[must_use]
    pub fn is_area_free(world: &World, anchor: CellCoord, size: CellRectSize) -> bool {
        world
            .objects
            .is_free(world.grid.config().size(), anchor, size)
    }

    /// Remaining portal suppression window; zero when the trigger is ready.
    #[must_use]
    pub fn portal_cooldown(world: &World) -> Duration {
        world.portal.remaining()
    }

    fn world_position(config: GridConfig, actor: &Actor) -> WorldPosition {
        let (start_x, start_z) = config.world_pos_from_cell(actor.cell);
        let y = config.grid_height() + actor.height_offset;
        match actor.target {
            None => WorldPosition {
                x: start_x,
                y,
                z: start_z,
            },
            Some(target) => {
                let (end_x, end_z) = config.world_pos_from_cell(target);
                WorldPosition {
                    x: start_x + (end_x - start_x) * actor.progress,
                    y,
                    z: start_z + (end_z - start_z) * actor.progress,
                }
            }
        }
    }

    /// Read-only snapshot describing all actors in deterministic order.
    #[derive(Clone, Debug, Default)]
    pub struct ActorView {
        snapshots: Vec<ActorSnapshot>,
    }

    impl ActorView {
        /// Iterator over the captured actor snapshots in identity order.
        pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
            self.snapshots.iter()
        }

        /// Looks up the snapshot of a single actor.
        #[must_use]
        pub fn get(&self, actor: ActorId) -> Option<&ActorSnapshot> {
            self.snapshots.iter().find(|snapshot| snapshot.id == actor)
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<ActorSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single actor's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ActorSnapshot {
        /// Unique identifier assigned to the actor.
        pub id: ActorId,
        /// Cell the actor currently occupies (the origin while moving).
        pub cell: CellCoord,
        /// Destination cell of the in-flight transition, if any.
        pub target: Option<CellCoord>,
        /// Completed fraction of the in-flight transition, in `[0, 1)`.
        pub progress: f32,
        /// Direction the actor faces.
        pub facing: Direction,
        /// Movement speed in cells per second.
        pub speed: f32,
        /// Whether a transition is in flight. Always equals `target.is_some()`.
        pub is_moving: bool,
        /// Remaining post-arrival delay; observability only, never a gate.
        pub move_cooldown: Duration,
        /// Interpolated presentation position in world units.
        pub position: WorldPosition,
    }

    /// Position on the grid plane expressed in world units.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct WorldPosition {
        /// Position along the world x axis.
        pub x: f32,
        /// Height above the world origin.
        pub y: f32,
        /// Position along the world z axis.
        pub z: f32,
    }
}
