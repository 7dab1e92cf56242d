#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless Gridwalk scene.
//!
//! The adapter owns everything the core treats as external: scenario
//! configuration, JSON import/export, the share-string clipboard format,
//! per-tick input capture and event logging. Each tick follows the canonical
//! order: manual input first, then the route interpreter, then time
//! integration with its arrival side effects.

mod scene_transfer;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use gridwalk_core::{Command as WorldCommand, Direction, Event, InputSnapshot};
use gridwalk_system_bootstrap::{Bootstrap, Scenario};
use gridwalk_system_control::Control;
use gridwalk_system_routing::{Routing, RouteScript};
use gridwalk_world::{self as world, query, World};

use crate::scene_transfer::{GridFile, ObjectsFile};

/// Command-line arguments accepted by the `gridwalk` binary.
#[derive(Debug, Parser)]
#[command(name = "gridwalk", about = "Headless Gridwalk scene runner")]
struct Args {
    /// TOML scenario describing the grid, paint, objects and actors.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Navigation grid JSON imported before the run, replacing scenario paint.
    #[arg(long)]
    grid: Option<PathBuf>,
    /// Scene objects JSON imported before the run, replacing scenario objects.
    #[arg(long)]
    objects: Option<PathBuf>,
    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 120)]
    ticks: u32,
    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 100)]
    dt_ms: u64,
    /// Manual direction tokens, one per tick (e.g. `right,right,up`).
    #[arg(long, value_delimiter = ',')]
    walk: Vec<String>,
    /// Write the final paint state to this JSON file.
    #[arg(long)]
    export_grid: Option<PathBuf>,
    /// Write the final object layout to this JSON file.
    #[arg(long)]
    export_objects: Option<PathBuf>,
    /// Print a single-line share string for the final grid.
    #[arg(long)]
    share: bool,
    /// Decode a share string and print its summary instead of running.
    #[arg(long)]
    decode: Option<String>,
}

/// Entry point for the Gridwalk command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(encoded) = &args.decode {
        let file = GridFile::decode_share(encoded)?;
        println!(
            "grid {}x{} ({} painted cells, cell size {}, height {})",
            file.grid_size, file.grid_size, file.cells.len(), file.cell_size, file.grid_height,
        );
        return Ok(());
    }

    let mut world = World::new();
    println!("{}", query::welcome_banner(&world));

    let scenario = load_scenario(args.scenario.as_deref())?;
    let mut routing = Routing::new();
    boot(&mut world, &mut routing, &scenario);
    import_files(&mut world, &args)?;

    run(&mut world, &mut routing, &args);
    report_final_state(&world);

    if let Some(path) = &args.export_grid {
        let file = GridFile::from_snapshot(query::grid_snapshot(&world));
        write_json(path, &file)?;
    }
    if let Some(path) = &args.export_objects {
        let file = ObjectsFile::from_world(&world);
        write_json(path, &file)?;
    }
    if args.share {
        let file = GridFile::from_snapshot(query::grid_snapshot(&world));
        println!("{}", file.encode_share());
    }

    Ok(())
}

fn load_scenario(path: Option<&Path>) -> Result<Scenario> {
    let Some(path) = path else {
        return Ok(Scenario::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read scenario {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("could not parse scenario {}", path.display()))
}

/// Applies the scenario's command batch and assigns route scripts by zipping
/// spawn events with the scenario's actor entries, which the world allocates
/// in order.
fn boot(world: &mut World, routing: &mut Routing, scenario: &Scenario) {
    let mut events = Vec::new();
    for command in Bootstrap::new().commands(scenario) {
        world::apply(world, command, &mut events);
    }

    let spawned = events.iter().filter_map(|event| match event {
        Event::ActorSpawned { actor, .. } => Some(*actor),
        _ => None,
    });
    for (actor, setup) in spawned.zip(&scenario.actors) {
        routing.assign(actor, RouteScript::parse(&setup.prefix, &setup.cycle));
    }

    report_events(&events);
}

fn import_files(world: &mut World, args: &Args) -> Result<()> {
    let mut events = Vec::new();
    if let Some(path) = &args.grid {
        let file: GridFile = read_json(path)?;
        world::apply(
            world,
            WorldCommand::ImportGrid {
                snapshot: file.into_snapshot(),
            },
            &mut events,
        );
    }
    if let Some(path) = &args.objects {
        let file: ObjectsFile = read_json(path)?;
        for command in file.into_commands() {
            world::apply(world, command, &mut events);
        }
    }
    report_events(&events);
    Ok(())
}

fn run(world: &mut World, routing: &mut Routing, args: &Args) {
    let control = Control::new();
    let dt = Duration::from_millis(args.dt_ms);

    for tick in 0..args.ticks {
        let input = args
            .walk
            .get(tick as usize)
            .and_then(|token| Direction::from_token(token))
            .map_or_else(InputSnapshot::default, InputSnapshot::pressing);

        let mut events = Vec::new();
        let mut commands = Vec::new();

        control.handle(input, &query::actor_view(world), &mut commands);
        for command in commands.drain(..) {
            world::apply(world, command, &mut events);
        }

        routing.handle(&events, &query::actor_view(world), &mut commands);
        for command in commands.drain(..) {
            world::apply(world, command, &mut events);
        }

        world::apply(world, WorldCommand::Tick { dt }, &mut events);
        report_events(&events);
    }
}

fn report_events(events: &[Event]) {
    for event in events {
        match event {
            Event::PortalActivated { actor, cell } => {
                println!(
                    "portal activated by actor {} at ({}, {})",
                    actor.get(),
                    cell.x(),
                    cell.z()
                );
            }
            Event::MovementRejected {
                actor,
                direction,
                reason,
            } => {
                log::debug!(
                    "actor {} rejected moving {:?}: {:?}",
                    actor.get(),
                    direction,
                    reason
                );
            }
            Event::PlacementRejected {
                anchor, reason, ..
            } => {
                log::warn!(
                    "placement rejected at ({}, {}): {:?}",
                    anchor.x(),
                    anchor.z(),
                    reason
                );
            }
            Event::MovementProgress { .. } | Event::TimeAdvanced { .. } => {}
            other => log::trace!("{other:?}"),
        }
    }
}

fn report_final_state(world: &World) {
    let config = query::grid_config(world);
    println!(
        "grid {}x{}, {} painted cells, {} objects",
        config.size(),
        config.size(),
        query::painted_cells(world),
        query::object_count(world),
    );
    for actor in query::actor_view(world).iter() {
        println!(
            "actor {} at ({}, {}) facing {:?}, world position ({:.2}, {:.2}, {:.2})",
            actor.id.get(),
            actor.cell.x(),
            actor.cell.z(),
            actor.facing,
            actor.position.x,
            actor.position.y,
            actor.position.z,
        );
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("could not parse {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("could not serialise export")?;
    fs::write(path, json).with_context(|| format!("could not write {}", path.display()))
}
