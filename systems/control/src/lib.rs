#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure control system that turns captured input into manual move commands.
//!
//! Adapters capture one [`InputSnapshot`] per tick from whatever input source
//! they own and hand it to this system together with the current actor view.
//! The world remains the sole authority: it validates each request and drops
//! requests for actors that are already moving.

use gridwalk_core::{Command, InputSnapshot, MoveSource};
use gridwalk_world::query::ActorView;

/// Pure system that emits manual movement commands for idle actors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Control;

impl Control {
    /// Creates a new control system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves the snapshot to at most one direction and emits a manual
    /// move command for every idle actor.
    pub fn handle(&self, input: InputSnapshot, actors: &ActorView, out: &mut Vec<Command>) {
        let Some(direction) = input.direction() else {
            return;
        };

        for snapshot in actors.iter() {
            if snapshot.is_moving {
                continue;
            }
            out.push(Command::Move {
                actor: snapshot.id,
                direction,
                source: MoveSource::Manual,
            });
        }
    }
}
