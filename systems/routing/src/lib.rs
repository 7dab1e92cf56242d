#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scripted route interpreter that feeds directions to idle actors.
//!
//! Each actor may carry a route made of a one-shot prefix and a cyclic
//! suffix. While an actor is idle and has never accepted manual input, the
//! interpreter emits one scripted move command per tick. The world still
//! validates every emitted command; a step into a blocked cell is consumed
//! by the script and simply leaves the actor idle for that tick.

use std::collections::BTreeMap;

use gridwalk_core::{ActorId, Command, Direction, Event, MoveSource};
use gridwalk_world::query::ActorView;

/// Single step of a route script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteToken {
    /// Recognized direction step.
    Step(Direction),
    /// Unrecognized token retained from parsing. Advancing past it consumes
    /// a tick without emitting movement.
    Skip,
}

/// Scripted movement for one actor: a prefix that runs once followed by a
/// cycle that repeats indefinitely. Empty sequences are valid and simply
/// contribute no automatic movement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteScript {
    prefix: Vec<RouteToken>,
    cycle: Vec<RouteToken>,
}

impl RouteScript {
    /// Creates a script from explicit token sequences.
    #[must_use]
    pub fn new(prefix: Vec<RouteToken>, cycle: Vec<RouteToken>) -> Self {
        Self { prefix, cycle }
    }

    /// Creates a script from direction sequences.
    #[must_use]
    pub fn from_directions(prefix: &[Direction], cycle: &[Direction]) -> Self {
        Self {
            prefix: prefix.iter().copied().map(RouteToken::Step).collect(),
            cycle: cycle.iter().copied().map(RouteToken::Step).collect(),
        }
    }

    /// Parses token strings, retaining unrecognized tokens as [`RouteToken::Skip`].
    #[must_use]
    pub fn parse<S: AsRef<str>>(prefix: &[S], cycle: &[S]) -> Self {
        let token = |raw: &S| {
            Direction::from_token(raw.as_ref()).map_or(RouteToken::Skip, RouteToken::Step)
        };
        Self {
            prefix: prefix.iter().map(token).collect(),
            cycle: cycle.iter().map(token).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RouteState {
    prefix_index: usize,
    cycle_index: usize,
    prefix_done: bool,
    input_latched: bool,
}

#[derive(Clone, Debug)]
struct RouteEntry {
    script: RouteScript,
    state: RouteState,
}

impl RouteEntry {
    /// Advances the script by one tick and yields the next direction, if any.
    fn next_direction(&mut self) -> Option<Direction> {
        if !self.state.prefix_done {
            if self.state.prefix_index < self.script.prefix.len() {
                let token = self.script.prefix[self.state.prefix_index];
                self.state.prefix_index += 1;
                return match token {
                    RouteToken::Step(direction) => Some(direction),
                    RouteToken::Skip => None,
                };
            }
            // The tick that finishes the prefix emits no direction.
            self.state.prefix_done = true;
            self.state.cycle_index = 0;
            return None;
        }

        if self.script.cycle.is_empty() {
            return None;
        }
        let token = self.script.cycle[self.state.cycle_index];
        self.state.cycle_index = (self.state.cycle_index + 1) % self.script.cycle.len();
        match token {
            RouteToken::Step(direction) => Some(direction),
            RouteToken::Skip => None,
        }
    }
}

/// Pure system that sequences scripted directions for idle actors.
#[derive(Debug, Default)]
pub struct Routing {
    routes: BTreeMap<ActorId, RouteEntry>,
}

impl Routing {
    /// Creates a new routing system with no scripts assigned.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a script to an actor, resetting any previous route state
    /// including the manual-input latch.
    pub fn assign(&mut self, actor: ActorId, script: RouteScript) {
        let _ = self.routes.insert(
            actor,
            RouteEntry {
                script,
                state: RouteState::default(),
            },
        );
    }

    /// Reports whether manual input has permanently latched the actor out of
    /// route execution.
    #[must_use]
    pub fn is_latched(&self, actor: ActorId) -> bool {
        self.routes
            .get(&actor)
            .map_or(false, |entry| entry.state.input_latched)
    }

    /// Consumes the tick's events so far and the refreshed actor view, then
    /// emits scripted move commands for idle, unlatched actors.
    ///
    /// The event slice must include every `MovementStarted` emitted earlier
    /// in the same tick so accepted manual input latches before the route is
    /// consulted; an actor whose manual move was accepted is already moving
    /// in the view and is skipped either way.
    pub fn handle(&mut self, events: &[Event], actors: &ActorView, out: &mut Vec<Command>) {
        for event in events {
            if let Event::MovementStarted {
                actor,
                source: MoveSource::Manual,
                ..
            } = event
            {
                if let Some(entry) = self.routes.get_mut(actor) {
                    entry.state.input_latched = true;
                }
            }
        }

        for (actor, entry) in &mut self.routes {
            if entry.state.input_latched {
                continue;
            }
            let Some(snapshot) = actors.get(*actor) else {
                continue;
            };
            if snapshot.is_moving {
                continue;
            }
            if let Some(direction) = entry.next_direction() {
                out.push(Command::Move {
                    actor: *actor,
                    direction,
                    source: MoveSource::Scripted,
                });
            }
        }
    }
}
