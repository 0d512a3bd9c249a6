//! Simulation step driver
//!
//! One call to [`tick`] is one frame of simulated time. The tick runs in
//! fixed phases so no body ever sees a half-updated neighbour:
//! 1. commit queued host commands
//! 2. gravity: compute every velocity delta, then apply them all
//! 3. collisions: resolve each live pair once, defer removals
//! 4. integrate positions
//!
//! Non-finite state is checked after each mutating phase; an offending body
//! is dropped and the tick carries on for everyone else.

use std::collections::BTreeSet;

use glam::DVec2;

use super::body::BodyId;
use super::collision::{Collision, resolve};
use super::gravity::velocity_delta;
use super::state::{Phase, SimEvent, SimState};

/// Host input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut SimState, input: &TickInput) {
    if input.pause {
        state.toggle_pause();
    }

    // Tick boundary: host changes land even while paused
    state.commit_pending();

    if state.phase() == Phase::Paused {
        return;
    }

    state.advance_clock();

    apply_gravity(state);
    drop_diverged(state);

    resolve_collisions(state);
    drop_diverged(state);

    for body in state.arena_mut().iter_mut() {
        body.advance();
    }
    drop_diverged(state);
}

/// Velocity update from the positions at the start of the tick
fn apply_gravity(state: &mut SimState) {
    let config = state.config().clone();
    let arena = state.arena();

    let deltas: Vec<(BodyId, DVec2)> = arena
        .iter()
        .map(|body| (body.id(), velocity_delta(body, arena.iter(), &config)))
        .collect();

    let arena = state.arena_mut();
    for (id, delta) in deltas {
        if let Some(body) = arena.get_mut(id) {
            body.apply_velocity_delta(delta, config.velocity_precision);
        }
    }
}

/// Pairwise absorption; casualties leave the set after every pair is seen
fn resolve_collisions(state: &mut SimState) {
    let config = state.config().clone();
    let ids = state.arena().ids();
    let mut removed: BTreeSet<BodyId> = BTreeSet::new();
    let mut events = Vec::new();

    for (i, &a_id) in ids.iter().enumerate() {
        for &b_id in &ids[i + 1..] {
            if removed.contains(&a_id) {
                break;
            }
            if removed.contains(&b_id) {
                continue;
            }

            let arena = state.arena();
            let (Some(a), Some(b)) = (arena.get(a_id), arena.get(b_id)) else {
                continue;
            };
            let Collision::Absorb { survivor, casualty } = resolve(a, b) else {
                continue;
            };
            let casualty_mass = if casualty == a_id { a.mass() } else { b.mass() };

            if let Some(body) = state.arena_mut().get_mut(survivor) {
                body.absorb(casualty_mass, &config);
                log::debug!(
                    "Body {} absorbed {} (mass now {:e})",
                    survivor,
                    casualty,
                    body.mass()
                );
                events.push(SimEvent::Absorbed {
                    survivor,
                    casualty,
                    mass: body.mass(),
                });
            }
            removed.insert(casualty);
        }
    }

    let arena = state.arena_mut();
    for id in removed {
        arena.remove(id);
    }
    for event in events {
        state.push_event(event);
    }
}

/// Remove every body whose state is no longer finite
fn drop_diverged(state: &mut SimState) {
    let diverged: Vec<BodyId> = state
        .bodies()
        .filter_map(|body| match body.check_finite() {
            Ok(()) => None,
            Err(err) => {
                log::warn!("{err}; dropping body");
                Some(body.id())
            }
        })
        .collect();

    for id in diverged {
        state.arena_mut().remove(id);
        state.push_event(SimEvent::Diverged { id });
    }
}
