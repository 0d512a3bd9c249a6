//! Simulation state and the body arena
//!
//! The live body set is owned here. Hosts read it freely between ticks but
//! can only change it by queueing commands, which the tick commits at its
//! start.

use std::collections::BTreeMap;

use glam::DVec2;

use super::body::{Body, BodyColor, BodyId, BodySpec};
use crate::error::{Result, SimError};
use crate::launch::LaunchGesture;
use crate::settings::SimConfig;

/// Whether ticks advance the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Running,
    Paused,
}

/// Things that happened during a tick, for the host to observe
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A queued body entered the live set
    Spawned { id: BodyId },
    /// `survivor` absorbed `casualty` and now weighs `mass`
    Absorbed {
        survivor: BodyId,
        casualty: BodyId,
        mass: f64,
    },
    /// Body state went non-finite; the body was dropped
    Diverged { id: BodyId },
    /// Live set was replaced by an empty one
    Cleared { removed: usize },
}

/// Host request applied at the next tick boundary
#[derive(Debug, Clone)]
enum Command {
    Spawn(Body),
    Clear,
}

/// Slot storage keyed by stable id
///
/// Removal frees a slot without moving any other body; iteration follows
/// ascending id order so every pass over the set is deterministic.
#[derive(Debug, Clone, Default)]
pub struct BodyArena {
    slots: Vec<Option<Body>>,
    free: Vec<usize>,
    index: BTreeMap<BodyId, usize>,
}

impl BodyArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_mut()
    }

    /// Live ids, ascending
    pub fn ids(&self) -> Vec<BodyId> {
        self.index.keys().copied().collect()
    }

    /// Live bodies in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.index
            .values()
            .filter_map(move |&slot| self.slots[slot].as_ref())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        // Slot order, not id order; only for per-body updates
        self.slots.iter_mut().flatten()
    }

    pub(crate) fn insert(&mut self, body: Body) {
        let id = body.id();
        if let Some(&slot) = self.index.get(&id) {
            self.slots[slot] = Some(body);
            return;
        }
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(body);
                slot
            }
            None => {
                self.slots.push(Some(body));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
    }

    pub(crate) fn remove(&mut self, id: BodyId) -> Option<Body> {
        let slot = self.index.remove(&id)?;
        self.free.push(slot);
        self.slots[slot].take()
    }

    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.len();
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        removed
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    config: SimConfig,
    phase: Phase,
    /// Ticks that actually advanced the simulation
    time_ticks: u64,
    bodies: BodyArena,
    pending: Vec<Command>,
    events: Vec<SimEvent>,
    next_id: u32,
}

impl SimState {
    /// Empty, running simulation
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: Phase::Running,
            time_ticks: 0,
            bodies: BodyArena::new(),
            pending: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Simulation seeded with an initial body set, live immediately
    pub fn with_bodies(config: SimConfig, specs: &[BodySpec]) -> Result<Self> {
        let mut state = Self::new(config)?;
        for spec in specs {
            state.queue_spawn(*spec)?;
        }
        state.commit_pending();
        state.events.clear();
        Ok(state)
    }

    /// Allocate a new body id; fails once the id space is used up
    fn next_body_id(&mut self) -> Result<BodyId> {
        let next = self.next_id.checked_add(1).ok_or_else(|| {
            SimError::InvalidParameter("body id space exhausted".to_string())
        })?;
        let id = BodyId(self.next_id);
        self.next_id = next;
        Ok(id)
    }

    /// Validate a creation request and queue it for the next tick boundary
    ///
    /// Invalid requests are rejected here and never reach the live set.
    pub fn queue_spawn(&mut self, spec: BodySpec) -> Result<BodyId> {
        spec.validate()?;
        let id = self.next_body_id()?;
        let body = Body::create(id, &spec, &self.config)?;
        self.pending.push(Command::Spawn(body));
        Ok(id)
    }

    /// Queue the body a finished drag gesture launches, scaled by the
    /// configured drag sensitivity
    pub fn queue_launch(
        &mut self,
        gesture: LaunchGesture,
        release: DVec2,
        mass: f64,
        color: BodyColor,
    ) -> Result<BodyId> {
        let spec = gesture.into_spec(release, mass, color, &self.config);
        self.queue_spawn(spec)
    }

    /// Queue removal of every live body (and anything queued before this)
    pub fn queue_clear(&mut self) {
        self.pending.push(Command::Clear);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply queued commands in order
    pub(crate) fn commit_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut spawned = 0usize;
        for command in std::mem::take(&mut self.pending) {
            match command {
                Command::Spawn(body) => {
                    let id = body.id();
                    self.bodies.insert(body);
                    self.events.push(SimEvent::Spawned { id });
                    spawned += 1;
                }
                Command::Clear => {
                    let removed = self.bodies.clear();
                    log::info!("Cleared {} bodies", removed);
                    self.events.push(SimEvent::Cleared { removed });
                }
            }
        }
        if spawned > 0 {
            log::info!("Spawned {} bodies ({} live)", spawned, self.bodies.len());
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
        };
        log::info!("Simulation {:?}", self.phase);
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub(crate) fn advance_clock(&mut self) {
        self.time_ticks += 1;
    }

    /// Live bodies in ascending id order
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Sum of live mass (conserved by absorption, lost only to divergence)
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub(crate) fn arena(&self) -> &BodyArena {
        &self.bodies
    }

    pub(crate) fn arena_mut(&mut self) -> &mut BodyArena {
        &mut self.bodies
    }

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(mass: f64, x: f64) -> BodySpec {
        BodySpec::new(mass, x, 0.0, 0.0, 0.0, BodyColor::Red)
    }

    #[test]
    fn test_arena_reuses_slots_keeps_id_order() {
        let config = SimConfig::default();
        let mut arena = BodyArena::new();
        for id in 1..=3 {
            arena.insert(Body::create(BodyId(id), &spec(1.0, id as f64), &config).unwrap());
        }
        assert!(arena.remove(BodyId(1)).is_some());
        assert!(arena.remove(BodyId(1)).is_none());
        arena.insert(Body::create(BodyId(4), &spec(1.0, 4.0), &config).unwrap());

        assert_eq!(arena.slots.len(), 3);
        assert_eq!(arena.ids(), vec![BodyId(2), BodyId(3), BodyId(4)]);
        let xs: Vec<f64> = arena.iter().map(|b| b.position().x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(arena.get(BodyId(4)).map(Body::id), Some(BodyId(4)));
    }

    #[test]
    fn test_spawn_is_deferred() {
        let mut state = SimState::new(SimConfig::default()).unwrap();
        let id = state.queue_spawn(spec(1e24, 0.0)).unwrap();
        assert!(state.is_empty());
        assert_eq!(state.pending_len(), 1);

        state.commit_pending();
        assert_eq!(state.len(), 1);
        assert_eq!(state.pending_len(), 0);
        assert_eq!(state.body(id).map(Body::mass), Some(1e24));
        assert_eq!(state.drain_events(), vec![SimEvent::Spawned { id }]);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_invalid_spawn_rejected_up_front() {
        let mut state = SimState::new(SimConfig::default()).unwrap();
        assert!(matches!(
            state.queue_spawn(spec(0.0, 0.0)),
            Err(SimError::InvalidParameter(_))
        ));
        assert_eq!(state.pending_len(), 0);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut state = SimState::with_bodies(SimConfig::default(), &[spec(1.0, 0.0)]).unwrap();
        state.queue_clear();
        let id = state.queue_spawn(spec(2.0, 0.0)).unwrap();
        state.commit_pending();

        assert_eq!(id, BodyId(2));
        assert_eq!(state.len(), 1);
        assert_eq!(
            state.drain_events(),
            vec![SimEvent::Cleared { removed: 1 }, SimEvent::Spawned { id }]
        );
    }

    #[test]
    fn test_id_exhaustion_rejected() {
        let mut state = SimState::new(SimConfig::default()).unwrap();
        state.next_id = u32::MAX - 1;
        assert_eq!(state.queue_spawn(spec(1.0, 0.0)).unwrap(), BodyId(u32::MAX - 1));
        assert!(matches!(
            state.queue_spawn(spec(1.0, 0.0)),
            Err(SimError::InvalidParameter(_))
        ));
        assert_eq!(state.pending_len(), 1);
    }

    #[test]
    fn test_launch_uses_configured_sensitivity() {
        let gesture = LaunchGesture::begin(DVec2::new(100.0, 100.0));
        let release = DVec2::new(200.0, 100.0);

        let mut default = SimState::new(SimConfig::default()).unwrap();
        let config = SimConfig::from_json(r#"{ "drag_sensitivity": 10.0 }"#).unwrap();
        let mut touchy = SimState::new(config).unwrap();

        let a = default.queue_launch(gesture, release, 1e25, BodyColor::Red).unwrap();
        let b = touchy.queue_launch(gesture, release, 1e25, BodyColor::Red).unwrap();
        default.commit_pending();
        touchy.commit_pending();

        assert_eq!(default.body(a).unwrap().velocity(), DVec2::new(-1.0, 0.0));
        assert_eq!(touchy.body(b).unwrap().velocity(), DVec2::new(-10.0, 0.0));
        assert_eq!(touchy.body(b).unwrap().position(), DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_clear_drops_earlier_spawns() {
        let mut state = SimState::new(SimConfig::default()).unwrap();
        state.queue_spawn(spec(1.0, 0.0)).unwrap();
        state.queue_clear();
        state.commit_pending();
        assert!(state.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            distance_scale: -1.0,
            ..SimConfig::default()
        };
        assert!(SimState::new(config).is_err());
    }

    #[test]
    fn test_total_mass() {
        let state =
            SimState::with_bodies(SimConfig::default(), &[spec(2.0, 0.0), spec(3.0, 50.0)]).unwrap();
        assert_eq!(state.total_mass(), 5.0);
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.time_ticks(), 0);
    }
}
