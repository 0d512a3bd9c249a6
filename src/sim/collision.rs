//! Collision detection and absorption
//!
//! Two bodies collide when their discs overlap. The heavier body absorbs
//! the lighter one; on equal mass the lower id survives.

use super::body::{Body, BodyId};
use crate::distance;

/// Outcome of checking one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Discs do not overlap
    Miss,
    /// `survivor` takes the mass of `casualty`, which leaves the live set
    Absorb { survivor: BodyId, casualty: BodyId },
}

/// What a collision means for one of the two bodies involved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Survived,
    Died,
    NoCollision,
}

impl Collision {
    /// Outcome from the point of view of body `id`
    pub fn outcome_for(&self, id: BodyId) -> CollisionOutcome {
        match *self {
            Collision::Absorb { survivor, .. } if survivor == id => CollisionOutcome::Survived,
            Collision::Absorb { casualty, .. } if casualty == id => CollisionOutcome::Died,
            _ => CollisionOutcome::NoCollision,
        }
    }
}

/// Strict overlap: centers closer than the sum of radii
///
/// Coincident centers always overlap, since radii are positive.
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    distance(a.position(), b.position()) < a.radius() + b.radius()
}

/// Decide the collision between two bodies without mutating either
pub fn resolve(a: &Body, b: &Body) -> Collision {
    if !overlaps(a, b) {
        return Collision::Miss;
    }

    let a_wins = if a.mass() != b.mass() {
        a.mass() > b.mass()
    } else {
        a.id() < b.id()
    };

    if a_wins {
        Collision::Absorb {
            survivor: a.id(),
            casualty: b.id(),
        }
    } else {
        Collision::Absorb {
            survivor: b.id(),
            casualty: a.id(),
        }
    }
}
