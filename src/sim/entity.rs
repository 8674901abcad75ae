//! Entity kinds and collision filtering

use serde::{Deserialize, Serialize};

/// Label carried by every physics body the game creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Wall,
    Player,
    Target,
    Hazard,
}

/// Category/mask pair deciding which bodies may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    pub category: u32,
    pub mask: u32,
}

pub const WALL_CATEGORY: u32 = 0x0001;
pub const HAZARD_CATEGORY: u32 = 0x0002;
pub const TARGET_CATEGORY: u32 = 0x0004;

impl CollisionFilter {
    /// Both sides must accept the other's category
    pub fn allows(&self, other: &CollisionFilter) -> bool {
        (self.mask & other.category) != 0 && (other.mask & self.category) != 0
    }
}

impl EntityKind {
    /// Collision filter for bodies of this kind
    ///
    /// The player shares the wall category so walls, hazards and the target
    /// all see it without a dedicated bit.
    pub fn filter(self) -> CollisionFilter {
        match self {
            EntityKind::Wall => CollisionFilter {
                category: WALL_CATEGORY,
                mask: WALL_CATEGORY | HAZARD_CATEGORY,
            },
            EntityKind::Player => CollisionFilter {
                category: WALL_CATEGORY,
                mask: WALL_CATEGORY | HAZARD_CATEGORY | TARGET_CATEGORY,
            },
            EntityKind::Hazard => CollisionFilter {
                category: HAZARD_CATEGORY,
                mask: WALL_CATEGORY | HAZARD_CATEGORY | TARGET_CATEGORY,
            },
            EntityKind::Target => CollisionFilter {
                category: TARGET_CATEGORY,
                mask: WALL_CATEGORY | HAZARD_CATEGORY,
            },
        }
    }
}
