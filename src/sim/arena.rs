//! Rectangular arena and its boundary walls
//!
//! Origin is the top-left corner; the playfield spans `[0, width] x [0, height]`.
//! Walls sit just outside that rectangle and overlap each other at the
//! corners so nothing slips through a seam.

use glam::Vec2;

use super::entity::EntityKind;
use super::physics::{BodyDesc, BodyId, PhysicsWorld};
use super::random::RandomSource;

/// Geometry of one boundary wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    pub center: Vec2,
    pub size: Vec2,
}

impl WallSpec {
    pub fn min(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.size * 0.5
    }
}

/// Top, bottom, left, right walls of the given thickness
pub fn wall_layout(width: f32, height: f32, thickness: f32) -> [WallSpec; 4] {
    let t = thickness;
    [
        WallSpec {
            center: Vec2::new(width / 2.0, -t / 2.0),
            size: Vec2::new(width + t, t),
        },
        WallSpec {
            center: Vec2::new(width / 2.0, height + t / 2.0),
            size: Vec2::new(width + t, t),
        },
        WallSpec {
            center: Vec2::new(-t / 2.0, height / 2.0),
            size: Vec2::new(t, height + t),
        },
        WallSpec {
            center: Vec2::new(width + t / 2.0, height / 2.0),
            size: Vec2::new(t, height + t),
        },
    ]
}

/// The playfield and the wall bodies that enclose it
#[derive(Debug, Clone)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    walls: Vec<BodyId>,
}

impl Arena {
    /// Create the arena and insert its walls into `world`
    pub fn build<W: PhysicsWorld + ?Sized>(
        world: &mut W,
        width: f32,
        height: f32,
        wall_thickness: f32,
    ) -> Self {
        let mut arena = Self {
            width,
            height,
            wall_thickness,
            walls: Vec::with_capacity(4),
        };
        arena.spawn_walls(world);
        arena
    }

    /// Replace the walls to match a new playfield size
    pub fn resize<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W, width: f32, height: f32) {
        for wall in self.walls.drain(..) {
            world.remove_body(wall);
        }
        self.width = width;
        self.height = height;
        self.spawn_walls(world);
    }

    fn spawn_walls<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        for spec in wall_layout(self.width, self.height, self.wall_thickness) {
            let desc = BodyDesc::rect(EntityKind::Wall, spec.center, spec.size)
                .with_restitution(1.0)
                .with_friction(0.0, 0.0);
            self.walls.push(world.add_body(desc));
        }
    }

    pub fn walls(&self) -> &[BodyId] {
        &self.walls
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `pos` lies more than `margin` outside the playfield
    pub fn escaped(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }

    /// Uniform point inside the playfield shrunk by `margin` on every side
    ///
    /// Collapses to the center line on an axis too small for the margin.
    pub fn random_point<R: RandomSource + ?Sized>(&self, rng: &mut R, margin: f32) -> Vec2 {
        random_point_in(rng, self.width, self.height, margin)
    }
}

/// Uniform point in `[margin, width - margin] x [margin, height - margin]`
pub(crate) fn random_point_in<R: RandomSource + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    margin: f32,
) -> Vec2 {
    let axis = |rng: &mut R, extent: f32| {
        let span = extent - 2.0 * margin;
        if span > 0.0 {
            margin + rng.unit() * span
        } else {
            rng.unit();
            extent / 2.0
        }
    };
    let x = axis(&mut *rng, width);
    let y = axis(&mut *rng, height);
    Vec2::new(x, y)
}
