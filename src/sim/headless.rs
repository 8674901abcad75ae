//! Minimal headless physics world
//!
//! Just enough rigid-body behavior to drive the game without a real engine:
//! circles and static axis-aligned rectangles, restitution response, sensors,
//! collision filters, and "collision started" reporting. Velocities are in
//! units per reference step (60 Hz), the convention the tuning values use.

use std::collections::HashSet;

use glam::Vec2;

use super::entity::EntityKind;
use super::physics::{BodyDesc, BodyId, CollisionStarted, PhysicsWorld, Shape};
use crate::consts::STEP_MS;

#[derive(Debug, Clone)]
struct Body {
    id: BodyId,
    desc: BodyDesc,
    pos: Vec2,
    vel: Vec2,
    force: Vec2,
    inv_mass: f32,
}

impl Body {
    fn new(id: BodyId, desc: BodyDesc) -> Self {
        let inv_mass = if desc.is_static {
            0.0
        } else {
            let area = match desc.shape {
                Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
                Shape::Rect { half_extents } => 4.0 * half_extents.x * half_extents.y,
            };
            let mass = desc.density * area;
            if mass > 0.0 { 1.0 / mass } else { 0.0 }
        };
        Self {
            id,
            pos: desc.position,
            vel: Vec2::ZERO,
            force: Vec2::ZERO,
            inv_mass,
            desc,
        }
    }
}

/// Contact between two bodies
#[derive(Debug, Clone, Copy)]
struct Contact {
    /// Unit normal pointing from the first body toward the second
    normal: Vec2,
    /// Overlap depth
    depth: f32,
    /// Support point on the contact
    point: Vec2,
}

/// Circle vs circle, normal from `a` toward `b`
fn circle_circle(pa: Vec2, ra: f32, pb: Vec2, rb: f32) -> Option<Contact> {
    let delta = pb - pa;
    let dist_sq = delta.length_squared();
    let reach = ra + rb;
    if dist_sq >= reach * reach {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist > 0.0 { delta / dist } else { Vec2::X };
    Some(Contact {
        normal,
        depth: reach - dist,
        point: pa + normal * ra,
    })
}

/// Circle vs axis-aligned rectangle, normal from the circle toward the rect
fn circle_rect(center: Vec2, radius: f32, rect_center: Vec2, half: Vec2) -> Option<Contact> {
    let d = center - rect_center;
    let clamped = d.clamp(-half, half);

    if clamped == d {
        // Circle center inside the rectangle: push out along the shallow axis
        let over_x = half.x - d.x.abs();
        let over_y = half.y - d.y.abs();
        let outward = if over_x < over_y {
            Vec2::new(d.x.signum(), 0.0)
        } else {
            Vec2::new(0.0, d.y.signum())
        };
        return Some(Contact {
            normal: -outward,
            depth: over_x.min(over_y) + radius,
            point: center,
        });
    }

    let closest = rect_center + clamped;
    let delta = center - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius * radius {
        return None;
    }
    let dist = dist_sq.sqrt();
    Some(Contact {
        normal: -delta / dist,
        depth: radius - dist,
        point: closest,
    })
}

fn detect(a: &Body, b: &Body) -> Option<Contact> {
    match (a.desc.shape, b.desc.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.pos, ra, b.pos, rb)
        }
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
            circle_rect(a.pos, radius, b.pos, half_extents)
        }
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
            circle_rect(b.pos, radius, a.pos, half_extents).map(|c| Contact {
                normal: -c.normal,
                ..c
            })
        }
        (Shape::Rect { .. }, Shape::Rect { .. }) => None,
    }
}

/// Separate the bodies and apply a restitution impulse along the normal
fn resolve(a: &mut Body, b: &mut Body, contact: Contact) {
    let total_inv = a.inv_mass + b.inv_mass;
    if total_inv == 0.0 {
        return;
    }

    let correction = contact.normal * (contact.depth / total_inv);
    a.pos -= correction * a.inv_mass;
    b.pos += correction * b.inv_mass;

    let approach = (b.vel - a.vel).dot(contact.normal);
    if approach >= 0.0 {
        return;
    }
    let restitution = a.desc.restitution.max(b.desc.restitution);
    let impulse = -(1.0 + restitution) * approach / total_inv;
    a.vel -= contact.normal * impulse * a.inv_mass;
    b.vel += contact.normal * impulse * b.inv_mass;
}

/// Mutable references to two distinct bodies, `i < j`
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// In-crate [`PhysicsWorld`] used by the native binary and tests
#[derive(Debug, Default)]
pub struct HeadlessWorld {
    /// Sorted by id (insertion order)
    bodies: Vec<Body>,
    /// Pairs that were touching after the previous step
    touching: HashSet<(BodyId, BodyId)>,
    next_id: u32,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    fn integrate(&mut self, dt_ms: f32) {
        let scale = dt_ms / STEP_MS;
        for body in self.bodies.iter_mut().filter(|b| !b.desc.is_static) {
            body.vel += body.force * body.inv_mass * dt_ms * dt_ms;
            body.vel *= (1.0 - body.desc.friction_air * scale).max(0.0);
            body.pos += body.vel * scale;
            body.force = Vec2::ZERO;
        }
    }
}

impl PhysicsWorld for HeadlessWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::new(id, desc));
        id
    }

    fn remove_body(&mut self, id: BodyId) {
        self.bodies.retain(|b| b.id != id);
        self.touching.retain(|&(a, b)| a != id && b != id);
    }

    fn kind(&self, id: BodyId) -> Option<EntityKind> {
        self.body(id).map(|b| b.desc.kind)
    }

    fn position(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.pos)
    }

    fn set_position(&mut self, id: BodyId, position: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.pos = position;
        }
    }

    fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.vel)
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(body) = self.body_mut(id) {
            if !body.desc.is_static {
                body.vel = velocity;
            }
        }
    }

    fn apply_force(&mut self, id: BodyId, force: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.force += force;
        }
    }

    fn step(&mut self, dt_ms: f32) -> Vec<CollisionStarted> {
        self.integrate(dt_ms);

        let mut now_touching = HashSet::new();
        let mut started = Vec::new();

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.desc.is_static && b.desc.is_static {
                    continue;
                }
                if !a.desc.filter.allows(&b.desc.filter) {
                    continue;
                }
                let Some(contact) = detect(a, b) else {
                    continue;
                };

                let key = (a.id, b.id);
                if !self.touching.contains(&key) {
                    started.push(CollisionStarted {
                        a: a.id,
                        b: b.id,
                        contact: Some(contact.point),
                    });
                }
                now_touching.insert(key);

                if !a.desc.is_sensor && !b.desc.is_sensor {
                    let (a, b) = pair_mut(&mut self.bodies, i, j);
                    resolve(a, b, contact);
                }
            }
        }

        self.touching = now_touching;
        started
    }
}
