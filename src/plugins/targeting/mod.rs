//! Targeting: nearest and top-K hostile queries.
//!
//! The ranking lives in free functions over a [`SpatialIndex`], so it can be exercised
//! without a physics world. [`PhysicsSpace`] is the avian-backed index used in game and
//! [`Targeting`] bundles it with the "is this a valid target" capability check.
//!
//! Queries read the physics world as of the last step. A result may be stale by the next
//! tick; callers re-query every time they fire.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::plugins::collision::{CollisionFilter, EntityKind};
use crate::plugins::combat::CombatStats;
use crate::plugins::entities::PendingDespawn;

/// A query hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub entity: Entity,
    pub position: Vec2,
}

/// The spatial primitives targeting needs from the physics engine.
pub trait SpatialIndex {
    /// Closest shape within `radius` of `origin` that `filter` does not reject and `accept` approves.
    fn nearest(
        &self,
        origin: Vec2,
        radius: f32,
        filter: &CollisionFilter,
        accept: &dyn Fn(Entity) -> bool,
    ) -> Option<Target>;

    /// Visit every shape overlapping the circle (`origin`, `radius`) that `filter` does not reject,
    /// with the squared distance from `origin` to the shape.
    ///
    /// Distances are measured the way `nearest` measures them, so both queries rank alike.
    fn overlapping(
        &self,
        origin: Vec2,
        radius: f32,
        filter: &CollisionFilter,
        visit: &mut dyn FnMut(Target, f32),
    );
}

/// Single closest accepted target, or `None`. Never an error.
pub fn nearest_target(
    index: &impl SpatialIndex,
    origin: Vec2,
    radius: f32,
    filter: &CollisionFilter,
    accept: impl Fn(Entity) -> bool,
) -> Option<Target> {
    index.nearest(origin, radius, filter, &accept)
}

/// Up to `k` accepted targets, closest first by distance to the shape's surface.
///
/// Equal distances keep the index's enumeration order; that order is not guaranteed.
pub fn nearest_targets(
    index: &impl SpatialIndex,
    origin: Vec2,
    radius: f32,
    filter: &CollisionFilter,
    k: usize,
    accept: impl Fn(Entity) -> bool,
) -> Vec<Target> {
    match k {
        0 => return Vec::new(),
        1 => return nearest_target(index, origin, radius, filter, accept).into_iter().collect(),
        _ => {}
    }

    let mut found = Vec::new();
    index.overlapping(origin, radius, filter, &mut |target, distance_squared| {
        if accept(target.entity) {
            found.push((distance_squared, target));
        }
    });

    found.sort_by(|a, b| a.0.total_cmp(&b.0));
    found.truncate(k);
    found.into_iter().map(|(_, target)| target).collect()
}

/// [`SpatialIndex`] over avian's spatial query pipeline.
#[derive(SystemParam)]
pub struct PhysicsSpace<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    filters: Query<'w, 's, &'static CollisionFilter>,
    positions: Query<'w, 's, &'static Position>,
}

impl PhysicsSpace<'_, '_> {
    /// avian layers only check one mask direction and know nothing of groups.
    fn admits(&self, filter: &CollisionFilter, entity: Entity) -> bool {
        self.filters
            .get(entity)
            .is_ok_and(|other| !CollisionFilter::reject(filter, other))
    }

    /// Distance from `origin` to the surface of `entity`'s collider, zero inside it.
    fn surface_distance(
        &self,
        origin: Vec2,
        filter: &CollisionFilter,
        entity: Entity,
    ) -> Option<f32> {
        let projection = self.spatial.project_point_predicate(
            origin,
            true,
            &filter.query_filter(),
            &|candidate: Entity| candidate == entity,
        )?;
        Some(if projection.is_inside {
            0.0
        } else {
            projection.point.distance(origin)
        })
    }

    fn target(&self, entity: Entity) -> Option<Target> {
        let position = self.positions.get(entity).ok()?;
        Some(Target {
            entity,
            position: position.0,
        })
    }
}

impl SpatialIndex for PhysicsSpace<'_, '_> {
    fn nearest(
        &self,
        origin: Vec2,
        radius: f32,
        filter: &CollisionFilter,
        accept: &dyn Fn(Entity) -> bool,
    ) -> Option<Target> {
        let predicate = |entity: Entity| self.admits(filter, entity) && accept(entity);
        let projection =
            self.spatial
                .project_point_predicate(origin, true, &filter.query_filter(), &predicate)?;

        if !projection.is_inside && projection.point.distance(origin) > radius {
            return None;
        }
        self.target(projection.entity)
    }

    fn overlapping(
        &self,
        origin: Vec2,
        radius: f32,
        filter: &CollisionFilter,
        visit: &mut dyn FnMut(Target, f32),
    ) {
        let probe = Collider::circle(radius);
        self.spatial.shape_intersections_callback(
            &probe,
            origin,
            0.0,
            &filter.query_filter(),
            |entity| {
                if !self.admits(filter, entity) {
                    return true;
                }
                let distance = self.surface_distance(origin, filter, entity);
                if let (Some(target), Some(distance)) = (self.target(entity), distance) {
                    visit(target, distance * distance);
                }
                true
            },
        );
    }
}

/// Hostile-NPC targeting for guns.
#[derive(SystemParam)]
pub struct Targeting<'w, 's> {
    space: PhysicsSpace<'w, 's>,
    candidates: Query<'w, 's, &'static EntityKind, (With<CombatStats>, Without<PendingDespawn>)>,
}

impl Targeting<'_, '_> {
    fn is_hostile(&self, entity: Entity) -> bool {
        self.candidates
            .get(entity)
            .is_ok_and(|kind| *kind == EntityKind::Npc)
    }

    pub fn nearest(&self, origin: Vec2, radius: f32) -> Option<Target> {
        nearest_target(
            &self.space,
            origin,
            radius,
            &CollisionFilter::scanner(),
            |entity| self.is_hostile(entity),
        )
    }

    pub fn nearest_k(&self, origin: Vec2, radius: f32, k: usize) -> Vec<Target> {
        nearest_targets(
            &self.space,
            origin,
            radius,
            &CollisionFilter::scanner(),
            k,
            |entity| self.is_hostile(entity),
        )
    }
}
