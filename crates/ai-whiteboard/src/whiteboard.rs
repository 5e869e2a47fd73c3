//! The [`Whiteboard`] itself.

use std::collections::BTreeSet;

use ai_core::{ObjectId, ObjectType, OriginId, Pose3d, Quad2, Timestamp, ANY_ANGLE};

use crate::beacon::Beacon;
use crate::config::WhiteboardConfig;
use crate::error::{WhiteboardError, WhiteboardResult};
use crate::fact::WhiteboardFact;
use crate::failure::{FailureQuery, FailureRecord, FailureTables, ObjectUseAction};
use crate::intention::{IntentionCache, IntentionEntry, ObjectUseIntention};
use crate::object::WorldObject;
use crate::possible::{PossibleObject, SearchedEmpty};
use crate::world::BlockWorld;

/// Last cliff/edge report from navigation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeInfo {
    pub closest_edge_mm: f32,
    pub at:              Timestamp,
}

/// Shared memory of derived world state for one robot.
///
/// Mutated from three places only: [`handle_fact`](Self::handle_fact) for
/// queued sensor facts, [`update`](Self::update) once per tick, and the
/// explicit report methods behaviors call (`set_failed_to_use`, beacons, tap
/// interactions).  Everything else is a read.
#[derive(Debug)]
pub struct Whiteboard {
    config:                WhiteboardConfig,
    possible_objects:      Vec<PossibleObject>,
    searched_empty:        Vec<SearchedEmpty>,
    failures:              FailureTables,
    beacons:               Vec<Beacon>,
    intentions:            IntentionCache,
    tap_object:            Option<ObjectId>,
    returned_to_treads_at: Option<Timestamp>,
    got_off_charger_at:    Option<Timestamp>,
    edge_info:             Option<EdgeInfo>,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new(WhiteboardConfig::default())
    }
}

impl Whiteboard {
    pub fn new(config: WhiteboardConfig) -> Self {
        Self {
            config,
            possible_objects:      Vec::new(),
            searched_empty:        Vec::new(),
            failures:              FailureTables::new(),
            beacons:               Vec::new(),
            intentions:            IntentionCache::default(),
            tap_object:            None,
            returned_to_treads_at: None,
            got_off_charger_at:    None,
            edge_info:             None,
        }
    }

    #[inline]
    pub fn config(&self) -> &WhiteboardConfig {
        &self.config
    }

    // ── Per-tick ──────────────────────────────────────────────────────────────

    /// Prune stale state and recompute the intention cache.
    pub fn update(&mut self, world: &dyn BlockWorld, now: Timestamp) {
        self.remove_possible_objects_from_stale_origins(world);
        let timeout = self.config.searched_empty_timeout_secs;
        self.searched_empty.retain(|m| !m.is_expired(now, timeout));
        self.update_intentions(world, now);
    }

    pub fn handle_fact(&mut self, fact: &WhiteboardFact, world: &dyn BlockWorld, now: Timestamp) {
        match fact {
            WhiteboardFact::ObservedObject { object_type, pose }
            | WhiteboardFact::MarkedObjectPoseUnknown { object_type, pose } => {
                self.remove_possible_objects_matching(*object_type, pose);
            }
            WhiteboardFact::ObservedPossibleObject { object_type, pose } => {
                self.consider_new_possible_object(*object_type, *pose, world, now);
            }
            WhiteboardFact::OffTreadsStateChanged { on_treads } => {
                if *on_treads {
                    self.returned_to_treads_at = Some(now);
                }
            }
            WhiteboardFact::RobotDelocalized => {
                self.remove_possible_objects_from_stale_origins(world);
                if !self.beacons.is_empty() {
                    tracing::info!(count = self.beacons.len(), "Whiteboard.ClearBeacons: robot delocalized");
                    self.beacons.clear();
                }
            }
            WhiteboardFact::ClearedArea { quad } => {
                self.remove_possible_objects_in_quad(quad);
            }
            WhiteboardFact::GotOffCharger => {
                self.got_off_charger_at = Some(now);
            }
            WhiteboardFact::EdgeInfo { closest_edge_mm } => {
                self.edge_info = Some(EdgeInfo { closest_edge_mm: *closest_edge_mm, at: now });
            }
        }
    }

    // ── Possible objects ──────────────────────────────────────────────────────

    /// Record a hypothesis unless it is tilted, too high, in a spot recently
    /// searched, or explained by a located object.  A hypothesis already
    /// stored near `pose` is replaced, so the list never holds duplicates.
    ///
    /// Returns `true` if the hypothesis is stored.
    pub fn consider_new_possible_object(
        &mut self,
        object_type: ObjectType,
        pose:        Pose3d,
        world:       &dyn BlockWorld,
        now:         Timestamp,
    ) -> bool {
        let cfg = &self.config;
        let (close_mm, close_angle) = (cfg.possible_object_close_mm, cfg.possible_object_close_angle);
        let max = cfg.max_possible_objects;
        if !pose.is_flat(cfg.possible_object_flat_tolerance_rad) {
            tracing::debug!(%pose, "Whiteboard.ConsiderPossibleObject: not flat");
            return false;
        }
        let robot = world.robot_pose();
        if pose.z - robot.z > cfg.possible_object_max_height_mm {
            tracing::debug!(%pose, "Whiteboard.ConsiderPossibleObject: too high");
            return false;
        }
        if self.is_searched_empty(object_type, &pose, now) {
            tracing::debug!(%pose, "Whiteboard.ConsiderPossibleObject: spot searched recently");
            return false;
        }

        self.remove_possible_objects_matching(object_type, &pose);

        let explained = world
            .objects()
            .iter()
            .any(|o| o.object_type == object_type && o.pose.is_same_as(&pose, close_mm, close_angle));
        if explained {
            return false;
        }

        if max == 0 {
            return false;
        }
        while self.possible_objects.len() >= max {
            let dropped = self.possible_objects.remove(0);
            tracing::debug!(pose = %dropped.pose, "Whiteboard.ConsiderPossibleObject: dropped oldest");
        }
        self.possible_objects.push(PossibleObject::new(object_type, pose));
        true
    }

    /// Remove hypotheses of `object_type` within tolerance of `pose`.
    pub fn remove_possible_objects_matching(&mut self, object_type: ObjectType, pose: &Pose3d) -> usize {
        let (close_mm, close_angle) =
            (self.config.possible_object_close_mm, self.config.possible_object_close_angle);
        let before = self.possible_objects.len();
        self.possible_objects
            .retain(|p| !p.matches(object_type, pose, close_mm, close_angle));
        before - self.possible_objects.len()
    }

    pub fn remove_possible_objects_in_quad(&mut self, quad: &Quad2) -> usize {
        let before = self.possible_objects.len();
        self.possible_objects.retain(|p| !quad.contains(&p.pose));
        before - self.possible_objects.len()
    }

    /// Garbage-collect hypotheses whose origin went stale.
    pub fn remove_possible_objects_from_stale_origins(&mut self, world: &dyn BlockWorld) -> usize {
        let before = self.possible_objects.len();
        self.possible_objects
            .retain(|p| !world.is_zombie_origin(p.pose.origin));
        let removed = before - self.possible_objects.len();
        if removed > 0 {
            tracing::debug!(removed, "Whiteboard.RemovePossibleObjectsFromZombieMaps");
        }
        removed
    }

    /// A search at `pose` found nothing: drop the hypothesis and remember the
    /// spot so it is not immediately re-added.
    pub fn finished_search_for_possible_object(
        &mut self,
        object_type: ObjectType,
        pose:        Pose3d,
        now:         Timestamp,
    ) {
        let removed = self.remove_possible_objects_matching(object_type, &pose);
        tracing::debug!(removed, %pose, "Whiteboard.FinishedSearchForPossibleObject");
        self.searched_empty.push(SearchedEmpty { pose, object_type, at: now });
    }

    pub fn is_searched_empty(&self, object_type: ObjectType, pose: &Pose3d, now: Timestamp) -> bool {
        let cfg = &self.config;
        self.searched_empty.iter().any(|m| {
            m.object_type == object_type
                && !m.is_expired(now, cfg.searched_empty_timeout_secs)
                && m.pose.is_same_as(pose, cfg.searched_empty_radius_mm, ANY_ANGLE)
        })
    }

    /// Hypotheses in discovery order, oldest first.
    #[inline]
    pub fn possible_objects(&self) -> &[PossibleObject] {
        &self.possible_objects
    }

    pub fn possible_objects_in_origin(&self, origin: OriginId) -> impl Iterator<Item = &PossibleObject> {
        self.possible_objects.iter().filter(move |p| p.pose.origin == origin)
    }

    // ── Failures ──────────────────────────────────────────────────────────────

    /// Report a failed use of `id`.  The record is placed at `location` if
    /// given, else at the object's current pose.  `PlaceObjectAt` failures
    /// concern a destination and so always need `location`.
    pub fn set_failed_to_use(
        &mut self,
        id:       ObjectId,
        action:   ObjectUseAction,
        location: Option<Pose3d>,
        world:    &dyn BlockWorld,
        now:      Timestamp,
    ) -> WhiteboardResult<()> {
        let pose = match (action, location) {
            (_, Some(pose)) => pose,
            (ObjectUseAction::PlaceObjectAt, None) => {
                return Err(WhiteboardError::LocationRequired(action));
            }
            (_, None) => world.object(id).ok_or(WhiteboardError::UnknownObject(id))?.pose,
        };
        let evicted = self.failures.record(
            id,
            action,
            FailureRecord { pose, at: now },
            &self.config.failure_caps,
        );
        if evicted > 0 {
            tracing::debug!(%id, ?action, evicted, "Whiteboard.SetFailedToUse: evicted oldest");
        }
        tracing::info!(%id, ?action, %pose, "Whiteboard.SetFailedToUse");
        Ok(())
    }

    pub fn did_fail_to_use(&self, query: &FailureQuery, now: Timestamp) -> bool {
        self.failures.any_match(query, now)
    }

    #[inline]
    pub fn failures(&self) -> &FailureTables {
        &self.failures
    }

    // ── Beacons ───────────────────────────────────────────────────────────────

    pub fn add_beacon(&mut self, beacon: Beacon) {
        tracing::info!(pose = %beacon.pose, radius_mm = beacon.radius_mm, "Whiteboard.AddBeacon");
        self.beacons.push(beacon);
    }

    #[inline]
    pub fn beacons(&self) -> &[Beacon] {
        &self.beacons
    }

    /// First beacon wins; later ones are kept but inactive.
    #[inline]
    pub fn active_beacon(&self) -> Option<&Beacon> {
        self.beacons.first()
    }

    pub fn clear_beacons(&mut self) {
        self.beacons.clear();
    }

    pub fn failed_to_find_location_in_beacon(&mut self, now: Timestamp) -> WhiteboardResult<()> {
        let beacon = self.beacons.first_mut().ok_or(WhiteboardError::NoActiveBeacon)?;
        beacon.failed_to_find_location(now);
        Ok(())
    }

    /// Cubes that could still be brought into a beacon.  The carried cube
    /// always counts.  With no beacons every usable cube is "out".
    pub fn find_usable_cubes_out_of_beacons(&self, world: &dyn BlockWorld, now: Timestamp) -> Vec<ObjectId> {
        let robot = world.robot_pose();
        let carrying = world.carrying_object();
        let inward = self.config.beacon_inward_threshold_mm;
        world
            .objects()
            .iter()
            .filter(|o| o.is_cube() && o.pose.same_origin(&robot))
            .filter(|o| !self.beacons.iter().any(|b| b.is_loc_within_threshold(&o.pose, inward)))
            .filter(|o| {
                carrying == Some(o.id)
                    || (world.can_pick_up(o) && !self.recently_failed(o, ObjectUseAction::PickUpObject, now))
            })
            .map(|o| o.id)
            .collect()
    }

    pub fn find_cubes_in_beacon(&self, beacon: &Beacon, world: &dyn BlockWorld) -> Vec<ObjectId> {
        world
            .objects()
            .iter()
            .filter(|o| o.is_cube() && beacon.is_loc_within(&o.pose))
            .map(|o| o.id)
            .collect()
    }

    /// `false` when there are no beacons.
    pub fn are_all_cubes_in_beacons(&self, world: &dyn BlockWorld) -> bool {
        if self.beacons.is_empty() {
            return false;
        }
        let robot = world.robot_pose();
        let inward = self.config.beacon_inward_threshold_mm;
        world
            .objects()
            .iter()
            .filter(|o| o.is_cube() && o.pose.same_origin(&robot))
            .all(|o| self.beacons.iter().any(|b| b.is_loc_within_threshold(&o.pose, inward)))
    }

    // ── Intentions ────────────────────────────────────────────────────────────

    /// Best object computed by the last `update()`.
    #[inline]
    pub fn best_object_for_action(&self, intention: ObjectUseIntention) -> Option<ObjectId> {
        self.intentions.get(intention).best
    }

    #[inline]
    pub fn valid_objects_for_action(&self, intention: ObjectUseIntention) -> &BTreeSet<ObjectId> {
        &self.intentions.get(intention).valid
    }

    #[inline]
    pub fn is_object_valid_for_intention(&self, id: ObjectId, intention: ObjectUseIntention) -> bool {
        self.intentions.get(intention).valid.contains(&id)
    }

    /// Pin `id` as best object for every intention it is valid for.  The pin
    /// survives later updates while the object stays valid.
    pub fn set_object_tap_interaction(&mut self, id: ObjectId) {
        tracing::info!(%id, "Whiteboard.SetObjectTapInteraction");
        self.tap_object = Some(id);
        for intention in ObjectUseIntention::ALL {
            let entry = self.intentions.get_mut(intention);
            if entry.valid.contains(&id) {
                entry.best = Some(id);
            }
        }
    }

    pub fn clear_object_tap_interaction(&mut self, world: &dyn BlockWorld, now: Timestamp) {
        if self.tap_object.take().is_some() {
            self.update_intentions(world, now);
        }
    }

    #[inline]
    pub fn tap_object(&self) -> Option<ObjectId> {
        self.tap_object
    }

    fn update_intentions(&mut self, world: &dyn BlockWorld, now: Timestamp) {
        let robot = world.robot_pose();
        for intention in ObjectUseIntention::ALL {
            let mut valid = BTreeSet::new();
            let mut closest: Option<(f32, ObjectId)> = None;
            for obj in world.objects() {
                if !self.is_valid_for(intention, obj, world, now) {
                    continue;
                }
                valid.insert(obj.id);
                let d = obj.pose.distance_mm(&robot);
                let better = closest.is_none_or(|(best_d, best_id)| {
                    d < best_d || (d == best_d && obj.id < best_id)
                });
                if better {
                    closest = Some((d, obj.id));
                }
            }
            let best = match self.tap_object {
                Some(tap) if valid.contains(&tap) => Some(tap),
                _ => closest.map(|(_, id)| id),
            };
            *self.intentions.get_mut(intention) = IntentionEntry { valid, best };
        }
    }

    fn is_valid_for(
        &self,
        intention: ObjectUseIntention,
        obj:       &WorldObject,
        world:     &dyn BlockWorld,
        now:       Timestamp,
    ) -> bool {
        if !obj.is_cube() || !obj.pose.same_origin(&world.robot_pose()) {
            return false;
        }
        if self.recently_failed(obj, intention.failure_action(), now) {
            return false;
        }
        match intention {
            ObjectUseIntention::PickUpAnyObject => world.can_pick_up(obj),
            ObjectUseIntention::PickUpObjectWithAxisCheck => {
                world.can_pick_up_from_ground(obj) && obj.pose.is_upright()
            }
            ObjectUseIntention::RollObjectWithAxisCheck => {
                world.is_roll_unlocked() && world.can_roll(obj) && !obj.pose.is_upright()
            }
            ObjectUseIntention::RollObjectNoAxisCheck => {
                world.is_roll_unlocked() && world.can_roll(obj)
            }
            ObjectUseIntention::PopAWheelieOnObject => {
                world.is_wheelie_unlocked() && world.can_roll(obj)
            }
        }
    }

    fn recently_failed(&self, obj: &WorldObject, action: ObjectUseAction, now: Timestamp) -> bool {
        let cfg = &self.config;
        let query = FailureQuery::object(obj.id, action)
            .recent(cfg.failure_recent_secs)
            .near(obj.pose, cfg.failure_dist_mm, cfg.failure_angle);
        self.failures.any_match(&query, now)
    }

    // ── Timestamps for strategies ─────────────────────────────────────────────

    #[inline]
    pub fn returned_to_treads_at(&self) -> Option<Timestamp> {
        self.returned_to_treads_at
    }

    #[inline]
    pub fn got_off_charger_at(&self) -> Option<Timestamp> {
        self.got_off_charger_at
    }

    #[inline]
    pub fn edge_info(&self) -> Option<EdgeInfo> {
        self.edge_info
    }
}
