//! Unit tests for ai-whiteboard.

#[cfg(test)]
mod helpers {
    use ai_core::{ObjectId, ObjectType, OriginId, Pose3d, Timestamp};

    use crate::{MemoryWorld, WorldObject};

    pub const ORIGIN: OriginId = OriginId(1);
    pub const CUBE: ObjectType = ObjectType(1);

    pub fn at(x: f32, y: f32) -> Pose3d {
        Pose3d::at(x, y, ORIGIN)
    }

    pub fn t(secs: f64) -> Timestamp {
        Timestamp(secs)
    }

    pub fn cube(id: u32, x: f32, y: f32) -> WorldObject {
        WorldObject::cube(ObjectId(id), CUBE, at(x, y))
    }

    pub fn empty_world() -> MemoryWorld {
        MemoryWorld::new(at(0.0, 0.0))
    }
}

// ── Failure history ───────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use ai_core::{ObjectId, ANY_ANGLE};

    use super::helpers::*;
    use crate::{
        entry_matches, FailureQuery, FailureRecord, ObjectUseAction, Whiteboard, WhiteboardError,
    };

    #[test]
    fn exact_position_matches_only_the_same_pose() {
        let record = FailureRecord { pose: at(100.0, 50.0), at: t(1.0) };
        let same = at(100.0, 50.0);
        let shifted = same.shifted(0.5, 0.0, 0.0);
        assert!(entry_matches(&record, t(500.0), -1.0, Some(&same), 0.0, ANY_ANGLE));
        assert!(!entry_matches(&record, t(500.0), -1.0, Some(&shifted), 0.0, ANY_ANGLE));
    }

    #[test]
    fn recency_window_is_inclusive() {
        let record = FailureRecord { pose: at(0.0, 0.0), at: t(1.0) };
        assert!(entry_matches(&record, t(11.0), 10.0, None, -1.0, ANY_ANGLE));
        assert!(!entry_matches(&record, t(11.5), 10.0, None, -1.0, ANY_ANGLE));
    }

    #[test]
    fn recency_boundary_holds_for_inexact_seconds() {
        let record = FailureRecord { pose: at(0.0, 0.0), at: t(0.3) };
        let edge = t(0.3) + 0.6;
        assert!(entry_matches(&record, edge, 0.6, None, -1.0, ANY_ANGLE));
        assert!(!entry_matches(&record, t(edge.secs() + 1e-9), 0.6, None, -1.0, ANY_ANGLE));
    }

    #[test]
    fn angle_filter() {
        let record = FailureRecord { pose: at(0.0, 0.0), at: t(0.0) };
        let mut query = at(0.0, 0.0);
        query.yaw = 0.3;
        assert!(!entry_matches(&record, t(0.0), -1.0, Some(&query), -1.0, 0.2));
        assert!(entry_matches(&record, t(0.0), -1.0, Some(&query), -1.0, 0.5));
    }

    #[test]
    fn cap_evicts_oldest() {
        let world = empty_world().with_object(cube(1, 100.0, 0.0));
        let mut wb = Whiteboard::default();
        wb.set_failed_to_use(ObjectId(1), ObjectUseAction::PickUpObject, None, &world, t(1.0)).unwrap();
        wb.set_failed_to_use(ObjectId(1), ObjectUseAction::PickUpObject, None, &world, t(2.0)).unwrap();
        let kept: Vec<_> = wb.failures().records(ObjectId(1), ObjectUseAction::PickUpObject).collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].at, t(2.0));
    }

    #[test]
    fn place_at_keeps_ten() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        for i in 0..12 {
            let loc = Some(at(i as f32 * 100.0, 0.0));
            wb.set_failed_to_use(ObjectId(1), ObjectUseAction::PlaceObjectAt, loc, &world, t(i as f64)).unwrap();
        }
        let kept: Vec<_> = wb.failures().records(ObjectId(1), ObjectUseAction::PlaceObjectAt).collect();
        assert_eq!(kept.len(), 10);
        assert_eq!(kept[0].at, t(2.0));
    }

    #[test]
    fn place_at_requires_location() {
        let world = empty_world().with_object(cube(1, 0.0, 0.0));
        let mut wb = Whiteboard::default();
        let err = wb
            .set_failed_to_use(ObjectId(1), ObjectUseAction::PlaceObjectAt, None, &world, t(0.0))
            .unwrap_err();
        assert!(matches!(err, WhiteboardError::LocationRequired(ObjectUseAction::PlaceObjectAt)));
    }

    #[test]
    fn unknown_object_without_location_is_an_error() {
        let mut wb = Whiteboard::default();
        let err = wb
            .set_failed_to_use(ObjectId(9), ObjectUseAction::PickUpObject, None, &empty_world(), t(0.0))
            .unwrap_err();
        assert!(matches!(err, WhiteboardError::UnknownObject(ObjectId(9))));
    }

    #[test]
    fn any_target_and_multi_reason_queries() {
        let world = empty_world().with_object(cube(3, 0.0, 0.0));
        let mut wb = Whiteboard::default();
        wb.set_failed_to_use(ObjectId(3), ObjectUseAction::StackOnObject, None, &world, t(0.0)).unwrap();

        assert!(wb.did_fail_to_use(&FailureQuery::any(ObjectUseAction::StackOnObject), t(0.0)));
        assert!(!wb.did_fail_to_use(&FailureQuery::object(ObjectId(3), ObjectUseAction::PickUpObject), t(0.0)));
        let either = FailureQuery::object(ObjectId(3), ObjectUseAction::PickUpObject)
            .or_action(ObjectUseAction::StackOnObject);
        assert!(wb.did_fail_to_use(&either, t(0.0)));
        assert!(!wb.did_fail_to_use(&FailureQuery::object(ObjectId(4), ObjectUseAction::StackOnObject), t(0.0)));
    }
}

// ── Possible objects ──────────────────────────────────────────────────────────

#[cfg(test)]
mod possible_tests {
    use ai_core::{ObjectType, OriginId, Quad2};

    use super::helpers::*;
    use crate::{Whiteboard, WhiteboardFact};

    #[test]
    fn nearby_sightings_merge_into_one() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        assert!(wb.consider_new_possible_object(CUBE, at(100.0, 0.0), &world, t(0.0)));
        assert!(wb.consider_new_possible_object(CUBE, at(120.0, 0.0), &world, t(0.1)));
        assert_eq!(wb.possible_objects().len(), 1);
        assert_eq!(wb.possible_objects()[0].pose, at(120.0, 0.0));
    }

    #[test]
    fn distinct_spots_and_types_are_kept_apart() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        wb.consider_new_possible_object(CUBE, at(100.0, 0.0), &world, t(0.0));
        wb.consider_new_possible_object(CUBE, at(300.0, 0.0), &world, t(0.0));
        wb.consider_new_possible_object(ObjectType(2), at(100.0, 0.0), &world, t(0.0));
        assert_eq!(wb.possible_objects().len(), 3);
    }

    #[test]
    fn tilted_or_high_sightings_are_ignored() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        assert!(!wb.consider_new_possible_object(CUBE, at(100.0, 0.0).with_tilt(0.5), &world, t(0.0)));
        assert!(!wb.consider_new_possible_object(CUBE, at(100.0, 0.0).shifted(0.0, 0.0, 40.0), &world, t(0.0)));
        assert!(wb.possible_objects().is_empty());
    }

    #[test]
    fn located_object_explains_sighting() {
        let world = empty_world().with_object(cube(1, 100.0, 0.0));
        let mut wb = Whiteboard::default();
        assert!(!wb.consider_new_possible_object(CUBE, at(110.0, 0.0), &world, t(0.0)));
        assert!(wb.possible_objects().is_empty());
    }

    #[test]
    fn oldest_dropped_past_cap() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        for i in 0..11 {
            wb.consider_new_possible_object(CUBE, at(i as f32 * 100.0, 0.0), &world, t(0.0));
        }
        assert_eq!(wb.possible_objects().len(), 10);
        assert_eq!(wb.possible_objects()[0].pose, at(100.0, 0.0));
    }

    #[test]
    fn stale_origin_garbage_collected_on_update() {
        let mut world = empty_world();
        let mut wb = Whiteboard::default();
        wb.consider_new_possible_object(CUBE, at(100.0, 0.0), &world, t(0.0));
        world.delocalize(OriginId(2));
        wb.update(&world, t(1.0));
        assert!(wb.possible_objects().is_empty());
    }

    #[test]
    fn facts_confirm_and_clear_hypotheses() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        wb.consider_new_possible_object(CUBE, at(100.0, 0.0), &world, t(0.0));
        wb.consider_new_possible_object(CUBE, at(500.0, 0.0), &world, t(0.0));

        wb.handle_fact(&WhiteboardFact::ObservedObject { object_type: CUBE, pose: at(105.0, 0.0) }, &world, t(1.0));
        assert_eq!(wb.possible_objects().len(), 1);

        let quad = Quad2::rect([400.0, -50.0], [600.0, 50.0], ORIGIN);
        wb.handle_fact(&WhiteboardFact::ClearedArea { quad }, &world, t(2.0));
        assert!(wb.possible_objects().is_empty());
    }

    #[test]
    fn searched_spot_suppressed_until_timeout() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        wb.consider_new_possible_object(CUBE, at(200.0, 0.0), &world, t(0.0));
        wb.finished_search_for_possible_object(CUBE, at(200.0, 0.0), t(1.0));
        assert!(wb.possible_objects().is_empty());

        assert!(!wb.consider_new_possible_object(CUBE, at(220.0, 0.0), &world, t(5.0)));
        assert!(wb.consider_new_possible_object(ObjectType(2), at(220.0, 0.0), &world, t(5.0)));

        wb.update(&world, t(40.0));
        assert!(wb.consider_new_possible_object(CUBE, at(220.0, 0.0), &world, t(40.0)));
    }

    #[test]
    fn possible_objects_filtered_by_origin() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        wb.consider_new_possible_object(CUBE, at(100.0, 0.0), &world, t(0.0));
        assert_eq!(wb.possible_objects_in_origin(ORIGIN).count(), 1);
        assert_eq!(wb.possible_objects_in_origin(OriginId(7)).count(), 0);
    }
}

// ── Beacons ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod beacon_tests {
    use ai_core::{ObjectId, OriginId, Pose3d};

    use super::helpers::*;
    use crate::{Beacon, Whiteboard, WhiteboardError, WhiteboardFact};

    #[test]
    fn center_and_boundary_are_inside() {
        let beacon = Beacon::new(at(0.0, 0.0), 100.0);
        assert!(beacon.is_loc_within(&at(0.0, 0.0)));
        assert!(beacon.is_loc_within(&at(100.0, 0.0)));
        assert!(!beacon.is_loc_within(&at(100.5, 0.0)));
        assert!(!beacon.is_loc_within(&Pose3d::at(0.0, 0.0, OriginId(2))));
        assert!(!beacon.is_loc_within_threshold(&at(95.0, 0.0), 10.0));
    }

    #[test]
    fn usable_cubes_outside_beacon() {
        let mut world = empty_world()
            .with_object(cube(1, 20.0, 0.0))
            .with_object(cube(2, 500.0, 0.0));
        let mut wb = Whiteboard::default();
        assert!(!wb.are_all_cubes_in_beacons(&world));
        assert_eq!(wb.find_usable_cubes_out_of_beacons(&world, t(0.0)).len(), 2);

        wb.add_beacon(Beacon::new(at(0.0, 0.0), 100.0));
        assert_eq!(wb.find_usable_cubes_out_of_beacons(&world, t(0.0)), vec![ObjectId(2)]);
        assert_eq!(wb.find_cubes_in_beacon(&wb.beacons()[0], &world), vec![ObjectId(1)]);
        assert!(!wb.are_all_cubes_in_beacons(&world));

        world.upsert(cube(2, 30.0, 30.0));
        assert!(wb.find_usable_cubes_out_of_beacons(&world, t(0.0)).is_empty());
        assert!(wb.are_all_cubes_in_beacons(&world));
    }

    #[test]
    fn carried_cube_counts_as_usable() {
        let mut world = empty_world()
            .with_object(cube(1, 500.0, 0.0))
            .with_object(cube(2, 600.0, 0.0));
        world.carrying = Some(ObjectId(2));
        let mut wb = Whiteboard::default();
        wb.add_beacon(Beacon::new(at(0.0, 0.0), 100.0));
        assert_eq!(wb.find_usable_cubes_out_of_beacons(&world, t(0.0)), vec![ObjectId(2)]);
    }

    #[test]
    fn location_failure_needs_an_active_beacon() {
        let mut wb = Whiteboard::default();
        assert!(matches!(
            wb.failed_to_find_location_in_beacon(t(0.0)),
            Err(WhiteboardError::NoActiveBeacon)
        ));
        wb.add_beacon(Beacon::new(at(0.0, 0.0), 100.0));
        wb.add_beacon(Beacon::new(at(900.0, 0.0), 100.0));
        wb.failed_to_find_location_in_beacon(t(3.0)).unwrap();
        let active = wb.active_beacon().unwrap();
        assert_eq!(active.pose, at(0.0, 0.0));
        assert!(active.failed_to_find_location_within(t(5.0), 5.0));
        assert!(!wb.beacons()[1].failed_to_find_location_within(t(5.0), 5.0));
    }

    #[test]
    fn delocalization_clears_beacons() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        wb.add_beacon(Beacon::new(at(0.0, 0.0), 100.0));
        wb.handle_fact(&WhiteboardFact::RobotDelocalized, &world, t(1.0));
        assert!(wb.active_beacon().is_none());
    }
}

// ── Intention cache ───────────────────────────────────────────────────────────

#[cfg(test)]
mod intention_tests {
    use std::f32::consts::FRAC_PI_2;

    use ai_core::ObjectId;

    use super::helpers::*;
    use crate::{ObjectUseAction, ObjectUseIntention, Whiteboard, WhiteboardError, WorldObject};

    fn two_cube_world() -> crate::MemoryWorld {
        empty_world()
            .with_object(cube(1, 300.0, 0.0))
            .with_object(cube(2, 100.0, 0.0))
    }

    #[test]
    fn best_is_closest_valid_object() {
        let world = two_cube_world();
        let mut wb = Whiteboard::default();
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), None);
        wb.update(&world, t(0.0));
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), Some(ObjectId(2)));
        assert_eq!(wb.valid_objects_for_action(ObjectUseIntention::PickUpAnyObject).len(), 2);
    }

    #[test]
    fn cache_only_changes_on_update() {
        let mut world = two_cube_world();
        let mut wb = Whiteboard::default();
        wb.update(&world, t(0.0));
        world.remove(ObjectId(2));
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), Some(ObjectId(2)));
        wb.update(&world, t(0.1));
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), Some(ObjectId(1)));
    }

    #[test]
    fn recent_failure_excludes_object() {
        let world = two_cube_world();
        let mut wb = Whiteboard::default();
        wb.set_failed_to_use(ObjectId(2), ObjectUseAction::PickUpObject, None, &world, t(0.0)).unwrap();
        wb.update(&world, t(1.0));
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), Some(ObjectId(1)));
        assert!(!wb.is_object_valid_for_intention(ObjectId(2), ObjectUseIntention::PickUpAnyObject));
        // roll failures are tracked separately
        assert!(wb.is_object_valid_for_intention(ObjectId(2), ObjectUseIntention::RollObjectNoAxisCheck));

        wb.update(&world, t(10.5));
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), Some(ObjectId(2)));
    }

    #[test]
    fn axis_checks() {
        let mut on_side = cube(1, 100.0, 0.0);
        on_side.pose = on_side.pose.with_tilt(FRAC_PI_2);
        let world = empty_world().with_object(on_side);
        let mut wb = Whiteboard::default();
        wb.update(&world, t(0.0));
        assert!(wb.is_object_valid_for_intention(ObjectId(1), ObjectUseIntention::RollObjectWithAxisCheck));
        assert!(!wb.is_object_valid_for_intention(ObjectId(1), ObjectUseIntention::PickUpObjectWithAxisCheck));
        assert!(wb.is_object_valid_for_intention(ObjectId(1), ObjectUseIntention::PickUpAnyObject));
    }

    #[test]
    fn stacked_cubes() {
        let mut top = cube(3, 100.0, 0.0);
        top.pose = top.pose.shifted(0.0, 0.0, 44.0);
        let world = empty_world().with_object(cube(2, 100.0, 0.0)).with_object(top);
        let mut wb = Whiteboard::default();
        wb.update(&world, t(0.0));
        let pick_any: Vec<_> = wb.valid_objects_for_action(ObjectUseIntention::PickUpAnyObject).iter().copied().collect();
        assert_eq!(pick_any, vec![ObjectId(3)]);
        assert!(wb.valid_objects_for_action(ObjectUseIntention::PickUpObjectWithAxisCheck).is_empty());
    }

    #[test]
    fn locked_features_and_carrying() {
        let mut world = two_cube_world();
        world.wheelie_unlocked = false;
        world.carrying = Some(ObjectId(1));
        let mut wb = Whiteboard::default();
        wb.update(&world, t(0.0));
        assert!(wb.valid_objects_for_action(ObjectUseIntention::PopAWheelieOnObject).is_empty());
        assert!(wb.valid_objects_for_action(ObjectUseIntention::PickUpAnyObject).is_empty());
    }

    #[test]
    fn chargers_are_never_valid() {
        let charger = WorldObject::new(
            ObjectId(5),
            CUBE,
            crate::ObjectFamily::Charger,
            at(50.0, 0.0),
        );
        let world = empty_world().with_object(charger);
        let mut wb = Whiteboard::default();
        wb.update(&world, t(0.0));
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::RollObjectNoAxisCheck), None);
    }

    #[test]
    fn tap_pins_best_until_cleared() {
        let world = two_cube_world();
        let mut wb = Whiteboard::default();
        wb.update(&world, t(0.0));
        wb.set_object_tap_interaction(ObjectId(1));
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), Some(ObjectId(1)));
        wb.update(&world, t(0.1));
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), Some(ObjectId(1)));
        wb.clear_object_tap_interaction(&world, t(0.2));
        assert_eq!(wb.tap_object(), None);
        assert_eq!(wb.best_object_for_action(ObjectUseIntention::PickUpAnyObject), Some(ObjectId(2)));
    }

    #[test]
    fn intention_names_parse() {
        for i in ObjectUseIntention::ALL {
            assert_eq!(i.name().parse::<ObjectUseIntention>().unwrap(), i);
        }
        assert!(matches!(
            "Juggle".parse::<ObjectUseIntention>(),
            Err(WhiteboardError::UnknownIntention(_))
        ));
    }
}

// ── Strategy-facing timestamps ────────────────────────────────────────────────

#[cfg(test)]
mod fact_tests {
    use super::helpers::*;
    use crate::{Whiteboard, WhiteboardFact};

    #[test]
    fn timestamps_recorded_from_facts() {
        let world = empty_world();
        let mut wb = Whiteboard::default();
        wb.handle_fact(&WhiteboardFact::OffTreadsStateChanged { on_treads: false }, &world, t(1.0));
        assert_eq!(wb.returned_to_treads_at(), None);
        wb.handle_fact(&WhiteboardFact::OffTreadsStateChanged { on_treads: true }, &world, t(2.0));
        assert_eq!(wb.returned_to_treads_at(), Some(t(2.0)));

        wb.handle_fact(&WhiteboardFact::GotOffCharger, &world, t(3.0));
        assert_eq!(wb.got_off_charger_at(), Some(t(3.0)));

        wb.handle_fact(&WhiteboardFact::EdgeInfo { closest_edge_mm: 42.0 }, &world, t(4.0));
        let edge = wb.edge_info().unwrap();
        assert_eq!(edge.closest_edge_mm, 42.0);
        assert_eq!(edge.at, t(4.0));
    }
}
