// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use locus_common::matching::mock_locate_env::{
        MOCK_EXIT1, MOCK_MASTER_ROOM, MOCK_OTHER_PLAYER, MOCK_PLAYER, MOCK_ROOM1, MOCK_ROOM2,
        MOCK_THING1, MOCK_THING2, MOCK_THING3, MockWorld, setup_mock_environment,
    };
    use locus_common::model::{
        AnyObject, Exit, LocateFlags, ObjFlag, Player, Room, Scope, Thing, TypePreference,
        WorldStateError,
    };
    use locus_kernel::{LocateConfig, LocateError, LocateOutcome, Locator};
    use locus_var::DbRef;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use tokio_util::sync::CancellationToken;
    use tracing_subscriber::EnvFilter;

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn locator(world: MockWorld) -> Locator<MockWorld> {
        init_logging();
        Locator::new(world, LocateConfig::default())
    }

    fn obj(locator: &Locator<MockWorld>, dbref: DbRef) -> AnyObject {
        locator.env().get(dbref).cloned().unwrap()
    }

    /// Locate from the porcupine's point of view, acting as the porcupine.
    async fn locate_as_player(
        locator: &Locator<MockWorld>,
        name: &str,
        flags: LocateFlags,
    ) -> LocateOutcome {
        let player = obj(locator, MOCK_PLAYER);
        locator.locate(&player, &player, name, flags).await.unwrap()
    }

    fn found(outcome: &LocateOutcome) -> Option<DbRef> {
        outcome.found().map(|o| o.dbref())
    }

    fn world_with(things: &[(i32, &str)]) -> MockWorld {
        let mut world = setup_mock_environment();
        for (id, name) in things {
            world.insert(Thing::new(DbRef::mk_id(*id), name, MOCK_ROOM1));
        }
        world
    }

    #[tokio::test]
    async fn absolute_reference_bypasses_scans() {
        let locator = locator(setup_mock_environment());
        let flags = LocateFlags::new().with_scope(Scope::Absolute);
        // thing3 is in another room, and no name scan is enabled.
        let outcome = locate_as_player(&locator, "#32", flags).await;
        assert_eq!(found(&outcome), Some(MOCK_THING3));

        let outcome = locate_as_player(&locator, "#999", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn object_id_must_match_creation() {
        let mut world = setup_mock_environment();
        world.insert(
            AnyObject::from(Thing::new(MOCK_THING3, "thing3", MOCK_ROOM2)).with_created(1234),
        );
        let locator = locator(world);
        let flags = LocateFlags::new().with_scope(Scope::Absolute);
        let outcome = locate_as_player(&locator, "#32:1234", flags).await;
        assert_eq!(found(&outcome), Some(MOCK_THING3));
        let outcome = locate_as_player(&locator, "#32:999", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn dbref_in_contents_ignores_perception() {
        let mut world = setup_mock_environment();
        world.make_imperceptible(MOCK_THING2);
        let locator = locator(world);
        let flags = LocateFlags::all().without_scope(Scope::Absolute);
        let outcome = locate_as_player(&locator, "#31", flags).await;
        assert_eq!(found(&outcome), Some(MOCK_THING2));
        let outcome = locate_as_player(&locator, "thing2", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[test_case(&[(100, "Apple"), (101, "App")]; "partial scanned first")]
    #[test_case(&[(101, "App"), (100, "Apple")]; "exact scanned first")]
    #[tokio::test]
    async fn exact_beats_partial(things: &[(i32, &str)]) {
        let locator = locator(world_with(things));
        let outcome = locate_as_player(&locator, "app", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(101)));
    }

    #[tokio::test]
    async fn same_name_is_ambiguous() {
        let locator = locator(world_with(&[(100, "Ball"), (101, "Ball")]));
        let outcome = locate_as_player(&locator, "ball", LocateFlags::all()).await;
        assert_eq!(outcome, LocateOutcome::Ambiguous);
        assert_eq!(outcome.error_code(), "#-2 AMBIGUOUS MATCH");
    }

    #[tokio::test]
    async fn use_last_if_ambiguous() {
        let locator = locator(world_with(&[(100, "Ball"), (101, "Ball")]));
        let flags = LocateFlags::all().with_preference(TypePreference::UseLastIfAmbiguous);
        let outcome = locate_as_player(&locator, "ball", flags).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(101)));
    }

    #[tokio::test]
    async fn type_preference_resolves_tie() {
        let lobby_room = DbRef::mk_id(100);
        let visitor = DbRef::mk_id(101);
        let lobby_thing = DbRef::mk_id(102);
        let world = MockWorld::new()
            .with(Room::new(lobby_room, "Lobby"))
            .with(Player::new(visitor, "visitor", lobby_room))
            .with(Thing::new(lobby_thing, "Lobby", lobby_room));
        let locator = locator(world);
        let looker = obj(&locator, visitor);

        let things = LocateFlags::all().with_preference(TypePreference::Things);
        let outcome = locator.locate(&looker, &looker, "lobby", things).await.unwrap();
        assert_eq!(found(&outcome), Some(lobby_thing));

        let rooms = LocateFlags::all().with_preference(TypePreference::Rooms);
        let outcome = locator.locate(&looker, &looker, "lobby", rooms).await.unwrap();
        assert_eq!(found(&outcome), Some(lobby_room));

        let outcome = locator
            .locate(&looker, &looker, "lobby", LocateFlags::all())
            .await
            .unwrap();
        assert_eq!(outcome, LocateOutcome::Ambiguous);
    }

    #[tokio::test]
    async fn fail_if_not_preferred_skips_other_kinds() {
        let locator = locator(setup_mock_environment());
        let flags = LocateFlags::all()
            .with_preference(TypePreference::Players)
            .with_preference(TypePreference::FailIfNotPreferred);
        let outcome = locate_as_player(&locator, "thing2", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[test_case("1st coin", 100)]
    #[test_case("2nd coin", 101)]
    #[test_case("3rd coin", 102)]
    #[tokio::test]
    async fn ordinal_selects_in_scan_order(name: &str, expected: i32) {
        let locator = locator(world_with(&[(100, "Coin"), (101, "Coin"), (102, "Coin")]));
        let outcome = locate_as_player(&locator, name, LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(expected)));
    }

    #[tokio::test]
    async fn ordinal_past_the_end_is_not_found() {
        let locator = locator(world_with(&[(100, "Coin"), (101, "Coin")]));
        let outcome = locate_as_player(&locator, "4th coin", LocateFlags::all()).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn malformed_ordinal_is_literal() {
        let locator = locator(world_with(&[(100, "2st coin"), (101, "coin")]));
        let outcome = locate_as_player(&locator, "2st coin", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(100)));
    }

    #[tokio::test]
    async fn my_prefix_searches_inventory() {
        let locator = locator(world_with(&[(100, "thing1 decoy")]));
        let outcome = locate_as_player(&locator, "thing1", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(MOCK_THING1));
        let outcome = locate_as_player(&locator, "my thing", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(MOCK_THING1));
    }

    #[tokio::test]
    async fn imperceptible_objects_do_not_count() {
        let mut world = world_with(&[(100, "Ball"), (101, "Balloon")]);
        world.make_imperceptible(DbRef::mk_id(100));
        let locator = locator(world);
        let outcome = locate_as_player(&locator, "ball", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(101)));
    }

    #[tokio::test]
    async fn me_and_here_need_their_scopes() {
        let locator = locator(world_with(&[(100, "meerkat"), (101, "heron")]));

        let outcome = locate_as_player(&locator, "mE", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(MOCK_PLAYER));
        let outcome = locate_as_player(&locator, "HERE", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(MOCK_ROOM1));

        let no_me = LocateFlags::all().without_scope(Scope::Me);
        let outcome = locate_as_player(&locator, "me", no_me).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(100)));

        let no_here = LocateFlags::all().without_scope(Scope::Here);
        let outcome = locate_as_player(&locator, "her", no_here).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(101)));
        let outcome = locate_as_player(&locator, "here", no_here).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[test_case("E", Some(MOCK_EXIT1); "exit preference with default scope")]
    #[test_case("Ei", None; "exit preference never enables a scan")]
    #[test_case("e", Some(MOCK_EXIT1); "exit scope alone")]
    #[test_case("eE", Some(MOCK_EXIT1); "exit scope and preference")]
    #[test_case("eT", None; "thing preference shuts out exits")]
    #[tokio::test]
    async fn exit_letters(letters: &str, expected: Option<DbRef>) {
        let locator = locator(setup_mock_environment());
        let flags: LocateFlags = letters.parse().unwrap();
        let outcome = locate_as_player(&locator, "north", flags).await;
        assert_eq!(found(&outcome), expected);
    }

    #[tokio::test]
    async fn exit_alias_matches_but_never_partially() {
        let locator = locator(setup_mock_environment());
        let outcome = locate_as_player(&locator, "N", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(MOCK_EXIT1));
        let outcome = locate_as_player(&locator, "nor", LocateFlags::all()).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn container_matches_location_name() {
        let locator = locator(setup_mock_environment());
        let outcome = locate_as_player(&locator, "room1", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(MOCK_ROOM1));
        let flags = LocateFlags::all().without_scope(Scope::Container);
        let outcome = locate_as_player(&locator, "room1", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    fn world_with_global_exits() -> MockWorld {
        let zone = DbRef::mk_id(50);
        let mut world = setup_mock_environment();
        world.insert(AnyObject::from(Room::new(MOCK_ROOM1, "room1")).with_zone(zone));
        world.insert(Room::new(zone, "Zone"));
        world.insert(Exit::new(DbRef::mk_id(51), "out", zone, MOCK_ROOM2));
        world.insert(Exit::new(DbRef::mk_id(52), "out", MOCK_MASTER_ROOM, MOCK_ROOM2));
        world.insert(Exit::new(DbRef::mk_id(53), "out", MOCK_ROOM1, MOCK_ROOM2));
        world
    }

    #[test_case("1st out", 51; "zone exits first")]
    #[test_case("2nd out", 52; "master room exits second")]
    #[test_case("3rd out", 53; "room exits last")]
    #[tokio::test]
    async fn global_exit_order(name: &str, expected: i32) {
        let locator = locator(world_with_global_exits());
        let outcome = locate_as_player(&locator, name, LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(expected)));
    }

    #[tokio::test]
    async fn global_exits_tie() {
        let locator = locator(world_with_global_exits());
        let outcome = locate_as_player(&locator, "out", LocateFlags::all()).await;
        assert_eq!(outcome, LocateOutcome::Ambiguous);

        let flags = LocateFlags::all().with_preference(TypePreference::UseLastIfAmbiguous);
        let outcome = locate_as_player(&locator, "out", flags).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(53)));
    }

    #[tokio::test]
    async fn master_room_can_be_disabled() {
        init_logging();
        let mut world = setup_mock_environment();
        world.insert(Exit::new(DbRef::mk_id(52), "sesame", MOCK_MASTER_ROOM, MOCK_ROOM2));
        let config = LocateConfig {
            master_room: None,
            ..LocateConfig::default()
        };
        let disabled = Locator::new(world, config);
        let outcome = locate_as_player(&disabled, "sesame", LocateFlags::all()).await;
        assert_eq!(outcome, LocateOutcome::NotFound);

        let mut world = setup_mock_environment();
        world.insert(Exit::new(DbRef::mk_id(52), "sesame", MOCK_MASTER_ROOM, MOCK_ROOM2));
        let enabled = locator(world);
        let outcome = locate_as_player(&enabled, "sesame", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(52)));

        let flags = LocateFlags::all().with_scope(Scope::InventoryOnly);
        let outcome = locate_as_player(&enabled, "sesame", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn remote_contents_skips_location() {
        let locator = locator(setup_mock_environment());
        let flags = LocateFlags::new().with_scope(Scope::RemoteContents);
        let outcome = locate_as_player(&locator, "thing1", flags).await;
        assert_eq!(found(&outcome), Some(MOCK_THING1));
        let outcome = locate_as_player(&locator, "thing2", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn evaluation_gate() {
        let locator = locator(setup_mock_environment());
        let porcupine = obj(&locator, MOCK_PLAYER);
        let hedgehog = obj(&locator, MOCK_OTHER_PLAYER);

        let outcome = locator
            .locate(&hedgehog, &porcupine, "thing3", LocateFlags::all())
            .await
            .unwrap();
        assert_eq!(outcome, LocateOutcome::PermissionDenied);

        // Absolute references do not search relative to the looker.
        let flags = LocateFlags::new().with_scope(Scope::Absolute);
        let outcome = locator
            .locate(&hedgehog, &porcupine, "#32", flags)
            .await
            .unwrap();
        assert_eq!(found(&outcome), Some(MOCK_THING3));
    }

    #[tokio::test]
    async fn evaluation_gate_passes_for_wizards() {
        let mut world = setup_mock_environment();
        world.insert(
            AnyObject::from(Player::new(MOCK_PLAYER, "porcupine", MOCK_ROOM1))
                .with_flag(ObjFlag::Wizard),
        );
        let locator = locator(world);
        let porcupine = obj(&locator, MOCK_PLAYER);
        let hedgehog = obj(&locator, MOCK_OTHER_PLAYER);
        let outcome = locator
            .locate(&hedgehog, &porcupine, "thing3", LocateFlags::all())
            .await
            .unwrap();
        assert_eq!(found(&outcome), Some(MOCK_THING3));
    }

    #[tokio::test]
    async fn only_controlled() {
        let mut world = setup_mock_environment();
        world.insert(Thing::new(DbRef::mk_id(100), "widget", MOCK_ROOM1));
        world.grant_control(MOCK_PLAYER, DbRef::mk_id(100));
        let locator = locator(world);
        let flags = LocateFlags::all().with_scope(Scope::OnlyControlled);

        let outcome = locate_as_player(&locator, "me", flags).await;
        assert_eq!(found(&outcome), Some(MOCK_PLAYER));
        let outcome = locate_as_player(&locator, "here", flags).await;
        assert_eq!(outcome, LocateOutcome::PermissionDenied);
        let outcome = locate_as_player(&locator, "#32", flags).await;
        assert_eq!(outcome, LocateOutcome::PermissionDenied);

        let outcome = locate_as_player(&locator, "thing2", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
        let outcome = locate_as_player(&locator, "widget", flags).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(100)));
    }

    #[tokio::test]
    async fn nearby_only() {
        let mut world = setup_mock_environment();
        world.grant_long_fingers(MOCK_OTHER_PLAYER);
        let locator = locator(world);
        let flags = LocateFlags::new()
            .with_scope(Scope::Absolute)
            .with_scope(Scope::NearbyOnly);

        let outcome = locate_as_player(&locator, "#32", flags).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
        let outcome = locate_as_player(&locator, "#31", flags).await;
        assert_eq!(found(&outcome), Some(MOCK_THING2));

        let hedgehog = obj(&locator, MOCK_OTHER_PLAYER);
        let outcome = locator
            .locate(&hedgehog, &hedgehog, "#31", flags)
            .await
            .unwrap();
        assert_eq!(found(&outcome), Some(MOCK_THING2));
    }

    #[tokio::test]
    async fn hidden_results_degrade_to_not_found() {
        let mut world = setup_mock_environment();
        world.make_hidden(MOCK_THING2);
        let locator = locator(world);
        let outcome = locate_as_player(&locator, "thing2", LocateFlags::all()).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn dark_objects_show_in_light_rooms() {
        let mut world = setup_mock_environment();
        world.insert(
            AnyObject::from(Thing::new(DbRef::mk_id(100), "shadow", MOCK_ROOM1))
                .with_flag(ObjFlag::Dark),
        );
        world.insert(AnyObject::from(Room::new(MOCK_ROOM1, "room1")).with_flag(ObjFlag::Light));
        let locator = locator(world);
        let outcome = locate_as_player(&locator, "shadow", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(100)));
    }

    #[tokio::test]
    async fn locate_player_by_name() {
        let locator = locator(setup_mock_environment());
        let porcupine = obj(&locator, MOCK_PLAYER);

        let outcome = locator
            .locate_player(&porcupine, &porcupine, "hedgehog")
            .await
            .unwrap();
        assert_eq!(found(&outcome), Some(MOCK_OTHER_PLAYER));

        let outcome = locator
            .locate_player(&porcupine, &porcupine, "*porc")
            .await
            .unwrap();
        assert_eq!(found(&outcome), Some(MOCK_PLAYER));

        let outcome = locator
            .locate_player(&porcupine, &porcupine, "me")
            .await
            .unwrap();
        assert_eq!(outcome, LocateOutcome::NotFound);

        let outcome = locator
            .locate_player(&porcupine, &porcupine, "thing2")
            .await
            .unwrap();
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn locate_and_notify_reports_failures() {
        let locator = locator(world_with(&[(100, "Ball"), (101, "Ball")]));
        let porcupine = obj(&locator, MOCK_PLAYER);

        let outcome = locator
            .locate_and_notify(&porcupine, &porcupine, "thing2", LocateFlags::all())
            .await
            .unwrap();
        assert_eq!(found(&outcome), Some(MOCK_THING2));
        assert!(locator.env().notifications().is_empty());

        locator
            .locate_and_notify(&porcupine, &porcupine, "zebra", LocateFlags::all())
            .await
            .unwrap();
        locator
            .locate_and_notify(&porcupine, &porcupine, "ball", LocateFlags::all())
            .await
            .unwrap();
        assert_eq!(
            locator.env().notifications(),
            vec![
                (MOCK_PLAYER, "I can't see that here.".to_string()),
                (MOCK_PLAYER, "I don't know which one you mean!".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn room_of_is_bounded() {
        init_logging();
        let mut world = setup_mock_environment();
        world.insert(Thing::new(DbRef::mk_id(100), "box", MOCK_THING1));
        let config = LocateConfig {
            max_containment_depth: 1,
            ..LocateConfig::default()
        };
        let locator = Locator::new(world, config);
        let boxed = obj(&locator, DbRef::mk_id(100));
        assert_eq!(
            locator.room_of(&boxed).await,
            Err(LocateError::ContainmentLoop(DbRef::mk_id(100)))
        );
        let thing2 = obj(&locator, MOCK_THING2);
        assert_eq!(locator.room_of(&thing2).await.unwrap().dbref(), MOCK_ROOM1);
    }

    #[tokio::test]
    async fn room_of_missing_location() {
        let mut world = setup_mock_environment();
        world.insert(Thing::new(DbRef::mk_id(100), "lost", DbRef::mk_id(404)));
        let locator = locator(world);
        let lost = obj(&locator, DbRef::mk_id(100));
        assert_eq!(
            locator.room_of(&lost).await,
            Err(LocateError::World(WorldStateError::ObjectNotFound(
                DbRef::mk_id(404)
            )))
        );
    }

    #[tokio::test]
    async fn cancelled_before_scanning() {
        let locator = locator(setup_mock_environment());
        let porcupine = obj(&locator, MOCK_PLAYER);
        let token = CancellationToken::new();
        token.cancel();
        let result = locator
            .locate_cancellable(&porcupine, &porcupine, "thing2", LocateFlags::all(), &token)
            .await;
        assert_eq!(result, Err(LocateError::Cancelled));
    }

    #[tokio::test]
    async fn cancelled_mid_scan() {
        let mut world = setup_mock_environment();
        let token = CancellationToken::new();
        let cancel = token.clone();
        world.on_contents_read(MOCK_ROOM1, move || cancel.cancel());
        let locator = locator(world);
        let porcupine = obj(&locator, MOCK_PLAYER);

        // thing1 is matched in the inventory before the location contents are read.
        let result = locator
            .locate_cancellable(&porcupine, &porcupine, "thing1", LocateFlags::all(), &token)
            .await;
        assert_eq!(result, Err(LocateError::Cancelled));

        let outcome = locator
            .locate(&porcupine, &porcupine, "thing1", LocateFlags::all())
            .await
            .unwrap();
        assert_eq!(found(&outcome), Some(MOCK_THING1));
    }

    #[tokio::test]
    async fn zone_that_is_master_room_is_scanned_once() {
        let mut world = setup_mock_environment();
        world.insert(AnyObject::from(Room::new(MOCK_ROOM1, "room1")).with_zone(MOCK_MASTER_ROOM));
        world.insert(Exit::new(DbRef::mk_id(52), "sesame", MOCK_MASTER_ROOM, MOCK_ROOM2));
        let locator = locator(world);

        let outcome = locate_as_player(&locator, "sesame", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(52)));
        let outcome = locate_as_player(&locator, "1st sesame", LocateFlags::all()).await;
        assert_eq!(found(&outcome), Some(DbRef::mk_id(52)));
        let outcome = locate_as_player(&locator, "2nd sesame", LocateFlags::all()).await;
        assert_eq!(outcome, LocateOutcome::NotFound);
    }

    #[tokio::test]
    async fn storage_failure_is_fatal() {
        let mut world = setup_mock_environment();
        world.fail_reads_of(MOCK_ROOM1);
        let locator = locator(world);
        let porcupine = obj(&locator, MOCK_PLAYER);
        let result = locator
            .locate(&porcupine, &porcupine, "thing2", LocateFlags::all())
            .await;
        assert!(matches!(
            result,
            Err(LocateError::World(WorldStateError::DatabaseError(_)))
        ));
    }

    #[tokio::test]
    async fn concurrent_locates_share_one_locator() {
        let locator = Arc::new(locator(world_with(&[(100, "Ball"), (101, "Ball")])));
        let porcupine = obj(&locator, MOCK_PLAYER);

        let handles = (0..16).map(|i| {
            let locator = locator.clone();
            let porcupine = porcupine.clone();
            tokio::spawn(async move {
                let name = if i % 2 == 0 { "thing2" } else { "ball" };
                locator
                    .locate(&porcupine, &porcupine, name, LocateFlags::all())
                    .await
            })
        });
        let results = futures::future::join_all(handles).await;
        for (i, result) in results.into_iter().enumerate() {
            let outcome = result.unwrap().unwrap();
            if i % 2 == 0 {
                assert_eq!(found(&outcome), Some(MOCK_THING2));
            } else {
                assert_eq!(outcome, LocateOutcome::Ambiguous);
            }
        }
    }
}
