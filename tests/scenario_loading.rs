use std::path::PathBuf;

use frostcolony::{
    components::{BuildingKind, Clock, Position, WorkerState, TILE_SIZE},
    scenario::ScenarioLoader,
};
use tempfile::tempdir;

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn scenario_path() -> PathBuf {
    PathBuf::from("scenarios/frozen_outpost.yaml")
}

#[test]
fn scenario_loader_reads_fixture() {
    let scenario = scenario_loader().load(scenario_path()).expect("scenario parses");
    assert_eq!(scenario.name, "frozen_outpost");
    assert_eq!(scenario.seed, 1337);
    assert_eq!(scenario.ticks(None), 36_000);
    assert_eq!(scenario.ticks(Some(10)), 10);
    assert_eq!(scenario.workers.count, 5);
    assert_eq!(scenario.buildings.len(), 2);
    assert_eq!(scenario.commands.len(), 2);
}

#[test]
fn fixture_builds_the_stock_colony() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let world = scenario.build_world();

    assert_eq!(world.clock(), Clock::new(1, 6, 0));
    assert_eq!(world.temperature().celsius(), -10);
    assert_eq!(world.resources().coal, 50);
    assert_eq!(world.resources().wood, 100);
    assert_eq!(world.resources().food, 30);

    let positions: Vec<Position> = world.workers().iter().map(|w| w.position).collect();
    assert_eq!(
        positions,
        (0..5)
            .map(|i| Position::new(100.0 + 50.0 * i as f32, 200.0))
            .collect::<Vec<_>>()
    );
    assert!(world.workers().iter().all(|w| w.state == WorkerState::Idle));

    let kinds: Vec<BuildingKind> = world.buildings().iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BuildingKind::House, BuildingKind::Storage]);
}

#[test]
fn generated_trees_respect_playfield_and_buildings() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let world = scenario.build_world();
    let playfield = world.playfield();

    assert!(world.trees().len() <= 12);
    for tree in world.trees() {
        let p = tree.position;
        assert!(p.x >= 50.0 && p.x <= playfield.width - 100.0, "x out of range: {p:?}");
        assert!(
            p.y >= playfield.ui_margin + 50.0 && p.y <= playfield.height - 100.0,
            "y out of range: {p:?}"
        );
        for building in world.buildings() {
            assert!(
                !building.position.within_box(p, TILE_SIZE * 2.0),
                "tree {p:?} crowds building at {:?}",
                building.position
            );
        }
    }
}

#[test]
fn loader_reports_missing_file() {
    let err = scenario_loader()
        .load("scenarios/does_not_exist.yaml")
        .unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.yaml"));
}

#[test]
fn loader_rejects_colony_without_workers() {
    let temp = tempdir().unwrap();
    std::fs::write(
        temp.path().join("empty.yaml"),
        "name: empty\nworkers:\n  count: 0\n",
    )
    .unwrap();

    let err = ScenarioLoader::new(temp.path())
        .load("empty.yaml")
        .unwrap_err();
    assert!(
        format!("{err:#}").contains("at least one worker"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn loader_rejects_malformed_commands() {
    let temp = tempdir().unwrap();
    std::fs::write(
        temp.path().join("bad.yaml"),
        "name: bad\ncommands:\n  - { tick: 3, command: { type: demolish } }\n",
    )
    .unwrap();

    assert!(ScenarioLoader::new(temp.path()).load("bad.yaml").is_err());
}
