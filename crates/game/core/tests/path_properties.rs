use std::collections::HashSet;

use proptest::prelude::*;
use tactics_core::combat::{attack_power, critical_rate, hit_rate};
use tactics_core::{
    GameConfig, Grid, MapDimensions, NodeId, PathSolver, Team, TerrainKind, TerrainProfile,
    TerrainTable, UnitCombatProfile, UnitStats, Weapon, WeaponType,
};

fn terrain() -> impl Strategy<Value = TerrainKind> {
    prop::sample::select(vec![
        TerrainKind::Plain,
        TerrainKind::Forest,
        TerrainKind::River,
        TerrainKind::Fort,
        TerrainKind::Unwalkable,
        TerrainKind::Bridge,
    ])
}

/// A random map plus a start node on it.
fn map() -> impl Strategy<Value = (Grid, NodeId)> {
    (1u32..8, 1u32..8)
        .prop_flat_map(|(w, h)| {
            let count = (w * h) as usize;
            (
                Just(MapDimensions::new(w, h)),
                prop::collection::vec(terrain(), count),
                0..count,
            )
        })
        .prop_map(|(dimensions, tiles, start)| {
            let grid = Grid::from_terrain(
                dimensions,
                &tiles,
                &TerrainTable::standard(),
                &GameConfig::default(),
            )
            .unwrap();
            (grid, NodeId(start as u32))
        })
}

fn uniform_map() -> impl Strategy<Value = (Grid, NodeId)> {
    (1u32..8, 1u32..8)
        .prop_flat_map(|(w, h)| (Just(MapDimensions::new(w, h)), 0..(w * h)))
        .prop_map(|(dimensions, start)| {
            let grid = Grid::uniform(
                dimensions,
                TerrainKind::Plain,
                &TerrainTable::standard(),
                &GameConfig::default(),
            );
            (grid, NodeId(start))
        })
}

fn weapon() -> impl Strategy<Value = WeaponType> {
    prop::sample::select(vec![
        WeaponType::Sword,
        WeaponType::Lance,
        WeaponType::Axe,
        WeaponType::Tome,
    ])
}

fn fighter() -> impl Strategy<Value = UnitCombatProfile> {
    (
        prop::array::uniform8(-1000i32..1000),
        weapon(),
        -50i32..50,
    )
        .prop_map(|(s, kind, might)| UnitCombatProfile {
            name: "fuzz".into(),
            team: Team::Player,
            stats: UnitStats {
                hp: 20,
                strength: s[0],
                magic: s[1],
                defense: s[2],
                resistance: s[3],
                hit: s[4],
                avoid: s[5],
                crit: s[6],
                skill: s[7],
                luck: s[0].wrapping_sub(s[7]),
                ..Default::default()
            },
            weapon: Weapon::new("fuzz", kind, might),
        })
}

proptest! {
    #[test]
    fn zero_budget_reaches_only_start((grid, start) in map()) {
        let mut solver = PathSolver::new(&GameConfig::default());
        let range = solver.compute_movement_range(&grid, start, 0, 0).unwrap();
        prop_assert_eq!(range.reachable(), &[start][..]);
        prop_assert_eq!(range.reconstruct_path(start), vec![start]);
    }

    #[test]
    fn uniform_paths_have_distance_plus_one_nodes(
        (grid, start) in uniform_map(),
        budget in 0u32..10,
    ) {
        let mut solver = PathSolver::new(&GameConfig::default());
        let range = solver.compute_movement_range(&grid, start, budget, 0).unwrap();

        for &node in range.reachable() {
            let path = range.reconstruct_path(node);
            let distance = range.distance(node).unwrap();
            prop_assert_eq!(path.len() as u32, distance + 1);
            prop_assert_eq!(path.first().copied(), Some(start));
            prop_assert_eq!(path.last().copied(), Some(node));
        }
    }

    #[test]
    fn larger_budget_never_shrinks_reachable(
        (grid, start) in map(),
        budget in 0u32..12,
        extra in 0u32..12,
    ) {
        let mut solver = PathSolver::new(&GameConfig::default());
        let small: HashSet<_> = solver
            .compute_movement_range(&grid, start, budget, 0)
            .unwrap()
            .reachable()
            .iter()
            .copied()
            .collect();
        let large: HashSet<_> = solver
            .compute_movement_range(&grid, start, budget + extra, 0)
            .unwrap()
            .reachable()
            .iter()
            .copied()
            .collect();
        prop_assert!(small.is_subset(&large));
    }

    #[test]
    fn result_sets_are_unique_and_stable(
        (grid, start) in map(),
        budget in 0u32..12,
        reach in 0u32..6,
    ) {
        let mut solver = PathSolver::new(&GameConfig::default());
        let first = solver.compute_movement_range(&grid, start, budget, reach).unwrap();
        let second = solver.compute_movement_range(&grid, start, budget, reach).unwrap();

        let unique: HashSet<_> = first.reachable().iter().collect();
        prop_assert_eq!(unique.len(), first.reachable().len());
        let unique: HashSet<_> = first.in_range().iter().collect();
        prop_assert_eq!(unique.len(), first.in_range().len());
        prop_assert_eq!(first.reachable(), second.reachable());
        prop_assert_eq!(first.in_range(), second.in_range());
    }

    #[test]
    fn battle_numbers_stay_in_bounds(
        attacker in fighter(),
        defender in fighter(),
        boost in -20i32..20,
    ) {
        let config = GameConfig::default();
        let terrain = TerrainProfile::new(1, boost, 0, 0);
        prop_assert!(attack_power(&attacker, &defender, &terrain) >= 0);
        prop_assert!((0..=100).contains(&hit_rate(&attacker, &defender, &config)));
        prop_assert!((0..=100).contains(&critical_rate(&attacker, &defender, &config)));
    }
}
