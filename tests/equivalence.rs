//! Optimality equivalence between the two planning strategies.
//!
//! For any fixed hazard set, goal, and start, the cached-BFS and per-turn
//! A* strategies must walk routes of equal length, and that length must
//! match a reference BFS distance computed independently.

use marga_nav::config::{PlannerConfig, StrategyKind};
use marga_nav::planning::shortest_distance;
use marga_nav::{Action, AgentController, Cell, GridModel, TurnRecord};

/// A fixed scenario: hazards all revealed on the first turn.
struct Scenario {
    name: &'static str,
    goal: Cell,
    hazards: Vec<Cell>,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "open grid",
            goal: Cell::new(4, 4),
            hazards: vec![],
        },
        Scenario {
            name: "far corner",
            goal: Cell::new(8, 8),
            hazards: vec![],
        },
        Scenario {
            name: "wall with one gap",
            goal: Cell::new(8, 0),
            hazards: (0..=7).map(|y| Cell::new(4, y)).collect(),
        },
        Scenario {
            name: "staggered walls",
            goal: Cell::new(8, 8),
            hazards: (1..=8)
                .map(|y| Cell::new(2, y))
                .chain((0..=7).map(|y| Cell::new(5, y)))
                .collect(),
        },
        Scenario {
            name: "pocket around goal approach",
            goal: Cell::new(7, 1),
            hazards: vec![
                Cell::new(6, 0),
                Cell::new(6, 2),
                Cell::new(7, 2),
                Cell::new(8, 2),
            ],
        },
        Scenario {
            name: "goal sealed off",
            goal: Cell::new(8, 8),
            hazards: vec![Cell::new(7, 8), Cell::new(7, 7), Cell::new(8, 7)],
        },
    ]
}

fn hazard_batch(hazards: &[Cell]) -> Vec<TurnRecord> {
    hazards
        .iter()
        .map(|c| TurnRecord::parse(&format!("{} {} S", c.x, c.y)).unwrap())
        .collect()
}

/// Walk a full run under one strategy; returns (moves, reported distance).
fn walk(scenario: &Scenario, strategy: StrategyKind) -> (usize, Option<i32>) {
    let config = PlannerConfig {
        strategy,
        ..PlannerConfig::default()
    };
    let mut agent = AgentController::new(scenario.goal, &config);
    let mut batch = hazard_batch(&scenario.hazards);
    let mut moves = 0;

    loop {
        let action = agent.decide(&batch);
        batch = Vec::new();
        match action {
            Action::Move(step) => {
                moves += 1;
                assert!(
                    agent.grid().is_legal(step),
                    "{}: illegal move to ({}, {})",
                    scenario.name,
                    step.x,
                    step.y
                );
                assert!(moves <= 200, "{}: run did not terminate", scenario.name);
            }
            Action::Finish(distance) => return (moves, distance),
        }
    }
}

fn reference_distance(scenario: &Scenario) -> Option<i32> {
    let mut grid = GridModel::new();
    for &hazard in &scenario.hazards {
        grid.observe_hazard(hazard);
    }
    shortest_distance(&grid, Cell::ORIGIN, scenario.goal)
}

#[test]
fn test_strategies_match_reference_bfs() {
    for scenario in scenarios() {
        let expected = reference_distance(&scenario);

        let (full_moves, full_report) = walk(&scenario, StrategyKind::FullPath);
        let (single_moves, single_report) = walk(&scenario, StrategyKind::SingleStep);

        assert_eq!(full_report, expected, "{}: full-path report", scenario.name);
        assert_eq!(
            single_report, expected,
            "{}: single-step report",
            scenario.name
        );

        match expected {
            Some(distance) => {
                // With all hazards known up front, the committed walk is
                // exactly the optimal length for both strategies.
                assert_eq!(
                    full_moves, distance as usize,
                    "{}: full-path walk length",
                    scenario.name
                );
                assert_eq!(
                    single_moves, distance as usize,
                    "{}: single-step walk length",
                    scenario.name
                );
            }
            None => {
                assert_eq!(full_moves, 0, "{}: moved before e -1", scenario.name);
                assert_eq!(single_moves, 0, "{}: moved before e -1", scenario.name);
            }
        }
    }
}

#[test]
fn test_hazard_knowledge_only_grows() {
    let scenario = &scenarios()[3];
    let config = PlannerConfig::default();
    let mut agent = AgentController::new(scenario.goal, &config);

    // Reveal hazards in two waves with a duplicate delivery in between
    let (first_wave, second_wave) = scenario.hazards.split_at(scenario.hazards.len() / 2);
    let mut counts = Vec::new();

    agent.decide(&hazard_batch(first_wave));
    counts.push(agent.grid().hazard_count());
    agent.decide(&hazard_batch(first_wave)); // duplicate delivery
    counts.push(agent.grid().hazard_count());
    agent.decide(&hazard_batch(second_wave));
    counts.push(agent.grid().hazard_count());

    assert_eq!(counts[0], first_wave.len());
    assert_eq!(counts[1], first_wave.len()); // idempotent
    assert_eq!(counts[2], scenario.hazards.len());
}
