//! End-to-end protocol sessions driven from in-memory buffers.
//!
//! Each test scripts the environment side of the line protocol and checks
//! the full action transcript the agent produces.

use std::io::Cursor;

use marga_nav::config::{PlannerConfig, StrategyKind};
use marga_nav::{protocol, AgentController, Cell};

/// Run a session: handshake, then the scripted turn input.
fn run_session(strategy: StrategyKind, handshake: &str, turns: &str) -> Vec<String> {
    let mut input = Cursor::new(format!("{}{}", handshake, turns));
    let mut output: Vec<u8> = Vec::new();

    let hs = protocol::read_handshake(&mut input).expect("handshake");
    let config = PlannerConfig {
        strategy,
        ..PlannerConfig::default()
    };
    let mut agent = AgentController::new(hs.goal, &config);
    protocol::run(&mut input, &mut output, &mut agent).expect("session");

    String::from_utf8(output)
        .expect("utf8 output")
        .lines()
        .map(str::to_string)
        .collect()
}

fn parse_move(line: &str) -> Cell {
    let mut tokens = line.split_whitespace();
    assert_eq!(tokens.next(), Some("m"));
    let x = tokens.next().unwrap().parse().unwrap();
    let y = tokens.next().unwrap().parse().unwrap();
    Cell::new(x, y)
}

fn both_strategies() -> [StrategyKind; 2] {
    [StrategyKind::FullPath, StrategyKind::SingleStep]
}

#[test]
fn test_open_grid_session_reaches_goal_in_eight_moves() {
    for strategy in both_strategies() {
        let turns = "0\n".repeat(12);
        let lines = run_session(strategy, "1\n4 4\n", &turns);

        assert_eq!(lines[0], "m 0 0");
        assert_eq!(lines.len(), 10); // opening move + 8 moves + terminate
        assert_eq!(lines.last().unwrap(), "e 8");

        let goal = Cell::new(4, 4);
        let mut at = Cell::ORIGIN;
        let mut remaining = at.manhattan_distance(&goal);
        for line in &lines[1..9] {
            let step = parse_move(line);
            assert_eq!(at.manhattan_distance(&step), 1, "non-adjacent move");
            // Each move strictly decreases Manhattan distance to the goal
            let d = step.manhattan_distance(&goal);
            assert_eq!(d, remaining - 1);
            remaining = d;
            at = step;
        }
        assert_eq!(at, goal);
    }
}

#[test]
fn test_enclosed_origin_session_reports_unreachable() {
    for strategy in both_strategies() {
        let turns = "3\n0 1 S\n1 1 A\n1 0 P\n";
        let lines = run_session(strategy, "1\n8 8\n", turns);
        assert_eq!(lines, vec!["m 0 0".to_string(), "e -1".to_string()]);
    }
}

#[test]
fn test_adjacent_goal_with_flanking_hazards() {
    for strategy in both_strategies() {
        // Goal (1,0) is directly reachable even though (0,1) and (1,1)
        // are hazards.
        let turns = format!("2\n0 1 S\n1 1 A\n{}", "0\n".repeat(4));
        let lines = run_session(strategy, "1\n1 0\n", &turns);
        assert_eq!(lines[0], "m 0 0");
        assert_eq!(parse_move(&lines[1]), Cell::new(1, 0));
        assert_eq!(lines[2], "e 1");
        assert_eq!(lines.len(), 3);
    }
}

#[test]
fn test_goal_relocation_mid_session() {
    for strategy in both_strategies() {
        // Goal announced at (2,0); after the first move it is observed at
        // (0,2) instead.
        let turns = format!("0\n1\n0 2 K\n{}", "0\n".repeat(8));
        let lines = run_session(strategy, "1\n2 0\n", &turns);

        assert_eq!(lines[0], "m 0 0");
        assert_eq!(lines.last().unwrap(), "e 2");

        // Every move is within bounds and adjacent to the previous cell
        let mut at = Cell::ORIGIN;
        for line in &lines[1..lines.len() - 1] {
            let step = parse_move(line);
            assert_eq!(at.manhattan_distance(&step), 1);
            assert!((0..=8).contains(&step.x) && (0..=8).contains(&step.y));
            at = step;
        }
        assert_eq!(at, Cell::new(0, 2));
    }
}

#[test]
fn test_malformed_records_are_skipped() {
    for strategy in both_strategies() {
        // Batch mixes garbage with one real hazard on the straight route
        let turns = format!(
            "4\nnot a record\n0 1 S\n9 q K\n1 2 Z\n{}",
            "0\n".repeat(6)
        );
        let lines = run_session(strategy, "1\n0 3\n", &turns);

        assert_eq!(lines[0], "m 0 0");
        // (0,1) is hazardous, so the shortest route detours east:
        // 0,0 -> 1,0 -> 1,1 -> 1,2 -> 1,3 -> 0,3 = 5 steps.
        assert_eq!(lines.last().unwrap(), "e 5");
        let mut at = Cell::ORIGIN;
        for line in &lines[1..lines.len() - 1] {
            let step = parse_move(line);
            assert_ne!(step, Cell::new(0, 1), "moved into a known hazard");
            assert_eq!(at.manhattan_distance(&step), 1);
            at = step;
        }
    }
}

#[test]
fn test_zero_count_turn_is_valid() {
    for strategy in both_strategies() {
        let turns = "0\n0\n0\n";
        let lines = run_session(strategy, "1\n0 2\n", turns);
        assert_eq!(lines[0], "m 0 0");
        assert_eq!(lines.last().unwrap(), "e 2");
    }
}

#[test]
fn test_end_of_stream_without_termination() {
    // Input ends after one turn; the session ends without an `e` line.
    for strategy in both_strategies() {
        let lines = run_session(strategy, "1\n8 8\n", "0\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "m 0 0");
        assert!(lines[1].starts_with("m "));
    }
}
