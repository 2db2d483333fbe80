//! Line protocol between the agent and the environment.
//!
//! The environment speaks a synchronous request/response protocol over a
//! byte stream: a two-line handshake (perception variant, then the goal's
//! initial coordinates), then one observation batch per turn (a count line
//! followed by that many records) answered by exactly one action line.
//! The session ends on an `e` action or when the input stream ends.
//!
//! All reading and writing is generic over `BufRead`/`Write` so tests can
//! drive a session from in-memory buffers.

use std::io::{BufRead, Write};

use crate::agent::{Action, AgentController};
use crate::error::{MargaError, Result};
use crate::grid::Cell;
use crate::observe;

/// The opening exchange read once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handshake {
    /// Accepted but not used by the planning core.
    pub perception_variant: i32,
    /// The goal's initially announced position.
    pub goal: Cell,
}

/// Read one line, trimming the terminator. Returns `None` at end of stream.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Read and validate the handshake. Malformed input is fatal: without a
/// variant and a goal position the run cannot proceed meaningfully.
pub fn read_handshake<R: BufRead>(reader: &mut R) -> Result<Handshake> {
    let variant_line = read_line(reader)?
        .ok_or_else(|| MargaError::Handshake("Stream ended before perception variant".into()))?;
    let perception_variant: i32 = variant_line.trim().parse().map_err(|_| {
        MargaError::Handshake(format!("Invalid perception variant: {:?}", variant_line))
    })?;

    let goal_line = read_line(reader)?
        .ok_or_else(|| MargaError::Handshake("Stream ended before goal position".into()))?;
    let mut tokens = goal_line.split_whitespace();
    let parse_coord = |token: Option<&str>| -> Result<i32> {
        token
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| MargaError::Handshake(format!("Invalid goal position: {:?}", goal_line)))
    };
    let x = parse_coord(tokens.next())?;
    let y = parse_coord(tokens.next())?;
    if tokens.next().is_some() {
        return Err(MargaError::Handshake(format!(
            "Trailing tokens in goal position: {:?}",
            goal_line
        )));
    }

    Ok(Handshake {
        perception_variant,
        goal: Cell::new(x, y),
    })
}

/// Encode one action as a protocol line (without terminator).
pub fn format_action(action: &Action) -> String {
    match action {
        Action::Move(cell) => format!("m {} {}", cell.x, cell.y),
        Action::Finish(Some(distance)) => format!("e {}", distance),
        Action::Finish(None) => "e -1".to_string(),
    }
}

/// Read one turn's observation batch: a count line and that many records.
///
/// Returns `None` at end of stream. A count line that does not parse is a
/// protocol error: the stream can no longer be framed. Malformed records
/// are skipped during parsing, not here.
fn read_batch<R: BufRead>(reader: &mut R) -> Result<Option<Vec<String>>> {
    let count_line = loop {
        match read_line(reader)? {
            None => return Ok(None),
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => break line,
        }
    };

    let count: usize = count_line.trim().parse().map_err(|_| {
        MargaError::Protocol(format!("Invalid observation count: {:?}", count_line))
    })?;

    let mut lines = Vec::with_capacity(count);
    for _ in 0..count {
        let line = read_line(reader)?
            .ok_or_else(|| MargaError::Protocol("Stream ended mid-batch".into()))?;
        lines.push(line);
    }
    Ok(Some(lines))
}

/// Drive one full session: opening move, then one action per batch until
/// termination or end of input.
pub fn run<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    agent: &mut AgentController,
) -> Result<()> {
    // Fixed opening move: the agent starts at the origin.
    writeln!(writer, "m 0 0")?;
    writer.flush()?;

    while let Some(lines) = read_batch(reader)? {
        let records = observe::parse_batch(&lines);
        let action = agent.decide(&records);
        writeln!(writer, "{}", format_action(&action))?;
        writer.flush()?;

        if matches!(action, Action::Finish(_)) {
            tracing::info!("Session finished: {}", format_action(&action));
            break;
        }
    }

    Ok(())
}
