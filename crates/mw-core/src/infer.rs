//! Picking exit directions for a new connection.
//!
//! A heuristic, not a layout algorithm: it avoids direction collisions and
//! prefers the direction that matches where the target sits on the canvas.

use std::collections::BTreeSet;

use crate::connection::Connection;
use crate::direction::Direction;
use crate::location::Location;

/// Propose `(from_dir, to_dir)` for a connection from `from` to `to`.
///
/// Returns `None` when either location has all six exits in use.
pub fn infer_directions(
    from: &Location,
    to: &Location,
    connections: &[Connection],
) -> Option<(Direction, Direction)> {
    let available_from = available(&from.id, connections);
    let available_to = available(&to.id, connections);
    if available_from.is_empty() || available_to.is_empty() {
        return None;
    }

    let preferred = preferred_direction(from, to);
    let from_dir = if available_from.contains(&preferred) {
        preferred
    } else {
        first_canonical(&available_from)?
    };

    let to_dir = if available_to.contains(&from_dir.opposite()) {
        from_dir.opposite()
    } else {
        first_canonical(&available_to)?
    };

    Some((from_dir, to_dir))
}

/// The direction pointing from `from` towards `to` along the dominant axis.
///
/// Ties go to the vertical axis; the y axis grows downwards.
fn preferred_direction(from: &Location, to: &Location) -> Direction {
    let delta = to.position.minus(from.position);
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            Direction::East
        } else {
            Direction::West
        }
    } else if delta.y > 0.0 {
        Direction::South
    } else {
        Direction::North
    }
}

fn available(id: &str, connections: &[Connection]) -> BTreeSet<Direction> {
    let used: BTreeSet<Direction> = connections
        .iter()
        .filter_map(|c| c.direction_at(id))
        .collect();
    Direction::ALL
        .into_iter()
        .filter(|d| !used.contains(d))
        .collect()
}

fn first_canonical(set: &BTreeSet<Direction>) -> Option<Direction> {
    Direction::ALL.into_iter().find(|d| set.contains(d))
}
