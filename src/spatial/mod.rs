//! Grid walkability and pathfinding

pub mod pathfinding;
