pub mod astar;
pub mod disjoint_sets;
pub mod graph;
pub mod nearest_neighbours;
pub mod nearest_neighbours_linear;
pub mod pdf;
