pub mod heuristic;
pub mod movegen;
pub mod search;
pub mod tt;
