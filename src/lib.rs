//! Infers which hidden cells of a numbered grid hold traps and which hold gems.
//!
//! Each clue becomes an exact-count constraint over its hidden neighbours,
//! enumerated as a DNF and converted to CNF, renumbered densely and handed to a
//! DPLL search, a brute-force oracle or varisat.

pub mod analysis;
pub mod bench;
pub mod cnf;
pub mod encode;
pub mod grid;
pub mod pipeline;
pub mod remap;
pub mod sat;
pub mod solver;
