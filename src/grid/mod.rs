pub mod board;
pub mod generate;
pub mod text;

pub use board::{Board, Cell, GridError, Point};
