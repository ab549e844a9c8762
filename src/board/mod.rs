pub mod components;

pub use components::{BitBoard, BitBoardIterator, Side, Square};
