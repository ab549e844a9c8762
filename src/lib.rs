pub mod board;
pub mod cli;
pub mod kpk;
pub mod prelude;
pub mod utils;

pub mod consts {
    pub const NUM_SIDES: usize = 2;
    pub const NUM_SQUARES: usize = 64;
    pub const NUM_FILES: usize = 8;

    pub const FILE_MASKS: [u64; NUM_FILES] = [
        0x0101010101010101, // A
        0x0202020202020202, // B
        0x0404040404040404, // C
        0x0808080808080808, // D
        0x1010101010101010, // E
        0x2020202020202020, // F
        0x4040404040404040, // G
        0x8080808080808080, // H
    ];

    pub const FILE_A: usize = 0;
    pub const FILE_H: usize = 7;
    pub const RANK_1: usize = 0;
    pub const RANK_2: usize = 1;
    pub const RANK_8: usize = 7;
}

pub use crate::utils::log::init;
