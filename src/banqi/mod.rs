//! 暗棋（盲棋）
//!
//! 4×8 棋盘，32 枚棋子开局背面朝上；首翻定色，
//! 吃光对方棋子即胜。炮走隔山吃，兵吃将、将不吃兵。

pub mod board;
pub mod bot;
pub mod piece;
pub mod rules;
pub mod state;

pub use board::{Board, BOARD_HEIGHT, BOARD_WIDTH, CELL_COUNT};
pub use bot::BanqiBot;
pub use piece::{Color, Piece, PieceKind};
pub use rules::BanqiRules;
pub use state::{BanqiAction, BanqiEngine, BanqiEnd, BanqiOutcome, BanqiState, MoveRecord};
