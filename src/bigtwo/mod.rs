//! 大老二
//!
//! 梅花 3 持有者先手且首手必带梅花 3；五张牌型之间
//! 按顺子 < 葫芦 < 铁支 < 同花顺的强度越型压制。

pub mod bot;
pub mod card;
pub mod deck;
pub mod hand_type;
pub mod state;

pub use bot::{BigTwoBot, BigTwoBotMove};
pub use card::{Card, CardSuit};
pub use hand_type::{HandType, Play};
pub use state::{BigTwoEnd, BigTwoEngine, BigTwoOutcome, BigTwoPlayer, BigTwoState};
