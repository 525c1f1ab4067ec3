//! 台湾十六张麻将
//!
//! 牌墙保留 16 张死墙，普通摸牌取墙头，杠后补牌取墙尾。
//! 引擎为纯状态机，认领窗口按胡 > 碰杠 > 吃的优先级裁决。

pub mod bot;
pub mod claim;
pub mod engine;
pub mod hand;
pub mod meld;
pub mod player;
pub mod scoring;
pub mod state;
pub mod tile;
pub mod wall;
pub mod win_check;

pub use bot::MahjongBot;
pub use claim::{ClaimAction, PendingClaim};
pub use engine::{MahjongAction, MahjongEngine, MahjongOutcome};
pub use hand::Hand;
pub use meld::{ChiShape, Meld, MeldChecker};
pub use player::MahjongPlayer;
pub use scoring::{ScoreCalculator, ScoreResult, WinContext};
pub use state::{MahjongEnd, MahjongState};
pub use tile::{Suit, Tile};
pub use wall::Wall;
pub use win_check::check_hu;
