/// 棋牌规则引擎
///
/// 暗棋、台湾十六张麻将、大老二三种玩法的纯规则引擎，
/// 外加带版本控制的会话状态存储

pub mod banqi;
pub mod bigtwo;
pub mod error;
pub mod mahjong;
pub mod session;

// 重新导出常用类型
pub use banqi::{BanqiAction, BanqiBot, BanqiEngine, BanqiOutcome, BanqiRules, BanqiState};
pub use bigtwo::{
    BigTwoBot, BigTwoBotMove, BigTwoEngine, BigTwoOutcome, BigTwoState, Card, CardSuit, HandType,
    Play,
};
pub use error::EngineError;
pub use mahjong::{
    check_hu, ClaimAction, Hand, MahjongAction, MahjongBot, MahjongEngine, MahjongOutcome,
    MahjongState, Meld, ScoreCalculator, ScoreResult, Tile, Wall, WinContext,
};
pub use session::{
    EndReason, GameKind, GameState, GameStatus, SessionStore, StoreError, Versioned,
};
