//! 对局会话层
//!
//! 三种玩法的状态以带标签的联合体统一存取，
//! 后备存储提供按键读写、订阅与乐观并发控制。

pub mod store;

use serde::{Deserialize, Serialize};

use crate::banqi::BanqiState;
use crate::bigtwo::BigTwoState;
use crate::mahjong::MahjongState;

pub use store::{SessionStore, StoreError, Versioned};

/// 终局原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// 正常分出胜负（吃光 / 出完）
    Normal,
    /// 认输
    Surrender,
    /// 逃跑（断线弃局）
    Runaway,
    /// 流局
    ExhaustiveDraw,
    /// 荣和
    Hu,
    /// 自摸
    Zimo,
}

/// 房间状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Waiting,
    Playing,
    Ended,
}

/// 玩法类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Banqi,
    Mahjong,
    BigTwo,
}

/// 对局状态联合体
///
/// 以显式的 `game` 标签判别玩法，绝不以字段存在与否探测。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "game")]
pub enum GameState {
    Banqi(BanqiState),
    Mahjong(MahjongState),
    BigTwo(BigTwoState),
}

impl GameState {
    pub fn kind(&self) -> GameKind {
        match self {
            GameState::Banqi(_) => GameKind::Banqi,
            GameState::Mahjong(_) => GameKind::Mahjong,
            GameState::BigTwo(_) => GameKind::BigTwo,
        }
    }

    /// 是否已终局
    pub fn is_over(&self) -> bool {
        match self {
            GameState::Banqi(s) => s.result.is_some(),
            GameState::Mahjong(s) => s.result.is_some(),
            GameState::BigTwo(s) => s.result.is_some(),
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.is_over() {
            GameStatus::Ended
        } else {
            GameStatus::Playing
        }
    }
}
