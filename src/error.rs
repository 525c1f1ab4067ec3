use thiserror::Error;

/// 引擎错误
///
/// 非法动作在边界处静默拒绝：引擎返回错误、状态不变，
/// 由外层（UI / 会话层）决定是否提示。引擎本身没有致命错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// 非法走子或吃子
    #[error("invalid move")]
    InvalidMove,
    /// 无资格或越权的鸣牌（碰/杠/吃/胡）
    #[error("invalid claim")]
    InvalidClaim,
    /// 不是该玩家的回合
    #[error("not your turn")]
    NotYourTurn,
    /// 麻将手牌张数不在 {16, 17}（折算副露后）
    #[error("malformed hand size")]
    MalformedHandSize,
    /// 牌墙触及死墙保留区：流局信号，不是故障
    #[error("wall exhausted")]
    WallExhausted,
    /// 通用的非法动作（动作与当前阶段不符）
    #[error("invalid action")]
    InvalidAction,
    /// 游戏已结束
    #[error("game over")]
    GameOver,
}
