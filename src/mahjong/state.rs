use super::claim::PendingClaim;
use super::player::MahjongPlayer;
use super::tile::Tile;
use super::wall::Wall;
use crate::session::EndReason;

/// 弃牌记录（全局牌池）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiscardRecord {
    /// 弃牌者座位
    pub seat: u8,
    /// 弃的牌
    pub tile: Tile,
}

/// 终局记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MahjongEnd {
    /// 终局原因
    pub reason: EndReason,
    /// 胜者座位（流局 / 强制终局时为 None）
    pub winner: Option<u8>,
}

/// 麻将对局状态
///
/// 引擎之外没有任何可变共享：状态按值进出纯函数，
/// 存储层的读写全部留在会话边界。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MahjongState {
    /// 四个座位
    pub players: [MahjongPlayer; 4],
    /// 牌墙
    pub wall: Wall,
    /// 全局弃牌池（按时间顺序）
    pub pond: Vec<DiscardRecord>,
    /// 当前行动座位
    pub current_turn: u8,
    /// 庄家座位
    pub dealer: u8,
    /// 连庄次数
    pub dealer_streak: u32,
    /// 圈风（1=东 2=南 3=西 4=北）
    pub prevailing_wind: u8,
    /// 局数
    pub round: u32,
    /// 悬挂的认领（对外暴露，供界面渲染合法按钮）
    pub pending_claim: Option<PendingClaim>,
    /// 本回合刚摸的牌
    pub last_draw: Option<Tile>,
    /// 摸的是否普通墙最后一张（海底）
    pub is_last_tile: bool,
    /// 上一张进手是否为杠后补牌（杠上开花资格）
    pub kong_replacement: bool,
    /// 抢杠窗口关闭后等待补牌的杠家
    pub pending_kong: Option<u8>,
    /// 终局记录（None 表示对局进行中）
    pub result: Option<MahjongEnd>,
}

impl MahjongState {
    /// 创建初始状态（牌墙未洗、未发牌）
    pub fn new() -> Self {
        Self {
            players: [
                MahjongPlayer::new(0),
                MahjongPlayer::new(1),
                MahjongPlayer::new(2),
                MahjongPlayer::new(3),
            ],
            wall: Wall::new(),
            pond: Vec::new(),
            current_turn: 0,
            dealer: 0,
            dealer_streak: 0,
            prevailing_wind: 1,
            round: 0,
            pending_claim: None,
            last_draw: None,
            is_last_tile: false,
            kong_replacement: false,
            pending_kong: None,
            result: None,
        }
    }

    /// 对局是否已结束
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// 某座位的下家
    pub fn downstream(seat: u8) -> u8 {
        (seat + 1) % 4
    }

    /// 座位门风（1-4，相对庄家）
    pub fn seat_wind_of(&self, seat: u8) -> u8 {
        (seat + 4 - self.dealer) % 4 + 1
    }
}

impl Default for MahjongState {
    fn default() -> Self {
        Self::new()
    }
}
