use smallvec::SmallVec;

use super::hand::Hand;
use super::meld::MeldChecker;
use super::player::MahjongPlayer;
use super::tile::Tile;
use super::win_check::check_hu;

/// 认领动作（对他人弃牌的反应）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClaimAction {
    /// 胡（荣和）
    Hu,
    /// 杠（直杠）
    Kong,
    /// 碰
    Pong,
    /// 吃（仅下家）
    Chi,
}

impl ClaimAction {
    /// 优先级：胡 3 > 碰/杠 2 > 吃 1
    pub fn priority(&self) -> u8 {
        match self {
            ClaimAction::Hu => 3,
            ClaimAction::Kong | ClaimAction::Pong => 2,
            ClaimAction::Chi => 1,
        }
    }
}

/// 单个座位的认领资格
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClaimOffer {
    /// 座位
    pub seat: u8,
    /// 该座位可选的动作
    pub actions: SmallVec<[ClaimAction; 4]>,
    /// 是否已放弃
    pub skipped: bool,
}

impl ClaimOffer {
    /// 未放弃时的最高优先级（0 表示无资格）
    pub fn best_priority(&self) -> u8 {
        if self.skipped {
            return 0;
        }
        self.actions.iter().map(|a| a.priority()).max().unwrap_or(0)
    }

    /// 是否允许某个动作
    pub fn allows(&self, action: ClaimAction) -> bool {
        !self.skipped && self.actions.contains(&action)
    }
}

/// 悬挂的认领记录
///
/// 弃牌（或可被抢的杠）落地后挂出，供界面渲染合法按钮，
/// 并由 `next_actor` 仲裁谁先行动。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PendingClaim {
    /// 被认领的牌
    pub tile: Tile,
    /// 弃牌者（或被抢杠者）座位
    pub from_player: u8,
    /// 有资格反应的座位及其动作
    pub offers: SmallVec<[ClaimOffer; 3]>,
}

impl PendingClaim {
    /// 扫描四个座位，收集对弃牌的认领资格
    ///
    /// 胡：摘入弃牌后门前部分可完整拆解；
    /// 杠：手中恰三张；碰：手中至少两张；
    /// 吃：仅弃牌者下家，且手牌有相邻搭子。
    ///
    /// 无任何资格时返回 `None`。
    pub fn collect(players: &[MahjongPlayer; 4], from_player: u8, tile: Tile) -> Option<Self> {
        let mut offers: SmallVec<[ClaimOffer; 3]> = SmallVec::new();
        let downstream = (from_player + 1) % 4;

        for step in 1..4u8 {
            let seat = (from_player + step) % 4;
            let player = &players[seat as usize];
            let mut actions: SmallVec<[ClaimAction; 4]> = SmallVec::new();

            if Self::completes_hand(&player.hand, tile) {
                actions.push(ClaimAction::Hu);
            }
            if MeldChecker::can_direct_kong(&player.hand, tile) {
                actions.push(ClaimAction::Kong);
            }
            if MeldChecker::can_pong(&player.hand, tile) {
                actions.push(ClaimAction::Pong);
            }
            if seat == downstream && MeldChecker::can_chi(&player.hand, tile) {
                actions.push(ClaimAction::Chi);
            }

            if !actions.is_empty() {
                offers.push(ClaimOffer { seat, actions, skipped: false });
            }
        }

        if offers.is_empty() {
            None
        } else {
            Some(Self { tile, from_player, offers })
        }
    }

    /// 只允许胡的认领（抢杠场景：明杠自他人弃牌后重开胡的资格）
    pub fn collect_hu_only(players: &[MahjongPlayer; 4], from_player: u8, tile: Tile) -> Option<Self> {
        let mut offers: SmallVec<[ClaimOffer; 3]> = SmallVec::new();
        for step in 1..4u8 {
            let seat = (from_player + step) % 4;
            let player = &players[seat as usize];
            if Self::completes_hand(&player.hand, tile) {
                let mut actions: SmallVec<[ClaimAction; 4]> = SmallVec::new();
                actions.push(ClaimAction::Hu);
                offers.push(ClaimOffer { seat, actions, skipped: false });
            }
        }
        if offers.is_empty() {
            None
        } else {
            Some(Self { tile, from_player, offers })
        }
    }

    /// 弃牌摘入手后是否构成完整胡牌
    fn completes_hand(hand: &Hand, tile: Tile) -> bool {
        let mut test = hand.clone();
        if !test.add_tile(tile) {
            return false;
        }
        check_hu(&test)
    }

    /// 仲裁当前应行动的座位
    ///
    /// 规则：只有最高优先级的座位行动；多家同时听胡时，
    /// 离弃牌者下游旋转距离最短者得牌；放弃后让位给次高者。
    /// 全部放弃返回 `None`（轮转回弃牌者下家摸牌）。
    pub fn next_actor(&self) -> Option<&ClaimOffer> {
        let best = self.offers.iter().map(|o| o.best_priority()).max()?;
        if best == 0 {
            return None;
        }
        self.offers
            .iter()
            .filter(|o| o.best_priority() == best)
            .min_by_key(|o| self.downstream_distance(o.seat))
    }

    /// 座位到弃牌者的下游旋转距离（1-3）
    fn downstream_distance(&self, seat: u8) -> u8 {
        (seat + 4 - self.from_player) % 4
    }

    /// 标记某座位放弃
    pub fn skip(&mut self, seat: u8) -> bool {
        for offer in &mut self.offers {
            if offer.seat == seat && !offer.skipped {
                offer.skipped = true;
                return true;
            }
        }
        false
    }

    /// 查询某座位的认领资格
    pub fn offer_for(&self, seat: u8) -> Option<&ClaimOffer> {
        self.offers.iter().find(|o| o.seat == seat)
    }

    /// 有资格反应的座位列表（供界面渲染）
    pub fn target_players(&self) -> SmallVec<[u8; 3]> {
        self.offers.iter().map(|o| o.seat).collect()
    }
}
