use super::hand::Hand;
use super::meld::{Meld, MeldChecker};
use super::tile::Tile;

/// 麻将玩家（一个座位）
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MahjongPlayer {
    /// 座位（0-3，0 为庄家位起算的绝对座位）
    pub seat: u8,
    /// 门前手牌
    pub hand: Hand,
    /// 副露
    pub melds: Vec<Meld>,
    /// 个人弃牌河
    pub discards: Vec<Tile>,
    /// 门风（0-3，相对庄家：0=东 1=南 2=西 3=北）
    pub seat_wind: u8,
    /// 累计得分
    pub score: i32,
}

impl MahjongPlayer {
    /// 创建新玩家
    pub fn new(seat: u8) -> Self {
        Self {
            seat,
            hand: Hand::new(),
            melds: Vec::new(),
            discards: Vec::new(),
            seat_wind: seat,
            score: 0,
        }
    }

    /// 折算副露后的有效手牌张数
    ///
    /// 不变式：轮间 16，摸牌后、出牌前 17。
    pub fn effective_hand_size(&self) -> usize {
        self.hand.total_count() + self.melds.len() * Meld::TILES_PER_MELD
    }

    /// 执行碰：从手牌移除两张，挂出副露
    pub fn apply_pong(&mut self, tile: Tile, from: u8) -> bool {
        if !MeldChecker::can_pong(&self.hand, tile) {
            return false;
        }
        self.hand.remove_tile(tile);
        self.hand.remove_tile(tile);
        self.melds.push(Meld::Pong { tile, from });
        true
    }

    /// 执行明杠（直杠）：从手牌移除三张
    pub fn apply_direct_kong(&mut self, tile: Tile, from: u8) -> bool {
        if !MeldChecker::can_direct_kong(&self.hand, tile) {
            return false;
        }
        for _ in 0..3 {
            self.hand.remove_tile(tile);
        }
        self.melds.push(Meld::Kong { tile, from, is_concealed: false });
        true
    }

    /// 执行暗杠：从手牌移除四张
    pub fn apply_concealed_kong(&mut self, tile: Tile) -> bool {
        if !MeldChecker::can_concealed_kong(&self.hand, tile) {
            return false;
        }
        for _ in 0..4 {
            self.hand.remove_tile(tile);
        }
        self.melds.push(Meld::Kong { tile, from: self.seat, is_concealed: true });
        true
    }

    /// 执行加杠：已碰的刻子升级为杠
    pub fn apply_added_kong(&mut self, tile: Tile) -> bool {
        if !MeldChecker::can_add_kong(&self.melds, &self.hand, tile) {
            return false;
        }
        self.hand.remove_tile(tile);
        for meld in &mut self.melds {
            if let Meld::Pong { tile: t, from } = *meld {
                if t == tile {
                    *meld = Meld::Kong { tile, from, is_concealed: false };
                    return true;
                }
            }
        }
        false
    }

    /// 执行吃：从手牌移除顺子中除弃牌外的两张
    ///
    /// # 参数
    ///
    /// - `start`: 顺子起点
    /// - `claimed`: 吃进的弃牌
    /// - `from`: 弃牌者座位
    pub fn apply_chi(&mut self, start: Tile, claimed: Tile, from: u8) -> bool {
        let (second, third) = match (start.successor(1), start.successor(2)) {
            (Some(b), Some(c)) => (b, c),
            _ => return false,
        };
        let mut members = vec![start, second, third];
        if !members.contains(&claimed) {
            return false;
        }
        members.retain(|&t| t != claimed);
        if members.iter().any(|&t| !self.hand.has_tile(t)) {
            return false;
        }
        for t in members {
            self.hand.remove_tile(t);
        }
        self.melds.push(Meld::Chi { start, from });
        true
    }

    /// 是否门清（没有任何公开副露；暗杠不破门清）
    pub fn is_concealed(&self) -> bool {
        self.melds.iter().all(|m| !m.is_exposed())
    }
}
