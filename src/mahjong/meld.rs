use smallvec::SmallVec;

use super::hand::Hand;
use super::tile::Tile;

/// 副露（碰 / 杠 / 吃）
///
/// 记录组成方式与来源玩家，供结算与界面展示使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Meld {
    /// 碰（三张相同牌）
    Pong { tile: Tile, from: u8 },
    /// 杠（四张相同牌）
    Kong {
        tile: Tile,
        from: u8,
        /// 暗杠（来自自己手牌，不自他人弃牌）
        is_concealed: bool,
    },
    /// 吃（连续三张，start 为最小一张；仅数字花色）
    Chi { start: Tile, from: u8 },
}

impl Meld {
    /// 副露占用的手牌张数换算（胡牌张数不变式用）
    pub const TILES_PER_MELD: usize = 3;

    /// 副露的代表牌
    pub fn tile(&self) -> Tile {
        match self {
            Meld::Pong { tile, .. } | Meld::Kong { tile, .. } => *tile,
            Meld::Chi { start, .. } => *start,
        }
    }

    /// 来源玩家座位
    pub fn from(&self) -> u8 {
        match self {
            Meld::Pong { from, .. } | Meld::Kong { from, .. } | Meld::Chi { from, .. } => *from,
        }
    }

    /// 展开为组成牌列表
    pub fn tiles(&self) -> SmallVec<[Tile; 4]> {
        let mut result = SmallVec::new();
        match self {
            Meld::Pong { tile, .. } => {
                for _ in 0..3 {
                    result.push(*tile);
                }
            }
            Meld::Kong { tile, .. } => {
                for _ in 0..4 {
                    result.push(*tile);
                }
            }
            Meld::Chi { start, .. } => {
                result.push(*start);
                if let Some(t) = start.successor(1) {
                    result.push(t);
                }
                if let Some(t) = start.successor(2) {
                    result.push(t);
                }
            }
        }
        result
    }

    /// 是否对外公开（暗杠以外的副露都公开）
    pub fn is_exposed(&self) -> bool {
        !matches!(self, Meld::Kong { is_concealed: true, .. })
    }
}

/// 吃牌的三种搭子形状：弃牌补在低端、中间、高端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChiShape {
    /// 手中有 v+1, v+2
    Low,
    /// 手中有 v-1, v+1
    Middle,
    /// 手中有 v-2, v-1
    High,
}

/// 副露资格检查器
pub struct MeldChecker;

impl MeldChecker {
    /// 是否可以碰：手中至少两张相同牌
    pub fn can_pong(hand: &Hand, tile: Tile) -> bool {
        hand.tile_count(tile) >= 2
    }

    /// 是否可以明杠（直杠）：手中恰好三张，别人打出第四张
    pub fn can_direct_kong(hand: &Hand, tile: Tile) -> bool {
        hand.tile_count(tile) == 3
    }

    /// 是否可以暗杠：手中四张相同牌
    pub fn can_concealed_kong(hand: &Hand, tile: Tile) -> bool {
        hand.tile_count(tile) == 4
    }

    /// 是否可以加杠：已有对应的碰，且手中摸到第四张
    pub fn can_add_kong(melds: &[Meld], hand: &Hand, tile: Tile) -> bool {
        let has_pong = melds
            .iter()
            .any(|m| matches!(m, Meld::Pong { tile: t, .. } if *t == tile));
        has_pong && hand.has_tile(tile)
    }

    /// 可用的吃牌形状
    ///
    /// 仅数字花色有吃；吃的资格（只有下家能吃）由认领解析层把关，
    /// 这里只回答"手牌形状是否允许"。
    pub fn chi_shapes(hand: &Hand, tile: Tile) -> SmallVec<[ChiShape; 3]> {
        let mut shapes = SmallVec::new();
        if !tile.is_numeric() {
            return shapes;
        }
        let suit = tile.suit();
        let v = tile.rank();
        let has = |rank: i16| -> bool {
            if rank < 1 || rank > 9 {
                return false;
            }
            Tile::new(suit, rank as u8).map_or(false, |t| hand.has_tile(t))
        };
        let v = v as i16;
        if has(v + 1) && has(v + 2) {
            shapes.push(ChiShape::Low);
        }
        if has(v - 1) && has(v + 1) {
            shapes.push(ChiShape::Middle);
        }
        if has(v - 2) && has(v - 1) {
            shapes.push(ChiShape::High);
        }
        shapes
    }

    /// 是否可以吃（任一形状成立）
    pub fn can_chi(hand: &Hand, tile: Tile) -> bool {
        !Self::chi_shapes(hand, tile).is_empty()
    }

    /// 吃牌形状对应的顺子起点
    pub fn chi_start(tile: Tile, shape: ChiShape) -> Option<Tile> {
        let offset: i16 = match shape {
            ChiShape::Low => 0,
            ChiShape::Middle => -1,
            ChiShape::High => -2,
        };
        let start = tile.rank() as i16 + offset;
        if start < 1 {
            return None;
        }
        Tile::new(tile.suit(), start as u8)
    }
}
