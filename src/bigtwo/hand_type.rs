use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, MAX_RANK};

/// 牌型
///
/// 五张牌型强度：顺子 < 葫芦 < 铁支 < 同花顺。
/// 纯同花（无顺）不是合法牌型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandType {
    Single,
    Pair,
    Triple,
    Straight,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandType {
    /// 五张牌型的强度序（非五张牌型之间不比强度）
    pub fn five_card_power(self) -> Option<u8> {
        match self {
            HandType::Straight => Some(1),
            HandType::FullHouse => Some(2),
            HandType::FourOfAKind => Some(3),
            HandType::StraightFlush => Some(4),
            _ => None,
        }
    }
}

/// 一手出牌
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub cards: SmallVec<[Card; 5]>,
    pub hand_type: HandType,
}

impl Play {
    /// 识别牌型；非法组合返回 `None`
    ///
    /// 合法张数仅 {1, 2, 3, 5}。五张依序判顺子（15 的 “2”
    /// 不入任何顺）、同花顺、铁支带单、葫芦；纯同花落选。
    pub fn detect(cards: &[Card]) -> Option<Self> {
        let mut sorted: SmallVec<[Card; 5]> = SmallVec::from_slice(cards);
        sorted.sort();

        let hand_type = match sorted.len() {
            1 => HandType::Single,
            2 if sorted[0].rank == sorted[1].rank => HandType::Pair,
            3 if sorted[0].rank == sorted[2].rank => HandType::Triple,
            5 => Self::detect_five(&sorted)?,
            _ => return None,
        };
        Some(Self {
            cards: sorted,
            hand_type,
        })
    }

    fn detect_five(sorted: &[Card]) -> Option<HandType> {
        let is_straight = sorted[4].rank != MAX_RANK
            && sorted.windows(2).all(|w| w[1].rank == w[0].rank + 1);
        let is_flush = sorted.iter().all(|c| c.suit == sorted[0].suit);

        if is_straight {
            return Some(if is_flush {
                HandType::StraightFlush
            } else {
                HandType::Straight
            });
        }
        // 铁支带单：四同点在前或在后
        if sorted[0].rank == sorted[3].rank || sorted[1].rank == sorted[4].rank {
            return Some(HandType::FourOfAKind);
        }
        // 葫芦：三带二
        let triple_low = sorted[0].rank == sorted[2].rank && sorted[3].rank == sorted[4].rank;
        let triple_high = sorted[0].rank == sorted[1].rank && sorted[2].rank == sorted[4].rank;
        if triple_low || triple_high {
            return Some(HandType::FullHouse);
        }
        // 纯同花或散牌
        None
    }

    /// 比牌代表张
    ///
    /// 单张取其本身，对子 / 三条 / 顺子取最大张，
    /// 葫芦 / 铁支取主体（三条或四条）中的最大张。
    pub fn representative(&self) -> Card {
        match self.hand_type {
            HandType::FullHouse | HandType::FourOfAKind => {
                // 已排序，正中那张必属主体
                let core_rank = self.cards[2].rank;
                *self
                    .cards
                    .iter()
                    .filter(|c| c.rank == core_rank)
                    .max()
                    .unwrap_or(&self.cards[4])
            }
            _ => self.cards[self.cards.len() - 1],
        }
    }

    /// 能否压过上一手
    ///
    /// 同张数同牌型才可比，唯五张牌型之间按强度序越型压制；
    /// 同型比代表张（先点数后花色）。
    pub fn can_beat(&self, last: &Play) -> bool {
        if self.cards.len() != last.cards.len() {
            return false;
        }
        match (
            self.hand_type.five_card_power(),
            last.hand_type.five_card_power(),
        ) {
            (Some(a), Some(b)) if a != b => a > b,
            _ => {
                self.hand_type == last.hand_type
                    && self.representative() > last.representative()
            }
        }
    }
}
