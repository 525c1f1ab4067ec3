use serde::{Deserialize, Serialize};

/// 花色（比牌权由低到高：梅花 < 方块 < 红心 < 黑桃）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardSuit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl CardSuit {
    pub const ALL: [CardSuit; 4] = [
        CardSuit::Clubs,
        CardSuit::Diamonds,
        CardSuit::Hearts,
        CardSuit::Spades,
    ];

    /// 花色权值（0-3）
    pub fn power(self) -> u8 {
        match self {
            CardSuit::Clubs => 0,
            CardSuit::Diamonds => 1,
            CardSuit::Hearts => 2,
            CardSuit::Spades => 3,
        }
    }
}

/// 大老二的点数下界（3 最小）
pub const MIN_RANK: u8 = 3;
/// 点数上界；15 代表 “2”，最大且不入顺
pub const MAX_RANK: u8 = 15;

/// 扑克牌
///
/// 点数 3..=15：3-10 为面值，11=J 12=Q 13=K 14=A 15=2。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: u8,
    pub suit: CardSuit,
}

impl Card {
    pub fn new(rank: u8, suit: CardSuit) -> Option<Self> {
        if (MIN_RANK..=MAX_RANK).contains(&rank) {
            Some(Self { rank, suit })
        } else {
            None
        }
    }

    /// 单张比牌权：先点数后花色
    pub fn power(self) -> u16 {
        self.rank as u16 * 4 + self.suit.power() as u16
    }

    /// 开局强制先手的梅花 3
    pub fn club_three() -> Self {
        Self {
            rank: 3,
            suit: CardSuit::Clubs,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.power().cmp(&other.power())
    }
}
