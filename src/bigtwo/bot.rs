use smallvec::SmallVec;

use super::card::Card;
use super::hand_type::Play;
use super::state::BigTwoState;

/// 大老二机器人动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BigTwoBotMove {
    Play(SmallVec<[Card; 5]>),
    Pass,
}

/// 大老二机器人
///
/// 自由轮出全局最小单张（首手强制带梅花 3）；
/// 压牌轮从小到大找最便宜的可压组合，找不到就过。
pub struct BigTwoBot;

impl BigTwoBot {
    /// 为指定座位选择动作（纯函数，即时返回）
    pub fn decide(state: &BigTwoState, seat: u8) -> BigTwoBotMove {
        let hand = &state.players[seat as usize].hand;

        if !state.first_play_done {
            // 整局第一手：单出梅花 3
            return BigTwoBotMove::Play(SmallVec::from_slice(&[Card::club_three()]));
        }

        let last = match &state.last_play {
            Some(last) => last,
            None => {
                // 自由轮：出最小单张
                return match hand.first() {
                    Some(card) => BigTwoBotMove::Play(SmallVec::from_slice(&[*card])),
                    None => BigTwoBotMove::Pass,
                };
            }
        };

        for candidate in Self::candidates(hand, last.cards.len()) {
            if let Some(play) = Play::detect(&candidate) {
                if play.can_beat(last) {
                    return BigTwoBotMove::Play(candidate);
                }
            }
        }
        BigTwoBotMove::Pass
    }

    /// 与上一手同张数的候选组合，按代表张从小到大
    ///
    /// 手牌保持升序，因此顺序枚举天然从便宜到贵。
    fn candidates(hand: &[Card], count: usize) -> Vec<SmallVec<[Card; 5]>> {
        let mut result = Vec::new();
        match count {
            1 => {
                for card in hand {
                    result.push(SmallVec::from_slice(&[*card]));
                }
            }
            2 | 3 => {
                // 同点组合：连续区段内取前 count 张
                let mut start = 0;
                while start < hand.len() {
                    let rank = hand[start].rank;
                    let mut end = start;
                    while end < hand.len() && hand[end].rank == rank {
                        end += 1;
                    }
                    if end - start >= count {
                        result.push(SmallVec::from_slice(&hand[start..start + count]));
                    }
                    start = end;
                }
            }
            5 => {
                result = Self::five_card_candidates(hand);
            }
            _ => {}
        }
        result
    }

    /// 五张候选：顺子、葫芦、铁支带单（各取最小可行者优先）
    fn five_card_candidates(hand: &[Card]) -> Vec<SmallVec<[Card; 5]>> {
        let mut result = Vec::new();

        // 顺子：对每个可能的起始点数取各点一张
        for start_rank in 3..=10u8 {
            let mut run: SmallVec<[Card; 5]> = SmallVec::new();
            for rank in start_rank..start_rank + 5 {
                match hand.iter().find(|c| c.rank == rank) {
                    Some(card) => run.push(*card),
                    None => break,
                }
            }
            if run.len() == 5 {
                result.push(run);
            }
        }

        // 按点数分组，找三条 / 四条主体
        let mut groups: Vec<(u8, Vec<Card>)> = Vec::new();
        for card in hand {
            match groups.last_mut() {
                Some((rank, cards)) if *rank == card.rank => cards.push(*card),
                _ => groups.push((card.rank, vec![*card])),
            }
        }

        // 葫芦：三条配最小对子
        for (triple_rank, cards) in groups.iter().filter(|(_, c)| c.len() >= 3) {
            if let Some((_, pair)) = groups
                .iter()
                .find(|(r, c)| r != triple_rank && c.len() >= 2)
            {
                let mut combo: SmallVec<[Card; 5]> = SmallVec::from_slice(&cards[..3]);
                combo.extend_from_slice(&pair[..2]);
                result.push(combo);
            }
        }

        // 铁支带最小单张
        for (quad_rank, cards) in groups.iter().filter(|(_, c)| c.len() == 4) {
            if let Some(kicker) = hand.iter().find(|c| c.rank != *quad_rank) {
                let mut combo: SmallVec<[Card; 5]> = SmallVec::from_slice(&cards[..4]);
                combo.push(*kicker);
                result.push(combo);
            }
        }

        result
    }
}
