use rand::seq::SliceRandom;
use rand::Rng;

use super::card::{Card, CardSuit, MAX_RANK, MIN_RANK};

/// 整副牌张数
pub const DECK_SIZE: usize = 52;

/// 生成整副 52 张牌
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for rank in MIN_RANK..=MAX_RANK {
        for suit in CardSuit::ALL {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// 洗牌并按座位轮发
///
/// 四人各 13 张；三人按轮发自然落 18/17/17。
/// 每家手牌发完即排序。
pub fn deal<R: Rng>(player_count: usize, rng: &mut R) -> Vec<Vec<Card>> {
    let mut deck = full_deck();
    deck.shuffle(rng);

    let mut hands = vec![Vec::with_capacity(DECK_SIZE / player_count + 1); player_count];
    for (index, card) in deck.into_iter().enumerate() {
        hands[index % player_count].push(card);
    }
    for hand in &mut hands {
        hand.sort();
    }
    hands
}

/// 梅花 3 持有者（开局先手）
pub fn club_three_holder(hands: &[Vec<Card>]) -> Option<usize> {
    hands
        .iter()
        .position(|hand| hand.contains(&Card::club_three()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_full_deck_is_distinct_52() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        let distinct: HashSet<Card> = deck.into_iter().collect();
        assert_eq!(distinct.len(), DECK_SIZE);
    }

    #[test]
    fn test_deal_four_players() {
        let hands = deal(4, &mut StdRng::seed_from_u64(1));
        assert_eq!(hands.len(), 4);
        for hand in &hands {
            assert_eq!(hand.len(), 13);
        }
        assert!(club_three_holder(&hands).is_some());
    }

    #[test]
    fn test_deal_three_players() {
        let hands = deal(3, &mut StdRng::seed_from_u64(2));
        let sizes: Vec<usize> = hands.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![18, 17, 17]);
        // 梅花 3 必然在某家手中
        assert!(club_three_holder(&hands).is_some());
    }

    #[test]
    fn test_hands_are_sorted() {
        let hands = deal(4, &mut StdRng::seed_from_u64(3));
        for hand in &hands {
            assert!(hand.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
