use rand::seq::SliceRandom;
use rand::Rng;

use super::claim::ClaimAction;
use super::engine::MahjongAction;
use super::meld::MeldChecker;
use super::state::MahjongState;
use super::win_check::check_hu;

/// 碰 / 杠的认领概率
const CLAIM_PONG_KONG_PROB: f64 = 0.8;
/// 吃的认领概率
const CLAIM_CHI_PROB: f64 = 0.5;

/// 麻将机器人
///
/// 纯决策函数：读状态、出动作，不驱动引擎。
/// 胡必收，碰杠吃按概率收，否则放弃。
pub struct MahjongBot;

impl MahjongBot {
    /// 为指定座位选择动作
    ///
    /// 认领窗口内仅在该座位为当前行动者时被调用；
    /// 自己回合时按摸牌、自摸检查、随机出牌的顺序决策。
    pub fn decide<R: Rng>(state: &MahjongState, seat: u8, rng: &mut R) -> MahjongAction {
        if let Some(claim) = &state.pending_claim {
            if let Some(offer) = claim.offer_for(seat) {
                if offer.allows(ClaimAction::Hu) {
                    return MahjongAction::Claim {
                        action: ClaimAction::Hu,
                        chi_shape: None,
                    };
                }
                if offer.allows(ClaimAction::Kong) && rng.gen_bool(CLAIM_PONG_KONG_PROB) {
                    return MahjongAction::Claim {
                        action: ClaimAction::Kong,
                        chi_shape: None,
                    };
                }
                if offer.allows(ClaimAction::Pong) && rng.gen_bool(CLAIM_PONG_KONG_PROB) {
                    return MahjongAction::Claim {
                        action: ClaimAction::Pong,
                        chi_shape: None,
                    };
                }
                if offer.allows(ClaimAction::Chi) && rng.gen_bool(CLAIM_CHI_PROB) {
                    let hand = &state.players[seat as usize].hand;
                    let shapes = MeldChecker::chi_shapes(hand, claim.tile);
                    if let Some(shape) = shapes.first() {
                        return MahjongAction::Claim {
                            action: ClaimAction::Chi,
                            chi_shape: Some(*shape),
                        };
                    }
                }
            }
            return MahjongAction::Skip;
        }

        let player = &state.players[seat as usize];
        if player.effective_hand_size() == 16 {
            return MahjongAction::Draw;
        }

        // 17 张：先查自摸（须刚摸进一张），再随机出一张
        if state.last_draw.is_some() && check_hu(&player.hand) {
            return MahjongAction::Zimo;
        }
        // 17 张有效牌时门前至少两张（副露至多 5 组占 15 张），手牌不会为空
        let tiles = player.hand.to_sorted_vec();
        let tile = *tiles.choose(rng).expect("discard turn with empty hand");
        MahjongAction::Discard { tile }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::mahjong::engine::MahjongEngine;
    use crate::mahjong::{Hand, Meld, Tile};

    #[test]
    fn test_bot_draws_with_sixteen_tiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let engine = MahjongEngine::new_with_rng(&mut rng);
        let seat = MahjongState::downstream(engine.state.dealer);
        let action = MahjongBot::decide(&engine.state, seat, &mut rng);
        assert_eq!(action, MahjongAction::Draw);
    }

    #[test]
    fn test_bot_discards_from_hand() {
        let mut rng = StdRng::seed_from_u64(2);
        let engine = MahjongEngine::new_with_rng(&mut rng);
        let dealer = engine.state.dealer;
        let action = MahjongBot::decide(&engine.state, dealer, &mut rng);
        match action {
            MahjongAction::Discard { tile } => {
                assert!(engine.state.players[dealer as usize].hand.has_tile(tile));
            }
            MahjongAction::Zimo => {
                assert!(check_hu(&engine.state.players[dealer as usize].hand));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_bot_discards_with_minimal_hand() {
        // 五组副露、门前两张的极限手型也能选出一张可打的牌
        let mut rng = StdRng::seed_from_u64(9);
        let mut engine = MahjongEngine::new_with_rng(&mut rng);
        let dealer = engine.state.dealer;
        let player = &mut engine.state.players[dealer as usize];
        player.melds.clear();
        for n in 1..=5 {
            player.melds.push(Meld::Pong { tile: Tile::Tong(n), from: 0 });
        }
        player.hand = Hand::from_tiles(&[Tile::Wan(1), Tile::Wan(9)]);
        engine.state.last_draw = None;
        assert_eq!(engine.state.players[dealer as usize].effective_hand_size(), 17);

        let action = MahjongBot::decide(&engine.state, dealer, &mut rng);
        match action {
            MahjongAction::Discard { tile } => {
                assert!(engine.state.players[dealer as usize].hand.has_tile(tile));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_bot_game_terminates() {
        // 四个机器人把一整局打完：要么有人胡，要么流局
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = MahjongEngine::new_with_rng(&mut rng);
        let mut guard = 0;
        while !engine.state.is_over() {
            guard += 1;
            assert!(guard < 4096, "game did not terminate");

            let seat = match &engine.state.pending_claim {
                Some(claim) => claim.next_actor().map(|o| o.seat).unwrap(),
                None => engine.state.current_turn,
            };
            let action = MahjongBot::decide(&engine.state, seat, &mut rng);
            engine
                .process_action(seat, action)
                .expect("bot produced an invalid action");
        }
    }
}
