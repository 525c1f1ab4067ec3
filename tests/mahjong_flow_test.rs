/// 台湾麻将对局流程集成测试

use qipai_engine::mahjong::{
    Hand, MahjongAction, MahjongBot, MahjongEngine, MahjongOutcome, MahjongState, Meld, Tile, Wall,
};
use qipai_engine::{EndReason, EngineError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_engine(seed: u64) -> MahjongEngine {
    MahjongEngine::new_with_rng(&mut StdRng::seed_from_u64(seed))
}

#[test]
fn test_deal_shape() {
    let engine = seeded_engine(1);
    assert_eq!(
        engine.state.players[engine.state.dealer as usize]
            .hand
            .total_count(),
        17
    );
    for seat in 0..4u8 {
        if seat != engine.state.dealer {
            assert_eq!(engine.state.players[seat as usize].hand.total_count(), 16);
        }
    }
    // 发出 65 张后余墙 71，其中 16 张是死墙
    assert_eq!(engine.state.wall.remaining_count(), 71);
    assert_eq!(engine.state.wall.live_count(), 71 - Wall::DEAD_WALL_RESERVE);
}

#[test]
fn test_turn_rotation_without_claims() {
    let mut engine = seeded_engine(2);
    let dealer = engine.state.dealer;

    // 庄家出一张；若无人可认领，轮转到下家
    let tile = engine.state.players[dealer as usize].hand.to_sorted_vec()[8];
    let outcome = engine
        .process_action(dealer, MahjongAction::Discard { tile })
        .unwrap();
    if let MahjongOutcome::Discarded {
        claim_opened: false,
        ..
    } = outcome
    {
        let next = MahjongState::downstream(dealer);
        assert_eq!(engine.state.current_turn, next);

        // 下家摸牌后手里 17 张，必须先出牌才能再摸
        engine.process_action(next, MahjongAction::Draw).unwrap();
        assert_eq!(engine.state.players[next as usize].hand.total_count(), 17);
        assert_eq!(
            engine.process_action(next, MahjongAction::Draw),
            Err(EngineError::InvalidAction)
        );
    }
}

#[test]
fn test_pond_records_discards() {
    let mut engine = seeded_engine(3);
    let dealer = engine.state.dealer;
    let tile = engine.state.players[dealer as usize].hand.to_sorted_vec()[0];
    engine
        .process_action(dealer, MahjongAction::Discard { tile })
        .unwrap();
    assert_eq!(engine.state.pond.len(), 1);
    assert_eq!(engine.state.pond[0].tile, tile);
    assert_eq!(engine.state.pond[0].seat, dealer);
    assert_eq!(engine.state.players[dealer as usize].discards, vec![tile]);
}

#[test]
fn test_exhaustive_draw_ends_round() {
    let mut engine = seeded_engine(4);
    let dealer = engine.state.dealer;
    let tile = engine.state.players[dealer as usize].hand.to_sorted_vec()[0];
    engine
        .process_action(dealer, MahjongAction::Discard { tile })
        .unwrap();
    engine.state.pending_claim = None;
    let seat = MahjongState::downstream(dealer);
    engine.state.current_turn = seat;

    // 抽干活牌区，只剩 16 张死墙
    while engine.state.wall.live_count() > 0 {
        engine.state.wall.draw().unwrap();
    }

    let outcome = engine.process_action(seat, MahjongAction::Draw).unwrap();
    assert_eq!(outcome, MahjongOutcome::ExhaustiveDraw);
    let end = engine.state.result.unwrap();
    assert_eq!(end.reason, EndReason::ExhaustiveDraw);
    assert_eq!(end.winner, None);
    assert_eq!(engine.state.wall.remaining_count(), Wall::DEAD_WALL_RESERVE);
}

#[test]
fn test_concealed_kong_draws_from_tail() {
    let mut engine = seeded_engine(5);
    let dealer = engine.state.dealer;

    // 给庄家塞一组暗杠材料（17 张中含四张 5筒）
    let mut tiles = vec![
        Tile::Tong(5),
        Tile::Tong(5),
        Tile::Tong(5),
        Tile::Tong(5),
    ];
    tiles.extend_from_slice(&[
        Tile::Wan(1), Tile::Wan(2), Tile::Wan(3),
        Tile::Wan(4), Tile::Wan(5), Tile::Wan(6),
        Tile::Tiao(1), Tile::Tiao(2), Tile::Tiao(3),
        Tile::Wind(1), Tile::Wind(2), Tile::Wind(3), Tile::Dragon(1),
    ]);
    engine.state.players[dealer as usize].hand = Hand::from_tiles(&tiles);

    let before = engine.state.wall.remaining_count();
    let outcome = engine
        .process_action(dealer, MahjongAction::ConcealedKong { tile: Tile::Tong(5) })
        .unwrap();
    match outcome {
        MahjongOutcome::KongDrawn { seat, meld, replacement } => {
            assert_eq!(seat, dealer);
            assert_eq!(
                meld,
                Meld::Kong { tile: Tile::Tong(5), from: dealer, is_concealed: true }
            );
            assert!(engine.state.players[dealer as usize].hand.has_tile(replacement));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    // 补牌取自墙尾
    assert_eq!(engine.state.wall.remaining_count(), before - 1);
    assert!(engine.state.kong_replacement);
    assert_eq!(engine.state.players[dealer as usize].effective_hand_size(), 17);
}

#[test]
fn test_zimo_scores_and_ends() {
    let mut engine = seeded_engine(6);
    let dealer = engine.state.dealer;

    // 完整的 17 张胡牌手
    engine.state.players[dealer as usize].hand = Hand::from_tiles(&[
        Tile::Wan(1), Tile::Wan(1), Tile::Wan(1),
        Tile::Wan(2), Tile::Wan(3), Tile::Wan(4),
        Tile::Tong(5), Tile::Tong(6), Tile::Tong(7),
        Tile::Tiao(2), Tile::Tiao(3), Tile::Tiao(4),
        Tile::Tiao(7), Tile::Tiao(8), Tile::Tiao(9),
        Tile::Dragon(1), Tile::Dragon(1),
    ]);
    engine.state.last_draw = Some(Tile::Dragon(1));

    let outcome = engine.process_action(dealer, MahjongAction::Zimo).unwrap();
    match outcome {
        MahjongOutcome::Won { seat, score, zimo } => {
            assert_eq!(seat, dealer);
            assert!(zimo);
            assert!(score.total_fan >= 1);
            // 自摸三家皆付
            assert_eq!(score.transfers[dealer as usize], score.total_fan as i32 * 3);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(engine.state.result.unwrap().reason, EndReason::Zimo);
}

#[test]
fn test_zimo_with_incomplete_hand_rejected() {
    let mut engine = seeded_engine(7);
    let dealer = engine.state.dealer;
    // 发牌后的随机 17 张几乎不可能成胡；若真成胡则本例不适用
    if !qipai_engine::check_hu(&engine.state.players[dealer as usize].hand) {
        assert_eq!(
            engine.process_action(dealer, MahjongAction::Zimo),
            Err(EngineError::InvalidClaim)
        );
    }
}

#[test]
fn test_malformed_hand_size_rejected_at_boundaries() {
    // 手牌被外部破坏成 15 张：摸与打都在动作边界被拒，状态不变
    let mut engine = seeded_engine(12);
    let seat = MahjongState::downstream(engine.state.dealer);
    engine.state.current_turn = seat;
    engine.state.last_draw = None;

    let held = engine.state.players[seat as usize].hand.to_sorted_vec()[0];
    assert!(engine.state.players[seat as usize].hand.remove_tile(held));
    assert_eq!(engine.state.players[seat as usize].effective_hand_size(), 15);

    assert_eq!(
        engine.process_action(seat, MahjongAction::Draw),
        Err(EngineError::MalformedHandSize)
    );
    assert_eq!(
        engine.process_action(seat, MahjongAction::Discard { tile: held }),
        Err(EngineError::MalformedHandSize)
    );
    assert_eq!(engine.state.players[seat as usize].effective_hand_size(), 15);
    assert!(engine.state.pond.is_empty());
}

#[test]
fn test_bot_game_reaches_terminal_state() {
    let mut rng = StdRng::seed_from_u64(8);
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
            .expect("bot action must be legal");
    }
    let end = engine.state.result.unwrap();
    match end.reason {
        EndReason::Hu | EndReason::Zimo => assert!(end.winner.is_some()),
        EndReason::ExhaustiveDraw => assert!(end.winner.is_none()),
        other => panic!("unexpected end reason: {:?}", other),
    }
}
