use rand::Rng;

use super::claim::{ClaimAction, PendingClaim};
use super::meld::{ChiShape, Meld, MeldChecker};
use super::scoring::{ScoreCalculator, ScoreResult, WinContext};
use super::state::{DiscardRecord, MahjongEnd, MahjongState};
use super::tile::Tile;
use crate::error::EngineError;
use crate::session::EndReason;

/// 麻将动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MahjongAction {
    /// 摸牌
    Draw,
    /// 出牌
    Discard { tile: Tile },
    /// 认领他人弃牌（胡 / 杠 / 碰 / 吃）
    Claim {
        action: ClaimAction,
        /// 吃牌形状（仅 Chi 需要）
        chi_shape: Option<ChiShape>,
    },
    /// 放弃认领
    Skip,
    /// 暗杠（自己回合）
    ConcealedKong { tile: Tile },
    /// 加杠（自己回合，已碰刻子补第四张）
    AddedKong { tile: Tile },
    /// 自摸胡
    Zimo,
}

/// 动作处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum MahjongOutcome {
    /// 摸牌
    Drawn { tile: Tile },
    /// 出牌；`claim_opened` 表示有人获得认领资格
    Discarded { tile: Tile, claim_opened: bool },
    /// 副露完成（碰 / 吃）
    Melded { seat: u8, meld: Meld },
    /// 杠完成并补牌
    KongDrawn {
        seat: u8,
        meld: Meld,
        replacement: Tile,
    },
    /// 杠完成但被挂入抢杠窗口（补牌推迟到窗口关闭）
    KongRobbable { seat: u8, meld: Meld },
    /// 胡牌
    Won {
        seat: u8,
        score: ScoreResult,
        zimo: bool,
    },
    /// 放弃；`next_actor` 为让位后的下一行动座位
    Passed { next_actor: Option<u8> },
    /// 流局（摸牌触及死墙）
    ExhaustiveDraw,
}

/// 麻将引擎
///
/// 台湾十六张：发牌 16×4、庄家补第 17 张，保留死墙 16 张。
/// 纯状态机——每个动作要么产生新状态，要么原状态不变地拒绝。
#[derive(Debug, Clone)]
pub struct MahjongEngine {
    /// 对局状态
    pub state: MahjongState,
}

impl MahjongEngine {
    /// 创建并发牌（系统随机源）
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self::new_with_rng(&mut rng)
    }

    /// 创建并发牌（注入随机源，供测试复现）
    pub fn new_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut state = MahjongState::new();
        state.wall.shuffle_with(rng);

        // 每家 16 张
        for _ in 0..16 {
            for seat in 0..4 {
                if let Ok(tile) = state.wall.draw() {
                    state.players[seat].hand.add_tile(tile);
                }
            }
        }
        // 庄家立即补第 17 张
        if let Ok(tile) = state.wall.draw() {
            state.players[state.dealer as usize].hand.add_tile(tile);
            state.last_draw = Some(tile);
        }
        state.current_turn = state.dealer;

        Self { state }
    }

    /// 处理动作
    ///
    /// 合法性校验失败时原样拒绝（状态不变）；
    /// `WallExhausted` 走流局终局信号而非错误向上冒泡。
    pub fn process_action(
        &mut self,
        seat: u8,
        action: MahjongAction,
    ) -> Result<MahjongOutcome, EngineError> {
        if seat >= 4 {
            return Err(EngineError::InvalidAction);
        }
        if self.state.is_over() {
            return Err(EngineError::GameOver);
        }

        match action {
            MahjongAction::Draw => self.handle_draw(seat),
            MahjongAction::Discard { tile } => self.handle_discard(seat, tile),
            MahjongAction::Claim { action, chi_shape } => {
                self.handle_claim(seat, action, chi_shape)
            }
            MahjongAction::Skip => self.handle_skip(seat),
            MahjongAction::ConcealedKong { tile } => self.handle_concealed_kong(seat, tile),
            MahjongAction::AddedKong { tile } => self.handle_added_kong(seat, tile),
            MahjongAction::Zimo => self.handle_zimo(seat),
        }
    }

    /// 强制终局（断线・认输等外部原因，由协作方裁定）
    pub fn force_end(&mut self, reason: EndReason, winner: Option<u8>) {
        self.state.result = Some(MahjongEnd { reason, winner });
        tracing::info!(?reason, winner, "mahjong game force-ended");
    }

    fn handle_draw(&mut self, seat: u8) -> Result<MahjongOutcome, EngineError> {
        if seat != self.state.current_turn {
            return Err(EngineError::NotYourTurn);
        }
        if self.state.pending_claim.is_some() || self.state.last_draw.is_some() {
            return Err(EngineError::InvalidAction);
        }
        if self.state.players[seat as usize].effective_hand_size() != 16 {
            return Err(EngineError::MalformedHandSize);
        }

        match self.state.wall.draw() {
            Ok(tile) => {
                self.state.players[seat as usize].hand.add_tile(tile);
                self.state.last_draw = Some(tile);
                self.state.is_last_tile = self.state.wall.is_exhausted();
                Ok(MahjongOutcome::Drawn { tile })
            }
            Err(EngineError::WallExhausted) => {
                // 死墙触及：流局，与胡牌走同一条终局信号
                self.state.result = Some(MahjongEnd {
                    reason: EndReason::ExhaustiveDraw,
                    winner: None,
                });
                Ok(MahjongOutcome::ExhaustiveDraw)
            }
            Err(e) => Err(e),
        }
    }

    fn handle_discard(&mut self, seat: u8, tile: Tile) -> Result<MahjongOutcome, EngineError> {
        if seat != self.state.current_turn {
            return Err(EngineError::NotYourTurn);
        }
        if self.state.pending_claim.is_some() {
            return Err(EngineError::InvalidAction);
        }
        if self.state.players[seat as usize].effective_hand_size() != 17 {
            return Err(EngineError::MalformedHandSize);
        }
        if !self.state.players[seat as usize].hand.remove_tile(tile) {
            return Err(EngineError::InvalidMove);
        }

        self.state.players[seat as usize].discards.push(tile);
        self.state.pond.push(DiscardRecord { seat, tile });
        self.state.last_draw = None;
        self.state.kong_replacement = false;

        let claim = PendingClaim::collect(&self.state.players, seat, tile);
        let claim_opened = claim.is_some();
        self.state.pending_claim = claim;
        if !claim_opened {
            self.state.current_turn = MahjongState::downstream(seat);
        }
        Ok(MahjongOutcome::Discarded { tile, claim_opened })
    }

    fn handle_claim(
        &mut self,
        seat: u8,
        action: ClaimAction,
        chi_shape: Option<ChiShape>,
    ) -> Result<MahjongOutcome, EngineError> {
        let claim = match &self.state.pending_claim {
            Some(c) => c.clone(),
            None => return Err(EngineError::InvalidClaim),
        };

        // 只有当前最高优先级的座位可以行动
        let actor = claim.next_actor().ok_or(EngineError::InvalidClaim)?;
        if actor.seat != seat || !actor.allows(action) {
            return Err(EngineError::InvalidClaim);
        }

        let tile = claim.tile;
        let from = claim.from_player;

        match action {
            ClaimAction::Hu => self.execute_hu(seat, from, tile),
            ClaimAction::Kong => {
                if !self.state.players[seat as usize].apply_direct_kong(tile, from) {
                    return Err(EngineError::InvalidClaim);
                }
                self.consume_discard(from);
                self.state.pending_claim = None;
                let meld = Meld::Kong { tile, from, is_concealed: false };

                // 明杠自他人弃牌重开对该牌的胡资格（抢杠窗口）
                if let Some(rob) =
                    PendingClaim::collect_hu_only(&self.state.players, seat, tile)
                {
                    self.state.pending_claim = Some(rob);
                    self.state.pending_kong = Some(seat);
                    return Ok(MahjongOutcome::KongRobbable { seat, meld });
                }
                self.finish_kong(seat, meld)
            }
            ClaimAction::Pong => {
                if !self.state.players[seat as usize].apply_pong(tile, from) {
                    return Err(EngineError::InvalidClaim);
                }
                self.consume_discard(from);
                self.state.pending_claim = None;
                self.state.current_turn = seat;
                Ok(MahjongOutcome::Melded {
                    seat,
                    meld: Meld::Pong { tile, from },
                })
            }
            ClaimAction::Chi => {
                let shape = chi_shape.ok_or(EngineError::InvalidClaim)?;
                let start =
                    MeldChecker::chi_start(tile, shape).ok_or(EngineError::InvalidClaim)?;
                if !self.state.players[seat as usize].apply_chi(start, tile, from) {
                    return Err(EngineError::InvalidClaim);
                }
                self.consume_discard(from);
                self.state.pending_claim = None;
                self.state.current_turn = seat;
                Ok(MahjongOutcome::Melded {
                    seat,
                    meld: Meld::Chi { start, from },
                })
            }
        }
    }

    fn handle_skip(&mut self, seat: u8) -> Result<MahjongOutcome, EngineError> {
        let claim = match &mut self.state.pending_claim {
            Some(c) => c,
            None => return Err(EngineError::InvalidClaim),
        };
        let from = claim.from_player;
        if !claim.skip(seat) {
            return Err(EngineError::InvalidClaim);
        }

        if let Some(actor) = claim.next_actor() {
            let next = actor.seat;
            return Ok(MahjongOutcome::Passed { next_actor: Some(next) });
        }

        // 全员放弃：关闭认领
        self.state.pending_claim = None;
        if let Some(kong_seat) = self.state.pending_kong.take() {
            // 抢杠窗口关闭，杠家补牌
            let replacement = match self.state.wall.draw_replacement() {
                Ok(t) => t,
                Err(_) => {
                    self.state.result = Some(MahjongEnd {
                        reason: EndReason::ExhaustiveDraw,
                        winner: None,
                    });
                    return Ok(MahjongOutcome::ExhaustiveDraw);
                }
            };
            self.state.players[kong_seat as usize].hand.add_tile(replacement);
            self.state.last_draw = Some(replacement);
            self.state.kong_replacement = true;
            self.state.current_turn = kong_seat;
            return Ok(MahjongOutcome::Passed { next_actor: Some(kong_seat) });
        }

        // 弃牌认领全弃：轮到弃牌者下家摸牌
        self.state.current_turn = MahjongState::downstream(from);
        Ok(MahjongOutcome::Passed {
            next_actor: Some(self.state.current_turn),
        })
    }

    fn handle_concealed_kong(&mut self, seat: u8, tile: Tile) -> Result<MahjongOutcome, EngineError> {
        if seat != self.state.current_turn {
            return Err(EngineError::NotYourTurn);
        }
        if self.state.pending_claim.is_some() {
            return Err(EngineError::InvalidAction);
        }
        if !self.state.players[seat as usize].apply_concealed_kong(tile) {
            return Err(EngineError::InvalidClaim);
        }
        let meld = Meld::Kong { tile, from: seat, is_concealed: true };
        self.finish_kong(seat, meld)
    }

    fn handle_added_kong(&mut self, seat: u8, tile: Tile) -> Result<MahjongOutcome, EngineError> {
        if seat != self.state.current_turn {
            return Err(EngineError::NotYourTurn);
        }
        if self.state.pending_claim.is_some() {
            return Err(EngineError::InvalidAction);
        }
        if !self.state.players[seat as usize].apply_added_kong(tile) {
            return Err(EngineError::InvalidClaim);
        }
        let meld = Meld::Kong { tile, from: seat, is_concealed: false };
        self.finish_kong(seat, meld)
    }

    fn handle_zimo(&mut self, seat: u8) -> Result<MahjongOutcome, EngineError> {
        if seat != self.state.current_turn {
            return Err(EngineError::NotYourTurn);
        }
        if self.state.pending_claim.is_some() {
            return Err(EngineError::InvalidAction);
        }
        let winning_tile = self.state.last_draw.ok_or(EngineError::InvalidClaim)?;
        let player = &self.state.players[seat as usize];
        if player.effective_hand_size() != 17 {
            return Err(EngineError::MalformedHandSize);
        }
        if !super::win_check::check_hu(&player.hand) {
            return Err(EngineError::InvalidClaim);
        }

        let score = self.settle_win(seat, None, winning_tile);
        self.state.result = Some(MahjongEnd {
            reason: EndReason::Zimo,
            winner: Some(seat),
        });
        Ok(MahjongOutcome::Won { seat, score, zimo: true })
    }

    /// 荣和（认领他人弃牌 / 抢杠）
    fn execute_hu(
        &mut self,
        seat: u8,
        from: u8,
        tile: Tile,
    ) -> Result<MahjongOutcome, EngineError> {
        // 胡的牌并入门前手牌参与拆解
        self.state.players[seat as usize].hand.add_tile(tile);
        let score = self.settle_win(seat, Some(from), tile);
        self.state.pending_claim = None;
        self.state.pending_kong = None;
        self.state.result = Some(MahjongEnd {
            reason: EndReason::Hu,
            winner: Some(seat),
        });
        Ok(MahjongOutcome::Won { seat, score, zimo: false })
    }

    /// 算台并入账
    fn settle_win(&mut self, winner: u8, discarder: Option<u8>, winning_tile: Tile) -> ScoreResult {
        let player = &self.state.players[winner as usize];
        let ctx = WinContext {
            winner,
            discarder,
            is_last_wall_tile: self.state.is_last_tile,
            is_kong_replacement: self.state.kong_replacement,
            dealer: self.state.dealer,
            dealer_streak: self.state.dealer_streak,
            prevailing_wind: self.state.prevailing_wind,
            seat_wind: self.state.seat_wind_of(winner),
        };
        let score = ScoreCalculator::calculate(
            &player.hand,
            winning_tile,
            &player.melds,
            player.is_concealed(),
            &ctx,
        );
        for seat in 0..4 {
            self.state.players[seat].score += score.transfers[seat];
        }
        score
    }

    /// 杠成立后的补牌（从死墙端）
    fn finish_kong(&mut self, seat: u8, meld: Meld) -> Result<MahjongOutcome, EngineError> {
        let replacement = match self.state.wall.draw_replacement() {
            Ok(t) => t,
            Err(_) => {
                self.state.result = Some(MahjongEnd {
                    reason: EndReason::ExhaustiveDraw,
                    winner: None,
                });
                return Ok(MahjongOutcome::ExhaustiveDraw);
            }
        };
        self.state.players[seat as usize].hand.add_tile(replacement);
        self.state.last_draw = Some(replacement);
        self.state.kong_replacement = true;
        self.state.current_turn = seat;
        Ok(MahjongOutcome::KongDrawn { seat, meld, replacement })
    }

    /// 副露消耗掉的弃牌从牌池与个人牌河撤下
    fn consume_discard(&mut self, discarder: u8) {
        self.state.pond.pop();
        self.state.players[discarder as usize].discards.pop();
    }
}

impl Default for MahjongEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_engine(seed: u64) -> MahjongEngine {
        MahjongEngine::new_with_rng(&mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_deal_sizes() {
        let engine = seeded_engine(1);
        // 庄家 17 张，其余 16 张
        assert_eq!(engine.state.players[0].hand.total_count(), 17);
        for seat in 1..4 {
            assert_eq!(engine.state.players[seat].hand.total_count(), 16);
        }
        // 余墙 = 136 - 65
        assert_eq!(engine.state.wall.remaining_count(), 136 - 65);
        assert_eq!(engine.state.current_turn, 0);
    }

    #[test]
    fn test_tile_conservation() {
        let engine = seeded_engine(2);
        let in_hands: usize = engine
            .state
            .players
            .iter()
            .map(|p| p.hand.total_count())
            .sum();
        assert_eq!(in_hands + engine.state.wall.remaining_count(), 136);
    }

    #[test]
    fn test_not_your_turn_rejected() {
        let mut engine = seeded_engine(3);
        let wrong_seat = MahjongState::downstream(engine.state.current_turn);
        assert_eq!(
            engine.process_action(wrong_seat, MahjongAction::Draw),
            Err(EngineError::NotYourTurn)
        );
    }

    #[test]
    fn test_draw_with_full_hand_rejected() {
        let mut engine = seeded_engine(4);
        // 庄家已经 17 张（发牌时补的），不能再摸
        let dealer = engine.state.dealer;
        assert!(engine.process_action(dealer, MahjongAction::Draw).is_err());
    }

    #[test]
    fn test_discard_then_turn_advances_when_no_claims() {
        let mut engine = seeded_engine(5);
        let dealer = engine.state.dealer;
        let tile = engine.state.players[dealer as usize].hand.to_sorted_vec()[0];
        let outcome = engine
            .process_action(dealer, MahjongAction::Discard { tile })
            .unwrap();
        match outcome {
            MahjongOutcome::Discarded { claim_opened, .. } => {
                if !claim_opened {
                    assert_eq!(engine.state.current_turn, MahjongState::downstream(dealer));
                } else {
                    assert!(engine.state.pending_claim.is_some());
                }
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(engine.state.pond.len(), 1);
    }

    #[test]
    fn test_discard_tile_not_in_hand_rejected() {
        let mut engine = seeded_engine(6);
        let dealer = engine.state.dealer;
        // 找一张庄家没有的牌
        let missing = Tile::all_faces()
            .find(|t| !engine.state.players[dealer as usize].hand.has_tile(*t))
            .unwrap();
        assert_eq!(
            engine.process_action(dealer, MahjongAction::Discard { tile: missing }),
            Err(EngineError::InvalidMove)
        );
    }

    #[test]
    fn test_force_end() {
        let mut engine = seeded_engine(7);
        engine.force_end(EndReason::Surrender, None);
        assert!(engine.state.is_over());
        assert_eq!(
            engine.process_action(0, MahjongAction::Draw),
            Err(EngineError::GameOver)
        );
    }
}
