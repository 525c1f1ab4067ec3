use rand::Rng;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::deck;
use super::hand_type::Play;
use crate::error::EngineError;
use crate::session::EndReason;

/// 大老二玩家
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BigTwoPlayer {
    pub seat: u8,
    /// 手牌（保持升序）
    pub hand: Vec<Card>,
}

impl BigTwoPlayer {
    /// 移除一组牌；任一张不在手中则整组不动并返回 `false`
    fn remove_cards(&mut self, cards: &[Card]) -> bool {
        let mut remaining = self.hand.clone();
        for card in cards {
            match remaining.iter().position(|c| c == card) {
                Some(pos) => {
                    remaining.remove(pos);
                }
                None => return false,
            }
        }
        self.hand = remaining;
        true
    }
}

/// 终局记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigTwoEnd {
    pub reason: EndReason,
    pub winner: Option<u8>,
}

/// 大老二状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BigTwoState {
    pub players: Vec<BigTwoPlayer>,
    /// 当前行动座位
    pub current_turn: u8,
    /// 桌面待压的上一手（`None` 表示新一轮自由出牌）
    pub last_play: Option<Play>,
    /// 上一手的出牌者
    pub last_player: Option<u8>,
    /// 连续过牌数
    pub consecutive_passes: u8,
    /// 本轮首出者
    pub round_starter: u8,
    /// 整局第一手是否已出（第一手须含梅花 3）
    pub first_play_done: bool,
    pub result: Option<BigTwoEnd>,
}

/// 动作处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum BigTwoOutcome {
    /// 出牌成立
    Played { play: Play },
    /// 过牌；`round_reset` 表示其余人全过、桌面清空
    Passed { round_reset: bool },
    /// 出完手牌获胜
    Won { winner: u8, play: Play },
}

/// 大老二引擎
///
/// 先手固定为梅花 3 持有者，且整局第一手必须带出梅花 3。
/// 其余人全部过牌后，最后出牌者开新一轮自由出牌。
#[derive(Debug, Clone)]
pub struct BigTwoEngine {
    pub state: BigTwoState,
}

impl BigTwoEngine {
    pub fn new(player_count: usize) -> Result<Self, EngineError> {
        let mut rng = rand::thread_rng();
        Self::new_with_rng(player_count, &mut rng)
    }

    pub fn new_with_rng<R: Rng>(player_count: usize, rng: &mut R) -> Result<Self, EngineError> {
        if !(3..=4).contains(&player_count) {
            return Err(EngineError::InvalidAction);
        }
        let hands = deck::deal(player_count, rng);
        let starter = deck::club_three_holder(&hands).ok_or(EngineError::InvalidAction)? as u8;

        let players = hands
            .into_iter()
            .enumerate()
            .map(|(seat, hand)| BigTwoPlayer {
                seat: seat as u8,
                hand,
            })
            .collect();

        Ok(Self {
            state: BigTwoState {
                players,
                current_turn: starter,
                last_play: None,
                last_player: None,
                consecutive_passes: 0,
                round_starter: starter,
                first_play_done: false,
                result: None,
            },
        })
    }

    /// 出牌合法性
    ///
    /// 牌型须可识别；整局第一手须含梅花 3；桌面有待压牌时
    /// 须同张数同型压过（五张之间按型强度越型压制）。
    pub fn is_valid_play(&self, cards: &[Card]) -> Option<Play> {
        let play = Play::detect(cards)?;
        if !self.state.first_play_done && !cards.contains(&Card::club_three()) {
            return None;
        }
        // 自由轮不限型；否则须压过桌面
        match &self.state.last_play {
            Some(last) => {
                if play.can_beat(last) {
                    Some(play)
                } else {
                    None
                }
            }
            None => Some(play),
        }
    }

    /// 处理出牌
    pub fn play(&mut self, seat: u8, cards: &[Card]) -> Result<BigTwoOutcome, EngineError> {
        self.check_actor(seat)?;
        let play = self.is_valid_play(cards).ok_or(EngineError::InvalidMove)?;
        if !self.state.players[seat as usize].remove_cards(cards) {
            return Err(EngineError::InvalidMove);
        }

        self.state.first_play_done = true;
        self.state.last_play = Some(play.clone());
        self.state.last_player = Some(seat);
        self.state.consecutive_passes = 0;

        if self.state.players[seat as usize].hand.is_empty() {
            self.state.result = Some(BigTwoEnd {
                reason: EndReason::Normal,
                winner: Some(seat),
            });
            return Ok(BigTwoOutcome::Won { winner: seat, play });
        }

        self.advance_turn();
        Ok(BigTwoOutcome::Played { play })
    }

    /// 处理过牌
    ///
    /// 自由轮首出者不可过；其余人全过后，最后出牌者
    /// 清空桌面开新一轮。
    pub fn pass(&mut self, seat: u8) -> Result<BigTwoOutcome, EngineError> {
        self.check_actor(seat)?;
        if self.state.last_play.is_none() {
            return Err(EngineError::InvalidMove);
        }

        self.state.consecutive_passes += 1;
        let others = self.state.players.len() as u8 - 1;
        if self.state.consecutive_passes >= others {
            // 其余人全过：最后出牌者重开一轮
            let leader = self.state.last_player.unwrap_or(self.state.round_starter);
            self.state.last_play = None;
            self.state.last_player = None;
            self.state.consecutive_passes = 0;
            self.state.round_starter = leader;
            self.state.current_turn = leader;
            return Ok(BigTwoOutcome::Passed { round_reset: true });
        }

        self.advance_turn();
        Ok(BigTwoOutcome::Passed { round_reset: false })
    }

    /// 强制终局（认输或逃跑，由协作方裁定胜方）
    pub fn force_end(&mut self, reason: EndReason, winner: Option<u8>) {
        self.state.result = Some(BigTwoEnd { reason, winner });
        tracing::info!(?reason, winner, "big two game force-ended");
    }

    fn check_actor(&self, seat: u8) -> Result<(), EngineError> {
        if seat as usize >= self.state.players.len() {
            return Err(EngineError::InvalidAction);
        }
        if self.state.result.is_some() {
            return Err(EngineError::GameOver);
        }
        if seat != self.state.current_turn {
            return Err(EngineError::NotYourTurn);
        }
        Ok(())
    }

    fn advance_turn(&mut self) {
        let count = self.state.players.len() as u8;
        self.state.current_turn = (self.state.current_turn + 1) % count;
    }
}
