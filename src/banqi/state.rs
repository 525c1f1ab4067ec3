use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::piece::{Color, Piece};
use super::rules::BanqiRules;
use crate::error::EngineError;
use crate::session::EndReason;

/// 暗棋动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BanqiAction {
    /// 翻开一枚暗子
    Flip { index: usize },
    /// 平移到相邻空格
    Slide { from: usize, to: usize },
    /// 吃子
    Capture { from: usize, to: usize },
}

/// 动作处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanqiOutcome {
    /// 翻出的棋子颜色；`bound` 表示本次翻子完成了首翻定色
    Flipped { color: Color, bound: bool },
    Slid,
    /// 被吃掉的棋子
    Captured { piece: Piece },
    /// 本手导致终局
    Won { winner: Color },
}

/// 行棋记录（按时间顺序追加）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 行动玩家
    pub player: u8,
    /// 执行的动作
    pub action: BanqiAction,
    /// 该手吃掉的棋子（翻子与平移为 `None`）
    pub captured: Option<Piece>,
}

/// 终局记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanqiEnd {
    pub reason: EndReason,
    pub winner: Option<Color>,
}

/// 暗棋对局
///
/// 开局全员背面朝上，颜色不属于任何一方；首翻定色：
/// 第一枚被翻开的棋子的颜色归属翻子的玩家。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanqiState {
    pub board: Board,
    /// 被吃下场的棋子，按棋子颜色归档（红 0、黑 1）
    pub captured: [Vec<Piece>; 2],
    /// 两名玩家各自执的颜色（首翻前为 `None`）
    pub player_colors: [Option<Color>; 2],
    /// 当前行动玩家（0 或 1）
    pub current_turn: u8,
    /// 行棋历史
    pub moves: Vec<MoveRecord>,
    pub result: Option<BanqiEnd>,
}

/// 暗棋引擎
#[derive(Debug, Clone)]
pub struct BanqiEngine {
    pub state: BanqiState,
}

impl BanqiEngine {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self::new_with_rng(&mut rng)
    }

    pub fn new_with_rng<R: Rng>(rng: &mut R) -> Self {
        Self {
            state: BanqiState {
                board: Board::new_shuffled(rng),
                captured: [Vec::new(), Vec::new()],
                player_colors: [None, None],
                current_turn: 0,
                moves: Vec::new(),
                result: None,
            },
        }
    }

    /// 指定玩家执的颜色
    pub fn color_of(&self, player: u8) -> Option<Color> {
        self.state.player_colors.get(player as usize).copied().flatten()
    }

    /// 处理动作；非法动作原样拒绝，状态不变
    pub fn process_action(
        &mut self,
        player: u8,
        action: BanqiAction,
    ) -> Result<BanqiOutcome, EngineError> {
        if player >= 2 {
            return Err(EngineError::InvalidAction);
        }
        if self.state.result.is_some() {
            return Err(EngineError::GameOver);
        }
        if player != self.state.current_turn {
            return Err(EngineError::NotYourTurn);
        }

        let outcome = match action {
            BanqiAction::Flip { index } => self.handle_flip(player, index)?,
            BanqiAction::Slide { from, to } => self.handle_slide(player, from, to)?,
            BanqiAction::Capture { from, to } => self.handle_capture(player, from, to)?,
        };

        let captured = match outcome {
            BanqiOutcome::Captured { piece } => Some(piece),
            _ => None,
        };
        self.state.moves.push(MoveRecord { player, action, captured });

        if let Some(winner) = BanqiRules::check_winner(&self.state.board) {
            self.state.result = Some(BanqiEnd {
                reason: EndReason::Normal,
                winner: Some(winner),
            });
            return Ok(BanqiOutcome::Won { winner });
        }

        self.state.current_turn = 1 - self.state.current_turn;
        Ok(outcome)
    }

    /// 强制终局（认输或逃跑，由协作方裁定胜方）
    pub fn force_end(&mut self, reason: EndReason, winner: Option<Color>) {
        self.state.result = Some(BanqiEnd { reason, winner });
        tracing::info!(?reason, ?winner, "banqi game force-ended");
    }

    fn handle_flip(&mut self, player: u8, index: usize) -> Result<BanqiOutcome, EngineError> {
        let piece = self
            .state
            .board
            .flip(index)
            .ok_or(EngineError::InvalidMove)?;

        // 首翻定色：翻子者执该色，对手执另一色
        let bound = self.state.player_colors[player as usize].is_none();
        if bound {
            self.state.player_colors[player as usize] = Some(piece.color);
            self.state.player_colors[1 - player as usize] = Some(piece.color.opponent());
        }
        Ok(BanqiOutcome::Flipped {
            color: piece.color,
            bound,
        })
    }

    fn handle_slide(&mut self, player: u8, from: usize, to: usize) -> Result<BanqiOutcome, EngineError> {
        self.check_owns_face_up(player, from)?;
        if !BanqiRules::is_valid_move(&self.state.board, from, to) {
            return Err(EngineError::InvalidMove);
        }
        self.state.board.relocate(from, to);
        Ok(BanqiOutcome::Slid)
    }

    fn handle_capture(&mut self, player: u8, from: usize, to: usize) -> Result<BanqiOutcome, EngineError> {
        self.check_owns_face_up(player, from)?;
        if !BanqiRules::can_capture(&self.state.board, from, to) {
            return Err(EngineError::InvalidMove);
        }
        let target = self
            .state
            .board
            .get(to)
            .ok_or(EngineError::InvalidMove)?;
        self.state.board.relocate(from, to);
        self.state.captured[target.color.index()].push(target);
        Ok(BanqiOutcome::Captured { piece: target })
    }

    /// 起点须是行动方已翻开的己方棋子
    fn check_owns_face_up(&self, player: u8, index: usize) -> Result<(), EngineError> {
        let color = self
            .color_of(player)
            .ok_or(EngineError::InvalidMove)?;
        match self.state.board.get(index) {
            Some(p) if p.flipped && p.color == color => Ok(()),
            _ => Err(EngineError::InvalidMove),
        }
    }
}

impl Default for BanqiEngine {
    fn default() -> Self {
        Self::new()
    }
}
