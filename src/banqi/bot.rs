use rand::seq::SliceRandom;
use rand::Rng;

use super::board::{Board, CELL_COUNT};
use super::piece::Color;
use super::rules::BanqiRules;
use super::state::{BanqiAction, BanqiState};

/// 无明子以外情形下选择翻子的概率
const FLIP_PROB: f64 = 0.6;

/// 暗棋机器人
///
/// 有吃必吃（等价选项中随机），否则六成翻子
/// （己方无明子时必翻），再否则随机平移，最后兜底翻子。
pub struct BanqiBot;

impl BanqiBot {
    /// 为指定玩家选择动作；无任何合法动作时返回 `None`
    pub fn decide<R: Rng>(state: &BanqiState, player: u8, rng: &mut R) -> Option<BanqiAction> {
        let color = state.player_colors.get(player as usize).copied().flatten();

        let captures = Self::legal_captures(&state.board, color);
        if let Some(&(from, to)) = captures.choose(rng) {
            return Some(BanqiAction::Capture { from, to });
        }

        let face_down = state.board.face_down_indices();
        let must_flip = match color {
            Some(c) => state.board.count_face_up(c) == 0,
            None => true,
        };
        if !face_down.is_empty() && (must_flip || rng.gen_bool(FLIP_PROB)) {
            let index = *face_down.choose(rng)?;
            return Some(BanqiAction::Flip { index });
        }

        let slides = Self::legal_slides(&state.board, color);
        if let Some(&(from, to)) = slides.choose(rng) {
            return Some(BanqiAction::Slide { from, to });
        }

        // 无吃无走：只剩翻子可选
        face_down
            .choose(rng)
            .map(|&index| BanqiAction::Flip { index })
    }

    fn legal_captures(board: &Board, color: Option<Color>) -> Vec<(usize, usize)> {
        let color = match color {
            Some(c) => c,
            None => return Vec::new(),
        };
        let mut moves = Vec::new();
        for from in 0..CELL_COUNT {
            match board.get(from) {
                Some(p) if p.flipped && p.color == color => {}
                _ => continue,
            }
            for to in 0..CELL_COUNT {
                if BanqiRules::can_capture(board, from, to) {
                    moves.push((from, to));
                }
            }
        }
        moves
    }

    fn legal_slides(board: &Board, color: Option<Color>) -> Vec<(usize, usize)> {
        let color = match color {
            Some(c) => c,
            None => return Vec::new(),
        };
        let mut moves = Vec::new();
        for from in 0..CELL_COUNT {
            match board.get(from) {
                Some(p) if p.flipped && p.color == color => {}
                _ => continue,
            }
            for to in Board::neighbors(from) {
                if BanqiRules::is_valid_move(board, from, to) {
                    moves.push((from, to));
                }
            }
        }
        moves
    }
}
