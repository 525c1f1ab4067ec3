use super::board::{Board, BOARD_WIDTH, CELL_COUNT};
use super::piece::{Color, PieceKind};

/// 暗棋行棋与胜负判定
pub struct BanqiRules;

impl BanqiRules {
    /// 走子合法性：目标格与起点正交相邻（曼哈顿距离 1，不跨行回绕）且为空
    pub fn is_valid_move(board: &Board, from: usize, to: usize) -> bool {
        if from >= CELL_COUNT || to >= CELL_COUNT {
            return false;
        }
        if board.get(to).is_some() {
            return false;
        }
        Board::neighbors(from).any(|n| n == to)
    }

    /// 吃子合法性
    ///
    /// 双方须均已翻开且异色。炮隔山吃：同行或同列、中间恰有一个
    /// 占用格（任意棋子，翻开与否不限），多一少一皆不成立。
    /// 其余兵种须相邻且大小占优（兵吃将、将不吃兵为特例）。
    pub fn can_capture(board: &Board, attacker_at: usize, target_at: usize) -> bool {
        let attacker = match board.get(attacker_at) {
            Some(p) if p.flipped => p,
            _ => return false,
        };
        let target = match board.get(target_at) {
            Some(p) if p.flipped => p,
            _ => return false,
        };
        if attacker.color == target.color {
            return false;
        }

        if attacker.kind == PieceKind::Cannon {
            return Self::screens_between(board, attacker_at, target_at) == Some(1);
        }

        Board::neighbors(attacker_at).any(|n| n == target_at) && attacker.dominates(target)
    }

    /// 同行或同列时返回两格之间严格区间内的占用格数，否则 `None`
    fn screens_between(board: &Board, a: usize, b: usize) -> Option<usize> {
        let (ra, ca) = (Board::row(a), Board::col(a));
        let (rb, cb) = (Board::row(b), Board::col(b));
        let indices: Vec<usize> = if ra == rb {
            let (lo, hi) = (ca.min(cb), ca.max(cb));
            (lo + 1..hi).map(|c| ra * BOARD_WIDTH + c).collect()
        } else if ca == cb {
            let (lo, hi) = (ra.min(rb), ra.max(rb));
            (lo + 1..hi).map(|r| r * BOARD_WIDTH + ca).collect()
        } else {
            return None;
        };
        Some(indices.into_iter().filter(|&i| board.get(i).is_some()).count())
    }

    /// 胜负判定：某色在场棋子数为零即告负，对方获胜；否则未分胜负
    pub fn check_winner(board: &Board) -> Option<Color> {
        let red = board.count_color(Color::Red);
        let black = board.count_color(Color::Black);
        if red == 0 {
            Some(Color::Black)
        } else if black == 0 {
            Some(Color::Red)
        } else {
            None
        }
    }
}
