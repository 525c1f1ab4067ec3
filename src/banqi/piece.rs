use serde::{Deserialize, Serialize};

/// 棋子颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// 对方颜色
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// 数组下标（红 0、黑 1）
    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }
}

/// 棋子兵种
///
/// 大小序：将 > 士 > 象 > 車 > 馬 > 炮 > 兵。
/// 特例：兵可吃将，将不可吃兵。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Advisor,
    Elephant,
    Rook,
    Knight,
    Cannon,
    Pawn,
}

impl PieceKind {
    /// 大小权值（7 最高）
    pub fn rank(self) -> u8 {
        match self {
            PieceKind::King => 7,
            PieceKind::Advisor => 6,
            PieceKind::Elephant => 5,
            PieceKind::Rook => 4,
            PieceKind::Knight => 3,
            PieceKind::Cannon => 2,
            PieceKind::Pawn => 1,
        }
    }

    /// 单方编制数量
    pub fn copies(self) -> usize {
        match self {
            PieceKind::King => 1,
            PieceKind::Pawn => 5,
            _ => 2,
        }
    }
}

/// 每方 16 枚棋子的兵种清单
pub const SIDE_ROSTER: [PieceKind; 7] = [
    PieceKind::King,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Cannon,
    PieceKind::Pawn,
];

/// 暗棋棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// 全局唯一编号（0-31）
    pub id: u8,
    pub kind: PieceKind,
    pub color: Color,
    /// 是否已翻开
    pub flipped: bool,
}

impl Piece {
    pub fn new(id: u8, kind: PieceKind, color: Color) -> Self {
        Self {
            id,
            kind,
            color,
            flipped: false,
        }
    }

    /// 吃子判定（不含炮，炮走隔山规则）
    ///
    /// 大吃小或同级互吃；兵吃将、将不吃兵为特例。
    pub fn dominates(self, target: Piece) -> bool {
        match (self.kind, target.kind) {
            (PieceKind::Pawn, PieceKind::King) => true,
            (PieceKind::King, PieceKind::Pawn) => false,
            (a, b) => a.rank() >= b.rank(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(PieceKind::King.rank() > PieceKind::Advisor.rank());
        assert!(PieceKind::Advisor.rank() > PieceKind::Elephant.rank());
        assert!(PieceKind::Elephant.rank() > PieceKind::Rook.rank());
        assert!(PieceKind::Rook.rank() > PieceKind::Knight.rank());
        assert!(PieceKind::Knight.rank() > PieceKind::Cannon.rank());
        assert!(PieceKind::Cannon.rank() > PieceKind::Pawn.rank());
    }

    #[test]
    fn test_pawn_king_exception() {
        let pawn = Piece::new(0, PieceKind::Pawn, Color::Red);
        let king = Piece::new(1, PieceKind::King, Color::Black);
        assert!(pawn.dominates(king));
        assert!(!king.dominates(pawn));
    }

    #[test]
    fn test_equal_rank_captures() {
        let a = Piece::new(0, PieceKind::Rook, Color::Red);
        let b = Piece::new(1, PieceKind::Rook, Color::Black);
        assert!(a.dominates(b));
        assert!(b.dominates(a));
    }

    #[test]
    fn test_roster_totals_sixteen() {
        let total: usize = SIDE_ROSTER.iter().map(|k| k.copies()).sum();
        assert_eq!(total, 16);
    }
}
