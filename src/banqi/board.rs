use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece, SIDE_ROSTER};

/// 棋盘宽度（列数）
pub const BOARD_WIDTH: usize = 8;
/// 棋盘高度（行数）
pub const BOARD_HEIGHT: usize = 4;
/// 格子总数
pub const CELL_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 暗棋棋盘
///
/// 固定 32 格的一维数组，下标 = 行 × 8 + 列。
/// 空格为 `None`，被吃的棋子直接移出数组。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Piece>; CELL_COUNT],
}

impl Board {
    /// 生成开局棋盘：32 枚棋子洗乱后全部背面朝上铺满
    pub fn new_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut pieces = Vec::with_capacity(CELL_COUNT);
        let mut id = 0u8;
        for color in [Color::Red, Color::Black] {
            for kind in SIDE_ROSTER {
                for _ in 0..kind.copies() {
                    pieces.push(Piece::new(id, kind, color));
                    id += 1;
                }
            }
        }
        pieces.shuffle(rng);

        let mut cells = [None; CELL_COUNT];
        for (index, piece) in pieces.into_iter().enumerate() {
            cells[index] = Some(piece);
        }
        Self { cells }
    }

    pub fn get(&self, index: usize) -> Option<Piece> {
        self.cells.get(index).copied().flatten()
    }

    pub fn set(&mut self, index: usize, piece: Option<Piece>) {
        if index < CELL_COUNT {
            self.cells[index] = piece;
        }
    }

    /// 翻开指定格的棋子，返回翻出的棋子
    pub fn flip(&mut self, index: usize) -> Option<Piece> {
        match self.cells.get_mut(index) {
            Some(Some(piece)) if !piece.flipped => {
                piece.flipped = true;
                Some(*piece)
            }
            _ => None,
        }
    }

    /// 将 `from` 的棋子移到 `to`（吃子时覆盖目标格）
    pub fn relocate(&mut self, from: usize, to: usize) {
        if from < CELL_COUNT && to < CELL_COUNT {
            self.cells[to] = self.cells[from].take();
        }
    }

    /// 指定颜色的在场棋子数（含未翻开）
    pub fn count_color(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.color == color)
            .count()
    }

    /// 指定颜色已翻开的棋子数
    pub fn count_face_up(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.color == color && p.flipped)
            .count()
    }

    /// 尚未翻开的格子下标
    pub fn face_down_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(p) if !p.flipped => Some(i),
                _ => None,
            })
            .collect()
    }

    /// 行号
    pub fn row(index: usize) -> usize {
        index / BOARD_WIDTH
    }

    /// 列号
    pub fn col(index: usize) -> usize {
        index % BOARD_WIDTH
    }

    /// `from` 的正交相邻格（同一行不跨行回绕）
    pub fn neighbors(from: usize) -> impl Iterator<Item = usize> {
        let row = Self::row(from) as isize;
        let col = Self::col(from) as isize;
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(move |(dr, dc)| {
                let r = row + dr;
                let c = col + dc;
                if r >= 0 && r < BOARD_HEIGHT as isize && c >= 0 && c < BOARD_WIDTH as isize {
                    Some(r as usize * BOARD_WIDTH + c as usize)
                } else {
                    None
                }
            })
    }
}
