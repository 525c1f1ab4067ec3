/// 麻将牌
///
/// 台湾十六张麻将使用 136 张牌：
/// 万、筒、条各 36 张（1-9 各 4 张），风牌 16 张（东南西北各 4 张），
/// 箭牌 12 张（中发白各 4 张）。共 34 种牌面，每种 4 张。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// 万子（1-9）
    Wan(u8),
    /// 筒子（1-9）
    Tong(u8),
    /// 条子（1-9）
    Tiao(u8),
    /// 风牌（1=东 2=南 3=西 4=北）
    Wind(u8),
    /// 箭牌（1=中 2=发 3=白）
    Dragon(u8),
}

/// 花色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Wan = 0,
    Tong = 1,
    Tiao = 2,
    Wind = 3,
    Dragon = 4,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 5] {
        [Suit::Wan, Suit::Tong, Suit::Tiao, Suit::Wind, Suit::Dragon]
    }

    /// 是否为数字花色（可组顺子）
    pub fn is_numeric(&self) -> bool {
        matches!(self, Suit::Wan | Suit::Tong | Suit::Tiao)
    }

    /// 该花色的最大点数
    pub fn max_rank(&self) -> u8 {
        match self {
            Suit::Wan | Suit::Tong | Suit::Tiao => 9,
            Suit::Wind => 4,
            Suit::Dragon => 3,
        }
    }
}

impl Tile {
    /// 总牌数：136 张
    pub const TOTAL_COUNT: usize = 136;

    /// 牌面种类数：34 种
    pub const FACE_COUNT: usize = 34;

    /// 创建一张牌，校验点数范围
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if rank < 1 || rank > suit.max_rank() {
            return None;
        }
        Some(match suit {
            Suit::Wan => Tile::Wan(rank),
            Suit::Tong => Tile::Tong(rank),
            Suit::Tiao => Tile::Tiao(rank),
            Suit::Wind => Tile::Wind(rank),
            Suit::Dragon => Tile::Dragon(rank),
        })
    }

    /// 获取花色
    pub fn suit(&self) -> Suit {
        match self {
            Tile::Wan(_) => Suit::Wan,
            Tile::Tong(_) => Suit::Tong,
            Tile::Tiao(_) => Suit::Tiao,
            Tile::Wind(_) => Suit::Wind,
            Tile::Dragon(_) => Suit::Dragon,
        }
    }

    /// 获取点数
    pub fn rank(&self) -> u8 {
        match self {
            Tile::Wan(r) | Tile::Tong(r) | Tile::Tiao(r) | Tile::Wind(r) | Tile::Dragon(r) => *r,
        }
    }

    /// 是否为数字牌（可组顺子）
    pub fn is_numeric(&self) -> bool {
        self.suit().is_numeric()
    }

    /// 是否为字牌（风牌或箭牌）
    pub fn is_honor(&self) -> bool {
        !self.is_numeric()
    }

    /// 转换为牌面索引（0-33）
    ///
    /// 万 0-8，筒 9-17，条 18-26，风 27-30，箭 31-33
    pub fn face_index(&self) -> usize {
        match self {
            Tile::Wan(r) => (*r - 1) as usize,
            Tile::Tong(r) => 9 + (*r - 1) as usize,
            Tile::Tiao(r) => 18 + (*r - 1) as usize,
            Tile::Wind(r) => 27 + (*r - 1) as usize,
            Tile::Dragon(r) => 31 + (*r - 1) as usize,
        }
    }

    /// 从牌面索引创建牌（0-33）
    pub fn from_face_index(index: usize) -> Option<Self> {
        match index {
            0..=8 => Some(Tile::Wan(index as u8 + 1)),
            9..=17 => Some(Tile::Tong((index - 9) as u8 + 1)),
            18..=26 => Some(Tile::Tiao((index - 18) as u8 + 1)),
            27..=30 => Some(Tile::Wind((index - 27) as u8 + 1)),
            31..=33 => Some(Tile::Dragon((index - 31) as u8 + 1)),
            _ => None,
        }
    }

    /// 所有 34 种牌面
    pub fn all_faces() -> impl Iterator<Item = Tile> {
        (0..Self::FACE_COUNT).filter_map(Tile::from_face_index)
    }

    /// 同花色的后续第 n 张牌（仅数字花色，越界返回 None）
    pub fn successor(&self, n: u8) -> Option<Tile> {
        if !self.is_numeric() {
            return None;
        }
        Tile::new(self.suit(), self.rank().checked_add(n)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_creation() {
        let tile = Tile::new(Suit::Wan, 1).unwrap();
        assert_eq!(tile.suit(), Suit::Wan);
        assert_eq!(tile.rank(), 1);

        // 风牌只有 1-4
        assert!(Tile::new(Suit::Wind, 4).is_some());
        assert!(Tile::new(Suit::Wind, 5).is_none());

        // 箭牌只有 1-3
        assert!(Tile::new(Suit::Dragon, 3).is_some());
        assert!(Tile::new(Suit::Dragon, 4).is_none());

        // 无效点数
        assert!(Tile::new(Suit::Wan, 0).is_none());
        assert!(Tile::new(Suit::Wan, 10).is_none());
    }

    #[test]
    fn test_face_index_roundtrip() {
        let mut seen = [false; Tile::FACE_COUNT];
        for tile in Tile::all_faces() {
            let idx = tile.face_index();
            assert!(!seen[idx]);
            seen[idx] = true;
            assert_eq!(Tile::from_face_index(idx), Some(tile));
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_numeric_and_honor() {
        assert!(Tile::Wan(5).is_numeric());
        assert!(Tile::Tiao(9).is_numeric());
        assert!(!Tile::Wind(1).is_numeric());
        assert!(Tile::Dragon(2).is_honor());
    }

    #[test]
    fn test_successor() {
        assert_eq!(Tile::Wan(3).successor(1), Some(Tile::Wan(4)));
        assert_eq!(Tile::Wan(8).successor(2), None);
        // 字牌没有后续
        assert_eq!(Tile::Wind(1).successor(1), None);
    }
}
