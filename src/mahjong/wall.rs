use rand::seq::SliceRandom;
use rand::Rng;

use super::tile::Tile;
use crate::error::EngineError;

/// 牌墙
///
/// 存储全部 136 张牌。普通摸牌从墙头取，杠后补牌从墙尾（死墙端）取。
/// 台湾规则保留最后 16 张作为死墙：普通摸牌一旦触及保留区即流局。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Wall {
    /// 牌序（洗牌后固定）
    tiles: Vec<Tile>,
    /// 墙头索引（下一张普通摸牌）
    head: usize,
    /// 墙尾索引（下一张补牌位置 + 1）
    tail: usize,
}

impl Wall {
    /// 死墙保留张数
    pub const DEAD_WALL_RESERVE: usize = 16;

    /// 生成一副完整的牌墙（136 张，未洗牌）
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(Tile::TOTAL_COUNT);
        for face in Tile::all_faces() {
            for _ in 0..4 {
                tiles.push(face);
            }
        }
        let tail = tiles.len();
        Self { tiles, head: 0, tail }
    }

    /// 洗牌（Fisher-Yates）
    pub fn shuffle(&mut self) {
        let mut rng = rand::thread_rng();
        self.shuffle_with(&mut rng);
    }

    /// 洗牌（注入随机源，供测试复现）
    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
        self.head = 0;
        self.tail = self.tiles.len();
    }

    /// 普通摸牌（从墙头）
    ///
    /// # 返回
    ///
    /// - `Ok(Tile)`：成功摸牌
    /// - `Err(WallExhausted)`：该摸牌会触及死墙保留区，回合流局
    pub fn draw(&mut self) -> Result<Tile, EngineError> {
        if self.live_count() == 0 {
            return Err(EngineError::WallExhausted);
        }
        let tile = self.tiles[self.head];
        self.head += 1;
        Ok(tile)
    }

    /// 杠后补牌（从墙尾，即死墙端）
    pub fn draw_replacement(&mut self) -> Result<Tile, EngineError> {
        if self.head >= self.tail {
            return Err(EngineError::WallExhausted);
        }
        self.tail -= 1;
        Ok(self.tiles[self.tail])
    }

    /// 剩余总牌数（含死墙）
    pub fn remaining_count(&self) -> usize {
        self.tail.saturating_sub(self.head)
    }

    /// 可供普通摸牌的张数（扣除死墙保留）
    pub fn live_count(&self) -> usize {
        self.remaining_count().saturating_sub(Self::DEAD_WALL_RESERVE)
    }

    /// 普通摸牌是否已耗尽
    pub fn is_exhausted(&self) -> bool {
        self.live_count() == 0
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_creation() {
        let wall = Wall::new();
        assert_eq!(wall.remaining_count(), Tile::TOTAL_COUNT);
        assert_eq!(wall.live_count(), Tile::TOTAL_COUNT - Wall::DEAD_WALL_RESERVE);
    }

    #[test]
    fn test_wall_tile_distribution() {
        let wall = Wall::new();
        let mut counts = [0u8; Tile::FACE_COUNT];
        for tile in &wall.tiles {
            counts[tile.face_index()] += 1;
        }
        // 每种牌面 4 张
        assert!(counts.iter().all(|&c| c == 4));
    }

    #[test]
    fn test_draw_stops_at_dead_wall() {
        let mut wall = Wall::new();
        let mut drawn = 0;
        while let Ok(_) = wall.draw() {
            drawn += 1;
        }
        // 普通摸牌最多 136 - 16 张
        assert_eq!(drawn, Tile::TOTAL_COUNT - Wall::DEAD_WALL_RESERVE);
        assert!(wall.is_exhausted());
        assert_eq!(wall.draw(), Err(EngineError::WallExhausted));
        // 死墙仍保留 16 张可供补牌
        assert_eq!(wall.remaining_count(), Wall::DEAD_WALL_RESERVE);
    }

    #[test]
    fn test_replacement_draws_from_tail() {
        let mut wall = Wall::new();
        let last = *wall.tiles.last().unwrap();
        let tile = wall.draw_replacement().unwrap();
        assert_eq!(tile, last);
        assert_eq!(wall.remaining_count(), Tile::TOTAL_COUNT - 1);
    }

    #[test]
    fn test_head_and_tail_never_overlap() {
        let mut wall = Wall::new();
        // 交替普通摸牌与补牌直到两端都摸不动
        loop {
            let normal = wall.draw();
            let replacement = wall.draw_replacement();
            if normal.is_err() && replacement.is_err() {
                break;
            }
        }
        assert_eq!(wall.remaining_count(), 0);
    }

    #[test]
    fn test_shuffle_with_seed_is_deterministic() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut wall1 = Wall::new();
        let mut wall2 = Wall::new();
        wall1.shuffle_with(&mut StdRng::seed_from_u64(7));
        wall2.shuffle_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(wall1.tiles, wall2.tiles);
    }
}
