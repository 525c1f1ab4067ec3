use smallvec::SmallVec;

use super::tile::Tile;

/// 34 格计数数组的序列化：按序列写出，读回时校验长度
///
/// serde 的数组实现只覆盖 0-32 长度，34 格须手动走 seq。
mod counts_serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Tile;

    pub fn serialize<S>(counts: &[u8; Tile::FACE_COUNT], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(counts.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; Tile::FACE_COUNT], D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<u8>::deserialize(deserializer)?;
        if values.len() != Tile::FACE_COUNT {
            return Err(D::Error::invalid_length(values.len(), &"34 个牌面计数"));
        }
        let mut counts = [0u8; Tile::FACE_COUNT];
        counts.copy_from_slice(&values);
        Ok(counts)
    }
}

/// 手牌
///
/// 以 34 格计数数组存储每种牌面的张数，添加、移除、查询均为 O(1)。
/// 固定数组同时给胡牌回溯提供了按索引遍历的不变底座。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hand {
    /// 每种牌面的张数（0-4）
    #[serde(with = "counts_serde")]
    counts: [u8; Tile::FACE_COUNT],
    /// 总张数
    total: usize,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self {
            counts: [0; Tile::FACE_COUNT],
            total: 0,
        }
    }

    /// 从牌列表创建手牌
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut hand = Self::new();
        for &tile in tiles {
            hand.add_tile(tile);
        }
        hand
    }

    /// 添加一张牌
    ///
    /// # 返回
    ///
    /// - `true`：成功添加
    /// - `false`：该牌面已有 4 张
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        let idx = tile.face_index();
        if self.counts[idx] >= 4 {
            return false;
        }
        self.counts[idx] += 1;
        self.total += 1;
        true
    }

    /// 移除一张牌
    ///
    /// # 返回
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        let idx = tile.face_index();
        if self.counts[idx] == 0 {
            return false;
        }
        self.counts[idx] -= 1;
        self.total -= 1;
        true
    }

    /// 查询某张牌的张数
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.counts[tile.face_index()]
    }

    /// 是否持有某张牌
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 总张数
    pub fn total_count(&self) -> usize {
        self.total
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// 清空手牌
    pub fn clear(&mut self) {
        self.counts = [0; Tile::FACE_COUNT];
        self.total = 0;
    }

    /// 牌面计数数组（胡牌回溯直接在其副本上操作）
    pub fn counts(&self) -> &[u8; Tile::FACE_COUNT] {
        &self.counts
    }

    /// 所有持有的牌面（按万、筒、条、风、箭排序）
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 16]> {
        let mut result = SmallVec::new();
        for (idx, &count) in self.counts.iter().enumerate() {
            if count > 0 {
                if let Some(tile) = Tile::from_face_index(idx) {
                    result.push(tile);
                }
            }
        }
        result
    }

    /// 展开为排序后的牌列表（用于显示与结算）
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total);
        for (idx, &count) in self.counts.iter().enumerate() {
            if let Some(tile) = Tile::from_face_index(idx) {
                for _ in 0..count {
                    result.push(tile);
                }
            }
        }
        result
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
