use smallvec::SmallVec;

use super::hand::Hand;
use super::tile::Tile;

/// 牌组（顺子或刻子）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// 顺子（start, start+1, start+2；仅数字花色）
    Run { start: Tile },
    /// 刻子（三张相同牌）
    Triplet { tile: Tile },
}

/// 一种完整的拆解：一个对子 + 若干顺子/刻子
///
/// 十六张麻将门前 17 张时为 1 对 + 5 组；随副露张数减少。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    /// 对子（将眼）
    pub pair: Tile,
    /// 顺子/刻子列表
    pub groups: SmallVec<[Group; 5]>,
}

/// 判定手牌是否胡牌
///
/// # 算法
///
/// 牌数必须 ≡ 2 (mod 3)。枚举每一种出现 ≥2 张的牌作为对子，摘除后对
/// 剩余牌面做索引回溯：每次消耗字典序最靠前的剩余牌面，分支为刻子
/// （若 ≥3 张）或顺子起点（仅数字花色，要求后两张连续牌面都在）。
/// 任一分支成功即为胡牌。必须遍历所有对子选择——先选错将眼可能让
/// 实际完整的手牌被误判为未胡。
pub fn check_hu(hand: &Hand) -> bool {
    let total = hand.total_count();
    if total < 2 || total % 3 != 2 {
        return false;
    }

    let counts = hand.counts();
    for pair_idx in 0..Tile::FACE_COUNT {
        if counts[pair_idx] >= 2 {
            let mut rest = *counts;
            rest[pair_idx] -= 2;
            if can_partition(&mut rest, 0) {
                return true;
            }
        }
    }
    false
}

/// 索引回溯：剩余牌面能否全部拆成顺子/刻子
///
/// `idx` 之前的牌面保证已被清空，保证每种拆法只走一条路径。
fn can_partition(counts: &mut [u8; Tile::FACE_COUNT], idx: usize) -> bool {
    // 跳过空牌面
    let mut idx = idx;
    while idx < Tile::FACE_COUNT && counts[idx] == 0 {
        idx += 1;
    }
    if idx >= Tile::FACE_COUNT {
        return true;
    }

    // 分支一：当前牌面取刻子
    if counts[idx] >= 3 {
        counts[idx] -= 3;
        let ok = can_partition(counts, idx);
        counts[idx] += 3;
        if ok {
            return true;
        }
    }

    // 分支二：以当前牌面为顺子起点
    if run_fits(counts, idx) {
        counts[idx] -= 1;
        counts[idx + 1] -= 1;
        counts[idx + 2] -= 1;
        let ok = can_partition(counts, idx);
        counts[idx] += 1;
        counts[idx + 1] += 1;
        counts[idx + 2] += 1;
        if ok {
            return true;
        }
    }

    false
}

/// 当前索引能否作为顺子起点（同数字花色、点数 ≤7、后两张都在）
fn run_fits(counts: &[u8; Tile::FACE_COUNT], idx: usize) -> bool {
    let tile = match Tile::from_face_index(idx) {
        Some(t) => t,
        None => return false,
    };
    if !tile.is_numeric() || tile.rank() > 7 {
        return false;
    }
    counts[idx] >= 1 && counts[idx + 1] >= 1 && counts[idx + 2] >= 1
}

/// 枚举所有合法拆解
///
/// 与 `check_hu` 同一套回溯，但记录每条成功路径上选过的牌组。
/// 同一手牌可能有多种结构等价的拆法（例如 111222333 既是三刻也是
/// 三顺），算番必须在全部拆法上取最大值。
pub fn enumerate_decompositions(hand: &Hand) -> Vec<Decomposition> {
    let total = hand.total_count();
    let mut result = Vec::new();
    if total < 2 || total % 3 != 2 {
        return result;
    }

    let counts = hand.counts();
    for pair_idx in 0..Tile::FACE_COUNT {
        if counts[pair_idx] >= 2 {
            let pair = match Tile::from_face_index(pair_idx) {
                Some(t) => t,
                None => continue,
            };
            let mut rest = *counts;
            rest[pair_idx] -= 2;
            let mut groups = SmallVec::new();
            collect_partitions(&mut rest, 0, pair, &mut groups, &mut result);
        }
    }
    result
}

fn collect_partitions(
    counts: &mut [u8; Tile::FACE_COUNT],
    idx: usize,
    pair: Tile,
    groups: &mut SmallVec<[Group; 5]>,
    out: &mut Vec<Decomposition>,
) {
    let mut idx = idx;
    while idx < Tile::FACE_COUNT && counts[idx] == 0 {
        idx += 1;
    }
    if idx >= Tile::FACE_COUNT {
        out.push(Decomposition {
            pair,
            groups: groups.clone(),
        });
        return;
    }

    let tile = match Tile::from_face_index(idx) {
        Some(t) => t,
        None => return,
    };

    if counts[idx] >= 3 {
        counts[idx] -= 3;
        groups.push(Group::Triplet { tile });
        collect_partitions(counts, idx, pair, groups, out);
        groups.pop();
        counts[idx] += 3;
    }

    if run_fits(counts, idx) {
        counts[idx] -= 1;
        counts[idx + 1] -= 1;
        counts[idx + 2] -= 1;
        groups.push(Group::Run { start: tile });
        collect_partitions(counts, idx, pair, groups, out);
        groups.pop();
        counts[idx] += 1;
        counts[idx + 1] += 1;
        counts[idx + 2] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourteen_tile_complete_hand() {
        // 刻 + 顺 + 顺 + 刻 + 对
        let hand = Hand::from_tiles(&[
            Tile::Wan(1), Tile::Wan(1), Tile::Wan(1),
            Tile::Wan(2), Tile::Wan(3), Tile::Wan(4),
            Tile::Tong(5), Tile::Tong(6), Tile::Tong(7),
            Tile::Wind(1), Tile::Wind(1), Tile::Wind(1),
            Tile::Tiao(9), Tile::Tiao(9),
        ]);
        assert!(check_hu(&hand));
    }

    #[test]
    fn test_one_tile_short_is_not_hu() {
        // 上一用例去掉一张 9条，只剩单钓
        let hand = Hand::from_tiles(&[
            Tile::Wan(1), Tile::Wan(1), Tile::Wan(1),
            Tile::Wan(2), Tile::Wan(3), Tile::Wan(4),
            Tile::Tong(5), Tile::Tong(6), Tile::Tong(7),
            Tile::Wind(1), Tile::Wind(1), Tile::Wind(1),
            Tile::Tiao(9),
        ]);
        assert!(!check_hu(&hand));
    }

    #[test]
    fn test_pair_choice_requires_backtracking() {
        // 11122 万：将眼只能是 22（111 成刻）。按索引顺序先试 11 当
        // 将眼会失败，必须回溯换对子。
        let hand = Hand::from_tiles(&[
            Tile::Wan(1), Tile::Wan(1), Tile::Wan(1),
            Tile::Wan(2), Tile::Wan(2),
        ]);
        assert!(check_hu(&hand));
    }

    #[test]
    fn test_honors_never_form_runs() {
        // 东南西连续三张不是顺子
        let hand = Hand::from_tiles(&[
            Tile::Wind(1), Tile::Wind(2), Tile::Wind(3),
            Tile::Wan(1), Tile::Wan(1),
        ]);
        assert!(!check_hu(&hand));

        // 字牌刻子合法
        let hand = Hand::from_tiles(&[
            Tile::Wind(1), Tile::Wind(1), Tile::Wind(1),
            Tile::Wan(1), Tile::Wan(1),
        ]);
        assert!(check_hu(&hand));
    }

    #[test]
    fn test_wrong_count_rejected() {
        let hand = Hand::from_tiles(&[Tile::Wan(1), Tile::Wan(1), Tile::Wan(1)]);
        assert!(!check_hu(&hand));
        assert!(!check_hu(&Hand::new()));
    }

    #[test]
    fn test_seventeen_tile_full_hand() {
        // 门前 17 张：5 组 + 1 对
        let hand = Hand::from_tiles(&[
            Tile::Wan(1), Tile::Wan(2), Tile::Wan(3),
            Tile::Wan(4), Tile::Wan(5), Tile::Wan(6),
            Tile::Tong(2), Tile::Tong(3), Tile::Tong(4),
            Tile::Tiao(7), Tile::Tiao(8), Tile::Tiao(9),
            Tile::Dragon(1), Tile::Dragon(1), Tile::Dragon(1),
            Tile::Wind(4), Tile::Wind(4),
        ]);
        assert!(check_hu(&hand));
    }

    #[test]
    fn test_enumerate_finds_both_interpretations() {
        // 111222333 万 + 99条对 + 789筒：
        // 可拆三刻（111/222/333）或三顺（123×3）
        let hand = Hand::from_tiles(&[
            Tile::Wan(1), Tile::Wan(1), Tile::Wan(1),
            Tile::Wan(2), Tile::Wan(2), Tile::Wan(2),
            Tile::Wan(3), Tile::Wan(3), Tile::Wan(3),
            Tile::Tong(7), Tile::Tong(8), Tile::Tong(9),
            Tile::Tiao(9), Tile::Tiao(9),
        ]);
        let decomps = enumerate_decompositions(&hand);
        assert!(decomps.len() >= 2);

        let has_all_triplet_version = decomps.iter().any(|d| {
            d.groups
                .iter()
                .filter(|g| matches!(g, Group::Triplet { .. }))
                .count()
                == 3
        });
        let has_all_run_version = decomps.iter().any(|d| {
            d.groups
                .iter()
                .filter(|g| matches!(g, Group::Run { .. }))
                .count()
                == 4
        });
        assert!(has_all_triplet_version);
        assert!(has_all_run_version);
    }

    #[test]
    fn test_decomposition_groups_cover_hand() {
        let hand = Hand::from_tiles(&[
            Tile::Wan(1), Tile::Wan(1), Tile::Wan(1),
            Tile::Wan(2), Tile::Wan(3), Tile::Wan(4),
            Tile::Tiao(9), Tile::Tiao(9),
        ]);
        let decomps = enumerate_decompositions(&hand);
        assert!(!decomps.is_empty());
        for d in &decomps {
            // 对子 2 张 + 每组 3 张 = 手牌总数
            assert_eq!(2 + d.groups.len() * 3, hand.total_count());
        }
    }
}
