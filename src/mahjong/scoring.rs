use smallvec::SmallVec;

use super::hand::Hand;
use super::meld::Meld;
use super::tile::{Suit, Tile};
use super::win_check::{enumerate_decompositions, Decomposition, Group};

/// 胡牌环境（算台所需的局面信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinContext {
    /// 胡牌者座位
    pub winner: u8,
    /// 点炮者座位（None 表示自摸）
    pub discarder: Option<u8>,
    /// 是否摸的是普通墙最后一张（海底捞月）
    pub is_last_wall_tile: bool,
    /// 是否杠后补牌胡（杠上开花）
    pub is_kong_replacement: bool,
    /// 庄家座位
    pub dealer: u8,
    /// 连庄次数（0 表示首庄）
    pub dealer_streak: u32,
    /// 圈风（1=东 2=南 3=西 4=北）
    pub prevailing_wind: u8,
    /// 胡牌者门风（1-4）
    pub seat_wind: u8,
}

/// 单项台数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanEntry {
    /// 牌型名
    pub name: &'static str,
    /// 台数
    pub fan: u32,
}

/// 算台结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    /// 总台数（至少 1 台屁胡）
    pub total_fan: u32,
    /// 命中的牌型（取最优拆解下的清单）
    pub entries: Vec<FanEntry>,
    /// 各座位分数变动（自摸三家皆付，点炮只付点炮者）
    pub transfers: [i32; 4],
}

/// 台数计算器
///
/// 对门前部分枚举全部合法拆解，逐一评估固定牌型表并求和，
/// 取所有拆解中的最大总台——同一手牌可能有多种结构等价的
/// 拆法，必须按对自己最有利的解释算台。
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// 计算胡牌台数与分数转移
    ///
    /// # 参数
    ///
    /// - `concealed`: 门前手牌（已含胡的那张）
    /// - `winning_tile`: 胡的牌
    /// - `melds`: 副露
    /// - `is_concealed_hand`: 是否门清
    /// - `ctx`: 局面信息
    pub fn calculate(
        concealed: &Hand,
        winning_tile: Tile,
        melds: &[Meld],
        is_concealed_hand: bool,
        ctx: &WinContext,
    ) -> ScoreResult {
        let decomps = enumerate_decompositions(concealed);

        let mut best_fan = 0u32;
        let mut best_entries = Vec::new();
        for decomp in &decomps {
            let entries =
                Self::evaluate(decomp, winning_tile, melds, is_concealed_hand, ctx);
            let total: u32 = entries.iter().map(|e| e.fan).sum();
            if total > best_fan {
                best_fan = total;
                best_entries = entries;
            }
        }

        // 无牌型时按一台屁胡计
        if best_entries.is_empty() {
            best_entries.push(FanEntry { name: "屁胡", fan: 1 });
            best_fan = 1;
        }

        let transfers = Self::transfers(best_fan, ctx);
        ScoreResult {
            total_fan: best_fan,
            entries: best_entries,
            transfers,
        }
    }

    /// 评估单个拆解命中的全部牌型
    fn evaluate(
        decomp: &Decomposition,
        winning_tile: Tile,
        melds: &[Meld],
        is_concealed_hand: bool,
        ctx: &WinContext,
    ) -> Vec<FanEntry> {
        let mut entries = Vec::new();

        // 全手牌的刻子清单（门前拆解 + 副露的碰/杠）
        let mut triplet_tiles: SmallVec<[Tile; 8]> = SmallVec::new();
        for group in &decomp.groups {
            if let Group::Triplet { tile } = group {
                triplet_tiles.push(*tile);
            }
        }
        for meld in melds {
            match meld {
                Meld::Pong { tile, .. } | Meld::Kong { tile, .. } => triplet_tiles.push(*tile),
                Meld::Chi { .. } => {}
            }
        }
        let all_groups_are_runs = decomp
            .groups
            .iter()
            .all(|g| matches!(g, Group::Run { .. }))
            && melds.iter().all(|m| matches!(m, Meld::Chi { .. }));
        let all_groups_are_triplets = decomp
            .groups
            .iter()
            .all(|g| matches!(g, Group::Triplet { .. }))
            && melds.iter().all(|m| !matches!(m, Meld::Chi { .. }));

        // 自摸 / 门清
        if ctx.discarder.is_none() {
            entries.push(FanEntry { name: "自摸", fan: 1 });
        }
        if is_concealed_hand {
            entries.push(FanEntry { name: "门清", fan: 1 });
        }

        // 箭刻与三元
        let dragon_triplets = triplet_tiles
            .iter()
            .filter(|t| t.suit() == Suit::Dragon)
            .count();
        let has_dragon_pair = decomp.pair.suit() == Suit::Dragon;
        if dragon_triplets == 3 {
            // 大三元吞并三个单独的箭刻台
            entries.push(FanEntry { name: "大三元", fan: 8 });
        } else if dragon_triplets == 2 && has_dragon_pair {
            // 小三元吞并两个箭刻台
            entries.push(FanEntry { name: "小三元", fan: 4 });
        } else {
            for _ in 0..dragon_triplets {
                entries.push(FanEntry { name: "箭刻", fan: 1 });
            }
        }

        // 风刻与四喜
        let wind_triplets = triplet_tiles
            .iter()
            .filter(|t| t.suit() == Suit::Wind)
            .count();
        let has_wind_pair = decomp.pair.suit() == Suit::Wind;
        if wind_triplets == 4 {
            entries.push(FanEntry { name: "大四喜", fan: 16 });
        } else if wind_triplets == 3 && has_wind_pair {
            entries.push(FanEntry { name: "小四喜", fan: 8 });
        } else {
            if triplet_tiles.contains(&Tile::Wind(ctx.prevailing_wind)) {
                entries.push(FanEntry { name: "圈风刻", fan: 1 });
            }
            if triplet_tiles.contains(&Tile::Wind(ctx.seat_wind)) {
                entries.push(FanEntry { name: "门风刻", fan: 1 });
            }
        }

        // 平胡（全顺子、将眼非字牌）
        if all_groups_are_runs && !decomp.pair.is_honor() {
            entries.push(FanEntry { name: "平胡", fan: 2 });
        }

        // 碰碰胡
        if all_groups_are_triplets {
            entries.push(FanEntry { name: "碰碰胡", fan: 4 });
        }

        // 暗刻（门前拆出的刻子 + 暗杠；点炮补成的刻子不算暗）
        let mut concealed_triplets = decomp
            .groups
            .iter()
            .filter(|g| matches!(g, Group::Triplet { .. }))
            .count();
        if ctx.discarder.is_some() {
            let winning_completes_triplet = decomp
                .groups
                .iter()
                .any(|g| matches!(g, Group::Triplet { tile } if *tile == winning_tile));
            if winning_completes_triplet {
                concealed_triplets = concealed_triplets.saturating_sub(1);
            }
        }
        concealed_triplets += melds
            .iter()
            .filter(|m| matches!(m, Meld::Kong { is_concealed: true, .. }))
            .count();
        if concealed_triplets >= 4 {
            // 四暗刻吞并三暗刻
            entries.push(FanEntry { name: "四暗刻", fan: 5 });
        } else if concealed_triplets == 3 {
            entries.push(FanEntry { name: "三暗刻", fan: 2 });
        }

        // 花色纯度：字一色 / 清一色 / 混一色
        match Self::suit_purity(decomp, melds) {
            SuitPurity::AllHonors => entries.push(FanEntry { name: "字一色", fan: 8 }),
            SuitPurity::Pure => entries.push(FanEntry { name: "清一色", fan: 8 }),
            SuitPurity::Half => entries.push(FanEntry { name: "混一色", fan: 4 }),
            SuitPurity::Mixed => {}
        }

        // 海底捞月 / 杠上开花
        if ctx.is_last_wall_tile {
            entries.push(FanEntry { name: "海底捞月", fan: 1 });
        }
        if ctx.is_kong_replacement {
            entries.push(FanEntry { name: "杠上开花", fan: 1 });
        }

        // 庄家与连庄
        if ctx.winner == ctx.dealer || ctx.discarder == Some(ctx.dealer) {
            entries.push(FanEntry { name: "庄家", fan: 1 + 2 * ctx.dealer_streak });
        }

        // 全求人：五组副露全靠认领，门前仅剩单骑，点炮胡
        if melds.len() == 5
            && melds.iter().all(|m| m.is_exposed())
            && ctx.discarder.is_some()
        {
            entries.push(FanEntry { name: "全求人", fan: 2 });
        }

        entries
    }

    /// 花色纯度判定（将眼、拆解组、副露全部计入）
    fn suit_purity(decomp: &Decomposition, melds: &[Meld]) -> SuitPurity {
        let mut numeric_suit: Option<Suit> = None;
        let mut mixed_numeric = false;
        let mut has_honor = false;
        let mut has_numeric = false;

        let mut visit = |tile: Tile| {
            if tile.is_honor() {
                has_honor = true;
            } else {
                has_numeric = true;
                match numeric_suit {
                    None => numeric_suit = Some(tile.suit()),
                    Some(s) if s != tile.suit() => mixed_numeric = true,
                    _ => {}
                }
            }
        };

        visit(decomp.pair);
        for group in &decomp.groups {
            match group {
                Group::Run { start } => visit(*start),
                Group::Triplet { tile } => visit(*tile),
            }
        }
        for meld in melds {
            visit(meld.tile());
        }

        if mixed_numeric {
            SuitPurity::Mixed
        } else if !has_numeric {
            SuitPurity::AllHonors
        } else if has_honor {
            SuitPurity::Half
        } else {
            SuitPurity::Pure
        }
    }

    /// 分数转移：自摸三家各付总台，点炮只由点炮者付
    fn transfers(total_fan: u32, ctx: &WinContext) -> [i32; 4] {
        let mut transfers = [0i32; 4];
        let fan = total_fan as i32;
        match ctx.discarder {
            None => {
                for seat in 0..4u8 {
                    if seat == ctx.winner {
                        transfers[seat as usize] += 3 * fan;
                    } else {
                        transfers[seat as usize] -= fan;
                    }
                }
            }
            Some(discarder) => {
                transfers[ctx.winner as usize] += fan;
                transfers[discarder as usize] -= fan;
            }
        }
        transfers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuitPurity {
    /// 不同数字花色混杂，无纯度台
    Mixed,
    /// 一门数字花色 + 字牌
    Half,
    /// 仅一门数字花色
    Pure,
    /// 全字牌
    AllHonors,
}
