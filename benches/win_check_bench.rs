use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qipai_engine::mahjong::{check_hu, Hand, Tile};

fn bench_check_hu_winning_hand(c: &mut Criterion) {
    // 标准 17 张胡牌手
    let hand = Hand::from_tiles(&[
        Tile::Wan(1), Tile::Wan(1), Tile::Wan(1),
        Tile::Wan(2), Tile::Wan(3), Tile::Wan(4),
        Tile::Tong(5), Tile::Tong(6), Tile::Tong(7),
        Tile::Tiao(2), Tile::Tiao(3), Tile::Tiao(4),
        Tile::Tiao(7), Tile::Tiao(8), Tile::Tiao(9),
        Tile::Dragon(1), Tile::Dragon(1),
    ]);

    c.bench_function("check_hu_winning_hand", |b| {
        b.iter(|| {
            black_box(check_hu(black_box(&hand)));
        });
    });
}

fn bench_check_hu_near_miss(c: &mut Criterion) {
    // 差一张的非胡手：回溯须穷尽全部对子选择后才失败
    let hand = Hand::from_tiles(&[
        Tile::Wan(1), Tile::Wan(1), Tile::Wan(2),
        Tile::Wan(2), Tile::Wan(3), Tile::Wan(3),
        Tile::Wan(5), Tile::Wan(5), Tile::Wan(6),
        Tile::Wan(6), Tile::Wan(7), Tile::Wan(7),
        Tile::Tong(1), Tile::Tong(1), Tile::Tong(2),
        Tile::Tong(3), Tile::Tong(9),
    ]);

    c.bench_function("check_hu_near_miss", |b| {
        b.iter(|| {
            black_box(check_hu(black_box(&hand)));
        });
    });
}

fn bench_check_hu_pure_suit(c: &mut Criterion) {
    // 清一色手对子候选最多，是回溯的最坏情况
    let hand = Hand::from_tiles(&[
        Tile::Tiao(1), Tile::Tiao(1), Tile::Tiao(1),
        Tile::Tiao(2), Tile::Tiao(3), Tile::Tiao(4),
        Tile::Tiao(5), Tile::Tiao(6), Tile::Tiao(7),
        Tile::Tiao(7), Tile::Tiao(8), Tile::Tiao(9),
        Tile::Tiao(9), Tile::Tiao(9),
    ]);

    c.bench_function("check_hu_pure_suit", |b| {
        b.iter(|| {
            black_box(check_hu(black_box(&hand)));
        });
    });
}

criterion_group!(
    benches,
    bench_check_hu_winning_hand,
    bench_check_hu_near_miss,
    bench_check_hu_pure_suit
);
criterion_main!(benches);
