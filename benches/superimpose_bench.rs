//! Criterion benches for the two bulk passes of the crate: the offset-aware
//! bitmask AND kernel and full struct-of-struct superimposition.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use lamina_columnar::{
    and_masks, flatten_nested_columns, superimpose_parent_nulls, Bitmask, Column, LaminaDataType,
    NullabilityPolicy, Table,
};

const ROWS: usize = 1_000_000;

fn random_mask(rng: &mut StdRng, rows: usize) -> Bitmask {
    let bools: Vec<bool> = (0..rows).map(|_| rng.gen_bool(0.95)).collect();
    Bitmask::from_bools(&bools)
}

fn build_nested_struct(rng: &mut StdRng, rows: usize) -> Table {
    let values: Vec<i64> = (0..rows as i64).collect();
    let leaf = Column::new_fixed::<i64>(
        LaminaDataType::Int64,
        &values,
        Some(random_mask(rng, rows)),
    )
    .unwrap();
    let inner = Column::new_struct(vec![leaf], Some(random_mask(rng, rows))).unwrap();
    let outer = Column::new_struct(vec![inner], Some(random_mask(rng, rows))).unwrap();
    Table::new(vec![outer]).unwrap()
}

fn bench_and_masks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_mask(&mut rng, ROWS + 64);
    let b = random_mask(&mut rng, ROWS + 64);

    c.bench_function("and_masks_1m_aligned", |bencher| {
        bencher.iter(|| and_masks(Some(black_box(&a)), 0, Some(black_box(&b)), 0, ROWS).unwrap())
    });

    // Misaligned offsets force the shift-and-stitch path in every word.
    c.bench_function("and_masks_1m_misaligned", |bencher| {
        bencher.iter(|| and_masks(Some(black_box(&a)), 13, Some(black_box(&b)), 37, ROWS).unwrap())
    });
}

fn bench_superimpose(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let table = build_nested_struct(&mut rng, ROWS);
    let view = table.view();
    let column = view.column(0).unwrap();

    c.bench_function("superimpose_two_level_1m", |bencher| {
        bencher.iter(|| superimpose_parent_nulls(black_box(column)).unwrap())
    });

    c.bench_function("flatten_two_level_1m", |bencher| {
        bencher.iter(|| {
            flatten_nested_columns(black_box(&view), &[], &[], NullabilityPolicy::Force).unwrap()
        })
    });
}

criterion_group!(benches, bench_and_masks, bench_superimpose);
criterion_main!(benches);
