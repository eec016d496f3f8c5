use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bigint_core::BigInt;

const WIDE: &str = "8269488431969136590284305709825764127034589726901274038973409127361";
const NARROW: &str = "73249872398472398476234";

fn wide() -> BigInt {
    WIDE.parse().unwrap()
}

fn narrow() -> BigInt {
    NARROW.parse().unwrap()
}

pub fn add_wide(c: &mut Criterion) {
    let (a, b) = (wide(), narrow());
    c.bench_function("add wide + narrow", |bench| bench.iter(|| black_box(&a) + black_box(&b)));
}

pub fn mul_wide(c: &mut Criterion) {
    let (a, b) = (wide(), wide());
    c.bench_function("mul wide * wide", |bench| bench.iter(|| black_box(&a) * black_box(&b)));
}

pub fn div_single_limb(c: &mut Criterion) {
    let (a, b) = (wide(), BigInt::from(1_000_003));
    c.bench_function("div wide / single limb", |bench| bench.iter(|| black_box(&a) / black_box(&b)));
}

pub fn div_knuth(c: &mut Criterion) {
    let (a, b) = (&wide() * &wide(), narrow());
    c.bench_function("div wide / multi limb", |bench| bench.iter(|| black_box(&a).div_rem(black_box(&b))));
}

pub fn parse_decimal(c: &mut Criterion) {
    c.bench_function("parse decimal", |bench| bench.iter(|| black_box(WIDE).parse::<BigInt>()));
}

pub fn format_decimal(c: &mut Criterion) {
    let a = wide();
    c.bench_function("format decimal", |bench| bench.iter(|| black_box(&a).to_string()));
}

pub fn clone_shared(c: &mut Criterion) {
    let a = wide();
    c.bench_function("clone shared digits", |bench| bench.iter(|| black_box(&a).clone()));
}

pub fn bitwise_negative(c: &mut Criterion) {
    let (a, b) = (-wide(), narrow());
    c.bench_function("and negative wide", |bench| bench.iter(|| black_box(&a) & black_box(&b)));
}

criterion_group!(arithmetic,
    add_wide,
    mul_wide,
    div_single_limb,
    div_knuth,
    parse_decimal,
    format_decimal,
    clone_shared,
    bitwise_negative,
);
criterion_main!(arithmetic);
