use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weighted_merkle::{verify_proof, Blake3Hasher, Entry, Keccak256Hasher, MerkleTree, Weight};

/// 1024 leaves at full depth: the largest tree the weight set allows
fn full_depth_entries() -> Vec<Entry> {
    (0..1024u32)
        .map(|i| Entry::with_weight(i.to_le_bytes().to_vec(), Weight::MIN))
        .collect()
}

/// One entry per depth, padded out by a placeholder
fn mixed_entries() -> Vec<Entry> {
    (1..=10u32)
        .map(|d| Entry::with_weight(d.to_le_bytes().to_vec(), Weight::from_depth(d).unwrap()))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let full = full_depth_entries();
    let mixed = mixed_entries();

    c.bench_function("build_1024_keccak", |b| {
        b.iter(|| MerkleTree::build(black_box(full.clone())).unwrap())
    });
    c.bench_function("build_1024_blake3", |b| {
        b.iter(|| MerkleTree::build_with(Blake3Hasher, black_box(full.clone())).unwrap())
    });
    c.bench_function("build_mixed_keccak", |b| {
        b.iter(|| MerkleTree::build(black_box(mixed.clone())).unwrap())
    });
}

fn bench_prove_verify(c: &mut Criterion) {
    let entries = full_depth_entries();
    let tree = MerkleTree::build(entries.clone()).unwrap();
    let target = &entries[entries.len() / 2];
    let proof = tree.prove(target).unwrap();
    let root = tree.root_hash();

    c.bench_function("prove_1024", |b| b.iter(|| tree.prove(black_box(target)).unwrap()));
    c.bench_function("verify_depth_10", |b| {
        b.iter(|| verify_proof(&Keccak256Hasher, &root, black_box(proof.digests())).unwrap())
    });
}

criterion_group!(benches, bench_build, bench_prove_verify);
criterion_main!(benches);
