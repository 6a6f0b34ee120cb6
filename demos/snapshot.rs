// Example: capture logical values and rebuild an equivalent index.
use fentree::PrefixSumIndex;

fn main() {
    let mut index = PrefixSumIndex::from_values(&[3, 1, 4, 1, 5]);
    index.update(2, 8).unwrap();
    index.push(9);

    let snapshot = index.snapshot();
    println!("values={:?}", snapshot.values);

    let restored = PrefixSumIndex::from_snapshot(&snapshot);
    println!(
        "restored: len={} total={} sum(2..=4)={:?}",
        restored.len(),
        restored.total(),
        restored.range_sum(2, 4)
    );

    // With non-negative values, lower_bound maps a running total back to a position count.
    println!("positions fully covered by 10: {}", restored.lower_bound(10));
}
