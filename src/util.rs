use cargo_snippet::snippet;
use rand::Rng;
use std::ops::Range;

#[snippet("util")]
/// Uniformly random, possibly empty, half-open subrange of `[lb, ub]`.
pub fn random_range<R: Rng>(rng: &mut R, lb: usize, ub: usize) -> Range<usize> {
    let mut l = rng.gen_range(lb, ub + 1);
    let mut r = rng.gen_range(lb, ub + 1);
    if l > r {
        std::mem::swap(&mut l, &mut r);
    }
    l..r
}

#[test]
fn test_random_range_bounds() {
    use rand::{SeedableRng, StdRng};
    let mut rng = StdRng::from_seed(&[7, 7, 7]);
    for _ in 0..1000 {
        let r = random_range(&mut rng, 3, 20);
        assert!(3 <= r.start && r.start <= r.end && r.end <= 20);
    }
}
