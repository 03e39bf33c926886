use crate::seg_range::MAX_LEAVES;
use cargo_snippet::snippet;

#[snippet("SEG_POINT")]
/// Point-assignment / range-sum segment tree. The no-lazy special case of
/// [`crate::seg_range::RangeSegTree`]: `insert` overwrites one position and
/// `query` sums an inclusive 1-indexed range, both in O(log n).
pub struct PointSegTree {
    size: usize,
    shift: usize,
    nodes: Vec<i64>,
}

#[snippet("SEG_POINT")]
impl PointSegTree {
    pub fn new(size: usize, default_value: i64) -> PointSegTree {
        assert!(size > 0, "segment tree size must be positive");
        assert!(
            size <= MAX_LEAVES,
            "segment tree size {} exceeds maximum {}",
            size,
            MAX_LEAVES
        );
        let shift = size.next_power_of_two();
        let mut nodes = vec![default_value; 2 * shift];
        for k in (1..shift).rev() {
            nodes[k] = nodes[k << 1] + nodes[k << 1 | 1];
        }
        PointSegTree { size, shift, nodes }
    }

    pub fn from_slice(values: &[i64]) -> PointSegTree {
        assert!(!values.is_empty(), "cannot build a segment tree from an empty slice");
        assert!(
            values.len() <= MAX_LEAVES,
            "segment tree size {} exceeds maximum {}",
            values.len(),
            MAX_LEAVES
        );
        let size = values.len();
        let shift = size.next_power_of_two();
        let mut nodes = vec![0; 2 * shift];
        nodes[shift..shift + size].copy_from_slice(values);
        for k in (1..shift).rev() {
            nodes[k] = nodes[k << 1] + nodes[k << 1 | 1];
        }
        PointSegTree { size, shift, nodes }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    /// Overwrite the value at `position` (1-indexed) and refresh ancestors.
    pub fn insert(&mut self, position: usize, value: i64) {
        assert!(
            position >= 1 && position <= self.size,
            "position {} out of bounds for tree of size {}",
            position,
            self.size
        );
        let mut k = position - 1 + self.shift;
        self.nodes[k] = value;
        k >>= 1;
        while k > 0 {
            self.nodes[k] = self.nodes[k << 1] + self.nodes[k << 1 | 1];
            k >>= 1;
        }
    }

    /// Sum over `[lo, hi]`. An inverted range returns 0.
    pub fn query(&self, lo: usize, hi: usize) -> i64 {
        if lo > hi {
            return 0;
        }
        assert!(
            lo >= 1 && hi <= self.size,
            "range [{}, {}] out of bounds for tree of size {}",
            lo,
            hi,
            self.size
        );
        // Bottom-up walk: accumulate the two boundary leaves, then climb
        // both cursors, folding in each sibling that falls inside the window.
        let mut l = lo - 1 + self.shift;
        let mut r = hi - 1 + self.shift;
        let mut result = self.nodes[l];
        if l != r {
            result += self.nodes[r];
        }
        while l >> 1 != r >> 1 {
            if l & 1 == 0 {
                result += self.nodes[l + 1];
            }
            if r & 1 == 1 {
                result += self.nodes[r - 1];
            }
            l >>= 1;
            r >>= 1;
        }
        result
    }
}

#[test]
fn test_point_build_from_slice() {
    let tree = PointSegTree::from_slice(&[1, 5, 8, 15]);
    assert_eq!(tree.query(1, 1), 1);
    assert_eq!(tree.query(1, 2), 6);
    assert_eq!(tree.query(2, 4), 28);
    assert_eq!(tree.query(1, 4), 29);
}

#[test]
fn test_point_insert_overwrites() {
    let mut tree = PointSegTree::new(100, 0);
    tree.insert(1, 10);
    tree.insert(2, 5);
    assert_eq!(tree.query(1, 100), 15);
    tree.insert(2, 7);
    assert_eq!(tree.query(1, 100), 17);
    assert_eq!(tree.query(2, 2), 7);
}

#[test]
fn test_point_empty_range() {
    let tree = PointSegTree::from_slice(&[4, 4, 4]);
    assert_eq!(tree.query(3, 1), 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_point_insert_out_of_bounds() {
    let mut tree = PointSegTree::new(8, 0);
    tree.insert(9, 1);
}

#[test]
fn test_point_random_against_naive() {
    use crate::util;
    use rand::{Rng, SeedableRng, StdRng};

    let size = 777;
    let mut rng = StdRng::from_seed(&[1, 2, 3, 4, 5]);
    let mut v = vec![0i64; size];
    let mut tree = PointSegTree::new(size, 0);

    for _ in 0..2000 {
        let i = rng.gen_range(0, size);
        let x = (rng.next_u64() % 1000) as i64 - 500;
        tree.insert(i + 1, x);
        v[i] = x;

        let q = util::random_range(&mut rng, 0, size);
        let sum: i64 = v[q.clone()].iter().sum();
        assert_eq!(tree.query(q.start + 1, q.end), sum);
    }
}
