use cargo_snippet::snippet;

/// Hard cap on the number of leaves a tree may be built over.
#[snippet("SEG_RANGE")]
pub const MAX_LEAVES: usize = 1 << 30;

#[snippet("SEG_RANGE")]
/// Segment tree with lazy propagation: add a value to every element of a
/// range, query the sum of a range, both in O(log n).
///
/// Positions are 1-indexed and ranges are inclusive on both ends. `query`
/// takes `&mut self` since it pushes pending tags down as it descends, so
/// concurrent callers need external exclusion.
pub struct RangeSegTree {
    size: usize,
    shift: usize,
    nodes: Vec<i64>,
    lazy: Vec<i64>,
}

#[snippet("SEG_RANGE")]
impl RangeSegTree {
    /// Tree over `size` positions, every position starting at `default_value`.
    pub fn new(size: usize, default_value: i64) -> RangeSegTree {
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
        RangeSegTree {
            size,
            shift,
            nodes,
            lazy: vec![0; 2 * shift],
        }
    }

    /// Tree seeded from `values` in order (position `i+1` gets `values[i]`).
    /// Padding leaves beyond `values.len()` are zero.
    pub fn from_slice(values: &[i64]) -> RangeSegTree {
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
        RangeSegTree {
            size,
            shift,
            nodes,
            lazy: vec![0; 2 * shift],
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    // Materialize a pending tag into the node's own aggregate and hand it
    // down one level. Must run before any read of or descent through `node`;
    // the tag is cleared so the materialization happens at most once.
    fn settle(&mut self, node: usize, lo: usize, hi: usize) {
        let tag = self.lazy[node];
        if tag == 0 {
            return;
        }
        self.nodes[node] += tag * (hi - lo + 1) as i64;
        if node < self.shift {
            // Tags compose by summation.
            self.lazy[node << 1] += tag;
            self.lazy[node << 1 | 1] += tag;
        }
        self.lazy[node] = 0;
    }

    /// Add `value` to every position in `[lo, hi]`. An inverted range
    /// (`lo > hi`) is a no-op.
    pub fn insert(&mut self, lo: usize, hi: usize, value: i64) {
        if lo > hi {
            return;
        }
        assert!(
            lo >= 1 && hi <= self.size,
            "range [{}, {}] out of bounds for tree of size {}",
            lo,
            hi,
            self.size
        );
        let shift = self.shift;
        self.insert_rec(1, 1, shift, lo, hi, value);
    }

    fn insert_rec(
        &mut self,
        node: usize,
        node_lo: usize,
        node_hi: usize,
        lo: usize,
        hi: usize,
        value: i64,
    ) {
        self.settle(node, node_lo, node_hi);
        if hi < node_lo || node_hi < lo {
            return;
        }
        if lo <= node_lo && node_hi <= hi {
            // Settle again right away so this node's aggregate is already
            // current when an ancestor recomputes from its children.
            self.lazy[node] += value;
            self.settle(node, node_lo, node_hi);
            return;
        }
        let mid = (node_lo + node_hi) >> 1;
        self.insert_rec(node << 1, node_lo, mid, lo, hi, value);
        self.insert_rec(node << 1 | 1, mid + 1, node_hi, lo, hi, value);
        self.nodes[node] = self.nodes[node << 1] + self.nodes[node << 1 | 1];
    }

    /// Sum over `[lo, hi]`. An inverted range returns 0.
    pub fn query(&mut self, lo: usize, hi: usize) -> i64 {
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
        let shift = self.shift;
        self.query_rec(1, 1, shift, lo, hi)
    }

    fn query_rec(
        &mut self,
        node: usize,
        node_lo: usize,
        node_hi: usize,
        lo: usize,
        hi: usize,
    ) -> i64 {
        self.settle(node, node_lo, node_hi);
        if hi < node_lo || node_hi < lo {
            return 0;
        }
        if lo <= node_lo && node_hi <= hi {
            return self.nodes[node];
        }
        let mid = (node_lo + node_hi) >> 1;
        let result = self.query_rec(node << 1, node_lo, mid, lo, hi)
            + self.query_rec(node << 1 | 1, mid + 1, node_hi, lo, hi);
        // Children are settled now, refresh so no stale aggregate survives.
        self.nodes[node] = self.nodes[node << 1] + self.nodes[node << 1 | 1];
        result
    }
}

#[test]
fn test_build_from_slice() {
    let mut tree = RangeSegTree::from_slice(&[1, 5, 8, 15]);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.query(1, 1), 1);
    assert_eq!(tree.query(1, 2), 6);
    assert_eq!(tree.query(2, 4), 28);
    assert_eq!(tree.query(1, 4), 29);

    tree.insert(2, 3, 10);
    assert_eq!(tree.query(2, 2), 15);
    assert_eq!(tree.query(3, 3), 18);
    assert_eq!(tree.query(1, 4), 49);
}

#[test]
fn test_range_add_on_default_tree() {
    let mut tree = RangeSegTree::new(5, 0);
    tree.insert(1, 1, 10);
    tree.insert(2, 2, 20);
    tree.insert(1, 5, 100);
    assert_eq!(tree.query(1, 1), 110);
    assert_eq!(tree.query(2, 2), 120);
    assert_eq!(tree.query(3, 5), 300);
    assert_eq!(tree.query(1, 5), 530);
}

#[test]
fn test_default_value_fill() {
    let mut tree = RangeSegTree::new(6, 7);
    assert_eq!(tree.query(1, 6), 42);
    assert_eq!(tree.query(4, 4), 7);
    tree.insert(4, 6, -7);
    assert_eq!(tree.query(1, 6), 21);
}

#[test]
fn test_sum_decomposition() {
    let mut tree = RangeSegTree::from_slice(&[3, -1, 4, 1, -5, 9, 2, 6, 5]);
    tree.insert(2, 7, 11);
    for m in 1..9 {
        assert_eq!(tree.query(1, 9), tree.query(1, m) + tree.query(m + 1, 9));
    }
}

#[test]
fn test_empty_range_noop() {
    let mut tree = RangeSegTree::from_slice(&[1, 2, 3, 4]);
    assert_eq!(tree.query(3, 2), 0);
    tree.insert(4, 1, 100);
    assert_eq!(tree.query(1, 4), 10);
}

#[test]
fn test_repeated_query_is_stable() {
    let mut tree = RangeSegTree::new(8, 1);
    tree.insert(2, 6, 5);
    let first = tree.query(1, 8);
    for _ in 0..10 {
        assert_eq!(tree.query(1, 8), first);
        assert_eq!(tree.query(3, 5), 18);
    }
}

#[test]
#[should_panic(expected = "size must be positive")]
fn test_zero_size_rejected() {
    RangeSegTree::new(0, 0);
}

#[test]
#[should_panic(expected = "empty slice")]
fn test_empty_slice_rejected() {
    RangeSegTree::from_slice(&[]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_insert_out_of_bounds() {
    let mut tree = RangeSegTree::new(4, 0);
    tree.insert(2, 5, 1);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_query_out_of_bounds() {
    let mut tree = RangeSegTree::new(4, 0);
    tree.query(0, 3);
}

#[test]
fn test_random_against_naive() {
    use crate::util;
    use rand::{Rng, SeedableRng, StdRng};

    let size = 1000;
    let mut rng = StdRng::from_seed(&[1, 2, 3, 4, 5]);
    let mut v = vec![0i64; size];
    let mut tree = RangeSegTree::new(size, 0);

    for _ in 0..1000 {
        let x = (rng.next_u64() % 256) as i64 - 128;
        let r = util::random_range(&mut rng, 0, size);
        // Half-open r maps to the inclusive 1-indexed window [start+1, end];
        // an empty r exercises the inverted-range no-op.
        tree.insert(r.start + 1, r.end, x);
        for i in r {
            v[i] += x;
        }

        let q = util::random_range(&mut rng, 0, size);
        let mut sum = 0;
        for i in q.clone() {
            sum += v[i];
        }
        assert_eq!(tree.query(q.start + 1, q.end), sum);
    }

    for i in 1..=size {
        assert_eq!(tree.query(i, i), v[i - 1]);
    }
}

#[test]
fn test_random_seeded_build() {
    use crate::util;
    use rand::{Rng, SeedableRng, StdRng};

    let size = 512;
    let mut rng = StdRng::from_seed(&[42]);
    let v: Vec<i64> = (0..size).map(|_| (rng.next_u64() % 1000) as i64).collect();
    let mut tree = RangeSegTree::from_slice(&v);

    for i in 1..=size {
        assert_eq!(tree.query(i, i), v[i - 1]);
    }
    for _ in 0..200 {
        let q = util::random_range(&mut rng, 0, size);
        let sum: i64 = v[q.clone()].iter().sum();
        assert_eq!(tree.query(q.start + 1, q.end), sum);
    }
}
