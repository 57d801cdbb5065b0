//! `Block` and `Repeat`: tiling operators over a mask's index space.
//!
//! `Block(M, N) * m` treats every connection `(k, post)` of `m` as denoting
//! an entire `M x N` block of connections, `(k*M .. k*M+M, post*N ..
//! post*N+N)` — the reference `BlockMask.iterator`'s column-grouping
//! algorithm, adapted to operate on an already-materialized window.
//!
//! `Repeat(M, N) * m` tiles `m` (which must fit within `[0, M) x [0, N)`)
//! periodically across the whole index space. The reference `RepeatMask`
//! only handles windows aligned to whole periods; this lifts that
//! restriction by tiling every period that overlaps the requested window,
//! since materializing a window makes the general case no harder than the
//! aligned one (documented as an open-question resolution in DESIGN.md).

use super::node::Mask;

fn flush_block_column(post: u64, cols: &[u64], n: u64, low1: u64, high1: u64, out: &mut Vec<(u64, u64)>) {
    for jj in (n * post).max(low1)..(n * (post + 1)).min(high1) {
        for &ii in cols {
            out.push((ii, jj));
        }
    }
}

pub fn block_window(
    mask: &Mask,
    m: u64,
    n: u64,
    low0: u64,
    high0: u64,
    low1: u64,
    high1: u64,
) -> Vec<(u64, u64)> {
    let rlow0 = low0 / m;
    let rhigh0 = (high0 + m - 1) / m;
    let rlow1 = low1 / n;
    let rhigh1 = (high1 + n - 1) / n;

    let mut out = Vec::new();
    let mut current_post: Option<u64> = None;
    let mut cols: Vec<u64> = Vec::new();

    for (k, post) in mask.bounded_iterate(rlow0, rhigh0, rlow1, rhigh1) {
        if current_post != Some(post) {
            if let Some(prev) = current_post {
                flush_block_column(prev, &cols, n, low1, high1, &mut out);
            }
            current_post = Some(post);
            cols.clear();
        }
        cols.extend((m * k).max(low0)..(m * (k + 1)).min(high0));
    }
    if let Some(prev) = current_post {
        flush_block_column(prev, &cols, n, low1, high1, &mut out);
    }
    out
}

pub fn repeat_window(
    mask: &Mask,
    m: u64,
    n: u64,
    low0: u64,
    high0: u64,
    low1: u64,
    high1: u64,
) -> Vec<(u64, u64)> {
    if high0 <= low0 || high1 <= low1 {
        return Vec::new();
    }
    let base = mask.bounded_iterate(0, m, 0, n);
    if base.is_empty() {
        return Vec::new();
    }

    let first_block0 = low0 / m;
    let last_block0 = (high0 - 1) / m;
    let first_block1 = low1 / n;
    let last_block1 = (high1 - 1) / n;

    let mut out = Vec::new();
    for block_j in first_block1..=last_block1 {
        for block_i in first_block0..=last_block0 {
            let base_i = block_i * m;
            let base_j = block_j * n;
            for &(k, l) in &base {
                let ii = base_i + k;
                let jj = base_j + l;
                if ii >= low0 && ii < high0 && jj >= low1 && jj < high1 {
                    out.push((ii, jj));
                }
            }
        }
    }
    out.sort_by_key(|&(i, j)| (j, i));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_keeps_post_order_when_two_sources_share_a_target() {
        let m = Mask::explicit(vec![(0, 0), (1, 0)]);
        let out = block_window(&m, 2, 2, 0, 4, 0, 2);
        assert_eq!(
            out,
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1), (3, 1)]
        );
    }

    #[test]
    fn block_expands_single_connection() {
        let m = Mask::one_to_one();
        let out = block_window(&m, 2, 2, 0, 4, 0, 4);
        // one_to_one over the rescaled [0,2)x[0,2) window gives (0,0),(1,1)
        assert_eq!(
            out,
            vec![(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)]
        );
    }

    #[test]
    fn repeat_tiles_the_base_pattern() {
        let base = Mask::explicit(vec![(0, 0)]);
        let out = repeat_window(&base, 2, 2, 0, 6, 0, 2);
        assert_eq!(out, vec![(0, 0), (2, 0), (4, 0)]);
    }

    #[test]
    fn repeat_respects_window_edges() {
        let base = Mask::explicit(vec![(1, 1)]);
        let out = repeat_window(&base, 2, 2, 0, 3, 0, 3);
        assert_eq!(out, vec![(1, 1)]);
    }
}
