use crate::algorithm::{cleanup, common_prefix, common_suffix, find, DiffAlgorithm, Run};
use crate::diff::EditType;

/// Myers O(ND) diff algorithm
///
/// Trims the common prefix and suffix, short-circuits containment and
/// single-character cases, then bisects on the middle snake and recurses.
/// There is no deadline: the search always runs to the optimal split.
pub struct MyersAlgorithm;

impl MyersAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MyersAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAlgorithm for MyersAlgorithm {
    fn compute(&self, original: &[char], modified: &[char]) -> Vec<Run> {
        diff_main(original, modified)
    }
}

fn diff_main(a: &[char], b: &[char]) -> Vec<Run> {
    if a == b {
        return if a.is_empty() {
            Vec::new()
        } else {
            vec![Run::equal(a)]
        };
    }

    let prefix_len = common_prefix(a, b);
    let (prefix, a, b) = (&a[..prefix_len], &a[prefix_len..], &b[prefix_len..]);

    let suffix_len = common_suffix(a, b);
    let suffix = &a[a.len() - suffix_len..];
    let a = &a[..a.len() - suffix_len];
    let b = &b[..b.len() - suffix_len];

    let mut runs = Vec::new();
    if !prefix.is_empty() {
        runs.push(Run::equal(prefix));
    }
    runs.extend(diff_middle(a, b));
    if !suffix.is_empty() {
        runs.push(Run::equal(suffix));
    }

    cleanup::merge(&mut runs);
    runs
}

/// Diff two sequences known to share no common prefix or suffix
fn diff_middle(a: &[char], b: &[char]) -> Vec<Run> {
    if a.is_empty() {
        return vec![Run::insert(b)];
    }
    if b.is_empty() {
        return vec![Run::delete(a)];
    }

    let (long, short, edit) = if a.len() > b.len() {
        (a, b, EditType::Delete)
    } else {
        (b, a, EditType::Insert)
    };

    // Shorter text entirely inside the longer one
    if let Some(at) = find(long, short) {
        return vec![
            Run::new(edit, &long[..at]),
            Run::equal(short),
            Run::new(edit, &long[at + short.len()..]),
        ];
    }

    // A single character that is not contained cannot be an equality
    if short.len() == 1 {
        return vec![Run::delete(a), Run::insert(b)];
    }

    bisect(a, b)
}

/// Find the middle snake and split the problem there
fn bisect(a: &[char], b: &[char]) -> Vec<Run> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let v_offset = max_d;
    let v_length = 2 * max_d;

    let mut v1 = vec![-1isize; v_length as usize];
    let mut v2 = vec![-1isize; v_length as usize];
    v1[(v_offset + 1) as usize] = 0;
    v2[(v_offset + 1) as usize] = 0;

    let delta = n - m;
    // With an odd delta the forward path detects the overlap, otherwise the
    // reverse path does.
    let front = delta % 2 != 0;

    let (mut k1_start, mut k1_end) = (0isize, 0isize);
    let (mut k2_start, mut k2_end) = (0isize, 0isize);

    for d in 0..max_d {
        // Walk the front path one step
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let k1_offset = (v_offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                v1[k1_offset + 1]
            } else {
                v1[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && a[x1 as usize] == b[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            v1[k1_offset] = x1;

            if x1 > n {
                // Ran off the right of the graph
                k1_end += 2;
            } else if y1 > m {
                // Ran off the bottom of the graph
                k1_start += 2;
            } else if front {
                let k2_offset = v_offset + delta - k1;
                if k2_offset >= 0 && k2_offset < v_length && v2[k2_offset as usize] != -1 {
                    let x2 = n - v2[k2_offset as usize];
                    if x1 >= x2 {
                        return bisect_split(a, b, x1 as usize, y1 as usize);
                    }
                }
            }
            k1 += 2;
        }

        // Walk the reverse path one step
        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let k2_offset = (v_offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                v2[k2_offset + 1]
            } else {
                v2[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n && y2 < m && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize] {
                x2 += 1;
                y2 += 1;
            }
            v2[k2_offset] = x2;

            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !front {
                let k1_offset = v_offset + delta - k2;
                if k1_offset >= 0 && k1_offset < v_length && v1[k1_offset as usize] != -1 {
                    let x1 = v1[k1_offset as usize];
                    let y1 = v_offset + x1 - k1_offset;
                    if x1 >= n - x2 {
                        return bisect_split(a, b, x1 as usize, y1 as usize);
                    }
                }
            }
            k2 += 2;
        }
    }

    // No commonality at all
    vec![Run::delete(a), Run::insert(b)]
}

fn bisect_split(a: &[char], b: &[char], x: usize, y: usize) -> Vec<Run> {
    let mut runs = diff_main(&a[..x], &b[..y]);
    runs.extend(diff_main(&a[x..], &b[y..]));
    runs
}
