use crate::algorithm::{DiffAlgorithm, Run};
use crate::diff::EditType;

/// LCS-based algorithm
///
/// Quadratic in time but linear in memory: the alignment is recovered by
/// divide and conquer over single rows of the length table (Hirschberg), so
/// long units never allocate a full `n * m` table.
pub struct LcsAlgorithm;

impl LcsAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LcsAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAlgorithm for LcsAlgorithm {
    fn compute(&self, original: &[char], modified: &[char]) -> Vec<Run> {
        let lcs = longest_common_subsequence(original, modified);
        build_runs_from_lcs(original, modified, &lcs)
    }
}

fn longest_common_subsequence(original: &[char], modified: &[char]) -> Vec<(usize, usize)> {
    let mut lcs = Vec::new();
    align(original, modified, 0, 0, &mut lcs);
    lcs
}

/// Push the matched index pairs of one LCS of `a` and `b`, in order.
/// `a_offset` and `b_offset` locate the slices in the full inputs.
fn align(a: &[char], b: &[char], a_offset: usize, b_offset: usize, out: &mut Vec<(usize, usize)>) {
    if a.is_empty() || b.is_empty() {
        return;
    }
    if let [ch] = a {
        if let Some(j) = b.iter().position(|c| c == ch) {
            out.push((a_offset, b_offset + j));
        }
        return;
    }

    let mid = a.len() / 2;
    let forward = lcs_row(a[..mid].iter(), b.iter());
    let backward = lcs_row(a[mid..].iter().rev(), b.iter().rev());

    // Split `b` where the prefix and suffix lengths add up to the most
    let split = (0..=b.len())
        .max_by_key(|&k| (forward[k] + backward[b.len() - k], std::cmp::Reverse(k)))
        .unwrap_or(0);

    align(&a[..mid], &b[..split], a_offset, b_offset, out);
    align(&a[mid..], &b[split..], a_offset + mid, b_offset + split, out);
}

/// Last row of the LCS length table: entry `k` is the LCS length of all of
/// `a` against the first `k` items of `b`.
fn lcs_row<'a>(
    a: impl Iterator<Item = &'a char>,
    b: impl Iterator<Item = &'a char> + Clone,
) -> Vec<u32> {
    let mut row = vec![0u32; b.clone().count() + 1];
    for ca in a {
        let mut diagonal = 0;
        for (j, cb) in b.clone().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row
}

fn build_runs_from_lcs(original: &[char], modified: &[char], lcs: &[(usize, usize)]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut push = |edit_type: EditType, ch: char| match runs.last_mut() {
        Some(last) if last.edit_type == edit_type => last.text.push(ch),
        _ => runs.push(Run::new(edit_type, &[ch])),
    };

    let mut orig_idx = 0;
    let mut mod_idx = 0;

    for &(lcs_orig, lcs_mod) in lcs {
        // Deletions before this LCS match
        while orig_idx < lcs_orig {
            push(EditType::Delete, original[orig_idx]);
            orig_idx += 1;
        }

        // Insertions before this LCS match
        while mod_idx < lcs_mod {
            push(EditType::Insert, modified[mod_idx]);
            mod_idx += 1;
        }

        push(EditType::Equal, original[lcs_orig]);
        orig_idx += 1;
        mod_idx += 1;
    }

    // Remaining deletions and insertions
    for &ch in &original[orig_idx..] {
        push(EditType::Delete, ch);
    }
    for &ch in &modified[mod_idx..] {
        push(EditType::Insert, ch);
    }

    runs
}
