//! Post-processing passes over an edit script
//!
//! [`merge`] canonicalizes a script (adjacent runs of one kind joined, common
//! affixes of edit pairs moved into equalities, empty runs dropped).
//! [`semantic`] trades minimality for readability: it dissolves short
//! equalities trapped between larger edits and slides edit boundaries onto
//! word and sentence breaks.

use crate::algorithm::{common_overlap, common_prefix, common_suffix, Run};
use crate::diff::EditType;

/// Reorder and merge like edit sections, merge equalities
///
/// Any edit section can move as long as it doesn't cross an equality.
pub fn merge(runs: &mut Vec<Run>) {
    runs.retain(|r| !r.text.is_empty());
    if runs.is_empty() {
        return;
    }

    // Sentinel equality so the last edit block gets flushed
    runs.push(Run::equal(&[]));

    let mut pointer = 0;
    let mut count_delete = 0;
    let mut count_insert = 0;
    let mut text_delete: Vec<char> = Vec::new();
    let mut text_insert: Vec<char> = Vec::new();

    while pointer < runs.len() {
        match runs[pointer].edit_type {
            EditType::Insert => {
                count_insert += 1;
                text_insert.extend_from_slice(&runs[pointer].text);
                pointer += 1;
            }
            EditType::Delete => {
                count_delete += 1;
                text_delete.extend_from_slice(&runs[pointer].text);
                pointer += 1;
            }
            EditType::Equal => {
                if count_delete + count_insert > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        // Factor out any common prefix
                        let common = common_prefix(&text_insert, &text_delete);
                        if common != 0 {
                            let shared: Vec<char> = text_insert[..common].to_vec();
                            let block_start = pointer - count_delete - count_insert;
                            if block_start > 0 && runs[block_start - 1].is_equal() {
                                runs[block_start - 1].text.extend_from_slice(&shared);
                            } else {
                                runs.insert(0, Run::equal(&shared));
                                pointer += 1;
                            }
                            text_insert.drain(..common);
                            text_delete.drain(..common);
                        }

                        // Factor out any common suffix
                        let common = common_suffix(&text_insert, &text_delete);
                        if common != 0 {
                            let split = text_insert.len() - common;
                            let mut shared: Vec<char> = text_insert[split..].to_vec();
                            shared.extend_from_slice(&runs[pointer].text);
                            runs[pointer].text = shared;
                            text_insert.truncate(split);
                            text_delete.truncate(text_delete.len() - common);
                        }
                    }

                    // Replace the whole block with at most one delete and one insert
                    let mut replacement = Vec::with_capacity(2);
                    if !text_delete.is_empty() {
                        replacement.push(Run::delete(&text_delete));
                    }
                    if !text_insert.is_empty() {
                        replacement.push(Run::insert(&text_insert));
                    }
                    let block_start = pointer - count_delete - count_insert;
                    let inserted = replacement.len();
                    runs.splice(block_start..pointer, replacement);
                    pointer = block_start + inserted + 1;
                } else if pointer != 0 && runs[pointer - 1].is_equal() {
                    // Merge this equality with the previous one
                    let text = std::mem::take(&mut runs[pointer].text);
                    runs[pointer - 1].text.extend(text);
                    runs.remove(pointer);
                } else {
                    pointer += 1;
                }
                count_insert = 0;
                count_delete = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }

    if runs.last().is_some_and(|r| r.text.is_empty()) {
        runs.pop();
    }

    // Second pass: look for single edits surrounded on both sides by
    // equalities which can be shifted sideways to eliminate an equality.
    // e.g: A<ins>BA</ins>C -> <ins>AB</ins>AC
    let mut changes = false;
    let mut pointer = 1;
    while pointer + 1 < runs.len() {
        if runs[pointer - 1].is_equal() && runs[pointer + 1].is_equal() {
            let prev = runs[pointer - 1].text.clone();
            let next = runs[pointer + 1].text.clone();
            let edit = &runs[pointer].text;

            if edit.ends_with(&prev) {
                // Shift the edit over the previous equality
                if !prev.is_empty() {
                    let mut shifted = prev.clone();
                    shifted.extend_from_slice(&edit[..edit.len() - prev.len()]);
                    runs[pointer].text = shifted;
                    let mut merged = prev;
                    merged.extend_from_slice(&next);
                    runs[pointer + 1].text = merged;
                }
                runs.remove(pointer - 1);
                changes = true;
            } else if edit.starts_with(&next) {
                // Shift the edit over the next equality
                let mut shifted = edit[next.len()..].to_vec();
                shifted.extend_from_slice(&next);
                runs[pointer].text = shifted;
                runs[pointer - 1].text.extend_from_slice(&next);
                runs.remove(pointer + 1);
                changes = true;
            }
        }
        pointer += 1;
    }

    // If shifts were made, the script needs reordering and another shift sweep
    if changes {
        merge(runs);
    }
}

/// Reduce the number of edits by eliminating semantically trivial equalities
pub fn semantic(runs: &mut Vec<Run>) {
    let mut changes = false;
    // Indices of equalities seen so far
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let mut pointer = 0;
    // Edit lengths before and after the last equality
    let (mut insertions_before, mut deletions_before) = (0, 0);
    let (mut insertions_after, mut deletions_after) = (0, 0);

    while pointer < runs.len() {
        if runs[pointer].is_equal() {
            equalities.push(pointer);
            insertions_before = insertions_after;
            deletions_before = deletions_after;
            insertions_after = 0;
            deletions_after = 0;
            last_equality = Some(runs[pointer].text.len());
        } else {
            if runs[pointer].edit_type == EditType::Insert {
                insertions_after += runs[pointer].text.len();
            } else {
                deletions_after += runs[pointer].text.len();
            }

            // An equality no longer than the edits on either side of it
            if let Some(len) = last_equality.filter(|&len| len > 0) {
                if len <= insertions_before.max(deletions_before)
                    && len <= insertions_after.max(deletions_after)
                {
                    if let Some(&at) = equalities.last() {
                        let text = runs[at].text.clone();
                        runs.insert(at, Run::delete(&text));
                        runs[at + 1].edit_type = EditType::Insert;
                        equalities.pop();
                    }
                    // The previous equality needs to be re-evaluated too
                    equalities.pop();
                    pointer = equalities.last().map_or(0, |&e| e + 1);

                    insertions_before = 0;
                    deletions_before = 0;
                    insertions_after = 0;
                    deletions_after = 0;
                    last_equality = None;
                    changes = true;
                    continue;
                }
            }
        }
        pointer += 1;
    }

    if changes {
        merge(runs);
    }
    semantic_lossless(runs);

    // Find overlaps between deletions and insertions.
    // e.g: <del>abcxxx</del><ins>xxxdef</ins>
    //   -> <del>abc</del>xxx<ins>def</ins>
    // e.g: <del>xxxabc</del><ins>defxxx</ins>
    //   -> <ins>def</ins>xxx<del>abc</del>
    // Only extract an overlap if it is as big as the edit ahead or behind it.
    let mut pointer = 1;
    while pointer < runs.len() {
        if runs[pointer - 1].edit_type == EditType::Delete
            && runs[pointer].edit_type == EditType::Insert
        {
            let deletion = runs[pointer - 1].text.clone();
            let insertion = runs[pointer].text.clone();
            let overlap1 = common_overlap(&deletion, &insertion);
            let overlap2 = common_overlap(&insertion, &deletion);

            if overlap1 >= overlap2 {
                if 2 * overlap1 >= deletion.len() || 2 * overlap1 >= insertion.len() {
                    runs.insert(pointer, Run::equal(&insertion[..overlap1]));
                    runs[pointer - 1].text = deletion[..deletion.len() - overlap1].to_vec();
                    runs[pointer + 1].text = insertion[overlap1..].to_vec();
                    pointer += 1;
                }
            } else if 2 * overlap2 >= deletion.len() || 2 * overlap2 >= insertion.len() {
                // Reverse overlap: swap the edits around the shared text
                runs.insert(pointer, Run::equal(&deletion[..overlap2]));
                runs[pointer - 1] = Run::insert(&insertion[..insertion.len() - overlap2]);
                runs[pointer + 1] = Run::delete(&deletion[overlap2..]);
                pointer += 1;
            }
            pointer += 1;
        }
        pointer += 1;
    }

    runs.retain(|r| !r.text.is_empty());
    join_adjacent(runs);
}

/// Join neighbouring runs of the same kind.
///
/// The lossless pass can empty an equality and the overlap pass runs after
/// the last merge, so either may leave two insertions side by side.
fn join_adjacent(runs: &mut Vec<Run>) {
    runs.dedup_by(|next, prev| {
        if next.edit_type == prev.edit_type {
            prev.text.append(&mut next.text);
            true
        } else {
            false
        }
    });
}

/// Slide single edits surrounded by equalities sideways so that they align
/// with word or sentence boundaries.
/// e.g: The c<ins>at c</ins>ame. -> The <ins>cat </ins>came.
pub fn semantic_lossless(runs: &mut Vec<Run>) {
    let mut pointer = 1;
    while pointer + 1 < runs.len() {
        if runs[pointer - 1].is_equal() && runs[pointer + 1].is_equal() {
            let mut equality1 = runs[pointer - 1].text.clone();
            let mut edit = runs[pointer].text.clone();
            let mut equality2 = runs[pointer + 1].text.clone();

            // First, shift the edit as far left as possible
            let offset = common_suffix(&equality1, &edit);
            if offset > 0 {
                let common: Vec<char> = edit[edit.len() - offset..].to_vec();
                equality1.truncate(equality1.len() - offset);
                let mut shifted = common.clone();
                shifted.extend_from_slice(&edit[..edit.len() - offset]);
                edit = shifted;
                let mut grown = common;
                grown.extend_from_slice(&equality2);
                equality2 = grown;
            }

            // Second, step character by character right, looking for the best fit
            let mut best_equality1 = equality1.clone();
            let mut best_edit = edit.clone();
            let mut best_equality2 = equality2.clone();
            let mut best_score =
                boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);

            while !edit.is_empty() && !equality2.is_empty() && edit[0] == equality2[0] {
                equality1.push(edit[0]);
                edit.remove(0);
                edit.push(equality2.remove(0));
                let score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
                // The >= encourages trailing rather than leading whitespace on edits
                if score >= best_score {
                    best_score = score;
                    best_equality1 = equality1.clone();
                    best_edit = edit.clone();
                    best_equality2 = equality2.clone();
                }
            }

            if runs[pointer - 1].text != best_equality1 {
                // We have an improvement, save it back
                if best_equality1.is_empty() {
                    runs.remove(pointer - 1);
                    pointer -= 1;
                } else {
                    runs[pointer - 1].text = best_equality1;
                }
                runs[pointer].text = best_edit;
                if best_equality2.is_empty() {
                    runs.remove(pointer + 1);
                    pointer = pointer.saturating_sub(1);
                } else {
                    runs[pointer + 1].text = best_equality2;
                }
            }
        }
        pointer += 1;
    }
}

/// Score how well the boundary between `one` and `two` falls on a logical break
///
/// 6 for an edge of the text, 5 for a blank line, 4 for a line break, 3 for the
/// end of a sentence, 2 for whitespace, 1 for other punctuation, 0 otherwise.
fn boundary_score(one: &[char], two: &[char]) -> u8 {
    let (Some(&char1), Some(&char2)) = (one.last(), two.first()) else {
        return 6;
    };

    let non_alphanumeric1 = !char1.is_alphanumeric();
    let non_alphanumeric2 = !char2.is_alphanumeric();
    let whitespace1 = non_alphanumeric1 && char1.is_whitespace();
    let whitespace2 = non_alphanumeric2 && char2.is_whitespace();
    let line_break1 = whitespace1 && (char1 == '\r' || char1 == '\n');
    let line_break2 = whitespace2 && (char2 == '\r' || char2 == '\n');
    let blank_line1 = line_break1 && ends_with_blank_line(one);
    let blank_line2 = line_break2 && starts_with_blank_line(two);

    if blank_line1 || blank_line2 {
        5
    } else if line_break1 || line_break2 {
        4
    } else if non_alphanumeric1 && !whitespace1 && whitespace2 {
        3
    } else if whitespace1 || whitespace2 {
        2
    } else if non_alphanumeric1 || non_alphanumeric2 {
        1
    } else {
        0
    }
}

/// `\n\r?\n$`
fn ends_with_blank_line(text: &[char]) -> bool {
    text.ends_with(&['\n', '\n']) || text.ends_with(&['\n', '\r', '\n'])
}

/// `^\r?\n\r?\n`
fn starts_with_blank_line(text: &[char]) -> bool {
    let rest = text.strip_prefix(&['\r']).unwrap_or(text);
    let Some(rest) = rest.strip_prefix(&['\n']) else {
        return false;
    };
    let rest = rest.strip_prefix(&['\r']).unwrap_or(rest);
    rest.starts_with(&['\n'])
}
