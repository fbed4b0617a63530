//! Line-oriented unified diff for status-note bodies.
//!
//! # Responsibility
//! - Render the textual difference between two note revisions as a
//!   unified diff with `---`/`+++`/`@@` framing and 3 context lines.
//!
//! # Invariants
//! - Identical inputs produce an empty string (no hunks, no framing).
//! - Output is deterministic: within a replace region, removed lines are
//!   always emitted before inserted lines.

/// Context lines kept around each change.
const CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Delete,
    Insert,
}

/// Half-open line ranges `[a_start, a_end)` / `[b_start, b_end)` covered
/// by one edit operation.
#[derive(Debug, Clone, Copy)]
struct Opcode {
    tag: Tag,
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

/// Renders a unified diff of `previous` vs `current`, line by line.
///
/// Returns an empty string when the inputs match line-for-line.
pub fn unified_diff(previous: &str, current: &str) -> String {
    let a: Vec<&str> = previous.lines().collect();
    let b: Vec<&str> = current.lines().collect();
    let codes = opcodes(&a, &b);
    if codes.iter().all(|code| code.tag == Tag::Equal) {
        return String::new();
    }

    let mut lines = vec!["---".to_string(), "+++".to_string()];
    for group in group_opcodes(codes, CONTEXT) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        lines.push(format!(
            "@@ -{} +{} @@",
            format_range(first.a_start, last.a_end),
            format_range(first.b_start, last.b_end)
        ));
        for code in &group {
            match code.tag {
                Tag::Equal => lines.extend(a[code.a_start..code.a_end].iter().map(|line| format!(" {line}"))),
                Tag::Delete => lines.extend(a[code.a_start..code.a_end].iter().map(|line| format!("-{line}"))),
                Tag::Insert => lines.extend(b[code.b_start..code.b_end].iter().map(|line| format!("+{line}"))),
            }
        }
    }
    lines.join("\n")
}

/// Unified-diff range notation: 1-based start, length elided when 1.
fn format_range(start: usize, end: usize) -> String {
    let length = end - start;
    match length {
        1 => (start + 1).to_string(),
        0 => format!("{start},0"),
        _ => format!("{},{length}", start + 1),
    }
}

/// Computes merged edit opcodes via a longest-common-subsequence walk.
fn opcodes(a: &[&str], b: &[&str]) -> Vec<Opcode> {
    // lcs[i][j] = LCS length of a[i..] vs b[j..].
    let mut lcs = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut codes = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() || j < b.len() {
        if i < a.len() && j < b.len() && a[i] == b[j] {
            let (ai, bj) = (i, j);
            while i < a.len() && j < b.len() && a[i] == b[j] {
                i += 1;
                j += 1;
            }
            codes.push(Opcode {
                tag: Tag::Equal,
                a_start: ai,
                a_end: i,
                b_start: bj,
                b_end: j,
            });
        } else {
            // Maximal non-equal region: deletes advance only `i`, inserts
            // advance only `j`, so both sides stay contiguous.
            let (ai, bj) = (i, j);
            while i < a.len() || j < b.len() {
                if i < a.len() && j < b.len() && a[i] == b[j] {
                    break;
                }
                if j >= b.len() || (i < a.len() && lcs[i + 1][j] >= lcs[i][j + 1]) {
                    i += 1;
                } else {
                    j += 1;
                }
            }
            if i > ai {
                codes.push(Opcode {
                    tag: Tag::Delete,
                    a_start: ai,
                    a_end: i,
                    b_start: bj,
                    b_end: bj,
                });
            }
            if j > bj {
                codes.push(Opcode {
                    tag: Tag::Insert,
                    a_start: i,
                    a_end: i,
                    b_start: bj,
                    b_end: j,
                });
            }
        }
    }
    codes
}

/// Splits opcodes into hunk groups, clamping equal runs to the context
/// width and breaking on equal runs wider than twice the context.
fn group_opcodes(mut codes: Vec<Opcode>, n: usize) -> Vec<Vec<Opcode>> {
    if codes.is_empty() {
        return Vec::new();
    }
    if let Some(first) = codes.first_mut() {
        if first.tag == Tag::Equal {
            first.a_start = first.a_start.max(first.a_end.saturating_sub(n));
            first.b_start = first.b_start.max(first.b_end.saturating_sub(n));
        }
    }
    if let Some(last) = codes.last_mut() {
        if last.tag == Tag::Equal {
            last.a_end = last.a_end.min(last.a_start + n);
            last.b_end = last.b_end.min(last.b_start + n);
        }
    }

    let mut groups = Vec::new();
    let mut group: Vec<Opcode> = Vec::new();
    for code in codes {
        if code.tag == Tag::Equal && code.a_end - code.a_start > 2 * n {
            group.push(Opcode {
                a_end: code.a_start + n,
                b_end: code.b_start + n,
                ..code
            });
            groups.push(group);
            group = vec![Opcode {
                a_start: code.a_end - n,
                b_start: code.b_end - n,
                ..code
            }];
        } else {
            group.push(code);
        }
    }
    if !(group.len() == 1 && group[0].tag == Tag::Equal) && !group.is_empty() {
        groups.push(group);
    }
    groups
}
