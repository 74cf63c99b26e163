//! Column sorting: direction state plus the cell comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The last sort applied to the grid, kept so a repeated sort of the same
/// column flips direction instead of re-sorting ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// Compares two cells the way a sort does: numerically when both sides
/// parse fully as finite numbers, case-insensitively as text otherwise.
///
/// The pairwise rule is not transitive on columns that mix numbers and
/// text ("5" < "30" numerically, but "30" < "5" as text via an
/// intervening word). `slice::sort_by` may reject such comparators, so
/// sorting goes through [`sorted_permutation`] instead.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Stable bottom-up merge sort over indices `0..len`.
///
/// Returns the permutation that orders the items, taking the comparator
/// as-is; ties and inconsistent answers keep the earlier index first.
pub(crate) fn sorted_permutation<F>(len: usize, mut compare: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut perm: Vec<usize> = (0..len).collect();
    let mut scratch = perm.clone();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right, mut out) = (start, mid, start);
            while left < mid && right < end {
                if compare(perm[left], perm[right]) == Ordering::Greater {
                    scratch[out] = perm[right];
                    right += 1;
                } else {
                    scratch[out] = perm[left];
                    left += 1;
                }
                out += 1;
            }
            while left < mid {
                scratch[out] = perm[left];
                left += 1;
                out += 1;
            }
            while right < end {
                scratch[out] = perm[right];
                right += 1;
                out += 1;
            }
            start = end;
        }
        std::mem::swap(&mut perm, &mut scratch);
        width *= 2;
    }
    perm
}
