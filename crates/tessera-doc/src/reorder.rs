//! Reorder engine: single-element moves over an ordered sequence.
//!
//! A drag-and-drop gesture reports "picked up at `from`, dropped at `to`".
//! [`move_permutation`] turns that into the resulting sequence, expressed as
//! the old position of each element in its new slot. It is a pure function of
//! `(len, from, to)` so it can be tested without any UI in the loop. The
//! document applies the permutation and then [`restamp`]s `order` fields.

use crate::{Block, DocError, Result};

/// Compute the sequence produced by moving the element at `from` to `to`.
///
/// Drop-position semantics: the element is removed first, then inserted at
/// `to` in the shortened sequence. `result[i]` is the old index of the element
/// that ends up at position `i`.
///
/// Both indices must lie in `0..len`; otherwise nothing is computed.
pub fn move_permutation(len: usize, from: usize, to: usize) -> Result<Vec<usize>> {
    for index in [from, to] {
        if index >= len {
            return Err(DocError::IndexOutOfRange { index, len });
        }
    }

    let mut sequence: Vec<usize> = (0..len).collect();
    let moved = sequence.remove(from);
    sequence.insert(to, moved);
    Ok(sequence)
}

/// Rearrange `items` so that slot `i` holds the item previously at `permutation[i]`.
///
/// `permutation` must be a permutation of `0..items.len()`.
pub(crate) fn apply_permutation<T>(items: Vec<T>, permutation: &[usize]) -> Vec<T> {
    debug_assert_eq!(items.len(), permutation.len());

    let mut rank = vec![0usize; permutation.len()];
    for (new_pos, &old_pos) in permutation.iter().enumerate() {
        rank[old_pos] = new_pos;
    }

    let mut ranked: Vec<(usize, T)> = items
        .into_iter()
        .enumerate()
        .map(|(old_pos, item)| (rank[old_pos], item))
        .collect();
    ranked.sort_by_key(|(new_pos, _)| *new_pos);
    ranked.into_iter().map(|(_, item)| item).collect()
}

/// Stamp every block's `order` with its index in the slice.
pub(crate) fn restamp(blocks: &mut [Block]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        block.order = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(permutation: &[usize]) -> String {
        permutation.iter().map(|&i| (b'A' + i as u8) as char).collect()
    }

    #[test]
    fn test_move_backward() {
        let p = move_permutation(5, 2, 0).unwrap();
        assert_eq!(labels(&p), "CABDE");
    }

    #[test]
    fn test_move_forward_accounts_for_removal() {
        let p = move_permutation(5, 0, 2).unwrap();
        assert_eq!(labels(&p), "BCADE");
    }

    #[test]
    fn test_move_to_end() {
        let p = move_permutation(5, 1, 4).unwrap();
        assert_eq!(labels(&p), "ACDEB");
    }

    #[test]
    fn test_move_to_same_position_is_identity() {
        let p = move_permutation(4, 3, 3).unwrap();
        assert_eq!(p, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_indices() {
        assert_eq!(
            move_permutation(3, 3, 0),
            Err(DocError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            move_permutation(3, 0, 7),
            Err(DocError::IndexOutOfRange { index: 7, len: 3 })
        );
        assert_eq!(
            move_permutation(0, 0, 0),
            Err(DocError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_apply_permutation() {
        let items = vec!["a", "b", "c", "d"];
        let p = move_permutation(4, 3, 1).unwrap();
        assert_eq!(apply_permutation(items, &p), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_restamp_is_dense() {
        use tessera_types::BlockContent;
        let mut blocks = vec![
            Block::new("x", 7, BlockContent::paragraph("x")),
            Block::new("y", 7, BlockContent::paragraph("y")),
            Block::new("z", 2, BlockContent::paragraph("z")),
        ];
        restamp(&mut blocks);
        let orders: Vec<usize> = blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }
}
