//! Per-type port slot tables.
//!
//! For every vertex type the table lists up to six neighbor picks, given as
//! offsets into the vertex's ordered neighbor list (positive offsets select
//! successors, negative ones predecessors, `None` marks an empty slot). The
//! first three slots form one half, the last three the other; orientation
//! assignment maps the halves to the negative and positive direction of an
//! axis depending on which side of the vertex is crowded.

/// Slot offsets for a vertex of type `(succ, pred)`.
pub(crate) fn slot_offsets(ty: (usize, usize)) -> [Option<isize>; 6] {
    match ty {
        (4, 0) => offsets([1, 0, 0, 2, 3, 4]),
        (0, 4) => offsets([-1, 0, 0, -2, -3, -4]),
        (4, 1) => offsets([-1, 1, 0, 2, 3, 4]),
        (1, 4) => offsets([1, -1, 0, -2, -3, -4]),
        (4, 2) => offsets([-2, -1, 1, 2, 3, 4]),
        (2, 4) => offsets([2, 1, -1, -2, -3, -4]),
        (5, 0) => offsets([1, 2, 0, 3, 4, 5]),
        (0, 5) => offsets([-1, -2, 0, -3, -4, -5]),
        (5, 1) => offsets([-1, 1, 2, 3, 4, 5]),
        (1, 5) => offsets([1, -1, -2, -3, -4, -5]),
        (6, 0) => offsets([1, 2, 3, 4, 5, 6]),
        (0, 6) => offsets([-1, -2, -3, -4, -5, -6]),
        (succ, pred) => {
            // both sides small: fill each half outward from the center,
            // larger side first
            let mut slots = [None; 6];
            if succ >= pred {
                for i in 0..succ {
                    slots[3 + i] = Some(i as isize + 1);
                }
                for i in 0..pred {
                    slots[2 - i] = Some(-(i as isize) - 1);
                }
            } else {
                for i in 0..pred {
                    slots[3 + i] = Some(-(i as isize) - 1);
                }
                for i in 0..succ {
                    slots[2 - i] = Some(i as isize + 1);
                }
            }
            slots
        }
    }
}

fn offsets(raw: [isize; 6]) -> [Option<isize>; 6] {
    raw.map(|o| (o != 0).then_some(o))
}

/// Resolves the slot offsets of `v` to neighbor vertices.
pub(crate) fn slot_neighbors(
    ordered: &[usize],
    at: usize,
    ty: (usize, usize),
) -> [Option<usize>; 6] {
    slot_offsets(ty).map(|slot| slot.map(|offset| ordered[(at as isize + offset) as usize]))
}
