use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u16;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts caller-supplied signed coordinates into board coordinates, `None` when outside `size`.
pub fn checked_coords(row: i64, col: i64, size: Coord2) -> Option<Coord2> {
    let row = Coord::try_from(row).ok()?;
    let col = Coord::try_from(col).ok()?;
    (row < size.0 && col < size.1).then_some((row, col))
}

/// Flat row-major index of `coords`, matching the standard layout of an `Array2`.
pub(crate) fn flat_index(coords: Coord2, size: Coord2) -> usize {
    usize::from(coords.0) * usize::from(size.1) + usize::from(coords.1)
}

/// Inverse of [`flat_index`].
pub(crate) fn from_flat_index(index: usize, size: Coord2) -> Coord2 {
    let cols = usize::from(size.1);
    // both parts are bounded by the size, which already fits a `Coord`
    ((index / cols) as Coord, (index % cols) as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // arrays are only ever built from a `Coord2` size
        NeighborIter::new(index, (rows as Coord, cols as Coord))
    }
}

const DISPLACEMENTS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i32, i32), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(dr.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dc.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the up to 8 grid-adjacent cells of `center`, clipped to `bounds`.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(NeighborIter::new((0, 1), (3, 3)).count(), 5);
        assert_eq!(NeighborIter::new((1, 2), (3, 3)).count(), 5);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn checked_coords_rejects_negative_and_oversized() {
        assert_eq!(checked_coords(-1, 0, (3, 4)), None);
        assert_eq!(checked_coords(0, -5, (3, 4)), None);
        assert_eq!(checked_coords(3, 0, (3, 4)), None);
        assert_eq!(checked_coords(0, 4, (3, 4)), None);
        assert_eq!(checked_coords(i64::MAX, i64::MIN, (3, 4)), None);
        assert_eq!(checked_coords(2, 3, (3, 4)), Some((2, 3)));
    }

    #[test]
    fn flat_index_round_trips_through_row_major_order() {
        let size = (3, 4);
        assert_eq!(flat_index((0, 0), size), 0);
        assert_eq!(flat_index((1, 0), size), 4);
        assert_eq!(flat_index((2, 3), size), 11);
        assert_eq!(from_flat_index(7, size), (1, 3));
    }
}
