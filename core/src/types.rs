use ndarray::Array2;

/// Single board axis used for widths, heights, and positions.
pub type Coord = u8;

/// Count type for mines and total-cell counts.
pub type CellCount = u16;

/// Board position as `(x, y)`.
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

/// Relative displacements of the 8-neighborhood, fixed scan order.
const DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Shifts `center` by `delta`, returning the result only while it stays inside `bounds`.
fn shifted(center: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let x = center.0.checked_add_signed(delta.0)?;
    let y = center.1.checked_add_signed(delta.1)?;
    (x < bounds.0 && y < bounds.1).then_some((x, y))
}

/// Yields the at-most-8 in-bounds coordinates adjacent to `center`, diagonals
/// included, in a deterministic order.
pub fn iter_neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DELTAS
        .iter()
        .filter_map(move |&delta| shifted(center, delta, bounds))
}

/// Yields every board coordinate in row-major order: `y` outer, `x` inner.
pub fn iter_coords(bounds: Coord2) -> impl Iterator<Item = Coord2> {
    let (x_end, y_end) = bounds;
    (0..y_end).flat_map(move |y| (0..x_end).map(move |x| (x, y)))
}

pub trait NeighborIterExt {
    fn bounds(&self) -> Coord2;

    fn iter_neighbors(&self, center: Coord2) -> impl Iterator<Item = Coord2> {
        iter_neighbors(center, self.bounds())
    }
}

impl<T> NeighborIterExt for Array2<T> {
    fn bounds(&self) -> Coord2 {
        let dim = self.dim();
        (
            dim.0.try_into().expect("board axis must fit in a Coord"),
            dim.1.try_into().expect("board axis must fit in a Coord"),
        )
    }
}
