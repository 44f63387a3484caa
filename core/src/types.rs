/// Single board axis, used for cell coordinates and grid extents.
pub type Coord = u16;

/// Area-scale counter, used for mine and cell totals.
pub type CellCount = u32;

/// Board position `(x, y)`.
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

pub const fn area(width: Coord, height: Coord) -> CellCount {
    let width = width as CellCount;
    let height = height as CellCount;
    width.saturating_mul(height)
}

/// Offsets of the 8-connected neighborhood, row-major with the center skipped.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the in-bounds 8-connected neighbors of `center`, fewer at borders
/// and corners, always in the same fixed order.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    let (cx, cy) = (i32::from(center.0), i32::from(center.1));
    let (width, height) = (i32::from(bounds.0), i32::from(bounds.1));

    NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
        let (nx, ny) = (cx + dx, cy + dy);
        (nx >= 0 && nx < width && ny >= 0 && ny < height).then(|| (nx as Coord, ny as Coord))
    })
}
