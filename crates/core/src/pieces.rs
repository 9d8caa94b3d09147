//! Pieces module - Tetromino shape matrices and SRS rotation system
//!
//! Shapes are square boolean matrices (2x2 for O, 3x3 for J/L/S/T/Z, 4x4 for I).
//! Rotating the matrix about its centre yields the SRS rotation states, and
//! wall kicks follow the guideline offset tables.
//! Reference: https://tetris.wiki/SRS

use arrayvec::ArrayVec;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Largest matrix side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece, `cells[row][col]`
///
/// Only the top-left `size x size` block is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Build from rows of 0/1; the matrix side is the number of rows.
    ///
    /// Panics if the rows are not square or larger than 4x4. Only used with
    /// the static spawn tables and in tests.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(size <= MAX_SHAPE_SIZE, "shape larger than 4x4");
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape must be square");
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Rotation-0 shape of a piece kind
    pub fn spawn(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]),
            PieceKind::J => Self::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::L => Self::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::O => Self::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::S => Self::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            PieceKind::T => Self::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::Z => Self::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at (col, row) is occupied
    pub fn get(&self, col: usize, row: usize) -> bool {
        col < self.size() && row < self.size() && self.cells[row][col]
    }

    /// Occupied cells as `(dx, dy)` offsets from the top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Number of empty rows above the first occupied one
    pub fn top_padding(&self) -> usize {
        let n = self.size();
        self.cells[..n]
            .iter()
            .take_while(|row| row[..n].iter().all(|&c| !c))
            .count()
    }

    /// The matrix rotated 90° about its centre
    pub fn rotated(&self, clockwise: bool) -> Self {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                if clockwise {
                    cells[x][n - 1 - y] = self.cells[y][x];
                } else {
                    cells[n - 1 - x][y] = self.cells[y][x];
                }
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Rows of 0/1, for display and serialization
    pub fn rows(&self) -> Vec<Vec<u8>> {
        let n = self.size();
        self.cells[..n]
            .iter()
            .map(|row| row[..n].iter().map(|&c| c as u8).collect())
            .collect()
    }
}

impl Serialize for ShapeMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let n = self.size();
        let mut seq = serializer.serialize_seq(Some(n))?;
        for row in &self.cells[..n] {
            let bits: ArrayVec<u8, MAX_SHAPE_SIZE> = row[..n].iter().map(|&c| c as u8).collect();
            seq.serialize_element(bits.as_slice())?;
        }
        seq.end()
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Shape in the current rotation
    pub matrix: ShapeMatrix,
    pub rotation: Rotation,
    /// Column of the matrix's left edge
    pub x: i8,
    /// Row of the matrix's top edge; negative while above the board
    pub y: i8,
}

impl Tetromino {
    /// Fresh piece: rotation 0, centred horizontally, topmost occupied row on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = ShapeMatrix::spawn(kind);
        Self {
            kind,
            matrix,
            rotation: Rotation::North,
            x: ((BOARD_WIDTH as usize - matrix.size()) / 2) as i8,
            y: -(matrix.top_padding() as i8),
        }
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute board positions of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix.cells().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// SRS wall kick data
///
/// Offsets are in guideline notation: `+x` right, `+y` **up**. The board's
/// y axis grows downward, so an offset `(dx, dy)` is tried at `(x + dx, y - dy)`.
/// Order: 0 = plain rotation, 1-4 = wall kicks.
pub type KickTable = [[(i8, i8); 5]; 8];

/// Get kick table for a piece kind
/// Returns table indexed by [`kick_index`]
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// O piece never rotates; kept so every kind has a table
const O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table (different from JLSTZ)
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Row of the kick table for a rotation transition
pub fn kick_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,  // N->E
        (Rotation::North, false) => 1, // N->W
        (Rotation::East, false) => 2,  // E->N
        (Rotation::East, true) => 3,   // E->S
        (Rotation::South, false) => 4, // S->E
        (Rotation::South, true) => 5,  // S->W
        (Rotation::West, false) => 6,  // W->S
        (Rotation::West, true) => 7,   // W->N
    }
}

/// The five offsets tried for a transition, in guideline notation
pub fn kick_offsets(kind: PieceKind, from: Rotation, clockwise: bool) -> &'static [(i8, i8); 5] {
    &get_kick_table(kind)[kick_index(from, clockwise)]
}

/// Try to rotate a piece with wall kicks
///
/// `collides(shape, x, y)` is the placement test. Returns the rotated
/// placement for the first offset that fits, or None if the piece is an O
/// or every offset collides.
pub fn try_rotate(
    piece: &Tetromino,
    clockwise: bool,
    collides: impl Fn(&ShapeMatrix, i8, i8) -> bool,
) -> Option<Tetromino> {
    if piece.kind == PieceKind::O {
        return None;
    }

    let matrix = piece.matrix.rotated(clockwise);
    let rotation = piece.rotation.rotate(clockwise);

    kick_offsets(piece.kind, piece.rotation, clockwise)
        .iter()
        .map(|&(dx, dy)| (piece.x + dx, piece.y - dy))
        .find(|&(x, y)| !collides(&matrix, x, y))
        .map(|(x, y)| Tetromino {
            kind: piece.kind,
            matrix,
            rotation,
            x,
            y,
        })
}
