use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The board dimension must be at least 1.
    #[error("board size must be positive")]
    InvalidSize,
}

/// Placement state of one `size` x `size` chessboard.
///
/// Queens live one per row: `solution[y]` holds the column of the queen in
/// row `y`, or `None` while the row is empty. Three boolean tracks mirror
/// the columns and diagonals occupied by placed queens, so a conflict check
/// is a constant-time lookup instead of a scan. The tracks are a derived
/// cache of `solution` and every mutation goes through [`Board::place`] /
/// [`Board::remove`] to keep them in lockstep.
///
/// All backing storage is owned `Vec`s sized at construction; [`Board::reset`]
/// reuses it between search episodes and dropping the board releases it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Offset added to `y - x` so rising-diagonal indexes start at zero.
    shift: usize,
    solution: Vec<Option<usize>>,
    col_free: Vec<bool>,
    rising_free: Vec<bool>,
    falling_free: Vec<bool>,
}

impl Board {
    /// Create an empty board. Fails on `size == 0`; `is_complete` reads the
    /// last row, so a zero-capacity board would index out of bounds.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize);
        }
        Ok(Self {
            size,
            shift: size - 1,
            solution: vec![None; size],
            col_free: vec![true; size],
            rising_free: vec![true; 2 * size - 1],
            falling_free: vec![true; 2 * size - 1],
        })
    }

    /// Board dimension (and queen count of a full solution).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Restore the all-unplaced state without reallocating backing storage.
    pub fn reset(&mut self) {
        self.solution.fill(None);
        self.col_free.fill(true);
        self.rising_free.fill(true);
        self.falling_free.fill(true);
    }

    /// Index of the rising diagonal (bottom-left to top-right) through
    /// `(x, y)`. Written `y + shift - x` to stay in `usize`.
    fn rising_diag(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size);
        y + self.shift - x
    }

    /// Index of the falling diagonal (top-left to bottom-right) through
    /// `(x, y)`.
    fn falling_diag(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size);
        y + x
    }

    /// True iff no placed queen attacks `(x, y)` through its column or
    /// either diagonal. Pure query; rows are not checked because the search
    /// fills each row at most once.
    pub fn can_place(&self, x: usize, y: usize) -> bool {
        self.col_free[x]
            && self.rising_free[self.rising_diag(x, y)]
            && self.falling_free[self.falling_diag(x, y)]
    }

    /// Put a queen on `(x, y)`.
    ///
    /// Precondition: `can_place(x, y)` holds and row `y` is empty. Checked
    /// in debug builds only; release builds trust the caller.
    pub fn place(&mut self, x: usize, y: usize) {
        debug_assert!(
            self.can_place(x, y),
            "queen placed on attacked square ({x}, {y})"
        );
        debug_assert!(self.solution[y].is_none(), "row {y} already holds a queen");
        self.solution[y] = Some(x);
        self.col_free[x] = false;
        let rising = self.rising_diag(x, y);
        let falling = self.falling_diag(x, y);
        self.rising_free[rising] = false;
        self.falling_free[falling] = false;
    }

    /// Take the queen off `(x, y)`, freeing its column and diagonals.
    ///
    /// Precondition: a queen was previously placed at exactly `(x, y)`.
    pub fn remove(&mut self, x: usize, y: usize) {
        debug_assert_eq!(
            self.solution[y],
            Some(x),
            "no queen at ({x}, {y}) to remove"
        );
        self.solution[y] = None;
        self.col_free[x] = true;
        let rising = self.rising_diag(x, y);
        let falling = self.falling_diag(x, y);
        self.rising_free[rising] = true;
        self.falling_free[falling] = true;
    }

    /// True iff the last row holds a queen.
    ///
    /// Both search strategies fill rows in increasing order, so a queen in
    /// the last row implies every row is filled. This is an invariant of the
    /// search process, not a general queen count.
    pub fn is_complete(&self) -> bool {
        self.solution[self.size - 1].is_some()
    }

    /// The column of each row's queen, in row order, once every row is
    /// placed. `None` while the placement is still partial.
    pub fn solution(&self) -> Option<Vec<usize>> {
        self.solution.iter().copied().collect()
    }

    /// Full validity check computed from the solution sequence alone,
    /// independent of the incremental free tracks: complete, and no two
    /// queens share a column or diagonal.
    pub fn is_valid_solution(&self) -> bool {
        let Some(cols) = self.solution() else {
            return false;
        };
        for y1 in 0..cols.len() {
            for y2 in y1 + 1..cols.len() {
                let dx = cols[y1].abs_diff(cols[y2]);
                if dx == 0 || dx == y2 - y1 {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_all_free() {
        let board = Board::new(8).unwrap();
        for x in 0..8 {
            for y in 0..8 {
                assert!(board.can_place(x, y), "({x}, {y}) should start free");
            }
        }
        assert!(!board.is_complete());
        assert_eq!(board.solution(), None);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(Board::new(0), Err(BoardError::InvalidSize));
    }

    #[test]
    fn place_blocks_column_and_diagonals() {
        let mut board = Board::new(5).unwrap();
        board.place(2, 0);

        // Same column.
        assert!(!board.can_place(2, 3));
        // Falling diagonal: (1, 1) shares x + y with (2, 0).
        assert!(!board.can_place(1, 1));
        // Rising diagonal: (3, 1) shares y - x with (2, 0).
        assert!(!board.can_place(3, 1));
        // Untouched square.
        assert!(board.can_place(0, 1));
    }

    #[test]
    fn well_nested_place_remove_unwinds_to_fresh() {
        let fresh = Board::new(6).unwrap();
        let mut board = fresh.clone();

        board.place(1, 0);
        board.place(3, 1);
        board.place(5, 2);
        board.remove(5, 2);
        board.remove(3, 1);
        board.remove(1, 0);

        assert_eq!(board, fresh);
    }

    #[test]
    fn reset_restores_fresh_state() {
        let fresh = Board::new(4).unwrap();
        let mut board = fresh.clone();
        board.place(1, 0);
        board.place(3, 1);
        board.reset();
        assert_eq!(board, fresh);
    }

    #[test]
    fn complete_board_reads_out_in_row_order() {
        let mut board = Board::new(4).unwrap();
        for (y, x) in [1, 3, 0, 2].into_iter().enumerate() {
            assert!(board.can_place(x, y));
            board.place(x, y);
        }
        assert!(board.is_complete());
        assert_eq!(board.solution(), Some(vec![1, 3, 0, 2]));
        assert!(board.is_valid_solution());
    }

    #[test]
    fn validity_check_is_independent_of_tracking() {
        // A single queen on a 1x1 board is the smallest valid solution.
        let mut board = Board::new(1).unwrap();
        board.place(0, 0);
        assert!(board.is_valid_solution());

        // Partial placements are never valid solutions.
        let mut board = Board::new(4).unwrap();
        board.place(1, 0);
        assert!(!board.is_valid_solution());
    }

    #[test]
    fn board_serializes_round_trip() {
        let mut board = Board::new(4).unwrap();
        board.place(1, 0);
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
