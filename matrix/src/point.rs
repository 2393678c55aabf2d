use derive_more::{Display, From, Into};

/// A `(row, col)` cell address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[display(fmt = "({}, {})", row, col)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighboring cell in `direction`, if it lies inside a `rows x cols` grid.
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Self> {
        let (di, dj) = direction.offset();
        let row = self.row.checked_add_signed(di).filter(|row| *row < rows)?;
        let col = self.col.checked_add_signed(dj).filter(|col| *col < cols)?;
        Some(Self { row, col })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    LeftUp,
    RightUp,
    LeftDown,
    RightDown,
}

impl Direction {
    /// Orthogonal neighbors, clockwise from the top.
    pub const ADJACENT4: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// All neighbors, clockwise from the top-left corner.
    pub const ADJACENT8: [Self; 8] = [
        Self::LeftUp,
        Self::Up,
        Self::RightUp,
        Self::Right,
        Self::RightDown,
        Self::Down,
        Self::LeftDown,
        Self::Left,
    ];

    /// `(row, col)` delta of one step.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::LeftUp => (-1, -1),
            Self::RightUp => (-1, 1),
            Self::LeftDown => (1, -1),
            Self::RightDown => (1, 1),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::point::{Direction, Point};

    #[test]
    fn step_stays_in_grid() {
        let corner = Point::new(0, 0);
        assert_eq!(corner.step(Direction::Up, 3, 3), None);
        assert_eq!(corner.step(Direction::LeftDown, 3, 3), None);
        assert_eq!(corner.step(Direction::RightDown, 3, 3), Some(Point::new(1, 1)));

        let far = Point::new(2, 2);
        assert_eq!(far.step(Direction::Down, 3, 3), None);
        assert_eq!(far.step(Direction::Right, 3, 3), None);
        assert_eq!(far.step(Direction::LeftUp, 3, 3), Some(Point::new(1, 1)));
    }

    #[test]
    fn offsets_are_distinct_unit_steps() {
        let offsets = Direction::ADJACENT8.map(Direction::offset);
        assert!(offsets.iter().all(|(di, dj)| di.abs() <= 1 && dj.abs() <= 1));
        assert!(offsets.iter().all(|offset| *offset != (0, 0)));
        assert!(offsets
            .iter()
            .enumerate()
            .all(|(k, offset)| !offsets[k + 1..].contains(offset)));
    }

    #[test]
    fn conversions() {
        let point = Point::from((4, 7));
        assert_eq!(point.to_string(), "(4, 7)");
        assert_eq!(<(usize, usize)>::from(point), (4, 7));
    }
}
