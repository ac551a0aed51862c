/// Position of a single map cell in grid coordinates.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Default)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Convert signed query coordinates into a cell coordinate.
    /// Returns `None` for negative components.
    pub fn from_signed(x: i64, y: i64) -> Option<Self> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        Some(Self { x, y })
    }

    /// Continuous sample position handed to the noise field.
    pub fn sample_pos(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coordinates_are_rejected() {
        assert_eq!(CellCoord::from_signed(-1, 0), None);
        assert_eq!(CellCoord::from_signed(0, -1), None);
        assert_eq!(CellCoord::from_signed(3, 4), Some(CellCoord::new(3, 4)));
    }
}
