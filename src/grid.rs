use glam::Vec2;

/// Uniform grid used to prune the pairwise distance scan.
///
/// With the cell size set to the connection distance, every pair closer than
/// that distance sits in the same or an adjacent cell, so scanning the 3x3
/// neighborhood of a node finds all of its connection candidates. Positions
/// outside the surface clamp to the border cells; that keeps nodes on a
/// transient out-of-bounds excursion reachable, and stays exact as long as
/// the excursion is smaller than one cell.
pub struct SpatialGrid {
    cells: Vec<Vec<usize>>,
    cols: usize,
    rows: usize,
    cell_size: f32,
}

impl SpatialGrid {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be positive and finite"
        );

        let cols = (width / cell_size).ceil().max(1.0) as usize;
        let rows = (height / cell_size).ceil().max(1.0) as usize;
        Self {
            cells: vec![vec![]; cols * rows],
            cols,
            rows,
            cell_size,
        }
    }

    pub fn insert(&mut self, index: usize, position: Vec2) {
        let (col, row) = self.cell_of(position);
        self.cells[row * self.cols + col].push(index);
    }

    /// All indices stored in the 3x3 cell neighborhood around `position`.
    /// A superset of the indices within `cell_size` of it.
    pub fn neighborhood(&self, position: Vec2) -> Vec<usize> {
        let (col, row) = self.cell_of(position);
        let col_hi = (col + 1).min(self.cols - 1);
        let row_hi = (row + 1).min(self.rows - 1);

        let mut indices = vec![];
        for r in row.saturating_sub(1)..=row_hi {
            for c in col.saturating_sub(1)..=col_hi {
                indices.extend_from_slice(&self.cells[r * self.cols + c]);
            }
        }
        indices
    }

    fn cell_of(&self, position: Vec2) -> (usize, usize) {
        let col = (position.x / self.cell_size).floor() as isize;
        let row = (position.y / self.cell_size).floor() as isize;
        (
            col.clamp(0, self.cols as isize - 1) as usize,
            row.clamp(0, self.rows as isize - 1) as usize,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn neighborhood_covers_adjacent_cells_only() {
        let mut grid = SpatialGrid::new(450.0, 450.0, 150.0);
        grid.insert(0, Vec2::new(10.0, 10.0));
        grid.insert(1, Vec2::new(200.0, 10.0));
        grid.insert(2, Vec2::new(430.0, 430.0));

        let near_origin = grid.neighborhood(Vec2::new(20.0, 20.0));
        assert!(near_origin.contains(&0));
        assert!(near_origin.contains(&1));
        assert!(!near_origin.contains(&2));

        let far_corner = grid.neighborhood(Vec2::new(440.0, 440.0));
        assert_eq!(far_corner, vec![2]);
    }

    #[test]
    fn out_of_bounds_positions_clamp_to_border_cells() {
        let mut grid = SpatialGrid::new(300.0, 300.0, 150.0);
        grid.insert(0, Vec2::new(-0.3, 10.0));

        assert_eq!(grid.neighborhood(Vec2::new(5.0, 5.0)), vec![0]);
    }

    #[test]
    fn surface_smaller_than_one_cell_still_works() {
        let mut grid = SpatialGrid::new(80.0, 40.0, 150.0);
        grid.insert(0, Vec2::new(10.0, 10.0));
        grid.insert(1, Vec2::new(70.0, 30.0));

        let all = grid.neighborhood(Vec2::new(40.0, 20.0));
        assert_eq!(all, vec![0, 1]);
    }
}
