//! Sparse paint store and grid-plane geometry.

use std::collections::BTreeMap;

use gridwalk_core::{
    CellClass, CellCoord, Classification, Color, GridSnapshot, GridSnapshotCell,
};

pub(crate) const DEFAULT_GRID_SIZE: u32 = 20;
pub(crate) const DEFAULT_CELL_SIZE: f32 = 1.0;
pub(crate) const DEFAULT_GRID_HEIGHT: f32 = 0.1;

/// Geometry of the grid plane: edge length in cells, cell size and height in
/// world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    size: u32,
    cell_size: f32,
    grid_height: f32,
}

impl GridConfig {
    pub(crate) const fn new(size: u32, cell_size: f32, grid_height: f32) -> Self {
        Self {
            size,
            cell_size,
            grid_height,
        }
    }

    /// Number of cells along each edge of the square grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Edge length of a single cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Height of the grid plane above the world origin.
    #[must_use]
    pub const fn grid_height(&self) -> f32 {
        self.grid_height
    }

    /// Reports whether the coordinate lies within the grid bounds.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x() < self.size && cell.z() < self.size
    }

    /// Centre of the cell on the grid plane, in world units. The grid is
    /// centred on the world origin.
    #[must_use]
    pub fn world_pos_from_cell(&self, cell: CellCoord) -> (f32, f32) {
        let half = self.size as f32 / 2.0;
        let x = (cell.x() as f32 - half) * self.cell_size + self.cell_size * 0.5;
        let z = (cell.z() as f32 - half) * self.cell_size + self.cell_size * 0.5;
        (x, z)
    }

    /// Cell containing the provided world-plane position, or `None` when the
    /// position falls outside the grid.
    #[must_use]
    pub fn cell_from_world_pos(&self, x: f32, z: f32) -> Option<CellCoord> {
        if self.cell_size <= 0.0 {
            return None;
        }
        let half = self.size as f32 / 2.0;
        let grid_x = (x / self.cell_size + half).floor();
        let grid_z = (z / self.cell_size + half).floor();
        if grid_x < 0.0 || grid_z < 0.0 || grid_x >= self.size as f32 || grid_z >= self.size as f32
        {
            return None;
        }
        Some(CellCoord::new(grid_x as u32, grid_z as u32))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_CELL_SIZE, DEFAULT_GRID_HEIGHT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PaintedCell {
    pub(crate) classification: Classification,
    pub(crate) color: Color,
}

/// Sparse store of painted cell classifications over the bounded grid.
///
/// Keys are ordered so snapshots and event emission stay deterministic.
#[derive(Clone, Debug, Default)]
pub(crate) struct GridModel {
    config: GridConfig,
    cells: BTreeMap<CellCoord, PaintedCell>,
}

impl GridModel {
    pub(crate) fn new(config: GridConfig) -> Self {
        Self {
            config,
            cells: BTreeMap::new(),
        }
    }

    pub(crate) const fn config(&self) -> GridConfig {
        self.config
    }

    /// Replaces the grid geometry, dropping paint that falls out of bounds.
    pub(crate) fn reconfigure(&mut self, config: GridConfig) {
        self.config = config;
        self.cells.retain(|cell, _| config.contains(*cell));
    }

    /// Stores a paint entry, overwriting any previous one. Out-of-bounds
    /// coordinates are a silent no-op; returns whether the entry was stored.
    pub(crate) fn paint(
        &mut self,
        cell: CellCoord,
        classification: Classification,
        color: Color,
    ) -> bool {
        if !self.config.contains(cell) {
            return false;
        }
        let _ = self.cells.insert(
            cell,
            PaintedCell {
                classification,
                color,
            },
        );
        true
    }

    /// Removes a paint entry, reverting the cell to `Empty`. Returns whether
    /// an entry was present.
    pub(crate) fn erase(&mut self, cell: CellCoord) -> bool {
        self.cells.remove(&cell).is_some()
    }

    /// Removes every paint entry and reports how many were stored.
    pub(crate) fn clear(&mut self) -> usize {
        let cleared = self.cells.len();
        self.cells.clear();
        cleared
    }

    pub(crate) fn classification(&self, cell: CellCoord) -> CellClass {
        if !self.config.contains(cell) {
            return CellClass::OutOfBounds;
        }
        let classification = self
            .cells
            .get(&cell)
            .map_or(Classification::Empty, |painted| painted.classification);
        CellClass::Terrain(classification)
    }

    pub(crate) fn color(&self, cell: CellCoord) -> Color {
        self.cells.get(&cell).map_or_else(
            || Classification::Empty.default_color(),
            |painted| painted.color,
        )
    }

    pub(crate) fn can_enter(&self, cell: CellCoord) -> bool {
        self.classification(cell).allows_entry()
    }

    pub(crate) fn painted_len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            grid_size: self.config.size,
            cell_size: self.config.cell_size,
            grid_height: self.config.grid_height,
            cells: self
                .cells
                .iter()
                .map(|(cell, painted)| GridSnapshotCell {
                    cell: *cell,
                    classification: painted.classification,
                    color: painted.color,
                })
                .collect(),
        }
    }

    /// Replaces the entire paint state and geometry from a snapshot.
    /// Out-of-bounds snapshot cells are dropped; returns `(painted, dropped)`.
    pub(crate) fn replace(&mut self, snapshot: GridSnapshot) -> (usize, usize) {
        self.config = GridConfig::new(
            snapshot.grid_size,
            snapshot.cell_size,
            snapshot.grid_height,
        );
        self.cells.clear();

        let mut dropped = 0;
        for entry in snapshot.cells {
            if self.paint(entry.cell, entry.classification, entry.color) {
                continue;
            }
            dropped += 1;
        }
        (self.cells.len(), dropped)
    }
}

/// Enumerates the in-bounds cells of a square brush centred on a cell.
///
/// The brush spans `center ± brush / 2` on both axes; the part of the brush
/// that hangs off the grid is clipped, even when the centre itself is
/// out of bounds.
pub(crate) fn brush_cells(center: CellCoord, brush: u32, grid_size: u32) -> Vec<CellCoord> {
    let half = brush / 2;
    let start_x = center.x().saturating_sub(half);
    let end_x = center.x().saturating_add(half);
    let start_z = center.z().saturating_sub(half);
    let end_z = center.z().saturating_add(half);

    let mut cells = Vec::new();
    for x in start_x..=end_x {
        if x >= grid_size {
            continue;
        }
        for z in start_z..=end_z {
            if z >= grid_size {
                continue;
            }
            cells.push(CellCoord::new(x, z));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(size: u32) -> GridModel {
        GridModel::new(GridConfig::new(size, 1.0, 0.1))
    }

    #[test]
    fn classification_reports_out_of_bounds_regardless_of_paint_history() {
        let mut grid = model(4);
        assert!(grid.paint(
            CellCoord::new(3, 3),
            Classification::Walkable,
            Color::from_hex(0x0000_ff00),
        ));
        assert_eq!(
            grid.classification(CellCoord::new(4, 0)),
            CellClass::OutOfBounds
        );
        assert_eq!(
            grid.classification(CellCoord::new(0, 4)),
            CellClass::OutOfBounds
        );
        assert_eq!(
            grid.classification(CellCoord::new(3, 3)),
            CellClass::Terrain(Classification::Walkable)
        );
        assert_eq!(
            grid.classification(CellCoord::new(0, 0)),
            CellClass::Terrain(Classification::Empty)
        );
    }

    #[test]
    fn paint_out_of_bounds_is_a_silent_no_op() {
        let mut grid = model(2);
        assert!(!grid.paint(
            CellCoord::new(2, 0),
            Classification::Walkable,
            Color::from_hex(0),
        ));
        assert_eq!(grid.painted_len(), 0);
    }

    #[test]
    fn last_paint_wins() {
        let mut grid = model(3);
        let cell = CellCoord::new(1, 1);
        assert!(grid.paint(cell, Classification::Walkable, Color::from_hex(1)));
        assert!(grid.paint(cell, Classification::Water, Color::from_hex(2)));
        assert_eq!(
            grid.classification(cell),
            CellClass::Terrain(Classification::Water)
        );
        assert_eq!(grid.color(cell), Color::from_hex(2));
        assert_eq!(grid.painted_len(), 1);
    }

    #[test]
    fn erase_reverts_to_empty_and_repeats_are_no_ops() {
        let mut grid = model(3);
        let cell = CellCoord::new(2, 0);
        assert!(grid.paint(cell, Classification::Danger, Color::from_hex(3)));
        assert!(grid.erase(cell));
        assert_eq!(
            grid.classification(cell),
            CellClass::Terrain(Classification::Empty)
        );
        assert!(!grid.erase(cell));
    }

    #[test]
    fn traversal_rule_blocks_everything_but_walkable_and_portals() {
        let mut grid = model(6);
        let entries = [
            (CellCoord::new(0, 0), Classification::Walkable, true),
            (CellCoord::new(1, 0), Classification::Blocked, true),
            (CellCoord::new(2, 0), Classification::Water, false),
            (CellCoord::new(3, 0), Classification::Danger, false),
            (CellCoord::new(4, 0), Classification::Special, false),
        ];
        for (cell, classification, _) in entries {
            assert!(grid.paint(cell, classification, classification.default_color()));
        }
        for (cell, _, expected) in entries {
            assert_eq!(grid.can_enter(cell), expected);
        }
        assert!(!grid.can_enter(CellCoord::new(5, 0)), "empty cell");
        assert!(!grid.can_enter(CellCoord::new(6, 0)), "out of bounds");
    }

    #[test]
    fn snapshot_replace_round_trips_every_in_bounds_cell() {
        let mut grid = model(5);
        assert!(grid.paint(
            CellCoord::new(0, 4),
            Classification::Special,
            Color::from_hex(0x00ff_00ff),
        ));
        assert!(grid.paint(
            CellCoord::new(2, 1),
            Classification::Blocked,
            Color::from_hex(0x00ff_0000),
        ));

        let snapshot = grid.snapshot();
        let mut restored = model(1);
        assert_eq!(restored.replace(snapshot.clone()), (2, 0));
        assert_eq!(restored.config().size(), 5);
        for x in 0..5 {
            for z in 0..5 {
                let cell = CellCoord::new(x, z);
                assert_eq!(grid.classification(cell), restored.classification(cell));
            }
        }
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn replace_drops_out_of_bounds_snapshot_cells() {
        let snapshot = GridSnapshot {
            grid_size: 2,
            cell_size: 1.0,
            grid_height: 0.0,
            cells: vec![
                GridSnapshotCell {
                    cell: CellCoord::new(1, 1),
                    classification: Classification::Walkable,
                    color: Color::from_hex(1),
                },
                GridSnapshotCell {
                    cell: CellCoord::new(2, 1),
                    classification: Classification::Walkable,
                    color: Color::from_hex(1),
                },
            ],
        };
        let mut grid = model(10);
        assert_eq!(grid.replace(snapshot), (1, 1));
    }

    #[test]
    fn reconfigure_retains_in_bounds_paint_only() {
        let mut grid = model(6);
        assert!(grid.paint(CellCoord::new(1, 1), Classification::Walkable, Color::from_hex(1)));
        assert!(grid.paint(CellCoord::new(5, 5), Classification::Walkable, Color::from_hex(1)));
        grid.reconfigure(GridConfig::new(3, 1.0, 0.1));
        assert_eq!(grid.painted_len(), 1);
        assert_eq!(
            grid.classification(CellCoord::new(5, 5)),
            CellClass::OutOfBounds
        );
    }

    #[test]
    fn world_position_mapping_is_centred_on_the_origin() {
        let config = GridConfig::new(4, 2.0, 0.1);
        assert_eq!(config.world_pos_from_cell(CellCoord::new(0, 0)), (-3.0, -3.0));
        assert_eq!(config.world_pos_from_cell(CellCoord::new(3, 3)), (3.0, 3.0));
        assert_eq!(
            config.cell_from_world_pos(-3.0, 3.0),
            Some(CellCoord::new(0, 3))
        );
        assert_eq!(config.cell_from_world_pos(4.1, 0.0), None);
    }

    #[test]
    fn brush_clips_to_bounds() {
        let cells = brush_cells(CellCoord::new(0, 0), 3, 4);
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1),
            ]
        );

        let full = brush_cells(CellCoord::new(2, 2), 3, 10);
        assert_eq!(full.len(), 9);

        let off_grid_center = brush_cells(CellCoord::new(4, 2), 3, 4);
        assert_eq!(off_grid_center, vec![CellCoord::new(3, 1), CellCoord::new(3, 2), CellCoord::new(3, 3)]);
    }

    #[test]
    fn single_cell_brush_paints_the_centre_only() {
        assert_eq!(brush_cells(CellCoord::new(2, 2), 1, 5), vec![CellCoord::new(2, 2)]);
    }
}
