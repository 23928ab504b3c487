use crate::cell::BodyCell;
use crate::shape::AABB;
use crate::Vector2;
use fnv::FnvHashMap;

pub type CellIdx = (i32, i32);

/// SparseStorage stores cells in a HashMap keyed by cell coordinates.
/// It is sparse because cells are allocated on demand and dropped when they are empty.
#[derive(Clone)]
pub struct SparseStorage {
    cell_size: i32,
    cells: FnvHashMap<CellIdx, BodyCell>,
}

impl SparseStorage {
    pub fn new(cell_size: i32) -> Self {
        assert!(
            cell_size > 0,
            "Cell size ({}) cannot be less than or equal to zero",
            cell_size
        );
        Self {
            cell_size,
            cells: Default::default(),
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn cells(&self) -> &FnvHashMap<CellIdx, BodyCell> {
        &self.cells
    }

    pub fn cell(&self, id: CellIdx) -> Option<&BodyCell> {
        self.cells.get(&id)
    }

    pub fn cell_mut(&mut self, id: CellIdx) -> &mut BodyCell {
        self.cells.entry(id).or_default()
    }

    /// Applies `f` to the cell if it exists, dropping it afterwards if it became empty.
    pub fn modify(&mut self, id: CellIdx, f: impl FnOnce(&mut BodyCell)) {
        if let Some(cell) = self.cells.get_mut(&id) {
            f(cell);
            if cell.objs.is_empty() {
                self.cells.remove(&id);
            }
        }
    }

    pub fn cell_id(&self, pos: Vector2) -> CellIdx {
        let cs = self.cell_size as f32;
        ((pos.x / cs).floor() as i32, (pos.y / cs).floor() as i32)
    }

    pub fn cell_aabb(&self, (x, y): CellIdx) -> AABB {
        let cs = self.cell_size as f32;
        let ll = Vector2::new(x as f32 * cs, y as f32 * cs);
        AABB::new(ll, Vector2::new(ll.x + cs, ll.y + cs))
    }

    /// Ids of all cells covered by `bbox`.
    pub fn cells_covering(&self, bbox: &AABB) -> XYRange {
        cell_range(self.cell_id(bbox.ll), self.cell_id(bbox.ur))
    }
}

/// Inclusive range of cells from `(x1, y1)` to `(x2, y2)`, row by row.
/// Bounds may be `i32::MAX` since iteration is done in `i64`.
pub fn cell_range((x1, y1): CellIdx, (x2, y2): CellIdx) -> XYRange {
    XYRange {
        x1: x1 as i64,
        y1: y1 as i64,
        x2: x2 as i64 + 1,
        y2: y2 as i64 + 1,
        x: x1 as i64,
        y: y1 as i64,
    }
}

pub struct XYRange {
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    x: i64,
    y: i64,
}

impl XYRange {
    /// Total number of cells in the range, regardless of iteration progress.
    pub fn area(&self) -> u64 {
        let w = (self.x2 - self.x1).max(0) as u64;
        let h = (self.y2 - self.y1).max(0) as u64;
        w * h
    }
}

impl Iterator for XYRange {
    type Item = CellIdx;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.y2 || self.x1 >= self.x2 {
            return None;
        }

        let v = (self.x as i32, self.y as i32);
        self.x += 1;
        if self.x == self.x2 {
            self.x = self.x1;
            self.y += 1;
        }

        Some(v)
    }
}
