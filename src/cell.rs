use crate::world::BodyHandle;

/// A handle stored in a cell, with whether the body fits in that single cell.
pub type CellObject = (BodyHandle, bool);

/// A single cell of the world grid, can be empty
#[derive(Default, Clone, Debug)]
pub struct BodyCell {
    pub objs: Vec<CellObject>,
}

impl BodyCell {
    pub fn push(&mut self, handle: BodyHandle, single_cell: bool) {
        self.objs.push((handle, single_cell));
    }

    /// Removes `handle` from the cell, order is not preserved.
    pub fn remove(&mut self, handle: BodyHandle) -> bool {
        match self.objs.iter().position(|(x, _)| *x == handle) {
            Some(p) => {
                self.objs.swap_remove(p);
                true
            }
            None => false,
        }
    }
}
