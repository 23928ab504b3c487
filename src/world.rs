use crate::body::Body;
use crate::cell::CellObject;
use crate::collision::is_rotated_box_collision;
use crate::shape::AABB;
use crate::storage::SparseStorage;
use crate::Vector2;
use fnv::{FnvHashMap, FnvHashSet};
use log::debug;
use slotmapd::{new_key_type, SlotMap};

pub type WorldObjects<O> = SlotMap<BodyHandle, StoreObject<O>>;

/// Bodies and queries covering more cells than this bypass the grid.
const MAX_CELLS: u64 = 1024;

new_key_type! {
    /// This handle is used to modify the associated object or to update its body.
    /// It is returned by the _insert_ method of a BodyWorld.
    pub struct BodyHandle;
}

/// The actual object stored in the store
#[derive(Clone, Copy)]
pub struct StoreObject<O: Copy> {
    /// User-defined object to be associated with a value
    obj: O,
    pub body: Body,
}

/// BodyWorld keeps rotated rectangular bodies in a sparse uniform grid and answers
/// "what is touching this" questions with the rotated box test.
///
/// Each body is registered in every cell its bounding box covers, so queries only
/// run the exact test against bodies sharing a cell with the query.
/// Updates are eager: `set_body` and `remove` take effect immediately.
///
/// Bodies can carry string tags, which is how groups of bodies ("walls", "coins")
/// are queried together.
///
/// ```rust
/// use obb_collide::{Body, BodyWorld};
///
/// let mut w: BodyWorld<i32> = BodyWorld::new(10);
/// let player = w.insert(Body::new([0.0, 0.0], 2.0, 2.0), 0);
/// let coin = w.insert_with_tags(Body::new([1.5, 0.0], 1.0, 1.0), 1, ["coin"]);
/// let _far = w.insert_with_tags(Body::new([30.0, 0.0], 1.0, 1.0), 2, ["coin"]);
///
/// assert!(w.touching_any_with_tag(player, "coin"));
/// assert_eq!(w.touching(player).collect::<Vec<_>>(), vec![coin]);
///
/// assert_eq!(w.remove(coin), 1);
/// assert!(!w.touching_any(player));
/// ```
#[derive(Clone)]
pub struct BodyWorld<O: Copy> {
    storage: SparseStorage,
    objects: WorldObjects<O>,
    /// Bodies too large to be registered cell by cell, tested by every query.
    oversized: Vec<BodyHandle>,
    tags: FnvHashMap<String, Vec<BodyHandle>>,
}

impl<O: Copy> BodyWorld<O> {
    /// Creates an empty world.
    /// The cell size should be about the same magnitude as the bodies.
    pub fn new(cell_size: i32) -> Self {
        Self {
            storage: SparseStorage::new(cell_size),
            objects: SlotMap::with_key(),
            oversized: Vec::new(),
            tags: Default::default(),
        }
    }

    fn cells_insert(
        storage: &mut SparseStorage,
        oversized: &mut Vec<BodyHandle>,
        body: &Body,
        handle: BodyHandle,
    ) {
        let range = storage.cells_covering(&body.bbox());
        let area = range.area();
        if area > MAX_CELLS {
            oversized.push(handle);
            return;
        }
        for id in range {
            storage.cell_mut(id).push(handle, area == 1);
        }
    }

    fn cells_remove(
        storage: &mut SparseStorage,
        oversized: &mut Vec<BodyHandle>,
        body: &Body,
        handle: BodyHandle,
    ) {
        let range = storage.cells_covering(&body.bbox());
        if range.area() > MAX_CELLS {
            oversized.retain(|&h| h != handle);
            return;
        }
        for id in range {
            storage.modify(id, |cell| {
                cell.remove(handle);
            });
        }
    }

    /// Inserts a new body and its associated object.
    /// Returns the unique and stable handle to be used with get.
    pub fn insert(&mut self, body: Body, obj: O) -> BodyHandle {
        let Self {
            storage,
            objects,
            oversized,
            ..
        } = self;

        let h = objects.insert(StoreObject { obj, body });
        Self::cells_insert(storage, oversized, &body, h);
        debug!("inserted body {:?} at {}", h, body.center);
        h
    }

    /// Inserts a new body registered under every given tag.
    pub fn insert_with_tags<T: Into<String>>(
        &mut self,
        body: Body,
        obj: O,
        tags: impl IntoIterator<Item = T>,
    ) -> BodyHandle {
        let h = self.insert(body, obj);
        for tag in tags {
            self.add_tag(h, tag);
        }
        h
    }

    /// Registers `handle` under `tag`. Adding a tag twice has no effect.
    pub fn add_tag(&mut self, handle: BodyHandle, tag: impl Into<String>) {
        assert!(
            self.objects.contains_key(handle),
            "Body not in world anymore"
        );
        let list = self.tags.entry(tag.into()).or_default();
        if !list.contains(&handle) {
            list.push(handle);
        }
    }

    /// Unregisters `handle` from `tag`, returns whether it was registered.
    pub fn remove_tag(&mut self, handle: BodyHandle, tag: &str) -> bool {
        let list = match self.tags.get_mut(tag) {
            Some(x) => x,
            None => return false,
        };
        let len = list.len();
        list.retain(|&h| h != handle);
        let removed = list.len() != len;
        if list.is_empty() {
            self.tags.remove(tag);
        }
        removed
    }

    /// Replaces the body of an object, moving it to its new cells.
    pub fn set_body(&mut self, handle: BodyHandle, body: Body) {
        let obj = self
            .objects
            .get_mut(handle)
            .expect("Body not in world anymore");

        let storage = &mut self.storage;
        let oversized = &mut self.oversized;

        let old = obj.body.bbox();
        let new = body.bbox();
        let same_cells = storage.cell_id(old.ll) == storage.cell_id(new.ll)
            && storage.cell_id(old.ur) == storage.cell_id(new.ur);

        if !same_cells {
            Self::cells_remove(storage, oversized, &obj.body, handle);
            Self::cells_insert(storage, oversized, &body, handle);
        }

        obj.body = body;
    }

    /// Removes a body from the world and from all its tags, returning its object.
    pub fn remove(&mut self, handle: BodyHandle) -> O {
        let st = self
            .objects
            .remove(handle)
            .expect("Body not in world anymore");

        Self::cells_remove(&mut self.storage, &mut self.oversized, &st.body, handle);
        self.tags.retain(|_, list| {
            list.retain(|&h| h != handle);
            !list.is_empty()
        });
        debug!("removed body {:?}", handle);
        st.obj
    }

    /// Removes every body carrying `tag`, returning their objects.
    pub fn remove_with_tag(&mut self, tag: &str) -> Vec<O> {
        let handles = match self.tags.get(tag) {
            Some(x) => x.clone(),
            None => return vec![],
        };
        debug!("removing {} bodies tagged {:?}", handles.len(), tag);
        handles.into_iter().map(|h| self.remove(h)).collect()
    }

    /// Iterate over all handles
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.objects.keys()
    }

    /// Iterate over all objects
    pub fn objects(&self) -> impl Iterator<Item = &O> + '_ {
        self.objects.values().map(|x| &x.obj)
    }

    /// Returns a reference to the body and the associated object, using the handle.
    pub fn get(&self, id: BodyHandle) -> Option<(&Body, &O)> {
        self.objects.get(id).map(|x| (&x.body, &x.obj))
    }

    /// Returns the body and a mutable reference to the associated object, using the handle.
    pub fn get_mut(&mut self, id: BodyHandle) -> Option<(&Body, &mut O)> {
        self.objects.get_mut(id).map(|x| (&x.body, &mut x.obj))
    }

    /// Handles registered under `tag`, in insertion order.
    pub fn with_tag<'a>(&'a self, tag: &str) -> impl Iterator<Item = BodyHandle> + 'a {
        self.tags
            .get(tag)
            .into_iter()
            .flat_map(|x| x.iter().copied())
    }

    /// Tags `handle` is registered under, in no particular order.
    pub fn tags_of(&self, handle: BodyHandle) -> impl Iterator<Item = &str> + '_ {
        self.tags
            .iter()
            .filter(move |(_, list)| list.contains(&handle))
            .map(|(tag, _)| tag.as_str())
    }

    /// The underlying storage
    pub fn storage(&self) -> &SparseStorage {
        &self.storage
    }

    /// Queries for all bodies in the cells covered by `bbox`, plus the oversized ones.
    /// The bodies themselves might not intersect `bbox`.
    /// A `bbox` covering too many cells scans every body instead.
    pub fn query_broad(&self, bbox: AABB) -> impl Iterator<Item = BodyHandle> + '_ {
        let storage = &self.storage;

        let range = storage.cells_covering(&bbox);
        let area = range.area();
        let oversized = self.oversized.iter().copied();

        let iter = range
            .flat_map(move |id| storage.cell(id))
            .flat_map(|x| x.objs.iter().copied());

        if area > MAX_CELLS {
            QueryIter::Scan(self.objects.keys().collect::<Vec<_>>().into_iter())
        } else if area == 1 {
            QueryIter::Simple(iter, oversized)
        } else {
            QueryIter::Dedup(FnvHashSet::default(), iter, oversized)
        }
    }

    /// Queries for all bodies colliding with `body` (touching included).
    pub fn query_touching(
        &self,
        body: Body,
    ) -> impl Iterator<Item = (BodyHandle, &Body, &O)> + '_ {
        self.query_broad(body.bbox())
            .map(move |h| {
                let obj = &self.objects[h];
                (h, &obj.body, &obj.obj)
            })
            .filter(move |&(_, x, _)| is_rotated_box_collision(&body, x))
    }

    /// Queries for all bodies containing `p` strictly inside.
    pub fn query_point(
        &self,
        p: Vector2,
    ) -> impl Iterator<Item = (BodyHandle, &Body, &O)> + '_ {
        self.query_broad(AABB::new(p, p))
            .map(move |h| {
                let obj = &self.objects[h];
                (h, &obj.body, &obj.obj)
            })
            .filter(move |&(_, x, _)| x.contains_point(p))
    }

    /// Handles of all other bodies touching the body of `handle`.
    /// Empty if the handle is not in the world.
    pub fn touching(&self, handle: BodyHandle) -> impl Iterator<Item = BodyHandle> + '_ {
        self.objects
            .get(handle)
            .map(|x| x.body)
            .into_iter()
            .flat_map(move |body| self.query_touching(body))
            .map(|(h, _, _)| h)
            .filter(move |&h| h != handle)
    }

    pub fn touching_any(&self, handle: BodyHandle) -> bool {
        self.touching(handle).next().is_some()
    }

    /// Checks if the body of `handle` touches any other body registered under `tag`.
    /// Scans the whole tag list rather than the grid, the cost grows with the tag's size.
    pub fn touching_any_with_tag(&self, handle: BodyHandle, tag: &str) -> bool {
        let body = match self.objects.get(handle) {
            Some(x) => x.body,
            None => return false,
        };
        self.with_tag(tag)
            .filter(|&h| h != handle)
            .any(|h| is_rotated_box_collision(&body, &self.objects[h].body))
    }

    /// Returns the number of bodies
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Checks if the world contains bodies or not
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

type Oversized<'a> = std::iter::Copied<std::slice::Iter<'a, BodyHandle>>;

enum QueryIter<'a, T: Iterator<Item = CellObject>> {
    Simple(T, Oversized<'a>),
    Dedup(FnvHashSet<BodyHandle>, T, Oversized<'a>),
    Scan(std::vec::IntoIter<BodyHandle>),
}

impl<'a, T: Iterator<Item = CellObject>> Iterator for QueryIter<'a, T> {
    type Item = BodyHandle;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            QueryIter::Simple(x, large) => x.next().map(|(x, _)| x).or_else(|| large.next()),
            QueryIter::Dedup(seen, x, large) => loop {
                let (v, single_cell) = match x.next() {
                    Some(x) => x,
                    None => return large.next(),
                };
                if single_cell {
                    return Some(v);
                }
                if seen.insert(v) {
                    return Some(v);
                }
            },
            QueryIter::Scan(x) => x.next(),
        }
    }
}
