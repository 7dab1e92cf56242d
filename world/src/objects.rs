//! Occupancy index for static objects placed on the grid.

use std::collections::BTreeMap;

use gridwalk_core::{
    AssetStatus, CellCoord, CellRect, CellRectSize, ObjectId, ObjectSpec, PlacementError,
};

/// A static object recorded by the occupancy index.
///
/// The index exclusively owns the mapping from identity to footprint; the
/// visual representation lives with the rendering collaborator and is only
/// referenced through the spec's asset fields.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedObject {
    id: ObjectId,
    region: CellRect,
    spec: ObjectSpec,
    asset: AssetStatus,
}

impl PlacedObject {
    /// Identifier allocated to the object by the world.
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Region of cells occupied by the object.
    #[must_use]
    pub const fn region(&self) -> CellRect {
        self.region
    }

    /// Description the object was placed with.
    #[must_use]
    pub const fn spec(&self) -> &ObjectSpec {
        &self.spec
    }

    /// Whether the object's external visual loaded successfully.
    #[must_use]
    pub const fn asset(&self) -> AssetStatus {
        self.asset
    }
}

/// Tracks placed objects as axis-aligned cell rectangles.
///
/// Free-space queries scan every placed object; the index is deliberately
/// not spatially indexed, which is acceptable at editor scale. The
/// no-overlap and in-bounds invariants are enforced solely at place time and
/// never rechecked afterward.
#[derive(Clone, Debug, Default)]
pub(crate) struct OccupancyIndex {
    objects: BTreeMap<ObjectId, PlacedObject>,
    next_id: u32,
}

impl OccupancyIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reports whether every cell of the rectangle is in bounds and free of
    /// existing footprints.
    pub(crate) fn is_free(&self, grid_size: u32, anchor: CellCoord, size: CellRectSize) -> bool {
        let region = CellRect::from_origin_and_size(anchor, size);
        region.fits_within(grid_size)
            && self
                .objects
                .values()
                .all(|object| !object.region.intersects(&region))
    }

    /// Records an object, allocating its identity. Fails without mutating
    /// state when the footprint leaves the grid or overlaps another object.
    pub(crate) fn place(
        &mut self,
        grid_size: u32,
        anchor: CellCoord,
        spec: ObjectSpec,
        asset: AssetStatus,
    ) -> Result<ObjectId, PlacementError> {
        let region = CellRect::from_origin_and_size(anchor, spec.footprint);
        if !region.fits_within(grid_size) {
            return Err(PlacementError::OutOfBounds);
        }
        if self
            .objects
            .values()
            .any(|object| object.region.intersects(&region))
        {
            return Err(PlacementError::AreaOccupied);
        }

        let id = ObjectId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self.objects.insert(
            id,
            PlacedObject {
                id,
                region,
                spec,
                asset,
            },
        );
        Ok(id)
    }

    /// Removes the object whose footprint covers the cell. At most one such
    /// object exists by the no-overlap invariant.
    pub(crate) fn remove_at(&mut self, cell: CellCoord) -> Option<PlacedObject> {
        let id = self
            .objects
            .values()
            .find(|object| object.region.contains(cell))
            .map(PlacedObject::id)?;
        self.objects.remove(&id)
    }

    pub(crate) fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        self.objects.remove(&id)
    }

    /// Removes every object and reports how many were placed.
    pub(crate) fn clear(&mut self) -> usize {
        let count = self.objects.len();
        self.objects.clear();
        count
    }

    pub(crate) fn object_at(&self, cell: CellCoord) -> Option<ObjectId> {
        self.objects
            .values()
            .find(|object| object.region.contains(cell))
            .map(PlacedObject::id)
    }

    /// Iterates placed objects in identity order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.objects.len()
    }
}
