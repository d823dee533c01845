use crate::{
    error::{Error, Result},
    projection::{Extent, ProjectedPoint},
};
use std::collections::HashMap;

/// Interned label, index into the grid's label table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LabelId(pub(crate) u32);

/// Mapping between projected coordinates and storage cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    pub extent: Extent,
    pub grid_width: u32,
    pub grid_height: u32,
}

impl GridGeometry {
    pub fn new(extent: Extent, grid_width: u32, grid_height: u32) -> Result<Self> {
        if grid_width == 0 || grid_height == 0 {
            return Err(Error::InvalidDimensions {
                width: grid_width,
                height: grid_height,
            });
        }

        Ok(Self {
            extent,
            grid_width,
            grid_height,
        })
    }

    pub fn x_storage_ratio(&self) -> f64 {
        self.extent.range_easting() as f64 / f64::from(self.grid_width)
    }

    pub fn y_storage_ratio(&self) -> f64 {
        self.extent.range_northing() as f64 / f64::from(self.grid_height)
    }

    /// Storage cell of a projected point; may lie outside the grid for points
    /// not covered by the extent.
    pub fn cell_of(&self, point: ProjectedPoint) -> (i64, i64) {
        let x = (point.easting - self.extent.min_easting as f64) / self.x_storage_ratio();

        let y = (point.northing - self.extent.min_northing as f64) / self.y_storage_ratio();

        (x.floor() as i64, y.floor() as i64)
    }

    /// Number of columns including the slack column for points on the maximum.
    pub const fn columns(&self) -> usize {
        self.grid_width as usize + 1
    }

    pub const fn rows(&self) -> usize {
        self.grid_height as usize + 1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapStats {
    /// Points accumulated.
    pub point_count: u64,
    /// Cells claimed by accumulation.
    pub unique_cell_count: u64,
}

/// Dense grid of (occupancy, label) cells stored column-major in a flat arena.
///
/// A cell has a label if and only if its occupancy is non-zero.
#[derive(Clone, Debug)]
pub struct LabelGrid {
    geometry: GridGeometry,
    columns: usize,
    rows: usize,
    occupancy: Vec<u8>,
    labels: Vec<Option<LabelId>>,
    names: Vec<String>,
    ids: HashMap<String, LabelId>,
    stats: MapStats,
}

impl LabelGrid {
    pub fn new(geometry: GridGeometry) -> Self {
        let columns = geometry.columns();

        let rows = geometry.rows();

        Self {
            geometry,
            columns,
            rows,
            occupancy: vec![0; columns * rows],
            labels: vec![None; columns * rows],
            names: Vec::new(),
            ids: HashMap::new(),
            stats: MapStats::default(),
        }
    }

    pub(crate) fn from_parts(
        geometry: GridGeometry,
        names: Vec<String>,
        labels: Vec<Option<LabelId>>,
        occupancy: Vec<u8>,
    ) -> Result<Self> {
        let len = geometry.columns() * geometry.rows();

        if labels.len() != len || occupancy.len() != len {
            return Err(Error::CorruptGrid("cell count does not match dimensions"));
        }

        if labels
            .iter()
            .flatten()
            .any(|id| id.0 as usize >= names.len())
        {
            return Err(Error::CorruptGrid("label id outside label table"));
        }

        let ids = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), LabelId(i as u32)))
            .collect();

        let mut grid = Self {
            columns: geometry.columns(),
            rows: geometry.rows(),
            geometry,
            occupancy,
            labels,
            names,
            ids,
            stats: MapStats::default(),
        };

        if !grid.is_consistent() {
            return Err(Error::CorruptGrid("occupancy and labels diverge"));
        }

        grid.stats.unique_cell_count = grid.occupied_count() as u64;

        Ok(grid)
    }

    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn stats(&self) -> MapStats {
        self.stats
    }

    /// Adds a point to the cell covering it.
    pub fn accumulate(&mut self, point: ProjectedPoint, label: &str) -> Result<()> {
        let (x, y) = self.geometry.cell_of(point);

        self.claim(x, y, label)?;

        self.stats.point_count += 1;

        Ok(())
    }

    /// Counts one more point in a cell. The first label to reach an empty cell
    /// keeps it.
    pub fn claim(&mut self, x: i64, y: i64, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(Error::EmptyLabel { x, y });
        }

        let index = self.checked_index(x, y)?;

        if self.occupancy[index] == 0 {
            let id = self.intern(label);

            self.labels[index] = Some(id);

            self.stats.unique_cell_count += 1;
        }

        self.occupancy[index] = self.occupancy[index].saturating_add(1);

        Ok(())
    }

    pub fn label(&self, x: usize, y: usize) -> Option<&str> {
        self.label_id(x, y).map(|id| self.label_name(id))
    }

    pub fn occupancy(&self, x: usize, y: usize) -> u8 {
        self.occupancy[self.index(x, y)]
    }

    pub fn label_name(&self, id: LabelId) -> &str {
        &self.names[id.0 as usize]
    }

    pub fn label_names(&self) -> &[String] {
        &self.names
    }

    pub fn occupied_count(&self) -> usize {
        self.occupancy.iter().filter(|&&count| count > 0).count()
    }

    /// Whether every cell has a label exactly when it is occupied.
    pub fn is_consistent(&self) -> bool {
        self.occupancy
            .iter()
            .zip(&self.labels)
            .all(|(&count, label)| (count > 0) == label.is_some())
    }

    pub(crate) fn label_id(&self, x: usize, y: usize) -> Option<LabelId> {
        self.labels[self.index(x, y)]
    }

    /// Marks a cell as grown into by `id`.
    pub(crate) fn fill(&mut self, x: usize, y: usize, id: LabelId) {
        let index = self.index(x, y);

        self.labels[index] = Some(id);

        self.occupancy[index] = 1;
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = (Option<LabelId>, u8)> + '_ {
        self.labels.iter().copied().zip(self.occupancy.iter().copied())
    }

    fn intern(&mut self, label: &str) -> LabelId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }

        let id = LabelId(self.names.len() as u32);

        self.names.push(label.to_owned());

        self.ids.insert(label.to_owned(), id);

        id
    }

    fn checked_index(&self, x: i64, y: i64) -> Result<usize> {
        if x < 0 || y < 0 || x as usize >= self.columns || y as usize >= self.rows {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }

        Ok(self.index(x as usize, y as usize))
    }

    const fn index(&self, x: usize, y: usize) -> usize {
        x * self.rows + y
    }
}
