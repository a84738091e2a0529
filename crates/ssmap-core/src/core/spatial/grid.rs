use nalgebra::{Point3, Vector3};

/// Marks the end of a cell's entry list.
const SENTINEL: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Entry<T> {
    position: Point3<f64>,
    item: T,
    next: usize,
}

/// A uniform grid over a point cloud answering fixed-radius neighbor queries.
///
/// The bounding box of the input is split along each axis into `max(1, floor(extent / hint))`
/// cells, so the real cell size divides the box evenly and may differ from the requested
/// hint. Each cell stores the index of its first entry; entries form singly linked lists
/// through a flat array, so no cell owns a heap allocation of its own.
///
/// # Performance
///
/// - Construction: **O(N)** in the number of points plus **O(C)** in the number of cells.
/// - `query_radius`: proportional to the cells touched by the sphere and the points they
///   hold. Cells lying entirely inside the sphere skip the per-point distance test.
#[derive(Debug, Clone)]
pub struct SpatialIndex<T> {
    origin: Point3<f64>,
    cell_size: Vector3<f64>,
    counts: [usize; 3],
    heads: Vec<usize>,
    entries: Vec<Entry<T>>,
}

impl<T> SpatialIndex<T> {
    /// Builds the index from `(position, item)` pairs.
    ///
    /// # Arguments
    ///
    /// * `points` - Iterator yielding `(position, item)` pairs.
    /// * `cell_size_hint` - The target side length of a cell.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size_hint` is not a positive finite number.
    pub fn new(points: impl IntoIterator<Item = (Point3<f64>, T)>, cell_size_hint: f64) -> Self {
        assert!(
            cell_size_hint.is_finite() && cell_size_hint > 0.0,
            "Cell size hint must be positive and finite"
        );

        let points: Vec<_> = points.into_iter().collect();

        let Some((first, _)) = points.first() else {
            return Self {
                origin: Point3::origin(),
                cell_size: Vector3::repeat(cell_size_hint),
                counts: [1, 1, 1],
                heads: vec![SENTINEL],
                entries: Vec::new(),
            };
        };

        let (min, max) = points
            .iter()
            .fold((*first, *first), |(lo, hi), (p, _)| (lo.inf(p), hi.sup(p)));
        let extent = max - min;

        let mut counts = [1usize; 3];
        let mut cell_size = Vector3::repeat(cell_size_hint);
        for axis in 0..3 {
            if extent[axis] > 0.0 {
                counts[axis] = ((extent[axis] / cell_size_hint).floor() as usize).max(1);
                cell_size[axis] = extent[axis] / counts[axis] as f64;
            }
        }

        let mut index = Self {
            origin: min,
            cell_size,
            counts,
            heads: vec![SENTINEL; counts[0] * counts[1] * counts[2]],
            entries: Vec::with_capacity(points.len()),
        };

        for (position, item) in points {
            let cell = index.cell_of(&position);
            index.entries.push(Entry {
                position,
                item,
                next: index.heads[cell],
            });
            index.heads[cell] = index.entries.len() - 1;
        }

        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cells along x, y and z.
    pub fn resolution(&self) -> [usize; 3] {
        self.counts
    }

    /// Actual cell dimensions after fitting the grid to the bounding box.
    pub fn cell_size(&self) -> Vector3<f64> {
        self.cell_size
    }

    fn axis_cell(&self, axis: usize, value: f64) -> usize {
        let last = (self.counts[axis] - 1) as f64;
        ((value - self.origin[axis]) / self.cell_size[axis])
            .floor()
            .clamp(0.0, last) as usize
    }

    fn cell_of(&self, position: &Point3<f64>) -> usize {
        let x = self.axis_cell(0, position.x);
        let y = self.axis_cell(1, position.y);
        let z = self.axis_cell(2, position.z);
        self.linear_index(x, y, z)
    }

    fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.counts[0] * (y + self.counts[1] * z)
    }

    fn cell_bounds(&self, axis: usize, cell: usize) -> (f64, f64) {
        let lo = self.origin[axis] + cell as f64 * self.cell_size[axis];
        (lo, lo + self.cell_size[axis])
    }

    /// Visits every item whose position lies within `radius` of `center`, boundary
    /// included.
    ///
    /// Cells are walked Z slab by Z slab and Y row by Y row. For each slab and row the
    /// inner and outer radii of the sphere slice bound which cells can intersect the
    /// sphere and which lie fully inside it; only the latter skip the exact
    /// squared-distance test.
    pub fn query_radius<'a, F>(&'a self, center: &Point3<f64>, radius: f64, mut visit: F)
    where
        F: FnMut(&'a T),
    {
        if self.entries.is_empty() || radius.is_nan() || radius < 0.0 {
            return;
        }
        let radius_sq = radius * radius;

        let z_first = self.axis_cell(2, center.z - radius);
        let z_last = self.axis_cell(2, center.z + radius);
        for z in z_first..=z_last {
            let (z_lo, z_hi) = self.cell_bounds(2, z);
            let inside_z = center.z - radius <= z_lo && z_hi <= center.z + radius;
            let (slab_inner, slab_outer) = slice_radius_range(center.z, radius, z_lo, z_hi);

            let y_first = self.axis_cell(1, center.y - slab_outer);
            let y_last = self.axis_cell(1, center.y + slab_outer);
            for y in y_first..=y_last {
                let (y_lo, y_hi) = self.cell_bounds(1, y);
                let inside_y = center.y - slab_inner <= y_lo && y_hi <= center.y + slab_inner;
                let (_, row_outer) = slice_radius_range(center.y, slab_outer, y_lo, y_hi);
                let (row_inner, _) = slice_radius_range(center.y, slab_inner, y_lo, y_hi);

                let x_first = self.axis_cell(0, center.x - row_outer);
                let x_last = self.axis_cell(0, center.x + row_outer);
                for x in x_first..=x_last {
                    let (x_lo, x_hi) = self.cell_bounds(0, x);
                    let inside_x = center.x - row_inner <= x_lo && x_hi <= center.x + row_inner;
                    let inside = inside_x && inside_y && inside_z;

                    let mut cursor = self.heads[self.linear_index(x, y, z)];
                    while cursor != SENTINEL {
                        let entry = &self.entries[cursor];
                        if inside || (entry.position - center).norm_squared() <= radius_sq {
                            visit(&entry.item);
                        }
                        cursor = entry.next;
                    }
                }
            }
        }
    }

    /// Collects the items within `radius` of `center`.
    pub fn neighbors(&self, center: &Point3<f64>, radius: f64) -> Vec<&T> {
        let mut found = Vec::new();
        self.query_radius(center, radius, |item| found.push(item));
        found
    }
}

/// Smallest and largest radius of the cross-section of a sphere (or circle) of `radius`
/// centered at `center` cut between the planes `lo` and `hi` along one axis.
fn slice_radius_range(center: f64, radius: f64, lo: f64, hi: f64) -> (f64, f64) {
    let r_sq = radius * radius;
    let r_lo = (r_sq - (lo - center).powi(2)).max(0.0).sqrt();
    let r_hi = (r_sq - (hi - center).powi(2)).max(0.0).sqrt();

    let inner = r_lo.min(r_hi);
    let outer = if lo <= center && center <= hi {
        radius
    } else {
        r_lo.max(r_hi)
    };
    (inner, outer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice(n: usize, spacing: f64) -> Vec<(Point3<f64>, usize)> {
        let mut points = Vec::new();
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let p = Point3::new(x as f64, y as f64, z as f64) * spacing;
                    points.push((p, points.len()));
                }
            }
        }
        points
    }

    fn brute_force(points: &[(Point3<f64>, usize)], center: &Point3<f64>, r: f64) -> Vec<usize> {
        let mut ids: Vec<usize> = points
            .iter()
            .filter(|(p, _)| (p - center).norm_squared() <= r * r)
            .map(|&(_, id)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn sorted(found: Vec<&usize>) -> Vec<usize> {
        let mut ids: Vec<usize> = found.into_iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn resolution_divides_extent_evenly() {
        let index = SpatialIndex::new(
            vec![
                (Point3::new(0.0, 0.0, 0.0), 0),
                (Point3::new(12.0, 3.0, 0.0), 1),
            ],
            5.0,
        );
        assert_eq!(index.resolution(), [2, 1, 1]);
        assert!((index.cell_size().x - 6.0).abs() < 1e-12);
        assert!((index.cell_size().y - 3.0).abs() < 1e-12);
        assert!((index.cell_size().z - 5.0).abs() < 1e-12);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn empty_index_visits_nothing() {
        let index: SpatialIndex<usize> = SpatialIndex::new(Vec::new(), 5.0);
        assert!(index.is_empty());
        assert!(index.neighbors(&Point3::origin(), 100.0).is_empty());
    }

    #[test]
    fn query_matches_brute_force_on_lattice() {
        let points = lattice(8, 1.5);
        let index = SpatialIndex::new(points.clone(), 1.0);
        let centers = [
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-3.0, 4.0, 12.0),
            Point3::new(10.4, 2.2, 7.7),
        ];
        for center in &centers {
            for radius in [0.5, 1.5, 3.0, 6.25, 20.0] {
                assert_eq!(
                    sorted(index.neighbors(center, radius)),
                    brute_force(&points, center, radius),
                    "center {center:?}, radius {radius}"
                );
            }
        }
    }

    #[test]
    fn radius_zero_returns_only_coincident_points() {
        let points = vec![
            (Point3::new(1.0, 1.0, 1.0), 0),
            (Point3::new(1.0, 1.0, 1.0), 1),
            (Point3::new(1.0, 1.0, 1.001), 2),
            (Point3::new(4.0, 4.0, 4.0), 3),
        ];
        let index = SpatialIndex::new(points, 1.0);
        assert_eq!(
            sorted(index.neighbors(&Point3::new(1.0, 1.0, 1.0), 0.0)),
            vec![0, 1]
        );
    }

    #[test]
    fn points_on_boundaries_are_found_exactly_once() {
        let points = lattice(3, 5.0);
        let index = SpatialIndex::new(points.clone(), 5.0);
        let found = sorted(index.neighbors(&Point3::new(5.0, 5.0, 5.0), 5.0));
        assert_eq!(found, brute_force(&points, &Point3::new(5.0, 5.0, 5.0), 5.0));
        assert_eq!(found.len(), 7);
    }

    #[test]
    fn degenerate_axes_use_a_single_cell() {
        let points: Vec<_> = (0..5)
            .map(|i| (Point3::new(i as f64 * 3.0, 0.0, 0.0), i))
            .collect();
        let index = SpatialIndex::new(points.clone(), 2.0);
        assert_eq!(index.resolution(), [6, 1, 1]);
        assert_eq!(
            sorted(index.neighbors(&Point3::new(6.0, 0.0, 0.0), 3.0)),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn visited_items_borrow_from_the_index() {
        let index = SpatialIndex::new(
            vec![
                (Point3::new(0.0, 0.0, 0.0), "near"),
                (Point3::new(9.0, 0.0, 0.0), "far"),
            ],
            5.0,
        );
        let mut kept: Vec<&&str> = Vec::new();
        index.query_radius(&Point3::origin(), 1.0, |item| kept.push(item));
        let near = index.neighbors(&Point3::origin(), 1.0);

        assert_eq!(kept, vec![&"near"]);
        assert_eq!(near, kept);
    }

    #[test]
    fn negative_radius_visits_nothing() {
        let index = SpatialIndex::new(lattice(2, 1.0), 1.0);
        assert!(index.neighbors(&Point3::origin(), -1.0).is_empty());
    }

    #[test]
    fn slice_radius_range_of_central_slab_is_full_radius() {
        let (inner, outer) = slice_radius_range(0.0, 5.0, -1.0, 3.0);
        assert_eq!(outer, 5.0);
        assert!((inner - 4.0).abs() < 1e-12);

        let (inner, outer) = slice_radius_range(0.0, 5.0, 3.0, 6.0);
        assert!((outer - 4.0).abs() < 1e-12);
        assert_eq!(inner, 0.0);
    }
}
