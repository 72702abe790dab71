//! Row-major vertex storage with permissive and checked accessor families.

use glam::Vec3;
use tracing::warn;

use crate::point::GridPoint;

/// Fallback vertex count per axis when a requested size is invalid.
pub const DEFAULT_SIZE: u32 = 10;

/// Fallback world units per grid step when a requested cell size is invalid.
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Height written by [`TileGrid::set_vertex`] when marking a vertex filled.
pub const FILL_HEIGHT: f32 = 1.0;

/// A 2D lattice of [`GridPoint`] vertices.
///
/// Dimensions are **vertex counts**, not cell counts: a `width × height`
/// grid has `(width-1) × (height-1)` cells. The cell at `(x, y)` is bounded
/// by its BL `(x, y)`, BR `(x+1, y)`, TL `(x, y+1)` and TR `(x+1, y+1)`
/// corner vertices.
///
/// Two accessor families coexist deliberately:
///
/// - the *permissive* family ([`vertex`](Self::vertex),
///   [`set_vertex`](Self::set_vertex), [`grid_point`](Self::grid_point),
///   [`set_grid_point`](Self::set_grid_point)) never fails loudly — an
///   out-of-range access logs a warning and returns a default or is a no-op;
/// - the *checked* family ([`point`](Self::point),
///   [`point_mut`](Self::point_mut)) returns `Option` and stays silent, for
///   algorithms that overscan the boundary on purpose (brush stamping,
///   neighbor sampling at edges).
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: u32,
    height: u32,
    cell_size: f32,
    points: Vec<GridPoint>,
}

impl TileGrid {
    /// Creates a grid with the given vertex dimensions and cell size.
    ///
    /// Non-positive dimensions or a non-positive/non-finite cell size are
    /// corrected to `10 × 10` / `1.0` with a logged warning. Creation never
    /// fails.
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        let (width, height) = if width == 0 || height == 0 {
            warn!(
                width,
                height, "invalid grid dimensions, substituting {DEFAULT_SIZE}x{DEFAULT_SIZE}"
            );
            (DEFAULT_SIZE, DEFAULT_SIZE)
        } else {
            (width, height)
        };
        let cell_size = if cell_size > 0.0 && cell_size.is_finite() {
            cell_size
        } else {
            warn!(cell_size, "invalid cell size, substituting {DEFAULT_CELL_SIZE}");
            DEFAULT_CELL_SIZE
        };
        Self {
            width,
            height,
            cell_size,
            points: vec![GridPoint::default(); (width * height) as usize],
        }
    }

    /// Vertex count along the X axis.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Vertex count along the Y axis.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// World units per grid step.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Returns `true` if `(x, y)` names a vertex inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Returns `true` if `(x, y)` names a valid cell: all four of its corner
    /// vertices are in range.
    pub fn is_valid_cell(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) + 1 < self.width && (y as u32) + 1 < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y as u32 * self.width + x as u32) as usize
    }

    /// Checked read. `None` out of range, no logging.
    pub fn point(&self, x: i32, y: i32) -> Option<&GridPoint> {
        if self.in_bounds(x, y) {
            Some(&self.points[self.index(x, y)])
        } else {
            None
        }
    }

    /// Checked mutable access. `None` out of range, no logging.
    pub fn point_mut(&mut self, x: i32, y: i32) -> Option<&mut GridPoint> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.points[idx])
        } else {
            None
        }
    }

    /// Permissive occupancy read. Out-of-range vertices read as empty.
    pub fn vertex(&self, x: i32, y: i32) -> bool {
        match self.point(x, y) {
            Some(p) => p.is_filled(),
            None => {
                warn!(x, y, "vertex read out of range, returning empty");
                false
            }
        }
    }

    /// Permissive occupancy write via the legacy boolean shim.
    ///
    /// Marking a vertex filled writes `height = FILL_HEIGHT`; marking it
    /// empty writes `height = 0.0`. In both directions the write is skipped
    /// when the vertex carries a nonzero `building_id`: a building pins the
    /// vertex filled, and `set_vertex(x, y, false)` will not erase it. This
    /// mirrors the legacy occupancy/attribute sync rule and callers rely on
    /// buildings surviving occupancy erasure.
    ///
    /// Out of range: logged no-op.
    pub fn set_vertex(&mut self, x: i32, y: i32, filled: bool) {
        match self.point_mut(x, y) {
            Some(p) => {
                if p.building_id == 0 {
                    p.height = if filled { FILL_HEIGHT } else { 0.0 };
                }
            }
            None => warn!(x, y, filled, "vertex write out of range, ignored"),
        }
    }

    /// Permissive attribute read. Out-of-range vertices read as default.
    pub fn grid_point(&self, x: i32, y: i32) -> GridPoint {
        match self.point(x, y) {
            Some(p) => *p,
            None => {
                warn!(x, y, "grid point read out of range, returning default");
                GridPoint::default()
            }
        }
    }

    /// Permissive attribute write. Out of range: logged no-op.
    pub fn set_grid_point(&mut self, x: i32, y: i32, point: GridPoint) {
        match self.point_mut(x, y) {
            Some(p) => *p = point,
            None => warn!(x, y, "grid point write out of range, ignored"),
        }
    }

    /// Zeroes every vertex. Dimensions and cell size are unchanged.
    pub fn clear(&mut self) {
        self.points.fill(GridPoint::default());
    }

    /// Reallocates to the given dimensions (validated like [`new`](Self::new))
    /// with all vertices reset to default.
    pub fn resize(&mut self, width: u32, height: u32, cell_size: f32) {
        *self = Self::new(width, height, cell_size);
    }

    /// World position of a vertex: `(x·cell_size, 0, y·cell_size)`.
    pub fn grid_to_world(&self, x: i32, y: i32) -> Vec3 {
        Vec3::new(x as f32 * self.cell_size, 0.0, y as f32 * self.cell_size)
    }

    /// Nearest vertex to a world position. The result is not bounds-checked;
    /// positions outside the grid map to out-of-range vertex coordinates.
    pub fn world_to_grid(&self, pos: Vec3) -> (i32, i32) {
        (
            (pos.x / self.cell_size).round() as i32,
            (pos.z / self.cell_size).round() as i32,
        )
    }

    /// Fraction of vertices currently filled, for operator feedback.
    pub fn fill_ratio(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        let filled = self.points.iter().filter(|p| p.is_filled()).count();
        filled as f32 / self.points.len() as f32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
