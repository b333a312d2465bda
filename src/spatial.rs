//! Uniform spatial grid for neighbor queries.
//!
//! Partitions screen positions into square cells sized to the link
//! distance, so a neighbor query only inspects the particle's own cell and
//! the 8 adjacent ones instead of the whole field. The grid is rebuilt
//! every frame; positions move continuously so it is never valid across
//! frames.
//!
//! Buckets are built in two passes (count, then fill into one flat entry
//! array) so a rebuild performs no per-cell allocation.

/// Cap on neighbors returned per particle. Bounds the triangle-search cost:
/// triple enumeration is cubic in the per-particle neighbor count.
pub const MAX_NEIGHBORS: usize = 16;

pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// CSR-style offsets: bucket `c` holds `entries[starts[c]..starts[c+1]]`.
    starts: Vec<u32>,
    entries: Vec<u32>,
    cursor: Vec<u32>,
}

impl SpatialGrid {
    pub fn new() -> Self {
        Self {
            cell_size: 24.0,
            cols: 1,
            rows: 1,
            starts: Vec::new(),
            entries: Vec::new(),
            cursor: Vec::new(),
        }
    }

    #[inline]
    fn cell_of(&self, x: f32, y: f32) -> (usize, usize) {
        let cx = ((x / self.cell_size).floor() as i64).clamp(0, self.cols as i64 - 1) as usize;
        let cy = ((y / self.cell_size).floor() as i64).clamp(0, self.rows as i64 - 1) as usize;
        (cx, cy)
    }

    /// Rebuild the partition from current screen positions.
    pub fn build(&mut self, xs: &[f32], ys: &[f32], width: f32, height: f32, cell_size: f32) {
        debug_assert_eq!(xs.len(), ys.len());
        self.cell_size = cell_size.max(1.0);
        self.cols = ((width / self.cell_size).ceil() as usize).max(1);
        self.rows = ((height / self.cell_size).ceil() as usize).max(1);
        let cells = self.cols * self.rows;

        // pass 1: count per cell
        self.starts.clear();
        self.starts.resize(cells + 1, 0);
        for i in 0..xs.len() {
            let (cx, cy) = self.cell_of(xs[i], ys[i]);
            self.starts[cy * self.cols + cx + 1] += 1;
        }
        for c in 0..cells {
            self.starts[c + 1] += self.starts[c];
        }

        // pass 2: fill
        self.cursor.clear();
        self.cursor.extend_from_slice(&self.starts[..cells]);
        self.entries.clear();
        self.entries.resize(xs.len(), 0);
        for i in 0..xs.len() {
            let (cx, cy) = self.cell_of(xs[i], ys[i]);
            let c = cy * self.cols + cx;
            self.entries[self.cursor[c] as usize] = i as u32;
            self.cursor[c] += 1;
        }
    }

    /// Collect neighbors of particle `i`: every other particle in the same
    /// or adjacent cell with squared distance below `link_dist_sq`, sorted
    /// ascending by index, truncated to [`MAX_NEIGHBORS`].
    pub fn neighbors(&self, i: usize, xs: &[f32], ys: &[f32], link_dist_sq: f32, out: &mut Vec<u32>) {
        out.clear();
        let (cx, cy) = self.cell_of(xs[i], ys[i]);
        for oy in -1i64..=1 {
            let y = cy as i64 + oy;
            if y < 0 || y >= self.rows as i64 {
                continue;
            }
            for ox in -1i64..=1 {
                let x = cx as i64 + ox;
                if x < 0 || x >= self.cols as i64 {
                    continue;
                }
                let c = y as usize * self.cols + x as usize;
                let bucket = &self.entries[self.starts[c] as usize..self.starts[c + 1] as usize];
                for &j in bucket {
                    if j as usize == i {
                        continue;
                    }
                    let dx = xs[i] - xs[j as usize];
                    let dy = ys[i] - ys[j as usize];
                    if dx * dx + dy * dy < link_dist_sq {
                        out.push(j);
                    }
                }
            }
        }
        // ascending order keeps i<j<k triangle keys consistent
        out.sort_unstable();
        out.truncate(MAX_NEIGHBORS);
    }
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new()
    }
}
