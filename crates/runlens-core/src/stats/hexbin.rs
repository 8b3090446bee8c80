//! Hexagonal binning on two interleaved rectangular lattices, the layout
//! matplotlib's `hexbin` uses: `gridsize` hexagons across x, and
//! `gridsize / sqrt(3)` down y so the cells come out regular.

use crate::config::MAX_HEXBIN_GRIDSIZE;

/// One non-empty hexagon.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub center: (f64, f64),
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct HexGrid {
    x_range: (f64, f64),
    y_range: (f64, f64),
    sx: f64,
    sy: f64,
    cells: Vec<HexCell>,
}

impl HexGrid {
    /// Bins `points`. `None` when there is nothing to bin. `gridsize` is
    /// clamped to `1..=MAX_HEXBIN_GRIDSIZE`.
    pub fn bin(points: &[(f64, f64)], gridsize: usize) -> Option<Self> {
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
        let (x0, x1) = nonsingular(super::extent(&xs)?);
        let (y0, y1) = nonsingular(super::extent(&ys)?);

        let nx = gridsize.clamp(1, MAX_HEXBIN_GRIDSIZE);
        let ny = ((nx as f64 / 3f64.sqrt()) as usize).max(1);

        // Nudge the edges so points on the boundary stay inside.
        let xpad = 1e-9 * (x1 - x0);
        let ypad = 1e-9 * (y1 - y0);
        let (x0, x1) = (x0 - xpad, x1 + xpad);
        let (y0, y1) = (y0 - ypad, y1 + ypad);
        let sx = (x1 - x0) / nx as f64;
        let sy = (y1 - y0) / ny as f64;

        // lattice A: (nx + 1) × (ny + 1) centers on grid corners
        // lattice B: nx × ny centers offset by half a cell
        let mut lattice_a = vec![0usize; (nx + 1) * (ny + 1)];
        let mut lattice_b = vec![0usize; nx * ny];

        for &(x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let ix = (x - x0) / sx;
            let iy = (y - y0) / sy;
            let ix1 = ix.round();
            let iy1 = iy.round();
            let ix2 = ix.floor();
            let iy2 = iy.floor();

            let d1 = (ix - ix1).powi(2) + 3.0 * (iy - iy1).powi(2);
            let d2 = (ix - ix2 - 0.5).powi(2) + 3.0 * (iy - iy2 - 0.5).powi(2);

            if d1 < d2 {
                let (i, j) = (ix1 as usize, iy1 as usize);
                if i <= nx && j <= ny {
                    lattice_a[i * (ny + 1) + j] += 1;
                }
            } else {
                let (i, j) = (ix2 as usize, iy2 as usize);
                if i < nx && j < ny {
                    lattice_b[i * ny + j] += 1;
                }
            }
        }

        let mut cells = Vec::new();
        for i in 0..=nx {
            for j in 0..=ny {
                let count = lattice_a[i * (ny + 1) + j];
                if count > 0 {
                    cells.push(HexCell {
                        center: (x0 + i as f64 * sx, y0 + j as f64 * sy),
                        count,
                    });
                }
            }
        }
        for i in 0..nx {
            for j in 0..ny {
                let count = lattice_b[i * ny + j];
                if count > 0 {
                    cells.push(HexCell {
                        center: (x0 + (i as f64 + 0.5) * sx, y0 + (j as f64 + 0.5) * sy),
                        count,
                    });
                }
            }
        }

        Some(Self {
            x_range: (x0, x1),
            y_range: (y0, y1),
            sx,
            sy,
            cells,
        })
    }

    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    pub fn max_count(&self) -> usize {
        self.cells.iter().map(|c| c.count).max().unwrap_or(0)
    }

    /// Data extent including the half-cell overhang of edge hexagons.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        (
            (self.x_range.0 - self.sx / 2.0, self.x_range.1 + self.sx / 2.0),
            (self.y_range.0 - self.sy / 3.0, self.y_range.1 + self.sy / 3.0),
        )
    }

    /// Polygon vertices of the hexagon around `cell`.
    pub fn vertices(&self, cell: &HexCell) -> Vec<(f64, f64)> {
        const UNIT: [(f64, f64); 6] = [
            (0.5, -0.5),
            (0.5, 0.5),
            (0.0, 1.0),
            (-0.5, 0.5),
            (-0.5, -0.5),
            (0.0, -1.0),
        ];
        let (cx, cy) = cell.center;
        UNIT.iter()
            .map(|(ux, uy)| (cx + ux * self.sx, cy + uy * self.sy / 3.0))
            .collect()
    }
}

/// Expands a zero-width range by 10% of its magnitude (or ±0.1 at zero).
fn nonsingular((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi - lo > 1e-12 * lo.abs().max(hi.abs()) {
        return (lo, hi);
    }
    if lo == 0.0 && hi == 0.0 {
        return (-0.1, 0.1);
    }
    (lo - 0.1 * lo.abs(), hi + 0.1 * hi.abs())
}
