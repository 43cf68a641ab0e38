//! Simulation box geometry: orthogonal and triclinic cells.
//!
//! A [`SimBox`] describes the periodic cell the atom coordinates live in.
//! Triclinic (skewed) cells are parameterized by the upper-triangular
//! lattice matrix convention: three edge lengths plus the `xy`, `xz`, `yz`
//! tilt factors, so
//!
//! ```text
//! x = lo + | lx  xy  xz | · λ        λ ∈ [0, 1)³ inside the cell
//!          |  0  ly  yz |
//!          |  0   0  lz |
//! ```
//!
//! The fractional ("lamda") transform is what triclinic binning runs in;
//! everything else works on Cartesian coordinates already replicated into
//! ghost images by the domain layer.

use crate::error::BoxError;

/// Simulation cell geometry with per-axis periodicity flags.
#[derive(Clone, Debug, PartialEq)]
pub struct SimBox {
    lo: [f64; 3],
    hi: [f64; 3],
    /// Tilt factors `[xy, xz, yz]`; all zero for orthogonal cells.
    tilt: [f64; 3],
    triclinic: bool,
    periodic: [bool; 3],
}

impl SimBox {
    /// Create an orthogonal box from per-axis bounds.
    pub fn orthogonal(
        lo: [f64; 3],
        hi: [f64; 3],
        periodic: [bool; 3],
    ) -> Result<Self, BoxError> {
        Self::validate(lo, hi, [0.0; 3])?;
        Ok(Self {
            lo,
            hi,
            tilt: [0.0; 3],
            triclinic: false,
            periodic,
        })
    }

    /// Create a triclinic box with tilt factors `[xy, xz, yz]`.
    pub fn triclinic(
        lo: [f64; 3],
        hi: [f64; 3],
        tilt: [f64; 3],
        periodic: [bool; 3],
    ) -> Result<Self, BoxError> {
        Self::validate(lo, hi, tilt)?;
        Ok(Self {
            lo,
            hi,
            tilt,
            triclinic: true,
            periodic,
        })
    }

    fn validate(lo: [f64; 3], hi: [f64; 3], tilt: [f64; 3]) -> Result<(), BoxError> {
        for v in lo.iter().chain(hi.iter()).chain(tilt.iter()) {
            if !v.is_finite() {
                return Err(BoxError::NonFinite);
            }
        }
        for axis in 0..3 {
            if hi[axis] <= lo[axis] {
                return Err(BoxError::DegenerateAxis {
                    axis,
                    lo: lo[axis],
                    hi: hi[axis],
                });
            }
        }
        Ok(())
    }

    /// Lower bounds per axis.
    pub fn lo(&self) -> [f64; 3] {
        self.lo
    }

    /// Upper bounds per axis.
    pub fn hi(&self) -> [f64; 3] {
        self.hi
    }

    /// Edge lengths per axis (`hi - lo`).
    pub fn lengths(&self) -> [f64; 3] {
        [
            self.hi[0] - self.lo[0],
            self.hi[1] - self.lo[1],
            self.hi[2] - self.lo[2],
        ]
    }

    /// Tilt factors `[xy, xz, yz]` (zero for orthogonal boxes).
    pub fn tilt(&self) -> [f64; 3] {
        self.tilt
    }

    /// Per-axis periodicity flags.
    pub fn periodic(&self) -> [bool; 3] {
        self.periodic
    }

    /// Returns `true` for skewed (non-orthogonal) cells.
    pub fn is_triclinic(&self) -> bool {
        self.triclinic
    }

    /// Perpendicular distance between the two cell faces normal to each axis.
    ///
    /// Equal to the edge lengths for orthogonal cells; shorter along tilted
    /// directions for triclinic cells. This is the width that bounds how
    /// far apart two planes of constant fractional coordinate are, and
    /// therefore what bin sizing and the half-box cutoff check use.
    pub fn perpendicular_widths(&self) -> [f64; 3] {
        let [lx, ly, lz] = self.lengths();
        if !self.triclinic {
            return [lx, ly, lz];
        }
        let [xy, xz, yz] = self.tilt;
        // Row norms of the inverse lattice matrix give the inverse widths.
        let inv_x = {
            let a = 1.0 / lx;
            let b = -xy / (lx * ly);
            let c = (xy * yz - ly * xz) / (lx * ly * lz);
            (a * a + b * b + c * c).sqrt()
        };
        let inv_y = {
            let a = 1.0 / ly;
            let b = -yz / (ly * lz);
            (a * a + b * b).sqrt()
        };
        let inv_z = 1.0 / lz;
        [1.0 / inv_x, 1.0 / inv_y, 1.0 / inv_z]
    }

    /// Transform a Cartesian position to fractional (lamda) coordinates.
    ///
    /// Points inside the cell map to `[0, 1)` per axis; ghost positions
    /// outside the cell map outside that range.
    pub fn to_lamda(&self, x: [f64; 3]) -> [f64; 3] {
        let [lx, ly, lz] = self.lengths();
        let [xy, xz, yz] = self.tilt;
        let d = [x[0] - self.lo[0], x[1] - self.lo[1], x[2] - self.lo[2]];
        let lz_frac = d[2] / lz;
        let ly_frac = (d[1] - yz * lz_frac) / ly;
        let lx_frac = (d[0] - xy * ly_frac - xz * lz_frac) / lx;
        [lx_frac, ly_frac, lz_frac]
    }

    /// Transform a fractional displacement back to a Cartesian displacement.
    pub fn lamda_to_delta(&self, f: [f64; 3]) -> [f64; 3] {
        let [lx, ly, lz] = self.lengths();
        let [xy, xz, yz] = self.tilt;
        [
            lx * f[0] + xy * f[1] + xz * f[2],
            ly * f[1] + yz * f[2],
            lz * f[2],
        ]
    }

    /// Returns `true` if a displacement spans more than half the box along
    /// any periodic axis, i.e. the pair straddles a periodic image.
    ///
    /// Pair enumeration uses this to keep bonded pairs whose in-range image
    /// is a periodic copy rather than the directly bonded one.
    pub fn minimum_image_check(&self, d: [f64; 3]) -> bool {
        let l = self.lengths();
        for axis in 0..3 {
            if self.periodic[axis] && d[axis].abs() > 0.5 * l[axis] {
                return true;
            }
        }
        false
    }

    /// Fold a displacement to its minimum periodic image.
    pub fn minimum_image(&self, d: [f64; 3]) -> [f64; 3] {
        let f = if self.triclinic {
            // Work in fractional space so skewed images fold correctly.
            let lam = {
                let [lx, ly, lz] = self.lengths();
                let [xy, xz, yz] = self.tilt;
                let fz = d[2] / lz;
                let fy = (d[1] - yz * fz) / ly;
                let fx = (d[0] - xy * fy - xz * fz) / lx;
                [fx, fy, fz]
            };
            let mut shift = [0.0; 3];
            for axis in 0..3 {
                if self.periodic[axis] {
                    shift[axis] = -lam[axis].round();
                }
            }
            self.lamda_to_delta(shift)
        } else {
            let l = self.lengths();
            let mut shift = [0.0; 3];
            for axis in 0..3 {
                if self.periodic[axis] {
                    shift[axis] = -(d[axis] / l[axis]).round() * l[axis];
                }
            }
            shift
        };
        [d[0] + f[0], d[1] + f[1], d[2] + f[2]]
    }

    /// Returns `true` if the two boxes differ in shape (edge lengths or
    /// tilt) by more than `tol` on any component.
    pub fn shape_differs(&self, other: &SimBox, tol: f64) -> bool {
        let (a, b) = (self.lengths(), other.lengths());
        for axis in 0..3 {
            if (a[axis] - b[axis]).abs() > tol {
                return true;
            }
            if (self.tilt[axis] - other.tilt[axis]).abs() > tol {
                return true;
            }
        }
        self.triclinic != other.triclinic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn orthogonal_lamda_roundtrip() {
        let b = SimBox::orthogonal([0.0; 3], [10.0, 20.0, 5.0], [true; 3]).unwrap();
        let lam = b.to_lamda([5.0, 10.0, 2.5]);
        assert!(close(lam[0], 0.5) && close(lam[1], 0.5) && close(lam[2], 0.5));
    }

    #[test]
    fn triclinic_lamda_corner() {
        // x = lo + h·[1,1,1] must map back to lamda [1,1,1].
        let b = SimBox::triclinic([0.0; 3], [10.0; 3], [2.0, 1.0, 0.5], [true; 3]).unwrap();
        let lam = b.to_lamda([13.0, 10.5, 10.0]);
        assert!(close(lam[0], 1.0) && close(lam[1], 1.0) && close(lam[2], 1.0));
    }

    #[test]
    fn perpendicular_widths_shrink_with_tilt() {
        let ortho = SimBox::orthogonal([0.0; 3], [10.0; 3], [true; 3]).unwrap();
        assert_eq!(ortho.perpendicular_widths(), [10.0, 10.0, 10.0]);

        let tri = SimBox::triclinic([0.0; 3], [10.0; 3], [5.0, 0.0, 0.0], [true; 3]).unwrap();
        let w = tri.perpendicular_widths();
        assert!(w[0] < 10.0);
        assert!(close(w[2], 10.0));
    }

    #[test]
    fn minimum_image_folds_across_boundary() {
        let b = SimBox::orthogonal([0.0; 3], [10.0; 3], [true; 3]).unwrap();
        let d = b.minimum_image([6.0, 3.0, -7.0]);
        assert!(close(d[0], -4.0) && close(d[1], 3.0) && close(d[2], 3.0));
    }

    #[test]
    fn minimum_image_respects_aperiodic_axes() {
        let b = SimBox::orthogonal([0.0; 3], [10.0; 3], [true, false, false]).unwrap();
        let d = b.minimum_image([6.0, 6.0, 6.0]);
        assert!(close(d[0], -4.0) && close(d[1], 6.0) && close(d[2], 6.0));
    }

    #[test]
    fn image_check_flags_half_box_spans() {
        let b = SimBox::orthogonal([0.0; 3], [10.0; 3], [true; 3]).unwrap();
        assert!(b.minimum_image_check([5.1, 0.0, 0.0]));
        assert!(!b.minimum_image_check([4.9, 0.0, 0.0]));
    }

    #[test]
    fn degenerate_axis_rejected() {
        let r = SimBox::orthogonal([0.0; 3], [10.0, 0.0, 10.0], [true; 3]);
        assert!(matches!(r, Err(BoxError::DegenerateAxis { axis: 1, .. })));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn lamda_roundtrip(
                lx in 1.0f64..50.0,
                ly in 1.0f64..50.0,
                lz in 1.0f64..50.0,
                xy in -5.0f64..5.0,
                xz in -5.0f64..5.0,
                yz in -5.0f64..5.0,
                px in -20.0f64..60.0,
                py in -20.0f64..60.0,
                pz in -20.0f64..60.0,
            ) {
                let b = SimBox::triclinic(
                    [0.0; 3],
                    [lx, ly, lz],
                    [xy, xz, yz],
                    [true; 3],
                )
                .unwrap();
                let lam = b.to_lamda([px, py, pz]);
                let back = b.lamda_to_delta(lam);
                prop_assert!((back[0] - px).abs() < 1e-8);
                prop_assert!((back[1] - py).abs() < 1e-8);
                prop_assert!((back[2] - pz).abs() < 1e-8);
            }

            #[test]
            fn minimum_image_is_shortest(
                l in 2.0f64..20.0,
                dx in -40.0f64..40.0,
            ) {
                let b = SimBox::orthogonal([0.0; 3], [l, l, l], [true; 3]).unwrap();
                let d = b.minimum_image([dx, 0.0, 0.0]);
                prop_assert!(d[0].abs() <= 0.5 * l + 1e-9);
            }
        }
    }

    #[test]
    fn shape_comparison() {
        let a = SimBox::orthogonal([0.0; 3], [10.0; 3], [true; 3]).unwrap();
        let b = SimBox::orthogonal([1.0, 1.0, 1.0], [11.0, 11.0, 11.0], [true; 3]).unwrap();
        // Pure translation is not a shape change.
        assert!(!a.shape_differs(&b, 1e-9));
        let c = SimBox::orthogonal([0.0; 3], [10.5, 10.0, 10.0], [true; 3]).unwrap();
        assert!(a.shape_differs(&c, 1e-9));
    }
}
