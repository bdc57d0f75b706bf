//! Tolerance configuration shared by the primitives and the kernel builder.

/// Geometry configuration (tolerances).
///
/// One value per distinct comparison class; the kernel builder takes a
/// `GeomCfg` by value and threads it through every predicate call.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// General near-zero slack for orientation and coordinate checks.
    pub eps: f64,
    /// Determinant cutoff below which carrier lines count as parallel.
    pub eps_det: f64,
    /// A corner within this of 180° belongs to a collinear run.
    pub eps_flat: f64,
    /// Loose straightness slack for the reflex scan (relative and
    /// absolute); near-straight corners must not count as reflex.
    pub eps_reflex: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps: 1e-6,
            eps_det: 1e-9,
            eps_flat: 1e-4,
            eps_reflex: 1e-2,
        }
    }
}
