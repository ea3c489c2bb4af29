//! Numeric constants shared by the compiler, engine and reporting code.

/// Tolerances and thresholds used across the crate
pub mod qcdl_constants {
    /// Allowed deviation of `|alpha|^2 + |beta|^2` (and of a state's squared norm) from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Amplitudes with magnitude at or below this are omitted from final-state printouts.
    pub const PRINT_CUTOFF: f64 = 1e-10;
    /// Percentages at or below this are dropped before conformance comparison.
    pub const MIN_REPORTED_PERCENTAGE: f64 = 1e-6;
    /// Default relative tolerance for conformance comparison (5%).
    pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 0.05;
    /// Largest register the engine will allocate a state vector for.
    pub const MAX_QUBITS: usize = 30;
    /// 1/√2, used by the Hadamard matrix.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}
