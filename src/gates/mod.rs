// src/gates/mod.rs

//! The fixed table of single-qubit gate matrices.
//!
//! Two name sets exist: unitary gates (`I X Y Z H S T`) applied directly to a
//! target, and controlled gates (`CX CY CZ CH CS CT`) that apply the matrix of
//! their base unitary gate only where every controller bit is 1. There is no
//! separate controlled matrix; the conditioning is structural and lives in the
//! engine.

use crate::core::constants::qcdl_constants::FRAC_1_SQRT_2;
use num_complex::Complex64;
use std::fmt;

/// A 2×2 complex matrix in row-major order.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I_UNIT: Complex64 = Complex64::new(0.0, 1.0);

/// Identity.
pub const I_MATRIX: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];
/// Pauli X (bit flip).
pub const X_MATRIX: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];
/// Pauli Y.
pub const Y_MATRIX: Matrix2 = [[ZERO, Complex64::new(0.0, -1.0)], [I_UNIT, ZERO]];
/// Pauli Z (phase flip).
pub const Z_MATRIX: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]];
/// Hadamard.
pub const H_MATRIX: Matrix2 = [
    [Complex64::new(FRAC_1_SQRT_2, 0.0), Complex64::new(FRAC_1_SQRT_2, 0.0)],
    [Complex64::new(FRAC_1_SQRT_2, 0.0), Complex64::new(-FRAC_1_SQRT_2, 0.0)],
];
/// Phase gate, diag(1, i).
pub const S_MATRIX: Matrix2 = [[ONE, ZERO], [ZERO, I_UNIT]];
/// π/8 gate, diag(1, e^{iπ/4}).
pub const T_MATRIX: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]];

/// Gates accepted by the `<G>(<target>)` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitaryGate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    T,
}

impl UnitaryGate {
    /// Every unitary gate, in table order.
    pub const ALL: [UnitaryGate; 7] = [
        UnitaryGate::I,
        UnitaryGate::X,
        UnitaryGate::Y,
        UnitaryGate::Z,
        UnitaryGate::H,
        UnitaryGate::S,
        UnitaryGate::T,
    ];

    /// Looks up a gate by its QCDL name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.name() == name)
    }

    /// The QCDL name of the gate.
    pub fn name(&self) -> &'static str {
        match self {
            UnitaryGate::I => "I",
            UnitaryGate::X => "X",
            UnitaryGate::Y => "Y",
            UnitaryGate::Z => "Z",
            UnitaryGate::H => "H",
            UnitaryGate::S => "S",
            UnitaryGate::T => "T",
        }
    }

    /// The gate's 2×2 matrix.
    pub fn matrix(&self) -> &'static Matrix2 {
        match self {
            UnitaryGate::I => &I_MATRIX,
            UnitaryGate::X => &X_MATRIX,
            UnitaryGate::Y => &Y_MATRIX,
            UnitaryGate::Z => &Z_MATRIX,
            UnitaryGate::H => &H_MATRIX,
            UnitaryGate::S => &S_MATRIX,
            UnitaryGate::T => &T_MATRIX,
        }
    }
}

impl fmt::Display for UnitaryGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gates accepted by the `<G>(<target> : <controllers>)` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlledGate {
    CX,
    CY,
    CZ,
    CH,
    CS,
    CT,
}

impl ControlledGate {
    /// Every controlled gate, in table order.
    pub const ALL: [ControlledGate; 6] = [
        ControlledGate::CX,
        ControlledGate::CY,
        ControlledGate::CZ,
        ControlledGate::CH,
        ControlledGate::CS,
        ControlledGate::CT,
    ];

    /// Looks up a gate by its QCDL name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.name() == name)
    }

    /// The QCDL name of the gate.
    pub fn name(&self) -> &'static str {
        match self {
            ControlledGate::CX => "CX",
            ControlledGate::CY => "CY",
            ControlledGate::CZ => "CZ",
            ControlledGate::CH => "CH",
            ControlledGate::CS => "CS",
            ControlledGate::CT => "CT",
        }
    }

    /// The unitary gate applied to the target when all controllers are 1.
    pub fn base(&self) -> UnitaryGate {
        match self {
            ControlledGate::CX => UnitaryGate::X,
            ControlledGate::CY => UnitaryGate::Y,
            ControlledGate::CZ => UnitaryGate::Z,
            ControlledGate::CH => UnitaryGate::H,
            ControlledGate::CS => UnitaryGate::S,
            ControlledGate::CT => UnitaryGate::T,
        }
    }

    /// The matrix of the base gate.
    pub fn matrix(&self) -> &'static Matrix2 {
        self.base().matrix()
    }
}

impl fmt::Display for ControlledGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
