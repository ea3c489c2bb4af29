// src/circuits/mod.rs

//! The compiled form of a QCDL program.
//!
//! A [`Circuit`] is the immutable output of compilation: the ordered qubit
//! registry, the ordered operation sequence and the optional expected-result
//! annotation. [`CircuitBuilder`] enforces the cross-reference rules while the
//! sequence is assembled, so every `Circuit` that exists is valid.

use crate::core::{Outcome, QcdlError, QubitDefinition, Result};
use crate::operations::Operation;
use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Expected outcome percentages parsed from a `?` annotation line.
///
/// Iteration order is ascending by outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedResult {
    percentages: BTreeMap<Outcome, f64>,
}

impl ExpectedResult {
    /// Creates an empty expectation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `percentage` for `outcome`, returning any previous value.
    pub fn insert(&mut self, outcome: Outcome, percentage: f64) -> Option<f64> {
        self.percentages.insert(outcome, percentage)
    }

    /// Expected percentage for `outcome`.
    pub fn get(&self, outcome: &Outcome) -> Option<f64> {
        self.percentages.get(outcome).copied()
    }

    /// Number of listed outcomes.
    pub fn len(&self) -> usize {
        self.percentages.len()
    }

    /// Returns `true` if no outcome is listed.
    pub fn is_empty(&self) -> bool {
        self.percentages.is_empty()
    }

    /// Iterates `(outcome, percentage)` pairs in ascending outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (&Outcome, f64)> {
        self.percentages.iter().map(|(o, p)| (o, *p))
    }
}

impl FromIterator<(Outcome, f64)> for ExpectedResult {
    fn from_iter<I: IntoIterator<Item = (Outcome, f64)>>(iter: I) -> Self {
        Self { percentages: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a ExpectedResult {
    type Item = (&'a Outcome, &'a f64);
    type IntoIter = btree_map::Iter<'a, Outcome, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.percentages.iter()
    }
}

/// An ordered, validated sequence of operations over a fixed qubit registry.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// Qubits in definition order; position `j` is bit `n-1-j` of a basis index.
    qubits: Vec<QubitDefinition>,
    /// The ordered sequence of operations, `Define`s included.
    operations: Vec<Operation>,
    expected: Option<ExpectedResult>,
}

impl Circuit {
    fn new() -> Self {
        Self {
            qubits: Vec::new(),
            operations: Vec::new(),
            expected: None,
        }
    }

    /// Qubit definitions in definition order.
    pub fn qubits(&self) -> &[QubitDefinition] {
        &self.qubits
    }

    /// Qubit names in definition order.
    pub fn qubit_names(&self) -> Vec<&str> {
        self.qubits.iter().map(QubitDefinition::name).collect()
    }

    /// Position of `name` in the registry (0 = most significant bit).
    pub fn qubit_index(&self, name: &str) -> Option<usize> {
        self.qubits.iter().position(|q| q.name() == name)
    }

    /// Number of defined qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The expected-result annotation, if the source had one.
    pub fn expected_result(&self) -> Option<&ExpectedResult> {
        self.expected.as_ref()
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Whether a `measure` statement appears anywhere in the sequence.
    pub fn has_measurement(&self) -> bool {
        self.operations.iter().any(Operation::is_measurement)
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Assembles a [`Circuit`] one operation at a time, rejecting duplicate
/// definitions and references to qubits not yet defined.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Option<Circuit>,
    registry: HashSet<String>,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    fn circuit_mut(&mut self) -> &mut Circuit {
        self.circuit.get_or_insert_with(Circuit::new)
    }

    /// Appends an operation after validating its qubit references.
    ///
    /// # Errors
    /// * `DuplicateDefinition` for a second `Define` of a name.
    /// * `UndefinedQubit` for a target or controller not defined earlier.
    /// * `DuplicateController` when a controlled gate repeats a qubit.
    /// * `Syntax` for a controlled gate with no controllers.
    pub fn add_op(mut self, op: Operation) -> Result<Self> {
        match &op {
            Operation::Define { qubit, index } => {
                if !self.registry.insert(qubit.name().to_string()) {
                    return Err(QcdlError::DuplicateDefinition {
                        name: qubit.name().to_string(),
                        statement: op.to_string(),
                        index: *index,
                    });
                }
                self.circuit_mut().qubits.push(qubit.clone());
            }
            Operation::Unitary { gate, target, .. } => {
                self.require_defined(target, gate.name(), &op)?;
            }
            Operation::Controlled { gate, target, controllers, index } => {
                if controllers.is_empty() {
                    return Err(QcdlError::Syntax { statement: op.to_string(), index: *index });
                }
                self.require_defined(target, gate.name(), &op)?;
                let mut seen: HashSet<&str> = HashSet::with_capacity(controllers.len());
                for controller in controllers {
                    self.require_defined(controller, gate.name(), &op)?;
                    if controller == target || !seen.insert(controller.as_str()) {
                        return Err(QcdlError::DuplicateController {
                            name: controller.clone(),
                            gate: gate.name().to_string(),
                            statement: op.to_string(),
                            index: *index,
                        });
                    }
                }
            }
            Operation::Measurement { .. } => {}
        }
        self.circuit_mut().operations.push(op);
        Ok(self)
    }

    /// Appends several operations, stopping at the first invalid one.
    pub fn add_ops<I>(mut self, ops: I) -> Result<Self>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self = self.add_op(op)?;
        }
        Ok(self)
    }

    /// Attaches an expected-result annotation.
    pub fn with_expected(mut self, expected: ExpectedResult) -> Self {
        self.circuit_mut().expected = Some(expected);
        self
    }

    fn require_defined(&self, name: &str, gate: &str, op: &Operation) -> Result<()> {
        if self.registry.contains(name) {
            Ok(())
        } else {
            Err(QcdlError::UndefinedQubit {
                name: name.to_string(),
                gate: gate.to_string(),
                statement: op.to_string(),
                index: op.index(),
            })
        }
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit.unwrap_or_else(Circuit::new)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Defines are not drawn; each remaining operation is one column.
        let ops: Vec<&Operation> = self.operations.iter().filter(|op| !matches!(op, Operation::Define { .. })).collect();
        let num_ops = ops.len();
        let num_qubits = self.qubits.len();

        if num_qubits == 0 {
            return writeln!(f, "qcdl::Circuit[{} operations on 0 qubits]", num_ops);
        }

        let qubit_to_row: HashMap<&str, usize> = self.qubits.iter().enumerate().map(|(i, q)| (q.name(), i)).collect();
        let max_label_width = self.qubits.iter().map(|q| q.name().chars().count()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        // v_connect[row][t] is the connector drawn below `row` at time `t`
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Define { .. } => {}
                Operation::Unitary { gate, target, .. } => {
                    if let Some(r) = qubit_to_row.get(target.as_str()) {
                        op_grid[*r][t] = format_gate(gate.name());
                    }
                }
                Operation::Controlled { gate, target, controllers, .. } => {
                    let Some(r_tgt) = qubit_to_row.get(target.as_str()).copied() else {
                        continue;
                    };
                    op_grid[r_tgt][t] = format_gate(gate.base().name());
                    let (mut r_min, mut r_max) = (r_tgt, r_tgt);
                    for controller in controllers {
                        if let Some(r_ctrl) = qubit_to_row.get(controller.as_str()).copied() {
                            op_grid[r_ctrl][t] = format_gate("@");
                            r_min = r_min.min(r_ctrl);
                            r_max = r_max.max(r_ctrl);
                        }
                    }
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
                Operation::Measurement { .. } => {
                    for row in op_grid.iter_mut() {
                        row[t] = format_gate("M");
                    }
                }
            }
        }

        writeln!(f, "qcdl::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", self.qubits[r].name());
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
