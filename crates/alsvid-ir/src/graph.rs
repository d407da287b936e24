//! SSA circuit graph for one function body.
//!
//! The graph is an arena of operations and values. Each operation lives in
//! exactly one region; the function body is the top-level region, and
//! structured operations own nested regions. Definition order within a
//! region is the program order, and values obey single assignment with
//! definitions preceding uses.
//!
//! Mutation follows a staged discipline: new operations are inserted and
//! uses redirected first, and [`CircuitGraph::erase_op`] refuses to delete
//! an operation while any of its results is still consumed, so no dangling
//! reference is ever observable.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::op::{OpId, OpKind, Operation, Region, RegionId};
use crate::value::{ValueId, ValueType};

/// SSA graph of a single function body.
#[derive(Debug, Clone)]
pub struct CircuitGraph {
    /// Symbol name of the function this body belongs to.
    name: String,
    /// Operation arena; `None` marks an erased slot. Ids are never reused.
    ops: Vec<Option<Operation>>,
    /// Value arena: type per value id.
    value_types: Vec<ValueType>,
    /// Region arena.
    regions: Vec<Region>,
    /// Parent region of each live operation.
    op_region: FxHashMap<OpId, RegionId>,
    /// The top-level region (the function body).
    top: RegionId,
    /// Builder insertion stack; the last entry is the region new
    /// operations are appended to.
    cursor: Vec<RegionId>,
}

impl CircuitGraph {
    /// Create an empty graph for the function with the given symbol name.
    pub fn new(name: impl Into<String>) -> Self {
        let top = RegionId(0);
        Self {
            name: name.into(),
            ops: vec![],
            value_types: vec![],
            regions: vec![Region::default()],
            op_region: FxHashMap::default(),
            top,
            cursor: vec![top],
        }
    }

    /// Get the symbol name of the function this body belongs to.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the top-level region.
    #[inline]
    pub fn top_region(&self) -> RegionId {
        self.top
    }

    /// Get the type of a value.
    #[inline]
    pub fn value_type(&self, value: ValueId) -> Option<ValueType> {
        self.value_types.get(value.0 as usize).copied()
    }

    /// Get the number of values ever created.
    #[inline]
    pub fn num_values(&self) -> usize {
        self.value_types.len()
    }

    /// Get the number of live operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.op_region.len()
    }

    /// Get an operation by id. Returns `None` for erased or unknown ids.
    #[inline]
    pub fn op(&self, id: OpId) -> Option<&Operation> {
        self.ops.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    fn fresh_value(&mut self, ty: ValueType) -> ValueId {
        let id = ValueId::from(self.value_types.len());
        self.value_types.push(ty);
        id
    }

    fn check_operand(&self, value: ValueId, expected: ValueType) -> IrResult<()> {
        let got = self
            .value_type(value)
            .ok_or(IrError::ValueNotFound(value))?;
        if got != expected {
            return Err(IrError::TypeMismatch {
                value,
                expected,
                got,
            });
        }
        Ok(())
    }

    fn current_region(&self) -> RegionId {
        *self
            .cursor
            .last()
            .expect("builder cursor stack never empty")
    }

    /// Append an operation to the current region, creating its results.
    fn push_op(
        &mut self,
        kind: OpKind,
        operands: Vec<ValueId>,
        result_types: &[ValueType],
        regions: Vec<RegionId>,
    ) -> IrResult<(OpId, Vec<ValueId>)> {
        for &operand in &operands {
            if self.value_type(operand).is_none() {
                return Err(IrError::ValueNotFound(operand));
            }
        }
        let results: Vec<ValueId> = result_types.iter().map(|&ty| self.fresh_value(ty)).collect();
        let id = OpId(u32::try_from(self.ops.len()).expect("OpId overflow: exceeds u32::MAX"));
        self.ops.push(Some(Operation {
            kind,
            operands,
            results: results.clone(),
            regions,
        }));
        let region = self.current_region();
        self.regions[region.0 as usize].ops.push(id);
        self.op_region.insert(id, region);
        Ok((id, results))
    }

    // ---- builder API -------------------------------------------------

    /// Allocate a qubit register of the given size.
    pub fn alloc(&mut self, size: u32) -> IrResult<ValueId> {
        let (_, results) = self.push_op(
            OpKind::Alloc { size },
            vec![],
            &[ValueType::Register],
            vec![],
        )?;
        Ok(results[0])
    }

    /// Extract the qubit at `index` from a register. The result is a fresh
    /// qubit in |0⟩.
    pub fn extract(&mut self, register: ValueId, index: u32) -> IrResult<ValueId> {
        self.check_operand(register, ValueType::Register)?;
        let (_, results) = self.push_op(
            OpKind::Extract { index },
            vec![register],
            &[ValueType::Qubit],
            vec![],
        )?;
        Ok(results[0])
    }

    /// Re-insert a qubit into a register at `index`, producing the updated
    /// register value.
    pub fn insert(&mut self, register: ValueId, index: u32, qubit: ValueId) -> IrResult<ValueId> {
        self.check_operand(register, ValueType::Register)?;
        self.check_operand(qubit, ValueType::Qubit)?;
        let (_, results) = self.push_op(
            OpKind::Insert { index },
            vec![register, qubit],
            &[ValueType::Register],
            vec![],
        )?;
        Ok(results[0])
    }

    /// Create a floating-point constant (e.g. a rotation angle).
    pub fn float_const(&mut self, value: f64) -> IrResult<ValueId> {
        let (_, results) = self.push_op(
            OpKind::FloatConst { value },
            vec![],
            &[ValueType::Float],
            vec![],
        )?;
        Ok(results[0])
    }

    /// Apply a gate. Operands are angle parameters followed by input
    /// qubits; one qubit result is produced per input qubit, positionally.
    pub fn apply_gate(
        &mut self,
        gate: Gate,
        params: &[ValueId],
        qubits: &[ValueId],
    ) -> IrResult<Vec<ValueId>> {
        self.apply_gate_impl(gate, false, params, qubits)
    }

    /// Apply the adjoint form of a gate.
    pub fn apply_gate_adjoint(
        &mut self,
        gate: Gate,
        params: &[ValueId],
        qubits: &[ValueId],
    ) -> IrResult<Vec<ValueId>> {
        self.apply_gate_impl(gate, true, params, qubits)
    }

    fn apply_gate_impl(
        &mut self,
        gate: Gate,
        adjoint: bool,
        params: &[ValueId],
        qubits: &[ValueId],
    ) -> IrResult<Vec<ValueId>> {
        let expected_params = gate.num_params();
        let got_params = u32::try_from(params.len()).unwrap_or(u32::MAX);
        if got_params != expected_params {
            return Err(IrError::ParamCountMismatch {
                gate_name: gate.name(),
                expected: expected_params,
                got: got_params,
            });
        }
        let expected_qubits = gate.num_qubits();
        let got_qubits = u32::try_from(qubits.len()).unwrap_or(u32::MAX);
        if got_qubits != expected_qubits {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name(),
                expected: expected_qubits,
                got: got_qubits,
            });
        }
        for &param in params {
            self.check_operand(param, ValueType::Float)?;
        }
        let mut seen = FxHashSet::default();
        for &qubit in qubits {
            self.check_operand(qubit, ValueType::Qubit)?;
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateOperand(qubit));
            }
        }
        let mut operands = Vec::with_capacity(params.len() + qubits.len());
        operands.extend_from_slice(params);
        operands.extend_from_slice(qubits);
        let result_types = vec![ValueType::Qubit; qubits.len()];
        let (_, results) = self.push_op(
            OpKind::Gate { gate, adjoint },
            operands,
            &result_types,
            vec![],
        )?;
        Ok(results)
    }

    /// Apply a parameter-free single-qubit gate, returning its result.
    pub fn gate1(&mut self, gate: Gate, qubit: ValueId) -> IrResult<ValueId> {
        let results = self.apply_gate(gate, &[], &[qubit])?;
        Ok(results[0])
    }

    /// Apply the adjoint of a parameter-free single-qubit gate.
    pub fn gate1_adjoint(&mut self, gate: Gate, qubit: ValueId) -> IrResult<ValueId> {
        let results = self.apply_gate_adjoint(gate, &[], &[qubit])?;
        Ok(results[0])
    }

    /// Apply a SWAP, returning the post-swap values for both wires.
    pub fn swap(&mut self, a: ValueId, b: ValueId) -> IrResult<(ValueId, ValueId)> {
        let results = self.apply_gate(Gate::Swap, &[], &[a, b])?;
        Ok((results[0], results[1]))
    }

    /// Measure a qubit, producing the outcome bit and the post-measurement
    /// qubit.
    pub fn measure(&mut self, qubit: ValueId) -> IrResult<(ValueId, ValueId)> {
        self.check_operand(qubit, ValueType::Qubit)?;
        let (_, results) = self.push_op(
            OpKind::Measure,
            vec![qubit],
            &[ValueType::Bit, ValueType::Qubit],
            vec![],
        )?;
        Ok((results[0], results[1]))
    }

    /// Deallocate a register.
    pub fn dealloc(&mut self, register: ValueId) -> IrResult<()> {
        self.check_operand(register, ValueType::Register)?;
        self.push_op(OpKind::Dealloc, vec![register], &[], vec![])?;
        Ok(())
    }

    /// Open a structured scope. Subsequent operations are appended to the
    /// scope's nested region until [`CircuitGraph::end_scope`] is called.
    pub fn begin_scope(&mut self) -> IrResult<OpId> {
        let nested = RegionId(
            u32::try_from(self.regions.len()).expect("RegionId overflow: exceeds u32::MAX"),
        );
        self.regions.push(Region::default());
        let (id, _) = self.push_op(OpKind::Scope, vec![], &[], vec![nested])?;
        self.cursor.push(nested);
        Ok(id)
    }

    /// Close the innermost open scope.
    pub fn end_scope(&mut self) -> IrResult<()> {
        if self.cursor.len() <= 1 {
            return Err(IrError::InvalidGraph(
                "end_scope without a matching begin_scope".into(),
            ));
        }
        self.cursor.pop();
        Ok(())
    }

    // ---- traversal ---------------------------------------------------

    /// Visit every operation in definition order, recursing into nested
    /// regions pre-order.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(OpId, &Operation),
    {
        self.walk_region(self.top, &mut visitor);
    }

    fn walk_region<F>(&self, region: RegionId, visitor: &mut F)
    where
        F: FnMut(OpId, &Operation),
    {
        for &id in &self.regions[region.0 as usize].ops {
            let op = self.ops[id.0 as usize]
                .as_ref()
                .expect("region lists reference only live operations");
            visitor(id, op);
            for &nested in &op.regions {
                self.walk_region(nested, visitor);
            }
        }
    }

    /// Collect all live operation ids in definition order.
    pub fn op_ids_in_order(&self) -> Vec<OpId> {
        let mut ids = Vec::with_capacity(self.num_ops());
        self.walk(|id, _| ids.push(id));
        ids
    }

    /// Count live operations with the given mnemonic.
    pub fn count_mnemonic(&self, mnemonic: &str) -> usize {
        let mut count = 0;
        self.walk(|_, op| {
            if op.mnemonic() == mnemonic {
                count += 1;
            }
        });
        count
    }

    /// Count how many live operations consume a value.
    pub fn uses_of(&self, value: ValueId) -> usize {
        self.ops
            .iter()
            .flatten()
            .flat_map(|op| &op.operands)
            .filter(|&&operand| operand == value)
            .count()
    }

    // ---- mutation ----------------------------------------------------

    /// Insert a parameter-free single-qubit gate immediately after
    /// `anchor` in the same region, returning the new op and its result.
    pub fn insert_gate_after(
        &mut self,
        anchor: OpId,
        gate: Gate,
        adjoint: bool,
        operand: ValueId,
    ) -> IrResult<(OpId, ValueId)> {
        let region = *self
            .op_region
            .get(&anchor)
            .ok_or(IrError::OpNotFound(anchor))?;
        if gate.num_params() != 0 {
            return Err(IrError::ParamCountMismatch {
                gate_name: gate.name(),
                expected: gate.num_params(),
                got: 0,
            });
        }
        if gate.num_qubits() != 1 {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name(),
                expected: gate.num_qubits(),
                got: 1,
            });
        }
        self.check_operand(operand, ValueType::Qubit)?;

        let result = self.fresh_value(ValueType::Qubit);
        let id = OpId(u32::try_from(self.ops.len()).expect("OpId overflow: exceeds u32::MAX"));
        self.ops.push(Some(Operation {
            kind: OpKind::Gate { gate, adjoint },
            operands: vec![operand],
            results: vec![result],
            regions: vec![],
        }));
        let ops = &mut self.regions[region.0 as usize].ops;
        let anchor_pos = ops
            .iter()
            .position(|&o| o == anchor)
            .expect("op_region entry implies membership in the region");
        ops.insert(anchor_pos + 1, id);
        self.op_region.insert(id, region);
        Ok((id, result))
    }

    /// Redirect every use of `old` to `new`. Returns the number of operand
    /// slots rewritten.
    pub fn replace_all_uses(&mut self, old: ValueId, new: ValueId) -> IrResult<usize> {
        if self.value_type(old).is_none() {
            return Err(IrError::ValueNotFound(old));
        }
        if self.value_type(new).is_none() {
            return Err(IrError::ValueNotFound(new));
        }
        if old == new {
            return Ok(0);
        }
        let mut replaced = 0;
        for op in self.ops.iter_mut().flatten() {
            for operand in &mut op.operands {
                if *operand == old {
                    *operand = new;
                    replaced += 1;
                }
            }
        }
        Ok(replaced)
    }

    /// Erase an operation. Fails if any of its results still has uses or
    /// if it owns a non-empty nested region, so callers must redirect
    /// consumers first (insert and redirect, delete last).
    pub fn erase_op(&mut self, id: OpId) -> IrResult<Operation> {
        let region = *self.op_region.get(&id).ok_or(IrError::OpNotFound(id))?;
        let op = self.op(id).ok_or(IrError::OpNotFound(id))?;
        let mnemonic = op.mnemonic();
        for &nested in &op.regions {
            if !self.regions[nested.0 as usize].ops.is_empty() {
                return Err(IrError::InvalidGraph(format!(
                    "cannot erase '{mnemonic}': nested region is not empty"
                )));
            }
        }
        let results = op.results.clone();
        for value in results {
            let uses = self.uses_of(value);
            if uses > 0 {
                return Err(IrError::ResultInUse {
                    mnemonic,
                    value,
                    uses,
                });
            }
        }
        let ops = &mut self.regions[region.0 as usize].ops;
        let pos = ops
            .iter()
            .position(|&o| o == id)
            .expect("op_region entry implies membership in the region");
        ops.remove(pos);
        self.op_region.remove(&id);
        let erased = self.ops[id.0 as usize]
            .take()
            .expect("live op slot cannot be empty");
        Ok(erased)
    }

    // ---- integrity ---------------------------------------------------

    /// Verify the structural invariants of the graph:
    /// every operand is defined before use in walk order, every value is
    /// defined exactly once, and gate operand/result arities match.
    pub fn verify_integrity(&self) -> IrResult<()> {
        let mut defined: FxHashSet<ValueId> = FxHashSet::default();
        let mut order = Vec::with_capacity(self.num_ops());
        self.walk(|id, _| order.push(id));

        for id in order {
            let op = self.op(id).ok_or(IrError::OpNotFound(id))?;
            for &operand in &op.operands {
                if self.value_type(operand).is_none() {
                    return Err(IrError::ValueNotFound(operand));
                }
                if !defined.contains(&operand) {
                    return Err(IrError::InvalidGraph(format!(
                        "operand {operand} of '{}' used before definition",
                        op.mnemonic()
                    )));
                }
            }
            if let OpKind::Gate { gate, .. } = op.kind {
                let num_qubits = gate.num_qubits() as usize;
                let num_params = gate.num_params() as usize;
                if op.operands.len() != num_qubits + num_params
                    || op.results.len() != num_qubits
                {
                    return Err(IrError::InvalidGraph(format!(
                        "gate '{}' has inconsistent arity",
                        gate.name()
                    )));
                }
            }
            for &result in &op.results {
                if !defined.insert(result) {
                    return Err(IrError::InvalidGraph(format!(
                        "value {result} defined more than once"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_qubit_body() -> (CircuitGraph, ValueId, ValueId) {
        let mut graph = CircuitGraph::new("circuit");
        let reg = graph.alloc(2).unwrap();
        let q0 = graph.extract(reg, 0).unwrap();
        let q1 = graph.extract(reg, 1).unwrap();
        (graph, q0, q1)
    }

    #[test]
    fn test_build_simple_circuit() {
        let (mut graph, q0, q1) = two_qubit_body();
        let q0 = graph.gate1(Gate::Hadamard, q0).unwrap();
        let (a, b) = graph.swap(q0, q1).unwrap();
        let reg2 = graph.alloc(2).unwrap();
        graph.insert(reg2, 0, a).unwrap();
        graph.insert(reg2, 1, b).unwrap();

        assert_eq!(graph.num_ops(), 8);
        assert_eq!(graph.count_mnemonic("SWAP"), 1);
        assert_eq!(graph.count_mnemonic("Hadamard"), 1);
        graph.verify_integrity().unwrap();
    }

    #[test]
    fn test_walk_recurses_into_scopes() {
        let (mut graph, q0, _) = two_qubit_body();
        graph.begin_scope().unwrap();
        let q0 = graph.gate1(Gate::Hadamard, q0).unwrap();
        graph.end_scope().unwrap();
        graph.gate1(Gate::PauliX, q0).unwrap();

        let mnemonics: Vec<&str> = {
            let mut names = vec![];
            graph.walk(|_, op| names.push(op.mnemonic()));
            names
        };
        assert_eq!(
            mnemonics,
            vec!["alloc", "extract", "extract", "scope", "Hadamard", "PauliX"]
        );
        graph.verify_integrity().unwrap();
    }

    #[test]
    fn test_end_scope_unbalanced() {
        let mut graph = CircuitGraph::new("circuit");
        assert!(matches!(
            graph.end_scope(),
            Err(IrError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_insert_gate_after_ordering() {
        let (mut graph, q0, q1) = two_qubit_body();
        graph.swap(q0, q1).unwrap();
        let swap_id = *graph.op_ids_in_order().last().unwrap();

        let (x_id, x_out) = graph
            .insert_gate_after(swap_id, Gate::PauliX, false, q0)
            .unwrap();
        let (_h_id, _) = graph
            .insert_gate_after(x_id, Gate::Hadamard, false, x_out)
            .unwrap();

        let mnemonics: Vec<&str> = {
            let mut names = vec![];
            graph.walk(|_, op| names.push(op.mnemonic()));
            names
        };
        assert_eq!(
            mnemonics,
            vec!["alloc", "extract", "extract", "SWAP", "PauliX", "Hadamard"]
        );
    }

    #[test]
    fn test_erase_refuses_while_results_used() {
        let (mut graph, q0, q1) = two_qubit_body();
        let (a, _b) = graph.swap(q0, q1).unwrap();
        let swap_id = graph.op_ids_in_order()[3];
        graph.gate1(Gate::Hadamard, a).unwrap();

        let err = graph.erase_op(swap_id).unwrap_err();
        assert!(matches!(err, IrError::ResultInUse { .. }));
        // still present
        assert_eq!(graph.count_mnemonic("SWAP"), 1);
    }

    #[test]
    fn test_staged_erase_succeeds_after_redirect() {
        let (mut graph, q0, q1) = two_qubit_body();
        let (a, b) = graph.swap(q0, q1).unwrap();
        let swap_id = graph.op_ids_in_order()[3];
        graph.gate1(Gate::Hadamard, a).unwrap();

        let replaced = graph.replace_all_uses(a, q0).unwrap();
        assert_eq!(replaced, 1);
        graph.replace_all_uses(b, q1).unwrap();

        let erased = graph.erase_op(swap_id).unwrap();
        assert_eq!(erased.mnemonic(), "SWAP");
        assert_eq!(graph.count_mnemonic("SWAP"), 0);
        graph.verify_integrity().unwrap();
    }

    #[test]
    fn test_gate_arity_errors() {
        let (mut graph, q0, _q1) = two_qubit_body();
        assert!(matches!(
            graph.apply_gate(Gate::CNOT, &[], &[q0]),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            graph.apply_gate(Gate::RX, &[], &[q0]),
            Err(IrError::ParamCountMismatch { expected: 1, got: 0, .. })
        ));
        assert!(matches!(
            graph.apply_gate(Gate::Swap, &[], &[q0, q0]),
            Err(IrError::DuplicateOperand(_))
        ));
        let reg = graph.alloc(1).unwrap();
        assert!(matches!(
            graph.apply_gate(Gate::Hadamard, &[], &[reg]),
            Err(IrError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_rotation_with_parameter() {
        let (mut graph, q0, _) = two_qubit_body();
        let theta = graph.float_const(0.5).unwrap();
        let out = graph.apply_gate(Gate::RX, &[theta], &[q0]).unwrap();
        assert_eq!(out.len(), 1);
        graph.verify_integrity().unwrap();
    }

    #[test]
    fn test_measure_produces_bit_and_qubit() {
        let (mut graph, q0, _) = two_qubit_body();
        let (bit, post) = graph.measure(q0).unwrap();
        assert_eq!(graph.value_type(bit), Some(ValueType::Bit));
        assert_eq!(graph.value_type(post), Some(ValueType::Qubit));
    }

    #[test]
    fn test_replace_all_uses_unknown_value() {
        let (mut graph, q0, _) = two_qubit_body();
        let err = graph.replace_all_uses(ValueId(999), q0).unwrap_err();
        assert!(matches!(err, IrError::ValueNotFound(_)));
    }
}
