//! Pass trait and types for compilation passes.

use alsvid_ir::CircuitGraph;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass that reads but does not modify the graph.
    Analysis,
    /// Transformation pass that modifies the graph.
    Transformation,
}

/// A compilation pass that operates on one function body.
///
/// Each invocation processes exactly one [`CircuitGraph`]; passes share no
/// mutable state across invocations, so a host manager may schedule
/// independent function-level invocations across threads.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given function body.
    ///
    /// Analysis passes must not modify the graph but may write their
    /// result to the `PropertySet`. Transformation passes mutate the
    /// graph and may read from the `PropertySet`.
    fn run(&self, graph: &mut CircuitGraph, properties: &mut PropertySet) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _graph: &CircuitGraph, _properties: &PropertySet) -> bool {
        true
    }
}
