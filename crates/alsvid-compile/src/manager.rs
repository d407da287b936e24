//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use alsvid_ir::CircuitGraph;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::property::PropertySet;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given function body.
    #[instrument(skip(self, graph, properties))]
    pub fn run(&self, graph: &mut CircuitGraph, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on function '{}' with {} ops",
            self.passes.len(),
            graph.name(),
            graph.num_ops()
        );

        for pass in &self.passes {
            if pass.should_run(graph, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(graph, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), graph.num_ops());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final op count: {}",
            graph.num_ops()
        );

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::Gate;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_pass_manager_run() {
        let pm = PassManager::new();
        let mut props = PropertySet::new();

        let mut graph = CircuitGraph::new("test");
        let reg = graph.alloc(2).unwrap();
        let q0 = graph.extract(reg, 0).unwrap();
        let q1 = graph.extract(reg, 1).unwrap();
        graph.gate1(Gate::Hadamard, q0).unwrap();
        graph.gate1(Gate::PauliX, q1).unwrap();

        pm.run(&mut graph, &mut props).unwrap();
        assert_eq!(graph.num_ops(), 5);
    }
}
