//! Capability registry
//!
//! Fixed table from result kind to the wiring step that probes an algorithm for
//! that capability and, when present, binds an adapter to the shared sink. The
//! adapters only tag the payload and forward it.

use crate::algorithm::{
    Algorithm, FunctionalDependencyResultReceiver, InclusionDependencyResultReceiver,
    UniqueColumnCombinationResultReceiver,
};
use crate::error::CouldNotReceiveResultError;
use crate::receiver::CloseableOmniscientResultReceiver;
use crate::results::{
    DependencyResult, FunctionalDependency, InclusionDependency, ResultKind,
    UniqueColumnCombination,
};
use std::sync::Arc;

/// The executor's long-lived sink; adapters only ever deliver to it
pub type SharedSink = Arc<dyn CloseableOmniscientResultReceiver>;

/// Probe `algorithm` and wire an adapter; returns whether the capability exists
pub type WireFn = fn(&mut dyn Algorithm, &SharedSink) -> bool;

pub struct Capability {
    pub kind: ResultKind,
    pub wire: WireFn,
}

/// Probing order used when wiring an algorithm
pub const CAPABILITIES: &[Capability] = &[
    Capability {
        kind: ResultKind::FunctionalDependency,
        wire: wire_functional_dependency,
    },
    Capability {
        kind: ResultKind::InclusionDependency,
        wire: wire_inclusion_dependency,
    },
    Capability {
        kind: ResultKind::UniqueColumnCombination,
        wire: wire_unique_column_combination,
    },
];

/// Wire every capability `algorithm` implements; returns the wired kinds
pub fn wire_all(algorithm: &mut dyn Algorithm, sink: &SharedSink) -> Vec<ResultKind> {
    let mut wired = Vec::new();
    for capability in CAPABILITIES {
        if (capability.wire)(&mut *algorithm, sink) {
            wired.push(capability.kind);
        }
    }
    wired
}

fn wire_functional_dependency(algorithm: &mut dyn Algorithm, sink: &SharedSink) -> bool {
    match algorithm.as_functional_dependency_algorithm() {
        Some(capable) => {
            capable.set_result_receiver(Arc::new(ResultAdapter::new(sink.clone())));
            true
        }
        None => false,
    }
}

fn wire_inclusion_dependency(algorithm: &mut dyn Algorithm, sink: &SharedSink) -> bool {
    match algorithm.as_inclusion_dependency_algorithm() {
        Some(capable) => {
            capable.set_result_receiver(Arc::new(ResultAdapter::new(sink.clone())));
            true
        }
        None => false,
    }
}

fn wire_unique_column_combination(algorithm: &mut dyn Algorithm, sink: &SharedSink) -> bool {
    match algorithm.as_unique_column_combination_algorithm() {
        Some(capable) => {
            capable.set_result_receiver(Arc::new(ResultAdapter::new(sink.clone())));
            true
        }
        None => false,
    }
}

/// Forwards typed results to the shared sink, tagged with their variant
pub struct ResultAdapter {
    sink: SharedSink,
}

impl ResultAdapter {
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }

    fn forward(&self, result: DependencyResult) -> Result<(), CouldNotReceiveResultError> {
        self.sink.receive_result(result)
    }
}

impl FunctionalDependencyResultReceiver for ResultAdapter {
    fn receive_functional_dependency(
        &self,
        result: FunctionalDependency,
    ) -> Result<(), CouldNotReceiveResultError> {
        self.forward(DependencyResult::FunctionalDependency(result))
    }
}

impl InclusionDependencyResultReceiver for ResultAdapter {
    fn receive_inclusion_dependency(
        &self,
        result: InclusionDependency,
    ) -> Result<(), CouldNotReceiveResultError> {
        self.forward(DependencyResult::InclusionDependency(result))
    }
}

impl UniqueColumnCombinationResultReceiver for ResultAdapter {
    fn receive_unique_column_combination(
        &self,
        result: UniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResultError> {
        self.forward(DependencyResult::UniqueColumnCombination(result))
    }
}
