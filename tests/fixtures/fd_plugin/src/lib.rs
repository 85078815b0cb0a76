//! Functional dependency algorithm shipped as a dynamic library
//!
//! `failWith = io` makes the run fail with an I/O error created inside this
//! library after the result was delivered.

use metanome::algorithm::{
    Algorithm, FunctionalDependencyAlgorithm, FunctionalDependencyResultReceiver,
    StringParameterAlgorithm,
};
use metanome::configuration::{Arity, ConfigurationRequirement};
use metanome::error::{AlgorithmConfigurationError, AlgorithmExecutionError};
use metanome::results::FunctionalDependency;
use metanome::types::{ColumnCombination, ColumnIdentifier};
use std::io;
use std::sync::Arc;

#[derive(Default)]
pub struct FixtureFdAlgorithm {
    output: Option<String>,
    fail_with: Option<String>,
    receiver: Option<Arc<dyn FunctionalDependencyResultReceiver>>,
}

impl Algorithm for FixtureFdAlgorithm {
    fn configuration_requirements(&self) -> Vec<ConfigurationRequirement> {
        vec![
            ConfigurationRequirement::text("pathToOutputFile"),
            ConfigurationRequirement::text("failWith").with_arity(Arity::between(0, 1)),
        ]
    }

    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        let receiver = self
            .receiver
            .as_ref()
            .ok_or_else(|| AlgorithmExecutionError::MissingConfiguration("result receiver".into()))?;
        if self.output.is_none() {
            return Err(AlgorithmExecutionError::MissingConfiguration(
                "pathToOutputFile".into(),
            ));
        }

        receiver.receive_functional_dependency(FunctionalDependency::new(
            ColumnCombination::new([
                ColumnIdentifier::new("plugin", "a"),
                ColumnIdentifier::new("plugin", "b"),
            ]),
            ColumnIdentifier::new("plugin", "c"),
        ))?;

        match self.fail_with.as_deref() {
            Some("io") => Err(io::Error::new(io::ErrorKind::Other, "fixture plugin io failure").into()),
            Some(other) => Err(AlgorithmExecutionError::Failed(format!("requested failure: {}", other))),
            None => Ok(()),
        }
    }

    fn as_functional_dependency_algorithm(
        &mut self,
    ) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        Some(self)
    }

    fn as_string_parameter_algorithm(&mut self) -> Option<&mut dyn StringParameterAlgorithm> {
        Some(self)
    }
}

impl FunctionalDependencyAlgorithm for FixtureFdAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn FunctionalDependencyResultReceiver>) {
        self.receiver = Some(receiver);
    }
}

impl StringParameterAlgorithm for FixtureFdAlgorithm {
    fn set_string_configuration_value(
        &mut self,
        identifier: &str,
        values: &[String],
    ) -> Result<(), AlgorithmConfigurationError> {
        match identifier {
            "pathToOutputFile" => self.output = values.first().cloned(),
            "failWith" => self.fail_with = values.first().cloned(),
            other => {
                return Err(AlgorithmConfigurationError::UnknownIdentifier(
                    other.to_string(),
                ))
            }
        }
        Ok(())
    }
}

metanome::export_algorithms!(FixtureFdAlgorithm);
