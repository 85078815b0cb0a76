//! Two algorithms in one library; hosts must refuse to pick one

use metanome::algorithm::Algorithm;
use metanome::configuration::ConfigurationRequirement;
use metanome::error::AlgorithmExecutionError;

#[derive(Default)]
pub struct FirstAlgorithm;

impl Algorithm for FirstAlgorithm {
    fn configuration_requirements(&self) -> Vec<ConfigurationRequirement> {
        Vec::new()
    }

    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct SecondAlgorithm;

impl Algorithm for SecondAlgorithm {
    fn configuration_requirements(&self) -> Vec<ConfigurationRequirement> {
        Vec::new()
    }

    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        Ok(())
    }
}

metanome::export_algorithms!(FirstAlgorithm, SecondAlgorithm);
