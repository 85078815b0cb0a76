//! Algorithm contract
//!
//! An algorithm is an opaque object behind [`Algorithm`]. What it can produce and
//! which configuration kinds it accepts is discovered by probing the `as_*`
//! methods; each probe returns the matching capability trait object, or `None`
//! when the algorithm lacks that capability. A holistic algorithm answers more
//! than one result probe.

use crate::configuration::ConfigurationRequirement;
use crate::error::{
    AlgorithmConfigurationError, AlgorithmExecutionError, CouldNotReceiveResultError,
    ProgressError,
};
use crate::files::FileGenerator;
use crate::input::{FileInputGenerator, RelationalInputGenerator};
use crate::results::{FunctionalDependency, InclusionDependency, UniqueColumnCombination};
use std::sync::Arc;

/// Entry contract every loadable algorithm implements
pub trait Algorithm: Send {
    /// Ordered configuration slots; identifiers are unique
    fn configuration_requirements(&self) -> Vec<ConfigurationRequirement>;

    /// Run the algorithm to completion on the calling thread
    fn execute(&mut self) -> Result<(), AlgorithmExecutionError>;

    fn as_functional_dependency_algorithm(
        &mut self,
    ) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        None
    }

    fn as_inclusion_dependency_algorithm(&mut self) -> Option<&mut dyn InclusionDependencyAlgorithm> {
        None
    }

    fn as_unique_column_combination_algorithm(
        &mut self,
    ) -> Option<&mut dyn UniqueColumnCombinationAlgorithm> {
        None
    }

    fn as_string_parameter_algorithm(&mut self) -> Option<&mut dyn StringParameterAlgorithm> {
        None
    }

    fn as_boolean_parameter_algorithm(&mut self) -> Option<&mut dyn BooleanParameterAlgorithm> {
        None
    }

    fn as_integer_parameter_algorithm(&mut self) -> Option<&mut dyn IntegerParameterAlgorithm> {
        None
    }

    fn as_relational_input_parameter_algorithm(
        &mut self,
    ) -> Option<&mut dyn RelationalInputParameterAlgorithm> {
        None
    }

    fn as_file_input_parameter_algorithm(
        &mut self,
    ) -> Option<&mut dyn FileInputParameterAlgorithm> {
        None
    }

    fn as_progress_estimating_algorithm(&mut self) -> Option<&mut dyn ProgressEstimatingAlgorithm> {
        None
    }

    fn as_temp_file_algorithm(&mut self) -> Option<&mut dyn TempFileAlgorithm> {
        None
    }
}

// Result receivers handed to algorithms.

pub trait FunctionalDependencyResultReceiver: Send + Sync {
    fn receive_functional_dependency(
        &self,
        result: FunctionalDependency,
    ) -> Result<(), CouldNotReceiveResultError>;
}

pub trait InclusionDependencyResultReceiver: Send + Sync {
    fn receive_inclusion_dependency(
        &self,
        result: InclusionDependency,
    ) -> Result<(), CouldNotReceiveResultError>;
}

pub trait UniqueColumnCombinationResultReceiver: Send + Sync {
    fn receive_unique_column_combination(
        &self,
        result: UniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResultError>;
}

/// Progress sink handed to progress-estimating algorithms
pub trait ProgressReceiver: Send + Sync {
    /// Report completion in `[0, 1]`
    fn update_progress(&self, progress: f32) -> Result<(), ProgressError>;
}

// Result capabilities.

pub trait FunctionalDependencyAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn FunctionalDependencyResultReceiver>);
}

pub trait InclusionDependencyAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn InclusionDependencyResultReceiver>);
}

pub trait UniqueColumnCombinationAlgorithm {
    fn set_result_receiver(&mut self, receiver: Arc<dyn UniqueColumnCombinationResultReceiver>);
}

// Parameter setters, one per configuration kind. Implementations validate the
// identifier and the number of values themselves.

pub trait StringParameterAlgorithm {
    fn set_string_configuration_value(
        &mut self,
        identifier: &str,
        values: &[String],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait BooleanParameterAlgorithm {
    fn set_boolean_configuration_value(
        &mut self,
        identifier: &str,
        values: &[bool],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait IntegerParameterAlgorithm {
    fn set_integer_configuration_value(
        &mut self,
        identifier: &str,
        values: &[i64],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait RelationalInputParameterAlgorithm {
    fn set_relational_input_configuration_value(
        &mut self,
        identifier: &str,
        values: &[Arc<dyn RelationalInputGenerator>],
    ) -> Result<(), AlgorithmConfigurationError>;
}

pub trait FileInputParameterAlgorithm {
    fn set_file_input_configuration_value(
        &mut self,
        identifier: &str,
        values: &[Arc<dyn FileInputGenerator>],
    ) -> Result<(), AlgorithmConfigurationError>;
}

// Runtime services.

pub trait ProgressEstimatingAlgorithm {
    fn set_progress_receiver(&mut self, receiver: Arc<dyn ProgressReceiver>);
}

pub trait TempFileAlgorithm {
    fn set_temp_file_generator(&mut self, generator: Arc<dyn FileGenerator>);
}
