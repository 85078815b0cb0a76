//! Configuration injection
//!
//! Values are routed by their kind tag through a fixed setter table. A value whose
//! kind the algorithm has no setter for is skipped. Values matching a declared
//! requirement must agree with its kind and arity; everything else is up to the
//! algorithm's setter.

use crate::algorithm::Algorithm;
use crate::configuration::{
    ConfigurationKind, ConfigurationPayload, ConfigurationRequirement, ConfigurationValue,
};
use crate::error::AlgorithmConfigurationError;
use std::collections::HashSet;
use tracing::debug;

type SupportsFn = fn(&mut dyn Algorithm) -> bool;
type ApplyFn =
    fn(&mut dyn Algorithm, &str, &ConfigurationPayload) -> Result<(), AlgorithmConfigurationError>;

struct Setter {
    kind: ConfigurationKind,
    supports: SupportsFn,
    apply: ApplyFn,
}

const SETTERS: &[Setter] = &[
    Setter {
        kind: ConfigurationKind::Text,
        supports: supports_text,
        apply: apply_text,
    },
    Setter {
        kind: ConfigurationKind::Boolean,
        supports: supports_boolean,
        apply: apply_boolean,
    },
    Setter {
        kind: ConfigurationKind::Integer,
        supports: supports_integer,
        apply: apply_integer,
    },
    Setter {
        kind: ConfigurationKind::RelationalInput,
        supports: supports_relational_input,
        apply: apply_relational_input,
    },
    Setter {
        kind: ConfigurationKind::FileInput,
        supports: supports_file_input,
        apply: apply_file_input,
    },
];

fn setter_for(kind: ConfigurationKind) -> Option<&'static Setter> {
    SETTERS.iter().find(|setter| setter.kind == kind)
}

fn supports_text(algorithm: &mut dyn Algorithm) -> bool {
    algorithm.as_string_parameter_algorithm().is_some()
}

fn supports_boolean(algorithm: &mut dyn Algorithm) -> bool {
    algorithm.as_boolean_parameter_algorithm().is_some()
}

fn supports_integer(algorithm: &mut dyn Algorithm) -> bool {
    algorithm.as_integer_parameter_algorithm().is_some()
}

fn supports_relational_input(algorithm: &mut dyn Algorithm) -> bool {
    algorithm.as_relational_input_parameter_algorithm().is_some()
}

fn supports_file_input(algorithm: &mut dyn Algorithm) -> bool {
    algorithm.as_file_input_parameter_algorithm().is_some()
}

// Each apply fn runs only after its setter was matched by kind and `supports`.

fn apply_text(
    algorithm: &mut dyn Algorithm,
    identifier: &str,
    payload: &ConfigurationPayload,
) -> Result<(), AlgorithmConfigurationError> {
    if let (Some(target), ConfigurationPayload::Text(values)) =
        (algorithm.as_string_parameter_algorithm(), payload)
    {
        target.set_string_configuration_value(identifier, values)?;
    }
    Ok(())
}

fn apply_boolean(
    algorithm: &mut dyn Algorithm,
    identifier: &str,
    payload: &ConfigurationPayload,
) -> Result<(), AlgorithmConfigurationError> {
    if let (Some(target), ConfigurationPayload::Boolean(values)) =
        (algorithm.as_boolean_parameter_algorithm(), payload)
    {
        target.set_boolean_configuration_value(identifier, values)?;
    }
    Ok(())
}

fn apply_integer(
    algorithm: &mut dyn Algorithm,
    identifier: &str,
    payload: &ConfigurationPayload,
) -> Result<(), AlgorithmConfigurationError> {
    if let (Some(target), ConfigurationPayload::Integer(values)) =
        (algorithm.as_integer_parameter_algorithm(), payload)
    {
        target.set_integer_configuration_value(identifier, values)?;
    }
    Ok(())
}

fn apply_relational_input(
    algorithm: &mut dyn Algorithm,
    identifier: &str,
    payload: &ConfigurationPayload,
) -> Result<(), AlgorithmConfigurationError> {
    if let (Some(target), ConfigurationPayload::RelationalInput(values)) =
        (algorithm.as_relational_input_parameter_algorithm(), payload)
    {
        target.set_relational_input_configuration_value(identifier, values)?;
    }
    Ok(())
}

fn apply_file_input(
    algorithm: &mut dyn Algorithm,
    identifier: &str,
    payload: &ConfigurationPayload,
) -> Result<(), AlgorithmConfigurationError> {
    if let (Some(target), ConfigurationPayload::FileInput(values)) =
        (algorithm.as_file_input_parameter_algorithm(), payload)
    {
        target.set_file_input_configuration_value(identifier, values)?;
    }
    Ok(())
}

/// Applies caller-supplied values to a freshly loaded algorithm
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigurationInjector;

impl ConfigurationInjector {
    pub fn new() -> Self {
        Self
    }

    /// Apply `values` in order; the first rejected value aborts
    ///
    /// Values applied before a failure are not rolled back.
    /// Returns the number of values handed to a setter.
    pub fn apply(
        &self,
        algorithm: &mut dyn Algorithm,
        values: &[ConfigurationValue],
    ) -> Result<usize, AlgorithmConfigurationError> {
        let requirements = algorithm.configuration_requirements();
        check_unique(&requirements)?;

        let mut applied = 0;
        for value in values {
            let supported = setter_for(value.kind())
                .filter(|setter| (setter.supports)(&mut *algorithm));
            let Some(setter) = supported else {
                debug!(
                    identifier = %value.identifier,
                    kind = %value.kind(),
                    "Algorithm has no setter for this kind; value skipped"
                );
                continue;
            };

            if let Some(requirement) = requirements
                .iter()
                .find(|r| r.identifier == value.identifier)
            {
                check_requirement(requirement, value)?;
            }

            (setter.apply)(&mut *algorithm, &value.identifier, &value.payload)?;
            debug!(identifier = %value.identifier, count = value.len(), "Configuration applied");
            applied += 1;
        }
        Ok(applied)
    }
}

fn check_unique(requirements: &[ConfigurationRequirement]) -> Result<(), AlgorithmConfigurationError> {
    let mut seen = HashSet::new();
    for requirement in requirements {
        if !seen.insert(requirement.identifier.as_str()) {
            return Err(AlgorithmConfigurationError::DuplicateRequirement(
                requirement.identifier.clone(),
            ));
        }
    }
    Ok(())
}

fn check_requirement(
    requirement: &ConfigurationRequirement,
    value: &ConfigurationValue,
) -> Result<(), AlgorithmConfigurationError> {
    if requirement.kind != value.kind() {
        return Err(AlgorithmConfigurationError::KindMismatch {
            identifier: value.identifier.clone(),
            expected: requirement.kind,
            actual: value.kind(),
        });
    }
    if !requirement.arity.accepts(value.len()) {
        return Err(AlgorithmConfigurationError::ArityMismatch {
            identifier: value.identifier.clone(),
            expected: requirement.arity,
            actual: value.len(),
        });
    }
    Ok(())
}
