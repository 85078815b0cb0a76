//! Injection succeeds exactly when the declared arity accepts the value count

use metanome::algorithm::{Algorithm, IntegerParameterAlgorithm};
use metanome::configuration::{Arity, ConfigurationRequirement, ConfigurationValue};
use metanome::error::{AlgorithmConfigurationError, AlgorithmExecutionError};
use metanome::injector::ConfigurationInjector;
use proptest::prelude::*;

struct Bounded {
    arity: Arity,
    received: Option<usize>,
}

impl Algorithm for Bounded {
    fn configuration_requirements(&self) -> Vec<ConfigurationRequirement> {
        vec![ConfigurationRequirement::integer("bounds").with_arity(self.arity)]
    }

    fn execute(&mut self) -> Result<(), AlgorithmExecutionError> {
        Ok(())
    }

    fn as_integer_parameter_algorithm(&mut self) -> Option<&mut dyn IntegerParameterAlgorithm> {
        Some(self)
    }
}

impl IntegerParameterAlgorithm for Bounded {
    fn set_integer_configuration_value(
        &mut self,
        _identifier: &str,
        values: &[i64],
    ) -> Result<(), AlgorithmConfigurationError> {
        self.received = Some(values.len());
        Ok(())
    }
}

proptest! {
    #[test]
    fn arity_gates_the_setter(min in 0usize..4, extra in prop::option::of(0usize..4), count in 0usize..10) {
        let arity = match extra {
            Some(extra) => Arity::between(min, min + extra),
            None => Arity::at_least(min),
        };
        let mut algorithm = Bounded { arity, received: None };
        let value = ConfigurationValue::integer("bounds", (0..count as i64).collect::<Vec<_>>());

        let outcome = ConfigurationInjector::new().apply(&mut algorithm, &[value]);
        if arity.accepts(count) {
            prop_assert_eq!(outcome.unwrap(), 1);
            prop_assert_eq!(algorithm.received, Some(count));
        } else {
            let is_arity_mismatch = matches!(
                outcome,
                Err(AlgorithmConfigurationError::ArityMismatch { actual, .. }) if actual == count
            );
            prop_assert!(is_arity_mismatch);
            prop_assert_eq!(algorithm.received, None);
        }
    }
}
