// Construction of blank aggregate states for the repository.
//
// Responsibilities
// - Hold one construction strategy per aggregate state type, registered at startup.
// - Fail with AggregateConstructionError when a type has no strategy.

use crate::shared::core::aggregate::AggregateState;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not construct aggregate {aggregate}: {reason}")]
pub struct AggregateConstructionError {
    pub aggregate: &'static str,
    pub reason: String,
}

pub trait AggregateFactory: Send + Sync {
    fn create<S: AggregateState>(&self) -> Result<S, AggregateConstructionError>;
}

type Constructor = Box<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

#[derive(Default)]
pub struct RegistryAggregateFactory {
    constructors: HashMap<TypeId, Constructor>,
}

impl RegistryAggregateFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_with<S, F>(&mut self, constructor: F) -> &mut Self
    where
        S: AggregateState,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.constructors.insert(
            TypeId::of::<S>(),
            Box::new(move || Box::new(constructor()) as Box<dyn Any + Send>),
        );
        self
    }

    pub fn register_default<S>(&mut self) -> &mut Self
    where
        S: AggregateState + Default,
    {
        self.register_with(S::default)
    }

    pub fn is_registered<S: AggregateState>(&self) -> bool {
        self.constructors.contains_key(&TypeId::of::<S>())
    }
}

impl AggregateFactory for RegistryAggregateFactory {
    fn create<S: AggregateState>(&self) -> Result<S, AggregateConstructionError> {
        let constructor =
            self.constructors
                .get(&TypeId::of::<S>())
                .ok_or_else(|| AggregateConstructionError {
                    aggregate: type_name::<S>(),
                    reason: "no construction strategy registered".to_string(),
                })?;
        constructor()
            .downcast::<S>()
            .map(|state| *state)
            .map_err(|_| AggregateConstructionError {
                aggregate: type_name::<S>(),
                reason: "construction strategy produced a different type".to_string(),
            })
    }
}
