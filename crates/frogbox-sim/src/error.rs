//! Errors raised inside a resolution sequence.

use thiserror::Error;

/// World state the resolution relies on was not there. Aborts only the
/// current resolution; the session is left untouched.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("entity {entity:?} is missing its {component} component")]
    MissingComponent {
        entity: hecs::Entity,
        component: &'static str,
    },
}
