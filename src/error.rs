use crate::entities::Entity;
use thiserror::Error;

/// Errors reported by the [registry](crate::entities::EntityRegistry).
///
/// Most lookups fail soft (`false`, `None` or an empty result).
/// These are only returned where the caller asked for something specific.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
	/// The entity was never created or has already been removed.
	#[error("{0} does not exist")]
	EntityNotFound(Entity),

	/// The entity exists but does not carry the requested component.
	#[error("{entity} is missing component `{component}`")]
	ComponentMissing {
		entity: Entity,
		component: &'static str,
	},

	/// The entity and component-type indices disagree.
	#[error("component index out of sync: {0}")]
	IndexDesync(String),
}

pub type Result<T, E = EcsError> = std::result::Result<T, E>;
