use hora_core_types::{HoraError, WidgetKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{kind} {title:?} not loaded")]
    MissingState { kind: WidgetKind, title: String },
    #[error("{kind} {title:?} declared with zero units")]
    EmptyWidget { kind: WidgetKind, title: String },
}

impl From<RegistryError> for HoraError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::MissingState { kind, title } => HoraError::missing(kind, title),
            RegistryError::EmptyWidget { kind, title } => HoraError::EmptyWidget { kind, title },
        }
    }
}
