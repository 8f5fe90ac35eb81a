use inv_api::ApiError;
use inv_catalog::CatalogError;
use inv_compose::ComposeError;
use inv_config::ConfigError;
use inv_core::{CoreError, ErrorCode};

/// Process exit status for a failed command.
///
/// Compose failures pass the child's status through; catalog failures use
/// their [`ErrorCode`]; anything unclassified exits 1.
pub fn code_for(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| {
            if let Some(err) = cause.downcast_ref::<ComposeError>() {
                return Some(err.exit_code());
            }
            if let Some(err) = cause.downcast_ref::<CatalogError>() {
                return Some(err.code().as_i32());
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return Some(ErrorCode::ConfigurationError.as_i32());
            }
            if cause.downcast_ref::<ApiError>().is_some() {
                return Some(ErrorCode::ApiError.as_i32());
            }
            cause.downcast_ref::<CoreError>().map(|err| match err {
                CoreError::UnknownEntityKind { .. } => ErrorCode::InvalidEntityType.as_i32(),
                CoreError::EmptyCategoryPath(_) => ErrorCode::CategoryError.as_i32(),
                CoreError::Validation(_) => ErrorCode::InvalidData.as_i32(),
            })
        })
        .unwrap_or(1)
}
