use std::path::PathBuf;

/// Fatal setup errors of the conversion pipeline. Row-level problems never end up here, they are
/// resolved by skipping or substituting values.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),
}
