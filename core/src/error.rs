use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Board rows have inconsistent widths")]
    RaggedLayout,
    #[error("Board layout has no cells")]
    EmptyLayout,
}

pub type Result<T> = core::result::Result<T, GridError>;
