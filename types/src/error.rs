//! Errors raised when constructing shared types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("account identity must not be empty")]
    EmptyAccount,
}
