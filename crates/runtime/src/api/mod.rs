//! Types downstream clients interact with.
//!
//! Every service call ends in an [`OperationResult`]; [`OperationError`] is
//! the internal failure type services convert at that boundary.

mod error;
mod result;

pub use error::{GENERIC_FAILURE, OperationError, Result};
pub use result::{EffectChange, OperationData, OperationResult};
