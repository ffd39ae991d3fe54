//! Type and date inference for raw cells.

mod temporal;
mod typing;

pub use temporal::{looks_like_date, parse_datetime, value_to_datetime};
pub use typing::{TypeInferrer, is_null_token};
