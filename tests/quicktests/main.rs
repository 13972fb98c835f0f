//! Property tests driving trees with random sequences of operations.

mod indexed;
mod ops;

pub(crate) use ops::Op;
