//! Motion module - move request validation.

mod request;

pub use request::{Direction, MoveRequest};
