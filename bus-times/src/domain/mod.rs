//! Domain types for the bus arrival application.
//!
//! Types here enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod stop;

pub use stop::{InvalidStopId, Stop, StopId};
