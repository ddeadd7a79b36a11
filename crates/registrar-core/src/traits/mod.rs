//! Seams between the engines and their collaborators.

pub mod clock;
pub mod renderer;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use renderer::{IDocumentRenderer, RenderedDocument};
pub use storage::{IRegistrarStorage, IssuanceGate};
