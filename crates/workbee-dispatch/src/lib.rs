//! Job lifecycle and matching for WorkBee.
//!
//! The [`LifecycleEngine`] is the single authority over job state. A
//! [`Dispatcher`] proposes workers for searching jobs; the bundled
//! [`MatchingSimulator`] does so from a fixed roster after a delay.
//! Dashboard projections are read-only views over an engine snapshot.

pub mod engine;
pub mod invariant;
pub mod projection;
pub mod simulator;

pub use engine::{JobEvent, LifecycleEngine};
pub use projection::{BusinessDashboard, BusinessStats, WorkerDashboard, WorkerJob};
pub use simulator::{Dispatcher, MatchDelay, MatchState, MatchingSimulator};
