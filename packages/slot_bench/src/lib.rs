//! Microbenchmark comparing two ways for a worker thread to resolve its private
//! counter slot: an index obtained once and cached for the thread's lifetime,
//! versus a linear search through a shared identifier table on every access.
//!
//! This package is not meant for use in production, serving only as a development
//! tool for studying slot-assignment and false-sharing costs.
//!
//! # Operating Principles
//!
//! ## Slot allocation and rendezvous
//!
//! Every worker obtains a unique slot index from a shared [`SlotAllocator`], then
//! spin-waits at the allocator's rendezvous gate until all slots have been issued.
//! This ensures that every worker enters the timed counting loop at approximately
//! the same instant, so thread start-up skew never appears in the measurement.
//!
//! ## Strided tables
//!
//! Per-slot counters (and, for the linear-search strategy, per-slot thread
//! identifiers) live in fixed tables where consecutive logical entries are spaced
//! a configurable stride apart. With the default stride each worker's counter
//! occupies its own cache line, so the decrement loops of different workers never
//! invalidate each other. This partitioning is the property under test, not an
//! incidental optimization.
//!
//! ## Completion signaling
//!
//! Workers announce completion through a counting [`CompletionSignal`]; the
//! orchestrator waits once per worker and only then reads the end timestamp.
//! There is no timeout: a synchronization bug surfaces as a hang, by design.
//!
//! # Example
//!
//! ```
//! use new_zealand::nz;
//! use slot_bench::{RunConfig, Strategy, execute};
//!
//! let config = RunConfig::new(nz!(4), 1_000, nz!(32), Strategy::CachedSlot);
//! let report = execute(&config);
//!
//! // Every worker counted its own slot all the way down.
//! assert!(report.slots().iter().all(|slot| slot.count() == 0));
//! println!("elapsed: {:.2} megacycles", report.megacycles());
//! ```

mod allocator;
mod completion;
mod config;
mod cycles;
mod identity;
mod run;
mod table;

pub use allocator::*;
pub use completion::*;
pub use config::*;
pub use cycles::*;
pub use identity::*;
pub use run::*;
pub use table::*;
