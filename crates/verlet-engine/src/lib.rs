//! Build orchestration: list registration, rebuild scheduling, and the
//! grow-and-retry build loop.
//!
//! The [`BuildPlanner`] owns every registered neighbor list. Once per
//! timestep the caller hands it the current snapshot; the
//! [`RebuildScheduler`] decides whether the published lists are still
//! valid (no owned atom has drifted more than half the skin since the
//! last build, the box shape is unchanged, no policy or caller forced a
//! rebuild). When they are, the step costs one displacement scan; when
//! they are not, the planner bins once at the largest registered cutoff
//! and reruns every list build, growing page pools and retrying on
//! overflow until the build fits or the growth ceiling makes the
//! overflow fatal.
//!
//! Requests are validated at registration; a misconfigured list is
//! reported as a [`ConfigError`] before any build is attempted.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod planner;
pub mod request;
pub mod scheduler;
pub mod stats;

pub use error::{ConfigError, PlannerError};
pub use planner::{BuildOutcome, BuildPlanner, ListHandle, PlannerConfig};
pub use request::ListRequest;
pub use scheduler::{ListState, RebuildScheduler, SchedulerConfig};
pub use stats::BuildStats;
