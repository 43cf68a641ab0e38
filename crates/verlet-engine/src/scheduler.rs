//! The rebuild-decision state machine.

use verlet_core::{AtomSnapshot, SimBox, StepId};

use crate::error::ConfigError;

/// Lifecycle of the published lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListState {
    /// Nothing built yet; the first access must build.
    Fresh,
    /// Published lists are reusable.
    Valid,
    /// A rebuild has been decided but not yet performed.
    Stale,
}

/// Rebuild-policy knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Force a rebuild once this many steps have passed since the last
    /// build. `0` disables the policy.
    pub every: u64,
    /// Never rebuild sooner than this many steps after the last build,
    /// whatever the other checks say. Deferred triggers (including
    /// explicit invalidation) fire once the delay expires.
    pub delay: u64,
    /// Scan owned-atom displacement against half the skin.
    pub check_displacement: bool,
    /// Box edge/tilt change beyond this triggers a rebuild.
    pub box_tolerance: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            every: 0,
            delay: 0,
            check_displacement: true,
            box_tolerance: 1e-9,
        }
    }
}

/// Decides, once per step, whether the lists must be rebuilt.
///
/// Valid lists survive until an owned atom may have drifted into or out
/// of range undetected: the skin margin added to every list cutoff
/// bounds that drift at half the skin per atom. The scheduler keeps the
/// owned positions and box of the last build as the displacement
/// baseline.
#[derive(Debug)]
pub struct RebuildScheduler {
    skin: f64,
    config: SchedulerConfig,
    state: ListState,
    baseline: Vec<[f64; 3]>,
    baseline_box: Option<SimBox>,
    last_build: StepId,
    forced: bool,
}

impl RebuildScheduler {
    /// Scheduler in the fresh state.
    pub fn new(skin: f64, config: SchedulerConfig) -> Result<Self, ConfigError> {
        if !(skin.is_finite() && skin >= 0.0) {
            return Err(ConfigError::NegativeSkin { value: skin });
        }
        if !(config.box_tolerance.is_finite() && config.box_tolerance >= 0.0) {
            return Err(ConfigError::InvalidBoxTolerance {
                value: config.box_tolerance,
            });
        }
        Ok(Self {
            skin,
            config,
            state: ListState::Fresh,
            baseline: Vec::new(),
            baseline_box: None,
            last_build: StepId(0),
            forced: false,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ListState {
        self.state
    }

    /// The skin distance the displacement checks are scaled by.
    pub fn skin(&self) -> f64 {
        self.skin
    }

    /// Request a rebuild at the next opportunity (atoms were inserted or
    /// removed, exclusion rules changed, and so on).
    pub fn invalidate(&mut self) {
        self.forced = true;
        if self.state == ListState::Valid {
            self.state = ListState::Stale;
        }
    }

    /// Decide whether this step needs a rebuild, moving to
    /// [`ListState::Stale`] when it does.
    pub fn check(&mut self, snapshot: AtomSnapshot<'_>, sim_box: &SimBox, step: StepId) -> bool {
        if self.decide(snapshot, sim_box, step) {
            self.state = ListState::Stale;
            return true;
        }
        false
    }

    fn decide(&self, snapshot: AtomSnapshot<'_>, sim_box: &SimBox, step: StepId) -> bool {
        if self.state == ListState::Fresh {
            return true;
        }
        let ago = step.0.saturating_sub(self.last_build.0);
        if ago < self.config.delay {
            return false;
        }
        if self.forced {
            return true;
        }
        if self.config.every > 0 && ago >= self.config.every {
            return true;
        }
        if snapshot.n_owned() != self.baseline.len() {
            return true;
        }
        match self.baseline_box.as_ref() {
            Some(b) => {
                if b.shape_differs(sim_box, self.config.box_tolerance) {
                    return true;
                }
            }
            None => return true,
        }
        if self.config.check_displacement {
            return self.max_displacement(snapshot) > 0.5 * self.skin;
        }
        false
    }

    /// Returns `true` if some owned atom moved past the full skin since
    /// the last build, meaning the reused lists may already have missed
    /// an interaction. Used for dangerous-rebuild accounting.
    pub fn drifted_past_skin(&self, snapshot: AtomSnapshot<'_>) -> bool {
        if self.baseline.len() != snapshot.n_owned() {
            return false;
        }
        self.max_displacement(snapshot) > self.skin
    }

    /// Largest per-axis owned-atom displacement against the baseline.
    fn max_displacement(&self, snapshot: AtomSnapshot<'_>) -> f64 {
        let mut max = 0.0f64;
        for (slot, old) in self.baseline.iter().enumerate() {
            let now = snapshot.position(slot);
            for axis in 0..3 {
                max = max.max((now[axis] - old[axis]).abs());
            }
        }
        max
    }

    /// Record a completed build: snapshot the baseline and go valid.
    pub fn mark_built(&mut self, snapshot: AtomSnapshot<'_>, sim_box: &SimBox, step: StepId) {
        self.baseline.clear();
        self.baseline
            .extend_from_slice(&snapshot.positions()[..snapshot.n_owned()]);
        self.baseline_box = Some(sim_box.clone());
        self.last_build = step;
        self.state = ListState::Valid;
        self.forced = false;
    }
}
