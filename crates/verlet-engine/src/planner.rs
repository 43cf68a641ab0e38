//! The build planner: registered lists, one shared grid, grow-and-retry.

use indexmap::IndexMap;

use verlet_arena::PageConfig;
use verlet_core::{AtomSnapshot, ListId, SimBox, StepId};
use verlet_list::{
    build_full, build_full_ghost, build_half, build_respa, BuildContext, ExclusionFilter,
    ListKind, MiddleBand, NeighborList, RespaCuts, RespaList,
};
use verlet_space::{BinConfig, BinGrid};

use crate::error::{ConfigError, PlannerError};
use crate::request::ListRequest;
use crate::scheduler::{ListState, RebuildScheduler, SchedulerConfig};
use crate::stats::BuildStats;

/// Planner-wide settings shared by every registered list.
#[derive(Clone, Debug, Default)]
pub struct PlannerConfig {
    /// Skin distance added to every list cutoff. Defaults to
    /// [`DEFAULT_SKIN`](Self::DEFAULT_SKIN).
    pub skin: Option<f64>,
    /// Page-pool sizing for new lists.
    pub pages: PageConfig,
    /// Bin-grid sizing.
    pub bins: BinConfig,
    /// Rebuild policy.
    pub scheduler: SchedulerConfig,
}

impl PlannerConfig {
    /// Default skin distance, in simulation length units.
    pub const DEFAULT_SKIN: f64 = 0.3;
}

/// Whether an update rebuilt the lists or reused them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Every list was rebuilt from the current snapshot.
    Rebuilt,
    /// The published lists were still valid.
    Reused,
}

/// Read handle to one registered list's published state.
#[derive(Clone, Copy, Debug)]
pub enum ListHandle<'a> {
    /// A half, full, or ghost-inclusive list.
    Plain(&'a NeighborList),
    /// A multi-resolution list.
    Respa(&'a RespaList),
}

impl<'a> ListHandle<'a> {
    /// The single-list form, if this is one.
    pub fn plain(self) -> Option<&'a NeighborList> {
        match self {
            Self::Plain(list) => Some(list),
            Self::Respa(_) => None,
        }
    }

    /// The multi-resolution form, if this is one.
    pub fn respa(self) -> Option<&'a RespaList> {
        match self {
            Self::Plain(_) => None,
            Self::Respa(lists) => Some(lists),
        }
    }
}

/// Storage variant per list form; the builder dispatch keys off this, so
/// a kind/storage mismatch cannot exist.
enum Storage {
    Half(NeighborList),
    Full(NeighborList),
    FullGhost(NeighborList),
    Respa { cuts: RespaCuts, lists: RespaList },
}

struct Registered {
    request: ListRequest,
    storage: Storage,
}

/// Owns every registered neighbor list and orchestrates their rebuilds.
///
/// One [`update`](Self::update) per timestep: the scheduler decides
/// reuse or rebuild; on rebuild the planner bins once at the largest
/// registered cutoff plus skin, then runs every list build against the
/// shared grid, growing page pools and retrying whole builds on
/// overflow. A failed update publishes nothing.
pub struct BuildPlanner {
    config: PlannerConfig,
    skin: f64,
    lists: IndexMap<ListId, Registered>,
    scheduler: RebuildScheduler,
    next_id: u32,
    stats: BuildStats,
}

impl BuildPlanner {
    /// Planner with no lists registered.
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        let skin = config.skin.unwrap_or(PlannerConfig::DEFAULT_SKIN);
        let scheduler = RebuildScheduler::new(skin, config.scheduler)?;
        Ok(Self {
            config,
            skin,
            lists: IndexMap::new(),
            scheduler,
            next_id: 0,
            stats: BuildStats::default(),
        })
    }

    /// The skin distance added to every list cutoff.
    pub fn skin(&self) -> f64 {
        self.skin
    }

    /// Current scheduler state.
    pub fn state(&self) -> ListState {
        self.scheduler.state()
    }

    /// Accumulated rebuild counters.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Validate and register a list; the next update builds it.
    pub fn register(&mut self, request: ListRequest) -> Result<ListId, ConfigError> {
        request.validate()?;
        let storage = match request.kind {
            ListKind::Half => Storage::Half(new_list(self.config.pages)?),
            ListKind::Full => Storage::Full(new_list(self.config.pages)?),
            ListKind::FullGhost => Storage::FullGhost(new_list(self.config.pages)?),
            ListKind::Respa => {
                // Validation guarantees the radii are present.
                let cuts = request.respa.ok_or(ConfigError::RespaMissing)?;
                let lists = RespaList::new(self.config.pages, cuts.middle.is_some())
                    .map_err(ConfigError::Pool)?;
                Storage::Respa { cuts, lists }
            }
        };
        let id = ListId(self.next_id);
        self.next_id += 1;
        self.lists.insert(id, Registered { request, storage });
        self.scheduler.invalidate();
        Ok(id)
    }

    /// Request a rebuild at the next update (atoms inserted or removed,
    /// exclusion rules changed externally).
    pub fn invalidate(&mut self) {
        self.scheduler.invalidate();
    }

    /// Read handle to a registered list's published state.
    ///
    /// Returns `None` unless the last update completed: before the first
    /// build, after a failed one, or once the lists have been
    /// invalidated. A failed build may have torn some lists down mid
    /// rebuild, so nothing is readable until the next successful update.
    pub fn list(&self, id: ListId) -> Option<ListHandle<'_>> {
        if self.scheduler.state() != ListState::Valid {
            return None;
        }
        self.lists.get(&id).map(|reg| match &reg.storage {
            Storage::Half(list) | Storage::Full(list) | Storage::FullGhost(list) => {
                ListHandle::Plain(list)
            }
            Storage::Respa { lists, .. } => ListHandle::Respa(lists),
        })
    }

    /// Step the planner: rebuild every list if the scheduler says so,
    /// otherwise keep the published ones.
    pub fn update(
        &mut self,
        snapshot: AtomSnapshot<'_>,
        sim_box: &SimBox,
        step: StepId,
    ) -> Result<BuildOutcome, PlannerError> {
        if self.lists.is_empty() {
            return Err(PlannerError::NoLists);
        }
        if !self.scheduler.check(snapshot, sim_box, step) {
            self.stats.reuses += 1;
            return Ok(BuildOutcome::Reused);
        }
        if self.scheduler.drifted_past_skin(snapshot) {
            self.stats.dangerous += 1;
        }

        let bin_cutoff = self.binning_cutoff();
        let grid = BinGrid::build(sim_box, bin_cutoff, &self.config.bins, snapshot.positions())
            .map_err(|source| PlannerError::Space {
                cutoff: bin_cutoff,
                n_atoms: snapshot.n_all(),
                source,
            })?;

        let skin = self.skin;
        for (&id, reg) in self.lists.iter_mut() {
            build_one(reg, id, snapshot, sim_box, &grid, skin)?;
        }

        self.scheduler.mark_built(snapshot, sim_box, step);
        self.stats.builds += 1;
        Ok(BuildOutcome::Rebuilt)
    }

    /// Largest registered cutoff plus skin; the shared grid is sized to
    /// it so every list's stencil coverage holds.
    fn binning_cutoff(&self) -> f64 {
        let largest = self
            .lists
            .values()
            .map(|reg| reg.request.cutoff)
            .fold(0.0f64, f64::max);
        largest + self.skin
    }
}

fn new_list(pages: PageConfig) -> Result<NeighborList, ConfigError> {
    NeighborList::new(pages).map_err(ConfigError::Pool)
}

fn build_one(
    reg: &mut Registered,
    id: ListId,
    snapshot: AtomSnapshot<'_>,
    sim_box: &SimBox,
    grid: &BinGrid,
    skin: f64,
) -> Result<(), PlannerError> {
    let Registered { request, storage } = reg;
    let cutoff = request.cutoff + skin;

    let mut filter = ExclusionFilter::new(snapshot, request.special);
    if let Some(types) = request.type_exclusions.as_ref() {
        filter = filter.with_type_exclusions(types);
    }
    if request.exclude_same_molecule {
        filter = filter.with_same_molecule_excluded();
    }
    let ctx = BuildContext::new(snapshot, sim_box, cutoff, filter)
        .with_tie_epsilon(request.tie_epsilon);

    loop {
        let result = match storage {
            Storage::Half(list) => build_half(&ctx, grid, list),
            Storage::Full(list) => build_full(&ctx, grid, list),
            Storage::FullGhost(list) => build_full_ghost(&ctx, grid, list),
            Storage::Respa { cuts, lists } => {
                // Shells get the same skin treatment as the outer cutoff;
                // the middle shell widens downward so its seam overlap
                // survives drift in both directions.
                let effective = RespaCuts {
                    inner: cuts.inner + skin,
                    middle: cuts.middle.map(|band| MiddleBand {
                        inside: (band.inside - skin).max(0.0),
                        outside: band.outside + skin,
                    }),
                };
                build_respa(&ctx, grid, &effective, lists)
            }
        };

        let err = match result {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        if !err.is_recoverable() {
            return Err(PlannerError::Build {
                list: id,
                cutoff,
                n_atoms: snapshot.n_all(),
                source: err,
            });
        }
        let grown = match storage {
            Storage::Half(list) | Storage::Full(list) | Storage::FullGhost(list) => list.grow(),
            Storage::Respa { lists, .. } => lists.grow(),
        };
        if let Err(grow_err) = grown {
            return Err(PlannerError::Build {
                list: id,
                cutoff,
                n_atoms: snapshot.n_all(),
                source: grow_err.into(),
            });
        }
    }
}
