//! List registration requests.

use verlet_list::{ListKind, RespaCuts, SpecialPolicy, TypeExclusions, DEFAULT_TIE_EPSILON};

use crate::error::ConfigError;

/// Everything one neighbor list needs to be registered: physical cutoff,
/// list form, exclusion rules, and the tie-break tolerance.
///
/// Validated by the planner at registration; an invalid request is a
/// fatal [`ConfigError`] before any build runs. The skin distance is a
/// planner-wide setting, not per list.
#[derive(Clone, Debug)]
pub struct ListRequest {
    /// Physical interaction cutoff (skin is added by the planner).
    pub cutoff: f64,
    /// Which list form to build.
    pub kind: ListKind,
    /// Shell radii; required for and exclusive to [`ListKind::Respa`].
    pub respa: Option<RespaCuts>,
    /// Per-tier bonded-special weights.
    pub special: SpecialPolicy,
    /// Static type-pair exclusions.
    pub type_exclusions: Option<TypeExclusions>,
    /// Drop all pairs within the same molecule.
    pub exclude_same_molecule: bool,
    /// Positional tolerance for the equal-tag ghost tie-break.
    pub tie_epsilon: f64,
}

impl ListRequest {
    /// Request with default exclusion rules and tie epsilon.
    pub fn new(kind: ListKind, cutoff: f64) -> Self {
        Self {
            cutoff,
            kind,
            respa: None,
            special: SpecialPolicy::default(),
            type_exclusions: None,
            exclude_same_molecule: false,
            tie_epsilon: DEFAULT_TIE_EPSILON,
        }
    }

    /// Attach multi-resolution shell radii.
    pub fn with_respa(mut self, cuts: RespaCuts) -> Self {
        self.respa = Some(cuts);
        self
    }

    /// Set the bonded-special weights.
    pub fn with_special_policy(mut self, policy: SpecialPolicy) -> Self {
        self.special = policy;
        self
    }

    /// Attach a static type-pair exclusion matrix.
    pub fn with_type_exclusions(mut self, types: TypeExclusions) -> Self {
        self.type_exclusions = Some(types);
        self
    }

    /// Drop all pairs within the same molecule.
    pub fn with_same_molecule_excluded(mut self) -> Self {
        self.exclude_same_molecule = true;
        self
    }

    /// Override the ghost tie-break tolerance.
    pub fn with_tie_epsilon(mut self, tie_epsilon: f64) -> Self {
        self.tie_epsilon = tie_epsilon;
        self
    }

    /// Check the request for fatal misconfiguration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cutoff.is_finite() && self.cutoff > 0.0) {
            return Err(ConfigError::NonPositiveCutoff { value: self.cutoff });
        }
        if !(self.tie_epsilon.is_finite() && self.tie_epsilon >= 0.0) {
            return Err(ConfigError::InvalidTieEpsilon {
                value: self.tie_epsilon,
            });
        }
        for (tier, &w) in self.special.weights().iter().enumerate() {
            if !(w.is_finite() && w >= 0.0) {
                return Err(ConfigError::InvalidSpecialWeight { tier, value: w });
            }
        }
        match (self.kind, self.respa.as_ref()) {
            (ListKind::Respa, None) => Err(ConfigError::RespaMissing),
            (ListKind::Respa, Some(cuts)) => {
                if cuts.ordered_within(self.cutoff) {
                    Ok(())
                } else {
                    Err(ConfigError::RespaOrdering {
                        inner: cuts.inner,
                        outer: self.cutoff,
                    })
                }
            }
            (_, Some(_)) => Err(ConfigError::RespaNotApplicable),
            (_, None) => Ok(()),
        }
    }
}
