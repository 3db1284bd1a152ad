mod assign;
mod availability;
mod order;
mod state;
mod types;

pub use assign::{FallbackStrategy, LeastLoaded};
pub use availability::is_free;
pub use order::sort_shifts;
pub use state::{AssignmentState, PreferredMap};
pub use types::{ArrangeOptions, BadLabelPolicy, PlanError};

use crate::model::{AssignmentRecord, Roster};

/// Planificateur : porte l'état d'affectation (titulaires, charges), les
/// options et la stratégie de repli.
///
/// Un `Planner` neuf par mois donne l'état confiné du contrat de base ;
/// réutiliser la même instance sur plusieurs mois prolonge volontairement
/// la continuité des titulaires et l'équilibre de charge.
#[derive(Debug)]
pub struct Planner {
    state: AssignmentState,
    options: ArrangeOptions,
    strategy: Box<dyn FallbackStrategy>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    pub fn new() -> Self {
        Self {
            state: AssignmentState::new(),
            options: ArrangeOptions::default(),
            strategy: Box::new(LeastLoaded),
        }
    }

    pub fn with_options(options: ArrangeOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    /// Remplace la stratégie du second passage (par défaut `LeastLoaded`).
    pub fn set_strategy(&mut self, strategy: Box<dyn FallbackStrategy>) {
        self.strategy = strategy;
    }

    pub fn state(&self) -> &AssignmentState {
        &self.state
    }

    pub fn options(&self) -> ArrangeOptions {
        self.options
    }

    /// Affecte tout un mois : un enregistrement par couple (jour, permanence)
    /// dont le jour correspond, couvert ou non. Ne lit ni n'écrit aucun
    /// fichier ; termine toujours avec un résultat complet.
    pub fn arrange_month(
        &mut self,
        roster: &Roster,
        year: i32,
        month: u32,
    ) -> Result<Vec<AssignmentRecord>, PlanError> {
        assign::arrange_month(self, roster, year, month)
    }
}

/// Affectation d'un mois avec un état neuf (pas de continuité inter-mois).
pub fn arrange_month(
    roster: &Roster,
    year: i32,
    month: u32,
) -> Result<Vec<AssignmentRecord>, PlanError> {
    Planner::new().arrange_month(roster, year, month)
}
