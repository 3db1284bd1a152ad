use crate::calendar::InvalidMonth;
use crate::parse::LabelError;
use thiserror::Error;

/// Politique face à un libellé de permanence inexploitable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadLabelPolicy {
    /// Ignorer la permanence pour tout le mois, un warning par libellé.
    #[default]
    Skip,
    /// Échouer à la première permanence illisible.
    Fail,
}

/// Options d'affectation d'un mois.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrangeOptions {
    pub bad_labels: BadLabelPolicy,
}

/// Erreurs de planification. L'algorithme lui-même termine toujours ;
/// seules les entrées inexploitables remontent.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Month(#[from] InvalidMonth),
    #[error("unusable shift label: {0}")]
    Label(#[from] LabelError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
