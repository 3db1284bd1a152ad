use crate::model::{Category, Student, StudentId};
use std::collections::HashMap;

/// Titulaires d'un créneau : liste ordonnée d'identifiants, clé = libellé.
pub type PreferredMap = HashMap<String, Vec<StudentId>>;

/// Mémoire d'un passage de planification : titulaires par créneau (une carte
/// par catégorie) et compteur de charge par étudiant.
///
/// La liste des titulaires d'un créneau ne fait que croître sur un passage :
/// un remplaçant ponctuel s'ajoute derrière le titulaire, il ne l'évince
/// jamais.
#[derive(Debug, Clone, Default)]
pub struct AssignmentState {
    front_desk: PreferredMap,
    stacks: PreferredMap,
    load: HashMap<StudentId, u32>,
}

impl AssignmentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mémoire des titulaires pour une catégorie.
    pub fn preferred(&self, category: Category) -> &PreferredMap {
        match category {
            Category::FrontDesk => &self.front_desk,
            Category::Stacks => &self.stacks,
        }
    }

    pub(super) fn preferred_mut(&mut self, category: Category) -> &mut PreferredMap {
        match category {
            Category::FrontDesk => &mut self.front_desk,
            Category::Stacks => &mut self.stacks,
        }
    }

    /// Charge actuelle d'un étudiant (0 si inconnu).
    pub fn load_of(&self, id: &StudentId) -> u32 {
        self.load.get(id).copied().unwrap_or(0)
    }

    /// Compteurs de charge complets, pour inspection et tests.
    pub fn loads(&self) -> &HashMap<StudentId, u32> {
        &self.load
    }

    /// Enregistre chaque étudiant du trombinoscope avec une charge nulle,
    /// sans toucher aux compteurs existants (chaînage de mois).
    pub(super) fn register_students<'a>(&mut self, students: impl Iterator<Item = &'a Student>) {
        for student in students {
            self.load.entry(student.id.clone()).or_insert(0);
        }
    }

    pub(super) fn bump_load(&mut self, id: &StudentId) {
        *self.load.entry(id.clone()).or_insert(0) += 1;
    }
}
