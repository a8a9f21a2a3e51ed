//! Explorable 3D models.

pub mod dna;
pub mod neon;
pub mod solar;

use serde::{Deserialize, Serialize};
use lab_engine::ModelBuilder;

pub use dna::DnaHelix;
pub use neon::NeonAtom;
pub use solar::SolarSystem;

/// Which model a module shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    SolarSystem,
    Dna,
    NeonAtom,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::SolarSystem, ModelKind::Dna, ModelKind::NeonAtom];

    pub fn builder(self) -> &'static dyn ModelBuilder {
        match self {
            ModelKind::SolarSystem => &SolarSystem,
            ModelKind::Dna => &DnaHelix,
            ModelKind::NeonAtom => &NeonAtom,
        }
    }
}
