//! Static disease catalog
//!
//! Each disease names the ordered chain of diagnosis rooms a patient must
//! visit before treatment, the room that treats it, and how hard the
//! treatment is to pull off.

use serde::{Deserialize, Serialize};

use crate::hospital::rooms::RoomType;

/// The fixed set of diseases patients can arrive with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseType {
    BloatyHead,
    SlackTongue,
    Invisibility,
}

/// All disease types, for uniform random selection at spawn
pub const DISEASE_TYPES: [DiseaseType; 3] = [
    DiseaseType::BloatyHead,
    DiseaseType::SlackTongue,
    DiseaseType::Invisibility,
];

impl DiseaseType {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            DiseaseType::BloatyHead => "Bloaty Head",
            DiseaseType::SlackTongue => "Slack Tongue",
            DiseaseType::Invisibility => "Invisibility",
        }
    }

    /// Ordered diagnosis rooms that must each be visited before the
    /// patient counts as diagnosed
    pub fn diagnosis_chain(&self) -> &'static [RoomType] {
        match self {
            DiseaseType::BloatyHead => &[RoomType::GpOffice],
            DiseaseType::SlackTongue => &[RoomType::GpOffice],
            DiseaseType::Invisibility => &[RoomType::GpOffice, RoomType::Pharmacy],
        }
    }

    /// Room type that performs the cure
    pub fn treatment_room(&self) -> RoomType {
        match self {
            DiseaseType::BloatyHead => RoomType::Deflation,
            DiseaseType::SlackTongue => RoomType::Pharmacy,
            DiseaseType::Invisibility => RoomType::Pharmacy,
        }
    }

    /// Base payment for a successful treatment
    pub fn treatment_cost(&self) -> i64 {
        match self {
            DiseaseType::BloatyHead => 300,
            DiseaseType::SlackTongue => 150,
            DiseaseType::Invisibility => 200,
        }
    }

    /// Difficulty (0-100); reduces treatment success probability
    pub fn difficulty(&self) -> f32 {
        match self {
            DiseaseType::BloatyHead => 20.0,
            DiseaseType::SlackTongue => 10.0,
            DiseaseType::Invisibility => 30.0,
        }
    }
}
