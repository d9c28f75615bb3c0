//! Patient spawning, routing and the behavioral state machine
//!
//! Patients arrive at a grid edge, queue for reception, then work through
//! their disease's diagnosis chain before treatment. Patience and health
//! tick down the whole time; an exhausted patient storms out, a dead one
//! is removed. One dispatch per patient per tick.

use serde::{Deserialize, Serialize};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::{
    ANGRY_DEPARTURE_REPUTATION_LOSS, DEATH_REPUTATION_LOSS, GRID_SIZE, HEALTH_DECAY_PER_TICK,
    MAX_PATIENTS, PATIENCE_DECAY_PER_TICK, PATIENT_SPAWN_INTERVAL_MS,
};
use crate::core::types::{GridPosition, PatientId, RoomId};
use crate::hospital::diseases::{DiseaseType, DISEASE_TYPES};
use crate::hospital::rooms::{find_available_room, RoomState, RoomType};
use crate::simulation::state::{GameState, NotificationKind};
use crate::spatial::pathfinding::{find_path, find_path_to_room};

/// Behavioral state of a patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientState {
    /// Walking from the map edge toward reception
    Arriving,
    /// Checked in; routing toward the next required room
    Waiting,
    /// Inside the GP office (first diagnosis step)
    InGp,
    /// Inside a later diagnosis-chain room
    InDiagnosis,
    /// Inside the disease's treatment room
    InTreatment,
    /// Walking off the map
    Leaving,
    /// Treated successfully; transitions to leaving immediately
    Cured,
    /// Removed at the end of the update pass
    Dead,
}

impl PatientState {
    /// States in which patience and health still tick down
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            PatientState::Arriving
                | PatientState::Waiting
                | PatientState::InGp
                | PatientState::InDiagnosis
                | PatientState::InTreatment
        )
    }
}

/// An active patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub disease: DiseaseType,
    pub diagnosed: bool,
    /// 0-100 across the whole diagnosis chain
    pub diagnosis_progress: f32,
    /// Index into the disease's diagnosis chain
    pub diagnosis_chain_index: usize,
    pub state: PatientState,
    pub position: GridPosition,
    pub target_position: Option<GridPosition>,
    /// Queued grid steps, current tile excluded
    pub path: Vec<GridPosition>,
    /// 0-100; hitting zero forces an angry departure
    pub patience: f32,
    /// 0-100; hitting zero kills the patient
    pub health: f32,
    /// Room currently targeted or occupied
    pub target_room_id: Option<RoomId>,
}

fn random_edge_position(rng: &mut ChaCha8Rng) -> GridPosition {
    let offset = rng.gen_range(0..GRID_SIZE);
    match rng.gen_range(0..4) {
        0 => GridPosition::new(0, offset),
        1 => GridPosition::new(GRID_SIZE - 1, offset),
        2 => GridPosition::new(offset, 0),
        _ => GridPosition::new(offset, GRID_SIZE - 1),
    }
}

/// Spawn a patient with a random disease at a random edge tile
pub fn spawn_patient(state: &mut GameState) -> PatientId {
    let disease = DISEASE_TYPES[state.rng.gen_range(0..DISEASE_TYPES.len())];
    let position = random_edge_position(&mut state.rng);

    let id = state.ids.patient_id();
    state.patients.push(Patient {
        id,
        disease,
        diagnosed: false,
        diagnosis_progress: 0.0,
        diagnosis_chain_index: 0,
        state: PatientState::Arriving,
        position,
        target_position: None,
        path: Vec::new(),
        patience: 100.0,
        health: 100.0,
        target_room_id: None,
    });

    tracing::debug!(?id, disease = disease.name(), ?position, "patient arrived");
    id
}

/// Spawn gating: suppressed while paused, without a staffed reception, at
/// the patient cap, or inside the spawn interval.
pub fn check_patient_spawn(state: &mut GameState, now_ms: u64) {
    if state.paused {
        return;
    }
    let has_staffed_reception = state
        .rooms
        .iter()
        .any(|r| r.room_type == RoomType::Reception && r.staff_id.is_some());
    if !has_staffed_reception {
        return;
    }
    if state.patients.len() >= MAX_PATIENTS {
        return;
    }
    if now_ms.saturating_sub(state.last_patient_spawn_ms) < PATIENT_SPAWN_INTERVAL_MS {
        return;
    }

    spawn_patient(state);
    state.last_patient_spawn_ms = now_ms;
}

/// Advance every patient one tick, then prune the departed and the dead.
pub fn update_patients(state: &mut GameState) {
    let ids: Vec<PatientId> = state.patients.iter().map(|p| p.id).collect();
    for id in ids {
        update_patient(state, id);
    }

    state.patients.retain(|p| {
        p.state != PatientState::Dead && !(p.state == PatientState::Leaving && p.path.is_empty())
    });
}

fn update_patient(state: &mut GameState, id: PatientId) {
    let current = match state.patient(id) {
        Some(p) => p.state,
        None => return,
    };

    if current.is_active() {
        // Health and patience decay independently; death wins over anger
        let (health, patience) = match state.patient_mut(id) {
            Some(p) => {
                p.health = (p.health - HEALTH_DECAY_PER_TICK).max(0.0);
                p.patience = (p.patience - PATIENCE_DECAY_PER_TICK).max(0.0);
                (p.health, p.patience)
            }
            None => return,
        };
        if health <= 0.0 {
            die_from_illness(state, id);
            return;
        }
        if patience <= 0.0 {
            leave_angrily(state, id);
            return;
        }
    }

    match current {
        PatientState::Arriving => handle_arriving(state, id),
        PatientState::Waiting => handle_waiting(state, id),
        // In-room states are advanced by the diagnosis/treatment engines
        PatientState::InGp | PatientState::InDiagnosis | PatientState::InTreatment => {}
        PatientState::Leaving => advance_along_path(state, id),
        PatientState::Cured | PatientState::Dead => {}
    }
}

fn handle_arriving(state: &mut GameState, id: PatientId) {
    let (position, needs_route) = match state.patient(id) {
        Some(p) => (p.position, p.path.is_empty() && p.target_room_id.is_none()),
        None => return,
    };

    if needs_route {
        if let Some(room) = find_available_room(&state.rooms, RoomType::Reception) {
            let room_id = room.id;
            let entrance = room.entrance();
            let path = find_path_to_room(position, room, &state.rooms);
            if !path.is_empty() {
                if let Some(p) = state.patient_mut(id) {
                    p.path = path[1..].to_vec();
                    p.target_room_id = Some(room_id);
                    p.target_position = Some(entrance);
                }
            }
        }
    }

    advance_along_path(state, id);

    // Reached the reception entrance: checked in, start seeking care
    if let Some(p) = state.patient_mut(id) {
        if p.path.is_empty() && p.target_position == Some(p.position) {
            p.state = PatientState::Waiting;
            p.target_position = None;
            p.target_room_id = None;
        }
    }
}

/// Next room type the patient needs: the current diagnosis-chain entry
/// while undiagnosed, the disease's treatment room afterwards.
fn next_room_type(patient: &Patient) -> Option<RoomType> {
    if patient.diagnosed {
        Some(patient.disease.treatment_room())
    } else {
        patient
            .disease
            .diagnosis_chain()
            .get(patient.diagnosis_chain_index)
            .copied()
    }
}

fn handle_waiting(state: &mut GameState, id: PatientId) {
    let (position, needs_route, wanted) = match state.patient(id) {
        Some(p) => (
            p.position,
            p.target_room_id.is_none() || p.path.is_empty(),
            next_room_type(p),
        ),
        None => return,
    };

    if needs_route {
        if let Some(room_type) = wanted {
            if let Some(room) = find_available_room(&state.rooms, room_type) {
                let room_id = room.id;
                let entrance = room.entrance();
                let path = find_path_to_room(position, room, &state.rooms);
                if !path.is_empty() {
                    if let Some(p) = state.patient_mut(id) {
                        p.path = path[1..].to_vec();
                        p.target_room_id = Some(room_id);
                        p.target_position = Some(entrance);
                    }
                }
            }
        }
    }

    advance_along_path(state, id);
    try_enter_room(state, id);
}

/// Standing at the targeted room's entrance with no steps left: enter if
/// the room is staffed and free, marking it occupied.
fn try_enter_room(state: &mut GameState, id: PatientId) {
    let at_entrance = match state.patient(id) {
        Some(p) if p.path.is_empty() => p.target_room_id.map(|rid| (rid, p.position, p.diagnosed)),
        _ => None,
    };
    let Some((room_id, position, diagnosed)) = at_entrance else {
        return;
    };

    let Some(room) = state.room(room_id) else {
        return;
    };
    if room.entrance() != position || room.staff_id.is_none() || room.patient_id.is_some() {
        return;
    }

    let new_state = if diagnosed {
        PatientState::InTreatment
    } else if room.room_type == RoomType::GpOffice {
        PatientState::InGp
    } else {
        PatientState::InDiagnosis
    };

    if let Some(room) = state.room_mut(room_id) {
        room.patient_id = Some(id);
        room.state = RoomState::Occupied;
    }
    if let Some(p) = state.patient_mut(id) {
        p.state = new_state;
        p.target_position = None;
    }
    tracing::debug!(?id, ?room_id, ?new_state, "patient entered room");
}

fn advance_along_path(state: &mut GameState, id: PatientId) {
    if let Some(p) = state.patient_mut(id) {
        if !p.path.is_empty() {
            let next = p.path.remove(0);
            p.position = next;
        }
    }
}

/// Put the patient on a walk toward a random edge tile, releasing any
/// room they targeted or occupied. A leaving patient whose path is empty
/// after its update is pruned.
pub(crate) fn begin_leaving(state: &mut GameState, id: PatientId) {
    let (position, room_id) = match state.patient(id) {
        Some(p) => (p.position, p.target_room_id),
        None => return,
    };

    if let Some(rid) = room_id {
        if let Some(room) = state.room_mut(rid) {
            if room.patient_id == Some(id) {
                room.clear_patient();
            }
        }
    }

    let exit = random_edge_position(&mut state.rng);
    let path = find_path(position, exit, &state.rooms, false);

    if let Some(p) = state.patient_mut(id) {
        p.state = PatientState::Leaving;
        p.target_room_id = None;
        p.target_position = Some(exit);
        p.path = if path.len() > 1 {
            path[1..].to_vec()
        } else {
            Vec::new()
        };
    }
}

fn leave_angrily(state: &mut GameState, id: PatientId) {
    state.adjust_reputation(-ANGRY_DEPARTURE_REPUTATION_LOSS);
    begin_leaving(state, id);
    tracing::debug!(?id, "patient left angrily");
}

fn die_from_illness(state: &mut GameState, id: PatientId) {
    let room_id = state.patient(id).and_then(|p| p.target_room_id);
    if let Some(rid) = room_id {
        if let Some(room) = state.room_mut(rid) {
            if room.patient_id == Some(id) {
                room.clear_patient();
            }
        }
    }

    if let Some(p) = state.patient_mut(id) {
        p.state = PatientState::Dead;
    }
    state.patients_died += 1;
    state.adjust_reputation(-DEATH_REPUTATION_LOSS);
    state.push_notification(
        format!(
            "Patient died from illness! Reputation -{}",
            DEATH_REPUTATION_LOSS
        ),
        NotificationKind::Error,
    );
    tracing::debug!(?id, "patient died of illness");
}
