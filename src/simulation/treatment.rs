//! Treatment resolution
//!
//! A diagnosed patient in a staffed treatment room gets one success roll
//! per tick: cure and payment, or death. Reputation scales the payment
//! and absorbs the fallout.

use rand::Rng;

use crate::core::config::{DEATH_REPUTATION_LOSS, WIN_CONDITION};
use crate::core::types::{PatientId, RoomId, StaffId};
use crate::hospital::patients::{begin_leaving, PatientState};
use crate::simulation::economy::add_income;
use crate::simulation::state::{GameState, NotificationKind};

/// Success probability in percent: 70 base, up with skill, down with
/// disease difficulty. The catalog's values keep this inside 20-90.
pub fn treatment_success_chance(skill: f32, difficulty: f32) -> f32 {
    70.0 + skill / 5.0 - difficulty / 2.0
}

/// Resolve treatment in every staffed room holding a diagnosed patient.
pub fn process_treatments(state: &mut GameState) {
    let skill_of: ahash::AHashMap<StaffId, f32> =
        state.staff.iter().map(|s| (s.id, s.skill)).collect();

    let candidates: Vec<(RoomId, PatientId, StaffId)> = state
        .rooms
        .iter()
        .filter_map(|room| Some((room.id, room.patient_id?, room.staff_id?)))
        .collect();

    for (room_id, patient_id, staff_id) in candidates {
        let eligible = state
            .patient(patient_id)
            .is_some_and(|p| p.diagnosed && p.state == PatientState::InTreatment);
        if !eligible {
            continue;
        }

        let Some(&skill) = skill_of.get(&staff_id) else {
            continue;
        };
        let Some(difficulty) = state.patient(patient_id).map(|p| p.disease.difficulty()) else {
            continue;
        };

        let chance = treatment_success_chance(skill, difficulty);
        let roll: f32 = state.rng.gen_range(0.0..100.0);
        tracing::debug!(?patient_id, chance, roll, "treatment resolved");

        if roll < chance {
            cure_patient(state, patient_id, room_id);
        } else {
            kill_patient(state, patient_id, room_id);
        }
    }
}

/// Successful treatment: payment scaled by reputation, reputation +1,
/// the patient heads for the exit, and the win condition is checked.
pub fn cure_patient(state: &mut GameState, patient_id: PatientId, room_id: RoomId) {
    let Some(treatment_cost) = state.patient(patient_id).map(|p| p.disease.treatment_cost())
    else {
        return;
    };

    let income =
        (treatment_cost as f64 * (1.0 + state.reputation as f64 / 100.0)).floor() as i64;
    add_income(state, income);
    state.patients_cured += 1;
    state.adjust_reputation(1);
    state.push_notification(
        format!("Patient cured! +${}", income),
        NotificationKind::Success,
    );
    tracing::info!(?patient_id, income, cured = state.patients_cured, "patient cured");

    if let Some(room) = state.room_mut(room_id) {
        room.clear_patient();
    }
    if let Some(p) = state.patient_mut(patient_id) {
        p.state = PatientState::Cured;
    }
    begin_leaving(state, patient_id);

    if state.patients_cured >= WIN_CONDITION {
        state.won = true;
        state.game_over = true;
        state.push_notification("Hospital thrives! You win!", NotificationKind::Success);
        tracing::info!("win condition reached");
    }
}

/// Failed treatment: the patient dies on the table.
pub fn kill_patient(state: &mut GameState, patient_id: PatientId, room_id: RoomId) {
    if let Some(room) = state.room_mut(room_id) {
        room.clear_patient();
    }
    state.patients.retain(|p| p.id != patient_id);
    state.patients_died += 1;
    state.adjust_reputation(-DEATH_REPUTATION_LOSS);
    state.push_notification(
        format!("Patient died! Reputation -{}", DEATH_REPUTATION_LOSS),
        NotificationKind::Error,
    );
    tracing::info!(?patient_id, died = state.patients_died, "patient died in treatment");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GridPosition, StaffId};
    use crate::hospital::diseases::DiseaseType;
    use crate::hospital::patients::spawn_patient;
    use crate::hospital::rooms::{place_room, RoomState, RoomType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_success_chance_formula() {
        assert_eq!(treatment_success_chance(0.0, 0.0), 70.0);
        assert_eq!(treatment_success_chance(100.0, 0.0), 90.0);
        assert_eq!(treatment_success_chance(0.0, 100.0), 20.0);
    }

    #[test]
    fn test_success_rate_statistics() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for (skill, difficulty, expected) in
            [(0.0, 0.0, 0.70), (100.0, 0.0, 0.90), (0.0, 100.0, 0.20)]
        {
            let chance = treatment_success_chance(skill, difficulty);
            let trials = 20_000;
            let successes = (0..trials)
                .filter(|_| rng.gen_range(0.0..100.0) < chance)
                .count();
            let rate = successes as f64 / trials as f64;
            assert!(
                (rate - expected).abs() < 0.02,
                "skill={} difficulty={}: rate {} far from {}",
                skill,
                difficulty,
                rate,
                expected
            );
        }
    }

    fn treatment_scene(state: &mut GameState, disease: DiseaseType) -> (RoomId, PatientId) {
        let room_type = disease.treatment_room();
        let room_id = place_room(state, room_type, GridPosition::new(5, 5)).unwrap();
        let patient_id = spawn_patient(state);
        {
            let p = state.patient_mut(patient_id).unwrap();
            p.disease = disease;
            p.diagnosed = true;
            p.state = PatientState::InTreatment;
            p.target_room_id = Some(room_id);
            p.position = GridPosition::new(5, 8);
        }
        let room = state.room_mut(room_id).unwrap();
        room.staff_id = Some(StaffId(801));
        room.patient_id = Some(patient_id);
        room.state = RoomState::Occupied;
        (room_id, patient_id)
    }

    #[test]
    fn test_cure_pays_and_counts() {
        let mut state = GameState::new(9);
        let (room_id, patient_id) = treatment_scene(&mut state, DiseaseType::SlackTongue);
        let cash = state.cash;
        let reputation = state.reputation;

        cure_patient(&mut state, patient_id, room_id);

        let expected =
            (DiseaseType::SlackTongue.treatment_cost() as f64 * (1.0 + reputation as f64 / 100.0))
                .floor() as i64;
        assert_eq!(state.cash, cash + expected);
        assert_eq!(state.patients_cured, 1);
        assert_eq!(state.reputation, reputation + 1);
        assert_eq!(state.room(room_id).unwrap().patient_id, None);
        assert_eq!(
            state.patient(patient_id).unwrap().state,
            PatientState::Leaving
        );
        assert!(state
            .notifications
            .iter()
            .any(|n| n.kind == NotificationKind::Success));
        assert!(!state.game_over);
    }

    #[test]
    fn test_win_condition_fires_on_threshold() {
        let mut state = GameState::new(9);
        let (room_id, patient_id) = treatment_scene(&mut state, DiseaseType::BloatyHead);
        state.patients_cured = WIN_CONDITION - 1;

        cure_patient(&mut state, patient_id, room_id);

        assert_eq!(state.patients_cured, WIN_CONDITION);
        assert!(state.won);
        assert!(state.game_over);
    }

    #[test]
    fn test_kill_removes_patient_and_costs_reputation() {
        let mut state = GameState::new(9);
        let (room_id, patient_id) = treatment_scene(&mut state, DiseaseType::Invisibility);
        let reputation = state.reputation;

        kill_patient(&mut state, patient_id, room_id);

        assert!(state.patient(patient_id).is_none());
        assert_eq!(state.patients_died, 1);
        assert_eq!(state.reputation, reputation - DEATH_REPUTATION_LOSS);
        assert_eq!(state.room(room_id).unwrap().patient_id, None);
        assert!(state
            .notifications
            .iter()
            .any(|n| n.kind == NotificationKind::Error));
    }

    #[test]
    fn test_process_treatments_resolves_occupied_room() {
        let mut state = GameState::new(9);
        let (room_id, patient_id) = treatment_scene(&mut state, DiseaseType::SlackTongue);
        state.staff.push(crate::hospital::staff::Staff {
            id: StaffId(801),
            staff_type: RoomType::Pharmacy.required_staff(),
            name: "Test Nurse".into(),
            skill: 75.0,
            stamina: 100.0,
            salary: 0,
            assigned_room_id: Some(room_id),
            state: crate::hospital::staff::StaffState::Working,
            position: GridPosition::new(5, 8),
            target_position: None,
            path: Vec::new(),
        });

        process_treatments(&mut state);

        // One outcome either way: the room is free again
        assert_eq!(state.room(room_id).unwrap().patient_id, None);
        assert_eq!(state.patients_cured + state.patients_died, 1);
        let still_here = state.patient(patient_id).is_some();
        assert_eq!(still_here, state.patients_cured == 1);
    }

    #[test]
    fn test_undiagnosed_patient_skipped() {
        let mut state = GameState::new(9);
        let (room_id, patient_id) = treatment_scene(&mut state, DiseaseType::SlackTongue);
        state.patient_mut(patient_id).unwrap().diagnosed = false;

        process_treatments(&mut state);

        assert_eq!(state.patients_cured + state.patients_died, 0);
        assert_eq!(state.room(room_id).unwrap().patient_id, Some(patient_id));
    }
}
