//! Diagnosis progress accrual and chain advancement
//!
//! While an undiagnosed patient occupies a staffed diagnosis room,
//! progress accrues each tick, scaled by the staff member's skill. The
//! chain threshold splits the 0-100 progress bar evenly across the
//! disease's diagnosis rooms.

use crate::core::config::GP_VISIT_FEE;
use crate::core::types::{PatientId, RoomId, StaffId};
use crate::hospital::patients::PatientState;
use crate::hospital::rooms::RoomType;
use crate::simulation::economy::add_income;
use crate::simulation::state::{GameState, NotificationKind};

/// Diagnosis progress gained per tick: 25-50, scaled by staff skill
pub fn diagnosis_increase(skill: f32) -> f32 {
    25.0 + (skill / 100.0) * 25.0
}

/// Advance diagnosis in every staffed, occupied diagnosis room.
pub fn process_diagnosis(state: &mut GameState) {
    let skill_of: ahash::AHashMap<StaffId, f32> =
        state.staff.iter().map(|s| (s.id, s.skill)).collect();

    let candidates: Vec<(RoomId, PatientId, StaffId)> = state
        .rooms
        .iter()
        .filter_map(|room| Some((room.id, room.patient_id?, room.staff_id?)))
        .collect();

    for (room_id, patient_id, staff_id) in candidates {
        let eligible = state.patient(patient_id).is_some_and(|p| {
            !p.diagnosed
                && matches!(p.state, PatientState::InGp | PatientState::InDiagnosis)
        });
        if !eligible {
            continue;
        }
        let Some(&skill) = skill_of.get(&staff_id) else {
            continue;
        };
        advance_diagnosis(state, room_id, patient_id, skill);
    }
}

fn advance_diagnosis(state: &mut GameState, room_id: RoomId, patient_id: PatientId, skill: f32) {
    let (progress, threshold, chain_len, chain_index) = match state.patient_mut(patient_id) {
        Some(p) => {
            let chain_len = p.disease.diagnosis_chain().len();
            p.diagnosis_progress = (p.diagnosis_progress + diagnosis_increase(skill)).min(100.0);
            let threshold = 100.0 / chain_len as f32 * (p.diagnosis_chain_index + 1) as f32;
            (
                p.diagnosis_progress,
                threshold,
                chain_len,
                p.diagnosis_chain_index,
            )
        }
        None => return,
    };

    tracing::debug!(?patient_id, progress, threshold, "diagnosis progressed");

    if progress < threshold {
        return;
    }

    // Segment complete: step the chain and send the patient back to the
    // waiting flow, fully diagnosed once the chain is exhausted
    let room_type = state.room(room_id).map(|r| r.room_type);
    if let Some(p) = state.patient_mut(patient_id) {
        p.diagnosis_chain_index = chain_index + 1;
        if p.diagnosis_chain_index >= chain_len {
            p.diagnosed = true;
        }
        p.state = PatientState::Waiting;
        p.target_room_id = None;
        p.target_position = None;
    }
    if let Some(room) = state.room_mut(room_id) {
        room.clear_patient();
    }

    if room_type == Some(RoomType::GpOffice) {
        add_income(state, GP_VISIT_FEE);
        state.push_notification(
            format!("GP visit fee +${}", GP_VISIT_FEE),
            NotificationKind::Info,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GridPosition, StaffId};
    use crate::hospital::diseases::DiseaseType;
    use crate::hospital::patients::spawn_patient;
    use crate::hospital::rooms::{place_room, RoomState};
    use crate::hospital::staff::{Staff, StaffState};

    #[test]
    fn test_diagnosis_increase_bounds() {
        assert_eq!(diagnosis_increase(0.0), 25.0);
        assert_eq!(diagnosis_increase(100.0), 50.0);
    }

    #[test]
    fn test_diagnosis_increase_monotonic() {
        let mut last = diagnosis_increase(0.0);
        for skill in [10.0, 25.0, 50.0, 75.0, 90.0] {
            let inc = diagnosis_increase(skill);
            assert!(inc > last, "increase should grow with skill");
            last = inc;
        }
    }

    fn occupied_room(
        state: &mut GameState,
        room_type: RoomType,
        disease: DiseaseType,
        skill: f32,
    ) -> (RoomId, PatientId) {
        let room_id = place_room(state, room_type, GridPosition::new(5, 5)).unwrap();
        let staff_id = StaffId(800);
        state.staff.push(Staff {
            id: staff_id,
            staff_type: room_type.required_staff(),
            name: "Test Staff".into(),
            skill,
            stamina: 100.0,
            salary: 0,
            assigned_room_id: Some(room_id),
            state: StaffState::Working,
            position: GridPosition::new(5, 8),
            target_position: None,
            path: Vec::new(),
        });
        let patient_id = spawn_patient(state);
        {
            let p = state.patient_mut(patient_id).unwrap();
            p.disease = disease;
            p.state = if room_type == RoomType::GpOffice {
                PatientState::InGp
            } else {
                PatientState::InDiagnosis
            };
            p.target_room_id = Some(room_id);
        }
        let room = state.room_mut(room_id).unwrap();
        room.staff_id = Some(staff_id);
        room.patient_id = Some(patient_id);
        room.state = RoomState::Occupied;
        (room_id, patient_id)
    }

    #[test]
    fn test_single_chain_completes_and_pays_gp_fee() {
        let mut state = GameState::new(5);
        let (room_id, patient_id) =
            occupied_room(&mut state, RoomType::GpOffice, DiseaseType::BloatyHead, 50.0);
        let cash = state.cash;

        // 37.5/tick against a 100 threshold: three ticks to finish
        process_diagnosis(&mut state);
        process_diagnosis(&mut state);
        assert!(!state.patient(patient_id).unwrap().diagnosed);
        process_diagnosis(&mut state);

        let p = state.patient(patient_id).unwrap();
        assert!(p.diagnosed);
        assert_eq!(p.state, PatientState::Waiting);
        assert_eq!(p.diagnosis_chain_index, 1);

        let room = state.room(room_id).unwrap();
        assert_eq!(room.patient_id, None);
        assert_eq!(room.state, RoomState::Working);

        assert_eq!(state.cash, cash + GP_VISIT_FEE);
        assert!(state
            .notifications
            .iter()
            .any(|n| n.kind == NotificationKind::Info));
    }

    #[test]
    fn test_two_step_chain_advances_without_diagnosing() {
        let mut state = GameState::new(5);
        let (_, patient_id) = occupied_room(
            &mut state,
            RoomType::GpOffice,
            DiseaseType::Invisibility,
            100.0,
        );

        // 50/tick against a 50 threshold for segment one
        process_diagnosis(&mut state);

        let p = state.patient(patient_id).unwrap();
        assert!(!p.diagnosed);
        assert_eq!(p.diagnosis_chain_index, 1);
        assert_eq!(p.state, PatientState::Waiting);
    }

    #[test]
    fn test_no_progress_without_staff() {
        let mut state = GameState::new(5);
        let (room_id, patient_id) =
            occupied_room(&mut state, RoomType::GpOffice, DiseaseType::BloatyHead, 50.0);
        state.room_mut(room_id).unwrap().staff_id = None;

        process_diagnosis(&mut state);

        assert_eq!(state.patient(patient_id).unwrap().diagnosis_progress, 0.0);
    }

    #[test]
    fn test_diagnosed_patient_not_processed() {
        let mut state = GameState::new(5);
        let (_, patient_id) =
            occupied_room(&mut state, RoomType::GpOffice, DiseaseType::BloatyHead, 50.0);
        state.patient_mut(patient_id).unwrap().diagnosed = true;

        process_diagnosis(&mut state);

        assert_eq!(state.patient(patient_id).unwrap().diagnosis_progress, 0.0);
    }
}
