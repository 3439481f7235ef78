//! Normalized maker-portal store and its read selectors
//!
//! A library surface for the maker portal reached through the success link.
//! The submission screens do not read it; nothing here is wired into `App`,
//! which is why the module is exempt from dead-code checks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A listed app as the maker portal sees it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakerApp {
    pub id: u64,
    pub name: String,
    #[serde(rename = "BTCAddress")]
    pub btc_address: Option<String>,
    pub stacks_address: Option<String>,
    #[serde(rename = "isKYCVerified")]
    pub is_kyc_verified: bool,
}

/// Partial update for [`update_entity`]; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MakerAppPatch {
    pub name: Option<String>,
    pub btc_address: Option<String>,
    pub stacks_address: Option<String>,
    pub is_kyc_verified: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MakerState {
    pub loading: bool,
    pub app_ids: Vec<u64>,
    pub app_entities: HashMap<u64, MakerApp>,
    pub selected_app_id: Option<u64>,
}

/// Onboarding checklist for the selected app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStatus {
    pub payment_details_complete: bool,
    pub kyc_complete: bool,
    pub legal_complete: bool,
}

pub fn select_maker(state: &MakerState) -> &MakerState {
    state
}

pub fn select_is_maker_loading(state: &MakerState) -> bool {
    state.loading
}

/// Apps in id order; ids without an entity are skipped
pub fn select_app_list(state: &MakerState) -> Vec<&MakerApp> {
    state
        .app_ids
        .iter()
        .filter_map(|id| state.app_entities.get(id))
        .collect()
}

pub fn select_current_app(state: &MakerState) -> Option<&MakerApp> {
    state
        .selected_app_id
        .and_then(|id| state.app_entities.get(&id))
}

/// `None` when no app is selected
pub fn select_completion_status(state: &MakerState) -> Option<CompletionStatus> {
    let app = select_current_app(state)?;
    let present = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.is_empty());
    Some(CompletionStatus {
        payment_details_complete: present(&app.btc_address) && present(&app.stacks_address),
        kyc_complete: app.is_kyc_verified,
        legal_complete: false,
    })
}

/// Return a new state with `patch` merged into entity `id`
pub fn update_entity(state: &MakerState, id: u64, patch: MakerAppPatch) -> MakerState {
    let mut next = state.clone();
    let entity = next.app_entities.entry(id).or_insert_with(|| MakerApp {
        id,
        ..Default::default()
    });
    if let Some(name) = patch.name {
        entity.name = name;
    }
    if let Some(address) = patch.btc_address {
        entity.btc_address = Some(address);
    }
    if let Some(address) = patch.stacks_address {
        entity.stacks_address = Some(address);
    }
    if let Some(verified) = patch.is_kyc_verified {
        entity.is_kyc_verified = verified;
    }
    next
}
