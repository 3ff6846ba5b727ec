//! Application state and its update rules

use std::collections::BTreeMap;

use panel_core::{is_zero_address, BlockHeight, ChainId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::popup::{Popup, PopupContent, PopupExpiry};

/// Modals that can be open. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationModal {
    Wallet,
    Settings,
    Menu,
    Network,
}

/// Navigation or menu link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub source: String,
}

/// Token entry of a token list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub chain_id: ChainId,
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub logo_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    pub name: String,
    #[serde(default)]
    pub logo_uri: Option<String>,
    /// Malformed tokens are dropped from the list
    #[serde(default, deserialize_with = "entries_or_empty")]
    pub tokens: Vec<TokenInfo>,
}

/// Branding stored alongside the domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageState {
    pub domain: String,
    pub project_name: String,
    pub brand_color: String,
    pub logo: String,
    pub token_lists: Vec<TokenList>,
    pub navigation_links: Vec<Link>,
    pub menu_links: Vec<Link>,
    pub social_links: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub app_management: bool,
    pub admin: String,
    pub factory: String,
    pub router: String,
    pub storage: String,
    pub pair_hash: String,
    /// Protocol fee encoding (percent × 100), unknown until fetched
    pub protocol_fee: Option<u64>,
    /// Total fee encoding (percent × 10), unknown until fetched
    pub total_fee: Option<u64>,
    pub all_fee_to_protocol: Option<bool>,
    /// Protocol fee encodings the factory accepts
    pub possible_protocol_percent: Vec<u64>,
    pub dev_fee_setter: String,
    pub total_swaps: Option<u64>,
    pub block_number: BTreeMap<ChainId, BlockHeight>,
    pub popup_list: Vec<Popup>,
    pub open_modal: Option<ApplicationModal>,
    #[serde(flatten)]
    pub branding: StorageState,
}

/// Domain data as read from the storage contract.
///
/// Fields are loosely typed on purpose: each one is validated on its own
/// and skipped if it does not have the expected shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainSnapshot {
    #[serde(deserialize_with = "string_or_none")]
    pub admin: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub factory: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub router: Option<String>,
    #[serde(rename = "storageAddr", deserialize_with = "string_or_none")]
    pub storage: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub pair_hash: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub dev_fee_setter: Option<String>,
    pub protocol_fee: Option<Value>,
    pub total_fee: Option<Value>,
    pub total_swaps: Option<Value>,
    pub all_fee_to_protocol: Option<Value>,
    /// Expected to be an array of numbers or numeric strings
    pub possible_protocol_percent: Option<Value>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Branding data as read from the storage contract.
///
/// A missing text field reads as empty; a wrongly typed one is `None` and
/// leaves the current value alone. Lists keep their well-formed entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingSnapshot {
    #[serde(default = "empty_text", deserialize_with = "string_or_none")]
    pub domain: Option<String>,
    #[serde(default = "empty_text", deserialize_with = "string_or_none")]
    pub project_name: Option<String>,
    #[serde(default = "empty_text", deserialize_with = "string_or_none")]
    pub brand_color: Option<String>,
    #[serde(default = "empty_text", deserialize_with = "string_or_none")]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "entries_or_none")]
    pub token_lists: Option<Vec<TokenList>>,
    #[serde(default, deserialize_with = "entries_or_none")]
    pub navigation_links: Option<Vec<Link>>,
    #[serde(default, deserialize_with = "entries_or_none")]
    pub menu_links: Option<Vec<Link>>,
    #[serde(default, deserialize_with = "entries_or_none")]
    pub social_links: Option<Vec<String>>,
}

fn empty_text() -> Option<String> {
    Some(String::new())
}

/// Keep the entries of an array that parse as `T`; anything else is `None`
fn entries_or_none<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn entries_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(entries_or_none(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone)]
pub enum Action {
    SetAppManagement(bool),
    ApplyDomainSnapshot(DomainSnapshot),
    ApplyBrandingSnapshot(BrandingSnapshot),
    UpdateBlockNumber {
        chain_id: ChainId,
        block_number: BlockHeight,
    },
    SetOpenModal(Option<ApplicationModal>),
    AddPopup {
        key: Option<String>,
        content: PopupContent,
        expiry: PopupExpiry,
    },
    RemovePopup {
        key: String,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetAppManagement(_) => "setAppManagement",
            Self::ApplyDomainSnapshot(_) => "retrieveDomainData",
            Self::ApplyBrandingSnapshot(_) => "updateAppData",
            Self::UpdateBlockNumber { .. } => "updateBlockNumber",
            Self::SetOpenModal(_) => "setOpenModal",
            Self::AddPopup { .. } => "addPopup",
            Self::RemovePopup { .. } => "removePopup",
        }
    }
}

/// Apply one action to the state. Never fails.
pub fn reduce(state: &mut ApplicationState, action: Action) {
    match action {
        Action::SetAppManagement(status) => state.app_management = status,
        Action::ApplyDomainSnapshot(snapshot) => apply_domain_snapshot(state, snapshot),
        Action::ApplyBrandingSnapshot(snapshot) => apply_branding_snapshot(state, snapshot),
        Action::UpdateBlockNumber {
            chain_id,
            block_number,
        } => {
            state
                .block_number
                .entry(chain_id)
                .and_modify(|height| *height = (*height).max(block_number))
                .or_insert(block_number);
        }
        Action::SetOpenModal(modal) => state.open_modal = modal,
        Action::AddPopup {
            key,
            content,
            expiry,
        } => {
            if let Some(key) = &key {
                state.popup_list.retain(|popup| &popup.key != key);
            }
            let key = key.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            state.popup_list.push(Popup::new(key, content, expiry));
        }
        Action::RemovePopup { key } => {
            for popup in state.popup_list.iter_mut().filter(|p| p.key == key) {
                popup.show = false;
            }
        }
    }
}

fn apply_domain_snapshot(state: &mut ApplicationState, snapshot: DomainSnapshot) {
    state.admin = address_or_empty(snapshot.admin);
    state.factory = address_or_empty(snapshot.factory);
    state.router = address_or_empty(snapshot.router);
    state.storage = address_or_empty(snapshot.storage);
    state.pair_hash = snapshot.pair_hash.unwrap_or_default();
    state.dev_fee_setter = address_or_empty(snapshot.dev_fee_setter);

    // An empty list means "not loaded", not "no values allowed"
    if let Some(Value::Array(percents)) = snapshot.possible_protocol_percent {
        let parsed: Vec<u64> = percents.iter().filter_map(as_number).collect();
        if !parsed.is_empty() {
            state.possible_protocol_percent = parsed;
        }
    }

    if let Some(fee) = snapshot.protocol_fee.as_ref().and_then(as_number) {
        state.protocol_fee = Some(fee);
    }
    if let Some(fee) = snapshot.total_fee.as_ref().and_then(as_number) {
        state.total_fee = Some(fee);
    }
    if let Some(swaps) = snapshot.total_swaps.as_ref().and_then(as_number) {
        state.total_swaps = Some(swaps);
    }
    if let Some(Value::Bool(all)) = snapshot.all_fee_to_protocol {
        state.all_fee_to_protocol = Some(all);
    }
}

fn apply_branding_snapshot(state: &mut ApplicationState, snapshot: BrandingSnapshot) {
    let branding = &mut state.branding;
    for (field, value) in [
        (&mut branding.domain, snapshot.domain),
        (&mut branding.project_name, snapshot.project_name),
        (&mut branding.brand_color, snapshot.brand_color),
        (&mut branding.logo, snapshot.logo),
    ] {
        if let Some(value) = value {
            *field = value;
        }
    }

    replace_if_filled(&mut branding.token_lists, snapshot.token_lists);
    replace_if_filled(&mut branding.navigation_links, snapshot.navigation_links);
    replace_if_filled(&mut branding.menu_links, snapshot.menu_links);
    replace_if_filled(&mut branding.social_links, snapshot.social_links);
}

fn replace_if_filled<T>(current: &mut Vec<T>, incoming: Option<Vec<T>>) {
    if let Some(list) = incoming.filter(|list| !list.is_empty()) {
        *current = list;
    }
}

fn address_or_empty(address: Option<String>) -> String {
    match address {
        Some(addr) if !is_zero_address(&addr) => addr,
        _ => String::new(),
    }
}

/// Accept JSON numbers and numeric strings holding a non-negative integer.
fn as_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
        }
        _ => None,
    }
}
