use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRef {
    #[serde(rename = "icon_class")]
    pub class: String,
    #[serde(rename = "icon_bg_color", default)]
    pub bg_color: String,
    #[serde(rename = "icon_color", default)]
    pub color: String,
}

/// One directory entry. Read-only once the catalog has loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub number: String,
    pub category: String,
    #[serde(flatten)]
    pub icon: IconRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub service_name: String,
    pub service_number: String,
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub control: String,
    pub id: String,
    #[serde(default)]
    pub clipboard: Option<ClipboardReport>,
}

/// Outcome of the browser's clipboard write, forwarded with a copy click.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ClipboardReport {
    Written,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub appreciation: u64,
    pub coins: u64,
    pub copy_credits: u64,
    pub liked_ids: Vec<String>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub message: String,
    pub state: StateSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub services: Vec<ServiceRecord>,
}
