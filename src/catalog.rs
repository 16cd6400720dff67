use crate::models::{IconRef, ServiceRecord};
use std::{collections::HashSet, path::PathBuf, time::Duration};
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` values are fetched, anything else is read from disk.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch catalog: {0}")]
    Request(#[from] reqwest::Error),
    #[error("catalog request returned status {0}")]
    Status(u16),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog did not load within {0} seconds")]
    Timeout(u64),
    #[error("duplicate service id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ServiceRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<ServiceRecord>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(LoadError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ServiceRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub async fn load_catalog(source: &CatalogSource, timeout: Duration) -> Result<Catalog, LoadError> {
    let records = tokio::time::timeout(timeout, read_services(source))
        .await
        .map_err(|_| LoadError::Timeout(timeout.as_secs()))??;

    let catalog = Catalog::from_records(records)?;
    info!("loaded {} services", catalog.len());
    Ok(catalog)
}

async fn read_services(source: &CatalogSource) -> Result<Vec<ServiceRecord>, LoadError> {
    match source {
        CatalogSource::Embedded => Ok(embedded_services()),
        CatalogSource::File(path) => {
            let bytes = fs::read(path).await.map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?;
            Ok(serde_json::from_slice(&bytes)?)
        }
        CatalogSource::Url(url) => fetch_services(url).await,
    }
}

async fn fetch_services(url: &str) -> Result<Vec<ServiceRecord>, LoadError> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

const EMBEDDED: [(&str, &str, &str, &str, &str, &str); 9] = [
    ("national-emergency", "National Emergency Number", "National Emergency", "999", "All", "fa-solid fa-house-chimney-medical"),
    ("police", "Police Helpline Number", "Police", "999", "Police", "fa-solid fa-building-shield"),
    ("fire-service", "Fire Service Number", "Fire Service", "999", "Fire", "fa-solid fa-fire"),
    ("ambulance", "Ambulance Service", "Ambulance", "1994-999999", "Health", "fa-solid fa-truck-medical"),
    ("women-child-help", "Women & Child Helpline", "Women & Child Help", "109", "Help", "fa-solid fa-person-dress"),
    ("anti-corruption", "Anti-Corruption Helpline", "Anti-Corruption", "106", "Govt.", "fa-solid fa-handcuffs"),
    ("electricity-outage", "Electricity Helpline", "Electricity Outage", "16216", "Electricity", "fa-solid fa-bolt"),
    ("brac", "Brac Helpline", "Brac", "16445", "NGO", "fa-solid fa-hands-holding-child"),
    ("bangladesh-railway", "Bangladesh Railway Helpline", "Bangladesh Railway", "163", "Travel", "fa-solid fa-train"),
];

pub fn embedded_services() -> Vec<ServiceRecord> {
    EMBEDDED
        .iter()
        .map(|(id, name, description, number, category, icon)| ServiceRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            number: number.to_string(),
            category: category.to_string(),
            icon: IconRef {
                class: icon.to_string(),
                bg_color: "bg-gray-100".to_string(),
                color: "text-emerald-500".to_string(),
            },
        })
        .collect()
}
