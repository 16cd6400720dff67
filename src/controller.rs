use crate::catalog::Catalog;
use crate::errors::ActionError;
use crate::models::{ClipboardReport, HistoryEntry};
use crate::store::InteractionState;
use chrono::NaiveTime;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Like,
    Copy,
    Call,
}

impl Control {
    /// Maps a card control's `data-control` tag. Anything else is not a control.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "like" => Some(Self::Like),
            "copy" => Some(Self::Copy),
            "call" => Some(Self::Call),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub control: Control,
    pub id: String,
    pub clipboard: Option<ClipboardReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Liked { name: String, liked: bool },
    Copied { number: String },
    Called(HistoryEntry),
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Liked { name, liked: true } => format!("Added {name} to favourites."),
            Outcome::Liked { name, liked: false } => format!("Removed {name} from favourites."),
            Outcome::Copied { number } => format!("Copied \"{number}\" to clipboard!"),
            Outcome::Called(entry) => {
                format!("Calling {} at {}...", entry.service_name, entry.service_number)
            }
        }
    }
}

/// Dispatches one card click against the store. A rejected click leaves the store untouched.
pub fn handle_click(
    catalog: &Catalog,
    state: &mut InteractionState,
    click: &Click,
    now: NaiveTime,
) -> Result<Outcome, ActionError> {
    let record = catalog
        .get(&click.id)
        .ok_or_else(|| ActionError::UnknownService(click.id.clone()))?;

    match click.control {
        Control::Like => {
            let liked = state.toggle_like(&record.id);
            Ok(Outcome::Liked {
                name: record.name.clone(),
                liked,
            })
        }
        Control::Copy => {
            state.ensure_copy_allowed()?;
            match &click.clipboard {
                Some(ClipboardReport::Written) => {}
                Some(ClipboardReport::Failed { reason }) => {
                    warn!("clipboard write failed for {}: {reason}", record.id);
                    return Err(ActionError::Clipboard(reason.clone()));
                }
                None => {
                    warn!("copy of {} arrived without a clipboard result", record.id);
                    return Err(ActionError::Clipboard("no clipboard result reported".to_string()));
                }
            }
            state.commit_copy()?;
            Ok(Outcome::Copied {
                number: record.number.clone(),
            })
        }
        Control::Call => {
            let entry = state.call(record, now)?;
            info!("call to {} ({}) logged", record.name, record.number);
            Ok(Outcome::Called(entry))
        }
    }
}

pub fn clear_history(state: &mut InteractionState) -> &'static str {
    state.clear_history();
    "Call history has been cleared."
}
