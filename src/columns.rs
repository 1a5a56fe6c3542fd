//! Which statistic columns the category grid shows.

use serde::{Deserialize, Serialize};

use crate::error::PrefsError;
use crate::prefs::{self, KeyValueStore, VISIBLE_COLUMNS_KEY};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    Allocated,
    Net,
    Remaining,
    LastActivity,
    Entries,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

impl ColumnId {
    pub const ALL: [ColumnId; 5] = [
        ColumnId::Allocated,
        ColumnId::Net,
        ColumnId::Remaining,
        ColumnId::LastActivity,
        ColumnId::Entries,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Allocated => "allocated",
            ColumnId::Net => "net",
            ColumnId::Remaining => "remaining",
            ColumnId::LastActivity => "lastActivity",
            ColumnId::Entries => "entries",
        }
    }

    pub fn parse(raw: &str) -> Option<ColumnId> {
        ColumnId::ALL.into_iter().find(|id| id.as_str() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnId::Allocated => "Allocated",
            ColumnId::Net => "Net (±)",
            ColumnId::Remaining => "Remaining",
            ColumnId::LastActivity => "Last Activity",
            ColumnId::Entries => "# Entries",
        }
    }

    pub fn align(self) -> Align {
        match self {
            ColumnId::LastActivity => Align::Left,
            _ => Align::Right,
        }
    }
}

/// Named column sets offered next to the individual toggles.
pub const PRESETS: &[(&str, &[ColumnId])] = &[
    ("Basic", &[ColumnId::Allocated, ColumnId::Remaining, ColumnId::LastActivity]),
    (
        "Detailed",
        &[
            ColumnId::Allocated,
            ColumnId::Net,
            ColumnId::Remaining,
            ColumnId::Entries,
            ColumnId::LastActivity,
        ],
    ),
    ("Savings Focus", &[ColumnId::Allocated, ColumnId::Remaining]),
    (
        "Full View",
        &[
            ColumnId::Allocated,
            ColumnId::Net,
            ColumnId::Remaining,
            ColumnId::LastActivity,
            ColumnId::Entries,
        ],
    ),
];

const DEFAULT_COLUMNS: [ColumnId; 3] = [ColumnId::Allocated, ColumnId::Remaining, ColumnId::LastActivity];

/// Ordered, duplicate-free, never-empty set of visible columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnSelection(Vec<ColumnId>);

impl Default for ColumnSelection {
    fn default() -> Self {
        ColumnSelection(DEFAULT_COLUMNS.to_vec())
    }
}

impl ColumnSelection {
    /// Build from ids, dropping duplicates; empty input yields the default set.
    pub fn new(ids: impl IntoIterator<Item = ColumnId>) -> Self {
        let mut out: Vec<ColumnId> = Vec::new();
        for id in ids {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        if out.is_empty() {
            ColumnSelection::default()
        } else {
            ColumnSelection(out)
        }
    }

    /// Build from stored strings, dropping anything not on the whitelist.
    pub fn from_ids<S: AsRef<str>>(raw: &[S]) -> Self {
        ColumnSelection::new(raw.iter().filter_map(|id| ColumnId::parse(id.as_ref())))
    }

    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, ids)| ColumnSelection::new(ids.iter().copied()))
    }

    pub fn ids(&self) -> &[ColumnId] {
        &self.0
    }

    pub fn contains(&self, id: ColumnId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Show or hide one column. Hiding the last visible column is refused.
    pub fn toggled(&self, id: ColumnId) -> Self {
        let mut ids = self.0.clone();
        if let Some(pos) = ids.iter().position(|c| *c == id) {
            if ids.len() > 1 {
                ids.remove(pos);
            }
        } else {
            ids.push(id);
        }
        ColumnSelection(ids)
    }

    /// Read the persisted selection; absent or unreadable values give the default.
    pub fn load(store: &impl KeyValueStore) -> Self {
        match prefs::load_json::<Vec<String>>(store, VISIBLE_COLUMNS_KEY) {
            Some(raw) => ColumnSelection::from_ids(&raw),
            None => ColumnSelection::default(),
        }
    }

    pub fn persist(&self, store: &impl KeyValueStore) -> Result<(), PrefsError> {
        prefs::save_json(store, VISIBLE_COLUMNS_KEY, self)
    }
}
