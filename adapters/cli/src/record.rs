//! Decoding of a single JSON tick record into a [`TickState`].

use gem_scout_core::{CellCoord, TickState};
use serde::Deserialize;
use thiserror::Error;

/// Failure raised when a framed record cannot be interpreted.
#[derive(Debug, Error)]
pub(crate) enum DecodeError {
    /// The record was not a JSON object of the expected shape.
    #[error("malformed tick record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coordinate pair as it appears on the wire.
type Pair = [i32; 2];

/// Raw tick record. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct TickRecord {
    #[serde(default)]
    bot: Option<Pair>,
    #[serde(default)]
    agent: Option<Pair>,
    #[serde(default)]
    wall: Option<Vec<Pair>>,
    #[serde(default)]
    floor: Option<Vec<Pair>>,
    #[serde(default)]
    gems: Option<GemField>,
    #[serde(default)]
    visible_gems: Option<GemField>,
    #[serde(default)]
    config: Option<MapConfig>,
}

/// Goal lists arrive either as one bare pair or as a list of entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GemField {
    One(Pair),
    Many(Vec<GemEntry>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GemEntry {
    Pair(Pair),
    Positioned { position: Pair },
}

impl GemEntry {
    const fn position(&self) -> Pair {
        match self {
            Self::Pair(pair) | Self::Positioned { position: pair } => *pair,
        }
    }
}

impl GemField {
    fn into_cells(self) -> Vec<CellCoord> {
        match self {
            Self::One(pair) => vec![CellCoord::from(pair)],
            Self::Many(entries) => entries
                .iter()
                .map(|entry| CellCoord::from(entry.position()))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MapConfig {
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// Parses one framed record.
pub(crate) fn decode(text: &str) -> Result<TickRecord, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

impl TickRecord {
    /// Map dimensions announced by the record, if both are present.
    #[must_use]
    pub(crate) fn dimensions(&self) -> Option<(u32, u32)> {
        let config = self.config.as_ref()?;
        Some((config.width?, config.height?))
    }

    /// Converts the record into a snapshot, or `None` when no agent position
    /// was supplied under either `bot` or `agent`.
    #[must_use]
    pub(crate) fn into_state(self) -> Option<TickState> {
        let agent = self.bot.or(self.agent)?;
        let goals = self
            .gems
            .or(self.visible_gems)
            .map(GemField::into_cells)
            .unwrap_or_default();

        Some(TickState {
            agent: CellCoord::from(agent),
            walls: cells(self.wall),
            floors: cells(self.floor),
            goals,
        })
    }
}

fn cells(pairs: Option<Vec<Pair>>) -> Vec<CellCoord> {
    pairs
        .unwrap_or_default()
        .into_iter()
        .map(CellCoord::from)
        .collect()
}
