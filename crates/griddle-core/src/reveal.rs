//! Pure reveal timing for presentation layers.
//!
//! The engine does not run timers; it only derives when each cell of a turn
//! should flip. Renderers own the actual animation execution and may call
//! these functions repeatedly, they are stateless and idempotent.
use std::time::Duration;

use crate::config::GameConfig;

/// When a single cell of a turn should be revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellReveal {
    pub cell_index: usize,
    pub offset: Duration,
}

/// Reveal schedule for one turn's row of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReveal {
    pub turn_index: usize,
    pub cells: Vec<CellReveal>,
}

/// Schedule for revealing a freshly evaluated turn: cells flip left to
/// right, one every 200 ms.
pub fn schedule_for(turn_index: usize, word_length: usize) -> TurnReveal {
    TurnReveal {
        turn_index,
        cells: (0..word_length)
            .map(|cell_index| CellReveal {
                cell_index,
                offset: GameConfig::REVEAL_STEP * cell_index as u32,
            })
            .collect(),
    }
}

/// Schedule for re-hydrating an already-played board after resume: rows
/// stagger by 300 ms and cells within a row by 100 ms.
pub fn replay_schedule(turn_count: usize, word_length: usize) -> Vec<TurnReveal> {
    (0..turn_count)
        .map(|turn_index| TurnReveal {
            turn_index,
            cells: (0..word_length)
                .map(|cell_index| CellReveal {
                    cell_index,
                    offset: GameConfig::REPLAY_ROW_STAGGER * turn_index as u32
                        + GameConfig::REPLAY_CELL_STAGGER * cell_index as u32,
                })
                .collect(),
        })
        .collect()
}
