//! Turns per-poll edge classifications into the dispatchable event batch.

use heapless::Vec;
use seesaw_async::keypad::Edge;

use crate::event::{KeyEvent, KEY_COUNT};
use crate::mask::EventMasks;

/// Builds one poll's event batch: ascending key order, filtered to the edges
/// the registry arms. This is the order the engine's FIFO delivers in, so
/// callers see identical dispatch on both backends.
pub fn build_events(
    edges: &[Edge; KEY_COUNT as usize],
    masks: &EventMasks,
) -> Vec<KeyEvent, { KEY_COUNT as usize }> {
    let mut out = Vec::new();
    for (key, &edge) in edges.iter().enumerate() {
        let key = key as u8;
        if masks.armed(key, edge) {
            // one edge per key per poll, so capacity is exact
            let _ = out.push(KeyEvent { key, edge });
        }
    }
    out
}
