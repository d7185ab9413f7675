// Pure slot reordering and pinned-order merging (no I/O)

use crate::dock::types::{AppSlot, DockSlot, Identifier, PinnedEntry};

pub fn separator_index(slots: &[DockSlot]) -> Option<usize> {
    slots.iter().position(DockSlot::is_separator)
}

/// Result of moving one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Invalid indices, a separator as source, or a no-op move
    Unchanged,
    /// Order changed within one group
    Reordered,
    /// The slot changed group; pinned membership is now different
    CrossedSeparator,
}

/// Remove the slot at `source` and insert it at `target`, an index into the
/// list after removal (clamped to its end).
///
/// With a separator present, a target at or before the separator lands in
/// the pinned group, anything after it in the running group.
pub fn move_slot(slots: &mut Vec<DockSlot>, source: usize, target: usize) -> MoveOutcome {
    let Some(DockSlot::App(moved)) = slots.get(source) else {
        return MoveOutcome::Unchanged;
    };
    let was_pinned = moved.is_pinned;

    let DockSlot::App(mut moved) = slots.remove(source) else {
        return MoveOutcome::Unchanged;
    };
    let target = target.min(slots.len());
    let lands_pinned = match separator_index(slots) {
        Some(sep) => target <= sep,
        None => was_pinned,
    };

    if lands_pinned == was_pinned {
        let unchanged = target == source;
        slots.insert(target, DockSlot::App(moved));
        return if unchanged {
            MoveOutcome::Unchanged
        } else {
            MoveOutcome::Reordered
        };
    }

    moved.is_pinned = lands_pinned;
    slots.insert(target, DockSlot::App(moved));
    MoveOutcome::CrossedSeparator
}

/// Persistable form of a slot, preferring the resolved application's
/// canonical fields over whatever identified it before.
pub fn slot_to_entry(slot: &AppSlot) -> PinnedEntry {
    if let Some(app) = &slot.resolved_app {
        return PinnedEntry::from_app(app);
    }
    match &slot.identity {
        Identifier::Entry(entry) => entry.clone(),
        Identifier::Raw(raw) => PinnedEntry {
            name: Some(raw.clone()),
            window_class: Some(raw.clone()),
            ..PinnedEntry::default()
        },
    }
}

fn claim(stored: &[PinnedEntry], claimed: &mut [bool], entry: &PinnedEntry) -> bool {
    match (0..stored.len()).find(|&i| !claimed[i] && stored[i] == *entry) {
        Some(i) => {
            claimed[i] = true;
            true
        }
        None => false,
    }
}

/// Pinned list after slots were moved, merged into the store's current
/// list.
///
/// Pinned slots come first in their new order. Entries the store gained
/// since the slots were built follow in stored order. Entries dragged out of
/// the pinned group, or already gone from the store, are left out. Every
/// kept pinned slot takes the saved entry as its identity so a later merge
/// still finds it in the store.
pub fn pinned_order(slots: &mut [DockSlot], stored: &[PinnedEntry]) -> Vec<PinnedEntry> {
    let mut claimed = vec![false; stored.len()];
    let mut order = Vec::new();

    for slot in slots.iter_mut() {
        let DockSlot::App(slot) = slot else {
            continue;
        };
        let keep = match &slot.identity {
            Identifier::Entry(entry) => claim(stored, &mut claimed, entry) && slot.is_pinned,
            Identifier::Raw(_) => slot.is_pinned,
        };
        if keep {
            let saved = slot_to_entry(slot);
            slot.identity = Identifier::Entry(saved.clone());
            order.push(saved);
        }
    }

    order.extend(
        stored
            .iter()
            .zip(&claimed)
            .filter(|(_, used)| !**used)
            .map(|(entry, _)| entry.clone()),
    );
    order
}
