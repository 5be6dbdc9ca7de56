//! # Selection State Machine
//!
//! Tracks the size and toppings chosen in one order configuration session.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Selection Lifecycle                                │
//! │                                                                         │
//! │   ┌───────────────┐  on_catalog_loaded([])   ┌──────────────┐          │
//! │   │ Uninitialized │ ───────────────────────► │ AwaitingSize │          │
//! │   └───────┬───────┘                          └──────┬───────┘          │
//! │           │ on_catalog_loaded([s1, ..])             │ on_catalog_loaded │
//! │           │   → chosen = s1                         │   ([s1, ..])      │
//! │           ▼                                         ▼                   │
//! │   ┌─────────────────────────────────────────────────────────────┐      │
//! │   │                          Ready                               │      │
//! │   │   choose_size(id)      → replaces the size                   │      │
//! │   │   toggle_topping(id)   → flips set membership                │      │
//! │   │   on_catalog_loaded()  → keeps the size, or re-defaults      │      │
//! │   └─────────────────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sizes and toppings load independently. Toggling is rejected until the
//! topping snapshot has arrived; size choice until the size snapshot has.

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{Size, Topping};

/// Observable state of a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// No size snapshot yet.
    Uninitialized,
    /// Sizes loaded but none available.
    AwaitingSize,
    /// A valid size is chosen.
    Ready,
}

/// Chosen topping ids: unique, kept in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToppingSet(Vec<String>);

impl ToppingSet {
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|chosen| chosen == id)
    }

    /// Adds or removes `id`. Returns true when it is now present.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.0.iter().position(|chosen| chosen == id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id.to_string());
            true
        }
    }

    pub fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.0.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// The in-progress choice of one size and zero or more toppings.
///
/// ## Ownership
/// A `Selection` is a plain value owned by whoever runs the session and is
/// passed to [`crate::order::compute_order`] by reference. It keeps the id
/// snapshots it validated against so that stale ids are caught at the
/// moment they are chosen.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    chosen_size_id: Option<String>,
    chosen_topping_ids: ToppingSet,
    #[serde(skip)]
    active_size_ids: Option<Vec<String>>,
    #[serde(skip)]
    active_topping_ids: Option<Vec<String>>,
}

impl Selection {
    /// Creates an uninitialized selection.
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn state(&self) -> SelectionState {
        match (&self.active_size_ids, &self.chosen_size_id) {
            (None, _) => SelectionState::Uninitialized,
            (Some(_), None) => SelectionState::AwaitingSize,
            (Some(_), Some(_)) => SelectionState::Ready,
        }
    }

    pub fn chosen_size_id(&self) -> Option<&str> {
        self.chosen_size_id.as_deref()
    }

    pub fn chosen_topping_ids(&self) -> &ToppingSet {
        &self.chosen_topping_ids
    }

    pub fn is_topping_chosen(&self, id: &str) -> bool {
        self.chosen_topping_ids.contains(id)
    }

    /// Applies a freshly loaded active-size snapshot.
    ///
    /// ## Behavior
    /// - Chosen size still present → kept
    /// - Unset or no longer present → first size of the snapshot
    /// - Empty snapshot → choice cleared, `NoActiveSizes` returned
    ///
    /// `sizes` must already be in display order, as the loader returns them.
    pub fn on_catalog_loaded(&mut self, sizes: &[Size]) -> CoreResult<()> {
        self.active_size_ids = Some(sizes.iter().map(|s| s.id.clone()).collect());

        let still_valid = self
            .chosen_size_id
            .as_deref()
            .is_some_and(|id| sizes.iter().any(|s| s.id == id));

        if still_valid {
            return Ok(());
        }

        match sizes.first() {
            Some(first) => {
                debug!(
                    previous = ?self.chosen_size_id,
                    size_id = %first.id,
                    "Defaulting size selection"
                );
                self.chosen_size_id = Some(first.id.clone());
                Ok(())
            }
            None => {
                self.chosen_size_id = None;
                Err(CoreError::NoActiveSizes)
            }
        }
    }

    /// Applies a freshly loaded active-topping snapshot.
    ///
    /// Chosen toppings that are no longer active are dropped.
    pub fn on_toppings_loaded(&mut self, toppings: &[Topping]) {
        let before = self.chosen_topping_ids.len();
        self.chosen_topping_ids
            .retain(|id| toppings.iter().any(|t| &t.id == id));

        let dropped = before - self.chosen_topping_ids.len();
        if dropped > 0 {
            debug!(dropped, "Dropped toppings no longer available");
        }

        self.active_topping_ids = Some(toppings.iter().map(|t| t.id.clone()).collect());
    }

    /// Chooses a size, replacing any previous choice.
    pub fn choose_size(&mut self, id: &str) -> CoreResult<()> {
        let known = self
            .active_size_ids
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|known| known == id));

        if !known {
            return Err(CoreError::invalid_size(id));
        }

        self.chosen_size_id = Some(id.to_string());
        Ok(())
    }

    /// Adds the topping if absent, removes it if present.
    ///
    /// Returns true when the topping is selected after the call.
    pub fn toggle_topping(&mut self, id: &str) -> CoreResult<bool> {
        let known = self
            .active_topping_ids
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|known| known == id));

        if !known {
            return Err(CoreError::invalid_topping(id));
        }

        Ok(self.chosen_topping_ids.toggle(id))
    }

    /// Forgets the chosen toppings, keeping the size.
    pub fn clear_toppings(&mut self) {
        self.chosen_topping_ids = ToppingSet::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn sizes() -> Vec<Size> {
        vec![
            Size::new("s1", "300ml", Money::from_cents(1200), 0),
            Size::new("s2", "500ml", Money::from_cents(1800), 1),
        ]
    }

    fn toppings() -> Vec<Topping> {
        vec![
            Topping::new("t1", "Granola", Money::from_cents(200), 0),
            Topping::new("t2", "Nutella", Money::from_cents(500), 1),
            Topping::new("t3", "Mel", Money::from_cents(200), 2),
        ]
    }

    fn ready() -> Selection {
        let mut selection = Selection::new();
        selection.on_catalog_loaded(&sizes()).unwrap();
        selection.on_toppings_loaded(&toppings());
        selection
    }

    #[test]
    fn test_defaults_to_first_size() {
        let mut selection = Selection::new();
        assert_eq!(selection.state(), SelectionState::Uninitialized);

        selection.on_catalog_loaded(&sizes()).unwrap();
        assert_eq!(selection.state(), SelectionState::Ready);
        assert_eq!(selection.chosen_size_id(), Some("s1"));
    }

    #[test]
    fn test_empty_sizes_reports_no_active_sizes() {
        let mut selection = Selection::new();
        assert_eq!(selection.on_catalog_loaded(&[]), Err(CoreError::NoActiveSizes));
        assert_eq!(selection.state(), SelectionState::AwaitingSize);
        assert_eq!(selection.chosen_size_id(), None);
    }

    #[test]
    fn test_reload_keeps_valid_size() {
        let mut selection = ready();
        selection.choose_size("s2").unwrap();

        selection.on_catalog_loaded(&sizes()).unwrap();
        assert_eq!(selection.chosen_size_id(), Some("s2"));
    }

    #[test]
    fn test_reload_removing_chosen_size_redefaults() {
        let mut selection = ready();
        selection.choose_size("s2").unwrap();

        let reloaded = vec![
            Size::new("s3", "700ml", Money::from_cents(2400), 0),
            Size::new("s1", "300ml", Money::from_cents(1200), 1),
        ];
        selection.on_catalog_loaded(&reloaded).unwrap();
        assert_eq!(selection.chosen_size_id(), Some("s3"));
    }

    #[test]
    fn test_choose_size_replaces() {
        let mut selection = ready();
        selection.choose_size("s2").unwrap();
        selection.choose_size("s1").unwrap();
        assert_eq!(selection.chosen_size_id(), Some("s1"));
    }

    #[test]
    fn test_choose_unknown_size_fails() {
        let mut selection = ready();
        assert_eq!(selection.choose_size("s9"), Err(CoreError::invalid_size("s9")));
        assert_eq!(selection.chosen_size_id(), Some("s1"));

        let mut fresh = Selection::new();
        assert!(fresh.choose_size("s1").is_err());
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut selection = ready();
        selection.toggle_topping("t2").unwrap();

        let before: Vec<String> = selection.chosen_topping_ids().iter().map(str::to_string).collect();

        assert!(selection.toggle_topping("t1").unwrap());
        assert!(!selection.toggle_topping("t1").unwrap());

        let after: Vec<String> = selection.chosen_topping_ids().iter().map(str::to_string).collect();
        assert_eq!(before, after);
        assert!(selection.is_topping_chosen("t2"));
    }

    #[test]
    fn test_toggle_keeps_insertion_order() {
        let mut selection = ready();
        selection.toggle_topping("t3").unwrap();
        selection.toggle_topping("t1").unwrap();
        let ids: Vec<&str> = selection.chosen_topping_ids().iter().collect();
        assert_eq!(ids, vec!["t3", "t1"]);
    }

    #[test]
    fn test_toggle_unknown_or_unloaded_topping_fails() {
        let mut selection = ready();
        assert_eq!(selection.toggle_topping("t9"), Err(CoreError::invalid_topping("t9")));

        // Sizes arrived first, toppings still loading
        let mut partial = Selection::new();
        partial.on_catalog_loaded(&sizes()).unwrap();
        assert!(partial.toggle_topping("t1").is_err());
        assert_eq!(partial.state(), SelectionState::Ready);
    }

    #[test]
    fn test_toppings_reload_drops_inactive_choices() {
        let mut selection = ready();
        selection.toggle_topping("t1").unwrap();
        selection.toggle_topping("t2").unwrap();

        let reloaded: Vec<Topping> = toppings().into_iter().filter(|t| t.id != "t1").collect();
        selection.on_toppings_loaded(&reloaded);

        let ids: Vec<&str> = selection.chosen_topping_ids().iter().collect();
        assert_eq!(ids, vec!["t2"]);
    }

    #[test]
    fn test_clear_toppings() {
        let mut selection = ready();
        selection.toggle_topping("t1").unwrap();
        selection.clear_toppings();
        assert!(selection.chosen_topping_ids().is_empty());
        assert_eq!(selection.chosen_size_id(), Some("s1"));
    }
}
