//! Dual-handle numeric range selection.
//!
//! Tracks a `[selected_min, selected_max]` window inside a fixed
//! `[domain_min, domain_max]` price domain. The ordering invariant
//! `domain_min <= selected_min <= selected_max <= domain_max` holds after
//! every mutation, not just at rest.
//!
//! Clamping never swaps or pushes: raising the min bound past the max
//! drags the min down to equal the max, and lowering the max below the min
//! pins the max at the min. Neither bound ever moves the other past
//! itself.

use showroom_model::format_inr;

/// Domain-percentage separation below which the two handles are treated
/// as visually overlapping and the min handle takes interaction priority.
pub const PROXIMITY_THRESHOLD: f64 = 10.0;

/// One of the two draggable bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Min,
    Max,
}

/// Selection state for a dual-handle price range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSelector {
    domain_min: i64,
    domain_max: i64,
    selected_min: i64,
    selected_max: i64,
    active: Option<Handle>,
}

impl RangeSelector {
    /// New selector spanning the whole domain.
    ///
    /// A reversed domain is normalized by swapping the bounds.
    #[must_use]
    pub fn new(domain_min: i64, domain_max: i64) -> Self {
        let (lo, hi) = if domain_max < domain_min {
            (domain_max, domain_min)
        } else {
            (domain_min, domain_max)
        };
        Self {
            domain_min: lo,
            domain_max: hi,
            selected_min: lo,
            selected_max: hi,
            active: None,
        }
    }

    /// New selector with an initial selection, clamped into the domain.
    #[must_use]
    pub fn with_selection(
        domain_min: i64,
        domain_max: i64,
        selected_min: i64,
        selected_max: i64,
    ) -> Self {
        let mut selector = Self::new(domain_min, domain_max);
        selector.set_max(selected_max);
        selector.set_min(selected_min);
        selector
    }

    #[must_use]
    pub fn domain_min(&self) -> i64 {
        self.domain_min
    }

    #[must_use]
    pub fn domain_max(&self) -> i64 {
        self.domain_max
    }

    #[must_use]
    pub fn selected_min(&self) -> i64 {
        self.selected_min
    }

    #[must_use]
    pub fn selected_max(&self) -> i64 {
        self.selected_max
    }

    fn clamp_to_domain(&self, value: i64) -> i64 {
        value.clamp(self.domain_min, self.domain_max)
    }

    /// Move the min bound. Clamped to the domain, then capped at the
    /// current max bound; the max never moves.
    pub fn set_min(&mut self, value: i64) {
        let clamped = self.clamp_to_domain(value);
        self.selected_min = clamped.min(self.selected_max);
    }

    /// Move the max bound. Clamped to the domain, then floored at the
    /// current min bound; the min never moves.
    pub fn set_max(&mut self, value: i64) {
        let clamped = self.clamp_to_domain(value);
        self.selected_max = clamped.max(self.selected_min);
    }

    /// Apply raw textual input to a handle.
    ///
    /// Non-numeric input is absorbed without a state change or an error;
    /// leniency here is a policy, not a failure.
    pub fn apply_input(&mut self, handle: Handle, input: &str) {
        let Ok(value) = input.trim().parse::<i64>() else {
            return;
        };
        match handle {
            Handle::Min => self.set_min(value),
            Handle::Max => self.set_max(value),
        }
    }

    /// Mark a handle as actively being dragged.
    pub fn begin_interaction(&mut self, handle: Handle) {
        self.active = Some(handle);
    }

    /// End the current drag, reverting priority to the proximity rule.
    pub fn end_interaction(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<Handle> {
        self.active
    }

    /// Position of the min bound as a percentage of the domain.
    ///
    /// A single-point domain projects the min bound to 0.
    #[must_use]
    pub fn min_percent(&self) -> f64 {
        if self.domain_max == self.domain_min {
            return 0.0;
        }
        (self.selected_min - self.domain_min) as f64 / (self.domain_max - self.domain_min) as f64
            * 100.0
    }

    /// Position of the max bound as a percentage of the domain.
    ///
    /// A single-point domain projects the max bound to 100.
    #[must_use]
    pub fn max_percent(&self) -> f64 {
        if self.domain_max == self.domain_min {
            return 100.0;
        }
        (self.selected_max - self.domain_min) as f64 / (self.domain_max - self.domain_min) as f64
            * 100.0
    }

    /// Distance between the handles in domain percentage.
    #[must_use]
    pub fn separation(&self) -> f64 {
        self.max_percent() - self.min_percent()
    }

    /// Which handle currently receives pointer interaction.
    ///
    /// An active drag takes absolute priority. Otherwise, when the handles
    /// overlap (separation under [`PROXIMITY_THRESHOLD`]) the min handle
    /// wins so it stays reachable; when separated, handles keep insertion
    /// order and the max handle, painted last, is on top.
    #[must_use]
    pub fn top_handle(&self) -> Handle {
        if let Some(handle) = self.active {
            return handle;
        }
        if self.separation() < PROXIMITY_THRESHOLD {
            Handle::Min
        } else {
            Handle::Max
        }
    }

    /// Min bound formatted with Indian digit grouping.
    #[must_use]
    pub fn display_min(&self) -> String {
        format_inr(self.selected_min)
    }

    /// Max bound formatted with Indian digit grouping.
    #[must_use]
    pub fn display_max(&self) -> String {
        format_inr(self.selected_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn price_selector() -> RangeSelector {
        RangeSelector::with_selection(1_660_000, 6_225_000, 2_000_000, 4_000_000)
    }

    #[test]
    fn lowering_max_below_min_pins_at_min() {
        let mut selector = price_selector();
        selector.set_max(1_500_000);
        assert_eq!(selector.selected_max(), 2_000_000);
        assert_eq!(selector.selected_min(), 2_000_000);
    }

    #[test]
    fn raising_min_above_max_drags_down_to_max() {
        let mut selector = price_selector();
        selector.set_min(5_000_000);
        assert_eq!(selector.selected_min(), 4_000_000);
        assert_eq!(selector.selected_max(), 4_000_000);
    }

    #[test]
    fn out_of_domain_values_clamp() {
        let mut selector = price_selector();
        selector.set_min(0);
        assert_eq!(selector.selected_min(), 1_660_000);
        selector.set_max(99_999_999);
        assert_eq!(selector.selected_max(), 6_225_000);
    }

    #[test]
    fn non_numeric_input_is_ignored() {
        let mut selector = price_selector();
        selector.apply_input(Handle::Min, "cheap");
        selector.apply_input(Handle::Max, "");
        assert_eq!(selector.selected_min(), 2_000_000);
        assert_eq!(selector.selected_max(), 4_000_000);

        selector.apply_input(Handle::Min, " 2500000 ");
        assert_eq!(selector.selected_min(), 2_500_000);
    }

    #[test]
    fn percent_projection() {
        let selector = RangeSelector::with_selection(0, 1_000, 250, 750);
        assert!((selector.min_percent() - 25.0).abs() < f64::EPSILON);
        assert!((selector.max_percent() - 75.0).abs() < f64::EPSILON);
        assert!((selector.separation() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_domain_projects_full_width() {
        let selector = RangeSelector::new(500, 500);
        assert_eq!(selector.min_percent(), 0.0);
        assert_eq!(selector.max_percent(), 100.0);
        // Full apparent separation, so the proximity rule never fires.
        assert_eq!(selector.top_handle(), Handle::Max);
    }

    #[test]
    fn overlapping_handles_give_min_priority() {
        let mut selector = RangeSelector::with_selection(0, 1_000, 480, 520);
        assert!(selector.separation() < PROXIMITY_THRESHOLD);
        assert_eq!(selector.top_handle(), Handle::Min);

        selector.set_max(900);
        assert_eq!(selector.top_handle(), Handle::Max);
    }

    #[test]
    fn active_handle_overrides_proximity_until_released() {
        let mut selector = RangeSelector::with_selection(0, 1_000, 480, 520);
        assert_eq!(selector.top_handle(), Handle::Min);

        selector.begin_interaction(Handle::Max);
        assert_eq!(selector.top_handle(), Handle::Max);

        selector.end_interaction();
        assert_eq!(selector.top_handle(), Handle::Min);
    }

    #[test]
    fn display_uses_indian_grouping() {
        let selector = price_selector();
        assert_eq!(selector.display_min(), "20,00,000");
        assert_eq!(selector.display_max(), "40,00,000");
    }

    #[test]
    fn reversed_domain_is_normalized() {
        let selector = RangeSelector::new(9_000, 1_000);
        assert_eq!(selector.domain_min(), 1_000);
        assert_eq!(selector.domain_max(), 9_000);
    }

    proptest! {
        #[test]
        fn ordering_invariant_holds_after_every_call(
            ops in prop::collection::vec((any::<bool>(), -10_000_000i64..20_000_000), 1..64)
        ) {
            let mut selector = RangeSelector::new(1_660_000, 6_225_000);
            for (is_min, value) in ops {
                if is_min {
                    selector.set_min(value);
                } else {
                    selector.set_max(value);
                }
                prop_assert!(selector.domain_min() <= selector.selected_min());
                prop_assert!(selector.selected_min() <= selector.selected_max());
                prop_assert!(selector.selected_max() <= selector.domain_max());
            }
        }
    }
}
