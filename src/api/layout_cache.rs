/// Domain-derived layout values, valid until the next rescale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct LayoutCache {
    unit_count: Option<usize>,
    bar_thickness: Option<f64>,
    /// Set by rescale; consumed by the next pass to re-emit axes.
    axes_dirty: bool,
}

impl LayoutCache {
    pub(super) fn invalidate(&mut self) {
        self.unit_count = None;
        self.bar_thickness = None;
        self.axes_dirty = true;
    }

    #[must_use]
    pub(super) fn unit_count(&self) -> Option<usize> {
        self.unit_count
    }

    pub(super) fn store_unit_count(&mut self, count: usize) {
        self.unit_count = Some(count);
    }

    #[must_use]
    pub(super) fn bar_thickness(&self) -> Option<f64> {
        self.bar_thickness
    }

    pub(super) fn store_bar_thickness(&mut self, thickness: f64) {
        self.bar_thickness = Some(thickness);
    }

    pub(super) fn take_axes_dirty(&mut self) -> bool {
        std::mem::take(&mut self.axes_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::LayoutCache;

    #[test]
    fn invalidate_drops_cached_values_and_marks_axes() {
        let mut cache = LayoutCache::default();
        cache.store_unit_count(12);
        cache.store_bar_thickness(8.0);

        cache.invalidate();
        assert_eq!(cache.unit_count(), None);
        assert_eq!(cache.bar_thickness(), None);
        assert!(cache.take_axes_dirty());
        assert!(!cache.take_axes_dirty());
    }
}
