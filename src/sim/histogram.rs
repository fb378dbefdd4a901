//! Fixed-bin histogram of detected particle positions

/// Running per-bin counts over the screen interval `[-X, X]`
///
/// Bin geometry (count, centers) is fixed at construction; only the
/// counts mutate. Values mapping outside `[0, bins)` are dropped
/// silently.
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: Vec<u32>,
    centers: Vec<f32>,
    half_width: f32,
    total: u64,
}

impl Histogram {
    /// Create a zeroed histogram with `bins` equal-width bins over `[-half_width, half_width]`
    pub fn new(bins: usize, half_width: f32) -> Self {
        let bin_width = 2.0 * half_width / bins as f32;
        let centers = (0..bins)
            .map(|i| -half_width + (i as f32 + 0.5) * bin_width)
            .collect();
        Self {
            counts: vec![0; bins],
            centers,
            half_width,
            total: 0,
        }
    }

    /// Bin index for a screen position, or None if out of range
    pub fn bin_index(&self, x: f32) -> Option<usize> {
        let bins = self.counts.len() as f32;
        let t = (x + self.half_width) / (2.0 * self.half_width) * bins;
        if t < 0.0 || t >= bins {
            return None;
        }
        Some(t as usize)
    }

    /// Record one hit, incrementing exactly one bin (no-op out of range)
    pub fn record(&mut self, x: f32) {
        if let Some(idx) = self.bin_index(x) {
            self.counts[idx] += 1;
            self.total += 1;
        }
    }

    /// Zero all counts; bin geometry is untouched
    pub fn reset(&mut self) {
        self.counts.fill(0);
        self.total = 0;
    }

    /// Read-only snapshot of current counts
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Bin center coordinates, derived once at construction
    pub fn centers(&self) -> &[f32] {
        &self.centers
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total hits recorded since the last reset
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Largest single-bin count (0 for an empty histogram)
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_assignment_literals() {
        // M=100, X=5: center value lands in the center bin
        let h = Histogram::new(100, 5.0);
        assert_eq!(h.bin_index(0.0), Some(50));
        assert_eq!(h.bin_index(-5.0), Some(0));
        assert_eq!(h.bin_index(4.999), Some(99));
    }

    #[test]
    fn test_out_of_range_dropped() {
        let mut h = Histogram::new(100, 5.0);
        assert_eq!(h.bin_index(5.0), None);
        assert_eq!(h.bin_index(-5.001), None);
        h.record(7.0);
        h.record(-7.0);
        assert_eq!(h.total(), 0);
        assert!(h.counts().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_record_increments_one_bin() {
        let mut h = Histogram::new(100, 5.0);
        h.record(0.0);
        assert_eq!(h.counts()[50], 1);
        assert_eq!(h.counts().iter().map(|&c| c as u64).sum::<u64>(), 1);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn test_reset_preserves_geometry() {
        let mut h = Histogram::new(100, 5.0);
        let centers_before = h.centers().to_vec();
        h.record(1.0);
        h.record(-2.5);
        h.reset();
        assert_eq!(h.total(), 0);
        assert!(h.counts().iter().all(|&c| c == 0));
        assert_eq!(h.bins(), 100);
        assert_eq!(h.centers(), centers_before.as_slice());
    }

    #[test]
    fn test_reset_idempotent() {
        let mut h = Histogram::new(100, 5.0);
        h.record(0.5);
        h.reset();
        let once = h.clone();
        h.reset();
        assert_eq!(h.counts(), once.counts());
        assert_eq!(h.total(), once.total());
    }

    #[test]
    fn test_centers_span_screen() {
        let h = Histogram::new(100, 5.0);
        let centers = h.centers();
        assert_eq!(centers.len(), 100);
        assert!((centers[0] - (-4.95)).abs() < 1e-4);
        assert!((centers[99] - 4.95).abs() < 1e-4);
    }
}
