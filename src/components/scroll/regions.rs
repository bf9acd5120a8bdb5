//! Pinned region derivation.
//!
//! Pins are reported in document scroll pixels. Snapping works in fractions
//! of the total scrollable length, so every scan normalises against the
//! current maximum scroll.

use std::cmp::Ordering;

use serde::Serialize;

/// A pin as reported by whoever owns it, in scroll pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinDescriptor {
	pub start: f64,
	/// Missing end means a zero-length pin.
	pub end: Option<f64>,
	/// Only descriptors with `pin` set are treated as pinned regions.
	pub pin: bool,
}

impl PinDescriptor {
	pub fn pinned(start: f64, end: f64) -> Self {
		Self {
			start,
			end: Some(end),
			pin: true,
		}
	}
}

/// A pinned range in normalised scroll fractions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PinnedRegion {
	pub start: f64,
	pub end: f64,
	pub center: f64,
}

impl PinnedRegion {
	/// Whether `value` lies inside the region widened by `tolerance`.
	pub fn is_active(&self, value: f64, tolerance: f64) -> bool {
		value >= self.start - tolerance && value <= self.end + tolerance
	}
}

/// Scans descriptors into sorted, normalised regions.
///
/// Returns `None` when there is nothing to snap to: no scrollable length, or
/// no pinned descriptors. Fractions are clamped to `[0, 1]` and `end` never
/// precedes `start`. Equal starts keep their reported order.
pub fn derive_regions(descriptors: &[PinDescriptor], max_scroll: f64) -> Option<Vec<PinnedRegion>> {
	if !max_scroll.is_finite() || max_scroll <= 0.0 {
		return None;
	}

	let mut pinned: Vec<&PinDescriptor> = descriptors
		.iter()
		.filter(|d| d.pin && d.start.is_finite())
		.collect();
	if pinned.is_empty() {
		return None;
	}
	pinned.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

	let regions = pinned
		.into_iter()
		.map(|d| {
			let start_px = d.start;
			let end_px = d.end.filter(|e| e.is_finite()).unwrap_or(start_px).max(start_px);
			let start = (start_px / max_scroll).clamp(0.0, 1.0);
			let end = (end_px / max_scroll).clamp(0.0, 1.0);
			let center = ((start_px + (end_px - start_px) * 0.5) / max_scroll).clamp(0.0, 1.0);
			PinnedRegion { start, end, center }
		})
		.collect();
	Some(regions)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalises_and_sorts_by_start() {
		let pins = [
			PinDescriptor::pinned(2000.0, 2500.0),
			PinDescriptor::pinned(500.0, 1000.0),
		];
		let regions = derive_regions(&pins, 5000.0).unwrap();
		assert_eq!(regions[0].start, 0.1);
		assert_eq!(regions[0].end, 0.2);
		assert!((regions[0].center - 0.15).abs() < 1e-12);
		assert_eq!(regions[1].start, 0.4);
	}

	#[test]
	fn ignores_unpinned_descriptors() {
		let pins = [PinDescriptor {
			start: 100.0,
			end: Some(200.0),
			pin: false,
		}];
		assert_eq!(derive_regions(&pins, 5000.0), None);
	}

	#[test]
	fn zero_scroll_length_is_skipped() {
		let pins = [PinDescriptor::pinned(0.0, 10.0)];
		assert_eq!(derive_regions(&pins, 0.0), None);
		assert_eq!(derive_regions(&pins, f64::NAN), None);
	}

	#[test]
	fn missing_end_collapses_to_start_and_overflow_clamps() {
		let pins = [
			PinDescriptor {
				start: 1000.0,
				end: None,
				pin: true,
			},
			PinDescriptor::pinned(4000.0, 7000.0),
		];
		let regions = derive_regions(&pins, 5000.0).unwrap();
		assert_eq!(regions[0].start, regions[0].end);
		assert_eq!(regions[0].center, 0.2);
		assert_eq!(regions[1].end, 1.0);
		assert!(regions.iter().all(|r| r.start <= r.center && r.center <= r.end));
	}
}
