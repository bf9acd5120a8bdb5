//! Scroll fraction to snap target mapping.

use super::regions::PinnedRegion;

/// Default band around each region inside which snapping engages.
pub const DEFAULT_TOLERANCE: f64 = 0.02;

/// Maps a resting scroll fraction to where the viewport should settle.
///
/// Outside every pinned band the input passes through untouched. Inside one
/// or more bands the closest active region centre wins; on equal distance
/// the region that starts first wins.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapQuery {
	regions: Vec<PinnedRegion>,
	tolerance: f64,
}

impl SnapQuery {
	/// `regions` must already be sorted by start, as
	/// [`derive_regions`](super::regions::derive_regions) returns them.
	pub fn new(regions: Vec<PinnedRegion>, tolerance: f64) -> Self {
		Self {
			regions,
			tolerance: tolerance.max(0.0),
		}
	}

	pub fn regions(&self) -> &[PinnedRegion] {
		&self.regions
	}

	pub fn tolerance(&self) -> f64 {
		self.tolerance
	}

	pub fn snap(&self, value: f64) -> f64 {
		let mut best: Option<(f64, f64)> = None;
		for region in &self.regions {
			if !region.is_active(value, self.tolerance) {
				continue;
			}
			let dist = (region.center - value).abs();
			match best {
				Some((_, best_dist)) if dist >= best_dist => {}
				_ => best = Some((region.center, dist)),
			}
		}
		best.map_or(value, |(center, _)| center)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn region(start: f64, end: f64) -> PinnedRegion {
		PinnedRegion {
			start,
			end,
			center: start + (end - start) * 0.5,
		}
	}

	#[test]
	fn passes_through_outside_every_band() {
		let query = SnapQuery::new(vec![region(0.1, 0.2)], DEFAULT_TOLERANCE);
		assert_eq!(query.snap(0.5), 0.5);
		assert_eq!(query.snap(0.0), 0.0);
	}

	#[test]
	fn tolerance_band_is_inclusive() {
		let query = SnapQuery::new(vec![region(0.25, 0.5)], 0.25);
		assert_eq!(query.snap(0.75), 0.375);
		assert_eq!(query.snap(0.0), 0.375);
		assert_eq!(query.snap(0.8), 0.8);
	}

	#[test]
	fn closer_centre_wins_between_overlapping_regions() {
		let query = SnapQuery::new(vec![region(0.2, 0.4), region(0.38, 0.66)], DEFAULT_TOLERANCE);
		assert!((query.snap(0.40) - 0.30).abs() < 1e-12);
	}

	#[test]
	fn equal_distance_prefers_earlier_region() {
		let query = SnapQuery::new(vec![region(0.25, 0.5), region(0.5, 0.75)], 0.0);
		assert_eq!(query.snap(0.5), 0.375);
	}

	#[test]
	fn snapping_is_idempotent() {
		let query = SnapQuery::new(
			vec![region(0.1, 0.2), region(0.18, 0.3), region(0.7, 0.9)],
			DEFAULT_TOLERANCE,
		);
		for i in 0..=1000 {
			let v = i as f64 / 1000.0;
			let once = query.snap(v);
			assert_eq!(query.snap(once), once, "v = {v}");
		}
	}
}
