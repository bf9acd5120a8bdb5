//! One-shot pinned region discovery and snap installation.
//!
//! The choreographer starts unsettled. The first `settle` call scans the pins
//! reported at that moment and, if there is anything to snap to, hands a
//! [`SnapQuery`] to the driver. It never returns to the unsettled phase.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use super::ease;
use super::regions::{PinDescriptor, derive_regions};
use super::snap::SnapQuery;
use crate::config::SnapSettings;

/// Receives the snap mapping. Implemented by whatever performs the smooth
/// scroll.
pub trait SnapDriver {
	fn install(&mut self, query: SnapQuery, settings: &SnapSettings);
	fn uninstall(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Waiting for layout to settle; no snapping.
	Unsettled,
	/// Regions scanned. Snapping is active only if the scan found any.
	Settled,
}

/// Pins registered explicitly by their owners, keyed by owner id.
#[derive(Clone, Debug, Default)]
pub struct PinRegistry {
	pins: BTreeMap<String, PinDescriptor>,
}

impl PinRegistry {
	/// Registers or replaces the pin owned by `id`.
	pub fn register(&mut self, id: impl Into<String>, start: f64, end: f64) {
		self.pins.insert(id.into(), PinDescriptor::pinned(start, end));
	}

	pub fn unregister(&mut self, id: &str) -> bool {
		self.pins.remove(id).is_some()
	}

	pub fn descriptors(&self) -> Vec<PinDescriptor> {
		self.pins.values().copied().collect()
	}

	pub fn len(&self) -> usize {
		self.pins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pins.is_empty()
	}
}

pub struct ScrollChoreographer<D: SnapDriver> {
	phase: Phase,
	tolerance: f64,
	settings: SnapSettings,
	query: Option<SnapQuery>,
	driver: D,
}

impl<D: SnapDriver> ScrollChoreographer<D> {
	pub fn new(driver: D, tolerance: f64, settings: SnapSettings) -> Self {
		if ease::by_name(&settings.ease).is_none() {
			warn!("scroll: unknown snap ease {:?}", settings.ease);
		}
		Self {
			phase: Phase::Unsettled,
			tolerance,
			settings,
			query: None,
			driver,
		}
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn query(&self) -> Option<&SnapQuery> {
		self.query.as_ref()
	}

	pub fn driver(&self) -> &D {
		&self.driver
	}

	/// Snap target for `value`, or `None` while nothing is installed.
	pub fn snap(&self, value: f64) -> Option<f64> {
		self.query.as_ref().map(|q| q.snap(value))
	}

	/// Performs the one-time scan. Returns `false` if already settled.
	pub fn settle(&mut self, pins: &[PinDescriptor], max_scroll: f64) -> bool {
		if self.phase == Phase::Settled {
			return false;
		}
		self.phase = Phase::Settled;
		self.scan(pins, max_scroll);
		info!(
			"scroll: settled with {} pinned region(s)",
			self.query.as_ref().map_or(0, |q| q.regions().len())
		);
		true
	}

	/// Replaces the region set after a layout change. Ignored before settling
	/// so an early resize cannot pre-empt the settle scan.
	pub fn rescan(&mut self, pins: &[PinDescriptor], max_scroll: f64) {
		if self.phase != Phase::Settled {
			return;
		}
		self.scan(pins, max_scroll);
		debug!(
			"scroll: rescanned, {} pinned region(s)",
			self.query.as_ref().map_or(0, |q| q.regions().len())
		);
	}

	/// Withdraws any installed mapping from the driver.
	pub fn teardown(&mut self) {
		if self.query.take().is_some() {
			self.driver.uninstall();
		}
	}

	fn scan(&mut self, pins: &[PinDescriptor], max_scroll: f64) {
		match derive_regions(pins, max_scroll) {
			Some(regions) => {
				let query = SnapQuery::new(regions, self.tolerance);
				self.driver.install(query.clone(), &self.settings);
				self.query = Some(query);
			}
			None => self.teardown(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct Recorder {
		installs: usize,
		uninstalls: usize,
	}

	impl SnapDriver for Recorder {
		fn install(&mut self, _query: SnapQuery, _settings: &SnapSettings) {
			self.installs += 1;
		}

		fn uninstall(&mut self) {
			self.uninstalls += 1;
		}
	}

	fn choreographer() -> ScrollChoreographer<Recorder> {
		ScrollChoreographer::new(Recorder::default(), 0.02, SnapSettings::default())
	}

	#[test]
	fn settles_once() {
		let mut c = choreographer();
		let pins = [PinDescriptor::pinned(500.0, 1000.0)];
		assert_eq!(c.phase(), Phase::Unsettled);
		assert!(c.settle(&pins, 5000.0));
		assert!(!c.settle(&[], 5000.0));
		assert_eq!(c.phase(), Phase::Settled);
		assert_eq!(c.driver().installs, 1);
		assert!(c.query().is_some());
	}

	#[test]
	fn no_pins_means_nothing_installed() {
		let mut c = choreographer();
		c.settle(&[], 5000.0);
		assert_eq!(c.phase(), Phase::Settled);
		assert_eq!(c.driver().installs, 0);
		assert_eq!(c.snap(0.5), None);
	}

	#[test]
	fn rescan_before_settle_is_ignored() {
		let mut c = choreographer();
		c.rescan(&[PinDescriptor::pinned(0.0, 100.0)], 1000.0);
		assert_eq!(c.phase(), Phase::Unsettled);
		assert_eq!(c.driver().installs, 0);
	}

	#[test]
	fn rescan_to_empty_uninstalls() {
		let mut c = choreographer();
		c.settle(&[PinDescriptor::pinned(500.0, 1000.0)], 5000.0);
		c.rescan(&[], 5000.0);
		assert_eq!(c.driver().uninstalls, 1);
		assert_eq!(c.snap(0.15), None);
	}

	#[test]
	fn registry_replaces_by_id() {
		let mut registry = PinRegistry::default();
		registry.register("hero", 0.0, 100.0);
		registry.register("hero", 10.0, 200.0);
		registry.register("photo", 300.0, 400.0);
		assert_eq!(registry.len(), 2);
		assert!(registry.unregister("photo"));
		assert!(!registry.unregister("photo"));
		assert_eq!(registry.descriptors(), vec![PinDescriptor::pinned(10.0, 200.0)]);
	}
}
