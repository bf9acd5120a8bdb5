// Scroll choreography driven end to end with an in-memory snap driver.

use ambient_fx::components::scroll::{
	DEFAULT_TOLERANCE, Phase, PinDescriptor, PinRegistry, ScrollChoreographer, SnapDriver, SnapQuery,
	derive_regions,
};
use ambient_fx::config::SnapSettings;

#[derive(Default)]
struct MemoryDriver {
	installed: Option<(SnapQuery, SnapSettings)>,
	history: Vec<&'static str>,
}

impl SnapDriver for MemoryDriver {
	fn install(&mut self, query: SnapQuery, settings: &SnapSettings) {
		self.installed = Some((query, settings.clone()));
		self.history.push("install");
	}

	fn uninstall(&mut self) {
		self.installed = None;
		self.history.push("uninstall");
	}
}

fn page_pins() -> Vec<PinDescriptor> {
	vec![
		PinDescriptor::pinned(2000.0, 2500.0),
		PinDescriptor::pinned(500.0, 1000.0),
		PinDescriptor::pinned(3500.0, 4500.0),
	]
}

fn close(a: f64, b: f64) -> bool {
	(a - b).abs() < 1e-9
}

#[test]
fn three_pinned_sections_snap_to_their_centres() {
	let mut choreographer = ScrollChoreographer::new(MemoryDriver::default(), DEFAULT_TOLERANCE, SnapSettings::default());
	assert!(choreographer.settle(&page_pins(), 5000.0));

	let (query, settings) = choreographer.driver().installed.clone().unwrap();
	assert_eq!(settings, SnapSettings::default());
	let centres: Vec<f64> = query.regions().iter().map(|r| r.center).collect();
	assert!(close(centres[0], 0.15) && close(centres[1], 0.45) && close(centres[2], 0.8));

	assert!(close(query.snap(0.45), 0.45));
	assert!(close(query.snap(0.09), 0.15));
	assert!(close(query.snap(0.41), 0.45));
	assert!(close(query.snap(0.71), 0.8));
	assert_eq!(query.snap(0.95), 0.95);
	assert_eq!(query.snap(0.3), 0.3);
}

#[test]
fn zero_pins_installs_nothing() {
	let mut choreographer = ScrollChoreographer::new(MemoryDriver::default(), DEFAULT_TOLERANCE, SnapSettings::default());
	choreographer.settle(&[], 5000.0);
	assert_eq!(choreographer.phase(), Phase::Settled);
	assert!(choreographer.driver().installed.is_none());
	assert!(choreographer.driver().history.is_empty());
}

#[test]
fn unscrollable_page_installs_nothing() {
	assert!(derive_regions(&page_pins(), 0.0).is_none());
	assert!(derive_regions(&page_pins(), f64::NAN).is_none());
}

#[test]
fn snapping_is_idempotent() {
	let regions = derive_regions(&page_pins(), 5000.0).unwrap();
	let query = SnapQuery::new(regions, DEFAULT_TOLERANCE);
	for i in 0..=1000 {
		let v = i as f64 / 1000.0;
		let once = query.snap(v);
		assert_eq!(query.snap(once), once, "snap not idempotent at {v}");
	}
}

#[test]
fn settle_ignores_later_pins_but_rescan_replaces_them() {
	let mut choreographer = ScrollChoreographer::new(MemoryDriver::default(), DEFAULT_TOLERANCE, SnapSettings::default());
	choreographer.settle(&page_pins()[..1], 5000.0);
	assert!(!choreographer.settle(&page_pins(), 5000.0));
	assert_eq!(choreographer.query().map(|q| q.regions().len()), Some(1));

	choreographer.rescan(&page_pins(), 5000.0);
	assert_eq!(choreographer.query().map(|q| q.regions().len()), Some(3));

	choreographer.teardown();
	assert_eq!(choreographer.driver().history, vec!["install", "install", "uninstall"]);
	assert_eq!(choreographer.snap(0.45), None);
}

#[test]
fn registry_feeds_the_scan() {
	let mut registry = PinRegistry::default();
	registry.register("hero", 500.0, 1000.0);
	registry.register("gallery", 3500.0, 4500.0);

	let mut choreographer = ScrollChoreographer::new(MemoryDriver::default(), DEFAULT_TOLERANCE, SnapSettings::default());
	choreographer.settle(&registry.descriptors(), 5000.0);
	assert!(close(choreographer.snap(0.12).unwrap(), 0.15));
	assert!(close(choreographer.snap(0.75).unwrap(), 0.8));
}
