//! Easing curves named the way the snap driver names them.

/// Quadratic ease-out: fast start, gentle landing.
#[inline]
pub fn power2_out(t: f64) -> f64 {
	let inv = 1.0 - t.clamp(0.0, 1.0);
	1.0 - inv * inv
}

/// Quadratic ease-in.
#[inline]
pub fn power2_in(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	t * t
}

#[inline]
pub fn linear(t: f64) -> f64 {
	t.clamp(0.0, 1.0)
}

/// Looks a curve up by its driver name.
pub fn by_name(name: &str) -> Option<fn(f64) -> f64> {
	match name {
		"power2.out" => Some(power2_out),
		"power2.in" => Some(power2_in),
		"none" | "linear" => Some(linear),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn curves_hit_endpoints() {
		for f in [power2_out, power2_in] {
			assert_eq!(f(0.0), 0.0);
			assert_eq!(f(1.0), 1.0);
		}
		assert_eq!(power2_out(0.5), 0.75);
		assert_eq!(power2_in(0.5), 0.25);
	}

	#[test]
	fn unknown_names_are_rejected() {
		assert!(by_name("power2.out").is_some());
		assert!(by_name("elastic").is_none());
	}
}
