// Host-side checks for the glyph stream engine.

use ambient_fx::components::ambient::streams::{self, GLYPHS, StreamField, StreamParams, StreamParticle};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn particle_recycles_exactly_once_it_passes_the_bottom() {
	let params = StreamParams::default();
	let glyphs: Vec<char> = GLYPHS.chars().collect();
	let mut rng = StdRng::seed_from_u64(42);
	let mut particles = vec![StreamParticle {
		x: 200.0,
		y: 0.0,
		speed: 3.0,
		glyph: '0',
		opacity: 0.3,
	}];

	for _ in 0..266 {
		streams::tick(&mut particles, 800.0, &params, &glyphs, &mut rng);
	}
	assert_eq!(particles[0].y, 798.0);

	streams::tick(&mut particles, 800.0, &params, &glyphs, &mut rng);
	assert_eq!(particles[0].y, -20.0);
	assert!(particles[0].y < -params.margin);
	assert!((200.0..=250.0).contains(&particles[0].x));
	assert!(glyphs.contains(&particles[0].glyph));
}

#[test]
fn resize_keeps_the_particle_array() {
	let mut rng = StdRng::seed_from_u64(8);
	let mut field = StreamField::new(1000.0, 700.0, &mut rng);
	assert_eq!(field.particles.len(), 10);
	let before = field.particles.clone();

	field.resize(400.0, 300.0);
	assert_eq!(field.particles, before);
	assert_eq!((field.width, field.height), (400.0, 300.0));
}

#[test]
fn trail_stays_on_screen_and_fades() {
	let params = StreamParams::default();
	let glyphs: Vec<char> = GLYPHS.chars().collect();
	let mut rng = StdRng::seed_from_u64(4);
	let head = StreamParticle {
		x: 10.0,
		y: 40.0,
		speed: 2.0,
		glyph: '1',
		opacity: 0.4,
	};

	let trail = streams::trail(&head, &params, &glyphs, &mut rng);
	assert_eq!(trail.len(), 2);
	assert!(trail.iter().all(|t| t.pos.y > 0.0));
	assert!(trail[0].alpha > trail[1].alpha);
}
