use rand::Rng;

use crate::dream::Position;

/// Half-width of the cube stars are scattered in.
pub const SKY_EXTENT: f64 = 10.0;

/// Draws each axis independently and uniformly from `[-SKY_EXTENT, SKY_EXTENT)`.
pub fn place<R>(rng: &mut R) -> Position
where
	R: Rng + ?Sized,
{
	Position { x: axis(rng), y: axis(rng), z: axis(rng) }
}

fn axis<R>(rng: &mut R) -> f64
where
	R: Rng + ?Sized,
{
	(rng.r#gen::<f64>() - 0.5) * SKY_EXTENT * 2.0
}
