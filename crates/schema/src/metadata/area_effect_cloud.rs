use super::Metadata;
use crate::particle::Particle;

const RADIUS: u8 = 7;
const COLOR: u8 = 8;
const SINGLE_POINT: u8 = 9;
const PARTICLE: u8 = 10;

/// Named view over an area effect cloud's metadata.
#[derive(Debug, Clone, Default)]
pub struct AreaEffectCloudMeta {
	metadata: Metadata,
}

impl AreaEffectCloudMeta {
	pub fn new(metadata: Metadata) -> Self {
		Self { metadata }
	}

	pub fn metadata(&self) -> &Metadata {
		&self.metadata
	}

	pub fn metadata_mut(&mut self) -> &mut Metadata {
		&mut self.metadata
	}

	pub fn into_metadata(self) -> Metadata {
		self.metadata
	}

	pub fn radius(&self) -> f32 {
		self.metadata.get_index(RADIUS, 0.5)
	}

	pub fn set_radius(&mut self, value: f32) {
		self.metadata.set_index(RADIUS, value);
	}

	pub fn color(&self) -> i32 {
		self.metadata.get_index(COLOR, 0)
	}

	pub fn set_color(&mut self, value: i32) {
		self.metadata.set_index(COLOR, value);
	}

	pub fn is_single_point(&self) -> bool {
		self.metadata.get_index(SINGLE_POINT, false)
	}

	pub fn set_single_point(&mut self, value: bool) {
		self.metadata.set_index(SINGLE_POINT, value);
	}

	pub fn particle(&self) -> Particle {
		self.metadata.get_index(PARTICLE, Particle::effect())
	}

	pub fn set_particle(&mut self, value: Particle) {
		self.metadata.set_index(PARTICLE, value);
	}
}
