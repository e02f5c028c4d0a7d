//! Maps pointer positions on a horizontal slider track to volumes.

/// The horizontal extent of a slider track, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VolumeTrack {
	pub start: f32,
	pub width: f32,
}

impl VolumeTrack {
	pub(crate) fn new(start: f32, width: f32) -> Self {
		Self { start, width }
	}

	/// Volume in [0, 1] for a pointer at `pointer_x`. Positions outside the
	/// track clamp to its ends; a track without width always reads silent.
	pub(crate) fn map(&self, pointer_x: f32) -> f32 {
		if self.width <= 0.0 || !self.width.is_finite() {
			return 0.0;
		}
		((pointer_x - self.start) / self.width).clamp(0.0, 1.0)
	}

	/// Where the knob sits for `volume`.
	pub(crate) fn knob_x(&self, volume: f32) -> f32 {
		self.start + self.width * volume.clamp(0.0, 1.0)
	}
}
