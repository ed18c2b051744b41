//! DAabb3 - double-precision box used for node regions and entity bounds.

use glam::DVec3;

/// Axis-aligned box over `f64` coordinates.
///
/// Both corners are part of the box, so two boxes sharing only a face, an
/// edge or a corner count as overlapping.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DAabb3 {
	/// Lower corner.
	pub min: DVec3,
	/// Upper corner.
	pub max: DVec3,
}

impl DAabb3 {
	/// Box spanning `min..=max`. Inverted corners trip a debug assertion.
	pub fn new(min: DVec3, max: DVec3) -> Self {
		debug_assert!(min.cmple(max).all(), "inverted box: min {:?} max {:?}", min, max);
		Self { min, max }
	}

	pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
		Self {
			min: center - half_extents,
			max: center + half_extents,
		}
	}

	/// Box of full edge lengths `size` around `center`.
	pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
		Self::from_center_half_extents(center, size * 0.5)
	}

	/// Cube centered at `center` with edge length `2 * half_edge`.
	pub fn cube(center: DVec3, half_edge: f64) -> Self {
		Self::from_center_half_extents(center, DVec3::splat(half_edge))
	}

	/// Zero-sized box at a single point.
	pub fn point(at: DVec3) -> Self {
		Self { min: at, max: at }
	}

	/// Inclusive intersection test on all three axes.
	#[inline]
	pub fn overlaps(&self, other: &DAabb3) -> bool {
		self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
	}

	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		self.min.cmple(point).all() && point.cmple(self.max).all()
	}

	/// True when `other` lies entirely inside this box.
	#[inline]
	pub fn contains(&self, other: &DAabb3) -> bool {
		self.contains_point(other.min) && self.contains_point(other.max)
	}

	/// Edge lengths along each axis.
	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max - self.min
	}

	#[inline]
	pub fn half_extents(&self) -> DVec3 {
		self.size() * 0.5
	}

	#[inline]
	pub fn center(&self) -> DVec3 {
		(self.min + self.max) * 0.5
	}

	/// True when both corners are finite and min <= max on every axis.
	pub fn is_valid(&self) -> bool {
		self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
	}

	/// True when the center falls strictly inside the box on every axis.
	///
	/// Far from the origin the center of a box only a few ulps wide rounds
	/// onto a corner, and one octant would then be the box itself.
	#[inline]
	pub fn can_halve(&self) -> bool {
		let center = self.center();
		self.min.cmplt(center).all() && center.cmplt(self.max).all()
	}

	/// Region of one octant of this box.
	///
	/// Octant: 0-7 where bits select the upper half of each axis:
	/// - bit 0: +X
	/// - bit 1: +Y
	/// - bit 2: +Z
	///
	/// Octants share the center planes, so the 8 regions tile this box with
	/// no gaps. Each octant is half the size of this box along every axis.
	pub fn octant(&self, octant: u8) -> DAabb3 {
		debug_assert!(octant < 8, "octant index out of range: {}", octant);
		let center = self.center();
		let pick = |bit: u8, lo: f64, mid: f64, hi: f64| {
			if octant & bit == 0 {
				(lo, mid)
			} else {
				(mid, hi)
			}
		};
		let (min_x, max_x) = pick(1, self.min.x, center.x, self.max.x);
		let (min_y, max_y) = pick(2, self.min.y, center.y, self.max.y);
		let (min_z, max_z) = pick(4, self.min.z, center.z, self.max.z);
		DAabb3 {
			min: DVec3::new(min_x, min_y, min_z),
			max: DVec3::new(max_x, max_y, max_z),
		}
	}
}
