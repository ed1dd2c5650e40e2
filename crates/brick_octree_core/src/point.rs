use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A lattice point, which is just a primitive array. Only the 3-dimensional integer point `Point3i` is used for addressing
/// voxels.
///
/// ```
/// use brick_octree_core::{Point3i, PointN};
///
/// let p1 = PointN([1, 2, 3]);
/// let p2 = Point3i::fill(2);
///
/// assert_eq!(p1 + p2, PointN([3, 4, 5]));
/// assert_eq!(p1 * 2, PointN([2, 4, 6]));
/// ```
///
/// There is also a partial order defined on points which says that a point A is greater than a point B if and only if all of
/// the components of point A are greater than point B. This makes it easy to check if a point is inside of an extent:
///
/// ```
/// use brick_octree_core::PointN;
///
/// let min = PointN([0, 0, 0]);
/// let least_upper_bound = PointN([4, 4, 4]);
///
/// assert!(min <= PointN([0, 1, 3]) && PointN([0, 1, 3]) < least_upper_bound);
/// assert!(!(PointN([0, 4, 3]) < least_upper_bound));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PointN<N>(pub N);

/// A 3-dimensional point with scalar type `i32`.
pub type Point3i = PointN<[i32; 3]>;

impl Point3i {
    pub const ZERO: Self = PointN([0; 3]);
    pub const ONES: Self = PointN([1; 3]);

    /// The minimum corners of the 8 octants of a unit cube, indexed by octant number in the binary format `0bZYX`.
    pub const CUBE_CORNER_OFFSETS: [Self; 8] = [
        PointN([0, 0, 0]),
        PointN([1, 0, 0]),
        PointN([0, 1, 0]),
        PointN([1, 1, 0]),
        PointN([0, 0, 1]),
        PointN([1, 0, 1]),
        PointN([0, 1, 1]),
        PointN([1, 1, 1]),
    ];

    #[inline]
    pub const fn fill(value: i32) -> Self {
        PointN([value; 3])
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.0[2]
    }

    #[inline]
    pub fn map_components(&self, f: impl Fn(i32) -> i32) -> Self {
        PointN([f(self.x()), f(self.y()), f(self.z())])
    }

    #[inline]
    pub fn zip_components(&self, other: &Self, f: impl Fn(i32, i32) -> i32) -> Self {
        PointN([
            f(self.x(), other.x()),
            f(self.y(), other.y()),
            f(self.z(), other.z()),
        ])
    }

    /// Component-wise maximum.
    #[inline]
    pub fn join(&self, other: &Self) -> Self {
        self.zip_components(other, i32::max)
    }

    /// Component-wise minimum.
    #[inline]
    pub fn meet(&self, other: &Self) -> Self {
        self.zip_components(other, i32::min)
    }

    #[inline]
    pub fn max_component(&self) -> i32 {
        self.x().max(self.y()).max(self.z())
    }

    #[inline]
    pub fn min_component(&self) -> i32 {
        self.x().min(self.y()).min(self.z())
    }

    /// Left bitshifts all dimensions.
    #[inline]
    pub fn left_shift(&self, shift_by: u32) -> Self {
        self.map_components(|c| c << shift_by)
    }

    /// Right bitshifts all dimensions.
    #[inline]
    pub fn right_shift(&self, shift_by: u32) -> Self {
        self.map_components(|c| c >> shift_by)
    }

    /// The product of all components, widened so that any `u16` shape fits.
    #[inline]
    pub fn volume(&self) -> i64 {
        self.x() as i64 * self.y() as i64 * self.z() as i64
    }
}

impl Add for Point3i {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_components(&rhs, |a, b| a + b)
    }
}

impl Sub for Point3i {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_components(&rhs, |a, b| a - b)
    }
}

impl Mul<i32> for Point3i {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        self.map_components(|c| c * rhs)
    }
}

impl AddAssign for Point3i {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point3i {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl From<[i32; 3]> for Point3i {
    #[inline]
    fn from(coords: [i32; 3]) -> Self {
        PointN(coords)
    }
}

// This particular partial order allows us to say that an `Extent3i` e contains a `Point3i` p iff p is GEQ the minimum of e
// and p is LT the least upper bound of e.
impl PartialOrd for Point3i {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else if self == other {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.x() < other.x() && self.y() < other.y() && self.z() < other.z()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.x() > other.x() && self.y() > other.y() && self.z() > other.z()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.x() <= other.x() && self.y() <= other.y() && self.z() <= other.z()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.x() >= other.x() && self.y() >= other.y() && self.z() >= other.z()
    }
}
