use crate::{Point3i, PointN};

use core::ops::Range;
use itertools::{iproduct, ConsTuples, Product};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A lattice extent. This is mathematically the Cartesian product of a half-closed interval `[a, b)` in each dimension. You can
/// also just think of it as an axis-aligned box with some shape and a minimum point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ExtentN<N> {
    /// The least point contained in the extent.
    pub minimum: PointN<N>,
    /// The length of each dimension.
    pub shape: PointN<N>,
}

/// A 3-dimensional extent with scalar type `i32`.
pub type Extent3i = ExtentN<[i32; 3]>;

impl Extent3i {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: Point3i, shape: Point3i) -> Self {
        Self { minimum, shape }
    }

    /// An alternative representation of an extent as the minimum point and least upper bound.
    #[inline]
    pub fn from_min_and_lub(minimum: Point3i, least_upper_bound: Point3i) -> Self {
        // We want to avoid negative shape components.
        let shape = (least_upper_bound - minimum).join(&Point3i::ZERO);

        Self { minimum, shape }
    }

    /// The extent `[0, shape)`, which is how a voxel model declares its size.
    #[inline]
    pub fn from_shape(shape: Point3i) -> Self {
        Self::from_min_and_shape(Point3i::ZERO, shape)
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> Point3i {
        self.minimum + self.shape
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.minimum <= p && p < self.least_upper_bound()
    }

    /// Returns the extent containing only the points in both `self` and `other`.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let minimum = self.minimum.join(&other.minimum);
        let lub = self.least_upper_bound().meet(&other.least_upper_bound());

        Self::from_min_and_lub(minimum, lub)
    }

    /// The number of points contained in the extent.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.shape.volume().max(0) as usize
    }

    /// Returns `true` iff the number of points in the extent is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.min_component() <= 0
    }

    /// Iterate over all points in the extent, with X varying fastest.
    #[inline]
    pub fn iter_points(&self) -> Extent3PointIter {
        let min = self.minimum;
        let lub = self.least_upper_bound();

        Extent3PointIter {
            // iproduct is opposite of row-major order.
            product_iter: iproduct!(min.z()..lub.z(), min.y()..lub.y(), min.x()..lub.x()),
        }
    }
}

/// An iterator over all points in an `Extent3i`.
pub struct Extent3PointIter {
    product_iter: ConsTuples<RangeProduct3, ((i32, i32), i32)>,
}

type RangeProduct2 = Product<Range<i32>, Range<i32>>;
type RangeProduct3 = Product<RangeProduct2, Range<i32>>;

impl Iterator for Extent3PointIter {
    type Item = Point3i;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(z, y, x)| PointN([x, y, z]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn iter_points_is_x_fastest() {
        let extent = Extent3i::from_min_and_shape(PointN([1, 0, 0]), PointN([2, 2, 1]));

        let points: Vec<_> = extent.iter_points().collect();

        assert_eq!(
            points,
            vec![
                PointN([1, 0, 0]),
                PointN([2, 0, 0]),
                PointN([1, 1, 0]),
                PointN([2, 1, 0]),
            ]
        );
    }

    #[test]
    fn intersection_clamps_to_empty() {
        let a = Extent3i::from_shape(Point3i::fill(4));
        let b = Extent3i::from_min_and_shape(Point3i::fill(2), Point3i::fill(4));
        let c = Extent3i::from_min_and_shape(Point3i::fill(10), Point3i::fill(2));

        assert_eq!(
            a.intersection(&b),
            Extent3i::from_min_and_shape(Point3i::fill(2), Point3i::fill(2))
        );
        assert!(a.intersection(&c).is_empty());
        assert_eq!(a.intersection(&c).num_points(), 0);
    }

    #[test]
    fn contains_is_half_open() {
        let extent = Extent3i::from_shape(PointN([3, 1, 2]));

        assert!(extent.contains(PointN([2, 0, 1])));
        assert!(!extent.contains(PointN([3, 0, 1])));
        assert!(!extent.contains(PointN([-1, 0, 0])));
        assert_eq!(extent.num_points(), 6);
    }
}
