//! Rectangular domains of integer points.

use std::fmt::{self};

use super::{ImageError, Result, Integer, Point};

/// A closed axis-aligned box of integer points, `lower_bound` and
/// `upper_bound` included.
///
/// Every coordinate of `lower_bound` is `<=` the corresponding coordinate of
/// `upper_bound`, so a `Domain` is never empty.
///
/// ```
/// use digital_image::{Domain, Point2D};
/// let d = Domain::new(Point2D::zero(), Point2D::new([2, 3])).unwrap();
/// assert_eq!(d.size(), 12);
/// assert_eq!(d.extent(), Point2D::new([2, 3]));
/// assert_eq!(d.shape(), [3, 4]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Domain<const D: usize> {
    lower: Point<Integer, D>,
    upper: Point<Integer, D>,
}

impl<const D: usize> Domain<D> {
    /// Fails with [`ImageError::InvalidDomain`] unless
    /// `lower_bound.is_lower(&upper_bound)` and the number of points fits in
    /// a `usize`.
    pub fn new(lower_bound: Point<Integer, D>, upper_bound: Point<Integer, D>) -> Result<Self> {
        let domain = Self {lower: lower_bound, upper: upper_bound};
        if !lower_bound.is_lower(&upper_bound) || domain.checked_size().is_none() {
            return Err(ImageError::InvalidDomain {
                lower: lower_bound.to_string(),
                upper: upper_bound.to_string(),
            });
        }
        Ok(domain)
    }

    /// The number of points along axis `k`, if it fits in a `usize`.
    fn checked_span(&self, k: usize) -> Option<usize> {
        let span = self.upper[k] as i64 - self.lower[k] as i64;
        usize::try_from(span).ok()?.checked_add(1)
    }

    fn checked_size(&self) -> Option<usize> {
        (0..D).try_fold(1usize, |size, k| size.checked_mul(self.checked_span(k)?))
    }

    /// The `Domain` starting at `lower_bound` with `shape[k]` points along
    /// axis `k`.
    pub fn from_shape(lower_bound: Point<Integer, D>, shape: [usize; D]) -> Result<Self> {
        let mut upper_bound = lower_bound;
        for k in 0..D {
            let span = shape[k].checked_sub(1)
                .and_then(|s| Integer::try_from(s).ok())
                .and_then(|s| lower_bound[k].checked_add(s))
                .ok_or_else(|| ImageError::LayoutMismatch(format!(
                    "Cannot fit {} points along axis {} starting at {}", shape[k], k, lower_bound[k],
                )))?;
            upper_bound[k] = span;
        }
        Self::new(lower_bound, upper_bound)
    }

    pub fn lower_bound(&self) -> Point<Integer, D> { self.lower }

    pub fn upper_bound(&self) -> Point<Integer, D> { self.upper }

    /// Per-dimension span, `upper_bound - lower_bound`.
    pub fn extent(&self) -> Point<Integer, D> { self.upper - self.lower }

    /// The number of points along each axis, i.e. `extent() + 1`.
    pub fn shape(&self) -> [usize; D] {
        let mut shape = [0; D];
        for k in 0..D {
            // Checked in `new()`.
            shape[k] = (self.upper[k] as i64 - self.lower[k] as i64) as usize + 1;
        }
        shape
    }

    /// The number of points in the domain.
    pub fn size(&self) -> usize { self.shape().iter().product() }

    pub fn contains(&self, point: &Point<Integer, D>) -> bool {
        self.lower.is_lower(point) && point.is_lower(&self.upper)
    }

    /// Returns this domain shifted by `shift`. The size is unchanged.
    ///
    /// Fails with [`ImageError::TranslationOverflow`] if a bound would leave
    /// the range of `Integer`.
    pub fn translated(&self, shift: Point<Integer, D>) -> Result<Self> {
        let overflow = || ImageError::TranslationOverflow {
            domain: self.to_string(),
            shift: shift.to_string(),
        };
        let mut result = *self;
        for k in 0..D {
            result.lower[k] = self.lower[k].checked_add(shift[k]).ok_or_else(overflow)?;
            result.upper[k] = self.upper[k].checked_add(shift[k]).ok_or_else(overflow)?;
        }
        Ok(result)
    }

    /// Iterate over every point, first coordinate fastest.
    ///
    /// ```
    /// use digital_image::{Domain, Point2D};
    /// let d = Domain::new(Point2D::new([0, 0]), Point2D::new([1, 1])).unwrap();
    /// let points: Vec<_> = d.points().map(|p| p.coordinates()).collect();
    /// assert_eq!(points, [[0, 0], [1, 0], [0, 1], [1, 1]]);
    /// ```
    pub fn points(&self) -> Points<D> {
        Points {domain: *self, next: self.lower, remaining: self.size()}
    }
}

impl<const D: usize> fmt::Display for Domain<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

// ----------------------------------------------------------------------------

/// The return type of [`Domain::points()`].
#[derive(Debug, Clone)]
pub struct Points<const D: usize> {
    domain: Domain<D>,
    next: Point<Integer, D>,
    remaining: usize,
}

impl<const D: usize> Iterator for Points<D> {
    type Item = Point<Integer, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 { return None; }
        self.remaining -= 1;
        let point = self.next;
        if self.remaining > 0 {
            // Odometer increment.
            for k in 0..D {
                if self.next[k] < self.domain.upper[k] {
                    self.next[k] += 1;
                    break;
                }
                self.next[k] = self.domain.lower[k];
            }
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<const D: usize> ExactSizeIterator for Points<D> {}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point2D, Point3D};

    #[test]
    fn bounds_and_size() {
        let d = Domain::new(Point3D::zero(), Point3D::diagonal(4)).unwrap();
        assert_eq!(d.lower_bound(), Point3D::zero());
        assert_eq!(d.upper_bound(), Point3D::diagonal(4));
        assert_eq!(d.size(), 125);
        assert_eq!(d.extent(), Point3D::diagonal(4));
        assert_eq!(d.to_string(), "(0, 0, 0)-(4, 4, 4)");
    }

    #[test]
    fn single_point() {
        let p = Point2D::new([-3, 7]);
        let d = Domain::new(p, p).unwrap();
        assert_eq!(d.size(), 1);
        assert_eq!(d.points().collect::<Vec<_>>(), [p]);
    }

    #[test]
    fn invalid() {
        let err = Domain::new(Point2D::new([0, 5]), Point2D::new([4, 4])).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDomain {..}));
    }

    #[test]
    fn from_shape() {
        let d = Domain::from_shape(Point2D::new([1, -1]), [3, 4]).unwrap();
        assert_eq!(d.upper_bound(), Point2D::new([3, 2]));
        assert!(matches!(
            Domain::from_shape(Point2D::zero(), [0, 4]),
            Err(ImageError::LayoutMismatch(_)),
        ));
    }

    #[test]
    fn contains() {
        let d = Domain::new(Point2D::new([-1, -1]), Point2D::new([1, 2])).unwrap();
        assert!(d.contains(&Point2D::new([-1, 2])));
        assert!(d.contains(&Point2D::new([0, 0])));
        assert!(!d.contains(&Point2D::new([2, 0])));
        assert!(!d.contains(&Point2D::new([0, -2])));
    }

    #[test]
    fn translated() {
        let d = Domain::new(Point2D::zero(), Point2D::new([2, 3])).unwrap();
        let t = d.translated(Point2D::new([5, -1])).unwrap();
        assert_eq!(t.lower_bound(), Point2D::new([5, -1]));
        assert_eq!(t.upper_bound(), Point2D::new([7, 2]));
        assert_eq!(t.size(), d.size());
        let t = d.translated(Point2D::new([Integer::MAX - 2, 0])).unwrap();
        assert_eq!(t.upper_bound(), Point2D::new([Integer::MAX, 3]));
    }

    #[test]
    fn translated_overflow() {
        let d = Domain::new(Point2D::zero(), Point2D::new([4, 4])).unwrap();
        assert!(matches!(
            d.translated(Point2D::new([Integer::MAX - 2, 0])),
            Err(ImageError::TranslationOverflow {..}),
        ));
        assert!(matches!(
            d.translated(Point2D::new([0, Integer::MIN])),
            Ok(t) if t.lower_bound() == Point2D::new([0, Integer::MIN]),
        ));
        let d = Domain::new(Point2D::new([Integer::MIN, 0]), Point2D::new([-1, 0])).unwrap();
        assert!(d.translated(Point2D::new([-1, 0])).is_err());
    }

    #[test]
    fn too_many_points() {
        let err = Domain::new(Point3D::diagonal(Integer::MIN), Point3D::diagonal(Integer::MAX)).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDomain {..}));
        assert!(Domain::from_shape(Point3D::zero(), [1 << 30, 1 << 30, 1 << 30]).is_err());
    }

    #[test]
    fn points_in_column_major_order() {
        let d = Domain::new(Point3D::zero(), Point3D::new([1, 2, 1])).unwrap();
        let points: Vec<_> = d.points().collect();
        assert_eq!(points.len(), d.size());
        assert_eq!(points[0], Point3D::new([0, 0, 0]));
        assert_eq!(points[1], Point3D::new([1, 0, 0]));
        assert_eq!(points[2], Point3D::new([0, 1, 0]));
        assert_eq!(points[6], Point3D::new([0, 0, 1]));
        assert_eq!(points[11], Point3D::new([1, 2, 1]));
    }
}
