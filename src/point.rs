//! Points and vectors of a fixed number of coordinates.
//!
//! [`Point<C, D>`] is both a position and a displacement, like the points of
//! a digital space. Integer points address image domains; real points are
//! mostly useful as image values.

use std::fmt::{self, Debug, Display};

use num_traits::{Num, Signed};

use super::{ImageError, Result};

/// The integer coordinate type of image domains.
pub type Integer = i32;

/// The double-precision real type.
pub type Real = f64;

/// The single-precision real type.
pub type Float = f32;

/// Implemented by every type that can be a coordinate of a [`Point`].
///
/// There is a blanket implementation; you never need to implement this.
pub trait Coordinate: 'static + Copy + Num + Signed + PartialOrd + Debug + Display {}

impl<C> Coordinate for C where C: 'static + Copy + Num + Signed + PartialOrd + Debug + Display {}

/// An ordered tuple of `D` coordinates of type `C`.
///
/// ```
/// use digital_image::Point2D;
/// let p = Point2D::new([1, 2]) + Point2D::diagonal(3);
/// assert_eq!(p, Point2D::new([4, 5]));
/// assert_eq!(p[1], 5);
/// assert_eq!(p.to_string(), "(4, 5)");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point<C, const D: usize>([C; D]);

/// 2D integer point.
pub type Point2D = Point<Integer, 2>;
/// 3D integer point.
pub type Point3D = Point<Integer, 3>;
/// 2D real point.
pub type RealPoint2D = Point<Real, 2>;
/// 3D real point.
pub type RealPoint3D = Point<Real, 3>;

impl<C, const D: usize> Point<C, D> {
    /// The number of coordinates.
    pub const DIMENSION: usize = D;

    pub const fn new(coordinates: [C; D]) -> Self { Self(coordinates) }

    /// Borrow the coordinates.
    pub fn as_array(&self) -> &[C; D] { &self.0 }

    pub fn iter(&self) -> std::slice::Iter<'_, C> { self.0.iter() }

    /// Apply `f` to every coordinate.
    pub fn map<U>(self, f: impl FnMut(C) -> U) -> Point<U, D> { Point(self.0.map(f)) }
}

impl<C: Coordinate, const D: usize> Point<C, D> {
    /// The point with every coordinate zero.
    pub fn zero() -> Self { Self([C::zero(); D]) }

    /// The point with every coordinate equal to `value`.
    pub fn diagonal(value: C) -> Self { Self([value; D]) }

    /// The point that is `value` along axis `k` and zero elsewhere.
    ///
    /// # Panics
    ///
    /// Panics if `k >= D`.
    pub fn base(k: usize, value: C) -> Self {
        assert!(k < D, "Axis {} is out of bounds for dimension {}", k, D);
        let mut p = Self::zero();
        p.0[k] = value;
        p
    }

    /// Construct a `Point` from a slice of exactly `D` coordinates.
    pub fn from_slice(coordinates: &[C]) -> Result<Self> {
        let array: [C; D] = coordinates.try_into().map_err(|_| ImageError::DimensionMismatch {
            expected: D,
            found: coordinates.len(),
        })?;
        Ok(Self(array))
    }

    /// Returns a copy of the coordinates.
    pub fn coordinates(&self) -> [C; D] { self.0 }

    fn zip_with(self, other: Self, mut f: impl FnMut(C, C) -> C) -> Self {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(other.0) { *a = f(*a, b); }
        Self(out)
    }

    /// Component-wise minimum.
    pub fn inf(self, other: Self) -> Self {
        self.zip_with(other, |a, b| if b < a { b } else { a })
    }

    /// Component-wise maximum.
    pub fn sup(self, other: Self) -> Self {
        self.zip_with(other, |a, b| if b > a { b } else { a })
    }

    /// `true` if every coordinate of `self` is `<=` that of `other`.
    pub fn is_lower(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// `true` if every coordinate of `self` is `>=` that of `other`.
    pub fn is_upper(&self, other: &Self) -> bool {
        other.is_lower(self)
    }

    pub fn dot(&self, other: &Self) -> C {
        self.0.iter().zip(other.0.iter()).fold(C::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Sum of the absolute values of the coordinates.
    pub fn norm1(&self) -> C {
        self.0.iter().fold(C::zero(), |acc, a| acc + a.abs())
    }

    /// Largest absolute value of the coordinates.
    pub fn norm_infinity(&self) -> C {
        self.0.iter().map(|a| a.abs()).fold(C::zero(), |acc, a| if a > acc { a } else { acc })
    }
}

impl<C: Coordinate, const D: usize> Default for Point<C, D> {
    fn default() -> Self { Self::zero() }
}

impl<C, const D: usize> From<[C; D]> for Point<C, D> {
    fn from(coordinates: [C; D]) -> Self { Self(coordinates) }
}

impl<C, const D: usize> std::ops::Index<usize> for Point<C, D> {
    type Output = C;
    #[inline(always)]
    fn index(&self, k: usize) -> &C { &self.0[k] }
}

impl<C, const D: usize> std::ops::IndexMut<usize> for Point<C, D> {
    #[inline(always)]
    fn index_mut(&mut self, k: usize) -> &mut C { &mut self.0[k] }
}

impl<C: Display, const D: usize> Display for Point<C, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (k, c) in self.0.iter().enumerate() {
            if k > 0 { write!(f, ", ")?; }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

// ----------------------------------------------------------------------------

/// Implement a component-wise binary operator and its assigning form.
macro_rules! impl_componentwise_op {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident) => {
        impl<C: Coordinate, const D: usize> std::ops::$op for Point<C, D> {
            type Output = Self;
            #[inline(always)]
            fn $method(self, other: Self) -> Self {
                self.zip_with(other, |a, b| std::ops::$op::$method(a, b))
            }
        }

        impl<C: Coordinate, const D: usize> std::ops::$op_assign for Point<C, D> {
            #[inline(always)]
            fn $method_assign(&mut self, other: Self) {
                *self = std::ops::$op::$method(*self, other);
            }
        }
    };
}

impl_componentwise_op!(Add, add, AddAssign, add_assign);
impl_componentwise_op!(Sub, sub, SubAssign, sub_assign);

impl<C: Coordinate, const D: usize> std::ops::Neg for Point<C, D> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self { self.map(|a| -a) }
}

impl<C: Coordinate, const D: usize> std::ops::Mul<C> for Point<C, D> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, scale: C) -> Self { self.map(|a| a * scale) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(Point3D::zero(), Point3D::new([0, 0, 0]));
        assert_eq!(Point3D::diagonal(4), Point3D::new([4, 4, 4]));
        assert_eq!(Point3D::base(1, 7), Point3D::new([0, 7, 0]));
        assert_eq!(Point2D::default(), Point2D::zero());
        assert_eq!(Point2D::DIMENSION, 2);
        assert_eq!(RealPoint2D::diagonal(0.5).coordinates(), [0.5, 0.5]);
    }

    #[test]
    fn from_slice() {
        assert_eq!(Point2D::from_slice(&[3, -1]), Ok(Point2D::new([3, -1])));
        assert_eq!(
            Point2D::from_slice(&[3, -1, 2]),
            Err(ImageError::DimensionMismatch { expected: 2, found: 3 }),
        );
    }

    #[test]
    fn arithmetic() {
        let a = Point2D::new([1, 2]);
        let b = Point2D::new([10, -20]);
        assert_eq!(a + b, Point2D::new([11, -18]));
        assert_eq!(a - b, Point2D::new([-9, 22]));
        assert_eq!(-a, Point2D::new([-1, -2]));
        assert_eq!(a * 3, Point2D::new([3, 6]));
        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn order_and_norms() {
        let a = Point3D::new([1, 5, -2]);
        let b = Point3D::new([3, 4, 0]);
        assert_eq!(a.inf(b), Point3D::new([1, 4, -2]));
        assert_eq!(a.sup(b), Point3D::new([3, 5, 0]));
        assert!(a.inf(b).is_lower(&a));
        assert!(a.sup(b).is_upper(&b));
        assert!(!a.is_lower(&b));
        assert_eq!(a.dot(&b), 3 + 20);
        assert_eq!(a.norm1(), 8);
        assert_eq!(a.norm_infinity(), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Point3D::new([0, -1, 2]).to_string(), "(0, -1, 2)");
        assert_eq!(RealPoint2D::new([0.5, 1.0]).to_string(), "(0.5, 1)");
    }
}
