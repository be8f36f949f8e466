//! Conversions between the points of a [`Domain`] and linear offsets.

use std::fmt::{self};
use std::str::{FromStr};

use super::{ImageError, Result, Integer, Point, Domain};

/// Which coordinate varies fastest in linear memory.
///
/// The letters are those of the usual buffer conventions: `"F"` for
/// column-major (Fortran) and `"C"` for row-major.
///
/// ```
/// use digital_image::MajorOrder;
/// assert_eq!("C".parse::<MajorOrder>().unwrap(), MajorOrder::RowMajor);
/// assert_eq!(MajorOrder::default().to_string(), "F");
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MajorOrder {
    /// The first coordinate varies fastest. This is the order of image
    /// storage.
    #[default]
    ColumnMajor,
    /// The last coordinate varies fastest.
    RowMajor,
}

impl MajorOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            MajorOrder::ColumnMajor => "F",
            MajorOrder::RowMajor => "C",
        }
    }

    /// The axis that is `i`-th fastest.
    #[inline(always)]
    fn axis(self, i: usize, ndim: usize) -> usize {
        match self {
            MajorOrder::ColumnMajor => i,
            MajorOrder::RowMajor => ndim - 1 - i,
        }
    }

    /// Element strides of a dense array of shape `shape` in this order.
    pub fn strides(self, shape: &[usize]) -> Vec<usize> {
        let mut strides = vec![0; shape.len()];
        self.fill_strides(shape, &mut strides);
        strides
    }

    /// Strides saturate at `usize::MAX` for shapes with too many elements.
    fn fill_strides(self, shape: &[usize], strides: &mut [usize]) {
        let mut stride: usize = 1;
        for i in 0..shape.len() {
            let k = self.axis(i, shape.len());
            strides[k] = stride;
            stride = stride.saturating_mul(shape[k]);
        }
    }

    /// Convert between a buffer shape in this order and a domain shape.
    ///
    /// Column-major buffers have the axes of the domain; row-major buffers
    /// have them reversed. The conversion is its own inverse.
    pub fn adapt_shape(self, shape: &[usize]) -> Vec<usize> {
        match self {
            MajorOrder::ColumnMajor => shape.to_vec(),
            MajorOrder::RowMajor => shape.iter().rev().copied().collect(),
        }
    }
}

impl FromStr for MajorOrder {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "F" => Ok(MajorOrder::ColumnMajor),
            "C" => Ok(MajorOrder::RowMajor),
            _ => Err(ImageError::InvalidOrder(s.to_owned())),
        }
    }
}

impl fmt::Display for MajorOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}

// ----------------------------------------------------------------------------

/// Maps the points of a [`Domain`] to `0..domain.size()` and back.
///
/// ```
/// use digital_image::{Domain, Linearizer, MajorOrder, Point2D};
/// let d = Domain::new(Point2D::new([1, 1]), Point2D::new([3, 4])).unwrap();
/// let f = Linearizer::new(d, MajorOrder::ColumnMajor);
/// assert_eq!(f.to_usize(Point2D::new([2, 1])).unwrap(), 1);
/// let c = Linearizer::new(d, MajorOrder::RowMajor);
/// assert_eq!(c.to_usize(Point2D::new([1, 2])).unwrap(), 1);
/// assert_eq!(c.from_usize(11).unwrap(), Point2D::new([3, 4]));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Linearizer<const D: usize> {
    domain: Domain<D>,
    order: MajorOrder,
    shape: [usize; D],
    strides: [usize; D],
}

impl<const D: usize> Linearizer<D> {
    pub fn new(domain: Domain<D>, order: MajorOrder) -> Self {
        let shape = domain.shape();
        let mut strides = [0; D];
        order.fill_strides(&shape, &mut strides);
        Self {domain, order, shape, strides}
    }

    pub fn domain(&self) -> Domain<D> { self.domain }

    pub fn order(&self) -> MajorOrder { self.order }

    /// Element strides along each axis of the domain.
    pub fn strides(&self) -> [usize; D] { self.strides }

    /// The number of points, i.e. one more than the largest offset.
    pub fn length(&self) -> usize { self.domain.size() }

    /// Returns the offset of `point`.
    ///
    /// Fails with [`ImageError::OutOfDomain`] if `point` is not in the domain.
    #[inline]
    pub fn to_usize(&self, point: Point<Integer, D>) -> Result<usize> {
        if !self.domain.contains(&point) {
            return Err(ImageError::OutOfDomain {
                point: point.to_string(),
                lower: self.domain.lower_bound().to_string(),
                upper: self.domain.upper_bound().to_string(),
            });
        }
        let lower = self.domain.lower_bound();
        let mut index = 0;
        for k in 0..D {
            index += (point[k] as i64 - lower[k] as i64) as usize * self.strides[k];
        }
        Ok(index)
    }

    /// Returns the point whose offset is `index`.
    ///
    /// Fails with [`ImageError::IndexOutOfRange`] unless
    /// `index < self.length()`.
    #[inline]
    pub fn from_usize(&self, index: usize) -> Result<Point<Integer, D>> {
        let size = self.length();
        if index >= size {
            return Err(ImageError::IndexOutOfRange {index, size});
        }
        Ok(self.point_unchecked(index))
    }

    fn point_unchecked(&self, mut index: usize) -> Point<Integer, D> {
        let mut point = self.domain.lower_bound();
        for i in 0..D {
            let k = self.order.axis(i, D);
            // `index % shape[k] < shape[k]`, which fits in the domain.
            point[k] += (index % self.shape[k]) as Integer;
            index /= self.shape[k];
        }
        point
    }

    /// Equivalent to, but often more efficient than,
    /// ```text
    /// for i in 0..self.length() { f(self.from_usize(i).unwrap()); }
    /// ```
    pub fn each(&self, mut f: impl FnMut(Point<Integer, D>)) {
        match self.order {
            MajorOrder::ColumnMajor => self.domain.points().for_each(f),
            MajorOrder::RowMajor => for i in 0..self.length() { f(self.point_unchecked(i)); },
        }
    }
}

// ----------------------------------------------------------------------------
