use std::fmt::{self};

use approx::{AbsDiffEq, RelativeEq};
use log::{trace};

use super::{ImageError, Result, Integer, Point, Domain, Linearizer, MajorOrder, Value, Storage, StorageMut};

/// A dense image of values addressed by the points of a [`Domain`].
///
/// The values are stored in `S`, which is a dense 1-dimensional
/// representation in column-major order: the first coordinate varies
/// fastest. The length of the storage is always `domain.size()`.
///
/// Each value can be reached in two ways: by a [`Point`] of the domain, or by
/// its linear index in `0..len()`. Both are checked; an invalid point or index
/// is reported as [`ImageError::OutOfDomain`] or
/// [`ImageError::IndexOutOfRange`], never clamped or wrapped.
///
/// You will usually use one of the aliases:
/// - [`ImageContainer`] owns its values.
/// - [`ImageView`] borrows them read-only.
/// - [`ImageViewMut`] borrows them read-write, e.g. from an external buffer.
///
/// ```
/// use digital_image::{Domain, ImageContainer, Point2D};
/// let domain = Domain::new(Point2D::zero(), Point2D::diagonal(4)).unwrap();
/// let mut img: ImageContainer<i32, 2> = ImageContainer::new(domain);
/// assert_eq!(img.len(), 25);
/// img[Point2D::new([1, 0])] = 20;
/// assert_eq!(img[1_usize], 20);
/// img.translate_domain(Point2D::diagonal(1)).unwrap();
/// assert_eq!(img.value(Point2D::new([2, 1])).unwrap(), 20);
/// assert!(img.get(Point2D::zero()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ImageBase<S, const D: usize> {
    domain: Domain<D>,
    items: S,
}

/// An image that owns its values.
pub type ImageContainer<T, const D: usize> = ImageBase<Vec<T>, D>;

/// An image that borrows its values read-only.
pub type ImageView<'a, T, const D: usize> = ImageBase<&'a [T], D>;

/// An image that borrows its values read-write.
///
/// Writes through the view are visible to the owner of the memory once the
/// view is dropped, and vice versa.
pub type ImageViewMut<'a, T, const D: usize> = ImageBase<&'a mut [T], D>;

impl<S: Storage, const D: usize> ImageBase<S, D> {
    pub(crate) fn new_inner(domain: Domain<D>, items: S) -> Result<Self> {
        let (size, len) = (domain.size(), items.as_slice().len());
        if size != len {
            return Err(ImageError::LayoutMismatch(format!(
                "{} values supplied for a domain of size {}", len, size,
            )));
        }
        Ok(Self {domain, items})
    }

    /// Returns a copy of the domain.
    pub fn domain(&self) -> Domain<D> { self.domain }

    /// Returns the per-dimension span of the domain.
    pub fn extent(&self) -> Point<Integer, D> { self.domain.extent() }

    /// The number of values.
    pub fn len(&self) -> usize { self.items.as_slice().len() }

    /// Always `false`: a domain contains at least one point.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// The column-major map between the domain and linear indices.
    pub fn linearizer(&self) -> Linearizer<D> {
        Linearizer::new(self.domain, MajorOrder::ColumnMajor)
    }

    /// Returns the linear index of `point`.
    pub fn linear_index(&self, point: Point<Integer, D>) -> Result<usize> {
        self.linearizer().to_usize(point)
    }

    /// Returns the point whose linear index is `index`.
    pub fn point_at(&self, index: usize) -> Result<Point<Integer, D>> {
        self.linearizer().from_usize(index)
    }

    /// Borrow the value at `point`.
    pub fn get(&self, point: Point<Integer, D>) -> Result<&S::Elem> {
        let index = self.linear_index(point)?;
        Ok(&self.items.as_slice()[index])
    }

    /// Borrow the value at linear index `index`.
    pub fn get_linear(&self, index: usize) -> Result<&S::Elem> {
        let size = self.len();
        self.items.as_slice().get(index).ok_or(ImageError::IndexOutOfRange {index, size})
    }

    /// Returns a copy of the value at `point`.
    pub fn value(&self, point: Point<Integer, D>) -> Result<S::Elem> where S::Elem: Clone {
        self.get(point).cloned()
    }

    /// All values in storage order.
    pub fn as_slice(&self) -> &[S::Elem] { self.items.as_slice() }

    pub fn iter(&self) -> std::slice::Iter<'_, S::Elem> { self.as_slice().iter() }

    /// All `(point, value)` pairs in storage order.
    pub fn indexed_iter(&self) -> impl Iterator<Item=(Point<Integer, D>, &S::Elem)> + '_ {
        self.domain.points().zip(self.as_slice().iter())
    }

    /// Shift the domain by `shift`.
    ///
    /// The values are not moved: the value at linear index `i` is afterwards
    /// at `point_at(i) + shift`. Fails with
    /// [`ImageError::TranslationOverflow`], leaving the image unchanged, if a
    /// bound would overflow.
    pub fn translate_domain(&mut self, shift: Point<Integer, D>) -> Result<()> {
        trace!("Translating domain {} by {}", self.domain, shift);
        self.domain = self.domain.translated(shift)?;
        Ok(())
    }

    /// Borrow as a read-only [`ImageView`].
    pub fn view(&self) -> ImageView<'_, S::Elem, D> {
        ImageBase {domain: self.domain, items: self.items.as_slice()}
    }

    /// Copy the values into a new [`ImageContainer`] with the same domain.
    pub fn to_container(&self) -> ImageContainer<S::Elem, D> where S::Elem: Clone {
        ImageBase {domain: self.domain, items: self.as_slice().to_vec()}
    }
}

impl<S: StorageMut, const D: usize> ImageBase<S, D> {
    /// Mutably borrow the value at `point`.
    pub fn get_mut(&mut self, point: Point<Integer, D>) -> Result<&mut S::Elem> {
        let index = self.linear_index(point)?;
        Ok(&mut self.items.as_mut_slice()[index])
    }

    /// Mutably borrow the value at linear index `index`.
    pub fn get_linear_mut(&mut self, index: usize) -> Result<&mut S::Elem> {
        let size = self.len();
        self.items.as_mut_slice().get_mut(index).ok_or(ImageError::IndexOutOfRange {index, size})
    }

    /// Set the value at `point`.
    pub fn set_value(&mut self, point: Point<Integer, D>, value: S::Elem) -> Result<()> {
        *self.get_mut(point)? = value;
        Ok(())
    }

    /// Set the value at linear index `index`.
    pub fn set_linear(&mut self, index: usize, value: S::Elem) -> Result<()> {
        *self.get_linear_mut(index)? = value;
        Ok(())
    }

    pub fn as_mut_slice(&mut self) -> &mut [S::Elem] { self.items.as_mut_slice() }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, S::Elem> { self.as_mut_slice().iter_mut() }

    /// Set every value to `value`.
    pub fn fill(&mut self, value: S::Elem) where S::Elem: Clone {
        self.as_mut_slice().fill(value);
    }

    /// Borrow as a read-write [`ImageViewMut`].
    pub fn view_mut(&mut self) -> ImageViewMut<'_, S::Elem, D> {
        ImageBase {domain: self.domain, items: self.items.as_mut_slice()}
    }
}

// ----------------------------------------------------------------------------

impl<T: Value, const D: usize> ImageBase<Vec<T>, D> {
    /// Constructs an image over `domain` with every value `T::default()`.
    pub fn new(domain: Domain<D>) -> Self {
        Self {domain, items: vec![T::default(); domain.size()]}
    }

    /// Constructs an image over `domain` from a function of the point.
    ///
    /// ```
    /// use digital_image::{Domain, ImageContainer, Point2D};
    /// let domain = Domain::new(Point2D::zero(), Point2D::new([2, 1])).unwrap();
    /// let img = ImageContainer::from_fn(domain, |p| p[0] + 10 * p[1]);
    /// assert_eq!(img.as_slice(), [0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_fn(domain: Domain<D>, f: impl FnMut(Point<Integer, D>) -> T) -> Self {
        Self {domain, items: domain.points().map(f).collect()}
    }

    /// Constructs an image over `domain` given its values in column-major
    /// order.
    pub fn from_vec(domain: Domain<D>, values: Vec<T>) -> Result<Self> {
        Self::new_inner(domain, values)
    }

    /// Returns the values, in column-major order.
    pub fn into_vec(self) -> Vec<T> { self.items }
}

impl<'a, T, const D: usize> ImageBase<&'a [T], D> {
    /// Borrow `values` as an image over `domain`.
    pub fn from_slice(domain: Domain<D>, values: &'a [T]) -> Result<Self> {
        Self::new_inner(domain, values)
    }
}

impl<'a, T, const D: usize> ImageBase<&'a mut [T], D> {
    /// Mutably borrow `values` as an image over `domain`.
    pub fn from_slice_mut(domain: Domain<D>, values: &'a mut [T]) -> Result<Self> {
        Self::new_inner(domain, values)
    }
}

// ----------------------------------------------------------------------------

impl<S: Storage, const D: usize> std::ops::Index<Point<Integer, D>> for ImageBase<S, D> {
    type Output = S::Elem;

    /// # Panics
    ///
    /// Panics if `point` is outside the domain.
    fn index(&self, point: Point<Integer, D>) -> &S::Elem {
        self.get(point).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<S: StorageMut, const D: usize> std::ops::IndexMut<Point<Integer, D>> for ImageBase<S, D> {
    fn index_mut(&mut self, point: Point<Integer, D>) -> &mut S::Elem {
        self.get_mut(point).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<S: Storage, const D: usize> std::ops::Index<usize> for ImageBase<S, D> {
    type Output = S::Elem;

    /// # Panics
    ///
    /// Panics unless `index < self.len()`.
    fn index(&self, index: usize) -> &S::Elem {
        self.get_linear(index).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<S: StorageMut, const D: usize> std::ops::IndexMut<usize> for ImageBase<S, D> {
    fn index_mut(&mut self, index: usize) -> &mut S::Elem {
        self.get_linear_mut(index).unwrap_or_else(|e| panic!("{}", e))
    }
}

// ----------------------------------------------------------------------------

/// Strict equality: same domain and `==` values, regardless of ownership.
impl<S: Storage, S2: Storage, const D: usize> PartialEq<ImageBase<S2, D>> for ImageBase<S, D> where
    S::Elem: PartialEq<S2::Elem>,
{
    fn eq(&self, other: &ImageBase<S2, D>) -> bool {
        self.domain == other.domain && self.as_slice() == other.as_slice()
    }
}

impl<S: Storage, const D: usize> Eq for ImageBase<S, D> where S::Elem: Eq {}

/// Equality within an absolute tolerance. The domains must be equal.
///
/// ```
/// use digital_image::{Domain, ImageContainer, Point2D};
/// let domain = Domain::new(Point2D::zero(), Point2D::new([1, 1])).unwrap();
/// let a = ImageContainer::from_vec(domain, vec![0.1 + 0.2, 1.0, 2.0, 3.0]).unwrap();
/// let b = ImageContainer::from_vec(domain, vec![0.3, 1.0, 2.0, 3.0]).unwrap();
/// assert_ne!(a, b);
/// approx::assert_abs_diff_eq!(a, b, epsilon = 1e-12);
/// ```
impl<S: Storage, const D: usize> AbsDiffEq for ImageBase<S, D> where
    S::Elem: AbsDiffEq,
    <S::Elem as AbsDiffEq>::Epsilon: Clone,
{
    type Epsilon = <S::Elem as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon { S::Elem::default_epsilon() }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.domain == other.domain && self.iter().zip(other.iter()).all(
            |(a, b)| a.abs_diff_eq(b, epsilon.clone())
        )
    }
}

/// Equality within a relative tolerance. The domains must be equal.
impl<S: Storage, const D: usize> RelativeEq for ImageBase<S, D> where
    S::Elem: RelativeEq,
    <S::Elem as AbsDiffEq>::Epsilon: Clone,
{
    fn default_max_relative() -> Self::Epsilon { S::Elem::default_max_relative() }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.domain == other.domain && self.iter().zip(other.iter()).all(
            |(a, b)| a.relative_eq(b, epsilon.clone(), max_relative.clone())
        )
    }
}

impl<S: Storage, const D: usize> fmt::Display for ImageBase<S, D> where S::Elem: Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[Image] domain={} size={} value={}", self.domain, self.len(), S::Elem::TYPE_NAME)
    }
}

// ----------------------------------------------------------------------------
