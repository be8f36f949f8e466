//! Exchanging image values with external buffers.
//!
//! An external buffer is described by its element type, its shape and its
//! [`MajorOrder`]. Images are always stored in column-major order, so:
//! - A column-major (`"F"`) buffer of shape `[s0, s1, ...]` is an image whose
//!   domain has shape `[s0, s1, ...]`; buffer element `[i0, i1, ...]` is the
//!   value at point `lower_bound + (i0, i1, ...)`.
//! - A row-major (`"C"`) buffer of shape `[..., s1, s0]` is the same image
//!   with the axes reversed; buffer element `[..., i1, i0]` is the value at
//!   point `lower_bound + (i0, i1, ...)`.
//!
//! In both cases the memory is laid out identically, which is why both can
//! be shared without copying.
//!
//! Two kinds of buffer are supported: [`ndarray`] arrays, and raw byte
//! buffers ([`RawBuffer`], [`RawBufferMut`]) carrying a format descriptor.
//!
//! Views borrow the buffer, so the borrow checker forbids mutating the image
//! and the buffer at the same time. Sharing a [`RawBufferMut`] obtained from
//! foreign code with another thread is the caller's responsibility.

use log::{debug};
use ndarray::{ArrayBase, ArrayD, ArrayView, ArrayViewD, ArrayViewMut, ArrayViewMutD, Data, DataMut, Dimension, IxDyn, ShapeBuilder};

use super::{
    ImageError, Result, Integer, Point, Domain, MajorOrder, Scalar, Storage, StorageMut,
    ImageBase, ImageContainer, ImageView, ImageViewMut,
};

/// The domain of the image stored in a buffer of shape `shape`.
fn buffer_domain<const D: usize>(
    shape: &[usize],
    lower_bound: Point<Integer, D>,
    order: MajorOrder,
) -> Result<Domain<D>> {
    if shape.len() != D {
        return Err(ImageError::DimensionMismatch {expected: D, found: shape.len()});
    }
    let mut domain_shape = [0; D];
    domain_shape.copy_from_slice(&order.adapt_shape(shape));
    Domain::from_shape(lower_bound, domain_shape)
}

/// Check that `strides` (in elements) are those of a dense buffer of shape
/// `shape` in `order`. Axes of length 1 can have any stride.
fn check_strides(shape: &[usize], strides: &[isize], order: MajorOrder) -> Result<()> {
    let expected = order.strides(shape);
    for k in 0..shape.len() {
        if shape[k] > 1 && strides[k] != expected[k] as isize {
            return Err(ImageError::LayoutMismatch(format!(
                "Strides {:?} of a buffer of shape {:?} are not {:?}-contiguous",
                strides, shape, order.as_str(),
            )));
        }
    }
    Ok(())
}

fn shape_error(e: ndarray::ShapeError) -> ImageError {
    ImageError::LayoutMismatch(e.to_string())
}

// ----------------------------------------------------------------------------

impl<S: Storage, const D: usize> ImageBase<S, D> {
    /// Returns the shape of the buffer representation in `order`.
    pub fn buffer_shape(&self, order: MajorOrder) -> Vec<usize> {
        order.adapt_shape(&self.domain().shape())
    }

    /// Borrow the values as an [`ndarray`] array without copying them.
    ///
    /// ```
    /// use digital_image::{Domain, ImageContainer, MajorOrder, Point2D};
    /// let domain = Domain::new(Point2D::zero(), Point2D::new([2, 3])).unwrap();
    /// let mut img: ImageContainer<i32, 2> = ImageContainer::new(domain);
    /// img[Point2D::new([1, 0])] = 20;
    /// img[Point2D::new([0, 1])] = 40;
    /// let f = img.as_ndarray(MajorOrder::ColumnMajor).unwrap();
    /// assert_eq!(f.shape(), [3, 4]);
    /// assert_eq!((f[[1, 0]], f[[0, 1]]), (20, 40));
    /// let c = img.as_ndarray(MajorOrder::RowMajor).unwrap();
    /// assert_eq!(c.shape(), [4, 3]);
    /// assert_eq!((c[[0, 1]], c[[1, 0]]), (20, 40));
    /// ```
    pub fn as_ndarray(&self, order: MajorOrder) -> Result<ArrayViewD<'_, S::Elem>> {
        let shape = self.buffer_shape(order);
        let view = match order {
            MajorOrder::ColumnMajor => ArrayView::from_shape(IxDyn(&shape).f(), self.as_slice()),
            MajorOrder::RowMajor => ArrayView::from_shape(IxDyn(&shape), self.as_slice()),
        };
        view.map_err(shape_error)
    }

    /// Copy the values into a new [`ndarray`] array, indexed as by
    /// [`as_ndarray()`].
    ///
    /// [`as_ndarray()`]: Self::as_ndarray
    pub fn to_ndarray(&self, order: MajorOrder) -> Result<ArrayD<S::Elem>> where S::Elem: Clone {
        Ok(self.as_ndarray(order)?.to_owned())
    }
}

impl<S: StorageMut, const D: usize> ImageBase<S, D> {
    /// Mutably borrow the values as an [`ndarray`] array without copying
    /// them. Writes through the array are writes to the image.
    pub fn as_ndarray_mut(&mut self, order: MajorOrder) -> Result<ArrayViewMutD<'_, S::Elem>> {
        let shape = self.buffer_shape(order);
        let view = match order {
            MajorOrder::ColumnMajor => ArrayViewMut::from_shape(IxDyn(&shape).f(), self.as_mut_slice()),
            MajorOrder::RowMajor => ArrayViewMut::from_shape(IxDyn(&shape), self.as_mut_slice()),
        };
        view.map_err(shape_error)
    }
}

impl<T: Scalar, const D: usize> ImageContainer<T, D> {
    /// Constructs an image by copying an [`ndarray`] array of any memory
    /// layout.
    ///
    /// The domain starts at `lower_bound`; its shape is that of `array`,
    /// reversed if `order` is [`MajorOrder::RowMajor`].
    pub fn from_ndarray<A: Data<Elem=T>, E: Dimension>(
        array: &ArrayBase<A, E>,
        lower_bound: Point<Integer, D>,
        order: MajorOrder,
    ) -> Result<Self> {
        let domain = buffer_domain(array.shape(), lower_bound, order)?;
        debug!("Copying {:?} array of shape {:?} into domain {}", order.as_str(), array.shape(), domain);
        let values = match order {
            MajorOrder::ColumnMajor => array.t().iter().copied().collect(),
            MajorOrder::RowMajor => array.iter().copied().collect(),
        };
        Self::new_inner(domain, values)
    }

    /// Constructs an image by copying a raw buffer.
    ///
    /// Unlike [`ImageView::from_raw()`], the bytes need not be aligned.
    pub fn from_raw(buffer: &RawBuffer<'_>, lower_bound: Point<Integer, D>) -> Result<Self> {
        let domain = buffer.validate::<T, D>(lower_bound)?;
        debug!("Copying raw {:?} buffer of shape {:?} into domain {}", buffer.format, buffer.shape, domain);
        Self::new_inner(domain, bytemuck::allocation::pod_collect_to_vec(buffer.data))
    }
}

impl<'a, T: Scalar, const D: usize> ImageView<'a, T, D> {
    /// Borrow the memory of an [`ndarray`] array as an image.
    ///
    /// Fails with [`ImageError::LayoutMismatch`] unless the array is dense in
    /// `order`.
    pub fn from_ndarray<A: Data<Elem=T>, E: Dimension>(
        array: &'a ArrayBase<A, E>,
        lower_bound: Point<Integer, D>,
        order: MajorOrder,
    ) -> Result<Self> {
        let domain = buffer_domain(array.shape(), lower_bound, order)?;
        check_strides(array.shape(), array.strides(), order)?;
        let values = array.as_slice_memory_order().ok_or_else(|| ImageError::LayoutMismatch(
            "Array memory is not contiguous".into(),
        ))?;
        debug!("Viewing {:?} array of shape {:?} as domain {}", order.as_str(), array.shape(), domain);
        Self::new_inner(domain, values)
    }

    /// Borrow a raw buffer as an image.
    pub fn from_raw(buffer: &RawBuffer<'a>, lower_bound: Point<Integer, D>) -> Result<Self> {
        let domain = buffer.validate::<T, D>(lower_bound)?;
        let values = bytemuck::try_cast_slice(buffer.data)
            .map_err(|e| ImageError::LayoutMismatch(format!("{:?}", e)))?;
        debug!("Viewing raw {:?} buffer of shape {:?} as domain {}", buffer.format, buffer.shape, domain);
        Self::new_inner(domain, values)
    }
}

impl<'a, T: Scalar, const D: usize> ImageViewMut<'a, T, D> {
    /// Mutably borrow the memory of an [`ndarray`] array as an image.
    ///
    /// ```
    /// use digital_image::{ImageViewMut, MajorOrder, Point2D};
    /// // Row-major, as produced by most image readers: 2 rows of 3 columns.
    /// let mut pixels = ndarray::Array2::<u8>::zeros((2, 3));
    /// pixels[[1, 2]] = 208;
    /// let mut img = ImageViewMut::from_ndarray_mut(&mut pixels, Point2D::zero(), MajorOrder::RowMajor).unwrap();
    /// assert_eq!(img.domain().upper_bound(), Point2D::new([2, 1]));
    /// assert_eq!(img[Point2D::new([2, 1])], 208);
    /// img[Point2D::new([0, 1])] = 7;
    /// assert_eq!(pixels[[1, 0]], 7);
    /// ```
    pub fn from_ndarray_mut<A: DataMut<Elem=T>, E: Dimension>(
        array: &'a mut ArrayBase<A, E>,
        lower_bound: Point<Integer, D>,
        order: MajorOrder,
    ) -> Result<Self> {
        let shape = array.shape().to_vec();
        let domain = buffer_domain(&shape, lower_bound, order)?;
        check_strides(&shape, array.strides(), order)?;
        debug!("Mutably viewing {:?} array of shape {:?} as domain {}", order.as_str(), shape, domain);
        let values = array.as_slice_memory_order_mut().ok_or_else(|| ImageError::LayoutMismatch(
            "Array memory is not contiguous".into(),
        ))?;
        Self::new_inner(domain, values)
    }

    /// Mutably borrow a raw buffer as an image.
    pub fn from_raw_mut(buffer: RawBufferMut<'a>, lower_bound: Point<Integer, D>) -> Result<Self> {
        let domain = buffer.as_raw().validate::<T, D>(lower_bound)?;
        debug!("Mutably viewing raw {:?} buffer of shape {:?} as domain {}", buffer.format, buffer.shape, domain);
        let values = bytemuck::try_cast_slice_mut(buffer.data)
            .map_err(|e| ImageError::LayoutMismatch(format!("{:?}", e)))?;
        Self::new_inner(domain, values)
    }
}

// ----------------------------------------------------------------------------

/// A read-only external buffer: bytes plus a description of their contents.
///
/// `format` is a struct-module style format string such as `"i"` or `"d"`
/// (see [`Scalar::FORMAT`]), and `item_size` the size of one element in
/// bytes. The buffer is dense in `order`.
#[derive(Debug, Clone)]
pub struct RawBuffer<'a> {
    pub data: &'a [u8],
    pub format: &'a str,
    pub item_size: usize,
    pub shape: Vec<usize>,
    pub order: MajorOrder,
}

/// A read-write external buffer. See [`RawBuffer`].
#[derive(Debug)]
pub struct RawBufferMut<'a> {
    pub data: &'a mut [u8],
    pub format: &'a str,
    pub item_size: usize,
    pub shape: Vec<usize>,
    pub order: MajorOrder,
}

impl<'a> RawBuffer<'a> {
    pub fn new(data: &'a [u8], format: &'a str, item_size: usize, shape: Vec<usize>, order: MajorOrder) -> Self {
        Self {data, format, item_size, shape, order}
    }

    /// The number of elements implied by the shape, or `None` if that does
    /// not fit in a `usize`.
    pub fn element_count(&self) -> Option<usize> {
        self.shape.iter().try_fold(1usize, |n, &s| n.checked_mul(s))
    }

    /// Byte strides along each axis.
    pub fn strides(&self) -> Vec<usize> {
        self.order.strides(&self.shape).into_iter().map(|s| s.saturating_mul(self.item_size)).collect()
    }

    /// Check that this buffer can hold an image of `T`s with `D` dimensions,
    /// and return its domain.
    pub(crate) fn validate<T: Scalar, const D: usize>(&self, lower_bound: Point<Integer, D>) -> Result<Domain<D>> {
        if self.shape.len() != D {
            return Err(ImageError::DimensionMismatch {expected: D, found: self.shape.len()});
        }
        let expected_size = std::mem::size_of::<T>();
        if self.item_size != expected_size {
            return Err(ImageError::FormatMismatch {
                expected: format!("{} bytes", expected_size),
                found: format!("{} bytes", self.item_size),
            });
        }
        if self.format != T::FORMAT {
            return Err(ImageError::FormatMismatch {expected: T::FORMAT.into(), found: self.format.into()});
        }
        let expected_len = self.element_count().and_then(|n| n.checked_mul(self.item_size));
        if expected_len != Some(self.data.len()) {
            return Err(ImageError::LayoutMismatch(format!(
                "{} bytes supplied for shape {:?} of {}-byte items",
                self.data.len(), self.shape, self.item_size,
            )));
        }
        buffer_domain(&self.shape, lower_bound, self.order)
    }
}

impl<'a> RawBufferMut<'a> {
    pub fn new(data: &'a mut [u8], format: &'a str, item_size: usize, shape: Vec<usize>, order: MajorOrder) -> Self {
        Self {data, format, item_size, shape, order}
    }

    /// Reborrow as a read-only [`RawBuffer`].
    pub fn as_raw(&self) -> RawBuffer<'_> {
        RawBuffer {
            data: &*self.data,
            format: self.format,
            item_size: self.item_size,
            shape: self.shape.clone(),
            order: self.order,
        }
    }
}

impl<S: Storage, const D: usize> ImageBase<S, D> where S::Elem: Scalar {
    /// Expose the values as a raw byte buffer without copying them.
    ///
    /// ```
    /// use digital_image::{Domain, ImageContainer, ImageView, MajorOrder, Point3D};
    /// let domain = Domain::new(Point3D::new([1, 1, 1]), Point3D::new([2, 3, 4])).unwrap();
    /// let img = ImageContainer::from_fn(domain, |p| p.norm1() as f32);
    /// let raw = img.raw_buffer(MajorOrder::RowMajor);
    /// assert_eq!((raw.format, raw.item_size), ("f", 4));
    /// assert_eq!(raw.shape, [4, 3, 2]);
    /// let copy = ImageView::<f32, 3>::from_raw(&raw, domain.lower_bound()).unwrap();
    /// assert_eq!(copy, img);
    /// ```
    pub fn raw_buffer(&self, order: MajorOrder) -> RawBuffer<'_> {
        RawBuffer {
            data: bytemuck::cast_slice(self.as_slice()),
            format: S::Elem::FORMAT,
            item_size: std::mem::size_of::<S::Elem>(),
            shape: self.buffer_shape(order),
            order,
        }
    }
}

impl<S: StorageMut, const D: usize> ImageBase<S, D> where S::Elem: Scalar {
    /// Expose the values as a mutable raw byte buffer without copying them.
    pub fn raw_buffer_mut(&mut self, order: MajorOrder) -> RawBufferMut<'_> {
        let shape = self.buffer_shape(order);
        RawBufferMut {
            data: bytemuck::cast_slice_mut(self.as_mut_slice()),
            format: S::Elem::FORMAT,
            item_size: std::mem::size_of::<S::Elem>(),
            shape,
            order,
        }
    }
}

// ----------------------------------------------------------------------------
