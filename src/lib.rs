//! A pure-Rust library of dense rectangular images.
//!
//! [`ImageContainer<T, D>`] stores a value of type `T` at every point of a
//! [`Domain<D>`], a `D`-dimensional box of integer [`Point`]s between a
//! `lower_bound` and an `upper_bound`, both included. The values are stored
//! in a dense 1-dimensional `Vec` in column-major order: the first
//! coordinate varies fastest. A [`Linearizer`] converts between points and
//! positions in the `Vec`.
//!
//! [`ImageView`] and [`ImageViewMut`] are the same thing, but borrow their
//! values instead of owning them. All three are aliases of [`ImageBase`],
//! which is generic over its [`Storage`]. Views are the way to share memory
//! with external buffers: [`ndarray`] arrays and raw byte buffers
//! ([`RawBuffer`]) can be viewed as images, and images can be viewed as
//! either, in column-major (`"F"`) or row-major (`"C"`) order; see
//! [`MajorOrder`].
//!
//! The value types are those implementing [`Value`]. [`AnyImage`] is for
//! callers who only know the value type and dimension at run-time.
//!
//! ```
//! use digital_image::{Domain, ImageContainer, Point2D};
//! let domain = Domain::new(Point2D::zero(), Point2D::new([4, 4])).unwrap();
//! let mut img: ImageContainer<i32, 2> = ImageContainer::new(domain);
//! assert_eq!(img.len(), 25);
//! img[Point2D::new([2, 1])] = 7;
//! assert_eq!(img[img.linear_index(Point2D::new([2, 1])).unwrap()], 7);
//! ```

mod error;
pub use error::{ImageError, Result};

mod point;
pub use point::{Coordinate, Integer, Real, Float, Point, Point2D, Point3D, RealPoint2D, RealPoint3D};

mod domain;
pub use domain::{Domain, Points};

mod index;
pub use index::{MajorOrder, Linearizer};

mod color;
pub use color::{Color};

mod value;
pub use value::{Value, Scalar};

mod storage;
pub use storage::{Storage, StorageMut};

mod image;
pub use image::{ImageBase, ImageContainer, ImageView, ImageViewMut};

mod buffer;
pub use buffer::{RawBuffer, RawBufferMut};

mod registry;
pub use registry::{AnyImage};
