//! Images whose value type and dimension are chosen at run-time.
//!
//! [`AnyImage`] has one variant per supported instantiation of
//! [`ImageContainer`]. Each variant has a name of the form
//! `ImageContainerByVector{D}D{Value}`, e.g.
//! `ImageContainerByVector2DInteger`, by which it can be constructed.

use std::any::{Any};
use std::fmt::{self};

use log::{debug};

use super::{
    ImageError, Result, Integer, Point, Domain, MajorOrder, Value, Color, Point2D, Point3D,
    RealPoint2D, RealPoint3D, ImageContainer, RawBuffer,
};

fn container<T: Value, const D: usize>(lower: &[Integer], upper: &[Integer]) -> Result<ImageContainer<T, D>> {
    let domain = Domain::new(Point::from_slice(lower)?, Point::from_slice(upper)?)?;
    Ok(ImageContainer::new(domain))
}

fn not_scalar(name: &str) -> ImageError {
    ImageError::FormatMismatch {expected: "a scalar value type".into(), found: name.into()}
}

macro_rules! any_image {
    (
        scalar {$($s_variant:ident => $s_type:ty, $s_dim:literal, $s_value:ident;)*}
        other {$($o_variant:ident => $o_type:ty, $o_dim:literal, $o_value:ident;)*}
    ) => {
        /// An [`ImageContainer`] of one of the supported value types and
        /// dimensions.
        ///
        /// ```
        /// use digital_image::{AnyImage, ImageContainer, Point2D};
        /// let mut img = AnyImage::new("ImageContainerByVector2DInteger", &[0, 0], &[4, 4]).unwrap();
        /// assert_eq!((img.dimension(), img.len()), (2, 25));
        /// img.translate_domain(&[1, -1]).unwrap();
        /// assert_eq!(img.upper_bound(), [5, 3]);
        /// let concrete: &mut ImageContainer<i32, 2> = img.downcast_mut().unwrap();
        /// concrete[Point2D::new([5, 3])] = 1;
        /// ```
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnyImage {
            $($s_variant(ImageContainer<$s_type, $s_dim>),)*
            $($o_variant(ImageContainer<$o_type, $o_dim>),)*
        }

        impl AnyImage {
            /// The names of all supported instantiations.
            pub const TYPE_NAMES: &'static [&'static str] = &[
                $(concat!("ImageContainerByVector", $s_dim, "D", stringify!($s_value)),)*
                $(concat!("ImageContainerByVector", $o_dim, "D", stringify!($o_value)),)*
            ];

            /// Constructs the instantiation called `name` on the domain
            /// `lower..=upper`, filled with default values.
            pub fn new(name: &str, lower: &[Integer], upper: &[Integer]) -> Result<Self> {
                let image = match name {
                    $(concat!("ImageContainerByVector", $s_dim, "D", stringify!($s_value)) =>
                        Self::$s_variant(container(lower, upper)?),)*
                    $(concat!("ImageContainerByVector", $o_dim, "D", stringify!($o_value)) =>
                        Self::$o_variant(container(lower, upper)?),)*
                    _ => return Err(ImageError::UnknownType(name.into())),
                };
                debug!("Constructed {}", image);
                Ok(image)
            }

            /// Constructs the instantiation called `name` by copying `buffer`.
            ///
            /// Only instantiations with [`Scalar`] values can be read from
            /// raw bytes.
            ///
            /// [`Scalar`]: super::Scalar
            pub fn from_raw(name: &str, buffer: &RawBuffer<'_>, lower: &[Integer]) -> Result<Self> {
                let image = match name {
                    $(concat!("ImageContainerByVector", $s_dim, "D", stringify!($s_value)) =>
                        Self::$s_variant(ImageContainer::from_raw(buffer, Point::from_slice(lower)?)?),)*
                    _ if Self::TYPE_NAMES.contains(&name) => return Err(not_scalar(name)),
                    _ => return Err(ImageError::UnknownType(name.into())),
                };
                debug!("Constructed {} from a raw buffer", image);
                Ok(image)
            }

            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$s_variant(_) => concat!("ImageContainerByVector", $s_dim, "D", stringify!($s_value)),)*
                    $(Self::$o_variant(_) => concat!("ImageContainerByVector", $o_dim, "D", stringify!($o_value)),)*
                }
            }

            /// The [`Value::TYPE_NAME`] of the values.
            pub fn value_type(&self) -> &'static str {
                match self {
                    $(Self::$s_variant(_) => <$s_type as Value>::TYPE_NAME,)*
                    $(Self::$o_variant(_) => <$o_type as Value>::TYPE_NAME,)*
                }
            }

            pub fn dimension(&self) -> usize {
                match self {
                    $(Self::$s_variant(_) => $s_dim,)*
                    $(Self::$o_variant(_) => $o_dim,)*
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $(Self::$s_variant(img) => img.len(),)*
                    $(Self::$o_variant(img) => img.len(),)*
                }
            }

            pub fn is_empty(&self) -> bool { self.len() == 0 }

            pub fn lower_bound(&self) -> Vec<Integer> {
                match self {
                    $(Self::$s_variant(img) => img.domain().lower_bound().as_array().to_vec(),)*
                    $(Self::$o_variant(img) => img.domain().lower_bound().as_array().to_vec(),)*
                }
            }

            pub fn upper_bound(&self) -> Vec<Integer> {
                match self {
                    $(Self::$s_variant(img) => img.domain().upper_bound().as_array().to_vec(),)*
                    $(Self::$o_variant(img) => img.domain().upper_bound().as_array().to_vec(),)*
                }
            }

            /// Fails with [`ImageError::DimensionMismatch`] if `shift` has the
            /// wrong number of coordinates, or with
            /// [`ImageError::TranslationOverflow`] if a bound would overflow.
            /// In both cases nothing changes.
            pub fn translate_domain(&mut self, shift: &[Integer]) -> Result<()> {
                match self {
                    $(Self::$s_variant(img) => img.translate_domain(Point::from_slice(shift)?),)*
                    $(Self::$o_variant(img) => img.translate_domain(Point::from_slice(shift)?),)*
                }
            }

            /// Expose the values as raw bytes, if they are [`Scalar`]s.
            ///
            /// [`Scalar`]: super::Scalar
            pub fn raw_buffer(&self, order: MajorOrder) -> Result<RawBuffer<'_>> {
                match self {
                    $(Self::$s_variant(img) => Ok(img.raw_buffer(order)),)*
                    _ => Err(not_scalar(self.type_name())),
                }
            }

            /// The concrete image, if it is an `ImageContainer<T, D>`.
            pub fn downcast_ref<T: Value, const D: usize>(&self) -> Option<&ImageContainer<T, D>> {
                match self {
                    $(Self::$s_variant(img) => (img as &dyn Any).downcast_ref(),)*
                    $(Self::$o_variant(img) => (img as &dyn Any).downcast_ref(),)*
                }
            }

            pub fn downcast_mut<T: Value, const D: usize>(&mut self) -> Option<&mut ImageContainer<T, D>> {
                match self {
                    $(Self::$s_variant(img) => (img as &mut dyn Any).downcast_mut(),)*
                    $(Self::$o_variant(img) => (img as &mut dyn Any).downcast_mut(),)*
                }
            }
        }

        $(
            impl From<ImageContainer<$s_type, $s_dim>> for AnyImage {
                fn from(img: ImageContainer<$s_type, $s_dim>) -> Self { Self::$s_variant(img) }
            }
        )*
        $(
            impl From<ImageContainer<$o_type, $o_dim>> for AnyImage {
                fn from(img: ImageContainer<$o_type, $o_dim>) -> Self { Self::$o_variant(img) }
            }
        )*

        impl fmt::Display for AnyImage {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match self {
                    $(Self::$s_variant(img) => write!(f, "{}: {}", self.type_name(), img),)*
                    $(Self::$o_variant(img) => write!(f, "{}: {}", self.type_name(), img),)*
                }
            }
        }
    };
}

any_image! {
    scalar {
        Integer2D => i32, 2, Integer;
        Real2D => f64, 2, Real;
        Float2D => f32, 2, Float;
        UnsignedChar2D => u8, 2, UnsignedChar;
        Short2D => i16, 2, Short;
        Integer3D => i32, 3, Integer;
        Real3D => f64, 3, Real;
        Float3D => f32, 3, Float;
    }
    other {
        Color2D => Color, 2, Color;
        Point2D2D => Point2D, 2, Point2D;
        RealPoint2D2D => RealPoint2D, 2, RealPoint2D;
        Point3D2D => Point3D, 2, Point3D;
        RealPoint3D2D => RealPoint3D, 2, RealPoint3D;
        Color3D => Color, 3, Color;
        Point2D3D => Point2D, 3, Point2D;
        RealPoint2D3D => RealPoint2D, 3, RealPoint2D;
        Point3D3D => Point3D, 3, Point3D;
        RealPoint3D3D => RealPoint3D, 3, RealPoint3D;
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(AnyImage::TYPE_NAMES.len(), 18);
        assert!(AnyImage::TYPE_NAMES.contains(&"ImageContainerByVector2DUnsignedChar"));
        assert!(AnyImage::TYPE_NAMES.contains(&"ImageContainerByVector3DRealPoint2D"));
        assert!(!AnyImage::TYPE_NAMES.contains(&"ImageContainerByVector3DShort"));
        for &name in AnyImage::TYPE_NAMES {
            let dim = if name.starts_with("ImageContainerByVector2D") { 2 } else { 3 };
            let lower = vec![0; dim];
            let upper = vec![2; dim];
            let img = AnyImage::new(name, &lower, &upper).unwrap();
            assert_eq!(img.type_name(), name);
            assert!(name.ends_with(img.value_type()));
            assert_eq!(img.dimension(), dim);
            assert_eq!(img.len(), 3_usize.pow(dim as u32));
        }
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            AnyImage::new("ImageContainerByVector4DInteger", &[0; 4], &[1; 4]),
            Err(ImageError::UnknownType("ImageContainerByVector4DInteger".into())),
        );
        assert_eq!(
            AnyImage::new("ImageContainerByVector3DInteger", &[0, 0], &[1, 1]),
            Err(ImageError::DimensionMismatch {expected: 3, found: 2}),
        );
        assert!(matches!(
            AnyImage::new("ImageContainerByVector2DReal", &[0, 1], &[1, 0]),
            Err(ImageError::InvalidDomain {..}),
        ));
    }

    #[test]
    fn translate() {
        let mut img = AnyImage::new("ImageContainerByVector3DColor", &[0, 0, 0], &[1, 2, 3]).unwrap();
        assert_eq!(img.translate_domain(&[1, 1]), Err(ImageError::DimensionMismatch {expected: 3, found: 2}));
        assert_eq!(img.lower_bound(), [0, 0, 0]);
        img.translate_domain(&[1, 1, -1]).unwrap();
        assert_eq!(img.lower_bound(), [1, 1, -1]);
        assert_eq!(img.upper_bound(), [2, 3, 2]);
        assert_eq!(img.len(), 24);
        assert!(matches!(
            img.translate_domain(&[0, Integer::MAX - 2, 0]),
            Err(ImageError::TranslationOverflow {..}),
        ));
        assert_eq!(img.lower_bound(), [1, 1, -1]);
        assert_eq!(img.upper_bound(), [2, 3, 2]);
    }

    #[test]
    fn downcast() {
        let mut img = AnyImage::new("ImageContainerByVector2DRealPoint3D", &[0, 0], &[1, 1]).unwrap();
        assert!(img.downcast_ref::<RealPoint3D, 3>().is_none());
        assert!(img.downcast_ref::<Point3D, 2>().is_none());
        let concrete = img.downcast_mut::<RealPoint3D, 2>().unwrap();
        concrete[Point2D::new([1, 1])] = RealPoint3D::new([0.5, 1.5, 2.5]);
        let expected = AnyImage::from(concrete.clone());
        assert_eq!(img, expected);
    }

    #[test]
    fn raw_buffers() {
        let mut img = AnyImage::new("ImageContainerByVector2DShort", &[3, 3], &[5, 4]).unwrap();
        img.downcast_mut::<i16, 2>().unwrap()[Point2D::new([5, 3])] = -2;
        let raw = img.raw_buffer(MajorOrder::RowMajor).unwrap();
        assert_eq!(raw.format, "h");
        let copy = AnyImage::from_raw("ImageContainerByVector2DShort", &raw, &[3, 3]).unwrap();
        assert_eq!(copy, img);
        assert!(matches!(
            AnyImage::from_raw("ImageContainerByVector2DInteger", &raw, &[3, 3]),
            Err(ImageError::FormatMismatch {..}),
        ));
        assert!(matches!(
            AnyImage::from_raw("ImageContainerByVector2DColor", &raw, &[3, 3]),
            Err(ImageError::FormatMismatch {..}),
        ));
        let colors = AnyImage::new("ImageContainerByVector2DColor", &[0, 0], &[1, 1]).unwrap();
        assert!(colors.raw_buffer(MajorOrder::ColumnMajor).is_err());
    }

    #[test]
    fn display() {
        let img = AnyImage::new("ImageContainerByVector2DFloat", &[0, 0], &[1, 2]).unwrap();
        assert_eq!(
            img.to_string(),
            "ImageContainerByVector2DFloat: [Image] domain=(0, 0)-(1, 2) size=6 value=Float",
        );
    }
}
