//! The types of values an image can hold.

use std::fmt::{Debug};

use super::{Color, Integer, Point};

/// Implemented by every type that can be stored in an image.
///
/// `Default` provides the value of freshly allocated pixels. `TYPE_NAME` is
/// the name used by [`AnyImage`] and by image `Display`.
///
/// [`AnyImage`]: super::AnyImage
pub trait Value: 'static + Clone + Default + PartialEq + Debug {
    const TYPE_NAME: &'static str;
}

/// A [`Value`] that is plain old data, and can therefore be exchanged with
/// external buffers as raw bytes.
///
/// `FORMAT` is the struct-module style format character of the type.
pub trait Scalar: Value + bytemuck::Pod {
    const FORMAT: &'static str;
}

macro_rules! impl_scalar {
    ($($t:ty => $name:literal, $format:literal;)*) => {$(
        impl Value for $t { const TYPE_NAME: &'static str = $name; }
        impl Scalar for $t { const FORMAT: &'static str = $format; }
    )*};
}

impl_scalar! {
    i32 => "Integer", "i";
    f64 => "Real", "d";
    f32 => "Float", "f";
    u8 => "UnsignedChar", "B";
    i16 => "Short", "h";
    u16 => "UnsignedShort", "H";
    u32 => "UnsignedInteger", "I";
    i64 => "Long", "q";
}

impl Value for Color { const TYPE_NAME: &'static str = "Color"; }

impl Value for Point<Integer, 2> { const TYPE_NAME: &'static str = "Point2D"; }
impl Value for Point<Integer, 3> { const TYPE_NAME: &'static str = "Point3D"; }
impl Value for Point<f64, 2> { const TYPE_NAME: &'static str = "RealPoint2D"; }
impl Value for Point<f64, 3> { const TYPE_NAME: &'static str = "RealPoint3D"; }
