use std::fmt::{self};

/// An RGBA colour with 8-bit channels.
///
/// The default is opaque black.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {red, green, blue, alpha}
    }

    /// An opaque colour.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self { Self::new(red, green, blue, 255) }

    pub const fn with_alpha(self, alpha: u8) -> Self { Self {alpha, ..self} }
}

impl Default for Color {
    fn default() -> Self { Self::BLACK }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.red, self.green, self.blue, self.alpha)
    }
}
