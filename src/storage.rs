//! The memory behind an image.
//!
//! An [`ImageBase`] is agnostic about the ownership of its values: it can own
//! them in a `Vec`, or borrow them from somebody else, e.g. from an external
//! buffer. Ownership is therefore visible in the type of the image rather
//! than decided at run-time.
//!
//! [`ImageBase`]: super::ImageBase

/// Dense, linear, read-only storage of `Self::Elem`s.
pub trait Storage {
    type Elem;

    fn as_slice(&self) -> &[Self::Elem];
}

/// Dense, linear, read-write storage.
pub trait StorageMut: Storage {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

impl<T> Storage for Vec<T> {
    type Elem = T;
    #[inline(always)]
    fn as_slice(&self) -> &[T] { self }
}

impl<T> StorageMut for Vec<T> {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [T] { self }
}

impl<'a, T> Storage for &'a [T] {
    type Elem = T;
    #[inline(always)]
    fn as_slice(&self) -> &[T] { self }
}

impl<'a, T> Storage for &'a mut [T] {
    type Elem = T;
    #[inline(always)]
    fn as_slice(&self) -> &[T] { self }
}

impl<'a, T> StorageMut for &'a mut [T] {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [T] { self }
}
