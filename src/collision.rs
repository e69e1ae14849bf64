//! Pixel-exact collision between positioned sprites.

use crate::sprite::Mask;

/// Anything that sits in the field with a collision mask.
pub trait Body {
    /// Top-left corner in field units.
    fn origin(&self) -> (i32, i32);
    fn mask(&self) -> &Mask;
}

/// True when the opaque pixels of `a` and `b` intersect. Bounding boxes
/// touching is not enough.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Body + ?Sized,
    B: Body + ?Sized,
{
    let (ax, ay) = a.origin();
    let (bx, by) = b.origin();
    a.mask().overlaps(b.mask(), (bx - ax, by - ay))
}
