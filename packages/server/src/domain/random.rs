//! Random source abstraction.
//!
//! Driver fabrication draws from an injected source so tests can script the
//! exact draws and assert exact jittered coordinates.

/// Source of uniformly distributed numbers in `[0, 1)`.
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
