use core::time::Duration;

/// Blocking delay provider.
///
/// Every pause between two bridge commands goes through this trait, so the timing can be
/// observed in tests.
pub trait Delay {
    /// Blocks the caller for the given duration.
    fn delay(&mut self, duration: Duration);
}

impl<T: ?Sized + Delay> Delay for &mut T {
    fn delay(&mut self, duration: Duration) {
        T::delay(self, duration);
    }
}
