#[cfg(feature = "threadsafe")]
pub(crate) mod inner {
    use std::sync::{Mutex, MutexGuard};

    /// Marker to identify an implementing instance as thread-safe.
    pub trait SendAndSync: Send + Sync {}

    pub(crate) struct Lock<T>(Mutex<T>);

    impl<T> Lock<T> {
        pub(crate) fn new(t: T) -> Self {
            Self(Mutex::new(t))
        }

        /// Returns [`None`] if a previous holder panicked.
        pub(crate) fn acquire(&self) -> Option<MutexGuard<'_, T>> {
            self.0.lock().ok()
        }
    }
}

#[cfg(not(feature = "threadsafe"))]
pub(crate) mod inner {
    use std::cell::{RefCell, RefMut};

    /// Marker satisfied by every type when the `threadsafe` feature is disabled.
    pub trait SendAndSync {}

    pub(crate) struct Lock<T>(RefCell<T>);

    impl<T> Lock<T> {
        pub(crate) fn new(t: T) -> Self {
            Self(RefCell::new(t))
        }

        /// Returns [`None`] if the value is already borrowed.
        pub(crate) fn acquire(&self) -> Option<RefMut<'_, T>> {
            self.0.try_borrow_mut().ok()
        }
    }
}

pub(crate) use inner::Lock;
pub use inner::SendAndSync;

impl<#[cfg(feature = "threadsafe")] A: Send + Sync, #[cfg(not(feature = "threadsafe"))] A>
    SendAndSync for A
{
}
