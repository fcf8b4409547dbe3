//! Base trait for store slices.

/// Marker trait for slice state.
///
/// Slices are cloned out of the store as snapshots and compared in tests.
pub trait SliceState: Clone + PartialEq + Default + Send + 'static {}
