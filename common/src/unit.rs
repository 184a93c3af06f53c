//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a check-in.
#[derive(Clone, Copy, Debug)]
pub struct CheckIn;

/// Marker type describing a check-out.
#[derive(Clone, Copy, Debug)]
pub struct CheckOut;
