/// Specifies timestamp value.
pub type Timestamp = f64;

/// Specifies duration value.
pub type Duration = f64;

/// Specifies distance value.
pub type Distance = f64;
