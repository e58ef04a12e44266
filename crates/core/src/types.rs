/// Numeric identifier used by the booking service for all entities.
pub type Id = i64;
