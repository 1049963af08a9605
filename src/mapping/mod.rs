//! Typed extraction from driver rows.

pub mod converter;
pub mod row_mapper;

pub use converter::{ColumnConverter, FromColumn};
pub use row_mapper::{map_entity, map_record};
