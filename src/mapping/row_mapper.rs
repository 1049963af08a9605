//! Descriptor-driven row mapping: `<prefix>_<column>` cells -> record -> entity.

use super::converter::ColumnConverter;
use crate::db::RawRow;
use crate::error::ConversionError;
use crate::model::{Entity, EntityDescriptor, Record};

/// Read every column of `entity` under `prefix`. Nulls are kept; required-ness is not checked here.
pub fn map_record(row: &RawRow, entity: &EntityDescriptor, prefix: &str) -> Result<Record, ConversionError> {
    let mut record = Record::with_capacity(entity.columns.len());
    for c in entity.columns {
        let label = format!("{}_{}", prefix, c.name);
        record.insert(c.name, ColumnConverter::convert(row, &label, c.column_type)?);
    }
    Ok(record)
}

pub fn map_entity<E: Entity>(row: &RawRow, prefix: &str) -> Result<E, ConversionError> {
    map_record(row, E::descriptor(), prefix).map(E::from_record)
}
