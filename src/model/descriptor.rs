//! Static column-descriptor tables. One per entity; read by the SQL builder, the row mapper, validation and migrations.

/// Semantic type of a column as seen by the mapping layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    BigInt,
    Text,
    Double,
}

impl ColumnType {
    /// PostgreSQL type name used for parameter casts and DDL.
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnType::BigInt => "bigint",
            ColumnType::Text => "text",
            ColumnType::Double => "double precision",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnType::BigInt => "bigint",
            ColumnType::Text => "text",
            ColumnType::Double => "double",
        }
    }
}

#[derive(Debug)]
pub struct ColumnDescriptor {
    /// Column name in the table.
    pub name: &'static str,
    /// JSON property name (camelCase); accepted in sort parameters.
    pub property: &'static str,
    pub column_type: ColumnType,
    /// Must be non-null before persistence. Checked at the API boundary only.
    pub required: bool,
    pub primary_key: bool,
}

/// Many-to-one relation: `<table>.<fk_column> = <target>.id`.
#[derive(Debug)]
pub struct RelationDescriptor {
    /// Relation name; doubles as join alias and column prefix.
    pub name: &'static str,
    pub fk_column: &'static str,
    pub target: &'static EntityDescriptor,
}

#[derive(Debug)]
pub struct EntityDescriptor {
    pub table: &'static str,
    /// Name reported in error bodies and alert headers.
    pub entity_name: &'static str,
    pub columns: &'static [ColumnDescriptor],
    pub relations: &'static [RelationDescriptor],
}

impl EntityDescriptor {
    /// Every entity is keyed by a generated bigint `id`.
    pub const ID_COLUMN: &'static str = "id";

    pub fn column(&self, name: &str) -> Option<&'static ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up by JSON property first, then by column name.
    pub fn column_by_property(&self, property: &str) -> Option<&'static ColumnDescriptor> {
        self.columns
            .iter()
            .find(|c| c.property == property)
            .or_else(|| self.column(property))
    }

    pub fn relation(&self, name: &str) -> Option<&'static RelationDescriptor> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Columns written by INSERT and UPDATE (everything but the primary key).
    pub fn writable_columns(&self) -> impl Iterator<Item = &'static ColumnDescriptor> {
        self.columns.iter().filter(|c| !c.primary_key)
    }
}
