//! Page request: zero-based page index, page size and resolved sort columns.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    /// Column name, already checked against the entity descriptor.
    pub column: &'static str,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 20;
    pub const MAX_SIZE: u32 = 2000;

    pub fn new(page: u32, size: u32) -> Self {
        PageRequest {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.sort.push(SortOrder { column, direction });
        self
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Number of pages needed for `total` rows (0 when there are none).
    pub fn total_pages(&self, total: i64) -> u64 {
        let total = total.max(0) as u64;
        let size = u64::from(self.size.max(1));
        total.div_ceil(size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(0, Self::DEFAULT_SIZE)
    }
}
