use std::fmt;

/// The three filterable columns. Declaration order is precedence order:
/// `Names` is furthest upstream, `Companies` furthest downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterColumn {
    Names,
    Projects,
    Companies,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 3] = [
        FilterColumn::Names,
        FilterColumn::Projects,
        FilterColumn::Companies,
    ];

    pub fn index(self) -> usize {
        match self {
            FilterColumn::Names => 0,
            FilterColumn::Projects => 1,
            FilterColumn::Companies => 2,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            FilterColumn::Names => "names",
            FilterColumn::Projects => "projects",
            FilterColumn::Companies => "companies",
        }
    }

    /// Columns of lower precedence, in precedence order.
    pub fn downstream(self) -> impl Iterator<Item = FilterColumn> {
        Self::ALL.into_iter().filter(move |c| *c > self)
    }

    pub fn others(self) -> impl Iterator<Item = FilterColumn> {
        Self::ALL.into_iter().filter(move |c| *c != self)
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub label: String,
    pub filterable: bool,
    pub filter_by: FilterColumn,
}

impl ColumnDescriptor {
    pub fn new(label: impl Into<String>, filter_by: FilterColumn) -> Self {
        Self { label: label.into(), filterable: true, filter_by }
    }
}

pub fn default_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("Full Name", FilterColumn::Names),
        ColumnDescriptor::new("Project Name", FilterColumn::Projects),
        ColumnDescriptor::new("Company Name", FilterColumn::Companies),
    ]
}
