use lifeos_core::EntityMapping;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("asc"),
            Order::Desc => f.write_str("desc"),
        }
    }
}

/// Read request in the store's query-parameter filter language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, String)>,
    pub order: Option<(String, Order)>,
    pub limit: Option<usize>,
    pub select: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discriminator (and status, if any) filters plus newest-first ordering.
    pub fn for_entity(mapping: &EntityMapping) -> Self {
        let mut query = mapping
            .read_filters()
            .into_iter()
            .fold(Self::new(), |q, (column, value)| q.eq(column, value));
        query.order = Some((mapping.order_column.to_string(), Order::Desc));
        query
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order = Some((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{}", value)))
            .collect();

        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        if let Some((column, order)) = &self.order {
            params.push(("order".to_string(), format!("{}.{}", column, order)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}
