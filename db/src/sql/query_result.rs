//Ordered header followed by the data rows. Every value is text
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
