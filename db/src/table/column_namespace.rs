use shared::CsvqlError;
use std::collections::HashMap;

//Maps column names to absolute positions inside a row. Joined namespaces keep the left
//columns first and offset the right ones by the width of the left side
#[derive(Clone, Debug)]
pub struct ColumnNamespace {
    header: Vec<String>,
    //Table that owns each position
    column_tables: Vec<String>,
    //Field name -> every position with that name, across all tables
    global: HashMap<String, Vec<usize>>,
    //Table name -> field name -> position
    tables: HashMap<String, HashMap<String, usize>>,
}

impl ColumnNamespace {
    pub fn empty() -> ColumnNamespace {
        ColumnNamespace {
            header: Vec::new(),
            column_tables: Vec::new(),
            global: HashMap::new(),
            tables: HashMap::new(),
        }
    }

    pub fn create_for_table(table_name: &str, header: &[String]) -> ColumnNamespace {
        let mut namespace = ColumnNamespace::empty();
        for field_name in header {
            namespace.add_column(table_name, field_name);
        }
        namespace
    }

    pub fn join(&self, right: &ColumnNamespace) -> ColumnNamespace {
        let mut namespace = self.clone();
        for (field_name, table_name) in right.header.iter().zip(right.column_tables.iter()) {
            namespace.add_column(table_name, field_name);
        }
        namespace
    }

    fn add_column(&mut self, table_name: &str, field_name: &str) {
        let position = self.header.len();

        self.header.push(field_name.to_string());
        self.column_tables.push(table_name.to_string());
        self.global.entry(field_name.to_string())
            .or_default()
            .push(position);
        //The same table joined twice keeps the first occurrence for qualified lookups
        self.tables.entry(table_name.to_string())
            .or_default()
            .entry(field_name.to_string())
            .or_insert(position);
    }

    //Bare reference. Fails when the name is missing or exists in more than one column
    pub fn resolve(&self, field_name: &str) -> Result<usize, CsvqlError> {
        match self.global.get(field_name).map(|positions| positions.as_slice()) {
            None | Some([]) => Err(CsvqlError::UnknownColumn(field_name.to_string())),
            Some([position]) => Ok(*position),
            Some(positions) => {
                let mut tables: Vec<String> = Vec::new();
                for position in positions {
                    let table_name = &self.column_tables[*position];
                    if !tables.contains(table_name) {
                        tables.push(table_name.clone());
                    }
                }
                Err(CsvqlError::AmbiguousColumn(field_name.to_string(), tables))
            }
        }
    }

    //table.field reference
    pub fn resolve_qualified(&self, table_name: &str, field_name: &str) -> Result<usize, CsvqlError> {
        self.tables.get(table_name)
            .and_then(|fields| fields.get(field_name))
            .copied()
            .ok_or_else(|| CsvqlError::UnknownColumn(format!("{}.{}", table_name, field_name)))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }
}

#[cfg(test)]
mod test {
    use crate::table::column_namespace::ColumnNamespace;
    use shared::CsvqlError;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn single_table() {
        let namespace = ColumnNamespace::create_for_table("employees", &header(&["id", "name", "salary"]));

        assert_eq!(namespace.resolve("salary").unwrap(), 2);
        assert_eq!(namespace.resolve_qualified("employees", "name").unwrap(), 1);
        assert!(matches!(namespace.resolve("age"), Err(CsvqlError::UnknownColumn(name)) if name == "age"));
        assert!(matches!(namespace.resolve_qualified("department", "id"), Err(CsvqlError::UnknownColumn(name)) if name == "department.id"));
    }

    #[test]
    fn joined_positions_are_offset() {
        let employees = ColumnNamespace::create_for_table("employees", &header(&["id", "dept_id"]));
        let department = ColumnNamespace::create_for_table("department", &header(&["dept_id", "dept_name"]));

        let joined = employees.join(&department);

        assert_eq!(joined.width(), 4);
        assert_eq!(joined.header(), &header(&["id", "dept_id", "dept_id", "dept_name"])[..]);
        assert_eq!(joined.resolve("dept_name").unwrap(), 3);
        assert_eq!(joined.resolve_qualified("employees", "dept_id").unwrap(), 1);
        assert_eq!(joined.resolve_qualified("department", "dept_id").unwrap(), 2);
    }

    #[test]
    fn ambiguous_reference_names_tables() {
        let employees = ColumnNamespace::create_for_table("employees", &header(&["id", "dept_id"]));
        let department = ColumnNamespace::create_for_table("department", &header(&["dept_id", "dept_name"]));

        let error = employees.join(&department).resolve("dept_id").unwrap_err();

        assert_eq!(error.to_string(), "Column reference \"dept_id\" is ambiguous. It exists in tables: employees, department");
    }
}
