use std::fmt;
use std::fmt::Formatter;

//One line of a table, or the concatenation of the lines of several joined tables.
//Every cell is kept as text; see Value::from_cell for coercion
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    values: Vec<String>,
}

impl Row {
    pub fn create(values: Vec<String>) -> Row {
        Row { values }
    }

    //Short records are padded with empty strings, longer ones are cut, so positions
    //computed from the header stay valid
    pub fn create_with_width(mut values: Vec<String>, width: usize) -> Row {
        values.resize(width, String::new());
        Row { values }
    }

    //A missing field reads as an empty string
    pub fn get(&self, position: usize) -> &str {
        self.values.get(position)
            .map(|value| value.as_str())
            .unwrap_or("")
    }

    pub fn width(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn concat(&self, other: &Row) -> Row {
        let mut values = Vec::with_capacity(self.values.len() + other.values.len());
        values.extend_from_slice(&self.values);
        values.extend_from_slice(&other.values);
        Row { values }
    }

    pub fn push(&mut self, value: String) {
        self.values.push(value);
    }

    pub fn project(&self, positions: &[usize]) -> Row {
        Row {
            values: positions.iter()
                .map(|position| self.get(*position).to_string())
                .collect()
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Row [{}]", self.values.join(", "))
    }
}
