use std::cmp::max;
use std::time::Duration;
use crate::utils::duration_to_string;

//Bordered text table. The first column numbers the rows starting from 1
pub struct TablePrint {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    columns_width: Vec<usize>,

    n_columns: usize,
}

impl TablePrint {
    pub fn create(n_columns: usize) -> TablePrint {
        let mut table = TablePrint {
            header: Vec::new(),
            rows: Vec::new(),
            columns_width: vec![0; n_columns + 1],
            n_columns: n_columns + 1,
        };
        table.add_header("#");
        table
    }

    pub fn from_result(header: &[String], rows: &[Vec<String>]) -> TablePrint {
        let mut table = TablePrint::create(header.len());
        for column_name in header {
            table.add_header(column_name);
        }
        for row in rows {
            table.add_row(row);
        }
        table
    }

    pub fn add_header(&mut self, header: &str) {
        let column_index = self.header.len();
        self.header.push(header.to_string());

        self.columns_width[column_index] = max(self.columns_width[column_index], text_width(header));
    }

    //Missing values are shown as empty cells, extra values are ignored
    pub fn add_row(&mut self, values: &[String]) {
        let mut row = Vec::with_capacity(self.n_columns);
        row.push((self.rows.len() + 1).to_string());
        for column_index in 1..self.n_columns {
            row.push(values.get(column_index - 1).cloned().unwrap_or_default());
        }

        for (column_index, cell) in row.iter().enumerate() {
            self.columns_width[column_index] = max(self.columns_width[column_index], text_width(cell));
        }

        self.rows.push(row);
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        self.render_horizontal_line(&mut output);
        self.render_row(&mut output, &self.header);
        self.render_horizontal_line(&mut output);
        for row in &self.rows {
            self.render_row(&mut output, row);
        }
        if !self.rows.is_empty() {
            self.render_horizontal_line(&mut output);
        }

        output
    }

    pub fn print(&self, elapsed: Duration) {
        print!("{}", self.render());
        println!("{}", self.resume(elapsed));
    }

    pub fn resume(&self, elapsed: Duration) -> String {
        format!("({} rows returned. Executed in {})", self.rows.len(), duration_to_string(elapsed))
    }

    fn render_row(&self, output: &mut String, row: &[String]) {
        output.push('|');
        for (column_index, cell) in row.iter().enumerate() {
            let padding = self.columns_width[column_index] - text_width(cell);
            output.push(' ');
            output.push_str(cell);
            output.push_str(&" ".repeat(padding));
            output.push_str(" |");
        }
        output.push('\n');
    }

    fn render_horizontal_line(&self, output: &mut String) {
        output.push('+');
        for column_width in &self.columns_width {
            output.push_str(&"-".repeat(column_width + 2));
            output.push('+');
        }
        output.push('\n');
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}
