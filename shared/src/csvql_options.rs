use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CsvqlOptions {
    pub base_path: String, //Directory that contains the <table>.csv files
    pub history_file_path: String,
    pub variables_file_path: String,
    pub use_debug_logging: bool,
    pub prompt: String,
}

impl Default for CsvqlOptions {
    fn default() -> Self {
        CsvqlOptions {
            base_path: String::from("."),
            history_file_path: String::from("/tmp/csvql_history"),
            variables_file_path: String::from("/tmp/csvql_variables.json"),
            use_debug_logging: false,
            prompt: String::from("csvql> "),
        }
    }
}

pub fn start_csvql_options_builder() -> CsvqlOptionsBuilder {
    CsvqlOptionsBuilder {
        options: CsvqlOptions::default()
    }
}

pub fn start_csvql_options_builder_from(options: &CsvqlOptions) -> CsvqlOptionsBuilder {
    CsvqlOptionsBuilder {
        options: options.clone()
    }
}

pub struct CsvqlOptionsBuilder {
    options: CsvqlOptions,
}

impl CsvqlOptionsBuilder {
    pub fn base_path(&mut self, value: &str) -> &mut CsvqlOptionsBuilder {
        self.options.base_path = value.to_string();
        self
    }

    pub fn history_file_path(&mut self, value: &str) -> &mut CsvqlOptionsBuilder {
        self.options.history_file_path = value.to_string();
        self
    }

    pub fn variables_file_path(&mut self, value: &str) -> &mut CsvqlOptionsBuilder {
        self.options.variables_file_path = value.to_string();
        self
    }

    pub fn use_debug_logging(&mut self, value: bool) -> &mut CsvqlOptionsBuilder {
        self.options.use_debug_logging = value;
        self
    }

    pub fn prompt(&mut self, value: &str) -> &mut CsvqlOptionsBuilder {
        self.options.prompt = value.to_string();
        self
    }

    pub fn build(&self) -> CsvqlOptions {
        self.options.clone()
    }
}
