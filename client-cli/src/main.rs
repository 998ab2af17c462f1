mod command;
mod csvql_cli;
mod export;
mod input_assembler;
mod options_file;
mod table_print;
mod utils;
mod variables;

use crate::csvql_cli::{print_error, CsvqlCli};
use crate::table_print::TablePrint;
use clap::Parser;
use db::CsvQl;
use shared::logger::{logger, CsvqlLayer, Logger};
use shared::{start_csvql_options_builder_from, CsvqlError, CsvqlOptions};
use std::process::exit;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "csvql", version, about = "Runs SELECT statements over a directory of CSV files")]
struct Args {
    /// Directory that contains the <table>.csv files
    base_path: Option<String>,

    /// JSON options file. It is created with the default options if it doesn't exist
    #[arg(long)]
    options: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Run a single statement, print its result and exit
    #[arg(short, long)]
    execute: Option<String>,
}

fn main() {
    let args = Args::parse();

    let options = match build_options(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("{}", error);
            exit(1);
        }
    };
    Logger::init(&options);
    logger().debug(CsvqlLayer::Cli, &format!("Starting with options {:?}", options));

    let csvql = match CsvQl::create(options.clone()) {
        Ok(csvql) => csvql,
        Err(error) => {
            eprintln!("{}", error);
            exit(1);
        }
    };

    if let Some(query) = &args.execute {
        exit(execute_one_statement(&csvql, query));
    }

    let mut cli = match CsvqlCli::create(csvql, options) {
        Ok(cli) => cli,
        Err(error) => {
            eprintln!("{}", error);
            exit(1);
        }
    };
    if let Err(error) = cli.start() {
        eprintln!("Cannot read input: {}", error);
        exit(1);
    }
}

//Command line arguments take precedence over the options file
fn build_options(args: &Args) -> Result<CsvqlOptions, CsvqlError> {
    let options = match &args.options {
        Some(options_path) => options_file::load_options(options_path)?,
        None => CsvqlOptions::default(),
    };

    let mut builder = start_csvql_options_builder_from(&options);
    if let Some(base_path) = &args.base_path {
        builder.base_path(base_path);
    }
    if args.debug {
        builder.use_debug_logging(true);
    }

    Ok(builder.build())
}

//Returns the process exit code
fn execute_one_statement(csvql: &CsvQl, query: &str) -> i32 {
    let start = Instant::now();

    match csvql.execute(query) {
        Ok(result) => {
            TablePrint::from_result(&result.header, &result.rows).print(start.elapsed());
            0
        },
        Err(error) => {
            print_error(&error);
            1
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{build_options, execute_one_statement, Args};
    use clap::Parser;
    use db::CsvQl;
    use shared::{start_csvql_options_builder, CsvqlOptions};
    use std::fs;

    #[test]
    fn arguments_override_options_file() {
        let directory = tempfile::tempdir().unwrap();
        let options_path = directory.path().join("options.json");
        fs::write(&options_path, r#"{"base_path": "/from/file", "prompt": "sql> "}"#).unwrap();

        let args = Args::parse_from(["csvql", "/from/args", "--options", options_path.to_str().unwrap(), "--debug"]);
        let options = build_options(&args).unwrap();

        assert_eq!(options.base_path, "/from/args");
        assert_eq!(options.prompt, "sql> ");
        assert!(options.use_debug_logging);
    }

    #[test]
    fn defaults_without_arguments() {
        let args = Args::parse_from(["csvql"]);

        assert_eq!(build_options(&args).unwrap(), CsvqlOptions::default());
        assert_eq!(args.execute, None);
    }

    #[test]
    fn one_statement_exit_code() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join("employees.csv"), "id,name\n1,Alice\n").unwrap();
        let csvql = CsvQl::create(start_csvql_options_builder()
            .base_path(directory.path().to_str().unwrap())
            .build()).unwrap();

        assert_eq!(execute_one_statement(&csvql, "SELECT name FROM employees"), 0);
        assert_eq!(execute_one_statement(&csvql, "SELECT name FROM departments"), 1);
        assert_eq!(execute_one_statement(&csvql, "SELECT FROM employees"), 1);
    }
}
