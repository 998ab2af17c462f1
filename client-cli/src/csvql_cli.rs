use crate::command::{Command, VariableCommand};
use crate::export::export_result;
use crate::input_assembler::InputAssembler;
use crate::table_print::TablePrint;
use crate::utils::list_tables;
use crate::variables::VariableStore;
use db::{CsvQl, QueryResult};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use shared::logger::{logger, CsvqlLayer};
use shared::{CsvqlError, CsvqlOptions};
use std::time::Instant;

const CONTINUATION_PROMPT: &str = "> ";

pub struct CsvqlCli {
    csvql: CsvQl,
    options: CsvqlOptions,
    variables: VariableStore,
    input_assembler: InputAssembler,

    //Last successful result. Used by export
    last_result: Option<QueryResult>,
}

impl CsvqlCli {
    pub fn create(
        csvql: CsvQl,
        options: CsvqlOptions,
    ) -> Result<CsvqlCli, CsvqlError> {
        Ok(CsvqlCli {
            variables: VariableStore::load(&options.variables_file_path)?,
            input_assembler: InputAssembler::create(),
            last_result: None,
            options,
            csvql,
        })
    }

    pub fn start(&mut self) -> Result<(), ReadlineError> {
        let mut editor = DefaultEditor::new()?;
        if editor.load_history(&self.options.history_file_path).is_err() {
            logger().debug(CsvqlLayer::Cli, "No history file found");
        }

        println!("Reading tables from {}. Type help to list the commands", self.options.base_path);

        loop {
            let prompt = if self.input_assembler.is_pending() {
                CONTINUATION_PROMPT
            } else {
                self.options.prompt.as_str()
            };

            match editor.readline(prompt) {
                Ok(line) => {
                    if !self.handle_line(&mut editor, &line)? {
                        break;
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    self.input_assembler.clear();
                },
                Err(ReadlineError::Eof) => break,
                Err(error) => return Err(error),
            }
        }

        self.save_history(&mut editor);
        println!("Bye");
        Ok(())
    }

    //Returns false when the REPL must stop
    fn handle_line(&mut self, editor: &mut DefaultEditor, line: &str) -> Result<bool, ReadlineError> {
        //Built-in commands are only recognized outside a multi-line statement
        let command = if self.input_assembler.is_pending() {
            None
        } else {
            match Command::parse(line) {
                Command::Statement(_) => None,
                command => Some(command),
            }
        };

        if let Some(command) = command {
            return self.run_command(editor, command);
        }

        match self.input_assembler.add_line(line) {
            Some(statement) if !statement.is_empty() => {
                if self.statement_command(&statement) {
                    editor.add_history_entry(statement.as_str())?;
                }
            },
            _ => {}
        }

        Ok(true)
    }

    fn run_command(&mut self, editor: &mut DefaultEditor, command: Command) -> Result<bool, ReadlineError> {
        match command {
            Command::Exit => return Ok(false),
            Command::Help => self.help_command(),
            Command::Clear => editor.clear_screen()?,
            Command::Tables => self.tables_command(),
            Command::History => self.history_command(editor),
            Command::ClearHistory => {
                editor.clear_history()?;
                self.save_history(editor);
                println!("History cleared");
            },
            Command::Export(file_path) => self.export_command(&file_path),
            Command::Variable(variable_command) => self.variable_command(variable_command),
            Command::InvalidUsage(usage) => println!("{}", usage),
            Command::Statement(statement) => {
                self.statement_command(&statement);
            },
        };

        Ok(true)
    }

    //Returns true if the statement ran successfully
    fn statement_command(&mut self, statement: &str) -> bool {
        let start = Instant::now();

        match self.csvql.execute(statement) {
            Ok(result) => {
                let elapsed = start.elapsed();
                TablePrint::from_result(&result.header, &result.rows).print(elapsed);
                self.last_result = Some(result);
                true
            },
            Err(error) => {
                print_error(&error);
                false
            }
        }
    }

    fn tables_command(&self) {
        let start = Instant::now();
        match list_tables(&self.options.base_path) {
            Ok(tables) => {
                let rows: Vec<Vec<String>> = tables.into_iter().map(|table| vec![table]).collect();
                TablePrint::from_result(&[String::from("Tables")], &rows).print(start.elapsed());
            },
            Err(error) => print_error(&error),
        }
    }

    fn history_command(&self, editor: &DefaultEditor) {
        for (index, entry) in editor.history().iter().enumerate() {
            println!("{:>4}  {}", index + 1, entry);
        }
    }

    fn export_command(&self, file_path: &str) {
        let result = match &self.last_result {
            Some(result) => result,
            None => {
                println!("There is no result to export. Run a statement first");
                return;
            }
        };

        match export_result(&self.options.base_path, file_path, result) {
            Ok(path) => println!("Exported {} rows to {}", result.rows.len(), path),
            Err(error) => print_error(&error),
        }
    }

    fn variable_command(&mut self, variable_command: VariableCommand) {
        let outcome = match variable_command {
            VariableCommand::Set(name, value) => self.variables.set(&name, &value)
                .map(|_| format!("{} = {}", name, value)),
            VariableCommand::Get(name) => Ok(match self.variables.get(&name) {
                Some(value) => value.clone(),
                None => format!("Variable {} is not defined", name),
            }),
            VariableCommand::Unset(name) => self.variables.unset(&name)
                .map(|removed| if removed {
                    format!("Variable {} removed", name)
                } else {
                    format!("Variable {} is not defined", name)
                }),
            VariableCommand::List => Ok(self.variables.list().iter()
                .map(|(name, value)| format!("{} = {}", name, value))
                .collect::<Vec<String>>()
                .join("\n")),
        };

        match outcome {
            Ok(message) if message.is_empty() => println!("No variables defined"),
            Ok(message) => println!("{}", message),
            Err(error) => print_error(&error),
        }
    }

    fn help_command(&self) {
        println!("Commands:");
        println!("  exit                     Save the history and quit");
        println!("  help                     Show this message");
        println!("  clear                    Clear the screen");
        println!("  tables                   List the tables of {}", self.options.base_path);
        println!("  history [-d]             Show the statement history. -d clears it");
        println!("  export <file>            Write the last result as CSV");
        println!("  variable <name>=<value>  Set a variable. -g <name> gets it, -u <name> removes it, -l lists them");
        println!("  <statement>              SELECT <columns> FROM <table> [JOIN <table> ON <a.x = b.y>] [WHERE ..] [GROUP BY ..] [ORDER BY ..] [LIMIT n]");
        println!("End a line with \\ to continue the statement in the next line");
    }

    fn save_history(&self, editor: &mut DefaultEditor) {
        if let Err(error) = editor.save_history(&self.options.history_file_path) {
            logger().warn(CsvqlLayer::Cli, &format!(
                "Cannot save history to {}: {}", self.options.history_file_path, error
            ));
        }
    }
}

pub fn print_error(error: &CsvqlError) {
    logger().debug(CsvqlLayer::Cli, &format!("Statement failed: {}", error));
    println!("Error: {}", error);
}
