#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    Help,
    Clear,
    Tables,
    History,
    ClearHistory,
    Export(String), //File path
    Variable(VariableCommand),
    //Built-in command with wrong arguments. Holds the usage text
    InvalidUsage(&'static str),
    Statement(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariableCommand {
    Set(String, String), //Name, value
    Get(String),
    Unset(String),
    List,
}

pub const EXPORT_USAGE: &str = "Usage: export <file>";
pub const HISTORY_USAGE: &str = "Usage: history [-d]";
pub const VARIABLE_USAGE: &str = "Usage: variable <name>=<value> | variable -g <name> | variable -u <name> | variable -l";

impl Command {
    //Anything that is not a built-in command is a statement
    pub fn parse(input: &str) -> Command {
        let input = input.trim();
        let (name, arguments) = match input.split_once(char::is_whitespace) {
            Some((name, arguments)) => (name, arguments.trim()),
            None => (input, ""),
        };

        match (name, arguments) {
            ("exit", "") => Command::Exit,
            ("help", "") => Command::Help,
            ("clear", "") => Command::Clear,
            ("tables", "") => Command::Tables,
            ("history", "") => Command::History,
            ("history", "-d") => Command::ClearHistory,
            ("history", _) => Command::InvalidUsage(HISTORY_USAGE),
            ("export", "") => Command::InvalidUsage(EXPORT_USAGE),
            ("export", file_path) => Command::Export(file_path.to_string()),
            ("variable", arguments) => Self::parse_variable(arguments),
            _ => Command::Statement(input.to_string()),
        }
    }

    fn parse_variable(arguments: &str) -> Command {
        let (flag, name) = match arguments.split_once(char::is_whitespace) {
            Some((flag, name)) => (flag, name.trim()),
            None => (arguments, ""),
        };

        let variable_command = match (flag, name) {
            ("-l", "") => VariableCommand::List,
            ("-g", name) if !name.is_empty() => VariableCommand::Get(name.to_string()),
            ("-u", name) if !name.is_empty() => VariableCommand::Unset(name.to_string()),
            _ => match arguments.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() => {
                    VariableCommand::Set(name.trim().to_string(), value.trim().to_string())
                },
                _ => return Command::InvalidUsage(VARIABLE_USAGE),
            }
        };

        Command::Variable(variable_command)
    }
}

#[cfg(test)]
mod test {
    use crate::command::{Command, VariableCommand, EXPORT_USAGE, HISTORY_USAGE, VARIABLE_USAGE};

    #[test]
    fn builtin_commands() {
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("  help  "), Command::Help);
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("tables"), Command::Tables);
        assert_eq!(Command::parse("history"), Command::History);
        assert_eq!(Command::parse("history -d"), Command::ClearHistory);
        assert_eq!(Command::parse("history 3"), Command::InvalidUsage(HISTORY_USAGE));
    }

    #[test]
    fn export() {
        assert_eq!(Command::parse("export out.csv"), Command::Export(String::from("out.csv")));
        assert_eq!(Command::parse("export"), Command::InvalidUsage(EXPORT_USAGE));
    }

    #[test]
    fn variables() {
        assert_eq!(Command::parse("variable dept = eng"), Command::Variable(VariableCommand::Set(String::from("dept"), String::from("eng"))));
        assert_eq!(Command::parse("variable url=a=b"), Command::Variable(VariableCommand::Set(String::from("url"), String::from("a=b"))));
        assert_eq!(Command::parse("variable -g dept"), Command::Variable(VariableCommand::Get(String::from("dept"))));
        assert_eq!(Command::parse("variable -u dept"), Command::Variable(VariableCommand::Unset(String::from("dept"))));
        assert_eq!(Command::parse("variable -l"), Command::Variable(VariableCommand::List));
        assert_eq!(Command::parse("variable -g"), Command::InvalidUsage(VARIABLE_USAGE));
        assert_eq!(Command::parse("variable =eng"), Command::InvalidUsage(VARIABLE_USAGE));
        assert_eq!(Command::parse("variable"), Command::InvalidUsage(VARIABLE_USAGE));
    }

    #[test]
    fn everything_else_is_a_statement() {
        assert_eq!(Command::parse("SELECT * FROM exit"), Command::Statement(String::from("SELECT * FROM exit")));
        assert_eq!(Command::parse("EXIT"), Command::Statement(String::from("EXIT")));
        assert_eq!(Command::parse("exit now"), Command::Statement(String::from("exit now")));
    }
}
