use crate::CsvqlOptions;
use env_logger::Builder;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

pub enum CsvqlLayer {
    Lexer,
    Parser,
    Execution(String), //Table name
    Cli,
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    use_debug_logging: AtomicBool,
}

//Can be called before Logger::init(). Messages are dropped until a backend is installed
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger { use_debug_logging: AtomicBool::new(false) })
}

impl Logger {
    pub fn init(options: &CsvqlOptions) {
        logger().use_debug_logging.store(options.use_debug_logging, Ordering::Relaxed);

        let mut builder = Builder::new();
        builder.filter_level(if options.use_debug_logging {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        });
        //Only the first call installs the backend
        let _ = builder.try_init();
    }

    pub fn info(&self, layer: CsvqlLayer, message: &str) {
        info!("[{}] {}", layer.to_string(), message);
    }

    pub fn warn(&self, layer: CsvqlLayer, message: &str) {
        warn!("[{}] {}", layer.to_string(), message);
    }

    pub fn error(&self, layer: CsvqlLayer, message: &str) {
        error!("[{}] {}", layer.to_string(), message);
    }

    pub fn debug(&self, layer: CsvqlLayer, message: &str) {
        if self.use_debug_logging.load(Ordering::Relaxed) {
            debug!("[{}] {}", layer.to_string(), message);
        }
    }
}

impl CsvqlLayer {
    pub fn to_string(&self) -> String {
        match self {
            CsvqlLayer::Lexer => "Lexer".to_string(),
            CsvqlLayer::Parser => "Parser".to_string(),
            CsvqlLayer::Execution(table_name) => format!("Execution Table: {}", table_name),
            CsvqlLayer::Cli => "Cli".to_string(),
        }
    }
}
