//! # Commands
//!
//! One module per screen of the application.
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── Context + dispatch
//! ├── dashboard.rs  ◄─── Counts and sales figures
//! ├── employee.rs   ◄─── List / add employees
//! ├── product.rs    ◄─── List / add / edit / delete products
//! └── invoice.rs    ◄─── List / show / create invoices
//! ```
//!
//! Every command takes the shared [`Context`], returns the text to print on
//! stdout, and fails with an [`AppError`]. Nothing is printed from inside a
//! command.

pub mod dashboard;
pub mod employee;
pub mod invoice;
pub mod product;

use nimbus_db::Database;

use crate::cli::{Command, OutputFormat};
use crate::config::AppConfig;
use crate::error::AppError;

/// What every command needs: storage, configuration and the output format.
pub struct Context {
    pub db: Database,
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(db: Database, config: AppConfig, format: OutputFormat) -> Self {
        Context { db, config, format }
    }

    pub(crate) fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Runs one command and returns its output.
pub async fn execute(ctx: &Context, command: Command) -> Result<String, AppError> {
    match command {
        Command::Dashboard => dashboard::show(ctx).await,
        Command::Employees(cmd) => employee::run(ctx, cmd).await,
        Command::Products(cmd) => product::run(ctx, cmd).await,
        Command::Invoices(cmd) => invoice::run(ctx, cmd).await,
    }
}

/// Trims and length-checks an optional `--search` value; blank means none.
pub(crate) fn search_filter(search: Option<String>) -> Result<Option<String>, AppError> {
    match search {
        Some(q) => {
            let q = nimbus_core::validation::validate_search_query(&q)?;
            Ok(if q.is_empty() { None } else { Some(q) })
        }
        None => Ok(None),
    }
}
