pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod runner;
pub mod scanner;
pub mod stack;
pub mod token;
pub mod value;

pub use error::{LoxError, Result};
pub use interpreter::Interpreter;
pub use runner::Lox;
pub use value::Value;

/// Name under which a method's receiver is bound.
pub const THIS_NAME: &str = "это";

/// Name under which a subclass method's superclass is bound.
pub const SUPER_NAME: &str = "супер";

/// Method run automatically when a class is called.
pub const INITIALIZER_NAME: &str = "init";
