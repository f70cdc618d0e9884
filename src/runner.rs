use std::io::{self, Write};

use log::{debug, info};

use crate::ast::{Expr, ExprId, Stmt};
use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::scan_tokens;
use crate::value::Value;

/// Every diagnostic produced by the phase that stopped a unit.
pub type Diagnostics = Vec<LoxError>;

/// A session: one interpreter fed any number of source units (a script, or
/// REPL lines).  Globals, closures and classes persist between units.
///
/// Each unit goes scan → parse → resolve → execute and is not executed if
/// scanning, parsing or resolving reported anything.
pub struct Lox<W: Write = io::Stdout> {
    interpreter: Interpreter<W>,
    next_id: ExprId,
}

impl Lox<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Lox<W> {
    pub fn new(out: W) -> Self {
        Self {
            interpreter: Interpreter::new(out),
            next_id: 0,
        }
    }

    /// Where `print` statements have written so far.
    pub fn output(&self) -> &W {
        self.interpreter.output()
    }

    /// Run a whole program.
    pub fn run(&mut self, source: &str) -> Result<(), Diagnostics> {
        info!("Running unit of {} bytes", source.len());

        let statements: Vec<Stmt> = self.compile(source)?;

        self.interpreter
            .interpret(&statements)
            .map_err(|e| vec![e])
    }

    /// Evaluate `source` as a single expression.
    pub fn evaluate(&mut self, source: &str) -> Result<Value, Diagnostics> {
        let (tokens, lex_errors) = scan_tokens(source);
        let mut parser = Parser::new(tokens).with_first_id(self.next_id);
        let parsed = parser.parse_expression();
        self.next_id = parser.next_id();

        let expr: Expr = match parsed {
            Ok(expr) if lex_errors.is_empty() => expr,
            Ok(_) => return Err(lex_errors),
            Err(parse_errors) => return Err(concat(lex_errors, parse_errors)),
        };

        self.evaluate_expr(&expr)
    }

    /// One REPL line: a bare expression is evaluated and its value handed
    /// back for echoing (assignments excepted); anything else runs as a
    /// program.
    pub fn run_line(&mut self, source: &str) -> Result<Option<Value>, Diagnostics> {
        let (tokens, lex_errors) = scan_tokens(source);

        if lex_errors.is_empty() {
            let mut parser = Parser::new(tokens).with_first_id(self.next_id);

            if let Ok(expr) = parser.parse_expression() {
                self.next_id = parser.next_id();
                debug!("REPL line is a bare expression");

                let value = self.evaluate_expr(&expr)?;
                let echo = !matches!(expr, Expr::Assign { .. } | Expr::Set { .. });

                return Ok(echo.then_some(value));
            }
        }

        self.run(source).map(|()| None)
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, Diagnostics> {
        let resolutions = Resolver::new().resolve_expression(expr)?;
        self.interpreter.resolve(resolutions);

        self.interpreter.evaluate(expr).map_err(|e| vec![e])
    }

    /// Scan, parse and resolve a unit; the statements are returned only if
    /// all three phases were clean.
    fn compile(&mut self, source: &str) -> Result<Vec<Stmt>, Diagnostics> {
        let (tokens, lex_errors) = scan_tokens(source);

        // Parse even after lexical errors so both kinds surface in one pass.
        let mut parser = Parser::new(tokens).with_first_id(self.next_id);
        let parsed = parser.parse();
        self.next_id = parser.next_id();

        let statements: Vec<Stmt> = match parsed {
            Ok(statements) if lex_errors.is_empty() => statements,
            Ok(_) => return Err(lex_errors),
            Err(parse_errors) => return Err(concat(lex_errors, parse_errors)),
        };

        let resolutions = Resolver::new().resolve(&statements)?;
        self.interpreter.resolve(resolutions);

        Ok(statements)
    }
}

fn concat(mut first: Diagnostics, second: Diagnostics) -> Diagnostics {
    first.extend(second);
    first
}
