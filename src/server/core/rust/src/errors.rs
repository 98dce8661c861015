/* src/server/core/rust/src/errors.rs */

use std::fmt;

use pagewright_engine::EngineError;

pub const TEMPLATE_SYNTAX: &str = "TEMPLATE_SYNTAX";
pub const STRICT_MODE: &str = "STRICT_MODE";
pub const EXTENSION_FAILED: &str = "EXTENSION_FAILED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// A failed page render. Carries the HTTP status the adapter responds with.
#[derive(Debug)]
pub struct PageError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    NOT_FOUND => 404,
    EXTENSION_FAILED => 502,
    _ => 500,
  }
}

impl PageError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code(NOT_FOUND, msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code(INTERNAL_ERROR, msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

impl fmt::Display for PageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for PageError {}

impl From<EngineError> for PageError {
  fn from(err: EngineError) -> Self {
    let code = match &err {
      EngineError::Syntax(_) => TEMPLATE_SYNTAX,
      EngineError::UndefinedVariable(_) | EngineError::UndefinedFilter(_) => STRICT_MODE,
      EngineError::Tag { .. } | EngineError::Filter { .. } => EXTENSION_FAILED,
      EngineError::Render(_)
      | EngineError::DuplicateExtension { .. }
      | EngineError::ReservedTag(_) => INTERNAL_ERROR,
    };
    Self::with_code(code, err.to_string())
  }
}
