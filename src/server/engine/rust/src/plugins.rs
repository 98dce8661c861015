/* src/server/engine/rust/src/plugins.rs */

use std::fmt;
use std::io::Write;

use liquid_core::parser::{FilterArguments, ParameterReflection};
use liquid_core::{
  Error, Expression, Filter, FilterReflection, Language, ParseFilter, ParseTag, Renderable, Result,
  Runtime, TagReflection, TagTokenIter, Value, ValueView,
};

use crate::error::FILTER_FAILED;
use crate::registry::FilterFn;

/// Delimits tag placeholders in rendered output. Never produced by templates.
pub(crate) const TAG_MARK: char = '\u{1A}';

pub(crate) fn placeholder(name: &str) -> String {
  format!("{TAG_MARK}{name}{TAG_MARK}")
}

/// Parses `{% name %}` into a placeholder the engine swaps for the awaited fragment.
#[derive(Debug, Clone)]
pub(crate) struct PlaceholderTag {
  name: String,
}

impl PlaceholderTag {
  pub(crate) fn new(name: &str) -> Self {
    Self { name: name.to_string() }
  }
}

impl TagReflection for PlaceholderTag {
  fn tag(&self) -> &str {
    &self.name
  }

  fn description(&self) -> &str {
    "Inline fragment resolved asynchronously after render"
  }
}

impl ParseTag for PlaceholderTag {
  fn parse(
    &self,
    mut arguments: TagTokenIter<'_>,
    _options: &Language,
  ) -> Result<Box<dyn Renderable>> {
    arguments.expect_nothing()?;
    Ok(Box::new(Placeholder { text: placeholder(&self.name) }))
  }

  fn reflection(&self) -> &dyn TagReflection {
    self
  }
}

#[derive(Debug)]
struct Placeholder {
  text: String,
}

impl Renderable for Placeholder {
  fn render_to(&self, writer: &mut dyn Write, _runtime: &dyn Runtime) -> Result<()> {
    writer
      .write_all(self.text.as_bytes())
      .map_err(|err| Error::with_msg(format!("failed to write tag placeholder: {err}")))
  }
}

/// Exposes a [`FilterFn`] to the liquid parser under `name`.
#[derive(Clone)]
pub(crate) struct FnFilter {
  name: String,
  func: FilterFn,
}

impl FnFilter {
  pub(crate) fn new(name: &str, func: FilterFn) -> Self {
    Self { name: name.to_string(), func }
  }
}

impl fmt::Debug for FnFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FnFilter").field("name", &self.name).finish_non_exhaustive()
  }
}

impl FilterReflection for FnFilter {
  fn name(&self) -> &str {
    &self.name
  }

  fn description(&self) -> &str {
    "Registered filter function"
  }

  fn positional_parameters(&self) -> &'static [ParameterReflection] {
    &[]
  }

  fn keyword_parameters(&self) -> &'static [ParameterReflection] {
    &[]
  }
}

impl ParseFilter for FnFilter {
  fn parse(&self, mut arguments: FilterArguments<'_>) -> Result<Box<dyn Filter>> {
    if arguments.keyword.next().is_some() {
      return Err(
        Error::with_msg("keyword arguments are not supported").context("filter", self.name.clone()),
      );
    }
    let args = arguments.positional.collect();
    Ok(Box::new(BoundFilter { name: self.name.clone(), func: self.func.clone(), args }))
  }

  fn reflection(&self) -> &dyn FilterReflection {
    self
  }
}

/// One filter occurrence with its argument expressions.
struct BoundFilter {
  name: String,
  func: FilterFn,
  args: Vec<Expression>,
}

impl fmt::Debug for BoundFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BoundFilter").field("name", &self.name).finish_non_exhaustive()
  }
}

impl fmt::Display for BoundFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name)
  }
}

impl Filter for BoundFilter {
  fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> Result<Value> {
    let mut args = Vec::with_capacity(self.args.len());
    for arg in &self.args {
      args.push(arg.evaluate(runtime)?.into_owned());
    }
    (self.func)(input, &args).map_err(|err| {
      Error::with_msg(FILTER_FAILED)
        .context("filter", self.name.clone())
        .context("cause", err.message().to_string())
    })
  }
}
