/* src/server/engine/rust/src/trim.rs */

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::ParseOptions;

fn tag_open_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\{%-?").unwrap())
}

fn tag_close_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"-?%\}").unwrap())
}

fn output_open_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\{\{-?").unwrap())
}

fn output_close_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"-?\}\}").unwrap())
}

fn rewrite<'a>(source: Cow<'a, str>, re: &Regex, with: &str) -> Cow<'a, str> {
  let rewritten = match re.replace_all(&source, with) {
    Cow::Borrowed(_) => None,
    Cow::Owned(rewritten) => Some(rewritten),
  };
  rewritten.map_or(source, Cow::Owned)
}

/// Apply the configured trims by adding whitespace-control markers to every
/// delimiter on the trimmed side. Existing markers are kept as they are.
pub(crate) fn apply_trims<'a>(source: &'a str, options: &ParseOptions) -> Cow<'a, str> {
  let mut out = Cow::Borrowed(source);
  if options.trim_tag_left {
    out = rewrite(out, tag_open_re(), "{%-");
  }
  if options.trim_tag_right {
    out = rewrite(out, tag_close_re(), "-%}");
  }
  if options.trim_output_left {
    out = rewrite(out, output_open_re(), "{{-");
  }
  if options.trim_output_right {
    out = rewrite(out, output_close_re(), "-}}");
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tags_both() -> ParseOptions {
    ParseOptions { trim_tag_left: true, trim_tag_right: true, ..Default::default() }
  }

  #[test]
  fn no_trims_borrow_source() {
    let out = apply_trims("{% if a %}{{ b }}{% endif %}", &ParseOptions::default());
    assert!(matches!(out, Cow::Borrowed(_)));
  }

  #[test]
  fn tag_trims_mark_every_tag() {
    let out = apply_trims("{% if a %}{{ b }}{%- endif %}", &tags_both());
    assert_eq!(out, "{%- if a -%}{{ b }}{%- endif -%}");
  }

  #[test]
  fn output_trims_leave_tags_alone() {
    let options = ParseOptions { trim_output_left: true, ..Default::default() };
    assert_eq!(apply_trims("{% x %}{{ y -}}", &options), "{% x %}{{- y -}}");
  }
}
