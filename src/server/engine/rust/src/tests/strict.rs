/* src/server/engine/rust/src/tests/strict.rs */

use super::*;

#[tokio::test]
async fn undefined_variables_are_rejected() {
  let err = render_with(&engine(), "<p>{{ missing }}</p>", &json!({})).await.unwrap_err();
  assert!(matches!(err, EngineError::UndefinedVariable(_)));
  assert!(err.is_strict_violation());
}

#[tokio::test]
async fn missing_properties_are_rejected() {
  let err = render_with(&engine(), "{{ user.name }}", &json!({"user": {}})).await.unwrap_err();
  assert!(matches!(err, EngineError::UndefinedVariable(_)));
}

#[tokio::test]
async fn null_values_are_defined() {
  assert_eq!(render("[{{ v }}]", &json!({"v": null})).await, "[]");
}

#[tokio::test]
async fn loop_bindings_are_defined() {
  let ctx = json!({"xs": ["a"]});
  assert_eq!(render("{% for x in xs %}{{ forloop.index }}{{ x }}{% endfor %}", &ctx).await, "1a");
}

#[test]
fn unknown_filters_are_rejected_at_parse() {
  let err = engine().parse("{{ name | shout }}").unwrap_err();
  assert!(matches!(err, EngineError::UndefinedFilter(_)));
  assert!(err.is_strict_violation());
}

#[tokio::test]
async fn no_partial_output_on_failure() {
  let ctx = json!({"xs": [1, 2]});
  let result = render_with(&engine(), "{% for x in xs %}{{ x }}{% endfor %}{{ nope }}", &ctx).await;
  assert!(result.is_err());
}
