// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;

// ===== Construction and basic queries =====

#[test]
fn test_fresh_context_is_empty() {
    let ctx = Context::new();
    assert_eq!(ctx.get_path(), "");
    assert!(ctx.is_empty());
    assert!(ctx.children().is_empty());
}

#[test]
fn test_real_with_default() {
    let mut ctx = Context::new();
    ctx.set_path("new_path");
    assert_eq!(ctx.get_path(), "new_path");

    ctx.add("param1", 1.0);
    assert_eq!(ctx.get_or("param1", -1.0), 1.0);
    assert_eq!(ctx.get_or("param1a", -1.0), -1.0);
}

#[test]
fn test_text_with_default() {
    let mut ctx = Context::new();
    ctx.add("param2", "Chalk");

    assert_eq!(ctx.get_or("param2", "Milk".to_string()), "Chalk");
    assert_eq!(ctx.get_or("param2a", "Milk".to_string()), "Milk");
}

#[test]
fn test_intlist_with_default() {
    let mut ctx = Context::new();
    ctx.add("param3", vec![0, 1, 2]);

    assert_eq!(ctx.get_or("param3", vec![-1]), vec![0, 1, 2]);
    // the default sequence comes back whole, never a partial substitute
    assert_eq!(ctx.get_or("param3a", vec![-1]), vec![-1]);
}

#[test]
fn test_overwrite_last_wins() {
    let mut ctx = Context::new();
    ctx.add("x", 1.0);
    ctx.add("x", 2.0);

    assert_eq!(ctx.len(), 1);
    assert_eq!(ctx.get_or("x", -1.0), 2.0);

    // overwrites may also change the stored type
    ctx.add("x", "text now");
    assert_eq!(ctx.get_or("x", String::new()), "text now");
}

#[test]
fn test_type_mismatch_falls_back_to_default() {
    let mut ctx = Context::new();
    ctx.add("label", "not a number");

    assert_eq!(ctx.get_or("label", -1.0), -1.0);
    assert_eq!(ctx.get_or("label", vec![7]), vec![7]);
}

#[test]
fn test_get_optional() {
    let mut ctx = Context::new();
    ctx.add("a", 1.5);

    let present: Option<f64> = ctx.get_optional("a").expect("Failed to get a");
    assert_eq!(present, Some(1.5));

    let missing: Option<f64> = ctx.get_optional("b").expect("Missing key should be None");
    assert_eq!(missing, None);

    // a present value of the wrong type is still an error
    let mismatch: Result<Option<String>, CtxError> = ctx.get_optional("a");
    assert!(mismatch.is_err());
}

#[test]
fn test_keys_and_has_preserve_order() {
    let mut ctx = Context::new();
    ctx.add("first", 1.0);
    ctx.add("second", "2");
    ctx.add("third", vec![3]);

    assert_eq!(ctx.keys(), vec!["first", "second", "third"]);
    assert!(ctx.has("second"));
    assert!(!ctx.has("fourth"));
}

// ===== Merge and extraction =====

#[test]
fn test_merge_independence() {
    let mut other = Context::new();
    other.set_path("old_path");
    other.add("a", 1.0);

    let mut ctx = Context::new();
    ctx.set_path("new_path");
    ctx.add_context(&other);

    // mutate the source after the merge
    other.add("a", 99.0);
    other.add("b", "later");

    let merged = ctx.get_context("old_path", &Context::new());
    assert_eq!(merged.get_or("a", -1.0), 1.0);
    assert!(!merged.has("b"));
}

#[test]
fn test_extraction_copy_semantics() {
    let mut child = Context::new();
    child.set_path("sub");
    child.add("x", 1.0);

    let mut ctx = Context::new();
    ctx.add_context(&child);

    let mut extracted = ctx.get_context("sub", &Context::new());
    extracted.add("x", 42.0);
    extracted.add("y", "new");

    let again = ctx.get_context("sub", &Context::new());
    assert_eq!(again.get_or("x", -1.0), 1.0);
    assert!(!again.has("y"));
}

#[test]
fn test_extraction_default_on_miss() {
    let ctx = Context::new();

    let mut fallback = Context::new();
    fallback.set_path("fallback");
    fallback.add("marker", 7.0);

    let got = ctx.get_context("nowhere", &fallback);
    assert_eq!(got, fallback);
}

#[test]
fn test_extraction_empty_path_is_self() {
    let mut ctx = Context::new();
    ctx.set_path("me");
    ctx.add("x", 1.0);

    let copy = ctx.get_context("", &Context::new());
    assert_eq!(copy, ctx);
}

#[test]
fn test_nested_path_lookup() {
    let mut inner = Context::new();
    inner.set_path("inner");
    inner.add("x", 2.5);

    let mut middle = Context::new();
    middle.set_path("middle");
    middle.add_context(&inner);

    let mut root = Context::new();
    root.set_path("root");
    root.add_context(&middle);

    assert_eq!(root.get_or("middle/inner/x", -1.0), 2.5);

    let sub = root.get_context("middle/inner", &Context::new());
    assert_eq!(sub.get_path(), "inner");
}

#[test]
fn test_absolute_path_anchors_at_root_label() {
    let mut child = Context::new();
    child.set_path("a");
    child.add("x", 1.0);

    let mut root = Context::new();
    root.set_path("root");
    root.add_context(&child);

    assert_eq!(root.get_or("/root/a/x", -1.0), 1.0);
    assert_eq!(root.get_or("a/x", -1.0), 1.0);

    // wrong anchor resolves nothing
    assert_eq!(root.get_or("/other/a/x", -1.0), -1.0);
    let miss = root.get_context("/other/a", &Context::new());
    assert_eq!(miss, Context::new());
}

#[test]
fn test_sub_variable_resolves_like_a_child() {
    let mut sub = Context::new();
    sub.set_path("ignored_label");
    sub.add("x", 3.0);

    // attach once as a variable, once as a child
    let mut by_var = Context::new();
    by_var.add("slot", sub.clone());

    let mut by_child = Context::new();
    let mut labeled = sub.clone();
    labeled.set_path("slot");
    by_child.add_context(&labeled);

    assert_eq!(by_var.get_or("slot/x", -1.0), 3.0);
    assert_eq!(by_child.get_or("slot/x", -1.0), 3.0);

    let from_var = by_var.get_context("slot", &Context::new());
    assert_eq!(from_var.get_or("x", -1.0), 3.0);
}

#[test]
fn test_collision_appends_as_sibling() {
    let mut first = Context::new();
    first.set_path("dup");
    first.add("which", 1.0);

    let mut second = Context::new();
    second.set_path("dup");
    second.add("which", 2.0);

    let mut ctx = Context::new();
    ctx.add_context(&first);
    ctx.add_context(&second);

    // both survive; lookup returns the first inserted
    assert_eq!(ctx.children().len(), 2);
    let found = ctx.get_context("dup", &Context::new());
    assert_eq!(found.get_or("which", -1.0), 1.0);
}

// ===== XML round trips =====

fn sample_context() -> Context {
    let mut ctx = Context::new();
    ctx.set_path("control_params");
    ctx.add("dt", 0.1);
    ctx.add("nsteps", 1000.0);
    ctx.add("method", "Ehrenfest");
    ctx.add("active_states", vec![0, 1, 2]);

    let mut electronic = Context::new();
    electronic.set_path("electronic");
    electronic.add("nstates", 3.0);
    electronic.add("labels", "S0 S1 S2");
    ctx.add_context(&electronic);

    let mut nuclear = Context::new();
    nuclear.set_path("nuclear");
    nuclear.add("masses", vec![1, 12, 16]);
    ctx.add_context(&nuclear);

    let mut sub = Context::new();
    sub.set_path("thermostat");
    sub.add("temperature", 300.0);
    ctx.add("bath", sub);

    ctx
}

#[test]
fn test_string_roundtrip_identity() {
    let ctx = sample_context();

    let xml = ctx.to_xml_string();
    let reloaded = Context::from_str(&xml).expect("Failed to reparse exported document");

    assert_eq!(reloaded, ctx);
    // a second generation is byte-identical
    assert_eq!(reloaded.to_xml_string(), xml);
}

#[test]
fn test_roundtrip_preserves_order() {
    let ctx = sample_context();
    let reloaded = Context::from_str(&ctx.to_xml_string()).expect("Failed to reparse");

    assert_eq!(reloaded.keys(), ctx.keys());
    let child_paths: Vec<&str> = reloaded.children().iter().map(|c| c.get_path()).collect();
    assert_eq!(child_paths, vec!["electronic", "nuclear"]);
}

#[test]
fn test_roundtrip_tricky_reals() {
    let mut ctx = Context::new();
    ctx.add("third", 1.0 / 3.0);
    ctx.add("tiny", 5e-324);
    ctx.add("huge", 1.7976931348623157e308);
    ctx.add("neg_zero", -0.0);
    ctx.add("inf", f64::INFINITY);

    let reloaded = Context::from_str(&ctx.to_xml_string()).expect("Failed to reparse");
    assert_eq!(reloaded, ctx);
}

#[test]
fn test_roundtrip_escaped_and_whitespace_text() {
    let mut ctx = Context::new();
    ctx.add("markup", "a <b> & 'c' \"d\"");
    ctx.add("padded", "  leading and trailing  ");
    ctx.add("blank", "   ");
    ctx.add("empty", "");

    let reloaded = Context::from_str(&ctx.to_xml_string()).expect("Failed to reparse");
    assert_eq!(reloaded, ctx);
}

#[test]
fn test_roundtrip_empty_intlist() {
    let mut ctx = Context::new();
    ctx.add("none", Vec::<i32>::new());

    let reloaded = Context::from_str(&ctx.to_xml_string()).expect("Failed to reparse");
    assert_eq!(reloaded.get_or("none", vec![-1]), Vec::<i32>::new());
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("ctx.xml");

    let mut ctx = Context::new();
    ctx.set_path("new_path");
    ctx.add("param1", 1.0);
    ctx.save_xml(&file_path).expect("Failed to save context");

    let reloaded = Context::from_file(&file_path).expect("Failed to reload context");
    assert_eq!(reloaded, ctx);
    assert_eq!(reloaded.get_or("param1", -1.0), 1.0);
    assert_eq!(reloaded.get_or("param1a", -1.0), -1.0);
}

#[test]
fn test_save_truncates_existing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("ctx.xml");
    std::fs::write(&file_path, "stale content that is much longer than the new document")
        .expect("Failed to seed file");

    let mut ctx = Context::new();
    ctx.set_path("p");
    ctx.save_xml(&file_path).expect("Failed to save context");

    let written = std::fs::read_to_string(&file_path).expect("Failed to read back");
    assert!(written.starts_with("<?xml"));
    assert!(!written.contains("stale"));
}

#[test]
fn test_from_file_missing_is_file_error() {
    let result = Context::from_file("definitely/not/here.xml");
    assert!(matches!(result, Err(CtxError::FileError { code: Some(301), .. })));
}

#[test]
fn test_merge_then_extract_roundtrip() {
    // build, persist, reload, merge into another tree, extract back out
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("ctx.xml");

    let mut ctx = Context::new();
    ctx.set_path("new_path");
    ctx.add("param1", 1.0);
    ctx.add("param2", "Chalk");
    ctx.save_xml(&file_path).expect("Failed to save context");

    let mut loaded = Context::from_file(&file_path).expect("Failed to reload context");
    loaded.set_path("old_path");

    ctx.add("param1", 2.0);
    ctx.add_context(&loaded);

    let extracted = ctx.get_context("old_path", &ctx.clone());
    assert_eq!(extracted.get_path(), "old_path");
    assert_eq!(extracted.get_or("param1", -1.0), 1.0);
    assert_eq!(ctx.get_or("param1", -1.0), 2.0);
}

// ===== Validation layer =====

#[test]
fn test_get_validated() {
    let mut ctx = Context::new();
    ctx.add("dt", 0.1);

    let ok = ctx.get_validated("dt", |dt: &f64| *dt > 0.0, "a positive time step");
    assert_eq!(ok.expect("Validation should pass"), 0.1);

    ctx.add("dt", -0.1);
    let bad = ctx.get_validated("dt", |dt: &f64| *dt > 0.0, "a positive time step");
    assert!(matches!(bad, Err(CtxError::ValidationError { code: Some(450), .. })));
}

#[test]
fn test_get_text_enum() {
    let mut ctx = Context::new();
    ctx.add("method", "Ehrenfest");
    ctx.add("bad", "galloping");

    let ok = ctx.get_text_enum("method", &["ehrenfest", "fssh"]);
    assert_eq!(ok.expect("Enum check should pass"), "Ehrenfest");

    let bad = ctx.get_text_enum("bad", &["ehrenfest", "fssh"]);
    assert!(matches!(bad, Err(CtxError::ValidationError { code: Some(451), .. })));
}

#[test]
fn test_check_input_fills_defaults() {
    let mut ctx = Context::new();
    ctx.add("dt", 0.5);

    let defaults = [
        ("dt", Value::Real(0.1)),
        ("nsteps", Value::Real(100.0)),
        ("method", Value::Text("fssh".into())),
    ];
    ctx.check_input(&defaults, &[]).expect("No critical keys to fail");

    // present keys untouched, missing ones filled
    assert_eq!(ctx.get_or("dt", -1.0), 0.5);
    assert_eq!(ctx.get_or("nsteps", -1.0), 100.0);
    assert_eq!(ctx.get_or("method", String::new()), "fssh");
}

#[test]
fn test_check_input_missing_critical_key() {
    let mut ctx = Context::new();
    ctx.add("dt", 0.5);

    let result = ctx.check_input(&[], &["nstates"]);
    assert!(matches!(result, Err(CtxError::ValidationError { code: Some(452), .. })));
}
