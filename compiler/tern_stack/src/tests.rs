use super::*;

/// Mimics the evaluator: one frame per nesting level of parentheses.
fn nested_parens(depth: u32) -> i64 {
    ensure_sufficient_stack(|| {
        if depth == 0 {
            1
        } else {
            nested_parens(depth - 1) + 1
        }
    })
}

#[test]
fn shallow_nesting_returns_value() {
    assert_eq!(nested_parens(5), 6);
}

#[test]
fn deep_nesting_does_not_overflow() {
    // A plain 8MB stack would not survive this many frames.
    assert_eq!(nested_parens(150_000), 150_001);
}

#[test]
fn propagates_errors_unchanged() {
    let result: Result<i64, String> = ensure_sufficient_stack(|| Err("unclosed block".to_string()));
    assert_eq!(result, Err("unclosed block".to_string()));
}
