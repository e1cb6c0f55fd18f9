use mathmentor::{extract_expression, parse_expr};

fn assert_extracts(input: &str, expected: &str) {
    assert_eq!(extract_expression(input), expected, "extracting from {input:?}");
}

#[test]
fn equations_become_zero_form() {
    assert_extracts("solve x + 2 = 5", "x+2-(5)");
    assert_extracts("Solve for x: 3x - 4 = 2x", "3x-4-(2x)");
    assert_extracts("What is x^2 - 4 = 0?", "x**2-4-(0)");
}

#[test]
fn filler_words_are_removed_as_whole_words() {
    assert_extracts("Find the derivative of x^3", "x**3");
    assert_extracts("Calculate the derivative of sin(x)", "sin(x)");
    assert_extracts("compute the derivative of x^2 with respect to x", "x**2");
    assert_extracts("evaluate the limit of sin(x)/x", "sin(x)/x");
}

#[test]
fn derivative_notation_and_definitions() {
    assert_extracts("d/dx x^2", "x**2");
    assert_extracts("derivative of f(x) = x^2 + 1", "x**2+1");
}

#[test]
fn decimals_keep_their_point() {
    assert_extracts("solve 0.5x = 2.", "0.5x-(2)");
}

#[test]
fn output_parses() {
    for input in [
        "solve x + 2 = 5",
        "Find the derivative of 3x^2 + 2x",
        "solve 2(x + 1) = x - 4",
    ] {
        let normalized = extract_expression(input);
        assert!(
            parse_expr(&normalized).is_ok(),
            "{input:?} normalized to unparsable {normalized:?}"
        );
    }
}
