//! Tests for rendering linearized statements as Python source.
mod common;
use common::*;
use kumitate::prelude::*;

#[test]
fn test_straight_line_function() {
    let graph = create_fetch_parse_graph();
    let code = emit(&linearize(&graph).unwrap(), "get_page_request");

    assert_eq!(
        code,
        "def get_page_request(url: str):\n    page = fetch(url)\n    title = parse(page)\n    return title\n"
    );
}

#[test]
fn test_diamond_function() {
    let graph = create_diamond_graph();
    let code = emit(&linearize(&graph).unwrap(), "sign_request");

    let expected = "\
def sign_request(x: int):
    if x > 0:
        y = positive(x)
    else:
        y = negative(x)
    z = join(y)
    return z
";
    assert_eq!(code, expected);
}

#[test]
fn test_else_if_and_bare_calls() {
    let graph = create_else_if_graph();
    let code = emit(&linearize(&graph).unwrap(), "classify_request");

    let expected = "\
def classify_request(x: int):
    if x > 10:
        big()
    elif x > 0:
        small()
    else:
        zero()
    join()
    return
";
    assert_eq!(code, expected);
}

#[test]
fn test_multiple_outputs_and_return_values() {
    let graph = Graph::new(vec![
        Node::start("request", vec![param("a", "int"), param("b", "int")], "divide"),
        Node::action(
            "divide",
            vec![param("a", "int"), param("b", "int")],
            vec![param("q", "int"), param("r", "int")],
            "response",
        ),
        Node::end("response", vec![param("q", "int"), param("r", "int")]),
    ]);
    let code = emit(&linearize(&graph).unwrap(), "divmod_request");

    assert_eq!(
        code,
        "def divmod_request(a: int, b: int):\n    q, r = divide(a, b)\n    return (q, r)\n"
    );
}

#[test]
fn test_custom_indent_width() {
    let graph = create_diamond_graph();
    let code = CodeEmitter::new(2).emit(&linearize(&graph).unwrap(), "sign_request");

    assert!(code.contains("\n  if x > 0:\n    y = positive(x)\n"));
}

#[test]
fn test_emitted_function_is_valid_python() {
    for graph in [
        create_diamond_graph(),
        create_nested_graph(),
        create_else_if_graph(),
        create_split_ends_graph(),
    ] {
        let code = emit(&linearize(&graph).unwrap(), "handler");
        assert!(
            PythonSyntax.check(&code).is_ok(),
            "Emitted code should parse:\n{}",
            code
        );
    }
}

#[test]
fn test_one_terminated_line_per_statement() {
    let graph = create_nested_graph();
    let statements = linearize(&graph).unwrap();
    let code = emit(&statements, "handler");

    assert!(code.ends_with('\n') && !code.ends_with("\n\n"));
    assert_eq!(code.lines().count(), statements.len());
    assert_eq!(code.matches('\n').count(), statements.len());
}
