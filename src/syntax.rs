use crate::error::SyntaxValidationError;
use std::fmt;
use tree_sitter::{Node, Parser};

/// Where and why a piece of source text was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFault {
    /// 1-based line of the first offending token.
    pub line: usize,
    /// 1-based column of the first offending token.
    pub column: usize,
    pub message: String,
}

impl fmt::Display for SyntaxFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.message, self.line, self.column)
    }
}

/// A syntax checker for the target language of the assembled code.
///
/// Implementations must be stateless or internally synchronized: a single checker
/// is shared by every route assembled in parallel.
pub trait SyntaxChecker: Send + Sync {
    /// Human-readable name of the checked language.
    fn language(&self) -> &str;

    /// Parses `source`, returning the first fault if it is not a valid module.
    fn check(&self, source: &str) -> Result<(), SyntaxFault>;
}

/// Python syntax checker backed by tree-sitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonSyntax;

impl SyntaxChecker for PythonSyntax {
    fn language(&self) -> &str {
        "python"
    }

    fn check(&self, source: &str) -> Result<(), SyntaxFault> {
        // tree-sitter parsers are not Sync; one per call keeps the checker shareable.
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|err| SyntaxFault {
                line: 0,
                column: 0,
                message: format!("tree-sitter language init failed: {err}"),
            })?;
        let tree = parser.parse(source, None).ok_or_else(|| SyntaxFault {
            line: 0,
            column: 0,
            message: "tree-sitter parse failed".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            Err(first_fault(root, source))
        } else {
            Ok(())
        }
    }
}

/// Pre-order search for the earliest error or missing node.
fn first_fault(root: Node<'_>, source: &str) -> SyntaxFault {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return describe(node, source);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let mut children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        children.reverse();
        stack.extend(children);
    }

    let end = root.end_position();
    SyntaxFault {
        line: end.row + 1,
        column: end.column + 1,
        message: "invalid syntax".to_string(),
    }
}

fn describe(node: Node<'_>, source: &str) -> SyntaxFault {
    let position = node.start_position();
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
        let first_line = text.lines().next().unwrap_or_default().trim();
        let snippet: String = first_line.chars().take(40).collect();
        if snippet.is_empty() {
            "unexpected token".to_string()
        } else {
            format!("unexpected `{}`", snippet)
        }
    };
    SyntaxFault {
        line: position.row + 1,
        column: position.column + 1,
        message,
    }
}

/// Checks `raw_text` and attributes any failure to `fragment_name`.
pub fn validate(
    checker: &dyn SyntaxChecker,
    fragment_name: &str,
    raw_text: &str,
) -> Result<(), SyntaxValidationError> {
    checker
        .check(raw_text)
        .map_err(|fault| SyntaxValidationError {
            fragment_name: fragment_name.to_string(),
            raw_text: raw_text.to_string(),
            cause: fault.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_module() {
        let source = "import os\n\n\ndef cwd() -> str:\n    return os.getcwd()\n";
        assert!(PythonSyntax.check(source).is_ok());
    }

    #[test]
    fn reports_position_of_first_fault() {
        let fault = PythonSyntax
            .check("x = 1\ndef broken(:\n    return )\n")
            .unwrap_err();
        assert!(fault.line >= 2, "fault reported on line {}", fault.line);
    }

    #[test]
    fn validation_error_keeps_raw_text() {
        let error = validate(&PythonSyntax, "leaf", "if :\n").unwrap_err();
        assert_eq!(error.fragment_name, "leaf");
        assert_eq!(error.raw_text, "if :\n");
    }
}
