use crate::graph::Param;
use crate::linearizer::{RenderableStatement, Statement};
use itertools::Itertools;

/// Default indentation unit of emitted code.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Renders linearized statements as the source text of one Python function.
#[derive(Debug, Clone)]
pub struct CodeEmitter {
    indent: String,
}

impl Default for CodeEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}

impl CodeEmitter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent: " ".repeat(indent_width),
        }
    }

    /// Emits one line per statement. The start node's own name is replaced by
    /// `exported_name`, so the same graph can be published under several names.
    pub fn emit(&self, statements: &[RenderableStatement<'_>], exported_name: &str) -> String {
        let mut code = String::new();
        for statement in statements {
            for _ in 0..statement.depth {
                code.push_str(&self.indent);
            }
            code.push_str(&Self::render(&statement.statement, exported_name));
            code.push('\n');
        }
        code
    }

    fn render(statement: &Statement<'_>, exported_name: &str) -> String {
        match statement {
            Statement::Start(node) => format!(
                "def {}({}):",
                exported_name,
                node.output_params
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.param_type))
                    .join(", ")
            ),
            Statement::If { condition, .. } => format!("if {}:", condition),
            Statement::ElseIf(clause) => format!("elif {}:", clause.condition),
            Statement::Else => "else:".to_string(),
            Statement::Pass => "pass".to_string(),
            Statement::Action(node) => {
                let call = format!("{}({})", node.name, names(&node.input_params));
                if node.output_params.is_empty() {
                    call
                } else {
                    format!("{} = {}", names(&node.output_params), call)
                }
            }
            Statement::Return(node) => match node.input_params.as_slice() {
                [] => "return".to_string(),
                [single] => format!("return {}", single.name),
                many => format!("return ({})", names(many)),
            },
        }
    }
}

/// Emits with the default indentation.
pub fn emit(statements: &[RenderableStatement<'_>], exported_name: &str) -> String {
    CodeEmitter::default().emit(statements, exported_name)
}

fn names(params: &[Param]) -> String {
    params.iter().map(|p| p.name.as_str()).join(", ")
}
