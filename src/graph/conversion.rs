use super::definition::Graph;
use crate::error::ConversionError;

/// A trait for producer-specific graph formats that can be converted into a Kumitate `Graph`.
///
/// Graph producers rarely agree on field names. Implementing this trait on your own
/// deserialized structs provides the translation layer into the canonical model
/// consumed by the linearizer.
///
/// # Example
///
/// ```rust,no_run
/// use kumitate::prelude::*;
/// use kumitate::error::ConversionError;
///
/// struct MyStep { id: String, calls: String }
/// struct MyPlan { steps: Vec<MyStep> }
///
/// impl IntoGraph for MyPlan {
///     fn into_graph(self) -> Result<Graph, ConversionError> {
///         let mut nodes = vec![Node::start("request", vec![], &self.steps[0].id)];
///         for step in self.steps {
///             // Map each step onto an action node here.
/// #           let _ = step.calls;
///         }
///         nodes.push(Node::end("response", vec![]));
///         Ok(Graph::new(nodes))
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a Kumitate graph.
    fn into_graph(self) -> Result<Graph, ConversionError>;
}

impl IntoGraph for Graph {
    fn into_graph(self) -> Result<Graph, ConversionError> {
        Ok(self)
    }
}
