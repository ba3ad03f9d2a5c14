use crate::assembler::{Assembler, CompiledUnit, RouteSpec};
use crate::config::AssemblerConfig;
use crate::fragment::FunctionFragment;
use crate::graph::Graph;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

impl<'py> IntoPyObject<'py> for CompiledUnit {
    type Target = PyDict;
    type Output = Bound<'py, Self::Target>;
    type Error = PyErr;

    fn into_pyobject(self, py: Python<'py>) -> Result<Self::Output, Self::Error> {
        let dict = PyDict::new(py);
        dict.set_item("requirements_txt", self.requirements_txt())?;
        dict.set_item("route_id", self.route_id)?;
        dict.set_item("function_name", self.function_name)?;
        dict.set_item("source_text", self.source_text)?;
        Ok(dict)
    }
}

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Assembles API routes into self-contained Python modules.
///
/// One instance holds a configuration and a syntax checker and may be used for
/// any number of routes.
#[pyclass(name = "Assembler")]
struct AssemblerPy {
    assembler: Assembler,
}

#[pymethods]
impl AssemblerPy {
    /// Creates an assembler.
    ///
    /// Args:
    ///     config_toml (str | None): TOML configuration. Defaults apply to every
    ///         omitted key, and to everything when no configuration is given.
    ///
    /// Raises:
    ///     ValueError: If the configuration cannot be parsed.
    #[new]
    #[pyo3(signature = (config_toml=None))]
    fn new(config_toml: Option<&str>) -> PyResult<Self> {
        let config = match config_toml {
            Some(content) => AssemblerConfig::from_toml_str(content).map_err(value_error)?,
            None => AssemblerConfig::default(),
        };
        Ok(AssemblerPy {
            assembler: Assembler::builder(config).build(),
        })
    }

    /// Assembles one route.
    ///
    /// Args:
    ///     route_json (str): The route, with `id`, `name`, `path` and an
    ///         optional `function_name`.
    ///     graph_json (str): The computation graph of the route.
    ///     fragment_json (str): The root of the fragment tree.
    ///
    /// Returns:
    ///     dict: `function_name`, `source_text`, `requirements_txt` and `route_id`.
    ///
    /// Raises:
    ///     ValueError: If any input is malformed, the graph is invalid, a
    ///         fragment is missing or unparsable, or the assembled module does
    ///         not parse.
    fn assemble(
        &self,
        py: Python<'_>,
        route_json: &str,
        graph_json: &str,
        fragment_json: &str,
    ) -> PyResult<CompiledUnit> {
        let route: RouteSpec = serde_json::from_str(route_json).map_err(value_error)?;
        let graph: Graph = serde_json::from_str(graph_json).map_err(value_error)?;
        let fragment: FunctionFragment =
            serde_json::from_str(fragment_json).map_err(value_error)?;

        py.detach(|| self.assembler.assemble(&route, &graph, &fragment))
            .map_err(value_error)
    }
}

/// Code assembly compiler.
///
/// Python bindings to the Kumitate Rust library: linearizes computation graphs
/// into orchestration functions and links them with their implementation
/// fragments into importable modules.
#[pymodule]
fn kumitate(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<AssemblerPy>()?;
    Ok(())
}
