//! PyO3 bindings for the Python GUI

use pyo3::prelude::*;

mod filter_bindings;
mod workbench_bindings;

/// Python module definition
#[pymodule]
fn filter_workbench(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<workbench_bindings::PyWorkbench>()?;
    m.add_class::<filter_bindings::PyFilterKind>()?;

    Ok(())
}
