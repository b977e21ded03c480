//! Quirk URL and circuit JSON decoding.

use percent_encoding::percent_decode_str;
use quirk_ir::{Axis, Circuit, Operation, QubitId, StandardGate};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::cells::{CustomGates, parse_custom_gates};
use crate::column::ResolvedColumn;
use crate::error::{QuirkError, QuirkResult};
use crate::token::CellToken;

/// URL prefixes accepted in front of the fragment.
pub const QUIRK_PREFIXES: [&str; 4] = [
    "https://algassert.com/quirk",
    "https://www.algassert.com/quirk",
    "http://algassert.com/quirk",
    "http://www.algassert.com/quirk",
];

/// Compile a Quirk URL into a circuit.
///
/// A URL without a fragment (or with an empty one) is the empty circuit.
///
/// # Example
///
/// ```
/// use quirk_url::quirk_url_to_circuit;
///
/// let circuit = quirk_url_to_circuit(
///     "https://algassert.com/quirk#circuit={%22cols%22:[[%22H%22],[%22%E2%80%A2%22,%22X%22]]}",
/// )
/// .unwrap();
/// assert_eq!(circuit.len(), 2);
/// ```
#[instrument(skip_all)]
pub fn quirk_url_to_circuit(url: &str) -> QuirkResult<Circuit> {
    let rest = QUIRK_PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .ok_or_else(|| {
            QuirkError::MalformedUrl(format!(
                "URL must start with {:?}, got {url:?}",
                QUIRK_PREFIXES[0]
            ))
        })?;

    let fragment = match rest.strip_prefix('#') {
        Some(fragment) => fragment,
        None if rest.is_empty() => return Ok(Circuit::default()),
        None => {
            return Err(QuirkError::MalformedUrl(format!(
                "text after the URL prefix must start with '#', got {rest:?}"
            )));
        }
    };
    if fragment.is_empty() {
        return Ok(Circuit::default());
    }

    let payload = fragment.strip_prefix("circuit=").ok_or_else(|| {
        QuirkError::MalformedUrl("fragment must start with \"circuit=\"".into())
    })?;
    let json = percent_decode_str(payload)
        .decode_utf8()
        .map_err(|e| QuirkError::MalformedUrl(format!("fragment is not UTF-8: {e}")))?;
    let value: Value = serde_json::from_str(&json)?;
    quirk_json_to_circuit(&value)
}

/// Compile an already-decoded circuit JSON document.
pub fn quirk_json_to_circuit(value: &Value) -> QuirkResult<Circuit> {
    let Value::Object(map) = value else {
        return Err(QuirkError::Schema(format!(
            "circuit JSON must be a top-level dictionary, got {value}"
        )));
    };
    let Some(cols) = map.get("cols") else {
        return Err(QuirkError::Schema(
            "circuit JSON must have a \"cols\" entry".into(),
        ));
    };
    let columns = column_slots(cols)?;

    let custom = parse_custom_gates(map.get("gates"))?;
    let init = init_operations(map.get("init"))?;
    let ops = compile_slots(&columns, &custom)?;

    let mut circuit = Circuit::default();
    circuit.extend(init)?.extend(ops)?;
    info!(
        columns = columns.len(),
        operations = circuit.len(),
        custom_gates = custom.len(),
        "compiled circuit"
    );
    Ok(circuit)
}

/// Compile a `cols` list, concatenating the columns in order.
pub(crate) fn compile_columns(cols: &Value, custom: &CustomGates) -> QuirkResult<Vec<Operation>> {
    compile_slots(&column_slots(cols)?, custom)
}

/// The slots of every column, once `cols` is known to be a list of lists.
fn column_slots(cols: &Value) -> QuirkResult<Vec<&[Value]>> {
    let Value::Array(cols) = cols else {
        return Err(QuirkError::Schema(format!("cols must be a list, got {cols}")));
    };
    cols.iter()
        .map(|col| match col {
            Value::Array(slots) => Ok(slots.as_slice()),
            _ => Err(QuirkError::Schema(format!("col must be a list, got {col}"))),
        })
        .collect()
}

/// Look up the cells of every column, then build the columns in order.
fn compile_slots(columns: &[&[Value]], custom: &CustomGates) -> QuirkResult<Vec<Operation>> {
    let resolved = columns
        .iter()
        .map(|slots| ResolvedColumn::resolve(slots, custom))
        .collect::<QuirkResult<Vec<_>>>()?;

    let mut ops = Vec::new();
    for (index, column) in resolved.iter().enumerate() {
        let compiled = column.build()?;
        debug!(column = index, cells = column.len(), operations = compiled.len(), "column");
        ops.extend(compiled);
    }
    Ok(ops)
}

/// Operations preparing the `init` states, qubit by qubit.
fn init_operations(init: Option<&Value>) -> QuirkResult<Vec<Operation>> {
    let entries = match init {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(QuirkError::Schema(format!("init must be a list, got {other}")));
        }
    };

    let mut ops = Vec::new();
    for (row, entry) in entries.iter().enumerate() {
        let qubit = QubitId::from(row);
        let gates: Vec<StandardGate> = match entry {
            Value::Number(n) if n.as_f64() == Some(0.0) => vec![],
            Value::Number(n) if n.as_f64() == Some(1.0) => vec![StandardGate::X],
            Value::String(s) => match s.as_str() {
                "+" => vec![StandardGate::H],
                "-" => vec![StandardGate::X, StandardGate::H],
                "i" => vec![StandardGate::H, Axis::Z.pow(0.5)],
                "-i" => vec![StandardGate::H, Axis::Z.pow(-0.5)],
                _ => return Err(QuirkError::UnrecognizedToken(entry.to_string())),
            },
            _ => return Err(QuirkError::UnrecognizedToken(entry.to_string())),
        };
        ops.extend(gates.into_iter().map(|g| Operation::single_qubit_gate(g, qubit)));
    }
    Ok(ops)
}
