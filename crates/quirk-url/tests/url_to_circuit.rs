//! End-to-end tests: Quirk URLs in, operations out.

use num_complex::Complex64;
use proptest::prelude::*;
use quirk_ir::{Axis, Circuit, GateKind, Operation, OperationKind, QubitId, RegisterGate, StandardGate};
use quirk_url::{QuirkError, quirk_url_to_circuit};
use std::f64::consts::PI;

fn compile(json: &str) -> Circuit {
    quirk_url_to_circuit(&format!("https://algassert.com/quirk#circuit={json}"))
        .unwrap_or_else(|e| panic!("{json}: {e}"))
}

fn compile_err(json: &str) -> QuirkError {
    quirk_url_to_circuit(&format!("https://algassert.com/quirk#circuit={json}")).unwrap_err()
}

fn q(i: u32) -> QubitId {
    QubitId(i)
}

fn on(gate: StandardGate, qubit: u32) -> Operation {
    Operation::single_qubit_gate(gate, q(qubit))
}

fn controls(rows: std::ops::Range<u32>) -> Vec<QubitId> {
    rows.map(QubitId).collect()
}

/// Parameter of the `index`th operation evaluated at time `t`.
fn param_at(circuit: &Circuit, index: usize, t: f64) -> f64 {
    circuit.operations()[index]
        .as_standard_gate()
        .and_then(StandardGate::parameter)
        .and_then(|p| p.eval_at("t", t))
        .unwrap_or_else(|| panic!("operation {index} has no evaluable parameter"))
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn test_parse_simple_cases() {
    assert_eq!(quirk_url_to_circuit("http://algassert.com/quirk").unwrap(), Circuit::default());
    assert_eq!(quirk_url_to_circuit("https://algassert.com/quirk").unwrap(), Circuit::default());
    assert_eq!(quirk_url_to_circuit("https://algassert.com/quirk#").unwrap(), Circuit::default());
    assert_eq!(
        quirk_url_to_circuit(r#"http://algassert.com/quirk#circuit={"cols":[]}"#).unwrap(),
        Circuit::default()
    );

    let circuit = quirk_url_to_circuit(
        "https://algassert.com/quirk#circuit={%22cols%22:[[%22H%22],[%22%E2%80%A2%22,%22X%22]]}",
    )
    .unwrap();
    assert_eq!(
        circuit.operations(),
        &[on(StandardGate::H, 0), on(StandardGate::X, 1).controlled_by([q(0)])]
    );
}

#[test]
fn test_parse_failures() {
    let cases: [(&str, &str); 8] = [
        ("http://algassert.com/quirk#bad", "must start with"),
        ("http://algassert.com/quirk#circuit=", "JSON decode error"),
        ("http://algassert.com/quirk#circuit=[]", "top-level dictionary"),
        ("http://algassert.com/quirk#circuit={}", "\"cols\" entry"),
        (r#"http://algassert.com/quirk#circuit={"cols": 1}"#, "cols must be a list"),
        (r#"http://algassert.com/quirk#circuit={"cols": [0]}"#, "col must be a list"),
        (r#"http://algassert.com/quirk#circuit={"cols": [[0]]}"#, "Unrecognized"),
        (r#"http://algassert.com/quirk#circuit={"cols": [["not a real"]]}"#, "Unrecognized"),
    ];
    for (url, marker) in cases {
        let err = quirk_url_to_circuit(url).unwrap_err();
        assert!(err.to_string().contains(marker), "{url}: {err}");
    }
}

#[test]
fn test_gate_type_swap() {
    assert_eq!(
        compile(r#"{"cols":[["Swap","Swap"]]}"#).operations(),
        &[Operation::gate(StandardGate::Swap, [q(0), q(1)])]
    );
    assert_eq!(
        compile(r#"{"cols":[["Swap","X","Swap"]]}"#).operations(),
        &[Operation::gate(StandardGate::Swap, [q(0), q(2)]), on(StandardGate::X, 1)]
    );
    for odd in [r#"{"cols":[["Swap"]]}"#, r#"{"cols":[["Swap","Swap","Swap"]]}"#] {
        assert!(compile_err(odd).to_string().contains("number of swap gates"));
    }
}

#[test]
fn test_gate_type_controls() {
    let cx = on(StandardGate::X, 1).controlled_by([q(0)]);
    assert_eq!(compile(r#"{"cols":[["•","X"]]}"#).operations(), &[cx.clone()]);

    let bracketed = [
        ("◦", StandardGate::X),
        ("⊕", Axis::Y.pow(0.5)),
        ("⊖", Axis::Y.pow(-0.5)),
        ("⊗", Axis::X.pow(-0.5)),
        ("(/)", Axis::X.pow(0.5)),
    ];
    for (control, basis) in bracketed {
        let circuit = compile(&format!(r#"{{"cols":[["{control}","X"]]}}"#));
        assert_eq!(
            circuit.operations(),
            &[on(basis.clone(), 0), cx.clone(), on(basis.inverse(), 0)],
            "{control}"
        );
    }

    let circuit = compile(r#"{"cols":[["X","•","◦","⊕","⊖","⊗","(/)","Z"]]}"#);
    assert_eq!(
        circuit.operations(),
        &[
            on(StandardGate::X, 2),
            on(Axis::Y.pow(0.5), 3),
            on(Axis::Y.pow(-0.5), 4),
            on(Axis::X.pow(-0.5), 5),
            on(Axis::X.pow(0.5), 6),
            on(StandardGate::X, 0).controlled_by(controls(1..7)),
            on(StandardGate::Z, 7).controlled_by(controls(1..7)),
            on(Axis::X.pow(-0.5), 6),
            on(Axis::X.pow(0.5), 5),
            on(Axis::Y.pow(0.5), 4),
            on(Axis::Y.pow(-0.5), 3),
            on(StandardGate::X, 2),
        ]
    );
}

#[test]
fn test_parity_controls() {
    let circuit = compile(r#"{"cols":[["Y","xpar","ypar","zpar","Z"]]}"#);
    assert_eq!(
        circuit.operations(),
        &[
            on(Axis::Y.pow(0.5), 1),
            on(Axis::X.pow(-0.5), 2),
            Operation::cx(q(2), q(1)),
            Operation::cx(q(3), q(1)),
            on(StandardGate::Y, 0).controlled_by([q(1)]),
            on(StandardGate::Z, 4).controlled_by([q(1)]),
            Operation::cx(q(3), q(1)),
            Operation::cx(q(2), q(1)),
            on(Axis::X.pow(0.5), 2),
            on(Axis::Y.pow(-0.5), 1),
        ]
    );
}

#[test]
fn test_non_physical_operations() {
    for cell in ["__error__", "__unstable__UniversalNot", "|0⟩⟨0|", "0", "setA", "incmodR3"] {
        let err = compile_err(&format!(r#"{{"cols":[["{cell}"]]}}"#));
        assert!(matches!(err, QuirkError::UnphysicalOperation { .. }), "{cell}: {err}");
        assert!(err.to_string().contains("Unphysical operation"));
    }
}

#[test]
fn test_scalar_operations() {
    assert_eq!(
        compile(r#"{"cols":[["…"]]}"#).operations(),
        &[on(StandardGate::I, 0)]
    );

    let s = std::f64::consts::FRAC_1_SQRT_2;
    let phases = [
        ("NeGate", Complex64::new(-1.0, 0.0)),
        ("i", Complex64::new(0.0, 1.0)),
        ("-i", Complex64::new(0.0, -1.0)),
        ("√i", Complex64::new(s, s)),
        ("√-i", Complex64::new(s, -s)),
    ];
    for (cell, expected) in phases {
        let circuit = compile(&format!(r#"{{"cols":[["{cell}"]]}}"#));
        let [op] = circuit.operations() else {
            panic!("{cell}: expected one operation");
        };
        let OperationKind::GlobalPhase(phase) = op.kind else {
            panic!("{cell}: expected a global phase");
        };
        assert!((phase - expected).norm() < 1e-12, "{cell}: {phase}");
        assert!(op.qubits.is_empty());
    }
}

#[test]
fn test_fixed_single_qubit_rotations() {
    assert_eq!(
        compile(r#"{"cols":[["H","X","Y","Z"]]}"#).operations(),
        &[
            on(StandardGate::H, 0),
            on(StandardGate::X, 1),
            on(StandardGate::Y, 2),
            on(StandardGate::Z, 3),
        ]
    );

    for (name, axis) in [("X", Axis::X), ("Y", Axis::Y), ("Z", Axis::Z)] {
        let json = format!(
            r#"{{"cols":[["{n}^½","{n}^⅓","{n}^¼"],["{n}^⅛","{n}^⅟₁₆","{n}^⅟₃₂"],["{n}^⅟₆₄","{n}^⅟₁₂₈"],["{n}^-½","{n}^-⅓","{n}^-¼"],["{n}^-⅛","{n}^-⅟₁₆"]]}}"#,
            n = name
        );
        let expected = [
            (1.0 / 2.0, 0),
            (1.0 / 3.0, 1),
            (1.0 / 4.0, 2),
            (1.0 / 8.0, 0),
            (1.0 / 16.0, 1),
            (1.0 / 32.0, 2),
            (1.0 / 64.0, 0),
            (1.0 / 128.0, 1),
            (-1.0 / 2.0, 0),
            (-1.0 / 3.0, 1),
            (-1.0 / 4.0, 2),
            (-1.0 / 8.0, 0),
            (-1.0 / 16.0, 1),
        ]
        .map(|(power, row)| on(axis.pow(power), row));
        assert_eq!(compile(&json).operations(), &expected, "{name}");
    }
}

#[test]
fn test_dynamic_single_qubit_rotations() {
    let circuit = compile(r#"{"cols":[["X^t","Y^t","Z^t"],["X^-t","Y^-t","Z^-t"]]}"#);
    let names: Vec<_> = circuit.operations().iter().map(Operation::name).collect();
    assert_eq!(names, ["xpow", "ypow", "zpow", "xpow", "ypow", "zpow"]);
    for t in [0.0, 0.3, 1.0] {
        for i in 0..3 {
            assert_close(param_at(&circuit, i, t), t);
            assert_close(param_at(&circuit, i + 3, t), -t);
        }
    }

    let circuit = compile(r#"{"cols":[["e^iXt","e^iYt","e^iZt"],["e^-iXt","e^-iYt","e^-iZt"]]}"#);
    let names: Vec<_> = circuit.operations().iter().map(Operation::name).collect();
    assert_eq!(names, ["rx", "ry", "rz", "rx", "ry", "rz"]);
    for i in 0..3 {
        assert_close(param_at(&circuit, i, 0.25), PI / 2.0);
        assert_close(param_at(&circuit, i + 3, 0.25), -PI / 2.0);
    }
    let rows: Vec<_> = circuit.operations().iter().map(|op| op.qubits[0].0).collect();
    assert_eq!(rows, [0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_formulaic_gates() {
    for (cell, gate_name) in [("X^ft", "xpow"), ("Y^ft", "ypow"), ("Z^ft", "zpow")] {
        let circuit = compile(&format!(
            r#"{{"cols":[["{cell}",{{"id":"{cell}","arg":"t*t"}}]]}}"#
        ));
        assert_eq!(circuit.operations()[0].name(), gate_name);
        for t in [0.0, 0.25, 0.5, 0.9] {
            assert_close(param_at(&circuit, 0, t), (PI * t).sin());
            assert_close(param_at(&circuit, 1, t), t * t);
        }
    }

    for (cell, gate_name) in [("Rxft", "rx"), ("Ryft", "ry"), ("Rzft", "rz")] {
        let circuit = compile(&format!(
            r#"{{"cols":[["{cell}",{{"id":"{cell}","arg":"t*t"}}]]}}"#
        ));
        assert_eq!(circuit.operations()[1].name(), gate_name);
        for t in [0.0, 0.25, 0.5, 0.9] {
            assert_close(param_at(&circuit, 0, t), PI * t * t);
            assert_close(param_at(&circuit, 1, t), t * t);
        }
    }
}

#[test]
fn test_formula_errors_surface() {
    let err = compile_err(r#"{"cols":[[{"id":"X^ft","arg":"t + x"}]]}"#);
    assert!(err.to_string().contains("Formula has variables besides time"));
    let err = compile_err(r#"{"cols":[[{"id":"X^ft","arg":"2 pi t"}]]}"#);
    assert!(err.to_string().contains("Failed to parse the gate formula"));
    let err = compile_err(r#"{"cols":[[{"id":"X^ft","arg":3}]]}"#);
    assert!(err.to_string().contains("Formula must be a string"));
    let err = compile_err(r#"{"cols":[[{"id":"X^ft","arg":"t + 1/0"}]]}"#);
    assert!(err.to_string().contains("finite"), "{err}");
}

#[test]
fn test_time_binding() {
    let circuit = compile(r#"{"cols":[[{"id":"Rzft","arg":"t*t"},"X^t"]]}"#);
    let bound = circuit.bind_parameter("t", 0.5);
    assert!(!bound.is_parameterized());
    assert_eq!(bound.operations()[1].as_standard_gate(), Some(&Axis::X.pow(0.5)));
}

#[test]
fn test_displays() {
    let circuit = compile(
        r#"{"cols":[["Amps2"],[1,"Amps3"],["Chance"],["Chance2"],["Density"],["Density3"],["Sample4"],["Bloch"],["Sample2"]]}"#,
    );
    assert!(circuit.is_empty());
}

#[test]
fn test_measurements() {
    let circuit = compile(r#"{"cols":[["Measure","ZDetector","YDetector","XDetector"]]}"#);
    assert_eq!(
        circuit.operations(),
        &[
            Operation::measure(q(0)),
            Operation::measure(q(1)),
            on(Axis::X.pow(-0.5), 2),
            Operation::measure(q(2)),
            on(Axis::X.pow(0.5), 2),
            on(StandardGate::H, 3),
            Operation::measure(q(3)),
            on(StandardGate::H, 3),
        ]
    );
    let err = compile_err(r#"{"cols":[["◦","Measure"]]}"#);
    assert!(err.to_string().contains("controlled measurement"));
    let err = compile_err(
        r#"{"gates":[{"id":"~m","circuit":{"cols":[["Measure"]]}}],"cols":[["•","~m"]]}"#,
    );
    assert!(err.to_string().contains("controlled measurement"), "{err}");
}

/// Check a classical circuit on every listed basis state.
fn assert_maps(circuit: &Circuit, cases: impl IntoIterator<Item = (u64, u64)>) {
    for (input, expected) in cases {
        let actual = circuit.apply_to_basis_state(input).unwrap();
        assert_eq!(actual, expected, "{input:#b} mapped to {actual:#b}, expected {expected:#b}");
    }
}

#[test]
fn test_arithmetic_comparison_gates() {
    let err = compile_err(r#"{"cols":[["^A<B"]]}"#);
    assert!(err.to_string().contains("Missing input"));

    type Predicate = fn(u64, u64) -> bool;
    let comparisons: [(&str, Predicate); 6] = [
        ("^A<B", |a, b| a < b),
        ("^A>B", |a, b| a > b),
        ("^A>=B", |a, b| a >= b),
        ("^A<=B", |a, b| a <= b),
        ("^A=B", |a, b| a == b),
        ("^A!=B", |a, b| a != b),
    ];
    for (cell, holds) in comparisons {
        let circuit = compile(&format!(r#"{{"cols":[["{cell}","inputA2",1,"inputB2"]]}}"#));
        let op = &circuit.operations()[0];
        assert_eq!(op.name(), cell);
        assert_eq!(op.qubits, controls(0..5));

        let cases = (0..2).flat_map(|target| {
            (0..4).flat_map(move |a| {
                (0..4).map(move |b| {
                    let state = target | a << 1 | b << 3;
                    (state, state ^ u64::from(holds(a, b)))
                })
            })
        });
        assert_maps(&circuit, cases);
    }
}

#[test]
fn test_arithmetic_addition_gates() {
    assert_maps(&compile(r#"{"cols":[["inc3"]]}"#), [(0, 1), (3, 4), (7, 0)]);
    assert_maps(&compile(r#"{"cols":[["dec3"]]}"#), [(0, 7), (3, 2), (7, 6)]);

    let add = compile(r#"{"cols":[["+=A2",1,"inputA2"]]}"#);
    let sub = compile(r#"{"cols":[["-=A2",1,"inputA2"]]}"#);
    for x in 0..4 {
        for a in 0..4 {
            let state = x | a << 2;
            assert_maps(&add, [(state, (x + a) % 4 | a << 2)]);
            assert_maps(&sub, [(state, (x + 4 - a) % 4 | a << 2)]);
        }
    }
}

#[test]
fn test_arithmetic_multiply_accumulate_gates() {
    let add = compile(r#"{"cols":[["+=AA4",1,1,1,"inputA2"]]}"#);
    let sub = compile(r#"{"cols":[["-=AA4",1,1,1,"inputA2"]]}"#);
    for x in 0..16 {
        for a in 0..4 {
            let state = x | a << 4;
            assert_maps(&add, [(state, (x + a * a) % 16 | a << 4)]);
            assert_maps(&sub, [(state, (x + 16 - a * a) % 16 | a << 4)]);
        }
    }

    let add = compile(r#"{"cols":[["+=AB3",1,1,"inputA2",1,"inputB2"]]}"#);
    let sub = compile(r#"{"cols":[["-=AB3",1,1,"inputA2",1,"inputB2"]]}"#);
    for x in 0..8 {
        for a in 0..4 {
            for b in 0..4 {
                let inputs = a << 3 | b << 5;
                assert_maps(&add, [(x | inputs, (x + a * b) % 8 | inputs)]);
                assert_maps(&sub, [(x | inputs, (x + 16 - a * b) % 8 | inputs)]);
            }
        }
    }
}

#[test]
fn test_arithmetic_misc_gates() {
    let cases: [(&str, fn(u64, u64) -> u64); 6] = [
        ("^=A3", |x, a| x ^ a),
        ("+cntA3", |x, a| (x + u64::from(a.count_ones())) % 8),
        ("-cntA3", |x, a| (x + 8 - u64::from(a.count_ones())) % 8),
        ("Flip<A3", |x, a| if x < a { a - x - 1 } else { x }),
        ("*A3", |x, a| if a % 2 == 1 { x * a % 8 } else { x }),
        ("/A3", |x, a| {
            if a % 2 == 1 {
                // every odd number is its own inverse modulo 8
                x * a % 8
            } else {
                x
            }
        }),
    ];
    for (cell, f) in cases {
        let circuit = compile(&format!(r#"{{"cols":[["{cell}",1,1,"inputA3"]]}}"#));
        for x in 0..8 {
            for a in 0..8 {
                let state = x | a << 3;
                assert_maps(&circuit, [(state, f(x, a) | a << 3)]);
            }
        }
    }
}

#[test]
fn test_reversed_input_register() {
    let circuit = compile(r#"{"cols":[["+=A2",1,"revinputA2"]]}"#);
    // row 2 is the high bit of the reversed register
    assert_maps(&circuit, [(0b01_00, 0b01_10), (0b10_00, 0b10_01)]);
}

#[test]
fn test_controlled_arithmetic() {
    let circuit = compile(r#"{"cols":[["•","inc2"]]}"#);
    assert_maps(&circuit, [(0b000, 0b000), (0b001, 0b011), (0b111, 0b001), (0b110, 0b110)]);
}

#[test]
fn test_input_inside_target_rejected() {
    let err = compile_err(r#"{"cols":[["+=A3","inputA2"]]}"#);
    assert!(err.to_string().contains("overlaps"));
}

#[test]
fn test_qubit_permutation_gates() {
    assert_maps(&compile(r#"{"cols":[["<<3"]]}"#), [(0b001, 0b010), (0b100, 0b001), (0b011, 0b110)]);
    assert_maps(&compile(r#"{"cols":[[">>3"]]}"#), [(0b001, 0b100), (0b110, 0b011)]);
    assert_maps(&compile(r#"{"cols":[["rev4"]]}"#), [(0b0001, 0b1000), (0b0011, 0b1100)]);
    assert_maps(
        &compile(r#"{"cols":[["weave4"],["split4"]]}"#),
        (0..16).map(|s| (s, s)),
    );
    // weave4 sends bits (0,1,2,3) to (0,2,1,3)
    assert_maps(&compile(r#"{"cols":[["weave4"]]}"#), [(0b0010, 0b0100), (0b0100, 0b0010)]);
}

#[test]
fn test_frequency_space_gates() {
    let circuit = compile(r#"{"cols":[["QFT3"],["QFT†3"],["PhaseGradient2"],["grad^-t2"]]}"#);
    let kinds: Vec<_> = circuit
        .operations()
        .iter()
        .map(|op| &op.as_gate().unwrap().kind)
        .collect();
    assert!(matches!(kinds[0], GateKind::Register(RegisterGate::Qft { num_qubits: 3, inverse: false })));
    assert!(matches!(kinds[1], GateKind::Register(RegisterGate::Qft { num_qubits: 3, inverse: true })));
    let GateKind::Register(RegisterGate::PhaseGradient { exponent, .. }) = kinds[3] else {
        panic!("expected a phase gradient");
    };
    assert_close(exponent.eval_at("t", 0.25).unwrap(), -0.5);

    let err = compile(r#"{"cols":[["QFT2"]]}"#).apply_to_basis_state(0).unwrap_err();
    assert!(err.to_string().contains("QFT2"));
}

#[test]
fn test_input_rotation() {
    let circuit = compile(r#"{"cols":[["Z^(A/2^n)","inputA2"]]}"#);
    assert_eq!(
        circuit.operations(),
        &[
            on(Axis::Z.pow(0.25), 0).controlled_by([q(1)]),
            on(Axis::Z.pow(0.5), 0).controlled_by([q(2)]),
        ]
    );
}

#[test]
fn test_custom_gates() {
    let circuit = compile(
        r#"{"cols":[["~inc"],["~flip",1,"~flip"]],"gates":[{"id":"~inc","circuit":{"cols":[["inc2"]]}},{"id":"~flip","matrix":"{{0,1},{1,0}}"}]}"#,
    );
    assert_eq!(circuit.operations()[0].name(), "inc2");
    assert_eq!(circuit.operations()[1].name(), "~flip");
    assert_eq!(circuit.operations()[2].qubits, vec![q(2)]);

    let err = compile_err(r#"{"cols":[],"gates":[{"id":"~bad","matrix":"{{1,0,0}}"}]}"#);
    assert!(err.to_string().contains("custom gate"));

    let err = compile_err(r#"{"cols":1,"gates":5}"#);
    assert!(err.to_string().contains("cols must be a list"), "{err}");
}

#[test]
fn test_initial_states() {
    let circuit = compile(r#"{"init":[1,0,1],"cols":[["inc3"]]}"#);
    assert_maps(&circuit, [(0, 0b110)]);
}

proptest! {
    #[test]
    fn add_then_subtract_is_identity(state in 0u64..1 << 5) {
        let circuit = compile(r#"{"cols":[["+=A3",1,1,"inputA2"],["-=A3",1,1,"inputA2"]]}"#);
        prop_assert_eq!(circuit.apply_to_basis_state(state).unwrap(), state);
    }

    #[test]
    fn increment_then_decrement_is_identity(state in 0u64..1 << 4, width in 1usize..=4) {
        let circuit = compile(&format!(r#"{{"cols":[["inc{width}"],["dec{width}"]]}}"#));
        prop_assert_eq!(circuit.apply_to_basis_state(state).unwrap(), state);
    }
}
