//! End-to-end tests: netlist in, testbench out, simulator output back in.

use std::fmt::Write as _;
use std::fs;

use serde_json::json;
use wavebench::prelude::*;
use wavebench::{ResultsError, rewrite};

const LIBRARY: &str = "\
* standard cells
.subckt INV A Y VDD VSS
MP Y A VDD VDD pmos W=1u
MN Y A VSS VSS nmos W=0.5u
.ends INV

.SUBCKT NOR2 A B Y VDD VSS WP WN
MP1 n1 A VDD VDD pmos W=WP
MP2 Y B n1 VDD pmos W=WP
MN1 Y A VSS VSS nmos W=WN
MN2 Y B VSS VSS nmos W=WN
.ENDS NOR2
";

/// Fake `wrdata` output for an inverter driven by a square wave.
fn inverter_output(points: usize, indexed: bool) -> String {
    let mut out = String::new();
    for i in 0..points {
        let t = i as f64 * 1e-10;
        let a = if (i / 5) % 2 == 0 { 0.0 } else { 1.2 };
        if indexed {
            write!(out, "{} ", i).unwrap();
        }
        writeln!(out, "{:e} {} {}", t, a, 1.2 - a).unwrap();
    }
    out
}

#[test]
fn test_scan_roles_and_synthesize() {
    let aliases = AliasSets::default();
    let cells = scan(LIBRARY, &aliases);
    assert_eq!(cells.len(), 2);

    let nor2 = &cells[1];
    assert_eq!(nor2.pins, ["A", "B", "Y", "VDD", "VSS"]);
    assert_eq!(nor2.params, ["WP", "WN"]);

    let roles = infer(&nor2.pins, &aliases);
    assert_eq!(roles.power_high, "VDD");
    assert_eq!(roles.power_low, "VSS");
    assert_eq!(roles.outputs, ["Y"]);
    assert_eq!(roles.inputs, ["A", "B"]);

    let plot = vec!["A".to_string(), "Y".to_string()];
    let params = SimParams::default();
    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("sim.txt");
    let tb = Testbench {
        netlist: LIBRARY,
        subckt_name: &nor2.name,
        pin_order: &nor2.pins,
        params: &params,
        plot_pins: &plot,
        results_path: &results_path,
        roles: None,
        pin_drives: None,
        aliases: &aliases,
    };

    let deck = synthesize(&tb);
    assert_eq!(deck, synthesize(&tb));
    assert!(deck.contains(&rewrite(LIBRARY, &aliases)));
    assert!(deck.contains("XU1 A B Y VDD VSS NOR2\n"));
    assert!(deck.contains("VIN_A A 0 PULSE("));
    assert!(deck.contains("VIN_B B 0 PULSE("));
    assert!(deck.contains("CLOAD_Y Y 0 5e-15\n"));
    assert!(deck.contains(".tran 1e-12 3.0000000000000004e-09\n"));
    assert!(deck.contains(&format!(
        "wrdata {} time v(A) v(Y)\n",
        results_path.display()
    )));
}

#[test]
fn test_request_to_waveform() {
    let request: SimulationRequest = serde_json::from_value(json!({
        "netlist": LIBRARY,
        "subckt": {"name": "INV", "pins": ["A", "Y", "VDD", "VSS"]},
        "params": {"VDD": "1.8", "TSTOP": 2e-9},
        "pin_drives": {"A": {"type": "pulse", "v2": 1.8}}
    }))
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("inv.txt");
    let prepared = request
        .prepare(&AliasConfig::default(), &results_path)
        .unwrap();
    assert_eq!(prepared.params.supply_voltage, 1.8);
    assert_eq!(prepared.labels, ["v(A)", "v(Y)"]);
    assert!(prepared.document.contains("VDD_SRC VDD 0 1.8\n"));

    // Stand in for the simulator.
    fs::write(&results_path, inverter_output(20, true)).unwrap();

    let waves = read_wrdata(&results_path, &prepared.labels).unwrap();
    assert_eq!(waves.points(), 20);
    assert_eq!(waves.labels().collect::<Vec<_>>(), ["v(A)", "v(Y)"]);
    assert_eq!(waves.value_at("v(A)", 0.0), Some(0.0));
    assert_eq!(waves.value_at("v(Y)", 0.0), Some(1.2));
    let mid = waves.value_at("v(A)", 6e-10).unwrap();
    assert!((mid - 1.2).abs() < 1e-12);
}

#[test]
fn test_extract_with_and_without_index() {
    let labels = ["v(a)", "v(y)"];
    let indexed = extract(&inverter_output(10, true), &labels).unwrap();
    let plain = extract(&inverter_output(10, false), &labels).unwrap();
    assert_eq!(indexed, plain);
    assert_eq!(indexed.channel("v(y)").map(<[f64]>::len), Some(10));
}

#[test]
fn test_extract_skips_simulator_noise() {
    let mut doc = String::from("Note: No compatibility mode selected!\n\n");
    doc.push_str(&inverter_output(4, false));
    doc.push_str("Warning: singular matrix: check node y\n");
    doc.push_str(&inverter_output(2, false));

    let waves = extract(&doc, &["v(a)", "v(y)"]).unwrap();
    assert_eq!(waves.points(), 6);

    let warnings = tail_warnings(&doc);
    assert_eq!(warnings, ["Warning: singular matrix: check node y"]);
}

#[test]
fn test_missing_results_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_wrdata(dir.path().join("never-written.txt"), &["v(a)"]).unwrap_err();
    assert!(matches!(err, ResultsError::Io(_)));
}
