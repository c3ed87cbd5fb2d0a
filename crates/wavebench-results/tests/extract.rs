//! Extraction tests against files on disk.

use std::io::Write;

use tempfile::NamedTempFile;
use wavebench_results::{Error, Waveform, extract, extract_legacy, read_wrdata, tail_warnings};

const LABELS: [&str; 2] = ["v(A)", "v(Y)"];

/// Render waveforms the way `wrdata` writes them.
fn render(waves: &Waveform, with_index: bool) -> String {
    let mut out = String::new();
    for (i, t) in waves.time.iter().enumerate() {
        if with_index {
            out.push_str(&format!("{i} "));
        }
        out.push_str(&format!("{t:e}"));
        for series in waves.channels.values() {
            out.push_str(&format!("  {:e}", series[i]));
        }
        out.push('\n');
    }
    out
}

fn sample() -> Waveform {
    let mut doc = String::new();
    for i in 0..50 {
        let t = i as f64 * 1e-11;
        let a = if i < 25 { 0.0 } else { 1.2 };
        doc.push_str(&format!("{t:e} {a} {}\n", 1.2 - a));
    }
    extract(&doc, &LABELS).unwrap()
}

#[test]
fn test_round_trip_without_index() {
    let waves = sample();
    assert_eq!(extract(&render(&waves, false), &LABELS).unwrap(), waves);
}

#[test]
fn test_round_trip_with_index() {
    let waves = sample();
    assert_eq!(extract(&render(&waves, true), &LABELS).unwrap(), waves);
}

#[test]
fn test_noise_lines_skipped() {
    let waves = sample();
    let noisy = format!(
        "\nNo. of Data Rows : 50\n{}\nngspice-42 done\n0.0\n",
        render(&waves, true)
    );
    assert_eq!(extract(&noisy, &LABELS).unwrap(), waves);
}

#[test]
fn test_channel_lengths_match_time() {
    let waves = sample();
    assert_eq!(waves.points(), 50);
    for label in LABELS {
        assert_eq!(waves.channel(label).map(<[f64]>::len), Some(waves.points()));
    }
    assert_eq!(waves.labels().collect::<Vec<_>>(), LABELS);
}

#[test]
fn test_read_wrdata_file() {
    let waves = sample();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(render(&waves, true).as_bytes()).unwrap();

    let read = read_wrdata(file.path(), &LABELS).unwrap();
    assert_eq!(read, waves);
    assert_eq!(read.value_at("v(A)", 1e-9), Some(1.2));
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_wrdata(dir.path().join("sim.txt"), &LABELS).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_legacy_file_with_header() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Index time v(a) v(y)").unwrap();
    writeln!(file, "0 0.000000e+00 0.000000e+00 1.200000e+00").unwrap();
    writeln!(file, "1 1.000000e-11 6.000000e-01 6.000000e-01").unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let waves = extract_legacy(&text).unwrap();
    assert_eq!(waves.time, [0.0, 1e-11]);
    assert_eq!(waves.channel("v(y)"), Some(&[1.2, 0.6][..]));
}

#[test]
fn test_log_warnings() {
    let log = "Note: no compatibility mode\nWarning: singular matrix\n\
               doAnalyses: TRAN:  Timestep too small\nrun simulation(s) aborted\n\
               Error: no such vector v(q)\n";
    assert_eq!(
        tail_warnings(log),
        ["Warning: singular matrix", "Error: no such vector v(q)"]
    );
}
