//! Subcommand implementations.
//!
//! Each command returns the text to emit; JSON results are pretty-printed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wavebench_core::{AliasConfig, AliasHints, AliasSets, RawParams, SimParams};
use wavebench_parser::{SubcktDefinition, analyze, infer, scan as scan_netlist};
use wavebench_results::{Waveform, extract_legacy, read_wrdata, tail_warnings};
use wavebench_testbench::{SimulationRequest, TemplateVars, render_template, template_from_netlist};

fn read_text(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}: {}", what, path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = read_text(path, what)?;
    serde_json::from_str(&text).with_context(|| format!("Invalid {}: {}", what, path.display()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Alias hints from `--hints`, if given.
pub fn read_hints(path: Option<&Path>) -> Result<Option<AliasHints>> {
    path.map(|p| read_json(p, "alias hints")).transpose()
}

/// Write to `output`, or stdout.
pub fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write output: {}", path.display())),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

pub fn scan(netlist: &Path, aliases: &AliasSets, with_params: bool) -> Result<String> {
    let text = read_text(netlist, "netlist")?;
    let summaries = analyze(&text, aliases)?;
    if with_params {
        to_json(&scan_netlist(&text, aliases))
    } else {
        to_json(&summaries)
    }
}

pub fn roles(netlist: &Path, subckt: Option<&str>, aliases: &AliasSets) -> Result<String> {
    let text = read_text(netlist, "netlist")?;
    analyze(&text, aliases)?;
    let definitions = scan_netlist(&text, aliases);

    let definition: &SubcktDefinition = match subckt {
        Some(name) => definitions
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .with_context(|| format!("No subcircuit named {} in {}", name, netlist.display()))?,
        None => &definitions[0],
    };
    log::info!("inferring roles for {}", definition.name);
    to_json(&infer(&definition.pins, aliases))
}

pub fn testbench(
    request: &Path,
    results: &Path,
    config: &AliasConfig,
    hints: Option<&AliasHints>,
) -> Result<String> {
    let mut request: SimulationRequest = read_json(request, "simulation request")?;
    if request.hints.is_none() {
        request.hints = hints.cloned();
    }
    let prepared = request.prepare(config, results)?;
    log::info!("result columns: time {}", prepared.labels.join(" "));
    Ok(prepared.document)
}

pub fn template(netlist: &Path) -> Result<String> {
    let text = read_text(netlist, "netlist")?;
    ensure!(!text.trim().is_empty(), "empty netlist: {}", netlist.display());
    Ok(template_from_netlist(&text))
}

pub fn render(
    template: &Path,
    params: Option<&Path>,
    nodes: &[String],
    vars: Option<&Path>,
    results: &Path,
) -> Result<String> {
    let template = read_text(template, "template")?;
    let raw: RawParams = match params {
        Some(path) => read_json(path, "parameters")?,
        None => RawParams::new(),
    };
    let vars: Option<TemplateVars> = vars.map(|p| read_json(p, "template variables")).transpose()?;
    Ok(render_template(
        &template,
        &SimParams::normalize(&raw),
        nodes,
        results,
        vars.as_ref(),
    ))
}

pub fn extract(results: &Path, labels: &[String], legacy: bool) -> Result<String> {
    let waveform: Waveform = if legacy {
        extract_legacy(&read_text(results, "results")?)?
    } else {
        if labels.is_empty() {
            bail!("at least one label is required");
        }
        read_wrdata(results, labels)
            .with_context(|| format!("Failed to extract waveforms from {}", results.display()))?
    };
    log::info!(
        "{} points, channels: {}",
        waveform.points(),
        waveform.labels().collect::<Vec<_>>().join(" ")
    );
    to_json(&waveform)
}

pub fn warnings(log: &Path) -> Result<String> {
    let text = read_text(log, "log")?;
    to_json(&tail_warnings(&text))
}
