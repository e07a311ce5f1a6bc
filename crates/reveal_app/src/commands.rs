use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use engine_logging::{engine_debug, engine_info};
use reveal_core::TabPanelCatalog;
use reveal_engine::{
    catalog_to_ron, decode_page, load_catalog, AtomicFileWriter, FlowLayout, InitReport,
    PageRuntime, RuntimeOptions, Viewport,
};
use serde::Serialize;

use crate::cli::{EnhanceArgs, TraceArgs};

/// Virtual time allowed after the last scroll step for staggered reveals to land.
const TRACE_SETTLE_MS: u64 = 1_000;

pub fn enhance(args: &EnhanceArgs) -> Result<()> {
    let html = read_page(&args.input)?;
    let options = RuntimeOptions {
        catalog: panel_catalog(args.panels.as_deref())?,
        seed: args.seed,
        ..RuntimeOptions::default()
    };
    let mut runtime = PageRuntime::new(&html, FlowLayout::default(), options);
    if let Some(report) = runtime.init() {
        log_report(&report);
    }
    runtime.advance(args.settle_ms);
    // The written page carries no script, so nothing could reveal the rest later.
    runtime.reveal_all();

    let enhanced = runtime.html();
    match &args.output {
        Some(path) => write_atomically(path, &enhanced)?,
        None => io::stdout()
            .write_all(enhanced.as_bytes())
            .context("failed to write to stdout")?,
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct TraceEvent {
    at_ms: u64,
    role: &'static str,
    label: String,
}

#[derive(Debug, Serialize)]
struct TraceSummary {
    events: Vec<TraceEvent>,
    visible: usize,
    tracked: usize,
    elapsed_ms: u64,
}

pub fn trace(args: &TraceArgs) -> Result<()> {
    let html = read_page(&args.input)?;
    let options = RuntimeOptions {
        catalog: panel_catalog(args.panels.as_deref())?,
        seed: args.seed,
        viewport: Viewport::new(args.viewport_height),
        ..RuntimeOptions::default()
    };
    let mut runtime = PageRuntime::new(&html, FlowLayout::default(), options);
    if let Some(report) = runtime.init() {
        log_report(&report);
    }

    let summary = run_trace(&mut runtime, args.scroll_step, args.step_ms);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for event in &summary.events {
            println!("t={}ms {} {}", event.at_ms, event.role, event.label);
        }
        println!(
            "{}/{} targets visible after {}ms",
            summary.visible, summary.tracked, summary.elapsed_ms
        );
    }
    Ok(())
}

fn run_trace(runtime: &mut PageRuntime, scroll_step: f64, step_ms: u64) -> TraceSummary {
    let step = scroll_step.max(1.0);
    let bottom = (runtime.document_height() - runtime.viewport().height).max(0.0);
    let mut scroll_y = 0.0;
    loop {
        runtime.advance(step_ms);
        if scroll_y >= bottom {
            break;
        }
        scroll_y = (scroll_y + step).min(bottom);
        engine_debug!("scrolling to {scroll_y}px");
        runtime.scroll_to(scroll_y);
    }
    runtime.advance(TRACE_SETTLE_MS);

    let view = runtime.scheduler_view();
    TraceSummary {
        events: runtime
            .reveal_log()
            .iter()
            .map(|event| TraceEvent {
                at_ms: event.at_ms,
                role: event.role.as_str(),
                label: event.label.clone(),
            })
            .collect(),
        visible: view.visible,
        tracked: view.tracked,
        elapsed_ms: runtime.now_ms(),
    }
}

pub fn panels(output: Option<&Path>) -> Result<()> {
    let text = catalog_to_ron(&TabPanelCatalog::builtin())?;
    match output {
        Some(path) => write_atomically(path, &text)?,
        None => println!("{text}"),
    }
    Ok(())
}

fn read_page(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {path:?}"))?;
    let page = decode_page(&bytes).with_context(|| format!("failed to decode {path:?}"))?;
    engine_debug!("decoded {:?} as {}", path, page.encoding_label);
    Ok(page.html)
}

fn panel_catalog(path: Option<&Path>) -> Result<TabPanelCatalog> {
    match path {
        Some(path) => Ok(load_catalog(path)?),
        None => Ok(TabPanelCatalog::builtin()),
    }
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let (writer, filename) = AtomicFileWriter::for_path(path)?;
    let written = writer.write(&filename, content)?;
    engine_info!("wrote {:?}", written);
    Ok(())
}

fn log_report(report: &InitReport) {
    engine_info!(
        "hero {}, sections {}, cards {}, ticker {}, counters {}, panels filled {}",
        report.hero,
        report.sections,
        report.cards,
        report.ticker.is_some(),
        report.counters.len(),
        report.panels_filled
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PAGE: &str = r#"<html><head></head><body>
<section id="a"><p>one</p><p>two</p><p>three</p><p>four</p></section>
<section id="b"><p>five</p></section>
<footer><p>six</p><p>seven</p><p>eight</p><p>nine</p></footer>
</body></html>"#;

    fn write_page(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("index.html");
        fs::write(&path, PAGE).unwrap();
        path
    }

    #[test]
    fn enhance_writes_the_page_atomically() {
        let dir = TempDir::new().unwrap();
        let input = write_page(&dir);
        let output = dir.path().join("out").join("index.html");

        enhance(&EnhanceArgs {
            input,
            output: Some(output.clone()),
            panels: None,
            settle_ms: 0,
            seed: 0,
        })
        .unwrap();

        let html = fs::read_to_string(output).unwrap();
        assert!(html.contains("data-reveal-styles"));
        assert!(html.contains(r#"<section id="a" class="polar-animate visible">"#));
    }

    #[test]
    fn enhanced_page_has_no_target_left_hidden() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("long.html");
        let sections: String = (0..20)
            .map(|i| format!("<section id=\"s{i}\"><p>a</p><p>b</p><p>c</p><p>d</p></section>"))
            .collect();
        fs::write(&input, format!("<html><head></head><body>{sections}</body></html>")).unwrap();
        let output = dir.path().join("long.out.html");

        enhance(&EnhanceArgs {
            input,
            output: Some(output.clone()),
            panels: None,
            settle_ms: 10_000,
            seed: 0,
        })
        .unwrap();

        let html = fs::read_to_string(output).unwrap();
        assert_eq!(html.matches("class=\"polar-animate\"").count(), 0);
        assert_eq!(html.matches("class=\"polar-animate visible\"").count(), 20);
    }

    #[test]
    fn trace_reveals_sections_below_the_fold() {
        let mut runtime = PageRuntime::new(
            PAGE,
            FlowLayout::default(),
            RuntimeOptions {
                viewport: Viewport::new(100.0),
                ..RuntimeOptions::default()
            },
        );
        runtime.init();
        assert_eq!(runtime.reveal_log().len(), 1);

        let summary = run_trace(&mut runtime, 10.0, 100);
        assert_eq!(summary.visible, 2);
        assert_eq!(summary.events[1].label, "section#b");
        assert!(summary.events[1].at_ms > 0);
    }

    #[test]
    fn missing_panel_catalog_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.ron");
        assert!(panel_catalog(Some(missing.as_path())).is_err());
    }
}
