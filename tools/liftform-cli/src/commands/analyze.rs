//! Replay a detection log through a movement analysis session.

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use liftform_frame_model::frame::read_frames;
use liftform_frame_model::report::{FrameReport, MetricsSnapshot, SessionSummary};
use liftform_processing_core::MovementAnalyzer;

/// JSON document written by `analyze --json`.
#[derive(Debug, Serialize)]
struct AnalysisOutput {
    source: PathBuf,
    generated_at: String,
    summary: SessionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    frames: Option<Vec<FrameReport>>,
}

pub fn run(
    path: PathBuf,
    exercise: String,
    config: Option<PathBuf>,
    json: bool,
    include_frames: bool,
) -> anyhow::Result<()> {
    let config = super::load_analysis_config(config)?;

    // Reject a bad exercise name before touching the log.
    let mut analyzer = MovementAnalyzer::from_exercise_name(&exercise, &config)?;

    let frames = read_frames(&path)
        .with_context(|| format!("Failed to load detection log {}", path.display()))?;
    tracing::info!(
        frames = frames.len(),
        exercise = %analyzer.exercise(),
        "replaying detection log"
    );

    let reports = analyzer.run(frames.iter().map(|frame| &frame.labels));
    let summary = analyzer.summary();

    if json {
        let output = AnalysisOutput {
            source: path,
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary,
            frames: include_frames.then_some(reports),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Analyzing {} at: {}", summary.exercise, path.display());
    println!("  Frames processed: {}", summary.frames_processed);
    println!("  Repetitions: {}", summary.repetitions);
    println!("  Frames flagged for injury risk: {}", summary.risk_frames);

    if include_frames {
        println!();
        println!("Frames:");
        for report in &reports {
            print_frame(report);
        }
    }

    println!();
    match &summary.metrics {
        Some(metrics) => print_metrics(metrics),
        None => println!("No metrics: form and depth were not both detected."),
    }

    Ok(())
}

fn print_frame(report: &FrameReport) {
    let fmt = |v: Option<f64>| v.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".into());
    println!(
        "  #{:<5} form={:<6} depth={:<6} smoothed={:.3} reps={}{} risk={}",
        report.frame_index,
        fmt(report.form),
        fmt(report.depth),
        report.smoothed_form,
        report.repetitions,
        if report.rep_completed { "*" } else { " " },
        report.risk
    );
}

fn print_metrics(metrics: &MetricsSnapshot) {
    let assessment = &metrics.movement_assessment;

    println!("Movement assessment:");
    println!("  Score: {:.1}/10", assessment.score);
    println!("  Frames analyzed: {}", metrics.frames_analyzed);
    println!(
        "  Form:  avg {:.3} (min {:.3}, max {:.3}) quality {}, consistency {}",
        metrics.form_metrics.average,
        metrics.form_metrics.min,
        metrics.form_metrics.max,
        assessment.form_quality,
        assessment.form_consistency
    );
    println!(
        "  Depth: avg {:.3} (min {:.3}, max {:.3}) quality {}, consistency {}",
        metrics.depth_metrics.average,
        metrics.depth_metrics.min,
        metrics.depth_metrics.max,
        assessment.depth_quality,
        assessment.depth_consistency
    );
}
