//! Evaluate injury risk for a single frame.

use std::path::PathBuf;

use liftform_frame_model::frame::FrameLabels;
use liftform_processing_core::MovementAnalyzer;

pub fn run(exercise: String, config: Option<PathBuf>, labels: Vec<String>) -> anyhow::Result<()> {
    let config = super::load_analysis_config(config)?;
    let analyzer = MovementAnalyzer::from_exercise_name(&exercise, &config)?;
    let labels = parse_labels(&labels)?;

    let exercise = analyzer.exercise();
    let risk = analyzer.risk(&labels);

    println!("Exercise: {exercise}");
    println!(
        "  {}: {}",
        exercise.primary_label(),
        format_confidence(labels.primary_form(exercise))
    );
    println!(
        "  {}: {}",
        exercise.depth_label(),
        format_confidence(labels.depth(exercise))
    );
    println!("Injury risk: {risk}");

    Ok(())
}

fn parse_labels(pairs: &[String]) -> anyhow::Result<FrameLabels> {
    let mut labels = FrameLabels::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected `name=value`, got '{pair}'"))?;
        let confidence: f64 = value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid confidence for '{name}': {e}"))?;
        labels.insert(name.trim(), confidence);
    }
    Ok(labels)
}

fn format_confidence(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "not detected".to_string())
}
