//! List supported exercise types.

use liftform_frame_model::exercise::ExerciseType;

pub fn run() -> anyhow::Result<()> {
    println!("Supported exercises:");
    for exercise in ExerciseType::ALL {
        println!(
            "  {:<18} form label: {:<4} depth label: {}",
            exercise.as_str(),
            exercise.primary_label(),
            exercise.depth_label()
        );
    }
    Ok(())
}
