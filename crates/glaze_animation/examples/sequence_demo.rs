//! Sequence Orchestration Demo
//!
//! This example drives step sequences headlessly at 60 fps:
//! - A glass card entrance loaded from a TOML definition
//! - Hooks and observers reporting step transitions
//! - A staggered parallel cascade built from presets
//!
//! Run with: cargo run -p glaze_animation --example sequence_demo

use glaze_animation::{
    AnimationPreset, ManualFrames, Orchestrator, OrchestratorBuilder, SequenceDefinition,
    StyleOverrides, TransformSnapshot,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

const GLASS_CARD: &str = r#"
[config]
auto_play = true

[[step]]
id = "card"
duration_ms = 320
easing = "ease-out"
transform = { translate_y = -24.0, opacity = 1.0 }

[[step]]
id = "glass"
duration_ms = 240
delay_ms = 40
easing = "cubic-bezier(0, 0.6, 1.0, 1)"
transform = { scale = 1.02 }
style = { backdrop-filter = "blur(12px)", background = "rgba(255, 255, 255, 0.12)" }
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut card = glass_card()?;
    run_to_completion("glass card", &mut card)?;

    let entrance = AnimationPreset::entrance_cascade(&["title", "body", "cta"], 300, 80);
    let mut cascade = OrchestratorBuilder::from(entrance).sink(paint).build()?;
    cascade.play();
    run_to_completion("cascade", &mut cascade)?;

    Ok(())
}

fn glass_card() -> anyhow::Result<Orchestrator> {
    let mut sequence = SequenceDefinition::from_toml_str(GLASS_CARD)?.into_sequence();

    // Hooks cannot be declared in TOML; attach them to the built steps
    sequence.steps = sequence
        .steps
        .into_iter()
        .map(|step| {
            let id = step.id().to_string();
            step.on_complete(move || {
                tracing::info!(step = %id, "step finished");
                Ok(())
            })
        })
        .collect();

    let mut orchestrator = OrchestratorBuilder::from(sequence)
        .sink(paint)
        .frames(ManualFrames::new())
        .build()?;

    orchestrator.subscribe(|state| {
        tracing::debug!(
            step = state.current_step_index,
            progress = state.progress,
            "state"
        );
    });
    Ok(orchestrator)
}

fn paint(step_id: &str, transform: &TransformSnapshot, style: Option<&StyleOverrides>) {
    let (x, y) = transform.resolved_translate();
    tracing::info!(
        step = step_id,
        x,
        y,
        scale = transform.resolved_scale(),
        opacity = transform.resolved_opacity(),
        styled = style.is_some(),
        "paint"
    );
}

fn run_to_completion(name: &str, orchestrator: &mut Orchestrator) -> anyhow::Result<()> {
    tracing::info!(
        name,
        total_ms = orchestrator.total_duration_ms(),
        "running sequence"
    );

    let mut now = 0.0;
    while orchestrator.wants_frame() {
        orchestrator.tick(now)?;
        now += FRAME_MS;
    }

    tracing::info!(name, frames = (now / FRAME_MS).round(), "sequence complete");
    Ok(())
}
