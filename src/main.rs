use std::sync::Arc;

use anyhow::Context;

use glucolens_intake::config::IntakeConfig;
use glucolens_intake::gateway::{AnalysisTransport, HttpTransport, MockTransport};
use glucolens_intake::intake::record::{ActivityLevel, Attachment, Gender, IntakeUpdate};
use glucolens_intake::progress::ProgressReporter;
use glucolens_intake::session::IntakeSession;

/// Demo driver: walks a complete intake session and renders the staged
/// analysis progress, against either the mock transport (default) or the
/// real API when `GLUCOLENS_USE_MOCK=0`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = IntakeConfig::from_env().context("invalid configuration")?;
    let use_mock = std::env::var("GLUCOLENS_USE_MOCK").map(|v| v != "0").unwrap_or(true);

    eprintln!("🩺 Glucolens Intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {}", config.api_base_url);
    eprintln!(
        "   Transport: {}",
        if use_mock { "mock (set GLUCOLENS_USE_MOCK=0 for HTTP)" } else { "http" }
    );
    eprintln!();

    let transport: Arc<dyn AnalysisTransport> = if use_mock {
        Arc::new(MockTransport::new())
    } else {
        Arc::new(HttpTransport::new(&config).map_err(|e| anyhow::anyhow!(e))?)
    };

    let mut session =
        IntakeSession::with_reporter(transport, ProgressReporter::from_config(&config));

    // Step 1: anthropometrics
    session.update(
        IntakeUpdate::new()
            .age(34)
            .gender(Gender::Female)
            .height_cm(168.0)
            .weight_kg(64.5)
            .waist_cm(78.0),
    )?;
    eprintln!("▸ {} complete", session.cursor());
    session.advance()?;

    // Step 2: lifestyle
    session.update(
        IntakeUpdate::new()
            .activity_level(ActivityLevel::Light)
            .sleep_hours(7.5)
            .family_history(true),
    )?;
    eprintln!("▸ {} complete", session.cursor());
    session.advance()?;

    // Step 3: physical signs (mandatory image)
    session.update(
        IntakeUpdate::new().attach_signs_image(
            Attachment::new("neck.jpg", vec![0xFF, 0xD8, 0xFF]).with_media_type("image/jpeg"),
        ),
    )?;
    eprintln!("▸ {} complete", session.cursor());
    session.advance()?;

    // Step 4: lab results, skipped.
    eprintln!("▸ {} skipped", session.cursor());
    session.advance()?;

    // Step 5: genomic, optional. Attach one anyway.
    session.update(
        IntakeUpdate::new()
            .attach_genomic_file(Attachment::new("genome_raw.txt", b"rs4988235\tAA".to_vec())),
    )?;
    eprintln!("▸ {} complete", session.cursor());

    let ack = session.finish().await?;
    eprintln!(
        "✓ submission acknowledged (correlation: {}, risk hint: {})",
        ack.correlation_id.as_deref().unwrap_or("-"),
        ack.risk_hint.as_deref().unwrap_or("-"),
    );

    // Render the staged progress until the run completes.
    let mut rx = session.progress().expect("analysis run is active");
    let render = tokio::spawn(async move {
        let mut last_label = "";
        while rx.changed().await.is_ok() {
            let state = rx.borrow().clone();
            if state.stage_label != last_label {
                eprintln!("  {}", state.stage_label);
                last_label = state.stage_label;
            }
            eprint!("\r  {:>5.1}%", state.percent_complete);
        }
        eprintln!();
    });

    session.await_completion().await?;
    render.await.ok();
    eprintln!("✓ analysis complete — session reset to {}", session.cursor());

    Ok(())
}
