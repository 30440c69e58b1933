use std::path::Path;

use clap::Parser;

use birdscape::config::cli::{Cli, Command};
use birdscape::utils::error::ErrorSeverity;
use birdscape::utils::logger;
use birdscape::{
    most_active, AppConfig, GeoWindow, HotspotExplorer, HttpSoundscapeGenerator,
    SoundscapeArtifact, SoundscapeParams, SoundscapeSession, SpeciesResolver,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting birdscape CLI");

    // Startup configuration. A missing API key is fatal before any request.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let result = match cli.command {
        Command::Soundscape {
            lat,
            lng,
            radius_km,
            duration,
            style,
            output,
        } => run_soundscape(config, lat, lng, radius_km, duration, style, &output).await,
        Command::Hotspots {
            lat,
            lng,
            radius_km,
            back,
        } => run_hotspots(config, lat, lng, radius_km, back).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run_soundscape(
    config: AppConfig,
    lat: f64,
    lng: f64,
    radius_km: f64,
    duration: u32,
    style: Option<String>,
    output: &str,
) -> birdscape::Result<()> {
    let window = GeoWindow::build(lat, lng, radius_km)?;

    let resolver = SpeciesResolver::new(config.clone());
    let generator = HttpSoundscapeGenerator::new(config);
    let session = SoundscapeSession::new(resolver, generator);
    let params = SoundscapeParams {
        duration_secs: duration,
        style,
    };

    let outcome = session.run(&window, &params).await?;

    println!("🐦 {} species in the area:", outcome.species.len());
    for species in &outcome.species {
        println!("  {} ({})", species.common_name, species.scientific_name);
    }

    match outcome.artifact {
        SoundscapeArtifact::Audio {
            bytes,
            content_type,
        } => {
            if let Some(parent) = Path::new(output).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(output, &bytes)?;
            println!(
                "✅ Soundscape saved to: {} ({}, {} bytes)",
                output,
                content_type,
                bytes.len()
            );
        }
        SoundscapeArtifact::Url(url) => {
            println!("✅ Soundscape ready at: {}", url);
        }
    }

    Ok(())
}

async fn run_hotspots(
    config: AppConfig,
    lat: f64,
    lng: f64,
    radius_km: f64,
    back: u32,
) -> birdscape::Result<()> {
    let window = GeoWindow::build(lat, lng, radius_km)?;
    let explorer = HotspotExplorer::new(config);

    let hotspots = explorer.nearby(&window).await?;
    if hotspots.is_empty() {
        println!("No hotspots found within {} km.", window.radius_km());
        return Ok(());
    }

    println!(
        "📍 {} hotspots within {} km of ({}, {}):",
        hotspots.len(),
        window.radius_km(),
        lat,
        lng
    );
    println!("{:<40} {:>8}", "Name", "Species");
    for hotspot in &hotspots {
        let count = hotspot
            .num_species_all_time
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<40} {:>8}", hotspot.name, count);
    }

    if let Some(top) = most_active(&hotspots) {
        println!("\n🏆 Most active: {} ({})", top.name, top.loc_id);
        let species = explorer.species_at(&top.loc_id, back).await?;
        println!("Species observed there in the last {} days:", back);
        println!("{:<32} {:<32}", "Common Name", "Scientific Name");
        for s in &species {
            println!("{:<32} {:<32}", s.common_name, s.scientific_name);
        }
    }

    Ok(())
}
