//! Arc Anatomy - command line harness
//!
//! Builds a body from a template, lands a series of hits on it and prints the
//! resulting state as text or JSON.

use arc_anatomy::anatomy::{Body, BodyTemplate, HealingInfo};
use arc_anatomy::capacity::{Influences, NoEffects, SurvivalStats};
use arc_anatomy::core::config::{set_config, EngineConfig};
use arc_anatomy::core::error::{AnatomyError, Result};
use arc_anatomy::damage::{BodyTarget, DamageInfo, DamageType};
use arc_anatomy::report::BodyReport;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Anatomy sandbox - damage a body and inspect what is left
#[derive(Parser, Debug)]
#[command(name = "arc-anatomy")]
#[command(about = "Apply damage to a simulated body and report its capacities and abilities")]
struct Args {
    /// Body template TOML (defaults to the built-in human)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Engine config TOML overriding the default tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of hits to apply
    #[arg(long, default_value_t = 3)]
    hits: u32,

    /// Damage per hit
    #[arg(long, default_value_t = 2.0)]
    amount: f32,

    /// Damage type: blunt, sharp, pierce, poison, bleed, internal, burn
    #[arg(long = "type", default_value = "sharp")]
    damage_type: String,

    /// Region or organ name, "arm", "leg" or "blood"; random when omitted
    #[arg(long)]
    target: Option<String>,

    /// Heal this much (untargeted) after the hits
    #[arg(long)]
    heal: Option<f32>,

    /// Survival stats as calories,hydration,energy percentages
    #[arg(long, value_delimiter = ',', num_args = 3)]
    survival: Option<Vec<f32>>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Log every damage and healing step
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_damage_type(name: &str) -> Result<DamageType> {
    DamageType::all()
        .into_iter()
        .find(|t| format!("{:?}", t).eq_ignore_ascii_case(name))
        .ok_or_else(|| AnatomyError::InvalidConfig(format!("unknown damage type '{}'", name)))
}

fn parse_target(target: Option<&str>) -> BodyTarget {
    match target {
        None => BodyTarget::Random,
        Some(name) if name.eq_ignore_ascii_case("blood") => BodyTarget::Blood,
        Some(name) if name.eq_ignore_ascii_case("arm") => BodyTarget::AnyArm,
        Some(name) if name.eq_ignore_ascii_case("leg") => BodyTarget::AnyLeg,
        Some(name) => BodyTarget::Region(name.to_string()),
    }
}

/// Organ names become organ targets so Internal damage can reach them
fn refine_target(body: &Body, target: BodyTarget) -> BodyTarget {
    match target {
        BodyTarget::Region(name) if body.region(&name).is_none() && body.organ(&name).is_some() => {
            BodyTarget::Organ(name)
        }
        other => other,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &args.config {
        let config = EngineConfig::load(path)?;
        set_config(config)
            .map_err(|_| AnatomyError::InvalidConfig("engine config already set".to_string()))?;
    }

    let template = match &args.template {
        Some(path) => BodyTemplate::load(path)?,
        None => BodyTemplate::human(),
    };
    let mut body = template.build();
    tracing::info!("Built {} with {} regions", body.species, body.regions().len());

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let survival = match args.survival.as_deref() {
        Some([calories, hydration, energy]) => SurvivalStats::new(*calories, *hydration, *energy),
        _ => SurvivalStats::SATED,
    };
    let influences = Influences::new(&NoEffects, &survival);

    let damage_type = parse_damage_type(&args.damage_type)?;
    let target = refine_target(&body, parse_target(args.target.as_deref()));

    let mut hits = Vec::with_capacity(args.hits as usize);
    for i in 0..args.hits {
        let info = DamageInfo::new(args.amount, damage_type)
            .targeting(target.clone())
            .from_source("cli");
        hits.push(body.apply_damage(&info, &mut rng));

        if !body.classify(&influences).is_alive() {
            tracing::info!("{} died after {} hits", body.species, i + 1);
            break;
        }
    }

    if let Some(amount) = args.heal {
        let healed = body.heal(&HealingInfo::new(amount), &mut rng);
        tracing::info!("Healed {:.3} condition", healed.total());
    }

    let report = BodyReport::new(&body, &influences, hits);
    match args.format.as_str() {
        "json" => println!("{}", report.to_json()?),
        _ => {
            println!("seed {}", seed);
            for (i, hit) in report.hits.iter().enumerate() {
                println!(
                    "hit {}: {} (organ {}), {} effects",
                    i + 1,
                    hit.hit_part.as_deref().unwrap_or("nothing"),
                    hit.organ_hit.as_deref().unwrap_or("none"),
                    hit.triggered_effects.len()
                );
            }
            println!();
            print!("{}", report.summary());
        }
    }

    Ok(())
}
