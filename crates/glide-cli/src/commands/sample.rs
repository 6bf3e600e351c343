//! Trajectory sampling command

use anyhow::Result;
use glide_core::Vec3;
use glide_runtime::ScrollState;
use serde::Serialize;

pub struct SampleArgs {
    pub config: Option<String>,
    pub viewport: f64,
    pub from: f64,
    pub to: Option<f64>,
    pub steps: usize,
    pub format: String,
}

#[derive(Serialize)]
struct SampleRow {
    offset: f64,
    fraction: f64,
    segment: usize,
    t: f64,
    position: Vec3,
    rotation: Vec3,
}

pub fn run(args: SampleArgs) -> Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be at least 1");
    }
    if !(args.viewport > 0.0) {
        anyhow::bail!("--viewport must be positive, got {}", args.viewport);
    }

    let config = super::load_config(args.config.as_deref())?;
    let keyframes = config.keyframe_sequence()?;
    let mut scroll = ScrollState::new(config.scroll, args.viewport);
    let to = args.to.unwrap_or_else(|| scroll.reference_distance());

    let rows: Vec<SampleRow> = (0..=args.steps)
        .map(|i| {
            scroll.offset = args.from + (to - args.from) * i as f64 / args.steps as f64;
            let fraction = scroll.fraction();
            let segment = keyframes.segment(fraction);
            let target = keyframes.interpolate(fraction);
            SampleRow {
                offset: scroll.offset,
                fraction,
                segment: segment.index,
                t: segment.t,
                position: target.position,
                rotation: target.rotation,
            }
        })
        .collect();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "text" => print_table(&rows),
        other => anyhow::bail!("Unknown format: {} (expected text or json)", other),
    }

    Ok(())
}

fn print_table(rows: &[SampleRow]) {
    println!(
        "{:>9}  {:>7}  {:>3}  {:>6}  {:<26}  {}",
        "offset", "s", "seg", "t", "position", "rotation"
    );
    for row in rows {
        println!(
            "{:>9.1}  {:>7.4}  {:>3}  {:>6.3}  {:<26}  {}",
            row.offset,
            row.fraction,
            row.segment,
            row.t,
            fmt_vec3(row.position),
            fmt_vec3(row.rotation)
        );
    }
}

pub(crate) fn fmt_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}
