//! Scripted scroll session through the full host

use super::sample::fmt_vec3;
use anyhow::{Context, Result};
use glide_animation::clip::{AnimationClip, AnimationTrack, Interpolation, TrackKey, TrackTarget};
use glide_animation::loader::load_clip_from_file;
use glide_animation::{SceneAsset, ScrollScene};
use glide_core::{SceneObject, Transform, Vec3};
use glide_runtime::{Host, HostEvent};
use serde::Serialize;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

pub struct SimulateArgs {
    pub config: Option<String>,
    pub clips: Vec<String>,
    pub viewport: f64,
    pub fps: f64,
    pub duration: Option<f64>,
    pub scroll: Vec<(f64, f64)>,
    pub load_delay: f64,
    pub every: usize,
    pub format: String,
}

#[derive(Serialize)]
struct FrameRow {
    frame: u64,
    time: f64,
    offset: f64,
    fraction: f64,
    loaded: bool,
    position: Option<Vec3>,
    rotation: Option<Vec3>,
    clip_time: Option<f64>,
    animating: bool,
}

/// Parse a `time:offset` scroll script entry.
pub fn parse_scroll_key(s: &str) -> Result<(f64, f64), String> {
    let (time, offset) = s
        .split_once(':')
        .ok_or_else(|| format!("expected time:offset, got '{}'", s))?;
    let time: f64 = time.trim().parse().map_err(|e| format!("invalid time: {}", e))?;
    let offset: f64 = offset
        .trim()
        .parse()
        .map_err(|e| format!("invalid offset: {}", e))?;
    Ok((time, offset))
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if !(args.fps > 0.0) {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }
    if !(args.viewport > 0.0) {
        anyhow::bail!("--viewport must be positive, got {}", args.viewport);
    }
    if !matches!(args.format.as_str(), "text" | "json") {
        anyhow::bail!("Unknown format: {} (expected text or json)", args.format);
    }

    let config = super::load_config(args.config.as_deref())?;
    let mut script = if args.scroll.is_empty() {
        default_script(config.scroll.reference_viewports * args.viewport)
    } else {
        args.scroll.clone()
    };
    script.sort_by(|a, b| a.0.total_cmp(&b.0));

    let last_key = script.last().map(|k| k.0).unwrap_or(0.0);
    let duration = args
        .duration
        .unwrap_or(last_key.max(args.load_delay) + config.tween.duration + 0.25);

    let mut host = Host::new(config.scroll, args.viewport);
    let mut scene = ScrollScene::new(config).context("Invalid scene config")?;
    let assets = scene.asset_sender();
    let id = host.mount(Box::new(scene))?;

    let mut loader = Some(spawn_loader(args.clips.clone()));
    let dt = 1.0 / args.fps;
    let frames = (duration * args.fps).ceil() as u64;
    let every = args.every.max(1) as u64;
    let mut last_offset = None;
    let mut rows = Vec::new();

    info!(frames, fps = args.fps, "simulating scroll session");

    for frame in 0..=frames {
        let time = frame as f64 * dt;

        if time >= args.load_delay {
            if let Some(handle) = loader.take() {
                let asset = handle
                    .join()
                    .map_err(|_| anyhow::anyhow!("Asset loader thread panicked"))??;
                debug!(time, "delivering asset");
                assets.send(asset).context("Scene dropped its asset channel")?;
            }
        }

        let offset = scroll_at(&script, time);
        if last_offset != Some(offset) {
            host.push(HostEvent::Scroll { offset });
            last_offset = Some(offset);
        }
        if frame > 0 {
            host.push(HostEvent::Frame { dt });
        }
        host.pump();

        if frame % every != 0 && frame != frames {
            continue;
        }
        let scene = host
            .system::<ScrollScene>(id)
            .context("Scene is no longer mounted")?;
        let object = scene.object();
        let row = FrameRow {
            frame,
            time,
            offset,
            fraction: host.scroll().fraction(),
            loaded: scene.is_loaded(),
            position: object.map(|o| o.transform.position),
            rotation: object.map(|o| o.transform.rotation),
            clip_time: scene.clip_time(),
            animating: scene.is_animating(),
        };
        if args.format == "text" {
            print_row(&row);
        }
        rows.push(row);
    }

    host.unmount(id)?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    }
    Ok(())
}

/// Scroll offset at `time`, linear between script entries and held past the ends.
fn scroll_at(script: &[(f64, f64)], time: f64) -> f64 {
    let Some(first) = script.first() else {
        return 0.0;
    };
    if time <= first.0 {
        return first.1;
    }
    for pair in script.windows(2) {
        let (t0, o0) = pair[0];
        let (t1, o1) = pair[1];
        if time <= t1 {
            let span = t1 - t0;
            if span <= 0.0 {
                return o1;
            }
            return o0 + (o1 - o0) * (time - t0) / span;
        }
    }
    script[script.len() - 1].1
}

/// Scroll from the top to the end of the reference distance and back a little.
fn default_script(distance: f64) -> Vec<(f64, f64)> {
    vec![(0.0, 0.0), (1.5, distance * 0.5), (3.0, distance), (3.5, distance * 0.8)]
}

fn spawn_loader(clips: Vec<String>) -> JoinHandle<Result<SceneAsset>> {
    thread::spawn(move || {
        if clips.is_empty() {
            return Ok(demo_asset());
        }
        let clips = clips
            .iter()
            .map(|path| {
                load_clip_from_file(&PathBuf::from(path))
                    .with_context(|| format!("Failed to load clip '{}'", path))
            })
            .collect::<Result<Vec<AnimationClip>>>()?;
        let mut object = SceneObject::new("model");
        for clip in &clips {
            for track in &clip.tracks {
                if object.node(&track.node).is_none() {
                    object = object.with_node(track.node.clone(), Transform::IDENTITY);
                }
            }
        }
        Ok(SceneAsset { object, clips })
    })
}

/// A laptop with a hinged screen and a two-second opening clip.
fn demo_asset() -> SceneAsset {
    let open = AnimationClip {
        name: "open".into(),
        duration: 2.0,
        tracks: vec![AnimationTrack {
            node: "screen".into(),
            target: TrackTarget::Rotation,
            interpolation: Interpolation::Linear,
            keys: vec![
                TrackKey::new(0.0, Vec3::new(-1.6, 0.0, 0.0)),
                TrackKey::new(2.0, Vec3::ZERO),
            ],
        }],
    };
    SceneAsset {
        object: SceneObject::new("laptop")
            .with_node("base", Transform::IDENTITY)
            .with_node("screen", Transform::IDENTITY),
        clips: vec![open],
    }
}

fn print_row(row: &FrameRow) {
    let fmt_opt = |v: Option<Vec3>| v.map(fmt_vec3).unwrap_or_else(|| "-".to_string());
    let clip = row
        .clip_time
        .map(|t| format!("{:.3}", t))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "#{:<5} t={:<6.3} offset={:<8.1} s={:<7.4} pos={:<26} rot={:<26} clip={}{}",
        row.frame,
        row.time,
        row.offset,
        row.fraction,
        fmt_opt(row.position),
        fmt_opt(row.rotation),
        clip,
        if row.animating { " *" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scroll_keys() {
        assert_eq!(parse_scroll_key("1.5:2000").unwrap(), (1.5, 2000.0));
        assert_eq!(parse_scroll_key(" 0 : 0 ").unwrap(), (0.0, 0.0));
        assert!(parse_scroll_key("1.5").is_err());
        assert!(parse_scroll_key("a:1").is_err());
    }

    #[test]
    fn scroll_script_is_piecewise_linear() {
        let script = [(0.0, 0.0), (1.0, 1000.0), (2.0, 500.0)];
        assert_eq!(scroll_at(&script, -1.0), 0.0);
        assert_eq!(scroll_at(&script, 0.5), 500.0);
        assert_eq!(scroll_at(&script, 1.5), 750.0);
        assert_eq!(scroll_at(&script, 9.0), 500.0);
        assert_eq!(scroll_at(&[], 1.0), 0.0);
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "glide_simulate_test_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    const HINGE_CLIP: &str = r#"
name = "open"
duration = 2.0

[[tracks]]
node = "screen"
target = "rotation"

[[tracks.keys]]
time = 0.0
value = [-1.6, 0.0, 0.0]

[[tracks.keys]]
time = 2.0
value = [0.0, 0.0, 0.0]

[[tracks]]
node = "screen"
target = "position"

[[tracks.keys]]
time = 0.0
value = [0.0, 0.1, 0.0]
"#;

    const FEET_CLIP: &str = r#"
name = "settle"
duration = 1.0

[[tracks]]
node = "feet"
target = "scale"

[[tracks.keys]]
time = 0.0
value = [1.0, 1.0, 1.0]
"#;

    #[test]
    fn demo_asset_when_no_clips_given() {
        let asset = spawn_loader(Vec::new()).join().unwrap().unwrap();
        assert_eq!(asset.clips.len(), 1);
        assert!(asset.object.node("screen").is_some());
    }

    #[test]
    fn loader_builds_nodes_for_clip_tracks() {
        let dir = temp_dir("nodes");
        let hinge = dir.join("open.anim.toml");
        let feet = dir.join("settle.anim.toml");
        std::fs::write(&hinge, HINGE_CLIP).unwrap();
        std::fs::write(&feet, FEET_CLIP).unwrap();

        let paths = vec![hinge.display().to_string(), feet.display().to_string()];
        let asset = spawn_loader(paths).join().unwrap().unwrap();

        assert_eq!(asset.object.name, "model");
        assert_eq!(asset.clips.len(), 2);
        // One node per distinct track target, in name order
        assert_eq!(asset.object.node_names().collect::<Vec<_>>(), vec!["feet", "screen"]);
        assert_eq!(asset.object.node("screen"), Some(&Transform::IDENTITY));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn loader_reports_missing_clip_files() {
        let dir = temp_dir("missing");
        let path = dir.join("absent.anim.toml").display().to_string();
        let err = spawn_loader(vec![path.clone()]).join().unwrap().unwrap_err();
        assert!(err.to_string().contains(&path));
        std::fs::remove_dir_all(&dir).ok();
    }
}
