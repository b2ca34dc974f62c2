use anyhow::{bail, Context, Result};
use log::*;
use mocap::bake::{self, JointTrack};
use mocap::RotationOrder;
use structopt::StructOpt;

use std::fs;
use std::path::{Path, PathBuf};

mod descriptor;

const DEFAULT_CONFIG: &str = "./mocap.toml";

#[derive(Debug, StructOpt)]
#[structopt(name = "mocap", about = "reads bvh and htr motion capture files")]
struct Opt {
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// TOML file with default import options
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(short, long)]
    bones_only: bool,

    #[structopt(short, long)]
    scale: Option<f64>,

    /// Rotation order to bake with, e.g. `zxy`
    #[structopt(short, long)]
    order: Option<String>,

    #[structopt(long)]
    start: Option<usize>,

    #[structopt(long)]
    end: Option<usize>,

    /// Seconds between keys
    #[structopt(long)]
    frame_time: Option<f64>,

    /// Only print joints whose name contains this
    #[structopt(short, long)]
    focus: Option<String>,
}

fn load_config(path: Option<&Path>) -> descriptor::Config {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG));
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if explicit => {
            error!("Failed to read config file {}: {}", path.display(), e);
            return Default::default();
        }
        Err(_) => return Default::default(),
    };
    match toml::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse config file: {}", e);
            Default::default()
        }
    }
}

fn print_track(track: &JointTrack) {
    let indent = track.depth * 2;
    println!(
        "{:indent$}{}: {} rotation keys, {} position keys",
        "",
        track.name,
        track.rotation.len(),
        track.position.len(),
        indent = indent
    );
    if let (Some(first), Some(last)) = (track.rotation.first(), track.rotation.last()) {
        println!(
            "{:indent$}  rotation {:?} -> {:?}",
            "",
            first.value,
            last.value,
            indent = indent
        );
    }
    if let (Some(first), Some(last)) = (track.position.first(), track.position.last()) {
        println!(
            "{:indent$}  position {:?} -> {:?}",
            "",
            first.value,
            last.value,
            indent = indent
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    info!("starting up");

    let opt = Opt::from_args();
    let config = load_config(opt.config.as_deref());
    debug!("{:?}", config);

    let mut options = config.options();
    options.bones_only |= opt.bones_only;
    if let Some(scale) = opt.scale {
        options.scale = scale;
    }
    if let Some(code) = &opt.order {
        let order = RotationOrder::from_code(code);
        if !order.is_valid() {
            bail!("unknown rotation order `{}`", code);
        }
        options.rotation_order = Some(order);
    }
    options.start_frame = opt.start.or(options.start_frame);
    options.end_frame = opt.end.or(options.end_frame);
    options.frame_time = opt.frame_time.or(options.frame_time);

    let skeleton = mocap::import(&opt.input)
        .with_context(|| format!("failed to import {}", opt.input.display()))?;
    print!("{}", skeleton);
    println!(
        "{} joints, {} frames, {}s per frame, rotation order {}, translation: {}",
        skeleton.len(),
        skeleton.frames,
        skeleton.frame_time,
        skeleton.rotation_order,
        skeleton.has_translation
    );

    let clip = bake::bake(&skeleton, &options).context("failed to bake motion")?;
    println!(
        "frames {}..{} over {}s, joint order {}",
        clip.start,
        clip.end,
        clip.duration(),
        clip.joint_order
    );
    let focus = opt.focus.as_deref().or_else(|| config.focus.as_deref());
    for track in clip
        .joints
        .iter()
        .filter(|t| focus.map_or(true, |f| t.name.contains(f)))
    {
        print_track(track);
    }
    Ok(())
}
