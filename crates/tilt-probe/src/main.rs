use anyhow::Context;
use clap::{Parser, ValueEnum};
use glam::{Vec2, Vec3};
use std::io::{self, BufWriter, Write};
use tilt_core::{Phase, SpringPreset, SurfaceBounds, TickOutcome, TiltCard, TiltConfig};

/// Simulate a pointer over a tilt card and print the per-frame trajectory as CSV.
#[derive(Parser, Debug)]
#[command(name = "tilt-probe", version)]
struct Args {
    #[arg(long, value_enum, default_value_t = PresetArg::Gentle)]
    preset: PresetArg,
    /// Rotation at the card edge, in degrees
    #[arg(long, default_value_t = tilt_core::DEFAULT_MAX_TILT_DEG)]
    max_deg: f32,
    #[arg(long, default_value_t = 288.0)]
    width: f32,
    #[arg(long, default_value_t = 384.0)]
    height: f32,
    #[arg(long, value_enum, default_value_t = PathArg::Corner)]
    path: PathArg,
    /// Frames of hovering before the pointer leaves
    #[arg(long, default_value_t = 60)]
    hover_frames: u32,
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Give up if the card has not come to rest after this many frames
    #[arg(long, default_value_t = 1200)]
    max_frames: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Gentle,
    Snappy,
}

impl From<PresetArg> for SpringPreset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Gentle => SpringPreset::Gentle,
            PresetArg::Snappy => SpringPreset::Snappy,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PathArg {
    /// Pointer parked at the card center
    Center,
    /// Pointer parked at the top-right corner
    Corner,
    /// Pointer sweeping left to right along a diagonal
    Sweep,
}

impl PathArg {
    /// Surface-local pointer position at `frame` of `total` hover frames.
    fn position(self, size: Vec2, frame: u32, total: u32) -> Vec2 {
        match self {
            PathArg::Center => size * 0.5,
            PathArg::Corner => Vec2::new(size.x, 0.0),
            PathArg::Sweep => {
                let t = frame as f32 / total.max(1) as f32;
                size * Vec2::new(t, 1.0 - t)
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = TiltConfig::from_preset(args.preset.into()).with_max_deg(args.max_deg);
    config.validate().context("invalid tilt configuration")?;
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }
    let bounds = SurfaceBounds::new(0.0, 0.0, args.width, args.height);
    if !bounds.is_measurable() {
        log::warn!("card is {}x{}; every sample will be skipped", args.width, args.height);
    }
    log::info!(
        "preset={:?} damping_ratio={:.3} overshoot_bound={:.3}",
        args.preset,
        config.spring.damping_ratio(),
        config.spring.overshoot_bound()
    );

    let dt = 1.0 / args.fps;
    let size = bounds.size();
    let mut card = TiltCard::new(config);
    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "frame,phase,offset_x,offset_y,rotate_x,rotate_y,corner_z")?;

    let mut frame = 0u32;
    while frame < args.hover_frames {
        let p = args.path.position(size, frame, args.hover_frames);
        card.pointer_move(p.x, p.y, Some(bounds));
        let outcome = card.tick(dt);
        write_row(&mut out, frame, &outcome, size)?;
        frame += 1;
    }

    card.pointer_leave();
    log::debug!("pointer left at frame {}", frame);
    while card.phase() != Phase::Idle {
        if frame >= args.max_frames {
            log::warn!("card still {:?} after {} frames", card.phase(), frame);
            break;
        }
        let outcome = card.tick(dt);
        write_row(&mut out, frame, &outcome, size)?;
        frame += 1;
    }
    out.flush()?;
    log::info!("done after {} frames", frame);
    Ok(())
}

fn write_row(out: &mut impl Write, frame: u32, o: &TickOutcome, size: Vec2) -> io::Result<()> {
    // Depth of the top-right corner after rotation; negative means it dipped away
    let corner = o.transform.apply(Vec3::new(size.x * 0.5, -size.y * 0.5, 0.0));
    writeln!(
        out,
        "{},{:?},{:.5},{:.5},{:.4},{:.4},{:.3}",
        frame,
        o.phase,
        o.offset.x,
        o.offset.y,
        o.transform.rotate_x_deg,
        o.transform.rotate_y_deg,
        corner.z
    )
}
