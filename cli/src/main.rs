// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use clap::Parser;
use layout_adsorb::{Axis, Engine, Guide, LineOwner, Rect};
use layout_adsorb_scene::Scene;
use nu_ansi_term::{Color, Style};
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Replay and inspect layout snapping scenes
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run every drag frame of a scene through the engine.
    Replay {
        /// Path to a KDL scene file.
        scene: PathBuf,
        /// Display in KDL format.
        #[arg(long)]
        kdl: bool,
    },

    /// List the reference lines and grid of a scene.
    Inspect {
        /// Path to a KDL scene file.
        scene: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay { scene, kdl } => {
            let scene = Scene::load(scene)?;
            let output = if kdl { replay_kdl(&scene) } else { replay(&scene) };
            print(&output);
        }

        Commands::Inspect { scene } => {
            let scene = Scene::load(scene)?;
            print(&inspect(&scene.engine()));
        }
    }

    Ok(())
}

fn print(output: &str) {
    let mut stdout = std::io::stdout().lock();
    let _res = stdout.write_all(output.as_bytes());
    let _res = stdout.flush();
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Vertical => "vertical",
        Axis::Horizontal => "horizontal",
    }
}

/// The coordinate a guide sits at, and where its span starts.
fn guide_position(guide: &Guide) -> (f64, f64) {
    match guide.axis {
        Axis::Vertical => (guide.left, guide.top),
        Axis::Horizontal => (guide.top, guide.left),
    }
}

fn replay(scene: &Scene) -> String {
    let mut output = String::new();
    let mut engine = scene.engine();

    if engine.active().is_none() {
        let _res = writeln!(
            &mut output,
            "{}",
            Color::Red.bold().paint("scene has no active rectangle")
        );
    }

    for (frame, &(dx, dy)) in scene.drags.iter().enumerate() {
        tracing::debug!(frame, dx, dy, "replaying drag frame");
        engine.calc_adsorb(dx, dy);

        let Some(rect) = engine.adsorb_active_rect() else {
            continue;
        };

        let state = engine.state();

        #[allow(clippy::ignored_unit_patterns)]
        let _res = fomat_macros::witeln!(
            &mut output,
            (Style::new().bold().paint(format!("Frame {frame}"))) " "
            "drag " (dx) "," (dy)
            (Color::Yellow.bold().paint("\n  Position: "))
            (rect.left) "," (rect.top)
            (Color::Yellow.bold().paint("\n  Size: "))
            (rect.width) " x " (rect.height)
            (Color::Yellow.bold().paint("\n  Snapped: "))
            if state.x.snapped { (Color::Green.paint("x ")) } else { (Color::Red.paint("x ")) }
            if state.y.snapped { (Color::Green.paint("y")) } else { (Color::Red.paint("y")) }
            (Color::Yellow.bold().paint("\n  Guides:"))
        );

        for guide in engine.ref_lines() {
            let (position, start) = guide_position(&guide);

            let _res = writeln!(
                &mut output,
                "    {:>10} @ {:>8} {} {}",
                Color::Magenta.paint(axis_name(guide.axis)),
                position,
                Color::Cyan.paint(format!("from {start} size {}", guide.size)),
                refs(&guide.ref_rects),
            );
        }
    }

    output
}

fn refs(rects: &[Rect]) -> String {
    let ids: Vec<String> = rects.iter().map(|rect| rect.id.to_string()).collect();
    format!("refs [{}]", ids.join(", "))
}

fn replay_kdl(scene: &Scene) -> String {
    let mut output = String::new();
    let mut engine = scene.engine();

    for (frame, &(dx, dy)) in scene.drags.iter().enumerate() {
        engine.calc_adsorb(dx, dy);

        let Some(rect) = engine.adsorb_active_rect() else {
            continue;
        };

        let state = engine.state();

        #[allow(clippy::ignored_unit_patterns)]
        let _res = fomat_macros::witeln!(
            &mut output,
            "frame " (frame) " dx=" (dx) " dy=" (dy) " {\n"
            "  rect " (rect.id) " left=" (rect.left) " top=" (rect.top)
            " width=" (rect.width) " height=" (rect.height) "\n"
            "  snapped"
            if state.x.snapped { " \"x\"" }
            if state.y.snapped { " \"y\"" }
            "\n"
        );

        for guide in engine.ref_lines() {
            let ids: Vec<String> = guide.ref_rects.iter().map(|r| r.id.to_string()).collect();

            let _res = writeln!(
                &mut output,
                "  guide \"{}\" left={} top={} size={} {{\n    refs {}\n  }}",
                guide.axis,
                guide.left,
                guide.top,
                guide.size,
                ids.join(" "),
            );
        }

        let _res = writeln!(&mut output, "}}");
    }

    output
}

fn inspect(engine: &Engine) -> String {
    let mut output = String::new();

    for axis in [Axis::Vertical, Axis::Horizontal] {
        let _res = writeln!(
            &mut output,
            "{}",
            Style::new()
                .bold()
                .paint(format!("{} lines", axis_name(axis)))
        );

        for (position, bucket) in engine.lines(axis).iter() {
            let owners: Vec<String> = bucket
                .iter()
                .map(|line| match line.owner {
                    LineOwner::Rect(id) => format!("rect {id} {}", line.kind),
                    LineOwner::Fixed => String::from("fixed"),
                })
                .collect();

            let _res = writeln!(
                &mut output,
                "  {:>10} {}",
                Color::Magenta.paint(format!("{position:.2}")),
                owners.join(", "),
            );
        }

        let grid: Vec<String> = engine.grid(axis).iter().map(f64::to_string).collect();

        let _res = writeln!(
            &mut output,
            "{} {}",
            Color::Yellow.bold().paint(format!("{} grid:", axis_name(axis))),
            if grid.is_empty() {
                String::from("none")
            } else {
                grid.join(", ")
            }
        );
    }

    output
}
