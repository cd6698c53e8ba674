use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use traverse::api::{build_traverse, estimate_area_with, parse_traverse};
use traverse::classify::{ClassifyCfg, ParityProbe};
use traverse::estimate::{EstimateCfg, QueueOrder};

mod provenance;
mod report;

use provenance::Payload;
use report::{AreaReport, TraverseReport};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Estimate the enclosed area of a closed survey traverse")]
struct Cmd {
    /// Log library progress at debug level
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Whitespace-separated heading/distance pairs
    #[arg(long, conflicts_with = "input")]
    data: Option<String>,
    /// File holding heading/distance pairs; stdin when neither flag is given
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Order {
    Fifo,
    Largest,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Probe {
    Center,
    TopLeft,
}

#[derive(Subcommand)]
enum Action {
    /// Estimate the area to a relative error bound
    Area {
        #[command(flatten)]
        src: InputArgs,
        /// Maximum relative error, within (0, 0.5)
        #[arg(long, default_value_t = 0.1)]
        error: f64,
        #[arg(long, value_enum, default_value_t = Order::Fifo)]
        order: Order,
        #[arg(long)]
        max_depth: Option<u32>,
        /// Cap on classified boxes
        #[arg(long)]
        max_boxes: Option<usize>,
        #[arg(long, value_enum, default_value_t = Probe::Center)]
        probe: Probe,
        /// Write the full JSON result (and a provenance sidecar) here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the closure-adjusted polygon and bounds as JSON
    Polygon {
        #[command(flatten)]
        src: InputArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Area {
            src,
            error,
            order,
            max_depth,
            max_boxes,
            probe,
            out,
        } => {
            let cfg = estimate_cfg(error, order, max_depth, max_boxes, probe);
            area(&src, &cfg, out.as_deref())
        }
        Action::Polygon { src } => polygon(&src),
        Action::Report => report(),
    }
}

fn estimate_cfg(
    error: f64,
    order: Order,
    max_depth: Option<u32>,
    max_boxes: Option<usize>,
    probe: Probe,
) -> EstimateCfg {
    let base = EstimateCfg::with_max_rel_error(error);
    EstimateCfg {
        order: match order {
            Order::Fifo => QueueOrder::Fifo,
            Order::Largest => QueueOrder::LargestFirst,
        },
        max_depth: max_depth.unwrap_or(base.max_depth),
        max_classifications: max_boxes.unwrap_or(base.max_classifications),
        classify: ClassifyCfg {
            probe: match probe {
                Probe::Center => ParityProbe::Center,
                Probe::TopLeft => ParityProbe::TopLeftCorner,
            },
            ..base.classify
        },
        ..base
    }
}

fn read_input(src: &InputArgs) -> Result<String> {
    if let Some(data) = &src.data {
        return Ok(data.clone());
    }
    if let Some(path) = &src.input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading stdin")?;
    Ok(buf)
}

/// Parse, build and estimate; returns the JSON report.
fn compute_area(text: &str, cfg: &EstimateCfg) -> Result<AreaReport> {
    let measurements = parse_traverse(text)?;
    let trav = build_traverse(&measurements)?;
    tracing::info!(
        measurements = measurements.len(),
        misclosure = trav.misclosure().norm(),
        "traverse"
    );
    let est = estimate_area_with(trav.polygon(), trav.bounds(), cfg)?;
    tracing::info!(
        area = est.area,
        relative_error = est.relative_error(),
        boxes = est.boxes.len(),
        classified = est.stats.classified,
        "estimate"
    );
    Ok(AreaReport::new(&trav, &est))
}

fn area(src: &InputArgs, cfg: &EstimateCfg, out: Option<&Path>) -> Result<()> {
    tracing::info!(
        max_rel_error = cfg.max_rel_error,
        order = ?cfg.order,
        max_depth = cfg.max_depth,
        max_boxes = cfg.max_classifications,
        "area"
    );
    let text = read_input(src)?;
    let rep = compute_area(&text, cfg)?;
    println!("Area is {}", rep.area);
    if let Some(out) = out {
        write_result(out, &rep, cfg, src)?;
    }
    Ok(())
}

fn write_result(out: &Path, rep: &AreaReport, cfg: &EstimateCfg, src: &InputArgs) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(rep)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let params = serde_json::json!({
        "input": src.input.as_ref().map(|p| p.display().to_string()),
        "max_rel_error": cfg.max_rel_error,
        "order": format!("{:?}", cfg.order),
        "max_depth": cfg.max_depth,
        "max_classifications": cfg.max_classifications,
        "probe": format!("{:?}", cfg.classify.probe),
    });
    let prov = provenance::write_sidecar(out, Payload::new("area", params))?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "written");
    Ok(())
}

fn polygon(src: &InputArgs) -> Result<()> {
    let text = read_input(src)?;
    let trav = build_traverse(&parse_traverse(&text)?)?;
    let rep = TraverseReport::from(&trav);
    println!("{}", serde_json::to_string_pretty(&rep)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::block(&Payload::new("report", serde_json::json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SQUARE: &str = "0 10 90 10 180 10 270 10";

    #[test]
    fn cli_flags_map_onto_cfg() {
        let cfg = estimate_cfg(0.05, Order::Largest, Some(12), None, Probe::TopLeft);
        assert_eq!(cfg.max_rel_error, 0.05);
        assert_eq!(cfg.order, QueueOrder::LargestFirst);
        assert_eq!(cfg.max_depth, 12);
        assert_eq!(
            cfg.max_classifications,
            EstimateCfg::default().max_classifications
        );
        assert_eq!(cfg.classify.probe, ParityProbe::TopLeftCorner);
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
        let cmd = Cmd::try_parse_from(["cli", "area", "--data", SQUARE, "--error", "0.2"])
            .unwrap();
        assert!(matches!(cmd.action, Action::Area { error, .. } if error == 0.2));
        assert!(
            Cmd::try_parse_from(["cli", "area", "--data", SQUARE, "--input", "x.txt"]).is_err()
        );
    }

    #[test]
    fn read_input_prefers_data_then_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lot.txt");
        std::fs::write(&path, "0 3\n120 3\n240 3\n").unwrap();
        let from_file = InputArgs {
            data: None,
            input: Some(path),
        };
        assert_eq!(read_input(&from_file).unwrap(), "0 3\n120 3\n240 3\n");
        let inline = InputArgs {
            data: Some(SQUARE.into()),
            input: None,
        };
        assert_eq!(read_input(&inline).unwrap(), SQUARE);
        let missing = InputArgs {
            data: None,
            input: Some(dir.path().join("absent.txt")),
        };
        assert!(read_input(&missing).is_err());
    }

    #[test]
    fn compute_area_reports_square() {
        let rep = compute_area(SQUARE, &EstimateCfg::with_max_rel_error(0.1)).unwrap();
        assert!((rep.area - 100.0).abs() <= 10.0);
        assert_eq!(rep.traverse.polygon.len(), 5);
        assert_eq!(rep.traverse.polygon[0], rep.traverse.polygon[4]);
        assert!(rep.stats.classified >= rep.boxes.len());
    }

    #[test]
    fn compute_area_surfaces_errors_verbatim() {
        let err = compute_area("0 10 90", &EstimateCfg::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "need a distance for every heading (3 tokens given)"
        );
        let err = compute_area(SQUARE, &EstimateCfg::with_max_rel_error(0.6)).unwrap_err();
        assert_eq!(err.to_string(), "error 0.6 must be within (0, 0.5)");
    }

    #[test]
    fn write_result_emits_json_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("runs").join("square.json");
        let cfg = EstimateCfg::with_max_rel_error(0.1);
        let rep = compute_area(SQUARE, &cfg).unwrap();
        let src = InputArgs {
            data: Some(SQUARE.into()),
            input: None,
        };
        write_result(&out, &rep, &cfg, &src).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(parsed["boxes"].as_array().unwrap().len(), rep.boxes.len());
        assert_eq!(parsed["traverse"]["bounds"].as_array().unwrap().len(), 4);
        let prov = dir.path().join("runs").join("square.provenance.json");
        let prov: serde_json::Value =
            serde_json::from_slice(&std::fs::read(prov).unwrap()).unwrap();
        assert_eq!(prov["params"]["order"], "Fifo");
    }
}
