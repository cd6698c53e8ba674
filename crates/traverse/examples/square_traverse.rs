//! Square traverse timing probe.
//!
//! Purpose
//! - Run the 10 x 10 square traverse through the whole pipeline at a few
//!   tolerances and print area, achieved relative error, work done, and time.

use std::time::Instant;

use traverse::api::measure_area;
use traverse::estimate::EstimateCfg;

fn main() {
    let text = "0 10 90 10 180 10 270 10";
    for tol in [0.2, 0.1, 0.05, 0.01, 0.001] {
        let start = Instant::now();
        let (trav, est) = measure_area(text, &EstimateCfg::with_max_rel_error(tol))
            .expect("square traverse estimates");
        let ms = start.elapsed().as_secs_f64() * 1e3;
        println!(
            "tol={tol} area={:.6} rel_err={:.6} boxes={} classified={} deepest={} misclosure={:.3e} time_ms={ms:.3}",
            est.area,
            est.relative_error(),
            est.boxes.len(),
            est.stats.classified,
            est.stats.deepest,
            trav.misclosure().norm(),
        );
    }
}
