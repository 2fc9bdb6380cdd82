use anyhow::{bail, Result};
use scrollsnap_core::decision::{decide, SnapQuery, ThresholdPolicy};
use scrollsnap_core::{AppConfig, Heading};

pub struct DecideArgs {
    pub offset: f64,
    pub length: f64,
    pub last_valid: f64,
    pub extent: f64,
    pub heading: Heading,
    /// Falls back to the configured threshold
    pub threshold: Option<f64>,
    pub snap_stop: bool,
    pub programmatic: bool,
    pub json: bool,
}

pub fn run(config: &AppConfig, args: DecideArgs) -> Result<()> {
    let query = build_query(config, &args)?;
    let target = decide(&query);

    if args.json {
        let report = serde_json::json!({
            "offset": args.offset,
            "snap_length": args.length,
            "heading": format!("{:?}", args.heading).to_lowercase(),
            "threshold": query.policy.threshold,
            "snap_stop": query.policy.snap_stop,
            "target": target,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", target);
    }
    tracing::debug!(
        offset = args.offset,
        target,
        heading = ?args.heading,
        "Decided snap point"
    );
    Ok(())
}

fn build_query(config: &AppConfig, args: &DecideArgs) -> Result<SnapQuery> {
    if !args.length.is_finite() || args.length <= 0.0 {
        bail!("Snap length must be a positive number, got {}", args.length);
    }
    if !args.extent.is_finite() || args.extent < 0.0 {
        bail!("Extent must be a non-negative number, got {}", args.extent);
    }
    let threshold = args.threshold.unwrap_or(config.snap.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        bail!("Threshold must be between 0 and 1, got {}", threshold);
    }

    Ok(SnapQuery {
        heading: args.heading,
        snap_length: args.length,
        current_offset: args.offset,
        last_valid_point: args.last_valid,
        extent: args.extent,
        policy: ThresholdPolicy {
            threshold,
            snap_stop: args.snap_stop || config.snap.snap_stop,
        },
        programmatic: args.programmatic,
    })
}
