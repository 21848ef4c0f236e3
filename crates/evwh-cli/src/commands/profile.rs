//! Profile command implementation - descriptive statistics of the raw data

use anyhow::{Context, Result};
use evwh_transform::profile::Profile;

use crate::cli::{GlobalArgs, ProfileArgs, ProfileOutput};
use crate::commands::common::{extract_dataset, load_config};

/// Execute the profile command
pub(crate) fn execute(args: &ProfileArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let (dataset, _) = extract_dataset(args.input.as_deref(), &config)?;
    let profile = evwh_transform::profile(&dataset, args.top);

    match args.output {
        ProfileOutput::Text => print!("{}", render(&profile)),
        ProfileOutput::Json => {
            let json =
                serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn render(profile: &Profile) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Rows: {}\nColumns: {}\n",
        profile.rows, profile.columns
    ));

    if !profile.missing.is_empty() {
        out.push_str("\nMissing values:\n");
        for stat in &profile.missing {
            out.push_str(&format!(
                "  {:<50} {:>8} ({:.2}%)\n",
                stat.field.canonical_name(),
                stat.count,
                stat.percent
            ));
        }
    }

    if !profile.numeric.is_empty() {
        out.push_str("\nNumeric summaries:\n");
        for (field, s) in &profile.numeric {
            let std_dev = s
                .std_dev
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  {}: count={} mean={:.2} std={} min={} p25={} median={} p75={} max={}\n",
                field, s.count, s.mean, std_dev, s.min, s.p25, s.median, s.p75, s.max
            ));
        }
    }

    if !profile.top_model_years.is_empty() {
        out.push_str("\nMost common model years:\n");
        for (year, count) in &profile.top_model_years {
            out.push_str(&format!("  {:<10} {}\n", year.to_string(), count));
        }
    }

    for (field, counts) in &profile.distributions {
        out.push_str(&format!("\n{}:\n", field));
        for (value, count) in counts {
            out.push_str(&format!("  {:<50} {}\n", value.to_string(), count));
        }
    }
    out
}
