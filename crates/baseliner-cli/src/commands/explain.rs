//! Explain command - support details for one catalogued feature

use anyhow::bail;
use clap::Args;
use colored::Colorize;

use baseliner_core::{Browser, BrowserSupport, FeatureCatalog, FeatureDefinition};

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Feature id to explain (e.g. "css-has", "js-nullish-coalescing")
    #[arg(value_name = "FEATURE_ID")]
    pub feature_id: String,
}

impl ExplainArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let catalog = FeatureCatalog::builtin();

        let Some(feature) = catalog.lookup(&self.feature_id) else {
            bail!(
                "unknown feature id '{}'; run `baseliner features` for the full list",
                self.feature_id
            );
        };

        println!("{}", render(feature));
        Ok(())
    }
}

fn render(feature: &FeatureDefinition) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}",
        feature.name.bold(),
        format!("[{}]", feature.id).dimmed()
    ));
    lines.push(feature.description.to_string());
    lines.push(String::new());
    lines.push(format!("  category:  {}", feature.category));
    lines.push(format!("  baseline:  {}", feature.baseline));
    lines.push(format!("  severity:  {}", feature.severity));
    lines.push(String::new());
    lines.push("  browser support:".to_string());

    for browser in Browser::TRACKED {
        let support = match feature.support_for(browser) {
            BrowserSupport::Since(version) => format!("since {version}"),
            BrowserSupport::Flagged => "behind a flag".to_string(),
            BrowserSupport::Never => "not supported".to_string(),
        };
        lines.push(format!("    {:<8} {}", browser.name(), support));
    }

    lines.push(String::new());
    lines.push(format!("  suggested fix: {}", feature.suggestion));
    if let Some(mdn) = feature.mdn {
        lines.push(format!("  docs: {mdn}"));
    }

    lines.join("\n")
}
