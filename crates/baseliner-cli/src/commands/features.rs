//! Features command - lists the catalogued web-platform features

use anyhow::bail;
use clap::Args;
use colored::Colorize;

use baseliner_core::{FeatureCatalog, FeatureCategory};

#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// Only list one category (js, css or html)
    #[arg(short, long)]
    pub category: Option<String>,
}

impl FeaturesArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let catalog = FeatureCatalog::builtin();

        let category = match self.category.as_deref() {
            None => None,
            Some("js") => Some(FeatureCategory::Js),
            Some("css") => Some(FeatureCategory::Css),
            Some("html") => Some(FeatureCategory::Html),
            Some(other) => bail!("unknown category '{other}', expected js, css or html"),
        };

        println!("{}", render(&catalog, category));
        Ok(())
    }
}

fn render(catalog: &FeatureCatalog, category: Option<FeatureCategory>) -> String {
    let mut lines = Vec::new();

    for feature in catalog.iter() {
        if category.is_some_and(|c| c != feature.category) {
            continue;
        }
        lines.push(format!(
            "{:<26} {:<5} {:<21} {}",
            feature.id.bold(),
            feature.category,
            feature.baseline,
            feature.name
        ));
    }

    lines.push(String::new());
    lines.push(format!("{} features catalogued", lines.len() - 1));
    lines.join("\n")
}
