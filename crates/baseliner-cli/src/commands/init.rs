//! Init command - writes a starter baseliner.toml

use std::path::Path;

use anyhow::bail;
use clap::Args;

use baseliner_core::config::CONFIG_FILENAME;

const STARTER_CONFIG: &str = r#"# Baseliner configuration
#
# Disable catalogued features you deliberately rely on, or tighten the
# severity of ones your support matrix cannot tolerate.

[features]
# disabled = ["html-lazy-loading"]

[features.severity]
# css-has = "high"
"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        self.run_in(Path::new("."))
    }

    fn run_in(&self, dir: &Path) -> anyhow::Result<()> {
        let path = dir.join(CONFIG_FILENAME);

        if path.exists() && !self.force {
            bail!(
                "{} already exists, pass --force to overwrite",
                path.display()
            );
        }

        std::fs::write(&path, STARTER_CONFIG)?;
        println!("Wrote {}", path.display());
        Ok(())
    }
}
