//! Init command - write an example config file

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::config::{CONFIG_FILE, EXAMPLE_CONFIG};

pub fn run(force: bool) -> Result<()> {
    write_example(Path::new(CONFIG_FILE), force)
}

fn write_example(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("✓").green(),
            style(path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Created {}", style("✓").green(), style(path.display()).cyan());
    println!("\nNext steps:");
    println!("  {} Start the service", style("pyreview serve").cyan());
    println!("  {} Analyze a file", style("pyreview analyze app.py").cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_and_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        write_example(&path, false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXAMPLE_CONFIG);

        std::fs::write(&path, "# mine\n").unwrap();
        write_example(&path, false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_example(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXAMPLE_CONFIG);
    }
}
