use anyhow::Result;
use std::path::PathBuf;

pub fn validate_csv_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    if ext.as_deref() != Some("csv") {
        anyhow::bail!("File must have a .csv extension: {}", path);
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}
