use anyhow::Result;
use vergen::EmitBuilder;

// Commit sha and date end up in the CLI `--version` string
fn main() -> Result<()> {
    EmitBuilder::builder()
        .git_sha(true)
        .git_commit_date()
        .emit()?;
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
