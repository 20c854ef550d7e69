use crate::options::PromptOptions;
use chrono::Utc;
use fs_err as fs;
use serde_json::{json, to_string_pretty};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub prompt: PathBuf,
    pub options: PathBuf,
    pub meta: PathBuf,
}

fn run_dir(out_dir: &Path, run: Uuid) -> PathBuf {
    out_dir.join(run.to_string())
}

/// Persist a rendered document next to the options that produced it.
pub fn save_render(
    out_dir: &Path,
    run: Uuid,
    variant: &str,
    options: &PromptOptions,
    document: &str,
) -> anyhow::Result<SavedPaths> {
    let dir = run_dir(out_dir, run);
    fs::create_dir_all(&dir)?;

    let prompt = dir.join(format!("{variant}.prompt.md"));
    fs::write(&prompt, document)?;

    let options_path = dir.join(format!("{variant}.options.json"));
    fs::write(&options_path, to_string_pretty(options)?)?;

    let meta = dir.join("meta.json");
    let meta_json = json!({
        "run": run,
        "variant": variant,
        "bytes": document.len(),
        "rendered_at": Utc::now(),
    });
    fs::write(&meta, to_string_pretty(&meta_json)?)?;

    tracing::debug!(dir = %dir.display(), variant, "saved render artifacts");
    Ok(SavedPaths { dir, prompt, options: options_path, meta })
}

pub fn print_saved_paths(saved: &SavedPaths) {
    eprintln!("debug: artifacts directory: {}", saved.dir.display());
    eprintln!("debug: prompt saved at: {}", saved.prompt.display());
    eprintln!("debug: options saved at: {}", saved.options.display());
    eprintln!("debug: metadata saved at: {}", saved.meta.display());
    std::io::stderr().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_prompt_options_and_meta() {
        let tmp = tempfile::tempdir().unwrap();
        let run = Uuid::new_v4();
        let opts = PromptOptions::default();
        let saved = save_render(tmp.path(), run, "default", &opts, "hello").unwrap();

        assert_eq!(saved.dir, tmp.path().join(run.to_string()));
        assert_eq!(fs::read_to_string(&saved.prompt).unwrap(), "hello");

        let back: PromptOptions =
            serde_json::from_str(&fs::read_to_string(&saved.options).unwrap()).unwrap();
        assert_eq!(back, opts);

        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&saved.meta).unwrap()).unwrap();
        assert_eq!(meta["variant"], "default");
        assert_eq!(meta["bytes"], 5);
    }
}
