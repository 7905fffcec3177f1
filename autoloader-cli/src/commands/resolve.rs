//! Resolve and candidates commands.

use std::path::{Path, PathBuf};

use autoloader::{Candidate, LoadError, ReadSourceLoader};
use tracing::info;

use super::common::load_config;
use crate::error::CliError;

/// Resolve a class, printing the mapped file.
pub fn run(config_path: &Path, class: &str, no_load: bool) -> Result<(), CliError> {
    let path = resolve_class(config_path, class, no_load)?;
    println!("{}", path.display());
    Ok(())
}

/// Resolve a class to its file, loading it unless `no_load` is set.
pub fn resolve_class(
    config_path: &Path,
    class: &str,
    no_load: bool,
) -> Result<PathBuf, CliError> {
    let config = load_config(config_path)?;

    let resolved = if no_load {
        config
            .build(|_: &Path| -> Result<(), LoadError> { Ok(()) })
            .resolve(class)?
    } else {
        let autoloader = config.build(ReadSourceLoader::new());
        let resolved = autoloader.resolve(class)?;
        for source in autoloader.loader().sources() {
            info!(path = %source.path.display(), bytes = source.contents.len(), "Loaded");
        }
        resolved
    };

    resolved.ok_or_else(|| CliError::ClassNotFound(class.to_string()))
}

/// List every probe for a class, marking files that exist.
pub fn run_candidates(config_path: &Path, class: &str) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let autoloader = config.build(|_: &Path| -> Result<(), LoadError> { Ok(()) });

    print!("{}", render_candidates(class, &autoloader.candidates(class)));
    Ok(())
}

/// Render probes one per line, `*` marking those that are existing files.
pub fn render_candidates(class: &str, candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return format!("No registered prefix matches {}\n", class);
    }

    let mut out = String::new();
    for candidate in candidates {
        let marker = if candidate.path.is_file() { "*" } else { " " };
        out.push_str(&format!(
            "{} {:<24} {}\n",
            marker,
            candidate.prefix.as_str(),
            candidate.path.display()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use autoloader::{AutoloadConfig, DEFAULT_CONFIG_FILE};
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/Controller")).unwrap();
        fs::write(temp.path().join("src/Controller/Home.php"), "<?php").unwrap();
        fs::create_dir_all(temp.path().join("ctl")).unwrap();

        let config = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config, "[namespaces]\nblog\\ = src\nblog\\Controller = ctl\n").unwrap();
        (temp, config)
    }

    #[test]
    fn test_resolve_found() {
        let (temp, config) = setup();
        let expected = temp.path().join("src/Controller/Home.php");

        assert_eq!(resolve_class(&config, "blog\\Controller\\Home", false).unwrap(), expected);
        assert_eq!(resolve_class(&config, "blog\\Controller\\Home", true).unwrap(), expected);
        run(&config, "blog\\Controller\\Home", false).unwrap();
    }

    #[test]
    fn test_resolve_not_found() {
        let (_temp, config) = setup();
        let err = run(&config, "blog\\Controller\\Missing", false).unwrap_err();
        assert!(matches!(err, CliError::ClassNotFound(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_render_candidates_marks_existing_files() {
        let (temp, config) = setup();
        let autoloader = AutoloadConfig::load(&config)
            .unwrap()
            .build(|_: &Path| -> Result<(), LoadError> { Ok(()) });

        let class = "blog\\Controller\\Home";
        let out = render_candidates(class, &autoloader.candidates(class));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  blog\\Controller\\"));
        assert!(lines[0].ends_with(&temp.path().join("ctl/Home.php").display().to_string()));
        assert!(lines[1].starts_with("* blog\\ "));
        assert!(lines[1].ends_with(
            &temp.path().join("src/Controller/Home.php").display().to_string()
        ));

        run_candidates(&config, class).unwrap();
    }

    #[test]
    fn test_render_candidates_without_match() {
        assert_eq!(
            render_candidates("other\\Thing", &[]),
            "No registered prefix matches other\\Thing\n"
        );
    }
}
