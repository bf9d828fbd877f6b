use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Hunspell dictionaries packaged one directory per language code.
pub const DICTIONARY_REPO_BASE: &str =
    "https://raw.githubusercontent.com/wooorm/dictionaries/main/dictionaries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub code: &'static str,
    pub name: &'static str,
}

const fn dict(code: &'static str, name: &'static str) -> DictionaryInfo {
    DictionaryInfo { code, name }
}

pub const AVAILABLE_DICTIONARIES: &[DictionaryInfo] = &[
    dict("bg", "Bulgarian"),
    dict("br", "Breton"),
    dict("ca", "Catalan"),
    dict("ca-valencia", "Catalan (Valencia)"),
    dict("cs", "Czech"),
    dict("cy", "Welsh"),
    dict("da", "Danish"),
    dict("de", "German"),
    dict("de-AT", "German (Austria)"),
    dict("de-CH", "German (Switzerland)"),
    dict("el", "Greek"),
    dict("el-polyton", "Greek (Polyton)"),
    dict("en", "English"),
    dict("en-AU", "English (Australia)"),
    dict("en-CA", "English (Canada)"),
    dict("en-GB", "English (United Kingdom)"),
    dict("en-ZA", "English (South Africa)"),
    dict("eo", "Esperanto"),
    dict("es", "Spanish"),
    dict("es-AR", "Spanish (Argentina)"),
    dict("es-BO", "Spanish (Bolivia)"),
    dict("es-CL", "Spanish (Chile)"),
    dict("es-CO", "Spanish (Colombia)"),
    dict("es-CR", "Spanish (Costa Rica)"),
    dict("es-CU", "Spanish (Cuba)"),
    dict("es-DO", "Spanish (Dominican Republic)"),
    dict("es-EC", "Spanish (Ecuador)"),
    dict("es-GT", "Spanish (Guatemala)"),
    dict("es-HN", "Spanish (Honduras)"),
    dict("es-MX", "Spanish (Mexico)"),
    dict("es-NI", "Spanish (Nicaragua)"),
    dict("es-PA", "Spanish (Panama)"),
    dict("es-PE", "Spanish (Peru)"),
    dict("es-PH", "Spanish (Philippines)"),
    dict("es-PR", "Spanish (Puerto Rico)"),
    dict("es-PY", "Spanish (Paraguay)"),
    dict("es-SV", "Spanish (El Salvador)"),
    dict("es-US", "Spanish (United States of America)"),
    dict("es-UY", "Spanish (Uruguay)"),
    dict("es-VE", "Spanish (Venezuela)"),
    dict("et", "Estonian"),
    dict("eu", "Basque"),
    dict("fa", "Persian"),
    dict("fo", "Faroese"),
    dict("fr", "French"),
    dict("fur", "Friulian"),
    dict("fy", "Western Frisian"),
    dict("ga", "Irish"),
    dict("gd", "Scottish Gaelic"),
    dict("gl", "Galician"),
    dict("he", "Hebrew"),
    dict("hr", "Croatian"),
    dict("hu", "Hungarian"),
    dict("hy", "Armenian"),
    dict("hyw", "Western Armenian"),
    dict("ia", "Interlingua"),
    dict("ie", "Interlingue"),
    dict("is", "Icelandic"),
    dict("it", "Italian"),
    dict("ka", "Georgian"),
    dict("ko", "Korean"),
    dict("la", "Latin"),
    dict("lb", "Luxembourgish"),
    dict("lt", "Lithuanian"),
    dict("ltg", "Latgalian"),
    dict("lv", "Latvian"),
    dict("mk", "Macedonian"),
    dict("mn", "Mongolian"),
    dict("nb", "Norwegian Bokmål"),
    dict("nds", "Low German"),
    dict("ne", "Nepali"),
    dict("nl", "Dutch"),
    dict("nn", "Norwegian Nynorsk"),
    dict("oc", "Occitan"),
    dict("pl", "Polish"),
    dict("pt", "Portuguese"),
    dict("pt-PT", "Portuguese (Portugal)"),
    dict("ro", "Romanian"),
    dict("ru", "Russian"),
    dict("rw", "Kinyarwanda"),
    dict("sk", "Slovak"),
    dict("sl", "Slovenian"),
    dict("sr", "Serbian"),
    dict("sr-Latn", "Serbian (Latin script)"),
    dict("sv", "Swedish"),
    dict("sv-FI", "Swedish (Finland)"),
    dict("tk", "Turkmen"),
    dict("tlh", "Klingon"),
    dict("tlh-Latn", "Klingon (Latin script)"),
    dict("tr", "Turkish"),
    dict("uk", "Ukrainian"),
    dict("vi", "Vietnamese"),
];

pub fn find_dictionary(code: &str) -> Option<&'static DictionaryInfo> {
    AVAILABLE_DICTIONARIES.iter().find(|d| d.code == code)
}

/// `.aff` and `.dic` paths for `code` under `dictionary_dir`.
pub fn dictionary_paths(dictionary_dir: &Path, code: &str) -> (PathBuf, PathBuf) {
    let base = dictionary_dir.join(code);
    (base.join("index.aff"), base.join("index.dic"))
}

pub fn is_installed(dictionary_dir: &Path, code: &str) -> bool {
    let (aff, dic) = dictionary_paths(dictionary_dir, code);
    aff.exists() && dic.exists()
}

pub fn installed_dictionaries(dictionary_dir: &Path) -> Vec<&'static DictionaryInfo> {
    AVAILABLE_DICTIONARIES
        .iter()
        .filter(|d| is_installed(dictionary_dir, d.code))
        .collect()
}

pub fn list_dictionaries(dictionary_dir: &Path) -> Result<()> {
    let installed = installed_dictionaries(dictionary_dir);

    if installed.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to download a dictionary.",
            "spellpick dict download en".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();

    for info in installed {
        let (aff, dic) = dictionary_paths(dictionary_dir, info.code);
        let size_kb = (fs::metadata(&aff)?.len() + fs::metadata(&dic)?.len()) / 1024;

        println!(
            "  {} {} {} ({})",
            "✓".green(),
            info.code.cyan().bold(),
            info.name,
            format!("{}KB", size_kb).dimmed()
        );
    }

    println!();
    println!(
        "Dictionary directory: {}",
        dictionary_dir.display().to_string().dimmed()
    );

    Ok(())
}

pub fn list_available(dictionary_dir: &Path) {
    for info in AVAILABLE_DICTIONARIES {
        let marker = if is_installed(dictionary_dir, info.code) {
            "✓".green().to_string()
        } else {
            " ".to_string()
        };
        println!("  {} {:<12} {}", marker, info.code.cyan(), info.name);
    }
}

pub fn download_dictionary(dictionary_dir: &Path, code: &str) -> Result<()> {
    let info = find_dictionary(code).with_context(|| {
        format!(
            "Dictionary '{}' is not available. Run `spellpick dict available` for the list.",
            code
        )
    })?;

    println!(
        "{} {} dictionary ({})...",
        "Downloading".cyan().bold(),
        info.name.yellow(),
        info.code.dimmed()
    );

    let (aff_path, dic_path) = dictionary_paths(dictionary_dir, code);
    let target_dir = dictionary_dir.join(code);
    fs::create_dir_all(&target_dir).context("Failed to create dictionary directory")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    for (file, path) in [("index.aff", &aff_path), ("index.dic", &dic_path)] {
        let url = format!("{}/{}/{}", DICTIONARY_REPO_BASE, code, file);
        pb.set_message(format!("Fetching {}", file));

        let body = match fetch(&url) {
            Ok(body) => body,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };
        fs::write(path, body)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    pb.finish_with_message("Download complete");
    tracing::info!("Installed {} dictionary into {}", code, target_dir.display());

    println!(
        "{} Dictionary installed: {}",
        "✓".green().bold(),
        target_dir.display().to_string().cyan()
    );

    Ok(())
}

fn fetch(url: &str) -> Result<String> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Failed to download {}: HTTP {}", url, response.status());
    }

    response
        .text()
        .with_context(|| format!("Failed to read response from {}", url))
}

pub fn delete_dictionary(dictionary_dir: &Path, code: &str) -> Result<()> {
    let target_dir = dictionary_dir.join(code);

    if !target_dir.exists() {
        println!(
            "{} Dictionary for {} is not installed.",
            "✗".red().bold(),
            code.yellow()
        );
        return Ok(());
    }

    fs::remove_dir_all(&target_dir)
        .with_context(|| format!("Failed to delete {}", target_dir.display()))?;

    println!("{} Deleted {} dictionary", "✓".green().bold(), code.cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(find_dictionary("en-GB").unwrap().name, "English (United Kingdom)");
        assert!(find_dictionary("xx").is_none());
    }

    #[test]
    fn test_dictionary_paths() {
        let (aff, dic) = dictionary_paths(Path::new("/dic"), "de-AT");
        assert_eq!(aff, PathBuf::from("/dic/de-AT/index.aff"));
        assert_eq!(dic, PathBuf::from("/dic/de-AT/index.dic"));
    }

    #[test]
    fn test_installed_requires_both_files() {
        let dir = tempdir().unwrap();
        let (aff, dic) = dictionary_paths(dir.path(), "fr");
        fs::create_dir_all(aff.parent().unwrap()).unwrap();
        fs::write(&aff, "SET UTF-8\n").unwrap();
        assert!(!is_installed(dir.path(), "fr"));

        fs::write(&dic, "0\n").unwrap();
        assert!(is_installed(dir.path(), "fr"));
        let installed: Vec<_> = installed_dictionaries(dir.path())
            .iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(installed, vec!["fr"]);
    }

    #[test]
    fn test_delete_removes_directory() {
        let dir = tempdir().unwrap();
        let (aff, _) = dictionary_paths(dir.path(), "nl");
        fs::create_dir_all(aff.parent().unwrap()).unwrap();
        fs::write(&aff, "").unwrap();

        delete_dictionary(dir.path(), "nl").unwrap();
        assert!(!dir.path().join("nl").exists());
        // Deleting again is not an error.
        delete_dictionary(dir.path(), "nl").unwrap();
    }

    #[test]
    fn test_download_rejects_unknown_code() {
        let dir = tempdir().unwrap();
        assert!(download_dictionary(dir.path(), "zz-ZZ").is_err());
    }
}
