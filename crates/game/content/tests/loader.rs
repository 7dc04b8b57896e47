use std::io::Write;

use dominion_content::ConfigLoader;
use dominion_core::GameConfig;

#[test]
fn overrides_merge_over_the_standard_tuning() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "[combat]\nwipeout_ratio = 6\n\n[effects.peace_shield]\ncost = 1\n"
    )
    .expect("write balance");

    let config = ConfigLoader::load(file.path()).expect("load balance");
    let standard = GameConfig::standard();

    assert_eq!(config.get("combat.wipeout_ratio", 0.0), 6.0);
    assert_eq!(config.get_u64("effects.peace_shield.cost", 0), 1);
    assert_eq!(
        config.get("combat.loser_loss_rate", 0.0),
        standard.get("combat.loser_loss_rate", 0.0)
    );
    assert_eq!(config.len(), standard.len());
}

#[test]
fn missing_file_reports_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let err = ConfigLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_toml_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[combat\nwipeout_ratio = ").expect("write balance");
    assert!(ConfigLoader::load(file.path()).is_err());
}
