use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_herorank")
}

fn unique_temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("herorank-cli-{name}-{stamp}"))
}

/// A data directory holding copies of the shipped source files.
fn seeded_data_dir(name: &str) -> PathBuf {
    let root = unique_temp_dir(name);
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    for rel in [
        "data/sources/marvel-raw.json",
        "data/sources/dc-roster.yaml",
        "data/corrections/power-corrections.json",
        "data/corrections/descriptions.json",
    ] {
        let target = root.join(rel);
        fs::create_dir_all(target.parent().expect("has parent")).expect("dir should be creatable");
        fs::copy(manifest.join(rel), &target).expect("source file should copy");
    }
    root
}

fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .arg("--data-dir")
        .arg(root)
        .args(args)
        .env_remove("HERORANK_CONFIG")
        .env_remove("HERORANK_DATA")
        .output()
        .expect("herorank should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("command should emit json")
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let output = Command::new(bin()).output().expect("herorank should run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn generate_then_query_commands() {
    let root = seeded_data_dir("generate");

    let generated = run(&root, &["generate"]);
    assert_eq!(generated.status.code(), Some(0), "{}", String::from_utf8_lossy(&generated.stderr));
    assert!(String::from_utf8_lossy(&generated.stdout).contains("generated 14 heroes"));
    assert!(root.join("data/superheroes.json").is_file());

    let validated = run(&root, &["validate"]);
    assert_eq!(validated.status.code(), Some(0));

    let stats = run(&root, &["stats"]);
    assert_eq!(stats.status.code(), Some(0));
    assert_eq!(stdout_json(&stats)["total"], 14);

    let filtered = run(&root, &["filter", "--universe", "dc", "--range", "power=90..100"]);
    assert_eq!(filtered.status.code(), Some(0));
    let payload = stdout_json(&filtered);
    assert_eq!(payload["stats"]["byUniverse"]["Marvel"], 0);
    assert!(payload["heroes"]
        .as_array()
        .expect("heroes array")
        .iter()
        .all(|h| h["universe"] == "DC" && h["power"].as_u64() >= Some(90)));

    let ranked = run(&root, &["rank", "--sort", "speed", "--limit", "2"]);
    assert_eq!(ranked.status.code(), Some(0));
    assert_eq!(stdout_json(&ranked).as_array().map(Vec::len), Some(2));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn battle_command_records_history() {
    let root = seeded_data_dir("battle");
    assert_eq!(run(&root, &["generate"]).status.code(), Some(0));

    let battle = run(&root, &["battle", "1", "5", "--seed", "7"]);
    assert_eq!(battle.status.code(), Some(0));
    let result = stdout_json(&battle);
    assert!(result["winnerId"] == 1 || result["winnerId"] == 5);

    let history = run(&root, &["battles"]);
    assert_eq!(stdout_json(&history)["battles"], 1);

    let odds = run(&root, &["battle", "1", "5", "--seed", "7", "--odds", "100"]);
    assert_eq!(odds.status.code(), Some(0));
    assert_eq!(stdout_json(&odds)["simulations"], 100);
    assert_eq!(stdout_json(&run(&root, &["battles"]))["battles"], 1);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn unknown_hero_fails_with_exit_one() {
    let root = seeded_data_dir("unknown");
    assert_eq!(run(&root, &["generate"]).status.code(), Some(0));

    let output = run(&root, &["compare", "1", "999"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hero 999 not found"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn validate_reports_broken_dataset() {
    let root = unique_temp_dir("broken");
    let dataset = root.join("broken.json");
    fs::create_dir_all(&root).expect("dir should be creatable");
    fs::write(&dataset, r#"[{"id": 1, "name": "X", "universe": "Image", "tier": "Z", "power": 500}]"#)
        .expect("write dataset");

    let output = run(&root, &["validate", dataset.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("validation failed"));

    let _ = fs::remove_dir_all(root);
}
