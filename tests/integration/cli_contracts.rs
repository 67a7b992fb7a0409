use std::fs;

use pathindex::tooling::cli::{CliContext, Commands};
use pathindex::NO_MATCHES;
use tempfile::TempDir;

use crate::integration::support::fixture_text;

/// Workspace with the fixture listing and a config pointing the store inside it
fn workspace(backend: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("data")).unwrap();
    fs::write(temp.path().join("data/file_structure.txt"), fixture_text()).unwrap();
    fs::write(
        temp.path().join("pathindex.toml"),
        format!("[storage]\nbackend = \"{}\"\nstore_path = \"db\"\n", backend),
    )
    .unwrap();
    temp
}

#[test]
fn init_then_find_json_contract() {
    let temp = workspace("sled");
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    let output = cli.execute(&Commands::Init { listing: None }).unwrap();
    assert!(output.starts_with("Indexed 20 nodes"));

    let output = cli
        .execute(&Commands::Find {
            fragment: Some("Skype".to_string()),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
    assert_eq!(
        parsed,
        vec![
            "C:\\Program\tFiles\\Skype\\Skype.exe",
            "C:\\Program\tFiles\\Skype",
        ]
    );
}

#[test]
fn find_without_fragment_prints_sentinel() {
    let temp = workspace("memory");
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Find {
            fragment: None,
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(output, NO_MATCHES);
}

#[test]
fn memory_backend_is_ready_without_init() {
    let temp = workspace("memory");
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Find {
            fragment: Some("Temp".to_string()),
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(output, "C:\\Temp");
}

#[test]
fn status_json_contract_has_required_fields() {
    let temp = workspace("sled");
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    let before: serde_json::Value =
        serde_json::from_str(&cli.execute(&Commands::Status { format: "json".to_string() }).unwrap())
            .unwrap();
    assert_eq!(before.get("initialized").and_then(|v| v.as_bool()), Some(false));
    assert!(before.get("listing_digest").is_none());

    cli.execute(&Commands::Init { listing: None }).unwrap();
    let after: serde_json::Value =
        serde_json::from_str(&cli.execute(&Commands::Status { format: "json".to_string() }).unwrap())
            .unwrap();
    assert_eq!(after.get("initialized").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(after.get("node_count").and_then(|v| v.as_u64()), Some(20));
    assert!(after.get("listing_digest").and_then(|v| v.as_str()).is_some());
    assert!(after.get("built_at").and_then(|v| v.as_str()).is_some());
}

#[test]
fn init_with_explicit_listing_and_locate() {
    let temp = workspace("sled");
    fs::write(temp.path().join("other.txt"), "D:\n       Music\n              song.mp3\n").unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    let output = cli
        .execute(&Commands::Init {
            listing: Some("other.txt".into()),
        })
        .unwrap();
    assert!(output.starts_with("Indexed 3 nodes"));
    assert_eq!(
        cli.execute(&Commands::Locate {
            path: "D:\\Music\\song.mp3".to_string()
        })
        .unwrap(),
        "2"
    );
    assert_eq!(
        cli.execute(&Commands::Locate {
            path: "D:\\Video".to_string()
        })
        .unwrap(),
        "No node at D:\\Video"
    );
}

#[test]
fn memory_backend_config_and_status_need_no_listing() {
    let temp = workspace("memory");
    fs::remove_file(temp.path().join("data/file_structure.txt")).unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    assert!(cli.execute(&Commands::Config).is_ok());
    let status = cli.execute(&Commands::Status { format: "text".to_string() }).unwrap();
    assert!(status.starts_with("Initialized: no"));
    assert!(cli
        .execute(&Commands::Find {
            fragment: Some("Temp".to_string()),
            format: "text".to_string(),
        })
        .is_err());
}

#[test]
fn locate_lists_nodes_sharing_a_path() {
    let temp = workspace("memory");
    fs::write(temp.path().join("dupes.txt"), "D:\n       x\n       x\n").unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    cli.execute(&Commands::Init {
        listing: Some("dupes.txt".into()),
    })
    .unwrap();

    assert_eq!(
        cli.execute(&Commands::Locate {
            path: "D:\\x".to_string()
        })
        .unwrap(),
        "Ambiguous path D:\\x: nodes 1, 2"
    );
}

#[test]
fn malformed_listing_fails_init() {
    let temp = workspace("sled");
    fs::write(temp.path().join("bad.txt"), "D:\n              deep\n").unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let err = cli
        .execute(&Commands::Init {
            listing: Some("bad.txt".into()),
        })
        .unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn config_command_prints_effective_toml() {
    let temp = workspace("memory");
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&Commands::Config).unwrap();
    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(
        parsed["storage"]["backend"].as_str(),
        Some("memory")
    );
    assert_eq!(parsed["listing"]["indent_unit"].as_integer(), Some(7));
}
