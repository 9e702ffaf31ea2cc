//! Runs the binary and checks how failures surface to the caller.

use {
    serde_json::json,
    std::process::{Command, Output},
    tempfile::TempDir,
};

const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn deployer(dir: &TempDir, env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_deployer"))
        .current_dir(dir.path())
        .env_clear()
        .envs(env.iter().copied())
        .output()
        .unwrap()
}

#[test]
fn missing_private_key_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = deployer(&dir, &[("INFURA_API_KEY", "0123456789abcdef")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PRIVATE_KEY"), "{stderr}");
    assert!(!dir.path().join("encryption-public-key.txt").exists());
}

#[test]
fn reads_configuration_from_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "INFURA_API_KEY=0123456789abcdef\n").unwrap();
    let output = deployer(&dir, &[]);

    // The node is configured through `.env`, only the account is missing.
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("set PRIVATE_KEY"), "{stderr}");
}

#[test]
fn unreachable_node_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir
        .path()
        .join("artifacts/contracts/ContractRegistry.sol/ContractRegistry.json");
    std::fs::create_dir_all(artifact.parent().unwrap()).unwrap();
    std::fs::write(
        &artifact,
        json!({ "contractName": "ContractRegistry", "abi": [], "bytecode": "0x6080" }).to_string(),
    )
    .unwrap();

    let output = deployer(
        &dir,
        &[("PRIVATE_KEY", ANVIL_KEY), ("NODE_URL", "http://127.0.0.1:1")],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("deployment failed while deploying ContractRegistry"),
        "{stderr}"
    );
    // The key is exported before anything is sent to the node.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("encryption-public-key.txt")).unwrap(),
        "mtrHp1WHZM9rxF2Ilot9Hie5XmQcKCf7oDQ1DpGkTSI="
    );
    assert!(!dir.path().join("contract-registry-address.txt").exists());
}
