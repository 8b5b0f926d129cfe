//! End-to-end provisioning against config files on disk.

use node_rpcauth::core::credential::{derive_digest, PasswordPrompt};
use node_rpcauth::core::dialect::{ConfigDialect, RippledDialect, RpcAuthDialect};
use node_rpcauth::core::document::ConfigDocument;
use node_rpcauth::core::mutator::has_existing_credential;
use node_rpcauth::core::provision::{provision, ProvisionRequest};
use node_rpcauth::error::{ProvisionError, Result};
use node_rpcauth::models::policy::PolicySection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zeroize::Zeroizing;

const BITCOIN_CONF: &str = "server=1\nrpcbind=127.0.0.1\n";

const RIPPLED_CONF: &str = "\
[server]
port_rpc_admin_local
port_ws_admin_local

[port_rpc_admin_local]
port = 5005
ip = 127.0.0.1
admin = 127.0.0.1
protocol = http

[port_ws_admin_local]
port = 6006
ip = 127.0.0.1
admin = 127.0.0.1
protocol = ws
";

struct TypedPrompt(&'static str);

impl PasswordPrompt for TypedPrompt {
    fn read_password(&self, _username: &str) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new(self.0.to_string()))
    }
}

fn write_conf(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(
    conf: &Path,
    password: Option<&str>,
    dry_run: bool,
    dialect: &dyn ConfigDialect,
) -> Result<node_rpcauth::models::credential::ProvisionReport> {
    let policy = PolicySection::default();
    let request = ProvisionRequest {
        conf: conf.to_path_buf(),
        username: "alice",
        password,
        salt_size: 16,
        dry_run,
        policy: &policy,
    };
    provision(&request, dialect, &TypedPrompt("typed-secret"))
}

#[test]
fn rpcauth_appends_verifiable_line() {
    let dir = TempDir::new().unwrap();
    let conf = write_conf(&dir, "bitcoin.conf", BITCOIN_CONF);

    let report = run(&conf, Some("hunter2"), false, &RpcAuthDialect).unwrap();
    let content = fs::read_to_string(&conf).unwrap();

    let suffix = content.strip_prefix(BITCOIN_CONF).expect("original content kept");
    assert!(suffix.starts_with("\n\n#rpcauth\nrpcauth=alice:"));
    assert!(suffix.ends_with('\n'));

    let line = suffix.lines().last().unwrap();
    assert_eq!(line, report.inserted);
    let value = line.strip_prefix("rpcauth=alice:").unwrap();
    let (salt, digest) = value.split_once('$').unwrap();
    assert_eq!(salt.len(), 32);
    assert_eq!(digest, derive_digest(salt, "hunter2"));
    assert_eq!(report.password, "hunter2");
}

#[test]
fn second_run_is_refused_and_file_untouched() {
    let dir = TempDir::new().unwrap();
    let conf = write_conf(&dir, "bitcoin.conf", BITCOIN_CONF);

    run(&conf, None, false, &RpcAuthDialect).unwrap();
    let before = fs::read(&conf).unwrap();

    let err = run(&conf, None, false, &RpcAuthDialect).unwrap_err();
    assert!(err.is_already_provisioned());
    assert_eq!(fs::read(&conf).unwrap(), before);
}

#[test]
fn rippled_inserts_after_both_admin_sections() {
    let dir = TempDir::new().unwrap();
    let conf = write_conf(&dir, "rippled.conf", RIPPLED_CONF);

    run(&conf, Some("-"), false, &RippledDialect::default()).unwrap();
    let doc = ConfigDocument::load(&conf).unwrap();

    for anchor in ["[port_rpc_admin_local]", "[port_ws_admin_local]"] {
        let idx = doc.find_line(anchor).unwrap();
        assert_eq!(doc.lines[idx + 1], "password=typed-secret\n");
        assert_eq!(doc.lines[idx + 2], "user=alice\n");
    }

    let without_inserted: String = doc
        .lines
        .iter()
        .filter(|l| l.as_str() != "password=typed-secret\n" && l.as_str() != "user=alice\n")
        .map(String::as_str)
        .collect();
    assert_eq!(without_inserted, RIPPLED_CONF);
    assert!(has_existing_credential(&doc, "password"));
}

#[test]
fn rippled_second_run_is_refused() {
    let dir = TempDir::new().unwrap();
    let conf = write_conf(&dir, "rippled.conf", RIPPLED_CONF);

    run(&conf, None, false, &RippledDialect::default()).unwrap();
    let before = fs::read(&conf).unwrap();
    let err = run(&conf, None, false, &RippledDialect::default()).unwrap_err();
    assert!(matches!(err, ProvisionError::CredentialAlreadyExists { .. }));
    assert_eq!(fs::read(&conf).unwrap(), before);
}

#[test]
fn rippled_missing_section_leaves_file_identical() {
    let dir = TempDir::new().unwrap();
    let partial = RIPPLED_CONF.replace("[port_ws_admin_local]\n", "");
    let conf = write_conf(&dir, "rippled.conf", &partial);

    let err = run(&conf, None, false, &RippledDialect::default()).unwrap_err();
    assert!(matches!(
        err,
        ProvisionError::MissingAnchor { ref anchor, .. } if anchor == "[port_ws_admin_local]"
    ));
    assert_eq!(fs::read_to_string(&conf).unwrap(), partial);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let bitcoin = write_conf(&dir, "bitcoin.conf", BITCOIN_CONF);
    let rippled = write_conf(&dir, "rippled.conf", RIPPLED_CONF);

    let report = run(&bitcoin, None, true, &RpcAuthDialect).unwrap();
    assert!(report.dry_run);
    assert!(report.inserted.starts_with("rpcauth=alice:"));
    assert_eq!(fs::read_to_string(&bitcoin).unwrap(), BITCOIN_CONF);

    run(&rippled, None, true, &RippledDialect::default()).unwrap();
    assert_eq!(fs::read_to_string(&rippled).unwrap(), RIPPLED_CONF);
}

#[test]
fn missing_config_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let conf = dir.path().join("bitcoin.conf");
    let err = run(&conf, None, false, &RpcAuthDialect).unwrap_err();
    assert!(matches!(err, ProvisionError::ConfigUnreadable { .. }));
    assert!(!conf.exists());
}

#[test]
fn each_run_uses_a_fresh_salt() {
    let dir = TempDir::new().unwrap();
    let a = write_conf(&dir, "a.conf", BITCOIN_CONF);
    let b = write_conf(&dir, "b.conf", BITCOIN_CONF);

    let ra = run(&a, Some("same"), false, &RpcAuthDialect).unwrap();
    let rb = run(&b, Some("same"), false, &RpcAuthDialect).unwrap();
    assert_ne!(ra.inserted, rb.inserted);
}
