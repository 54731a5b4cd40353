// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::error::ErrorKind;
use crate::store::MemoryBackend;

fn service() -> EnvService {
    EnvService::new(VariableStore::new(MemoryBackend::new()))
}

#[test]
fn test_foo_bar_scenario() {
    let service = service();
    service.add_or_edit_variable("OTHER", "1", Scope::User).unwrap();
    service.add_or_edit_variable("FOO", "bar", Scope::User).unwrap();

    let entries = service.list_variables(Scope::User).unwrap();
    assert_eq!(
        entries,
        [EnvVarEntry::new("FOO", "bar"), EnvVarEntry::new("OTHER", "1")]
    );

    service.delete_variable("FOO", Scope::User).unwrap();
    let entries = service.list_variables(Scope::User).unwrap();
    assert_eq!(entries, [EnvVarEntry::new("OTHER", "1")]);
    assert_eq!(service.get_variable("FOO", Scope::User).unwrap(), None);
}

#[test]
fn test_backup_then_restore_drops_new_variable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    let service = service();
    service.add_or_edit_variable("KEEP", "1", Scope::User).unwrap();
    service.add_or_edit_variable("SYS", "2", Scope::System).unwrap();

    let written = service.backup(&path).unwrap();
    assert_eq!(written.len(), 2);

    service.add_or_edit_variable("BAZ", "3", Scope::User).unwrap();
    let restored = service.restore(&path).unwrap();
    assert_eq!(restored, written);

    let names: Vec<_> = service
        .list_variables(Scope::User)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["KEEP"]);
    assert_eq!(service.list_variables(Scope::System).unwrap().len(), 1);
}

#[test]
fn test_compact_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compact.json");
    let service = service().with_pretty(false);
    service.backup(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\n'));
    assert!(text.contains(r#""UserVariables":[]"#));
}

#[test]
fn test_restore_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = service();
    service.add_or_edit_variable("UNTOUCHED", "1", Scope::User).unwrap();

    let err = service.restore(&dir.path().join("nope.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert_eq!(service.list_variables(Scope::User).unwrap().len(), 1);
}

#[test]
fn test_restore_malformed_file_leaves_scopes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();
    let service = service();
    service.add_or_edit_variable("UNTOUCHED", "1", Scope::User).unwrap();

    let err = service.restore(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedBackup);
    assert_eq!(service.list_variables(Scope::User).unwrap().len(), 1);
}

#[test]
fn test_error_messages_are_displayable() {
    let service = service();
    insta::assert_snapshot!(
        service.add_or_edit_variable("", "x", Scope::User).unwrap_err(),
        @"variable name must not be empty"
    );
}

#[test]
fn test_from_config_memory() {
    let config = Config::parse("[store]\nbackend = \"memory\"\n[backup]\npretty = false").unwrap();
    let service = EnvService::from_config(&config).unwrap();
    assert_eq!(service.store().backend_name(), "memory");
    assert!(!service.pretty);
}

#[test]
fn test_from_config_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    let toml = format!(
        "[store]\nbackend = \"file\"\nuser_file = '{}'\nsystem_file = '{}'\n[notify]\nenabled = false",
        dir.path().join("user.env").display(),
        dir.path().join("system.env").display(),
    );
    let config = Config::parse(&toml).unwrap();
    let service = EnvService::from_config(&config).unwrap();
    assert_eq!(service.store().notifier_name(), "none");

    service.add_or_edit_variable("EDITOR", "vim", Scope::User).unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("user.env")).unwrap(),
        "EDITOR=vim\n"
    );
}
