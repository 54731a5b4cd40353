// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the variable store over real files.

use std::path::{Path, PathBuf};

use envvar_rs::error::ErrorKind;
use envvar_rs::service::EnvService;
use envvar_rs::store::{EnvVarEntry, FileBackend, MemoryBackend, Scope, VariableStore};

fn file_service(dir: &Path) -> (EnvService, PathBuf, PathBuf) {
    let user = dir.join("user").join("env.conf");
    let system = dir.join("system").join("environment");
    let store = VariableStore::new(FileBackend::new(&user, &system));
    (EnvService::new(store), user, system)
}

// =============================================================================
// Testable properties
// =============================================================================

#[test]
fn set_then_list_contains_entry_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _, _) = file_service(dir.path());

    for (name, value) in [("b_var", "2"), ("A_VAR", "1"), ("c_var", "with spaces")] {
        service.add_or_edit_variable(name, value, Scope::User).unwrap();
    }

    let entries = service.list_variables(Scope::User).unwrap();
    assert_eq!(
        entries,
        [
            EnvVarEntry::new("A_VAR", "1"),
            EnvVarEntry::new("b_var", "2"),
            EnvVarEntry::new("c_var", "with spaces"),
        ]
    );
}

#[test]
fn delete_absent_name_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let (service, user, _) = file_service(dir.path());
    service.add_or_edit_variable("PRESENT", "1", Scope::User).unwrap();
    let before = std::fs::read_to_string(&user).unwrap();

    service.delete_variable("ABSENT", Scope::User).unwrap();
    service.delete_variable("", Scope::System).unwrap();

    assert_eq!(std::fs::read_to_string(&user).unwrap(), before);
}

#[test]
fn empty_name_fails_without_touching_storage() {
    let dir = tempfile::tempdir().unwrap();
    let (service, user, system) = file_service(dir.path());

    let err = service.add_or_edit_variable("", "x", Scope::User).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(!user.exists());
    assert!(!system.exists());
}

#[test]
fn backup_mutate_restore_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (service, user, _) = file_service(dir.path());
    service.add_or_edit_variable("FOO", "bar", Scope::User).unwrap();
    service
        .add_or_edit_variable("MULTI", "line one\nline two", Scope::User)
        .unwrap();
    service
        .add_or_edit_variable("JAVA_HOME", "/opt/jdk", Scope::System)
        .unwrap();

    let backup_path = dir.path().join("backups").join("snapshot.json");
    let written = service.backup(&backup_path).unwrap();

    service.add_or_edit_variable("BAZ", "qux", Scope::User).unwrap();
    service.delete_variable("JAVA_HOME", Scope::System).unwrap();

    let restored = service.restore(&backup_path).unwrap();
    assert_eq!(restored.user_variables, written.user_variables);
    assert_eq!(
        service.list_variables(Scope::User).unwrap(),
        written.user_variables
    );
    assert_eq!(
        service.list_variables(Scope::System).unwrap(),
        written.system_variables
    );
    assert!(!std::fs::read_to_string(&user).unwrap().contains("BAZ"));
}

#[test]
fn restore_empty_backup_empties_both_scopes() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _, _) = file_service(dir.path());
    service.add_or_edit_variable("U", "1", Scope::User).unwrap();
    service.add_or_edit_variable("S", "1", Scope::System).unwrap();

    let path = dir.path().join("empty.json");
    std::fs::write(
        &path,
        r#"{ "CreatedAt": "2024-01-15T10:30:45+00:00", "UserVariables": [], "SystemVariables": [] }"#,
    )
    .unwrap();
    service.restore(&path).unwrap();

    assert!(service.list_variables(Scope::User).unwrap().is_empty());
    assert!(service.list_variables(Scope::System).unwrap().is_empty());
}

#[test]
fn partial_restore_is_not_rolled_back() {
    let dir = tempfile::tempdir().unwrap();
    let user = dir.path().join("user.env");
    let system = dir.path().join("system.env");
    std::fs::write(&user, "OLD=1\n").unwrap();
    std::fs::write(&system, "LOCKED=1\n").unwrap();
    let service = EnvService::new(VariableStore::new(
        FileBackend::new(&user, &system).with_read_only(Scope::System, true),
    ));

    let path = dir.path().join("backup.json");
    std::fs::write(
        &path,
        r#"{
            "CreatedAt": "2024-01-15T10:30:45.1234567+01:00",
            "UserVariables": [{ "Name": "NEW", "Value": "1" }],
            "SystemVariables": [{ "Name": "OTHER", "Value": "2" }]
        }"#,
    )
    .unwrap();

    let err = service.restore(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    assert_eq!(std::fs::read_to_string(&user).unwrap(), "NEW=1\n");
    assert_eq!(std::fs::read_to_string(&system).unwrap(), "LOCKED=1\n");
}

#[test]
fn memory_backend_round_trip_through_json() {
    let service = EnvService::new(VariableStore::new(
        MemoryBackend::new()
            .with_vars(Scope::User, [("HOME", "/home/a"), ("EDITOR", "vim")])
            .with_vars(Scope::System, [("LANG", "C.UTF-8")]),
    ));

    let user = service.list_variables(Scope::User).unwrap();
    let system = service.list_variables(Scope::System).unwrap();
    let bytes = envvar_rs::backup::serialize(user.clone(), system.clone()).unwrap();
    let decoded = envvar_rs::backup::deserialize(&bytes).unwrap();

    assert_eq!(decoded.user_variables, user);
    assert_eq!(decoded.system_variables, system);
}

#[cfg(unix)]
#[test]
fn unwritable_file_reports_store_unavailable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let user = dir.path().join("user.env");
    let system = dir.path().join("system.env");
    std::fs::write(&system, "A=1\n").unwrap();
    std::fs::set_permissions(&system, std::fs::Permissions::from_mode(0o444)).unwrap();

    // Root ignores file modes.
    if std::fs::OpenOptions::new().write(true).open(&system).is_ok() {
        return;
    }

    let service = EnvService::new(VariableStore::new(FileBackend::new(&user, &system)));
    assert_eq!(service.list_variables(Scope::System).unwrap().len(), 1);
    let err = service
        .add_or_edit_variable("B", "2", Scope::System)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
}
