// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::valid_name;

#[test]
fn test_valid_names() {
    assert!(valid_name("my-repo"));
    assert!(valid_name("my_repo"));
    assert!(valid_name("repo.rs"));
    assert!(valid_name("Repo123"));
}

#[test]
fn test_rejects_traversal_attempts() {
    assert!(!valid_name(".."));
    assert!(!valid_name("../etc"));
    assert!(!valid_name("a/../b"));
    assert!(!valid_name("repo/../../escape"));
}

#[test]
fn test_rejects_separators_and_empties() {
    assert!(!valid_name(""));
    assert!(!valid_name("a/b"));
    assert!(!valid_name("a\\b"));
    assert!(!valid_name("repo name"));
    assert!(!valid_name("répo"));
}

#[test]
fn test_rejects_hidden_names() {
    assert!(!valid_name(".git"));
    assert!(!valid_name(".hidden"));
}
