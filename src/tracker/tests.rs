// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{github_repo_slug, github_web_url, parse_issue_count};

#[test]
fn test_web_url_from_ssh_remote() {
    assert_eq!(
        github_web_url("git@github.com:owner/repo.git").as_deref(),
        Some("https://github.com/owner/repo")
    );
}

#[test]
fn test_web_url_from_https_remote() {
    assert_eq!(
        github_web_url("https://github.com/owner/repo.git").as_deref(),
        Some("https://github.com/owner/repo")
    );
    assert_eq!(
        github_web_url("https://github.com/owner/repo").as_deref(),
        Some("https://github.com/owner/repo")
    );
}

#[test]
fn test_web_url_non_github_remote() {
    assert_eq!(github_web_url("https://gitlab.com/owner/repo.git"), None);
    assert_eq!(github_web_url("git@example.org:owner/repo.git"), None);
}

#[test]
fn test_repo_slug_extraction() {
    assert_eq!(
        github_repo_slug("https://github.com/owner/repo").as_deref(),
        Some("owner/repo")
    );
    assert_eq!(
        github_repo_slug("https://github.com/owner/repo/").as_deref(),
        Some("owner/repo")
    );
}

#[test]
fn test_issue_count_parsing() {
    assert_eq!(
        parse_issue_count(r#"[{"number":1},{"number":2},{"number":9}]"#),
        Some(3)
    );
    assert_eq!(parse_issue_count("[]"), Some(0));
    assert_eq!(parse_issue_count("not json"), None);
}
