use file_helper::{list_dirs, list_files, DirOrder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// root/{a/{b/{c/f1, f2}, g/}, h/f3, f4}
fn build_tree(root: &Path) {
    fs::create_dir_all(root.join("a/b/c")).unwrap();
    fs::create_dir_all(root.join("a/g")).unwrap();
    fs::create_dir_all(root.join("h")).unwrap();
    fs::write(root.join("a/b/c/f1"), b"1").unwrap();
    fs::write(root.join("a/b/f2"), b"2").unwrap();
    fs::write(root.join("h/f3"), b"3").unwrap();
    fs::write(root.join("f4"), b"4").unwrap();
}

#[test]
fn list_files_returns_each_file_once_and_no_dirs() {
    let td = tempdir().unwrap();
    build_tree(td.path());

    let (files, errors) = list_files(td.path());
    assert!(errors.is_empty(), "{errors}");
    assert_eq!(files.len(), 4);

    let unique: HashSet<&PathBuf> = files.iter().collect();
    assert_eq!(unique.len(), files.len(), "duplicates in {files:?}");
    assert!(files.iter().all(|p| p.is_file()));
}

#[test]
fn leaf_first_never_lists_ancestor_before_descendant() {
    let td = tempdir().unwrap();
    build_tree(td.path());

    let (dirs, errors) = list_dirs(td.path(), DirOrder::LeafFirst, true);
    assert!(errors.is_empty(), "{errors}");
    assert_eq!(dirs.len(), 6, "root, a, a/b, a/b/c, a/g, h: {dirs:?}");

    for (i, earlier) in dirs.iter().enumerate() {
        for later in &dirs[i + 1..] {
            assert!(
                !later.starts_with(earlier),
                "{} listed before its descendant {}",
                earlier.display(),
                later.display()
            );
        }
    }
    assert_eq!(dirs.last().map(PathBuf::as_path), Some(td.path()));
}

#[test]
fn root_first_is_exact_reverse_of_leaf_first() {
    let td = tempdir().unwrap();
    build_tree(td.path());

    let (pre, _) = list_dirs(td.path(), DirOrder::RootFirst, false);
    let (mut post, _) = list_dirs(td.path(), DirOrder::LeafFirst, false);
    post.reverse();
    assert_eq!(pre, post);
    assert!(!pre.contains(&td.path().to_path_buf()), "root excluded unless asked");
}

#[test]
fn missing_root_reports_error_and_empty_listing() {
    let td = tempdir().unwrap();
    let missing = td.path().join("nope");

    let (dirs, errors) = list_dirs(&missing, DirOrder::LeafFirst, false);
    assert!(dirs.is_empty());
    assert_eq!(errors.len(), 1);
    let entry = errors.iter().next().unwrap();
    assert_eq!(entry.kind_name(), "not_found");
    assert_eq!(entry.path(), missing.as_path());
}

#[cfg(unix)]
#[test]
fn unreadable_subtree_is_skipped_and_siblings_listed() {
    use std::os::unix::fs::PermissionsExt;

    if unsafe { libc::geteuid() } == 0 {
        eprintln!("skipping: running as root");
        return;
    }

    let td = tempdir().unwrap();
    build_tree(td.path());
    let locked = td.path().join("a/b");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let (files, errors) = list_files(td.path());
    let (dirs, dir_errors) = list_dirs(td.path(), DirOrder::RootFirst, false);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(errors.len(), 1, "{errors}");
    assert_eq!(errors.iter().next().unwrap().kind_name(), "access_denied");
    let mut names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["f3", "f4"]);

    assert_eq!(dir_errors.len(), 1);
    assert!(dirs.contains(&locked), "unreadable dir is still recorded");
    assert!(!dirs.contains(&locked.join("c")));
}
