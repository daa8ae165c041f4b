use file_helper::{copy_item, copy_tree, delete_tree, FileHelperError};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn copy_then_delete_source_scenario() {
    let td = tempdir().unwrap();
    let root = td.path().join("root");
    write(&root.join("a/b.txt"), "b-content");
    write(&root.join("c.txt"), "c-content");
    let dst = td.path().join("dst");
    fs::create_dir_all(&dst).unwrap();

    let errors = copy_tree(&root, &dst);
    assert!(errors.is_empty(), "{errors}");
    assert_eq!(fs::read_to_string(dst.join("a/b.txt")).unwrap(), "b-content");
    assert_eq!(fs::read_to_string(dst.join("c.txt")).unwrap(), "c-content");

    let errors = delete_tree(&root, true);
    assert!(errors.is_empty(), "{errors}");
    assert!(!root.exists());
    assert!(dst.join("a/b.txt").exists(), "copy is independent of source");
}

#[test]
fn nested_dir_sharing_source_name_keeps_depth() {
    let td = tempdir().unwrap();
    let src = td.path().join("photos");
    write(&src.join("2024/photos/img.jpg"), "jpg");
    write(&src.join("top.jpg"), "top");
    let dst = td.path().join("backup");

    let errors = copy_tree(&src, &dst);
    assert!(errors.is_empty(), "{errors}");
    assert_eq!(fs::read_to_string(dst.join("2024/photos/img.jpg")).unwrap(), "jpg");
    assert_eq!(fs::read_to_string(dst.join("top.jpg")).unwrap(), "top");
    assert!(!dst.join("img.jpg").exists());
}

#[test]
fn copy_tree_reproduces_empty_dirs_and_mtime() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir_all(src.join("empty/nested")).unwrap();
    write(&src.join("dated.txt"), "d");
    let stamp = FileTime::from_unix_time(1_500_000_000, 0);
    set_file_mtime(src.join("dated.txt"), stamp).unwrap();
    let dst = td.path().join("dst");

    let errors = copy_tree(&src, &dst);
    assert!(errors.is_empty(), "{errors}");
    assert!(dst.join("empty/nested").is_dir());
    let copied = FileTime::from_last_modification_time(&fs::metadata(dst.join("dated.txt")).unwrap());
    assert_eq!(copied, stamp);
}

#[test]
fn copy_tree_with_missing_source_logs_instead_of_panicking() {
    let td = tempdir().unwrap();
    let errors = copy_tree(&td.path().join("missing"), &td.path().join("dst"));
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.kind_name() == "not_found"), "{errors}");
}

#[test]
fn copy_item_places_single_file_inside_destination() {
    let td = tempdir().unwrap();
    let file = td.path().join("report.pdf");
    fs::write(&file, b"%PDF").unwrap();
    let dest = td.path().join("out/nested");

    let errors = copy_item(&file, &dest).unwrap();
    assert!(errors.is_empty(), "{errors}");
    assert_eq!(fs::read(dest.join("report.pdf")).unwrap(), b"%PDF");
}

#[test]
fn copy_item_copies_directory_contents() {
    let td = tempdir().unwrap();
    let src = td.path().join("music");
    write(&src.join("album/01.flac"), "one");
    let dest = td.path().join("usb");

    let errors = copy_item(&src, &dest).unwrap();
    assert!(errors.is_empty(), "{errors}");
    assert_eq!(fs::read_to_string(dest.join("album/01.flac")).unwrap(), "one");
    assert!(!dest.join("music").exists());
}

#[test]
fn copy_item_missing_source_is_distinct_and_creates_nothing() {
    let td = tempdir().unwrap();
    let dest = td.path().join("never");
    let err = copy_item(&td.path().join("ghost"), &dest).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FileHelperError>(),
        Some(FileHelperError::PathMissing(_))
    ));
    assert!(!dest.exists());
}

#[test]
fn copy_item_refuses_destination_inside_source() {
    let td = tempdir().unwrap();
    let src = td.path().join("data");
    write(&src.join("x.txt"), "x");
    let dest = src.join("backup");

    let err = copy_item(&src, &dest).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FileHelperError>(),
        Some(FileHelperError::DestinationInsideSource { .. })
    ));
    assert!(!dest.exists());
}

#[test]
fn copy_item_onto_itself_keeps_file_and_logs_same_file() {
    let td = tempdir().unwrap();
    let file = td.path().join("a.txt");
    fs::write(&file, "precious").unwrap();

    let errors = copy_item(&file, td.path()).unwrap();
    assert_eq!(errors.len(), 1, "{errors}");
    assert_eq!(errors.iter().next().unwrap().kind_name(), "same_file");
    assert_eq!(fs::read_to_string(&file).unwrap(), "precious");
}

#[test]
fn copy_tree_into_own_directory_never_truncates() {
    let td = tempdir().unwrap();
    let src = td.path().join("docs");
    write(&src.join("a.txt"), "alpha");
    write(&src.join("inner/b.txt"), "beta");

    let errors = copy_tree(&src, &src);
    assert_eq!(errors.len(), 2, "{errors}");
    assert!(errors.iter().all(|e| e.kind_name() == "same_file"), "{errors}");
    assert_eq!(fs::read_to_string(src.join("a.txt")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(src.join("inner/b.txt")).unwrap(), "beta");
}

#[test]
fn copy_item_up_into_parent_refused_when_it_would_overwrite_source() {
    let td = tempdir().unwrap();
    let parent = td.path().join("d");
    let sub = parent.join("sub");
    write(&sub.join("f"), "outer");
    write(&sub.join("sub/f"), "inner");

    let err = copy_item(&sub, &parent).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FileHelperError>(),
        Some(FileHelperError::CopyOverlapsSource { .. })
    ));
    assert_eq!(fs::read_to_string(sub.join("f")).unwrap(), "outer");
    assert_eq!(fs::read_to_string(sub.join("sub/f")).unwrap(), "inner");
}

#[test]
fn copy_item_up_into_parent_allowed_without_name_clash() {
    let td = tempdir().unwrap();
    let parent = td.path().join("d");
    let sub = parent.join("sub");
    write(&sub.join("notes/f"), "n");

    let errors = copy_item(&sub, &parent).unwrap();
    assert!(errors.is_empty(), "{errors}");
    assert_eq!(fs::read_to_string(parent.join("notes/f")).unwrap(), "n");
    assert_eq!(fs::read_to_string(sub.join("notes/f")).unwrap(), "n");
}
