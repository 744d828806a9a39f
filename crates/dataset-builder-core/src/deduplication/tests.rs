use super::*;
use crate::error::Error;
use crate::index::make_reference_hashes;
use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use tempfile::{tempdir, TempDir};

#[derive(Clone, Copy)]
enum Pattern {
    Horizontal,
    Vertical,
    InvertedHorizontal,
}

/// Write a lossless 64x64 gradient regardless of the file extension
fn write_image(path: &Path, pattern: Pattern) {
    let img = RgbImage::from_fn(64, 64, |x, y| {
        let v = match pattern {
            Pattern::Horizontal => x * 4,
            Pattern::Vertical => y * 4,
            Pattern::InvertedHorizontal => 252 - x * 4,
        } as u8;
        Rgb([v, v, v])
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let reference = dir.path().join("reference");
    let incoming = dir.path().join("incoming");
    fs::create_dir(&reference).unwrap();
    fs::create_dir(&incoming).unwrap();
    (dir, reference, incoming)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_duplicate_of_reference_is_reported() {
    let (_dir, reference, incoming) = setup();
    write_image(&reference.join("a.jpg"), Pattern::Horizontal);
    fs::copy(reference.join("a.jpg"), incoming.join("b.jpg")).unwrap();

    let mut index = ReferenceIndex::new();
    make_reference_hashes(&reference, &mut index).unwrap();
    let summary = mark_duplicates(&incoming, &reference, &mut index).unwrap();

    assert!(incoming.join("b.jpg").exists());
    assert_eq!(file_names(&reference), vec!["a.jpg"]);
    match summary.outcome_of(&incoming.join("b.jpg")) {
        Some(Outcome::Duplicate { original, .. }) => assert_eq!(original, &reference.join("a.jpg")),
        other => panic!("expected duplicate, got {:?}", other),
    }
    assert_eq!(index.len(), 1);
}

#[test]
fn test_novel_image_is_relocated_and_registered() {
    let (_dir, reference, incoming) = setup();
    write_image(&incoming.join("c.jpg"), Pattern::Vertical);
    let fingerprint = fingerprint_file(incoming.join("c.jpg")).unwrap();

    let mut index = ReferenceIndex::new();
    make_reference_hashes(&reference, &mut index).unwrap();
    let summary = mark_duplicates(&incoming, &reference, &mut index).unwrap();

    let expected = reference.join(format!("{}_c.jpg", fingerprint));
    assert!(!incoming.join("c.jpg").exists());
    assert!(expected.exists());
    assert!(expected
        .file_name()
        .unwrap()
        .to_string_lossy()
        .contains(&fingerprint.to_string()));
    assert_eq!(index.lookup(&fingerprint), Some(expected.as_path()));
    assert_eq!(summary.relocated(), 1);
}

#[test]
fn test_zero_byte_file_is_skipped() {
    let (_dir, reference, incoming) = setup();
    fs::File::create(incoming.join("broken.jpg")).unwrap();

    let mut index = ReferenceIndex::new();
    let summary = mark_duplicates(&incoming, &reference, &mut index).unwrap();

    assert!(incoming.join("broken.jpg").exists());
    assert!(index.is_empty());
    assert!(file_names(&reference).is_empty());
    assert_eq!(
        summary.outcome_of(&incoming.join("broken.jpg")),
        Some(&Outcome::Skipped)
    );
}

#[test]
fn test_non_image_file_is_skipped() {
    let (_dir, reference, incoming) = setup();
    fs::write(incoming.join("notes.txt"), b"NOT AN IMAGE").unwrap();

    let mut index = ReferenceIndex::new();
    let summary = mark_duplicates(&incoming, &reference, &mut index).unwrap();

    assert_eq!(summary.skipped(), 1);
    assert!(incoming.join("notes.txt").exists());
}

#[test]
fn test_second_copy_in_same_pass_is_duplicate_of_first() {
    let (_dir, reference, incoming) = setup();
    write_image(&incoming.join("x.jpg"), Pattern::Horizontal);
    fs::copy(incoming.join("x.jpg"), incoming.join("y.jpg")).unwrap();

    let mut index = ReferenceIndex::new();
    let summary = mark_duplicates(&incoming, &reference, &mut index).unwrap();

    let relocated = match summary.outcome_of(&incoming.join("x.jpg")) {
        Some(Outcome::Relocated { destination, .. }) => destination.clone(),
        other => panic!("expected relocation, got {:?}", other),
    };
    match summary.outcome_of(&incoming.join("y.jpg")) {
        Some(Outcome::Duplicate { original, .. }) => assert_eq!(original, &relocated),
        other => panic!("expected duplicate, got {:?}", other),
    }
    assert!(incoming.join("y.jpg").exists());
    assert_eq!(file_names(&reference).len(), 1);
    assert_eq!(index.len(), 1);
}

#[test]
fn test_rerun_on_empty_incoming_does_nothing() {
    let (_dir, reference, incoming) = setup();
    write_image(&incoming.join("a.png"), Pattern::Horizontal);
    write_image(&incoming.join("b.png"), Pattern::Vertical);

    let mut index = ReferenceIndex::new();
    let first = mark_duplicates(&incoming, &reference, &mut index).unwrap();
    assert_eq!(first.relocated(), 2);
    assert!(file_names(&incoming).is_empty());

    let before = file_names(&reference);
    let second = mark_duplicates(&incoming, &reference, &mut index).unwrap();

    assert!(second.files.is_empty());
    assert_eq!(file_names(&reference), before);
}

#[test]
fn test_every_file_ends_in_one_state() {
    let (_dir, reference, incoming) = setup();
    write_image(&reference.join("known.png"), Pattern::Horizontal);
    write_image(&incoming.join("1_dup.png"), Pattern::Horizontal);
    write_image(&incoming.join("2_new.png"), Pattern::Vertical);
    write_image(&incoming.join("3_new.png"), Pattern::InvertedHorizontal);
    fs::File::create(incoming.join("4_broken.png")).unwrap();

    let mut index = ReferenceIndex::new();
    make_reference_hashes(&reference, &mut index).unwrap();
    let indexed_before = index.len();
    let summary = mark_duplicates(&incoming, &reference, &mut index).unwrap();

    assert_eq!(summary.files.len(), 4);
    for (path, outcome) in &summary.files {
        match outcome {
            Outcome::Skipped | Outcome::Duplicate { .. } => assert!(path.exists()),
            Outcome::Relocated { destination, .. } => {
                assert!(!path.exists());
                assert!(destination.exists());
            }
        }
    }
    assert_eq!(summary.duplicates(), 1);
    assert_eq!(summary.relocated(), 2);
    assert_eq!(summary.skipped(), 1);
    assert_eq!(index.len(), indexed_before + summary.relocated());
}

#[test]
fn test_reference_index_keeps_first_file() {
    let (_dir, reference, _incoming) = setup();
    write_image(&reference.join("a.png"), Pattern::Horizontal);
    fs::copy(reference.join("a.png"), reference.join("b.png")).unwrap();
    fs::File::create(reference.join("c.png")).unwrap();

    let mut index = ReferenceIndex::new();
    let stats = make_reference_hashes(&reference, &mut index).unwrap();

    assert_eq!(stats.indexed, 1);
    assert_eq!(stats.collisions, 1);
    assert_eq!(stats.skipped, 1);
    let fingerprint = fingerprint_file(reference.join("a.png")).unwrap();
    assert_eq!(index.lookup(&fingerprint), Some(reference.join("a.png").as_path()));
    assert_eq!(file_names(&reference), vec!["a.png", "b.png", "c.png"]);
}

#[test]
fn test_failed_move_is_fatal() {
    let (dir, _reference, incoming) = setup();
    write_image(&incoming.join("c.png"), Pattern::Vertical);
    let missing_reference = dir.path().join("does-not-exist");

    let mut index = ReferenceIndex::new();
    let result = mark_duplicates(&incoming, &missing_reference, &mut index);

    assert!(matches!(result, Err(Error::Relocation { .. })));
    assert!(incoming.join("c.png").exists());
    assert!(index.is_empty());
}

#[test]
fn test_missing_incoming_directory() {
    let (dir, reference, _incoming) = setup();
    let mut index = ReferenceIndex::new();

    let result = mark_duplicates(&dir.path().join("nope"), &reference, &mut index);
    assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
}

#[test]
fn test_relocation_target_name() {
    let target = relocation_target(
        Path::new("/data/ref"),
        Fingerprint(0xff),
        Path::new("/data/in/cat.jpg"),
    );
    assert_eq!(target, PathBuf::from("/data/ref/00000000000000ff_cat.jpg"));
}

#[cfg(unix)]
#[test]
fn test_relocation_target_keeps_non_utf8_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let source = Path::new("/data/in").join(OsStr::from_bytes(b"caf\xe9.jpg"));
    let target = relocation_target(Path::new("/data/ref"), Fingerprint(1), &source);

    assert_eq!(
        target.file_name().unwrap().as_bytes(),
        b"0000000000000001_caf\xe9.jpg"
    );
}
