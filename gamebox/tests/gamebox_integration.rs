//! End-to-end tests over a realistic gamebox directory.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use gamebox::{ConflictBehaviour, Gamebox, IdentifierKind, Launcher, VolumeKind};

/// Build a gamebox resembling a real installed game: a hard disk volume
/// with the game and its installer, a CD image, and scattered documentation.
fn build_fixture() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("Dark Tower.gamebox");

    let drive = root.join("C.harddisk");
    fs::create_dir_all(&drive).unwrap();
    fs::write(drive.join("TOWER.EXE"), "game code").unwrap();
    fs::write(drive.join("INSTALL.EXE"), "installer").unwrap();
    fs::write(drive.join("MANUAL.TXT"), "how to play").unwrap();
    fs::write(drive.join("ORDER.TXT"), "order form").unwrap();

    fs::write(root.join("disc.iso"), "cd image").unwrap();
    fs::write(root.join("README.TXT"), "read me first").unwrap();

    (temp, root)
}

#[test]
fn scans_and_classifies_a_full_gamebox() {
    let (_temp, root) = build_fixture();
    let mut gamebox = Gamebox::open(&root).unwrap();

    let executables = gamebox.executables().unwrap();
    assert_eq!(executables.len(), 1, "installer must be excluded");
    assert!(executables[0].ends_with("TOWER.EXE"));

    assert_eq!(gamebox.hdd_volumes().unwrap().len(), 1);
    assert_eq!(gamebox.cd_volumes().unwrap().len(), 1);
    assert_eq!(gamebox.floppy_volumes().unwrap().len(), 0);
    assert_eq!(
        gamebox
            .volumes_of_kinds(&[VolumeKind::Hdd, VolumeKind::Cd])
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn identifier_survives_reopen_and_tracks_content() {
    let (_temp, root) = build_fixture();

    let first = {
        let mut gamebox = Gamebox::open(&root).unwrap();
        gamebox.game_identifier().unwrap()
    };
    assert_eq!(first.kind, IdentifierKind::ExecutableDigest);

    // A fresh instance over the unchanged gamebox agrees.
    let second = Gamebox::open(&root).unwrap().game_identifier().unwrap();
    assert_eq!(first, second);

    // Changing the executable changes the digest.
    fs::write(root.join("C.harddisk/TOWER.EXE"), "patched code").unwrap();
    let third = Gamebox::open(&root).unwrap().game_identifier().unwrap();
    assert_eq!(third.kind, IdentifierKind::ExecutableDigest);
    assert_ne!(first.value, third.value);
}

#[test]
fn launcher_defaults_follow_the_single_default_invariant() {
    let (_temp, root) = build_fixture();
    let mut gamebox = Gamebox::open(&root).unwrap();

    gamebox
        .insert_launcher(
            Launcher::new("Play", "C.harddisk/TOWER.EXE").as_default(),
            0,
        )
        .unwrap();
    gamebox
        .insert_launcher(
            Launcher::new("Setup", "C.harddisk/INSTALL.EXE").as_default(),
            1,
        )
        .unwrap();

    assert_eq!(gamebox.default_launcher().unwrap().title, "Setup");
    assert_eq!(gamebox.default_launcher_index(), Some(1));
    assert!(!gamebox.launchers()[0].is_default);

    gamebox.set_default_launcher_index(Some(0)).unwrap();
    let defaults: Vec<_> = gamebox
        .launchers()
        .iter()
        .filter(|l| l.is_default)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].title, "Play");
}

#[test]
fn documentation_workflow_end_to_end() {
    let (temp, root) = build_fixture();
    let mut gamebox = Gamebox::open(&root).unwrap();
    gamebox.set_trash_dir(temp.path().join("trash"));

    // Before a folder exists, documentation is discovered by scanning.
    // ORDER.TXT is excluded as an order form.
    let urls = gamebox.documentation_urls().unwrap();
    assert_eq!(urls.len(), 2);

    // Create and populate the mirror folder.
    let docs = gamebox.documentation();
    docs.ensure_folder(true).unwrap();
    let report = gamebox.populate_documentation().unwrap();
    assert!(report.is_complete());
    assert_eq!(report.created.len(), 2);

    // Populating again is a no-op.
    let report = gamebox.populate_documentation().unwrap();
    assert!(report.created.is_empty());
    assert_eq!(report.skipped, 2);

    // Import the same external file twice under rename: both entries
    // survive with distinct names.
    let extra = temp.path().join("doc.txt");
    fs::write(&extra, "walkthrough").unwrap();
    let docs = gamebox.documentation();
    let first = docs
        .import_file(&extra, None, ConflictBehaviour::Rename)
        .unwrap();
    let second = docs
        .import_file(&extra, None, ConflictBehaviour::Rename)
        .unwrap();
    assert!(first.ends_with("doc.txt"));
    assert!(second.ends_with("doc-1.txt"));

    // Trash one entry: it moves out of the folder but stays recoverable.
    assert!(docs.can_trash(&second));
    let trashed = docs.trash(&second).unwrap();
    assert!(!second.exists());
    assert_eq!(fs::read_to_string(&trashed).unwrap(), "walkthrough");

    // Entries outside the folder are rejected symmetrically.
    let readme = root.join("README.TXT");
    assert!(!docs.can_trash(&readme));
    assert!(docs.trash(&readme).is_err());
    assert!(readme.exists());
}

#[test]
fn target_program_is_validated_and_persisted() {
    let (_temp, root) = build_fixture();
    let mut gamebox = Gamebox::open(&root).unwrap();

    gamebox
        .set_target_program(Some(std::path::Path::new("C.harddisk/TOWER.EXE")))
        .unwrap();
    gamebox.set_close_on_exit(true).unwrap();

    let reopened = Gamebox::open(&root).unwrap();
    assert!(reopened
        .target_program()
        .unwrap()
        .ends_with("C.harddisk/TOWER.EXE"));
    assert!(reopened.close_on_exit());
}
