use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vcf2addressbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vcf2addressbook").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("vcf_files/test_files")
        .join(name)
}

#[test]
fn test_import_then_sort() {
    let dir = TempDir::new().unwrap();

    vcf2addressbook(&dir)
        .arg(fixture("contacts.vcf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 4 contacts"));

    let addressbook = fs::read_to_string(dir.path().join("addressbook")).unwrap();
    assert!(addressbook.starts_with("[0]\nname=3\n\n[1]\nname=Alice Example\n"));
    assert!(addressbook.contains("[2]\nname=bob builder\nmobile=555-4321\nnotes=fixes things\n"));
    assert!(addressbook.ends_with("[3]\nname=nofn@example.com\nemail=nofn@example.com\n"));
    assert!(addressbook.contains("fax=555-0001\n"));
    assert!(!addressbook.contains("workphone=555-0001"));
    assert_eq!(
        fs::read_to_string(dir.path().join("addressbook.bak")).unwrap(),
        ""
    );

    // Sorting the freshly written file is a no-op
    fs::remove_file(dir.path().join("addressbook.bak")).unwrap();
    vcf2addressbook(&dir).assert().success();
    assert_eq!(
        fs::read_to_string(dir.path().join("addressbook")).unwrap(),
        addressbook
    );
    assert!(!dir.path().join("addressbook.bak").exists());

    // Importing the same file again refreshes the contacts instead of duplicating them
    vcf2addressbook(&dir)
        .arg(fixture("contacts.vcf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 4 contacts"));
    assert_eq!(
        fs::read_to_string(dir.path().join("addressbook")).unwrap(),
        addressbook
    );
}

#[test]
fn test_sort_existing_addressbook() {
    let dir = TempDir::new().unwrap();
    let original = fs::read_to_string(fixture("addressbook")).unwrap();
    fs::write(dir.path().join("addressbook"), &original).unwrap();

    vcf2addressbook(&dir).assert().success();

    assert_eq!(
        fs::read_to_string(dir.path().join("addressbook")).unwrap(),
        "[0]\nname=Alice Example\nphone=555-1234\n\n\
         [1]\nname=bob builder\nmobile=555-4321\nnotes=fixes things\n\n\
         [2]\nname=Zoe Zimmer\nemail=zoe@zimmer.org\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("addressbook.bak")).unwrap(),
        original
    );
}

#[test]
fn test_custom_addressbook_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("contacts"), "[0]\nname=b\n\n[1]\nname=A\n").unwrap();

    vcf2addressbook(&dir)
        .args(["--addressbook", "contacts"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("contacts")).unwrap(),
        "[0]\nname=A\n\n[1]\nname=b\n"
    );
    assert!(dir.path().join("contacts.bak").exists());
    assert!(!dir.path().join("addressbook").exists());
}

#[test]
fn test_missing_addressbook() {
    let dir = TempDir::new().unwrap();
    vcf2addressbook(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing or empty addressbook file"));
    assert!(!dir.path().join("addressbook").exists());
}

#[test]
fn test_missing_vcf_file() {
    let dir = TempDir::new().unwrap();
    vcf2addressbook(&dir)
        .arg("missing.vcf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.vcf"));
    assert!(!dir.path().join("addressbook").exists());
}

#[test]
fn test_piped_output_has_no_colors() {
    let dir = TempDir::new().unwrap();
    vcf2addressbook(&dir)
        .arg(fixture("contacts.vcf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 4 contacts"))
        .stdout(predicate::str::contains("\x1b[").not());

    vcf2addressbook(&dir)
        .arg("missing.vcf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("\x1b[").not());
}
