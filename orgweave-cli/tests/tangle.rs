//! End-to-end tests for the orgweave binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn orgweave_cmd() -> Command {
    let mut cmd = Command::cargo_bin("orgweave").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_doc(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn tangles_explicit_path() {
    let dir = tempdir().unwrap();
    write_doc(
        dir.path(),
        "test.org",
        "#+begin_src ts :tangle out.ts\nconst x = 1;\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("out.ts")).unwrap();
    assert!(content.starts_with("//"));
    assert!(content.ends_with("const x = 1;\n"));
}

#[test]
fn tangles_named_files_only() {
    let dir = tempdir().unwrap();
    write_doc(
        dir.path(),
        "a.org",
        "#+begin_src ts :tangle a_out.ts\nfrom a\n#+end_src\n",
    );
    write_doc(
        dir.path(),
        "b.org",
        "#+begin_src ts :tangle b_out.ts\nfrom b\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .arg("a.org")
        .assert()
        .success();

    assert!(dir.path().join("a_out.ts").exists());
    assert!(!dir.path().join("b_out.ts").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    write_doc(
        dir.path(),
        "test.org",
        "#+begin_src ts :tangle out.ts\nconst x = 1;\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("out.ts"))
        .stdout(predicate::str::contains("1 blocks"));

    assert!(!dir.path().join("out.ts").exists());
}

#[test]
fn no_input_documents_exits_nonzero() {
    let dir = tempdir().unwrap();

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input documents"));
}

#[test]
fn cleanup_removes_stale_build_caches() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("dist")).unwrap();
    fs::write(dir.path().join("dist/tsconfig.tsbuildinfo"), "{}").unwrap();
    write_doc(
        dir.path(),
        "test.org",
        "#+begin_src ts :tangle out.ts\nconst x = 1;\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .success();

    assert!(!dir.path().join("dist/tsconfig.tsbuildinfo").exists());
}

#[test]
fn no_clean_keeps_build_caches() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("dist")).unwrap();
    fs::write(dir.path().join("dist/tsconfig.tsbuildinfo"), "{}").unwrap();
    write_doc(
        dir.path(),
        "test.org",
        "#+begin_src ts :tangle out.ts\nconst x = 1;\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .arg("--no-clean")
        .assert()
        .success();

    assert!(dir.path().join("dist/tsconfig.tsbuildinfo").exists());
}

#[test]
fn discovery_skips_excluded_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("node_modules")).unwrap();
    write_doc(
        dir.path().join("node_modules").as_path(),
        "dep.org",
        "#+begin_src ts :tangle dep.ts\nskip me\n#+end_src\n",
    );
    write_doc(
        dir.path(),
        "real.org",
        "#+begin_src ts :tangle real.ts\nkeep me\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("real.ts").exists());
    assert!(!dir.path().join("node_modules/dep.ts").exists());
}

#[test]
fn unresolved_reference_stays_greppable() {
    let dir = tempdir().unwrap();
    write_doc(
        dir.path(),
        "test.org",
        "#+begin_src ts :tangle out.ts\n<<missing>>\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("out.ts")).unwrap();
    assert!(content.contains("<<missing>>"));
}

#[test]
fn cycle_reported_inline_without_hanging() {
    let dir = tempdir().unwrap();
    write_doc(
        dir.path(),
        "test.org",
        "#+name: a\n#+begin_src ts\n<<b>>\n#+end_src\n\
         #+name: b\n#+begin_src ts\n<<a>>\n#+end_src\n\
         #+begin_src ts :tangle out.ts\n<<a>>\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("out.ts")).unwrap();
    assert!(content.contains("/* ERROR: Circular reference to a */"));
}

#[test]
fn shebang_lifted_to_first_line() {
    let dir = tempdir().unwrap();
    write_doc(
        dir.path(),
        "test.org",
        "#+begin_src sh :tangle run\n#!/usr/bin/env sh\necho ok\n#+end_src\n",
    );

    orgweave_cmd()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("run")).unwrap();
    assert!(content.starts_with("#!/usr/bin/env sh\n"));
    assert_eq!(content.matches("#!/usr/bin/env sh").count(), 1);
    assert!(content.contains("echo ok"));
}
