use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

// --- boundary classify tests ---

#[test]
fn command_boundary_classify() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("tcbf");
    let output = cmd
        .arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "Q1\tconserved\t3\t1\n\
         Q2\tsplit\t10,11\t0.5\n\
         Q3\tsplit\t19,18\t0.5\n\
         Q5\tconserved\t7\t1\n\
         Q5\tsplit\t7,8\t0.5\n"
    );
    assert!(!stdout.contains("Q4"));

    Ok(())
}

#[test]
fn command_boundary_classify_max_shift() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("tcbf");
    let output = cmd
        .arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .arg("--max-shift")
        .arg("1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 4);
    assert!(!stdout.contains("Q3"));

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .arg("--max-shift")
        .arg("0")
        .assert()
        .failure();

    Ok(())
}

#[test]
fn command_boundary_classify_parallel() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("tcbf");
    let serial = cmd
        .arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .output()?;

    let mut cmd = cargo_bin_cmd!("tcbf");
    let parallel = cmd
        .arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .arg("--parallel")
        .output()?;

    assert!(parallel.status.success());
    assert_eq!(serial.stdout, parallel.stdout);

    Ok(())
}

#[test]
fn command_boundary_classify_network() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("tcbf");
    let output = cmd
        .arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .arg("--network")
        .arg("--genome")
        .arg("hg38")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 8);
    assert!(stdout.contains("Q1\thg38_3\t1\n"));
    assert!(stdout.contains("Q2\thg38_10\t0.5\n"));
    assert!(stdout.contains("Q2\thg38_11\t0.5\n"));
    assert!(stdout.contains("Q5\thg38_7\t1\n"));

    Ok(())
}

#[test]
fn command_boundary_classify_network_needs_genome() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .arg("--network")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--genome"));

    Ok(())
}

#[test]
fn command_boundary_classify_malformed() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("classify")
        .arg("tests/boundary/malformed.tsv")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Malformed hit"))
        .stderr(predicate::str::contains("Q2"));

    Ok(())
}

#[test]
fn command_boundary_classify_non_integer_index() -> Result<(), Box<dyn std::error::Error>> {
    let mut infile = NamedTempFile::new()?;
    writeln!(infile, "Q1\tleft\t3\tleft")?;
    writeln!(infile, "Q1\tright\tthree\tright")?;

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("classify")
        .arg(infile.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("not an integer"));

    Ok(())
}

#[test]
fn command_boundary_classify_outfile() -> Result<(), Box<dyn std::error::Error>> {
    let outfile = NamedTempFile::new()?;
    let out_path = outfile.path().to_str().unwrap();

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .arg("-o")
        .arg(out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let output = std::fs::read_to_string(out_path)?;
    assert!(output.starts_with("Q1\tconserved\t3\t1\n"));

    Ok(())
}

#[test]
fn command_boundary_classify_verbose() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("classify")
        .arg("tests/boundary/hits.tsv")
        .arg("-v")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("classified boundary hits"))
        .stderr(predicate::str::contains("skipped=1"));

    Ok(())
}

// --- boundary expand tests ---

#[test]
fn command_boundary_expand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo_bin_cmd!("tcbf");
    let output = cmd
        .arg("boundary")
        .arg("expand")
        .arg("tests/boundary/alignments.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "Q1\tleft\t3\tleft\n\
         Q1\tright\t4\tleft\n\
         Q1\tright\t3\tright\n\
         Q2\tleft\t10\tleft\n\
         Q2\tleft\t9\tright\n\
         Q2\tright\t11\tright\n"
    );

    Ok(())
}

#[test]
fn command_boundary_expand_then_classify() -> Result<(), Box<dyn std::error::Error>> {
    let hits = NamedTempFile::new()?;
    let hits_path = hits.path().to_str().unwrap();

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("expand")
        .arg("tests/boundary/alignments.tsv")
        .arg("-o")
        .arg(hits_path)
        .assert()
        .success();

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("classify")
        .arg(hits_path)
        .assert()
        .success()
        .stdout("Q1\tconserved\t3\t1\nQ2\tsplit\t10,11\t0.5\n");

    Ok(())
}

#[test]
fn command_boundary_expand_bad_label() -> Result<(), Box<dyn std::error::Error>> {
    let mut infile = NamedTempFile::new()?;
    writeln!(infile, "Q1\tleft\thg38_3_up")?;

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("expand")
        .arg(infile.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target boundary label"));

    Ok(())
}

#[test]
fn command_boundary_expand_adjacent_interior_labels() -> Result<(), Box<dyn std::error::Error>> {
    let hits = NamedTempFile::new()?;
    let hits_path = hits.path().to_str().unwrap();

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("expand")
        .arg("tests/boundary/adjacent.tsv")
        .arg("-o")
        .arg(hits_path)
        .assert()
        .success();

    let expanded = std::fs::read_to_string(hits_path)?;
    assert_eq!(
        expanded,
        "Q\tleft\t5\tleft\n\
         Q\tleft\t4\tleft\n\
         Q\tleft\t3\tright\n\
         Q\tright\t5\tright\n"
    );

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("classify")
        .arg(hits_path)
        .assert()
        .success()
        .stdout("Q\tconserved\t5\t1\nQ\tsplit\t4,5\t0.5\n");

    Ok(())
}

#[test]
fn command_boundary_expand_conflicting_labels() -> Result<(), Box<dyn std::error::Error>> {
    let mut infile = NamedTempFile::new()?;
    writeln!(infile, "Q\tleft\thg38_4_left-first")?;
    writeln!(infile, "Q\tleft\thg38_4_right-last")?;

    let mut cmd = cargo_bin_cmd!("tcbf");
    cmd.arg("boundary")
        .arg("expand")
        .arg(infile.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Conflicting target labels"))
        .stderr(predicate::str::contains("hg38_4_left-first"))
        .stderr(predicate::str::contains("hg38_4_right-last"));

    Ok(())
}
