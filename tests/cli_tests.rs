//! End-to-end tests of the `insert` and `repair` commands.
//!
//! Inputs are written to temporary files and read with the native reader.
//! The bcftools reader is exercised with a shell-script stand-in on unix.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CALLS: &str = "##fileformat=VCFv4.2
##contig=<ID=1,length=248956422>
##contig=<ID=X,length=156040895>
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total depth\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=GQ,Number=1,Type=Integer,Description=\"Genotype quality\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\tS3
1\t100\trs1\tA\tG\t50\tPASS\tDP=20\tGT:GQ\t0/1:40\t./.:.\t1/1:99
1\t250\t.\tAT\tA\t50\tPASS\tDP=20\tGT:GQ\t0/1:40\t0/0:30\t0/0:30
1\t300\trs3\tC\tT\t50\tPASS\tDP=18\tGT:GQ\t0|1:12\t.\t0|0:50
X\t500\trs5\tG\tA\t50\tPASS\tDP=9\tGT:GQ\t0/0:20\t0/1:33\t.|.:7
";

const SITES: &str = "##fileformat=VCFv4.2
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total depth\">
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele frequency\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t100\trs1\tA\tG\t.\t.\tAF=0.2
1\t200\trs2\tC\tG\t.\t.\tAF=0.1
1\t300\trs3\tC\tT\t.\t.\tAF=0.3
2\t50\trs4\tT\tC\t.\t.\tAF=0.4
X\t400\trs6\tA\tT\t.\t.\tAF=0.5
X\t600\trs7\tG\tC\t.\t.\tAF=0.6
";

fn write_inputs(dir: &TempDir) -> (PathBuf, PathBuf) {
    let calls = dir.path().join("calls.vcf");
    let sites = dir.path().join("sites.vcf");
    std::fs::write(&calls, CALLS).unwrap();
    std::fs::write(&sites, SITES).unwrap();
    (calls, sites)
}

fn insert(calls: &Path, sites: &Path) -> Command {
    let mut cmd = Command::cargo_bin("homref-fill").unwrap();
    cmd.arg("insert")
        .arg(calls)
        .arg(sites)
        .args(["--reader", "native"]);
    cmd
}

fn data_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8(stdout.to_vec())
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_insert_fills_missing_sites() {
    let dir = TempDir::new().unwrap();
    let (calls, sites) = write_inputs(&dir);

    let output = insert(&calls, &sites).output().unwrap();
    assert!(output.status.success());

    let lines = data_lines(&output.stdout);
    assert_eq!(
        lines,
        vec![
            "1\t100\trs1\tA\tG\t50\tPASS\tDP=20\tGT:GQ\t0/1:40\t./.:.\t1/1:99",
            "1\t200\trs2\tC\tG\t.\t.\tAF=0.1\tGT\t0|0\t0|0\t0|0",
            "1\t300\trs3\tC\tT\t50\tPASS\tDP=18\tGT:GQ\t0|1:12\t.\t0|0:50",
            "X\t400\trs6\tA\tT\t.\t.\tAF=0.5\tGT\t0|0\t0|0\t0|0",
            "X\t500\trs5\tG\tA\t50\tPASS\tDP=9\tGT:GQ\t0/0:20\t0/1:33\t.|.:7",
            "X\t600\trs7\tG\tC\t.\t.\tAF=0.6\tGT\t0|0\t0|0\t0|0",
        ]
    );
}

#[test]
fn test_insert_with_gq() {
    let dir = TempDir::new().unwrap();
    let (calls, sites) = write_inputs(&dir);

    insert(&calls, &sites)
        .arg("30")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1\t200\trs2\tC\tG\t.\t.\tAF=0.1\tGT:GQ\t0|0:30\t0|0:30\t0|0:30\n",
        ));
}

#[test]
fn test_insert_drops_undeclared_contig() {
    let dir = TempDir::new().unwrap();
    let (calls, sites) = write_inputs(&dir);

    insert(&calls, &sites)
        .assert()
        .success()
        .stdout(predicate::str::contains("rs4").not());
}

#[test]
fn test_insert_reconciles_info_header() {
    let dir = TempDir::new().unwrap();
    let (calls, sites) = write_inputs(&dir);

    let output = insert(&calls, &sites).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let header: Vec<&str> = stdout.lines().take_while(|l| l.starts_with('#')).collect();

    assert_eq!(header.len(), 8);
    assert_eq!(
        header[6],
        "##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele frequency\">"
    );
    assert!(header[7].starts_with("#CHROM"));
    assert_eq!(
        header.iter().filter(|l| l.contains("ID=DP")).count(),
        1,
        "identical INFO lines must not be duplicated"
    );
}

#[test]
fn test_insert_with_repair() {
    let dir = TempDir::new().unwrap();
    let (calls, sites) = write_inputs(&dir);

    let output = insert(&calls, &sites)
        .args(["--repair", "--repair-gq", "25"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = data_lines(&output.stdout);
    assert_eq!(lines[0], "1\t100\trs1\tA\tG\t50\tPASS\tDP=20\tGT:GQ\t0/1:40\t0/0:25\t1/1:99");
    assert_eq!(lines[2], "1\t300\trs3\tC\tT\t50\tPASS\tDP=18\tGT:GQ\t0|1:12\t0/0:25\t0|0:50");
    assert_eq!(lines[4], "X\t500\trs5\tG\tA\t50\tPASS\tDP=9\tGT:GQ\t0/0:20\t0/1:33\t0|0:25");

    // Added records are written as built, without a GQ from --repair-gq
    assert_eq!(lines[1], "1\t200\trs2\tC\tG\t.\t.\tAF=0.1\tGT\t0|0\t0|0\t0|0");
    assert_eq!(lines[3], "X\t400\trs6\tA\tT\t.\t.\tAF=0.5\tGT\t0|0\t0|0\t0|0");
    assert_eq!(lines[5], "X\t600\trs7\tG\tC\t.\t.\tAF=0.6\tGT\t0|0\t0|0\t0|0");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_insert_writes_summary() {
    let dir = TempDir::new().unwrap();
    let (calls, sites) = write_inputs(&dir);
    let summary = dir.path().join("summary.json");
    let output = dir.path().join("out.vcf");

    insert(&calls, &sites)
        .arg("-o")
        .arg(&output)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    // The AT>A indel is filtered before merging
    assert_eq!(json["merge"]["input_records"], 3);
    assert_eq!(json["merge"]["synthesized_records"], 3);
    assert_eq!(json["merge"]["matched_sites"], 2);
    assert_eq!(json["merge"]["dropped_sites"], 1);
    assert!(json.get("repair").is_none());

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().filter(|l| !l.starts_with('#')).count(), 6);
}

#[test]
fn test_insert_malformed_record_fails() {
    let dir = TempDir::new().unwrap();
    let (calls, _) = write_inputs(&dir);
    let sites = dir.path().join("bad_sites.vcf");
    std::fs::write(
        &sites,
        "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n1\t200\trs2\tC\n",
    )
    .unwrap();

    insert(&calls, &sites)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed record"));
}

#[test]
fn test_insert_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let (calls, _) = write_inputs(&dir);

    insert(&calls, &dir.path().join("absent.vcf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open site panel"));
}

/// Stand-in for `bcftools` that records its arguments, prints a small VCF and
/// exits with status 3.
#[cfg(unix)]
fn write_failing_bcftools(dir: &TempDir) -> (PathBuf, PathBuf) {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let log = dir.path().join("bcftools.log");
    let script = dir.path().join("bcftools.sh");
    let body = format!(
        r#"#!/bin/sh
echo "$@" >> "{}"
printf '##contig=<ID=1>\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n1\t100\t.\tA\tG\t.\t.\t.\tGT\t0/1\n'
exit 3
"#,
        log.display()
    );

    let mut file = std::fs::File::create(&script).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.sync_all().unwrap();
    drop(file);
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    (script, log)
}

#[cfg(unix)]
#[test]
fn test_insert_bcftools_reader_arguments_and_exit_status() {
    let dir = TempDir::new().unwrap();
    let (calls, sites) = write_inputs(&dir);
    let (bcftools, log) = write_failing_bcftools(&dir);

    Command::cargo_bin("homref-fill")
        .unwrap()
        .arg("insert")
        .arg(&calls)
        .arg(&sites)
        .arg("--bcftools")
        .arg(&bcftools)
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "External reader for call set {} failed",
            calls.display()
        )));

    let invocations = std::fs::read_to_string(&log).unwrap();
    let invocations: Vec<&str> = invocations.lines().collect();
    assert_eq!(
        invocations,
        vec![
            format!("view -G -m2 -M2 -v snps {}", sites.display()),
            format!("view -m2 -M2 -v snps {}", calls.display()),
        ]
    );
}

#[test]
fn test_repair_from_stdin() {
    let output = Command::cargo_bin("homref-fill")
        .unwrap()
        .args(["repair", "30"])
        .write_stdin(CALLS)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("##fileformat=VCFv4.2\n"));

    let lines = data_lines(stdout.as_bytes());
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "1\t100\trs1\tA\tG\t50\tPASS\tDP=20\tGT:GQ\t0/1:40\t0/0:30\t1/1:99");
    // Indels are not filtered by repair, and called genotypes are untouched
    assert_eq!(lines[1], "1\t250\t.\tAT\tA\t50\tPASS\tDP=20\tGT:GQ\t0/1:40\t0/0:30\t0/0:30");
    assert_eq!(lines[2], "1\t300\trs3\tC\tT\t50\tPASS\tDP=18\tGT:GQ\t0|1:12\t0/0:30\t0|0:50");
    assert_eq!(lines[3], "X\t500\trs5\tG\tA\t50\tPASS\tDP=9\tGT:GQ\t0/0:20\t0/1:33\t0|0:30");
}

#[test]
fn test_repair_default_gq() {
    Command::cargo_bin("homref-fill")
        .unwrap()
        .arg("repair")
        .write_stdin(CALLS)
        .assert()
        .success()
        .stdout(predicate::str::contains("\t0/1:40\t0/0:20\t1/1:99\n"));
}

#[test]
fn test_repair_field_count_mismatch_fails() {
    let vcf = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n1\t5\t.\tA\tC\t.\t.\t.\tGT\t0/1:30\n";
    Command::cargo_bin("homref-fill")
        .unwrap()
        .arg("repair")
        .write_stdin(vcf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("subfields"));
}
