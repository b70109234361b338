
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use setup::*;

#[test]
fn test_read_stdin() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--mode")
        .arg("json")
        .write_stdin("id,name\n1,Goa\n")
        .assert()
        .success()
        .stdout(concat!(
            r#"[{"columnName":"id","dataType":"Numeric"},"#,
            r#"{"columnName":"name","dataType":"Categorical (Text)"}]"#,
            "\n",
        ));
}

#[test]
fn test_read_stdin_dash() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--mode")
        .arg("ndjson")
        .arg("-")
        .write_stdin("when\n2024-01-01\n")
        .assert()
        .success()
        .stdout("{\"columnName\":\"when\",\"dataType\":\"Date/Time\"}\n");
}

#[test]
fn test_empty_input() {
    let file = make_csv_file("");
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg(file.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("ERROR").and(contains("input is empty")));
}

#[test]
fn test_header_without_columns() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .write_stdin("\n\n")
        .assert()
        .code(1)
        .stderr(contains("ERROR").and(contains("no columns")));
}

#[test]
fn test_missing_file() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("does/not/exist.csv")
        .assert()
        .code(1)
        .stderr(contains("Failed to read 'does/not/exist.csv'"));
}

#[test]
fn test_one_failure_does_not_stop_others() {
    let empty = make_csv_file("");
    let good = make_csv_file("n\n1\n");
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--mode")
        .arg("json")
        .arg(empty.path())
        .arg(good.path())
        .assert()
        .code(1)
        .stdout("[{\"columnName\":\"n\",\"dataType\":\"Numeric\"}]\n")
        .stderr(contains("ERROR"));
}

#[test]
fn test_sample_size() {
    let input = "n\n1\n2\nthree\n";

    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .args(["--mode", "ndjson", "--sample-size", "2"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("\"Numeric\""));

    let mut cmd = make_cli();
    cmd.timeout(DEFAULT_TIMEOUT)
        .args(["--mode", "ndjson"])
        .env("CSVSNIFF_SAMPLE_SIZE", "3")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("\"Categorical (Text)\""));
}

#[test]
fn test_invalid_sample_size() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .args(["--sample-size", "0"])
        .write_stdin("n\n1\n")
        .assert()
        .code(1)
        .stderr(contains("Sample size cannot be less than 1"));
}

#[test]
fn test_explicit_delimiter() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .args(["--mode", "ndjson", "--delimiter", "tab"])
        .write_stdin("a\tb\n1\t2024-01-01\n")
        .assert()
        .success()
        .stdout(concat!(
            "{\"columnName\":\"a\",\"dataType\":\"Numeric\"}\n",
            "{\"columnName\":\"b\",\"dataType\":\"Date/Time\"}\n",
        ));
}

#[test]
fn test_logs_to_stderr() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .args(["--mode", "json", "--log-level", "info", "--log-format", "json"])
        .write_stdin("a\n1\n")
        .assert()
        .success()
        .stdout("[{\"columnName\":\"a\",\"dataType\":\"Numeric\"}]\n")
        .stderr(contains("inferred schema"));
}
