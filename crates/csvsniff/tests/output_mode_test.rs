
use setup::*;

const OCEAN_CSV: &str = "\
Date,Location,Temperature_Celsius,Notes
2024-01-01,Goa Coast,28.5,
2024-01-02,Mumbai,29.1,calm
";

fn test_output_mode(mode: &str, expected: &str) {
    let file = make_csv_file(OCEAN_CSV);
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--mode")
        .arg(mode)
        .arg(file.path());
    let output = cmd.output().expect("Failed to run command");
    let stdout_str = String::from_utf8(output.stdout).expect("Failed to read stdout");

    assert!(output.status.success());
    assert_eq!(stdout_str, expected);
}

#[test]
fn test_output_mode_default() {
    let file = make_csv_file(OCEAN_CSV);
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT).arg(file.path());
    let output = cmd.output().expect("Failed to run command");
    let stdout_str = String::from_utf8(output.stdout).expect("Failed to read stdout");
    let expected = r#"
┌─────────────────────┬────────────────────┐
│ column              │ type               │
╞═════════════════════╪════════════════════╡
│ Date                │ Date/Time          │
│ Location            │ Categorical (Text) │
│ Temperature_Celsius │ Numeric            │
│ Notes               │ Categorical (Text) │
└─────────────────────┴────────────────────┘
"#
    .trim_start();
    assert_eq!(stdout_str, expected);
}

#[test]
fn test_output_mode_json() {
    let expected = concat!(
        r#"[{"columnName":"Date","dataType":"Date/Time"},"#,
        r#"{"columnName":"Location","dataType":"Categorical (Text)"},"#,
        r#"{"columnName":"Temperature_Celsius","dataType":"Numeric"},"#,
        r#"{"columnName":"Notes","dataType":"Categorical (Text)"}]"#,
        "\n",
    );
    test_output_mode("json", expected);
}

#[test]
fn test_output_mode_ndjson() {
    let expected = r#"
{"columnName":"Date","dataType":"Date/Time"}
{"columnName":"Location","dataType":"Categorical (Text)"}
{"columnName":"Temperature_Celsius","dataType":"Numeric"}
{"columnName":"Notes","dataType":"Categorical (Text)"}
"#
    .trim_start();
    test_output_mode("ndjson", expected);
}

#[test]
fn test_output_mode_json_details() {
    let file = make_csv_file("a;b\n1;x\n2;y\n");
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("--mode")
        .arg("json")
        .arg("--details")
        .arg(file.path());
    let output = cmd.output().expect("Failed to run command");
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Failed to parse stdout");

    assert_eq!(value["dialect"]["delimiter"], ";");
    assert_eq!(value["recordsSampled"], 2);
    assert_eq!(value["columns"][1]["dataType"], "Categorical (Text)");
}

#[test]
fn test_multiple_files_table_headings() {
    let first = make_csv_file("a\n1\n");
    let second = make_csv_file("b\nx\n");
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT).arg(first.path()).arg(second.path());
    let output = cmd.output().expect("Failed to run command");
    let stdout_str = String::from_utf8(output.stdout).expect("Failed to read stdout");

    let first_pos = stdout_str
        .find(&first.path().display().to_string())
        .expect("first path in output");
    let second_pos = stdout_str
        .find(&second.path().display().to_string())
        .expect("second path in output");
    assert!(first_pos < second_pos);
}
