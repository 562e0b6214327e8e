use assert_cmd::Command;
use expect_test::expect;

fn sqlsect() -> Command {
    Command::cargo_bin("sqlsect").unwrap()
}

#[test]
fn parses_a_query_from_stdin() {
    let assert = sqlsect()
        .write_stdin("SELECT DISTINCT id, name FROM t WHERE a = ? LIMIT 1")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    expect![[r#"
        modifiers 0 8 DISTINCT
        columns 0 8 id, name
        tables 0 1 t
        where 1 4 5 a = ?
    "#]]
    .assert_eq(&stdout);
}

#[test]
fn reports_invalid_syntax_on_stderr() {
    sqlsect()
        .write_stdin("SELECT")
        .assert()
        .failure()
        .code(2)
        .stdout("")
        .stderr("PARSE_INVALID_SYNTAX\n");
}

#[test]
fn rejects_non_utf8_input() {
    sqlsect()
        .write_stdin(&b"SELECT \xff"[..])
        .assert()
        .failure()
        .code(1)
        .stderr("PARSE_ERROR_INVALID_ARGUMENT\n");
}

#[test]
fn reads_from_a_file_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.sql");
    std::fs::write(&path, "SELECT 1 FROM t").unwrap();

    sqlsect()
        .arg(&path)
        .assert()
        .success()
        .stdout("columns 0 1 1\ntables 0 1 t\n");
}

#[test]
fn dash_argument_reads_stdin() {
    sqlsect()
        .arg("-")
        .write_stdin("SELECT ?")
        .assert()
        .success()
        .stdout("columns 1 0 1 ?\n");
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    sqlsect()
        .arg(dir.path().join("absent.sql"))
        .assert()
        .failure()
        .code(1);
}
