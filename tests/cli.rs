use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn wordcheck() -> Command {
    let mut cmd = Command::cargo_bin("wordcheck").unwrap();
    cmd.env_remove("WORDCHECK_DICTIONARY");
    cmd
}

#[test]
fn reports_misspelled_words_and_totals() {
    let dir = tempdir().unwrap();
    let dict = dir.path().join("small");
    let text = dir.path().join("text.txt");
    fs::write(&dict, "the\nquick\nbrown\nfox\n").unwrap();
    fs::write(&text, "The quikc brown fox jumpd.").unwrap();

    wordcheck()
        .current_dir(dir.path())
        .args(["--no-color", "-d"])
        .arg(&dict)
        .arg(&text)
        .assert()
        .success()
        .stdout(predicate::str::contains("MISSPELLED WORDS"))
        .stdout(predicate::str::contains("quikc\njumpd\n"))
        .stdout(predicate::str::is_match(r"WORDS MISSPELLED:\s+2").unwrap())
        .stdout(predicate::str::is_match(r"WORDS IN DICTIONARY:\s+4").unwrap())
        .stdout(predicate::str::is_match(r"WORDS IN TEXT:\s+5").unwrap())
        .stdout(predicate::str::contains("TIME IN TOTAL:"));
}

#[test]
fn quiet_hides_word_list() {
    let dir = tempdir().unwrap();
    let dict = dir.path().join("small");
    let text = dir.path().join("text.txt");
    fs::write(&dict, "hello").unwrap();
    fs::write(&text, "hello wrold").unwrap();

    wordcheck()
        .current_dir(dir.path())
        .args(["--no-color", "--quiet", "-d"])
        .arg(&dict)
        .arg(&text)
        .assert()
        .success()
        .stdout(predicate::str::contains("MISSPELLED WORDS\n").not())
        .stdout(predicate::str::contains("wrold").not())
        .stdout(predicate::str::is_match(r"WORDS MISSPELLED:\s+1").unwrap());
}

#[test]
fn json_output() {
    let dir = tempdir().unwrap();
    let dict = dir.path().join("small");
    let text = dir.path().join("text.txt");
    fs::write(&dict, "one two").unwrap();
    fs::write(&text, "One three TWO").unwrap();

    let output = wordcheck()
        .current_dir(dir.path())
        .args(["-o", "json", "-d"])
        .arg(&dict)
        .arg(&text)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["words_misspelled"], 1);
    assert_eq!(json["words_in_dictionary"], 2);
    assert_eq!(json["words_in_text"], 3);
    assert_eq!(json["texts"][0]["misspelled"][0], "three");
}

#[test]
fn missing_dictionary_fails() {
    let dir = tempdir().unwrap();
    let text = dir.path().join("text.txt");
    fs::write(&text, "words").unwrap();

    wordcheck()
        .current_dir(dir.path())
        .args(["-d", "/nonexistent/dictionary"])
        .arg(&text)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load /nonexistent/dictionary."));
}

#[test]
fn no_texts_fails() {
    let dir = tempdir().unwrap();
    wordcheck()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No texts specified"));
}

#[test]
fn local_config_sets_dictionary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words"), "configured").unwrap();
    fs::write(dir.path().join(".wordcheck.toml"), "dictionary = \"words\"\nbuckets = 7\n").unwrap();
    fs::write(dir.path().join("text.txt"), "configured").unwrap();

    wordcheck()
        .current_dir(dir.path())
        .args(["--no-color", "text.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"WORDS MISSPELLED:\s+0").unwrap());
}

#[test]
fn stats_subcommand() {
    let dir = tempdir().unwrap();
    let dict = dir.path().join("small");
    fs::write(&dict, "a b c").unwrap();

    let output = wordcheck()
        .current_dir(dir.path())
        .args(["-o", "json", "stats", "--buckets", "4", "-d"])
        .arg(&dict)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["words"], 3);
    assert_eq!(json["buckets"], 4);
    assert_eq!(json["longest_chain"], 3);
    assert_eq!(json["empty_buckets"], 3);
}
