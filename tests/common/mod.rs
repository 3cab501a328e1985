#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub fn spritetags_cmd() -> Command {
    let mut cmd = Command::cargo_bin("spritetags").unwrap();
    cmd.env_remove("SPRITETAGS_RULES");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn write_rules(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("spritetags.toml");
    fs::write(&path, contents).unwrap();
    path
}

pub const EILEEN_RULES: &str = r#"
[[adjust]]
function = "eileen_adjust_attributes"
when = ["-happy"]
remove = ["-happy"]
add = ["neutral"]

[[adjust]]
name = "eileen"
when = ["neutral"]
unless = ["blush"]
add = ["closed_mouth"]

[[default]]
function = "eileen_default_attributes"
unless_matching = "^eyes_"
add = ["eyes_open"]

[[default]]
name = "eileen"
when = ["eyes_open"]
add = ["blink"]
"#;
