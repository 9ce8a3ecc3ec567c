use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_snapshot!(String::from_utf8(output.stdout)?, @"✓ Created ./.autoi18nrc.json");

    let content = test.read_file(".autoi18nrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceLanguage"], "zh-CN");
    assert_eq!(parsed["targetLanguages"][0], "en");
    assert_eq!(parsed["outputDir"], "i18n/strings");
    assert!(
        content.contains("\n  \"sourceLanguage\""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".autoi18nrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.contains(".autoi18nrc.json already exists"));
    assert_eq!(test.read_file(".autoi18nrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/app.ts", r#"export const title = "欢迎使用";"#)?;

    let output = test.run_command().output()?;
    assert!(
        output.status.success(),
        "Run command should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(test.root().join("i18n/strings/zh-CN.json").exists());

    Ok(())
}

#[test]
fn test_init_with_languages() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["init", "--source-root", "web"])
        .args(["--source-language", "ja", "--target-language", "en", "--target-language", "ko"])
        .output()?;
    assert_eq!(output.status.code(), Some(2), "missing root is an error");

    std::fs::create_dir(test.root().join("web"))?;
    let output = test
        .command()
        .args(["init", "--source-root", "web"])
        .args(["--source-language", "ja", "--target-language", "en", "--target-language", "ko"])
        .output()?;
    assert!(output.status.success());

    let parsed: Value = serde_json::from_str(&test.read_file("web/.autoi18nrc.json")?)?;
    assert_eq!(parsed["sourceLanguage"], "ja");
    assert_eq!(parsed["targetLanguages"], serde_json::json!(["en", "ko"]));

    Ok(())
}
