use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

const HOME_PAGE: &str = r#"
export function Home({ user }) {
    return (
        <section>
            <h1>欢迎回来</h1>
            <p>你好，{user}</p>
        </section>
    );
}
"#;

fn with_glossary(test: &CliTest) -> Result<()> {
    test.write_file(
        ".autoi18nrc.json",
        r#"{
            "targetLanguages": ["en", "ja"],
            "translation": { "provider": "glossary", "glossary": "glossary.json" }
        }"#,
    )?;
    test.write_file(
        "glossary.json",
        r#"{
            "en": { "欢迎回来": "Welcome back", "你好，{{0}}": "Hello, {{0}}" },
            "ja": { "欢迎回来": "おかえりなさい" }
        }"#,
    )
}

#[test]
fn test_run_writes_catalogs() -> Result<()> {
    let test = CliTest::with_file("src/pages/home.tsx", HOME_PAGE)?;
    with_glossary(&test)?;

    let output = test.run_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("Extracted 2 texts (2 unique) from 1 file"));
    assert!(stdout.contains("keys: 2 new, 0 reused"));

    let zh = test.read_json("i18n/strings/zh-CN.json")?;
    let en = test.read_json("i18n/strings/en.json")?;
    let ja = test.read_json("i18n/strings/ja.json")?;
    assert_eq!(zh["pages.home.welcomeBack"], "欢迎回来");
    assert_eq!(en["pages.home.welcomeBack"], "Welcome back");
    assert_eq!(ja["pages.home.welcomeBack"], "おかえりなさい");
    assert_eq!(en["pages.home.hello"], "Hello, {{0}}");

    // No Japanese entry for the greeting: source text plus a warning.
    assert_eq!(ja["pages.home.hello"], "你好，{{0}}");
    assert!(stderr.contains("translation-failed"));
    let log = test.read_json("i18n/strings/warnings.json")?;
    assert_eq!(log["summary"]["byType"]["translation-failed"], 1);

    assert!(test.root().join("i18n/patches/en.json").exists());
    assert!(test.root().join("i18n/strings/extraction-report.json").exists());

    Ok(())
}

#[test]
fn test_second_run_is_stable() -> Result<()> {
    let test = CliTest::with_file("src/pages/home.tsx", HOME_PAGE)?;
    with_glossary(&test)?;

    test.run_command().output()?;
    let first = test.read_file("i18n/strings/en.json")?;

    test.write_file(
        "src/pages/about.tsx",
        "export const About = () => <h2>欢迎回来</h2>;\n",
    )?;
    let output = test.run_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("keys: 0 new, 2 reused"));
    assert_eq!(test.read_file("i18n/strings/en.json")?, first);

    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/pages/home.tsx", HOME_PAGE)?;

    let output = test.run_command().arg("--dry-run").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("dry run, no files were written"));
    assert!(stdout.contains("keys: 2 new, 0 reused"));
    assert!(!test.root().join("i18n").exists());

    Ok(())
}

#[test]
fn test_target_language_override() -> Result<()> {
    let test = CliTest::with_file("src/a.ts", "const a = \"你好\";\n")?;

    let output = test
        .run_command()
        .args(["--target-language", "fr", "--target-language", "de"])
        .output()?;

    assert!(output.status.success());
    assert!(test.root().join("i18n/strings/fr.json").exists());
    assert!(test.root().join("i18n/strings/de.json").exists());
    assert!(!test.root().join("i18n/strings/en.json").exists());
    assert_eq!(test.read_json("i18n/strings/fr.json")?["a.text"], "你好");

    Ok(())
}

#[test]
fn test_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_file("src/a.ts", "const a = \"你好\";\n")?;
    test.write_file(".autoi18nrc.json", r#"{ "keyMaxLength": 4 }"#)?;

    let output = test.run_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("keyMaxLength"));

    Ok(())
}
