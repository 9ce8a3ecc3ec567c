use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_extract_lists_texts() -> Result<()> {
    let test = CliTest::with_file(
        "src/pages/home.tsx",
        r#"
export function Home({ count }) {
    return (
        <div title="首页">
            <h1>欢迎回来</h1>
            <p>共 {count} 条消息</p>
        </div>
    );
}
"#,
    )?;

    let output = test.extract_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.starts_with("src/pages/home.tsx\n"));
    assert!(stdout.contains("首页"));
    assert!(stdout.contains("欢迎回来"));
    assert!(stdout.contains("共 {{0}} 条消息"));
    assert!(stdout.contains("Found 3 texts (3 unique) in 1 of 1 file"));
    assert!(!test.root().join("i18n").exists());

    Ok(())
}

#[test]
fn test_extract_json_report() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a.ts", "const a = \"你好\";\nconst b = `欢迎 ${user.name}`;\n")?;
    test.write_file("src/b.vue", "<template>\n  <p>你好</p>\n</template>\n")?;

    let output = test.extract_command().arg("--json").output()?;
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["summary"]["totalFiles"], 2);
    assert_eq!(report["summary"]["totalTexts"], 3);
    assert_eq!(report["summary"]["uniqueTexts"], 2);
    assert_eq!(report["byFile"]["src/a.ts"][1]["text"], "欢迎{{0}}");
    assert_eq!(report["byFile"]["src/a.ts"][1]["type"], "template");
    assert_eq!(report["byFile"]["src/b.vue"][0]["line"], 2);

    Ok(())
}

#[test]
fn test_extract_parse_error_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/ok.ts", "const a = \"你好\";\n")?;
    test.write_file("src/broken.ts", "const = ;\n")?;

    let output = test.extract_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("你好"));
    assert!(stderr.contains("parse-error"));
    assert!(stderr.contains("--> src/broken.ts:"));

    Ok(())
}

#[test]
fn test_extract_honors_config_and_overrides() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".autoi18nrc.json",
        r#"{ "excludes": ["**/legacy/**"], "ignoreTexts": ["忽略我"] }"#,
    )?;
    test.write_file("src/legacy/old.ts", "const a = \"旧文本\";\n")?;
    test.write_file("src/new.ts", "const a = \"忽略我\";\nconst b = \"新文本\";\n")?;

    let output = test.extract_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("新文本"));
    assert!(!stdout.contains("旧文本"));
    assert!(!stdout.contains("忽略我"));

    // Han-only text is not Korean.
    let output = test
        .extract_command()
        .args(["--source-language", "ko"])
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("No translatable text found in 1 file"));

    Ok(())
}

#[test]
fn test_extract_source_root() -> Result<()> {
    let test = CliTest::with_file("web/src/a.ts", "const a = \"你好\";\n")?;

    let output = test
        .extract_command()
        .args(["--source-root", "web", "--json"])
        .output()?;
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["byFile"]["src/a.ts"][0]["text"], "你好");

    let output = test
        .extract_command()
        .args(["--source-root", "missing"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Source root is not a directory"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("init"));

    Ok(())
}
