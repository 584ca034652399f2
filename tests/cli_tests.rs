use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::Value;

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_snakelet"))
}

fn write_script(name: &str, source: &str) -> Result<PathBuf, String> {
    let dir = std::env::temp_dir()
        .join("snakelet_cli_tests")
        .join(std::process::id().to_string());
    fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
    let file = dir.join(name);
    fs::write(&file, source).map_err(|e| e.to_string())?;
    Ok(file)
}

struct CommandResult {
    status_ok: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

fn run_cmd(args: &[&str], input: Option<&str>) -> Result<CommandResult, String> {
    let mut cmd = Command::new(bin_path());
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| e.to_string())?;
    if let Some(mut handle) = child.stdin.take() {
        if let Some(data) = input {
            handle
                .write_all(data.as_bytes())
                .map_err(|e| e.to_string())?;
        }
    }

    let output = child.wait_with_output().map_err(|e| e.to_string())?;
    Ok(CommandResult {
        status_ok: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

fn path_arg(path: &PathBuf) -> Result<&str, String> {
    path.to_str().ok_or_else(|| "bad path".to_string())
}

#[test]
fn run_ok() -> Result<(), String> {
    let file = write_script("count.py", "i = 0\nwhile i < 3:\n    print(i)\n    i = i + 1\n")?;

    let result = run_cmd(&[path_arg(&file)?], None)?;
    if !result.status_ok {
        return Err(result.stdout);
    }
    if result.stdout != "0\n1\n2\n" {
        return Err(format!("unexpected output: {:?}", result.stdout));
    }
    Ok(())
}

#[test]
fn undeclared_name_exits_with_one() -> Result<(), String> {
    let file = write_script("ghost.py", "print('before')\nprint(ghost)\n")?;

    let result = run_cmd(&[path_arg(&file)?], None)?;
    if result.code != Some(1) {
        return Err(format!("expected exit code 1, got {:?}", result.code));
    }
    if !result.stdout.starts_with("before\n") {
        return Err(format!("output before error lost: {:?}", result.stdout));
    }
    if !result.stdout.contains("Name ghost not declared (line 2)") {
        return Err(format!("expected diagnostic, got: {}", result.stdout));
    }
    Ok(())
}

#[test]
fn runtime_type_error_exits_with_one() -> Result<(), String> {
    let file = write_script("types.py", "x = 'a' + 1\n")?;

    let result = run_cmd(&[path_arg(&file)?], None)?;
    if result.code != Some(1) {
        return Err(format!("expected exit code 1, got {:?}", result.code));
    }
    if !result.stdout.contains("Invalid operation") {
        return Err(format!("expected type error, got: {}", result.stdout));
    }
    Ok(())
}

#[test]
fn missing_file_is_reported() -> Result<(), String> {
    let result = run_cmd(&["/nonexistent/snakelet/script.py"], None)?;
    if result.status_ok {
        return Err("expected failure for missing file".into());
    }
    if !result.stdout.contains("Can not read input file") {
        return Err(format!("expected read error, got: {}", result.stdout));
    }
    Ok(())
}

#[test]
fn missing_argument_is_reported() -> Result<(), String> {
    let result = run_cmd(&[], None)?;
    if result.code != Some(1) {
        return Err(format!("expected exit code 1, got {:?}", result.code));
    }
    if result.stdout.is_empty() {
        return Err("expected usage message on stdout".into());
    }
    Ok(())
}

#[test]
fn token_dump() -> Result<(), String> {
    let file = write_script("tokens.py", "x = 1\n")?;

    let result = run_cmd(&["--tokens", path_arg(&file)?], None)?;
    if !result.status_ok {
        return Err(result.stdout);
    }
    let expected = "x NAME\n= ASSIGNOP\n1 UNSIGNEDINT\n\\n NEWLINE\n EOF\nlength of tokenlist 5\n";
    if result.stdout != expected {
        return Err(format!("unexpected token dump: {:?}", result.stdout));
    }
    Ok(())
}

#[test]
fn token_dump_json() -> Result<(), String> {
    let file = write_script("tokens_json.py", "if x:\n  pass\n")?;

    let result = run_cmd(&["--tokens", "--json", path_arg(&file)?], None)?;
    if !result.status_ok {
        return Err(result.stdout);
    }
    let tokens: Value = serde_json::from_str(&result.stdout).map_err(|e| e.to_string())?;
    let tokens = tokens.as_array().ok_or("expected a JSON array")?;
    let kinds: Vec<&str> = tokens
        .iter()
        .filter_map(|t| t.get("kind").and_then(Value::as_str))
        .collect();
    if kinds
        != [
            "If", "Name", "Colon", "Newline", "Indent", "Pass", "Newline", "Dedent", "Eof",
        ]
    {
        return Err(format!("unexpected kinds: {:?}", kinds));
    }
    Ok(())
}

#[test]
fn iteration_limit_flag() -> Result<(), String> {
    let file = write_script("forever.py", "while True:\n    pass\n")?;

    let result = run_cmd(&["--max-iterations", "5", path_arg(&file)?], None)?;
    if result.code != Some(1) {
        return Err(format!("expected exit code 1, got {:?}", result.code));
    }
    if !result.stdout.contains("Too many iterations (limit: 5)") {
        return Err(format!("expected loop limit, got: {}", result.stdout));
    }
    Ok(())
}

#[test]
fn reads_console_input() -> Result<(), String> {
    let file = write_script("double.py", "n = int(input('n? '))\nprint(n * 2)\n")?;

    let result = run_cmd(&[path_arg(&file)?], Some("21\n"))?;
    if !result.status_ok {
        return Err(format!("{}{}", result.stdout, result.stderr));
    }
    if result.stdout != "n? 42\n" {
        return Err(format!("unexpected output: {:?}", result.stdout));
    }
    Ok(())
}
