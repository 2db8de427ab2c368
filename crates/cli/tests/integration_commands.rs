//! Integration tests for individual commands


use integration_test_helpers::*;

#[test]
fn test_gen_keys_env_output() {
    let project = TestProject::new();

    let stdout = project.run_command_success(&["gen", "keys", "--project-ref", PROJECT_REF]);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines.contains(&"NEXT_PUBLIC_SUPABASE_URL=\"https://abcdefghijklmnopqrst.supabase.co\""));
    assert!(lines
        .iter()
        .any(|l| l.starts_with("SUPABASE_AUTH_ANON_KEY=\"sb_publishable_")));
    assert!(lines
        .iter()
        .any(|l| l.starts_with("SUPABASE_AUTH_SERVICE_ROLE_KEY=\"sb_secret_")));
}

#[test]
fn test_gen_keys_json_output_with_overrides() {
    let project = TestProject::new();

    let stdout = project.run_command_success(&[
        "gen",
        "keys",
        "--project-ref",
        PROJECT_REF,
        "--output",
        "json",
        "--override-name",
        "api.url=SUPABASE_URL,auth.anon_key=SUPABASE_ANON_KEY",
    ]);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 5);
    assert_eq!(
        object["SUPABASE_URL"],
        "https://abcdefghijklmnopqrst.supabase.co"
    );
    assert!(object.contains_key("SUPABASE_ANON_KEY"));
    assert!(!object.contains_key("SUPABASE_AUTH_ANON_KEY"));
}

#[test]
fn test_gen_keys_environment_overlay() {
    let project = TestProject::new()
        .with_env("SUPABASE_GEN_KEYS_DB_PASSWORD", "PGPASSWORD")
        .with_env("SUPABASE_GEN_KEYS_API_URL", "FROM_ENV");

    let stdout = project.run_command_success(&[
        "gen",
        "keys",
        "--project-ref",
        PROJECT_REF,
        "-o",
        "yaml",
        "--override-name",
        "api.url=FROM_FLAG",
    ]);

    assert!(stdout.lines().any(|l| l.starts_with("PGPASSWORD:")));
    assert!(stdout
        .lines()
        .any(|l| l.starts_with("FROM_FLAG:") && l.contains("abcdefghijklmnopqrst.supabase.co")));
    assert!(!stdout.contains("FROM_ENV"));
}

#[test]
fn test_gen_keys_toml_output_for_linked_project() {
    let project = TestProject::linked(PROJECT_REF);

    let stdout = project.run_command_success(&["gen", "keys", "-o", "toml"]);

    assert!(stdout.contains("NEXT_PUBLIC_SUPABASE_URL = \"https://abcdefghijklmnopqrst.supabase.co\""));
}

#[test]
fn test_gen_keys_project_ref_from_environment() {
    let project = TestProject::new().with_env("SUPABASE_PROJECT_ID", PROJECT_REF);

    let stdout = project.run_command_success(&["gen", "keys"]);

    assert!(stdout.contains("https://abcdefghijklmnopqrst.supabase.co"));
}

#[test]
fn test_gen_keys_workdir_flag() {
    let project = TestProject::linked(PROJECT_REF);
    let elsewhere = TestProject::new();
    let workdir = project.project_path.to_string_lossy().to_string();

    let stdout = elsewhere.run_command_success(&["gen", "keys", "--workdir", &workdir]);

    assert!(stdout.contains("https://abcdefghijklmnopqrst.supabase.co"));
}

#[test]
fn test_completion_command() {
    let project = TestProject::new();

    let stdout = project.run_command_success(&["completion", "bash"]);

    assert!(stdout.contains("supactl"));
    assert!(stdout.contains("typescript"));
}

#[test]
fn test_help_lists_typescript_examples() {
    let project = TestProject::new();

    let stdout = project.run_command_success(&["gen", "types", "typescript", "--help"]);

    assert!(stdout.contains("--postgrest-v9-compat"));
    assert!(stdout.contains("supactl gen types typescript --local"));
}
