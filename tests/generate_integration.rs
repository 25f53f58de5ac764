//! Integration tests for template lookup and generation

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use bspgen::{generate, Controller, GenerateError, GenerationRequest, Registry};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn bundled_registry() -> Registry {
    Registry::builtin().with_base_path(repo_root())
}

fn bundled_template(controller: Controller) -> Vec<u8> {
    fs::read(repo_root().join(controller.template_path())).expect("bundled template readable")
}

#[test]
fn test_bundled_templates_exist() {
    for c in Controller::ALL {
        let path = repo_root().join(c.template_path());
        assert!(path.is_file(), "missing bundled template {}", path.display());
    }
}

#[test]
fn test_generate_is_byte_identical_for_any_case() {
    let dir = TempDir::new().unwrap();
    let registry = bundled_registry();

    for c in Controller::ALL {
        let id = c.identifier();
        for variant in [id.to_string(), id.to_uppercase(), capitalize(id)] {
            let output = dir.path().join(format!("{}.c", variant));
            let request = GenerationRequest::new(variant.clone()).with_output(&output);
            let generated = generate(&registry, &request).expect("should generate");

            assert_eq!(generated.output, output);
            assert_eq!(generated.template, repo_root().join(c.template_path()));
            let written = fs::read(&output).unwrap();
            assert_eq!(generated.bytes, written.len() as u64);
            assert_eq!(written, bundled_template(*c));
        }
    }
}

#[test]
fn test_unsupported_target_leaves_existing_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bsp_mycpu.c");
    fs::write(&output, "previous contents").unwrap();

    let request = GenerationRequest::new("esp32").with_output(&output);
    let err = generate(&bundled_registry(), &request).unwrap_err();

    assert!(matches!(err, GenerateError::Unsupported { ref target } if target == "esp32"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous contents");
}

#[test]
fn test_unsupported_target_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.c");

    let request = GenerationRequest::new("esp32").with_output(&output);
    assert!(generate(&bundled_registry(), &request).is_err());
    assert!(!output.exists());
}

#[test]
fn test_generate_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bsp.c");
    let request = GenerationRequest::new("stm32f4").with_output(&output);
    let registry = bundled_registry();

    generate(&registry, &request).unwrap();
    let first = fs::read(&output).unwrap();
    generate(&registry, &request).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, bundled_template(Controller::Stm32f4));
}

#[test]
fn test_generate_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bsp.c");
    fs::write(&output, "stale stale stale stale stale stale stale stale stale").unwrap();

    let request = GenerationRequest::new("stm32f4").with_output(&output);
    generate(&bundled_registry(), &request).unwrap();

    assert_eq!(fs::read(&output).unwrap(), bundled_template(Controller::Stm32f4));
}

#[test]
fn test_output_directory_receives_template_file_name() {
    let dir = TempDir::new().unwrap();
    let outdir = dir.path().join("outdir");
    fs::create_dir(&outdir).unwrap();

    let request = GenerationRequest::new("stm32f4").with_output(&outdir);
    let generated = generate(&bundled_registry(), &request).unwrap();

    assert_eq!(generated.output, outdir);
    assert_eq!(
        fs::read(outdir.join("bsp.c")).unwrap(),
        bundled_template(Controller::Stm32f4)
    );
}

#[test]
fn test_missing_template_behaves_as_unsupported() {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("templates");
    write_template(&templates, "stm32f4/bsp.c", "int main(void);\n");
    let registry = Registry::from_str("[targets]\nstm32f4 = \"stm32f4/bsp.c\"\n")
        .unwrap()
        .with_base_path(templates.clone());

    fs::remove_file(templates.join("stm32f4/bsp.c")).unwrap();

    let output = dir.path().join("bsp.c");
    let request = GenerationRequest::new("stm32f4").with_output(&output);
    let err = generate(&registry, &request).unwrap_err();

    assert!(err.is_unsupported());
    assert_eq!(err.to_string(), "Controller 'stm32f4' not supported.");
    assert!(!output.exists());
}

#[test]
fn test_registry_file_targets() {
    let dir = TempDir::new().unwrap();
    write_template(dir.path(), "rp2040/bsp.c", "/* rp2040 */\n");
    let registry_path = dir.path().join("registry.toml");
    fs::write(
        &registry_path,
        format!(
            "[metadata]\nbase_dir = {:?}\n\n[targets]\nRP2040 = \"rp2040/bsp.c\"\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let registry = Registry::from_file(&registry_path).unwrap();
    assert!(!registry.contains("stm32f4"));

    let output = dir.path().join("out.c");
    let request = GenerationRequest::new("rp2040").with_output(&output);
    generate(&registry, &request).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "/* rp2040 */\n");
}

#[test]
fn test_copy_failure_is_io_error() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no/such/dir/bsp.c");

    let request = GenerationRequest::new("stm32f4").with_output(&output);
    let err = generate(&bundled_registry(), &request).unwrap_err();

    assert!(!err.is_unsupported());
    assert!(matches!(err, GenerateError::Io { ref to, .. } if to == &output));
}

#[test]
fn test_output_same_as_template_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_template(dir.path(), "bsp.c", "keep me\n");
    let registry = Registry::from_str("[targets]\nboard = \"bsp.c\"\n")
        .unwrap()
        .with_base_path(dir.path().to_path_buf());

    let request = GenerationRequest::new("board").with_output(dir.path().join("bsp.c"));
    let err = generate(&registry, &request).unwrap_err();

    assert!(matches!(err, GenerateError::Io { .. }));
    assert_eq!(fs::read_to_string(dir.path().join("bsp.c")).unwrap(), "keep me\n");
}

fn write_template(base: &Path, relative: &str, content: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
