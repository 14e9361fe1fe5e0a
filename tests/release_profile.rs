// Shift violations must end the process in release builds rather than unwind into callers.
const MANIFEST: &str = include_str!("../Cargo.toml");

fn release_profile_lines() -> Vec<&'static str> {
    MANIFEST
        .lines()
        .map(str::trim)
        .skip_while(|l| *l != "[profile.release]")
        .skip(1)
        .take_while(|l| !l.starts_with('['))
        .filter(|l| !l.is_empty())
        .collect()
}

#[test]
fn release_profile_aborts_on_panic() {
    let lines = release_profile_lines();
    assert!(!lines.is_empty(), "missing [profile.release]");
    assert!(lines.contains(&"panic = \"abort\""), "release profile must abort on panic: {:?}", lines);
}

#[test]
fn release_profile_keeps_full_optimization() {
    let lines = release_profile_lines();
    for want in ["opt-level = 3", "lto = true", "codegen-units = 1"] {
        assert!(lines.contains(&want), "missing {:?} in {:?}", want, lines);
    }
}
