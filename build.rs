use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x based on target
    let target = env::var("TARGET").unwrap_or_default();
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));

    if target.starts_with("thumbv6m") {
        // Pico 1: copy memory.x to OUT_DIR so the linker script can find it
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory.x");
    }

    // 2) Load optional env files (still supported for convenience)
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");

    // 3) Session lengths the configuration phase starts from
    let study_minutes = env_or_default("POMODORO_STUDY_MINUTES", "25");
    let rest_minutes = env_or_default("POMODORO_REST_MINUTES", "5");

    for (key, value) in [
        ("POMODORO_STUDY_MINUTES", &study_minutes),
        ("POMODORO_REST_MINUTES", &rest_minutes),
    ] {
        if value.parse::<u8>().map_or(true, |minutes| minutes > 95) {
            println!("cargo:warning={key}={value} is outside 0..=95; it will be clamped");
        }
    }

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=POMODORO_STUDY_MINUTES={study_minutes}");
    println!("cargo:rustc-env=POMODORO_REST_MINUTES={rest_minutes}");

    println!("cargo:rerun-if-env-changed=POMODORO_STUDY_MINUTES");
    println!("cargo:rerun-if-env-changed=POMODORO_REST_MINUTES");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
