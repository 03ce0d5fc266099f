fn main() {
    // `tauri_build::build()` normally emits these; declare them up front so
    // core-only builds keep `check-cfg` happy too.
    println!("cargo:rustc-check-cfg=cfg(desktop)");
    println!("cargo:rustc-check-cfg=cfg(mobile)");

    // Core-only unit tests (`--no-default-features`) do not compile the Tauri
    // runtime stack, and `tauri_build::build()` reads env vars the `tauri`
    // crate exports (e.g. `DEP_TAURI_DEV`), so skip the build helpers there.
    if std::env::var_os("CARGO_FEATURE_APP").is_some() {
        tauri_build::build()
    }
}
