// File: crates/figure-core/build.rs
// Summary: Links the Windows system libraries Skia's font manager and ICU need.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // build scripts run on the host; check the target instead of cfg!
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW
        println!("cargo:rustc-link-lib=advapi32");
    }
}
