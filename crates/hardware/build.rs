use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=KYBERLINK_SIM_DIR");

    if env::var_os("CARGO_FEATURE_VERILATOR").is_none() {
        return;
    }

    // Directory holding libkyber_sim produced by the Verilator build
    let dir = env::var("KYBERLINK_SIM_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("sim/verilator/obj_dir"));
    let dir = std::path::absolute(&dir).unwrap_or(dir);

    println!("cargo:rustc-link-search=native={}", dir.display());
    println!("cargo:rustc-link-lib=dylib=kyber_sim");
}
