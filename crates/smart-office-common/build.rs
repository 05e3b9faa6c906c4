//! ---
//! so_section: "01-core-functionality"
//! so_subsection: "build"
//! so_type: "source"
//! so_scope: "build"
//! so_description: "Emits build and git metadata consumed by the version module."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Without `fail_on_error` vergen falls back to placeholder values outside a git checkout.
    EmitBuilder::builder()
        .all_build()
        .all_git()
        .emit()?;

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
