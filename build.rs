//! The firmware needs the compiled UI and the nRF5340 memory layout, host
//! builds of the library need neither.

fn main() {
    #[cfg(feature = "firmware")]
    firmware::build();
}

#[cfg(feature = "firmware")]
mod firmware {
    use std::env;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    pub fn build() {
        // Put `memory.x` in our output directory and ensure it's
        // on the linker search path.
        let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
        File::create(out.join("memory.x"))
            .unwrap()
            .write_all(include_bytes!("memory.x"))
            .unwrap();
        println!("cargo:rustc-link-search={}", out.display());
        println!("cargo:rerun-if-changed=memory.x");

        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

        let config = slint_build::CompilerConfiguration::new()
            .embed_resources(slint_build::EmbedResourcesKind::EmbedForSoftwareRenderer);
        slint_build::compile_with_config("ui/hello.slint", config).unwrap();
    }
}
