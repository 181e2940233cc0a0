//! Records the rustc version the service is compiled with, reported as the
//! runtime version in the `system` section.

fn main() {
    let version = match rustc_version::version() {
        Ok(v) => format!("{}.{}.{}", v.major, v.minor, v.patch),
        Err(e) => {
            println!("cargo:warning=Unable to determine rustc version: {}", e);
            "unknown".to_string()
        }
    };

    println!("cargo:rustc-env=RUSTC_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=RUSTC");
}
